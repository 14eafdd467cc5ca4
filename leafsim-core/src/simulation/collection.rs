use crate::organ::Organ;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;

/// Label of an organ in a collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum OrganKey {
    Index(usize),
    Name(String),
}

impl fmt::Display for OrganKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrganKey::Index(i) => write!(f, "{}", i),
            OrganKey::Name(name) => write!(f, "{}", name),
        }
    }
}

impl From<usize> for OrganKey {
    fn from(value: usize) -> Self {
        OrganKey::Index(value)
    }
}

impl From<&str> for OrganKey {
    fn from(value: &str) -> Self {
        OrganKey::Name(value.to_string())
    }
}

/// Anything that can be simulated organ by organ.
///
/// Organs are visited in a deterministic order: index order for sequences, key order
/// for maps.
pub trait OrganCollection {
    fn organs(&self) -> Vec<(OrganKey, &Organ)>;

    fn organs_mut(&mut self) -> Vec<(OrganKey, &mut Organ)>;
}

impl OrganCollection for Organ {
    fn organs(&self) -> Vec<(OrganKey, &Organ)> {
        vec![(OrganKey::Index(0), self)]
    }

    fn organs_mut(&mut self) -> Vec<(OrganKey, &mut Organ)> {
        vec![(OrganKey::Index(0), self)]
    }
}

impl OrganCollection for [Organ] {
    fn organs(&self) -> Vec<(OrganKey, &Organ)> {
        self.iter()
            .enumerate()
            .map(|(i, organ)| (OrganKey::Index(i), organ))
            .collect()
    }

    fn organs_mut(&mut self) -> Vec<(OrganKey, &mut Organ)> {
        self.iter_mut()
            .enumerate()
            .map(|(i, organ)| (OrganKey::Index(i), organ))
            .collect()
    }
}

impl OrganCollection for Vec<Organ> {
    fn organs(&self) -> Vec<(OrganKey, &Organ)> {
        self.as_slice().organs()
    }

    fn organs_mut(&mut self) -> Vec<(OrganKey, &mut Organ)> {
        self.as_mut_slice().organs_mut()
    }
}

impl<K: fmt::Display + Ord> OrganCollection for BTreeMap<K, Organ> {
    fn organs(&self) -> Vec<(OrganKey, &Organ)> {
        self.iter()
            .map(|(key, organ)| (OrganKey::Name(key.to_string()), organ))
            .collect()
    }

    fn organs_mut(&mut self) -> Vec<(OrganKey, &mut Organ)> {
        self.iter_mut()
            .map(|(key, organ)| (OrganKey::Name(key.to_string()), organ))
            .collect()
    }
}

impl<K: fmt::Display + Ord, S: BuildHasher> OrganCollection for HashMap<K, Organ, S> {
    fn organs(&self) -> Vec<(OrganKey, &Organ)> {
        let mut entries: Vec<(&K, &Organ)> = self.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
            .into_iter()
            .map(|(key, organ)| (OrganKey::Name(key.to_string()), organ))
            .collect()
    }

    fn organs_mut(&mut self) -> Vec<(OrganKey, &mut Organ)> {
        let mut entries: Vec<(&K, &mut Organ)> = self.iter_mut().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
            .into_iter()
            .map(|(key, organ)| (OrganKey::Name(key.to_string()), organ))
            .collect()
    }
}
