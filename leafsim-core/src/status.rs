//! Per time-step state of an organ.
//!
//! A [`Status`] holds one slot per [`Variable`] and an initialized bitset, so an unset
//! variable can always be told apart from a variable that is set to zero.

use crate::errors::{LeafError, LeafResult};
use crate::process::{Convergence, Process};
use crate::variable::{Variable, VariableSet};
use crate::FloatValue;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct Status {
    values: [FloatValue; Variable::COUNT],
    initialized: VariableSet,
    convergence: Option<Convergence>,
}

impl Default for Status {
    fn default() -> Self {
        Self::new()
    }
}

impl Status {
    /// A status where no variable is initialized.
    pub fn new() -> Self {
        Self {
            values: [FloatValue::NAN; Variable::COUNT],
            initialized: VariableSet::empty(),
            convergence: None,
        }
    }

    pub fn from_values(values: impl IntoIterator<Item = (Variable, FloatValue)>) -> Self {
        let mut status = Self::new();
        for (variable, value) in values {
            status.set(variable, value);
        }
        status
    }

    /// Value of `variable`, or `None` if it was never set.
    pub fn get(&self, variable: Variable) -> Option<FloatValue> {
        if self.initialized.contains(variable) {
            Some(self.values[variable.index()])
        } else {
            None
        }
    }

    /// Value of a variable that `process` cannot run without.
    pub fn require(&self, variable: Variable, process: Process) -> LeafResult<FloatValue> {
        self.get(variable)
            .ok_or_else(|| LeafError::uninitialized(process, variable))
    }

    pub fn set(&mut self, variable: Variable, value: FloatValue) {
        self.values[variable.index()] = value;
        self.initialized.insert(variable);
    }

    pub fn unset(&mut self, variable: Variable) {
        self.values[variable.index()] = FloatValue::NAN;
        self.initialized.remove(variable);
    }

    pub fn is_initialized(&self, variable: Variable) -> bool {
        self.initialized.contains(variable)
    }

    pub fn initialized(&self) -> VariableSet {
        self.initialized
    }

    /// Variables of `required` that are not initialized.
    pub fn missing(&self, required: &VariableSet) -> VariableSet {
        required.difference(&self.initialized)
    }

    /// Initialized variables and their values, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Variable, FloatValue)> + '_ {
        self.initialized
            .iter()
            .map(move |v| (v, self.values[v.index()]))
    }

    /// Outcome of the last energy balance, if one ran.
    pub fn convergence(&self) -> Option<Convergence> {
        self.convergence
    }

    pub fn set_convergence(&mut self, convergence: Convergence) {
        self.convergence = Some(convergence);
    }

    /// Number of energy balance iterations of the last run.
    pub fn iterations(&self) -> Option<usize> {
        self.convergence.map(|c| c.iterations())
    }

    pub fn to_hashmap(&self) -> HashMap<&'static str, FloatValue> {
        self.iter().map(|(v, value)| (v.name(), value)).collect()
    }
}

// Slots of unset variables hold NaN and are ignored.
impl PartialEq for Status {
    fn eq(&self, other: &Self) -> bool {
        self.initialized == other.initialized
            && self.convergence == other.convergence
            && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let extra = usize::from(self.convergence.is_some()) * 2;
        let mut map = serializer.serialize_map(Some(self.initialized.len() + extra))?;
        for (variable, value) in self.iter() {
            map.serialize_entry(variable.name(), &value)?;
        }
        if let Some(convergence) = self.convergence {
            map.serialize_entry("iterations", &convergence.iterations())?;
            map.serialize_entry("converged", &convergence.is_converged())?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_is_distinguishable_from_zero() {
        let mut status = Status::new();
        assert_eq!(status.get(Variable::Assimilation), None);

        status.set(Variable::Assimilation, 0.0);
        assert_eq!(status.get(Variable::Assimilation), Some(0.0));
        assert!(status.is_initialized(Variable::Assimilation));

        status.unset(Variable::Assimilation);
        assert!(!status.is_initialized(Variable::Assimilation));
    }

    #[test]
    fn test_require() {
        let status = Status::from_values([(Variable::LeafTemperature, 25.0)]);
        assert_eq!(
            status
                .require(Variable::LeafTemperature, Process::Photosynthesis)
                .unwrap(),
            25.0
        );

        match status.require(Variable::SurfaceCo2, Process::Photosynthesis) {
            Err(LeafError::Uninitialized { process, variables }) => {
                assert_eq!(process, Process::Photosynthesis);
                assert!(variables.contains(Variable::SurfaceCo2));
                assert_eq!(variables.len(), 1);
            }
            other => panic!("expected an uninitialized error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing() {
        let status = Status::from_values([(Variable::Dimension, 0.03)]);
        let required: VariableSet = [Variable::Dimension, Variable::SkyFraction]
            .into_iter()
            .collect();
        let missing = status.missing(&required);
        assert_eq!(missing.len(), 1);
        assert!(missing.contains(Variable::SkyFraction));
    }

    #[test]
    fn test_iterations() {
        let mut status = Status::from_values([(Variable::SkyFraction, 0.5)]);
        assert_eq!(status.iterations(), None);

        status.set_convergence(Convergence::Converged { iterations: 3 });
        assert_eq!(status.iterations(), Some(3));
        assert!(status.convergence().unwrap().is_converged());
    }

    #[test]
    fn test_equality_ignores_unset_slots() {
        let a = Status::from_values([(Variable::Assimilation, 12.0)]);
        let mut b = Status::from_values([(Variable::Assimilation, 12.0), (Variable::Dimension, 1.0)]);
        assert_ne!(a, b);
        b.unset(Variable::Dimension);
        assert_eq!(a, b);
    }

    #[test]
    fn test_serialization() {
        let mut status = Status::from_values([(Variable::LeafTemperature, 17.5)]);
        status.set_convergence(Convergence::Diverged {
            iterations: 10,
            residual: 0.2,
        });

        let value = serde_json::to_value(&status).unwrap();
        assert_eq!(value["Temperature|Leaf"], 17.5);
        assert_eq!(value["iterations"], 10);
        assert_eq!(value["converged"], false);
    }
}
