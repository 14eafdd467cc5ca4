//! The set of strategies attached to an organ.
//!
//! A [`ModelList`] holds at most one strategy per [`Process`]. Strategies are
//! immutable and shared between organs through [`Arc`], so cloning a model list is
//! cheap.
//!
//! The list knows in which order the processes run and which processes are nested
//! under another one: when an energy model is attached it drives photosynthesis and
//! stomatal conductance at each iteration, and a photosynthesis strategy coupled to
//! stomatal conductance drives the conductance model.

mod builder;
pub mod validation;

pub use builder::ModelListBuilder;

use crate::process::{
    self, EnergyModel, InterceptionModel, PhotosynthesisModel, Process, RequirementDefinition,
    StomatalConductanceModel,
};
use crate::variable::VariableSet;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A top-level unit of work: one process and the processes it drives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    pub process: Process,
    pub nested: Vec<Process>,
}

impl Stage {
    /// The stage's process followed by its nested processes.
    pub fn processes(&self) -> impl Iterator<Item = Process> + '_ {
        std::iter::once(self.process).chain(self.nested.iter().copied())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelList {
    pub light_interception: Option<Arc<dyn InterceptionModel>>,
    pub energy_balance: Option<Arc<dyn EnergyModel>>,
    pub photosynthesis: Option<Arc<dyn PhotosynthesisModel>>,
    pub stomatal_conductance: Option<Arc<dyn StomatalConductanceModel>>,
}

impl ModelList {
    pub fn builder() -> ModelListBuilder {
        ModelListBuilder::new()
    }

    pub fn light_interception(&self) -> Option<&dyn InterceptionModel> {
        self.light_interception.as_deref()
    }

    pub fn energy_balance(&self) -> Option<&dyn EnergyModel> {
        self.energy_balance.as_deref()
    }

    pub fn photosynthesis(&self) -> Option<&dyn PhotosynthesisModel> {
        self.photosynthesis.as_deref()
    }

    pub fn stomatal_conductance(&self) -> Option<&dyn StomatalConductanceModel> {
        self.stomatal_conductance.as_deref()
    }

    pub fn is_attached(&self, process: Process) -> bool {
        match process {
            Process::LightInterception => self.light_interception.is_some(),
            Process::EnergyBalance => self.energy_balance.is_some(),
            Process::Photosynthesis => self.photosynthesis.is_some(),
            Process::StomatalConductance => self.stomatal_conductance.is_some(),
        }
    }

    /// Attached processes, in pipeline order.
    pub fn processes(&self) -> Vec<Process> {
        Process::PIPELINE
            .into_iter()
            .filter(|p| self.is_attached(*p))
            .collect()
    }

    /// Declared inputs and outputs of the strategy attached to `process`.
    ///
    /// Empty when no strategy is attached.
    pub fn definitions(&self, process: Process) -> Vec<RequirementDefinition> {
        match process {
            Process::LightInterception => self
                .light_interception()
                .map(|m| m.definitions())
                .unwrap_or_default(),
            Process::EnergyBalance => self
                .energy_balance()
                .map(|m| m.definitions())
                .unwrap_or_default(),
            Process::Photosynthesis => self
                .photosynthesis()
                .map(|m| m.definitions())
                .unwrap_or_default(),
            Process::StomatalConductance => self
                .stomatal_conductance()
                .map(|m| m.definitions())
                .unwrap_or_default(),
        }
    }

    pub fn inputs(&self, process: Process) -> VariableSet {
        process::inputs(&self.definitions(process))
    }

    pub fn outputs(&self, process: Process) -> VariableSet {
        process::outputs(&self.definitions(process))
    }

    /// Every variable declared by any attached strategy.
    pub fn variables(&self) -> VariableSet {
        Process::PIPELINE
            .into_iter()
            .fold(VariableSet::empty(), |acc, p| {
                acc.union(&self.inputs(p)).union(&self.outputs(p))
            })
    }

    fn conductance_is_coupled(&self) -> bool {
        self.photosynthesis()
            .is_some_and(|p| p.uses_stomatal_conductance())
    }

    /// The stage that runs `process` on its own, or `None` if no strategy is attached.
    pub fn stage(&self, process: Process) -> Option<Stage> {
        if !self.is_attached(process) {
            return None;
        }
        let nested = match process {
            Process::EnergyBalance => [Process::Photosynthesis, Process::StomatalConductance]
                .into_iter()
                .filter(|p| self.is_attached(*p))
                .collect(),
            Process::Photosynthesis
                if self.conductance_is_coupled() && self.stomatal_conductance.is_some() =>
            {
                vec![Process::StomatalConductance]
            }
            _ => vec![],
        };
        Some(Stage { process, nested })
    }

    /// Top-level stages of a full run, in pipeline order.
    ///
    /// A process nested under an earlier stage is not scheduled again.
    pub fn schedule(&self) -> Vec<Stage> {
        let mut stages: Vec<Stage> = Vec::new();
        for process in Process::PIPELINE {
            if stages.iter().any(|s| s.nested.contains(&process)) {
                continue;
            }
            if let Some(stage) = self.stage(process) {
                stages.push(stage);
            }
        }
        stages
    }
}
