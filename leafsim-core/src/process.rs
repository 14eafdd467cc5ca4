//! Process families and the traits their strategies implement.
//!
//! Each process has an open set of strategies. A strategy declares the variables it
//! reads and writes through [`definitions`](EnergyModel::definitions), independently of
//! its algorithm, which is what the readiness checks in [`crate::model::validation`]
//! operate on.
//!
//! Strategies are serialized as tagged trait objects with `typetag`, so a
//! [`ModelList`](crate::model::ModelList) can be read from a configuration document.

use crate::atmosphere::Atmosphere;
use crate::constants::Constants;
use crate::errors::LeafResult;
use crate::model::ModelList;
use crate::status::Status;
use crate::variable::{Variable, VariableSet};
use crate::FloatValue;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};

/// The physical processes of an organ, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Process {
    LightInterception,
    EnergyBalance,
    Photosynthesis,
    StomatalConductance,
}

impl Process {
    pub const PIPELINE: [Process; 4] = [
        Process::LightInterception,
        Process::EnergyBalance,
        Process::Photosynthesis,
        Process::StomatalConductance,
    ];
}

impl fmt::Display for Process {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Process::LightInterception => "light interception",
            Process::EnergyBalance => "energy balance",
            Process::Photosynthesis => "photosynthesis",
            Process::StomatalConductance => "stomatal conductance",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequirementType {
    Input,
    Output,
}

/// A variable read or written by a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementDefinition {
    pub variable: Variable,
    pub requirement_type: RequirementType,
}

impl RequirementDefinition {
    pub fn input(variable: Variable) -> Self {
        Self {
            variable,
            requirement_type: RequirementType::Input,
        }
    }

    pub fn output(variable: Variable) -> Self {
        Self {
            variable,
            requirement_type: RequirementType::Output,
        }
    }
}

fn select(
    definitions: &[RequirementDefinition],
    requirement_type: RequirementType,
) -> VariableSet {
    definitions
        .iter()
        .filter(|d| d.requirement_type == requirement_type)
        .map(|d| d.variable)
        .collect()
}

/// Variables read by a strategy.
pub fn inputs(definitions: &[RequirementDefinition]) -> VariableSet {
    select(definitions, RequirementType::Input)
}

/// Variables written by a strategy.
pub fn outputs(definitions: &[RequirementDefinition]) -> VariableSet {
    select(definitions, RequirementType::Output)
}

/// Outcome of an iterative energy balance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Convergence {
    Converged {
        iterations: usize,
    },
    /// The iteration cap was reached; `residual` is the last leaf temperature update (K).
    Diverged {
        iterations: usize,
        residual: FloatValue,
    },
}

impl Convergence {
    pub fn iterations(&self) -> usize {
        match self {
            Convergence::Converged { iterations } => *iterations,
            Convergence::Diverged { iterations, .. } => *iterations,
        }
    }

    pub fn is_converged(&self) -> bool {
        matches!(self, Convergence::Converged { .. })
    }
}

/// Linear response of stomatal conductance to assimilation.
///
/// $$ G_s = \max(g_{s,min}, g_0 + s A) $$
///
/// Photosynthesis strategies use `g0` and `slope` to solve the coupled
/// supply/demand system analytically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConductanceResponse {
    /// Residual conductance (mol m-2 s-1)
    pub g0: FloatValue,
    /// Sensitivity of the conductance to assimilation (mol μmol-1)
    pub slope: FloatValue,
    /// Floor applied to the conductance (mol m-2 s-1)
    pub gs_min: FloatValue,
}

impl ConductanceResponse {
    pub fn conductance(&self, assimilation: FloatValue) -> FloatValue {
        (self.g0 + self.slope * assimilation).max(self.gs_min)
    }
}

/// Everything a strategy can read besides the status.
#[derive(Debug, Clone, Copy)]
pub struct ProcessContext<'a> {
    pub models: &'a ModelList,
    pub atmosphere: &'a Atmosphere,
    pub constants: &'a Constants,
}

impl<'a> ProcessContext<'a> {
    pub fn new(models: &'a ModelList, atmosphere: &'a Atmosphere, constants: &'a Constants) -> Self {
        Self {
            models,
            atmosphere,
            constants,
        }
    }

    /// Run the assimilation side of the organ: photosynthesis, then stomatal
    /// conductance when the photosynthesis strategy is not coupled to it.
    ///
    /// With neither model attached this is a no-op and the stomatal conductance is
    /// expected to be initialized in the status.
    pub fn run_assimilation(&self, status: &mut Status) -> LeafResult<()> {
        let photosynthesis = self.models.photosynthesis();
        if let Some(model) = photosynthesis {
            model.run(self, status)?;
        }
        if let Some(model) = self.models.stomatal_conductance() {
            let coupled = photosynthesis.is_some_and(|p| p.uses_stomatal_conductance());
            if !coupled {
                model.run(self, status)?;
            }
        }
        Ok(())
    }
}

/// Absorbed radiation of the organ.
#[typetag::serde(tag = "type")]
pub trait InterceptionModel: Debug + Send + Sync {
    fn definitions(&self) -> Vec<RequirementDefinition>;

    fn run(&self, context: &ProcessContext, status: &mut Status) -> LeafResult<()>;
}

/// Leaf energy balance.
///
/// Energy models drive the assimilation side of the organ
/// ([`ProcessContext::run_assimilation`]) at every iteration.
#[typetag::serde(tag = "type")]
pub trait EnergyModel: Debug + Send + Sync {
    fn definitions(&self) -> Vec<RequirementDefinition>;

    fn run(&self, context: &ProcessContext, status: &mut Status) -> LeafResult<Convergence>;
}

/// CO2 assimilation.
#[typetag::serde(tag = "type")]
pub trait PhotosynthesisModel: Debug + Send + Sync {
    fn definitions(&self) -> Vec<RequirementDefinition>;

    /// Whether the strategy needs a stomatal conductance model to close its system.
    fn uses_stomatal_conductance(&self) -> bool {
        true
    }

    fn run(&self, context: &ProcessContext, status: &mut Status) -> LeafResult<()>;
}

/// Stomatal conductance to CO2.
#[typetag::serde(tag = "type")]
pub trait StomatalConductanceModel: Debug + Send + Sync {
    fn definitions(&self) -> Vec<RequirementDefinition>;

    /// Conductance response to assimilation for the current status.
    fn response(&self, context: &ProcessContext, status: &Status) -> LeafResult<ConductanceResponse>;

    /// Compute the conductance from the assimilation already in the status.
    fn run(&self, context: &ProcessContext, status: &mut Status) -> LeafResult<()> {
        let response = self.response(context, status)?;
        let assimilation = status.require(Variable::Assimilation, Process::StomatalConductance)?;
        status.set(
            Variable::StomatalConductance,
            response.conductance(assimilation),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use is_close::is_close;

    #[test]
    fn test_conductance_response_floor() {
        let response = ConductanceResponse {
            g0: 0.03,
            slope: 0.05,
            gs_min: 1e-3,
        };
        assert!(is_close!(response.conductance(10.0), 0.53));
        assert_eq!(response.conductance(-100.0), 1e-3);
    }

    #[test]
    fn test_inputs_outputs() {
        let definitions = vec![
            RequirementDefinition::input(Variable::SurfaceCo2),
            RequirementDefinition::input(Variable::AbsorbedPpfd),
            RequirementDefinition::output(Variable::Assimilation),
        ];
        assert_eq!(inputs(&definitions).len(), 2);
        assert!(outputs(&definitions).contains(Variable::Assimilation));
    }

    #[test]
    fn test_convergence() {
        let converged = Convergence::Converged { iterations: 3 };
        let diverged = Convergence::Diverged {
            iterations: 10,
            residual: 0.5,
        };
        assert!(converged.is_converged());
        assert!(!diverged.is_converged());
        assert_eq!(diverged.iterations(), 10);
    }
}
