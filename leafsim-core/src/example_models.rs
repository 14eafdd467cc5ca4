//! Minimal strategies used by the tests of this crate.

use crate::errors::{LeafError, LeafResult};
use crate::process::{
    ConductanceResponse, Convergence, EnergyModel, InterceptionModel, PhotosynthesisModel,
    Process, ProcessContext, RequirementDefinition, StomatalConductanceModel,
};
use crate::status::Status;
use crate::variable::Variable;
use crate::FloatValue;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ExampleInterception {
    pub rs: FloatValue,
    pub ppfd: FloatValue,
}

#[typetag::serde]
impl InterceptionModel for ExampleInterception {
    fn definitions(&self) -> Vec<RequirementDefinition> {
        vec![
            RequirementDefinition::output(Variable::AbsorbedShortwave),
            RequirementDefinition::output(Variable::AbsorbedPpfd),
        ]
    }

    fn run(&self, _context: &ProcessContext, status: &mut Status) -> LeafResult<()> {
        status.set(Variable::AbsorbedShortwave, self.rs);
        status.set(Variable::AbsorbedPpfd, self.ppfd);
        Ok(())
    }
}

/// Leaf at air temperature, all absorbed shortwave goes to net radiation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ExampleEnergy;

#[typetag::serde]
impl EnergyModel for ExampleEnergy {
    fn definitions(&self) -> Vec<RequirementDefinition> {
        vec![
            RequirementDefinition::input(Variable::AbsorbedShortwave),
            RequirementDefinition::input(Variable::SkyFraction),
            RequirementDefinition::input(Variable::Dimension),
            RequirementDefinition::input(Variable::StomatalConductance),
            RequirementDefinition::output(Variable::LeafTemperature),
            RequirementDefinition::output(Variable::SurfaceCo2),
            RequirementDefinition::output(Variable::SurfaceVpd),
            RequirementDefinition::output(Variable::NetRadiation),
        ]
    }

    fn run(&self, context: &ProcessContext, status: &mut Status) -> LeafResult<Convergence> {
        let rs = status.require(Variable::AbsorbedShortwave, Process::EnergyBalance)?;
        status.set(Variable::LeafTemperature, context.atmosphere.temperature());
        status.set(Variable::SurfaceCo2, context.atmosphere.co2());
        status.set(Variable::SurfaceVpd, context.atmosphere.vpd());
        context.run_assimilation(status)?;
        status.set(Variable::NetRadiation, rs);
        Ok(Convergence::Converged { iterations: 1 })
    }
}

/// Fixed assimilation coupled to the attached conductance model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ExamplePhotosynthesis {
    pub a: FloatValue,
}

#[typetag::serde]
impl PhotosynthesisModel for ExamplePhotosynthesis {
    fn definitions(&self) -> Vec<RequirementDefinition> {
        vec![
            RequirementDefinition::input(Variable::AbsorbedPpfd),
            RequirementDefinition::input(Variable::LeafTemperature),
            RequirementDefinition::input(Variable::SurfaceCo2),
            RequirementDefinition::output(Variable::Assimilation),
            RequirementDefinition::output(Variable::StomatalConductance),
            RequirementDefinition::output(Variable::IntercellularCo2),
        ]
    }

    fn run(&self, context: &ProcessContext, status: &mut Status) -> LeafResult<()> {
        let cs = status.require(Variable::SurfaceCo2, Process::Photosynthesis)?;
        let gs = match context.models.stomatal_conductance() {
            Some(model) => model.response(context, status)?.conductance(self.a),
            None => 0.1,
        };
        status.set(Variable::Assimilation, self.a);
        status.set(Variable::StomatalConductance, gs);
        status.set(Variable::IntercellularCo2, cs - self.a / gs);
        Ok(())
    }
}

/// Photosynthesis that never finds a solution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ExampleInfeasiblePhotosynthesis;

#[typetag::serde]
impl PhotosynthesisModel for ExampleInfeasiblePhotosynthesis {
    fn definitions(&self) -> Vec<RequirementDefinition> {
        vec![
            RequirementDefinition::input(Variable::LeafTemperature),
            RequirementDefinition::output(Variable::Assimilation),
            RequirementDefinition::output(Variable::StomatalConductance),
        ]
    }

    fn run(&self, _context: &ProcessContext, status: &mut Status) -> LeafResult<()> {
        status.set(Variable::Assimilation, -1.0);
        Err(LeafError::NoValidRoot {
            model: "ExampleInfeasiblePhotosynthesis",
            limitation: "supply",
            details: "no conductance can supply the demand".to_string(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ExampleConductance {
    pub slope: FloatValue,
}

#[typetag::serde]
impl StomatalConductanceModel for ExampleConductance {
    fn definitions(&self) -> Vec<RequirementDefinition> {
        vec![
            RequirementDefinition::input(Variable::SurfaceCo2),
            RequirementDefinition::input(Variable::SurfaceVpd),
            RequirementDefinition::input(Variable::Assimilation),
            RequirementDefinition::output(Variable::StomatalConductance),
        ]
    }

    fn response(&self, _context: &ProcessContext, _status: &Status) -> LeafResult<ConductanceResponse> {
        Ok(ConductanceResponse {
            g0: 0.01,
            slope: self.slope,
            gs_min: 1e-3,
        })
    }
}
