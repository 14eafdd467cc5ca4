//! Medlyn et al. (2011) optimal stomatal conductance
//!
//! $$ G_s = g_0 + \left(1 + \frac{g_1}{\sqrt{D_l}}\right) \frac{A}{C_s} $$

use leafsim_core::errors::LeafResult;
use leafsim_core::process::{
    ConductanceResponse, Process, ProcessContext, RequirementDefinition, StomatalConductanceModel,
};
use leafsim_core::status::Status;
use leafsim_core::variable::Variable;
use leafsim_core::FloatValue;
use serde::{Deserialize, Serialize};

/// Smallest leaf-to-air VPD (kPa) used in the response.
const MIN_VPD: FloatValue = 1e-3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medlyn {
    /// Residual conductance to CO2 (mol m-2 s-1)
    pub g0: FloatValue,
    /// Slope parameter (kPa^0.5)
    pub g1: FloatValue,
    /// Minimum conductance (mol m-2 s-1)
    #[serde(default = "default_gs_min")]
    pub gs_min: FloatValue,
}

fn default_gs_min() -> FloatValue {
    1e-3
}

impl Medlyn {
    pub fn new(g0: FloatValue, g1: FloatValue) -> Self {
        Self {
            g0,
            g1,
            gs_min: default_gs_min(),
        }
    }

    pub fn with_gs_min(mut self, gs_min: FloatValue) -> Self {
        self.gs_min = gs_min;
        self
    }

    /// Sensitivity of the conductance to assimilation for a leaf-to-air VPD `dl` (kPa)
    /// and surface CO2 `cs` (ppm).
    pub fn slope(&self, dl: FloatValue, cs: FloatValue) -> FloatValue {
        (1.0 + self.g1 / dl.max(MIN_VPD).sqrt()) / cs
    }
}

#[typetag::serde]
impl StomatalConductanceModel for Medlyn {
    fn definitions(&self) -> Vec<RequirementDefinition> {
        vec![
            RequirementDefinition::input(Variable::SurfaceVpd),
            RequirementDefinition::input(Variable::SurfaceCo2),
            RequirementDefinition::input(Variable::Assimilation),
            RequirementDefinition::output(Variable::StomatalConductance),
        ]
    }

    fn response(
        &self,
        _context: &ProcessContext,
        status: &Status,
    ) -> LeafResult<ConductanceResponse> {
        let process = Process::StomatalConductance;
        let dl = status.require(Variable::SurfaceVpd, process)?;
        let cs = status.require(Variable::SurfaceCo2, process)?;

        Ok(ConductanceResponse {
            g0: self.g0,
            slope: self.slope(dl, cs),
            gs_min: self.gs_min,
        })
    }
}
