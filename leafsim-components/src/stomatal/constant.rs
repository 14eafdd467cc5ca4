use leafsim_core::errors::LeafResult;
use leafsim_core::process::{
    ConductanceResponse, ProcessContext, RequirementDefinition, StomatalConductanceModel,
};
use leafsim_core::status::Status;
use leafsim_core::variable::Variable;
use leafsim_core::FloatValue;
use serde::{Deserialize, Serialize};

/// Constant stomatal conductance, independent of assimilation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstantGs {
    /// Stomatal conductance to CO2 (mol m-2 s-1)
    pub gs: FloatValue,
    /// Minimum conductance (mol m-2 s-1)
    #[serde(default = "default_gs_min")]
    pub gs_min: FloatValue,
}

fn default_gs_min() -> FloatValue {
    1e-3
}

impl ConstantGs {
    pub fn new(gs: FloatValue) -> Self {
        Self {
            gs,
            gs_min: default_gs_min(),
        }
    }

    pub fn with_gs_min(mut self, gs_min: FloatValue) -> Self {
        self.gs_min = gs_min;
        self
    }

    /// Conductance written to the status, never below `gs_min`.
    pub fn conductance(&self) -> FloatValue {
        self.gs.max(self.gs_min)
    }
}

#[typetag::serde]
impl StomatalConductanceModel for ConstantGs {
    fn definitions(&self) -> Vec<RequirementDefinition> {
        vec![RequirementDefinition::output(Variable::StomatalConductance)]
    }

    fn response(
        &self,
        _context: &ProcessContext,
        _status: &Status,
    ) -> LeafResult<ConductanceResponse> {
        Ok(ConductanceResponse {
            g0: self.conductance(),
            slope: 0.0,
            gs_min: self.gs_min,
        })
    }

    fn run(&self, _context: &ProcessContext, status: &mut Status) -> LeafResult<()> {
        status.set(Variable::StomatalConductance, self.conductance());
        Ok(())
    }
}
