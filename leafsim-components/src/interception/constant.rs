use leafsim_core::errors::LeafResult;
use leafsim_core::process::{InterceptionModel, ProcessContext, RequirementDefinition};
use leafsim_core::status::Status;
use leafsim_core::variable::Variable;
use leafsim_core::FloatValue;
use serde::{Deserialize, Serialize};

/// Fixed absorbed radiation, e.g. from an external radiative transfer model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstantInterception {
    /// Absorbed shortwave radiation (W m-2)
    pub rs: FloatValue,
    /// Absorbed PPFD ($\mu\text{mol m}^{-2}\text{ s}^{-1}$)
    pub ppfd: FloatValue,
}

impl ConstantInterception {
    pub fn new(rs: FloatValue, ppfd: FloatValue) -> Self {
        Self { rs, ppfd }
    }
}

#[typetag::serde]
impl InterceptionModel for ConstantInterception {
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
