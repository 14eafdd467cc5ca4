//! Interception by a single translucent organ exposed to the sky.
//!
//! The incident shortwave radiation is split into a PAR and a NIR band:
//! $$ R_s = (1 - \tau) \left( PAR (1 - \sigma_{PAR}) + NIR (1 - \sigma_{NIR}) \right) $$
//! and the absorbed PAR is converted to a photon flux density.

use crate::parameters::TranslucentParameters;
use leafsim_core::errors::{LeafError, LeafResult};
use leafsim_core::process::{InterceptionModel, ProcessContext, RequirementDefinition};
use leafsim_core::status::Status;
use leafsim_core::variable::Variable;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Translucent {
    pub parameters: TranslucentParameters,
}

impl Translucent {
    pub fn from_parameters(parameters: TranslucentParameters) -> Self {
        Self { parameters }
    }
}

#[typetag::serde]
impl InterceptionModel for Translucent {
    fn definitions(&self) -> Vec<RequirementDefinition> {
        vec![
            RequirementDefinition::output(Variable::AbsorbedShortwave),
            RequirementDefinition::output(Variable::AbsorbedPpfd),
        ]
    }

    fn run(&self, context: &ProcessContext, status: &mut Status) -> LeafResult<()> {
        let params = &self.parameters;
        let constants = context.constants;
        let shortwave = context
            .atmosphere
            .shortwave()
            .ok_or(LeafError::MissingAtmosphere("incident shortwave radiation"))?;

        let par = shortwave * constants.par_fraction;
        let nir = shortwave - par;
        let intercepted = 1.0 - params.transparency;
        let absorbed_par = intercepted * par * (1.0 - params.scattering_par);
        let absorbed_nir = intercepted * nir * (1.0 - params.scattering_nir);

        status.set(Variable::AbsorbedShortwave, absorbed_par + absorbed_nir);
        status.set(Variable::AbsorbedPpfd, absorbed_par * constants.j_to_umol);
        Ok(())
    }
}
