use crate::parameters::FvcbParameters;
use crate::photosynthesis::temperature::{electron_transport, LeafRates};
use leafsim_core::constants::Constants;
use leafsim_core::errors::LeafResult;
use leafsim_core::process::{PhotosynthesisModel, Process, ProcessContext, RequirementDefinition};
use leafsim_core::status::Status;
use leafsim_core::variable::Variable;
use leafsim_core::FloatValue;
use serde::{Deserialize, Serialize};

/// Uncoupled FvCB model: net assimilation for a known intercellular CO2.
///
/// Useful to compute A/Cᵢ curves. No stomatal conductance model is involved.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FvcbRaw {
    pub parameters: FvcbParameters,
}

impl FvcbRaw {
    pub fn from_parameters(parameters: FvcbParameters) -> Self {
        Self { parameters }
    }

    pub fn calculate(
        &self,
        tl: FloatValue,
        ci: FloatValue,
        ppfd: FloatValue,
        constants: &Constants,
    ) -> FloatValue {
        let params = &self.parameters;
        let rates = LeafRates::at_temperature(tl, params, constants);
        let vj = electron_transport(ppfd, rates.jmax, params.alpha, params.theta) / 4.0;

        let wc = rates.vcmax * (ci - rates.gamma_star) / (ci + rates.km);
        let wj = vj * (ci - rates.gamma_star) / (ci + 2.0 * rates.gamma_star);
        wc.min(wj).min(rates.tpu_limited()) - rates.rd
    }
}

#[typetag::serde]
impl PhotosynthesisModel for FvcbRaw {
    fn definitions(&self) -> Vec<RequirementDefinition> {
        vec![
            RequirementDefinition::input(Variable::AbsorbedPpfd),
            RequirementDefinition::input(Variable::LeafTemperature),
            RequirementDefinition::input(Variable::IntercellularCo2),
            RequirementDefinition::output(Variable::Assimilation),
        ]
    }

    fn uses_stomatal_conductance(&self) -> bool {
        false
    }

    fn run(&self, context: &ProcessContext, status: &mut Status) -> LeafResult<()> {
        let process = Process::Photosynthesis;
        let tl = status.require(Variable::LeafTemperature, process)?;
        let ci = status.require(Variable::IntercellularCo2, process)?;
        let ppfd = status.require(Variable::AbsorbedPpfd, process)?;

        status.set(
            Variable::Assimilation,
            self.calculate(tl, ci, ppfd, context.constants),
        );
        Ok(())
    }
}
