use leafsim_core::errors::{LeafError, LeafResult};
use leafsim_core::process::{PhotosynthesisModel, Process, ProcessContext, RequirementDefinition};
use leafsim_core::status::Status;
use leafsim_core::variable::Variable;
use leafsim_core::FloatValue;
use serde::{Deserialize, Serialize};

/// Constant net assimilation.
///
/// The stomatal conductance follows from the attached conductance model and the
/// intercellular CO2 is back-solved from the supply function. An assimilation the
/// conductance cannot supply, i.e. a negative intercellular CO2, is an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstantA {
    /// Net assimilation ($\mu\text{mol m}^{-2}\text{ s}^{-1}$)
    pub a: FloatValue,
}

impl ConstantA {
    pub fn new(a: FloatValue) -> Self {
        Self { a }
    }
}

impl Default for ConstantA {
    fn default() -> Self {
        Self { a: 25.0 }
    }
}

#[typetag::serde]
impl PhotosynthesisModel for ConstantA {
    fn definitions(&self) -> Vec<RequirementDefinition> {
        vec![
            RequirementDefinition::input(Variable::SurfaceCo2),
            RequirementDefinition::output(Variable::Assimilation),
            RequirementDefinition::output(Variable::StomatalConductance),
            RequirementDefinition::output(Variable::IntercellularCo2),
        ]
    }

    fn run(&self, context: &ProcessContext, status: &mut Status) -> LeafResult<()> {
        let process = Process::Photosynthesis;
        let gs_model =
            context
                .models
                .stomatal_conductance()
                .ok_or(LeafError::MissingModel {
                    process,
                    required: Process::StomatalConductance,
                })?;
        let cs = status.require(Variable::SurfaceCo2, process)?;
        let gs = gs_model.response(context, status)?.conductance(self.a);
        if gs <= 0.0 {
            return Err(LeafError::NoValidRoot {
                model: "ConstantA",
                limitation: "supply",
                details: format!("the stomatal conductance is not positive ({})", gs),
            });
        }

        let ci = cs - self.a / gs;
        if ci < 0.0 {
            return Err(LeafError::NoValidRoot {
                model: "ConstantA",
                limitation: "supply",
                details: format!(
                    "a conductance of {} cannot supply {} at Cs = {} (Ci = {})",
                    gs, self.a, cs, ci
                ),
            });
        }

        status.set(Variable::Assimilation, self.a);
        status.set(Variable::StomatalConductance, gs);
        status.set(Variable::IntercellularCo2, cs.min(ci));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stomatal::ConstantGs;
    use leafsim_core::atmosphere::AtmosphereInputs;
    use leafsim_core::constants::Constants;
    use leafsim_core::model::ModelList;

    fn run(model: ConstantA, gs: FloatValue, status: &mut Status) -> LeafResult<()> {
        let constants = Constants::default();
        let atmosphere = AtmosphereInputs::new(20.0, 1.0, 101.3)
            .with_relative_humidity(0.65)
            .build(&constants)?;
        let models = ModelList::builder()
            .with_photosynthesis(model.clone())
            .with_stomatal_conductance(ConstantGs::new(gs))
            .build();
        let context = ProcessContext::new(&models, &atmosphere, &constants);
        model.run(&context, status)
    }

    #[test]
    fn test_back_solved_intercellular_co2() {
        let mut status = Status::from_values([(Variable::SurfaceCo2, 380.0)]);
        run(ConstantA::new(15.0), 0.2, &mut status).unwrap();

        assert_eq!(status.get(Variable::Assimilation), Some(15.0));
        assert_eq!(status.get(Variable::StomatalConductance), Some(0.2));
        let ci = status.get(Variable::IntercellularCo2).unwrap();
        assert!((ci - 305.0).abs() < 1e-9, "Ci = {}", ci);
    }

    #[test]
    fn test_unsuppliable_assimilation() {
        let mut status = Status::from_values([(Variable::SurfaceCo2, 290.0)]);
        let before = status.clone();

        match run(ConstantA::new(60.0), 0.05, &mut status) {
            Err(LeafError::NoValidRoot { model, .. }) => assert_eq!(model, "ConstantA"),
            other => panic!("expected no valid root, got {:?}", other),
        }
        assert_eq!(status, before);
    }

    #[test]
    fn test_zero_conductance_stays_finite() {
        let mut status = Status::from_values([(Variable::SurfaceCo2, 400.0)]);
        // 0.1 / 1e-3 = 100 ppm drawdown
        run(ConstantA::new(0.1), 0.0, &mut status).unwrap();

        assert_eq!(status.get(Variable::StomatalConductance), Some(1e-3));
        let ci = status.get(Variable::IntercellularCo2).unwrap();
        assert!((ci - 300.0).abs() < 1e-9, "Ci = {}", ci);
    }
}
