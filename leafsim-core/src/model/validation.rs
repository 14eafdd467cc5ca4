//! Readiness checks.
//!
//! A stage may run once every variable it reads is either initialized in the status
//! or produced by an earlier stage. Variables a stage produces for its own nested
//! processes (the leaf temperature an energy model hands to photosynthesis, the
//! assimilation a coupled photosynthesis hands to stomatal conductance) do not need
//! to be initialized.

use crate::errors::{LeafError, LeafResult};
use crate::model::{ModelList, Stage};
use crate::process::Process;
use crate::variable::VariableSet;
use log::warn;

/// Check that the processes a stage drives are attached.
pub fn check_models(models: &ModelList, stage: &Stage) -> LeafResult<()> {
    if stage.process == Process::Photosynthesis {
        if let Some(photosynthesis) = models.photosynthesis() {
            if photosynthesis.uses_stomatal_conductance() && models.stomatal_conductance().is_none()
            {
                return Err(LeafError::MissingModel {
                    process: Process::Photosynthesis,
                    required: Process::StomatalConductance,
                });
            }
        }
    }
    if stage.process == Process::EnergyBalance
        && stage.nested.contains(&Process::Photosynthesis)
    {
        return check_models(
            models,
            &Stage {
                process: Process::Photosynthesis,
                nested: vec![],
            },
        );
    }
    Ok(())
}

/// Variables a stage needs from outside.
pub fn stage_inputs(models: &ModelList, stage: &Stage) -> VariableSet {
    let (inputs, outputs) = stage.processes().fold(
        (VariableSet::empty(), VariableSet::empty()),
        |(inputs, outputs), p| {
            (
                inputs.union(&models.inputs(p)),
                outputs.union(&models.outputs(p)),
            )
        },
    );
    inputs.difference(&outputs)
}

/// Variables written by a stage and its nested processes.
pub fn stage_outputs(models: &ModelList, stage: &Stage) -> VariableSet {
    stage
        .processes()
        .fold(VariableSet::empty(), |acc, p| acc.union(&models.outputs(p)))
}

/// Check a stage against the variables available before it runs.
pub fn check_stage(models: &ModelList, stage: &Stage, available: &VariableSet) -> LeafResult<()> {
    check_models(models, stage)?;
    let missing = stage_inputs(models, stage).difference(available);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(LeafError::Uninitialized {
            process: stage.process,
            variables: missing,
        })
    }
}

/// Check a sequence of stages, each one seeing the outputs of the previous ones.
pub fn check_stages(models: &ModelList, stages: &[Stage], initialized: &VariableSet) -> LeafResult<()> {
    let mut available = *initialized;
    for stage in stages {
        check_stage(models, stage, &available)?;
        available = available.union(&stage_outputs(models, stage));
    }
    Ok(())
}

/// Variables that must still be initialized before a full run.
pub fn to_initialize(models: &ModelList, initialized: &VariableSet) -> VariableSet {
    let mut available = *initialized;
    let mut missing = VariableSet::empty();
    for stage in models.schedule() {
        missing = missing.union(&stage_inputs(models, &stage).difference(&available));
        available = available.union(&stage_outputs(models, &stage));
    }
    missing
}

/// Log the variables still to initialize. Returns `true` when nothing is missing.
pub fn warn_uninitialized(models: &ModelList, initialized: &VariableSet) -> bool {
    let missing = to_initialize(models, initialized);
    if !missing.is_empty() {
        warn!(
            "Some variables must be initialized before simulation: {}",
            missing
        );
    }
    missing.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::example_models::{
        ExampleConductance, ExampleEnergy, ExampleInterception, ExamplePhotosynthesis,
    };
    use crate::variable::Variable;

    fn full_models() -> ModelList {
        ModelList::builder()
            .with_light_interception(ExampleInterception { rs: 100.0, ppfd: 500.0 })
            .with_energy_balance(ExampleEnergy)
            .with_photosynthesis(ExamplePhotosynthesis { a: 10.0 })
            .with_stomatal_conductance(ExampleConductance { slope: 0.02 })
            .build()
    }

    #[test]
    fn test_schedule_nests_under_energy() {
        let models = full_models();
        let schedule = models.schedule();

        assert_eq!(schedule.len(), 2);
        assert_eq!(schedule[0].process, Process::LightInterception);
        assert_eq!(schedule[1].process, Process::EnergyBalance);
        assert_eq!(
            schedule[1].nested,
            vec![Process::Photosynthesis, Process::StomatalConductance]
        );
    }

    #[test]
    fn test_schedule_without_energy() {
        let models = ModelList::builder()
            .with_photosynthesis(ExamplePhotosynthesis { a: 10.0 })
            .with_stomatal_conductance(ExampleConductance { slope: 0.02 })
            .build();
        let schedule = models.schedule();

        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule[0].process, Process::Photosynthesis);
        assert_eq!(schedule[0].nested, vec![Process::StomatalConductance]);
    }

    #[test]
    fn test_upstream_outputs_satisfy_inputs() {
        let models = full_models();
        // Rₛ and PPFD come from interception, Tₗ, Cₛ and Dₗ from the energy balance
        let initialized: VariableSet = [Variable::SkyFraction, Variable::Dimension]
            .into_iter()
            .collect();

        assert!(check_stages(&models, &models.schedule(), &initialized).is_ok());
        assert!(to_initialize(&models, &initialized).is_empty());
    }

    #[test]
    fn test_missing_inputs_are_reported() {
        let models = ModelList::builder()
            .with_energy_balance(ExampleEnergy)
            .with_photosynthesis(ExamplePhotosynthesis { a: 10.0 })
            .with_stomatal_conductance(ExampleConductance { slope: 0.02 })
            .build();
        let initialized: VariableSet = [Variable::Dimension].into_iter().collect();

        match check_stages(&models, &models.schedule(), &initialized) {
            Err(LeafError::Uninitialized { process, variables }) => {
                assert_eq!(process, Process::EnergyBalance);
                assert!(variables.contains(Variable::AbsorbedShortwave));
                assert!(variables.contains(Variable::SkyFraction));
                assert!(variables.contains(Variable::AbsorbedPpfd));
                assert!(!variables.contains(Variable::LeafTemperature));
            }
            other => panic!("expected an uninitialized error, got {:?}", other),
        }
    }

    #[test]
    fn test_standalone_photosynthesis_needs_energy_outputs() {
        let models = ModelList::builder()
            .with_photosynthesis(ExamplePhotosynthesis { a: 10.0 })
            .with_stomatal_conductance(ExampleConductance { slope: 0.02 })
            .build();
        let missing = to_initialize(&models, &VariableSet::empty());

        assert!(missing.contains(Variable::SurfaceCo2));
        assert!(missing.contains(Variable::AbsorbedPpfd));
        // Produced by the coupled photosynthesis
        assert!(!missing.contains(Variable::Assimilation));
    }

    #[test]
    fn test_missing_conductance_model() {
        let models = ModelList::builder()
            .with_photosynthesis(ExamplePhotosynthesis { a: 10.0 })
            .build();
        let result = check_stages(&models, &models.schedule(), &VariableSet::all());
        assert!(matches!(
            result,
            Err(LeafError::MissingModel {
                process: Process::Photosynthesis,
                required: Process::StomatalConductance
            })
        ));
    }

    #[test]
    fn test_energy_without_assimilation_needs_conductance() {
        let models = ModelList::builder().with_energy_balance(ExampleEnergy).build();
        let missing = to_initialize(&models, &VariableSet::empty());
        assert!(missing.contains(Variable::StomatalConductance));
    }
}
