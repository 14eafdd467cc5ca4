//! Organ containers.
//!
//! An [`Organ`] pairs a [`ModelList`] with one [`Status`] per time-step (or a single
//! status reused across time-steps). Organs are built with an [`OrganBuilder`] which
//! broadcasts scalar initial values and checks that sequences share one length.
//!
//! Every process can be run through a mutating entry point (`*_mut`), which updates
//! the organ's statuses in place, or a non-mutating one which works on copies and
//! returns them. Both validate all statuses before touching any of them.

use crate::atmosphere::Atmosphere;
use crate::constants::Constants;
use crate::errors::{LeafError, LeafResult};
use crate::model::validation;
use crate::model::{ModelList, Stage};
use crate::process::{Process, ProcessContext};
use crate::status::Status;
use crate::variable::{Variable, VariableSet};
use crate::FloatValue;
use std::collections::BTreeMap;

/// Initial value of a variable: one value for every status, or one per status.
#[derive(Debug, Clone, PartialEq)]
pub enum Initializer {
    Scalar(FloatValue),
    Series(Vec<FloatValue>),
}

impl Initializer {
    fn len(&self) -> Option<usize> {
        match self {
            Initializer::Scalar(_) => None,
            Initializer::Series(values) => Some(values.len()),
        }
    }

    fn value(&self, index: usize) -> FloatValue {
        match self {
            Initializer::Scalar(value) => *value,
            Initializer::Series(values) => values[index],
        }
    }
}

impl From<FloatValue> for Initializer {
    fn from(value: FloatValue) -> Self {
        Initializer::Scalar(value)
    }
}

impl From<Vec<FloatValue>> for Initializer {
    fn from(values: Vec<FloatValue>) -> Self {
        Initializer::Series(values)
    }
}

impl From<&[FloatValue]> for Initializer {
    fn from(values: &[FloatValue]) -> Self {
        Initializer::Series(values.to_vec())
    }
}

#[derive(Debug, Clone)]
pub struct OrganBuilder {
    models: ModelList,
    initial_values: BTreeMap<Variable, Initializer>,
}

impl OrganBuilder {
    pub fn new(models: ModelList) -> Self {
        Self {
            models,
            initial_values: BTreeMap::new(),
        }
    }

    pub fn with_initial_value(
        &mut self,
        variable: Variable,
        value: impl Into<Initializer>,
    ) -> &mut Self {
        self.initial_values.insert(variable, value.into());
        self
    }

    /// Materialize the statuses.
    ///
    /// With at least one sequence, one status is created per element and scalars are
    /// repeated in each of them. All sequences must have the same, non-zero, length.
    pub fn build(&self) -> LeafResult<Organ> {
        let mut length: Option<(Variable, usize)> = None;
        for (variable, initializer) in &self.initial_values {
            let Some(found) = initializer.len() else {
                continue;
            };
            match length {
                None if found == 0 => {
                    return Err(LeafError::ShapeMismatch {
                        variable: variable.to_string(),
                        expected: 1,
                        found,
                    })
                }
                None => length = Some((*variable, found)),
                Some((_, expected)) if expected != found => {
                    return Err(LeafError::ShapeMismatch {
                        variable: variable.to_string(),
                        expected,
                        found,
                    })
                }
                Some(_) => {}
            }
        }

        let n = length.map_or(1, |(_, n)| n);
        let statuses: Vec<Status> = (0..n)
            .map(|i| {
                Status::from_values(
                    self.initial_values
                        .iter()
                        .map(|(variable, initializer)| (*variable, initializer.value(i))),
                )
            })
            .collect();

        validation::warn_uninitialized(&self.models, &statuses[0].initialized());

        Ok(Organ {
            models: self.models.clone(),
            statuses,
        })
    }
}

/// An organ (typically a leaf): its strategies and its statuses.
///
/// Cloning an organ copies the statuses and shares the strategies.
#[derive(Debug, Clone)]
pub struct Organ {
    models: ModelList,
    statuses: Vec<Status>,
}

/// Alias used when an organ is seen as a component of a plant.
pub type Component = Organ;

impl Organ {
    pub fn builder(models: ModelList) -> OrganBuilder {
        OrganBuilder::new(models)
    }

    /// An organ with a single status.
    pub fn new(models: ModelList, status: Status) -> Self {
        Self {
            models,
            statuses: vec![status],
        }
    }

    pub fn models(&self) -> &ModelList {
        &self.models
    }

    pub fn statuses(&self) -> &[Status] {
        &self.statuses
    }

    pub fn status(&self, index: usize) -> Option<&Status> {
        self.statuses.get(index)
    }

    pub fn status_mut(&mut self, index: usize) -> Option<&mut Status> {
        self.statuses.get_mut(index)
    }

    /// Number of statuses.
    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    /// Variables that must still be initialized before a full run.
    pub fn to_initialize(&self) -> VariableSet {
        self.statuses
            .iter()
            .fold(VariableSet::empty(), |acc, status| {
                acc.union(&validation::to_initialize(
                    &self.models,
                    &status.initialized(),
                ))
            })
    }

    /// Check that every status can go through a full run.
    pub fn check_ready(&self) -> LeafResult<()> {
        self.check(&self.models.schedule())
    }

    fn check(&self, stages: &[Stage]) -> LeafResult<()> {
        for status in &self.statuses {
            validation::check_stages(&self.models, stages, &status.initialized())?;
        }
        Ok(())
    }

    /// Run the stages on a copy of `status`, returned only when every stage succeeds.
    fn apply(
        models: &ModelList,
        stages: &[Stage],
        status: &Status,
        atmosphere: &Atmosphere,
        constants: &Constants,
    ) -> LeafResult<Status> {
        let context = ProcessContext::new(models, atmosphere, constants);
        let mut next = status.clone();
        for stage in stages {
            run_stage(&context, stage, &mut next)?;
        }
        Ok(next)
    }

    fn run_stages_mut(
        &mut self,
        stages: &[Stage],
        atmosphere: &Atmosphere,
        constants: &Constants,
    ) -> LeafResult<()> {
        self.statuses = self.run_stages(stages, atmosphere, constants)?;
        Ok(())
    }

    fn run_stages(
        &self,
        stages: &[Stage],
        atmosphere: &Atmosphere,
        constants: &Constants,
    ) -> LeafResult<Vec<Status>> {
        self.check(stages)?;
        self.statuses
            .iter()
            .map(|status| Self::apply(&self.models, stages, status, atmosphere, constants))
            .collect()
    }

    fn process_stages(&self, process: Process) -> Vec<Stage> {
        self.models.stage(process).into_iter().collect()
    }

    /// Run every attached process on every status.
    pub fn run_mut(&mut self, atmosphere: &Atmosphere, constants: &Constants) -> LeafResult<()> {
        let stages = self.models.schedule();
        self.run_stages_mut(&stages, atmosphere, constants)
    }

    /// Run every attached process on copies of the statuses.
    pub fn run(&self, atmosphere: &Atmosphere, constants: &Constants) -> LeafResult<Vec<Status>> {
        self.run_stages(&self.models.schedule(), atmosphere, constants)
    }

    /// Run the full pipeline on a single status.
    pub fn run_status_mut(
        &mut self,
        index: usize,
        atmosphere: &Atmosphere,
        constants: &Constants,
    ) -> LeafResult<&Status> {
        let stages = self.models.schedule();
        let n = self.statuses.len();
        let status = self
            .statuses
            .get_mut(index)
            .ok_or_else(|| LeafError::ShapeMismatch {
                variable: "status".to_string(),
                expected: index + 1,
                found: n,
            })?;
        validation::check_stages(&self.models, &stages, &status.initialized())?;
        *status = Self::apply(&self.models, &stages, status, atmosphere, constants)?;
        Ok(status)
    }

    pub fn light_interception_mut(
        &mut self,
        atmosphere: &Atmosphere,
        constants: &Constants,
    ) -> LeafResult<()> {
        let stages = self.process_stages(Process::LightInterception);
        self.run_stages_mut(&stages, atmosphere, constants)
    }

    pub fn light_interception(
        &self,
        atmosphere: &Atmosphere,
        constants: &Constants,
    ) -> LeafResult<Vec<Status>> {
        self.run_stages(
            &self.process_stages(Process::LightInterception),
            atmosphere,
            constants,
        )
    }

    /// Solve the energy balance, and the assimilation it drives, in place.
    ///
    /// Without an energy model the statuses are left untouched.
    pub fn energy_balance_mut(
        &mut self,
        atmosphere: &Atmosphere,
        constants: &Constants,
    ) -> LeafResult<()> {
        let stages = self.process_stages(Process::EnergyBalance);
        self.run_stages_mut(&stages, atmosphere, constants)
    }

    pub fn energy_balance(
        &self,
        atmosphere: &Atmosphere,
        constants: &Constants,
    ) -> LeafResult<Vec<Status>> {
        self.run_stages(
            &self.process_stages(Process::EnergyBalance),
            atmosphere,
            constants,
        )
    }

    pub fn photosynthesis_mut(
        &mut self,
        atmosphere: &Atmosphere,
        constants: &Constants,
    ) -> LeafResult<()> {
        let stages = self.process_stages(Process::Photosynthesis);
        self.run_stages_mut(&stages, atmosphere, constants)
    }

    pub fn photosynthesis(
        &self,
        atmosphere: &Atmosphere,
        constants: &Constants,
    ) -> LeafResult<Vec<Status>> {
        self.run_stages(
            &self.process_stages(Process::Photosynthesis),
            atmosphere,
            constants,
        )
    }

    pub fn stomatal_conductance_mut(
        &mut self,
        atmosphere: &Atmosphere,
        constants: &Constants,
    ) -> LeafResult<()> {
        let stages = self.process_stages(Process::StomatalConductance);
        self.run_stages_mut(&stages, atmosphere, constants)
    }

    pub fn stomatal_conductance(
        &self,
        atmosphere: &Atmosphere,
        constants: &Constants,
    ) -> LeafResult<Vec<Status>> {
        self.run_stages(
            &self.process_stages(Process::StomatalConductance),
            atmosphere,
            constants,
        )
    }
}

/// Run one stage on a status. Nested processes are driven by the stage's strategy.
fn run_stage(context: &ProcessContext, stage: &Stage, status: &mut Status) -> LeafResult<()> {
    let models = context.models;
    match stage.process {
        Process::LightInterception => {
            if let Some(model) = models.light_interception() {
                model.run(context, status)?;
            }
        }
        Process::EnergyBalance => {
            if let Some(model) = models.energy_balance() {
                let convergence = model.run(context, status)?;
                status.set_convergence(convergence);
            }
        }
        Process::Photosynthesis => {
            if let Some(model) = models.photosynthesis() {
                model.run(context, status)?;
            }
        }
        Process::StomatalConductance => {
            if let Some(model) = models.stomatal_conductance() {
                model.run(context, status)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atmosphere::AtmosphereInputs;
    use crate::example_models::{
        ExampleConductance, ExampleEnergy, ExampleInfeasiblePhotosynthesis, ExamplePhotosynthesis,
    };
    use is_close::is_close;

    fn models() -> ModelList {
        ModelList::builder()
            .with_energy_balance(ExampleEnergy)
            .with_photosynthesis(ExamplePhotosynthesis { a: 10.0 })
            .with_stomatal_conductance(ExampleConductance { slope: 0.02 })
            .build()
    }

    fn atmosphere() -> Atmosphere {
        AtmosphereInputs::new(20.0, 1.0, 101.3)
            .with_relative_humidity(0.65)
            .build(&Constants::default())
            .unwrap()
    }

    fn ready_builder() -> OrganBuilder {
        let mut builder = Organ::builder(models());
        builder
            .with_initial_value(Variable::AbsorbedShortwave, 13.747)
            .with_initial_value(Variable::SkyFraction, 1.0)
            .with_initial_value(Variable::Dimension, 0.03)
            .with_initial_value(Variable::AbsorbedPpfd, 1500.0);
        builder
    }

    #[test]
    fn test_scalars_give_one_status() {
        let organ = ready_builder().build().unwrap();
        assert_eq!(organ.len(), 1);
        assert_eq!(organ.statuses()[0].get(Variable::Dimension), Some(0.03));
        assert!(organ.to_initialize().is_empty());
    }

    #[test]
    fn test_broadcast_sequences() {
        let organ = ready_builder()
            .with_initial_value(Variable::AbsorbedShortwave, vec![10.0, 20.0, 30.0])
            .with_initial_value(Variable::AbsorbedPpfd, vec![500.0, 1000.0, 1500.0])
            .build()
            .unwrap();

        assert_eq!(organ.len(), 3);
        for (i, status) in organ.statuses().iter().enumerate() {
            assert_eq!(
                status.get(Variable::AbsorbedShortwave),
                Some(10.0 * (i + 1) as FloatValue)
            );
            assert_eq!(status.get(Variable::SkyFraction), Some(1.0));
        }
    }

    #[test]
    fn test_shape_mismatch() {
        let result = ready_builder()
            .with_initial_value(Variable::AbsorbedShortwave, vec![10.0, 20.0, 30.0])
            .with_initial_value(Variable::AbsorbedPpfd, vec![500.0, 1000.0])
            .build();

        match result {
            Err(LeafError::ShapeMismatch {
                expected, found, ..
            }) => {
                assert_eq!(expected, 3);
                assert_eq!(found, 2);
            }
            other => panic!("expected a shape mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_sequence_is_rejected() {
        let result = ready_builder()
            .with_initial_value(Variable::Dimension, Vec::<FloatValue>::new())
            .build();
        assert!(matches!(result, Err(LeafError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_missing_inputs_leave_status_untouched() {
        let mut organ = Organ::builder(models())
            .with_initial_value(Variable::Dimension, 0.03)
            .build()
            .unwrap();
        let before = organ.statuses().to_vec();

        let result = organ.run_mut(&atmosphere(), &Constants::default());
        assert!(matches!(result, Err(LeafError::Uninitialized { .. })));
        assert_eq!(organ.statuses(), before.as_slice());
    }

    #[test]
    fn test_failed_run_leaves_statuses_untouched() {
        let models = ModelList::builder()
            .with_energy_balance(ExampleEnergy)
            .with_photosynthesis(ExampleInfeasiblePhotosynthesis)
            .with_stomatal_conductance(ExampleConductance { slope: 0.02 })
            .build();
        let mut builder = Organ::builder(models);
        builder
            .with_initial_value(Variable::AbsorbedShortwave, vec![10.0, 20.0])
            .with_initial_value(Variable::SkyFraction, 1.0)
            .with_initial_value(Variable::Dimension, 0.03)
            .with_initial_value(Variable::AbsorbedPpfd, 1500.0);
        let mut organ = builder.build().unwrap();
        let before = organ.statuses().to_vec();

        let result = organ.run_mut(&atmosphere(), &Constants::default());
        assert!(matches!(result, Err(LeafError::NoValidRoot { .. })));
        assert_eq!(organ.statuses(), before.as_slice());
        assert_eq!(organ.statuses()[0].get(Variable::LeafTemperature), None);

        let result = organ.run_status_mut(1, &atmosphere(), &Constants::default());
        assert!(matches!(result, Err(LeafError::NoValidRoot { .. })));
        assert_eq!(organ.statuses(), before.as_slice());
    }

    #[test]
    fn test_non_mutating_run_matches_mutating_run() {
        let constants = Constants::default();
        let mut organ = ready_builder().build().unwrap();
        let copy = organ.run(&atmosphere(), &constants).unwrap();

        assert!(!organ.statuses()[0].is_initialized(Variable::Assimilation));

        organ.run_mut(&atmosphere(), &constants).unwrap();
        assert_eq!(organ.statuses(), copy.as_slice());
        assert_eq!(copy[0].get(Variable::Assimilation), Some(10.0));
        assert_eq!(copy[0].iterations(), Some(1));
    }

    #[test]
    fn test_process_entry_points() {
        let constants = Constants::default();
        let organ = Organ::builder(models())
            .with_initial_value(Variable::SurfaceCo2, 400.0)
            .with_initial_value(Variable::SurfaceVpd, 1.0)
            .with_initial_value(Variable::Assimilation, 5.0)
            .build()
            .unwrap();

        let statuses = organ.stomatal_conductance(&atmosphere(), &constants).unwrap();
        let gs = statuses[0].get(Variable::StomatalConductance).unwrap();
        assert!(is_close!(gs, 0.01 + 0.02 * 5.0));

        // Photosynthesis needs the leaf temperature when run on its own
        let result = organ.photosynthesis(&atmosphere(), &constants);
        match result {
            Err(LeafError::Uninitialized { process, variables }) => {
                assert_eq!(process, Process::Photosynthesis);
                assert!(variables.contains(Variable::LeafTemperature));
            }
            other => panic!("expected an uninitialized error, got {:?}", other),
        }
    }

    #[test]
    fn test_energy_balance_without_model_is_a_no_op() {
        let models = ModelList::builder()
            .with_photosynthesis(ExamplePhotosynthesis { a: 10.0 })
            .with_stomatal_conductance(ExampleConductance { slope: 0.02 })
            .build();
        let mut organ = Organ::new(models, Status::new());
        organ
            .energy_balance_mut(&atmosphere(), &Constants::default())
            .unwrap();
        assert!(organ.statuses()[0].initialized().is_empty());
        assert_eq!(organ.statuses()[0].convergence(), None);
    }
}
