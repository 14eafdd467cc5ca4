use crate::atmosphere::{Atmosphere, Weather};
use crate::constants::Constants;
use crate::errors::{LeafError, LeafResult};
use crate::organ::Organ;
use crate::simulation::collection::{OrganCollection, OrganKey};
use crate::status::Status;
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// What to do when an organ of a collection fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailurePolicy {
    /// Stop at the first failing organ and return its error.
    #[default]
    Abort,
    /// Record the failure and carry on with the remaining organs.
    Isolate,
}

/// Atmospheric forcing of a simulation.
#[derive(Debug, Clone, Copy)]
pub enum Forcing<'a> {
    /// One set of conditions applied to every status of every organ.
    Atmosphere(&'a Atmosphere),
    /// One set of conditions per time-step.
    Weather(&'a Weather),
}

impl<'a> From<&'a Atmosphere> for Forcing<'a> {
    fn from(value: &'a Atmosphere) -> Self {
        Forcing::Atmosphere(value)
    }
}

impl<'a> From<&'a Weather> for Forcing<'a> {
    fn from(value: &'a Weather) -> Self {
        Forcing::Weather(value)
    }
}

/// Status of one organ at one time-step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationRow {
    pub organ: OrganKey,
    pub timestep: usize,
    pub status: Status,
}

#[derive(Debug)]
pub struct OrganFailure {
    pub organ: OrganKey,
    pub error: LeafError,
}

#[derive(Debug, Default)]
pub struct SimulationOutput {
    /// Rows ordered by organ, then time-step.
    pub rows: Vec<SimulationRow>,
    /// Organs that failed under [`FailurePolicy::Isolate`].
    pub failures: Vec<OrganFailure>,
}

impl SimulationOutput {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn rows_for<'a, 'b>(&'a self, organ: &'b OrganKey) -> impl Iterator<Item = &'a SimulationRow> + 'b
    where
        'a: 'b,
    {
        self.rows.iter().filter(move |row| &row.organ == organ)
    }
}

/// Runs organs against atmospheric forcing.
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    constants: Constants,
    failure_policy: FailurePolicy,
}

impl Simulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_constants(&mut self, constants: Constants) -> &mut Self {
        self.constants = constants;
        self
    }

    pub fn with_failure_policy(&mut self, failure_policy: FailurePolicy) -> &mut Self {
        self.failure_policy = failure_policy;
        self
    }

    pub fn constants(&self) -> &Constants {
        &self.constants
    }

    /// Simulate `organs` in place.
    ///
    /// With a [`Weather`] series, an organ with a single status reuses it across
    /// time-steps and holds the last step's values afterwards. An organ with one status
    /// per time-step updates status `i` with step `i`. Any other number of statuses is a
    /// [`LeafError::ShapeMismatch`].
    pub fn simulate_mut<'a, C: OrganCollection + ?Sized>(
        &self,
        organs: &mut C,
        forcing: impl Into<Forcing<'a>>,
    ) -> LeafResult<SimulationOutput> {
        let forcing = forcing.into();
        let mut output = SimulationOutput::default();
        let mut n_organs = 0;

        for (key, organ) in organs.organs_mut() {
            n_organs += 1;
            match self.simulate_organ(&key, organ, forcing, &mut output.rows) {
                Ok(()) => {}
                Err(error) => match self.failure_policy {
                    FailurePolicy::Abort => return Err(error),
                    FailurePolicy::Isolate => {
                        warn!("Simulation of organ {} failed: {}", key, error);
                        output.failures.push(OrganFailure { organ: key, error });
                    }
                },
            }
        }

        info!(
            "Simulated {} organ(s): {} row(s), {} failure(s)",
            n_organs,
            output.rows.len(),
            output.failures.len()
        );
        Ok(output)
    }

    /// Simulate copies of `organs`, leaving them untouched.
    pub fn simulate<'a, C: OrganCollection + Clone>(
        &self,
        organs: &C,
        forcing: impl Into<Forcing<'a>>,
    ) -> LeafResult<SimulationOutput> {
        let mut copy = organs.clone();
        self.simulate_mut(&mut copy, forcing)
    }

    fn simulate_organ(
        &self,
        key: &OrganKey,
        organ: &mut Organ,
        forcing: Forcing,
        rows: &mut Vec<SimulationRow>,
    ) -> LeafResult<()> {
        match forcing {
            Forcing::Atmosphere(atmosphere) => {
                organ.run_mut(atmosphere, &self.constants)?;
                rows.extend(
                    organ
                        .statuses()
                        .iter()
                        .enumerate()
                        .map(|(timestep, status)| SimulationRow {
                            organ: key.clone(),
                            timestep,
                            status: status.clone(),
                        }),
                );
            }
            Forcing::Weather(weather) => {
                let n = organ.len();
                if n != 1 && n != weather.len() {
                    return Err(LeafError::ShapeMismatch {
                        variable: format!("statuses of organ {}", key),
                        expected: weather.len(),
                        found: n,
                    });
                }
                organ.check_ready()?;
                for (timestep, atmosphere) in weather.iter().enumerate() {
                    let index = if n == 1 { 0 } else { timestep };
                    let status = organ.run_status_mut(index, atmosphere, &self.constants)?;
                    rows.push(SimulationRow {
                        organ: key.clone(),
                        timestep,
                        status: status.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atmosphere::{AtmosphereInputs, WeatherMetadata};
    use crate::example_models::{
        ExampleConductance, ExampleEnergy, ExampleInterception, ExamplePhotosynthesis,
    };
    use crate::model::ModelList;
    use crate::variable::Variable;
    use std::collections::{BTreeMap, HashMap};

    fn organ(a: f64) -> Organ {
        let models = ModelList::builder()
            .with_light_interception(ExampleInterception { rs: 100.0, ppfd: 500.0 })
            .with_energy_balance(ExampleEnergy)
            .with_photosynthesis(ExamplePhotosynthesis { a })
            .with_stomatal_conductance(ExampleConductance { slope: 0.02 })
            .build();
        Organ::builder(models)
            .with_initial_value(Variable::SkyFraction, 1.0)
            .with_initial_value(Variable::Dimension, 0.03)
            .build()
            .unwrap()
    }

    fn weather() -> Weather {
        let records = vec![
            AtmosphereInputs::new(20.0, 1.0, 101.3).with_relative_humidity(0.65),
            AtmosphereInputs::new(25.0, 2.0, 101.3).with_relative_humidity(0.5),
        ];
        Weather::from_inputs(&records, WeatherMetadata::default(), &Constants::default()).unwrap()
    }

    #[test]
    fn test_map_over_weather() {
        let mut organs = BTreeMap::from([("leaf 1", organ(10.0)), ("leaf 2", organ(20.0))]);
        let output = Simulator::new().simulate_mut(&mut organs, &weather()).unwrap();

        assert_eq!(output.rows.len(), 4);
        assert!(output.is_complete());
        let labels: Vec<(String, usize)> = output
            .rows
            .iter()
            .map(|row| (row.organ.to_string(), row.timestep))
            .collect();
        assert_eq!(
            labels,
            vec![
                ("leaf 1".to_string(), 0),
                ("leaf 1".to_string(), 1),
                ("leaf 2".to_string(), 0),
                ("leaf 2".to_string(), 1),
            ]
        );
        // Leaf temperature follows the air
        assert_eq!(output.rows[1].status.get(Variable::LeafTemperature), Some(25.0));
        assert_eq!(output.rows[2].status.get(Variable::Assimilation), Some(20.0));
        // A single status holds the last time-step
        assert_eq!(
            organs["leaf 1"].statuses()[0].get(Variable::LeafTemperature),
            Some(25.0)
        );
    }

    #[test]
    fn test_hash_map_rows_are_sorted_by_key() {
        let organs: HashMap<String, Organ> = HashMap::from([
            ("b".to_string(), organ(10.0)),
            ("a".to_string(), organ(10.0)),
        ]);
        let output = Simulator::new().simulate(&organs, &weather()).unwrap();
        let key = OrganKey::from("a");

        assert_eq!(output.rows[0].organ, key);
        assert_eq!(output.rows_for(&key).count(), 2);
        // Non-mutating
        assert!(!organs["a"].statuses()[0].is_initialized(Variable::Assimilation));
    }

    #[test]
    fn test_vec_with_atmosphere() {
        let mut organs = vec![organ(1.0), organ(2.0), organ(3.0)];
        let weather = weather();
        let output = Simulator::new().simulate_mut(&mut organs, &weather[0]).unwrap();

        assert_eq!(output.rows.len(), 3);
        assert_eq!(output.rows[2].organ, OrganKey::Index(2));
        assert_eq!(output.rows[2].status.get(Variable::Assimilation), Some(3.0));
    }

    #[test]
    fn test_status_per_time_step() {
        let models = organ(1.0).models().clone();
        let mut single = Organ::builder(models)
            .with_initial_value(Variable::SkyFraction, 1.0)
            .with_initial_value(Variable::Dimension, vec![0.03, 0.05])
            .build()
            .unwrap();
        let output = Simulator::new().simulate_mut(&mut single, &weather()).unwrap();

        assert_eq!(output.rows.len(), 2);
        assert_eq!(single.statuses()[0].get(Variable::LeafTemperature), Some(20.0));
        assert_eq!(single.statuses()[1].get(Variable::LeafTemperature), Some(25.0));
    }

    #[test]
    fn test_status_count_mismatch() {
        let models = organ(1.0).models().clone();
        let mut organ = Organ::builder(models)
            .with_initial_value(Variable::SkyFraction, 1.0)
            .with_initial_value(Variable::Dimension, vec![0.03, 0.05, 0.07])
            .build()
            .unwrap();
        let result = Simulator::new().simulate_mut(&mut organ, &weather());
        assert!(matches!(result, Err(LeafError::ShapeMismatch { found: 3, .. })));
    }

    #[test]
    fn test_failure_policies() {
        let broken = Organ::new(organ(1.0).models().clone(), Status::new());
        let mut organs = vec![broken, organ(2.0)];

        let aborted = Simulator::new().simulate(&organs, &weather());
        assert!(matches!(aborted, Err(LeafError::Uninitialized { .. })));

        let output = Simulator::new()
            .with_failure_policy(FailurePolicy::Isolate)
            .simulate_mut(&mut organs, &weather())
            .unwrap();
        assert_eq!(output.failures.len(), 1);
        assert_eq!(output.failures[0].organ, OrganKey::Index(0));
        assert_eq!(output.rows.len(), 2);
        assert!(output.rows.iter().all(|row| row.organ == OrganKey::Index(1)));
    }
}
