use crate::process::Process;
use crate::variable::{Variable, VariableSet};
use thiserror::Error;

/// Error type for invalid operations.
#[derive(Error, Debug)]
pub enum LeafError {
    #[error("{0}")]
    Error(String),
    #[error("Some variables must be initialized before running {process}: {}", .variables)]
    Uninitialized {
        process: Process,
        variables: VariableSet,
    },
    #[error("{process} requires a {required} model but none is attached")]
    MissingModel { process: Process, required: Process },
    #[error("No valid root for the {limitation}-limited rate in {model}: {details}")]
    NoValidRoot {
        model: &'static str,
        limitation: &'static str,
        details: String,
    },
    #[error("Shape mismatch for {variable}. Expected {expected} values, got {found}")]
    ShapeMismatch {
        variable: String,
        expected: usize,
        found: usize,
    },
    #[error("The atmosphere does not provide {0}")]
    MissingAtmosphere(&'static str),
    #[error("Invalid atmosphere: {0}")]
    InvalidAtmosphere(String),
    #[error("A weather series needs at least one time-step")]
    EmptyWeather,
    #[error("Invalid constants: {0}")]
    InvalidConstants(#[from] toml::de::Error),
}

impl LeafError {
    /// Shortcut for an [`LeafError::Uninitialized`] about a single variable.
    pub fn uninitialized(process: Process, variable: Variable) -> Self {
        LeafError::Uninitialized {
            process,
            variables: VariableSet::from_iter([variable]),
        }
    }
}

/// Convenience type for `Result<T, LeafError>`.
pub type LeafResult<T> = Result<T, LeafError>;
