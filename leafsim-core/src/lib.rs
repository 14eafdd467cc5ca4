//! Core data model and orchestration for leaf-scale biophysical simulations.
//!
//! An [`organ::Organ`] couples a [`model::ModelList`] (one optional strategy per
//! [`process::Process`]) with one [`status::Status`] per time-step. Strategies
//! read and write the status, the [`atmosphere::Atmosphere`] is read-only and the
//! physical constants are passed explicitly as a [`constants::Constants`] value.
//!
//! The concrete strategies live in the `leafsim-components` crate.

pub mod atmosphere;
pub mod constants;
pub mod errors;
#[cfg(test)]
mod example_models;
pub mod model;
pub mod organ;
pub mod physics;
pub mod process;
pub mod simulation;
pub mod status;
pub mod variable;

/// Floating point type used for every physical quantity.
pub type FloatValue = f64;
