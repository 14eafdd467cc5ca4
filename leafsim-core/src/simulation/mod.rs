//! Running organs and collections of organs against atmospheric forcing.
//!
//! A [`Simulator`] runs anything implementing [`OrganCollection`] (a single
//! [`Organ`](crate::organ::Organ), a `Vec` or slice of organs, or a map of organs keyed
//! by name) against a single [`Atmosphere`](crate::atmosphere::Atmosphere) or a
//! [`Weather`](crate::atmosphere::Weather) series, and produces one
//! [`SimulationRow`] per organ and time-step.

mod collection;
mod runtime;

pub use collection::{OrganCollection, OrganKey};
pub use runtime::{
    FailurePolicy, Forcing, OrganFailure, SimulationOutput, SimulationRow, Simulator,
};
