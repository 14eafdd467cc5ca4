//! Model strategies for leafsim organs.
//!
//! # Module Organisation
//!
//! Strategies are organised by process:
//! - `interception`: absorbed shortwave radiation and PPFD
//! - `energy`: leaf energy balance (Monteith)
//! - `photosynthesis`: CO2 assimilation (Farquhar-von Caemmerer-Berry, constant)
//! - `stomatal`: stomatal conductance (Medlyn, constant)
//!
//! # Parameters
//!
//! The larger strategies have an associated parameters struct in the `parameters`
//! module with published defaults.

pub mod energy;
pub mod interception;
pub mod parameters;
pub mod photosynthesis;
pub mod stomatal;
