//! Strategy parameters
//!
//! Parameter structs deserialize with `#[serde(default)]`, so a configuration document
//! only needs to list the values that differ from the defaults.

mod fvcb;
mod monteith;
mod translucent;

pub use fvcb::FvcbParameters;
pub use monteith::MonteithParameters;
pub use translucent::TranslucentParameters;
