//! Stomatal conductance strategies.
//!
//! Strategies expose their response to assimilation as a
//! [`ConductanceResponse`](leafsim_core::process::ConductanceResponse) so coupled
//! photosynthesis models can solve the supply/demand system analytically.

mod constant;
mod medlyn;

pub use constant::ConstantGs;
pub use medlyn::Medlyn;
