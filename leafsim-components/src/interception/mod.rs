//! Light interception strategies.
//!
//! Interception writes the absorbed shortwave radiation and the absorbed PPFD that
//! the energy balance and photosynthesis consume.

mod constant;
mod translucent;

pub use constant::ConstantInterception;
pub use translucent::Translucent;
