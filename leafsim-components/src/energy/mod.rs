//! Leaf energy balance strategies.

mod monteith;

pub use monteith::Monteith;
