//! CO2 assimilation strategies.

mod constant;
mod fvcb;
mod fvcb_raw;
mod temperature;

pub use constant::ConstantA;
pub use fvcb::{Fvcb, FvcbOutput};
pub use fvcb_raw::FvcbRaw;
pub use temperature::{
    arrhenius, arrhenius_peaked, electron_transport, gamma_star, michaelis_menten, LeafRates,
};
