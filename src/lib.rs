//! Leaf-scale biophysics.
//!
//! `leafsim` couples light interception, the leaf energy balance and coupled
//! photosynthesis/stomatal conductance for individual plant organs. The data model
//! and the orchestration live in [`leafsim_core`], the model strategies in
//! [`leafsim_components`].
//!
//! ```rust
//! use leafsim::prelude::*;
//!
//! let constants = Constants::default();
//! let atmosphere = AtmosphereInputs::new(20.0, 1.0, 101.3)
//!     .with_relative_humidity(0.65)
//!     .build(&constants)
//!     .unwrap();
//!
//! let models = ModelList::builder()
//!     .with_light_interception(ConstantInterception::new(13.747, 1500.0))
//!     .with_energy_balance(Monteith::default())
//!     .with_photosynthesis(Fvcb::default())
//!     .with_stomatal_conductance(Medlyn::new(0.03, 12.0))
//!     .build();
//!
//! let mut leaf = Organ::builder(models)
//!     .with_initial_value(Variable::SkyFraction, 1.0)
//!     .with_initial_value(Variable::Dimension, 0.03)
//!     .build()
//!     .unwrap();
//!
//! leaf.run_mut(&atmosphere, &constants).unwrap();
//! let status = leaf.status(0).unwrap();
//! assert!(status.convergence().unwrap().is_converged());
//! ```

pub use leafsim_components;
pub use leafsim_core;

pub mod prelude {
    pub use leafsim_components::energy::Monteith;
    pub use leafsim_components::interception::{ConstantInterception, Translucent};
    pub use leafsim_components::photosynthesis::{ConstantA, Fvcb, FvcbRaw};
    pub use leafsim_components::stomatal::{ConstantGs, Medlyn};
    pub use leafsim_core::atmosphere::{Atmosphere, AtmosphereInputs, Weather, WeatherMetadata};
    pub use leafsim_core::constants::Constants;
    pub use leafsim_core::errors::{LeafError, LeafResult};
    pub use leafsim_core::model::ModelList;
    pub use leafsim_core::organ::{Organ, OrganBuilder};
    pub use leafsim_core::process::{Convergence, Process};
    pub use leafsim_core::simulation::{FailurePolicy, OrganKey, Simulator};
    pub use leafsim_core::status::Status;
    pub use leafsim_core::variable::Variable;
}
