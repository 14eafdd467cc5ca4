use leafsim_core::FloatValue;
use serde::{Deserialize, Serialize};

/// Optical properties of a translucent organ.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslucentParameters {
    /// Fraction of the incident radiation transmitted without interaction.
    /// Default: 0.0
    pub transparency: FloatValue,

    /// Scattering coefficient (reflectance + transmittance) in the PAR band.
    /// Default: 0.15
    pub scattering_par: FloatValue,

    /// Scattering coefficient in the near infrared band.
    /// Default: 0.9
    pub scattering_nir: FloatValue,
}

impl Default for TranslucentParameters {
    fn default() -> Self {
        Self {
            transparency: 0.0,
            scattering_par: 0.15,
            scattering_nir: 0.9,
        }
    }
}
