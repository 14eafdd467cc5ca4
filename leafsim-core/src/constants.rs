//! Physical constants.
//!
//! Every computation receives a [`Constants`] value explicitly. The defaults are the
//! canonical values; a partial TOML document can override any of them:
//!
//! ```rust
//! use leafsim_core::constants::Constants;
//!
//! let constants = Constants::from_toml_str("cp = 1010.0").unwrap();
//! assert_eq!(constants.cp, 1010.0);
//! assert_eq!(constants.k0, -273.15);
//! ```

use crate::errors::LeafResult;
use crate::FloatValue;
use serde::{Deserialize, Serialize};

/// Bundle of physical constants and unit conversion factors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Constants {
    /// Absolute zero (°C).
    /// Default: -273.15
    pub k0: FloatValue,

    /// Universal gas constant ($\text{J mol}^{-1}\text{ K}^{-1}$).
    /// Default: 8.314
    pub r: FloatValue,

    /// Gas constant of dry air ($\text{J kg}^{-1}\text{ K}^{-1}$).
    /// Default: 287.0586
    pub rd: FloatValue,

    /// Molecular diffusivity for heat at 0 °C ($\text{m}^2\text{ s}^{-1}$).
    /// Default: 21.5e-6
    pub dh0: FloatValue,

    /// Specific heat of air at constant pressure ($\text{J kg}^{-1}\text{ K}^{-1}$).
    /// Default: 1013.0
    pub cp: FloatValue,

    /// Ratio of the molecular weights of water vapour and dry air.
    /// Default: 0.622
    pub epsilon: FloatValue,

    /// Latent heat of vaporization at 0 °C ($\text{MJ kg}^{-1}$).
    /// Default: 2.501
    pub lambda0: FloatValue,

    /// Stefan-Boltzmann constant ($\text{W m}^{-2}\text{ K}^{-4}$).
    /// Default: 5.670373e-8
    pub sigma: FloatValue,

    /// Boundary-layer conductance ratio between water vapour and heat.
    /// Default: 1.075
    pub gbh_to_gbw: FloatValue,

    /// Stomatal conductance ratio between water vapour and CO2.
    /// Default: 1.57
    pub gsc_to_gsw: FloatValue,

    /// Boundary-layer conductance ratio between heat and CO2. Use 1.32 to account
    /// for the lower molecular diffusivity of CO2.
    /// Default: 1.0
    pub gbc_to_gbh: FloatValue,

    /// Molar mass of water ($\text{kg mol}^{-1}$).
    /// Default: 18.0e-3
    pub m_h2o: FloatValue,

    /// Conversion from PAR energy to photons ($\mu\text{mol J}^{-1}$).
    /// Default: 4.57
    pub j_to_umol: FloatValue,

    /// Fraction of the incident shortwave radiation that is PAR.
    /// Default: 0.48
    pub par_fraction: FloatValue,
}

impl Default for Constants {
    fn default() -> Self {
        Self {
            // Thermodynamics
            k0: -273.15,
            r: 8.314,
            rd: 287.0586,
            dh0: 21.5e-6,
            cp: 1013.0,
            epsilon: 0.622,
            lambda0: 2.501,

            // Radiation
            sigma: 5.670373e-8,
            j_to_umol: 4.57,
            par_fraction: 0.48,

            // Conductance ratios
            gbh_to_gbw: 1.075,
            gsc_to_gsw: 1.57,
            gbc_to_gbh: 1.0,

            m_h2o: 18.0e-3,
        }
    }
}

impl Constants {
    /// Read constants from a TOML document. Missing keys keep their default value.
    pub fn from_toml_str(document: &str) -> LeafResult<Self> {
        Ok(toml::from_str(document)?)
    }

    /// Convert a temperature from °C to K.
    pub fn to_kelvin(&self, temperature: FloatValue) -> FloatValue {
        temperature - self.k0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::LeafError;
    use is_close::is_close;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let constants = Constants::from_toml_str(
            r#"
            sigma = 5.67e-8
            gsc_to_gsw = 1.6
            "#,
        )
        .unwrap();

        assert_eq!(constants.sigma, 5.67e-8);
        assert_eq!(constants.gsc_to_gsw, 1.6);
        assert_eq!(constants.cp, Constants::default().cp);
        assert_eq!(constants.gbc_to_gbh, 1.0);
    }

    #[test]
    fn test_invalid_toml() {
        let result = Constants::from_toml_str("cp = \"warm\"");
        assert!(matches!(result, Err(LeafError::InvalidConstants(_))));
    }

    #[test]
    fn test_to_kelvin() {
        let constants = Constants::default();
        assert!(is_close!(constants.to_kelvin(25.0), 298.15));
    }
}
