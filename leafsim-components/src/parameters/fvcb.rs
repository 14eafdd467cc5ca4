//! Farquhar-von Caemmerer-Berry photosynthesis parameters
//!
//! Temperature responses follow Medlyn et al. (2002) for $J_{max}$, $V_{c,max}$ and
//! $R_d$, and Bernacchi et al. (2001) for $\Gamma^*$ and $K_m$.

use leafsim_core::FloatValue;
use serde::{Deserialize, Serialize};

/// Parameters of the FvCB photosynthesis model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FvcbParameters {
    /// Reference temperature of the rates (°C).
    /// Default: 25.0
    pub t_ref: FloatValue,

    // Rates at the reference temperature
    /// Maximum carboxylation rate ($\mu\text{mol m}^{-2}\text{ s}^{-1}$).
    /// Default: 200.0
    pub vcmax_ref: FloatValue,

    /// Maximum electron transport rate ($\mu\text{mol m}^{-2}\text{ s}^{-1}$).
    /// Default: 250.0
    pub jmax_ref: FloatValue,

    /// Dark respiration ($\mu\text{mol m}^{-2}\text{ s}^{-1}$).
    /// Default: 0.6
    pub rd_ref: FloatValue,

    /// Triose phosphate utilization rate ($\mu\text{mol m}^{-2}\text{ s}^{-1}$).
    /// Default: 9999.0 (never limiting)
    pub tpu_ref: FloatValue,

    /// Intercellular O2 concentration (mmol mol-1).
    /// Default: 210.0
    pub o2: FloatValue,

    // Temperature responses
    /// Activation energy of the dark respiration ($\text{J mol}^{-1}$).
    /// Default: 46390.0
    pub ea_rd: FloatValue,

    /// Activation energy of $J_{max}$ ($\text{J mol}^{-1}$).
    /// Default: 29680.0
    pub ea_jmax: FloatValue,

    /// Deactivation energy of $J_{max}$ ($\text{J mol}^{-1}$).
    /// Default: 200000.0
    pub hd_jmax: FloatValue,

    /// Entropy term of $J_{max}$ ($\text{J mol}^{-1}\text{ K}^{-1}$).
    /// Default: 631.88
    pub delta_s_jmax: FloatValue,

    /// Activation energy of $V_{c,max}$ ($\text{J mol}^{-1}$).
    /// Default: 58550.0
    pub ea_vcmax: FloatValue,

    /// Deactivation energy of $V_{c,max}$ ($\text{J mol}^{-1}$).
    /// Default: 200000.0
    pub hd_vcmax: FloatValue,

    /// Entropy term of $V_{c,max}$ ($\text{J mol}^{-1}\text{ K}^{-1}$).
    /// Default: 629.26
    pub delta_s_vcmax: FloatValue,

    // Light response
    /// Quantum yield of electron transport (mol e- mol-1 photons).
    /// Default: 0.24
    pub alpha: FloatValue,

    /// Curvature of the light response.
    /// Default: 0.7
    pub theta: FloatValue,
}

impl Default for FvcbParameters {
    fn default() -> Self {
        Self {
            t_ref: 25.0,

            // Reference rates
            vcmax_ref: 200.0,
            jmax_ref: 250.0,
            rd_ref: 0.6,
            tpu_ref: 9999.0,
            o2: 210.0,

            // Temperature responses
            ea_rd: 46390.0,
            ea_jmax: 29680.0,
            hd_jmax: 200000.0,
            delta_s_jmax: 631.88,
            ea_vcmax: 58550.0,
            hd_vcmax: 200000.0,
            delta_s_vcmax: 629.26,

            // Light response
            alpha: 0.24,
            theta: 0.7,
        }
    }
}
