//! Penman-Monteith partition of the net radiation.
//!
//! Resistances are in s m-1. `a_sh` and `a_sv` are the number of faces exchanging
//! sensible and latent heat. For any apparent psychrometer constant the two fluxes
//! sum to the net radiation:
//! $$ \lambda E + H = R_n $$

use crate::FloatValue;

/// Apparent psychrometer constant (kPa K-1).
///
/// $$ \gamma^* = \gamma \frac{a_{sh}}{a_{sv}} \frac{r_{bv} + r_{sv}}{r_{bh}} $$
pub fn apparent_psychrometer_constant(
    gamma: FloatValue,
    a_sh: FloatValue,
    a_sv: FloatValue,
    rbv: FloatValue,
    rsv: FloatValue,
    rbh: FloatValue,
) -> FloatValue {
    gamma * a_sh / a_sv * (rbv + rsv) / rbh
}

/// Latent heat flux (W m-2).
///
/// $$ \lambda E = \frac{\Delta R_n + \rho C_p \, VPD \, a_{sh} / r_{bh}}{\Delta + \gamma^*} $$
#[allow(clippy::too_many_arguments)]
pub fn latent_heat_flux(
    rn: FloatValue,
    vpd: FloatValue,
    delta: FloatValue,
    gamma_star: FloatValue,
    rho: FloatValue,
    cp: FloatValue,
    a_sh: FloatValue,
    rbh: FloatValue,
) -> FloatValue {
    (delta * rn + rho * cp * vpd * (a_sh / rbh)) / (delta + gamma_star)
}

/// Sensible heat flux (W m-2).
///
/// $$ H = \frac{\gamma^* R_n - \rho C_p \, VPD \, a_{sh} / r_{bh}}{\Delta + \gamma^*} $$
#[allow(clippy::too_many_arguments)]
pub fn sensible_heat_flux(
    rn: FloatValue,
    vpd: FloatValue,
    delta: FloatValue,
    gamma_star: FloatValue,
    rho: FloatValue,
    cp: FloatValue,
    a_sh: FloatValue,
    rbh: FloatValue,
) -> FloatValue {
    (gamma_star * rn - rho * cp * vpd * (a_sh / rbh)) / (delta + gamma_star)
}
