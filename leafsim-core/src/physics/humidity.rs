use crate::constants::Constants;
use crate::FloatValue;

/// Saturated water vapour pressure (kPa) at temperature `t`.
///
/// $$ e_s = 0.61375 \exp\left(\frac{17.502\, T}{T + 240.97}\right) $$
pub fn e_sat(t: FloatValue) -> FloatValue {
    0.61375 * (17.502 * t / (t + 240.97)).exp()
}

/// Slope of the saturation vapour pressure curve (kPa K-1), by finite difference.
pub fn e_sat_slope(t: FloatValue) -> FloatValue {
    (e_sat(t + 0.1) - e_sat(t)) / 0.1
}

/// Actual vapour pressure (kPa) from relative humidity (0-1).
pub fn vapor_pressure(t: FloatValue, rh: FloatValue) -> FloatValue {
    rh * e_sat(t)
}

/// Dry air density (kg m-3) at temperature `t` and pressure `p` (kPa).
pub fn air_density(t: FloatValue, p: FloatValue, constants: &Constants) -> FloatValue {
    p * 1e3 / (constants.rd * constants.to_kelvin(t))
}

/// Latent heat of vaporization of water (J kg-1).
pub fn latent_heat_vaporization(t: FloatValue, constants: &Constants) -> FloatValue {
    (constants.lambda0 - 0.002365 * t) * 1e6
}

/// Psychrometer constant (kPa K-1).
///
/// $$ \gamma = \frac{C_p P}{\varepsilon \lambda} $$
pub fn psychrometer_constant(p: FloatValue, lambda: FloatValue, constants: &Constants) -> FloatValue {
    constants.cp * p / (constants.epsilon * lambda)
}
