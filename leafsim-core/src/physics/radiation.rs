use crate::constants::Constants;
use crate::FloatValue;

/// Clear-sky emissivity of the atmosphere.
///
/// Brutsaert-type formula from the air temperature `t` (°C) and vapour pressure
/// `e` (kPa):
/// $$ \varepsilon_a = 0.642 \left(\frac{100\, e}{T_K}\right)^{1/7} $$
pub fn atmosphere_emissivity(t: FloatValue, e: FloatValue, constants: &Constants) -> FloatValue {
    0.642 * (e * 100.0 / constants.to_kelvin(t)).powf(1.0 / 7.0)
}

/// Radiant flux density (W m-2) emitted by a black body at temperature `t` (°C).
pub fn black_body(t: FloatValue, constants: &Constants) -> FloatValue {
    constants.sigma * constants.to_kelvin(t).powi(4)
}

/// Radiant flux density (W m-2) emitted by a grey body of emissivity `emissivity`.
pub fn grey_body(t: FloatValue, emissivity: FloatValue, constants: &Constants) -> FloatValue {
    emissivity * black_body(t, constants)
}

/// Net longwave radiation (W m-2) exchanged between an organ and the sky.
///
/// Both surfaces are treated as grey bodies with an effective emissivity
/// $$ \varepsilon = \frac{1}{1/\varepsilon_l + 1/\varepsilon_a - 1} $$
/// and the flux is weighted by the fraction of the organ that sees the sky:
/// $$ R_{ll} = F\, \varepsilon\, \sigma (T_a^4 - T_l^4) $$
///
/// A positive value means the organ gains energy, i.e. the organ is colder than
/// the air.
pub fn net_longwave_radiation(
    t_leaf: FloatValue,
    t_air: FloatValue,
    leaf_emissivity: FloatValue,
    air_emissivity: FloatValue,
    sky_fraction: FloatValue,
    constants: &Constants,
) -> FloatValue {
    let effective = 1.0 / (1.0 / leaf_emissivity + 1.0 / air_emissivity - 1.0);
    sky_fraction * effective * (black_body(t_air, constants) - black_body(t_leaf, constants))
}
