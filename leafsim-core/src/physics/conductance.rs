use crate::constants::Constants;
use crate::FloatValue;

/// Boundary-layer conductance for heat under free convection (m s-1).
///
/// Free convection only happens when the organ is warmer than the air:
/// $$ Gr = 1.6 \times 10^8 \, |T_l - T_a| \, d^3 $$
/// $$ g_{free} = \frac{0.5\, D_h\, Gr^{1/4}}{d} $$
/// with the air thermal diffusivity $D_h = D_{h0} (1 + 0.007\, T_a)$.
/// Returns 0 when $T_l \le T_a$.
pub fn gbh_free(
    t_air: FloatValue,
    t_leaf: FloatValue,
    d: FloatValue,
    constants: &Constants,
) -> FloatValue {
    if t_leaf <= t_air {
        return 0.0;
    }
    let grashof = 1.6e8 * (t_leaf - t_air).abs() * d.powi(3);
    let dh = constants.dh0 * (1.0 + 0.007 * t_air);
    0.5 * dh * grashof.powf(0.25) / d
}

/// Boundary-layer conductance for heat under forced convection (m s-1).
///
/// $$ g_{forced} = 0.003 \sqrt{u / d} $$
pub fn gbh_forced(wind: FloatValue, d: FloatValue) -> FloatValue {
    0.003 * (wind / d).sqrt()
}

/// Convert a conductance from m s-1 to mol m-2 s-1.
pub fn ms_to_mol(g: FloatValue, t: FloatValue, p: FloatValue, constants: &Constants) -> FloatValue {
    g * p * 1000.0 / (constants.r * constants.to_kelvin(t))
}

/// Convert a conductance from mol m-2 s-1 to m s-1.
pub fn mol_to_ms(g: FloatValue, t: FloatValue, p: FloatValue, constants: &Constants) -> FloatValue {
    g * constants.r * constants.to_kelvin(t) / (p * 1000.0)
}

/// Boundary-layer conductance for water vapour from the one for heat.
pub fn gbh_to_gbw(gbh: FloatValue, constants: &Constants) -> FloatValue {
    gbh * constants.gbh_to_gbw
}

/// Stomatal conductance for water vapour from the one for CO2.
pub fn gsc_to_gsw(gsc: FloatValue, constants: &Constants) -> FloatValue {
    gsc * constants.gsc_to_gsw
}

/// Boundary-layer conductance for CO2 from the one for heat.
pub fn boundary_conductance_co2(gbh: FloatValue, constants: &Constants) -> FloatValue {
    gbh / constants.gbc_to_gbh
}
