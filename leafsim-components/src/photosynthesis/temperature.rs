//! Temperature and light dependence of the photosynthetic rates.

use crate::parameters::FvcbParameters;
use leafsim_core::constants::Constants;
use leafsim_core::FloatValue;

/// Arrhenius temperature response.
///
/// $$ k(T) = k_{ref} \exp\left(\frac{E_a (T_K - T_{ref,K})}{R\, T_K\, T_{ref,K}}\right) $$
pub fn arrhenius(
    k_ref: FloatValue,
    ea: FloatValue,
    t: FloatValue,
    t_ref: FloatValue,
    constants: &Constants,
) -> FloatValue {
    let tk = constants.to_kelvin(t);
    let trk = constants.to_kelvin(t_ref);
    k_ref * (ea * (tk - trk) / (constants.r * tk * trk)).exp()
}

/// Arrhenius response with a high-temperature deactivation term.
///
/// $$ k(T) = k_{ref} \exp\left(\frac{E_a (T_K - T_{ref,K})}{R\, T_K\, T_{ref,K}}\right)
///   \frac{1 + \exp\left(\frac{T_{ref,K} \Delta S - H_d}{R\, T_{ref,K}}\right)}
///        {1 + \exp\left(\frac{T_K \Delta S - H_d}{R\, T_K}\right)} $$
pub fn arrhenius_peaked(
    k_ref: FloatValue,
    ea: FloatValue,
    hd: FloatValue,
    delta_s: FloatValue,
    t: FloatValue,
    t_ref: FloatValue,
    constants: &Constants,
) -> FloatValue {
    let tk = constants.to_kelvin(t);
    let trk = constants.to_kelvin(t_ref);
    let r = constants.r;
    arrhenius(k_ref, ea, t, t_ref, constants) * (1.0 + ((trk * delta_s - hd) / (r * trk)).exp())
        / (1.0 + ((tk * delta_s - hd) / (r * tk)).exp())
}

/// CO2 compensation point in the absence of dark respiration (ppm).
pub fn gamma_star(t: FloatValue, t_ref: FloatValue, constants: &Constants) -> FloatValue {
    arrhenius(42.75, 37830.0, t, t_ref, constants)
}

/// Effective Michaelis-Menten coefficient of Rubisco for CO2 (ppm).
///
/// $$ K_m = K_c \left(1 + \frac{O_2}{K_o}\right) $$
pub fn michaelis_menten(
    t: FloatValue,
    t_ref: FloatValue,
    o2: FloatValue,
    constants: &Constants,
) -> FloatValue {
    let kc = arrhenius(404.9, 79430.0, t, t_ref, constants);
    let ko = arrhenius(278.4, 36380.0, t, t_ref, constants);
    kc * (1.0 + o2 / ko)
}

/// Electron transport rate from the non-rectangular hyperbola.
///
/// $$ J = \frac{\alpha I + J_{max} - \sqrt{(\alpha I + J_{max})^2 - 4 \alpha \theta I J_{max}}}{2\theta} $$
pub fn electron_transport(
    ppfd: FloatValue,
    jmax: FloatValue,
    alpha: FloatValue,
    theta: FloatValue,
) -> FloatValue {
    let s = alpha * ppfd + jmax;
    (s - (s * s - 4.0 * alpha * theta * ppfd * jmax).sqrt()) / (2.0 * theta)
}

/// Photosynthetic rates of a leaf at a given temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeafRates {
    pub gamma_star: FloatValue,
    pub km: FloatValue,
    pub jmax: FloatValue,
    pub vcmax: FloatValue,
    pub rd: FloatValue,
    pub tpu: FloatValue,
}

impl LeafRates {
    pub fn at_temperature(t: FloatValue, params: &FvcbParameters, constants: &Constants) -> Self {
        let t_ref = params.t_ref;
        Self {
            gamma_star: gamma_star(t, t_ref, constants),
            km: michaelis_menten(t, t_ref, params.o2, constants),
            jmax: arrhenius_peaked(
                params.jmax_ref,
                params.ea_jmax,
                params.hd_jmax,
                params.delta_s_jmax,
                t,
                t_ref,
                constants,
            ),
            vcmax: arrhenius_peaked(
                params.vcmax_ref,
                params.ea_vcmax,
                params.hd_vcmax,
                params.delta_s_vcmax,
                t,
                t_ref,
                constants,
            ),
            rd: arrhenius(params.rd_ref, params.ea_rd, t, t_ref, constants),
            tpu: params.tpu_ref,
        }
    }

    /// Rate allowed by the triose phosphate utilization.
    pub fn tpu_limited(&self) -> FloatValue {
        3.0 * self.tpu
    }
}
