//! Micrometeorology relations shared by the atmosphere and the model strategies.
//!
//! Temperatures are in °C, pressures in kPa and conductances in
//! $\text{m s}^{-1}$ unless the function name says otherwise.

mod conductance;
mod heat;
mod humidity;
mod radiation;

pub use conductance::{
    boundary_conductance_co2, gbh_free, gbh_forced, gbh_to_gbw, gsc_to_gsw, mol_to_ms, ms_to_mol,
};
pub use heat::{apparent_psychrometer_constant, latent_heat_flux, sensible_heat_flux};
pub use humidity::{
    air_density, e_sat, e_sat_slope, latent_heat_vaporization, psychrometer_constant,
    vapor_pressure,
};
pub use radiation::{atmosphere_emissivity, black_body, grey_body, net_longwave_radiation};
