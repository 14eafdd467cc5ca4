//! Monteith & Unsworth (2013) leaf energy balance
//!
//! The leaf temperature is found by fixed-point iteration. Each iteration computes
//! the net radiation and the boundary-layer conductance from the current leaf
//! temperature, runs the assimilation side of the organ, and partitions the net
//! radiation into sensible and latent heat with the Penman-Monteith equation:
//!
//! $$ \lambda E = \frac{\Delta R_n + \rho C_p \, VPD \, a_{sh} / r_{bh}}{\Delta + \gamma^*} $$
//! $$ H = R_n - \lambda E $$
//!
//! The sensible heat then gives the next leaf temperature estimate
//! $$ T_l = T_a + \frac{H\, r_{bh}}{\rho C_p a_{sh}} $$
//!
//! The iteration starts slightly below the air temperature and stops once the
//! update falls under `delta_t`. The status keeps the estimate the fluxes were
//! computed from, so the stored state is consistent at every exit.

use crate::parameters::MonteithParameters;
use leafsim_core::errors::LeafResult;
use leafsim_core::physics;
use leafsim_core::process::{
    Convergence, EnergyModel, Process, ProcessContext, RequirementDefinition,
};
use leafsim_core::status::Status;
use leafsim_core::variable::Variable;
use leafsim_core::FloatValue;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Smallest boundary-layer conductance for heat (m s-1), reached in still air.
const MIN_GBH: FloatValue = 1e-4;

/// Initial leaf temperature below the air temperature (K).
const INITIAL_OFFSET: FloatValue = 0.2;

/// Smallest surface CO2 (ppm), reached when the boundary layer cannot supply the
/// assimilation.
const MIN_SURFACE_CO2: FloatValue = 1.0;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Monteith {
    pub parameters: MonteithParameters,
}

impl Monteith {
    pub fn from_parameters(parameters: MonteithParameters) -> Self {
        Self { parameters }
    }
}

#[typetag::serde]
impl EnergyModel for Monteith {
    fn definitions(&self) -> Vec<RequirementDefinition> {
        vec![
            RequirementDefinition::input(Variable::AbsorbedShortwave),
            RequirementDefinition::input(Variable::SkyFraction),
            RequirementDefinition::input(Variable::Dimension),
            RequirementDefinition::input(Variable::StomatalConductance),
            RequirementDefinition::output(Variable::LeafTemperature),
            RequirementDefinition::output(Variable::NetRadiation),
            RequirementDefinition::output(Variable::NetLongwave),
            RequirementDefinition::output(Variable::SensibleHeat),
            RequirementDefinition::output(Variable::LatentHeat),
            RequirementDefinition::output(Variable::SurfaceCo2),
            RequirementDefinition::output(Variable::BoundaryConductanceHeat),
            RequirementDefinition::output(Variable::BoundaryConductanceCo2),
            RequirementDefinition::output(Variable::SurfaceVpd),
        ]
    }

    fn run(&self, context: &ProcessContext, status: &mut Status) -> LeafResult<Convergence> {
        let process = Process::EnergyBalance;
        let params = &self.parameters;
        let atmosphere = context.atmosphere;
        let constants = context.constants;

        let rs = status.require(Variable::AbsorbedShortwave, process)?;
        let sky_fraction = status.require(Variable::SkyFraction, process)?;
        let d = status.require(Variable::Dimension, process)?;

        let ta = atmosphere.temperature();
        let ca = atmosphere.co2();
        let p = atmosphere.pressure();
        let vpd = atmosphere.vpd();
        let rho = atmosphere.air_density();
        let gamma = atmosphere.psychrometer_constant();
        let delta = atmosphere.saturation_slope();
        let cp = constants.cp;

        let mut tl = ta - INITIAL_OFFSET;
        status.set(Variable::SurfaceCo2, ca);
        status.set(Variable::SurfaceVpd, vpd);

        let mut iteration = 0;
        loop {
            iteration += 1;

            let rll = physics::net_longwave_radiation(
                tl,
                ta,
                params.emissivity,
                atmosphere.emissivity(),
                sky_fraction,
                constants,
            );
            let rn = rs + rll;

            let gbh_ms = (physics::gbh_free(ta, tl, d, constants)
                + physics::gbh_forced(atmosphere.wind(), d))
            .max(MIN_GBH);
            let gbh = physics::ms_to_mol(gbh_ms, ta, p, constants);
            let gbc = physics::boundary_conductance_co2(gbh, constants);
            status.set(Variable::BoundaryConductanceHeat, gbh);
            status.set(Variable::BoundaryConductanceCo2, gbc);

            status.set(Variable::LeafTemperature, tl);
            context.run_assimilation(status)?;
            if let Some(a) = status.get(Variable::Assimilation) {
                status.set(
                    Variable::SurfaceCo2,
                    ca.min(ca - a / gbc).max(MIN_SURFACE_CO2),
                );
            }

            let gs = status.require(Variable::StomatalConductance, process)?;
            let rsv = 1.0
                / physics::gsc_to_gsw(physics::mol_to_ms(gs, ta, p, constants), constants);
            let rbh = 1.0 / gbh_ms;
            let rbv = 1.0 / physics::gbh_to_gbw(gbh_ms, constants);

            let gamma_star = physics::apparent_psychrometer_constant(
                gamma,
                params.a_sh,
                params.a_sv,
                rbv,
                rsv,
                rbh,
            );
            let latent = physics::latent_heat_flux(
                rn, vpd, delta, gamma_star, rho, cp, params.a_sh, rbh,
            );
            let sensible = physics::sensible_heat_flux(
                rn, vpd, delta, gamma_star, rho, cp, params.a_sh, rbh,
            );

            let tl_new = ta + sensible / (rho * cp * params.a_sh / rbh);
            let dl = latent * gamma * (rbv + rsv) / (rho * cp * params.a_sv);
            let residual = (tl_new - tl).abs();

            status.set(Variable::NetLongwave, rll);
            status.set(Variable::NetRadiation, rn);
            status.set(Variable::SensibleHeat, sensible);
            status.set(Variable::LatentHeat, latent);
            status.set(Variable::SurfaceVpd, dl);

            debug!(
                "Energy balance iteration {}: Tl = {:.4} °C, Rn = {:.3} W m-2, next Tl = {:.4} °C",
                iteration, tl, rn, tl_new
            );

            if residual <= params.delta_t {
                return Ok(Convergence::Converged {
                    iterations: iteration,
                });
            }
            if iteration >= params.max_iterations {
                warn!(
                    "Energy balance did not converge after {} iterations (last update {:.4} K), \
                     keeping the last estimate",
                    iteration, residual
                );
                return Ok(Convergence::Diverged {
                    iterations: iteration,
                    residual,
                });
            }
            tl = tl_new;
        }
    }
}
