//! Coupled Farquhar-von Caemmerer-Berry photosynthesis
//!
//! Net assimilation is the minimum of three limitations minus dark respiration:
//! $$ A = \min(W_c, W_j, W_p) - R_d $$
//!
//! The Rubisco-limited rate $W_c$ and the electron-transport-limited rate $W_j$
//! depend on the intercellular CO2 $C_i$, which itself depends on the stomatal
//! conductance through the supply function $A = G_s (C_s - C_i)$. With the linear
//! conductance response $G_s = g_0 + s A$ of the attached stomatal model, each
//! limitation reduces to a quadratic in $C_i$ which is solved analytically
//! (Duursma 2015).
//!
//! When the response falls under the conductance floor $g_{s,min}$, or has no
//! valid root, the system is solved again with $G_s = g_{s,min}$ so that the
//! supply function still holds.

use crate::parameters::FvcbParameters;
use crate::photosynthesis::temperature::{electron_transport, LeafRates};
use leafsim_core::constants::Constants;
use leafsim_core::errors::{LeafError, LeafResult};
use leafsim_core::process::{
    ConductanceResponse, PhotosynthesisModel, Process, ProcessContext, RequirementDefinition,
};
use leafsim_core::status::Status;
use leafsim_core::variable::Variable;
use leafsim_core::FloatValue;
use serde::{Deserialize, Serialize};

/// Result of a coupled FvCB computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FvcbOutput {
    /// Net assimilation ($\mu\text{mol m}^{-2}\text{ s}^{-1}$)
    pub a: FloatValue,
    /// Stomatal conductance to CO2 (mol m-2 s-1)
    pub gs: FloatValue,
    /// Intercellular CO2 (ppm)
    pub ci: FloatValue,
    /// Rubisco-limited rate
    pub wc: FloatValue,
    /// Electron-transport-limited rate
    pub wj: FloatValue,
    /// TPU-limited rate
    pub wp: FloatValue,
    /// Dark respiration
    pub rd: FloatValue,
}

/// Larger root of $a x^2 + b x + c$.
fn positive_root(
    a: FloatValue,
    b: FloatValue,
    c: FloatValue,
    limitation: &'static str,
) -> LeafResult<FloatValue> {
    if a <= 0.0 {
        return Err(LeafError::NoValidRoot {
            model: "Fvcb",
            limitation,
            details: format!("the quadratic coefficient is not positive ({})", a),
        });
    }
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return Err(LeafError::NoValidRoot {
            model: "Fvcb",
            limitation,
            details: format!("negative discriminant ({})", discriminant),
        });
    }
    Ok((-b + discriminant.sqrt()) / (2.0 * a))
}

/// Coupled photosynthesis model.
///
/// Needs a stomatal conductance model providing a [`ConductanceResponse`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Fvcb {
    pub parameters: FvcbParameters,
}

impl Fvcb {
    pub fn from_parameters(parameters: FvcbParameters) -> Self {
        Self { parameters }
    }

    /// Solve the coupled system for a leaf at temperature `tl` (°C), surface CO2 `cs`
    /// (ppm) and absorbed PPFD `ppfd`.
    pub fn calculate(
        &self,
        tl: FloatValue,
        cs: FloatValue,
        ppfd: FloatValue,
        response: &ConductanceResponse,
        constants: &Constants,
    ) -> LeafResult<FvcbOutput> {
        let params = &self.parameters;
        let rates = LeafRates::at_temperature(tl, params, constants);
        let j = electron_transport(ppfd, rates.jmax, params.alpha, params.theta);
        let vj = j / 4.0;
        let wp = rates.tpu_limited();

        let coupled = Self::limitations(cs, vj, &rates, response.g0, response.slope)
            .map(|(wc, wj)| (wc, wj, wc.min(wj).min(wp) - rates.rd))
            .ok()
            .filter(|(_, _, a)| response.g0 + response.slope * a >= response.gs_min);

        let (wc, wj, assimilation, gs) = match coupled {
            Some((wc, wj, a)) => (wc, wj, a, response.g0 + response.slope * a),
            None => {
                let (wc, wj) = Self::limitations(cs, vj, &rates, response.gs_min, 0.0)?;
                (wc, wj, wc.min(wj).min(wp) - rates.rd, response.gs_min)
            }
        };
        let ci = cs.min(cs - assimilation / gs);

        Ok(FvcbOutput {
            a: assimilation,
            gs,
            ci,
            wc,
            wj,
            wp,
            rd: rates.rd,
        })
    }

    /// Rubisco and electron transport limited rates for the conductance response
    /// $G_s = g_0 + s A$.
    fn limitations(
        cs: FloatValue,
        vj: FloatValue,
        rates: &LeafRates,
        g0: FloatValue,
        slope: FloatValue,
    ) -> LeafResult<(FloatValue, FloatValue)> {
        let LeafRates {
            gamma_star: gs_star,
            km,
            vcmax,
            rd,
            ..
        } = *rates;

        // Electron transport limitation. No light, no carboxylation.
        let wj = if vj > 0.0 {
            let a = g0 + slope * (vj - rd);
            let b = (1.0 - cs * slope) * (vj - rd) + g0 * (2.0 * gs_star - cs)
                - slope * (vj * gs_star + 2.0 * gs_star * rd);
            let c = -(1.0 - cs * slope) * gs_star * (vj + 2.0 * rd) - g0 * 2.0 * gs_star * cs;
            let cij = positive_root(a, b, c, "electron transport")?;
            if cij > 0.0 {
                vj * (cij - gs_star) / (cij + 2.0 * gs_star)
            } else {
                0.0
            }
        } else {
            0.0
        };

        // Rubisco limitation
        let a = g0 + slope * (vcmax - rd);
        let b = (1.0 - cs * slope) * (vcmax - rd) + g0 * (km - cs)
            - slope * (vcmax * gs_star + km * rd);
        let c = -(1.0 - cs * slope) * (vcmax * gs_star + km * rd) - g0 * km * cs;
        let civ = positive_root(a, b, c, "Rubisco")?;
        let wc = vcmax * (civ - gs_star) / (civ + km);

        Ok((wc, wj))
    }
}

#[typetag::serde]
impl PhotosynthesisModel for Fvcb {
    fn definitions(&self) -> Vec<RequirementDefinition> {
        vec![
            RequirementDefinition::input(Variable::AbsorbedPpfd),
            RequirementDefinition::input(Variable::LeafTemperature),
            RequirementDefinition::input(Variable::SurfaceCo2),
            RequirementDefinition::output(Variable::Assimilation),
            RequirementDefinition::output(Variable::StomatalConductance),
            RequirementDefinition::output(Variable::IntercellularCo2),
        ]
    }

    fn run(&self, context: &ProcessContext, status: &mut Status) -> LeafResult<()> {
        let process = Process::Photosynthesis;
        let gs_model =
            context
                .models
                .stomatal_conductance()
                .ok_or(LeafError::MissingModel {
                    process,
                    required: Process::StomatalConductance,
                })?;

        let tl = status.require(Variable::LeafTemperature, process)?;
        let cs = status.require(Variable::SurfaceCo2, process)?;
        let ppfd = status.require(Variable::AbsorbedPpfd, process)?;
        let response = gs_model.response(context, status)?;

        let output = self.calculate(tl, cs, ppfd, &response, context.constants)?;

        status.set(Variable::Assimilation, output.a);
        status.set(Variable::StomatalConductance, output.gs);
        status.set(Variable::IntercellularCo2, output.ci);
        Ok(())
    }
}
