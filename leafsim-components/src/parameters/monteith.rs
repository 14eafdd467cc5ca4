//! Monteith energy balance parameters

use leafsim_core::FloatValue;
use serde::{Deserialize, Serialize};

/// Parameters of the Monteith leaf energy balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonteithParameters {
    /// Number of faces exchanging sensible heat.
    /// Default: 2.0
    pub a_sh: FloatValue,

    /// Number of faces exchanging latent heat (1 for hypostomatous leaves).
    /// Default: 1.0
    pub a_sv: FloatValue,

    /// Leaf emissivity.
    /// Default: 0.955
    pub emissivity: FloatValue,

    /// Maximum number of iterations before giving up on convergence.
    /// Default: 10
    pub max_iterations: usize,

    /// Leaf temperature update (K) under which the balance has converged.
    /// Default: 0.05
    pub delta_t: FloatValue,
}

impl Default for MonteithParameters {
    fn default() -> Self {
        Self {
            a_sh: 2.0,
            a_sv: 1.0,
            emissivity: 0.955,
            max_iterations: 10,
            delta_t: 0.05,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_deserialization() {
        let params: MonteithParameters =
            serde_json::from_str(r#"{"max_iterations": 50, "a_sv": 2.0}"#).unwrap();
        assert_eq!(params.max_iterations, 50);
        assert_eq!(params.a_sv, 2.0);
        assert_eq!(params.emissivity, 0.955);
    }
}
