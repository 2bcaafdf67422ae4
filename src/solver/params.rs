use serde::Deserialize;

use crate::error::{AttractorError, AttractorResult};

/// Coefficients of the Lorenz equations.
///
/// `a` is the Prandtl number (sigma), `b` the Rayleigh ratio (rho) and `c` the
/// geometric factor (beta).
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SystemParameters {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Default for SystemParameters {
    fn default() -> Self {
        Self::classic()
    }
}

impl SystemParameters {
    /// The chaotic parameter set Lorenz published in 1963.
    pub const fn classic() -> Self {
        Self {
            a: 10.0,
            b: 28.0,
            c: 8.0 / 3.0,
        }
    }

    pub fn validate(&self) -> AttractorResult<()> {
        for (name, v) in [("a", self.a), ("b", self.b), ("c", self.c)] {
            if !v.is_finite() {
                return Err(AttractorError::parameter(format!(
                    "coefficient {name} must be finite, got {v}"
                )));
            }
        }
        Ok(())
    }
}
