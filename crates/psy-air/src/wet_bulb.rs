//! Wet-bulb temperature by safeguarded Newton iteration.
//!
//! The residual is `W(tdb, t, p) - W0` where `W0` is the humidity ratio
//! implied by the relative humidity. The slope comes from a backward finite
//! difference. Once the root is bracketed, steps that leave the bracket or
//! fail to halve the residual fall back to bisection: the saturation-pressure
//! fit jumps by about 1e-4 relative at 0 °C, and plain Newton can cycle
//! across that jump forever.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{PsychroError, PsychroResult};
use crate::formulas::{humidity_ratio_from_rh, humidity_ratio_from_wet_bulb};

/// Wet-bulb iteration configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WetBulbConfig {
    /// Maximum iterations
    pub max_iterations: usize,
    /// Relative tolerance on the humidity ratio residual
    pub rel_tol: f64,
    /// Finite-difference step, °C
    pub step: f64,
    /// Converged once the bracket is narrower than this, °C
    pub bracket_tol: f64,
}

impl Default for WetBulbConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            rel_tol: 1e-5,
            step: 0.001,
            bracket_tol: 1e-9,
        }
    }
}

/// Wet-bulb iteration result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WetBulbSolution {
    /// Wet-bulb temperature, °C
    pub temperature: f64,
    /// Number of iterations
    pub iterations: usize,
}

/// Solve the wet-bulb temperature for dry-bulb `tdb`, relative humidity `rh`
/// and pressure `p`, starting from `tdb`.
pub fn solve_wet_bulb(
    tdb: f64,
    rh: f64,
    p: f64,
    config: &WetBulbConfig,
) -> PsychroResult<WetBulbSolution> {
    let target = humidity_ratio_from_rh(tdb, rh, p)?;
    if target == 0.0 || !target.is_finite() {
        return Err(PsychroError::Convergence {
            what: format!("target humidity ratio is {target}, relative error is undefined"),
            iterations: 0,
        });
    }

    // below: residual < 0, above: residual > 0
    let mut below: Option<f64> = None;
    let mut above: Option<f64> = None;
    let mut prev_residual: Option<f64> = None;
    let mut t = tdb;

    for iter in 0..config.max_iterations {
        let w1 = humidity_ratio_from_wet_bulb(tdb, t, p)?;
        let residual = w1 - target;
        trace!(iter, t, residual, "wet bulb step");

        if (residual / target).abs() <= config.rel_tol {
            debug!(iterations = iter, wet_bulb = t, "wet bulb converged");
            return Ok(WetBulbSolution {
                temperature: t,
                iterations: iter,
            });
        }

        if residual > 0.0 {
            above = Some(t);
        } else {
            below = Some(t);
        }
        let bracket = below.zip(above);
        if let Some((lo, hi)) = bracket {
            if (hi - lo).abs() <= config.bracket_tol {
                let t = 0.5 * (lo + hi);
                debug!(iterations = iter, wet_bulb = t, "wet bulb bracket collapsed");
                return Ok(WetBulbSolution {
                    temperature: t,
                    iterations: iter,
                });
            }
        }

        let w2 = humidity_ratio_from_wet_bulb(tdb, t - config.step, p)?;
        let slope = (w1 - w2) / config.step;
        let newton = t - residual / slope;

        t = match bracket {
            Some((lo, hi)) => {
                let inside = newton.is_finite() && newton > lo.min(hi) && newton < lo.max(hi);
                let stalled = prev_residual.is_some_and(|r| residual.abs() > 0.5 * r.abs());
                if inside && !stalled {
                    newton
                } else {
                    0.5 * (lo + hi)
                }
            }
            None if newton.is_finite() => newton,
            None => {
                return Err(PsychroError::Convergence {
                    what: format!("zero slope at {t} °C"),
                    iterations: iter,
                });
            }
        };
        prev_residual = Some(residual);
    }

    Err(PsychroError::Convergence {
        what: format!(
            "maximum iterations {} reached at {t} °C",
            config.max_iterations
        ),
        iterations: config.max_iterations,
    })
}
