//! Probabilistic blind-spot occupancy under GPS uncertainty

use serde::{Deserialize, Serialize};
use std::f64::consts::SQRT_2;

use crate::geometry::blind_spot_length;
use crate::params::{SIGMA_GPS, W_LANE};
use crate::VehicleState;

/// Standard normal cumulative distribution function Φ(z)
pub fn normal_cdf(z: f64) -> f64 {
    0.5 * erfc(-z / SQRT_2)
}

/// Complementary error function, Abramowitz & Stegun 7.1.26 (|ε| < 1.5e-7).
///
/// Evaluated on |x| and reflected so that erfc(-x) = 2 - erfc(x) holds exactly.
fn erfc(x: f64) -> f64 {
    if x < 0.0 {
        return 2.0 - erfc(-x);
    }
    let t = 1.0 / (1.0 + 0.3275911 * x);
    let poly = t
        * (0.254829592
            + t * (-0.284496736 + t * (1.421413741 + t * (-1.453152027 + t * 1.061405429))));
    poly * (-x * x).exp()
}

/// Occupancy model: isotropic Gaussian position error around the estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PresenceModel {
    /// GPS uncertainty, 1σ (m)
    pub sigma: f64,
}

impl Default for PresenceModel {
    fn default() -> Self {
        Self { sigma: SIGMA_GPS }
    }
}

impl PresenceModel {
    pub fn new(sigma: f64) -> Self {
        Self { sigma }
    }

    /// Probability mass of N(mean, σ²) inside `[lower, upper]`
    fn mass_between(&self, mean: f64, lower: f64, upper: f64) -> f64 {
        let sigma = self.sigma.max(f64::MIN_POSITIVE);
        normal_cdf((upper - mean) / sigma) - normal_cdf((lower - mean) / sigma)
    }

    /// Probability that a target estimated at `(x_hat, y_hat)` in the ego frame
    /// lies inside the blind-spot zone on the side given by the sign of `x_hat`.
    pub fn probability(&self, ego: &VehicleState, x_hat: f64, y_hat: f64) -> f64 {
        let half_w = ego.width / 2.0;

        // Inner/outer bounds flip sign on the left side
        let (inner, outer) = if x_hat >= 0.0 {
            (half_w, half_w + W_LANE)
        } else {
            (-(half_w + W_LANE), -half_w)
        };
        let mut p_lat = self.mass_between(x_hat, inner.min(outer), inner.max(outer));

        // Suppress near-zero lateral offsets (targets directly ahead or behind)
        if x_hat.abs() < half_w && half_w > 0.0 {
            p_lat *= (x_hat.abs() / half_w).powi(2);
        }

        let p_lon = self.mass_between(y_hat, -blind_spot_length(ego.speed), ego.length / 2.0);

        (p_lat.abs() * p_lon).clamp(0.0, 1.0)
    }
}
