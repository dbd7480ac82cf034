//! Deceleration risk: can the target stop within the gap it has?

use kinematics::params::{MU_DEFAULT, M_DEFAULT};
use kinematics::{bumper_gap, VehicleState};
use tracing::trace;

use crate::params::{G, K_BRAKE, T_REACT};
use crate::AeroProfile;

/// Maximum achievable deceleration a_max = μ·g + F_drag/m (m/s²).
///
/// Missing (non-positive) friction or mass fall back to defaults.
pub fn max_deceleration(target: &VehicleState) -> f64 {
    let mu = if target.mu > 0.0 { target.mu } else { MU_DEFAULT };
    let mass = if target.mass > 0.0 { target.mass } else { M_DEFAULT };
    let drag = AeroProfile::for_class(target.class).drag_force(target.speed);
    mu * G + drag / mass
}

/// Required stopping distance v·T_react + v²/(2·a_max) (m); infinite when
/// the vehicle cannot brake
pub fn stopping_distance(speed: f64, a_max: f64) -> f64 {
    if a_max > 0.0 {
        speed * T_REACT + speed * speed / (2.0 * a_max)
    } else {
        f64::INFINITY
    }
}

/// Deceleration risk in [0, 1]
pub fn deceleration_risk(ego: &VehicleState, target: &VehicleState, y_rel: f64) -> f64 {
    let d_gap = bumper_gap(ego, target, y_rel);
    if d_gap <= 0.0 {
        return 1.0;
    }

    let a_max = max_deceleration(target);
    let d_stop = stopping_distance(target.speed, a_max);
    if !d_stop.is_finite() {
        trace!("Target {} cannot brake (a_max {:.3})", target.id, a_max);
        return 1.0;
    }
    if d_stop <= 0.0 {
        // Target at rest needs no room to stop
        return 0.0;
    }

    let ratio = (d_gap - d_stop) / d_stop;
    (-K_BRAKE * ratio).exp().clamp(0.0, 1.0)
}
