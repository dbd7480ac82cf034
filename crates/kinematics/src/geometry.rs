//! Ego-centric geometry and blind-spot zone sizing

use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

use crate::params::{EPS_V, EPS_YAW, LAMBDA_SCALE, L_BASE, V_MAX, V_MIN, W_LANE};
use crate::VehicleState;

/// Side of the ego vehicle a target occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Classify by the sign of the curvature-corrected lateral offset.
    /// Zero offset counts as RIGHT.
    pub fn classify(x_corrected: f64) -> Self {
        if x_corrected >= 0.0 {
            Side::Right
        } else {
            Side::Left
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "LEFT",
            Side::Right => "RIGHT",
        }
    }
}

/// Position in the ego frame: +x to the ego's right, +y straight ahead (m)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RelativePosition {
    pub x: f64,
    pub y: f64,
}

/// Rotate a global point into the ego frame
pub fn to_ego_frame(ego: &VehicleState, x: f64, y: f64) -> RelativePosition {
    let dx = x - ego.x;
    let dy = y - ego.y;
    let (sin_t, cos_t) = ego.heading.sin_cos();
    RelativePosition {
        x: sin_t * dx - cos_t * dy,
        y: cos_t * dx + sin_t * dy,
    }
}

/// Speed-dependent blind spot length (m)
pub fn blind_spot_length(ego_speed: f64) -> f64 {
    let t = ((ego_speed - V_MIN) / (V_MAX - V_MIN)).clamp(0.0, 1.0);
    L_BASE + LAMBDA_SCALE * t
}

/// Lateral offset corrected for the ego's turning arc.
///
/// Passes `rel.x` through unchanged when driving straight or nearly stopped.
pub fn curvature_corrected_x(ego: &VehicleState, rel: RelativePosition) -> f64 {
    if ego.yaw_rate.abs() > EPS_YAW && ego.speed > EPS_V {
        rel.x - (rel.y * rel.y * ego.yaw_rate) / (2.0 * ego.speed)
    } else {
        rel.x
    }
}

/// Hard boolean zone membership; diagnostic only, risk uses [`crate::PresenceModel`]
pub fn in_blind_spot_zone(ego: &VehicleState, x_corrected: f64, y_rel: f64) -> bool {
    let half_w = ego.width / 2.0;
    let lat = x_corrected.abs();
    let lat_ok = lat >= half_w && lat <= half_w + W_LANE;
    let lon_ok = y_rel >= -blind_spot_length(ego.speed) && y_rel <= ego.length / 2.0;
    lat_ok && lon_ok
}

/// Longitudinal bumper-to-bumper gap; non-positive means the bodies overlap
pub fn bumper_gap(ego: &VehicleState, target: &VehicleState, y_rel: f64) -> f64 {
    y_rel.abs() - (ego.length + target.length) / 2.0
}

/// Convert a compass angle (degrees clockwise from north) to radians CCW from +X
pub fn heading_from_compass_deg(compass_deg: f64) -> f64 {
    PI / 2.0 - compass_deg.to_radians()
}

/// Yaw rate from two consecutive headings, wrapping Δθ into [-π, π)
pub fn yaw_rate_from_headings(previous: f64, current: f64, dt: f64) -> f64 {
    if dt <= 0.0 {
        return 0.0;
    }
    let delta = (current - previous + PI).rem_euclid(TAU) - PI;
    delta / dt
}
