//! Alert thresholds

/// CAUTION threshold θ1
pub const THETA_1: f64 = 0.30;

/// WARNING threshold θ2
pub const THETA_2: f64 = 0.60;

/// CRITICAL threshold θ3
pub const THETA_3: f64 = 0.80;

/// Hysteresis band below a level's threshold before downgrading
pub const DELTA_H: f64 = 0.05;

/// Consecutive cycles a more severe level must persist before upgrading
pub const N_H: u32 = 3;
