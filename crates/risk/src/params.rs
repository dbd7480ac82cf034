//! Physics and scoring constants

/// Human reaction time, P85 (s)
pub const T_REACT: f64 = 1.2;

/// Braking-risk decay constant, ln(20)/2
pub const K_BRAKE: f64 = 1.50;

/// Gravitational acceleration (m/s²)
pub const G: f64 = 9.81;

/// Air density at sea level (kg/m³)
pub const RHO_AIR: f64 = 1.225;

/// Relative acceleration below which TTC is solved linearly (m/s²)
pub const EPS_A: f64 = 1e-5;

/// TTC at or below which risk saturates (s)
pub const TTC_CRIT: f64 = 4.0;

/// TTC horizon beyond which risk is zero (s)
pub const TTC_MAX: f64 = 8.0;

/// Turn-signal weight in intent risk
pub const W_SIG: f64 = 0.4;

/// Lateral-drift weight in intent risk
pub const W_LAT: f64 = 0.6;

/// Lateral speed of a full lane change (m/s)
pub const V_LAT_MAX: f64 = 1.0;
