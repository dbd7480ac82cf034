//! Geometry and uncertainty constants

/// Minimum blind spot length (m)
pub const L_BASE: f64 = 4.5;

/// Ego speed below which the zone stays at `L_BASE` (m/s)
pub const V_MIN: f64 = 2.0;

/// Ego speed above which the zone stops growing (m/s)
pub const V_MAX: f64 = 40.0;

/// Additional zone length reached at `V_MAX` (m)
pub const LAMBDA_SCALE: f64 = 12.0;

/// Lane width (m)
pub const W_LANE: f64 = 3.5;

/// Yaw rate below which the ego is considered to drive straight (rad/s)
pub const EPS_YAW: f64 = 1e-3;

/// Minimum ego speed for curvature correction (m/s)
pub const EPS_V: f64 = 0.1;

/// Default GPS position uncertainty, 1σ (m)
pub const SIGMA_GPS: f64 = 1.5;

/// Fallback vehicle dimensions when a broadcast omits them (m)
pub const DEFAULT_LENGTH: f64 = 4.5;
pub const DEFAULT_WIDTH: f64 = 1.8;

/// Default vehicle mass when BSM Part II is absent (kg)
pub const M_DEFAULT: f64 = 1800.0;

/// Default dry-asphalt friction coefficient
pub const MU_DEFAULT: f64 = 0.7;

/// BSM broadcast frequency (Hz)
pub const F_BSM: u32 = 10;

/// Broadcast period, one engine cycle (s)
pub const DT: f64 = 1.0 / F_BSM as f64;
