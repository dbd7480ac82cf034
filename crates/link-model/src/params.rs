//! Communication constants

pub use kinematics::params::{DT, F_BSM};

/// Base radio latency (s); DSRC figure, C-V2X is closer to 0.015
pub const TAU_BASE: f64 = 0.005;

/// Packet-loss-ratio sliding window length (packets)
pub const N_PLR: usize = 10;

/// Effective delay beyond which a target is not extrapolated at all (s)
pub const HARD_STALE_TAU: f64 = 0.5;

/// Consecutive losses above which a target is flagged stale
pub const SOFT_STALE_K_LOST: u32 = 4;

/// Consecutive losses after which a tracker is purged by default
pub const CLEANUP_K_LOST: u32 = 50;
