//! Composition and orchestration constants

/// V2V communication range (m)
pub const R_COMM: f64 = 300.0;

/// Default R_decel weight α
pub const ALPHA: f64 = 0.15;

/// Default R_ttc weight β
pub const BETA: f64 = 0.80;

/// Default R_intent weight γ
pub const GAMMA: f64 = 0.05;

/// Packet-loss penalty coefficient ε
pub const EPSILON: f64 = 0.30;

pub use link_model::params::CLEANUP_K_LOST;
