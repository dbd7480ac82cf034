//! Blind-Spot Detection Engine
//!
//! One engine instance per ego vehicle. Each broadcast cycle it:
//! - Updates the per-target link trackers (reception, loss, delay)
//! - Dead-reckons every in-range target into the ego frame
//! - Scores presence, braking, TTC, and intent risk per target
//! - Composes a bounded Collision Risk Index and takes the per-side maximum
//! - Stabilises each side's alert level with hysteresis

mod assessment;
mod compose;
mod config;
mod engine;
pub mod params;

pub use assessment::TargetAssessment;
pub use compose::{compose_cri, plr_multiplier, weighted_risk};
pub use crate::config::{ConfigError, EngineConfig};
pub use engine::{BsdEngine, CycleResult};

pub use alerting::{AlertLevel, SideState};
pub use kinematics::{Side, TurnSignals, VehicleClass, VehicleState};
pub use link_model::TargetTracker;
