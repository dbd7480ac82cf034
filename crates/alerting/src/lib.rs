//! Alerting System
//!
//! Maps a collision risk index to an alert level and stabilises it with a
//! per-side hysteresis state machine: upgrades need a sustained streak,
//! downgrades need the index to drop below the current threshold minus a band.

mod hysteresis;
mod level;
pub mod params;

pub use hysteresis::{AlertConfig, SideState};
pub use level::AlertLevel;
