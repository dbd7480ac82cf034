//! Blind-Spot Risk Components
//!
//! Three independent scorers, each a pure function of ego/target kinematics
//! returning a value in [0, 1]:
//! - Deceleration risk (friction + aerodynamic braking vs. bumper gap)
//! - Time-to-collision risk (second-order longitudinal, plus lateral)
//! - Intent risk (ego turn signal and lateral drift only)

pub mod aero;
pub mod decel;
pub mod intent;
pub mod params;
pub mod ttc;

pub use aero::AeroProfile;
pub use decel::{deceleration_risk, max_deceleration, stopping_distance};
pub use intent::intent_risk;
pub use ttc::{lateral_ttc_risk, longitudinal_ttc, ttc_to_risk, TtcRisk, TtcSettings};
