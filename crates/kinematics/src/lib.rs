//! Vehicle Kinematics and Blind-Spot Geometry
//!
//! Shared building blocks for the V2V blind-spot pipeline:
//! - Vehicle state snapshots as broadcast each cycle
//! - Ego-centric coordinate transform and curvature correction
//! - Speed-dependent blind-spot zone sizing and side classification
//! - Probabilistic zone occupancy under GPS uncertainty

pub mod geometry;
pub mod params;
pub mod presence;
pub mod vehicle;

pub use geometry::{
    blind_spot_length, bumper_gap, curvature_corrected_x, heading_from_compass_deg,
    in_blind_spot_zone, to_ego_frame, yaw_rate_from_headings, RelativePosition, Side,
};
pub use presence::{normal_cdf, PresenceModel};
pub use vehicle::{TurnSignals, VehicleClass, VehicleState};
