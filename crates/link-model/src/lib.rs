//! V2V Link Model
//!
//! Tracks each target's broadcast reception history and compensates for
//! missed packets:
//! - Fixed-length reception window and packet-loss ratio
//! - Consecutive-loss counter and effective prediction delay
//! - Constant-acceleration dead reckoning into the ego frame

pub mod params;
mod tracker;
mod window;

pub use tracker::TargetTracker;
pub use window::ReceptionWindow;
