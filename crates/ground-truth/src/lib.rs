//! Near-Miss Ground Truth
//!
//! Labels cycles as near-miss events from raw kinematics only, so that
//! detector evaluation never reads the detector's own risk estimates.

mod labeler;

pub use labeler::{LabelCoverage, LabelInput, NearMissLabeler, GAP_CRITICAL, TTC_CRITICAL};
