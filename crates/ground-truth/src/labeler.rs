//! Gap / closing-speed near-miss proxy

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use kinematics::{bumper_gap, to_ego_frame, VehicleState};

/// Bumper gap below which a cycle is a near miss (m)
pub const GAP_CRITICAL: f64 = 2.0;

/// TTC proxy below which a cycle is a near miss (s)
pub const TTC_CRITICAL: f64 = 1.5;

/// TTC proxy reported when the pair is not closing (s)
const TTC_NOT_CLOSING: f64 = 999.0;

const MIN_CLOSING_SPEED: f64 = 0.001;

/// Raw per-cycle fields the label is computed from
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LabelInput {
    /// Collision reported by the traffic source
    pub collision: bool,
    /// Bumper gap to the nearest neighbour (m)
    pub gap: f64,
    /// Closing speed toward that neighbour, positive when approaching (m/s)
    pub closing_speed: f64,
    /// Neighbours present this cycle
    pub num_targets: usize,
}

impl LabelInput {
    /// Derive the fields from broadcast snapshots
    pub fn from_states(ego: &VehicleState, neighbours: &[VehicleState], collision: bool) -> Self {
        let nearest = neighbours
            .iter()
            .filter(|n| n.id != ego.id)
            .map(|n| {
                let y_rel = to_ego_frame(ego, n.x, n.y).y;
                let v_along = n.speed * (n.heading - ego.heading).cos();
                let closing = if y_rel >= 0.0 {
                    ego.speed - v_along
                } else {
                    v_along - ego.speed
                };
                (bumper_gap(ego, n, y_rel), closing)
            })
            .min_by(|a, b| a.0.total_cmp(&b.0));

        let num_targets = neighbours.iter().filter(|n| n.id != ego.id).count();
        match nearest {
            Some((gap, closing_speed)) => Self {
                collision,
                gap,
                closing_speed,
                num_targets,
            },
            None => Self {
                collision,
                gap: f64::INFINITY,
                closing_speed: 0.0,
                num_targets: 0,
            },
        }
    }

    /// gap / closing speed, or 999 s when not closing
    pub fn ttc_proxy(&self) -> f64 {
        if self.closing_speed > 0.0 {
            self.gap / self.closing_speed.max(MIN_CLOSING_SPEED)
        } else {
            TTC_NOT_CLOSING
        }
    }
}

/// Near-miss labeller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NearMissLabeler {
    pub gap_critical: f64,
    pub ttc_critical: f64,
}

impl Default for NearMissLabeler {
    fn default() -> Self {
        Self {
            gap_critical: GAP_CRITICAL,
            ttc_critical: TTC_CRITICAL,
        }
    }
}

impl NearMissLabeler {
    pub fn new(gap_critical: f64, ttc_critical: f64) -> Self {
        Self {
            gap_critical,
            ttc_critical,
        }
    }

    /// Reported collisions always count; otherwise a neighbour must be
    /// present and either too close or closing too fast.
    pub fn label(&self, input: &LabelInput) -> bool {
        if input.collision {
            return true;
        }
        input.num_targets > 0
            && (input.gap < self.gap_critical || input.ttc_proxy() < self.ttc_critical)
    }
}

/// Positive share of a labelled set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LabelCoverage {
    pub positives: usize,
    pub total: usize,
}

impl LabelCoverage {
    pub fn from_labels(labels: &[bool]) -> Self {
        Self {
            positives: labels.iter().filter(|l| **l).count(),
            total: labels.len(),
        }
    }

    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.positives as f64 / self.total as f64
        }
    }

    /// Log the coverage; a set with no positives cannot score a detector
    pub fn report(&self, tag: &str) {
        if self.positives == 0 {
            warn!(
                "[{}] No positive events in {} labelled cycles; run a longer trace before scoring",
                tag, self.total
            );
        } else {
            info!(
                "[{}] Ground truth: {}/{} positive ({:.2}%)",
                tag,
                self.positives,
                self.total,
                self.ratio() * 100.0
            );
        }
    }
}
