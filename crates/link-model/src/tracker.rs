//! Per-target link state kept by one ego

use kinematics::{to_ego_frame, RelativePosition, VehicleState};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::params::{DT, HARD_STALE_TAU, N_PLR, SOFT_STALE_K_LOST, TAU_BASE};
use crate::ReceptionWindow;

/// Link tracker for one (ego, target) pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetTracker {
    /// Target identifier
    pub id: String,
    /// Last successfully received snapshot
    last_state: Option<VehicleState>,
    /// Consecutive dropped broadcasts
    k_lost: u32,
    /// Recent reception outcomes
    window: ReceptionWindow,
    /// Heading of the snapshot before `last_state`
    prev_heading: Option<f64>,
}

impl TargetTracker {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            last_state: None,
            k_lost: 0,
            window: ReceptionWindow::new(N_PLR),
            prev_heading: None,
        }
    }

    /// Record this cycle's reception outcome.
    ///
    /// Runs every cycle whether or not a broadcast arrived. `k_lost` only
    /// resets on success; a fresh snapshot replaces the stored one.
    pub fn update(&mut self, received: bool, state: Option<VehicleState>) {
        self.window.push(received);

        if received {
            self.k_lost = 0;
            if let Some(state) = state {
                self.prev_heading = Some(
                    self.last_state
                        .as_ref()
                        .map_or(state.heading, |last| last.heading),
                );
                self.last_state = Some(state);
            }
        } else {
            self.k_lost = self.k_lost.saturating_add(1);
            trace!("Target {} missed broadcast (k_lost = {})", self.id, self.k_lost);
        }
    }

    pub fn last_state(&self) -> Option<&VehicleState> {
        self.last_state.as_ref()
    }

    pub fn k_lost(&self) -> u32 {
        self.k_lost
    }

    pub fn prev_heading(&self) -> Option<f64> {
        self.prev_heading
    }

    pub fn window(&self) -> &ReceptionWindow {
        &self.window
    }

    /// Effective prediction delay τ_eff = τ_base + k_lost·Δt (s)
    pub fn effective_delay(&self) -> f64 {
        TAU_BASE + self.k_lost as f64 * DT
    }

    /// Too old to extrapolate this cycle
    pub fn is_hard_stale(&self) -> bool {
        self.effective_delay() > HARD_STALE_TAU
    }

    /// Informational staleness flag
    pub fn is_stale(&self) -> bool {
        self.k_lost > SOFT_STALE_K_LOST
    }

    /// Moving packet-loss ratio over the reception window
    pub fn packet_loss_ratio(&self) -> f64 {
        self.window.loss_ratio()
    }

    /// Extrapolate the last received position by τ_eff and express it in
    /// the ego frame. `None` when nothing was received yet or the target is
    /// hard-stale.
    pub fn dead_reckon(&self, ego: &VehicleState) -> Option<RelativePosition> {
        let target = self.last_state.as_ref()?;
        let tau = self.effective_delay();
        if tau > HARD_STALE_TAU {
            return None;
        }

        // Constant heading, constant longitudinal acceleration
        let travel = target.speed * tau + 0.5 * target.accel * tau * tau;
        let (sin_h, cos_h) = target.heading.sin_cos();
        Some(to_ego_frame(
            ego,
            target.x + travel * cos_h,
            target.y + travel * sin_h,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn target(x: f64, y: f64) -> VehicleState {
        VehicleState::new("t1", x, y, 20.0, FRAC_PI_2)
    }

    #[test]
    fn test_loss_counter_resets_only_on_reception() {
        let mut tracker = TargetTracker::new("t1");
        tracker.update(true, Some(target(0.0, 0.0)));
        tracker.update(false, None);
        tracker.update(false, None);
        assert_eq!(tracker.k_lost(), 2);
        assert!((tracker.packet_loss_ratio() - 0.2).abs() < 1e-12);

        tracker.update(true, Some(target(0.0, 4.0)));
        assert_eq!(tracker.k_lost(), 0);
        // Window still remembers the two drops
        assert!((tracker.packet_loss_ratio() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_loss_counter_saturates() {
        let mut tracker = TargetTracker::new("t1");
        tracker.k_lost = u32::MAX - 1;
        tracker.update(false, None);
        tracker.update(false, None);
        assert_eq!(tracker.k_lost(), u32::MAX);
        assert!(tracker.is_hard_stale());
    }

    #[test]
    fn test_previous_heading_retained() {
        let mut tracker = TargetTracker::new("t1");
        tracker.update(true, Some(target(0.0, 0.0)));
        assert_eq!(tracker.prev_heading(), Some(FRAC_PI_2));

        let turned = VehicleState { heading: 1.0, ..target(0.0, 2.0) };
        tracker.update(true, Some(turned));
        assert_eq!(tracker.prev_heading(), Some(FRAC_PI_2));
        assert_eq!(tracker.last_state().map(|s| s.heading), Some(1.0));
    }

    #[test]
    fn test_effective_delay_grows_linearly() {
        let mut tracker = TargetTracker::new("t1");
        assert!((tracker.effective_delay() - TAU_BASE).abs() < 1e-12);
        for _ in 0..3 {
            tracker.update(false, None);
        }
        assert!((tracker.effective_delay() - (TAU_BASE + 0.3)).abs() < 1e-12);
    }

    #[test]
    fn test_hard_stale_cutoff() {
        let ego = VehicleState::new("ego", 0.0, 0.0, 20.0, FRAC_PI_2);
        let mut tracker = TargetTracker::new("t1");
        tracker.update(true, Some(target(3.5, -5.0)));

        for _ in 0..3 {
            tracker.update(false, None);
        }
        assert!(!tracker.is_hard_stale());
        assert!(!tracker.is_stale());
        let predicted = tracker.dead_reckon(&ego).unwrap();
        // 20 m/s north for 0.305 s
        assert!((predicted.y - (-5.0 + 20.0 * 0.305)).abs() < 1e-9);
        assert!((predicted.x - 3.5).abs() < 1e-9);

        for _ in 0..3 {
            tracker.update(false, None);
        }
        assert_eq!(tracker.k_lost(), 6);
        assert!(tracker.is_hard_stale());
        assert!(tracker.is_stale());
        assert!(tracker.dead_reckon(&ego).is_none());
    }

    #[test]
    fn test_dead_reckoning_with_acceleration() {
        let ego = VehicleState::new("ego", 0.0, 0.0, 0.0, 0.0);
        let mut tracker = TargetTracker::new("t1");
        // Heading +X, ego also faces +X so ego-frame y is global x
        let state = VehicleState::new("t1", 10.0, 0.0, 10.0, 0.0).with_accel(-4.0);
        tracker.update(true, Some(state));
        tracker.update(false, None);

        let tau = TAU_BASE + DT;
        let expected = 10.0 + 10.0 * tau - 2.0 * tau * tau;
        let predicted = tracker.dead_reckon(&ego).unwrap();
        assert!((predicted.y - expected).abs() < 1e-9);
    }

    #[test]
    fn test_no_state_no_prediction() {
        let ego = VehicleState::new("ego", 0.0, 0.0, 0.0, 0.0);
        let tracker = TargetTracker::new("ghost");
        assert!(tracker.dead_reckon(&ego).is_none());
    }
}
