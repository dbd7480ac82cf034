//! Per-side alert hysteresis

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::params::{DELTA_H, N_H, THETA_1, THETA_2, THETA_3};
use crate::AlertLevel;

/// Alert configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlertConfig {
    /// CRI at which CAUTION starts (default: 0.30)
    pub caution_threshold: f64,
    /// CRI at which WARNING starts (default: 0.60)
    pub warning_threshold: f64,
    /// CRI at which CRITICAL starts (default: 0.80)
    pub critical_threshold: f64,
    /// Margin below the current level's threshold required to downgrade
    pub hysteresis_band: f64,
    /// Consecutive cycles required to commit an upgrade
    pub upgrade_cycles: u32,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            caution_threshold: THETA_1,
            warning_threshold: THETA_2,
            critical_threshold: THETA_3,
            hysteresis_band: DELTA_H,
            upgrade_cycles: N_H,
        }
    }
}

impl AlertConfig {
    /// Same defaults with a different CRITICAL threshold
    pub fn with_critical_threshold(critical_threshold: f64) -> Self {
        Self {
            critical_threshold,
            ..Default::default()
        }
    }

    /// Raw level for a CRI, without hysteresis
    pub fn raw_level(&self, cri: f64) -> AlertLevel {
        if cri >= self.critical_threshold {
            AlertLevel::Critical
        } else if cri >= self.warning_threshold {
            AlertLevel::Warning
        } else if cri >= self.caution_threshold {
            AlertLevel::Caution
        } else {
            AlertLevel::Safe
        }
    }

    /// Entry threshold of a level (SAFE has none)
    pub fn threshold(&self, level: AlertLevel) -> f64 {
        match level {
            AlertLevel::Safe => 0.0,
            AlertLevel::Caution => self.caution_threshold,
            AlertLevel::Warning => self.warning_threshold,
            AlertLevel::Critical => self.critical_threshold,
        }
    }

    /// Pure hysteresis transition `(state, raw_level, cri) -> state`
    pub fn transition(&self, state: &SideState, raw: AlertLevel, cri: f64) -> SideState {
        let current = state.current;

        if raw > current {
            let streak = if state.pending == Some(raw) {
                state.streak + 1
            } else {
                1
            };
            if streak >= self.upgrade_cycles {
                SideState::settled(raw)
            } else {
                SideState {
                    current,
                    pending: Some(raw),
                    streak,
                }
            }
        } else if raw < current {
            if cri < self.threshold(current) - self.hysteresis_band {
                SideState::settled(raw)
            } else {
                SideState::settled(current)
            }
        } else {
            SideState::settled(current)
        }
    }
}

/// Hysteresis memory for one side of the ego
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SideState {
    /// Confirmed alert level
    pub current: AlertLevel,
    /// Candidate upgrade being counted
    pub pending: Option<AlertLevel>,
    /// Consecutive cycles the candidate has been seen
    pub streak: u32,
}

impl SideState {
    /// State at `level` with no upgrade pending
    pub fn settled(level: AlertLevel) -> Self {
        Self {
            current: level,
            pending: None,
            streak: 0,
        }
    }

    /// Feed one cycle's CRI and return the stabilised level
    pub fn apply(&mut self, config: &AlertConfig, cri: f64) -> AlertLevel {
        let raw = config.raw_level(cri);
        let next = config.transition(self, raw, cri);

        if next.current != self.current {
            debug!(
                "Alert level {} -> {} (cri {:.3}, raw {})",
                self.current, next.current, cri, raw
            );
        } else if next.pending.is_some() && next.pending != self.pending && self.pending.is_some() {
            debug!("Upgrade candidate replaced: {:?} -> {:?}", self.pending, next.pending);
        }

        *self = next;
        self.current
    }

    /// Back to SAFE with nothing pending
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_raw_levels() {
        let config = AlertConfig::default();
        assert_eq!(config.raw_level(0.0), AlertLevel::Safe);
        assert_eq!(config.raw_level(0.29), AlertLevel::Safe);
        assert_eq!(config.raw_level(0.30), AlertLevel::Caution);
        assert_eq!(config.raw_level(0.60), AlertLevel::Warning);
        assert_eq!(config.raw_level(0.80), AlertLevel::Critical);
        assert_eq!(config.raw_level(1.0), AlertLevel::Critical);
    }

    #[test]
    fn test_upgrade_requires_streak() {
        let config = AlertConfig::default();
        let mut side = SideState::default();

        assert_eq!(side.apply(&config, 0.7), AlertLevel::Safe);
        assert_eq!(side.apply(&config, 0.7), AlertLevel::Safe);
        assert_eq!(side.streak, 2);
        assert_eq!(side.apply(&config, 0.7), AlertLevel::Warning);
        assert_eq!(side.pending, None);
        assert_eq!(side.streak, 0);
    }

    #[test]
    fn test_interrupted_spike_does_not_commit() {
        let config = AlertConfig::default();
        let mut side = SideState::default();

        side.apply(&config, 0.9);
        side.apply(&config, 0.9);
        assert_eq!(side.apply(&config, 0.1), AlertLevel::Safe);
        assert_eq!(side.pending, None);
        side.apply(&config, 0.9);
        assert_eq!(side.apply(&config, 0.9), AlertLevel::Safe);
    }

    #[test]
    fn test_changing_candidate_restarts_streak() {
        let config = AlertConfig::default();
        let state = SideState {
            current: AlertLevel::Safe,
            pending: Some(AlertLevel::Warning),
            streak: 2,
        };
        let next = config.transition(&state, AlertLevel::Critical, 0.85);
        assert_eq!(next.current, AlertLevel::Safe);
        assert_eq!(next.pending, Some(AlertLevel::Critical));
        assert_eq!(next.streak, 1);
    }

    #[test]
    fn test_downgrade_respects_band() {
        let config = AlertConfig::default();
        let warning = SideState::settled(AlertLevel::Warning);

        // Raw CAUTION but still within 0.60 - 0.05
        let held = config.transition(&warning, AlertLevel::Caution, 0.57);
        assert_eq!(held.current, AlertLevel::Warning);

        let dropped = config.transition(&warning, AlertLevel::Caution, 0.54);
        assert_eq!(dropped.current, AlertLevel::Caution);

        // Downgrades jump straight to the raw level
        let cleared = config.transition(&warning, AlertLevel::Safe, 0.05);
        assert_eq!(cleared.current, AlertLevel::Safe);
    }

    #[test]
    fn test_downgrade_clears_pending() {
        let config = AlertConfig::default();
        let state = SideState {
            current: AlertLevel::Warning,
            pending: Some(AlertLevel::Critical),
            streak: 2,
        };
        let next = config.transition(&state, AlertLevel::Caution, 0.58);
        assert_eq!(next, SideState::settled(AlertLevel::Warning));
    }

    #[test]
    fn test_same_level_clears_pending() {
        let config = AlertConfig::default();
        let state = SideState {
            current: AlertLevel::Caution,
            pending: Some(AlertLevel::Warning),
            streak: 1,
        };
        let next = config.transition(&state, AlertLevel::Caution, 0.4);
        assert_eq!(next, SideState::settled(AlertLevel::Caution));
    }

    #[test]
    fn test_custom_critical_threshold() {
        let config = AlertConfig::with_critical_threshold(0.7);
        assert_eq!(config.raw_level(0.72), AlertLevel::Critical);
        assert_eq!(config.threshold(AlertLevel::Critical), 0.7);
    }

    proptest! {
        #[test]
        fn prop_short_bursts_never_upgrade(
            readings in proptest::collection::vec((0.0f64..1.0, 0usize..3), 1..40),
        ) {
            // Bursts of at most two hot cycles, each followed by a quiet one
            let config = AlertConfig::default();
            let mut side = SideState::default();
            for (hot, burst) in readings {
                for _ in 0..burst {
                    side.apply(&config, hot.max(config.caution_threshold));
                }
                prop_assert_eq!(side.apply(&config, 0.0), AlertLevel::Safe);
            }
            prop_assert_eq!(side.current, AlertLevel::Safe);
        }
    }
}
