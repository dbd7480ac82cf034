//! Per-ego step orchestrator

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, info};

use alerting::{AlertConfig, AlertLevel, SideState};
use kinematics::{PresenceModel, Side, VehicleState};
use link_model::TargetTracker;
use risk::TtcSettings;

use crate::params::R_COMM;
use crate::{EngineConfig, TargetAssessment};

/// Output of one broadcast cycle for one ego
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleResult {
    pub ego_id: String,
    /// Ego snapshot timestamp
    pub step: u64,
    pub cri_left: f64,
    pub cri_right: f64,
    pub alert_left: AlertLevel,
    pub alert_right: AlertLevel,
    /// Evaluated (in-range, not hard-stale) targets
    pub num_targets: usize,
    /// Per-target records, ordered by target id
    pub targets: Vec<TargetAssessment>,
}

impl CycleResult {
    /// `n` highest-CRI records, most dangerous first
    pub fn top_threats(&self, n: usize) -> Vec<&TargetAssessment> {
        let mut ranked: Vec<&TargetAssessment> =
            self.targets.iter().filter(|t| !t.hard_stale).collect();
        ranked.sort_by(|a, b| b.cri.total_cmp(&a.cri));
        ranked.truncate(n);
        ranked
    }
}

/// Blind-spot engine owned by one ego vehicle
pub struct BsdEngine {
    config: EngineConfig,
    alert_config: AlertConfig,
    presence_model: PresenceModel,
    ttc_settings: TtcSettings,
    trackers: BTreeMap<String, TargetTracker>,
    left: SideState,
    right: SideState,
    last_result: Option<CycleResult>,
}

impl BsdEngine {
    pub fn new(config: EngineConfig) -> Self {
        info!(
            "Initializing BSD engine (alpha={}, beta={}, gamma={}, lateral_ttc={}, sigma={}, ttc_crit={}, theta_3={})",
            config.alpha,
            config.beta,
            config.gamma,
            config.use_lateral_ttc,
            config.sigma_gps,
            config.ttc_crit,
            config.theta_3
        );

        Self {
            alert_config: config.alert_config(),
            presence_model: config.presence_model(),
            ttc_settings: config.ttc_settings(),
            config,
            trackers: BTreeMap::new(),
            left: SideState::default(),
            right: SideState::default(),
            last_result: None,
        }
    }

    /// Run one broadcast cycle.
    ///
    /// `targets` holds the snapshots received this cycle; `received` names
    /// the targets whose broadcast arrived. Every known tracker is updated
    /// whether or not it was heard from.
    pub fn process(
        &mut self,
        ego: &VehicleState,
        targets: &HashMap<String, VehicleState>,
        received: &HashSet<String>,
    ) -> CycleResult {
        for id in targets.keys() {
            if id != &ego.id && !self.trackers.contains_key(id) {
                debug!("Tracking new target {} for ego {}", id, ego.id);
                self.trackers.insert(id.clone(), TargetTracker::new(id.clone()));
            }
        }

        for (id, tracker) in self.trackers.iter_mut() {
            let heard = received.contains(id);
            tracker.update(heard, targets.get(id).cloned());
        }

        let mut records = Vec::new();
        let mut cri_left = 0.0f64;
        let mut cri_right = 0.0f64;
        let mut num_targets = 0;

        for tracker in self.trackers.values() {
            let Some(target) = tracker.last_state() else {
                continue;
            };

            let distance = ego.distance_to(target);
            if distance > R_COMM {
                continue;
            }

            let record = TargetAssessment::evaluate(
                ego,
                target,
                tracker,
                &self.config,
                &self.presence_model,
                &self.ttc_settings,
                distance,
            );

            match record.side {
                Some(Side::Left) => cri_left = cri_left.max(record.cri),
                Some(Side::Right) => cri_right = cri_right.max(record.cri),
                None => debug!(
                    "Target {} hard-stale for ego {} (tau_eff {:.3}s)",
                    record.target_id, ego.id, record.tau_eff
                ),
            }
            if !record.hard_stale {
                num_targets += 1;
            }
            records.push(record);
        }

        let alert_left = self.left.apply(&self.alert_config, cri_left);
        let alert_right = self.right.apply(&self.alert_config, cri_right);

        let result = CycleResult {
            ego_id: ego.id.clone(),
            step: ego.timestamp,
            cri_left,
            cri_right,
            alert_left,
            alert_right,
            num_targets,
            targets: records,
        };

        self.last_result = Some(result.clone());
        result
    }

    /// Drop trackers whose consecutive losses exceed `max_stale_steps`.
    /// Returns the number removed.
    pub fn cleanup_stale_trackers(&mut self, max_stale_steps: u32) -> usize {
        let before = self.trackers.len();
        self.trackers.retain(|_, tracker| tracker.k_lost() <= max_stale_steps);
        let removed = before - self.trackers.len();
        if removed > 0 {
            info!("Removed {} stale trackers ({} remaining)", removed, self.trackers.len());
        }
        removed
    }

    /// Cleanup with the configured threshold
    pub fn cleanup(&mut self) -> usize {
        self.cleanup_stale_trackers(self.config.cleanup_after_steps)
    }

    /// Forget all targets and return both sides to SAFE
    pub fn reset(&mut self) {
        self.trackers.clear();
        self.left.reset();
        self.right.reset();
        self.last_result = None;
    }

    pub fn tracker(&self, target_id: &str) -> Option<&TargetTracker> {
        self.trackers.get(target_id)
    }

    pub fn tracker_count(&self) -> usize {
        self.trackers.len()
    }

    pub fn side_state(&self, side: Side) -> &SideState {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Result of the most recent cycle
    pub fn last_result(&self) -> Option<&CycleResult> {
        self.last_result.as_ref()
    }
}

impl Default for BsdEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
