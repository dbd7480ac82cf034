//! Per-target risk evaluation

use serde::{Deserialize, Serialize};

use kinematics::{
    bumper_gap, curvature_corrected_x, in_blind_spot_zone, PresenceModel, Side, VehicleState,
};
use link_model::TargetTracker;
use risk::{deceleration_risk, intent_risk, TtcRisk, TtcSettings};

use crate::compose::{compose_cri, plr_multiplier, weighted_risk};
use crate::EngineConfig;

/// Diagnostic record for one target in one cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetAssessment {
    pub target_id: String,
    /// `None` for hard-stale targets, which belong to neither side
    pub side: Option<Side>,
    /// Collision Risk Index in [0, 1]
    pub cri: f64,
    /// Blind-spot occupancy probability
    pub presence: f64,
    pub r_decel: f64,
    pub r_ttc: f64,
    pub r_ttc_lon: f64,
    pub r_ttc_lat: f64,
    pub r_intent: f64,
    pub r_weighted: f64,
    pub plr: f64,
    pub plr_multiplier: f64,
    /// Effective prediction delay (s)
    pub tau_eff: f64,
    pub k_lost: u32,
    /// Informational staleness flag
    pub stale: bool,
    /// Skipped this cycle: too old to extrapolate
    pub hard_stale: bool,
    /// Boolean zone membership
    pub in_zone: bool,
    /// Curvature-corrected lateral offset (m)
    pub x_rel: f64,
    pub y_rel: f64,
    /// Bumper-to-bumper gap (m)
    pub d_gap: f64,
    /// Range from the ego to the last received position (m)
    pub distance: f64,
}

impl TargetAssessment {
    /// Score a target from its tracker. The tracker must hold a received state.
    pub(crate) fn evaluate(
        ego: &VehicleState,
        target: &VehicleState,
        tracker: &TargetTracker,
        config: &EngineConfig,
        presence_model: &PresenceModel,
        ttc_settings: &TtcSettings,
        distance: f64,
    ) -> Self {
        let tau_eff = tracker.effective_delay();
        let plr = tracker.packet_loss_ratio();

        let Some(rel) = tracker.dead_reckon(ego) else {
            return Self::hard_stale(tracker, tau_eff, plr, distance);
        };

        let x_corrected = curvature_corrected_x(ego, rel);
        let y_rel = rel.y;
        let side = Side::classify(x_corrected);

        let presence = presence_model.probability(ego, x_corrected, y_rel);
        let in_zone = in_blind_spot_zone(ego, x_corrected, y_rel);

        let r_decel = deceleration_risk(ego, target, y_rel);
        let ttc = TtcRisk::evaluate(ego, target, y_rel, ttc_settings);
        let r_intent = intent_risk(ego, side);

        let r_weighted = weighted_risk(config, r_decel, ttc.combined, r_intent);
        let plr_mult = plr_multiplier(plr);
        let cri = compose_cri(presence, r_weighted, plr_mult);

        Self {
            target_id: tracker.id.clone(),
            side: Some(side),
            cri,
            presence,
            r_decel,
            r_ttc: ttc.combined,
            r_ttc_lon: ttc.longitudinal,
            r_ttc_lat: ttc.lateral,
            r_intent,
            r_weighted,
            plr,
            plr_multiplier: plr_mult,
            tau_eff,
            k_lost: tracker.k_lost(),
            stale: tracker.is_stale(),
            hard_stale: false,
            in_zone,
            x_rel: x_corrected,
            y_rel,
            d_gap: bumper_gap(ego, target, y_rel),
            distance,
        }
    }

    /// All-zero placeholder for a target too old to extrapolate
    fn hard_stale(tracker: &TargetTracker, tau_eff: f64, plr: f64, distance: f64) -> Self {
        Self {
            target_id: tracker.id.clone(),
            side: None,
            cri: 0.0,
            presence: 0.0,
            r_decel: 0.0,
            r_ttc: 0.0,
            r_ttc_lon: 0.0,
            r_ttc_lat: 0.0,
            r_intent: 0.0,
            r_weighted: 0.0,
            plr,
            plr_multiplier: 1.0,
            tau_eff,
            k_lost: tracker.k_lost(),
            stale: true,
            hard_stale: true,
            in_zone: false,
            x_rel: 0.0,
            y_rel: 0.0,
            d_gap: 0.0,
            distance,
        }
    }

    pub fn side_label(&self) -> &'static str {
        self.side.map_or("UNKNOWN", |side| side.as_str())
    }
}
