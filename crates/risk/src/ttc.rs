//! Time-to-collision risk (longitudinal second-order + lateral)

use kinematics::params::{EPS_V, W_LANE};
use kinematics::{bumper_gap, VehicleState};
use serde::{Deserialize, Serialize};

use crate::params::{EPS_A, TTC_CRIT, TTC_MAX};

/// Tunable part of the TTC model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TtcSettings {
    /// TTC at or below which risk saturates (s)
    pub ttc_crit: f64,
    /// Whether lateral closure contributes
    pub use_lateral: bool,
}

impl Default for TtcSettings {
    fn default() -> Self {
        Self {
            ttc_crit: TTC_CRIT,
            use_lateral: true,
        }
    }
}

/// TTC risk with its two contributing components
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TtcRisk {
    /// max(longitudinal, lateral)
    pub combined: f64,
    pub longitudinal: f64,
    pub lateral: f64,
}

impl TtcRisk {
    /// Score both components for a target at longitudinal offset `y_rel`
    pub fn evaluate(
        ego: &VehicleState,
        target: &VehicleState,
        y_rel: f64,
        settings: &TtcSettings,
    ) -> Self {
        let longitudinal = longitudinal_ttc(ego, target, y_rel)
            .map_or(0.0, |ttc| ttc_to_risk(ttc, settings.ttc_crit));
        let lateral = lateral_ttc_risk(ego, target, settings);
        Self {
            combined: longitudinal.max(lateral),
            longitudinal,
            lateral,
        }
    }
}

/// Longitudinal time to collision (s).
///
/// `None` means the vehicles never close: separating, diverging
/// trajectories, or a meeting that lies in the past. `Some(0.0)` means the
/// bodies already overlap.
pub fn longitudinal_ttc(ego: &VehicleState, target: &VehicleState, y_rel: f64) -> Option<f64> {
    let d_gap = bumper_gap(ego, target, y_rel);
    if d_gap <= 0.0 {
        return Some(0.0);
    }

    // Project the target onto the ego's heading axis
    let cos_diff = (target.heading - ego.heading).cos();
    let v_tgt = target.speed * cos_diff;
    let a_tgt = target.accel * cos_diff;

    // Positive = closing, whichever side of the ego the target is on
    let (v_rel, a_rel) = if y_rel >= 0.0 {
        (ego.speed - v_tgt, ego.accel - a_tgt)
    } else {
        (v_tgt - ego.speed, a_tgt - ego.accel)
    };

    if v_rel <= 0.0 && a_rel >= 0.0 {
        return None;
    }

    if a_rel.abs() < EPS_A {
        return (v_rel > 0.0).then(|| d_gap / v_rel);
    }

    // d_gap = v_rel·t + ½·a_rel·t²
    let discriminant = v_rel * v_rel + 2.0 * a_rel * d_gap;
    if discriminant < 0.0 {
        return None;
    }
    let sqrt_disc = discriminant.sqrt();
    [(-v_rel + sqrt_disc) / a_rel, (-v_rel - sqrt_disc) / a_rel]
        .into_iter()
        .filter(|t| *t > 0.0)
        .min_by(|a, b| a.total_cmp(b))
}

/// Map a TTC to risk: saturated up to `ttc_crit`, inverse-square to
/// `TTC_MAX`, zero beyond
pub fn ttc_to_risk(ttc: f64, ttc_crit: f64) -> f64 {
    if ttc > TTC_MAX {
        0.0
    } else if ttc <= ttc_crit {
        1.0
    } else {
        (ttc_crit / ttc).powi(2).clamp(0.0, 1.0)
    }
}

/// Lateral closure risk from the target's sideways velocity relative to the
/// ego heading
pub fn lateral_ttc_risk(ego: &VehicleState, target: &VehicleState, settings: &TtcSettings) -> f64 {
    let v_lat_rel = target.speed * (target.heading - ego.heading).sin();
    let w_gap = W_LANE - ego.width / 2.0 - target.width / 2.0;

    if w_gap <= 0.0 {
        return 1.0;
    }
    if !settings.use_lateral || v_lat_rel.abs() < EPS_V {
        return 0.0;
    }

    let ttc_lat = (w_gap / v_lat_rel.abs()).clamp(0.0, TTC_MAX);
    if ttc_lat <= settings.ttc_crit && settings.ttc_crit > 0.0 {
        1.0 - ttc_lat / settings.ttc_crit
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f64::consts::FRAC_PI_2;

    fn ego(speed: f64) -> VehicleState {
        VehicleState::new("ego", 0.0, 0.0, speed, FRAC_PI_2)
    }

    fn behind(speed: f64) -> VehicleState {
        VehicleState::new("t", 3.5, -10.0, speed, FRAC_PI_2)
    }

    #[test]
    fn test_overlap_is_zero_ttc() {
        assert_eq!(longitudinal_ttc(&ego(20.0), &behind(20.0), -2.0), Some(0.0));
    }

    #[test]
    fn test_separating_never_collides() {
        // Target behind and slower, neither accelerating
        assert_eq!(longitudinal_ttc(&ego(25.0), &behind(20.0), -10.0), None);
        let risk = TtcRisk::evaluate(&ego(25.0), &behind(20.0), -10.0, &TtcSettings::default());
        assert_eq!(risk.longitudinal, 0.0);
    }

    #[test]
    fn test_linear_closing() {
        // Target behind, 5 m/s faster, gap 5.5 m
        let ttc = longitudinal_ttc(&ego(20.0), &behind(25.0), -10.0).unwrap();
        assert!((ttc - 5.5 / 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_target_ahead_sign_convention() {
        // Ego faster than a target ahead: closing
        let ahead = VehicleState::new("t", 3.5, 20.0, 15.0, FRAC_PI_2);
        let ttc = longitudinal_ttc(&ego(20.0), &ahead, 20.0).unwrap();
        assert!((ttc - 15.5 / 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_quadratic_root() {
        // Closing at 2 m/s and 2 m/s²: 5.5 = 2t + t²
        let target = behind(22.0).with_accel(2.0);
        let ttc = longitudinal_ttc(&ego(20.0), &target, -10.0).unwrap();
        assert!((ttc - (6.5f64.sqrt() - 1.0)).abs() < 1e-9);
    }

    #[test]
    fn test_decelerating_closer_never_arrives() {
        // Closing at 2 m/s but braking hard relative: 2² + 2·(-4)·5.5 < 0
        let target = behind(22.0).with_accel(-4.0);
        assert_eq!(longitudinal_ttc(&ego(20.0), &target, -10.0), None);
    }

    #[test]
    fn test_risk_mapping() {
        assert_eq!(ttc_to_risk(0.0, 4.0), 1.0);
        assert_eq!(ttc_to_risk(4.0, 4.0), 1.0);
        assert!((ttc_to_risk(8.0, 4.0) - 0.25).abs() < 1e-12);
        assert_eq!(ttc_to_risk(8.01, 4.0), 0.0);
    }

    #[test]
    fn test_lateral_component() {
        let settings = TtcSettings::default();

        // Parallel travel has no lateral closure
        assert_eq!(lateral_ttc_risk(&ego(20.0), &behind(20.0), &settings), 0.0);

        // Target angled 0.1 rad toward the ego at 20 m/s: ~2 m/s sideways
        let angled = VehicleState { heading: FRAC_PI_2 + 0.1, ..behind(20.0) };
        let r = lateral_ttc_risk(&ego(20.0), &angled, &settings);
        let v_lat = 20.0 * 0.1f64.sin();
        let expected = 1.0 - (1.7 / v_lat) / 4.0;
        assert!((r - expected).abs() < 1e-9);

        let disabled = TtcSettings { use_lateral: false, ..settings };
        assert_eq!(lateral_ttc_risk(&ego(20.0), &angled, &disabled), 0.0);
    }

    #[test]
    fn test_no_lateral_room_is_max_risk() {
        let wide = behind(20.0).with_dimensions(12.0, 5.0);
        let ego = ego(20.0).with_dimensions(4.5, 2.5);
        assert_eq!(lateral_ttc_risk(&ego, &wide, &TtcSettings::default()), 1.0);
    }

    #[test]
    fn test_combined_takes_max() {
        let angled = VehicleState { heading: FRAC_PI_2 + 0.1, ..behind(20.0) };
        let risk = TtcRisk::evaluate(&ego(25.0), &angled, -10.0, &TtcSettings::default());
        assert_eq!(risk.combined, risk.longitudinal.max(risk.lateral));
        assert!(risk.lateral > 0.0);
    }

    proptest! {
        #[test]
        fn prop_ttc_risk_bounded(
            ego_speed in 0.0f64..45.0,
            ego_accel in -8.0f64..4.0,
            tgt_speed in 0.0f64..45.0,
            tgt_accel in -8.0f64..4.0,
            heading_off in -0.6f64..0.6,
            y_rel in -60.0f64..60.0,
        ) {
            let ego = ego(ego_speed).with_accel(ego_accel);
            let target = VehicleState {
                heading: FRAC_PI_2 + heading_off,
                ..behind(tgt_speed).with_accel(tgt_accel)
            };
            let risk = TtcRisk::evaluate(&ego, &target, y_rel, &TtcSettings::default());
            prop_assert!((0.0..=1.0).contains(&risk.combined));
            if let Some(ttc) = longitudinal_ttc(&ego, &target, y_rel) {
                prop_assert!(ttc >= 0.0);
            }
        }
    }
}
