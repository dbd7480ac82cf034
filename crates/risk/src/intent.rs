//! Ego lane-change intent toward a threat side

use kinematics::params::DT;
use kinematics::{Side, VehicleState};

use crate::params::{V_LAT_MAX, W_LAT, W_SIG};

/// Intent risk toward `side`: ego blinker plus lateral drift.
///
/// Target blinkers are ignored.
pub fn intent_risk(ego: &VehicleState, side: Side) -> f64 {
    let signalling = match side {
        Side::Right => ego.signals.right(),
        Side::Left => ego.signals.left(),
    };
    let i_turn = if signalling { 1.0 } else { 0.0 };

    // Yaw rate over one cycle stands in for measured lateral speed; positive
    // yaw turns left (counter-clockwise)
    let v_lat = ego.speed * (ego.yaw_rate * DT).sin();
    let toward = match side {
        Side::Left => v_lat.max(0.0),
        Side::Right => (-v_lat).max(0.0),
    };
    let lat_ratio = (toward / V_LAT_MAX).min(1.0);

    W_SIG * i_turn + W_LAT * lat_ratio
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinematics::TurnSignals;
    use std::f64::consts::FRAC_PI_2;

    fn ego() -> VehicleState {
        VehicleState::new("ego", 100.0, 100.0, 25.0, FRAC_PI_2)
    }

    #[test]
    fn test_no_intent_when_cruising() {
        assert_eq!(intent_risk(&ego(), Side::Left), 0.0);
        assert_eq!(intent_risk(&ego(), Side::Right), 0.0);
    }

    #[test]
    fn test_blinker_only_counts_on_its_side() {
        let signalling = ego().with_signals(TurnSignals::RIGHT);
        assert!((intent_risk(&signalling, Side::Right) - W_SIG).abs() < 1e-12);
        assert_eq!(intent_risk(&signalling, Side::Left), 0.0);
    }

    #[test]
    fn test_turning_right_with_blinker() {
        let turning = ego().with_yaw_rate(-0.1).with_signals(TurnSignals::RIGHT);
        let right = intent_risk(&turning, Side::Right);
        assert!(right > W_SIG);
        assert_eq!(intent_risk(&turning, Side::Left), 0.0);

        let drift = 25.0 * (0.01f64).sin();
        assert!((right - (W_SIG + W_LAT * drift)).abs() < 1e-9);
    }

    #[test]
    fn test_drift_ratio_saturates() {
        let swerving = ego().with_yaw_rate(2.0);
        assert!((intent_risk(&swerving, Side::Left) - W_LAT).abs() < 1e-12);
    }
}
