//! CRI composition

use crate::params::EPSILON;
use crate::EngineConfig;

/// α·R_decel + β·R_ttc + γ·R_intent
pub fn weighted_risk(config: &EngineConfig, r_decel: f64, r_ttc: f64, r_intent: f64) -> f64 {
    config.alpha * r_decel + config.beta * r_ttc + config.gamma * r_intent
}

/// Packet-loss penalty 1 + ε·PLR
pub fn plr_multiplier(plr: f64) -> f64 {
    1.0 + EPSILON * plr
}

/// CRI = clamp(P · R_weighted · plr_mult, 0, 1); NaN collapses to 0
pub fn compose_cri(presence: f64, r_weighted: f64, plr_mult: f64) -> f64 {
    let cri = presence * r_weighted * plr_mult;
    if cri.is_nan() {
        0.0
    } else {
        cri.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weighted_risk_is_linear() {
        let config = EngineConfig::default();
        let w = weighted_risk(&config, 1.0, 1.0, 1.0);
        assert!((w - 1.0).abs() < 1e-12);
        let w = weighted_risk(&config, 0.0, 0.5, 0.0);
        assert!((w - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_plr_penalty() {
        assert_eq!(plr_multiplier(0.0), 1.0);
        assert!((plr_multiplier(1.0) - 1.3).abs() < 1e-12);
    }

    #[test]
    fn test_cri_clamped() {
        assert_eq!(compose_cri(1.0, 1.0, 1.3), 1.0);
        assert_eq!(compose_cri(0.0, 1.0, 1.3), 0.0);
        assert_eq!(compose_cri(1.0, -2.0, 1.0), 0.0);
        assert_eq!(compose_cri(f64::NAN, 1.0, 1.0), 0.0);
        assert!((compose_cri(0.5, 0.8, 1.0) - 0.4).abs() < 1e-12);
    }
}
