//! Engine configuration

use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

use alerting::AlertConfig;
use kinematics::params::SIGMA_GPS;
use kinematics::PresenceModel;
use risk::params::{TTC_CRIT, TTC_MAX};
use risk::TtcSettings;

use crate::params::{ALPHA, BETA, CLEANUP_K_LOST, GAMMA};

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("Invalid configuration: {field} = {value}")]
    Invalid { field: &'static str, value: f64 },
}

/// Runtime-overridable engine parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// R_decel weight α
    pub alpha: f64,

    /// R_ttc weight β
    pub beta: f64,

    /// R_intent weight γ
    pub gamma: f64,

    /// Include lateral closure in R_ttc
    pub use_lateral_ttc: bool,

    /// GPS uncertainty, 1σ (m)
    pub sigma_gps: f64,

    /// TTC at or below which risk saturates (s)
    pub ttc_crit: f64,

    /// CRITICAL alert threshold θ3
    pub theta_3: f64,

    /// Consecutive losses after which a tracker is purged
    pub cleanup_after_steps: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            alpha: ALPHA,
            beta: BETA,
            gamma: GAMMA,
            use_lateral_ttc: true,
            sigma_gps: SIGMA_GPS,
            ttc_crit: TTC_CRIT,
            theta_3: alerting::params::THETA_3,
            cleanup_after_steps: CLEANUP_K_LOST,
        }
    }
}

impl EngineConfig {
    /// Earlier CRITICAL, longer TTC horizon, wider GPS uncertainty
    pub fn conservative() -> Self {
        Self {
            sigma_gps: 2.0,
            ttc_crit: 5.0,
            theta_3: 0.70,
            ..Default::default()
        }
    }

    /// Lateral TTC disabled
    pub fn longitudinal_only() -> Self {
        Self {
            use_lateral_ttc: false,
            ..Default::default()
        }
    }

    /// Layer an optional config file and `BSD__*` environment variables
    /// over the defaults
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            debug!("Loading engine configuration from {}", path.display());
            builder = builder.add_source(File::from(path));
        }
        let settings = builder
            .add_source(
                Environment::with_prefix("BSD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Optional sanity check; the engine itself runs with any finite values
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("alpha", self.alpha),
            ("beta", self.beta),
            ("gamma", self.gamma),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::Invalid { field, value });
            }
        }
        if !(self.sigma_gps > 0.0 && self.sigma_gps.is_finite()) {
            return Err(ConfigError::Invalid {
                field: "sigma_gps",
                value: self.sigma_gps,
            });
        }
        if !(self.ttc_crit > 0.0 && self.ttc_crit <= TTC_MAX) {
            return Err(ConfigError::Invalid {
                field: "ttc_crit",
                value: self.ttc_crit,
            });
        }
        if !(0.0..=1.0).contains(&self.theta_3) {
            return Err(ConfigError::Invalid {
                field: "theta_3",
                value: self.theta_3,
            });
        }

        let sum = self.alpha + self.beta + self.gamma;
        if (sum - 1.0).abs() > 0.05 {
            warn!("Risk weights sum to {:.3}, expected about 1.0", sum);
        }
        Ok(())
    }

    pub fn ttc_settings(&self) -> TtcSettings {
        TtcSettings {
            ttc_crit: self.ttc_crit,
            use_lateral: self.use_lateral_ttc,
        }
    }

    pub fn alert_config(&self) -> AlertConfig {
        AlertConfig::with_critical_threshold(self.theta_3)
    }

    pub fn presence_model(&self) -> PresenceModel {
        PresenceModel::new(self.sigma_gps)
    }
}
