//! Application configuration file.
//!
//! Optional YAML file carrying the tuning defaults; every field has a
//! default so a partial file is fine. CLI flags override whatever is
//! loaded.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use pend_control::PidGains;
use pend_stream::FeedEndpoint;

/// Gain block of the config file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GainConfig {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
}

impl Default for GainConfig {
    fn default() -> Self {
        Self {
            kp: 1.0,
            ki: 0.0,
            kd: 0.0,
        }
    }
}

impl GainConfig {
    /// Validate into a gain set.
    pub fn to_gains(self) -> AppResult<PidGains> {
        Ok(PidGains::new(self.kp, self.ki, self.kd)?)
    }
}

/// Feed block of the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub host: String,
    pub port: u16,
    pub read_timeout_ms: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            read_timeout_ms: 500,
        }
    }
}

impl FeedConfig {
    /// Build the endpoint the remote source connects to.
    pub fn to_endpoint(&self, default_setpoint: f64) -> FeedEndpoint {
        FeedEndpoint {
            host: self.host.clone(),
            port: self.port,
            read_timeout_ms: self.read_timeout_ms,
            default_setpoint,
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub gains: GainConfig,
    /// Sample interval in seconds.
    pub dt: Option<f64>,
    /// Constant setpoint for local runs (and assumed for bare feed lines).
    pub setpoint: Option<f64>,
    pub feed: FeedConfig,
}

impl AppConfig {
    /// Sample interval with the tool default applied.
    pub fn dt(&self) -> f64 {
        self.dt.unwrap_or(0.1)
    }

    /// Setpoint with the tool default applied.
    pub fn setpoint(&self) -> f64 {
        self.setpoint.unwrap_or(50.0)
    }

    /// Load a config file.
    pub fn load(path: &Path) -> AppResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| AppError::ConfigFileRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&text).map_err(|e| AppError::ConfigParse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.gains.kp, 1.0);
        assert_eq!(cfg.dt(), 0.1);
        assert_eq!(cfg.setpoint(), 50.0);
        assert_eq!(cfg.feed.port, 5000);
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let cfg: AppConfig = serde_yaml::from_str("gains:\n  kp: 2.5\nsetpoint: 10.0\n").unwrap();
        assert_eq!(cfg.gains.kp, 2.5);
        assert_eq!(cfg.gains.ki, 0.0);
        assert_eq!(cfg.setpoint(), 10.0);
        assert_eq!(cfg.feed.host, "127.0.0.1");
    }

    #[test]
    fn non_finite_gains_rejected_at_the_boundary() {
        let cfg: AppConfig = serde_yaml::from_str("gains:\n  kp: .nan\n").unwrap();
        assert!(cfg.gains.to_gains().is_err());
    }
}
