//! TOML-based service configuration.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::forecast::{DEFAULT_FUTURE_POINTS, DEFAULT_WINDOW_SIZE};
use crate::telemetry::DEFAULT_LOG_FILTER;

/// Default share of the sequence held out for evaluation.
pub const DEFAULT_TEST_FRACTION: f64 = 0.2;

/// Default seed for the train/test permutation.
pub const DEFAULT_SEED: u64 = 42;

/// Top-level service configuration parsed from TOML.
///
/// Every section is optional and falls back to its defaults. Load from TOML
/// with [`ServiceConfig::from_toml_file`] or start from
/// [`ServiceConfig::default`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Regression and forecast parameters.
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// Log filter settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// TCP port to bind.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

/// Regression and forecast parameters applied to every request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Maximum sliding-window length (must be >= 2).
    pub window_size: usize,
    /// Number of future points to forecast (must be > 0).
    pub future_points: usize,
    /// Share of positions held out for evaluation, in `(0, 1)`.
    pub test_fraction: f64,
    /// Seed for the train/test permutation.
    pub seed: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            future_points: DEFAULT_FUTURE_POINTS,
            test_fraction: DEFAULT_TEST_FRACTION,
            seed: DEFAULT_SEED,
        }
    }
}

/// Log filter settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive, used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"analysis.window_size"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl ServiceConfig {
    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.server.host.trim().is_empty() {
            errors.push(ConfigError {
                field: "server.host".into(),
                message: "must not be empty".into(),
            });
        }

        let a = &self.analysis;
        if a.window_size < 2 {
            errors.push(ConfigError {
                field: "analysis.window_size".into(),
                message: format!("must be >= 2, got {}", a.window_size),
            });
        }
        if a.future_points == 0 {
            errors.push(ConfigError {
                field: "analysis.future_points".into(),
                message: "must be > 0".into(),
            });
        }
        if !(a.test_fraction > 0.0 && a.test_fraction < 1.0) {
            errors.push(ConfigError {
                field: "analysis.test_fraction".into(),
                message: format!("must be in (0.0, 1.0), got {}", a.test_fraction),
            });
        }

        if self.logging.filter.trim().is_empty() {
            errors.push(ConfigError {
                field: "logging.filter".into(),
                message: "must not be empty".into(),
            });
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_valid() {
        let cfg = ServiceConfig::default();
        let errors = cfg.validate();
        assert!(errors.is_empty(), "defaults should be valid: {errors:?}");
    }

    #[test]
    fn defaults_match_documented_values() {
        let cfg = ServiceConfig::default();
        assert_eq!(cfg.server.port, 5000);
        assert_eq!(cfg.analysis.window_size, 5);
        assert_eq!(cfg.analysis.future_points, 8);
        assert_eq!(cfg.analysis.test_fraction, 0.2);
        assert_eq!(cfg.analysis.seed, 42);
        assert_eq!(cfg.logging.filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[server]
host = "0.0.0.0"
port = 8080

[analysis]
window_size = 7
future_points = 12
test_fraction = 0.25
seed = 7

[logging]
filter = "trend_forecast=debug"
"#;
        let cfg = ServiceConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let cfg = cfg.ok();
        assert_eq!(cfg.as_ref().map(|c| c.server.port), Some(8080));
        assert_eq!(cfg.as_ref().map(|c| c.analysis.window_size), Some(7));
        assert_eq!(cfg.as_ref().map(|c| c.analysis.seed), Some(7));
        assert_eq!(
            cfg.as_ref().map(|c| &*c.logging.filter),
            Some("trend_forecast=debug")
        );
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[analysis]
window_size = 5
bogus_field = true
"#;
        let result = ServiceConfig::from_toml_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let toml = r#"
[analysis]
future_points = 3
"#;
        let cfg = ServiceConfig::from_toml_str(toml).ok();
        // overridden
        assert_eq!(cfg.as_ref().map(|c| c.analysis.future_points), Some(3));
        // kept default
        assert_eq!(cfg.as_ref().map(|c| c.analysis.window_size), Some(5));
        assert_eq!(cfg.as_ref().map(|c| c.server.port), Some(5000));
    }

    #[test]
    fn validation_catches_small_window() {
        let mut cfg = ServiceConfig::default();
        cfg.analysis.window_size = 1;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "analysis.window_size"));
    }

    #[test]
    fn validation_catches_zero_horizon() {
        let mut cfg = ServiceConfig::default();
        cfg.analysis.future_points = 0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "analysis.future_points"));
    }

    #[test]
    fn validation_catches_bad_test_fraction() {
        for bad in [0.0, 1.0, -0.5, f64::NAN] {
            let mut cfg = ServiceConfig::default();
            cfg.analysis.test_fraction = bad;
            let errors = cfg.validate();
            assert!(
                errors.iter().any(|e| e.field == "analysis.test_fraction"),
                "test_fraction {bad} should be rejected"
            );
        }
    }

    #[test]
    fn validation_collects_every_error() {
        let mut cfg = ServiceConfig::default();
        cfg.server.host = " ".to_string();
        cfg.analysis.window_size = 0;
        cfg.logging.filter = String::new();
        assert_eq!(cfg.validate().len(), 3);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = ServiceConfig::from_toml_file(Path::new("/nonexistent/trend.toml")).unwrap_err();
        assert_eq!(err.field, "config");
        assert!(err.message.contains("/nonexistent/trend.toml"));
    }
}
