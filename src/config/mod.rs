use std::env;
use std::fmt;
use std::path::PathBuf;

use crate::training::scoring::explain;

/// Top-level configuration for the trainer, sourced from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub telemetry: TelemetryConfig,
    pub content: ContentConfig,
    pub report: ReportConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let log_level = env::var("TRAINER_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let rules_path = env::var("TRAINER_RULES_PATH").ok().map(PathBuf::from);

        let top_drivers = match env::var("TRAINER_TOP_DRIVERS") {
            Ok(value) => value
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidTopDrivers { value })?,
            Err(_) => explain::TOP_DRIVER_COUNT,
        };

        Ok(Self {
            telemetry: TelemetryConfig { log_level },
            content: ContentConfig { rules_path },
            report: ReportConfig { top_drivers },
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Where rule content comes from; `None` means the bundled rule set.
#[derive(Debug, Clone)]
pub struct ContentConfig {
    pub rules_path: Option<PathBuf>,
}

/// Report rendering knobs.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub top_drivers: usize,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidTopDrivers { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTopDrivers { value } => {
                write!(f, "TRAINER_TOP_DRIVERS must be a whole number, got '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("TRAINER_LOG_LEVEL");
        env::remove_var("TRAINER_RULES_PATH");
        env::remove_var("TRAINER_TOP_DRIVERS");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.telemetry.log_level, "info");
        assert!(config.content.rules_path.is_none());
        assert_eq!(config.report.top_drivers, explain::TOP_DRIVER_COUNT);
    }

    #[test]
    fn rejects_non_numeric_driver_count() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("TRAINER_TOP_DRIVERS", "many");
        let result = AppConfig::load();
        reset_env();
        match result {
            Err(ConfigError::InvalidTopDrivers { value }) => assert_eq!(value, "many"),
            other => panic!("expected invalid driver count, got {other:?}"),
        }
    }

    #[test]
    fn reads_rules_path_from_env() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("TRAINER_RULES_PATH", "/tmp/rules.json");
        let config = AppConfig::load().expect("config loads");
        reset_env();
        assert_eq!(
            config.content.rules_path,
            Some(PathBuf::from("/tmp/rules.json"))
        );
    }
}
