//! Configuration management.

mod settings;

pub use settings::{AnalysisSettings, AppConfig, AppSettings, LoggingConfig};

use config::{Config, Environment, File};
use std::path::Path;
use stockta_core::EngineError;
use thiserror::Error;

/// Configuration loading and validation errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid indicator parameters: {0}")]
    Invalid(#[from] EngineError),

    #[error("Failed to render configuration: {0}")]
    Render(#[from] toml::ser::Error),
}

/// Load configuration from file and environment.
///
/// Environment variables prefixed with `STOCKTA__` override file values,
/// e.g. `STOCKTA__INDICATORS__RSI_PERIOD=9`.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(
            Environment::with_prefix("STOCKTA")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let app: AppConfig = config.try_deserialize()?;
    app.validate()?;
    Ok(app)
}

/// Render the effective configuration as TOML.
pub fn render_config(config: &AppConfig) -> Result<String, ConfigError> {
    Ok(toml::to_string_pretty(config)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockta_indicators::RsiFlatPolicy;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("{}_{}.toml", name, std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_config_file() {
        let path = write_temp(
            "stockta_config_load",
            r#"
[app]
name = "stockta"
environment = "test"

[indicators]
rsi_period = 9
rsi_flat_policy = "undefined"
bollinger_k = 2.5

[analysis]
min_points = 10
"#,
        );

        let config = load_config(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.app.environment, "test");
        assert_eq!(config.indicators.rsi_period, 9);
        assert_eq!(config.indicators.rsi_flat_policy, RsiFlatPolicy::Undefined);
        assert_eq!(config.indicators.bollinger_k, 2.5);
        assert_eq!(config.indicators.macd_fast, 12);
        assert_eq!(config.analysis.min_points, 10);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_invalid_parameters_are_rejected() {
        let path = write_temp(
            "stockta_config_invalid",
            r#"
[indicators]
macd_signal = 0
"#,
        );

        let result = load_config(&path);
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = load_config(Path::new("/definitely/not/here.toml"));
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }

    #[test]
    fn test_render_round_trips_defaults() {
        let rendered = render_config(&AppConfig::default()).unwrap();

        assert!(rendered.contains("[indicators]"));
        assert!(rendered.contains("rsi_period = 14"));
        assert!(rendered.contains("min_points = 30"));
        assert!(rendered.contains("level = \"info\""));
        // Log format comes from the command line only
        assert!(!rendered.contains("format"));
    }
}
