//! Configuration structures.

use serde::{Deserialize, Serialize};
use stockta_core::EngineResult;
use stockta_indicators::IndicatorParams;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub indicators: IndicatorParams,
    #[serde(default)]
    pub analysis: AnalysisSettings,
}

impl AppConfig {
    /// Validate the settings that feed the engine.
    pub fn validate(&self) -> EngineResult<()> {
        self.indicators.validate()
    }
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "stockta".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Caller-side analysis policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Minimum observations required before computing; 0 disables the check
    pub min_points: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self { min_points: 30 }
    }
}
