//! CLI configuration

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError};
use domain_rating::RatingSettings;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::PathBuf;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// CLI configuration, read from `OCPD_*` environment variables
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Log level or `EnvFilter` directive, overridden by `RUST_LOG`
    pub log_level: String,
    /// Log output format
    pub log_format: LogFormat,
    /// Rule table document replacing the standard tables
    pub tables_path: Option<PathBuf>,
    /// Shipments per month assumed when the needs analysis is silent
    pub default_monthly_shipments: u32,
    /// Sum insured above which quotes are referred
    pub referral_sum_insured_limit: Decimal,
}

impl Default for CliConfig {
    fn default() -> Self {
        let settings = RatingSettings::default();
        Self {
            log_level: "warn".to_string(),
            log_format: LogFormat::Pretty,
            tables_path: None,
            default_monthly_shipments: settings.default_monthly_shipments,
            referral_sum_insured_limit: settings.referral_sum_insured_limit,
        }
    }
}

impl CliConfig {
    /// Loads configuration from environment
    ///
    /// Unset variables keep their defaults; set but malformed ones are errors.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_builder(
            config::Config::builder().add_source(config::Environment::with_prefix("OCPD")),
        )
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder.build()?.try_deserialize()
    }

    /// Engine settings derived from this configuration
    pub fn to_settings(&self) -> RatingSettings {
        RatingSettings {
            default_monthly_shipments: self.default_monthly_shipments,
            referral_sum_insured_limit: self.referral_sum_insured_limit,
            ..RatingSettings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults_match_engine_settings() {
        assert_eq!(CliConfig::default().to_settings(), RatingSettings::default());
    }

    #[test]
    fn test_empty_source_yields_defaults() {
        let config = CliConfig::from_builder(config::Config::builder()).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_overrides_reach_settings() {
        let builder = config::Config::builder()
            .set_override("log_format", "json")
            .unwrap()
            .set_override("referral_sum_insured_limit", "3000000")
            .unwrap()
            .set_override("default_monthly_shipments", "120")
            .unwrap();
        let config = CliConfig::from_builder(builder).unwrap();

        assert_eq!(config.log_format, LogFormat::Json);
        let settings = config.to_settings();
        assert_eq!(settings.referral_sum_insured_limit, dec!(3000000));
        assert_eq!(settings.default_monthly_shipments, 120);
        assert_eq!(settings.referral_claims_count, 5);
    }

    #[test]
    fn test_malformed_value_is_an_error() {
        let builder = config::Config::builder()
            .set_override("default_monthly_shipments", "many")
            .unwrap();
        assert!(CliConfig::from_builder(builder).is_err());
    }
}
