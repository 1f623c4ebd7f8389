//! # Backoffice Configuration
//!
//! Tunables loaded once at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     MULTILUZ_UTC_OFFSET_MINUTES=-180                                   │
//! │     MULTILUZ_PARTIAL_THRESHOLD=down_payment_reached                    │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/multiluz-backoffice/backoffice.toml (Linux)              │
//! │     ~/Library/Application Support/br.com.multiluz.backoffice/...       │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     Brazil offset, 3 grace days, any receipt counts as Partial         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # backoffice.toml
//! [clock]
//! utc_offset_minutes = -180
//!
//! [status]
//! overdue_grace_days = 3
//! partial_threshold = "any_receipt"  # any_receipt | down_payment_reached
//!
//! [commissions]
//! default_rate_bps = 500
//!
//! [ui]
//! picker_limit = 5
//!
//! [data]
//! seed_demo = true
//! ```

use std::path::PathBuf;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use multiluz_core::filters::DEFAULT_PICKER_LIMIT;
use multiluz_core::order::DEFAULT_OVERDUE_GRACE_DAYS;
use multiluz_core::{PartialThreshold, Rate, StatusPolicy};

/// Largest accepted distance from UTC, in minutes.
const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

// =============================================================================
// Config Error
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

/// Reference clock. All day-based rules run against the calendar date at
/// this fixed offset from UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockSettings {
    #[serde(default = "default_utc_offset")]
    pub utc_offset_minutes: i32,
}

fn default_utc_offset() -> i32 {
    -180
}

impl Default for ClockSettings {
    fn default() -> Self {
        ClockSettings {
            utc_offset_minutes: default_utc_offset(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSettings {
    #[serde(default = "default_grace_days")]
    pub overdue_grace_days: u32,

    #[serde(default)]
    pub partial_threshold: PartialThreshold,
}

fn default_grace_days() -> u32 {
    DEFAULT_OVERDUE_GRACE_DAYS
}

impl Default for StatusSettings {
    fn default() -> Self {
        StatusSettings {
            overdue_grace_days: default_grace_days(),
            partial_threshold: PartialThreshold::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionSettings {
    /// Rate pre-filled on a new commission, in basis points.
    #[serde(default = "default_commission_bps")]
    pub default_rate_bps: u32,
}

fn default_commission_bps() -> u32 {
    500
}

impl Default for CommissionSettings {
    fn default() -> Self {
        CommissionSettings {
            default_rate_bps: default_commission_bps(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiSettings {
    /// Maximum results shown by the order pickers.
    #[serde(default = "default_picker_limit")]
    pub picker_limit: usize,
}

fn default_picker_limit() -> usize {
    DEFAULT_PICKER_LIMIT
}

impl Default for UiSettings {
    fn default() -> Self {
        UiSettings {
            picker_limit: default_picker_limit(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSettings {
    /// Load the demo data set into the store at startup.
    #[serde(default = "default_true")]
    pub seed_demo: bool,
}

fn default_true() -> bool {
    true
}

impl Default for DataSettings {
    fn default() -> Self {
        DataSettings { seed_demo: true }
    }
}

// =============================================================================
// Backoffice Config
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackofficeConfig {
    #[serde(default)]
    pub clock: ClockSettings,

    #[serde(default)]
    pub status: StatusSettings,

    #[serde(default)]
    pub commissions: CommissionSettings,

    #[serde(default)]
    pub ui: UiSettings,

    #[serde(default)]
    pub data: DataSettings,
}

impl BackofficeConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (backoffice.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading backoffice config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Like [`load`](Self::load), falling back to defaults on any error.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load backoffice config: {}. Using defaults.", e);
            Self::default()
        })
    }

    pub fn from_toml(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.clock.utc_offset_minutes.abs() > MAX_UTC_OFFSET_MINUTES {
            return Err(ConfigError::Invalid(format!(
                "utc_offset_minutes must be within ±{}, got {}",
                MAX_UTC_OFFSET_MINUTES, self.clock.utc_offset_minutes
            )));
        }

        if self.commissions.default_rate_bps > Rate::FULL.bps() {
            return Err(ConfigError::Invalid(format!(
                "default_rate_bps must be at most {}, got {}",
                Rate::FULL.bps(),
                self.commissions.default_rate_bps
            )));
        }

        if self.ui.picker_limit == 0 {
            return Err(ConfigError::Invalid(
                "picker_limit must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies `MULTILUZ_*` overrides read through `var`.
    ///
    /// Unparseable values are logged and ignored.
    pub fn apply_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = var("MULTILUZ_UTC_OFFSET_MINUTES") {
            match raw.trim().parse::<i32>() {
                Ok(minutes) => {
                    debug!(minutes, "Overriding UTC offset from environment");
                    self.clock.utc_offset_minutes = minutes;
                }
                Err(_) => warn!(value = %raw, "Ignoring invalid MULTILUZ_UTC_OFFSET_MINUTES"),
            }
        }

        if let Some(raw) = var("MULTILUZ_OVERDUE_GRACE_DAYS") {
            match raw.trim().parse::<u32>() {
                Ok(days) => self.status.overdue_grace_days = days,
                Err(_) => warn!(value = %raw, "Ignoring invalid MULTILUZ_OVERDUE_GRACE_DAYS"),
            }
        }

        if let Some(raw) = var("MULTILUZ_PARTIAL_THRESHOLD") {
            match raw.trim().to_lowercase().as_str() {
                "any_receipt" => self.status.partial_threshold = PartialThreshold::AnyReceipt,
                "down_payment_reached" => {
                    self.status.partial_threshold = PartialThreshold::DownPaymentReached
                }
                _ => warn!(value = %raw, "Unknown partial threshold in environment"),
            }
        }

        if let Some(raw) = var("MULTILUZ_COMMISSION_RATE_BPS") {
            match raw.trim().parse::<u32>() {
                Ok(bps) => self.commissions.default_rate_bps = bps,
                Err(_) => warn!(value = %raw, "Ignoring invalid MULTILUZ_COMMISSION_RATE_BPS"),
            }
        }

        if let Some(raw) = var("MULTILUZ_PICKER_LIMIT") {
            match raw.trim().parse::<usize>() {
                Ok(limit) => self.ui.picker_limit = limit,
                Err(_) => warn!(value = %raw, "Ignoring invalid MULTILUZ_PICKER_LIMIT"),
            }
        }

        if let Some(raw) = var("MULTILUZ_SEED_DEMO") {
            match raw.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" => self.data.seed_demo = true,
                "0" | "false" | "no" => self.data.seed_demo = false,
                _ => warn!(value = %raw, "Ignoring invalid MULTILUZ_SEED_DEMO"),
            }
        }
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("br.com", "multiluz", "backoffice")
            .map(|dirs| dirs.config_dir().join("backoffice.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn status_policy(&self) -> StatusPolicy {
        StatusPolicy {
            overdue_grace_days: self.status.overdue_grace_days,
            partial_threshold: self.status.partial_threshold,
        }
    }

    pub fn default_commission_rate(&self) -> Rate {
        Rate::from_bps(self.commissions.default_rate_bps)
    }

    pub fn picker_limit(&self) -> usize {
        self.ui.picker_limit
    }

    /// Calendar date at the reference offset for the instant `now`.
    pub fn today_at(&self, now: DateTime<Utc>) -> NaiveDate {
        (now.naive_utc() + Duration::minutes(i64::from(self.clock.utc_offset_minutes))).date()
    }

    pub fn today(&self) -> NaiveDate {
        self.today_at(Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = BackofficeConfig::default();
        assert_eq!(config.clock.utc_offset_minutes, -180);
        assert_eq!(config.status_policy(), StatusPolicy::default());
        assert_eq!(config.default_commission_rate(), Rate::from_bps(500));
        assert_eq!(config.picker_limit(), 5);
        assert!(config.data.seed_demo);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = BackofficeConfig::from_toml(
            r#"
            [status]
            partial_threshold = "down_payment_reached"

            [data]
            seed_demo = false
            "#,
        )
        .unwrap();

        assert_eq!(config.status.partial_threshold, PartialThreshold::DownPaymentReached);
        assert_eq!(config.status.overdue_grace_days, 3);
        assert_eq!(config.clock.utc_offset_minutes, -180);
        assert!(!config.data.seed_demo);
    }

    #[test]
    fn test_malformed_toml_is_a_parse_error() {
        let err = BackofficeConfig::from_toml("[status]\noverdue_grace_days = \"three\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("MULTILUZ_UTC_OFFSET_MINUTES", "0"),
            ("MULTILUZ_PARTIAL_THRESHOLD", "DOWN_PAYMENT_REACHED"),
            ("MULTILUZ_PICKER_LIMIT", "not-a-number"),
            ("MULTILUZ_SEED_DEMO", "no"),
        ]);
        let mut config = BackofficeConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.clock.utc_offset_minutes, 0);
        assert_eq!(config.status.partial_threshold, PartialThreshold::DownPaymentReached);
        assert_eq!(config.picker_limit(), 5);
        assert!(!config.data.seed_demo);
    }

    #[test]
    fn test_validation() {
        let mut config = BackofficeConfig::default();
        config.clock.utc_offset_minutes = 15 * 60;
        assert!(config.validate().is_err());

        config.clock.utc_offset_minutes = 0;
        config.commissions.default_rate_bps = 10_001;
        assert!(config.validate().is_err());

        config.commissions.default_rate_bps = 700;
        config.ui.picker_limit = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_today_uses_reference_offset() {
        let config = BackofficeConfig::default();
        // 01:30 UTC on the 1st is still the 31st in Brazil
        let now = Utc.with_ymd_and_hms(2024, 11, 1, 1, 30, 0).unwrap();
        assert_eq!(config.today_at(now), NaiveDate::from_ymd_opt(2024, 10, 31).unwrap());

        let utc = BackofficeConfig {
            clock: ClockSettings { utc_offset_minutes: 0 },
            ..BackofficeConfig::default()
        };
        assert_eq!(utc.today_at(now), NaiveDate::from_ymd_opt(2024, 11, 1).unwrap());
    }

    #[test]
    fn test_toml_serialization() {
        let toml_str = toml::to_string_pretty(&BackofficeConfig::default()).unwrap();
        assert!(toml_str.contains("[clock]"));
        assert!(toml_str.contains("partial_threshold = \"any_receipt\""));
    }
}
