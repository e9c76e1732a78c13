//! # Journal configuration — `journal.toml`
//!
//! Optional TOML file read by the server on request and handed to the views
//! through a server function. It currently only configures the anniversary
//! countdown shown on the timeline.
//!
//! ```toml
//! [countdown]
//! target = "2025-05-20T00:00:00"
//! label = "Countdown to our 2-Year Anniversary"
//! precision = "seconds"   # or "minutes"
//! ```
//!
//! A missing or empty file is equivalent to [`JournalConfig::default`].

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::countdown::Precision;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct JournalConfig {
    #[serde(default)]
    pub countdown: CountdownConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CountdownConfig {
    /// Local date-time the countdown runs to.
    #[serde(default = "default_target")]
    pub target: NaiveDateTime,
    #[serde(default = "default_label")]
    pub label: String,
    #[serde(default)]
    pub precision: Precision,
}

fn default_target() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 5, 20)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

fn default_label() -> String {
    "Countdown to our 2-Year Anniversary".to_string()
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            target: default_target(),
            label: default_label(),
            precision: Precision::default(),
        }
    }
}

impl JournalConfig {
    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "journal.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_default() {
        let config = JournalConfig::from_toml("").unwrap();
        assert_eq!(config, JournalConfig::default());
        assert_eq!(config.countdown.target.to_string(), "2025-05-20 00:00:00");
        assert_eq!(config.countdown.precision, Precision::Seconds);
    }

    #[test]
    fn test_parse_countdown() {
        let config = JournalConfig::from_toml(
            r#"
            [countdown]
            target = "2025-02-14T00:00:00"
            precision = "minutes"
            "#,
        )
        .unwrap();
        assert_eq!(config.countdown.target.to_string(), "2025-02-14 00:00:00");
        assert_eq!(config.countdown.precision, Precision::Minutes);
        assert_eq!(config.countdown.label, "Countdown to our 2-Year Anniversary");
    }

    #[test]
    fn test_rejects_bad_precision() {
        assert!(JournalConfig::from_toml("[countdown]\nprecision = \"hours\"").is_err());
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = JournalConfig::default();
        config.countdown.label = "Until Valentine's".to_string();
        let text = config.to_toml().unwrap();
        assert_eq!(JournalConfig::from_toml(&text).unwrap(), config);
    }
}
