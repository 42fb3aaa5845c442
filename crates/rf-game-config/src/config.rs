//! Validation Configuration — TOML-based policy and limits for game configs

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What to do with a reel object that has more than one key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReelKeyPolicy {
    /// Reject with `ambiguous-reel-key`
    #[default]
    Reject,
    /// Keep the first key in document order and drop the rest
    TakeFirst,
}

/// How presence of `gameRtp` is decided before coercion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RtpPresence {
    /// Falsy values (`0`, `""`, `false`, null) count as missing
    #[default]
    Truthy,
    /// Only absent or null counts as missing; `0` is a valid RTP
    Present,
}

/// Inclusive RTP bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RtpRange {
    pub min: f64,
    pub max: f64,
}

impl RtpRange {
    /// Ratio scale, (0, 1]
    pub fn ratio() -> Self {
        Self {
            min: f64::MIN_POSITIVE,
            max: 1.0,
        }
    }

    /// Percentage scale, (0, 100]
    pub fn percentage() -> Self {
        Self {
            min: f64::MIN_POSITIVE,
            max: 100.0,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Optional size limits on client input; `None` means unbounded
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationLimits {
    pub max_name_length: Option<usize>,
    pub max_reels: Option<usize>,
    pub max_symbols: Option<usize>,
}

impl ValidationLimits {
    /// Limits suited to a public-facing endpoint
    pub fn strict() -> Self {
        Self {
            max_name_length: Some(256),
            max_reels: Some(10),
            max_symbols: Some(50),
        }
    }
}

/// True when `count` is over an optional limit
pub(crate) fn exceeds(count: usize, limit: Option<usize>) -> bool {
    limit.is_some_and(|max| count > max)
}

/// Complete validation configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub reel_key_policy: ReelKeyPolicy,
    pub rtp_presence: RtpPresence,
    pub allow_negative_weights: bool,
    pub rtp_range: Option<RtpRange>,
    pub limits: ValidationLimits,
}

impl ValidationConfig {
    /// Settings matching the legacy cloud functions: take-first reels,
    /// truthy RTP check, negative weights allowed
    pub fn legacy() -> Self {
        Self {
            reel_key_policy: ReelKeyPolicy::TakeFirst,
            rtp_presence: RtpPresence::Truthy,
            allow_negative_weights: true,
            rtp_range: None,
            limits: ValidationLimits::default(),
        }
    }

    /// Load from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save to TOML string
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Reject settings no input could satisfy
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(range) = self.rtp_range {
            if !range.min.is_finite() || !range.max.is_finite() || range.min > range.max {
                return Err(ConfigError::Invalid(format!(
                    "rtp_range must be finite with min <= max, got {}..={}",
                    range.min, range.max
                )));
            }
        }
        let limits = [
            ("max_name_length", self.limits.max_name_length),
            ("max_reels", self.limits.max_reels),
            ("max_symbols", self.limits.max_symbols),
        ];
        for (name, limit) in limits {
            if limit == Some(0) {
                return Err(ConfigError::Invalid(format!("limits.{name} cannot be 0")));
            }
        }
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config parse error: {0}")]
    Parse(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        let config = ValidationConfig::from_toml("").unwrap();
        assert_eq!(config, ValidationConfig::default());
        assert_eq!(config.reel_key_policy, ReelKeyPolicy::Reject);
        assert_eq!(config.rtp_presence, RtpPresence::Truthy);
        assert!(config.rtp_range.is_none());
        assert_eq!(config.limits, ValidationLimits::default());
        assert!(config.limits.max_reels.is_none());
    }

    #[test]
    fn test_parse_full_toml() {
        let toml = r#"
            reel_key_policy = "take_first"
            rtp_presence = "present"
            allow_negative_weights = true

            [rtp_range]
            min = 0.8
            max = 1.0

            [limits]
            max_reels = 6
        "#;
        let config = ValidationConfig::from_toml(toml).unwrap();

        assert_eq!(config.reel_key_policy, ReelKeyPolicy::TakeFirst);
        assert_eq!(config.rtp_presence, RtpPresence::Present);
        assert!(config.allow_negative_weights);
        assert_eq!(config.rtp_range, Some(RtpRange { min: 0.8, max: 1.0 }));
        assert_eq!(config.limits.max_reels, Some(6));
        assert_eq!(config.limits.max_symbols, None);
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = ValidationConfig::legacy();
        config.rtp_range = Some(RtpRange::percentage());
        config.limits = ValidationLimits::strict();
        let text = config.to_toml().unwrap();
        assert_eq!(ValidationConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_rejects_inverted_range() {
        let toml = r#"
            [rtp_range]
            min = 1.0
            max = 0.5
        "#;
        assert!(matches!(ValidationConfig::from_toml(toml), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_zero_limits() {
        let toml = r#"
            [limits]
            max_symbols = 0
        "#;
        assert!(ValidationConfig::from_toml(toml).is_err());
    }

    #[test]
    fn test_exceeds() {
        assert!(!exceeds(1_000_000, None));
        assert!(!exceeds(10, Some(10)));
        assert!(exceeds(11, Some(10)));
    }

    #[test]
    fn test_unknown_policy_is_parse_error() {
        let result = ValidationConfig::from_toml(r#"reel_key_policy = "merge""#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_range_contains() {
        let ratio = RtpRange::ratio();
        assert!(ratio.contains(0.96));
        assert!(ratio.contains(1.0));
        assert!(!ratio.contains(0.0));
        assert!(!ratio.contains(96.0));
        assert!(RtpRange::percentage().contains(96.0));
    }
}
