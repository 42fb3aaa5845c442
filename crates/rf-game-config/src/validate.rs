//! Game Config Validator — top-level fields and reel orchestration
//!
//! Order of checks:
//! 1. presence of `gameName`, `gameRtp`, `reelStrips`; `reelStrips` must
//!    be a non-empty list
//! 2. `gameRtp` coercion (and optional range)
//! 3. reel list normalization
//!
//! The first failure is returned; no partial draft is produced.

use serde_json::Value;

use crate::coerce::coerce_number;
use crate::config::{RtpPresence, ValidationConfig, exceeds};
use crate::error::{ValidationError, ValidationReason};
use crate::model::{GameConfigDraft, RawGameConfig};
use crate::normalize::{REEL_STRIPS_FIELD, normalize_reel_strips};

pub const GAME_NAME_FIELD: &str = "gameName";
pub const GAME_RTP_FIELD: &str = "gameRtp";

/// Validates raw client fields into a `GameConfigDraft`
#[derive(Debug, Clone, Default)]
pub struct GameConfigValidator {
    config: ValidationConfig,
}

impl GameConfigValidator {
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate and normalize a full field set
    pub fn validate(&self, raw: &RawGameConfig) -> Result<GameConfigDraft, ValidationError> {
        let game_name = self.require_name(raw.game_name.as_ref())?;
        let raw_rtp = self.require_rtp(raw.game_rtp.as_ref())?;
        let raw_reels = require_reel_list(raw.reel_strips.as_ref())?;

        let game_rtp = self.coerce_rtp(raw_rtp)?;
        let reel_strips = normalize_reel_strips(raw_reels, &self.config)?;

        Ok(GameConfigDraft {
            game_name,
            game_rtp,
            reel_strips,
        })
    }

    fn require_name(&self, raw: Option<&Value>) -> Result<String, ValidationError> {
        match raw {
            Some(Value::String(name)) if !name.is_empty() => {
                if exceeds(name.chars().count(), self.config.limits.max_name_length) {
                    return Err(ValidationError::new(
                        GAME_NAME_FIELD,
                        ValidationReason::LimitExceeded,
                    ));
                }
                Ok(name.clone())
            }
            Some(value) if !is_falsy(value) => Err(ValidationError::new(
                GAME_NAME_FIELD,
                ValidationReason::InvalidType,
            )),
            _ => Err(ValidationError::required(GAME_NAME_FIELD)),
        }
    }

    fn require_rtp<'a>(&self, raw: Option<&'a Value>) -> Result<&'a Value, ValidationError> {
        let missing = match (raw, self.config.rtp_presence) {
            (None, _) | (Some(Value::Null), _) => true,
            (Some(value), RtpPresence::Truthy) => is_falsy(value),
            (Some(_), RtpPresence::Present) => false,
        };

        match raw {
            Some(value) if !missing => Ok(value),
            _ => Err(ValidationError::required(GAME_RTP_FIELD)),
        }
    }

    fn coerce_rtp(&self, raw: &Value) -> Result<f64, ValidationError> {
        let rtp = coerce_number(raw)
            .map_err(|_| ValidationError::new(GAME_RTP_FIELD, ValidationReason::InvalidNumber))?;

        if let Some(range) = self.config.rtp_range {
            if !range.contains(rtp) {
                return Err(ValidationError::new(GAME_RTP_FIELD, ValidationReason::OutOfRange));
            }
        }

        Ok(rtp)
    }
}

/// Absent or null is `required`; anything but a non-empty list is
/// `missing-or-empty`
fn require_reel_list(raw: Option<&Value>) -> Result<&Value, ValidationError> {
    match raw {
        None | Some(Value::Null) => Err(ValidationError::required(REEL_STRIPS_FIELD)),
        Some(value) if value.as_array().is_some_and(|reels| !reels.is_empty()) => Ok(value),
        Some(_) => Err(ValidationError::new(
            REEL_STRIPS_FIELD,
            ValidationReason::MissingOrEmpty,
        )),
    }
}

/// Values a loosely-typed client treats as "not provided"
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
