//! Error types for game configuration handling
//!
//! Three failure classes reach the caller:
//! - `Validation` — client input defect, found before any store call
//! - `NotFound` — update/fetch target does not exist
//! - `Persistence` — the store collaborator failed

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a field was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationReason {
    /// Field absent, null, or falsy where a value is required
    Required,
    /// Field present with the wrong JSON type
    InvalidType,
    /// `gameRtp` did not coerce to a finite number
    InvalidNumber,
    /// `reelStrips` is not a list, or is an empty list
    MissingOrEmpty,
    /// Reel object has no key, or its value is not a symbol table
    MissingOrInvalidSymbolTable,
    /// Reel object has more than one key
    AmbiguousReelKey,
    /// Symbol weight did not coerce to a finite non-negative number
    InvalidWeight,
    /// Numeric value outside the configured range
    OutOfRange,
    /// Configured size limit exceeded
    LimitExceeded,
}

impl ValidationReason {
    /// Wire name of the reason
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::InvalidType => "invalid-type",
            Self::InvalidNumber => "invalid-number",
            Self::MissingOrEmpty => "missing-or-empty",
            Self::MissingOrInvalidSymbolTable => "missing-or-invalid-symbol-table",
            Self::AmbiguousReelKey => "ambiguous-reel-key",
            Self::InvalidWeight => "invalid-weight",
            Self::OutOfRange => "out-of-range",
            Self::LimitExceeded => "limit-exceeded",
        }
    }
}

impl fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rejected client field
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("invalid field `{field}`: {reason}")]
pub struct ValidationError {
    /// Field path, e.g. `gameRtp` or `reelOne.L1`
    pub field: String,
    pub reason: ValidationReason,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, reason: ValidationReason) -> Self {
        Self {
            field: field.into(),
            reason,
        }
    }

    pub fn required(field: impl Into<String>) -> Self {
        Self::new(field, ValidationReason::Required)
    }

    /// Weight error addressed as `<reelKey>.<symbolKey>`
    pub fn invalid_weight(reel_key: &str, symbol: &str) -> Self {
        Self::new(format!("{reel_key}.{symbol}"), ValidationReason::InvalidWeight)
    }
}

/// Store collaborator failures
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Record already exists: {0}")]
    Duplicate(String),

    #[error("Record does not exist: {0}")]
    Missing(String),

    #[error("Store backend error: {0}")]
    Backend(String),
}

/// Error returned by the exposed create/update/fetch operations
#[derive(Debug, Error)]
pub enum GameConfigError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Game config not found: {id}")]
    NotFound { id: String },

    #[error("Persistence error: {cause}")]
    Persistence {
        #[source]
        cause: StoreError,
    },
}

impl From<StoreError> for GameConfigError {
    fn from(cause: StoreError) -> Self {
        Self::Persistence { cause }
    }
}

impl GameConfigError {
    /// Status code used in the response envelope
    pub fn code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::NotFound { .. } => 404,
            Self::Persistence { .. } => 500,
        }
    }

    /// True when resubmitting corrected input can succeed
    pub fn is_client_fixable(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        let validation = self.as_validation();
        ErrorResponse {
            status: "error".to_string(),
            code: self.code(),
            message: self.to_string(),
            field: validation.map(|v| v.field.clone()),
            reason: validation.map(|v| v.reason),
        }
    }
}

/// Structured error envelope handed back to the request layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub code: u16,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<ValidationReason>,
}

/// Result type alias
pub type GameConfigResult<T> = Result<T, GameConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_wire_names() {
        let json = serde_json::to_string(&ValidationReason::MissingOrInvalidSymbolTable).unwrap();
        assert_eq!(json, "\"missing-or-invalid-symbol-table\"");
        assert_eq!(ValidationReason::InvalidWeight.to_string(), "invalid-weight");
    }

    #[test]
    fn test_invalid_weight_field_path() {
        let err = ValidationError::invalid_weight("reelOne", "L1");
        assert_eq!(err.field, "reelOne.L1");
        assert_eq!(err.reason, ValidationReason::InvalidWeight);
    }

    #[test]
    fn test_error_codes() {
        let validation: GameConfigError = ValidationError::required("gameName").into();
        let not_found = GameConfigError::NotFound { id: "x".into() };
        let persistence: GameConfigError = StoreError::Backend("down".into()).into();

        assert_eq!(validation.code(), 400);
        assert_eq!(not_found.code(), 404);
        assert_eq!(persistence.code(), 500);
        assert!(validation.is_client_fixable());
        assert!(!persistence.is_client_fixable());
    }

    #[test]
    fn test_response_envelope() {
        let err: GameConfigError = ValidationError::invalid_weight("reelOne", "L1").into();
        let value = serde_json::to_value(err.to_response()).unwrap();

        assert_eq!(value["status"], "error");
        assert_eq!(value["code"], 400);
        assert_eq!(value["field"], "reelOne.L1");
        assert_eq!(value["reason"], "invalid-weight");

        let err = GameConfigError::NotFound { id: "abc".into() };
        let value = serde_json::to_value(err.to_response()).unwrap();
        assert_eq!(value["code"], 404);
        assert!(value.get("field").is_none());
    }
}
