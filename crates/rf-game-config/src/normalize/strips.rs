//! Reel collection normalization

use serde_json::Value;

use super::reel::normalize_reel;
use crate::config::{ValidationConfig, exceeds};
use crate::error::{ValidationError, ValidationReason};
use crate::model::ReelEntry;

/// Wire name of the reel list
pub const REEL_STRIPS_FIELD: &str = "reelStrips";

/// Validate the ordered reel list; fail-fast on the first bad reel
pub fn normalize_reel_strips(
    raw: &Value,
    config: &ValidationConfig,
) -> Result<Vec<ReelEntry>, ValidationError> {
    let reels = match raw.as_array() {
        Some(reels) if !reels.is_empty() => reels,
        _ => {
            return Err(ValidationError::new(
                REEL_STRIPS_FIELD,
                ValidationReason::MissingOrEmpty,
            ));
        }
    };

    if exceeds(reels.len(), config.limits.max_reels) {
        return Err(ValidationError::new(
            REEL_STRIPS_FIELD,
            ValidationReason::LimitExceeded,
        ));
    }

    reels.iter().map(|reel| normalize_reel(reel, config)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_order_preserved() {
        let raw = json!([
            { "reelThree": { "L1": 3 } },
            { "reelOne": { "L1": 1 } },
            { "reelTwo": { "L1": 2 } },
        ]);
        let reels = normalize_reel_strips(&raw, &ValidationConfig::default()).unwrap();
        let keys: Vec<_> = reels.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["reelThree", "reelOne", "reelTwo"]);
    }

    #[test]
    fn test_empty_or_not_a_list() {
        for raw in [json!([]), json!({ "reelOne": {} }), json!("reels"), json!(null)] {
            let err = normalize_reel_strips(&raw, &ValidationConfig::default()).unwrap_err();
            assert_eq!(err.field, REEL_STRIPS_FIELD);
            assert_eq!(err.reason, ValidationReason::MissingOrEmpty);
        }
    }

    #[test]
    fn test_first_bad_reel_propagates_verbatim() {
        let raw = json!([
            { "reelOne": { "L1": 1 } },
            { "reelTwo": { "L1": "abc" } },
            { "reelThree": null },
        ]);
        let err = normalize_reel_strips(&raw, &ValidationConfig::default()).unwrap_err();
        assert_eq!(err, ValidationError::invalid_weight("reelTwo", "L1"));
    }

    #[test]
    fn test_reel_limit() {
        let mut config = ValidationConfig::default();
        config.limits.max_reels = Some(1);
        let raw = json!([{ "a": {} }, { "b": {} }]);
        let err = normalize_reel_strips(&raw, &config).unwrap_err();
        assert_eq!(err.reason, ValidationReason::LimitExceeded);
    }
}
