//! Single reel normalization: `{ "<reelKey>": { "<symbol>": <weight>, .. } }`

use serde_json::{Map, Value};

use crate::coerce::coerce_number;
use crate::config::{ReelKeyPolicy, ValidationConfig, exceeds};
use crate::error::{ValidationError, ValidationReason};
use crate::model::{ReelEntry, SymbolWeightTable};

/// Field name used for structural reel errors
pub const REEL_FIELD: &str = "reel";

/// Validate one raw reel object and coerce every weight
///
/// Fails on the first bad symbol; nothing partial is returned.
pub fn normalize_reel(raw: &Value, config: &ValidationConfig) -> Result<ReelEntry, ValidationError> {
    let (reel_key, table) = split_reel(raw, config.reel_key_policy)?;

    if exceeds(table.len(), config.limits.max_symbols) {
        return Err(ValidationError::new(reel_key, ValidationReason::LimitExceeded));
    }

    let mut weights = SymbolWeightTable::with_capacity(table.len());
    for (symbol, raw_weight) in table {
        let weight = coerce_number(raw_weight)
            .map_err(|_| ValidationError::invalid_weight(reel_key, symbol))?;

        if weight < 0.0 && !config.allow_negative_weights {
            return Err(ValidationError::invalid_weight(reel_key, symbol));
        }

        weights.insert(symbol.as_str(), weight);
    }

    Ok(ReelEntry::new(reel_key, weights))
}

/// Pull the reel key and its symbol table out of the raw object
fn split_reel(
    raw: &Value,
    policy: ReelKeyPolicy,
) -> Result<(&str, &Map<String, Value>), ValidationError> {
    let invalid = || ValidationError::new(REEL_FIELD, ValidationReason::MissingOrInvalidSymbolTable);

    let reel = raw.as_object().ok_or_else(invalid)?;
    let mut entries = reel.iter();
    let (key, value) = entries.next().ok_or_else(invalid)?;

    if entries.next().is_some() {
        match policy {
            ReelKeyPolicy::Reject => {
                return Err(ValidationError::new(REEL_FIELD, ValidationReason::AmbiguousReelKey));
            }
            ReelKeyPolicy::TakeFirst => {
                log::debug!(
                    "[GameConfig] reel '{}' has {} keys, keeping the first",
                    key,
                    reel.len()
                );
            }
        }
    }

    let table = value.as_object().ok_or_else(invalid)?;
    Ok((key.as_str(), table))
}
