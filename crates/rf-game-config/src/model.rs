//! Game configuration records
//!
//! - `RawGameConfig` — untyped client fields as they arrive on the wire
//! - `GameConfigDraft` — fully validated fields, no identity yet
//! - `GameConfig` — persisted record with id and store-owned timestamps
//! - `ReelEntry` / `SymbolWeightTable` — one reel's symbol weights

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============ Symbol Weights ============

/// Symbol code -> weight for one reel, in input order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolWeightTable(IndexMap<String, f64>);

impl SymbolWeightTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self(IndexMap::with_capacity(capacity))
    }

    /// Insert or replace a weight, returning the previous one
    pub fn insert(&mut self, symbol: impl Into<String>, weight: f64) -> Option<f64> {
        self.0.insert(symbol.into(), weight)
    }

    pub fn get(&self, symbol: &str) -> Option<f64> {
        self.0.get(symbol).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Symbol codes in table order
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Sum of all weights on the reel
    pub fn total_weight(&self) -> f64 {
        self.0.values().sum()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for SymbolWeightTable {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

// ============ Reel Entry ============

/// One reel: its name (e.g. `reelOne`) and symbol weights
///
/// Serialized in wire shape, a single-key object `{ "reelOne": { "L1": 5 } }`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReelEntry {
    pub key: String,
    pub weights: SymbolWeightTable,
}

impl ReelEntry {
    pub fn new(key: impl Into<String>, weights: SymbolWeightTable) -> Self {
        Self {
            key: key.into(),
            weights,
        }
    }
}

impl Serialize for ReelEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.key, &self.weights)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for ReelEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut map = IndexMap::<String, SymbolWeightTable>::deserialize(deserializer)?;
        let count = map.len();
        match map.pop() {
            Some((key, weights)) if map.is_empty() => Ok(Self { key, weights }),
            _ => Err(de::Error::invalid_length(
                count,
                &"a reel object with exactly one key",
            )),
        }
    }
}

// ============ Records ============

/// Validated game configuration fields, ready to persist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConfigDraft {
    pub game_name: String,
    pub game_rtp: f64,
    pub reel_strips: Vec<ReelEntry>,
}

/// Persisted game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    /// Store-assigned id, immutable after creation
    pub id: String,
    pub game_name: String,
    pub game_rtp: f64,
    pub reel_strips: Vec<ReelEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GameConfig {
    /// Build a fresh record from a draft; stores call this on create
    pub fn from_draft(id: impl Into<String>, draft: GameConfigDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            game_name: draft.game_name,
            game_rtp: draft.game_rtp,
            reel_strips: draft.reel_strips,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite all client-owned fields; id and timestamps are untouched
    pub fn apply(&mut self, draft: GameConfigDraft) {
        self.game_name = draft.game_name;
        self.game_rtp = draft.game_rtp;
        self.reel_strips = draft.reel_strips;
    }

    /// Client-owned fields of this record
    pub fn to_draft(&self) -> GameConfigDraft {
        GameConfigDraft {
            game_name: self.game_name.clone(),
            game_rtp: self.game_rtp,
            reel_strips: self.reel_strips.clone(),
        }
    }

    pub fn reel(&self, key: &str) -> Option<&ReelEntry> {
        self.reel_strips.iter().find(|r| r.key == key)
    }
}

// ============ Raw Input ============

/// Client fields before validation; every field may be absent or mistyped
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawGameConfig {
    #[serde(rename = "gameName", default)]
    pub game_name: Option<Value>,

    #[serde(rename = "gameRtp", default)]
    pub game_rtp: Option<Value>,

    /// Legacy clients send this as `reelName`
    #[serde(rename = "reelStrips", alias = "reelName", default)]
    pub reel_strips: Option<Value>,
}

impl RawGameConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}

/// Update request: target id plus the full field set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawUpdateRequest {
    #[serde(alias = "objectId")]
    pub id: String,

    #[serde(flatten)]
    pub fields: RawGameConfig,
}

impl RawUpdateRequest {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_reel() -> ReelEntry {
        ReelEntry::new("reelOne", [("L1", 5.0), ("L2", 3.0)].into_iter().collect())
    }

    #[test]
    fn test_reel_entry_wire_shape() {
        let value = serde_json::to_value(sample_reel()).unwrap();
        assert_eq!(value, json!({ "reelOne": { "L1": 5.0, "L2": 3.0 } }));
    }

    #[test]
    fn test_reel_entry_rejects_multi_key_document() {
        let result: Result<ReelEntry, _> =
            serde_json::from_value(json!({ "reelOne": { "L1": 1 }, "reelTwo": { "L1": 2 } }));
        assert!(result.is_err());

        let result: Result<ReelEntry, _> = serde_json::from_value(json!({}));
        assert!(result.is_err());
    }

    #[test]
    fn test_symbol_order_preserved() {
        let reel: ReelEntry =
            serde_json::from_str(r#"{ "reelOne": { "M2": 1, "L1": 2, "H1": 3 } }"#).unwrap();
        let symbols: Vec<_> = reel.weights.symbols().collect();
        assert_eq!(symbols, vec!["M2", "L1", "H1"]);
        assert_eq!(reel.weights.total_weight(), 6.0);
    }

    #[test]
    fn test_game_config_camel_case() {
        let now = Utc::now();
        let draft = GameConfigDraft {
            game_name: "Fortune Tiger".into(),
            game_rtp: 0.96,
            reel_strips: vec![sample_reel()],
        };
        let record = GameConfig::from_draft("abc", draft, now);
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["gameName"], "Fortune Tiger");
        assert_eq!(value["gameRtp"], 0.96);
        assert_eq!(value["reelStrips"][0]["reelOne"]["L1"], 5.0);
        assert!(value.get("createdAt").is_some());

        let back: GameConfig = serde_json::from_value(value).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_apply_keeps_identity() {
        let now = Utc::now();
        let mut record = GameConfig::from_draft(
            "id-1",
            GameConfigDraft {
                game_name: "Old".into(),
                game_rtp: 0.9,
                reel_strips: vec![sample_reel()],
            },
            now,
        );
        record.apply(GameConfigDraft {
            game_name: "New".into(),
            game_rtp: 0.95,
            reel_strips: Vec::new(),
        });

        assert_eq!(record.id, "id-1");
        assert_eq!(record.created_at, now);
        assert_eq!(record.game_name, "New");
        assert!(record.reel_strips.is_empty());
    }

    #[test]
    fn test_raw_accepts_legacy_reel_name() {
        let raw = RawGameConfig::from_value(json!({
            "gameName": "Legacy",
            "gameRtp": "0.9",
            "reelName": [{ "reelOne": { "L1": "1" } }]
        }))
        .unwrap();
        assert!(raw.reel_strips.is_some());
    }

    #[test]
    fn test_update_request_object_id_alias() {
        let req = RawUpdateRequest::from_json(
            r#"{ "objectId": "xyz", "gameName": "G", "gameRtp": 0.9, "reelStrips": [] }"#,
        )
        .unwrap();
        assert_eq!(req.id, "xyz");
        assert_eq!(req.fields.game_name, Some(json!("G")));
    }
}
