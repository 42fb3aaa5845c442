//! In-memory store

use chrono::Utc;
use indexmap::IndexMap;
use parking_lot::RwLock;

use super::{ConfigStore, new_record_id, next_updated_at};
use crate::error::StoreError;
use crate::model::{GameConfig, GameConfigDraft};

/// Records kept in insertion order behind a `parking_lot` lock
///
/// The lock is only taken inside synchronous sections, never across an await.
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    records: RwLock<IndexMap<String, GameConfig>>,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Copy of every record, in creation order
    pub fn snapshot(&self) -> Vec<GameConfig> {
        self.records.read().values().cloned().collect()
    }
}

impl ConfigStore for MemoryConfigStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<GameConfig>, StoreError> {
        Ok(self.records.read().get(id).cloned())
    }

    async fn find_by_name(&self, game_name: &str) -> Result<Vec<GameConfig>, StoreError> {
        Ok(self
            .records
            .read()
            .values()
            .filter(|r| r.game_name == game_name)
            .cloned()
            .collect())
    }

    async fn create(&self, draft: GameConfigDraft) -> Result<GameConfig, StoreError> {
        let record = GameConfig::from_draft(new_record_id(), draft, Utc::now());

        let mut records = self.records.write();
        if records.contains_key(&record.id) {
            return Err(StoreError::Duplicate(record.id));
        }
        records.insert(record.id.clone(), record.clone());
        log::debug!("[ConfigStore] created {} in memory", record.id);
        Ok(record)
    }

    async fn save(&self, mut record: GameConfig) -> Result<GameConfig, StoreError> {
        let mut records = self.records.write();
        let stored = records
            .get_mut(&record.id)
            .ok_or_else(|| StoreError::Missing(record.id.clone()))?;

        record.created_at = stored.created_at;
        record.updated_at = next_updated_at(stored.updated_at);
        *stored = record.clone();
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ReelEntry;

    fn draft(name: &str) -> GameConfigDraft {
        GameConfigDraft {
            game_name: name.to_string(),
            game_rtp: 0.96,
            reel_strips: vec![ReelEntry::new("reelOne", [("L1", 5.0)].into_iter().collect())],
        }
    }

    #[tokio::test]
    async fn test_create_assigns_identity() {
        let store = MemoryConfigStore::new();
        let a = store.create(draft("A")).await.unwrap();
        let b = store.create(draft("B")).await.unwrap();

        assert_eq!(a.id.len(), 32);
        assert_ne!(a.id, b.id);
        assert_eq!(a.created_at, a.updated_at);
        assert_eq!(store.len(), 2);
        assert_eq!(store.find_by_id(&a.id).await.unwrap(), Some(a));
    }

    #[tokio::test]
    async fn test_save_keeps_created_at() {
        let store = MemoryConfigStore::new();
        let created = store.create(draft("A")).await.unwrap();

        let mut edited = created.clone();
        edited.game_name = "A2".into();
        edited.created_at = Utc::now() + chrono::Duration::days(1);
        let saved = store.save(edited).await.unwrap();

        assert_eq!(saved.created_at, created.created_at);
        assert!(saved.updated_at >= created.updated_at);
        assert_eq!(store.find_by_id(&created.id).await.unwrap().unwrap().game_name, "A2");
    }

    #[tokio::test]
    async fn test_save_missing_record() {
        let store = MemoryConfigStore::new();
        let orphan = GameConfig::from_draft("ghost", draft("A"), Utc::now());
        assert!(matches!(store.save(orphan).await, Err(StoreError::Missing(id)) if id == "ghost"));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_find_by_name() {
        let store = MemoryConfigStore::new();
        let first = store.create(draft("Tiger")).await.unwrap();
        store.create(draft("Dragon")).await.unwrap();
        let second = store.create(draft("Tiger")).await.unwrap();

        let found = store.find_by_name("Tiger").await.unwrap();
        let ids: Vec<_> = found.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec![first.id.as_str(), second.id.as_str()]);
        assert!(store.find_by_name("tiger").await.unwrap().is_empty());
    }
}
