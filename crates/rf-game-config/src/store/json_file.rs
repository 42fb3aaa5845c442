//! JSON file store — one pretty-printed document per record
//!
//! Layout: `<dir>/<id>.json`. Writes go to a unique temp file in the same
//! directory and are renamed into place, so readers never see a torn record.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;

use super::{ConfigStore, new_record_id, next_updated_at};
use crate::error::StoreError;
use crate::model::{GameConfig, GameConfigDraft};

const RECORD_EXT: &str = "json";

/// Directory-backed store
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open (and create if needed) a store directory
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        log::debug!("[ConfigStore] opened {}", dir.display());
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Record path, or `None` if the id could escape the directory
    fn record_path(&self, id: &str) -> Option<PathBuf> {
        let safe = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        safe.then(|| self.dir.join(format!("{id}.{RECORD_EXT}")))
    }

    async fn read_record(path: &Path) -> Result<Option<GameConfig>, StoreError> {
        match tokio::fs::read(path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_record(&self, path: &Path, record: &GameConfig) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(record)?;
        let tmp = self
            .dir
            .join(format!(".{}.{}.tmp", record.id, new_record_id()));

        tokio::fs::write(&tmp, &json).await?;
        if let Err(e) = tokio::fs::rename(&tmp, path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }

    /// Every readable record in the directory, oldest first; undecodable
    /// documents are logged and skipped
    pub async fn load_all(&self) -> Result<Vec<GameConfig>, StoreError> {
        let mut records = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_record = path.extension().is_some_and(|e| e == RECORD_EXT)
                && !entry.file_name().to_string_lossy().starts_with('.');
            if !is_record {
                continue;
            }
            match Self::read_record(&path).await {
                Ok(Some(record)) => records.push(record),
                Ok(None) => {}
                Err(StoreError::Serialization(e)) => {
                    log::warn!("[ConfigStore] skipping unreadable record {}: {}", path.display(), e);
                }
                Err(e) => return Err(e),
            }
        }

        records.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(records)
    }
}

impl ConfigStore for JsonFileStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<GameConfig>, StoreError> {
        match self.record_path(id) {
            Some(path) => Self::read_record(&path).await,
            None => Ok(None),
        }
    }

    async fn find_by_name(&self, game_name: &str) -> Result<Vec<GameConfig>, StoreError> {
        let mut records = self.load_all().await?;
        records.retain(|r| r.game_name == game_name);
        Ok(records)
    }

    async fn create(&self, draft: GameConfigDraft) -> Result<GameConfig, StoreError> {
        let record = GameConfig::from_draft(new_record_id(), draft, Utc::now());
        let path = self
            .record_path(&record.id)
            .ok_or_else(|| StoreError::Backend(format!("unusable record id {}", record.id)))?;

        if tokio::fs::try_exists(&path).await? {
            return Err(StoreError::Duplicate(record.id));
        }

        self.write_record(&path, &record).await?;
        log::debug!("[ConfigStore] wrote {}", path.display());
        Ok(record)
    }

    async fn save(&self, mut record: GameConfig) -> Result<GameConfig, StoreError> {
        let path = self
            .record_path(&record.id)
            .ok_or_else(|| StoreError::Missing(record.id.clone()))?;
        let stored = Self::read_record(&path)
            .await?
            .ok_or_else(|| StoreError::Missing(record.id.clone()))?;

        record.created_at = stored.created_at;
        record.updated_at = next_updated_at(stored.updated_at);
        self.write_record(&path, &record).await?;
        Ok(record)
    }
}
