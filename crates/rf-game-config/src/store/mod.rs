//! Config Store — persistence collaborator for game config records
//!
//! The store owns identity and timestamps: `create` assigns the id and stamps
//! `createdAt`/`updatedAt`, `save` overwrites client fields and bumps
//! `updatedAt`. No multi-record transaction is offered; concurrent saves to the
//! same id are last-write-wins.

use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::error::StoreError;
use crate::model::{GameConfig, GameConfigDraft};

mod json_file;
mod memory;

pub use json_file::*;
pub use memory::*;

/// Per-record CRUD over game config documents
pub trait ConfigStore: Send + Sync {
    /// Fetch one record, `None` if absent
    fn find_by_id(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<GameConfig>, StoreError>> + Send;

    /// All records with an exact `gameName` match, oldest first
    fn find_by_name(
        &self,
        game_name: &str,
    ) -> impl Future<Output = Result<Vec<GameConfig>, StoreError>> + Send;

    /// Persist a new record and return it with id and timestamps
    fn create(
        &self,
        draft: GameConfigDraft,
    ) -> impl Future<Output = Result<GameConfig, StoreError>> + Send;

    /// Overwrite an existing record; `StoreError::Missing` if it is gone
    fn save(
        &self,
        record: GameConfig,
    ) -> impl Future<Output = Result<GameConfig, StoreError>> + Send;
}

impl<S: ConfigStore> ConfigStore for Arc<S> {
    fn find_by_id(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<GameConfig>, StoreError>> + Send {
        (**self).find_by_id(id)
    }

    fn find_by_name(
        &self,
        game_name: &str,
    ) -> impl Future<Output = Result<Vec<GameConfig>, StoreError>> + Send {
        (**self).find_by_name(game_name)
    }

    fn create(
        &self,
        draft: GameConfigDraft,
    ) -> impl Future<Output = Result<GameConfig, StoreError>> + Send {
        (**self).create(draft)
    }

    fn save(
        &self,
        record: GameConfig,
    ) -> impl Future<Output = Result<GameConfig, StoreError>> + Send {
        (**self).save(record)
    }
}

/// Fresh record id (32 hex chars)
pub fn new_record_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// `updatedAt` for a save: now, never earlier than the stored value
fn next_updated_at(previous: DateTime<Utc>) -> DateTime<Utc> {
    Utc::now().max(previous)
}
