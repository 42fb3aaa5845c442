//! Config Upsert Orchestrator
//!
//! Create and update are separate paths. Each validates the whole field set
//! before its single store write; any error leaves stored state untouched.
//! Updates carry no version token, so concurrent updates to one id are
//! last-write-wins.

use crate::error::{GameConfigError, GameConfigResult, StoreError, ValidationError};
use crate::model::{GameConfig, GameConfigDraft, RawGameConfig};
use crate::store::ConfigStore;
use crate::validate::{GAME_NAME_FIELD, GameConfigValidator};

/// Game config operations over an injected store
#[derive(Debug)]
pub struct GameConfigService<S> {
    store: S,
    validator: GameConfigValidator,
}

impl<S: ConfigStore> GameConfigService<S> {
    /// Service with default validation settings
    pub fn new(store: S) -> Self {
        Self::with_validator(store, GameConfigValidator::default())
    }

    pub fn with_validator(store: S, validator: GameConfigValidator) -> Self {
        Self { store, validator }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn validator(&self) -> &GameConfigValidator {
        &self.validator
    }

    /// Validate and persist a new record
    pub async fn create_game_config(&self, raw: &RawGameConfig) -> GameConfigResult<GameConfig> {
        let draft = self.validate(raw)?;

        let record = self
            .store
            .create(draft)
            .await
            .map_err(|e| persistence_failure("create", None, e))?;

        log::info!(
            "[GameConfig] created {} '{}' ({} reels)",
            record.id,
            record.game_name,
            record.reel_strips.len()
        );
        Ok(record)
    }

    /// Replace every client field of an existing record
    pub async fn update_game_config(&self, id: &str, raw: &RawGameConfig) -> GameConfigResult<GameConfig> {
        let mut record = self.require(id).await?;
        let draft = self.validate(raw)?;
        record.apply(draft);

        let saved = match self.store.save(record).await {
            Ok(saved) => saved,
            Err(StoreError::Missing(_)) => return Err(not_found(id)),
            Err(e) => return Err(persistence_failure("save", Some(id), e)),
        };

        log::info!(
            "[GameConfig] updated {} '{}' ({} reels)",
            saved.id,
            saved.game_name,
            saved.reel_strips.len()
        );
        Ok(saved)
    }

    /// Fetch one record by id
    pub async fn get_game_config(&self, id: &str) -> GameConfigResult<GameConfig> {
        self.require(id).await
    }

    /// Every record registered under `game_name`; empty if none
    pub async fn fetch_game_rtp_data(&self, game_name: &str) -> GameConfigResult<Vec<GameConfig>> {
        if game_name.is_empty() {
            let err = ValidationError::required(GAME_NAME_FIELD);
            log::warn!("[GameConfig] lookup rejected: {}", err);
            return Err(err.into());
        }

        let records = self
            .store
            .find_by_name(game_name)
            .await
            .map_err(|e| persistence_failure("find_by_name", None, e))?;

        log::debug!("[GameConfig] '{}' matched {} records", game_name, records.len());
        Ok(records)
    }

    fn validate(&self, raw: &RawGameConfig) -> GameConfigResult<GameConfigDraft> {
        match self.validator.validate(raw) {
            Ok(draft) => {
                log::debug!(
                    "[GameConfig] validated '{}' rtp={} reels={}",
                    draft.game_name,
                    draft.game_rtp,
                    draft.reel_strips.len()
                );
                Ok(draft)
            }
            Err(err) => {
                log::warn!("[GameConfig] rejected: {} ({})", err.field, err.reason);
                Err(err.into())
            }
        }
    }

    async fn require(&self, id: &str) -> GameConfigResult<GameConfig> {
        self.store
            .find_by_id(id)
            .await
            .map_err(|e| persistence_failure("find_by_id", Some(id), e))?
            .ok_or_else(|| not_found(id))
    }
}

fn not_found(id: &str) -> GameConfigError {
    log::warn!("[GameConfig] {} not found", id);
    GameConfigError::NotFound { id: id.to_string() }
}

fn persistence_failure(op: &str, id: Option<&str>, cause: StoreError) -> GameConfigError {
    log::error!("[GameConfig] store {} failed for {}: {}", op, id.unwrap_or("new record"), cause);
    GameConfigError::Persistence { cause }
}
