//! # rf-game-config — Slot game configuration records
//!
//! Validates, normalizes and persists game configs: identity, target RTP and
//! per-reel symbol weight tables. Client input is loosely typed (weights may
//! arrive as strings); everything stored is strictly numeric.
//!
//! ## Architecture
//!
//! ```text
//! GameConfigService (create / update / get / fetch by name)
//!     │
//!     ├── GameConfigValidator ── gameName, gameRtp
//!     │       └── normalize_reel_strips ── ordered reel list
//!     │               └── normalize_reel ── one reel's symbol table
//!     │                       └── coerce_number ── every scalar
//!     │
//!     └── ConfigStore (MemoryConfigStore, JsonFileStore)
//! ```
//!
//! Any validation failure aborts the whole operation before the store is
//! touched.

pub mod coerce;
pub mod config;
pub mod error;
pub mod model;
pub mod normalize;
pub mod service;
pub mod store;
pub mod validate;

pub use coerce::*;
pub use config::*;
pub use error::*;
pub use model::*;
pub use normalize::*;
pub use service::*;
pub use store::*;
pub use validate::*;
