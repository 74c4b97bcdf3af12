//! Shared types for the PIM engine
//!
//! Public entity models and the static locale/market catalog.

pub mod locale;
pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use locale::{GLOBAL_ENGLISH, LocaleCatalog, LocaleError};
pub use models::{Entity, EntityKind, ListFilters, Page};
