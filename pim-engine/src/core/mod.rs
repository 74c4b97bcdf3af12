//! Core types: configuration and errors

pub mod config;
pub mod error;

pub use config::{Config, DatabaseConfig, ElasticConfig};
pub use error::{EngineError, EngineResult, StoreError, StoreResult};
