//! PIM engine - entity resolution and aggregation over the product catalog
//!
//! # Architecture
//!
//! Builds read-only product, SKU, category and operating-mode projections
//! from a document store (catalog collections per language) and a
//! relational store (prices, unit mappings).
//!
//! ```text
//! pim-engine/src/
//! ├── core/          # config, errors
//! ├── store/         # gateways, query descriptors, ES / Postgres / memory
//! ├── attributes/    # fallback-chain attribute resolution
//! ├── aggregators/   # sub-resources (images, texts, tables, price, ...)
//! ├── builders/      # one builder per entity kind
//! ├── list.rs        # paged listing with bounded fan-out
//! ├── engine.rs      # facade
//! └── utils/         # logging
//! ```

pub mod aggregators;
pub mod attributes;
pub mod builders;
pub mod context;
pub mod core;
pub mod engine;
pub mod list;
pub mod records;
pub mod store;
pub mod utils;

// Re-exports
pub use context::{BuildScope, EngineContext};
pub use core::{Config, EngineError, EngineResult, StoreError, StoreResult};
pub use engine::Engine;
pub use store::{ElasticStore, MemoryDocumentStore, MemoryRelationalStore, PgRelationalStore};
pub use utils::init_logger;
