//! Sub-resource aggregators
//!
//! Each aggregator issues its own queries for one part of an entity
//! (images, texts, tables, price...) and merges local and reference data.
//! Builders run them concurrently and isolate their failures with
//! [`crate::context::degrade`].

pub mod buttons;
pub mod certifications;
pub mod definitions;
pub mod documents;
pub mod images;
pub mod linked;
pub mod price;
pub mod relations;
pub mod rich_text;
pub mod sku_options;
pub mod status;
pub mod technical;
pub mod texts;

pub use linked::{LinkedResolver, linked_ids};
pub use rich_text::parse_rich_text;
