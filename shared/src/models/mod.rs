//! Public entity models
//!
//! Read-only projections assembled by the engine. Field names serialize in
//! camelCase.

pub mod assets;
pub mod attribute;
pub mod category;
pub mod entity;
pub mod operating_mode;
pub mod product;
pub mod rich_text;
pub mod section;
pub mod sku;

// Re-exports
pub use assets::*;
pub use attribute::*;
pub use category::*;
pub use entity::*;
pub use operating_mode::*;
pub use product::*;
pub use rich_text::*;
pub use section::*;
pub use sku::*;
