//! Disk caches for card images and card metadata.
//!
//! ## Layout
//!
//! ```text
//! <root>/images/<multiverse_id>.png
//! <root>/api-cache.json
//! ```
//!
//! `<root>` comes from a [`CacheConfig`] handed to each cache when it is
//! opened.

pub mod config;
pub mod images;
pub mod metadata;

pub use config::{CacheConfig, APP_CACHE_DIR};
pub use images::{ImageCache, SpriteData};
pub use metadata::MetadataCache;
