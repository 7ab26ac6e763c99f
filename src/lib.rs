//! # collection-tracker
//!
//! Core of a trading-card collection tracker: the owned-cards ledger and
//! the paged card-grid layout, plus the caches and background fetching
//! that feed the grid with card images.
//!
//! ## Design Principles
//!
//! 1. **Toolkit-Agnostic**: No GUI types. Drawing goes through the
//!    `Surface` trait, input arrives as `InputEvent`s.
//!
//! 2. **Explicit Persistence**: The collection only touches disk on
//!    `save`, `save_as` and `load`.
//!
//! 3. **Configuration Over Globals**: Cache locations, tile geometry and
//!    worker counts come from `TrackerConfig`, passed in by the caller.
//!
//! ## Architecture
//!
//! - **Capability Traits**: Tiles implement `HasBounds`, `Draw` and
//!   `HandleEvent`; the grid works with anything that has all three.
//!
//! - **Message Passing**: Image fetches run on worker threads; results come
//!   back over a channel polled without blocking. There is no
//!   cancellation; stale results are recognised by generation and dropped.
//!
//! ## Modules
//!
//! - `cards`: Card data, multiverse ids, query parsing, `CardSearch`
//! - `collection`: The owned-cards store and its JSON file
//! - `layout`: Geometry, tiles, and the paged grid
//! - `cache`: Image and metadata caches
//! - `fetch`: Background image fetch pool
//! - `browser`: Search results shown in a grid
//! - `config`: Startup configuration
//! - `error`: Crate error type

pub mod browser;
pub mod cache;
pub mod cards;
pub mod collection;
pub mod config;
pub mod error;
pub mod fetch;
pub mod layout;

// Re-export commonly used types
pub use crate::error::{TrackerError, TrackerResult};

pub use crate::config::{GridConfig, TrackerConfig};

pub use crate::cards::{
    CardData, CardSearch, MultiverseId,
    SearchField, SearchFilter, SearchQuery,
};

pub use crate::collection::{CollectionEntry, CollectionStore};

pub use crate::layout::{
    CardTile, Draw, HandleEvent, HasBounds, ImageHandle, InputEvent,
    MouseButton, PageItem, PagedGrid, PreciseRect, Surface, TileAction, TileKind,
};

pub use crate::cache::{CacheConfig, ImageCache, MetadataCache, SpriteData};

pub use crate::fetch::{FetchPool, FetchResult, FetchTask, ImageFetcher};

pub use crate::browser::CardBrowser;
