//! Crate error type.

use thiserror::Error;

/// Errors produced by the collection store, the grid layout, and the cache.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Input lacked the required card shape or catalog identifier.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// `save()` was called before any path was bound with `save_as`.
    #[error("no file path set for collection; use save_as")]
    NoFilePathSet,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A persisted collection parsed as JSON but breaks a store invariant.
    #[error("corrupt collection file: {0}")]
    CorruptCollection(String),

    /// Tiles handed to a grid were not all the same size.
    #[error("tile {index} is {found_width}x{found_height}, expected {expected_width}x{expected_height}")]
    MixedTileSizes {
        index: usize,
        expected_width: f64,
        expected_height: f64,
        found_width: f64,
        found_height: f64,
    },

    /// A page start index beyond the end of the backing sequence.
    #[error("start index {start} out of range for {len} items")]
    StartOutOfRange { start: usize, len: usize },

    /// The image fetcher failed for a card.
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// The fetch pool has been shut down.
    #[error("fetch pool is closed")]
    PoolClosed,
}

/// Result alias used throughout the crate.
pub type TrackerResult<T> = Result<T, TrackerError>;
