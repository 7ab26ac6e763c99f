//! Tracker configuration.
//!
//! Applications build a `TrackerConfig` at startup, either in code with the
//! `with_*` builders or from a JSON file. Missing keys in a file fall back
//! to the defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cache::CacheConfig;
use crate::error::TrackerResult;

/// Card tile geometry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Space around each tile, in pixels.
    pub padding: f64,

    /// Tile width in pixels.
    pub tile_width: f64,

    /// Tile height in pixels.
    pub tile_height: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            padding: 5.0,
            tile_width: 223.0,
            tile_height: 310.0,
        }
    }
}

/// Everything the tracker needs to know at startup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Disk cache locations.
    pub cache: CacheConfig,

    /// Tile size and spacing.
    pub grid: GridConfig,

    /// Number of image fetch worker threads.
    pub fetch_workers: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default(),
            grid: GridConfig::default(),
            fetch_workers: 4,
        }
    }
}

impl TrackerConfig {
    /// Read a JSON config file.
    pub fn from_file(path: impl AsRef<Path>) -> TrackerResult<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Create a new config with a custom cache root.
    #[must_use]
    pub fn with_cache_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.cache = self.cache.with_root(root);
        self
    }

    /// Create a new config with a custom tile size.
    #[must_use]
    pub fn with_tile_size(mut self, width: f64, height: f64) -> Self {
        self.grid.tile_width = width;
        self.grid.tile_height = height;
        self
    }

    /// Create a new config with custom tile padding.
    #[must_use]
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.grid.padding = padding;
        self
    }

    /// Create a new config with a custom worker count.
    #[must_use]
    pub fn with_fetch_workers(mut self, workers: usize) -> Self {
        self.fetch_workers = workers;
        self
    }
}
