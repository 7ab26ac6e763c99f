//! Cache locations.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Directory name under the user's cache home.
pub const APP_CACHE_DIR: &str = "magic-collection-tracker";

/// Where the disk caches live.
///
/// Passed explicitly to every cache; nothing in the crate reads cache
/// paths from global state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Cache root. Images go in `<root>/images`, card metadata in
    /// `<root>/api-cache.json`.
    pub root: PathBuf,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            root: default_cache_home().join(APP_CACHE_DIR),
        }
    }
}

impl CacheConfig {
    /// Use a custom cache root.
    #[must_use]
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory of cached card images.
    #[must_use]
    pub fn images_dir(&self) -> PathBuf {
        self.root.join("images")
    }

    /// File holding cached card metadata.
    #[must_use]
    pub fn metadata_path(&self) -> PathBuf {
        self.root.join("api-cache.json")
    }
}

/// `$XDG_CACHE_HOME`, else `~/.cache`, else the system temp directory.
fn default_cache_home() -> PathBuf {
    std::env::var_os("XDG_CACHE_HOME")
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|home| home.join(".cache")))
        .unwrap_or_else(std::env::temp_dir)
}
