//! Card image cache: one PNG file per multiverse id.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::debug;
use tempfile::NamedTempFile;

use super::CacheConfig;
use crate::cards::MultiverseId;
use crate::error::TrackerResult;

/// Encoded image bytes plus the file they live in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpriteData {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

/// Card images stored as `<images_dir>/<multiverse_id>.png`.
///
/// Cheap to clone; clones share the same directory. Fetch workers write
/// through a clone while the browser reads through another.
#[derive(Clone, Debug)]
pub struct ImageCache {
    dir: PathBuf,
}

impl ImageCache {
    /// Open the image cache, creating its directory if needed.
    pub fn open(config: &CacheConfig) -> TrackerResult<Self> {
        let dir = config.images_dir();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File path for a card's image.
    #[must_use]
    pub fn sprite_path(&self, id: MultiverseId) -> PathBuf {
        self.dir.join(format!("{}.png", id))
    }

    /// Check whether a card's image is cached.
    #[must_use]
    pub fn contains(&self, id: MultiverseId) -> bool {
        self.sprite_path(id).is_file()
    }

    /// Store a card's image.
    ///
    /// Each call writes its own temporary file and renames it into place,
    /// so `contains` never sees a half-written file and concurrent saves
    /// of one id do not collide.
    pub fn save(&self, id: MultiverseId, bytes: &[u8]) -> TrackerResult<SpriteData> {
        let path = self.sprite_path(id);
        let mut partial = NamedTempFile::new_in(&self.dir)?;
        partial.write_all(bytes)?;
        partial.persist(&path).map_err(|err| err.error)?;
        debug!("cached image for {} ({} bytes)", id, bytes.len());
        Ok(SpriteData {
            path,
            bytes: bytes.to_vec(),
        })
    }

    /// Read a cached image.
    pub fn load(&self, id: MultiverseId) -> TrackerResult<SpriteData> {
        let path = self.sprite_path(id);
        let bytes = fs::read(&path)?;
        Ok(SpriteData { path, bytes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TrackerError;

    #[test]
    fn test_save_contains_load() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ImageCache::open(&CacheConfig::default().with_root(dir.path())).unwrap();
        let id = MultiverseId::new(386616);

        assert!(!cache.contains(id));
        let saved = cache.save(id, b"png-bytes").unwrap();
        assert!(cache.contains(id));
        assert_eq!(saved.path, dir.path().join("images").join("386616.png"));

        let loaded = cache.load(id).unwrap();
        assert_eq!(loaded, saved);

        // Only the image itself is left behind
        let files: Vec<_> = fs::read_dir(cache.dir()).unwrap().collect();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_concurrent_saves_of_one_id() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ImageCache::open(&CacheConfig::default().with_root(dir.path())).unwrap();
        let id = MultiverseId::new(77);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = cache.clone();
                std::thread::spawn(move || {
                    (0..25).all(|_| cache.save(id, b"same-image").is_ok())
                })
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }

        assert_eq!(cache.load(id).unwrap().bytes, b"same-image");
        assert_eq!(fs::read_dir(cache.dir()).unwrap().count(), 1);
    }

    #[test]
    fn test_load_missing_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ImageCache::open(&CacheConfig::default().with_root(dir.path())).unwrap();
        assert!(matches!(cache.load(MultiverseId::new(1)), Err(TrackerError::Io(_))));
    }
}
