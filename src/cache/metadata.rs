//! Card metadata cache.
//!
//! Remembers the card data the catalog returned, keyed by multiverse id,
//! so cards seen before can be shown without asking the catalog again.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, info};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::CacheConfig;
use crate::cards::{CardData, MultiverseId};
use crate::error::TrackerResult;

#[derive(Default, Serialize, Deserialize)]
struct MetadataFile {
    cards: Vec<CardData>,
}

/// Card data by multiverse id, persisted as one JSON file.
#[derive(Clone, Debug)]
pub struct MetadataCache {
    path: PathBuf,
    cards: FxHashMap<MultiverseId, CardData>,
    dirty: bool,
}

impl MetadataCache {
    /// Open the metadata cache. A missing file is an empty cache.
    pub fn open(config: &CacheConfig) -> TrackerResult<Self> {
        let path = config.metadata_path();
        let file: MetadataFile = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text)?,
            Err(err) if err.kind() == ErrorKind::NotFound => MetadataFile::default(),
            Err(err) => return Err(err.into()),
        };

        let cards = file
            .cards
            .into_iter()
            .filter_map(|card| card.multiverse_id().map(|id| (id, card)))
            .collect::<FxHashMap<_, _>>();
        debug!("metadata cache holds {} cards", cards.len());

        Ok(Self {
            path,
            cards,
            dirty: false,
        })
    }

    #[must_use]
    pub fn get(&self, id: MultiverseId) -> Option<&CardData> {
        self.cards.get(&id)
    }

    /// Remember a card. Returns `false` if it was already cached unchanged.
    ///
    /// Fails with `InvalidArgument` if the card has no identifier.
    pub fn insert(&mut self, card: &CardData) -> TrackerResult<bool> {
        let id = card.require_id()?;
        if self.cards.get(&id) == Some(card) {
            return Ok(false);
        }
        self.cards.insert(id, card.clone());
        self.dirty = true;
        Ok(true)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the cache if anything changed since it was opened or last saved.
    pub fn save(&mut self) -> TrackerResult<()> {
        if !self.dirty {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut cards: Vec<_> = self.cards.iter().collect();
        cards.sort_by_key(|(id, _)| **id);
        let file = MetadataFile {
            cards: cards.into_iter().map(|(_, card)| card.clone()).collect(),
        };
        fs::write(&self.path, serde_json::to_string(&file)?)?;
        self.dirty = false;
        info!("saved {} cards to {}", self.cards.len(), self.path.display());
        Ok(())
    }
}
