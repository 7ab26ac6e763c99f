//! The owned-cards ledger and its JSON file.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, info};
use rustc_hash::FxHashMap;

use super::entry::{CollectionEntry, CollectionFile, StoredEntry};
use crate::cards::{CardData, CardSearch, MultiverseId, SearchQuery};
use crate::error::{TrackerError, TrackerResult};
use crate::layout::TileAction;

/// A collection of owned cards, keyed by catalog identifier.
///
/// Mutations are in-memory only; call [`save`](Self::save) or
/// [`save_as`](Self::save_as) to persist. An entry is removed as soon as
/// its owned count drops to zero, so every stored entry owns at least one
/// copy.
///
/// ## Example
///
/// ```
/// use collection_tracker::cards::CardData;
/// use collection_tracker::collection::CollectionStore;
///
/// let mut store = CollectionStore::new();
/// let bolt = CardData::new()
///     .with_field("name", "Lightning Bolt")
///     .with_field("multiverse_id", 209u64);
///
/// store.add(&bolt).unwrap();
/// store.add(&bolt).unwrap();
/// store.remove(&bolt).unwrap();
/// assert_eq!(store.count(&bolt).unwrap(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CollectionStore {
    entries: Vec<CollectionEntry>,
    index: FxHashMap<MultiverseId, usize>,
    file_path: Option<PathBuf>,
}

impl CollectionStore {
    /// Create an empty collection with no file path.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a collection from `path` and bind the store to it.
    ///
    /// A missing file yields an empty collection. Malformed JSON, entries
    /// without an identifier, and duplicate identifiers are errors.
    pub fn load(path: impl AsRef<Path>) -> TrackerResult<Self> {
        let path = path.as_ref();
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!("no collection at {}, starting empty", path.display());
                let mut store = Self::new();
                store.file_path = Some(path.to_path_buf());
                return Ok(store);
            }
            Err(err) => return Err(err.into()),
        };

        let file: CollectionFile = serde_json::from_str(&text)?;
        let mut store = Self::from_file(file)?;
        store.file_path = Some(path.to_path_buf());
        info!(
            "loaded {} entries ({} cards) from {}",
            store.len(),
            store.total_owned(),
            path.display()
        );
        Ok(store)
    }

    fn from_file(file: CollectionFile) -> TrackerResult<Self> {
        let mut store = Self::new();
        for (position, stored) in file.collection.into_iter().enumerate() {
            if stored.collection_data.owned == 0 {
                debug!("skipping zero-owned entry at position {}", position);
                continue;
            }
            let entry = CollectionEntry::with_owned(stored.card_data, stored.collection_data.owned)
                .map_err(|_| {
                    TrackerError::CorruptCollection(format!(
                        "entry {} has no multiverse_id",
                        position
                    ))
                })?;
            if store.index.contains_key(&entry.id()) {
                return Err(TrackerError::CorruptCollection(format!(
                    "duplicate entry for multiverse_id {}",
                    entry.id()
                )));
            }
            store.push(entry);
        }
        Ok(store)
    }

    fn push(&mut self, entry: CollectionEntry) {
        self.index.insert(entry.id(), self.entries.len());
        self.entries.push(entry);
    }

    /// Add one copy of `card`.
    pub fn add(&mut self, card: &CardData) -> TrackerResult<()> {
        let id = card.require_id()?;
        match self.index.get(&id) {
            Some(&position) => self.entries[position].increment(),
            None => self.push(CollectionEntry::new(card.clone())?),
        }
        Ok(())
    }

    /// Remove one copy of `card`. Removing an absent card does nothing.
    pub fn remove(&mut self, card: &CardData) -> TrackerResult<()> {
        let id = card.require_id()?;
        let Some(&position) = self.index.get(&id) else {
            return Ok(());
        };

        if self.entries[position].decrement() == 0 {
            self.entries.remove(position);
            self.index.remove(&id);
            for (i, entry) in self.entries.iter().enumerate().skip(position) {
                self.index.insert(entry.id(), i);
            }
        }
        Ok(())
    }

    /// Number of owned copies of `card`, zero if absent.
    pub fn count(&self, card: &CardData) -> TrackerResult<u32> {
        Ok(self.count_id(card.require_id()?))
    }

    /// Number of owned copies by identifier.
    #[must_use]
    pub fn count_id(&self, id: MultiverseId) -> u32 {
        self.get(id).map_or(0, CollectionEntry::owned)
    }

    /// Look up an entry by identifier.
    #[must_use]
    pub fn get(&self, id: MultiverseId) -> Option<&CollectionEntry> {
        self.index.get(&id).map(|&position| &self.entries[position])
    }

    /// Entries matching query text such as `name:bolt,rarity:common`.
    ///
    /// All filters must match. Text without recognised filters matches
    /// nothing.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&CollectionEntry> {
        self.search_query(&SearchQuery::parse(query))
    }

    /// Entries matching an already parsed query.
    #[must_use]
    pub fn search_query(&self, query: &SearchQuery) -> Vec<&CollectionEntry> {
        self.entries
            .iter()
            .filter(|entry| query.matches(entry.card()))
            .collect()
    }

    /// Apply a click action coming from a card tile.
    pub fn apply(&mut self, action: &TileAction) -> TrackerResult<()> {
        match action {
            TileAction::AddToCollection(card) => self.add(card),
            TileAction::RemoveFromCollection(card) => self.remove(card),
        }
    }

    /// Save to the bound file path.
    pub fn save(&self) -> TrackerResult<()> {
        let path = self.file_path.as_deref().ok_or(TrackerError::NoFilePathSet)?;
        self.write_to(path)
    }

    /// Save to `path` and bind the store to it for later `save()` calls.
    pub fn save_as(&mut self, path: impl Into<PathBuf>) -> TrackerResult<()> {
        let path = path.into();
        self.write_to(&path)?;
        self.file_path = Some(path);
        Ok(())
    }

    fn write_to(&self, path: &Path) -> TrackerResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = CollectionFile {
            collection: self.entries.iter().map(StoredEntry::from).collect(),
        };
        fs::write(path, serde_json::to_string_pretty(&file)?)?;
        info!("saved {} entries to {}", self.len(), path.display());
        Ok(())
    }

    /// The bound file path, if any.
    #[must_use]
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// All entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[CollectionEntry] {
        &self.entries
    }

    /// Number of distinct cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of owned counts over all entries.
    #[must_use]
    pub fn total_owned(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.owned())).sum()
    }
}

impl CardSearch for CollectionStore {
    fn search_cards(&self, query: &str) -> TrackerResult<Vec<CardData>> {
        Ok(self
            .search(query)
            .into_iter()
            .map(|entry| entry.card().clone())
            .collect())
    }
}
