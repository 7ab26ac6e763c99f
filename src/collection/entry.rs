//! One owned card.

use serde::{Deserialize, Serialize};

use crate::cards::{CardData, MultiverseId};
use crate::error::TrackerResult;

/// A card in the collection and how many copies are owned.
#[derive(Clone, Debug, PartialEq)]
pub struct CollectionEntry {
    id: MultiverseId,
    card_data: CardData,
    owned: u32,
}

impl CollectionEntry {
    /// Create an entry owning one copy.
    ///
    /// Fails with `InvalidArgument` if the card has no catalog identifier.
    pub fn new(card_data: CardData) -> TrackerResult<Self> {
        Self::with_owned(card_data, 1)
    }

    pub(crate) fn with_owned(card_data: CardData, owned: u32) -> TrackerResult<Self> {
        let id = card_data.require_id()?;
        Ok(Self { id, card_data, owned })
    }

    #[must_use]
    pub fn id(&self) -> MultiverseId {
        self.id
    }

    #[must_use]
    pub fn card(&self) -> &CardData {
        &self.card_data
    }

    #[must_use]
    pub fn owned(&self) -> u32 {
        self.owned
    }

    pub(crate) fn increment(&mut self) {
        self.owned = self.owned.saturating_add(1);
    }

    /// Decrement, returning the new count. Never goes below zero.
    pub(crate) fn decrement(&mut self) -> u32 {
        self.owned = self.owned.saturating_sub(1);
        self.owned
    }
}

/// On-disk shape of the whole collection.
#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct CollectionFile {
    pub collection: Vec<StoredEntry>,
}

/// On-disk shape of one entry.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct StoredEntry {
    pub card_data: CardData,
    pub collection_data: CollectionData,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CollectionData {
    pub owned: u32,
}

impl From<&CollectionEntry> for StoredEntry {
    fn from(entry: &CollectionEntry) -> Self {
        Self {
            card_data: entry.card_data.clone(),
            collection_data: CollectionData { owned: entry.owned },
        }
    }
}
