//! Card data and card search.
//!
//! ## Key Types
//!
//! - `MultiverseId`: Catalog identifier of a card printing
//! - `CardData`: Opaque card attributes as delivered by the catalog
//! - `SearchQuery`: Parsed `field:value` query
//! - `CardSearch`: Anything that can answer a query with cards
//!
//! The external card catalog and the local collection both implement
//! `CardSearch`, so a browser can page through either one.

pub mod card;
pub mod query;

pub use card::{CardData, MultiverseId, MULTIVERSE_ID_FIELD};
pub use query::{SearchField, SearchFilter, SearchQuery, MYTHIC_CATALOG_RARITY};

use crate::error::TrackerResult;

/// A source of cards that can be searched with query text.
///
/// Implemented by [`CollectionStore`](crate::collection::CollectionStore)
/// for the local collection. The online catalog client lives outside this
/// crate and implements the same trait.
pub trait CardSearch {
    /// Return every card matching `query`.
    ///
    /// A query with no matches returns an empty list, not an error.
    fn search_cards(&self, query: &str) -> TrackerResult<Vec<CardData>>;
}

/// Sort cards by name, keeping the source order of equal names.
pub fn sort_by_name(cards: &mut [CardData]) {
    cards.sort_by(|a, b| a.name().cmp(b.name()));
}
