//! Search query parsing.
//!
//! Queries look like `name:bolt, rarity:common`. Each `field:value` pair
//! becomes a [`SearchFilter`]; a card matches a [`SearchQuery`] when every
//! filter's value is a case-insensitive substring of the card's field.
//!
//! Recognised fields (case-insensitive):
//! - `name`
//! - `mana-cost` (also `mc`)
//! - `cmc` (converted mana cost)
//! - `rarity`
//! - `text`
//!
//! Values run to the next comma or the end of the string and are trimmed.

use std::sync::OnceLock;

use log::warn;
use regex::Regex;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::card::CardData;

/// The catalog's name for mythic rarity.
pub const MYTHIC_CATALOG_RARITY: &str = "special";

/// A card field that can be searched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchField {
    Name,
    ManaCost,
    ConvertedManaCost,
    Rarity,
    Text,
}

impl SearchField {
    /// Parse a field name as written in a query.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "name" => Some(SearchField::Name),
            "mana-cost" | "mc" => Some(SearchField::ManaCost),
            "cmc" => Some(SearchField::ConvertedManaCost),
            "rarity" => Some(SearchField::Rarity),
            "text" => Some(SearchField::Text),
            _ => None,
        }
    }

    /// Card data keys this field is read from, in lookup order.
    #[must_use]
    pub fn card_keys(self) -> &'static [&'static str] {
        match self {
            SearchField::Name => &["name"],
            SearchField::ManaCost => &["mana_cost", "manaCost"],
            SearchField::ConvertedManaCost => &["cmc"],
            SearchField::Rarity => &["rarity"],
            SearchField::Text => &["text", "original_text", "originalText"],
        }
    }
}

impl std::fmt::Display for SearchField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SearchField::Name => "name",
            SearchField::ManaCost => "mana-cost",
            SearchField::ConvertedManaCost => "cmc",
            SearchField::Rarity => "rarity",
            SearchField::Text => "text",
        };
        f.write_str(name)
    }
}

/// One `field:value` pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilter {
    pub field: SearchField,
    pub value: String,
}

impl SearchFilter {
    /// Create a filter, applying the catalog's rarity naming.
    #[must_use]
    pub fn new(field: SearchField, value: impl Into<String>) -> Self {
        let mut value = value.into();
        if field == SearchField::Rarity && value.eq_ignore_ascii_case("mythic") {
            value = MYTHIC_CATALOG_RARITY.to_string();
        }
        Self { field, value }
    }

    /// Check whether a card's field contains this filter's value.
    #[must_use]
    pub fn matches(&self, card: &CardData) -> bool {
        let needle = self.value.to_lowercase();
        self.field
            .card_keys()
            .iter()
            .filter_map(|key| card.get_text(key))
            .any(|text| text.to_lowercase().contains(&needle))
    }
}

/// A parsed search query: the AND of its filters.
///
/// ## Example
///
/// ```
/// use collection_tracker::cards::{SearchField, SearchQuery};
///
/// let query = SearchQuery::parse("Name: Lightning , RARITY:mythic");
/// assert_eq!(query.get(SearchField::Name), Some("Lightning"));
/// assert_eq!(query.get(SearchField::Rarity), Some("special"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    filters: SmallVec<[SearchFilter; 4]>,
}

fn query_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)\b(name|mana-cost|mc|cmc|rarity|text)\s*:(.*?)(?:,|$)")
            .expect("query pattern is valid")
    })
}

impl SearchQuery {
    /// Create an empty query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse query text.
    ///
    /// Unrecognised text is skipped; empty values are ignored. A later
    /// filter on the same field replaces an earlier one.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut query = Self::new();
        for caps in query_pattern().captures_iter(text) {
            let Some(field) = SearchField::parse(&caps[1]) else {
                continue;
            };
            let value = caps[2].trim();
            if value.is_empty() {
                continue;
            }
            query.push(SearchFilter::new(field, value));
        }

        if query.is_empty() && !text.trim().is_empty() {
            warn!("search query {:?} has no recognised field:value pairs", text);
        }
        query
    }

    /// Add a filter (builder pattern).
    #[must_use]
    pub fn with(mut self, field: SearchField, value: impl Into<String>) -> Self {
        self.push(SearchFilter::new(field, value));
        self
    }

    fn push(&mut self, filter: SearchFilter) {
        self.filters.retain(|f| f.field != filter.field);
        self.filters.push(filter);
    }

    /// Value of the filter on `field`, if any.
    #[must_use]
    pub fn get(&self, field: SearchField) -> Option<&str> {
        self.filters
            .iter()
            .find(|f| f.field == field)
            .map(|f| f.value.as_str())
    }

    /// All filters, in query order.
    #[must_use]
    pub fn filters(&self) -> &[SearchFilter] {
        &self.filters
    }

    /// Check if no filters were parsed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Check whether a card satisfies every filter.
    ///
    /// An empty query matches nothing.
    #[must_use]
    pub fn matches(&self, card: &CardData) -> bool {
        !self.is_empty() && self.filters.iter().all(|f| f.matches(card))
    }
}
