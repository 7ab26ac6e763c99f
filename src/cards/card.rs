//! Card data as delivered by the card catalog.
//!
//! `CardData` is an opaque JSON object: the tracker never interprets most
//! of its fields and writes them back to disk verbatim. The only field it
//! depends on is the catalog identifier, `multiverse_id`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{TrackerError, TrackerResult};

/// Field holding the catalog identifier.
pub const MULTIVERSE_ID_FIELD: &str = "multiverse_id";

/// Spelling of the identifier field used by the raw catalog API.
const MULTIVERSE_ID_ALIAS: &str = "multiverseid";

/// Catalog identifier of a card printing.
///
/// Two cards with the same `MultiverseId` are the same collection entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MultiverseId(pub u64);

impl MultiverseId {
    /// Create a new multiverse ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for MultiverseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Attributes of one card (name, identifier, set, rarity, text, image url...).
///
/// ## Example
///
/// ```
/// use collection_tracker::cards::{CardData, MultiverseId};
///
/// let bolt = CardData::new()
///     .with_field("name", "Lightning Bolt")
///     .with_field("multiverse_id", 209u64)
///     .with_field("rarity", "Common");
///
/// assert_eq!(bolt.multiverse_id(), Some(MultiverseId::new(209)));
/// assert_eq!(bolt.name(), "Lightning Bolt");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardData(Map<String, Value>);

impl CardData {
    /// Create an empty card.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a JSON value. Fails unless the value is an object.
    pub fn from_value(value: Value) -> TrackerResult<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(TrackerError::InvalidArgument(format!(
                "card data must be a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Add a field (builder pattern).
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Set a field, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Get a raw field value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Get a field rendered as text.
    ///
    /// Strings are returned as-is, numbers and booleans are formatted.
    /// Null, arrays and objects yield `None`.
    #[must_use]
    pub fn get_text(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// The card's catalog identifier, if it carries one.
    ///
    /// Accepts an integer or a numeric string under `multiverse_id` or the
    /// catalog's `multiverseid` spelling. Some catalog entries have none.
    #[must_use]
    pub fn multiverse_id(&self) -> Option<MultiverseId> {
        [MULTIVERSE_ID_FIELD, MULTIVERSE_ID_ALIAS]
            .iter()
            .filter_map(|key| self.0.get(*key))
            .find_map(|value| match value {
                Value::Number(n) => n.as_u64(),
                Value::String(s) => s.trim().parse().ok(),
                _ => None,
            })
            .map(MultiverseId)
    }

    /// Like [`multiverse_id`](Self::multiverse_id) but fails with
    /// `InvalidArgument` when the identifier is missing.
    pub fn require_id(&self) -> TrackerResult<MultiverseId> {
        self.multiverse_id().ok_or_else(|| {
            TrackerError::InvalidArgument(format!(
                "card '{}' has no {}",
                self.name(),
                MULTIVERSE_ID_FIELD
            ))
        })
    }

    /// Card name, or an empty string.
    #[must_use]
    pub fn name(&self) -> &str {
        self.0.get("name").and_then(Value::as_str).unwrap_or("")
    }

    /// Underlying JSON object.
    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the card has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for CardData {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<CardData> for Value {
    fn from(card: CardData) -> Self {
        Value::Object(card.0)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
