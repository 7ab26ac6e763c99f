//! The owned-cards collection.
//!
//! ## Key Types
//!
//! - `CollectionEntry`: One card plus its owned count
//! - `CollectionStore`: The ledger, with JSON load/save
//!
//! ## File Format
//!
//! ```text
//! { "collection": [
//!     { "card_data": { ...card fields... },
//!       "collection_data": { "owned": 2 } }
//! ] }
//! ```
//!
//! A missing file loads as `{ "collection": [] }`.

pub mod entry;
pub mod store;

pub use entry::CollectionEntry;
pub use store::CollectionStore;
