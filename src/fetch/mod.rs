//! Background image fetching.
//!
//! Downloading a card image is slow, so it happens on worker threads.
//! The caller submits [`FetchTask`]s through a [`FetchPool`] and polls
//! finished [`FetchResult`]s with the non-blocking
//! [`FetchPool::try_receive`] from its own loop.
//!
//! ## No Cancellation
//!
//! Submitted tasks always run to completion. Each task is stamped with the
//! pool's current generation; callers that start a new search bump the
//! generation and ignore results stamped with an older one.

mod pool;

pub use pool::FetchPool;

use crate::cache::SpriteData;
use crate::cards::CardData;
use crate::error::TrackerResult;

/// Downloads the image for a card (the HTTP side lives outside this crate).
pub trait ImageFetcher: Send + Sync {
    /// Return the encoded image bytes for `card`.
    fn fetch(&self, card: &CardData) -> TrackerResult<Vec<u8>>;
}

/// One image to fetch.
#[derive(Clone, Debug)]
pub struct FetchTask {
    /// Pool generation at submit time.
    pub generation: u64,
    /// Caller-chosen slot, typically the tile index.
    pub index: usize,
    pub card: CardData,
}

/// A finished fetch.
#[derive(Debug)]
pub struct FetchResult {
    pub generation: u64,
    pub index: usize,
    pub card: CardData,
    /// The cached image, or why it could not be fetched.
    pub outcome: TrackerResult<SpriteData>,
}
