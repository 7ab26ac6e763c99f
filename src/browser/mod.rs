//! Card browser: search results shown as a paged grid of card images.
//!
//! The browser ties the pieces together:
//!
//! 1. Run a query against a [`CardSearch`] source (catalog or collection)
//! 2. Sort the cards by name
//! 3. Show cached images at once, placeholders for the rest
//! 4. Fetch missing images in the background
//! 5. [`poll`](CardBrowser::poll) from the UI loop to swap fetched images in
//!
//! Clicks on tiles come back as [`TileAction`]s which the caller applies to
//! a [`CollectionStore`].

use std::sync::Arc;

use log::{debug, info, warn};

use crate::cache::{ImageCache, MetadataCache};
use crate::cards::{sort_by_name, CardSearch, MultiverseId};
use crate::collection::CollectionStore;
use crate::config::TrackerConfig;
use crate::error::TrackerResult;
use crate::fetch::{FetchPool, ImageFetcher};
use crate::layout::{CardTile, ImageHandle, InputEvent, PagedGrid, PreciseRect, Surface, TileAction, TileKind};

/// One card-browsing screen.
#[derive(Debug)]
pub struct CardBrowser {
    grid: PagedGrid<CardTile>,
    images: ImageCache,
    metadata: Option<MetadataCache>,
    pool: FetchPool,
    kind: TileKind,
    tile_width: f64,
    tile_height: f64,
}

impl CardBrowser {
    /// Create a browser whose tiles act as `kind` (catalog or owned).
    pub fn new(
        config: &TrackerConfig,
        fetcher: Arc<dyn ImageFetcher>,
        viewport: PreciseRect,
        kind: TileKind,
    ) -> TrackerResult<Self> {
        let images = ImageCache::open(&config.cache)?;
        let pool = FetchPool::new(config.fetch_workers, fetcher, images.clone())?;
        Ok(Self {
            grid: PagedGrid::new(viewport, config.grid.padding),
            images,
            metadata: None,
            pool,
            kind,
            tile_width: config.grid.tile_width,
            tile_height: config.grid.tile_height,
        })
    }

    /// Record every card shown in a metadata cache (builder pattern).
    #[must_use]
    pub fn with_metadata_cache(mut self, cache: MetadataCache) -> Self {
        self.metadata = Some(cache);
        self
    }

    /// Search `source` and show the results from the first page.
    ///
    /// Cards without a multiverse id are skipped. Returns the number of
    /// tiles shown. Images still being fetched for a previous search are
    /// ignored when they arrive. If the search fails, the current page and
    /// its pending images are left as they are.
    pub fn load_cards(&mut self, source: &dyn CardSearch, query: &str) -> TrackerResult<usize> {
        let mut cards = source.search_cards(query)?;
        sort_by_name(&mut cards);

        let mut tiles = Vec::with_capacity(cards.len());
        let mut missing = Vec::new();
        for card in cards {
            let Some(id) = card.multiverse_id() else {
                debug!("skipping '{}': no multiverse_id", card.name());
                continue;
            };
            if let Some(metadata) = self.metadata.as_mut() {
                metadata.insert(&card)?;
            }

            let image = match self.cached_image(id) {
                Some(image) => image,
                None => {
                    missing.push((tiles.len(), card.clone()));
                    ImageHandle::placeholder()
                }
            };
            tiles.push(CardTile::new(self.tile_width, self.tile_height, image, self.kind).with_card(card));
        }

        let count = tiles.len();
        self.grid.set_items(tiles, 0)?;
        self.pool.next_generation();
        for (index, card) in missing {
            self.pool.submit(index, card)?;
        }
        info!(
            "query {:?}: {} cards, {} images pending",
            query,
            count,
            self.pool.in_flight()
        );
        Ok(count)
    }

    fn cached_image(&self, id: MultiverseId) -> Option<ImageHandle> {
        if !self.images.contains(id) {
            return None;
        }
        match self.images.load(id) {
            Ok(sprite) => Some(sprite.into()),
            Err(err) => {
                warn!("cached image for {} unreadable, refetching: {}", id, err);
                None
            }
        }
    }

    /// Swap in every image fetched since the last poll. Never blocks.
    ///
    /// Returns the number of tiles updated.
    pub fn poll(&mut self) -> usize {
        let generation = self.pool.generation();
        let mut updated = 0;
        while let Some(result) = self.pool.try_receive() {
            if result.generation != generation {
                debug!("dropping stale image for '{}'", result.card.name());
                continue;
            }
            match result.outcome {
                Ok(sprite) => {
                    if let Some(tile) = self.grid.get_mut(result.index) {
                        tile.set_image(sprite.into());
                        updated += 1;
                    }
                }
                Err(err) => warn!("no image for '{}': {}", result.card.name(), err),
            }
        }
        updated
    }

    /// Check if images are still being fetched.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.pool.is_busy()
    }

    pub fn next_page(&mut self) -> bool {
        self.grid.next_page()
    }

    pub fn prev_page(&mut self) -> bool {
        self.grid.prev_page()
    }

    pub fn resize(&mut self, viewport: PreciseRect) {
        self.grid.resize(viewport);
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        self.grid.render(surface);
    }

    /// Forward input to the visible tiles.
    pub fn dispatch_event(&mut self, event: &InputEvent) -> Vec<TileAction> {
        self.grid.dispatch_event(event)
    }

    /// Forward input and apply any resulting actions to `store`.
    ///
    /// Returns the number of actions applied.
    pub fn handle_event(&mut self, event: &InputEvent, store: &mut CollectionStore) -> TrackerResult<usize> {
        let actions = self.dispatch_event(event);
        for action in &actions {
            store.apply(action)?;
        }
        Ok(actions.len())
    }

    /// Write the metadata cache, if one is attached.
    pub fn flush_metadata(&mut self) -> TrackerResult<()> {
        match self.metadata.as_mut() {
            Some(metadata) => metadata.save(),
            None => Ok(()),
        }
    }

    #[must_use]
    pub fn grid(&self) -> &PagedGrid<CardTile> {
        &self.grid
    }

    #[must_use]
    pub fn metadata(&self) -> Option<&MetadataCache> {
        self.metadata.as_ref()
    }

    #[must_use]
    pub fn kind(&self) -> TileKind {
        self.kind
    }

    /// Stop the fetch workers, waiting for queued fetches to finish.
    pub fn shutdown(self) {
        self.pool.shutdown();
    }
}
