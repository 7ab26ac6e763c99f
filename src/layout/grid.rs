//! Paged grid of uniformly sized tiles.
//!
//! The grid owns a backing sequence of tiles and shows the window
//! `[first_showing, last_showing)` of it. How many tiles fit is derived
//! from the viewport and the tile size:
//!
//! ```text
//! columns_fit = floor(viewport_width  / (tile_width  + 2 * padding))
//! rows_fit    = floor(viewport_height / (tile_height + 2 * padding))
//! capacity    = columns_fit * rows_fit
//! ```
//!
//! Tiles on a page are placed row-major; the tile at page offset `i` sits in
//! cell `(i % columns_fit, i / columns_fit)` at
//! `origin + padding * (cell + 1) + cell * tile_size` on each axis.

use log::{debug, warn};

use super::{InputEvent, PageItem, PreciseRect, Surface};
use crate::error::{TrackerError, TrackerResult};

/// A grid that pages through a list of tiles.
///
/// All tiles handed to one grid must share one size; `set_items` rejects
/// mixed sizes.
#[derive(Debug)]
pub struct PagedGrid<T> {
    viewport: PreciseRect,
    padding: f64,
    items: Vec<T>,
    first_showing: usize,
    last_showing: usize,
    columns_fit: usize,
    rows_fit: usize,
}

impl<T: PageItem> PagedGrid<T> {
    /// Create an empty grid.
    #[must_use]
    pub fn new(viewport: PreciseRect, padding: f64) -> Self {
        Self {
            viewport,
            padding,
            items: Vec::new(),
            first_showing: 0,
            last_showing: 0,
            columns_fit: 0,
            rows_fit: 0,
        }
    }

    /// Replace the backing sequence and show the page starting at `start_index`.
    ///
    /// Fails without touching the grid if the tiles differ in size or
    /// `start_index` is past the end.
    pub fn set_items(&mut self, items: Vec<T>, start_index: usize) -> TrackerResult<()> {
        check_uniform(&items)?;
        if start_index > items.len() {
            return Err(TrackerError::StartOutOfRange {
                start: start_index,
                len: items.len(),
            });
        }
        self.items = items;
        self.layout_from(start_index);
        Ok(())
    }

    /// Keep the backing sequence and show the page starting at `start_index`.
    pub fn relayout(&mut self, start_index: usize) -> TrackerResult<()> {
        if start_index > self.items.len() {
            return Err(TrackerError::StartOutOfRange {
                start: start_index,
                len: self.items.len(),
            });
        }
        self.layout_from(start_index);
        Ok(())
    }

    fn layout_from(&mut self, start: usize) {
        self.compute_fit();

        let shown = self.capacity().min(self.items.len() - start);
        let (tile_width, tile_height) = self.tile_size();
        let columns = self.columns_fit;
        let (origin_x, origin_y, padding) = (self.viewport.x, self.viewport.y, self.padding);

        for (offset, item) in self.items[start..start + shown].iter_mut().enumerate() {
            let column = (offset % columns) as f64;
            let row = (offset / columns) as f64;
            item.set_position(
                origin_x + padding * (column + 1.0) + column * tile_width,
                origin_y + padding * (row + 1.0) + row * tile_height,
            );
        }

        self.first_showing = start;
        self.last_showing = start + shown;
        debug!(
            "grid showing [{}, {}) of {} ({}x{} cells)",
            self.first_showing,
            self.last_showing,
            self.items.len(),
            self.columns_fit,
            self.rows_fit
        );
    }

    fn compute_fit(&mut self) {
        if self.items.is_empty() {
            self.columns_fit = 0;
            self.rows_fit = 0;
            return;
        }
        let (tile_width, tile_height) = self.tile_size();
        self.columns_fit = cells_fit(self.viewport.width, tile_width, self.padding);
        self.rows_fit = cells_fit(self.viewport.height, tile_height, self.padding);

        if self.capacity() == 0 {
            warn!(
                "viewport {}x{} too small for {}x{} tiles",
                self.viewport.width, self.viewport.height, tile_width, tile_height
            );
        }
    }

    fn tile_size(&self) -> (f64, f64) {
        self.items
            .first()
            .map_or((0.0, 0.0), |item| item.bounds().size())
    }

    /// Advance one page. Returns whether the window moved.
    pub fn next_page(&mut self) -> bool {
        if self.capacity() == 0 || self.last_showing == self.items.len() {
            return false;
        }
        self.layout_from(self.last_showing);
        true
    }

    /// Go back one page. Returns whether the window moved.
    ///
    /// Does nothing unless a full page fits before `first_showing`.
    pub fn prev_page(&mut self) -> bool {
        let capacity = self.capacity();
        if capacity == 0 {
            return false;
        }
        match self.first_showing.checked_sub(capacity) {
            Some(start) => {
                self.layout_from(start);
                true
            }
            None => false,
        }
    }

    /// Change the viewport and re-lay the current page from `first_showing`.
    pub fn resize(&mut self, viewport: PreciseRect) {
        self.viewport = viewport;
        self.layout_from(self.first_showing);
    }

    /// Draw the visible tiles.
    pub fn render(&self, surface: &mut dyn Surface) {
        for item in self.visible() {
            item.draw(surface);
        }
    }

    /// Forward an event to the visible tiles and collect their actions.
    pub fn dispatch_event(&mut self, event: &InputEvent) -> Vec<T::Action> {
        self.items[self.first_showing..self.last_showing]
            .iter_mut()
            .filter_map(|item| item.handle_event(event))
            .collect()
    }

    /// Tiles on the current page.
    #[must_use]
    pub fn visible(&self) -> &[T] {
        &self.items[self.first_showing..self.last_showing]
    }

    /// The whole backing sequence.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Mutable access to one tile. Its position is kept; its size must not change.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    /// Take the backing sequence out, leaving the grid empty.
    pub fn take_items(&mut self) -> Vec<T> {
        let items = std::mem::take(&mut self.items);
        self.layout_from(0);
        items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn first_showing(&self) -> usize {
        self.first_showing
    }

    #[must_use]
    pub fn last_showing(&self) -> usize {
        self.last_showing
    }

    #[must_use]
    pub fn columns_fit(&self) -> usize {
        self.columns_fit
    }

    #[must_use]
    pub fn rows_fit(&self) -> usize {
        self.rows_fit
    }

    /// Tiles per page.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.columns_fit.saturating_mul(self.rows_fit)
    }

    #[must_use]
    pub fn viewport(&self) -> PreciseRect {
        self.viewport
    }

    #[must_use]
    pub fn padding(&self) -> f64 {
        self.padding
    }

    /// Zero-based page number of the current window.
    #[must_use]
    pub fn page_index(&self) -> usize {
        match self.capacity() {
            0 => 0,
            capacity => self.first_showing.div_ceil(capacity),
        }
    }

    /// Number of pages needed for the whole backing sequence.
    #[must_use]
    pub fn page_count(&self) -> usize {
        match self.capacity() {
            0 => 0,
            capacity => self.items.len().div_ceil(capacity),
        }
    }
}

fn cells_fit(extent: f64, tile: f64, padding: f64) -> usize {
    let cell = tile + 2.0 * padding;
    if cell <= 0.0 || extent <= 0.0 {
        return 0;
    }
    (extent / cell).floor() as usize
}

fn check_uniform<T: PageItem>(items: &[T]) -> TrackerResult<()> {
    let Some(first) = items.first() else {
        return Ok(());
    };
    let (expected_width, expected_height) = first.bounds().size();
    for (index, item) in items.iter().enumerate().skip(1) {
        let (found_width, found_height) = item.bounds().size();
        if found_width != expected_width || found_height != expected_height {
            return Err(TrackerError::MixedTileSizes {
                index,
                expected_width,
                expected_height,
                found_width,
                found_height,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Draw, HandleEvent, HasBounds, ImageHandle};

    /// Minimal tile that reports its id when clicked anywhere.
    struct Probe {
        id: usize,
        bounds: PreciseRect,
    }

    impl HasBounds for Probe {
        fn bounds(&self) -> PreciseRect {
            self.bounds
        }
        fn set_position(&mut self, x: f64, y: f64) {
            self.bounds.set_position(x, y);
        }
    }

    impl Draw for Probe {
        fn draw(&self, surface: &mut dyn Surface) {
            surface.draw_image(&ImageHandle::placeholder(), &self.bounds);
        }
    }

    impl HandleEvent for Probe {
        type Action = usize;
        fn handle_event(&mut self, _event: &InputEvent) -> Option<usize> {
            Some(self.id)
        }
    }

    fn probes(count: usize, size: f64) -> Vec<Probe> {
        (0..count)
            .map(|id| Probe { id, bounds: PreciseRect::sized(size, size) })
            .collect()
    }

    fn grid() -> PagedGrid<Probe> {
        PagedGrid::new(PreciseRect::new(0.0, 0.0, 340.0, 220.0), 10.0)
    }

    #[derive(Default)]
    struct CountingSurface {
        drawn: Vec<PreciseRect>,
    }

    impl Surface for CountingSurface {
        fn draw_image(&mut self, _image: &ImageHandle, bounds: &PreciseRect) {
            self.drawn.push(*bounds);
        }
    }

    #[test]
    fn test_fit_and_first_page() {
        let mut grid = grid();
        grid.set_items(probes(10, 100.0), 0).unwrap();

        assert_eq!(grid.columns_fit(), 2);
        assert_eq!(grid.rows_fit(), 1);
        assert_eq!(grid.capacity(), 2);
        assert_eq!((grid.first_showing(), grid.last_showing()), (0, 2));
    }

    #[test]
    fn test_positions_row_major() {
        let mut grid = PagedGrid::new(PreciseRect::new(5.0, 7.0, 400.0, 400.0), 10.0);
        grid.set_items(probes(4, 100.0), 0).unwrap();
        assert_eq!(grid.columns_fit(), 3);

        let positions: Vec<_> = grid.visible().iter().map(|p| (p.bounds.x, p.bounds.y)).collect();
        assert_eq!(
            positions,
            vec![(15.0, 17.0), (125.0, 17.0), (235.0, 17.0), (15.0, 127.0)]
        );
    }

    #[test]
    fn test_next_page_until_end() {
        let mut grid = grid();
        grid.set_items(probes(10, 100.0), 0).unwrap();

        assert!(grid.next_page());
        assert_eq!((grid.first_showing(), grid.last_showing()), (2, 4));

        while grid.next_page() {}
        assert_eq!((grid.first_showing(), grid.last_showing()), (8, 10));

        assert!(!grid.next_page());
        assert_eq!((grid.first_showing(), grid.last_showing()), (8, 10));
    }

    #[test]
    fn test_prev_page() {
        let mut grid = grid();
        grid.set_items(probes(10, 100.0), 0).unwrap();
        assert!(!grid.prev_page());
        assert_eq!(grid.first_showing(), 0);

        grid.next_page();
        assert!(grid.prev_page());
        assert_eq!((grid.first_showing(), grid.last_showing()), (0, 2));
    }

    #[test]
    fn test_partial_last_page() {
        let mut grid = grid();
        grid.set_items(probes(5, 100.0), 4).unwrap();
        assert_eq!((grid.first_showing(), grid.last_showing()), (4, 5));
        assert_eq!(grid.visible().len(), 1);
    }

    #[test]
    fn test_empty_grid() {
        let mut grid = grid();
        grid.set_items(Vec::new(), 0).unwrap();
        assert_eq!((grid.first_showing(), grid.last_showing()), (0, 0));
        assert!(!grid.next_page());
        assert!(!grid.prev_page());

        let mut surface = CountingSurface::default();
        grid.render(&mut surface);
        assert!(surface.drawn.is_empty());
        assert_eq!(grid.capacity(), 0);
        assert_eq!(grid.page_count(), 0);
    }

    #[test]
    fn test_mixed_sizes_rejected() {
        let mut grid = grid();
        grid.set_items(probes(3, 100.0), 0).unwrap();

        let mut mixed = probes(3, 100.0);
        mixed[2].bounds = PreciseRect::sized(100.0, 120.0);
        let err = grid.set_items(mixed, 0).unwrap_err();
        assert!(matches!(err, TrackerError::MixedTileSizes { index: 2, .. }));

        // Grid unchanged
        assert_eq!(grid.len(), 3);
        assert_eq!((grid.first_showing(), grid.last_showing()), (0, 2));
    }

    #[test]
    fn test_start_out_of_range() {
        let mut grid = grid();
        let err = grid.set_items(probes(3, 100.0), 4).unwrap_err();
        assert!(matches!(err, TrackerError::StartOutOfRange { start: 4, len: 3 }));
        assert!(grid.relayout(4).is_err());
    }

    #[test]
    fn test_resize_keeps_first_item() {
        let mut grid = grid();
        grid.set_items(probes(10, 100.0), 0).unwrap();
        grid.next_page();

        grid.resize(PreciseRect::new(0.0, 0.0, 500.0, 300.0));
        assert_eq!(grid.capacity(), 8);
        assert_eq!((grid.first_showing(), grid.last_showing()), (2, 10));

        grid.resize(PreciseRect::new(0.0, 0.0, 50.0, 50.0));
        assert_eq!(grid.capacity(), 0);
        assert_eq!((grid.first_showing(), grid.last_showing()), (2, 2));
        assert!(!grid.next_page());
        assert!(!grid.prev_page());
    }

    #[test]
    fn test_render_only_visible() {
        let mut grid = grid();
        grid.set_items(probes(10, 100.0), 0).unwrap();
        let mut surface = CountingSurface::default();
        grid.render(&mut surface);
        assert_eq!(surface.drawn.len(), 2);
    }

    #[test]
    fn test_dispatch_only_visible() {
        let mut grid = grid();
        grid.set_items(probes(10, 100.0), 0).unwrap();
        grid.next_page();

        let hits = grid.dispatch_event(&InputEvent::Motion { x: 0.0, y: 0.0 });
        assert_eq!(hits, vec![2, 3]);
    }

    #[test]
    fn test_page_numbers() {
        let mut grid = grid();
        grid.set_items(probes(5, 100.0), 0).unwrap();
        assert_eq!(grid.page_count(), 3);
        assert_eq!(grid.page_index(), 0);
        grid.next_page();
        assert_eq!(grid.page_index(), 1);
    }

    #[test]
    fn test_tiny_tiles_do_not_overflow() {
        let mut grid = PagedGrid::new(PreciseRect::new(0.0, 0.0, 340.0, 220.0), 0.0);
        grid.set_items(probes(3, 1e-300), 0).unwrap();
        assert_eq!(grid.capacity(), usize::MAX);
        assert_eq!((grid.first_showing(), grid.last_showing()), (0, 3));
        assert_eq!(grid.page_count(), 1);
        assert!(!grid.next_page());
        assert!(!grid.prev_page());
    }

    #[test]
    fn test_relayout_keeps_items() {
        let mut grid = grid();
        grid.set_items(probes(6, 100.0), 0).unwrap();
        grid.relayout(3).unwrap();
        assert_eq!(grid.len(), 6);
        assert_eq!((grid.first_showing(), grid.last_showing()), (3, 5));
        assert_eq!(grid.visible()[0].id, 3);
        assert_eq!(grid.visible()[0].bounds.x, 10.0);
        assert!(grid.relayout(7).is_err());
    }

    #[test]
    fn test_take_items_empties_grid() {
        let mut grid = grid();
        grid.set_items(probes(4, 100.0), 2).unwrap();
        let items = grid.take_items();
        assert_eq!(items.len(), 4);
        assert!(grid.is_empty());
        assert_eq!((grid.first_showing(), grid.last_showing()), (0, 0));
    }
}
