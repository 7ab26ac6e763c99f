//! Paged grid layout for card tiles.
//!
//! Tiles are described by capabilities rather than a widget hierarchy:
//!
//! - [`HasBounds`]: a size, and a position the layout can assign
//! - [`Draw`]: paints itself onto a [`Surface`]
//! - [`HandleEvent`]: reacts to input, optionally producing an action
//!
//! Anything with all three is a [`PageItem`] and can be placed in a
//! [`PagedGrid`]. The drawing backend is external; it only has to
//! implement [`Surface`].
//!
//! ## Example
//!
//! ```
//! use collection_tracker::layout::{CardTile, ImageHandle, PagedGrid, PreciseRect, TileKind};
//!
//! let tiles: Vec<CardTile> = (0..10)
//!     .map(|_| CardTile::new(100.0, 100.0, ImageHandle::placeholder(), TileKind::Catalog))
//!     .collect();
//!
//! let mut grid = PagedGrid::new(PreciseRect::new(0.0, 0.0, 340.0, 220.0), 10.0);
//! grid.set_items(tiles, 0).unwrap();
//! assert_eq!((grid.first_showing(), grid.last_showing()), (0, 2));
//!
//! grid.next_page();
//! assert_eq!((grid.first_showing(), grid.last_showing()), (2, 4));
//! ```

pub mod geometry;
pub mod grid;
pub mod tile;

pub use geometry::PreciseRect;
pub use grid::PagedGrid;
pub use tile::{CardTile, ImageHandle, TileAction, TileKind};

use serde::{Deserialize, Serialize};

/// Mouse buttons the layout distinguishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseButton {
    Primary,
    /// The context-menu button.
    Secondary,
}

/// Input forwarded from the windowing layer, in viewport coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    Click { x: f64, y: f64, button: MouseButton },
    Motion { x: f64, y: f64 },
}

/// Drawing backend.
pub trait Surface {
    /// Blit an image into `bounds`.
    fn draw_image(&mut self, image: &ImageHandle, bounds: &PreciseRect);

    /// Mark `bounds` as hovered. Backends without hover feedback ignore it.
    fn draw_highlight(&mut self, _bounds: &PreciseRect) {}
}

/// Something with a size and an assignable position.
pub trait HasBounds {
    fn bounds(&self) -> PreciseRect;

    fn set_position(&mut self, x: f64, y: f64);
}

/// Something that can paint itself.
pub trait Draw {
    fn draw(&self, surface: &mut dyn Surface);
}

/// Something that reacts to input.
pub trait HandleEvent {
    /// What a handled event produces for the owner of the layout.
    type Action;

    /// Handle `event`, returning an action if it triggered one.
    fn handle_event(&mut self, event: &InputEvent) -> Option<Self::Action>;
}

/// A tile that can live in a [`PagedGrid`].
pub trait PageItem: HasBounds + Draw + HandleEvent {}

impl<T: HasBounds + Draw + HandleEvent> PageItem for T {}
