//! Card tiles: one card image in the grid.

use std::path::{Path, PathBuf};

use super::{Draw, HandleEvent, HasBounds, InputEvent, MouseButton, PreciseRect, Surface};
use crate::cache::SpriteData;
use crate::cards::CardData;

/// Encoded image bytes owned by exactly one tile.
///
/// Not `Clone`: the image is released when its tile is dropped.
/// An empty handle is the blank-card placeholder shown while the real
/// image is still being fetched.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImageHandle {
    bytes: Box<[u8]>,
    path: Option<PathBuf>,
}

impl ImageHandle {
    /// The blank-card placeholder.
    #[must_use]
    pub fn placeholder() -> Self {
        Self::default()
    }

    /// Wrap encoded image bytes that did not come from the cache.
    #[must_use]
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            bytes: bytes.into_boxed_slice(),
            path: None,
        }
    }

    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.bytes.is_empty()
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Cache file the image was read from.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl From<SpriteData> for ImageHandle {
    fn from(sprite: SpriteData) -> Self {
        Self {
            bytes: sprite.bytes.into_boxed_slice(),
            path: Some(sprite.path),
        }
    }
}

/// What clicking a tile does to the collection.
#[derive(Clone, Debug, PartialEq)]
pub enum TileAction {
    AddToCollection(CardData),
    RemoveFromCollection(CardData),
}

/// Which screen a tile belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileKind {
    /// Catalog search results; the context click adds the card.
    Catalog,
    /// The user's own collection; the context click removes the card.
    Owned,
}

/// A card image at a fixed size.
#[derive(Debug)]
pub struct CardTile {
    bounds: PreciseRect,
    image: ImageHandle,
    card: Option<CardData>,
    kind: TileKind,
    hovered: bool,
}

impl CardTile {
    /// Create an unplaced tile.
    #[must_use]
    pub fn new(width: f64, height: f64, image: ImageHandle, kind: TileKind) -> Self {
        Self {
            bounds: PreciseRect::sized(width, height),
            image,
            card: None,
            kind,
            hovered: false,
        }
    }

    /// Attach the card this tile shows (builder pattern).
    #[must_use]
    pub fn with_card(mut self, card: CardData) -> Self {
        self.card = Some(card);
        self
    }

    #[must_use]
    pub fn card(&self) -> Option<&CardData> {
        self.card.as_ref()
    }

    #[must_use]
    pub fn image(&self) -> &ImageHandle {
        &self.image
    }

    /// Swap in a new image, returning the old one.
    pub fn set_image(&mut self, image: ImageHandle) -> ImageHandle {
        std::mem::replace(&mut self.image, image)
    }

    #[must_use]
    pub fn kind(&self) -> TileKind {
        self.kind
    }

    #[must_use]
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }
}

impl HasBounds for CardTile {
    fn bounds(&self) -> PreciseRect {
        self.bounds
    }

    fn set_position(&mut self, x: f64, y: f64) {
        self.bounds.set_position(x, y);
    }
}

impl Draw for CardTile {
    fn draw(&self, surface: &mut dyn Surface) {
        surface.draw_image(&self.image, &self.bounds);
        if self.hovered {
            surface.draw_highlight(&self.bounds);
        }
    }
}

impl HandleEvent for CardTile {
    type Action = TileAction;

    fn handle_event(&mut self, event: &InputEvent) -> Option<TileAction> {
        match *event {
            InputEvent::Motion { x, y } => {
                self.hovered = self.bounds.contains(x, y);
                None
            }
            InputEvent::Click { x, y, button } => {
                if button != MouseButton::Secondary || !self.bounds.contains(x, y) {
                    return None;
                }
                let card = self.card.clone()?;
                Some(match self.kind {
                    TileKind::Catalog => TileAction::AddToCollection(card),
                    TileKind::Owned => TileAction::RemoveFromCollection(card),
                })
            }
        }
    }
}
