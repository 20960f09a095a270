//=========================================================================
// Tile Layer
//=========================================================================
//
// A scrollable plane of tiles whose position is derived from another
// layer (its target) under a positioning mode.
//
// Positions are the top-left corner of the visible window, in scaled
// pixels. Derived positions are clamped so the window never leaves the
// map:
// ```text
//   0 ≤ position ≤ max(0, map_extent − view)      (per axis)
//   map_extent = tiles × tile_size × display_scale
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::str::FromStr;

use glam::Vec2;

//=== Internal Dependencies ===============================================

use super::cell::TileCell;
use super::map::TileMap;
use super::tile_set::TileSet;
use crate::core::draw::Color;

//=== LayerMode ===========================================================

/// How a layer derives its position from its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LayerMode {
    /// Never moves on its own.
    #[default]
    Static,
    /// Advances by `position_scale` every resolve, ignoring its target.
    Forced,
    /// Copies the target position.
    Follow,
    /// Target position scaled by the ratio of the two map extents.
    ///
    /// Extents are in scaled pixels (`tiles × tile_size × display_scale`),
    /// not tile counts, so layers with different tile sizes or display
    /// scales still reach their far edges together. The ratio is 0 on an
    /// axis where the target has no extent.
    Relative,
    /// Target position multiplied by `position_scale` (parallax).
    Scaled,
}

impl LayerMode {
    pub const ALL: [LayerMode; 5] = [
        Self::Static,
        Self::Forced,
        Self::Follow,
        Self::Relative,
        Self::Scaled,
    ];

    /// Name used in level files.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Static => "Static",
            Self::Forced => "Forced",
            Self::Follow => "Follow",
            Self::Relative => "Relative",
            Self::Scaled => "Scaled",
        }
    }
}

impl fmt::Display for LayerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a level file names a mode that does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLayerMode(pub String);

impl fmt::Display for UnknownLayerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown layer mode {:?}", self.0)
    }
}

impl std::error::Error for UnknownLayerMode {}

impl FromStr for LayerMode {
    type Err = UnknownLayerMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| UnknownLayerMode(s.to_owned()))
    }
}

//=== TileWindow ==========================================================

/// The block of tiles a layer needs drawn for one frame.
///
/// Tile `(first_column + i, first_row + j)` goes at
/// `origin + (i, j) × tile_size` on screen. Cells outside the map read as
/// empty, so the renderer can walk the full window without bounds checks.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TileWindow {
    pub first_column: i32,
    pub first_row: i32,
    pub columns: u32,
    pub rows: u32,
    /// Screen position of the first tile's top-left corner (≤ 0).
    pub origin: Vec2,
    /// Scaled tile size in pixels.
    pub tile_size: Vec2,
}

impl TileWindow {
    /// The window's cells from `map`, row by row, `columns × rows` long.
    pub fn cells(&self, map: &TileMap) -> Vec<TileCell> {
        let mut cells = Vec::with_capacity(self.columns as usize * self.rows as usize);
        for row in 0..self.rows as i32 {
            for column in 0..self.columns as i32 {
                cells.push(map.tile(self.first_column + column, self.first_row + row));
            }
        }
        cells
    }
}

//=== Layer ===============================================================

/// One tile layer and its positioning parameters.
///
/// Target edges are owned by [`LayerGraph`](super::LayerGraph), which
/// keeps them consistent with the layer set.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    name: String,
    map: String,
    tile_set: String,
    map_tiles: Vec2,
    tile_size: Vec2,
    position: Vec2,

    pub mode: LayerMode,
    /// Velocity for `Forced`, multiplier for `Scaled`; unused otherwise.
    pub position_scale: Vec2,
    /// Added to derived positions before clamping.
    pub position_offset: Vec2,
    pub display_scale: f32,
    pub tint: Color,

    pub(super) target: Option<usize>,
    pub(super) updated: bool,
}

impl Layer {
    //--- Construction -----------------------------------------------------

    /// Creates a static layer drawing `map` with tiles from `tile_set`.
    pub fn new(name: impl Into<String>, map: &TileMap, tile_set: &TileSet) -> Self {
        Self {
            name: name.into(),
            map: map.name().to_owned(),
            tile_set: tile_set.name.clone(),
            map_tiles: map.size(),
            tile_size: tile_set.tile_size(),
            position: Vec2::ZERO,
            mode: LayerMode::Static,
            position_scale: Vec2::ONE,
            position_offset: Vec2::ZERO,
            display_scale: 1.0,
            tint: Color::WHITE,
            target: None,
            updated: false,
        }
    }

    pub fn with_mode(mut self, mode: LayerMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_position_scale(mut self, scale: Vec2) -> Self {
        self.position_scale = scale;
        self
    }

    pub fn with_position_offset(mut self, offset: Vec2) -> Self {
        self.position_offset = offset;
        self
    }

    pub fn with_display_scale(mut self, scale: f32) -> Self {
        self.display_scale = scale;
        self
    }

    pub fn with_tint(mut self, tint: Color) -> Self {
        self.tint = tint;
        self
    }

    //--- Queries ----------------------------------------------------------

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the map this layer draws.
    pub fn map(&self) -> &str {
        &self.map
    }

    pub fn tile_set(&self) -> &str {
        &self.tile_set
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Index of the target layer inside the owning graph.
    pub fn target(&self) -> Option<usize> {
        self.target
    }

    /// Tile size after display scaling.
    pub fn scaled_tile_size(&self) -> Vec2 {
        self.tile_size * self.display_scale
    }

    /// Full map size in scaled pixels.
    pub fn extent(&self) -> Vec2 {
        self.map_tiles * self.scaled_tile_size()
    }

    /// Keeps a `view`-sized window at `position` inside the map.
    pub fn clamp(&self, position: Vec2, view: Vec2) -> Vec2 {
        let max = (self.extent() - view).max(Vec2::ZERO);
        position.clamp(Vec2::ZERO, max)
    }

    /// Which tiles cover a `view`-sized window at the current position.
    pub fn tile_window(&self, view: Vec2) -> TileWindow {
        let tile_size = self.scaled_tile_size();
        if tile_size.x <= 0.0 || tile_size.y <= 0.0 {
            return TileWindow::default();
        }

        let first = (self.position / tile_size).floor();
        let origin = first * tile_size - self.position;
        let span = ((view - origin) / tile_size).ceil().max(Vec2::ZERO);

        TileWindow {
            first_column: first.x as i32,
            first_row: first.y as i32,
            columns: span.x as u32,
            rows: span.y as u32,
            origin,
            tile_size,
        }
    }

    //--- Positioning ------------------------------------------------------

    pub(super) fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Moves the layer directly (master layer, editor scrolling).
    pub(super) fn place(&mut self, position: Vec2, view: Vec2) {
        self.position = self.clamp(position, view);
    }

    /// Position for a layer without a resolved target this pass.
    pub(super) fn advance_alone(&self) -> Vec2 {
        match self.mode {
            LayerMode::Forced => self.position + self.position_scale,
            _ => self.position,
        }
    }

    /// Position derived from an already-resolved `target`.
    pub(super) fn derive_from(&self, target: &Layer, view: Vec2) -> Vec2 {
        let raw = match self.mode {
            LayerMode::Static | LayerMode::Forced => return self.advance_alone(),
            LayerMode::Follow => target.position,
            LayerMode::Relative => target.position * extent_ratio(self.extent(), target.extent()),
            LayerMode::Scaled => target.position * self.position_scale,
        };
        self.clamp(raw + self.position_offset, view)
    }
}

/// Per-axis `ours / theirs`, 0 where the target map has no extent.
fn extent_ratio(ours: Vec2, theirs: Vec2) -> Vec2 {
    let axis = |a: f32, b: f32| if b > 0.0 { a / b } else { 0.0 };
    Vec2::new(axis(ours.x, theirs.x), axis(ours.y, theirs.y))
}

//=========================================================================
// Unit Tests
//=========================================================================
