//=========================================================================
// Tile System
//=========================================================================
//
// Tile storage and scrolling layers.
//
// Architecture:
//   TileMap  ── grid of TileCell (index + flip/rotation bits)
//   TileSet  ── texture name + tile size
//   Layer    ── map + tile set + positioning mode
//   LayerGraph
//     ├─ layers: Vec<Layer>   (draw order)
//     └─ target edges         (resolved from the master each frame)
//
//=========================================================================

//=== Module Declarations =================================================

mod cell;
mod error;
mod graph;
mod layer;
mod map;
mod tile_set;

//=== Public API ==========================================================

pub use cell::{Rotation, TileCell, FLIP_X_BIT, FLIP_Y_BIT, INDEX_MASK};
pub use error::{Result, TileError};
pub use graph::LayerGraph;
pub use layer::{Layer, LayerMode, TileWindow, UnknownLayerMode};
pub use map::TileMap;
pub use tile_set::TileSet;
