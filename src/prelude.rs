//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use jamkit::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine core
pub use crate::engine::{Engine, EngineBuilder};
pub use crate::core::FrameSink;

// Global systems and context
pub use crate::core::globals::{GlobalContext, GlobalSystems};
pub use crate::core::resources::{MenuStyle, SessionResources};

// Input
pub use crate::core::input::{InputEvent, KeyCode, Modifiers, MouseButton, StateTracker};

// Game states
pub use crate::core::state::{
    DrawFrame, GameState, Phase, StateCommand, StateContext, StateKey, StateStack, Transition,
};

// Menus
pub use crate::core::menu::{MenuAction, MenuCommand, MenuItem, MenuMessage, MenuState, MenuValue};

// Tiles and levels
pub use crate::core::level::{Level, LevelError, ProjectFile};
pub use crate::core::tile::{Layer, LayerGraph, LayerMode, Rotation, TileCell, TileError, TileMap, TileSet};

// Drawing
pub use crate::core::draw::{Color, DrawCommand, DrawList, Rect};

// Message bus
pub use crate::core::message_bus::MessageBus;
