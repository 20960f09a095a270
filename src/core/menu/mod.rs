//=========================================================================
// Menus
//=========================================================================
//
// Menu screens built from a closed set of item kinds. Input yields
// `MenuCommand` values that the menu runs through its action table.
//
//=========================================================================

//=== Module Declarations =================================================

mod item;
mod menu_state;

//=== Public API ==========================================================

pub use item::{MenuItem, MenuValue};
pub use menu_state::{MenuAction, MenuCommand, MenuMessage, MenuState, StateFactory};
