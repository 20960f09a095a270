//=========================================================================
// jamkit — Library Root
//
// A small 2D game-jam framework: a layered game-state stack with
// transitions, menus built from closed item kinds, parallax tile layers
// over bit-packed tile maps, an XML level codec, and a windowed runtime
// that ticks it all at a fixed rate.
//
// Typical usage:
// ```no_run
// use jamkit::prelude::*;
//
// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
// enum Screen { Title }
// impl StateKey for Screen {}
//
// fn main() {
//     EngineBuilder::<Screen>::new()
//         .build()
//         .init(|systems| {
//             systems.states.queue_initial(
//                 Screen::Title,
//                 MenuState::new("Title").with_item(MenuItem::button("Quit"), MenuAction::Quit),
//             );
//         })
//         .run();
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds everything that runs on the logic thread and is usable
// without a window (states, menus, tiles, levels, input tracking).
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` owns the winit window and is not part of the public API.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder};
