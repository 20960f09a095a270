//=========================================================================
// Platform Bridge
//=========================================================================
//
// Contract between the window thread and the logic thread. The core only
// ever sees these types, never winit's.
//
// Components:
// - `interface`: event types and the platform error
// - `event_collector`: logic-side draining of the platform channel
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

//=== Internal API ========================================================

pub(crate) use event_collector::{EventCollector, TickControl};
pub(crate) use interface::{CoreEvent, PlatformEvent};

//=== Public API ==========================================================

pub use interface::PlatformError;
