//=========================================================================
// Message Bus
//=========================================================================
//
// Typed, tick-scoped messaging between states and the host.
//
//=========================================================================

//=== Module Declarations =================================================

#[allow(clippy::module_inception)]
mod message_bus;
mod message_queue;

//=== Public API ==========================================================

pub use message_bus::{Message, MessageBus};
