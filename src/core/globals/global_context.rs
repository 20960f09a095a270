//=========================================================================
// Global Context
//=========================================================================
//
// Per-tick data shared by all states: input state, message bus, the
// stack command queue and the quit flag.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::input::{InputEvent, StateTracker};
use crate::core::message_bus::MessageBus;
use crate::core::resources::SessionResources;
use crate::core::state::{CommandQueue, StateContext, StateKey};

//=== GlobalContext =======================================================

/// Mutable data the logic thread threads through every tick.
pub struct GlobalContext<K: StateKey> {
    /// Keyboard and mouse state for this tick.
    pub input_state: StateTracker,

    /// Messages published this tick (cleared at the start of each tick).
    pub messages: MessageBus,

    /// Stack changes requested this tick.
    pub commands: CommandQueue<K>,

    /// Set by `StateCommand::Quit`; the runtime stops after this tick.
    pub quit_requested: bool,

    /// Input batches received from the platform since the last tick.
    pub(crate) frame_events: Vec<Vec<InputEvent>>,
}

impl<K: StateKey> GlobalContext<K> {
    pub(crate) fn new() -> Self {
        Self {
            input_state: StateTracker::new(),
            messages: MessageBus::new(),
            commands: CommandQueue::new(),
            quit_requested: false,
            frame_events: Vec::new(),
        }
    }

    /// Borrows the context as seen by the state `key`.
    pub fn state_context<'s>(
        &'s mut self,
        key: K,
        dt: f32,
        resources: &'s SessionResources,
    ) -> StateContext<'s, K> {
        StateContext::new(
            key,
            dt,
            &self.input_state,
            resources,
            &mut self.messages,
            &mut self.commands,
        )
    }
}
