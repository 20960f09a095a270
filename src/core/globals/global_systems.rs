//=========================================================================
// Global Systems
//=========================================================================
//
// The state stack and the session resources, owned by the logic thread
// and configured through `Engine::init`.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use super::GlobalContext;
use crate::core::draw::DrawList;
use crate::core::resources::SessionResources;
use crate::core::state::{StateKey, StateStack};

//=== GlobalSystems =======================================================

/// Engine-level systems operating on a [`GlobalContext`].
pub struct GlobalSystems<K: StateKey> {
    /// Game states. Seed it with `states.queue_initial(..)` during init.
    pub states: StateStack<K>,

    pub resources: SessionResources,
}

impl<K: StateKey> GlobalSystems<K> {
    pub(crate) fn new(resources: SessionResources) -> Self {
        Self {
            states: StateStack::new(),
            resources,
        }
    }

    /// Pushes the initial states. Called once before the first tick.
    pub(crate) fn start(&mut self, context: &mut GlobalContext<K>) {
        self.states.start(context, &self.resources);
        self.states.process_commands(context, &self.resources);
    }

    //--- Update Loop ------------------------------------------------------

    /// Runs one tick:
    ///
    /// 1. Fold this tick's input batches into the input state
    /// 2. Drop last tick's messages
    /// 3. Update the state stack
    /// 4. Apply queued stack commands
    pub(crate) fn update(&mut self, context: &mut GlobalContext<K>, dt: f32) {
        context.input_state.clear();
        for batch in context.frame_events.drain(..) {
            context.input_state.process_events(&batch);
        }
        context.input_state.finalize_frame();

        context.messages.clear_all();

        self.states.update(dt, context, &self.resources);
        self.states.process_commands(context, &self.resources);

        trace!("Tick done, {} states in stack", self.states.len());
    }

    /// Collects this tick's draw commands.
    pub(crate) fn draw(&self, out: &mut DrawList) {
        out.clear();
        self.states.draw(&self.resources, out);
    }

    /// Removes every state, running `on_exit` hooks. Called on shutdown.
    pub(crate) fn shutdown(&mut self, context: &mut GlobalContext<K>) {
        self.states.clear(context, &self.resources);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
