//=========================================================================
// Game State System
//=========================================================================
//
// Layered game states (title screen, gameplay, pause menu, loading
// screen) with a transition lifecycle.
//
// Architecture:
//   StateStack
//     └─ entries: Vec<StateEntry>      (bottom → top = draw order)
//          ├─ key: K
//          ├─ state: Box<dyn GameState<K>>
//          └─ transition: Transition   (phase + progress)
//
// Flow (one tick):
//   update()           top → bottom, focus/cover flags, input to one state
//   process_commands() apply queued pushes/closes/removals
//   draw()             bottom → top, Hidden states skipped
//
//=========================================================================

//=== Module Declarations =================================================

mod command;
mod stack;
mod transition;

//=== Public API ==========================================================

pub use command::{CommandQueue, StateCommand};
pub use stack::StateStack;
pub use transition::{Phase, Transition, TRANSITION_RATE};

//=== External Dependencies ===============================================

use std::fmt::Debug;
use std::hash::Hash;

//=== Internal Dependencies ===============================================

use crate::core::draw::DrawList;
use crate::core::input::StateTracker;
use crate::core::message_bus::MessageBus;
use crate::core::resources::SessionResources;

//=== State Key Trait =====================================================

/// Marker trait for state identifiers.
///
/// Each key appears at most once in the stack. Typically implemented by a
/// game-specific enum.
pub trait StateKey: Clone + Copy + Eq + Hash + Debug + Send + 'static {}

//=== GameState Trait =====================================================

/// Behaviour of one entry in the [`StateStack`].
///
/// The stack owns the lifecycle (see [`Transition`]); implementors only
/// react to it. Every hook has an empty default.
///
/// ```rust
/// # use jamkit::prelude::*;
/// # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// # enum Screen { Gameplay, Pause }
/// # impl StateKey for Screen {}
/// struct Gameplay;
///
/// impl GameState<Screen> for Gameplay {
///     fn handle_input(&mut self, ctx: &mut StateContext<'_, Screen>) {
///         if ctx.input().is_key_pressed(KeyCode::Escape) {
///             ctx.close_self();
///         }
///     }
/// }
/// ```
pub trait GameState<K: StateKey>: Send {
    /// Called when the state is inserted into the stack.
    fn on_enter(&mut self, _ctx: &mut StateContext<'_, K>) {}

    /// Called when the state leaves the stack (after its exit transition,
    /// or immediately for `Remove`/`Clear`).
    fn on_exit(&mut self, _ctx: &mut StateContext<'_, K>) {}

    /// Called every tick for every stacked state, after its transition
    /// has been advanced. Hidden states are updated too.
    fn update(&mut self, _ctx: &mut StateContext<'_, K>, _transition: &Transition) {}

    /// Called on the single topmost state that is transitioning on or
    /// active and not covered by a focused state above it.
    fn handle_input(&mut self, _ctx: &mut StateContext<'_, K>) {}

    /// Appends this state's draw commands. Never called while Hidden.
    fn draw(&self, _frame: &DrawFrame<'_>, _out: &mut DrawList) {}

    /// Popups take focus but leave the states beneath them uncovered.
    fn is_popup(&self) -> bool {
        false
    }
}

//=== StateContext ========================================================

/// What a state may read and request during one hook call.
pub struct StateContext<'a, K: StateKey> {
    key: K,
    dt: f32,
    input: &'a StateTracker,
    resources: &'a SessionResources,
    messages: &'a mut MessageBus,
    commands: &'a mut CommandQueue<K>,
}

impl<'a, K: StateKey> StateContext<'a, K> {
    pub fn new(
        key: K,
        dt: f32,
        input: &'a StateTracker,
        resources: &'a SessionResources,
        messages: &'a mut MessageBus,
        commands: &'a mut CommandQueue<K>,
    ) -> Self {
        Self { key, dt, input, resources, messages, commands }
    }

    //--- Frame Data -------------------------------------------------------

    /// Key of the state this context was built for.
    pub fn key(&self) -> K {
        self.key
    }

    /// Seconds elapsed this tick.
    pub fn dt(&self) -> f32 {
        self.dt
    }

    pub fn input(&self) -> &StateTracker {
        self.input
    }

    pub fn resources(&self) -> &SessionResources {
        self.resources
    }

    /// Bus for game-level messages (menu commands and the like).
    pub fn messages(&mut self) -> &mut MessageBus {
        &mut *self.messages
    }

    //--- Stack Requests (applied after the update pass) ------------------

    pub fn push_state<S>(&mut self, key: K, state: S)
    where
        S: GameState<K> + 'static,
    {
        self.push_boxed(key, Box::new(state));
    }

    pub fn push_boxed(&mut self, key: K, state: Box<dyn GameState<K>>) {
        self.commands.push(StateCommand::Push(key, state));
    }

    /// Starts the exit transition of `key`.
    pub fn close(&mut self, key: K) {
        self.commands.push(StateCommand::Close(key));
    }

    /// Starts this state's own exit transition.
    pub fn close_self(&mut self) {
        let key = self.key;
        self.close(key);
    }

    /// Drops `key` without an exit transition.
    pub fn remove(&mut self, key: K) {
        self.commands.push(StateCommand::Remove(key));
    }

    pub fn close_all(&mut self) {
        self.commands.push(StateCommand::CloseAll);
    }

    pub fn quit(&mut self) {
        self.commands.push(StateCommand::Quit);
    }
}

//=== DrawFrame ===========================================================

/// Read-only inputs to [`GameState::draw`].
#[derive(Clone, Copy)]
pub struct DrawFrame<'a> {
    pub transition: &'a Transition,
    pub resources: &'a SessionResources,
}
