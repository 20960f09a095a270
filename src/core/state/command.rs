//=========================================================================
// State Commands
//=========================================================================
//
// Structural changes to the state stack, queued during the update pass
// and applied once it has finished.
//
// A state must never see the stack change underneath it mid-pass, so
// pushes and removals requested from `update`/`handle_input` land here
// and the stack drains the queue at the tick boundary.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

//=== Internal Dependencies ===============================================

use super::{GameState, StateKey};

//=== StateCommand ========================================================

/// A deferred stack operation.
pub enum StateCommand<K: StateKey> {
    /// Adds a new state on top of the stack (no-op if the key is present).
    Push(K, Box<dyn GameState<K>>),

    /// Starts the exit transition; the state is removed once it finishes.
    Close(K),

    /// Removes a state immediately, skipping its exit transition.
    Remove(K),

    /// Starts the exit transition on every state.
    CloseAll,

    /// Asks the runtime to stop after the current tick.
    Quit,
}

impl<K: StateKey> fmt::Debug for StateCommand<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Push(key, _) => f.debug_tuple("Push").field(key).finish(),
            Self::Close(key) => f.debug_tuple("Close").field(key).finish(),
            Self::Remove(key) => f.debug_tuple("Remove").field(key).finish(),
            Self::CloseAll => f.write_str("CloseAll"),
            Self::Quit => f.write_str("Quit"),
        }
    }
}

//=== CommandQueue ========================================================

/// FIFO of pending [`StateCommand`]s.
pub struct CommandQueue<K: StateKey> {
    queue: Vec<StateCommand<K>>,
}

impl<K: StateKey> CommandQueue<K> {
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    /// Queues a command for the next tick boundary.
    pub fn push(&mut self, command: StateCommand<K>) {
        self.queue.push(command);
    }

    pub fn iter(&self) -> impl Iterator<Item = &StateCommand<K>> {
        self.queue.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn clear(&mut self) {
        self.queue.clear()
    }

    /// Takes every queued command, leaving the queue empty so that
    /// commands issued while applying these are collected separately.
    pub fn take(&mut self) -> Vec<StateCommand<K>> {
        std::mem::take(&mut self.queue)
    }
}

impl<K: StateKey> Default for CommandQueue<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: StateKey> fmt::Debug for CommandQueue<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.queue.iter()).finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
    enum Key {
        Title,
        Pause,
    }

    impl StateKey for Key {}

    struct Blank;
    impl GameState<Key> for Blank {}

    #[test]
    fn take_drains_in_fifo_order() {
        let mut queue = CommandQueue::new();
        queue.push(StateCommand::Push(Key::Title, Box::new(Blank)));
        queue.push(StateCommand::Close(Key::Pause));
        assert_eq!(queue.len(), 2);

        let taken = queue.take();
        assert!(queue.is_empty());
        assert!(matches!(taken[0], StateCommand::Push(Key::Title, _)));
        assert!(matches!(taken[1], StateCommand::Close(Key::Pause)));
    }

    #[test]
    fn debug_omits_state_objects() {
        let mut queue = CommandQueue::new();
        queue.push(StateCommand::Push(Key::Pause, Box::new(Blank)));
        queue.push(StateCommand::Quit);

        assert_eq!(format!("{:?}", queue), "[Push(Pause), Quit]");
    }
}
