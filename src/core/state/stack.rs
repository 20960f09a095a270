//=========================================================================
// State Stack
//=========================================================================
//
// Owns the stacked game states and schedules them every tick.
//
// Update walks a snapshot of the stack top-down:
// ```text
//   focus = false, covered = false
//   for state in snapshot.rev():
//     transition.update(dt, focus, covered)   ── finished exit? → remove later
//     state.update()
//     if phase is TransitionOn/Active:
//       if !focus: state.handle_input(); focus = true
//       if !popup: covered = true
// ```
// Structural changes requested during the walk are queued as
// `StateCommand`s and applied by `process_commands()` afterwards.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info, trace, warn};

//=== Internal Dependencies ===============================================

use super::{DrawFrame, GameState, Phase, StateCommand, StateKey, Transition};
use crate::core::draw::DrawList;
use crate::core::globals::GlobalContext;
use crate::core::resources::SessionResources;

//=== StateEntry ==========================================================

struct StateEntry<K: StateKey> {
    key: K,
    state: Box<dyn GameState<K>>,
    transition: Transition,
}

//=== StateStack ==========================================================

/// Ordered stack of game states (bottom = first drawn).
pub struct StateStack<K: StateKey> {
    entries: Vec<StateEntry<K>>,
    pending: Vec<(K, Box<dyn GameState<K>>)>,
}

impl<K: StateKey> StateStack<K> {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            pending: Vec::new(),
        }
    }

    /// Queues a state to be pushed when the runtime starts.
    ///
    /// Used during engine initialisation, before any frame context
    /// exists. `on_enter` runs from [`start`](Self::start).
    pub fn queue_initial<S>(&mut self, key: K, state: S)
    where
        S: GameState<K> + 'static,
    {
        debug!("Queued initial state {:?}", key);
        self.pending.push((key, Box::new(state)));
    }

    /// Pushes every state queued with [`queue_initial`](Self::queue_initial).
    pub fn start(&mut self, ctx: &mut GlobalContext<K>, resources: &SessionResources) {
        let pending = std::mem::take(&mut self.pending);
        debug!("Starting state stack with {} initial states", pending.len());

        for (key, state) in pending {
            self.insert(key, state, ctx, resources);
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// States queued with `queue_initial` and not yet started.
    pub fn queued_len(&self) -> usize {
        self.pending.len()
    }

    pub fn contains(&self, key: K) -> bool {
        self.position(key).is_some()
    }

    /// Keys from bottom to top.
    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.entries.iter().map(|e| e.key)
    }

    /// Topmost key, if any.
    pub fn top(&self) -> Option<K> {
        self.entries.last().map(|e| e.key)
    }

    pub fn transition(&self, key: K) -> Option<&Transition> {
        self.position(key).map(|i| &self.entries[i].transition)
    }

    pub fn phase(&self, key: K) -> Option<Phase> {
        self.transition(key).map(Transition::phase)
    }

    //--- Update Pass ------------------------------------------------------

    /// Advances every state's lifecycle and dispatches input to at most
    /// one state. States that finished closing are removed afterwards.
    pub fn update(&mut self, dt: f32, ctx: &mut GlobalContext<K>, resources: &SessionResources) {
        if self.entries.is_empty() {
            return;
        }

        let snapshot: Vec<K> = self.keys().collect();
        let mut other_has_focus = false;
        let mut covered = false;
        let mut finished = Vec::new();

        for &key in snapshot.iter().rev() {
            let Some(entry) = self.entries.iter_mut().find(|e| e.key == key) else {
                continue;
            };

            if !entry.transition.update(dt, other_has_focus, covered) {
                finished.push(key);
                continue;
            }

            let mut state_ctx = ctx.state_context(key, dt, resources);
            entry.state.update(&mut state_ctx, &entry.transition);

            if entry.transition.phase().is_on() {
                if !other_has_focus {
                    trace!("State {:?} has input focus", key);
                    entry.state.handle_input(&mut state_ctx);
                    other_has_focus = true;
                }
                if !entry.state.is_popup() {
                    covered = true;
                }
            }
        }

        for key in finished {
            if let Some(index) = self.position(key) {
                debug!("State {:?} finished closing", key);
                self.remove_at(index, ctx, resources);
            }
        }
    }

    //--- Command Processing -----------------------------------------------

    /// Applies queued [`StateCommand`]s in FIFO order.
    ///
    /// Commands issued by `on_enter`/`on_exit` hooks while applying are
    /// picked up in follow-up rounds; a bounded number of rounds runs per
    /// tick and anything left over waits for the next one.
    pub fn process_commands(&mut self, ctx: &mut GlobalContext<K>, resources: &SessionResources) {
        const MAX_ROUNDS: usize = 8;

        for _ in 0..MAX_ROUNDS {
            let commands = ctx.commands.take();
            if commands.is_empty() {
                return;
            }
            for command in commands {
                self.apply(command, ctx, resources);
            }
        }

        if !ctx.commands.is_empty() {
            warn!(
                "{} state commands still pending after {} rounds, deferring",
                ctx.commands.len(),
                MAX_ROUNDS
            );
        }
    }

    /// Removes every state immediately, calling `on_exit` top-down.
    pub fn clear(&mut self, ctx: &mut GlobalContext<K>, resources: &SessionResources) {
        debug!("Clearing all {} states", self.entries.len());
        while let Some(last) = self.entries.len().checked_sub(1) {
            self.remove_at(last, ctx, resources);
        }
    }

    //--- Draw Pass --------------------------------------------------------

    /// Draws visible states bottom to top.
    pub fn draw(&self, resources: &SessionResources, out: &mut DrawList) {
        for entry in self.entries.iter().filter(|e| e.transition.phase() != Phase::Hidden) {
            let frame = DrawFrame {
                transition: &entry.transition,
                resources,
            };
            entry.state.draw(&frame, out);
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn position(&self, key: K) -> Option<usize> {
        self.entries.iter().position(|e| e.key == key)
    }

    fn apply(&mut self, command: StateCommand<K>, ctx: &mut GlobalContext<K>, resources: &SessionResources) {
        match command {
            StateCommand::Push(key, state) => self.insert(key, state, ctx, resources),

            StateCommand::Close(key) => match self.position(key) {
                Some(index) => {
                    debug!("Closing state {:?}", key);
                    self.entries[index].transition.begin_exit();
                }
                None => debug!("State {:?} not in stack, skipping close", key),
            },

            StateCommand::Remove(key) => match self.position(key) {
                Some(index) => {
                    debug!("Removing state {:?} at position {}", key, index);
                    self.remove_at(index, ctx, resources);
                }
                None => debug!("State {:?} not in stack, skipping removal", key),
            },

            StateCommand::CloseAll => {
                debug!("Closing all {} states", self.entries.len());
                for entry in &mut self.entries {
                    entry.transition.begin_exit();
                }
            }

            StateCommand::Quit => {
                info!("Quit requested");
                ctx.quit_requested = true;
            }
        }
    }

    fn insert(
        &mut self,
        key: K,
        mut state: Box<dyn GameState<K>>,
        ctx: &mut GlobalContext<K>,
        resources: &SessionResources,
    ) {
        if let Some(index) = self.position(key) {
            if !self.entries[index].transition.is_exiting() {
                warn!("State {:?} is already in the stack, skipping push", key);
                return;
            }
            debug!("State {:?} reopened while closing, replacing it", key);
            self.remove_at(index, ctx, resources);
        }

        debug!("Pushing state {:?} onto stack", key);
        state.on_enter(&mut ctx.state_context(key, 0.0, resources));
        self.entries.push(StateEntry {
            key,
            state,
            transition: Transition::new(),
        });
    }

    fn remove_at(&mut self, index: usize, ctx: &mut GlobalContext<K>, resources: &SessionResources) {
        let mut entry = self.entries.remove(index);
        entry.state.on_exit(&mut ctx.state_context(entry.key, 0.0, resources));
    }
}

impl<K: StateKey> Default for StateStack<K> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use crate::core::draw::{Color, DrawCommand, Rect};
    use crate::core::state::StateContext;

    #[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
    enum Key {
        Title,
        Game,
        Pause,
        Options,
    }

    impl StateKey for Key {}

    type Log = Arc<Mutex<Vec<String>>>;
    type Hook = Box<dyn FnMut(&mut StateContext<'_, Key>) + Send>;

    struct Probe {
        name: &'static str,
        log: Log,
        popup: bool,
        on_input: Option<Hook>,
    }

    impl Probe {
        fn new(name: &'static str, log: &Log) -> Self {
            Self {
                name,
                log: Arc::clone(log),
                popup: false,
                on_input: None,
            }
        }

        fn popup(mut self) -> Self {
            self.popup = true;
            self
        }

        fn on_input(mut self, hook: impl FnMut(&mut StateContext<'_, Key>) + Send + 'static) -> Self {
            self.on_input = Some(Box::new(hook));
            self
        }

        fn record(&self, event: &str) {
            self.log.lock().unwrap().push(format!("{}:{}", self.name, event));
        }
    }

    impl GameState<Key> for Probe {
        fn on_enter(&mut self, _ctx: &mut StateContext<'_, Key>) {
            self.record("enter");
        }

        fn on_exit(&mut self, _ctx: &mut StateContext<'_, Key>) {
            self.record("exit");
        }

        fn update(&mut self, _ctx: &mut StateContext<'_, Key>, _transition: &Transition) {
            self.record("update");
        }

        fn handle_input(&mut self, ctx: &mut StateContext<'_, Key>) {
            self.record("input");
            if let Some(hook) = self.on_input.as_mut() {
                hook(ctx);
            }
        }

        fn draw(&self, _frame: &DrawFrame<'_>, out: &mut DrawList) {
            out.text(self.name, Rect::default(), Color::WHITE, 1.0);
        }

        fn is_popup(&self) -> bool {
            self.popup
        }
    }

    struct Harness {
        stack: StateStack<Key>,
        ctx: GlobalContext<Key>,
        resources: SessionResources,
        log: Log,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                stack: StateStack::new(),
                ctx: GlobalContext::new(),
                resources: SessionResources::default(),
                log: Log::default(),
            }
        }

        fn start(&mut self, states: Vec<(Key, Probe)>) {
            for (key, probe) in states {
                self.stack.queue_initial(key, probe);
            }
            self.stack.start(&mut self.ctx, &self.resources);
        }

        fn tick(&mut self, dt: f32) {
            self.stack.update(dt, &mut self.ctx, &self.resources);
            self.stack.process_commands(&mut self.ctx, &self.resources);
        }

        fn take_log(&self) -> Vec<String> {
            std::mem::take(&mut *self.log.lock().unwrap())
        }

        fn drawn(&self) -> Vec<String> {
            let mut list = DrawList::new();
            self.stack.draw(&self.resources, &mut list);
            list.iter()
                .filter_map(|c| match c {
                    DrawCommand::Text { text, .. } => Some(text.clone()),
                    _ => None,
                })
                .collect()
        }
    }

    fn inputs(log: &[String]) -> Vec<&str> {
        log.iter()
            .filter_map(|e| e.strip_suffix(":input"))
            .collect()
    }

    #[test]
    fn start_pushes_initial_states_in_order() {
        let mut h = Harness::new();
        let log = Arc::clone(&h.log);
        h.start(vec![(Key::Title, Probe::new("title", &log)), (Key::Game, Probe::new("game", &log))]);

        assert_eq!(h.stack.keys().collect::<Vec<_>>(), vec![Key::Title, Key::Game]);
        assert_eq!(h.take_log(), vec!["title:enter", "game:enter"]);
        assert_eq!(h.stack.top(), Some(Key::Game));
    }

    #[test]
    fn only_topmost_on_state_receives_input() {
        let mut h = Harness::new();
        let log = Arc::clone(&h.log);
        h.start(vec![
            (Key::Title, Probe::new("title", &log)),
            (Key::Game, Probe::new("game", &log)),
            (Key::Pause, Probe::new("pause", &log)),
        ]);
        h.take_log();

        for _ in 0..40 {
            h.tick(1.0 / 60.0);
            let log = h.take_log();
            assert_eq!(inputs(&log), vec!["pause"]);
        }

        assert_eq!(h.stack.phase(Key::Pause), Some(Phase::Active));
        assert_eq!(h.stack.phase(Key::Game), Some(Phase::Hidden));
        assert_eq!(h.stack.phase(Key::Title), Some(Phase::Hidden));
        assert_eq!(h.drawn(), vec!["pause"]);
    }

    #[test]
    fn update_runs_top_to_bottom_and_draw_bottom_to_top() {
        let mut h = Harness::new();
        let log = Arc::clone(&h.log);
        h.start(vec![
            (Key::Game, Probe::new("game", &log)),
            (Key::Pause, Probe::new("pause", &log).popup()),
        ]);
        h.take_log();

        h.tick(0.1);
        assert_eq!(h.take_log(), vec!["pause:update", "pause:input", "game:update"]);
        assert_eq!(h.drawn(), vec!["game", "pause"]);
    }

    #[test]
    fn popup_takes_focus_without_hiding_lower_state() {
        let mut h = Harness::new();
        let log = Arc::clone(&h.log);
        h.start(vec![
            (Key::Game, Probe::new("game", &log)),
            (Key::Pause, Probe::new("pause", &log).popup()),
        ]);

        for _ in 0..40 {
            h.tick(1.0 / 60.0);
        }

        let game = h.stack.transition(Key::Game).unwrap();
        assert_eq!(game.phase(), Phase::Active);
        assert!(game.other_has_focus());
        assert!(!game.is_active());
        assert!(h.stack.transition(Key::Pause).unwrap().is_active());
    }

    #[test]
    fn closing_state_is_removed_and_focus_returns() {
        let mut h = Harness::new();
        let log = Arc::clone(&h.log);
        h.start(vec![(Key::Game, Probe::new("game", &log)), (Key::Pause, Probe::new("pause", &log))]);

        for _ in 0..4 {
            h.tick(0.125);
        }
        assert_eq!(h.stack.phase(Key::Pause), Some(Phase::Active));
        h.take_log();

        h.ctx.commands.push(StateCommand::Close(Key::Pause));
        h.stack.process_commands(&mut h.ctx, &h.resources);

        // 0.125 s steps move progress by 0.25: three ticks in TransitionOff.
        for _ in 0..3 {
            h.tick(0.125);
            assert_eq!(h.stack.phase(Key::Pause), Some(Phase::TransitionOff));
            let log = h.take_log();
            assert_eq!(inputs(&log), vec!["game"]);
        }

        h.tick(0.125);
        assert!(!h.stack.contains(Key::Pause));
        let log = h.take_log();
        assert!(log.contains(&"pause:exit".to_string()));
        assert_eq!(inputs(&log), vec!["game"]);
    }

    #[test]
    fn push_during_update_is_deferred() {
        let mut h = Harness::new();
        let log = Arc::clone(&h.log);
        let options_log = Arc::clone(&log);
        h.start(vec![(
            Key::Title,
            Probe::new("title", &log).on_input(move |ctx| {
                ctx.push_state(Key::Options, Probe::new("options", &options_log));
            }),
        )]);
        h.take_log();

        h.stack.update(0.1, &mut h.ctx, &h.resources);
        assert!(!h.stack.contains(Key::Options));
        assert_eq!(h.ctx.commands.len(), 1);

        h.stack.process_commands(&mut h.ctx, &h.resources);
        assert_eq!(h.stack.top(), Some(Key::Options));
        assert_eq!(h.stack.phase(Key::Options), Some(Phase::TransitionOn));
        assert_eq!(h.take_log(), vec!["title:update", "title:input", "options:enter"]);
    }

    #[test]
    fn duplicate_push_is_ignored() {
        let mut h = Harness::new();
        let log = Arc::clone(&h.log);
        h.start(vec![(Key::Game, Probe::new("game", &log))]);

        h.ctx.commands.push(StateCommand::Push(Key::Game, Box::new(Probe::new("again", &log))));
        h.stack.process_commands(&mut h.ctx, &h.resources);

        assert_eq!(h.stack.len(), 1);
        assert_eq!(h.take_log(), vec!["game:enter"]);
    }

    #[test]
    fn reopening_a_closing_state_replaces_it() {
        let mut h = Harness::new();
        let log = Arc::clone(&h.log);
        h.start(vec![(Key::Game, Probe::new("game", &log)), (Key::Pause, Probe::new("pause", &log))]);
        for _ in 0..4 {
            h.tick(0.125);
        }
        h.take_log();

        h.ctx.commands.push(StateCommand::Close(Key::Pause));
        h.stack.process_commands(&mut h.ctx, &h.resources);
        h.tick(0.125);
        assert_eq!(h.stack.phase(Key::Pause), Some(Phase::TransitionOff));

        h.ctx.commands.push(StateCommand::Push(Key::Pause, Box::new(Probe::new("pause2", &log))));
        h.stack.process_commands(&mut h.ctx, &h.resources);
        for _ in 0..8 {
            h.tick(0.125);
        }

        assert_eq!(h.stack.keys().collect::<Vec<_>>(), vec![Key::Game, Key::Pause]);
        assert_eq!(h.stack.phase(Key::Pause), Some(Phase::Active));
        let log = h.take_log();
        assert!(log.contains(&"pause:exit".to_string()));
        assert!(log.contains(&"pause2:enter".to_string()));
        assert!(!log.contains(&"pause2:exit".to_string()));
    }

    #[test]
    fn remove_and_quit_commands() {
        let mut h = Harness::new();
        let log = Arc::clone(&h.log);
        h.start(vec![(Key::Title, Probe::new("title", &log)), (Key::Game, Probe::new("game", &log))]);
        h.take_log();

        h.ctx.commands.push(StateCommand::Remove(Key::Title));
        h.ctx.commands.push(StateCommand::Remove(Key::Options));
        h.ctx.commands.push(StateCommand::Quit);
        h.stack.process_commands(&mut h.ctx, &h.resources);

        assert_eq!(h.stack.keys().collect::<Vec<_>>(), vec![Key::Game]);
        assert_eq!(h.take_log(), vec!["title:exit"]);
        assert!(h.ctx.quit_requested);
    }

    #[test]
    fn close_all_empties_stack_within_half_a_second() {
        let mut h = Harness::new();
        let log = Arc::clone(&h.log);
        h.start(vec![(Key::Title, Probe::new("title", &log)), (Key::Game, Probe::new("game", &log))]);

        h.ctx.commands.push(StateCommand::CloseAll);
        h.stack.process_commands(&mut h.ctx, &h.resources);

        for _ in 0..4 {
            h.tick(0.125);
        }
        assert!(h.stack.is_empty());
    }

    #[test]
    fn clear_calls_exit_top_down() {
        let mut h = Harness::new();
        let log = Arc::clone(&h.log);
        h.start(vec![(Key::Title, Probe::new("title", &log)), (Key::Game, Probe::new("game", &log))]);
        h.take_log();

        let Harness { stack, ctx, resources, .. } = &mut h;
        stack.clear(ctx, resources);

        assert!(h.stack.is_empty());
        assert_eq!(h.take_log(), vec!["game:exit", "title:exit"]);
    }
}
