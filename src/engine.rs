//=========================================================================
// Engine
//
// Entry point: configure, initialise, run.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──init()──>  Engine  ──run()──>  [Runtime]
//         │                                                      │
//         ├─ with_tps()                                          ├─ spawns logic thread
//         ├─ with_channel_capacity()                             ├─ runs window loop
//         ├─ with_title() / with_window_size()                   └─ blocks until exit
//         └─ with_frame_sink()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver, Sender};
use glam::Vec2;
use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::draw::DrawList;
use crate::core::globals::GlobalSystems;
use crate::core::message_bus::MessageBus;
use crate::core::platform_bridge::{CoreEvent, PlatformEvent};
use crate::core::resources::SessionResources;
use crate::core::state::StateKey;
use crate::core::{CoreSystemsOrchestrator, FrameSink};
use crate::platform::{Platform, WindowConfig};

//=== EngineBuilder =======================================================

/// Builder for an [`Engine`].
///
/// # Default Values
///
/// - **TPS**: 60.0 (logic ticks per second, `dt = 1 / tps`)
/// - **Channel capacity**: 128 platform events
/// - **Window**: "jamkit", 800×600
///
/// # Examples
///
/// ```no_run
/// use jamkit::prelude::*;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Screen { Title }
/// impl StateKey for Screen {}
///
/// EngineBuilder::<Screen>::new()
///     .with_title("Space Jam")
///     .with_window_size(1280, 720)
///     .with_tps(120.0)
///     .build()
///     .init(|systems| {
///         let menu = MenuState::new("Space Jam")
///             .with_item(MenuItem::button("Quit"), MenuAction::Quit);
///         systems.states.queue_initial(Screen::Title, menu);
///     })
///     .run();
/// ```
pub struct EngineBuilder<K: StateKey> {
    tps: f64,
    channel_capacity: usize,
    window: WindowConfig,
    frame_sink: Option<FrameSink>,
    _phantom: std::marker::PhantomData<K>,
}

impl<K: StateKey> EngineBuilder<K> {
    pub fn new() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
            window: WindowConfig::default(),
            frame_sink: None,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Sets the logic tick rate. Every tick advances states by `1 / tps`
    /// seconds regardless of how long it actually took.
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// Sets the platform → logic channel capacity. The window thread blocks
    /// when the logic thread falls this many frames behind.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.window.title = title.into();
        self
    }

    /// Sets the window's logical size, which is also the display size
    /// states lay themselves out against.
    ///
    /// # Panics
    ///
    /// Panics if either side is zero.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Window size must be positive, got {}x{}", width, height);
        self.window.width = width;
        self.window.height = height;
        self
    }

    /// Installs a callback that receives every tick's draw list and the
    /// messages published during that tick. Runs on the logic thread.
    pub fn with_frame_sink<F>(mut self, sink: F) -> Self
    where
        F: FnMut(&DrawList, &MessageBus) + Send + 'static,
    {
        self.frame_sink = Some(Box::new(sink));
        self
    }

    pub fn build(self) -> Engine<K> {
        info!(
            "Building engine (TPS: {}, channel: {}, window: {}x{})",
            self.tps, self.channel_capacity, self.window.width, self.window.height
        );

        let display_size = Vec2::new(self.window.width as f32, self.window.height as f32);
        let mut orchestrator = CoreSystemsOrchestrator::new(SessionResources::new(display_size));
        if let Some(sink) = self.frame_sink {
            orchestrator.set_frame_sink(sink);
        }

        Engine {
            orchestrator,
            tps: self.tps,
            channel_capacity: self.channel_capacity,
            window: self.window,
        }
    }
}

impl<K: StateKey> Default for EngineBuilder<K> {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// The runtime: a window on the calling thread plus a logic thread ticking
/// the [`GlobalSystems`].
///
/// ```text
/// Engine (Main Thread)
///   ├─► CoreSystemsOrchestrator (Logic Thread @ TPS)
///   │     └─► StateTracker, MessageBus, StateStack
///   │
///   └─► Platform (Winit Event Loop)
///         └─► Window, Input Polling
/// ```
pub struct Engine<K: StateKey> {
    orchestrator: CoreSystemsOrchestrator<K>,
    tps: f64,
    channel_capacity: usize,
    window: WindowConfig,
}

impl<K: StateKey> Engine<K> {
    //--- Initialization ---------------------------------------------------

    /// Configures the systems before they move to the logic thread. Queue
    /// the first states here with `systems.states.queue_initial(..)`.
    pub fn init<F>(mut self, init_fn: F) -> Self
    where
        F: FnOnce(&mut GlobalSystems<K>),
    {
        info!("Initializing engine systems");
        self.orchestrator.init_systems(init_fn);
        self
    }

    //--- Execution --------------------------------------------------------

    /// Runs until the window closes or a state quits.
    ///
    /// # Lifecycle
    ///
    /// 1. Creates the platform → logic channel and the quit channel back
    /// 2. Spawns the logic thread
    /// 3. Runs the window event loop (blocks here)
    /// 4. Joins the logic thread, which removes every state on its way out
    pub fn run(self) {
        info!("Starting engine runtime (TPS: {})", self.tps);

        //--- 1. Create communication channels ----------------------------
        let (tx, rx): (Sender<PlatformEvent>, Receiver<PlatformEvent>) = bounded(self.channel_capacity);
        let (core_tx, core_rx) = bounded::<CoreEvent>(1);

        //--- 2. Spawn the core logic thread -------------------------------
        let core_handle = self.orchestrator.spawn_core_thread(rx, core_tx, self.tps);
        info!("Core logic thread spawned");

        //--- 3. Launch the platform subsystem -----------------------------
        let platform = Platform::new(self.window, tx, core_rx);
        if let Err(e) = platform.run() {
            error!("Platform error: {}", e);
        }
        info!("Platform event loop exited");

        //--- 4. Cleanup: wait for the logic thread ------------------------
        match core_handle.join() {
            Ok(()) => info!("Core thread terminated cleanly"),
            Err(e) => error!("Core thread panicked: {:?}", e),
        }

        info!("Engine shutdown complete");
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Screen {
        Title,
    }

    impl StateKey for Screen {}

    //=====================================================================
    // EngineBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = EngineBuilder::<Screen>::new();
        assert_eq!(builder.tps, 60.0);
        assert_eq!(builder.channel_capacity, 128);
        assert_eq!(builder.window, WindowConfig::default());
        assert!(builder.frame_sink.is_none());
    }

    #[test]
    fn builder_with_tps() {
        let builder = EngineBuilder::<Screen>::new().with_tps(120.0);
        assert_eq!(builder.tps, 120.0);
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn builder_with_tps_panics_on_zero() {
        EngineBuilder::<Screen>::new().with_tps(0.0);
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn builder_with_tps_panics_on_negative() {
        EngineBuilder::<Screen>::new().with_tps(-60.0);
    }

    #[test]
    #[should_panic(expected = "Channel capacity must be positive")]
    fn builder_with_channel_capacity_panics_on_zero() {
        EngineBuilder::<Screen>::new().with_channel_capacity(0);
    }

    #[test]
    #[should_panic(expected = "Window size must be positive")]
    fn builder_with_window_size_panics_on_zero() {
        EngineBuilder::<Screen>::new().with_window_size(0, 600);
    }

    #[test]
    fn window_settings_are_kept() {
        let builder = EngineBuilder::<Screen>::new()
            .with_title("Jam")
            .with_window_size(1280, 720);
        assert_eq!(builder.window.title, "Jam");
        assert_eq!((builder.window.width, builder.window.height), (1280, 720));
    }

    #[test]
    fn window_size_becomes_display_size() {
        let mut display_size = Vec2::ZERO;
        EngineBuilder::<Screen>::new()
            .with_window_size(1024, 768)
            .build()
            .init(|systems| display_size = systems.resources.display_size);

        assert_eq!(display_size, Vec2::new(1024.0, 768.0));
    }

    #[test]
    fn fluent_chain_builds_engine() {
        let engine = EngineBuilder::<Screen>::new()
            .with_tps(30.0)
            .with_channel_capacity(256)
            .with_frame_sink(|_, _| {})
            .build();

        assert_eq!(engine.tps, 30.0);
        assert_eq!(engine.channel_capacity, 256);
    }

    #[test]
    fn init_queues_states() {
        struct Idle;
        impl crate::core::state::GameState<Screen> for Idle {}

        let mut queued = 0;
        EngineBuilder::<Screen>::new().build().init(|systems| {
            systems.states.queue_initial(Screen::Title, Idle);
            queued = systems.states.queued_len();
        });

        assert_eq!(queued, 1);
    }
}
