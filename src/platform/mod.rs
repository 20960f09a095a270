//=========================================================================
// Platform Subsystem
//
// Winit window on the main thread, talking to the logic thread only
// through channels.
//
// Architecture:
// ```text
//  Main Thread:                     Logic Thread:
//  ┌──────────────────────────┐    ┌──────────────────┐
//  │  Winit Event Loop        │    │  Orchestrator    │
//  │   ↓                      │    │   ↓              │
//  │  InputProcessor          │    │  StateTracker    │
//  │   ↓                      │    │   ↓              │
//  │  InputBuffer             │    │  StateStack      │
//  │   ↓                      │    │                  │
//  │  RedrawRequested (flush) │    │                  │
//  │   ↓                      │    │                  │
//  │  PlatformEvent ──────────┼───►│                  │
//  │  CoreEvent ◄─────────────┼────│  (on quit)       │
//  └──────────────────────────┘    └──────────────────┘
// ```
//
// RedrawRequested is the frame boundary: everything buffered since the
// last one is sent as a single `PlatformEvent::Inputs`. Empty frames
// send nothing. The same boundary polls for `CoreEvent::Stopped` so a
// game-initiated quit closes the window.
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod input_processor;

//=== External Crates =====================================================

use crossbeam_channel::{Receiver, Sender, TryRecvError};
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::platform_bridge::{CoreEvent, PlatformError, PlatformEvent};
use input_buffer::InputBuffer;
use input_processor::InputProcessor;

//=== WindowConfig ========================================================

/// Window parameters fixed at build time.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "jamkit".to_owned(),
            width: 800,
            height: 600,
        }
    }
}

//=== Platform ============================================================

/// Window owner and input aggregator. Not `Send`; lives on the thread
/// that called `Engine::run()` (Winit requires the main thread on macOS).
pub(crate) struct Platform {
    config: WindowConfig,

    /// Created lazily in `resumed()`.
    window: Option<Window>,

    buffer: InputBuffer,
    event_sender: Sender<PlatformEvent>,
    core_events: Receiver<CoreEvent>,
    input_processor: InputProcessor,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(
        config: WindowConfig,
        event_sender: Sender<PlatformEvent>,
        core_events: Receiver<CoreEvent>,
    ) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            config,
            window: None,
            buffer: InputBuffer::new(),
            event_sender,
            core_events,
            input_processor: InputProcessor::new(),
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the event loop until the window closes or the logic thread stops.
    ///
    /// # Panics
    ///
    /// Winit panics if this is called off the main thread on macOS/iOS.
    pub(crate) fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop =
            EventLoop::new().map_err(|e| PlatformError::EventLoopCreation(e.to_string()))?;

        event_loop
            .run_app(&mut self)
            .map_err(|e| PlatformError::EventLoopExecution(e.to_string()))
    }

    //--- Internal Helpers -------------------------------------------------

    /// Sends buffered input to the logic thread. Dropped with a warning if
    /// the logic thread is gone.
    fn flush_input_buffer(&mut self) {
        let Some((discrete, continuous)) = self.buffer.drain() else {
            return;
        };

        let discrete_count = discrete.len();
        let continuous_count = continuous.len();
        trace!(
            target: "platform::input",
            "Flushing {} discrete + {} continuous events",
            discrete_count,
            continuous_count
        );

        if self.event_sender.send(PlatformEvent::Inputs { discrete, continuous }).is_err() {
            warn!(
                target: "platform::input",
                "Channel disconnected, dropping {} events",
                discrete_count + continuous_count
            );
        }
    }

    /// True once the logic thread has stopped (quit or panic).
    fn core_stopped(&self) -> bool {
        match self.core_events.try_recv() {
            Ok(CoreEvent::Stopped) => {
                info!(target: "platform", "Game requested quit");
                true
            }
            Err(TryRecvError::Disconnected) => {
                warn!(target: "platform", "Logic thread gone, closing window");
                true
            }
            Err(TryRecvError::Empty) => false,
        }
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.config.title.as_str())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                let _ = self.event_sender.send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                let _ = self.event_sender.send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }

            WindowEvent::ModifiersChanged(state) => {
                trace!(target: "platform::input", "Modifiers changed: {:?}", state);
                self.input_processor.update_modifiers(state.state());
            }

            WindowEvent::CursorMoved { position, .. } => {
                let event = self
                    .input_processor
                    .process_mouse_move(position.x as f32, position.y as f32);
                self.buffer.push_continuous(event);
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                match self.input_processor.process_key_event(key_event) {
                    Some(event) => self.buffer.push_discrete(event),
                    None => trace!(target: "platform::input", "Unmapped key ignored"),
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let event = self.input_processor.process_mouse_button(*button, *state);
                self.buffer.push_discrete(event);
            }

            WindowEvent::RedrawRequested => {
                self.flush_input_buffer();

                if self.core_stopped() {
                    event_loop.exit();
                    return;
                }

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{InputEvent, KeyCode, Modifiers};
    use crossbeam_channel::unbounded;

    fn platform() -> (Platform, Receiver<PlatformEvent>, Sender<CoreEvent>) {
        let (tx, rx) = unbounded();
        let (core_tx, core_rx) = unbounded();
        (Platform::new(WindowConfig::default(), tx, core_rx), rx, core_tx)
    }

    fn space() -> InputEvent {
        InputEvent::KeyDown {
            key: KeyCode::Space,
            modifiers: Modifiers::NONE,
        }
    }

    #[test]
    fn window_is_created_lazily() {
        let (platform, _rx, _core) = platform();
        assert!(platform.window().is_none());
    }

    #[test]
    fn default_window_config() {
        let config = WindowConfig::default();
        assert_eq!((config.width, config.height), (800, 600));
        assert_eq!(config.title, "jamkit");
    }

    #[test]
    fn flush_empty_buffer_sends_nothing() {
        let (mut platform, rx, _core) = platform();
        platform.flush_input_buffer();
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn flush_sends_one_batch_then_nothing() {
        let (mut platform, rx, _core) = platform();
        platform.buffer.push_discrete(space());
        platform.buffer.push_continuous(InputEvent::MouseMoved { x: 1.0, y: 2.0 });

        platform.flush_input_buffer();
        platform.flush_input_buffer();

        match rx.try_recv() {
            Ok(PlatformEvent::Inputs { discrete, continuous }) => {
                assert_eq!(discrete, vec![space()]);
                assert_eq!(continuous.len(), 1);
            }
            other => panic!("Expected Inputs event, got {:?}", other),
        }
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn flush_survives_disconnected_core() {
        let (mut platform, rx, _core) = platform();
        platform.buffer.push_discrete(space());
        drop(rx);

        platform.flush_input_buffer();
        assert!(platform.buffer.is_empty());
    }

    #[test]
    fn core_stop_is_detected() {
        let (platform, _rx, core) = platform();
        assert!(!platform.core_stopped());

        core.send(CoreEvent::Stopped).unwrap();
        assert!(platform.core_stopped());
    }

    #[test]
    fn core_disconnect_counts_as_stopped() {
        let (platform, _rx, core) = platform();
        drop(core);
        assert!(platform.core_stopped());
    }
}
