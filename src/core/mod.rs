//=========================================================================
// Core Systems Orchestrator
//
// Owns every system that runs on the logic (non-platform) thread and
// ticks them at a fixed rate.
//
// Each tick:
//  1. Drain platform events (window close ends the loop)
//  2. Fold input into the tracker, update the state stack with dt = 1/tps
//  3. Apply queued stack commands
//  4. Build the draw list and hand it to the frame sink
//  5. Sleep out the rest of the tick
//
// The window thread is only reached through channels: input comes in as
// `PlatformEvent`s, and a quit goes back out as `CoreEvent::Stopped`.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod draw;
pub mod globals;
pub mod input;
pub mod level;
pub mod menu;
pub mod message_bus;
pub mod platform_bridge;
pub mod resources;
pub mod state;
pub mod tile;

//=== Standard Library Imports ============================================

use std::thread;
use std::time::{Duration, Instant};

//=== External Crates =====================================================

use crossbeam_channel::{Receiver, Sender};
use log::{debug, info, warn};

//=== Internal Modules ====================================================

use draw::DrawList;
use globals::{GlobalContext, GlobalSystems};
use message_bus::MessageBus;
use platform_bridge::{CoreEvent, EventCollector, PlatformEvent, TickControl};
use resources::SessionResources;
use state::StateKey;

//=== FrameSink ===========================================================

/// Receives every tick's draw list along with the messages published
/// during that tick. Runs on the logic thread.
pub type FrameSink = Box<dyn FnMut(&DrawList, &MessageBus) + Send>;

//=== CoreSystemsOrchestrator =============================================

pub(crate) struct CoreSystemsOrchestrator<K: StateKey> {
    systems: GlobalSystems<K>,
    context: GlobalContext<K>,
    frame_sink: Option<FrameSink>,
    draw_list: DrawList,
}

impl<K: StateKey> CoreSystemsOrchestrator<K> {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(resources: SessionResources) -> Self {
        Self {
            systems: GlobalSystems::new(resources),
            context: GlobalContext::new(),
            frame_sink: None,
            draw_list: DrawList::new(),
        }
    }

    /// Gives the game a chance to configure systems before the thread starts.
    pub(crate) fn init_systems<F>(&mut self, init_fn: F)
    where
        F: FnOnce(&mut GlobalSystems<K>),
    {
        init_fn(&mut self.systems);
        debug!("{} initial states queued", self.systems.states.queued_len());
    }

    pub(crate) fn set_frame_sink(&mut self, sink: FrameSink) {
        self.frame_sink = Some(sink);
    }

    //--- Execution --------------------------------------------------------

    /// Moves the orchestrator onto its own thread and ticks it at `tps`
    /// until the window closes or a state asks to quit.
    pub(crate) fn spawn_core_thread(
        self,
        receiver: Receiver<PlatformEvent>,
        core_events: Sender<CoreEvent>,
        tps: f64,
    ) -> thread::JoinHandle<()> {
        thread::spawn(move || self.run_loop(receiver, core_events, tps))
    }

    fn run_loop(mut self, receiver: Receiver<PlatformEvent>, core_events: Sender<CoreEvent>, tps: f64) {
        let frame_duration = Duration::from_secs_f64(1.0 / tps);
        let dt = frame_duration.as_secs_f32();
        let mut collector = EventCollector::new(receiver);

        self.systems.start(&mut self.context);
        info!("Core thread running at {} TPS", tps);

        loop {
            let frame_start = Instant::now();

            //--- Step 1: Gather platform events ---------------------------
            if collector.collect_frame() == TickControl::Exit {
                info!("Window closed, core thread exiting");
                break;
            }
            self.context.frame_events.extend(collector.take_batches());

            //--- Step 2-4: Update, draw, present --------------------------
            if self.tick(dt) == TickControl::Exit {
                info!("Quit requested, core thread exiting");
                if core_events.send(CoreEvent::Stopped).is_err() {
                    warn!("Platform already gone, quit signal dropped");
                }
                break;
            }

            //--- Step 5: Maintain fixed pacing ----------------------------
            let elapsed = frame_start.elapsed();
            if elapsed < frame_duration {
                thread::sleep(frame_duration - elapsed);
            }
        }

        self.systems.shutdown(&mut self.context);
    }

    /// Runs one tick over whatever input is already in the context.
    fn tick(&mut self, dt: f32) -> TickControl {
        self.systems.update(&mut self.context, dt);
        self.systems.draw(&mut self.draw_list);

        if let Some(sink) = self.frame_sink.as_mut() {
            sink(&self.draw_list, &self.context.messages);
        }

        if self.context.quit_requested {
            TickControl::Exit
        } else {
            TickControl::Continue
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
