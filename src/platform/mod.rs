//! Platform abstraction layer
//!
//! The simulation never touches devices. These traits are the contracts the
//! runner drives:
//! - Input snapshots
//! - Audio cues and background music
//! - Opening the win link
//! - Drawing a frame
//! - Waiting between ticks

pub mod autopilot;
pub mod headless;

use std::time::Duration;

use crate::sim::{AudioCue, GameWorld, Snapshot, TickInput};

pub use autopilot::Autopilot;
pub use headless::{LogLinkOpener, LogSurface, ManualClock, RecordingLinks, ScriptedInput, SleepScheduler};

/// Source of per-tick input
pub trait InputSource {
    /// Input for the next tick. `world` is the state the tick will run on.
    fn poll(&mut self, world: &GameWorld) -> TickInput;
}

/// Audio output
pub trait AudioSink {
    /// Play a cue from the start, once
    fn play_once(&mut self, cue: AudioCue);

    /// Prime output after the first user gesture (mobile browsers)
    fn unlock(&mut self) {}

    fn start_music(&mut self, _volume: f32) {}

    fn stop_music(&mut self) {}
}

/// Opens external links (the win reward)
pub trait LinkOpener {
    fn open(&mut self, url: &str);
}

/// Draws a frame from a snapshot
pub trait RenderSurface {
    fn draw(&mut self, snapshot: &Snapshot<'_>);
}

/// Waits between ticks
pub trait Scheduler {
    fn wait(&mut self, interval: Duration);
}
