//! Headless collaborators for the native binary and tests

use std::collections::VecDeque;
use std::time::Duration;

use super::{InputSource, LinkOpener, RenderSurface, Scheduler};
use crate::sim::{GamePhase, GameWorld, Snapshot, TickInput};

/// Replays a fixed list of inputs, then idles
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    queue: VecDeque<TickInput>,
}

impl ScriptedInput {
    pub fn new(inputs: impl IntoIterator<Item = TickInput>) -> Self {
        Self {
            queue: inputs.into_iter().collect(),
        }
    }

    pub fn push(&mut self, input: TickInput) {
        self.queue.push_back(input);
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _world: &GameWorld) -> TickInput {
        self.queue.pop_front().unwrap_or_default()
    }
}

/// Logs the link instead of opening a browser
#[derive(Debug, Default)]
pub struct LogLinkOpener;

impl LinkOpener for LogLinkOpener {
    fn open(&mut self, url: &str) {
        log::info!("Open link: {}", url);
    }
}

/// Keeps every opened link
#[derive(Debug, Default)]
pub struct RecordingLinks {
    pub opened: Vec<String>,
}

impl LinkOpener for RecordingLinks {
    fn open(&mut self, url: &str) {
        self.opened.push(url.to_string());
    }
}

/// Text "renderer": logs the HUD whenever the score or phase changes
#[derive(Debug, Default)]
pub struct LogSurface {
    last: Option<(GamePhase, u32)>,
    pub frames: u64,
}

impl RenderSurface for LogSurface {
    fn draw(&mut self, snapshot: &Snapshot<'_>) {
        self.frames += 1;
        let key = (snapshot.phase, snapshot.score);
        if self.last == Some(key) {
            return;
        }
        self.last = Some(key);

        match snapshot.phase {
            GamePhase::Menu => log::info!("Welcome to Shooting Star. Press confirm to play."),
            GamePhase::Playing => log::debug!(
                "Score: {} | wand {:.0}px wide | {} sparkles",
                snapshot.score,
                snapshot.paddle.w,
                snapshot.sparkles.len()
            ),
            GamePhase::GameOver => match snapshot.outcome {
                Some(outcome) if outcome.is_winning => log::info!("YOU WIN! Final score {}", snapshot.score),
                Some(outcome) => log::info!("{} (score {})", outcome.message, snapshot.score),
                None => {}
            },
        }
    }
}

/// Real-time pacing with `thread::sleep`
#[derive(Debug, Default)]
pub struct SleepScheduler;

impl Scheduler for SleepScheduler {
    fn wait(&mut self, interval: Duration) {
        std::thread::sleep(interval);
    }
}

/// Simulated clock: records waits without sleeping
#[derive(Debug, Default)]
pub struct ManualClock {
    pub elapsed: Duration,
    pub waits: Vec<Duration>,
}

impl Scheduler for ManualClock {
    fn wait(&mut self, interval: Duration) {
        self.elapsed += interval;
        self.waits.push(interval);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::GameConfig;

    #[test]
    fn test_scripted_input_drains_then_idles() {
        let world = GameWorld::new(GameConfig::default(), 1);
        let mut input = ScriptedInput::new([TickInput {
            left: true,
            ..Default::default()
        }]);
        assert!(input.poll(&world).left);
        assert_eq!(input.remaining(), 0);
        assert_eq!(input.poll(&world), TickInput::default());
    }

    #[test]
    fn test_manual_clock_accumulates() {
        let mut clock = ManualClock::default();
        clock.wait(Duration::from_millis(8));
        clock.wait(Duration::from_millis(7));
        assert_eq!(clock.elapsed, Duration::from_millis(15));
        assert_eq!(clock.waits.len(), 2);
    }
}
