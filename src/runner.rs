//! Game loop driver
//!
//! Owns a `GameWorld` plus its collaborators. Each frame polls input, ticks
//! the world, routes the raised events to audio/link handlers and draws.
//! The wait before the next frame comes from the world's current
//! difficulty, so the loop speeds up as the player catches more stars.

use std::time::Duration;

use crate::platform::{AudioSink, InputSource, LinkOpener, RenderSurface, Scheduler};
use crate::sim::{GameEvent, GameWorld, RoundOutcome, TickStatus, tick};

/// Game instance holding the world and everything it talks to
pub struct Game<I, A, L, R> {
    world: GameWorld,
    input: I,
    audio: A,
    links: L,
    surface: R,
    rounds_finished: u32,
    last_outcome: Option<RoundOutcome>,
}

impl<I, A, L, R> Game<I, A, L, R>
where
    I: InputSource,
    A: AudioSink,
    L: LinkOpener,
    R: RenderSurface,
{
    pub fn new(world: GameWorld, input: I, audio: A, links: L, surface: R) -> Self {
        Self {
            world,
            input,
            audio,
            links,
            surface,
            rounds_finished: 0,
            last_outcome: None,
        }
    }

    /// Run one frame that the scheduler paced at `interval_ms`
    pub fn frame(&mut self, interval_ms: f64) -> TickStatus {
        let input = self.input.poll(&self.world);
        let status = tick(&mut self.world, &input, interval_ms);
        self.dispatch_events();
        self.surface.draw(&self.world.snapshot());
        status
    }

    /// Route pending world events to the collaborators
    fn dispatch_events(&mut self) {
        for event in self.world.drain_events() {
            match event {
                GameEvent::AudioUnlock => self.audio.unlock(),
                GameEvent::MusicStart { volume } => self.audio.start_music(volume),
                GameEvent::MusicStop => self.audio.stop_music(),
                GameEvent::PlayCue(cue) => self.audio.play_once(cue),
                GameEvent::OpenLink(url) => self.links.open(&url),
                GameEvent::RoundOver(outcome) => {
                    self.rounds_finished += 1;
                    self.last_outcome = Some(outcome);
                }
                GameEvent::RoundStarted | GameEvent::WallBounce | GameEvent::Catch { .. } => {}
            }
        }
    }

    /// Delay before the next frame. Sub-nanosecond intervals round to zero.
    pub fn next_interval(&self) -> Duration {
        let ms = self.world.difficulty().tick_interval_ms();
        Duration::try_from_secs_f64(ms / 1000.0).unwrap_or(Duration::ZERO)
    }

    /// Drive frames until `rounds` rounds have ended or `max_ticks` frames
    /// ran. Returns the number of frames run.
    pub fn run<S: Scheduler>(&mut self, scheduler: &mut S, rounds: u32, max_ticks: u64) -> u64 {
        let mut frames = 0;
        while frames < max_ticks && self.rounds_finished < rounds {
            // The tick gets the exact interval; only the wait is quantised
            let interval_ms = self.world.difficulty().tick_interval_ms();
            scheduler.wait(self.next_interval());
            self.frame(interval_ms);
            frames += 1;
        }
        frames
    }

    /// Start a fresh round right away (play-again button)
    pub fn restart(&mut self) {
        self.world.restart();
        self.dispatch_events();
    }

    /// Forward a window resize
    pub fn resize(&mut self, width: f32, height: f32) {
        self.world.resize(width, height);
    }

    pub fn world(&self) -> &GameWorld {
        &self.world
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn links(&self) -> &L {
        &self.links
    }

    pub fn surface(&self) -> &R {
        &self.surface
    }

    pub fn rounds_finished(&self) -> u32 {
        self.rounds_finished
    }

    pub fn last_outcome(&self) -> Option<&RoundOutcome> {
        self.last_outcome.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::AudioManager;
    use crate::platform::{Autopilot, LogSurface, ManualClock, RecordingLinks, ScriptedInput};
    use crate::settings::GameConfig;
    use crate::sim::{AudioCue, GamePhase, TickInput};
    use glam::Vec2;

    type TestGame = Game<ScriptedInput, AudioManager, RecordingLinks, LogSurface>;

    const CONFIRM: TickInput = TickInput {
        left: false,
        right: false,
        confirm: true,
        drag_dx: 0.0,
    };

    fn game(seed: u64) -> TestGame {
        Game::new(
            GameWorld::new(GameConfig::default(), seed),
            ScriptedInput::default(),
            AudioManager::new(),
            RecordingLinks::default(),
            LogSurface::default(),
        )
    }

    fn started(seed: u64) -> TestGame {
        let mut game = game(seed);
        game.input.push(CONFIRM);
        game.frame(8.0);
        game
    }

    fn miss_next_frame(game: &mut TestGame) {
        game.world.ball.pos = Vec2::new(100.0, 1010.0);
        game.world.ball.vel = Vec2::new(0.0, 5.0);
    }

    fn miss(game: &mut TestGame, score: u32) {
        game.world.score = score;
        miss_next_frame(game);
        game.frame(8.0);
    }

    #[test]
    fn test_start_unlocks_audio_and_music() {
        let game = started(1);
        assert_eq!(game.world().phase(), GamePhase::Playing);
        assert!(game.audio().is_unlocked());
        assert!(game.audio().music_playing());
        assert_eq!(game.audio().music_volume(), 0.25);
    }

    #[test]
    fn test_cue_plays_once_per_game_over() {
        let mut game = started(2);
        miss(&mut game, 12);
        for _ in 0..100 {
            game.frame(8.0);
        }
        let cues: Vec<AudioCue> = game.audio().played().iter().map(|p| p.cue).collect();
        assert_eq!(cues, vec![AudioCue::Low]);
        assert!(game.links().opened.is_empty());
        assert_eq!(game.rounds_finished(), 1);
        assert_eq!(game.last_outcome().map(|o| o.message.as_str()), Some("You suck!"));
    }

    #[test]
    fn test_restart_rearms_cue() {
        let mut game = started(3);
        miss(&mut game, 0);
        game.frame(8.0);

        game.input.push(CONFIRM);
        game.frame(8.0);
        assert_eq!(game.world().phase(), GamePhase::Playing);
        assert_eq!(game.world().score(), 0);
        assert_eq!(game.world().sparkle_count(), 0);

        miss(&mut game, 0);
        let cues: Vec<AudioCue> = game.audio().played().iter().map(|p| p.cue).collect();
        assert_eq!(cues, vec![AudioCue::Zero, AudioCue::Zero]);
        assert_eq!(game.rounds_finished(), 2);
    }

    #[test]
    fn test_win_opens_link_once() {
        let mut game = started(4);
        miss(&mut game, 60);
        for _ in 0..500 {
            game.frame(8.0);
        }
        assert_eq!(game.links().opened.len(), 1);
        assert!(game.links().opened[0].starts_with("https://"));
        assert!(!game.audio().music_playing());
        let cues: Vec<AudioCue> = game.audio().played().iter().map(|p| p.cue).collect();
        assert_eq!(cues, vec![AudioCue::Winning]);
    }

    #[test]
    fn test_interval_tracks_difficulty() {
        let mut game = started(5);
        let base = game.next_interval();
        game.world.difficulty.tick_rate *= 2.0;
        assert!(game.next_interval() < base);
    }

    #[test]
    fn test_run_until_round_over_with_manual_clock() {
        let mut game = Game::new(
            GameWorld::new(GameConfig::default(), 6),
            Autopilot::default(),
            AudioManager::new(),
            RecordingLinks::default(),
            LogSurface::default(),
        );
        let mut clock = ManualClock::default();
        let frames = game.run(&mut clock, 1, 200_000);

        assert_eq!(game.rounds_finished(), 1);
        assert_eq!(clock.waits.len() as u64, frames);
        assert_eq!(game.surface().frames, frames);
        assert_eq!(game.audio().played().len(), 1);
    }

    #[test]
    fn test_catch_shortens_wait() {
        let mut game = started(7);
        let paddle = game.world.paddle_rect();
        game.world.ball.pos = Vec2::new(paddle.x + 50.0, paddle.y - 32.0);
        game.world.ball.vel = Vec2::new(2.0, 4.0);

        let mut clock = ManualClock::default();
        game.run(&mut clock, 1, 3);

        assert_eq!(game.world().score(), 1);
        assert!(clock.waits[1] < clock.waits[0]);
        assert_eq!(clock.waits[1], clock.waits[2]);
    }

    #[test]
    fn test_round_ends_at_extreme_tick_rate() {
        let mut game = started(8);
        game.world.difficulty.tick_rate = 120.0 * 1.012f32.powi(1400);
        assert_eq!(game.next_interval(), Duration::ZERO);
        miss_next_frame(&mut game);

        let frames = game.run(&mut ManualClock::default(), 1, 10_000);

        assert_eq!(frames, 1);
        assert_eq!(game.rounds_finished(), 1);
        assert_eq!(game.world().phase(), GamePhase::GameOver);
        assert_eq!(game.world().difficulty().tick_rate, 120.0);
    }

    #[test]
    fn test_restart_and_resize_forwarding() {
        let mut game = started(9);
        miss(&mut game, 3);
        assert_eq!(game.world().phase(), GamePhase::GameOver);

        game.restart();
        assert_eq!(game.world().phase(), GamePhase::Playing);
        assert!(game.audio().music_playing());

        game.resize(800.0, 600.0);
        assert_eq!(game.world().config().stage_width, 800.0);
        assert_eq!(game.world().paddle_rect().y, 550.0);
    }
}
