//! Game state and core simulation types
//!
//! `GameWorld` owns every piece of mutable state: entities, score, phase,
//! difficulty, RNG and the round-over bookkeeping.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::difficulty::{DifficultyScaler, DifficultyState};
use super::outcome::{AudioCue, RoundOutcome};
use super::sparkle::SparkleTrail;
use crate::settings::GameConfig;

/// Undrained `WallBounce`/`Catch` notices beyond this many queued events are
/// dropped. Round lifecycle events are always queued.
pub const EVENT_BACKLOG: usize = 256;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for start
    Menu,
    /// Ball in flight
    Playing,
    /// Ball was missed; outcome on screen until restart
    GameOver,
}

/// The falling star
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Top-left corner
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    pub size: f32,
}

impl Ball {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }
}

/// The player's wand. Its size lives in `DifficultyState`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub x: f32,
    pub y: f32,
}

impl Paddle {
    pub fn rect(&self, difficulty: &DifficultyState) -> Rect {
        Rect::new(self.x, self.y, difficulty.paddle_width, difficulty.paddle_height)
    }
}

/// Side effects requested by the simulation, drained by the caller
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// First start from the menu; audio output may need priming
    AudioUnlock,
    /// A new round began (start or restart)
    RoundStarted,
    MusicStart { volume: f32 },
    MusicStop,
    WallBounce,
    Catch { score: u32 },
    /// Ball was missed. Emitted once per round.
    RoundOver(RoundOutcome),
    PlayCue(AudioCue),
    OpenLink(String),
}

/// Seeded RNG for spawns, bounce jitter and sparkles
#[derive(Debug, Clone)]
pub struct GameRng {
    pub seed: u64,
    rng: Pcg32,
}

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Uniform in [0, 1)
    pub fn unit(&mut self) -> f32 {
        self.rng.random::<f32>()
    }

    /// Uniform in [min, max]
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        if min >= max {
            return min;
        }
        self.rng.random_range(min..=max)
    }

    pub fn inner(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }
}

/// Read-only view handed to renderers
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    pub stage: Vec2,
    pub ball: &'a Ball,
    pub paddle: Rect,
    pub sparkles: &'a SparkleTrail,
    pub score: u32,
    pub outcome: Option<&'a RoundOutcome>,
    /// Winning overlay offset, only while the win screen is up
    pub overlay_y: Option<f32>,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameWorld {
    pub(crate) config: GameConfig,
    pub(crate) rng: GameRng,
    pub(crate) phase: GamePhase,
    pub(crate) ball: Ball,
    pub(crate) paddle: Paddle,
    pub(crate) difficulty: DifficultyState,
    pub(crate) scaler: DifficultyScaler,
    pub(crate) sparkles: SparkleTrail,
    pub(crate) score: u32,
    /// Gravity fixed at round start so a mid-round resize can't change it
    pub(crate) gravity: f32,
    /// Set when the round-over effects fire; cleared only by a reset
    pub(crate) round_over_entered: bool,
    pub(crate) outcome: Option<RoundOutcome>,
    pub(crate) overlay_y: f32,
    /// Ticks since the current round started
    pub(crate) ticks: u64,
    /// Set by the first reset, which also asks the host to prime audio
    pub(crate) audio_unlocked: bool,
    /// Drained by the host after each tick, see `drain_events`
    pub(crate) events: Vec<GameEvent>,
}

impl GameWorld {
    /// Create a world on the menu screen. `config` is used as given; run it
    /// through `GameConfig::validate` first if it came from outside.
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let difficulty = DifficultyState::initial(&config);
        let paddle = Paddle {
            x: config.stage_width / 2.0 - difficulty.paddle_width / 2.0,
            y: config.paddle_y(),
        };
        let ball = Ball {
            pos: Vec2::new(config.stage_width / 2.0, config.spawn_y_min),
            vel: Vec2::ZERO,
            size: config.ball_size,
        };

        Self {
            rng: GameRng::new(seed),
            phase: GamePhase::Menu,
            ball,
            paddle,
            difficulty,
            scaler: DifficultyScaler::from_config(&config),
            sparkles: SparkleTrail::new(config.sparkle_cap, config.sparkle_fade, config.sparkle_jitter),
            score: 0,
            gravity: config.gravity(),
            round_over_entered: false,
            outcome: None,
            overlay_y: config.overlay_start_y,
            ticks: 0,
            audio_unlocked: false,
            events: Vec::new(),
            config,
        }
    }

    /// Leave the menu and begin the first round. Ignored outside the menu.
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::Menu {
            log::debug!("start ignored in {:?}", self.phase);
            return false;
        }
        self.reset_round();
        true
    }

    /// Begin a fresh round from any phase
    pub fn restart(&mut self) {
        self.reset_round();
    }

    fn reset_round(&mut self) {
        if !self.audio_unlocked {
            self.audio_unlocked = true;
            self.events.push(GameEvent::AudioUnlock);
        }

        let cfg = &self.config;

        self.difficulty = DifficultyState::initial(cfg);
        self.paddle = Paddle {
            x: cfg.stage_width / 2.0 - self.difficulty.paddle_width / 2.0,
            y: cfg.paddle_y(),
        };

        let x = self.rng.unit() * cfg.stage_width;
        let y = cfg.spawn_y_min + self.rng.unit() * cfg.spawn_y_span;
        let vx = (self.rng.unit() - 0.5) * 2.0 * cfg.launch_speed_x;
        self.ball = Ball {
            pos: Vec2::new(x, y),
            vel: Vec2::new(vx, cfg.launch_speed_y),
            size: cfg.ball_size,
        };

        self.score = 0;
        self.sparkles.clear();
        self.gravity = cfg.gravity();
        self.round_over_entered = false;
        self.outcome = None;
        self.overlay_y = cfg.overlay_start_y;
        self.ticks = 0;
        self.phase = GamePhase::Playing;

        self.events.push(GameEvent::RoundStarted);
        self.events.push(GameEvent::MusicStart {
            volume: cfg.music_volume,
        });
        log::info!(
            "Round started (seed {}): ball at ({:.1}, {:.1}) vel ({:.2}, {:.2})",
            self.rng.seed,
            x,
            y,
            vx,
            cfg.launch_speed_y
        );
    }

    /// Adapt to a new stage size: re-centre the paddle on its row and keep
    /// an in-flight ball above it
    pub fn resize(&mut self, width: f32, height: f32) {
        if !(width > 0.0 && height > 0.0) {
            log::warn!("Ignoring resize to {}x{}", width, height);
            return;
        }
        self.config.stage_width = width;
        self.config.stage_height = height;
        self.paddle.x = width / 2.0 - self.difficulty.paddle_width / 2.0;
        self.paddle.y = self.config.paddle_y();

        if self.phase == GamePhase::Playing {
            self.ball.pos.y = self.ball.pos.y.min(self.paddle.y - self.ball.size);
        }
        log::debug!("Stage resized to {}x{}", width, height);
    }

    /// Take every event raised since the last drain. Hosts should drain once
    /// per tick; an undrained queue stops taking bounce and catch notices at
    /// `EVENT_BACKLOG` entries.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Queue an informational event, dropping it if the backlog is full
    pub(crate) fn notify(&mut self, event: GameEvent) {
        if self.events.len() < EVENT_BACKLOG {
            self.events.push(event);
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn paddle(&self) -> &Paddle {
        &self.paddle
    }

    pub fn paddle_rect(&self) -> Rect {
        self.paddle.rect(&self.difficulty)
    }

    pub fn difficulty(&self) -> &DifficultyState {
        &self.difficulty
    }

    pub fn sparkle_count(&self) -> usize {
        self.sparkles.len()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    /// Outcome of the finished round, while on the game-over screen
    pub fn outcome(&self) -> Option<&RoundOutcome> {
        self.outcome.as_ref()
    }

    /// True once this round's game-over effects have fired
    pub fn round_over_entered(&self) -> bool {
        self.round_over_entered
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        let winning = self.outcome.as_ref().is_some_and(|o| o.is_winning);
        Snapshot {
            phase: self.phase,
            stage: Vec2::new(self.config.stage_width, self.config.stage_height),
            ball: &self.ball,
            paddle: self.paddle_rect(),
            sparkles: &self.sparkles,
            score: self.score,
            outcome: self.outcome.as_ref(),
            overlay_y: winning.then_some(self.overlay_y),
        }
    }
}
