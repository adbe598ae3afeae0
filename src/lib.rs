//! Shooting Star - a falling-star paddle reflex game
//!
//! Core modules:
//! - `sim`: Simulation core (physics, collisions, difficulty, game state)
//! - `settings`: Data-driven tuning and the per-variant presets
//! - `audio`: Cue/music bookkeeping behind the `AudioSink` contract
//! - `platform`: Collaborator contracts (input, audio, links, rendering, scheduling)
//! - `runner`: Wires a `GameWorld` to its collaborators

pub mod audio;
pub mod error;
pub mod platform;
pub mod runner;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use runner::Game;
pub use settings::{GameConfig, ScoreBand, Variant};

/// Reference-unit defaults (pixels, ticks)
pub mod consts {
    /// Ball edge length (the star sprite is square)
    pub const BALL_SIZE: f32 = 32.0;

    /// Paddle starting dimensions
    pub const PADDLE_WIDTH: f32 = 300.0;
    pub const PADDLE_HEIGHT: f32 = 25.0;
    /// Paddle never shrinks below these
    pub const PADDLE_MIN_WIDTH: f32 = 60.0;
    pub const PADDLE_MIN_HEIGHT: f32 = 15.0;
    /// Horizontal paddle travel per tick while a direction is held
    pub const PADDLE_STEP: f32 = 10.0;
    /// Multiplicative paddle shrink applied per catch
    pub const PADDLE_SHRINK: f32 = 0.98;

    /// Starting tick rate (ticks per second)
    pub const TICK_RATE: f32 = 120.0;
    /// Multiplicative tick-rate growth per catch
    pub const TICK_RATE_GROWTH: f32 = 1.012;

    /// Bounce-angle variation applied to vx on a catch
    pub const BOUNCE_JITTER_MIN: f32 = 0.8;
    pub const BOUNCE_JITTER_MAX: f32 = 1.2;
    /// vy is scaled by this after the bounce on every catch
    pub const CATCH_VY_DAMPING: f32 = 0.995;

    /// Sparkle trail
    pub const SPARKLE_CAP: usize = 20;
    pub const SPARKLE_FADE: f32 = 0.02;
    pub const SPARKLE_JITTER: f32 = 10.0;

    /// Ball is lost once its top passes `stage_height - FLOOR_MARGIN`
    pub const FLOOR_MARGIN: f32 = 30.0;

    /// Winning overlay (sunglasses) drop animation start offset
    pub const OVERLAY_START_Y: f32 = -300.0;
    /// Overlay drop speed per game-over tick
    pub const OVERLAY_DROP_PER_TICK: f32 = 1.0;

    pub const MUSIC_VOLUME: f32 = 0.25;

    pub const WINNING_URL: &str = "https://www.youtube.com/watch?v=9QS0q3mGPGg";
}

/// Interval between ticks (ms) for a tick rate in ticks per second
#[inline]
pub fn interval_ms(tick_rate: f32) -> f64 {
    1000.0 / tick_rate as f64
}
