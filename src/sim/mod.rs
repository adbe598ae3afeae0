//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of I/O:
//! - Seeded RNG only
//! - One step per `tick()` call; cadence is the caller's job
//! - Side effects leave as `GameEvent`s, never as direct calls

pub mod collision;
pub mod difficulty;
pub mod outcome;
pub mod physics;
pub mod sparkle;
pub mod state;
pub mod tick;

pub use collision::{Rect, overlaps};
pub use difficulty::{DifficultyScaler, DifficultyState};
pub use outcome::{AudioCue, RoundOutcome, ScoreBand, evaluate};
pub use sparkle::{Sparkle, SparkleTrail};
pub use state::{Ball, EVENT_BACKLOG, GameEvent, GamePhase, GameRng, GameWorld, Paddle, Snapshot};
pub use tick::{TickInput, TickStatus, tick};
