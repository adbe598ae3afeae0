//! Game tuning and presets
//!
//! Every tunable of the simulation lives in `GameConfig`. Two presets cover
//! the shipped layouts: a fixed 1280x1024 stage and a stage sized to the
//! browser viewport. Configs load from JSON files.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
pub use crate::sim::outcome::{AudioCue, ScoreBand};

/// Stage layout preset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum Variant {
    /// Fixed 1280x1024 stage
    #[default]
    Classic,
    /// Stage matches the window; launch speeds scale with its size
    Viewport { width: f32, height: f32 },
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Classic => "Classic",
            Variant::Viewport { .. } => "Viewport",
        }
    }

    /// Parse a preset name. Viewport presets need a size, so they default
    /// to the classic stage dimensions.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(Variant::Classic),
            "viewport" | "window" => Some(Variant::Viewport {
                width: CLASSIC_WIDTH,
                height: CLASSIC_HEIGHT,
            }),
            _ => None,
        }
    }
}

/// Classic stage size
pub const CLASSIC_WIDTH: f32 = 1280.0;
pub const CLASSIC_HEIGHT: f32 = 1024.0;

/// Allowed range of horizontal ball speed (magnitude)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedBounds {
    pub min: f32,
    pub max: f32,
}

/// All simulation tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Stage ===
    pub stage_width: f32,
    pub stage_height: f32,
    /// Ball is lost once `ball.y > stage_height - floor_margin`
    pub floor_margin: f32,

    // === Ball ===
    pub ball_size: f32,
    /// Launch speed: vx is uniform in [-launch_speed_x, launch_speed_x)
    pub launch_speed_x: f32,
    pub launch_speed_y: f32,
    /// Spawn height is uniform in [spawn_y_min, spawn_y_min + spawn_y_span)
    pub spawn_y_min: f32,
    pub spawn_y_span: f32,
    /// Gravity per tick is `1 / (stage_height / gravity_scale)`
    pub gravity_scale: f32,
    /// Optional clamp on |vx| applied every tick
    pub speed_bounds: Option<SpeedBounds>,
    /// vx is multiplied by a uniform factor in this range on every catch
    pub bounce_jitter_min: f32,
    pub bounce_jitter_max: f32,
    /// vy is multiplied by this after it flips on a catch
    pub catch_vy_damping: f32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_min_width: f32,
    pub paddle_min_height: f32,
    /// Paddle top sits at `stage_height - paddle_row_offset`
    pub paddle_row_offset: f32,
    pub paddle_step: f32,

    // === Difficulty ===
    pub paddle_shrink: f32,
    /// Ticks per second at round start
    pub tick_rate: f32,
    pub tick_rate_growth: f32,
    /// `None` leaves tick-rate growth unbounded
    pub max_tick_rate: Option<f32>,
    /// Drop back to `tick_rate` when the round ends
    pub reset_tick_rate_on_game_over: bool,

    // === Sparkles ===
    pub sparkle_cap: usize,
    pub sparkle_fade: f32,
    pub sparkle_jitter: f32,

    // === Scoring ===
    /// Non-winning bands, ascending by `below`
    pub bands: Vec<ScoreBand>,
    pub win_threshold: u32,
    pub winning_url: String,

    // === Win screen ===
    pub overlay_start_y: f32,
    pub overlay_max_y: f32,
    pub overlay_drop_per_tick: f32,

    // === Audio ===
    pub music_volume: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::from_variant(Variant::Classic)
    }
}

impl GameConfig {
    /// Build the config for a layout preset
    pub fn from_variant(variant: Variant) -> Self {
        match variant {
            Variant::Classic => Self {
                bands: vec![
                    ScoreBand::new(5, "Wow, you really suck ass!", AudioCue::Zero),
                    ScoreBand::new(20, "You suck!", AudioCue::Low),
                    ScoreBand::new(30, "Not bad.", AudioCue::Mid),
                    ScoreBand::new(50, "Pretty good!", AudioCue::Good),
                ],
                ..Self::base()
            },
            Variant::Viewport { width, height } => {
                let speed_x = width / 400.0;
                Self {
                    stage_width: width,
                    stage_height: height,
                    launch_speed_x: speed_x,
                    launch_speed_y: height / 200.0,
                    spawn_y_min: height / 20.0,
                    spawn_y_span: height / 5.0,
                    speed_bounds: Some(SpeedBounds {
                        min: speed_x / 2.0,
                        max: speed_x * 1.5,
                    }),
                    catch_vy_damping: 1.0,
                    paddle_row_offset: 100.0,
                    sparkle_jitter: 15.0,
                    bands: vec![
                        ScoreBand::new(5, "Wow, you really suck ass!", AudioCue::Zero),
                        ScoreBand::new(15, "You suck!", AudioCue::Low),
                        ScoreBand::new(25, "Not bad.", AudioCue::Mid),
                        ScoreBand::new(40, "Pretty good!", AudioCue::Good),
                    ],
                    win_threshold: 40,
                    overlay_max_y: height / 6.0,
                    ..Self::base()
                }
            }
        }
    }

    /// Classic stage values without score bands
    fn base() -> Self {
        Self {
            stage_width: CLASSIC_WIDTH,
            stage_height: CLASSIC_HEIGHT,
            floor_margin: FLOOR_MARGIN,
            ball_size: BALL_SIZE,
            launch_speed_x: 5.0,
            launch_speed_y: 5.0,
            spawn_y_min: 0.0,
            spawn_y_span: CLASSIC_HEIGHT / 3.0,
            gravity_scale: 100.0,
            speed_bounds: None,
            bounce_jitter_min: BOUNCE_JITTER_MIN,
            bounce_jitter_max: BOUNCE_JITTER_MAX,
            catch_vy_damping: CATCH_VY_DAMPING,
            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_min_width: PADDLE_MIN_WIDTH,
            paddle_min_height: PADDLE_MIN_HEIGHT,
            paddle_row_offset: 50.0,
            paddle_step: PADDLE_STEP,
            paddle_shrink: PADDLE_SHRINK,
            tick_rate: TICK_RATE,
            tick_rate_growth: TICK_RATE_GROWTH,
            max_tick_rate: None,
            reset_tick_rate_on_game_over: true,
            sparkle_cap: SPARKLE_CAP,
            sparkle_fade: SPARKLE_FADE,
            sparkle_jitter: SPARKLE_JITTER,
            bands: Vec::new(),
            win_threshold: 50,
            winning_url: WINNING_URL.to_string(),
            overlay_start_y: OVERLAY_START_Y,
            overlay_max_y: 190.0,
            overlay_drop_per_tick: OVERLAY_DROP_PER_TICK,
            music_volume: MUSIC_VOLUME,
        }
    }

    /// Gravity per tick for the configured stage height
    pub fn gravity(&self) -> f32 {
        1.0 / (self.stage_height / self.gravity_scale)
    }

    /// Top of the paddle row
    pub fn paddle_y(&self) -> f32 {
        self.stage_height - self.paddle_row_offset
    }

    /// Check every value the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(name: &str, value: f32) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid(format!("{} must be positive, got {}", name, value)))
            }
        }

        positive("stage_width", self.stage_width)?;
        positive("stage_height", self.stage_height)?;
        positive("ball_size", self.ball_size)?;
        positive("gravity_scale", self.gravity_scale)?;
        positive("paddle_width", self.paddle_width)?;
        positive("paddle_height", self.paddle_height)?;
        positive("paddle_min_width", self.paddle_min_width)?;
        positive("paddle_min_height", self.paddle_min_height)?;
        positive("paddle_shrink", self.paddle_shrink)?;
        positive("tick_rate", self.tick_rate)?;
        positive("tick_rate_growth", self.tick_rate_growth)?;
        positive("bounce_jitter_min", self.bounce_jitter_min)?;
        positive("catch_vy_damping", self.catch_vy_damping)?;

        if self.paddle_min_width > self.paddle_width || self.paddle_min_height > self.paddle_height {
            return Err(ConfigError::Invalid(
                "paddle floor exceeds its starting size".to_string(),
            ));
        }
        if self.bounce_jitter_min > self.bounce_jitter_max {
            return Err(ConfigError::Invalid("bounce jitter range is inverted".to_string()));
        }
        if let Some(max) = self.max_tick_rate {
            if max.is_nan() || max < self.tick_rate {
                return Err(ConfigError::Invalid(format!(
                    "max_tick_rate {} is below tick_rate {}",
                    max, self.tick_rate
                )));
            }
        }
        if let Some(bounds) = self.speed_bounds {
            if bounds.min.is_nan() || bounds.min < 0.0 || bounds.min > bounds.max {
                return Err(ConfigError::Invalid(format!(
                    "speed bounds [{}, {}] are invalid",
                    bounds.min, bounds.max
                )));
            }
        }
        if self.sparkle_cap == 0 {
            return Err(ConfigError::Invalid("sparkle_cap must be at least 1".to_string()));
        }
        if self.bands.is_empty() {
            return Err(ConfigError::Invalid("at least one score band is required".to_string()));
        }
        if self.bands.windows(2).any(|w| w[0].below >= w[1].below) {
            return Err(ConfigError::Invalid(
                "score bands must be strictly ascending".to_string(),
            ));
        }
        if self.bands.iter().any(|b| b.below > self.win_threshold) {
            return Err(ConfigError::Invalid(format!(
                "score band reaches past win_threshold {}",
                self.win_threshold
            )));
        }
        Ok(())
    }

    /// Parse and validate a JSON config. Missing fields take classic defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load a config file, falling back to the classic preset on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{}; using classic defaults", e);
                Self::default()
            }
        }
    }

    /// Write the config as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        log::info!("Config saved to {}", path.as_ref().display());
        Ok(())
    }
}
