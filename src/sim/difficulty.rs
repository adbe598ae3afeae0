//! Per-catch difficulty scaling
//!
//! Every catch shrinks the wand and speeds up the tick cadence. Nothing else
//! changes difficulty.

use serde::{Deserialize, Serialize};

use crate::interval_ms;
use crate::settings::GameConfig;

/// Current paddle dimensions and tick cadence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyState {
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Ticks per second
    pub tick_rate: f32,
}

impl DifficultyState {
    /// Starting difficulty for a fresh round
    pub fn initial(config: &GameConfig) -> Self {
        Self {
            paddle_width: config.paddle_width,
            paddle_height: config.paddle_height,
            tick_rate: config.tick_rate,
        }
    }

    /// Difficulty after `catches` catches from the initial state
    pub fn after_catches(config: &GameConfig, catches: u32) -> Self {
        let scaler = DifficultyScaler::from_config(config);
        let mut state = Self::initial(config);
        for _ in 0..catches {
            scaler.apply_catch(&mut state);
        }
        state
    }

    /// Milliseconds the scheduler should wait before the next tick
    pub fn tick_interval_ms(&self) -> f64 {
        interval_ms(self.tick_rate)
    }
}

/// Multiplicative shrink/speed-up applied on each catch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyScaler {
    pub shrink: f32,
    pub min_width: f32,
    pub min_height: f32,
    pub rate_growth: f32,
    /// Upper bound on the tick rate; `None` lets it grow without limit
    pub max_tick_rate: Option<f32>,
}

impl DifficultyScaler {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            shrink: config.paddle_shrink,
            min_width: config.paddle_min_width,
            min_height: config.paddle_min_height,
            rate_growth: config.tick_rate_growth,
            max_tick_rate: config.max_tick_rate,
        }
    }

    /// Apply one catch worth of scaling
    pub fn apply_catch(&self, state: &mut DifficultyState) {
        state.paddle_width = (state.paddle_width * self.shrink).max(self.min_width);
        state.paddle_height = (state.paddle_height * self.shrink).max(self.min_height);

        let rate = state.tick_rate * self.rate_growth;
        state.tick_rate = match self.max_tick_rate {
            Some(max) => rate.min(max),
            None => rate,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_single_catch() {
        let config = GameConfig::default();
        let state = DifficultyState::after_catches(&config, 1);
        assert_eq!(state.paddle_width, (300.0f32 * 0.98).max(60.0));
        assert_eq!(state.paddle_height, (25.0f32 * 0.98).max(15.0));
        assert_eq!(state.tick_rate, 120.0 * 1.012);
    }

    #[test]
    fn test_floors_hold() {
        let config = GameConfig::default();
        let state = DifficultyState::after_catches(&config, 500);
        assert_eq!(state.paddle_width, 60.0);
        assert_eq!(state.paddle_height, 15.0);
    }

    #[test]
    fn test_tick_rate_unbounded_by_default() {
        let config = GameConfig::default();
        let state = DifficultyState::after_catches(&config, 200);
        assert!(state.tick_rate > 120.0 * 10.0);
        assert!(state.tick_interval_ms() < 1000.0 / 1200.0);
    }

    #[test]
    fn test_tick_rate_ceiling() {
        let config = GameConfig {
            max_tick_rate: Some(240.0),
            ..GameConfig::default()
        };
        let state = DifficultyState::after_catches(&config, 200);
        assert_eq!(state.tick_rate, 240.0);
    }

    #[test]
    fn test_initial_interval() {
        let state = DifficultyState::initial(&GameConfig::default());
        assert!((state.tick_interval_ms() - 1000.0 / 120.0).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn width_non_increasing_and_floored(catches in 0u32..400) {
            let config = GameConfig::default();
            let scaler = DifficultyScaler::from_config(&config);
            let mut state = DifficultyState::initial(&config);
            for _ in 0..catches {
                let before = state;
                scaler.apply_catch(&mut state);
                prop_assert_eq!(state.paddle_width, (before.paddle_width * 0.98).max(60.0));
                prop_assert!(state.paddle_width <= before.paddle_width);
                prop_assert!(state.paddle_height <= before.paddle_height);
                prop_assert!(state.tick_rate > before.tick_rate);
            }
            prop_assert!(state.paddle_width >= 60.0 && state.paddle_width <= 300.0);
            prop_assert!(state.paddle_height >= 15.0 && state.paddle_height <= 25.0);
        }
    }
}
