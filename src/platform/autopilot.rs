//! Demo-mode input: the computer plays
//!
//! Chases the star with a slowly wandering aim offset so it plays well for a
//! while and eventually misses once the wand has shrunk.

use super::InputSource;
use crate::sim::{GamePhase, GameWorld, TickInput};

#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Peak aim error in pixels
    pub wobble: f32,
    /// Ticks to linger on the game-over screen before playing again;
    /// `None` stays there
    pub replay_after: Option<u32>,
    /// Ticks polled so far
    clock: u64,
    game_over_ticks: u32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self::new(60.0)
    }
}

impl Autopilot {
    pub fn new(wobble: f32) -> Self {
        Self {
            wobble,
            replay_after: None,
            clock: 0,
            game_over_ticks: 0,
        }
    }

    pub fn replaying_after(mut self, ticks: u32) -> Self {
        self.replay_after = Some(ticks);
        self
    }

    /// Current aim error, two sines at unrelated rates so it doesn't loop
    fn aim_offset(&self) -> f32 {
        let t = self.clock as f32 * 0.01;
        (t.sin() * 0.66 + (t * 0.7).sin() * 0.34) * self.wobble
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self, world: &GameWorld) -> TickInput {
        self.clock += 1;

        match world.phase() {
            GamePhase::Menu => TickInput {
                confirm: true,
                ..Default::default()
            },
            GamePhase::GameOver => {
                self.game_over_ticks += 1;
                let confirm = self
                    .replay_after
                    .is_some_and(|after| self.game_over_ticks >= after);
                if confirm {
                    self.game_over_ticks = 0;
                }
                TickInput {
                    confirm,
                    ..Default::default()
                }
            }
            GamePhase::Playing => {
                let paddle = world.paddle_rect();
                let ball = world.ball();

                // Lead the target by where the ball will be next tick
                let target = ball.center().x + ball.vel.x + self.aim_offset();
                let delta = target - paddle.center().x;
                let step = world.config().paddle_step;

                TickInput {
                    left: delta < -step / 2.0,
                    right: delta > step / 2.0,
                    ..Default::default()
                }
            }
        }
    }
}
