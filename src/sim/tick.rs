//! Variable-cadence simulation tick
//!
//! One call advances the game by one step. The caller schedules the next
//! call `difficulty().tick_interval_ms()` later, so the game speeds up with
//! every catch.

use super::collision::overlaps;
use super::outcome::evaluate;
use super::physics;
use super::state::{GameEvent, GamePhase, GameWorld};

/// Input snapshot for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Move left (held)
    pub left: bool,
    /// Move right (held)
    pub right: bool,
    /// Start / play again (edge-triggered)
    pub confirm: bool,
    /// Relative horizontal drag since the last tick (touch)
    pub drag_dx: f32,
}

/// What a tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    /// Scheduler interval was unusable; nothing changed
    Skipped,
    Ticked,
}

/// Advance the world by one tick. `interval_ms` is the delay the scheduler
/// actually waited; a non-positive or non-finite value skips the tick.
pub fn tick(world: &mut GameWorld, input: &TickInput, interval_ms: f64) -> TickStatus {
    if !(interval_ms.is_finite() && interval_ms > 0.0) {
        log::warn!("Skipping tick with invalid interval {}", interval_ms);
        return TickStatus::Skipped;
    }

    match world.phase {
        GamePhase::Menu => {
            if input.confirm {
                world.start();
            }
        }
        GamePhase::Playing => tick_playing(world, input),
        GamePhase::GameOver => {
            if input.confirm {
                world.restart();
            } else {
                tick_game_over(world);
            }
        }
    }

    TickStatus::Ticked
}

fn tick_playing(world: &mut GameWorld, input: &TickInput) {
    world.ticks += 1;

    move_paddle(world, input);

    // Ball motion
    physics::advance(&mut world.ball, world.gravity);
    if let Some(bounds) = world.config.speed_bounds {
        physics::clamp_horizontal_speed(&mut world.ball, &bounds);
    }
    if physics::reflect_walls(&mut world.ball, world.config.stage_width) {
        world.notify(GameEvent::WallBounce);
    }

    world.sparkles.emit(world.ball.center(), world.rng.inner());

    // Catch
    if overlaps(&world.paddle_rect(), &world.ball.rect()) {
        world.ball.vel.y = -world.ball.vel.y * world.config.catch_vy_damping;
        world.ball.pos.y = world.paddle.y - world.ball.size;
        world.score += 1;
        world.ball.vel.x *= world
            .rng
            .range(world.config.bounce_jitter_min, world.config.bounce_jitter_max);
        world.scaler.apply_catch(&mut world.difficulty);

        world.notify(GameEvent::Catch { score: world.score });
        log::debug!(
            "Catch #{}: paddle {:.1}x{:.1}, tick rate {:.1}",
            world.score,
            world.difficulty.paddle_width,
            world.difficulty.paddle_height,
            world.difficulty.tick_rate
        );
    }

    // Miss
    if world.ball.pos.y > world.config.stage_height - world.config.floor_margin {
        enter_game_over(world);
    }
}

/// Keyboard moves are evaluated left then right, so holding both ends up
/// where it started unless a wall blocked one of them
fn move_paddle(world: &mut GameWorld, input: &TickInput) {
    let step = world.config.paddle_step;
    let max_x = world.config.stage_width - world.difficulty.paddle_width;
    let paddle = &mut world.paddle;

    if input.left && paddle.x > 0.0 {
        paddle.x -= step;
    }
    if input.right && paddle.x < max_x {
        paddle.x += step;
    }
    if input.drag_dx != 0.0 && input.drag_dx.is_finite() {
        paddle.x = (paddle.x + input.drag_dx).clamp(0.0, max_x.max(0.0));
    }
}

fn enter_game_over(world: &mut GameWorld) {
    world.phase = GamePhase::GameOver;
    if world.round_over_entered {
        return;
    }
    world.round_over_entered = true;

    let outcome = evaluate(world.score, &world.config.bands, world.config.win_threshold);
    log::info!(
        "Round over: score {} ({})",
        world.score,
        if outcome.is_winning { "win" } else { outcome.message.as_str() }
    );

    if world.config.reset_tick_rate_on_game_over {
        world.difficulty.tick_rate = world.config.tick_rate;
    }

    world.events.push(GameEvent::RoundOver(outcome.clone()));
    if let Some(cue) = outcome.cue {
        world.events.push(GameEvent::PlayCue(cue));
    }
    if outcome.is_winning {
        world.events.push(GameEvent::MusicStop);
        world
            .events
            .push(GameEvent::OpenLink(world.config.winning_url.clone()));
    }
    world.outcome = Some(outcome);
}

/// Game-over screen: keep the outcome current for polling and animate the
/// win overlay. No side effects fire here.
fn tick_game_over(world: &mut GameWorld) {
    let outcome = evaluate(world.score, &world.config.bands, world.config.win_threshold);
    if outcome.is_winning {
        world.overlay_y =
            (world.overlay_y + world.config.overlay_drop_per_tick).min(world.config.overlay_max_y);
    }
    world.outcome = Some(outcome);
}
