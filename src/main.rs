//! Shooting Star entry point
//!
//! Native builds have no window: the demo autopilot plays rounds against the
//! simulation and the outcome is logged. Set `RUST_LOG=debug` to follow
//! every catch.
//!
//! Usage: `shooting-star [CONFIG.json] [--variant classic|viewport] [--seed N] [--rounds N] [--fast]`
//!
//! A config file overrides `--variant`.

use shooting_star::audio::AudioManager;
use shooting_star::platform::{Autopilot, LogLinkOpener, LogSurface, ManualClock, SleepScheduler};
use shooting_star::sim::GameWorld;
use shooting_star::{Game, GameConfig, Variant};

/// Frames to linger on the game-over screen before the autopilot replays
const GAME_OVER_LINGER: u32 = 240;
/// Safety cap on frames per run
const MAX_FRAMES: u64 = 5_000_000;

struct Args {
    config: Option<String>,
    variant: Variant,
    seed: Option<u64>,
    rounds: u32,
    fast: bool,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        config: None,
        variant: Variant::default(),
        seed: None,
        rounds: 1,
        fast: false,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--fast" => args.fast = true,
            "--variant" => {
                let value = iter.next().ok_or("--variant needs a value")?;
                args.variant =
                    Variant::from_str(&value).ok_or_else(|| format!("unknown variant: {}", value))?;
            }
            "--seed" => {
                let value = iter.next().ok_or("--seed needs a value")?;
                args.seed = Some(value.parse().map_err(|_| format!("bad seed: {}", value))?);
            }
            "--rounds" => {
                let value = iter.next().ok_or("--rounds needs a value")?;
                args.rounds = value.parse().map_err(|_| format!("bad round count: {}", value))?;
            }
            other if other.starts_with("--") => return Err(format!("unknown flag: {}", other)),
            path => args.config = Some(path.to_string()),
        }
    }
    Ok(args)
}

fn time_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() {
    env_logger::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!(
                "usage: shooting-star [CONFIG.json] [--variant classic|viewport] [--seed N] [--rounds N] [--fast]"
            );
            std::process::exit(2);
        }
    };

    let config = match &args.config {
        Some(path) => match GameConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        None => {
            log::info!("Using the {} preset", args.variant.as_str());
            GameConfig::from_variant(args.variant)
        }
    };

    let seed = args.seed.unwrap_or_else(time_seed);
    log::info!("Shooting Star (native) starting with seed {}", seed);

    let mut game = Game::new(
        GameWorld::new(config, seed),
        Autopilot::default().replaying_after(GAME_OVER_LINGER),
        AudioManager::new(),
        LogLinkOpener,
        LogSurface::default(),
    );

    let frames = if args.fast {
        game.run(&mut ManualClock::default(), args.rounds, MAX_FRAMES)
    } else {
        game.run(&mut SleepScheduler, args.rounds, MAX_FRAMES)
    };

    match game.last_outcome() {
        Some(outcome) if outcome.is_winning => {
            println!("Winner! Score {} after {} frames", game.world().score(), frames)
        }
        Some(outcome) => println!(
            "{} Score {} after {} frames",
            outcome.message,
            game.world().score(),
            frames
        ),
        None => println!("No round finished after {} frames", frames),
    }
}
