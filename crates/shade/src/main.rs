//! Headless Shade runner
//!
//! Plays one day on the standard level with a simple autopilot: head for
//! the nearest idle mushroom, and for the basket once something is in tow.
//! Usage: `shade [config.toml|config.ron] [seed]`.

use rand::rngs::StdRng;
use rand::SeedableRng;
use shade::{GameConfig, GameEvent, InGame, LevelDefinition, Status};
use shade_engine::foundation::math::Vec2;
use shade_engine::physics::Body;

const FRAME_MS: u32 = 16;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    shade_engine::foundation::logging::init();
    log::info!("Starting Shade");

    let mut args = std::env::args().skip(1);
    let config_path = args.next().unwrap_or_else(|| "shade.toml".to_string());
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(0x5AD3);

    let config = GameConfig::load_or_default(&config_path);
    let daylight = config.sun.daylight_ms;
    let definition = LevelDefinition::standard(&config.sun);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut game = InGame::new(definition, config)?;

    while game.status() == Status::Running && game.level().clock().elapsed() < daylight {
        autopilot(&mut game);
        game.update(FRAME_MS, &mut rng)?;

        for stamped in game.level_mut().drain_events() {
            match stamped.event {
                GameEvent::MushroomDelivered { scale, .. } => {
                    log::info!("[{:>6} ms] delivered a mushroom of scale {:.2}", stamped.timestamp, scale);
                }
                GameEvent::PlayerStunned => log::info!("[{:>6} ms] stunned by a mole", stamped.timestamp),
                other => log::debug!("[{:>6} ms] {:?}", stamped.timestamp, other),
            }
        }
    }

    let snapshot = game.snapshot();
    log::info!(
        "Finished {:?} after {} ms: {} delivered, meter at {:.0}%",
        snapshot.status,
        game.level().clock().elapsed(),
        snapshot.counter,
        snapshot.meter_fraction * 100.0
    );
    Ok(())
}

/// Steer toward the basket when carrying, otherwise toward the closest
/// idle mushroom
fn autopilot(game: &mut InGame) {
    let level = game.level();
    let Some(player) = level.player_body() else {
        return;
    };
    let from = player.center();
    let carrying = player.trail().is_some_and(|t| !t.is_empty());

    let target = if carrying {
        level.get(level.basket_key()).map(|b| b.center())
    } else {
        level.nearest_idle_mushroom(from).map(|(_, at)| at)
    };

    let heading = target.map_or_else(Vec2::zeros, |to| to - from);
    game.steer(heading.x, heading.y);
}
