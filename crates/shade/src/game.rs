//! In-game state
//!
//! One round of Shade: the level plus the meter, the delivery counter and
//! the rules that turn a frame's outcome into gains, drains and the end of
//! the round.

use rand::Rng;
use shade_engine::lighting::{Exposure, ShadowCaster, ShadowPolygon};
use shade_engine::physics::Shape;

use crate::config::GameConfig;
use crate::entities::{BodyKey, Role};
use crate::error::GameError;
use crate::events::GameEvent;
use crate::level::{Level, LevelDefinition};
use crate::mushroom_factory::MushroomFactory;

/// Round status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// Still playing
    Running,
    /// The meter ran dry
    GameOver,
    /// The day ended with the meter up
    LevelClear,
}

/// The player's health meter. Standing in the sun drains it, delivering
/// mushrooms refills it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Meter {
    value: f32,
    max: f32,
}

impl Meter {
    /// A full meter
    pub fn new(max: f32) -> Self {
        Self { value: max, max }
    }

    /// Current value
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Value as a fraction of the maximum
    pub fn fraction(&self) -> f32 {
        if self.max > 0.0 {
            self.value / self.max
        } else {
            0.0
        }
    }

    /// Add to the meter, never past the maximum
    pub fn fill(&mut self, amount: f32) {
        self.value = (self.value + amount).min(self.max);
    }

    /// Take from the meter, never below zero
    pub fn drain(&mut self, amount: f32) {
        self.value = (self.value - amount).max(0.0);
    }

    /// Whether nothing is left
    pub fn is_empty(&self) -> bool {
        self.value <= 0.0
    }
}

/// A body as the renderer needs it
#[derive(Debug, Clone, PartialEq)]
pub struct BodyView {
    /// Level key
    pub key: BodyKey,
    /// What it is
    pub role: Role,
    /// Current outline
    pub shape: Shape,
    /// Draw order
    pub z_index: i32,
}

/// Everything drawable about one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    /// Live bodies, in draw order
    pub bodies: Vec<BodyView>,
    /// Current shadows
    pub shadows: Vec<ShadowPolygon>,
    /// Meter fill in `[0, 1]`
    pub meter_fraction: f32,
    /// Mushrooms delivered
    pub counter: u32,
    /// Round status
    pub status: Status,
    /// Angle of the first directional light, if any
    pub sun_angle: Option<f32>,
}

/// A round in progress
#[derive(Debug)]
pub struct InGame {
    status: Status,
    level: Level,
    definition: LevelDefinition,
    config: GameConfig,
    meter: Meter,
    counter: u32,
    moles: usize,
    factory: MushroomFactory,
}

impl InGame {
    /// Start a round on the given level
    pub fn new(definition: LevelDefinition, config: GameConfig) -> Result<Self, GameError> {
        let level = Level::new(&definition, &config)?;
        log::info!("Round started");
        Ok(Self {
            status: Status::Running,
            level,
            meter: Meter::new(config.meter.max),
            factory: MushroomFactory::new(&config.spawn),
            definition,
            config,
            counter: 0,
            moles: 0,
        })
    }

    /// Throw the level away and start over
    pub fn restart(&mut self) -> Result<(), GameError> {
        self.level = Level::new(&self.definition, &self.config)?;
        self.meter = Meter::new(self.config.meter.max);
        self.counter = 0;
        self.moles = 0;
        self.status = Status::Running;
        log::info!("Round restarted");
        Ok(())
    }

    /// Round status
    pub fn status(&self) -> Status {
        self.status
    }

    /// The level
    pub fn level(&self) -> &Level {
        &self.level
    }

    /// Mutable access to the level
    pub fn level_mut(&mut self) -> &mut Level {
        &mut self.level
    }

    /// The meter
    pub fn meter(&self) -> &Meter {
        &self.meter
    }

    /// Mushrooms delivered this round
    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// Moles sent in so far
    pub fn moles(&self) -> usize {
        self.moles
    }

    /// Point the player somewhere
    pub fn steer(&mut self, dx: f32, dy: f32) {
        self.level.steer_player(dx, dy);
    }

    /// Run one frame of `delta` milliseconds. Does nothing once the round
    /// is over.
    pub fn update<R: Rng + ?Sized>(&mut self, delta: u32, rng: &mut R) -> Result<(), GameError> {
        if self.status != Status::Running {
            return Ok(());
        }

        self.level.advance_lights();
        let outcome = self.level.step(delta)?;

        self.plant(rng)?;

        for scale in &outcome.delivered {
            self.counter += 1;
            self.meter.fill(scale * self.config.meter.delivery_factor);
        }

        self.send_moles(rng)?;

        if outcome.player_exposure == Exposure::Unshadowed {
            self.meter.drain(self.config.meter.unshadowed_drain);
        }
        if self.level.player().is_some_and(|p| p.is_stunned()) {
            self.meter.drain(self.config.meter.stunned_drain);
        }

        if self.meter.is_empty() {
            self.status = Status::GameOver;
            self.level.push_event(GameEvent::GameOver { counter: self.counter });
            log::info!("Game over with {} mushrooms delivered", self.counter);
        } else if self.level.clock().elapsed() >= self.config.sun.daylight_ms {
            self.status = Status::LevelClear;
            self.level.push_event(GameEvent::LevelClear { counter: self.counter });
            log::info!("Day survived with {} mushrooms delivered", self.counter);
        }
        Ok(())
    }

    /// Plant the opening mushrooms on the first frame, then one at a time
    /// whenever the factory asks for it or the planting interval comes round
    fn plant<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), GameError> {
        let clock = self.level.clock();
        let wanted = if clock.is_first_frame() {
            self.factory.floor()
        } else if self.factory.active(rng, self.level.mushroom_count())
            || clock.crossed(self.config.spawn.interval_ms)
        {
            1
        } else {
            0
        };

        for _ in 0..wanted {
            match self.factory.place(rng, &self.level) {
                Ok(at) => {
                    self.level.spawn_mushroom(at)?;
                }
                Err(e) => log::debug!("Skipped planting: {}", e),
            }
        }
        Ok(())
    }

    /// Send in every mole the counter has earned so far
    fn send_moles<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), GameError> {
        let spawn = &self.config.spawn;
        while let Some(&threshold) = spawn.mole_thresholds.get(self.moles) {
            // the first mole comes at its threshold, later ones once past it
            let due = if self.moles == 0 {
                self.counter >= threshold
            } else {
                self.counter > threshold
            };
            if !due {
                break;
            }
            let burrow_ms = spawn.mole_delays_ms.get(self.moles).copied().unwrap_or_default();
            self.level.spawn_mole(rng, burrow_ms)?;
            self.moles += 1;
        }
        Ok(())
    }

    /// What to draw for the current frame
    pub fn snapshot(&self) -> FrameSnapshot {
        let mut bodies: Vec<BodyView> = self
            .level
            .bodies()
            .map(|e| BodyView {
                key: e.key(),
                role: e.role(),
                shape: e.shape.clone(),
                z_index: e.z_index(),
            })
            .collect();
        bodies.sort_by_key(|b| b.z_index);

        FrameSnapshot {
            bodies,
            shadows: self.level.shadows().shadows().cloned().collect(),
            meter_fraction: self.meter.fraction(),
            counter: self.counter,
            status: self.status,
            sun_angle: self.level.lights().iter().find_map(|l| l.angle()),
        }
    }
}
