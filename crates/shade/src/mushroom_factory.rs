//! Mushroom planting
//!
//! Decides when a new mushroom should sprout and finds it a spot: somewhere
//! inside a current shadow, on the field, clear of obstacles and not right
//! next to the basket. Placement gives up after a fixed number of tries.

use rand::seq::SliceRandom;
use rand::Rng;
use slotmap::Key;
use shade_engine::foundation::math::{distance2, Vec2};
use shade_engine::physics::{Body, Collider};

use crate::config::SpawnConfig;
use crate::entities::{BodyKey, Entity, EntityKind, Mushroom};
use crate::error::PlacementError;
use crate::level::Level;

/// Planting policy
#[derive(Debug, Clone, PartialEq)]
pub struct MushroomFactory {
    floor: usize,
    propensity: f64,
    max_attempts: u32,
    basket_threshold2: f32,
}

impl MushroomFactory {
    /// Create a factory from spawn settings
    pub fn new(config: &SpawnConfig) -> Self {
        Self {
            floor: config.floor,
            propensity: config.propensity,
            max_attempts: config.max_attempts,
            basket_threshold2: config.basket_threshold2,
        }
    }

    /// Mushrooms kept on the field at minimum
    pub fn floor(&self) -> usize {
        self.floor
    }

    /// Whether a mushroom should be planted this tick given how many are
    /// `alive`: always below the floor, otherwise with the configured chance
    pub fn active<R: Rng + ?Sized>(&self, rng: &mut R, alive: usize) -> bool {
        alive < self.floor || rng.gen::<f64>() < self.propensity
    }

    /// Find a spot for a new mushroom in `level`
    pub fn place<R: Rng + ?Sized>(&self, rng: &mut R, level: &Level) -> Result<Vec2, PlacementError> {
        let shadows: Vec<_> = level.shadows().shadows().collect();
        let world = level.world();
        let basket = level.get(level.basket_key()).map(|b| b.center());

        for _ in 0..self.max_attempts {
            let candidate = match shadows.choose(rng) {
                Some(shadow) => {
                    let bounds = shadow.bounds();
                    let size = bounds.max - bounds.min;
                    let point = Vec2::new(
                        bounds.min.x + rng.gen::<f32>() * size.x,
                        bounds.min.y + rng.gen::<f32>() * size.y,
                    );
                    if !shadow.contains(point) {
                        continue;
                    }
                    point
                }
                None => Vec2::new(rng.gen::<f32>() * world.width, rng.gen::<f32>() * world.height),
            };

            if !world.contains(candidate) {
                continue;
            }
            if basket.is_some_and(|b| distance2(candidate, b) < self.basket_threshold2) {
                continue;
            }
            if self.blocked(candidate, level) {
                continue;
            }
            return Ok(candidate);
        }

        log::debug!("No mushroom placement found after {} attempts", self.max_attempts);
        Err(PlacementError::Exhausted {
            attempts: self.max_attempts,
        })
    }

    /// Whether a sprout at `at` would overlap an obstacle or the basket
    fn blocked(&self, at: Vec2, level: &Level) -> bool {
        let config = &level.config().mushroom;
        let Ok(shape) = Mushroom::sprout_shape(at, config) else {
            return true;
        };
        let sprout = Entity::new(BodyKey::null(), shape, EntityKind::Mushroom(Mushroom::new(config)));
        debug_assert_eq!(sprout.center(), at);
        Collider::test_and_flag(&sprout, level.solids(), &[])
    }
}
