//! Moles
//!
//! Moles show up once the player has delivered enough mushrooms. After
//! burrowing in from the edge of the field for a while they surface and go
//! after the nearest idle mushroom, dragging off whatever they touch. A
//! surfaced mole that bumps into the player stuns them.

use rand::Rng;
use shade_engine::foundation::math::{calculate_angle, calculate_vector, Vec2, WorldBounds};

use super::{Entity, EntityKind, Trail};

/// Mole state
#[derive(Debug, Clone, PartialEq)]
pub struct Mole {
    burrow_remaining: u32,
    speed: f32,
    trail: Trail,
}

impl Mole {
    /// A mole that stays underground for `burrow_ms` before hunting
    pub fn new(burrow_ms: u32, speed: f32) -> Self {
        Self {
            burrow_remaining: burrow_ms,
            speed,
            trail: Trail::new(),
        }
    }

    /// Random point on the edge of the field to emerge from
    pub fn spawn_point<R: Rng + ?Sized>(rng: &mut R, world: &WorldBounds) -> Vec2 {
        let along: f32 = rng.gen();
        match rng.gen_range(0..4) {
            0 => Vec2::new(along * world.width, 0.0),
            1 => Vec2::new(world.width - 1.0, along * world.height),
            2 => Vec2::new(along * world.width, world.height - 1.0),
            _ => Vec2::new(0.0, along * world.height),
        }
    }

    /// Whether the mole is still underground
    pub fn is_burrowed(&self) -> bool {
        self.burrow_remaining > 0
    }

    /// Mushrooms the mole has taken
    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    pub(crate) fn trail_mut(&mut self) -> &mut Trail {
        &mut self.trail
    }
}

/// Advance a mole one tick, heading for `prey` if it has surfaced.
pub(crate) fn update(entity: &mut Entity, delta: u32, prey: Option<Vec2>, world: &WorldBounds) {
    let Entity {
        shape,
        velocity,
        kind,
        ..
    } = entity;
    let EntityKind::Mole(mole) = kind else {
        return;
    };

    *velocity = Vec2::zeros();
    if mole.is_burrowed() {
        mole.burrow_remaining = mole.burrow_remaining.saturating_sub(delta);
        if !mole.is_burrowed() {
            log::debug!("Mole surfaced at {:?}", shape.center());
        }
        return;
    }

    let Some(prey) = prey else {
        return;
    };
    let position = shape.center();
    let gap = (prey - position).magnitude();
    if gap <= f32::EPSILON {
        return;
    }

    let step = calculate_vector(mole.speed.min(gap), calculate_angle(prey, position));
    *velocity = step;
    shape.translate(step);
    let center = shape.center();
    if !world.contains(center) {
        shape.set_center(world.wrap(center));
    }
}
