//! The player
//!
//! Steered by whatever input layer drives the game; carries a trail of
//! mushrooms to the basket and freezes for a moment when a mole bites.

use shade_engine::foundation::math::{Vec2, WorldBounds};
use shade_engine::lighting::Exposure;

use super::{Entity, EntityKind, Trail};
use crate::config::PlayerConfig;

/// Player state
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    steering: Vec2,
    speed: f32,
    trail: Trail,
    stun_remaining: u32,
    stun_ms: u32,
    exposure: Exposure,
}

impl Player {
    /// Create a player at rest
    pub fn new(config: &PlayerConfig) -> Self {
        Self {
            steering: Vec2::zeros(),
            speed: config.speed,
            trail: Trail::new(),
            stun_remaining: 0,
            stun_ms: config.stun_ms,
            exposure: Exposure::Unshadowed,
        }
    }

    /// Set the direction to walk in. Any non-zero vector is normalized;
    /// zero stops the player.
    pub fn steer(&mut self, dx: f32, dy: f32) {
        let direction = Vec2::new(dx, dy);
        self.steering = direction.try_normalize(f32::EPSILON).unwrap_or_else(Vec2::zeros);
    }

    /// Current steering direction
    pub fn steering(&self) -> Vec2 {
        self.steering
    }

    /// Mushrooms being carried
    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    pub(crate) fn trail_mut(&mut self) -> &mut Trail {
        &mut self.trail
    }

    /// Whether a mole's bite still holds the player in place
    pub fn is_stunned(&self) -> bool {
        self.stun_remaining > 0
    }

    /// Start a stun. Returns `false` when already stunned.
    pub(crate) fn stun(&mut self) -> bool {
        if self.is_stunned() {
            return false;
        }
        self.stun_remaining = self.stun_ms;
        true
    }

    /// Exposure found by the most recent frame
    pub fn exposure(&self) -> Exposure {
        self.exposure
    }

    pub(crate) fn set_exposure(&mut self, exposure: Exposure) {
        self.exposure = exposure;
    }
}

/// Walk the player one tick along its steering direction.
pub(crate) fn update(entity: &mut Entity, delta: u32, world: &WorldBounds) {
    let Entity {
        shape,
        velocity,
        kind,
        ..
    } = entity;
    let EntityKind::Player(player) = kind else {
        return;
    };

    if player.is_stunned() {
        player.stun_remaining = player.stun_remaining.saturating_sub(delta);
        *velocity = Vec2::zeros();
        return;
    }

    *velocity = player.steering * player.speed;
    if *velocity == Vec2::zeros() {
        return;
    }
    shape.translate(*velocity);
    let center = shape.center();
    if !world.contains(center) {
        shape.set_center(world.wrap(center));
    }
}
