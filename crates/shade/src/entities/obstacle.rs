//! Solid shadow casters
//!
//! Blocks, domes, fences and sliders. They throw shadows and push anything
//! that walks into them back out; only sliders ever move.

use shade_engine::physics::{repel_along_axis, repel_radially};

use super::slider::Slider;
use super::{Entity, EntityKind};

/// The flavour of obstacle
#[derive(Debug, Clone, PartialEq)]
pub enum ObstacleKind {
    /// Square-ish rectangle
    Block,
    /// Round obstacle
    Dome,
    /// Thin rectangle
    Fence,
    /// Moving thin rectangle
    Slider(Slider),
}

/// An obstacle and its height above the ground
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    kind: ObstacleKind,
    height: f32,
}

impl Obstacle {
    /// Create an obstacle of the given kind and height
    pub fn new(kind: ObstacleKind, height: f32) -> Self {
        Self { kind, height }
    }

    /// Kind of obstacle
    pub fn kind(&self) -> &ObstacleKind {
        &self.kind
    }

    /// Height of the obstacle, which sets its shadow length
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Whether this obstacle is a slider
    pub fn is_slider(&self) -> bool {
        matches!(self.kind, ObstacleKind::Slider(_))
    }

    pub(crate) fn slider_mut(&mut self) -> Option<&mut Slider> {
        match &mut self.kind {
            ObstacleKind::Slider(slider) => Some(slider),
            _ => None,
        }
    }

    /// Push `repellee` out of `body`, the entity owning this obstacle.
    /// Domes push radially, everything else along an axis.
    pub fn repel(&self, body: &Entity, repellee: &mut Entity) {
        match self.kind {
            ObstacleKind::Dome => repel_radially(body, repellee),
            ObstacleKind::Block | ObstacleKind::Fence | ObstacleKind::Slider(_) => {
                repel_along_axis(body, repellee);
            }
        }
    }
}

/// Move a slider for one tick; other obstacles stay put.
pub(crate) fn update(entity: &mut Entity, delta: u32) {
    let EntityKind::Obstacle(obstacle) = &mut entity.kind else {
        return;
    };
    let Some(slider) = obstacle.slider_mut() else {
        return;
    };

    let offset = slider.advance(delta);
    entity.velocity = offset;
    entity.shape.translate(offset);
}
