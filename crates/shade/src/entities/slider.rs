//! Sliding walls
//!
//! A slider is a thin block that creeps along one direction during the
//! morning and stays put for the rest of the day.

use serde::{Deserialize, Serialize};
use shade_engine::foundation::math::Vec2;

/// Long side of a slider
pub const SLIDER_LENGTH: f32 = 65.0;
/// Short side of a slider
pub const SLIDER_THICKNESS: f32 = 11.0;

/// Direction a slider travels in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlideDirection {
    /// Toward negative y
    Up,
    /// Toward positive x
    Right,
    /// Toward positive y
    Down,
    /// Toward negative x
    Left,
}

impl SlideDirection {
    /// Footprint `(width, height)`; the long side lies along the travel axis
    pub fn footprint(self) -> (f32, f32) {
        match self {
            Self::Right | Self::Left => (SLIDER_LENGTH, SLIDER_THICKNESS),
            Self::Up | Self::Down => (SLIDER_THICKNESS, SLIDER_LENGTH),
        }
    }

    /// Unit vector of travel
    pub fn unit(self) -> Vec2 {
        match self {
            Self::Up => Vec2::new(0.0, -1.0),
            Self::Right => Vec2::new(1.0, 0.0),
            Self::Down => Vec2::new(0.0, 1.0),
            Self::Left => Vec2::new(-1.0, 0.0),
        }
    }
}

/// Motion state of a slider
#[derive(Debug, Clone, PartialEq)]
pub struct Slider {
    direction: SlideDirection,
    /// Distance per millisecond
    rate: f32,
    timer: u64,
    active_ms: u64,
}

impl Slider {
    /// A slider that covers `range * speed` over a full day but only moves
    /// during the first half of it
    pub fn new(direction: SlideDirection, range: f32, speed: f32, daylight_ms: u64) -> Self {
        let rate = if daylight_ms == 0 {
            0.0
        } else {
            speed * range / daylight_ms as f32
        };
        Self {
            direction,
            rate,
            timer: 0,
            active_ms: daylight_ms / 2,
        }
    }

    /// Travel direction
    pub fn direction(&self) -> SlideDirection {
        self.direction
    }

    /// Whether the slider still moves
    pub fn is_moving(&self) -> bool {
        self.timer <= self.active_ms
    }

    /// Advance by `delta` ms and return the offset to apply this tick
    pub fn advance(&mut self, delta: u32) -> Vec2 {
        self.timer += u64::from(delta);
        if !self.is_moving() {
            return Vec2::zeros();
        }
        self.direction.unit() * (self.rate * delta as f32)
    }
}
