//! Light sources
//!
//! A light decides which way each caster's shadow falls and how far.
//! Directional lights (the sun) use one angle for every caster and may sweep
//! across the sky over time; point lights throw shadows directly away from
//! their position.

use serde::{Deserialize, Serialize};

use crate::foundation::math::{calculate_angle, Vec2};

/// Where the light comes from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LightKind {
    /// Infinitely distant light; shadows fall along `angle` (radians)
    Directional {
        /// Direction shadows are thrown in
        angle: f32,
    },
    /// Light at a position; shadows fall away from it
    Point {
        /// Light position
        position: Vec2,
    },
}

/// A light source that shadow casters are evaluated against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightSource {
    /// Directional or positional
    pub kind: LightKind,
    /// Shadow length per unit of caster height
    pub depth: f32,
    /// Change of a directional light's angle per tick (radians)
    pub sweep_rate: f32,
    /// Brightness; zero turns the light off
    pub intensity: f32,
    /// Whether the light takes part in shadow composition
    pub enabled: bool,
}

impl LightSource {
    /// Create a directional light (e.g. the sun)
    pub fn directional(angle: f32, depth: f32) -> Self {
        Self {
            kind: LightKind::Directional { angle },
            depth,
            sweep_rate: 0.0,
            intensity: 1.0,
            enabled: true,
        }
    }

    /// Create a point light
    pub fn point(position: Vec2, depth: f32) -> Self {
        Self {
            kind: LightKind::Point { position },
            depth,
            sweep_rate: 0.0,
            intensity: 1.0,
            enabled: true,
        }
    }

    /// Set how far a directional light turns each tick
    pub fn with_sweep(mut self, sweep_rate: f32) -> Self {
        self.sweep_rate = sweep_rate;
        self
    }

    /// Set the light's intensity
    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.intensity = intensity;
        self
    }

    /// Whether the light currently throws shadows
    pub fn is_active(&self) -> bool {
        self.enabled && self.intensity > 0.0 && self.depth != 0.0
    }

    /// Advance the sweep by one tick
    pub fn advance(&mut self) {
        if let LightKind::Directional { angle } = &mut self.kind {
            *angle += self.sweep_rate;
        }
    }

    /// Current angle of a directional light
    pub fn angle(&self) -> Option<f32> {
        match self.kind {
            LightKind::Directional { angle } => Some(angle),
            LightKind::Point { .. } => None,
        }
    }

    /// Direction a caster centered at `caster_center` throws its shadow in
    pub fn shadow_direction(&self, caster_center: Vec2) -> f32 {
        match self.kind {
            LightKind::Directional { angle } => angle,
            LightKind::Point { position } => calculate_angle(caster_center, position),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::constants::PI;
    use approx::assert_relative_eq;

    #[test]
    fn test_sun_sweeps() {
        let mut sun = LightSource::directional(2.5, 10.0).with_sweep(0.001);
        for _ in 0..1000 {
            sun.advance();
        }
        assert_relative_eq!(sun.angle().unwrap(), 3.5, epsilon = 1e-3);
        assert!(sun.is_active());
    }

    #[test]
    fn test_point_light_throws_away() {
        let lamp = LightSource::point(Vec2::new(100.0, 100.0), 2.0);
        assert_relative_eq!(lamp.shadow_direction(Vec2::new(200.0, 100.0)), 0.0);
        assert_relative_eq!(lamp.shadow_direction(Vec2::new(0.0, 100.0)), PI);
        assert!(lamp.angle().is_none());
    }

    #[test]
    fn test_inactive_lights() {
        assert!(!LightSource::directional(0.0, 10.0).with_intensity(0.0).is_active());
        assert!(!LightSource::directional(0.0, 0.0).is_active());
    }
}
