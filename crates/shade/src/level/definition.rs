//! Level definitions
//!
//! The hand-off point from whatever loads levels: caster and light
//! descriptions, supplied once when a level starts. Definitions are plain
//! serde data, so they can also be kept in RON or TOML files.

use serde::{Deserialize, Serialize};
use shade_engine::config::Config;
use shade_engine::foundation::math::Vec2;
use shade_engine::lighting::LightSource;
use shade_engine::physics::{GeometryError, Shape};

use crate::config::SunConfig;
use crate::entities::{Obstacle, ObstacleKind, SlideDirection, Slider};

/// A shadow-casting obstacle. `z` is the height above the ground.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CasterDef {
    /// Rectangle with its top-left corner at `(x, y)`
    Block {
        /// Left edge
        x: f32,
        /// Top edge
        y: f32,
        /// Width
        w: f32,
        /// Height on screen
        h: f32,
        /// Height above ground
        z: f32,
    },
    /// Circle centered at `(x, y)`
    Dome {
        /// Center x
        x: f32,
        /// Center y
        y: f32,
        /// Radius
        r: f32,
        /// Height above ground
        z: f32,
    },
    /// Thin rectangle with its top-left corner at `(x, y)`
    Fence {
        /// Left edge
        x: f32,
        /// Top edge
        y: f32,
        /// Width
        w: f32,
        /// Height on screen
        h: f32,
        /// Height above ground
        z: f32,
    },
    /// Slider starting with its top-left corner at `(x, y)`
    Slider {
        /// Left edge
        x: f32,
        /// Top edge
        y: f32,
        /// Height above ground
        z: f32,
        /// Travel direction
        direction: SlideDirection,
        /// Travel range
        range: f32,
        /// Speed multiplier
        speed: f32,
    },
}

impl CasterDef {
    /// Footprint and obstacle state for this caster
    pub fn build(&self, daylight_ms: u64) -> Result<(Shape, Obstacle), GeometryError> {
        match *self {
            Self::Block { x, y, w, h, z } => {
                Ok((Shape::rectangle(x, y, w, h)?, Obstacle::new(ObstacleKind::Block, z)))
            }
            Self::Dome { x, y, r, z } => Ok((Shape::circle(x, y, r)?, Obstacle::new(ObstacleKind::Dome, z))),
            Self::Fence { x, y, w, h, z } => {
                Ok((Shape::rectangle(x, y, w, h)?, Obstacle::new(ObstacleKind::Fence, z)))
            }
            Self::Slider {
                x,
                y,
                z,
                direction,
                range,
                speed,
            } => {
                let (w, h) = direction.footprint();
                let slider = Slider::new(direction, range, speed, daylight_ms);
                Ok((Shape::rectangle(x, y, w, h)?, Obstacle::new(ObstacleKind::Slider(slider), z)))
            }
        }
    }
}

/// A light source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LightDef {
    /// Directional light that sweeps across the sky
    Sun {
        /// Starting shadow direction (radians)
        angle: f32,
        /// Shadow length per unit of height
        depth: f32,
        /// Angle change per tick
        sweep_rate: f32,
    },
    /// Fixed point light
    Lamp {
        /// Position x
        x: f32,
        /// Position y
        y: f32,
        /// Shadow length per unit of height
        depth: f32,
    },
}

impl LightDef {
    /// The sun as configured
    pub fn sun(config: &SunConfig) -> Self {
        Self::Sun {
            angle: config.start_angle,
            depth: config.start_depth,
            sweep_rate: config.angle_increment,
        }
    }

    /// Build the runtime light
    pub fn to_source(&self) -> LightSource {
        match *self {
            Self::Sun {
                angle,
                depth,
                sweep_rate,
            } => LightSource::directional(angle, depth).with_sweep(sweep_rate),
            Self::Lamp { x, y, depth } => LightSource::point(Vec2::new(x, y), depth),
        }
    }
}

/// The basket's rectangle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasketDef {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width
    pub w: f32,
    /// Height on screen
    pub h: f32,
}

impl Default for BasketDef {
    fn default() -> Self {
        Self {
            x: 400.0,
            y: 250.0,
            w: 65.0,
            h: 40.0,
        }
    }
}

/// Everything needed to set up a level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelDefinition {
    /// Obstacles
    pub casters: Vec<CasterDef>,
    /// Lights
    pub lights: Vec<LightDef>,
    /// Basket placement
    pub basket: BasketDef,
}

impl LevelDefinition {
    /// The garden the game ships with: six blocks, six domes and four
    /// fences under a single sweeping sun
    pub fn standard(sun: &SunConfig) -> Self {
        let blocks = [
            (55.0, 355.0, 125.0, 125.0, 16.0),
            (224.0, 424.0, 56.0, 56.0, 6.0),
            (324.0, 424.0, 56.0, 56.0, 6.0),
            (75.0, 225.0, 56.0, 56.0, 6.0),
            (545.0, 330.0, 80.0, 80.0, 10.0),
            (445.0, 460.0, 80.0, 80.0, 10.0),
        ];
        let domes = [
            (288.0, 165.0, 32.0, 7.0),
            (180.0, 95.0, 44.0, 10.0),
            (300.0, 65.0, 25.0, 6.0),
            (710.0, 80.0, 28.0, 6.0),
            (600.0, 100.0, 40.0, 9.0),
            (680.0, 220.0, 60.0, 13.0),
        ];
        let fences = [
            (225.0, 225.0, 11.0, 120.0, 5.0),
            (390.0, 140.0, 120.0, 11.0, 5.0),
            (715.0, 368.0, 11.0, 120.0, 5.0),
            (50.0, 50.0, 11.0, 120.0, 5.0),
        ];

        let casters = blocks
            .iter()
            .map(|&(x, y, w, h, z)| CasterDef::Block { x, y, w, h, z })
            .chain(domes.iter().map(|&(x, y, r, z)| CasterDef::Dome { x, y, r, z }))
            .chain(fences.iter().map(|&(x, y, w, h, z)| CasterDef::Fence { x, y, w, h, z }))
            .collect();

        Self {
            casters,
            lights: vec![LightDef::sun(sun)],
            basket: BasketDef::default(),
        }
    }
}

impl Default for LevelDefinition {
    fn default() -> Self {
        Self::standard(&SunConfig::default())
    }
}

impl Config for LevelDefinition {}

#[cfg(test)]
mod tests {
    use super::*;
    use shade_engine::config::ConfigFormat;

    #[test]
    fn test_standard_layout() {
        let def = LevelDefinition::default();
        let count = |pred: fn(&CasterDef) -> bool| def.casters.iter().filter(|c| pred(c)).count();
        assert_eq!(count(|c| matches!(c, CasterDef::Block { .. })), 6);
        assert_eq!(count(|c| matches!(c, CasterDef::Dome { .. })), 6);
        assert_eq!(count(|c| matches!(c, CasterDef::Fence { .. })), 4);
        assert_eq!(def.lights, vec![LightDef::Sun { angle: 2.5, depth: 10.0, sweep_rate: 0.001 }]);
    }

    #[test]
    fn test_every_standard_caster_builds() {
        for caster in &LevelDefinition::default().casters {
            let (shape, obstacle) = caster.build(60_000).unwrap();
            assert!(obstacle.height() > 0.0);
            assert!(shape.bounding_radius() > 0.0);
        }
    }

    #[test]
    fn test_degenerate_caster_is_rejected() {
        let bad = CasterDef::Dome { x: 0.0, y: 0.0, r: 0.0, z: 3.0 };
        assert!(matches!(bad.build(60_000), Err(GeometryError::NonPositiveRadius(_))));
    }

    #[test]
    fn test_slider_footprint_and_ron_text() {
        let text = "(casters: [Slider(x: 10.0, y: 20.0, z: 4.0, direction: Up, range: 100.0, speed: 1.0)], lights: [])";
        let def = LevelDefinition::from_str_as(text, ConfigFormat::Ron).unwrap();
        assert_eq!(def.basket, BasketDef::default());
        let (shape, obstacle) = def.casters[0].build(60_000).unwrap();
        assert!(obstacle.is_slider());
        assert_eq!((shape.width(), shape.height()), (11.0, 65.0));
    }
}
