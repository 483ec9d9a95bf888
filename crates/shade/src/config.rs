//! Game configuration
//!
//! Every tunable of a round of Shade. Missing keys in a settings file fall
//! back to the defaults below, which are the values the game ships with.

use std::path::Path;

use serde::{Deserialize, Serialize};
use shade_engine::config::Config;

/// Game configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Playing field
    pub world: WorldConfig,

    /// The sweeping sun
    pub sun: SunConfig,

    /// Health meter
    pub meter: MeterConfig,

    /// Player movement and stun
    pub player: PlayerConfig,

    /// Mushroom growth and following
    pub mushroom: MushroomConfig,

    /// Mushroom and mole spawning
    pub spawn: SpawnConfig,
}

/// Playing field configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Field width
    pub width: f32,

    /// Field height
    pub height: f32,
}

/// Sun configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SunConfig {
    /// Shadow direction at dawn (radians)
    pub start_angle: f32,

    /// Shadow length per unit of caster height
    pub start_depth: f32,

    /// Change of angle per tick (radians)
    pub angle_increment: f32,

    /// Length of a day in milliseconds
    pub daylight_ms: u64,
}

/// Meter configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeterConfig {
    /// Full meter
    pub max: f32,

    /// Drain per tick while the player stands in the sun
    pub unshadowed_drain: f32,

    /// Drain per tick while the player is stunned
    pub stunned_drain: f32,

    /// Meter gained per unit of scale of a delivered mushroom
    pub delivery_factor: f32,
}

/// Player configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Spawn position x
    pub x: f32,

    /// Spawn position y
    pub y: f32,

    /// Body radius
    pub radius: f32,

    /// Distance covered per tick while steering
    pub speed: f32,

    /// How long a mole's touch stuns (ms)
    pub stun_ms: u32,
}

/// Mushroom configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MushroomConfig {
    /// Radius at scale 1
    pub radius: f32,

    /// Growth per tick in shade; shrinking in the sun runs at half this rate
    pub scale_increment: f32,

    /// Below this scale the mushroom withers
    pub min_scale: f32,

    /// Growth stops above this scale
    pub max_scale: f32,

    /// Distance covered per tick while catching up with the leader
    pub follow_speed: f32,

    /// Squared distance a picked mushroom may trail its leader by
    pub max_follow_distance2: f32,
}

/// Spawn configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Mushrooms planted on the first tick; below this many alive a new
    /// one is planted every tick
    pub floor: usize,

    /// Chance per tick of planting above the floor
    pub propensity: f64,

    /// A mushroom is planted whenever this many ms pass
    pub interval_ms: u64,

    /// Random points tried before giving up on a placement
    pub max_attempts: u32,

    /// Squared distance from the basket inside which nothing sprouts
    pub basket_threshold2: f32,

    /// Counter values that bring in moles. The first mole comes once the
    /// counter reaches its value, each later one once the counter passes it.
    pub mole_thresholds: Vec<u32>,

    /// Time each mole spends burrowing before it hunts (ms)
    pub mole_delays_ms: Vec<u32>,

    /// Mole radius
    pub mole_radius: f32,

    /// Distance a mole covers per tick
    pub mole_speed: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

impl Default for SunConfig {
    fn default() -> Self {
        Self {
            start_angle: 2.5,
            start_depth: 10.0,
            angle_increment: 0.001,
            daylight_ms: 60_000,
        }
    }
}

impl Default for MeterConfig {
    fn default() -> Self {
        Self {
            max: 100.0,
            unshadowed_drain: 0.05,
            stunned_drain: 0.5,
            delivery_factor: 2.0,
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            x: 400.0,
            y: 350.0,
            radius: 18.0,
            speed: 2.5,
            stun_ms: 1000,
        }
    }
}

impl Default for MushroomConfig {
    fn default() -> Self {
        Self {
            radius: 3.0,
            scale_increment: 0.005,
            min_scale: 1.2,
            max_scale: 3.0,
            follow_speed: 1.4,
            max_follow_distance2: 1200.0,
        }
    }
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            floor: 5,
            propensity: 0.0035,
            interval_ms: 5000,
            max_attempts: 6,
            basket_threshold2: 10_000.0,
            mole_thresholds: vec![5, 25, 50],
            mole_delays_ms: vec![4000, 5000, 6000],
            mole_radius: 10.0,
            mole_speed: 1.0,
        }
    }
}

impl Config for GameConfig {}

impl GameConfig {
    /// Load configuration from file or return default if the file is
    /// missing or unreadable
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load_from_file(path) {
            Ok(config) => {
                log::info!("Loaded game configuration from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Using default configuration ({}): {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shade_engine::config::ConfigFormat;

    #[test]
    fn test_defaults_match_shipped_values() {
        let config = GameConfig::default();
        assert_eq!(config.world.width, 800.0);
        assert_eq!(config.sun.start_angle, 2.5);
        assert_eq!(config.meter.unshadowed_drain, 0.05);
        assert_eq!(config.mushroom.max_follow_distance2, 1200.0);
        assert_eq!(config.spawn.max_attempts, 6);
        assert_eq!(config.spawn.mole_thresholds, vec![5, 25, 50]);
    }

    #[test]
    fn test_partial_file_overrides_only_given_keys() {
        let text = "[meter]\nmax = 50.0\n\n[spawn]\nfloor = 2\n";
        let config = GameConfig::from_str_as(text, ConfigFormat::Toml).unwrap();
        assert_eq!(config.meter.max, 50.0);
        assert_eq!(config.meter.stunned_drain, 0.5);
        assert_eq!(config.spawn.floor, 2);
        assert_eq!(config.world, WorldConfig::default());
    }

    #[test]
    fn test_ron_round_trip() {
        let mut config = GameConfig::default();
        config.player.speed = 3.0;
        let text = config.to_string_as(ConfigFormat::Ron).unwrap();
        let back = GameConfig::from_str_as(&text, ConfigFormat::Ron).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let config = GameConfig::load_or_default("no/such/shade.toml");
        assert_eq!(config, GameConfig::default());
    }
}
