//! Gameplay events
//!
//! Raised by the level and the game state while a frame runs, drained by
//! the presentation layer to play sounds and effects. No asset handles
//! travel with them.

use shade_engine::foundation::math::Vec2;

use crate::entities::BodyKey;

/// Something noteworthy that happened during a frame
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A mushroom was planted
    MushroomSprouted {
        /// The new mushroom
        key: BodyKey,
        /// Where it sprouted
        position: Vec2,
    },
    /// A mushroom was picked up
    MushroomPicked {
        /// The mushroom
        key: BodyKey,
        /// Player or mole that took it
        carrier: BodyKey,
    },
    /// A mushroom was dropped into the basket
    MushroomDelivered {
        /// The mushroom (no longer in the level)
        key: BodyKey,
        /// Its scale at delivery
        scale: f32,
    },
    /// A mushroom shrank away in the sun
    MushroomWithered {
        /// The mushroom (no longer in the level)
        key: BodyKey,
    },
    /// A mole started burrowing in
    MoleSpawned {
        /// The mole
        key: BodyKey,
    },
    /// A mole bit the player
    PlayerStunned,
    /// The meter ran dry
    GameOver {
        /// Mushrooms delivered this round
        counter: u32,
    },
    /// The day ended with the meter still up
    LevelClear {
        /// Mushrooms delivered this round
        counter: u32,
    },
}
