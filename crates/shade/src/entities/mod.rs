//! Game entities
//!
//! Every live object in a level is an [`Entity`]: one shape, a velocity and
//! an [`EntityKind`] carrying the behaviour-specific state. Collision
//! reactions are chosen from the pair's [`Role`]s in one place (the level's
//! collision phase) instead of each entity notifying the other.

pub mod basket;
pub mod mole;
pub mod mushroom;
pub mod obstacle;
pub mod player;
pub mod slider;
pub mod trail;

use shade_engine::foundation::math::Vec2;
use shade_engine::lighting::ShadowCaster;
use shade_engine::physics::{Body, Shape};

pub use basket::Basket;
pub use mole::Mole;
pub use mushroom::{Mushroom, MushroomState};
pub use obstacle::{Obstacle, ObstacleKind};
pub use player::Player;
pub use slider::{SlideDirection, Slider};
pub use trail::Trail;

slotmap::new_key_type! {
    /// Handle of a body in a level
    pub struct BodyKey;
}

/// What an entity is, as far as collisions care
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// The player character
    Player,
    /// A mushroom
    Mushroom,
    /// Anything solid that pushes others away
    Obstacle,
    /// A roaming creature (moles)
    Creature,
    /// The drop-off point for mushrooms
    Basket,
}

/// Behaviour-specific state of an entity
#[derive(Debug, Clone)]
pub enum EntityKind {
    /// The player
    Player(Player),
    /// A mushroom
    Mushroom(Mushroom),
    /// A block, dome, fence or slider
    Obstacle(Obstacle),
    /// A mole
    Mole(Mole),
    /// The basket
    Basket(Basket),
}

/// A body in the level
#[derive(Debug, Clone)]
pub struct Entity {
    pub(crate) key: BodyKey,
    pub(crate) shape: Shape,
    pub(crate) velocity: Vec2,
    pub(crate) kind: EntityKind,
}

impl Entity {
    /// Create an entity at rest
    pub fn new(key: BodyKey, shape: Shape, kind: EntityKind) -> Self {
        Self {
            key,
            shape,
            velocity: Vec2::zeros(),
            kind,
        }
    }

    /// Key of this entity in its level
    pub fn key(&self) -> BodyKey {
        self.key
    }

    /// Behaviour state
    pub fn kind(&self) -> &EntityKind {
        &self.kind
    }

    /// Collision role
    pub fn role(&self) -> Role {
        match self.kind {
            EntityKind::Player(_) => Role::Player,
            EntityKind::Mushroom(_) => Role::Mushroom,
            EntityKind::Obstacle(_) => Role::Obstacle,
            EntityKind::Mole(_) => Role::Creature,
            EntityKind::Basket(_) => Role::Basket,
        }
    }

    /// Whether this entity moves on its own and so has to be tested for
    /// collisions each frame
    pub fn is_mobile(&self) -> bool {
        match &self.kind {
            EntityKind::Player(_) | EntityKind::Mushroom(_) | EntityKind::Mole(_) => true,
            EntityKind::Obstacle(obstacle) => obstacle.is_slider(),
            EntityKind::Basket(_) => false,
        }
    }

    /// The player state, if this is the player
    pub fn as_player(&self) -> Option<&Player> {
        match &self.kind {
            EntityKind::Player(player) => Some(player),
            _ => None,
        }
    }

    /// The mushroom state, if this is a mushroom
    pub fn as_mushroom(&self) -> Option<&Mushroom> {
        match &self.kind {
            EntityKind::Mushroom(mushroom) => Some(mushroom),
            _ => None,
        }
    }

    /// The mole state, if this is a mole
    pub fn as_mole(&self) -> Option<&Mole> {
        match &self.kind {
            EntityKind::Mole(mole) => Some(mole),
            _ => None,
        }
    }

    /// The obstacle state, if this is an obstacle
    pub fn as_obstacle(&self) -> Option<&Obstacle> {
        match &self.kind {
            EntityKind::Obstacle(obstacle) => Some(obstacle),
            _ => None,
        }
    }

    /// Mutable mushroom state
    pub(crate) fn as_mushroom_mut(&mut self) -> Option<&mut Mushroom> {
        match &mut self.kind {
            EntityKind::Mushroom(mushroom) => Some(mushroom),
            _ => None,
        }
    }

    /// Mutable player state
    pub(crate) fn as_player_mut(&mut self) -> Option<&mut Player> {
        match &mut self.kind {
            EntityKind::Player(player) => Some(player),
            _ => None,
        }
    }

    /// Mushrooms carried by this entity, for carriers
    pub fn trail(&self) -> Option<&Trail> {
        match &self.kind {
            EntityKind::Player(player) => Some(player.trail()),
            EntityKind::Mole(mole) => Some(mole.trail()),
            _ => None,
        }
    }

    pub(crate) fn trail_mut(&mut self) -> Option<&mut Trail> {
        match &mut self.kind {
            EntityKind::Player(player) => Some(player.trail_mut()),
            EntityKind::Mole(mole) => Some(mole.trail_mut()),
            _ => None,
        }
    }

    /// Push `repellee` out of this entity if this is an obstacle
    pub fn repel(&self, repellee: &mut Entity) {
        if let EntityKind::Obstacle(obstacle) = &self.kind {
            obstacle.repel(self, repellee);
        }
    }
}

impl Body for Entity {
    fn shape(&self) -> &Shape {
        &self.shape
    }

    fn shape_mut(&mut self) -> &mut Shape {
        &mut self.shape
    }

    fn velocity(&self) -> Vec2 {
        self.velocity
    }
}

impl ShadowCaster for Entity {
    fn caster_shape(&self) -> &Shape {
        &self.shape
    }

    fn caster_height(&self) -> f32 {
        match &self.kind {
            EntityKind::Obstacle(obstacle) => obstacle.height(),
            _ => 0.0,
        }
    }
}
