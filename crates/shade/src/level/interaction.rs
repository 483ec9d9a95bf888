//! Collision reactions
//!
//! What happens when two bodies touch depends only on their roles. The
//! table is written for one orientation of each pair and tried both ways.

use crate::entities::{BodyKey, Entity, Mole, Role};

/// Reaction to one colliding pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Interaction {
    /// A carrier takes a mushroom
    Pick { mushroom: BodyKey, carrier: BodyKey },
    /// An obstacle pushes a body out
    Repel { obstacle: BodyKey, repellee: BodyKey },
    /// A mole bites the player
    Stun { player: BodyKey },
    /// The player empties their trail into the basket
    Deliver { player: BodyKey, basket: BodyKey },
}

impl Interaction {
    /// Reaction for a touching pair, if any
    pub(crate) fn between(a: &Entity, b: &Entity) -> Option<Self> {
        let burrowed = |e: &Entity| e.as_mole().is_some_and(Mole::is_burrowed);
        if burrowed(a) || burrowed(b) {
            return None;
        }
        Self::directed(a, b).or_else(|| Self::directed(b, a))
    }

    fn directed(a: &Entity, b: &Entity) -> Option<Self> {
        match (a.role(), b.role()) {
            (Role::Mushroom, Role::Player) => {
                let idle = a.as_mushroom().is_some_and(|m| m.is_idle());
                idle.then_some(Self::Pick {
                    mushroom: a.key(),
                    carrier: b.key(),
                })
            }
            (Role::Mushroom, Role::Creature) => {
                let already_taken = a.as_mushroom().and_then(|m| m.carrier()) == Some(b.key());
                (!already_taken).then_some(Self::Pick {
                    mushroom: a.key(),
                    carrier: b.key(),
                })
            }
            (Role::Obstacle, Role::Player | Role::Mushroom | Role::Creature) => Some(Self::Repel {
                obstacle: a.key(),
                repellee: b.key(),
            }),
            (Role::Player, Role::Creature) => Some(Self::Stun { player: a.key() }),
            (Role::Player, Role::Basket) => Some(Self::Deliver {
                player: a.key(),
                basket: b.key(),
            }),
            _ => None,
        }
    }
}
