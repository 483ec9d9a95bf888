//! Physics module for collision detection and response
//!
//! Provides exact 2D intersection tests, batch collision queries over
//! bodies, and positional repel resolution. There is no momentum: bodies
//! are only ever pushed apart.

pub mod collision;
pub mod collider;
pub mod repel;

pub use collision::{Bounds, GeometryError, Shape};
pub use collider::{Body, Collider, CollisionPair};
pub use repel::{repel_along_axis, repel_radially};
