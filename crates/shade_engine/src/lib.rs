//! # Shade Engine
//!
//! The spatial core of Shade: 2D shapes, collision queries between bodies,
//! shadow casting from lights, and exposure classification against the
//! resulting shadows.
//!
//! ## Features
//!
//! - **Shapes**: circles, axis-aligned rectangles and polygons behind one
//!   closed `Shape` type with exact, symmetric intersection tests
//! - **Collider**: bounds pre-check plus exact test, with alert/return/flag
//!   batch queries
//! - **Shadows**: silhouette polygons thrown by casters away from
//!   directional or point lights
//! - **Exposure**: cached shadow composition and shaded/partial/unshaded
//!   classification of any shape
//!
//! ## Quick Start
//!
//! ```rust
//! use shade_engine::prelude::*;
//!
//! let block = Shape::rectangle(0.0, 0.0, 10.0, 10.0)?;
//! let shadow = block.cast_shadow(5.0, 0.0, 1.0).expect("block has height");
//! assert_eq!(shadow.len(), 6);
//! # Ok::<(), GeometryError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod physics;
pub mod lighting;
pub mod config;
pub mod events;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, ConfigFormat},
        events::{EventQueue, Stamped},
        foundation::{
            math::{Vec2, WorldBounds},
            time::FrameClock,
        },
        lighting::{Exposure, LightKind, LightSource, ShadowCaster, ShadowComposer, ShadowPolygon},
        physics::{Body, Collider, CollisionPair, GeometryError, Shape},
    };
}
