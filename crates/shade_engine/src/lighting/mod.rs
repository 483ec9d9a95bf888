//! Lighting module
//!
//! Light sources, per-caster shadow polygons and the composer that turns
//! them into exposure classifications.

pub mod light;
pub mod shadow;
pub mod composer;

pub use light::{LightKind, LightSource};
pub use shadow::{ShadowCaster, ShadowPolygon};
pub use composer::{Exposure, ShadowComposer};
