//! Shapes and exact intersection tests
//!
//! # Module Organization
//!
//! - [`primitives`] - Circles, rectangles and polygons with validated construction
//! - [`shape`] - The closed `Shape` variant every body owns
//!
//! # Key Types
//!
//! - [`Shape`] - World-space shape attached to a body
//! - [`GeometryError`] - Rejected shape parameters

pub mod primitives;
pub mod shape;

// Re-export commonly used types
pub use primitives::{Bounds, Circle, GeometryError, Polygon, Rectangle, CIRCLE_SEGMENTS};
pub use shape::Shape;
