//! Primitive collision shapes
//!
//! Circles, axis-aligned rectangles and simple polygons in world space.
//! Constructors validate their input: a degenerate primitive would break the
//! bounding-radius guarantee the broad phase depends on.

use thiserror::Error;

use crate::foundation::math::{constants::TAU, Vec2};

/// Number of vertices used when a circle has to be treated as an outline.
pub const CIRCLE_SEGMENTS: usize = 16;

/// Rejected shape parameters
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Circle radius was zero, negative or NaN
    #[error("radius must be positive, got {0}")]
    NonPositiveRadius(f32),

    /// Rectangle width or height was zero, negative or NaN
    #[error("{axis} must be positive, got {value}")]
    NonPositiveDimension {
        /// Which dimension was rejected
        axis: &'static str,
        /// The rejected value
        value: f32,
    },

    /// Polygon had fewer than three vertices
    #[error("polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    /// Polygon outline encloses no area
    #[error("polygon outline has zero area")]
    ZeroArea,

    /// A coordinate was NaN or infinite
    #[error("coordinate is not finite")]
    NonFiniteCoordinate,
}

fn check_finite(values: &[f32]) -> Result<(), GeometryError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(GeometryError::NonFiniteCoordinate)
    }
}

fn check_positive(axis: &'static str, value: f32) -> Result<(), GeometryError> {
    // `!(value > 0.0)` also rejects NaN
    if value > 0.0 {
        Ok(())
    } else {
        Err(GeometryError::NonPositiveDimension { axis, value })
    }
}

/// Axis-aligned bounds of a shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Smallest corner
    pub min: Vec2,
    /// Largest corner
    pub max: Vec2,
}

impl Bounds {
    /// Bounds enclosing every point in the slice
    pub fn from_points(points: &[Vec2]) -> Self {
        let mut min = Vec2::new(f32::INFINITY, f32::INFINITY);
        let mut max = Vec2::new(f32::NEG_INFINITY, f32::NEG_INFINITY);
        for p in points {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Self { min, max }
    }

    /// Width of the bounds
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Height of the bounds
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Inclusive overlap test
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }
}

/// A circle
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    /// Center position
    pub center: Vec2,
    radius: f32,
}

impl Circle {
    /// Creates a circle, rejecting non-positive radii
    pub fn new(center: Vec2, radius: f32) -> Result<Self, GeometryError> {
        check_finite(&[center.x, center.y])?;
        if !(radius > 0.0 && radius.is_finite()) {
            return Err(GeometryError::NonPositiveRadius(radius));
        }
        Ok(Self { center, radius })
    }

    /// Circle radius
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Resize in place, keeping the center fixed
    pub fn set_radius(&mut self, radius: f32) -> Result<(), GeometryError> {
        if !(radius > 0.0 && radius.is_finite()) {
            return Err(GeometryError::NonPositiveRadius(radius));
        }
        self.radius = radius;
        Ok(())
    }

    /// Outline approximation, starting on the +x axis and walking by
    /// increasing angle (the same turning direction as `Rectangle::points`).
    pub fn points(&self) -> Vec<Vec2> {
        (0..CIRCLE_SEGMENTS)
            .map(|i| {
                let angle = TAU * i as f32 / CIRCLE_SEGMENTS as f32;
                self.center + Vec2::new(angle.cos(), angle.sin()) * self.radius
            })
            .collect()
    }
}

/// An axis-aligned rectangle stored by its top-left corner
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    /// Top-left corner
    pub origin: Vec2,
    width: f32,
    height: f32,
}

impl Rectangle {
    /// Creates a rectangle from its top-left corner and size
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Result<Self, GeometryError> {
        check_finite(&[x, y])?;
        check_positive("width", width)?;
        check_positive("height", height)?;
        Ok(Self {
            origin: Vec2::new(x, y),
            width,
            height,
        })
    }

    /// Rectangle width
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Rectangle height
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Center of the rectangle
    pub fn center(&self) -> Vec2 {
        self.origin + Vec2::new(self.width, self.height) * 0.5
    }

    /// Corners in order: top-left, top-right, bottom-right, bottom-left
    pub fn points(&self) -> [Vec2; 4] {
        let (x, y) = (self.origin.x, self.origin.y);
        let (w, h) = (self.width, self.height);
        [
            Vec2::new(x, y),
            Vec2::new(x + w, y),
            Vec2::new(x + w, y + h),
            Vec2::new(x, y + h),
        ]
    }

    /// Axis-aligned bounds
    pub fn bounds(&self) -> Bounds {
        Bounds {
            min: self.origin,
            max: self.origin + Vec2::new(self.width, self.height),
        }
    }
}

/// A simple polygon. Vertices are stored in the same turning direction as
/// rectangle corners; clockwise input is reversed on construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    points: Vec<Vec2>,
    center: Vec2,
    radius: f32,
}

impl Polygon {
    /// Creates a polygon from its outline
    pub fn new(mut points: Vec<Vec2>) -> Result<Self, GeometryError> {
        if points.len() < 3 {
            return Err(GeometryError::TooFewVertices(points.len()));
        }
        for p in &points {
            check_finite(&[p.x, p.y])?;
        }

        let signed_area: f32 = (0..points.len())
            .map(|i| {
                let (a, b) = (points[i], points[(i + 1) % points.len()]);
                a.x * b.y - b.x * a.y
            })
            .sum();
        if signed_area == 0.0 {
            return Err(GeometryError::ZeroArea);
        }
        if signed_area < 0.0 {
            points.reverse();
        }

        let center = points.iter().fold(Vec2::zeros(), |acc, p| acc + p) / points.len() as f32;
        let radius = points
            .iter()
            .map(|p| (p - center).magnitude())
            .fold(0.0, f32::max);

        Ok(Self {
            points,
            center,
            radius,
        })
    }

    /// Outline vertices
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Vertex average
    pub fn center(&self) -> Vec2 {
        self.center
    }

    /// Largest vertex distance from the center
    pub fn bounding_radius(&self) -> f32 {
        self.radius
    }

    /// Move every vertex by `offset`
    pub fn translate(&mut self, offset: Vec2) {
        for p in &mut self.points {
            *p += offset;
        }
        self.center += offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_degenerate_primitives_rejected() {
        assert_eq!(
            Circle::new(Vec2::zeros(), 0.0),
            Err(GeometryError::NonPositiveRadius(0.0))
        );
        assert!(Circle::new(Vec2::zeros(), -1.0).is_err());
        assert!(Circle::new(Vec2::zeros(), f32::NAN).is_err());
        assert!(matches!(
            Rectangle::new(0.0, 0.0, 10.0, 0.0),
            Err(GeometryError::NonPositiveDimension { axis: "height", .. })
        ));
        assert_eq!(
            Polygon::new(vec![Vec2::zeros(), Vec2::new(1.0, 0.0)]),
            Err(GeometryError::TooFewVertices(2))
        );
        assert_eq!(
            Polygon::new(vec![Vec2::zeros(), Vec2::new(1.0, 0.0), Vec2::new(2.0, 0.0)]),
            Err(GeometryError::ZeroArea)
        );
    }

    #[test]
    fn test_set_radius_keeps_center() {
        let mut circle = Circle::new(Vec2::new(4.0, 5.0), 3.0).unwrap();
        circle.set_radius(6.0).unwrap();
        assert_relative_eq!(circle.center, Vec2::new(4.0, 5.0));
        assert_relative_eq!(circle.radius(), 6.0);
        assert!(circle.set_radius(0.0).is_err());
        assert_relative_eq!(circle.radius(), 6.0);
    }

    #[test]
    fn test_polygon_winding_normalized() {
        let clockwise = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, 4.0),
            Vec2::new(4.0, 4.0),
            Vec2::new(4.0, 0.0),
        ];
        let polygon = Polygon::new(clockwise).unwrap();
        assert_relative_eq!(polygon.points()[0], Vec2::new(4.0, 0.0));
        assert_relative_eq!(polygon.center(), Vec2::new(2.0, 2.0));
        assert_relative_eq!(polygon.bounding_radius(), 8.0_f32.sqrt());
    }

    #[test]
    fn test_circle_outline_stays_on_circle() {
        let circle = Circle::new(Vec2::new(1.0, 1.0), 2.0).unwrap();
        let points = circle.points();
        assert_eq!(points.len(), CIRCLE_SEGMENTS);
        for p in points {
            assert_relative_eq!((p - circle.center).magnitude(), 2.0, epsilon = 1e-5);
        }
    }
}
