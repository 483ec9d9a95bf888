//! High-level collision shape abstraction
//!
//! `Shape` is a closed set of primitives. Every operation dispatches with a
//! `match`, and pairwise tests cover every combination explicitly so that
//! `a.intersects(b) == b.intersects(a)` holds by construction.

use std::borrow::Cow;

use crate::foundation::math::{
    point_in_polygon, point_segment_distance2, segments_intersect, Vec2,
};
use super::primitives::{Bounds, Circle, GeometryError, Polygon, Rectangle};

/// World-space shape owned by a body
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// A circle
    Circle(Circle),
    /// An axis-aligned rectangle
    Rectangle(Rectangle),
    /// A simple polygon
    Polygon(Polygon),
}

impl Shape {
    /// Circle centered at `(x, y)`
    pub fn circle(x: f32, y: f32, radius: f32) -> Result<Self, GeometryError> {
        Circle::new(Vec2::new(x, y), radius).map(Self::Circle)
    }

    /// Rectangle with its top-left corner at `(x, y)`
    pub fn rectangle(x: f32, y: f32, width: f32, height: f32) -> Result<Self, GeometryError> {
        Rectangle::new(x, y, width, height).map(Self::Rectangle)
    }

    /// Polygon from an outline
    pub fn polygon(points: Vec<Vec2>) -> Result<Self, GeometryError> {
        Polygon::new(points).map(Self::Polygon)
    }

    /// Center position
    pub fn center(&self) -> Vec2 {
        match self {
            Self::Circle(circle) => circle.center,
            Self::Rectangle(rect) => rect.center(),
            Self::Polygon(polygon) => polygon.center(),
        }
    }

    /// Move the shape so its center lands on `center`
    pub fn set_center(&mut self, center: Vec2) {
        let offset = center - self.center();
        self.translate(offset);
        debug_assert!(
            (self.center() - center).magnitude() <= 1e-3 * (1.0 + center.magnitude()),
            "shape center drifted after set_center"
        );
    }

    /// Move the shape by `offset`
    pub fn translate(&mut self, offset: Vec2) {
        match self {
            Self::Circle(circle) => circle.center += offset,
            Self::Rectangle(rect) => rect.origin += offset,
            Self::Polygon(polygon) => polygon.translate(offset),
        }
    }

    /// Radius of a circle around `center()` that contains the whole shape
    pub fn bounding_radius(&self) -> f32 {
        match self {
            Self::Circle(circle) => circle.radius(),
            Self::Rectangle(rect) => 0.5 * rect.width().hypot(rect.height()),
            Self::Polygon(polygon) => polygon.bounding_radius(),
        }
    }

    /// Axis-aligned bounds
    pub fn bounds(&self) -> Bounds {
        match self {
            Self::Circle(circle) => {
                let r = Vec2::new(circle.radius(), circle.radius());
                Bounds {
                    min: circle.center - r,
                    max: circle.center + r,
                }
            }
            Self::Rectangle(rect) => rect.bounds(),
            Self::Polygon(polygon) => Bounds::from_points(polygon.points()),
        }
    }

    /// Width of the bounds
    pub fn width(&self) -> f32 {
        self.bounds().width()
    }

    /// Height of the bounds
    pub fn height(&self) -> f32 {
        self.bounds().height()
    }

    /// Outline vertices (circles are approximated)
    pub fn points(&self) -> Cow<'_, [Vec2]> {
        match self {
            Self::Circle(circle) => Cow::Owned(circle.points()),
            Self::Rectangle(rect) => Cow::Owned(rect.points().to_vec()),
            Self::Polygon(polygon) => Cow::Borrowed(polygon.points()),
        }
    }

    /// Whether the point lies inside or on the shape
    pub fn contains_point(&self, point: Vec2) -> bool {
        match self {
            Self::Circle(circle) => {
                (point - circle.center).magnitude_squared() <= circle.radius() * circle.radius()
            }
            Self::Rectangle(rect) => {
                let b = rect.bounds();
                point.x >= b.min.x && point.x <= b.max.x && point.y >= b.min.y && point.y <= b.max.y
            }
            Self::Polygon(polygon) => point_in_polygon(point, polygon.points()),
        }
    }

    /// Exact intersection test. Touching counts as intersecting.
    pub fn intersects(&self, other: &Shape) -> bool {
        match (self, other) {
            (Self::Circle(a), Self::Circle(b)) => {
                let radius_sum = a.radius() + b.radius();
                (a.center - b.center).magnitude_squared() <= radius_sum * radius_sum
            }

            (Self::Circle(circle), Self::Rectangle(_) | Self::Polygon(_)) => {
                circle_outline_intersect(circle, &other.points())
            }
            (Self::Rectangle(_) | Self::Polygon(_), Self::Circle(circle)) => {
                circle_outline_intersect(circle, &self.points())
            }

            (Self::Rectangle(a), Self::Rectangle(b)) => a.bounds().overlaps(&b.bounds()),

            (Self::Rectangle(_) | Self::Polygon(_), Self::Rectangle(_) | Self::Polygon(_)) => {
                outlines_intersect(&self.points(), &other.points())
            }
        }
    }
}

fn edges(points: &[Vec2]) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
    (0..points.len()).map(move |i| (points[i], points[(i + 1) % points.len()]))
}

/// Circle against a closed outline: center inside, or any edge within reach.
fn circle_outline_intersect(circle: &Circle, outline: &[Vec2]) -> bool {
    let r2 = circle.radius() * circle.radius();
    point_in_polygon(circle.center, outline)
        || edges(outline).any(|(a, b)| point_segment_distance2(circle.center, a, b) <= r2)
}

/// Two closed outlines: crossing or touching edges, or one nested in the other.
fn outlines_intersect(a: &[Vec2], b: &[Vec2]) -> bool {
    edges(a).any(|(a1, a2)| edges(b).any(|(b1, b2)| segments_intersect(a1, a2, b1, b2)))
        || point_in_polygon(a[0], b)
        || point_in_polygon(b[0], a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square(cx: f32, cy: f32, half: f32) -> Shape {
        Shape::rectangle(cx - half, cy - half, half * 2.0, half * 2.0).unwrap()
    }

    fn triangle(offset: Vec2) -> Shape {
        Shape::polygon(vec![
            Vec2::new(0.0, 0.0) + offset,
            Vec2::new(6.0, 0.0) + offset,
            Vec2::new(0.0, 6.0) + offset,
        ])
        .unwrap()
    }

    #[test]
    fn test_circle_circle_boundary_inclusive() {
        let a = Shape::circle(0.0, 0.0, 3.0).unwrap();
        let touching = Shape::circle(6.0, 0.0, 3.0).unwrap();
        let apart = Shape::circle(6.01, 0.0, 3.0).unwrap();
        assert!(a.intersects(&touching));
        assert!(!a.intersects(&apart));
    }

    #[test]
    fn test_circle_rectangle() {
        let rect = Shape::rectangle(0.0, 0.0, 10.0, 10.0).unwrap();
        // Near the corner but outside it
        let near_corner = Shape::circle(12.0, 12.0, 2.0).unwrap();
        assert!(!rect.intersects(&near_corner));
        assert!(!near_corner.intersects(&rect));

        // Touching an edge
        let on_edge = Shape::circle(12.0, 5.0, 2.0).unwrap();
        assert!(rect.intersects(&on_edge));
        assert!(on_edge.intersects(&rect));

        // Fully inside
        let inside = Shape::circle(5.0, 5.0, 1.0).unwrap();
        assert!(rect.intersects(&inside));
    }

    #[test]
    fn test_polygon_polygon_and_nesting() {
        let big = triangle(Vec2::zeros());
        let overlapping = triangle(Vec2::new(2.0, 2.0));
        let far = triangle(Vec2::new(20.0, 0.0));
        assert!(big.intersects(&overlapping));
        assert!(!big.intersects(&far));

        let nested = Shape::polygon(vec![
            Vec2::new(1.0, 1.0),
            Vec2::new(2.0, 1.0),
            Vec2::new(1.0, 2.0),
        ])
        .unwrap();
        assert!(big.intersects(&nested));
        assert!(nested.intersects(&big));
    }

    #[test]
    fn test_intersects_is_symmetric() {
        let shapes = vec![
            Shape::circle(0.0, 0.0, 3.0).unwrap(),
            Shape::circle(5.0, 1.0, 2.0).unwrap(),
            square(4.0, 4.0, 2.0),
            square(-6.0, 0.0, 1.0),
            triangle(Vec2::new(-1.0, -1.0)),
            triangle(Vec2::new(30.0, 30.0)),
        ];
        for a in &shapes {
            for b in &shapes {
                assert_eq!(a.intersects(b), b.intersects(a), "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn test_bounding_radius_covers_outline() {
        let shapes = vec![
            Shape::circle(1.0, 2.0, 3.0).unwrap(),
            Shape::rectangle(-3.0, 4.0, 10.0, 2.0).unwrap(),
            triangle(Vec2::new(5.0, 5.0)),
        ];
        for shape in shapes {
            let center = shape.center();
            let radius = shape.bounding_radius();
            for p in shape.points().iter() {
                assert!((p - center).magnitude() <= radius + 1e-4);
            }
        }
    }

    #[test]
    fn test_set_center_moves_whole_shape() {
        let mut rect = Shape::rectangle(0.0, 0.0, 10.0, 4.0).unwrap();
        rect.set_center(Vec2::new(100.0, 50.0));
        assert_relative_eq!(rect.center(), Vec2::new(100.0, 50.0));
        assert_relative_eq!(rect.bounds().min, Vec2::new(95.0, 48.0));

        let mut tri = triangle(Vec2::zeros());
        tri.set_center(Vec2::zeros());
        assert_relative_eq!(tri.center(), Vec2::zeros(), epsilon = 1e-6);
    }
}
