//! Math utilities and types
//!
//! Provides the 2D vector types and the small set of geometric helpers the
//! collision, shadow and behaviour code is built on. Everything here is pure.
//!
//! Angles are radians measured with `atan2`, so they lie in `(-PI, PI]`.
//! Callers flip a direction by adding `PI`; nothing here re-normalizes the
//! result, and the shadow and follow logic rely on that.

pub use nalgebra::Vector2;

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 2D point type
pub type Point2 = nalgebra::Point2<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;
}

/// Squared distance between two points.
pub fn distance2(a: Vec2, b: Vec2) -> f32 {
    (a - b).magnitude_squared()
}

/// Vector of the given magnitude pointing along `direction` (radians).
pub fn calculate_vector(magnitude: f32, direction: f32) -> Vec2 {
    Vec2::new(magnitude * direction.cos(), magnitude * direction.sin())
}

/// Direction pointing from `source` toward `target`, in radians.
pub fn calculate_angle(target: Vec2, source: Vec2) -> f32 {
    (target.y - source.y).atan2(target.x - source.x)
}

/// Dimensions of the playing field, used for wrapping and bounds checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    /// Field width
    pub width: f32,
    /// Field height
    pub height: f32,
}

impl WorldBounds {
    /// Create a new field of the given size
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether the point lies inside `[0, width) x [0, height)`
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= 0.0 && point.x < self.width && point.y >= 0.0 && point.y < self.height
    }

    /// Wrap a point toroidally back into the field.
    pub fn wrap(&self, point: Vec2) -> Vec2 {
        Vec2::new(point.x.rem_euclid(self.width), point.y.rem_euclid(self.height))
    }

    /// Squared distances from `follower` to `leader`: direct, across the
    /// horizontal seam, and across the vertical seam, in that order.
    pub fn route_distances2(&self, follower: Vec2, leader: Vec2) -> [f32; 3] {
        let direct = distance2(leader, follower);

        let across_x = if follower.x < leader.x {
            distance2(leader, Vec2::new(follower.x + self.width, follower.y))
        } else {
            distance2(follower, Vec2::new(leader.x + self.width, leader.y))
        };

        let across_y = if follower.y < leader.y {
            distance2(leader, Vec2::new(follower.x, follower.y + self.height))
        } else {
            distance2(follower, Vec2::new(leader.x, leader.y + self.height))
        };

        [direct, across_x, across_y]
    }

    /// Shortest squared distance between two points on the wrapped field.
    pub fn wrapped_distance2(&self, a: Vec2, b: Vec2) -> f32 {
        self.route_distances2(a, b)
            .into_iter()
            .fold(f32::INFINITY, f32::min)
    }
}

/// Signed doubled area of the triangle `a, b, c` (positive when counter-clockwise
/// in a y-up frame).
pub fn orientation(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

fn on_segment(p: Vec2, q: Vec2, r: Vec2) -> bool {
    r.x >= p.x.min(q.x) && r.x <= p.x.max(q.x) && r.y >= p.y.min(q.y) && r.y <= p.y.max(q.y)
}

/// Whether segments `p1-p2` and `q1-q2` share at least one point (touching counts).
pub fn segments_intersect(p1: Vec2, p2: Vec2, q1: Vec2, q2: Vec2) -> bool {
    let d1 = orientation(q1, q2, p1);
    let d2 = orientation(q1, q2, p2);
    let d3 = orientation(p1, p2, q1);
    let d4 = orientation(p1, p2, q2);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    (d1 == 0.0 && on_segment(q1, q2, p1))
        || (d2 == 0.0 && on_segment(q1, q2, p2))
        || (d3 == 0.0 && on_segment(p1, p2, q1))
        || (d4 == 0.0 && on_segment(p1, p2, q2))
}

/// Squared distance from `point` to the closest point of segment `a-b`.
pub fn point_segment_distance2(point: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len2 = ab.magnitude_squared();
    if len2 == 0.0 {
        return distance2(point, a);
    }
    let t = ((point - a).dot(&ab) / len2).clamp(0.0, 1.0);
    distance2(point, a + ab * t)
}

/// Even-odd point-in-polygon test. Works for concave outlines.
pub fn point_in_polygon(point: Vec2, vertices: &[Vec2]) -> bool {
    let n = vertices.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (vi, vj) = (vertices[i], vertices[j]);
        if (vi.y > point.y) != (vj.y > point.y) {
            let intersect_x = (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x;
            if point.x < intersect_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Polygon area using the shoelace formula, positive regardless of winding.
pub fn polygon_area(vertices: &[Vec2]) -> f32 {
    let n = vertices.len();
    if n < 3 {
        return 0.0;
    }
    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += vertices[i].x * vertices[j].y;
        area -= vertices[j].x * vertices[i].y;
    }
    area.abs() / 2.0
}
