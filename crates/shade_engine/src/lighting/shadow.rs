//! Shadow casting
//!
//! A caster of height `h` lit at angle `a` with depth `d` projects its
//! footprint `h * d` units along `a`. The shadow polygon is the region
//! between the footprint's far-side silhouette and the projected copy of it:
//! the projected vertices are walked forward, then the original ones back.

use crate::foundation::math::{
    calculate_vector, orientation, point_in_polygon, polygon_area, Vec2,
};
use crate::physics::collision::{Bounds, Shape};

/// Displacements shorter than this throw no shadow
const MIN_SHADOW_LENGTH: f32 = 1e-4;

/// Relative slack when deciding whether an edge faces away from the light
const EDGE_TOLERANCE: f32 = 1e-5;

/// Region occluded from one light by one caster
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowPolygon {
    points: Vec<Vec2>,
}

impl ShadowPolygon {
    fn new(points: Vec<Vec2>) -> Self {
        Self { points }
    }

    /// Ordered outline vertices
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Number of vertices
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the polygon has no vertices
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether the point falls inside the shadow
    pub fn contains(&self, point: Vec2) -> bool {
        point_in_polygon(point, &self.points)
    }

    /// Axis-aligned bounds of the shadow
    pub fn bounds(&self) -> Bounds {
        Bounds::from_points(&self.points)
    }

    /// Shaded area
    pub fn area(&self) -> f32 {
        polygon_area(&self.points)
    }
}

/// Anything that can throw a shadow
pub trait ShadowCaster {
    /// Footprint of the caster
    fn caster_shape(&self) -> &Shape;

    /// Height of the caster; zero means it lies flat and throws nothing
    fn caster_height(&self) -> f32;

    /// Shadow thrown along `direction` with the given `depth`
    fn cast_shadow(&self, direction: f32, depth: f32) -> Option<ShadowPolygon> {
        self.caster_shape()
            .cast_shadow(self.caster_height(), direction, depth)
    }

    /// Draw order; taller casters draw later
    fn z_index(&self) -> i32 {
        self.caster_height().round() as i32
    }
}

/// Start index for a rectangle's walk, chosen by the quadrant the
/// displacement points into. Corners are TL, TR, BR, BL; y grows downward.
///
/// A displacement exactly along an axis lands on a quadrant boundary and the
/// walk keeps one lit corner, so the polygon folds back along the face
/// parallel to the light. The fold encloses no area and the shadow still has
/// six vertices; containment and area are unaffected.
fn rectangle_start_index(displacement: Vec2) -> usize {
    if displacement.y > 0.0 {
        // bottom
        if displacement.x > 0.0 {
            0
        } else {
            1
        }
    } else if displacement.x > 0.0 {
        // top right
        3
    } else {
        2
    }
}

/// Far copy walked forward from `start + 1`, then near copy walked back.
fn walk_silhouette(near: &[Vec2], displacement: Vec2, start: usize, steps: usize) -> ShadowPolygon {
    let n = near.len();
    let mut points = Vec::with_capacity(steps * 2);
    for i in 1..=steps {
        points.push(near[(start + i) % n] + displacement);
    }
    for i in (1..=steps).rev() {
        points.push(near[(start + i) % n]);
    }
    ShadowPolygon::new(points)
}

/// Convex hull in the same turning direction as rectangle corners.
fn convex_hull(points: &[Vec2]) -> Vec<Vec2> {
    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    sorted.dedup();
    if sorted.len() < 3 {
        return sorted;
    }

    let reversed: Vec<Vec2> = sorted.iter().rev().copied().collect();
    let mut hull: Vec<Vec2> = Vec::with_capacity(sorted.len() * 2);
    for pass in [sorted.as_slice(), reversed.as_slice()] {
        let floor = hull.len();
        for &p in pass {
            while hull.len() >= floor + 2
                && orientation(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0.0
            {
                hull.pop();
            }
            hull.push(p);
        }
        hull.pop();
    }
    hull
}

/// Generic silhouette walk for round or polygonal footprints. The walked
/// chain is the run of edges facing away from the light.
fn convex_silhouette(outline: &[Vec2], displacement: Vec2) -> Option<ShadowPolygon> {
    let hull = convex_hull(outline);
    let n = hull.len();
    if n < 3 {
        return None;
    }

    let reach = displacement.magnitude();
    let faces_away = |i: usize| {
        let edge = hull[(i + 1) % n] - hull[i];
        // outward normal for this winding; edges parallel to the light are lit
        Vec2::new(edge.y, -edge.x).dot(&displacement) > EDGE_TOLERANCE * edge.magnitude() * reach
    };

    let first = (0..n).find(|&i| faces_away(i) && !faces_away((i + n - 1) % n))?;
    let run = (0..n).take_while(|&k| faces_away((first + k) % n)).count();

    // walk_silhouette starts one past `start`
    Some(walk_silhouette(&hull, displacement, first + n - 1, run + 1))
}

impl Shape {
    /// Shadow of this footprint for a caster of the given height.
    ///
    /// Returns `None` when the shadow would have no length (zero height or
    /// zero depth).
    pub fn cast_shadow(&self, height: f32, direction: f32, depth: f32) -> Option<ShadowPolygon> {
        let displacement = calculate_vector(height * depth, direction);
        if !(displacement.magnitude() > MIN_SHADOW_LENGTH) {
            return None;
        }

        match self {
            Self::Rectangle(rect) => {
                let start = rectangle_start_index(displacement);
                Some(walk_silhouette(&rect.points(), displacement, start, 3))
            }
            Self::Circle(circle) => convex_silhouette(&circle.points(), displacement),
            Self::Polygon(polygon) => convex_silhouette(polygon.points(), displacement),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::constants::PI;
    use approx::assert_relative_eq;

    /// No two non-adjacent edges cross or run over each other.
    fn is_simple(points: &[Vec2]) -> bool {
        const FLAT: f32 = 1e-4;
        let n = points.len();
        for i in 0..n {
            for j in (i + 2)..n {
                if i == 0 && j == n - 1 {
                    continue;
                }
                let (a1, a2) = (points[i], points[(i + 1) % n]);
                let (b1, b2) = (points[j], points[(j + 1) % n]);
                let d1 = orientation(b1, b2, a1);
                let d2 = orientation(b1, b2, a2);
                let d3 = orientation(a1, a2, b1);
                let d4 = orientation(a1, a2, b2);
                if d1 * d2 < 0.0 && d3 * d4 < 0.0 {
                    return false;
                }
                if [d1, d2, d3, d4].iter().all(|d| d.abs() <= FLAT) {
                    // same line: compare extents along `a`
                    let axis = a2 - a1;
                    let along = |p: Vec2| (p - a1).dot(&axis) / axis.magnitude();
                    let (lo, hi) = (along(b1).min(along(b2)), along(b1).max(along(b2)));
                    if hi.min(axis.magnitude()) - lo.max(0.0) > FLAT {
                        return false;
                    }
                }
            }
        }
        true
    }

    #[test]
    fn test_rectangle_shadow_along_x() {
        let block = Shape::rectangle(0.0, 0.0, 10.0, 10.0).unwrap();
        let shadow = block.cast_shadow(5.0, 0.0, 1.0).unwrap();

        assert_eq!(shadow.len(), 6);
        assert!(shadow.points().iter().all(|p| p.x >= -1e-5));
        assert_relative_eq!(shadow.bounds().max.x, 15.0, epsilon = 1e-4);
        assert_relative_eq!(shadow.area(), 50.0, epsilon = 1e-3);
        assert!(shadow.contains(Vec2::new(12.0, 5.0)));
        assert!(!shadow.contains(Vec2::new(5.0, 5.0)));
    }

    #[test]
    fn test_axis_aligned_rectangle_shadow_folds_along_top_face() {
        let block = Shape::rectangle(0.0, 0.0, 10.0, 10.0).unwrap();
        let shadow = block.cast_shadow(5.0, 0.0, 1.0).unwrap();
        let expected = [
            Vec2::new(5.0, 0.0),
            Vec2::new(15.0, 0.0),
            Vec2::new(15.0, 10.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(0.0, 0.0),
        ];
        for (got, want) in shadow.points().iter().zip(expected) {
            assert_relative_eq!(*got, want, epsilon = 1e-5);
        }
        // (10,0)->(0,0) runs back over (5,0)->(15,0)
        assert!(!is_simple(shadow.points()));

        // nudged off the axis the fold opens up
        let nudged = block.cast_shadow(5.0, 0.05, 1.0).unwrap();
        assert_eq!(nudged.len(), 6);
        assert!(is_simple(nudged.points()));
        let reach = calculate_vector(5.0, 0.05);
        assert_relative_eq!(nudged.area(), 10.0 * (reach.x + reach.y), epsilon = 1e-3);
    }

    #[test]
    fn test_is_simple_flags_crossings_and_overlaps() {
        let square = [
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ];
        assert!(is_simple(&square));
        let bowtie = [square[0], square[2], square[1], square[3]];
        assert!(!is_simple(&bowtie));
        let hairpin = [
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(6.0, 10.0),
            Vec2::new(6.0, 0.0),
            Vec2::new(2.0, 0.0),
        ];
        assert!(!is_simple(&hairpin));
    }

    #[test]
    fn test_rectangle_shadow_always_six_vertices() {
        let block = Shape::rectangle(100.0, 50.0, 56.0, 56.0).unwrap();
        for step in 0..32 {
            let angle = -PI + step as f32 * (PI / 16.0) + 0.01;
            let shadow = block.cast_shadow(6.0, angle, 10.0).unwrap();
            assert_eq!(shadow.len(), 6, "angle {angle}");
            assert!(is_simple(shadow.points()), "angle {angle}");
        }
    }

    #[test]
    fn test_diagonal_shadow_area() {
        // Displacement (3, 4) on a 10x10 block: the shadow is the swept hull
        // minus the block itself
        let block = Shape::rectangle(0.0, 0.0, 10.0, 10.0).unwrap();
        let angle = 4.0_f32.atan2(3.0);
        let shadow = block.cast_shadow(5.0, angle, 1.0).unwrap();
        assert_relative_eq!(shadow.area(), 3.0 * 10.0 + 4.0 * 10.0, epsilon = 1e-3);
        assert!(shadow.contains(Vec2::new(11.0, 6.0)));
        assert!(shadow.contains(Vec2::new(6.0, 11.0)));
    }

    #[test]
    fn test_degenerate_casters_throw_nothing() {
        let block = Shape::rectangle(0.0, 0.0, 10.0, 10.0).unwrap();
        assert!(block.cast_shadow(0.0, 1.0, 10.0).is_none());
        assert!(block.cast_shadow(5.0, 1.0, 0.0).is_none());
        let dome = Shape::circle(0.0, 0.0, 10.0).unwrap();
        assert!(dome.cast_shadow(0.0, 1.0, 10.0).is_none());
    }

    #[test]
    fn test_casting_is_idempotent() {
        let dome = Shape::circle(288.0, 165.0, 32.0).unwrap();
        let first = dome.cast_shadow(7.0, 2.5, 10.0);
        let second = dome.cast_shadow(7.0, 2.5, 10.0);
        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[test]
    fn test_dome_shadow_falls_away_from_light() {
        let dome = Shape::circle(0.0, 0.0, 10.0).unwrap();
        let shadow = dome.cast_shadow(4.0, 0.0, 5.0).unwrap();
        assert!(is_simple(shadow.points()));
        assert!(shadow.contains(Vec2::new(20.0, 0.0)));
        assert!(!shadow.contains(Vec2::new(-15.0, 0.0)));
        assert_relative_eq!(shadow.bounds().max.x, 30.0, epsilon = 1e-3);
    }

    #[test]
    fn test_polygon_shadow_uses_far_side() {
        let wedge = Shape::polygon(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(0.0, 10.0),
        ])
        .unwrap();
        let shadow = wedge.cast_shadow(2.0, PI, 2.0).unwrap();
        // Only the left edge faces away from a light shining toward -x
        assert_eq!(shadow.len(), 4);
        assert!(shadow.contains(Vec2::new(-2.0, 5.0)));
        assert_relative_eq!(shadow.area(), 40.0, epsilon = 1e-3);
    }

    struct Fence(Shape, f32);

    impl ShadowCaster for Fence {
        fn caster_shape(&self) -> &Shape {
            &self.0
        }

        fn caster_height(&self) -> f32 {
            self.1
        }
    }

    #[test]
    fn test_caster_trait_delegates() {
        let fence = Fence(Shape::rectangle(225.0, 225.0, 11.0, 120.0).unwrap(), 5.0);
        assert_eq!(fence.z_index(), 5);
        let shadow = fence.cast_shadow(2.5, 10.0).unwrap();
        assert_eq!(shadow, fence.caster_shape().cast_shadow(5.0, 2.5, 10.0).unwrap());
    }
}
