//! Collision queries between bodies
//!
//! Broad phase is a bounding-circle check, narrow phase is the exact
//! `Shape::intersects`. The three batch queries share one exclusion rule:
//! an obstacle is skipped when it *is* the subject (pointer identity) or is
//! listed among the exceptions.

use crate::foundation::math::Vec2;
use super::collision::Shape;

/// Anything that owns exactly one shape and moves it around.
///
/// The reported center is always the shape's center; implementors only
/// provide access to the shape and their velocity.
pub trait Body {
    /// The owned shape
    fn shape(&self) -> &Shape;

    /// Mutable access to the owned shape
    fn shape_mut(&mut self) -> &mut Shape;

    /// Current velocity in units per tick
    fn velocity(&self) -> Vec2 {
        Vec2::zeros()
    }

    /// Center of the body
    fn center(&self) -> Vec2 {
        self.shape().center()
    }

    /// Width of the body's bounds
    fn width(&self) -> f32 {
        self.shape().width()
    }

    /// Height of the body's bounds
    fn height(&self) -> f32 {
        self.shape().height()
    }

    /// Move the body by `offset`
    fn nudge(&mut self, offset: Vec2) {
        self.shape_mut().translate(offset);
    }

    /// Place the body's center at `center`
    fn set_center(&mut self, center: Vec2) {
        self.shape_mut().set_center(center);
    }
}

/// Unordered pair of colliding bodies, stored smallest key first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CollisionPair<K> {
    /// Smaller key
    pub first: K,
    /// Larger key
    pub second: K,
}

impl<K: Ord> CollisionPair<K> {
    /// Create a new collision pair (always stores the smaller key first)
    pub fn new(a: K, b: K) -> Self {
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }
}

/// Stateless intersection testing between bodies
pub struct Collider;

impl Collider {
    /// Whether two bodies intersect: cheap bounds check, then exact check.
    pub fn intersecting<A: Body + ?Sized, B: Body + ?Sized>(one: &A, two: &B) -> bool {
        Self::check_bounds(one, two) && one.shape().intersects(two.shape())
    }

    /// Compare squared center distance with the squared sum of bounding
    /// radii. May report false positives, never false negatives.
    fn check_bounds<A: Body + ?Sized, B: Body + ?Sized>(one: &A, two: &B) -> bool {
        let distance_squared = (one.center() - two.center()).magnitude_squared();
        let radius_sum = one.shape().bounding_radius() + two.shape().bounding_radius();
        distance_squared <= radius_sum * radius_sum
    }

    fn excluded<B>(subject: &B, obstacle: &B, exceptions: &[&B]) -> bool {
        std::ptr::eq(subject, obstacle) || exceptions.iter().any(|e| std::ptr::eq(*e, obstacle))
    }

    /// Hand every obstacle that intersects `subject` to `resolve`, in
    /// iteration order, once per obstacle encountered.
    pub fn test_and_alert<'a, B, I, F>(subject: &'a B, obstacles: I, mut resolve: F)
    where
        B: Body + 'a,
        I: IntoIterator<Item = &'a B>,
        F: FnMut(&'a B, &'a B),
    {
        for obstacle in obstacles {
            if !Self::excluded(subject, obstacle, &[]) && Self::intersecting(subject, obstacle) {
                resolve(subject, obstacle);
            }
        }
    }

    /// First obstacle that intersects `subject` and is not an exception.
    pub fn test_and_return<'a, B, I>(subject: &B, obstacles: I, exceptions: &[&B]) -> Option<&'a B>
    where
        B: Body + 'a,
        I: IntoIterator<Item = &'a B>,
    {
        obstacles.into_iter().find(|&obstacle| {
            !Self::excluded(subject, obstacle, exceptions) && Self::intersecting(subject, obstacle)
        })
    }

    /// Whether any non-excepted obstacle intersects `subject`.
    pub fn test_and_flag<'a, B, I>(subject: &B, obstacles: I, exceptions: &[&B]) -> bool
    where
        B: Body + 'a,
        I: IntoIterator<Item = &'a B>,
    {
        Self::test_and_return(subject, obstacles, exceptions).is_some()
    }
}
