//! Shadow composition and exposure classification
//!
//! The composer keeps one cached shadow polygon per (caster, light) pair.
//! Each frame `recompute` is handed the live casters and the lights; only
//! entries whose caster geometry, height or light direction/depth changed
//! are rebuilt, and entries for casters that are gone are dropped. The
//! cache is ordered by key so iteration (and therefore rendering and
//! placement) is deterministic.
//!
//! Exposure of a shape is judged by sampling the same outline used for
//! collision: its center, every outline vertex and every edge midpoint.

use std::collections::{BTreeMap, BTreeSet};

use crate::foundation::math::Vec2;
use crate::physics::collision::{Bounds, Shape};
use super::light::LightSource;
use super::shadow::{ShadowCaster, ShadowPolygon};

/// How much of a shape lies in shadow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Exposure {
    /// No sample point is shaded
    Unshadowed,
    /// Some but not all sample points are shaded
    PartiallyShadowed,
    /// Every sample point is shaded
    Shadowed,
}

impl Exposure {
    /// Classify from a shaded fraction in `[0, 1]`
    pub fn from_fraction(fraction: f32) -> Self {
        if fraction <= 0.0 {
            Self::Unshadowed
        } else if fraction >= 1.0 {
            Self::Shadowed
        } else {
            Self::PartiallyShadowed
        }
    }

    /// Whether any part is shaded
    pub fn is_shaded(self) -> bool {
        self != Self::Unshadowed
    }
}

#[derive(Debug, Clone)]
struct CachedShadow {
    shape: Shape,
    height: f32,
    direction: f32,
    depth: f32,
    polygon: Option<ShadowPolygon>,
    bounds: Option<Bounds>,
}

impl CachedShadow {
    fn is_current(&self, shape: &Shape, height: f32, direction: f32, depth: f32) -> bool {
        self.height == height && self.direction == direction && self.depth == depth && self.shape == *shape
    }
}

/// Cache of shadow polygons for every active (caster, light) pair
#[derive(Debug, Clone)]
pub struct ShadowComposer<K> {
    cache: BTreeMap<(K, usize), CachedShadow>,
}

impl<K> Default for ShadowComposer<K> {
    fn default() -> Self {
        Self {
            cache: BTreeMap::new(),
        }
    }
}

impl<K: Copy + Ord> ShadowComposer<K> {
    /// Create an empty composer
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring the cache up to date with the given casters and lights.
    ///
    /// Returns the number of polygons that had to be rebuilt.
    pub fn recompute<'a, C, I>(&mut self, casters: I, lights: &[LightSource]) -> usize
    where
        C: ShadowCaster + ?Sized + 'a,
        I: IntoIterator<Item = (K, &'a C)>,
    {
        let mut live = BTreeSet::new();
        let mut rebuilt = 0;

        for (key, caster) in casters {
            let shape = caster.caster_shape();
            let height = caster.caster_height();
            for (index, light) in lights.iter().enumerate() {
                if !light.is_active() {
                    continue;
                }
                let slot = (key, index);
                live.insert(slot);

                let direction = light.shadow_direction(shape.center());
                let depth = light.depth;
                if let Some(cached) = self.cache.get(&slot) {
                    if cached.is_current(shape, height, direction, depth) {
                        continue;
                    }
                }

                let polygon = caster.cast_shadow(direction, depth);
                let bounds = polygon.as_ref().map(ShadowPolygon::bounds);
                self.cache.insert(
                    slot,
                    CachedShadow {
                        shape: shape.clone(),
                        height,
                        direction,
                        depth,
                        polygon,
                        bounds,
                    },
                );
                rebuilt += 1;
            }
        }

        let before = self.cache.len();
        self.cache.retain(|slot, _| live.contains(slot));
        let dropped = before - self.cache.len();

        log::trace!(
            "shadow cache: {} entries, {} rebuilt, {} dropped",
            self.cache.len(),
            rebuilt,
            dropped
        );
        rebuilt
    }

    /// Every current shadow polygon, ordered by caster key then light
    pub fn shadows(&self) -> impl Iterator<Item = &ShadowPolygon> + '_ {
        self.cache.values().filter_map(|cached| cached.polygon.as_ref())
    }

    /// Shadows thrown by one caster
    pub fn shadows_of(&self, key: K) -> impl Iterator<Item = &ShadowPolygon> + '_ {
        self.cache
            .iter()
            .filter(move |((owner, _), _)| *owner == key)
            .filter_map(|(_, cached)| cached.polygon.as_ref())
    }

    /// Number of non-empty shadows
    pub fn shadow_count(&self) -> usize {
        self.shadows().count()
    }

    /// Forget every cached shadow
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Whether `point` lies inside at least one shadow
    pub fn is_shaded(&self, point: Vec2) -> bool {
        self.cache.values().any(|cached| match (&cached.polygon, &cached.bounds) {
            (Some(polygon), Some(bounds)) => bounds_contain(bounds, point) && polygon.contains(point),
            _ => false,
        })
    }

    /// Fraction of the shape's sample points that are shaded
    pub fn exposure_fraction(&self, shape: &Shape) -> f32 {
        let samples = sample_points(shape);
        let shaded = samples.iter().filter(|&&p| self.is_shaded(p)).count();
        shaded as f32 / samples.len() as f32
    }

    /// Exposure classification of a shape
    pub fn classify(&self, shape: &Shape) -> Exposure {
        Exposure::from_fraction(self.exposure_fraction(shape))
    }
}

fn bounds_contain(bounds: &Bounds, point: Vec2) -> bool {
    point.x >= bounds.min.x && point.x <= bounds.max.x && point.y >= bounds.min.y && point.y <= bounds.max.y
}

/// Center, outline vertices and edge midpoints
fn sample_points(shape: &Shape) -> Vec<Vec2> {
    let outline = shape.points();
    let n = outline.len();
    let mut samples = Vec::with_capacity(n * 2 + 1);
    samples.push(shape.center());
    for i in 0..n {
        let (a, b) = (outline[i], outline[(i + 1) % n]);
        samples.push(a);
        samples.push((a + b) * 0.5);
    }
    samples
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    struct Block {
        shape: Shape,
        height: f32,
    }

    impl Block {
        fn new(x: f32, y: f32, w: f32, h: f32, height: f32) -> Self {
            Self {
                shape: Shape::rectangle(x, y, w, h).unwrap(),
                height,
            }
        }
    }

    impl ShadowCaster for Block {
        fn caster_shape(&self) -> &Shape {
            &self.shape
        }

        fn caster_height(&self) -> f32 {
            self.height
        }
    }

    fn sun_along_x() -> Vec<LightSource> {
        vec![LightSource::directional(0.0, 1.0)]
    }

    #[test]
    fn test_recompute_only_changed() {
        let mut blocks = vec![Block::new(0.0, 0.0, 10.0, 10.0, 5.0), Block::new(50.0, 0.0, 10.0, 10.0, 5.0)];
        let lights = sun_along_x();
        let mut composer = ShadowComposer::new();

        let rebuilt = composer.recompute(blocks.iter().enumerate(), &lights);
        assert_eq!(rebuilt, 2);
        let rebuilt = composer.recompute(blocks.iter().enumerate(), &lights);
        assert_eq!(rebuilt, 0);

        blocks[1].shape.translate(Vec2::new(1.0, 0.0));
        let rebuilt = composer.recompute(blocks.iter().enumerate(), &lights);
        assert_eq!(rebuilt, 1);
        assert_eq!(composer.shadow_count(), 2);
    }

    #[test]
    fn test_removed_casters_drop_out() {
        let blocks = vec![Block::new(0.0, 0.0, 10.0, 10.0, 5.0), Block::new(50.0, 0.0, 10.0, 10.0, 5.0)];
        let lights = sun_along_x();
        let mut composer = ShadowComposer::new();
        composer.recompute(blocks.iter().enumerate(), &lights);

        composer.recompute(blocks.iter().enumerate().skip(1), &lights);
        assert_eq!(composer.shadow_count(), 1);
        assert_eq!(composer.shadows_of(0).count(), 0);
        assert_eq!(composer.shadows_of(1).count(), 1);
    }

    #[test]
    fn test_sun_sweep_invalidates() {
        let blocks = [Block::new(0.0, 0.0, 10.0, 10.0, 5.0)];
        let mut lights = vec![LightSource::directional(0.0, 1.0).with_sweep(0.01)];
        let mut composer = ShadowComposer::new();
        composer.recompute(blocks.iter().map(|b| (0u32, b)), &lights);
        lights[0].advance();
        assert_eq!(composer.recompute(blocks.iter().map(|b| (0u32, b)), &lights), 1);
    }

    #[test]
    fn test_inactive_lights_and_flat_casters() {
        let blocks = [Block::new(0.0, 0.0, 10.0, 10.0, 0.0), Block::new(50.0, 0.0, 10.0, 10.0, 5.0)];
        let lights = vec![LightSource::directional(0.0, 1.0), LightSource::directional(1.0, 1.0).with_intensity(0.0)];
        let mut composer = ShadowComposer::new();
        composer.recompute(blocks.iter().enumerate(), &lights);
        // flat block throws nothing; disabled light contributes nothing
        assert_eq!(composer.shadow_count(), 1);
    }

    #[test]
    fn test_point_classification() {
        let blocks = [Block::new(0.0, 0.0, 10.0, 10.0, 5.0)];
        let mut composer = ShadowComposer::new();
        composer.recompute(blocks.iter().map(|b| (0u32, b)), &sun_along_x());

        assert!(composer.is_shaded(Vec2::new(12.0, 5.0)));
        assert!(!composer.is_shaded(Vec2::new(20.0, 5.0)));
        assert!(!composer.is_shaded(Vec2::new(-2.0, 5.0)));
    }

    #[test]
    fn test_shape_classification() {
        let blocks = [Block::new(0.0, 0.0, 10.0, 100.0, 10.0)];
        let mut composer = ShadowComposer::new();
        composer.recompute(blocks.iter().map(|b| (0u32, b)), &sun_along_x());

        let inside = Shape::circle(15.0, 50.0, 3.0).unwrap();
        let straddling = Shape::circle(20.0, 50.0, 3.0).unwrap();
        let outside = Shape::circle(40.0, 50.0, 3.0).unwrap();

        assert_eq!(composer.classify(&inside), Exposure::Shadowed);
        assert_eq!(composer.classify(&straddling), Exposure::PartiallyShadowed);
        assert_eq!(composer.classify(&outside), Exposure::Unshadowed);
        assert_relative_eq!(composer.exposure_fraction(&inside), 1.0);
    }

    #[test]
    fn test_classification_stable_under_jitter() {
        let blocks = [Block::new(0.0, 0.0, 10.0, 100.0, 10.0)];
        let mut composer = ShadowComposer::new();
        composer.recompute(blocks.iter().map(|b| (0u32, b)), &sun_along_x());

        let mut player = Shape::circle(15.0, 50.0, 3.0).unwrap();
        for step in 0..10 {
            let jitter = if step % 2 == 0 { 0.01 } else { -0.01 };
            player.translate(Vec2::new(jitter, jitter));
            assert_eq!(composer.classify(&player), Exposure::Shadowed);
        }
    }

    #[test]
    fn test_exposure_from_fraction() {
        assert_eq!(Exposure::from_fraction(0.0), Exposure::Unshadowed);
        assert_eq!(Exposure::from_fraction(0.5), Exposure::PartiallyShadowed);
        assert_eq!(Exposure::from_fraction(1.0), Exposure::Shadowed);
        assert!(!Exposure::Unshadowed.is_shaded());
    }
}
