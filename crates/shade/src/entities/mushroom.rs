//! Mushrooms
//!
//! Mushrooms sprout in the shade and grow while they stay there; out in the
//! sun they shrink at half the rate and wither once too small. A carrier
//! that touches an idle mushroom picks it up, after which it trails behind
//! whoever is ahead of it in line.

use shade_engine::foundation::math::{calculate_angle, calculate_vector, constants::PI, Vec2, WorldBounds};
use shade_engine::physics::{GeometryError, Shape};

use super::{BodyKey, Entity, EntityKind};
use crate::config::MushroomConfig;

/// Lifecycle of a mushroom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MushroomState {
    /// Sitting where it sprouted
    Idle,
    /// Carried by the player or a mole
    Picked,
    /// Withered or otherwise removed
    Dead,
}

/// What happened to a mushroom during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MushroomUpdate {
    /// Still alive
    Alive,
    /// Shrunk below the minimum scale this tick
    Withered,
}

/// Mushroom state
#[derive(Debug, Clone, PartialEq)]
pub struct Mushroom {
    state: MushroomState,
    scale: f32,
    shaded: bool,
    carrier: Option<BodyKey>,
}

impl Mushroom {
    /// A fresh sprout at minimum scale. Sprouts start out assuming shade.
    pub fn new(config: &MushroomConfig) -> Self {
        Self {
            state: MushroomState::Idle,
            scale: config.min_scale,
            shaded: true,
            carrier: None,
        }
    }

    /// Build the body shape for a sprout centered at `position`
    pub fn sprout_shape(position: Vec2, config: &MushroomConfig) -> Result<Shape, GeometryError> {
        Shape::circle(position.x, position.y, config.radius * config.min_scale)
    }

    /// Lifecycle state
    pub fn state(&self) -> MushroomState {
        self.state
    }

    /// Current scale
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Whether the last exposure check found it in shade
    pub fn is_shaded(&self) -> bool {
        self.shaded
    }

    /// Whoever carries it
    pub fn carrier(&self) -> Option<BodyKey> {
        self.carrier
    }

    /// Whether nobody carries it
    pub fn is_idle(&self) -> bool {
        self.state == MushroomState::Idle
    }

    /// Whether it is being carried
    pub fn is_picked(&self) -> bool {
        self.state == MushroomState::Picked
    }

    /// Whether it is gone
    pub fn is_dead(&self) -> bool {
        self.state == MushroomState::Dead
    }

    pub(crate) fn set_shaded(&mut self, shaded: bool) {
        self.shaded = shaded;
    }

    /// Start trailing `carrier`
    pub(crate) fn pick(&mut self, carrier: BodyKey) {
        self.state = MushroomState::Picked;
        self.carrier = Some(carrier);
    }

    /// Drop off whatever trail it was on
    pub(crate) fn release(&mut self) {
        if !self.is_dead() {
            self.state = MushroomState::Idle;
        }
        self.carrier = None;
    }

    /// Mark dead. The carrier is kept so the level can still unhook the
    /// mushroom from that trail when it removes it.
    pub(crate) fn kill(&mut self) {
        self.state = MushroomState::Dead;
    }

    /// Apply one tick of growth or shrinking.
    fn grow(&mut self, config: &MushroomConfig) -> MushroomUpdate {
        if self.is_dead() {
            return MushroomUpdate::Withered;
        }

        if self.shaded && self.scale <= config.max_scale {
            self.scale += config.scale_increment;
        }
        if !self.shaded && self.scale >= config.min_scale {
            self.scale -= config.scale_increment / 2.0;
        }

        if self.scale < config.min_scale {
            self.kill();
            return MushroomUpdate::Withered;
        }
        MushroomUpdate::Alive
    }
}

/// Whether `position` has fallen more than the follow distance behind
/// `leader`, measured along the shortest wrapped route
pub fn too_far(world: &WorldBounds, position: Vec2, leader: Vec2, config: &MushroomConfig) -> bool {
    world.wrapped_distance2(position, leader) > config.max_follow_distance2
}

/// Heading toward `leader`, turned around when going across a screen seam
/// is shorter than the direct route
pub fn follow_heading(world: &WorldBounds, position: Vec2, leader: Vec2) -> f32 {
    let [direct, across_x, across_y] = world.route_distances2(position, leader);
    let angle = calculate_angle(leader, position);
    if across_x < direct || across_y < direct {
        angle + PI
    } else {
        angle
    }
}

/// Advance a mushroom entity by one tick. `leader` is the position of
/// whatever it follows, when picked.
pub(crate) fn update(
    entity: &mut Entity,
    leader: Option<Vec2>,
    world: &WorldBounds,
    config: &MushroomConfig,
) -> Result<MushroomUpdate, GeometryError> {
    let Entity {
        shape,
        velocity,
        kind,
        ..
    } = entity;
    let EntityKind::Mushroom(mushroom) = kind else {
        return Ok(MushroomUpdate::Alive);
    };

    let before = mushroom.scale;
    if mushroom.grow(config) == MushroomUpdate::Withered {
        return Ok(MushroomUpdate::Withered);
    }
    if mushroom.scale != before {
        if let Shape::Circle(circle) = shape {
            circle.set_radius(config.radius * mushroom.scale)?;
        }
    }

    *velocity = Vec2::zeros();
    if let (true, Some(leader)) = (mushroom.is_picked(), leader) {
        let position = shape.center();
        if too_far(world, position, leader, config) {
            let step = calculate_vector(config.follow_speed, follow_heading(world, position, leader));
            *velocity = step;
            shape.translate(step);
            let center = shape.center();
            if !world.contains(center) {
                shape.set_center(world.wrap(center));
            }
        }
    }

    Ok(MushroomUpdate::Alive)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use shade_engine::physics::Body;
    use slotmap::SlotMap;

    fn config() -> MushroomConfig {
        MushroomConfig::default()
    }

    fn sprout(at: Vec2) -> Entity {
        let mut keys: SlotMap<BodyKey, ()> = SlotMap::with_key();
        let shape = Mushroom::sprout_shape(at, &config()).unwrap();
        Entity::new(keys.insert(()), shape, EntityKind::Mushroom(Mushroom::new(&config())))
    }

    fn mushroom(entity: &Entity) -> &Mushroom {
        entity.as_mushroom().unwrap()
    }

    #[test]
    fn test_grows_in_shade_and_resizes() {
        let world = WorldBounds::new(800.0, 600.0);
        let mut shroom = sprout(Vec2::new(100.0, 100.0));
        for _ in 0..10 {
            update(&mut shroom, None, &world, &config()).unwrap();
        }
        assert_relative_eq!(mushroom(&shroom).scale(), 1.25, epsilon = 1e-4);
        assert_relative_eq!(shroom.width(), 2.0 * 3.0 * 1.25, epsilon = 1e-3);
        assert_relative_eq!(shroom.center(), Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_stops_growing_past_max() {
        let world = WorldBounds::new(800.0, 600.0);
        let mut shroom = sprout(Vec2::new(100.0, 100.0));
        for _ in 0..1000 {
            update(&mut shroom, None, &world, &config()).unwrap();
        }
        let scale = mushroom(&shroom).scale();
        assert!(scale > 3.0 && scale < 3.0 + 2.0 * config().scale_increment);
    }

    #[test]
    fn test_withers_in_sun() {
        let world = WorldBounds::new(800.0, 600.0);
        let mut shroom = sprout(Vec2::new(100.0, 100.0));
        for _ in 0..4 {
            update(&mut shroom, None, &world, &config()).unwrap();
        }
        if let EntityKind::Mushroom(m) = &mut shroom.kind {
            m.set_shaded(false);
        }
        // 0.02 above the minimum, shrinking 0.0025 per tick
        let mut ticks = 0;
        while update(&mut shroom, None, &world, &config()).unwrap() == MushroomUpdate::Alive {
            ticks += 1;
            assert!(ticks < 20);
        }
        assert!(mushroom(&shroom).is_dead());
    }

    #[test]
    fn test_withered_carried_mushroom_remembers_carrier() {
        let world = WorldBounds::new(800.0, 600.0);
        let mut shroom = sprout(Vec2::new(100.0, 100.0));
        let carrier = shroom.key();
        if let Some(m) = shroom.as_mushroom_mut() {
            m.pick(carrier);
            m.set_shaded(false);
        }
        let mut ticks = 0;
        while update(&mut shroom, None, &world, &config()).unwrap() == MushroomUpdate::Alive {
            ticks += 1;
            assert!(ticks < 20);
        }
        assert!(mushroom(&shroom).is_dead());
        assert_eq!(mushroom(&shroom).carrier(), Some(carrier));
    }

    #[test]
    fn test_idle_mushroom_stays_put() {
        let world = WorldBounds::new(800.0, 600.0);
        let mut shroom = sprout(Vec2::new(100.0, 100.0));
        update(&mut shroom, Some(Vec2::new(300.0, 100.0)), &world, &config()).unwrap();
        assert_relative_eq!(shroom.center(), Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_picked_mushroom_follows_leader() {
        let world = WorldBounds::new(800.0, 600.0);
        let mut shroom = sprout(Vec2::new(100.0, 100.0));
        let carrier = shroom.key();
        if let EntityKind::Mushroom(m) = &mut shroom.kind {
            m.pick(carrier);
        }
        update(&mut shroom, Some(Vec2::new(300.0, 100.0)), &world, &config()).unwrap();
        assert_relative_eq!(shroom.center(), Vec2::new(101.4, 100.0), epsilon = 1e-4);

        // Close enough: no movement
        let near = shroom.center() + Vec2::new(20.0, 0.0);
        let before = shroom.center();
        update(&mut shroom, Some(near), &world, &config()).unwrap();
        assert_relative_eq!(shroom.center(), before);
    }

    #[test]
    fn test_follow_heading_takes_the_seam() {
        let world = WorldBounds::new(800.0, 600.0);
        // Leader just across the right edge: going left through the seam is shorter
        let heading = follow_heading(&world, Vec2::new(10.0, 300.0), Vec2::new(780.0, 300.0));
        assert_relative_eq!(calculate_vector(1.0, heading).x, -1.0, epsilon = 1e-5);

        let direct = follow_heading(&world, Vec2::new(100.0, 300.0), Vec2::new(200.0, 300.0));
        assert_relative_eq!(direct, 0.0);
    }

    #[test]
    fn test_wraps_around_edges() {
        let world = WorldBounds::new(800.0, 600.0);
        let mut shroom = sprout(Vec2::new(0.5, 300.0));
        let carrier = shroom.key();
        if let EntityKind::Mushroom(m) = &mut shroom.kind {
            m.pick(carrier);
        }
        update(&mut shroom, Some(Vec2::new(700.0, 300.0)), &world, &config()).unwrap();
        assert!(shroom.center().x > 790.0);
    }
}
