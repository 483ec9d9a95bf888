//! Level context
//!
//! A [`Level`] owns everything a running garden needs: the field size, the
//! live bodies, the lights, the shadow cache, the event queue and the frame
//! clock. It is handed around explicitly instead of living in globals.
//!
//! Each call to [`Level::step`] runs four phases in a fixed order:
//!
//! 1. **update**: every entity moves or grows
//! 2. **collision**: mobile bodies are tested against everything; each
//!    colliding pair is reacted to once
//! 3. **shadow**: shadow polygons are rebuilt where casters or lights changed
//! 4. **exposure**: the player and every mushroom are classified against the
//!    fresh shadows
//!
//! Mushrooms grow in phase 1 from the exposure found at the end of the
//! previous frame.

pub mod definition;
mod interaction;

use std::collections::BTreeSet;

use rand::Rng;
use slotmap::SlotMap;
use shade_engine::events::{EventQueue, Stamped};
use shade_engine::foundation::math::{distance2, Vec2, WorldBounds};
use shade_engine::foundation::time::FrameClock;
use shade_engine::lighting::{Exposure, LightSource, ShadowCaster, ShadowComposer};
use shade_engine::physics::{Body, Collider, CollisionPair, Shape};

use crate::config::GameConfig;
use crate::entities::{
    mole, mushroom, obstacle, player, Basket, BodyKey, Entity, EntityKind, Mole, Mushroom, Player, Role,
};
use crate::entities::mushroom::MushroomUpdate;
use crate::error::GameError;
use crate::events::GameEvent;

pub use definition::{BasketDef, CasterDef, LevelDefinition, LightDef};
use interaction::Interaction;

/// What a single step produced that the game state cares about
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    /// Exposure of the player after this step
    pub player_exposure: Exposure,
    /// Scale of every mushroom delivered this step
    pub delivered: Vec<f32>,
    /// Whether the player got stunned this step
    pub player_stunned: bool,
    /// Number of shadow polygons rebuilt
    pub rebuilt_shadows: usize,
}

/// A running level
#[derive(Debug)]
pub struct Level {
    world: WorldBounds,
    config: GameConfig,
    bodies: SlotMap<BodyKey, Entity>,
    lights: Vec<LightSource>,
    shadows: ShadowComposer<BodyKey>,
    events: EventQueue<GameEvent>,
    clock: FrameClock,
    player: BodyKey,
    basket: BodyKey,
}

impl Level {
    /// Build a level from its definition
    pub fn new(definition: &LevelDefinition, config: &GameConfig) -> Result<Self, GameError> {
        let world = WorldBounds::new(config.world.width, config.world.height);
        let mut bodies: SlotMap<BodyKey, Entity> = SlotMap::with_key();

        for caster in &definition.casters {
            let (shape, obstacle) = caster.build(config.sun.daylight_ms)?;
            bodies.insert_with_key(|key| Entity::new(key, shape, EntityKind::Obstacle(obstacle)));
        }

        let b = &definition.basket;
        let basket_shape = Shape::rectangle(b.x, b.y, b.w, b.h)?;
        let basket =
            bodies.insert_with_key(|key| Entity::new(key, basket_shape, EntityKind::Basket(Basket::new())));

        let p = &config.player;
        let player_shape = Shape::circle(p.x, p.y, p.radius)?;
        let player = bodies.insert_with_key(|key| Entity::new(key, player_shape, EntityKind::Player(Player::new(p))));

        let lights = definition.lights.iter().map(LightDef::to_source).collect();

        let mut level = Self {
            world,
            config: config.clone(),
            bodies,
            lights,
            shadows: ShadowComposer::new(),
            events: EventQueue::new(),
            clock: FrameClock::new(),
            player,
            basket,
        };
        level.shadow_phase();
        level.exposure_phase();

        log::info!(
            "Level ready: {} casters, {} lights, {} shadows",
            definition.casters.len(),
            level.lights.len(),
            level.shadows.shadow_count()
        );
        Ok(level)
    }

    /// Field dimensions
    pub fn world(&self) -> WorldBounds {
        self.world
    }

    /// Settings the level was built with
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The level's clock
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Key of the player body
    pub fn player_key(&self) -> BodyKey {
        self.player
    }

    /// Key of the basket body
    pub fn basket_key(&self) -> BodyKey {
        self.basket
    }

    /// The player body
    pub fn player_body(&self) -> Option<&Entity> {
        self.bodies.get(self.player)
    }

    /// Player state
    pub fn player(&self) -> Option<&Player> {
        self.player_body().and_then(Entity::as_player)
    }

    /// A body by key
    pub fn get(&self, key: BodyKey) -> Option<&Entity> {
        self.bodies.get(key)
    }

    /// Every live body, in key order
    pub fn bodies(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.bodies.values()
    }

    /// Bodies nothing may be planted on: obstacles and the basket
    pub fn solids(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.bodies
            .values()
            .filter(|e| matches!(e.role(), Role::Obstacle | Role::Basket))
    }

    /// Number of live mushrooms
    pub fn mushroom_count(&self) -> usize {
        self.bodies.values().filter(|e| e.role() == Role::Mushroom).count()
    }

    /// Number of moles
    pub fn mole_count(&self) -> usize {
        self.bodies.values().filter(|e| e.role() == Role::Creature).count()
    }

    /// The lights
    pub fn lights(&self) -> &[LightSource] {
        &self.lights
    }

    /// Current shadows
    pub fn shadows(&self) -> &ShadowComposer<BodyKey> {
        &self.shadows
    }

    /// Take every event raised since the last drain
    pub fn drain_events(&mut self) -> Vec<Stamped<GameEvent>> {
        self.events.drain()
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Point the player in a direction; zero stops them
    pub fn steer_player(&mut self, dx: f32, dy: f32) {
        if let Some(player) = self.bodies.get_mut(self.player).and_then(Entity::as_player_mut) {
            player.steer(dx, dy);
        }
    }

    /// Sweep every light by one tick
    pub fn advance_lights(&mut self) {
        for light in &mut self.lights {
            light.advance();
        }
    }

    /// The idle mushroom closest to `from`
    pub fn nearest_idle_mushroom(&self, from: Vec2) -> Option<(BodyKey, Vec2)> {
        self.bodies
            .values()
            .filter(|e| e.as_mushroom().is_some_and(Mushroom::is_idle))
            .map(|e| (e.key(), e.center()))
            .min_by(|a, b| distance2(a.1, from).total_cmp(&distance2(b.1, from)))
    }

    /// Plant a fresh mushroom centered at `position`
    pub fn spawn_mushroom(&mut self, position: Vec2) -> Result<BodyKey, GameError> {
        let shape = Mushroom::sprout_shape(position, &self.config.mushroom)?;
        let mushroom = Mushroom::new(&self.config.mushroom);
        let key = self
            .bodies
            .insert_with_key(|key| Entity::new(key, shape, EntityKind::Mushroom(mushroom)));
        self.events.push(GameEvent::MushroomSprouted { key, position });
        log::debug!("Mushroom {:?} sprouted at ({:.1}, {:.1})", key, position.x, position.y);
        Ok(key)
    }

    /// Send in a mole from a random edge of the field
    pub fn spawn_mole<R: Rng + ?Sized>(&mut self, rng: &mut R, burrow_ms: u32) -> Result<BodyKey, GameError> {
        let at = Mole::spawn_point(rng, &self.world);
        let spawn = &self.config.spawn;
        let shape = Shape::circle(at.x, at.y, spawn.mole_radius)?;
        let mole = Mole::new(burrow_ms, spawn.mole_speed);
        let key = self
            .bodies
            .insert_with_key(|key| Entity::new(key, shape, EntityKind::Mole(mole)));
        self.events.push(GameEvent::MoleSpawned { key });
        log::info!("Mole {:?} burrowing in at ({:.0}, {:.0})", key, at.x, at.y);
        Ok(key)
    }

    /// Take a body out of the level, unhooking it from any trail
    pub fn remove(&mut self, key: BodyKey) -> Option<Entity> {
        let entity = self.bodies.remove(key)?;

        if let Some(carrier) = entity.as_mushroom().and_then(Mushroom::carrier) {
            if let Some(trail) = self.bodies.get_mut(carrier).and_then(Entity::trail_mut) {
                trail.detach(key);
            }
        }
        if let Some(trail) = entity.trail() {
            for &carried in trail.keys() {
                if let Some(mushroom) = self.bodies.get_mut(carried).and_then(Entity::as_mushroom_mut) {
                    mushroom.release();
                }
            }
        }
        Some(entity)
    }

    /// Run one frame of `delta` milliseconds
    pub fn step(&mut self, delta: u32) -> Result<StepOutcome, GameError> {
        self.clock.tick(delta);
        self.events.update_time(self.clock.elapsed());

        self.update_phase(delta)?;
        let (delivered, player_stunned) = self.collision_phase();
        let rebuilt_shadows = self.shadow_phase();
        let player_exposure = self.exposure_phase();

        log::trace!(
            "frame {}: player {:?}, {} shadows ({} rebuilt)",
            self.clock.frame(),
            player_exposure,
            self.shadows.shadow_count(),
            rebuilt_shadows
        );

        Ok(StepOutcome {
            player_exposure,
            delivered,
            player_stunned,
            rebuilt_shadows,
        })
    }

    fn update_phase(&mut self, delta: u32) -> Result<(), GameError> {
        let world = self.world;
        let keys: Vec<BodyKey> = self.bodies.keys().collect();

        for key in keys {
            let Some(role) = self.bodies.get(key).map(Entity::role) else {
                continue;
            };
            match role {
                Role::Player => {
                    if let Some(entity) = self.bodies.get_mut(key) {
                        player::update(entity, delta, &world);
                    }
                }
                Role::Mushroom => {
                    let leader = self.leader_position(key);
                    let Some(entity) = self.bodies.get_mut(key) else {
                        continue;
                    };
                    if mushroom::update(entity, leader, &world, &self.config.mushroom)? == MushroomUpdate::Withered {
                        self.remove(key);
                        self.events.push(GameEvent::MushroomWithered { key });
                        log::debug!("Mushroom {:?} withered", key);
                    }
                }
                Role::Obstacle => {
                    if let Some(entity) = self.bodies.get_mut(key) {
                        obstacle::update(entity, delta);
                    }
                }
                Role::Creature => {
                    let prey = self
                        .bodies
                        .get(key)
                        .and_then(|mole| self.nearest_idle_mushroom(mole.center()))
                        .map(|(_, at)| at);
                    if let Some(entity) = self.bodies.get_mut(key) {
                        mole::update(entity, delta, prey, &world);
                    }
                }
                Role::Basket => {}
            }
        }
        Ok(())
    }

    /// Where a carried mushroom is headed: the mushroom ahead of it in its
    /// carrier's trail, or the carrier itself
    fn leader_position(&self, key: BodyKey) -> Option<Vec2> {
        let carrier_key = self.bodies.get(key)?.as_mushroom()?.carrier()?;
        let carrier = self.bodies.get(carrier_key)?;
        match carrier.trail()?.leader_of(key) {
            Some(ahead) => self.bodies.get(ahead).map(|e| e.center()),
            None => Some(carrier.center()),
        }
    }

    fn collision_phase(&mut self) -> (Vec<f32>, bool) {
        let mut pairs = BTreeSet::new();
        for subject in self.bodies.values().filter(|e| e.is_mobile()) {
            Collider::test_and_alert(subject, self.bodies.values(), |a, b| {
                pairs.insert(CollisionPair::new(a.key(), b.key()));
            });
        }

        let mut delivered = Vec::new();
        let mut stunned = false;
        for pair in pairs {
            let interaction = match (self.bodies.get(pair.first), self.bodies.get(pair.second)) {
                (Some(a), Some(b)) => Interaction::between(a, b),
                _ => None,
            };
            match interaction {
                Some(Interaction::Pick { mushroom, carrier }) => self.pick(mushroom, carrier),
                Some(Interaction::Repel { obstacle, repellee }) => self.repel(obstacle, repellee),
                Some(Interaction::Stun { player }) => stunned |= self.stun(player),
                Some(Interaction::Deliver { player, basket }) => delivered.extend(self.deliver(player, basket)),
                None => {}
            }
        }
        (delivered, stunned)
    }

    fn pick(&mut self, mushroom: BodyKey, carrier: BodyKey) {
        let previous = self.bodies.get(mushroom).and_then(Entity::as_mushroom).and_then(Mushroom::carrier);
        if previous == Some(carrier) {
            return;
        }
        if let Some(trail) = previous.and_then(|prev| self.bodies.get_mut(prev)).and_then(Entity::trail_mut) {
            trail.detach(mushroom);
        }

        let Some(state) = self.bodies.get_mut(mushroom).and_then(Entity::as_mushroom_mut) else {
            return;
        };
        state.pick(carrier);
        if let Some(trail) = self.bodies.get_mut(carrier).and_then(Entity::trail_mut) {
            trail.attach(mushroom);
        }

        self.events.push(GameEvent::MushroomPicked { key: mushroom, carrier });
        log::debug!("Mushroom {:?} picked by {:?}", mushroom, carrier);
    }

    fn repel(&mut self, obstacle: BodyKey, repellee: BodyKey) {
        if let Some([obstacle, repellee]) = self.bodies.get_disjoint_mut([obstacle, repellee]) {
            obstacle.repel(repellee);
        }
    }

    fn stun(&mut self, player: BodyKey) -> bool {
        let stunned = self
            .bodies
            .get_mut(player)
            .and_then(Entity::as_player_mut)
            .is_some_and(Player::stun);
        if stunned {
            self.events.push(GameEvent::PlayerStunned);
            log::debug!("Player stunned");
        }
        stunned
    }

    fn deliver(&mut self, player: BodyKey, basket: BodyKey) -> Vec<f32> {
        let Some(carried) = self
            .bodies
            .get_mut(player)
            .and_then(Entity::as_player_mut)
            .map(|p| p.trail_mut().take())
        else {
            return Vec::new();
        };
        if carried.is_empty() {
            return Vec::new();
        }

        let mut scales = Vec::with_capacity(carried.len());
        for key in carried {
            let Some(entity) = self.bodies.remove(key) else {
                continue;
            };
            if let Some(mushroom) = entity.as_mushroom() {
                scales.push(mushroom.scale());
                self.events.push(GameEvent::MushroomDelivered {
                    key,
                    scale: mushroom.scale(),
                });
            }
        }

        if let Some(EntityKind::Basket(b)) = self.bodies.get_mut(basket).map(|e| &mut e.kind) {
            b.receive(scales.len() as u32);
        }
        log::info!("Delivered {} mushrooms", scales.len());
        scales
    }

    fn shadow_phase(&mut self) -> usize {
        let casters = self.bodies.iter().filter(|(_, e)| e.caster_height() > 0.0);
        self.shadows.recompute(casters, &self.lights)
    }

    fn exposure_phase(&mut self) -> Exposure {
        let shadows = &self.shadows;
        let mut player_exposure = Exposure::Unshadowed;
        for entity in self.bodies.values_mut() {
            let Entity { shape, kind, .. } = entity;
            match kind {
                EntityKind::Mushroom(mushroom) => mushroom.set_shaded(shadows.classify(shape).is_shaded()),
                EntityKind::Player(player) => {
                    player_exposure = shadows.classify(shape);
                    player.set_exposure(player_exposure);
                }
                _ => {}
            }
        }
        player_exposure
    }
}
