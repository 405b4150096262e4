pub mod behavior;
pub mod collision;
pub mod combat;
pub mod config;
pub mod entity;
pub mod movement;
pub mod obstacle;
pub mod weapon;

use rand::SeedableRng;
use rand::rngs::StdRng;

use boxfight_core::catalog::ObstacleKind;
use boxfight_core::error::SimError;
use boxfight_core::events::SimEvent;
use boxfight_core::geometry::Vec3;
use boxfight_core::intent::{EntityId, InputFrame, Intent};
use boxfight_core::session::ArenaSession;
use boxfight_core::snapshot::WorldSnapshot;
use boxfight_core::time::{SimClock, SimInstant};

use behavior::{IntentProvider, Perception, TargetInfo};
use config::ArenaConfig;
use entity::{Controller, Entity};
use obstacle::{Obstacle, ObstacleRegistry};

/// A live session: the entity table, the obstacle registry and the clock.
///
/// Built once at session start and driven by [`Simulation::tick`]. Entities
/// are never removed; elimination is reported as an event and the entity
/// keeps moving, colliding and shooting.
pub struct Simulation {
    entities: Vec<Entity>,
    obstacles: ObstacleRegistry,
    /// Obstacles submitted since the last tick, inserted during maintenance.
    pending_obstacles: Vec<Obstacle>,
    clock: SimClock,
    rng: StdRng,
    paused: bool,
    next_id: EntityId,
    config: ArenaConfig,
}

impl Simulation {
    /// Create an empty simulation from the environment's configuration.
    ///
    /// Reads `BOXFIGHT_ARENA_CONFIG` and the config file through
    /// [`ArenaConfig::load`]. Use [`Simulation::with_config`] or `default()`
    /// for a simulation that touches neither.
    pub fn from_env() -> Self {
        Self::with_config(ArenaConfig::load())
    }

    /// Create an empty simulation with explicit configuration.
    pub fn with_config(config: ArenaConfig) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            entities: Vec::new(),
            obstacles: ObstacleRegistry::new(config.obstacle_capacity),
            pending_obstacles: Vec::new(),
            clock: SimClock::new(),
            rng,
            paused: false,
            next_id: 1,
            config,
        }
    }

    /// The 1v1 setup: one human at `human_spawn` and one bot per entry in
    /// `bot_spawns`, every bot targeting the human.
    pub fn standard_session(config: ArenaConfig) -> Result<Self, SimError> {
        let human_spawn = config.human_spawn;
        let bot_spawns = config.bot_spawns.clone();
        let mut sim = Self::with_config(config);
        let human = sim.spawn_human(human_spawn);
        for spawn in bot_spawns {
            sim.spawn_autonomous(spawn, Some(human))?;
        }
        sim.validate()?;
        tracing::info!(
            entities = sim.entities.len(),
            seed = ?sim.config.rng_seed,
            "Arena session started"
        );
        Ok(sim)
    }

    fn allocate_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn spawn_human(&mut self, position: Vec3) -> EntityId {
        let id = self.allocate_id();
        let health = self.config.starting_health;
        self.entities.push(Entity::human(id, position, health));
        id
    }

    pub fn spawn_autonomous(
        &mut self,
        position: Vec3,
        target: Option<EntityId>,
    ) -> Result<EntityId, SimError> {
        if let Some(t) = target
            && self.entity(t).is_none()
        {
            return Err(SimError::UnknownEntity(t));
        }
        let id = self.allocate_id();
        let health = self.config.starting_health;
        self.entities
            .push(Entity::autonomous(id, position, health, target));
        Ok(id)
    }

    /// Point a bot at another entity, or at nothing.
    pub fn set_target(&mut self, bot: EntityId, target: Option<EntityId>) -> Result<(), SimError> {
        if let Some(t) = target
            && self.entity(t).is_none()
        {
            return Err(SimError::UnknownEntity(t));
        }
        let entity = self
            .entity_mut(bot)
            .ok_or(SimError::UnknownEntity(bot))?;
        match entity.controller_mut() {
            Controller::Autonomous(controller) => {
                controller.target = target;
                Ok(())
            },
            Controller::Human(_) => Err(SimError::NotAutonomous(bot)),
        }
    }

    /// A playable session needs exactly one human and at least one bot.
    pub fn validate(&self) -> Result<(), SimError> {
        if !self.entities.iter().any(|e| !e.is_autonomous()) {
            return Err(SimError::MissingHuman);
        }
        if !self.entities.iter().any(Entity::is_autonomous) {
            return Err(SimError::MissingOpponent);
        }
        Ok(())
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// All entities in creation order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn human_id(&self) -> Option<EntityId> {
        self.entities
            .iter()
            .find(|e| !e.is_autonomous())
            .map(|e| e.id)
    }

    pub fn obstacles(&self) -> &ObstacleRegistry {
        &self.obstacles
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    pub fn now(&self) -> SimInstant {
        self.clock.now()
    }

    /// The current snapshot, MessagePack-encoded.
    pub fn serialize_snapshot(&self) -> Result<Vec<u8>, SimError> {
        self.snapshot().to_bytes()
    }

    /// Decode and apply a MessagePack input frame. Malformed frames are
    /// dropped.
    pub fn apply_input_bytes(&mut self, entity: EntityId, data: &[u8]) -> Result<(), SimError> {
        match InputFrame::from_bytes(data) {
            Some(frame) => self.submit_input(entity, frame),
            None => Ok(()),
        }
    }

    /// Queue an obstacle at the grid cell nearest `point`.
    pub fn place_obstacle_at(&mut self, kind: ObstacleKind, point: Vec3) -> Vec3 {
        let snapped = obstacle::snap_to_grid(point, self.config.grid_size);
        self.submit_obstacle(kind, snapped);
        snapped
    }

    fn perceive(entities: &[Entity], index: usize) -> Perception {
        let me = &entities[index];
        let target = me
            .target()
            .and_then(|id| entities.iter().find(|e| e.id == id))
            .map(|t| TargetInfo {
                id: t.id,
                position: t.position,
                health: t.health,
            });
        Perception {
            position: me.position,
            yaw: me.yaw,
            target,
        }
    }

    fn gather_intents(&mut self) -> Vec<Intent> {
        let mut intents = Vec::with_capacity(self.entities.len());
        for i in 0..self.entities.len() {
            let seen = Self::perceive(&self.entities, i);
            let intent =
                self.entities[i]
                    .controller_mut()
                    .next_intent(&seen, &self.config, &mut self.rng);
            self.entities[i].yaw = intent.yaw;
            intents.push(intent);
        }
        intents
    }

    fn update_weapons(&mut self, intents: &[Intent], now: SimInstant, events: &mut Vec<SimEvent>) {
        for (entity, intent) in self.entities.iter_mut().zip(intents) {
            if let Some(slot) = intent.weapon_switch {
                entity.switch_weapon(usize::from(slot));
            }
            let id = entity.id;
            for weapon in entity.weapons_mut().iter_mut() {
                if weapon.update(now) {
                    events.push(SimEvent::ReloadCompleted {
                        entity: id,
                        weapon: weapon.kind(),
                    });
                }
            }
        }
    }

    fn place_pending_obstacles(&mut self, events: &mut Vec<SimEvent>) {
        for obstacle in std::mem::take(&mut self.pending_obstacles) {
            events.push(SimEvent::ObstaclePlaced {
                kind: obstacle.kind,
                position: obstacle.position,
            });
            if let Some(old) = self.obstacles.insert(obstacle) {
                tracing::info!(kind = ?old.kind, position = ?old.position, "Evicted oldest obstacle");
                events.push(SimEvent::ObstacleEvicted {
                    kind: old.kind,
                    position: old.position,
                });
            }
        }
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::with_config(ArenaConfig::default())
    }
}

impl ArenaSession for Simulation {
    fn submit_input(&mut self, entity: EntityId, frame: InputFrame) -> Result<(), SimError> {
        let target = self
            .entity_mut(entity)
            .ok_or(SimError::UnknownEntity(entity))?;
        match target.controller_mut() {
            Controller::Human(human) => {
                human.submit(frame);
                Ok(())
            },
            Controller::Autonomous(_) => Err(SimError::NotHuman(entity)),
        }
    }

    fn submit_obstacle(&mut self, kind: ObstacleKind, position: Vec3) {
        if !position.is_finite() {
            tracing::debug!(?kind, "Dropped obstacle with non-finite position");
            return;
        }
        self.pending_obstacles.push(Obstacle::new(kind, position));
    }

    /// One frame, in fixed order: intents, movement, collision (obstacles
    /// then entities, per entity in creation order), weapon timers, combat,
    /// obstacle maintenance.
    fn tick(&mut self, dt: f32) -> Vec<SimEvent> {
        if self.paused {
            return Vec::new();
        }

        let now = self.clock.advance(dt);
        let mut events = Vec::new();

        let intents = self.gather_intents();

        for (entity, intent) in self.entities.iter_mut().zip(&intents) {
            movement::integrate(entity, intent, dt, &self.config);
        }

        for i in 0..self.entities.len() {
            collision::resolve_obstacles(&mut self.entities[i], &self.obstacles, &self.config);
            collision::resolve_entities(&mut self.entities, i, &self.config);
        }

        self.update_weapons(&intents, now, &mut events);

        for (i, intent) in intents.iter().enumerate() {
            if intent.fire {
                events.extend(combat::resolve_fire(
                    &mut self.entities,
                    i,
                    now,
                    &self.config,
                ));
            }
        }

        self.place_pending_obstacles(&mut events);

        events
    }

    fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            time: self.clock.now(),
            paused: self.paused,
            entities: self.entities.iter().map(Entity::snapshot).collect(),
            obstacle_count: self.obstacles.len(),
        }
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn resume(&mut self) {
        self.paused = false;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }
}
