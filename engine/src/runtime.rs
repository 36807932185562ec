use fov::Pose;
use rand::SeedableRng;
use util::GameRng;

use crate::{
    ecs::*, prelude::*, Arena, LightId, PerceptionAi, PerceptionConfig,
    PerceptionField, Settings,
};

/// Main data container for game engine runtime.
pub struct Runtime {
    now: Instant,
    pub(crate) player: Pose,
    pub(crate) arena: Arena,
    pub(crate) field: PerceptionField,
    pub(crate) ai: PerceptionAi,
    pub(crate) ecs: Ecs,
    pub(crate) rng: GameRng,
    pub(crate) settings: Settings,
    /// Lights that go out at a given time.
    light_timers: Vec<(Instant, LightId)>,
}

impl AsRef<Runtime> for Runtime {
    fn as_ref(&self) -> &Runtime {
        self
    }
}

impl AsMut<Runtime> for Runtime {
    fn as_mut(&mut self) -> &mut Runtime {
        self
    }
}

impl Runtime {
    pub fn new(config: PerceptionConfig, arena: Arena, seed: u64) -> Self {
        let settings = config.settings;
        let mut ret = Runtime {
            now: Default::default(),
            player: Pose::new(arena.player_spawn(), 0.0),
            arena: arena.clone(),
            field: PerceptionField::new(config),
            ai: Default::default(),
            ecs: Default::default(),
            rng: GameRng::seed_from_u64(seed),
            settings,
            light_timers: Default::default(),
        };
        ret.load_level(arena);
        ret
    }

    /// Replace the current level with a new one.
    ///
    /// Everything tied to the old level, hostiles, lights and AI state, is
    /// thrown out. The perception mode carries over.
    pub fn load_level(&mut self, arena: Arena) {
        self.ecs.clear();
        self.ai.clear();
        self.field.lights_mut().clear();
        self.light_timers.clear();

        self.player = Pose::new(arena.player_spawn(), 0.0);
        self.arena = arena;

        let enemies = self.arena.enemy_spawns().to_vec();
        for pos in enemies {
            self.spawn_enemy(pos);
        }
        if let Some(pos) = self.arena.boss_spawn() {
            self.spawn_boss(pos);
        }

        log::info!(
            "loaded {}x{} level with {} hostiles",
            self.arena.dim().x,
            self.arena.dim().y,
            self.hostiles().len()
        );
    }

    pub fn now(&self) -> Instant {
        self.now
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn field(&self) -> &PerceptionField {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut PerceptionField {
        &mut self.field
    }

    pub fn ai(&self) -> &PerceptionAi {
        &self.ai
    }

    pub fn player(&self) -> Pose {
        self.player
    }

    /// Put the player at an exact pose.
    pub fn place_player(&mut self, pose: Pose) {
        self.player = pose;
    }

    /// Move the player along an input direction.
    ///
    /// The player turns to face the direction of movement. Zero input leaves
    /// both position and facing alone.
    pub fn move_player(&mut self, dir: Vec2, dt_ms: u32) {
        let Some(dir) = dir.try_normalize() else {
            return;
        };
        self.player.facing = util::angle_of(dir);

        let delta = dir * self.settings.player_speed * dt_ms as f32 / 1000.0;
        self.player.pos = self.slide(self.player.pos, delta);
    }

    pub fn spawn_enemy(&mut self, pos: Vec2) -> Entity {
        let e = Entity(self.ecs.spawn((
            Body { pos, vel: Vec2::ZERO },
            Speed(self.settings.enemy_speed),
            EnemyKind::Grunt,
        )));
        log::debug!("spawned enemy {e:?} at {pos}");
        e
    }

    pub fn spawn_boss(&mut self, pos: Vec2) -> Entity {
        let e = Entity(self.ecs.spawn((
            Body { pos, vel: Vec2::ZERO },
            Speed(self.settings.boss_speed),
            EnemyKind::Boss,
        )));
        log::debug!("spawned boss {e:?} at {pos}");
        e
    }

    /// All live hostiles, regular enemies first and the boss last.
    pub fn hostiles(&self) -> Vec<Entity> {
        let mut ret: Vec<(bool, Entity)> = self
            .ecs
            .query::<&EnemyKind>()
            .iter()
            .map(|(e, k)| (*k == EnemyKind::Boss, Entity(e)))
            .collect();
        ret.sort();
        ret.into_iter().map(|(_, e)| e).collect()
    }

    pub fn boss(&self) -> Option<Entity> {
        self.hostiles().into_iter().find(|e| e.is_boss(self))
    }

    pub fn num_entities(&self) -> usize {
        self.ecs.iter().count()
    }

    pub fn add_light(&mut self, pos: Vec2, radius: f32) -> LightId {
        self.field.lights_mut().add(pos, radius)
    }

    pub fn remove_light(&mut self, id: LightId) {
        self.light_timers.retain(|&(_, i)| i != id);
        self.field.lights_mut().remove(id);
    }

    /// Add a light that goes out by itself after `duration_ms`.
    pub fn light_torch(
        &mut self,
        pos: Vec2,
        radius: f32,
        duration_ms: u32,
    ) -> LightId {
        let id = self.add_light(pos, radius);
        self.light_timers.push((self.now + duration_ms as i64, id));
        id
    }

    /// Update the runtime state by one frame.
    pub fn tick(&mut self, dt_ms: u32) {
        self.expire_lights();

        // Everything after this point sees this frame's region.
        self.field.recompute(self.player);

        let dt = dt_ms as f32;
        for e in self.hostiles() {
            e.perceive(self, dt);
        }

        self.integrate(dt);
        self.now += dt_ms as i64;
    }

    fn expire_lights(&mut self) {
        let now = self.now;
        let (expired, live): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.light_timers)
                .into_iter()
                .partition(|&(deadline, _)| deadline <= now);
        self.light_timers = live;

        for (_, id) in expired {
            log::debug!("{id} burned out");
            self.field.lights_mut().remove(id);
        }
    }

    /// Move bodies along their velocities, stopping at walls.
    fn integrate(&mut self, dt_ms: f32) {
        let moves: Vec<(Entity, Vec2)> = self
            .ecs
            .query::<&Body>()
            .iter()
            .filter(|(_, b)| b.vel != Vec2::ZERO)
            .map(|(e, b)| (Entity(e), b.vel * dt_ms / 1000.0))
            .collect();

        for (e, delta) in moves {
            let pos = self.slide(e.pos(self), delta);
            e.set_pos(self, pos);
        }
    }

    /// Move from `pos` by `delta`, sliding along walls if the full move is
    /// blocked.
    fn slide(&self, pos: Vec2, delta: Vec2) -> Vec2 {
        let a = &self.arena;
        [pos + delta, pos + vec2(delta.x, 0.0), pos + vec2(0.0, delta.y)]
            .into_iter()
            .find(|&p| !a.is_wall_at(p))
            .unwrap_or(pos)
    }
}
