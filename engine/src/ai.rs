//! Hostiles reacting to being perceived by the player.
//!
//! Hostiles caught in the player's perception while in front of the player
//! freeze in place. Everyone else wanders or chases the player. The boss
//! breaks free from a long enough freeze by teleporting away.

use util::{HashMap, RngExt};

use crate::{
    ecs::{SpritePose, Visible},
    prelude::*,
};

/// Perception bookkeeping for one hostile.
#[derive(Copy, Clone, Default, PartialEq, Debug)]
pub struct PerceptionState {
    pub frozen: bool,
    /// Velocity the entity had when it froze.
    pub saved_velocity: Vec2,
    /// How long the entity has been frozen, only tracked for the boss.
    pub frozen_ms: f32,
}

/// Perception states of all hostiles.
#[derive(Clone, Default, Debug)]
pub struct PerceptionAi {
    states: HashMap<Entity, PerceptionState>,
}

impl PerceptionAi {
    pub fn state(&self, e: Entity) -> PerceptionState {
        self.states.get(&e).copied().unwrap_or_default()
    }

    pub(crate) fn set_state(&mut self, e: Entity, state: PerceptionState) {
        if state == PerceptionState::default() {
            self.states.remove(&e);
        } else {
            self.states.insert(e, state);
        }
    }

    /// Drop the state of a destroyed entity.
    pub fn forget(&mut self, e: Entity) {
        self.states.remove(&e);
    }

    pub fn clear(&mut self) {
        self.states.clear();
    }

    /// Number of entities with non-default state.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl Entity {
    /// Run one frame of perception driven behavior.
    ///
    /// The perception field must have been recomputed for this frame.
    pub(crate) fn perceive(&self, r: &mut impl AsMut<Runtime>, dt_ms: f32) {
        let r = r.as_mut();
        if !self.is_alive(r) {
            return;
        }

        let pos = self.pos(r);
        let sighting = r.field.sees(pos);
        self.update_visibility(r, sighting.seen);

        let mut state = r.ai.state(*self);

        if sighting.pins_down() {
            if !state.frozen {
                state.frozen = true;
                state.saved_velocity = self.vel(r);
                state.frozen_ms = 0.0;
                log::debug!("{self:?} frozen at {pos}");
                if self.is_boss(r) {
                    send_msg(Msg::BossFrozen(*self));
                }
            }
            self.set_vel(r, Vec2::ZERO);

            if self.is_boss(r) {
                state.frozen_ms += dt_ms;
                if state.frozen_ms >= r.settings.boss_freeze_ms {
                    if let Some(dest) = self.try_teleport(r) {
                        log::info!("{self:?} teleported to {dest}");
                        send_msg(Msg::Teleported(*self, dest));
                        state = PerceptionState::default();
                    }
                }
            }
        } else {
            if state.frozen {
                log::debug!("{self:?} unfrozen");
            }
            state.frozen = false;
            state.frozen_ms = 0.0;

            if !self.is_knocked_back(r) {
                let vel = self.choose_velocity(r);
                self.set_vel(r, vel);
                self.face_along(r, vel);
            }
        }

        r.ai.set_state(*self, state);
    }

    fn update_visibility(&self, r: &mut impl AsMut<Runtime>, seen: bool) {
        let r = r.as_mut();
        if seen && !self.is_visible(r) {
            log::debug!("{self:?} spotted");
            send_msg(Msg::Spotted(*self));
        }
        self.set(r, Visible(seen));
    }

    /// Pick this frame's movement.
    ///
    /// Rerolled every frame, an enemy in chase range may flip between
    /// chasing and wandering from one frame to the next.
    fn choose_velocity(&self, r: &mut impl AsMut<Runtime>) -> Vec2 {
        let r = r.as_mut();
        let pos = self.pos(r);
        let speed = self.speed(r);
        let player = r.player.pos;

        if self.is_boss(r) {
            return (player - pos).normalize_or_zero() * speed;
        }

        if pos.distance(player) <= r.settings.chase_range
            && r.rng.chance(r.settings.chase_chance)
        {
            (player - pos).normalize_or_zero() * speed
        } else {
            r.rng.direction() * speed
        }
    }

    /// Turn the sprite to match the direction of movement.
    ///
    /// Movement slower than the deadzone along both axes keeps the previous
    /// pose.
    fn face_along(&self, r: &mut impl AsMut<Runtime>, vel: Vec2) {
        let r = r.as_mut();
        let dz = r.settings.sprite_deadzone * self.speed(r);
        let mut sprite = self.sprite(r);

        if vel.y < -dz {
            sprite.pose = SpritePose::Back;
        } else if vel.y > dz {
            sprite.pose = SpritePose::Front;
        } else if vel.x.abs() > dz {
            sprite.pose = SpritePose::Profile;
            sprite.flip_x = vel.x > 0.0;
        } else {
            return;
        }

        self.set(r, sprite);
    }

    fn try_teleport(&self, r: &mut impl AsMut<Runtime>) -> Option<Vec2> {
        let r = r.as_mut();
        let dest = r.arena.sample_teleport(
            &mut r.rng,
            r.player.pos,
            r.settings.teleport_min_player_distance,
            r.settings.teleport_attempts,
        )?;
        self.set_pos(r, dest);
        Some(dest)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ecs::Sprite;

    #[test]
    fn default_states_are_not_stored() {
        let mut world = hecs::World::new();
        let e = Entity(world.spawn(()));

        let mut ai = PerceptionAi::default();
        assert_eq!(ai.state(e), PerceptionState::default());

        let frozen = PerceptionState {
            frozen: true,
            saved_velocity: Vec2::X,
            frozen_ms: 0.0,
        };
        ai.set_state(e, frozen);
        assert_eq!(ai.len(), 1);
        assert_eq!(ai.state(e), frozen);

        ai.set_state(e, PerceptionState::default());
        assert!(ai.is_empty());

        ai.set_state(e, frozen);
        ai.forget(e);
        assert!(ai.is_empty());
    }

    #[test]
    fn slow_movement_keeps_sprite_pose() {
        let arena = Arena::parse(
            "
            ######
            #@...#
            ######",
            32.0,
        )
        .unwrap();
        let mut r = Runtime::new(Default::default(), arena, 1);
        let e = r.spawn_enemy(vec2(100.0, 48.0));
        e.set(
            &mut r,
            Sprite {
                pose: SpritePose::Back,
                flip_x: false,
            },
        );

        // Deadzone is 0.3 * 60 = 18 along each axis.
        e.face_along(&mut r, vec2(17.0, -17.0));
        assert_eq!(e.sprite(&r).pose, SpritePose::Back);
        e.face_along(&mut r, Vec2::ZERO);
        assert_eq!(e.sprite(&r).pose, SpritePose::Back);

        e.face_along(&mut r, vec2(0.0, 19.0));
        assert_eq!(e.sprite(&r).pose, SpritePose::Front);
        e.face_along(&mut r, vec2(-19.0, 5.0));
        assert_eq!(e.sprite(&r).pose, SpritePose::Profile);
        assert!(!e.sprite(&r).flip_x);
    }
}
