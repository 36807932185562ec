//! Generic entity logic.
use derive_more::Deref;
use hecs::Component;

use crate::{ecs::*, prelude::*, PerceptionState};

// Dummy wrapper so we can write impls for it directly instead of deriving a
// trait for hecs::Entity and writing every fn signature twice.
/// Game entity identifier datatype. All the actual contents live in the ECS.
#[derive(
    Copy, Clone, Hash, Eq, Ord, PartialEq, PartialOrd, Debug, Deref,
)]
pub struct Entity(pub(crate) hecs::Entity);

impl Entity {
    pub(crate) fn get<T>(&self, r: &impl AsRef<Runtime>) -> T
    where
        T: Component + Clone + Default,
    {
        let r = r.as_ref();
        r.ecs
            .get::<&T>(**self)
            .map(|c| (*c).clone())
            .unwrap_or_default()
    }

    pub(crate) fn set<T>(&self, r: &mut impl AsMut<Runtime>, val: T)
    where
        T: Component + Default + PartialEq,
    {
        let r = r.as_mut();
        if val == T::default() {
            // Remove default values, abstraction layer assumes components are
            // always present but defaulted.
            //
            // Will give an error if the component wasn't there to begin with,
            // just ignore that.
            let _ = r.ecs.remove_one::<T>(**self);
        } else if let Err(e) = r.ecs.insert_one(**self, val) {
            log::warn!("Entity::set: {self:?} is gone: {e}");
        }
    }

    pub fn is_alive(&self, r: &impl AsRef<Runtime>) -> bool {
        r.as_ref().ecs.contains(**self)
    }

    pub fn pos(&self, r: &impl AsRef<Runtime>) -> Vec2 {
        self.body(r).pos
    }

    pub fn vel(&self, r: &impl AsRef<Runtime>) -> Vec2 {
        self.body(r).vel
    }

    pub(crate) fn body(&self, r: &impl AsRef<Runtime>) -> Body {
        self.get::<Body>(r)
    }

    pub fn set_pos(&self, r: &mut impl AsMut<Runtime>, pos: Vec2) {
        let r = r.as_mut();
        let body = Body { pos, ..self.body(r) };
        self.set(r, body);
    }

    /// Set velocity from outside the AI, eg. for a knockback impulse.
    pub fn set_vel(&self, r: &mut impl AsMut<Runtime>, vel: Vec2) {
        let r = r.as_mut();
        let body = Body { vel, ..self.body(r) };
        self.set(r, body);
    }

    pub fn speed(&self, r: &impl AsRef<Runtime>) -> f32 {
        self.get::<Speed>(r).0
    }

    pub fn kind(&self, r: &impl AsRef<Runtime>) -> EnemyKind {
        self.get::<EnemyKind>(r)
    }

    pub fn is_boss(&self, r: &impl AsRef<Runtime>) -> bool {
        self.kind(r) == EnemyKind::Boss
    }

    pub fn sprite(&self, r: &impl AsRef<Runtime>) -> Sprite {
        self.get::<Sprite>(r)
    }

    pub fn is_visible(&self, r: &impl AsRef<Runtime>) -> bool {
        self.get::<Visible>(r).0
    }

    pub fn is_knocked_back(&self, r: &impl AsRef<Runtime>) -> bool {
        self.get::<KnockedBack>(r).0
    }

    pub fn set_knocked_back(&self, r: &mut impl AsMut<Runtime>, value: bool) {
        self.set(r, KnockedBack(value));
    }

    /// Current perception AI bookkeeping for the entity.
    pub fn perception_state(&self, r: &impl AsRef<Runtime>) -> PerceptionState {
        r.as_ref().ai.state(*self)
    }

    /// Remove the entity and everything tracked about it.
    pub fn destroy(&self, r: &mut impl AsMut<Runtime>) {
        let r = r.as_mut();
        r.ai.forget(*self);
        if r.ecs.despawn(**self).is_ok() {
            log::debug!("destroyed {self:?}");
        }
    }
}
