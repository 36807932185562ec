//! Entity component system components.

use derive_more::{Deref, DerefMut};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::Entity;

/// Point body moving through the arena.
#[derive(Copy, Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    /// Units per second.
    pub vel: Vec2,
}

/// Base movement speed in units per second.
#[derive(Copy, Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Speed(pub f32);

#[derive(
    Copy,
    Clone,
    Debug,
    Eq,
    PartialEq,
    Default,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum EnemyKind {
    #[default]
    Grunt,
    Boss,
}

/// Which way the sprite is drawn.
#[derive(
    Copy,
    Clone,
    Debug,
    Eq,
    PartialEq,
    Default,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum SpritePose {
    /// Facing the camera, moving down the screen.
    #[default]
    Front,
    Back,
    /// Side view, drawn facing left unless flipped.
    Profile,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Default, Serialize, Deserialize)]
pub struct Sprite {
    pub pose: SpritePose,
    pub flip_x: bool,
}

/// Set by combat, entity ignores AI movement while knocked back.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default, Serialize, Deserialize)]
pub struct KnockedBack(pub bool);

/// Whether the entity is inside the player's perception this frame.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default, Serialize, Deserialize)]
pub struct Visible(pub bool);

////////////////////////////////

/// Entity component system. Stores all the data of game entities.
#[derive(Default, Deref, DerefMut)]
pub(crate) struct Ecs(pub(crate) hecs::World);

impl Ecs {
    pub(crate) fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        (&self.0).into_iter().map(|he| Entity(he.entity()))
    }
}
