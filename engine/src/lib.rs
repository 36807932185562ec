//! Game logic layer machinery.
//!
//! The player perceives the world through a mode-dependent set of shapes
//! plus any light sources. Hostiles that are perceived while in front of the
//! player freeze.

mod ai;
pub use ai::{PerceptionAi, PerceptionState};

mod arena;
pub use arena::Arena;

mod config;
pub use config::{ModeSpec, Overlay, PerceptionConfig, Settings};

pub mod ecs;

mod entity;
pub use entity::Entity;

mod light;
pub use light::{LightId, LightRegistry, LightSource};

mod mode;
pub use mode::{slot_for_key, Mode, ModeSelector, NUM_SLOTS};

mod msg;
pub use msg::{send_msg, Msg, Receiver};

mod perception;
pub use perception::{Mask, PerceptionField, Sighting};

pub mod prelude;

mod runtime;
pub use runtime::Runtime;

mod time;
pub use time::Instant;
