pub use crate::{
    send_msg, Arena, Entity, Instant, Mode, ModeSelector, Msg,
    PerceptionField, Receiver, Runtime,
};
pub use fov::Pose;
pub use glam::{vec2, Vec2};
pub use util::{HashMap, HashSet};
