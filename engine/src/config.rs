//! Static game configuration injected into the runtime.

use std::{collections::BTreeMap, f32::consts::FRAC_PI_2, fs, path::Path};

use anyhow::Context;
use fov::ShapeDescriptor;
use serde::{Deserialize, Serialize};

use crate::Mode;

/// Shape sets for every mode plus AI tunables.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PerceptionConfig {
    pub modes: BTreeMap<Mode, ModeSpec>,
    pub settings: Settings,
}

impl Default for PerceptionConfig {
    fn default() -> Self {
        let mode = |n| Mode::new(n).unwrap_or_default();

        let modes = BTreeMap::from([
            (
                mode(0),
                ModeSpec {
                    shapes: vec![ShapeDescriptor::circle(200.0)],
                    overlay: Overlay::new(0x000000, 0.95),
                },
            ),
            (
                mode(1),
                ModeSpec {
                    shapes: vec![ShapeDescriptor::triangle(140.0)],
                    overlay: Overlay::tinted(0x00ffff),
                },
            ),
            (
                mode(2),
                ModeSpec {
                    shapes: vec![
                        ShapeDescriptor::triangle(60.0),
                        ShapeDescriptor::circle(24.0),
                    ],
                    overlay: Overlay::tinted(0xff4400),
                },
            ),
            (
                mode(3),
                ModeSpec {
                    shapes: vec![ShapeDescriptor::circle(96.0)],
                    overlay: Overlay::tinted(0x00ff00),
                },
            ),
            (
                mode(4),
                ModeSpec {
                    shapes: vec![
                        ShapeDescriptor::triangle(60.0),
                        ShapeDescriptor::triangle(60.0)
                            .with_angle_offset(FRAC_PI_2),
                        ShapeDescriptor::triangle(60.0)
                            .with_angle_offset(-FRAC_PI_2),
                    ],
                    overlay: Overlay::tinted(0xff00ff),
                },
            ),
        ]);

        PerceptionConfig {
            modes,
            settings: Default::default(),
        }
    }
}

impl PerceptionConfig {
    /// Configuration with no modes at all.
    ///
    /// Only light sources will be perceived with this.
    pub fn empty() -> Self {
        PerceptionConfig {
            modes: Default::default(),
            settings: Default::default(),
        }
    }

    /// Load configuration from an IDM file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let ret = idm::from_str(&text)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(ret)
    }

    pub fn with_mode(mut self, mode: Mode, spec: ModeSpec) -> Self {
        self.modes.insert(mode, spec);
        self
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn mode(&self, mode: Mode) -> Option<&ModeSpec> {
        self.modes.get(&mode)
    }
}

/// What the player perceives in one mode.
#[derive(Clone, Default, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ModeSpec {
    pub shapes: Vec<ShapeDescriptor>,
    pub overlay: Overlay,
}

impl ModeSpec {
    pub fn new(shapes: impl IntoIterator<Item = ShapeDescriptor>) -> Self {
        ModeSpec {
            shapes: shapes.into_iter().collect(),
            overlay: Default::default(),
        }
    }
}

/// Darkening layer drawn over everything outside the perceived region.
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Overlay {
    /// 0xRRGGBB
    pub color: u32,
    pub opacity: f32,
}

impl Default for Overlay {
    fn default() -> Self {
        Overlay::new(0x000000, 0.7)
    }
}

impl Overlay {
    pub const fn new(color: u32, opacity: f32) -> Self {
        Overlay { color, opacity }
    }

    /// Dimmed version of a mode's signature color.
    pub const fn tinted(color: u32) -> Self {
        Overlay::new((color >> 1) & 0x7f7f7f, 0.7)
    }

    pub fn rgb(&self) -> [u8; 3] {
        [
            (self.color >> 16) as u8,
            (self.color >> 8) as u8,
            self.color as u8,
        ]
    }
}

/// Tunable numbers for hostile behavior and movement.
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
    /// Enemies further away than this from the player never chase.
    pub chase_range: f32,
    /// Per-frame probability of an in-range enemy heading for the player.
    pub chase_chance: f32,
    /// Units per second.
    pub enemy_speed: f32,
    pub boss_speed: f32,
    pub player_speed: f32,
    /// Fraction of speed a velocity component must exceed to turn the
    /// sprite.
    pub sprite_deadzone: f32,
    /// How long the boss stays frozen before it teleports away.
    pub boss_freeze_ms: f32,
    pub teleport_attempts: usize,
    pub teleport_min_player_distance: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            chase_range: 200.0,
            chase_chance: 0.7,
            enemy_speed: 60.0,
            boss_speed: 80.0,
            player_speed: 200.0,
            sprite_deadzone: 0.3,
            boss_freeze_ms: 2000.0,
            teleport_attempts: 100,
            teleport_min_player_distance: 300.0,
        }
    }
}
