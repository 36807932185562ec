//! What the player can currently perceive.

use fov::{Pose, Region};
use glam::Vec2;

use crate::{send_msg, LightRegistry, Mode, Msg, Overlay, PerceptionConfig};

/// Geometry and tint of the frame's darkening mask.
///
/// The region is the same one used for gameplay visibility queries, so what
/// gets drawn uncovered and what the AI considers seen can't disagree.
#[derive(Clone, Default, PartialEq, Debug)]
pub struct Mask {
    pub region: Region,
    pub overlay: Overlay,
}

/// Result of looking at a single point.
#[derive(Copy, Clone, Default, Eq, PartialEq, Debug)]
pub struct Sighting {
    /// Point is inside the perceived region.
    pub seen: bool,
    /// Point is in front of the player.
    pub facing: bool,
}

impl Sighting {
    /// Hostiles that are both seen and in front of the player freeze.
    pub fn pins_down(&self) -> bool {
        self.seen && self.facing
    }
}

/// Per-frame perceived region built from the active mode's shapes and the
/// active light sources.
pub struct PerceptionField {
    config: PerceptionConfig,
    mode: Mode,
    lights: LightRegistry,
    pose: Pose,
    mask: Mask,
    computed: bool,
}

impl PerceptionField {
    pub fn new(config: PerceptionConfig) -> Self {
        let overlay = config
            .mode(Mode::DEFAULT)
            .map(|m| m.overlay)
            .unwrap_or_default();

        PerceptionField {
            config,
            mode: Mode::DEFAULT,
            lights: Default::default(),
            pose: Default::default(),
            mask: Mask {
                region: Default::default(),
                overlay,
            },
            computed: false,
        }
    }

    pub fn config(&self) -> &PerceptionConfig {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Mode that would actually be used if `mode` were requested.
    ///
    /// Modes with no configuration fall back to the default mode.
    pub fn resolve(&self, mode: Mode) -> Mode {
        if self.config.modes.contains_key(&mode) {
            mode
        } else {
            Mode::DEFAULT
        }
    }

    /// Switch the active mode.
    ///
    /// Takes effect on the next `recompute`. Always notifies listeners, even
    /// when the mode doesn't change.
    pub fn set_mode(&mut self, mode: Mode) {
        let resolved = self.resolve(mode);
        if resolved != mode {
            log::warn!("unknown perception mode {mode}, using {resolved}");
        }

        self.mode = resolved;
        self.mask.overlay = self
            .config
            .mode(resolved)
            .map(|m| m.overlay)
            .unwrap_or_default();

        log::info!("perception mode {resolved}");
        send_msg(Msg::ModeChanged(resolved));
    }

    pub fn lights(&self) -> &LightRegistry {
        &self.lights
    }

    pub fn lights_mut(&mut self) -> &mut LightRegistry {
        &mut self.lights
    }

    /// Rebuild the perceived region for the player's current pose.
    ///
    /// Must run once every frame before anything queries the field.
    pub fn recompute(&mut self, pose: Pose) {
        let shapes = self
            .config
            .modes
            .get(&self.mode)
            .map(|m| m.shapes.as_slice())
            .unwrap_or(&[]);

        self.mask.region = Region::compose(
            &pose,
            shapes,
            self.lights.iter().map(|l| (l.pos, l.radius)),
        );
        self.pose = pose;
        self.computed = true;
    }

    /// Pose the field was last computed for.
    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn mask(&self) -> &Mask {
        debug_assert!(self.computed, "mask used before first recompute");
        &self.mask
    }

    /// Whether a point is inside the perceived region.
    pub fn contains(&self, p: impl Into<Vec2>) -> bool {
        debug_assert!(self.computed, "field queried before first recompute");
        self.mask.region.contains(p)
    }

    /// Whether a point is within the half-plane in front of the player.
    ///
    /// Points exactly to the player's side do not count.
    pub fn in_forward_arc(&self, p: impl Into<Vec2>) -> bool {
        util::in_forward_arc(self.pose.pos, self.pose.facing, p.into())
    }

    pub fn sees(&self, p: impl Into<Vec2>) -> Sighting {
        let p = p.into();
        Sighting {
            seen: self.contains(p),
            facing: self.in_forward_arc(p),
        }
    }
}

#[cfg(test)]
mod test {
    use std::f32::consts::{FRAC_PI_2, PI};

    use fov::ShapeDescriptor;
    use glam::vec2;
    use quickcheck_macros::quickcheck;

    use super::*;
    use crate::{ModeSpec, Receiver};

    fn mode(n: u8) -> Mode {
        Mode::new(n).unwrap()
    }

    fn field_at(pos: [f32; 2], facing: f32) -> PerceptionField {
        let mut ret = PerceptionField::new(PerceptionConfig::default());
        ret.recompute(Pose::new(pos, facing));
        ret
    }

    #[test]
    fn default_mode_circle() {
        let field = field_at([100.0, 100.0], 0.0);
        assert!(!field.contains([250.0, 100.0]));
        assert!(field.contains([150.0, 100.0]));
        assert!(field.contains([100.0, 100.0]));
    }

    #[test]
    fn light_is_independent_of_player() {
        let mut field = PerceptionField::new(PerceptionConfig::default());
        field.set_mode(mode(1));
        field.lights_mut().add([500.0, 500.0], 50.0);
        field.recompute(Pose::new([-3000.0, 40.0], PI));

        assert!(field.contains([500.0, 520.0]));
        assert!(!field.contains([500.0, 551.0]));
    }

    #[test]
    fn removed_light_takes_effect_on_recompute() {
        let mut field = field_at([0.0, 0.0], 0.0);
        let id = field.lights_mut().add([500.0, 500.0], 50.0);
        field.recompute(Pose::default());
        assert!(field.contains([500.0, 500.0]));

        field.lights_mut().remove(id);
        // Stale until the next frame.
        assert!(field.contains([500.0, 500.0]));
        field.recompute(Pose::default());
        assert!(!field.contains([500.0, 500.0]));
    }

    #[test]
    fn unknown_mode_falls_back() {
        let rx = Receiver::default();
        let mut field = PerceptionField::new(PerceptionConfig::default());
        field.set_mode(mode(3));
        field.set_mode(mode(8));

        assert_eq!(field.mode(), Mode::DEFAULT);
        assert_eq!(
            rx.try_iter().collect::<Vec<_>>(),
            vec![Msg::ModeChanged(mode(3)), Msg::ModeChanged(Mode::DEFAULT)]
        );

        field.recompute(Pose::new([100.0, 100.0], 0.0));
        assert!(field.contains([150.0, 100.0]));
    }

    #[test]
    fn overlay_follows_mode() {
        let mut field = field_at([0.0, 0.0], 0.0);
        assert_eq!(field.mask().overlay, Overlay::new(0, 0.95));

        field.set_mode(mode(2));
        assert_eq!(field.mask().overlay, Overlay::tinted(0xff4400));
    }

    #[test]
    fn mode_round_trip_restores_region() {
        let pose = Pose::new([40.0, -20.0], 1.0);
        let mut field = PerceptionField::new(PerceptionConfig::default());
        field.set_mode(mode(4));
        field.lights_mut().add([0.0, 0.0], 10.0);
        field.recompute(pose);
        let before = field.mask().clone();

        field.set_mode(mode(2));
        field.set_mode(mode(4));
        field.recompute(pose);
        assert_eq!(field.mask(), &before);
    }

    #[test]
    fn synthetic_config() {
        let config = PerceptionConfig::empty().with_mode(
            Mode::DEFAULT,
            ModeSpec::new([ShapeDescriptor::rectangle(20.0, 20.0)]),
        );
        let mut field = PerceptionField::new(config);
        field.recompute(Pose::new([0.0, 0.0], 0.0));

        assert!(field.contains([10.0, -10.0]));
        assert!(!field.contains([10.5, 0.0]));
    }

    #[test]
    fn no_modes_only_lights() {
        let mut field = PerceptionField::new(PerceptionConfig::empty());
        field.recompute(Pose::default());
        assert!(!field.contains([0.0, 0.0]));
        assert!(field.mask().region.is_empty());
    }

    #[test]
    fn facing_boundary() {
        let field = field_at([0.0, 0.0], 0.0);

        assert!(field.in_forward_arc([10.0, 0.0]));
        assert!(field.in_forward_arc([10.0, 9.0]));
        assert!(!field.in_forward_arc([-10.0, 0.0]));

        // Exactly sideways isn't forward.
        assert!(!field.in_forward_arc([0.0, 10.0]));
        assert!(!field.in_forward_arc([0.0, -10.0]));

        // Facing nudged a hair towards the point tips it forward.
        let field = field_at([0.0, 0.0], f32::EPSILON);
        assert!(field.in_forward_arc([0.0, 10.0]));
    }

    #[test]
    fn behind_inside_triangle_is_not_pinned() {
        // Triangle aimed backwards, player still facing forward.
        let config = PerceptionConfig::empty().with_mode(
            Mode::DEFAULT,
            ModeSpec::new([
                ShapeDescriptor::triangle(100.0).with_angle_offset(PI)
            ]),
        );
        let mut field = PerceptionField::new(config);
        field.recompute(Pose::new([0.0, 0.0], 0.0));

        let s = field.sees([-50.0, 0.0]);
        assert!(s.seen);
        assert!(!s.facing);
        assert!(!s.pins_down());

        let s = field.sees([50.0, 0.0]);
        assert!(!s.seen);
        assert!(s.facing);
        assert!(!s.pins_down());
    }

    #[test]
    fn pinned_in_front() {
        let mut field = PerceptionField::new(PerceptionConfig::default());
        field.set_mode(mode(1));
        field.recompute(Pose::new([0.0, 0.0], FRAC_PI_2));

        assert!(field.sees(vec2(0.0, 100.0)).pins_down());
        assert!(!field.sees(vec2(0.0, -100.0)).pins_down());
    }

    #[quickcheck]
    fn lights_always_seen(x: i16, y: i16, r: u8, facing: i16) -> bool {
        let mut field = PerceptionField::new(PerceptionConfig::default());
        let center = vec2(x as f32, y as f32);
        field.lights_mut().add(center, r as f32);
        field.recompute(Pose::new([1e4, -1e4], facing as f32 / 100.0));
        field.contains(center)
    }
}
