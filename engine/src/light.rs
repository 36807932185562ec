use derive_more::Display;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Handle for a light source, unique for the lifetime of its registry.
#[derive(
    Copy,
    Clone,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Debug,
    Display,
    Serialize,
    Deserialize,
)]
#[display("light#{_0}")]
pub struct LightId(u32);

/// Circular area that is perceived regardless of perception mode.
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct LightSource {
    pub id: LightId,
    pub pos: Vec2,
    pub radius: f32,
}

/// Currently active light sources.
///
/// Lights have no built-in lifetime, whoever adds one is responsible for
/// removing it.
#[derive(Clone, Default, Debug)]
pub struct LightRegistry {
    next_id: u32,
    lights: Vec<LightSource>,
}

impl LightRegistry {
    pub fn add(&mut self, pos: impl Into<Vec2>, radius: f32) -> LightId {
        let id = LightId(self.next_id);
        self.next_id += 1;
        self.lights.push(LightSource {
            id,
            pos: pos.into(),
            radius,
        });
        log::debug!("added {id} with radius {radius}");
        id
    }

    /// Remove a light, removing an unknown light does nothing.
    pub fn remove(&mut self, id: LightId) {
        self.lights.retain(|l| l.id != id);
    }

    /// Remove all lights.
    ///
    /// Ids of removed lights are not handed out again.
    pub fn clear(&mut self) {
        self.lights.clear();
    }

    pub fn get(&self, id: LightId) -> Option<&LightSource> {
        self.lights.iter().find(|l| l.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LightSource> + '_ {
        self.lights.iter()
    }

    pub fn len(&self) -> usize {
        self.lights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }
}

#[cfg(test)]
mod test {
    use glam::vec2;

    use super::*;

    #[test]
    fn add_and_remove() {
        let mut lights = LightRegistry::default();
        assert!(lights.is_empty());

        let a = lights.add([10.0, 10.0], 5.0);
        let b = lights.add(vec2(20.0, 0.0), 8.0);
        assert_ne!(a, b);
        assert_eq!(lights.len(), 2);
        assert_eq!(lights.get(b).unwrap().pos, vec2(20.0, 0.0));

        lights.remove(a);
        assert_eq!(lights.len(), 1);
        assert!(lights.get(a).is_none());

        // Second removal is harmless.
        lights.remove(a);
        assert_eq!(lights.len(), 1);
        assert_eq!(lights.iter().map(|l| l.id).collect::<Vec<_>>(), vec![b]);
    }

    #[test]
    fn ids_survive_clear() {
        let mut lights = LightRegistry::default();
        let a = lights.add([0.0, 0.0], 1.0);
        let b = lights.add([0.0, 0.0], 1.0);
        lights.clear();
        assert!(lights.is_empty());

        let c = lights.add([0.0, 0.0], 1.0);
        assert!(c > a && c > b);

        // Stale handle from before the clear doesn't hit the new light.
        lights.remove(a);
        assert_eq!(lights.len(), 1);
    }

    #[test]
    fn display() {
        let mut lights = LightRegistry::default();
        lights.add([0.0, 0.0], 1.0);
        let id = lights.add([0.0, 0.0], 1.0);
        assert_eq!(id.to_string(), "light#1");
    }
}
