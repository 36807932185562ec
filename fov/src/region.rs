use glam::Vec2;

use crate::{Bounds, Pose, Shape, ShapeDescriptor};

/// Union of placed shapes.
///
/// A point is in the region if any single shape contains it. An empty region
/// contains nothing.
#[derive(Clone, Default, PartialEq, Debug)]
pub struct Region {
    shapes: Vec<Shape>,
}

impl Region {
    /// Build a region from descriptors anchored on an observer plus extra
    /// circular areas given as center and radius pairs.
    pub fn compose<'a>(
        pose: &Pose,
        descriptors: impl IntoIterator<Item = &'a ShapeDescriptor>,
        lights: impl IntoIterator<Item = (Vec2, f32)>,
    ) -> Self {
        let mut ret = Region::default();
        for d in descriptors {
            ret.push(d.place(pose));
        }
        for (center, radius) in lights {
            ret.push(Shape::Circle { center, radius });
        }
        ret
    }

    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub fn contains(&self, p: impl Into<Vec2>) -> bool {
        let p = p.into();
        self.shapes.iter().any(|s| s.contains(p))
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Bounding box of the whole region, `None` for an empty region.
    pub fn bounds(&self) -> Option<Bounds> {
        self.shapes
            .iter()
            .map(Shape::bounds)
            .reduce(|a, b| a.union(&b))
    }
}
