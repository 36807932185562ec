use fov::{Bounds, Region};
use glam::{vec2, Vec2};

use crate::{Buffer, Rgba};

/// Mapping from buffer pixels to world space.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct View {
    /// World position of the buffer's top left corner.
    pub origin: Vec2,
    /// World units per pixel.
    pub scale: f32,
    pub width: u32,
    pub height: u32,
}

impl View {
    /// View showing `bounds` at `width` pixels across.
    pub fn covering(bounds: &Bounds, width: u32) -> Self {
        let size = bounds.max - bounds.min;
        let width = width.max(1);
        let scale = (size.x / width as f32).max(f32::EPSILON);
        View {
            origin: bounds.min,
            scale,
            width,
            height: (size.y / scale).ceil().max(1.0) as u32,
        }
    }

    /// World position of a pixel's center.
    pub fn to_world(&self, x: u32, y: u32) -> Vec2 {
        self.origin + (vec2(x as f32, y as f32) + 0.5) * self.scale
    }
}

/// Draw the darkening layer for a perceived region.
///
/// Pixels whose center falls inside the region are left fully transparent,
/// everything else is covered with `color` at `opacity`. Uses the same
/// membership test gameplay uses.
pub fn render_overlay(
    region: &Region,
    color: [u8; 3],
    opacity: f32,
    view: &View,
) -> Buffer<Rgba> {
    let shade = Rgba::with_opacity(color, opacity);
    let Some(bounds) = region.bounds() else {
        return Buffer::from_fn(view.width, view.height, |_, _| shade);
    };

    Buffer::from_fn(view.width, view.height, |x, y| {
        let p = view.to_world(x, y);
        if bounds.contains(p) && region.contains(p) {
            Rgba::TRANSPARENT
        } else {
            shade
        }
    })
}

#[cfg(test)]
mod test {
    use fov::{Pose, ShapeDescriptor};

    use super::*;

    fn view() -> View {
        View::covering(
            &Bounds {
                min: vec2(0.0, 0.0),
                max: vec2(200.0, 100.0),
            },
            20,
        )
    }

    #[test]
    fn view_mapping() {
        let v = view();
        assert_eq!(v.scale, 10.0);
        assert_eq!((v.width, v.height), (20, 10));
        assert_eq!(v.to_world(0, 0), vec2(5.0, 5.0));
        assert_eq!(v.to_world(19, 9), vec2(195.0, 95.0));
    }

    #[test]
    fn hole_in_overlay() {
        let shapes = [ShapeDescriptor::circle(60.0)];
        let pose = Pose::new([100.0, 50.0], 0.0);
        let region = Region::compose(&pose, &shapes, []);

        let buf = render_overlay(&region, [0, 0, 0], 0.95, &view());
        assert_eq!(buf.dim(), glam::uvec2(20, 10));

        // Pixel centered at (105, 55) is inside the circle.
        assert!(buf.get(10, 5).unwrap().is_transparent());
        // Corner is shaded.
        assert_eq!(buf.get(0, 0), Some(Rgba::new(0, 0, 0, 242)));

        // Every pixel agrees with the region.
        let v = view();
        for y in 0..v.height {
            for x in 0..v.width {
                let inside = region.contains(v.to_world(x, y));
                assert_eq!(buf.get(x, y).unwrap().is_transparent(), inside);
            }
        }
    }

    #[test]
    fn empty_region_is_all_shade() {
        let buf =
            render_overlay(&Region::default(), [0x7f, 0, 0x7f], 0.5, &view());
        assert!(buf.pixels().all(|&p| p == Rgba::new(0x7f, 0, 0x7f, 128)));
    }
}
