//! Point membership tests for the primitive shapes.
//!
//! All tests are boundary inclusive so that adjacent shapes never leave gaps
//! along shared edges.

use glam::Vec2;

/// Corners of an oriented isosceles triangle.
///
/// The apex sits at `anchor` and the base edge is `size` units forward along
/// `angle`, with the base spanning `size` units to either side. The triangle
/// widens away from its anchor, so a field of view built from it opens up in
/// front of the observer instead of surrounding them.
pub fn triangle_points(anchor: Vec2, angle: f32, size: f32) -> [Vec2; 3] {
    let rot = Vec2::from_angle(angle);
    [
        anchor,
        anchor + rot.rotate(Vec2::new(size, -size)),
        anchor + rot.rotate(Vec2::new(size, size)),
    ]
}

/// Signed parallelogram area of `p` against the directed edge `a -> b`.
fn edge_sign(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    (p.x - b.x) * (a.y - b.y) - (a.x - b.x) * (p.y - b.y)
}

/// Whether `p` lies inside or on the edge of the triangle `a`, `b`, `c`.
///
/// Winding order of the corners does not matter. A triangle with zero area
/// covers nothing.
pub fn point_in_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    if (b - a).perp_dot(c - a) == 0.0 {
        return false;
    }

    let d1 = edge_sign(p, a, b);
    let d2 = edge_sign(p, b, c);
    let d3 = edge_sign(p, c, a);

    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;

    !(has_neg && has_pos)
}

pub fn point_in_circle(p: Vec2, center: Vec2, radius: f32) -> bool {
    p.distance_squared(center) <= radius * radius
}

/// Whether `p` lies inside an axis-aligned rectangle of full extent `size`
/// centered on `center`.
pub fn point_in_rectangle(p: Vec2, center: Vec2, size: Vec2) -> bool {
    let d = (p - center).abs();
    let half = size / 2.0;
    d.x <= half.x && d.y <= half.y
}

#[cfg(test)]
mod test {
    use std::f32::consts::{FRAC_PI_2, PI};

    use glam::vec2;
    use quickcheck_macros::quickcheck;

    use super::*;

    #[test]
    fn triangle_opens_forward() {
        let [a, b, c] = triangle_points(vec2(10.0, 10.0), 0.0, 5.0);
        assert_eq!(a, vec2(10.0, 10.0));
        assert_eq!(b, vec2(15.0, 5.0));
        assert_eq!(c, vec2(15.0, 15.0));

        // Turned a quarter clockwise on screen, the base is below the apex.
        let [a, b, c] = triangle_points(Vec2::ZERO, FRAC_PI_2, 5.0);
        assert_eq!(a, Vec2::ZERO);
        assert!(b.distance(vec2(5.0, 5.0)) < 1e-4);
        assert!(c.distance(vec2(-5.0, 5.0)) < 1e-4);
    }

    #[test]
    fn triangle_membership() {
        let [a, b, c] = triangle_points(Vec2::ZERO, 0.0, 10.0);

        assert!(point_in_triangle(vec2(5.0, 0.0), a, b, c));
        assert!(point_in_triangle(vec2(9.0, 8.0), a, b, c));
        assert!(!point_in_triangle(vec2(-1.0, 0.0), a, b, c));
        assert!(!point_in_triangle(vec2(11.0, 0.0), a, b, c));
        assert!(!point_in_triangle(vec2(5.0, 6.0), a, b, c));

        // Corners and edges are inside.
        assert!(point_in_triangle(a, a, b, c));
        assert!(point_in_triangle(b, a, b, c));
        assert!(point_in_triangle(vec2(5.0, 5.0), a, b, c));
        assert!(point_in_triangle(vec2(10.0, 0.0), a, b, c));

        // Winding does not matter.
        assert!(point_in_triangle(vec2(5.0, 0.0), a, c, b));
    }

    #[test]
    fn backwards_triangle() {
        let [a, b, c] = triangle_points(Vec2::ZERO, PI, 10.0);
        assert!(point_in_triangle(vec2(-5.0, 0.0), a, b, c));
        assert!(!point_in_triangle(vec2(5.0, 0.0), a, b, c));
    }

    #[test]
    fn degenerate_triangle() {
        let [a, b, c] = triangle_points(vec2(3.0, 3.0), 0.0, 0.0);
        assert!(!point_in_triangle(vec2(3.0, 3.0), a, b, c));
        assert!(!point_in_triangle(vec2(100.0, -7.0), a, b, c));
    }

    #[test]
    fn circle_membership() {
        let c = vec2(100.0, 100.0);
        assert!(point_in_circle(c, c, 0.0));
        assert!(point_in_circle(vec2(150.0, 100.0), c, 50.0));
        assert!(!point_in_circle(vec2(150.1, 100.0), c, 50.0));
        assert!(point_in_circle(vec2(130.0, 140.0), c, 50.0));
        assert!(!point_in_circle(vec2(131.0, 140.0), c, 50.0));
    }

    #[test]
    fn rectangle_membership() {
        let c = vec2(0.0, 0.0);
        let size = vec2(20.0, 10.0);
        assert!(point_in_rectangle(vec2(10.0, 5.0), c, size));
        assert!(point_in_rectangle(vec2(-10.0, -5.0), c, size));
        assert!(!point_in_rectangle(vec2(10.5, 0.0), c, size));
        assert!(!point_in_rectangle(vec2(0.0, -5.5), c, size));
    }

    #[quickcheck]
    fn barycentric_points_are_inside(
        angle: u16,
        size: u8,
        w: (u8, u8, u8),
    ) -> bool {
        let size = size as f32 + 1.0;
        let angle = angle as f32 / 1000.0;
        let [a, b, c] = triangle_points(vec2(-30.0, 12.0), angle, size);

        // Strictly positive weights, stay clear of the edges so rounding
        // can't push the point out.
        let (u, v, t) = (w.0 as f32 + 8.0, w.1 as f32 + 8.0, w.2 as f32 + 8.0);
        let p = (a * u + b * v + c * t) / (u + v + t);

        point_in_triangle(p, a, b, c)
    }

    #[quickcheck]
    fn behind_apex_is_outside(angle: u16, size: u8, dist: u8) -> bool {
        let size = size as f32 + 1.0;
        let angle = angle as f32 / 1000.0;
        let anchor = vec2(4.0, -9.0);
        let [a, b, c] = triangle_points(anchor, angle, size);

        let p = anchor - Vec2::from_angle(angle) * (dist as f32 + 1.0);
        !point_in_triangle(p, a, b, c)
    }
}
