use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::Vec2;

/// Snap an angle in radians into its standard domain, the half-open range
/// (-π, π].
///
/// Angles that are already in the domain are returned unchanged, bit for
/// bit, so boundary comparisons made on normalized values stay exact.
pub fn normalize_angle(a: f32) -> f32 {
    if a > -PI && a <= PI {
        return a;
    }

    let ret = (a + PI).rem_euclid(TAU) - PI;
    if ret <= -PI {
        ret + TAU
    } else {
        ret
    }
}

/// Angle of a vector using mathematical convention, zero points along +x
/// and the value grows towards +y.
///
/// With screen coordinates (+y down) positive angles turn clockwise.
pub fn angle_of(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}

/// Whether an angular difference lies strictly inside the forward half-plane.
///
/// A difference of exactly ±π/2 is a sideways point and does not count.
pub fn is_forward(angle_diff: f32) -> bool {
    normalize_angle(angle_diff).abs() < FRAC_PI_2
}

/// Whether `point` lies within the 180° arc in front of an observer at
/// `origin` facing along `facing`.
pub fn in_forward_arc(origin: Vec2, facing: f32, point: Vec2) -> bool {
    is_forward(angle_of(point - origin) - facing)
}
