use glam::{vec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::geometry::{
    point_in_circle, point_in_rectangle, point_in_triangle, triangle_points,
};

/// Position and facing of an observer.
///
/// Facing is in radians with zero pointing along +x and positive values
/// turning towards +y.
#[derive(Copy, Clone, Default, PartialEq, Debug, Serialize, Deserialize)]
pub struct Pose {
    pub pos: Vec2,
    pub facing: f32,
}

impl Pose {
    pub fn new(pos: impl Into<Vec2>, facing: f32) -> Self {
        Pose {
            pos: pos.into(),
            facing,
        }
    }
}

/// Geometry of a shape primitive.
///
/// Sizes are full extents: a circle's size is its diameter, a triangle's
/// size is both the distance from apex to base and the base half-width.
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShapeKind {
    Triangle { size: f32 },
    Circle { size: f32 },
    Rectangle { width: f32, height: f32 },
}

impl Default for ShapeKind {
    fn default() -> Self {
        ShapeKind::Circle { size: 0.0 }
    }
}

/// Static description of one primitive in a field of view.
#[derive(Copy, Clone, Default, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ShapeDescriptor {
    pub kind: ShapeKind,
    /// Displacement of the shape anchor from the observer position.
    pub offset: Vec2,
    /// Triangles turn along with the observer when set.
    pub rotates_with_facing: bool,
    /// Extra turn applied to a triangle on top of the observer's facing.
    pub angle_offset: f32,
}

impl ShapeDescriptor {
    /// Triangle that opens in front of the observer and turns with them.
    pub fn triangle(size: f32) -> Self {
        ShapeDescriptor {
            kind: ShapeKind::Triangle { size },
            rotates_with_facing: true,
            ..Default::default()
        }
    }

    pub fn circle(size: f32) -> Self {
        ShapeDescriptor {
            kind: ShapeKind::Circle { size },
            ..Default::default()
        }
    }

    pub fn rectangle(width: f32, height: f32) -> Self {
        ShapeDescriptor {
            kind: ShapeKind::Rectangle { width, height },
            ..Default::default()
        }
    }

    pub fn with_offset(mut self, offset: impl Into<Vec2>) -> Self {
        self.offset = offset.into();
        self
    }

    pub fn with_angle_offset(mut self, angle: f32) -> Self {
        self.angle_offset = angle;
        self
    }

    /// Keep the shape at a fixed world orientation.
    pub fn fixed(mut self) -> Self {
        self.rotates_with_facing = false;
        self
    }

    /// Anchor the descriptor to an observer.
    pub fn place(&self, pose: &Pose) -> Shape {
        let anchor = pose.pos + self.offset;

        match self.kind {
            ShapeKind::Triangle { size } => {
                let angle = if self.rotates_with_facing {
                    pose.facing + self.angle_offset
                } else {
                    self.angle_offset
                };
                Shape::Triangle(triangle_points(anchor, angle, size))
            }
            ShapeKind::Circle { size } => Shape::Circle {
                center: anchor,
                radius: size / 2.0,
            },
            ShapeKind::Rectangle { width, height } => Shape::Rectangle {
                center: anchor,
                size: vec2(width, height),
            },
        }
    }
}

/// A primitive placed in world space.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Shape {
    Triangle([Vec2; 3]),
    Circle { center: Vec2, radius: f32 },
    Rectangle { center: Vec2, size: Vec2 },
}

impl Shape {
    pub fn contains(&self, p: Vec2) -> bool {
        match *self {
            Shape::Triangle([a, b, c]) => point_in_triangle(p, a, b, c),
            Shape::Circle { center, radius } => {
                point_in_circle(p, center, radius)
            }
            Shape::Rectangle { center, size } => {
                point_in_rectangle(p, center, size)
            }
        }
    }

    pub fn bounds(&self) -> Bounds {
        match *self {
            Shape::Triangle([a, b, c]) => Bounds {
                min: a.min(b).min(c),
                max: a.max(b).max(c),
            },
            Shape::Circle { center, radius } => Bounds {
                min: center - Vec2::splat(radius),
                max: center + Vec2::splat(radius),
            },
            Shape::Rectangle { center, size } => Bounds {
                min: center - size / 2.0,
                max: center + size / 2.0,
            },
        }
    }
}

/// Axis-aligned bounding box, edges inclusive.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }
}
