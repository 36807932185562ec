//! Composable field-of-view regions built from oriented shape primitives.
//!
//! A field of view is described by a static set of [`ShapeDescriptor`]s.
//! Every frame the descriptors are anchored to the observer's [`Pose`] and
//! combined with any free-standing light circles into a [`Region`], which
//! then answers point membership queries and provides the geometry to draw.

pub mod geometry;

mod region;
pub use region::Region;

mod shape;
pub use shape::{Bounds, Pose, Shape, ShapeDescriptor, ShapeKind};
