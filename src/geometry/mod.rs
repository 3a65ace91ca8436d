//! Primitive shapes in surface coordinates and the transform applied to them
//! at draw time.

mod primitive;
mod transform;

pub use primitive::{
    ArcShape, CircleShape, Flip, Geometry, GroupShape, PolygonShape, Primitive, RectShape,
    SegmentShape, arc_vertices,
};
pub use transform::{Transform, TransformState};
