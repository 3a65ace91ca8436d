//! The draw-time coordinate transform.
//!
//! Order is fixed: scale into the target unit, rotate about the surface's
//! native origin, then translate. Translation is therefore always expressed in
//! the target unit and is unaffected by rotation.

use glam::{DAffine2, DVec2, dvec2};

use crate::types::BBox;
use crate::units::{Unit, convert};

/// Per-instance display settings: unit, rotation and translation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformState {
    pub target_unit: Unit,
    pub x_translate: f64,
    pub y_translate: f64,
    /// Counter-clockwise positive
    pub rotation_degrees: f64,
}

impl TransformState {
    /// No rotation or translation, drawn in `unit`
    pub fn new(unit: Unit) -> Self {
        Self {
            target_unit: unit,
            x_translate: 0.0,
            y_translate: 0.0,
            rotation_degrees: 0.0,
        }
    }

    pub fn with_translation(mut self, x: f64, y: f64) -> Self {
        self.x_translate = x;
        self.y_translate = y;
        self
    }

    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation_degrees = degrees;
        self
    }
}

/// A resolved transform from native surface coordinates to display coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    affine: DAffine2,
    scale: f64,
    rotation: f64,
}

impl Transform {
    pub fn new(native: Unit, state: &TransformState) -> Self {
        let scale = convert(1.0, native, state.target_unit);
        let rotation = state.rotation_degrees.to_radians();
        let affine = DAffine2::from_translation(dvec2(state.x_translate, state.y_translate))
            * DAffine2::from_angle(rotation)
            * DAffine2::from_scale(DVec2::splat(scale));
        Self {
            affine,
            scale,
            rotation,
        }
    }

    pub fn identity() -> Self {
        Self {
            affine: DAffine2::IDENTITY,
            scale: 1.0,
            rotation: 0.0,
        }
    }

    /// Pure translation, used to place marks built around the origin
    pub fn translation(offset: DVec2) -> Self {
        Self {
            affine: DAffine2::from_translation(offset),
            scale: 1.0,
            rotation: 0.0,
        }
    }

    /// Map a native point into display space
    #[inline]
    pub fn apply(&self, p: DVec2) -> DVec2 {
        self.affine.transform_point2(p)
    }

    pub fn apply_all(&self, points: &[DVec2]) -> Vec<DVec2> {
        points.iter().map(|&p| self.apply(p)).collect()
    }

    /// Map a display-space point back into native coordinates
    pub fn invert(&self, p: DVec2) -> DVec2 {
        self.affine.inverse().transform_point2(p)
    }

    /// Length scale factor from the native unit to the target unit
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Rotation in radians
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Axis-aligned box around the transformed corners of `bbox`
    pub fn bbox(&self, bbox: &BBox) -> BBox {
        let mut out = BBox::new();
        for corner in bbox.corners() {
            out.expand_point(self.apply(corner));
        }
        out
    }
}
