//! The rendering seam.
//!
//! Rasterizing is left to whoever implements [`Backend`]. A draw call hands
//! the backend display-space primitives in z-order, the resolved limits,
//! and any overlay marks the caller adds afterwards through [`Drawing`].

use glam::DVec2;

use crate::geometry::{Geometry, Primitive, Transform};
use crate::log::warn;
use crate::style::Style;
use crate::types::BBox;

/// A feature ready to paint, in display coordinates
#[derive(Clone, Debug, PartialEq)]
pub struct StyledPrimitive {
    pub id: &'static str,
    pub z_order: i32,
    pub primitive: Primitive,
    pub style: Style,
}

/// Caller data drawn over a surface, in display coordinates
#[derive(Clone, Debug, PartialEq)]
pub enum Mark {
    Scatter(Vec<DVec2>),
    Arrow { from: DVec2, to: DVec2 },
}

pub trait Backend {
    fn set_limits(&mut self, limits: BBox);
    fn draw_primitive(&mut self, item: StyledPrimitive);
    fn draw_mark(&mut self, mark: Mark);
}

/// Backend that keeps everything it is sent
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Recorder {
    pub limits: Option<BBox>,
    pub primitives: Vec<StyledPrimitive>,
    pub marks: Vec<Mark>,
}

impl Recorder {
    pub fn primitive(&self, id: &str) -> Option<&StyledPrimitive> {
        self.primitives.iter().find(|p| p.id == id)
    }
}

impl Backend for Recorder {
    fn set_limits(&mut self, limits: BBox) {
        self.limits = Some(limits);
    }

    fn draw_primitive(&mut self, item: StyledPrimitive) {
        self.primitives.push(item);
    }

    fn draw_mark(&mut self, mark: Mark) {
        self.marks.push(mark);
    }
}

/// A drawn surface that overlays can be added to.
///
/// Overlay coordinates are native surface coordinates; they go through the
/// same transform the surface was drawn with.
#[derive(Debug)]
pub struct Drawing<B: Backend> {
    backend: B,
    transform: Transform,
    outline: Primitive,
    limits: BBox,
}

impl<B: Backend> Drawing<B> {
    pub(crate) fn new(backend: B, transform: Transform, outline: Primitive, limits: BBox) -> Self {
        Self {
            backend,
            transform,
            outline,
            limits,
        }
    }

    /// Plot points. With `constrained`, points outside the playing surface
    /// are dropped.
    pub fn scatter(&mut self, points: &[DVec2], constrained: bool) -> &mut Self {
        let kept: Vec<DVec2> = if constrained {
            points
                .iter()
                .copied()
                .filter(|&p| self.outline.contains(p))
                .collect()
        } else {
            points.to_vec()
        };
        if kept.len() < points.len() {
            warn!(
                dropped = points.len() - kept.len(),
                "points outside the playing surface were not drawn"
            );
        }
        self.backend
            .draw_mark(Mark::Scatter(self.transform.apply_all(&kept)));
        self
    }

    pub fn arrow(&mut self, from: DVec2, to: DVec2) -> &mut Self {
        self.backend.draw_mark(Mark::Arrow {
            from: self.transform.apply(from),
            to: self.transform.apply(to),
        });
        self
    }

    /// Display-space limits the surface was drawn with
    pub fn limits(&self) -> BBox {
        self.limits
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }
}
