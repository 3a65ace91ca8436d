//! Primitive shape types.
//!
//! Each shape knows how to:
//! - List the control points that fully determine it
//! - Calculate its bounding box
//! - Produce a transformed or mirrored copy of itself
//!
//! Degenerate shapes (zero radius, zero width, collapsed polygons) are valid
//! values; they simply have an empty extent.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use enum_dispatch::enum_dispatch;
use glam::{DVec2, dvec2};

use super::transform::Transform;
use crate::types::BBox;

/// Which coordinate a mirror image negates
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flip {
    /// Negate x: mirror across the vertical line x = 0
    X,
    /// Negate y: mirror across the horizontal line y = 0
    Y,
}

impl Flip {
    pub fn point(self, p: DVec2) -> DVec2 {
        match self {
            Flip::X => dvec2(-p.x, p.y),
            Flip::Y => dvec2(p.x, -p.y),
        }
    }

    /// Mirror a direction given as an angle in radians
    pub fn angle(self, a: f64) -> f64 {
        match self {
            Flip::X => PI - a,
            Flip::Y => -a,
        }
    }
}

/// Common behavior for all primitives
#[enum_dispatch]
pub trait Geometry {
    /// Points that fully determine the shape.
    ///
    /// Two shapes of the same kind with the same control points are the same shape.
    fn control_points(&self) -> Vec<DVec2>;

    /// Axis-aligned bounding box
    fn bounds(&self) -> BBox;

    /// This shape with every control point run through `transform`
    fn transformed(&self, transform: &Transform) -> Primitive;

    /// Mirror image of this shape
    fn mirrored(&self, flip: Flip) -> Primitive;

    /// Whether `p` lies inside the area the shape encloses.
    /// Open curves enclose nothing.
    fn contains(&self, p: DVec2) -> bool;

    /// Whether the shape has an empty extent
    fn is_degenerate(&self) -> bool;
}

// ============================================================================
// Shape Types
// ============================================================================

/// A rectangle, optionally with rounded corners and rotated about its center
#[derive(Debug, Clone, PartialEq)]
pub struct RectShape {
    pub center: DVec2,
    pub width: f64,
    pub height: f64,
    pub corner_radius: f64,
    /// Counter-clockwise rotation in radians
    pub rotation: f64,
}

impl RectShape {
    pub fn new(center: DVec2, width: f64, height: f64) -> Self {
        Self {
            center,
            width,
            height,
            corner_radius: 0.0,
            rotation: 0.0,
        }
    }

    /// Axis-aligned rectangle between two opposite corners
    pub fn from_corners(a: DVec2, b: DVec2) -> Self {
        let size = (b - a).abs();
        Self::new((a + b) / 2.0, size.x, size.y)
    }

    pub fn with_corner_radius(mut self, radius: f64) -> Self {
        self.corner_radius = radius;
        self
    }

    pub fn with_rotation(mut self, radians: f64) -> Self {
        self.rotation = radians;
        self
    }

    /// Corners in counter-clockwise order
    pub fn corners(&self) -> [DVec2; 4] {
        let dir = DVec2::from_angle(self.rotation);
        let u = dir * (self.width / 2.0);
        let v = dir.perp() * (self.height / 2.0);
        [
            self.center - u - v,
            self.center + u - v,
            self.center + u + v,
            self.center - u + v,
        ]
    }
}

impl Geometry for RectShape {
    fn control_points(&self) -> Vec<DVec2> {
        self.corners().to_vec()
    }

    fn bounds(&self) -> BBox {
        let mut bb = BBox::new();
        for p in self.corners() {
            bb.expand_point(p);
        }
        bb
    }

    fn transformed(&self, transform: &Transform) -> Primitive {
        RectShape {
            center: transform.apply(self.center),
            width: self.width * transform.scale(),
            height: self.height * transform.scale(),
            corner_radius: self.corner_radius * transform.scale(),
            rotation: self.rotation + transform.rotation(),
        }
        .into()
    }

    fn mirrored(&self, flip: Flip) -> Primitive {
        RectShape {
            center: flip.point(self.center),
            rotation: -self.rotation,
            ..self.clone()
        }
        .into()
    }

    fn contains(&self, p: DVec2) -> bool {
        let local = DVec2::from_angle(-self.rotation).rotate(p - self.center).abs();
        let half = dvec2(self.width, self.height) / 2.0;
        if local.x > half.x || local.y > half.y {
            return false;
        }
        let r = self.corner_radius.min(half.x).min(half.y);
        let d = local - (half - DVec2::splat(r));
        if d.x > 0.0 && d.y > 0.0 {
            d.length_squared() <= r * r
        } else {
            true
        }
    }

    fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// A full circle
#[derive(Debug, Clone, PartialEq)]
pub struct CircleShape {
    pub center: DVec2,
    pub radius: f64,
}

impl CircleShape {
    pub fn new(center: DVec2, radius: f64) -> Self {
        Self { center, radius }
    }
}

impl Geometry for CircleShape {
    fn control_points(&self) -> Vec<DVec2> {
        let r = self.radius;
        vec![
            self.center,
            self.center + dvec2(r, 0.0),
            self.center + dvec2(0.0, r),
            self.center - dvec2(r, 0.0),
            self.center - dvec2(0.0, r),
        ]
    }

    fn bounds(&self) -> BBox {
        let r = DVec2::splat(self.radius);
        BBox {
            min: self.center - r,
            max: self.center + r,
        }
    }

    fn transformed(&self, transform: &Transform) -> Primitive {
        CircleShape::new(transform.apply(self.center), self.radius * transform.scale()).into()
    }

    fn mirrored(&self, flip: Flip) -> Primitive {
        CircleShape::new(flip.point(self.center), self.radius).into()
    }

    fn contains(&self, p: DVec2) -> bool {
        p.distance_squared(self.center) <= self.radius * self.radius
    }

    fn is_degenerate(&self) -> bool {
        self.radius <= 0.0
    }
}

/// A circular arc swept counter-clockwise from `start` to `end` (radians)
#[derive(Debug, Clone, PartialEq)]
pub struct ArcShape {
    pub center: DVec2,
    pub radius: f64,
    pub start: f64,
    pub end: f64,
}

impl ArcShape {
    /// Arc from `start` to `end`; an `end` behind `start` wraps once around.
    pub fn new(center: DVec2, radius: f64, start: f64, end: f64) -> Self {
        let end = if end < start { end + TAU } else { end };
        Self {
            center,
            radius,
            start,
            end,
        }
    }

    pub fn sweep(&self) -> f64 {
        self.end - self.start
    }

    pub fn point_at(&self, angle: f64) -> DVec2 {
        self.center + DVec2::from_angle(angle) * self.radius
    }

    /// `steps + 1` evenly spaced points from start to end
    pub fn sample(&self, steps: usize) -> Vec<DVec2> {
        arc_vertices(self.center, self.radius, self.start, self.end, steps)
    }
}

impl Geometry for ArcShape {
    fn control_points(&self) -> Vec<DVec2> {
        vec![self.center, self.point_at(self.start), self.point_at(self.end)]
    }

    fn bounds(&self) -> BBox {
        let mut bb = BBox::new();
        bb.expand_point(self.point_at(self.start));
        bb.expand_point(self.point_at(self.end));
        // Extreme points sit on the cardinal angles the sweep crosses
        let first = (self.start / FRAC_PI_2).ceil() as i64;
        let last = (self.end / FRAC_PI_2).floor() as i64;
        for k in first..=last {
            bb.expand_point(self.point_at(k as f64 * FRAC_PI_2));
        }
        bb
    }

    fn transformed(&self, transform: &Transform) -> Primitive {
        ArcShape {
            center: transform.apply(self.center),
            radius: self.radius * transform.scale(),
            start: self.start + transform.rotation(),
            end: self.end + transform.rotation(),
        }
        .into()
    }

    fn mirrored(&self, flip: Flip) -> Primitive {
        // Reflection reverses orientation, so the endpoints trade places
        ArcShape {
            center: flip.point(self.center),
            radius: self.radius,
            start: flip.angle(self.end),
            end: flip.angle(self.start),
        }
        .into()
    }

    fn contains(&self, _p: DVec2) -> bool {
        false
    }

    fn is_degenerate(&self) -> bool {
        self.radius <= 0.0 || self.sweep() <= 0.0
    }
}

/// A closed polygon
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonShape {
    pub vertices: Vec<DVec2>,
}

impl PolygonShape {
    pub fn new(vertices: Vec<DVec2>) -> Self {
        Self { vertices }
    }

    /// Signed area; positive for counter-clockwise winding
    pub fn area(&self) -> f64 {
        let n = self.vertices.len();
        (0..n)
            .map(|i| self.vertices[i].perp_dot(self.vertices[(i + 1) % n]))
            .sum::<f64>()
            / 2.0
    }
}

impl Geometry for PolygonShape {
    fn control_points(&self) -> Vec<DVec2> {
        self.vertices.clone()
    }

    fn bounds(&self) -> BBox {
        let mut bb = BBox::new();
        for &p in &self.vertices {
            bb.expand_point(p);
        }
        bb
    }

    fn transformed(&self, transform: &Transform) -> Primitive {
        PolygonShape::new(transform.apply_all(&self.vertices)).into()
    }

    fn mirrored(&self, flip: Flip) -> Primitive {
        // Reverse so the winding direction survives the reflection
        PolygonShape::new(self.vertices.iter().rev().map(|&p| flip.point(p)).collect()).into()
    }

    fn contains(&self, p: DVec2) -> bool {
        let n = self.vertices.len();
        if n < 3 {
            return false;
        }
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let (a, b) = (self.vertices[i], self.vertices[j]);
            if (a.y > p.y) != (b.y > p.y) {
                let x = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
                if p.x < x {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    fn is_degenerate(&self) -> bool {
        self.vertices.len() < 3 || self.area().abs() <= f64::EPSILON
    }
}

/// A straight line segment
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentShape {
    pub start: DVec2,
    pub end: DVec2,
}

impl SegmentShape {
    pub fn new(start: DVec2, end: DVec2) -> Self {
        Self { start, end }
    }
}

impl Geometry for SegmentShape {
    fn control_points(&self) -> Vec<DVec2> {
        vec![self.start, self.end]
    }

    fn bounds(&self) -> BBox {
        let mut bb = BBox::new();
        bb.expand_point(self.start);
        bb.expand_point(self.end);
        bb
    }

    fn transformed(&self, transform: &Transform) -> Primitive {
        SegmentShape::new(transform.apply(self.start), transform.apply(self.end)).into()
    }

    fn mirrored(&self, flip: Flip) -> Primitive {
        SegmentShape::new(flip.point(self.start), flip.point(self.end)).into()
    }

    fn contains(&self, _p: DVec2) -> bool {
        false
    }

    fn is_degenerate(&self) -> bool {
        self.start == self.end
    }
}

/// An ordered list of primitives.
///
/// For layered features, child `i` is painted with fill layer `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupShape {
    pub children: Vec<Primitive>,
}

impl GroupShape {
    pub fn new(children: Vec<Primitive>) -> Self {
        Self { children }
    }
}

impl Geometry for GroupShape {
    fn control_points(&self) -> Vec<DVec2> {
        self.children.iter().flat_map(|c| c.control_points()).collect()
    }

    fn bounds(&self) -> BBox {
        let mut bb = BBox::new();
        for child in &self.children {
            bb.union(&child.bounds());
        }
        bb
    }

    fn transformed(&self, transform: &Transform) -> Primitive {
        GroupShape::new(self.children.iter().map(|c| c.transformed(transform)).collect()).into()
    }

    fn mirrored(&self, flip: Flip) -> Primitive {
        GroupShape::new(self.children.iter().map(|c| c.mirrored(flip)).collect()).into()
    }

    fn contains(&self, p: DVec2) -> bool {
        self.children.iter().any(|c| c.contains(p))
    }

    fn is_degenerate(&self) -> bool {
        self.children.iter().all(|c| c.is_degenerate())
    }
}

/// A tagged geometric shape
#[enum_dispatch(Geometry)]
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Rectangle(RectShape),
    Circle(CircleShape),
    Arc(ArcShape),
    Polygon(PolygonShape),
    Segment(SegmentShape),
    Group(GroupShape),
}

impl Primitive {
    pub fn group(children: Vec<Primitive>) -> Primitive {
        GroupShape::new(children).into()
    }

    /// This shape together with its mirror image
    pub fn with_mirror(self, flip: Flip) -> Primitive {
        let mirror = self.mirrored(flip);
        Primitive::group(vec![self, mirror])
    }

    /// This shape copied into all four quadrants
    pub fn with_quadrants(self) -> Primitive {
        let x = self.mirrored(Flip::X);
        let y = self.mirrored(Flip::Y);
        let xy = x.mirrored(Flip::Y);
        Primitive::group(vec![self, x, y, xy])
    }

    /// Number of independently styleable layers
    pub fn layer_count(&self) -> usize {
        match self {
            Primitive::Group(g) => g.children.len(),
            _ => 1,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Primitive::Rectangle(_) => "rectangle",
            Primitive::Circle(_) => "circle",
            Primitive::Arc(_) => "arc",
            Primitive::Polygon(_) => "polygon",
            Primitive::Segment(_) => "segment",
            Primitive::Group(_) => "group",
        }
    }
}

/// `steps + 1` evenly spaced points on a circle from `start` to `end` radians
pub fn arc_vertices(center: DVec2, radius: f64, start: f64, end: f64, steps: usize) -> Vec<DVec2> {
    let steps = steps.max(1);
    (0..=steps)
        .map(|i| {
            let t = start + (end - start) * i as f64 / steps as f64;
            center + DVec2::from_angle(t) * radius
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: DVec2, b: DVec2) -> bool {
        a.distance(b) < 1e-9
    }

    // ==================== Rectangle tests ====================

    #[test]
    fn rect_corners_and_bounds() {
        let rect = RectShape::new(dvec2(1.0, 2.0), 4.0, 2.0);
        let bb = rect.bounds();
        assert_eq!(bb.min, dvec2(-1.0, 1.0));
        assert_eq!(bb.max, dvec2(3.0, 3.0));
        assert!(!rect.is_degenerate());
    }

    #[test]
    fn rect_from_corners_normalizes() {
        let rect = RectShape::from_corners(dvec2(5.0, 1.0), dvec2(1.0, 4.0));
        assert_eq!(rect.center, dvec2(3.0, 2.5));
        assert_eq!(rect.width, 4.0);
        assert_eq!(rect.height, 3.0);
    }

    #[test]
    fn rotated_rect_bounds() {
        let rect = RectShape::new(DVec2::ZERO, 2.0, 2.0).with_rotation(std::f64::consts::FRAC_PI_4);
        let bb = rect.bounds();
        let s = 2.0_f64.sqrt();
        assert!((bb.max.x - s).abs() < 1e-9);
        assert!((bb.min.y + s).abs() < 1e-9);
    }

    #[test]
    fn rounded_rect_excludes_corners() {
        let rect = RectShape::new(DVec2::ZERO, 200.0, 85.0).with_corner_radius(28.0);
        assert!(rect.contains(dvec2(0.0, 0.0)));
        assert!(rect.contains(dvec2(99.0, 0.0)));
        assert!(!rect.contains(dvec2(99.5, 42.0)));
        assert!(rect.contains(dvec2(72.0, 42.0)));
        assert!(!rect.contains(dvec2(101.0, 0.0)));
    }

    #[test]
    fn zero_width_rect_is_degenerate_not_an_error() {
        let rect = RectShape::new(dvec2(3.0, 0.0), 0.0, 10.0);
        assert!(rect.is_degenerate());
        assert_eq!(rect.bounds().width(), 0.0);
    }

    // ==================== Arc tests ====================

    #[test]
    fn arc_bounds_include_crossed_cardinals() {
        let arc = ArcShape::new(DVec2::ZERO, 2.0, -FRAC_PI_2 / 2.0, FRAC_PI_2 / 2.0);
        let bb = arc.bounds();
        assert!((bb.max.x - 2.0).abs() < 1e-12);
        assert!(bb.min.x > 1.0);
    }

    #[test]
    fn arc_end_behind_start_wraps() {
        let arc = ArcShape::new(DVec2::ZERO, 1.0, 3.0 * FRAC_PI_2, FRAC_PI_2);
        assert!((arc.sweep() - PI).abs() < 1e-12);
        assert!((arc.bounds().max.x - 1.0).abs() < 1e-12);
    }

    #[test]
    fn arc_mirror_swaps_endpoints() {
        let arc = ArcShape::new(dvec2(10.0, 0.0), 3.0, 0.0, FRAC_PI_2);
        let Primitive::Arc(m) = arc.mirrored(Flip::X) else {
            panic!("mirror changed kind");
        };
        assert_eq!(m.center, dvec2(-10.0, 0.0));
        assert!(close(m.point_at(m.start), dvec2(-10.0, 3.0)));
        assert!(close(m.point_at(m.end), dvec2(-13.0, 0.0)));
        assert!((m.sweep() - arc.sweep()).abs() < 1e-12);
    }

    #[test]
    fn zero_radius_arc_is_degenerate() {
        assert!(ArcShape::new(DVec2::ZERO, 0.0, 0.0, PI).is_degenerate());
    }

    // ==================== Polygon tests ====================

    #[test]
    fn polygon_mirror_keeps_winding() {
        let tri = PolygonShape::new(vec![dvec2(0.0, 0.0), dvec2(2.0, 0.0), dvec2(0.0, 1.0)]);
        assert!(tri.area() > 0.0);
        let Primitive::Polygon(m) = tri.mirrored(Flip::Y) else {
            panic!("mirror changed kind");
        };
        assert!(m.area() > 0.0);
        assert!((m.area() - tri.area()).abs() < 1e-12);
    }

    #[test]
    fn polygon_contains() {
        let square = PolygonShape::new(vec![
            dvec2(0.0, 0.0),
            dvec2(4.0, 0.0),
            dvec2(4.0, 4.0),
            dvec2(0.0, 4.0),
        ]);
        assert!(square.contains(dvec2(2.0, 2.0)));
        assert!(!square.contains(dvec2(5.0, 2.0)));
    }

    #[test]
    fn collapsed_polygon_is_degenerate() {
        let flat = PolygonShape::new(vec![dvec2(0.0, 0.0), dvec2(1.0, 0.0), dvec2(2.0, 0.0)]);
        assert!(flat.is_degenerate());
    }

    // ==================== Group tests ====================

    #[test]
    fn quadrants_are_mirror_images() {
        let dot: Primitive = CircleShape::new(dvec2(69.0, 22.0), 1.0).into();
        let quad = dot.with_quadrants();
        assert_eq!(quad.layer_count(), 4);
        let centers: Vec<DVec2> = match &quad {
            Primitive::Group(g) => g
                .children
                .iter()
                .map(|c| match c {
                    Primitive::Circle(c) => c.center,
                    _ => panic!("expected circle"),
                })
                .collect(),
            _ => panic!("expected group"),
        };
        assert_eq!(
            centers,
            vec![dvec2(69.0, 22.0), dvec2(-69.0, 22.0), dvec2(69.0, -22.0), dvec2(-69.0, -22.0)]
        );
    }

    #[test]
    fn group_bounds_union_children() {
        let group = Primitive::group(vec![
            SegmentShape::new(dvec2(-1.0, 0.0), dvec2(1.0, 0.0)).into(),
            CircleShape::new(dvec2(0.0, 5.0), 1.0).into(),
        ]);
        let bb = group.bounds();
        assert_eq!(bb.min, dvec2(-1.0, 0.0));
        assert_eq!(bb.max, dvec2(1.0, 6.0));
    }
}
