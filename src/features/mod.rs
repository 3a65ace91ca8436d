//! Per-sport feature catalogs.
//!
//! Every sport is a static [`SportTable`]: the features it draws (with their
//! z-order and default style), the display ranges it understands, and the
//! dimensions that add up to its overall extent. Builders only read the
//! league's dimension table, so a league is nothing more than data.

mod baseball;
mod basketball;
mod curling;
mod football;
mod hockey;
mod soccer;
mod tennis;
mod volleyball;

use glam::{DVec2, dvec2};

use crate::errors::Result;
use crate::geometry::{CircleShape, Primitive, RectShape, SegmentShape};
use crate::registry::{Dims, Sport};
use crate::style::StyleDef;
use crate::types::BBox;

/// Builds one feature's geometry in native, center-origin coordinates
pub type Builder = fn(&Dims) -> Result<Primitive>;

/// A weighted sum of dimensions
pub type Extent = &'static [(f64, &'static str)];

pub struct FeatureDef {
    pub id: &'static str,
    pub z_order: i32,
    pub style: StyleDef,
    pub build: Builder,
}

pub struct RangeDef {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub bounds: fn(&Dims) -> Result<BBox>,
}

pub struct SportTable {
    pub sport: Sport,
    pub features: &'static [FeatureDef],
    /// The first entry is the sport's default, full-surface range
    pub ranges: &'static [RangeDef],
    /// Dimensions whose weighted sums give the full range's width and height
    pub extent_x: Extent,
    pub extent_y: Extent,
    /// Outline of the playing surface, used to filter overlay points
    pub surface: Builder,
    /// Features that are each other's mirror image across x = 0.
    /// Every other feature is its own mirror image when `mirrored_in_x` is set.
    pub mirror_pairs: &'static [(&'static str, &'static str)],
    pub mirrored_in_x: bool,
}

impl SportTable {
    pub fn feature(&self, id: &str) -> Option<&FeatureDef> {
        self.features.iter().find(|f| f.id == id)
    }

    /// The feature that mirrors `id` across x = 0
    pub fn mirror_of(&self, id: &'static str) -> &'static str {
        self.mirror_pairs
            .iter()
            .find_map(|&(a, b)| {
                if a == id {
                    Some(b)
                } else if b == id {
                    Some(a)
                } else {
                    None
                }
            })
            .unwrap_or(id)
    }
}

pub fn table(sport: Sport) -> &'static SportTable {
    match sport {
        Sport::Baseball => &baseball::TABLE,
        Sport::Basketball => &basketball::TABLE,
        Sport::Curling => &curling::TABLE,
        Sport::Football => &football::TABLE,
        Sport::Hockey => &hockey::TABLE,
        Sport::Soccer => &soccer::TABLE,
        Sport::Tennis => &tennis::TABLE,
        Sport::Volleyball => &volleyball::TABLE,
    }
}

/// Evaluate a weighted dimension sum
pub fn sum_extent(dims: &Dims, extent: Extent) -> Result<f64> {
    extent
        .iter()
        .try_fold(0.0, |acc, &(weight, name)| Ok(acc + weight * dims.get(name)?))
}

/// The extent centered on the origin
fn centered(dims: &Dims, x: Extent, y: Extent) -> Result<BBox> {
    Ok(BBox::centered(sum_extent(dims, x)?, sum_extent(dims, y)?))
}

// ============================================================================
// Shape helpers
// ============================================================================

fn rect(cx: f64, cy: f64, width: f64, height: f64) -> Primitive {
    RectShape::new(dvec2(cx, cy), width, height).into()
}

fn rect_between(x: (f64, f64), y: (f64, f64)) -> Primitive {
    RectShape::from_corners(dvec2(x.0, y.0), dvec2(x.1, y.1)).into()
}

fn circle(center: DVec2, radius: f64) -> Primitive {
    CircleShape::new(center, radius).into()
}

fn segment(start: DVec2, end: DVec2) -> Primitive {
    SegmentShape::new(start, end).into()
}

/// Independently styled layers, outermost first
fn layers(parts: Vec<Primitive>) -> Primitive {
    Primitive::group(parts)
}
