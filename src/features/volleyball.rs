//! Indoor volleyball courts

use super::{FeatureDef, RangeDef, SportTable, centered, rect, rect_between};
use crate::errors::Result;
use crate::geometry::{Flip, Primitive};
use crate::registry::{Dims, Sport};
use crate::style::StyleDef;
use crate::types::{BBox, Color};

const APRON: Color = Color::hex(0x0d3b66);
const FREE_ZONE: Color = Color::hex(0x1b6ca8);
const COURT: Color = Color::hex(0xe07a1f);
const LINE: Color = Color::hex(0xffffff);

const EXTENT_X: super::Extent = &[
    (1.0, "court_length"),
    (2.0, "free_zone_end_line"),
    (2.0, "court_apron_end_line"),
];
const EXTENT_Y: super::Extent = &[
    (1.0, "court_width"),
    (2.0, "free_zone_sideline"),
    (2.0, "court_apron_sideline"),
];

pub static TABLE: SportTable = SportTable {
    sport: Sport::Volleyball,
    features: &[
        FeatureDef { id: "court_apron", z_order: 1, style: StyleDef::fill(APRON), build: court_apron },
        FeatureDef { id: "free_zone", z_order: 2, style: StyleDef::fill(FREE_ZONE), build: free_zone },
        FeatureDef { id: "court", z_order: 3, style: StyleDef::fill(COURT), build: court },
        FeatureDef { id: "end_line", z_order: 16, style: StyleDef::fill(LINE), build: end_line },
        FeatureDef { id: "sideline", z_order: 16, style: StyleDef::fill(LINE), build: sideline },
        FeatureDef { id: "center_line", z_order: 16, style: StyleDef::fill(LINE), build: center_line },
        FeatureDef { id: "attack_line", z_order: 16, style: StyleDef::fill(LINE), build: attack_line },
        FeatureDef { id: "service_zone_mark", z_order: 16, style: StyleDef::fill(LINE), build: service_zone_mark },
    ],
    ranges: &[
        RangeDef { name: "full", aliases: &["full court"], bounds: full },
        RangeDef { name: "in bounds only", aliases: &["in bounds"], bounds: in_bounds },
        RangeDef { name: "offense", aliases: &["offence", "offensive half"], bounds: offense },
        RangeDef { name: "defense", aliases: &["defence", "defensive half"], bounds: defense },
        RangeDef { name: "serving zone", aliases: &["service zone"], bounds: serving_zone },
    ],
    extent_x: EXTENT_X,
    extent_y: EXTENT_Y,
    surface: court_apron,
    mirror_pairs: &[],
    mirrored_in_x: true,
};

fn court_apron(d: &Dims) -> Result<Primitive> {
    let bb = full(d)?;
    Ok(rect_between(bb.x_limits(), bb.y_limits()))
}

fn free_zone(d: &Dims) -> Result<Primitive> {
    let length = d.get("court_length")? + 2.0 * d.get("free_zone_end_line")?;
    let width = d.get("court_width")? + 2.0 * d.get("free_zone_sideline")?;
    Ok(rect(0.0, 0.0, length, width))
}

fn court(d: &Dims) -> Result<Primitive> {
    Ok(rect(0.0, 0.0, d.get("court_length")?, d.get("court_width")?))
}

fn end_line(d: &Dims) -> Result<Primitive> {
    let t = d.get("line_thickness")?;
    let x = d.half("court_length")? - t / 2.0;
    Ok(rect(x, 0.0, t, d.get("court_width")?).with_mirror(Flip::X))
}

fn sideline(d: &Dims) -> Result<Primitive> {
    let t = d.get("line_thickness")?;
    let y = d.half("court_width")? - t / 2.0;
    Ok(rect(0.0, y, d.get("court_length")?, t).with_mirror(Flip::Y))
}

fn center_line(d: &Dims) -> Result<Primitive> {
    Ok(rect(0.0, 0.0, d.get("line_thickness")?, d.get("court_width")?))
}

/// Rear edge is measured from the axis of the center line
fn attack_line(d: &Dims) -> Result<Primitive> {
    let t = d.get("line_thickness")?;
    let x = d.get("attack_line_edge_to_center_line")? - t / 2.0;
    Ok(rect(x, 0.0, t, d.get("court_width")?).with_mirror(Flip::X))
}

/// Short marks behind each end line, extending the sidelines
fn service_zone_mark(d: &Dims) -> Result<Primitive> {
    let t = d.get("line_thickness")?;
    let length = d.get("service_zone_mark_length")?;
    let x = d.half("court_length")? + d.get("service_zone_mark_to_end_line")? + length / 2.0;
    let y = d.half("court_width")? - t / 2.0;
    Ok(rect(x, y, length, t).with_quadrants())
}

// ============================================================================
// Display ranges
// ============================================================================

fn full(d: &Dims) -> Result<BBox> {
    centered(d, EXTENT_X, EXTENT_Y)
}

fn in_bounds(d: &Dims) -> Result<BBox> {
    let (half_l, half_w) = (d.half("court_length")?, d.half("court_width")?);
    Ok(BBox::from_limits((-half_l, half_l), (-half_w, half_w)))
}

fn offense(d: &Dims) -> Result<BBox> {
    let bb = full(d)?;
    Ok(BBox::from_limits((0.0, bb.max.x), bb.y_limits()))
}

fn defense(d: &Dims) -> Result<BBox> {
    let bb = full(d)?;
    Ok(BBox::from_limits((bb.min.x, 0.0), bb.y_limits()))
}

/// Behind the +x end line, between the sideline extensions
fn serving_zone(d: &Dims) -> Result<BBox> {
    let bb = full(d)?;
    let half_w = d.half("court_width")?;
    Ok(BBox::from_limits((d.half("court_length")?, bb.max.x), (-half_w, half_w)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Geometry;
    use crate::registry::{DimensionOverrides, load};

    #[test]
    fn attack_lines_are_three_meters_out() {
        let config = load(Sport::Volleyball, "fivb", &DimensionOverrides::new()).unwrap();
        let dims = Dims::new(&config.dimensions, "attack_line");
        let bb = attack_line(&dims).unwrap().bounds();
        assert!((bb.max.x - 3.0).abs() < 1e-12);
        assert!((bb.min.x + 3.0).abs() < 1e-12);
    }

    #[test]
    fn fivb_has_no_apron() {
        let config = load(Sport::Volleyball, "fivb", &DimensionOverrides::new()).unwrap();
        let dims = Dims::new(&config.dimensions, "full");
        let bb = full(&dims).unwrap();
        assert!((bb.width() - 31.0).abs() < 1e-12);
        assert!((bb.height() - 19.0).abs() < 1e-12);
    }

    #[test]
    fn service_marks_trail_end_lines() {
        let config = load(Sport::Volleyball, "ncaa", &DimensionOverrides::new()).unwrap();
        let dims = Dims::new(&config.dimensions, "service_zone_mark");
        let bb = service_zone_mark(&dims).unwrap().bounds();
        assert!((bb.max.x - (9.0 + 0.2 + 0.15)).abs() < 1e-12);
        assert!((bb.max.y - 4.5).abs() < 1e-12);
    }
}
