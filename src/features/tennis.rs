//! Tennis courts

use glam::dvec2;

use super::{FeatureDef, RangeDef, SportTable, centered, rect, rect_between, segment};
use crate::errors::Result;
use crate::geometry::{Flip, Primitive};
use crate::registry::{Dims, Sport};
use crate::style::StyleDef;
use crate::types::{BBox, Color};

const APRON: Color = Color::hex(0x395d33);
const COURT: Color = Color::hex(0x3c638e);
const LINE: Color = Color::hex(0xffffff);
const NET: Color = Color::hex(0x000000);

const EXTENT_X: super::Extent = &[(1.0, "court_length"), (2.0, "backstop_distance")];
const EXTENT_Y: super::Extent = &[(1.0, "doubles_width"), (2.0, "sidestop_distance")];

pub static TABLE: SportTable = SportTable {
    sport: Sport::Tennis,
    features: &[
        FeatureDef { id: "court_apron", z_order: 1, style: StyleDef::fill(APRON), build: court_apron },
        FeatureDef { id: "court", z_order: 2, style: StyleDef::fill(COURT), build: court },
        FeatureDef { id: "baseline", z_order: 16, style: StyleDef::fill(LINE), build: baseline },
        FeatureDef { id: "singles_sideline", z_order: 16, style: StyleDef::fill(LINE), build: singles_sideline },
        FeatureDef { id: "doubles_sideline", z_order: 16, style: StyleDef::fill(LINE), build: doubles_sideline },
        FeatureDef { id: "serviceline", z_order: 16, style: StyleDef::fill(LINE), build: serviceline },
        FeatureDef { id: "center_serviceline", z_order: 16, style: StyleDef::fill(LINE), build: center_serviceline },
        FeatureDef { id: "center_mark", z_order: 16, style: StyleDef::fill(LINE), build: center_mark },
        FeatureDef { id: "net", z_order: 17, style: StyleDef::stroke(NET), build: net },
    ],
    ranges: &[
        RangeDef { name: "full", aliases: &["full court"], bounds: full },
        RangeDef { name: "in bounds only", aliases: &["in bounds"], bounds: in_bounds },
        RangeDef { name: "serve", aliases: &["server", "serving side"], bounds: serve },
        RangeDef { name: "receive", aliases: &["receiver", "receiving side"], bounds: receive },
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

fn court(d: &Dims) -> Result<Primitive> {
    Ok(rect(0.0, 0.0, d.get("court_length")?, d.get("doubles_width")?))
}

fn baseline(d: &Dims) -> Result<Primitive> {
    let t = d.get("line_thickness")?;
    let x = d.half("court_length")? - t / 2.0;
    Ok(rect(x, 0.0, t, d.get("doubles_width")?).with_mirror(Flip::X))
}

fn sideline(d: &Dims, width: &'static str) -> Result<Primitive> {
    let t = d.get("line_thickness")?;
    let y = d.half(width)? - t / 2.0;
    Ok(rect(0.0, y, d.get("court_length")?, t).with_mirror(Flip::Y))
}

fn singles_sideline(d: &Dims) -> Result<Primitive> {
    sideline(d, "singles_width")
}

fn doubles_sideline(d: &Dims) -> Result<Primitive> {
    sideline(d, "doubles_width")
}

/// Runs between the singles sidelines with its outer edge at the service
/// line distance
fn serviceline(d: &Dims) -> Result<Primitive> {
    let t = d.get("line_thickness")?;
    let x = d.get("serviceline_distance")? - t / 2.0;
    Ok(rect(x, 0.0, t, d.get("singles_width")?).with_mirror(Flip::X))
}

fn center_serviceline(d: &Dims) -> Result<Primitive> {
    let length = 2.0 * d.get("serviceline_distance")?;
    Ok(rect(0.0, 0.0, length, d.get("line_thickness")?))
}

fn center_mark(d: &Dims) -> Result<Primitive> {
    let length = d.get("center_mark_length")?;
    let x = d.half("court_length")? - length / 2.0;
    Ok(rect(x, 0.0, length, d.get("line_thickness")?).with_mirror(Flip::X))
}

fn net(d: &Dims) -> Result<Primitive> {
    let half = d.half("net_length")?;
    Ok(segment(dvec2(0.0, -half), dvec2(0.0, half)))
}

// ============================================================================
// Display ranges
// ============================================================================

fn full(d: &Dims) -> Result<BBox> {
    centered(d, EXTENT_X, EXTENT_Y)
}

fn in_bounds(d: &Dims) -> Result<BBox> {
    let (half_l, half_w) = (d.half("court_length")?, d.half("doubles_width")?);
    Ok(BBox::from_limits((-half_l, half_l), (-half_w, half_w)))
}

/// The server's half, on the -x side of the net
fn serve(d: &Dims) -> Result<BBox> {
    let bb = full(d)?;
    Ok(BBox::from_limits((bb.min.x, 0.0), bb.y_limits()))
}

fn receive(d: &Dims) -> Result<BBox> {
    let bb = full(d)?;
    Ok(BBox::from_limits((0.0, bb.max.x), bb.y_limits()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Geometry;
    use crate::registry::{DimensionOverrides, load};

    #[test]
    fn service_boxes_sit_inside_singles_court() {
        let config = load(Sport::Tennis, "itf", &DimensionOverrides::new()).unwrap();
        let dims = Dims::new(&config.dimensions, "serviceline");
        let bb = serviceline(&dims).unwrap().bounds();
        assert!((bb.max.x - 21.0).abs() < 1e-12);
        assert!((bb.height() - 27.0).abs() < 1e-12);
    }

    #[test]
    fn net_overhangs_doubles_court() {
        let config = load(Sport::Tennis, "itf", &DimensionOverrides::new()).unwrap();
        let dims = Dims::new(&config.dimensions, "net");
        let bb = net(&dims).unwrap().bounds();
        assert!((bb.height() - 42.0).abs() < 1e-12);
        assert!(bb.height() > 36.0);
    }

    #[test]
    fn college_courts_have_narrower_sides() {
        let itf = load(Sport::Tennis, "itf", &DimensionOverrides::new()).unwrap();
        let ncaa = load(Sport::Tennis, "ncaa", &DimensionOverrides::new()).unwrap();
        let wide = full(&Dims::new(&itf.dimensions, "full")).unwrap();
        let narrow = full(&Dims::new(&ncaa.dimensions, "full")).unwrap();
        assert!((wide.height() - 60.0).abs() < 1e-12);
        assert!((narrow.height() - 56.0).abs() < 1e-12);
        assert!((wide.width() - narrow.width()).abs() < 1e-12);
    }
}
