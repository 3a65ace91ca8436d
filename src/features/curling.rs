//! Curling sheets. The sheet runs along y; both ends are identical.

use glam::{DVec2, dvec2};

use super::{FeatureDef, RangeDef, SportTable, centered, circle, layers, rect, rect_between};
use crate::errors::Result;
use crate::geometry::{Flip, Primitive};
use crate::registry::{Dims, Sport};
use crate::style::StyleDef;
use crate::types::{BBox, Color};

const APRON: Color = Color::hex(0xa5acaf);
const ICE: Color = Color::hex(0xffffff);
const LINE: Color = Color::hex(0x000000);
const BLUE: Color = Color::hex(0x003087);
const RED: Color = Color::hex(0xc8102e);

const SHEET_LAYERS: &[Option<Color>] = &[Some(APRON), Some(ICE)];
const HOUSE_LAYERS: &[Option<Color>] = &[Some(BLUE), Some(ICE), Some(RED), Some(ICE)];

const EXTENT_X: super::Extent = &[(1.0, "sheet_width"), (2.0, "apron_along_side")];
const EXTENT_Y: super::Extent = &[(1.0, "sheet_length"), (2.0, "apron_behind_back")];

pub static TABLE: SportTable = SportTable {
    sport: Sport::Curling,
    features: &[
        FeatureDef { id: "sheet", z_order: 1, style: StyleDef::layered(SHEET_LAYERS), build: sheet },
        FeatureDef { id: "house", z_order: 5, style: StyleDef::layered(HOUSE_LAYERS), build: house },
        FeatureDef { id: "centre_line", z_order: 16, style: StyleDef::fill(LINE), build: centre_line },
        FeatureDef { id: "tee_line", z_order: 16, style: StyleDef::fill(LINE), build: tee_line },
        FeatureDef { id: "back_line", z_order: 16, style: StyleDef::fill(LINE), build: back_line },
        FeatureDef { id: "hog_line", z_order: 16, style: StyleDef::fill(RED), build: hog_line },
        FeatureDef { id: "courtesy_line", z_order: 16, style: StyleDef::fill(LINE), build: courtesy_line },
        FeatureDef { id: "hack", z_order: 17, style: StyleDef::fill(LINE), build: hack },
    ],
    ranges: &[
        RangeDef { name: "full", aliases: &["full sheet"], bounds: full },
        RangeDef { name: "house", aliases: &["scoring end"], bounds: house_range },
        RangeDef { name: "in play", aliases: &["playing area"], bounds: in_play },
    ],
    extent_x: EXTENT_X,
    extent_y: EXTENT_Y,
    surface,
    mirror_pairs: &[],
    mirrored_in_x: true,
};

fn surface(d: &Dims) -> Result<Primitive> {
    let bb = full(d)?;
    Ok(rect_between(bb.x_limits(), bb.y_limits()))
}

fn sheet(d: &Dims) -> Result<Primitive> {
    Ok(layers(vec![
        surface(d)?,
        rect(0.0, 0.0, d.get("sheet_width")?, d.get("sheet_length")?),
    ]))
}

fn tee(d: &Dims) -> Result<DVec2> {
    Ok(dvec2(0.0, d.get("tee_line_to_center")?))
}

/// Concentric rings around both tees, outermost first
fn house(d: &Dims) -> Result<Primitive> {
    let center = tee(d)?;
    let rings = [
        "house_outer_ring_radius",
        "house_middle_ring_radius",
        "house_inner_ring_radius",
        "button_radius",
    ];
    let mut parts = Vec::with_capacity(rings.len());
    for name in rings {
        parts.push(circle(center, d.get(name)?).with_mirror(Flip::Y));
    }
    Ok(layers(parts))
}

// ============================================================================
// Lines
// ============================================================================

/// A line across the full sheet width at `y` and its mirror at `-y`
fn cross_line(d: &Dims, y: f64, thickness: f64) -> Result<Primitive> {
    Ok(rect(0.0, y, d.get("sheet_width")?, thickness).with_mirror(Flip::Y))
}

fn tee_line(d: &Dims) -> Result<Primitive> {
    cross_line(d, tee(d)?.y, d.get("tee_line_thickness")?)
}

fn back_line(d: &Dims) -> Result<Primitive> {
    let y = tee(d)?.y + d.get("back_line_to_tee_line")?;
    cross_line(d, y, d.get("back_line_thickness")?)
}

fn hog_line(d: &Dims) -> Result<Primitive> {
    let y = tee(d)?.y - d.get("hog_line_to_tee_line")?;
    cross_line(d, y, d.get("hog_line_thickness")?)
}

fn centre_line(d: &Dims) -> Result<Primitive> {
    let reach = tee(d)?.y + d.get("centre_line_extension")?;
    Ok(rect(0.0, 0.0, d.get("centre_line_thickness")?, 2.0 * reach))
}

/// Short marks on both side lines beyond each hog line
fn courtesy_line(d: &Dims) -> Result<Primitive> {
    let len = d.get("courtesy_line_length")?;
    let x = d.half("sheet_width")? - len / 2.0;
    let y = tee(d)?.y - d.get("hog_line_to_tee_line")? - d.get("courtesy_line_to_hog_line")?;
    Ok(rect(x, y, len, d.get("tee_line_thickness")?).with_quadrants())
}

fn hack(d: &Dims) -> Result<Primitive> {
    let width = d.get("hack_foothold_width")?;
    let depth = d.get("hack_foothold_depth")?;
    let x = d.half("hack_foothold_gap")? + width / 2.0;
    let y = tee(d)?.y + d.get("centre_line_extension")? + depth / 2.0;
    Ok(rect(x, y, width, depth).with_quadrants())
}

// ============================================================================
// Display ranges
// ============================================================================

fn full(d: &Dims) -> Result<BBox> {
    centered(d, EXTENT_X, EXTENT_Y)
}

/// From the hog line to the end of the sheet
fn house_range(d: &Dims) -> Result<BBox> {
    let bb = full(d)?;
    let hog = tee(d)?.y - d.get("hog_line_to_tee_line")?;
    Ok(BBox::from_limits(bb.x_limits(), (hog, bb.max.y)))
}

/// Between the back lines
fn in_play(d: &Dims) -> Result<BBox> {
    let back = tee(d)?.y + d.get("back_line_to_tee_line")?;
    let half_w = d.half("sheet_width")?;
    Ok(BBox::from_limits((-half_w, half_w), (-back, back)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Geometry;
    use crate::registry::{DimensionOverrides, load};

    #[test]
    fn house_rings_are_nested() {
        let config = load(Sport::Curling, "wcf", &DimensionOverrides::new()).unwrap();
        let dims = Dims::new(&config.dimensions, "house");
        let Primitive::Group(rings) = house(&dims).unwrap() else {
            panic!("expected group");
        };
        let heights: Vec<f64> = rings.children.iter().map(|r| r.bounds().max.y).collect();
        assert_eq!(heights.len(), 4);
        assert!((heights[0] - 63.0).abs() < 1e-9);
        assert!(heights.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn hack_sits_behind_back_line() {
        let config = load(Sport::Curling, "wcf", &DimensionOverrides::new()).unwrap();
        let dims = Dims::new(&config.dimensions, "hack");
        let bb = hack(&dims).unwrap().bounds();
        assert!((bb.max.y - (69.0 + 0.6667)).abs() < 1e-9);
        assert!((bb.max.x - 0.75).abs() < 1e-9);
    }

    #[test]
    fn sheet_is_vertical() {
        let config = load(Sport::Curling, "wcf", &DimensionOverrides::new()).unwrap();
        let dims = Dims::new(&config.dimensions, "full");
        let bb = full(&dims).unwrap();
        assert!(bb.height() > bb.width());
        assert!((bb.height() - 153.0).abs() < 1e-9);
    }
}
