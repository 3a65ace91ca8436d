//! Basketball courts

use std::f64::consts::{FRAC_PI_2, PI};

use glam::{DVec2, dvec2};

use super::{
    FeatureDef, RangeDef, SportTable, centered, circle, layers, rect, rect_between, segment,
};
use crate::errors::Result;
use crate::geometry::{ArcShape, Flip, Geometry, Primitive};
use crate::registry::{Dims, Sport};
use crate::style::StyleDef;
use crate::types::{BBox, Color};

const WOOD: Color = Color::hex(0xd2ab6f);
const LINE: Color = Color::hex(0x000000);
const RING: Color = Color::hex(0xff671f);

const CENTER_CIRCLE_LAYERS: &[Option<Color>] = &[Some(LINE), Some(WOOD)];
const FREE_THROW_LAYERS: &[Option<Color>] = &[Some(LINE), Some(WOOD)];

const EXTENT_X: super::Extent = &[(1.0, "court_length"), (2.0, "court_apron_endline")];
const EXTENT_Y: super::Extent = &[(1.0, "court_width"), (2.0, "court_apron_sideline")];

pub static TABLE: SportTable = SportTable {
    sport: Sport::Basketball,
    features: &[
        FeatureDef { id: "court_apron", z_order: 1, style: StyleDef::fill(WOOD), build: court_apron },
        FeatureDef { id: "offensive_half_court", z_order: 2, style: StyleDef::fill(WOOD), build: offensive_half_court },
        FeatureDef { id: "defensive_half_court", z_order: 2, style: StyleDef::fill(WOOD), build: defensive_half_court },
        FeatureDef { id: "painted_area", z_order: 10, style: StyleDef::outlined(WOOD, LINE), build: painted_area },
        FeatureDef { id: "center_circle", z_order: 15, style: StyleDef::layered(CENTER_CIRCLE_LAYERS), build: center_circle },
        FeatureDef { id: "free_throw_circle", z_order: 15, style: StyleDef::layered(FREE_THROW_LAYERS), build: free_throw_circle },
        FeatureDef { id: "endline", z_order: 16, style: StyleDef::fill(LINE), build: endline },
        FeatureDef { id: "sideline", z_order: 16, style: StyleDef::fill(LINE), build: sideline },
        FeatureDef { id: "division_line", z_order: 16, style: StyleDef::fill(LINE), build: division_line },
        FeatureDef { id: "center_circle_inner", z_order: 16, style: StyleDef::stroke(LINE), build: center_circle_inner },
        FeatureDef { id: "three_point_line", z_order: 16, style: StyleDef::stroke(LINE), build: three_point_line },
        FeatureDef { id: "restricted_arc", z_order: 16, style: StyleDef::stroke(LINE), build: restricted_arc },
        FeatureDef { id: "substitution_line", z_order: 16, style: StyleDef::stroke(LINE), build: substitution_line },
        FeatureDef { id: "backboard", z_order: 17, style: StyleDef::fill(LINE), build: backboard },
        FeatureDef { id: "basket_ring", z_order: 18, style: StyleDef::stroke(RING), build: basket_ring },
    ],
    ranges: &[
        RangeDef { name: "full", aliases: &["full court"], bounds: full },
        RangeDef { name: "offense", aliases: &["offensive half", "offensive half court"], bounds: offense },
        RangeDef { name: "defense", aliases: &["defensive half", "defensive half court"], bounds: defense },
        RangeDef { name: "offensive key", aliases: &["offensive three point range"], bounds: offensive_key },
        RangeDef { name: "defensive key", aliases: &["defensive three point range"], bounds: defensive_key },
        RangeDef { name: "offensive paint", aliases: &["offensive lane"], bounds: offensive_paint },
        RangeDef { name: "defensive paint", aliases: &["defensive lane"], bounds: defensive_paint },
    ],
    extent_x: EXTENT_X,
    extent_y: EXTENT_Y,
    surface,
    mirror_pairs: &[("offensive_half_court", "defensive_half_court")],
    mirrored_in_x: true,
};

fn surface(d: &Dims) -> Result<Primitive> {
    let bb = full(d)?;
    Ok(rect_between(bb.x_limits(), bb.y_limits()))
}

fn court_apron(d: &Dims) -> Result<Primitive> {
    surface(d)
}

fn offensive_half_court(d: &Dims) -> Result<Primitive> {
    let half_l = d.half("court_length")?;
    let half_w = d.half("court_width")?;
    Ok(rect_between((0.0, half_l), (-half_w, half_w)))
}

fn defensive_half_court(d: &Dims) -> Result<Primitive> {
    Ok(offensive_half_court(d)?.mirrored(Flip::X))
}

// ============================================================================
// Boundary lines
// ============================================================================

fn endline(d: &Dims) -> Result<Primitive> {
    let t = d.get("line_thickness")?;
    let x = d.half("court_length")? - t / 2.0;
    Ok(rect(x, 0.0, t, d.get("court_width")?).with_mirror(Flip::X))
}

fn sideline(d: &Dims) -> Result<Primitive> {
    let t = d.get("line_thickness")?;
    let y = d.half("court_width")? - t / 2.0;
    Ok(rect(0.0, y, d.get("court_length")?, t).with_mirror(Flip::Y))
}

fn division_line(d: &Dims) -> Result<Primitive> {
    Ok(rect(0.0, 0.0, d.get("line_thickness")?, d.get("court_width")?))
}

fn substitution_line(d: &Dims) -> Result<Primitive> {
    let x = d.half("court_length")? - d.get("substitution_line_to_baseline")?;
    let y = d.half("court_width")?;
    let len = d.get("substitution_line_length")?;
    Ok(segment(dvec2(x, y), dvec2(x, y + len)).with_mirror(Flip::X))
}

// ============================================================================
// Center circle
// ============================================================================

fn center_circle(d: &Dims) -> Result<Primitive> {
    let r = d.get("center_circle_radius")?;
    let t = d.get("line_thickness")?;
    Ok(layers(vec![
        circle(DVec2::ZERO, r),
        circle(DVec2::ZERO, (r - t).max(0.0)),
    ]))
}

fn center_circle_inner(d: &Dims) -> Result<Primitive> {
    Ok(circle(DVec2::ZERO, d.get("center_circle_inner_radius")?))
}

// ============================================================================
// Basket area
// ============================================================================

/// Center of the right-hand basket
fn basket(d: &Dims) -> Result<DVec2> {
    Ok(dvec2(
        d.half("court_length")? - d.get("basket_center_to_baseline")?,
        0.0,
    ))
}

fn three_point_line(d: &Dims) -> Result<Primitive> {
    let b = basket(d)?;
    let baseline = d.half("court_length")?;
    let r = d.get("basket_center_to_three_point_arc")?;
    let corner = d.get("basket_center_to_corner_three")?;
    // Corner lines run straight until they meet the arc
    let phi = (corner / r).min(1.0).asin();
    let join = b.x - r * phi.cos();
    let right = Primitive::group(vec![
        segment(dvec2(baseline, corner), dvec2(join, corner)),
        ArcShape::new(b, r, PI - phi, PI + phi).into(),
        segment(dvec2(join, -corner), dvec2(baseline, -corner)),
    ]);
    Ok(right.with_mirror(Flip::X))
}

fn painted_area(d: &Dims) -> Result<Primitive> {
    let baseline = d.half("court_length")?;
    let half_w = d.half("lane_width")?;
    let lane = rect_between((baseline - d.get("lane_length")?, baseline), (-half_w, half_w));
    Ok(lane.with_mirror(Flip::X))
}

fn free_throw_circle(d: &Dims) -> Result<Primitive> {
    let center = dvec2(d.half("court_length")? - d.get("lane_length")?, 0.0);
    let r = d.get("free_throw_circle_radius")?;
    let t = d.get("line_thickness")?;
    Ok(layers(vec![
        circle(center, r).with_mirror(Flip::X),
        circle(center, (r - t).max(0.0)).with_mirror(Flip::X),
    ]))
}

fn restricted_arc(d: &Dims) -> Result<Primitive> {
    let arc = ArcShape::new(
        basket(d)?,
        d.get("restricted_arc_radius")?,
        FRAC_PI_2,
        3.0 * FRAC_PI_2,
    );
    Ok(Primitive::from(arc).with_mirror(Flip::X))
}

fn backboard(d: &Dims) -> Result<Primitive> {
    let thickness = d.get("backboard_thickness")?;
    let x = d.half("court_length")? - d.get("backboard_face_to_baseline")? + thickness / 2.0;
    Ok(rect(x, 0.0, thickness, d.get("backboard_width")?).with_mirror(Flip::X))
}

fn basket_ring(d: &Dims) -> Result<Primitive> {
    Ok(circle(basket(d)?, d.get("basket_ring_inner_radius")?).with_mirror(Flip::X))
}

// ============================================================================
// Display ranges
// ============================================================================

fn full(d: &Dims) -> Result<BBox> {
    centered(d, EXTENT_X, EXTENT_Y)
}

fn offense(d: &Dims) -> Result<BBox> {
    let bb = full(d)?;
    Ok(BBox::from_limits((0.0, bb.max.x), bb.y_limits()))
}

fn defense(d: &Dims) -> Result<BBox> {
    let bb = full(d)?;
    Ok(BBox::from_limits((bb.min.x, 0.0), bb.y_limits()))
}

fn offensive_key(d: &Dims) -> Result<BBox> {
    let baseline = d.half("court_length")?;
    let reach = d.get("basket_center_to_baseline")? + d.get("basket_center_to_three_point_arc")?;
    let half_w = d.half("court_width")?;
    Ok(BBox::from_limits((baseline - reach, baseline), (-half_w, half_w)))
}

fn defensive_key(d: &Dims) -> Result<BBox> {
    let bb = offensive_key(d)?;
    Ok(BBox::from_limits((-bb.max.x, -bb.min.x), bb.y_limits()))
}

fn offensive_paint(d: &Dims) -> Result<BBox> {
    let baseline = d.half("court_length")?;
    let half_w = d.half("lane_width")?;
    Ok(BBox::from_limits((baseline - d.get("lane_length")?, baseline), (-half_w, half_w)))
}

fn defensive_paint(d: &Dims) -> Result<BBox> {
    let bb = offensive_paint(d)?;
    Ok(BBox::from_limits((-bb.max.x, -bb.min.x), bb.y_limits()))
}
