//! Association football pitches

use std::f64::consts::{FRAC_PI_2, PI};

use glam::{DVec2, dvec2};

use super::{FeatureDef, RangeDef, SportTable, centered, circle, rect, rect_between};
use crate::errors::Result;
use crate::geometry::{ArcShape, Flip, Geometry, Primitive};
use crate::registry::{Dims, Sport};
use crate::style::StyleDef;
use crate::types::{BBox, Color};

const GRASS: Color = Color::hex(0x195f0c);
const WHITE: Color = Color::hex(0xffffff);
const NET: Color = Color::hex_alpha(0xa5acaf4d);

// The apron runs behind the goals
const EXTENT_X: super::Extent = &[
    (1.0, "pitch_length"),
    (2.0, "goal_depth"),
    (2.0, "pitch_apron_goal_line"),
];
const EXTENT_Y: super::Extent = &[(1.0, "pitch_width"), (2.0, "pitch_apron_touchline")];

pub static TABLE: SportTable = SportTable {
    sport: Sport::Soccer,
    features: &[
        FeatureDef { id: "pitch_apron", z_order: 1, style: StyleDef::fill(GRASS), build: pitch_apron },
        FeatureDef { id: "offensive_half", z_order: 2, style: StyleDef::fill(GRASS), build: offensive_half },
        FeatureDef { id: "defensive_half", z_order: 2, style: StyleDef::fill(GRASS), build: defensive_half },
        FeatureDef { id: "touchline", z_order: 16, style: StyleDef::fill(WHITE), build: touchline },
        FeatureDef { id: "goal_line", z_order: 16, style: StyleDef::fill(WHITE), build: goal_line },
        FeatureDef { id: "halfway_line", z_order: 16, style: StyleDef::fill(WHITE), build: halfway_line },
        FeatureDef { id: "center_circle", z_order: 16, style: StyleDef::stroke(WHITE), build: center_circle },
        FeatureDef { id: "penalty_box", z_order: 16, style: StyleDef::stroke(WHITE), build: penalty_box },
        FeatureDef { id: "goal_box", z_order: 16, style: StyleDef::stroke(WHITE), build: goal_box },
        FeatureDef { id: "penalty_arc", z_order: 16, style: StyleDef::stroke(WHITE), build: penalty_arc },
        FeatureDef { id: "corner_arc", z_order: 16, style: StyleDef::stroke(WHITE), build: corner_arc },
        FeatureDef { id: "center_mark", z_order: 17, style: StyleDef::fill(WHITE), build: center_mark },
        FeatureDef { id: "penalty_mark", z_order: 17, style: StyleDef::fill(WHITE), build: penalty_mark },
        FeatureDef { id: "goal", z_order: 18, style: StyleDef::outlined(NET, WHITE), build: goal },
    ],
    ranges: &[
        RangeDef { name: "full", aliases: &["full pitch"], bounds: full },
        RangeDef { name: "in bounds only", aliases: &["in bounds", "field of play"], bounds: in_bounds },
        RangeDef { name: "offense", aliases: &["offence", "offensive half", "attacking half"], bounds: offense },
        RangeDef { name: "defense", aliases: &["defence", "defensive half"], bounds: defense },
        RangeDef { name: "offensive penalty box", aliases: &["offensive box", "attacking penalty area"], bounds: offensive_penalty_box },
        RangeDef { name: "defensive penalty box", aliases: &["defensive box", "defending penalty area"], bounds: defensive_penalty_box },
    ],
    extent_x: EXTENT_X,
    extent_y: EXTENT_Y,
    surface: pitch_apron,
    mirror_pairs: &[("offensive_half", "defensive_half")],
    mirrored_in_x: true,
};

fn pitch_apron(d: &Dims) -> Result<Primitive> {
    let bb = full(d)?;
    Ok(rect_between(bb.x_limits(), bb.y_limits()))
}

fn offensive_half(d: &Dims) -> Result<Primitive> {
    let half_w = d.half("pitch_width")?;
    Ok(rect_between((0.0, d.half("pitch_length")?), (-half_w, half_w)))
}

fn defensive_half(d: &Dims) -> Result<Primitive> {
    Ok(offensive_half(d)?.mirrored(Flip::X))
}

// ============================================================================
// Lines
// ============================================================================

fn touchline(d: &Dims) -> Result<Primitive> {
    let t = d.get("line_thickness")?;
    let y = d.half("pitch_width")? - t / 2.0;
    Ok(rect(0.0, y, d.get("pitch_length")?, t).with_mirror(Flip::Y))
}

fn goal_line(d: &Dims) -> Result<Primitive> {
    let t = d.get("line_thickness")?;
    let x = d.half("pitch_length")? - t / 2.0;
    Ok(rect(x, 0.0, t, d.get("pitch_width")?).with_mirror(Flip::X))
}

fn halfway_line(d: &Dims) -> Result<Primitive> {
    Ok(rect(0.0, 0.0, d.get("line_thickness")?, d.get("pitch_width")?))
}

fn center_circle(d: &Dims) -> Result<Primitive> {
    Ok(circle(DVec2::ZERO, d.get("center_circle_radius")?))
}

fn center_mark(d: &Dims) -> Result<Primitive> {
    Ok(circle(DVec2::ZERO, d.get("center_mark_radius")?))
}

fn corner_arc(d: &Dims) -> Result<Primitive> {
    let corner = dvec2(d.half("pitch_length")?, d.half("pitch_width")?);
    let arc = ArcShape::new(corner, d.get("corner_arc_radius")?, PI, PI + FRAC_PI_2);
    Ok(Primitive::from(arc).with_quadrants())
}

// ============================================================================
// Goal areas
// ============================================================================

/// Box in front of the right-hand goal reaching `length` up the pitch and
/// `beyond_post` past each goal post
fn goal_area(d: &Dims, length: f64, beyond_post: f64) -> Result<Primitive> {
    let goal = d.half("pitch_length")?;
    let half_w = d.half("goal_width")? + beyond_post;
    Ok(rect_between((goal - length, goal), (-half_w, half_w)).with_mirror(Flip::X))
}

fn penalty_box(d: &Dims) -> Result<Primitive> {
    goal_area(
        d,
        d.get("penalty_box_length")?,
        d.get("interior_of_goal_post_to_penalty_box")?,
    )
}

fn goal_box(d: &Dims) -> Result<Primitive> {
    goal_area(
        d,
        d.get("goal_box_length")?,
        d.get("interior_of_goal_post_to_goal_box")?,
    )
}

fn penalty_spot(d: &Dims) -> Result<DVec2> {
    Ok(dvec2(d.half("pitch_length")? - d.get("penalty_mark_dist")?, 0.0))
}

fn penalty_mark(d: &Dims) -> Result<Primitive> {
    Ok(circle(penalty_spot(d)?, d.get("penalty_mark_radius")?).with_mirror(Flip::X))
}

/// The part of the penalty circle outside the penalty box
fn penalty_arc(d: &Dims) -> Result<Primitive> {
    let spot = penalty_spot(d)?;
    let r = d.get("penalty_circle_radius")?;
    let to_box = d.get("penalty_box_length")? - d.get("penalty_mark_dist")?;
    let phi = if r > 0.0 { (to_box / r).min(1.0).acos() } else { 0.0 };
    let arc = ArcShape::new(spot, r, PI - phi, PI + phi);
    Ok(Primitive::from(arc).with_mirror(Flip::X))
}

fn goal(d: &Dims) -> Result<Primitive> {
    let line = d.half("pitch_length")?;
    let half_w = d.half("goal_width")?;
    let net = rect_between((line, line + d.get("goal_depth")?), (-half_w, half_w));
    Ok(net.with_mirror(Flip::X))
}

// ============================================================================
// Display ranges
// ============================================================================

fn full(d: &Dims) -> Result<BBox> {
    centered(d, EXTENT_X, EXTENT_Y)
}

fn in_bounds(d: &Dims) -> Result<BBox> {
    let (half_l, half_w) = (d.half("pitch_length")?, d.half("pitch_width")?);
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

fn offensive_penalty_box(d: &Dims) -> Result<BBox> {
    let line = d.half("pitch_length")?;
    let front = (line - d.get("penalty_box_length")?)
        .min(penalty_spot(d)?.x - d.get("penalty_circle_radius")?);
    let back = line + d.get("goal_depth")?;
    let half_w = d.half("goal_width")? + d.get("interior_of_goal_post_to_penalty_box")?;
    Ok(BBox::from_limits((front, back), (-half_w, half_w)))
}

fn defensive_penalty_box(d: &Dims) -> Result<BBox> {
    let bb = offensive_penalty_box(d)?;
    Ok(BBox::from_limits((-bb.max.x, -bb.min.x), bb.y_limits()))
}
