//! Ice hockey rinks

use std::f64::consts::PI;

use glam::{DVec2, dvec2};

use super::{FeatureDef, RangeDef, SportTable, centered, circle, layers, rect, segment};
use crate::errors::Result;
use crate::geometry::{
    ArcShape, Flip, Geometry, PolygonShape, Primitive, RectShape, Transform, arc_vertices,
};
use crate::registry::{Dims, Sport};
use crate::style::StyleDef;
use crate::types::{BBox, Color};

const BOARDS: Color = Color::hex(0x000000);
const ICE: Color = Color::hex(0xffffff);
const RED: Color = Color::hex(0xc8102e);
const BLUE: Color = Color::hex(0x0033a0);
const CREASE_FILL: Color = Color::hex(0x41b6e6);
const GOAL_FILL: Color = Color::hex_alpha(0xa5acaf4d);
const OFFICIALS: Color = Color::hex(0xa5acaf);

const BOARD_LAYERS: &[Option<Color>] = &[Some(BOARDS), Some(ICE)];
const CREASE_LAYERS: &[Option<Color>] = &[Some(RED), Some(CREASE_FILL)];
const GOAL_LAYERS: &[Option<Color>] = &[Some(RED), Some(GOAL_FILL)];

const EXTENT_X: super::Extent = &[(1.0, "rink_length")];
const EXTENT_Y: super::Extent = &[(1.0, "rink_width")];

pub static TABLE: SportTable = SportTable {
    sport: Sport::Hockey,
    features: &[
        FeatureDef { id: "boards", z_order: 1, style: StyleDef::layered(BOARD_LAYERS), build: boards },
        FeatureDef { id: "team_a_bench", z_order: 2, style: StyleDef::outlined(ICE, BOARDS), build: team_a_bench },
        FeatureDef { id: "team_b_bench", z_order: 2, style: StyleDef::outlined(ICE, BOARDS), build: team_b_bench },
        FeatureDef { id: "team_a_penalty_box", z_order: 2, style: StyleDef::outlined(ICE, BOARDS), build: team_a_penalty_box },
        FeatureDef { id: "team_b_penalty_box", z_order: 2, style: StyleDef::outlined(ICE, BOARDS), build: team_b_penalty_box },
        FeatureDef { id: "off_ice_officials_box", z_order: 2, style: StyleDef::outlined(OFFICIALS, BOARDS), build: off_ice_officials_box },
        FeatureDef { id: "goal_crease", z_order: 15, style: StyleDef::layered(CREASE_LAYERS), build: goal_crease },
        FeatureDef { id: "center_line", z_order: 16, style: StyleDef::fill(RED), build: center_line },
        FeatureDef { id: "zone_line", z_order: 16, style: StyleDef::fill(BLUE), build: zone_line },
        FeatureDef { id: "goal_line", z_order: 16, style: StyleDef::fill(RED), build: goal_line },
        FeatureDef { id: "restricted_trapezoid", z_order: 16, style: StyleDef::stroke(RED), build: restricted_trapezoid },
        FeatureDef { id: "referee_crease", z_order: 16, style: StyleDef::stroke(RED), build: referee_crease },
        FeatureDef { id: "center_faceoff_circle", z_order: 16, style: StyleDef::stroke(BLUE), build: center_faceoff_circle },
        FeatureDef { id: "odzone_faceoff_circle", z_order: 16, style: StyleDef::stroke(RED), build: odzone_faceoff_circle },
        FeatureDef { id: "faceoff_line", z_order: 17, style: StyleDef::stroke(RED), build: faceoff_line },
        FeatureDef { id: "center_faceoff_spot", z_order: 17, style: StyleDef::fill(BLUE), build: center_faceoff_spot },
        FeatureDef { id: "faceoff_spot", z_order: 17, style: StyleDef::fill(RED), build: faceoff_spot },
        FeatureDef { id: "goal_frame", z_order: 18, style: StyleDef::layered(GOAL_LAYERS), build: goal_frame },
    ],
    ranges: &[
        RangeDef { name: "full", aliases: &["full rink"], bounds: full },
        RangeDef { name: "offense", aliases: &["offensive half", "half"], bounds: offense },
        RangeDef { name: "defense", aliases: &["defensive half"], bounds: defense },
        RangeDef { name: "ozone", aliases: &["offensive zone", "attacking zone"], bounds: ozone },
        RangeDef { name: "nzone", aliases: &["neutral zone"], bounds: nzone },
        RangeDef { name: "dzone", aliases: &["defensive zone"], bounds: dzone },
    ],
    extent_x: EXTENT_X,
    extent_y: EXTENT_Y,
    surface: rink,
    mirror_pairs: &[
        ("team_a_bench", "team_b_bench"),
        ("team_a_penalty_box", "team_b_penalty_box"),
    ],
    mirrored_in_x: true,
};

// ============================================================================
// Rink outline
// ============================================================================

fn ice_surface(d: &Dims) -> Result<RectShape> {
    let (l, w, r) = (d.get("rink_length")?, d.get("rink_width")?, d.get("corner_radius")?);
    Ok(RectShape::new(DVec2::ZERO, l, w).with_corner_radius(r))
}

fn rink(d: &Dims) -> Result<Primitive> {
    Ok(ice_surface(d)?.into())
}

fn boards(d: &Dims) -> Result<Primitive> {
    let t = d.get("board_thickness")?;
    let ice = ice_surface(d)?;
    let outer = RectShape::new(DVec2::ZERO, ice.width + 2.0 * t, ice.height + 2.0 * t)
        .with_corner_radius(ice.corner_radius + t);
    Ok(layers(vec![outer.into(), ice.into()]))
}

// ============================================================================
// Lines
// ============================================================================

fn center_line(d: &Dims) -> Result<Primitive> {
    Ok(rect(0.0, 0.0, d.get("major_line_thickness")?, d.get("rink_width")?))
}

fn zone_line(d: &Dims) -> Result<Primitive> {
    let t = d.get("major_line_thickness")?;
    let x = d.half("nzone_length")? + t / 2.0;
    Ok(rect(x, 0.0, t, d.get("rink_width")?).with_mirror(Flip::X))
}

fn goal_line_x(d: &Dims) -> Result<f64> {
    Ok(d.half("rink_length")? - d.get("goal_line_to_boards")?)
}

fn goal_line(d: &Dims) -> Result<Primitive> {
    let half_w = d.half("rink_width")?;
    let r = d.get("corner_radius")?;
    let from_end = d.get("goal_line_to_boards")?;
    // The line stops where it meets the rounded corner
    let inset = if from_end < r {
        r - (r * r - (r - from_end).powi(2)).max(0.0).sqrt()
    } else {
        0.0
    };
    let height = (2.0 * (half_w - inset)).max(0.0);
    Ok(rect(goal_line_x(d)?, 0.0, d.get("minor_line_thickness")?, height).with_mirror(Flip::X))
}

fn restricted_trapezoid(d: &Dims) -> Result<Primitive> {
    let gx = goal_line_x(d)?;
    let end = d.half("rink_length")?;
    let short = d.half("short_base_width")?;
    let long = d.half("long_base_width")?;
    let trapezoid = PolygonShape::new(vec![
        dvec2(gx, -short),
        dvec2(end, -long),
        dvec2(end, long),
        dvec2(gx, short),
    ]);
    Ok(Primitive::from(trapezoid).with_mirror(Flip::X))
}

// ============================================================================
// Goal area
// ============================================================================

/// Crease in front of the right-hand goal: straight sides meeting an arc
/// centered on the goal line.
fn crease(gx: f64, half_width: f64, radius: f64) -> Primitive {
    let phi = (half_width / radius).min(1.0).asin();
    let mut vertices = vec![dvec2(gx, half_width)];
    vertices.extend(arc_vertices(dvec2(gx, 0.0), radius, PI - phi, PI + phi, 24));
    vertices.push(dvec2(gx, -half_width));
    PolygonShape::new(vertices).into()
}

fn goal_crease(d: &Dims) -> Result<Primitive> {
    let gx = goal_line_x(d)?;
    let hw = d.half("goal_crease_width")?;
    let r = d.get("goal_crease_radius")?;
    let t = d.get("minor_line_thickness")?;
    Ok(layers(vec![
        crease(gx, hw, r).with_mirror(Flip::X),
        crease(gx, (hw - t).max(0.0), (r - t).max(0.0)).with_mirror(Flip::X),
    ]))
}

fn goal_frame(d: &Dims) -> Result<Primitive> {
    let gx = goal_line_x(d)?;
    let mouth = d.half("goal_mouth_width")?;
    let back = d.half("goal_back_width")?;
    let depth = d.get("goal_depth")?;
    let post = d.get("goal_post_diameter")?;

    let frame = |inset: f64| -> Primitive {
        let (m, b) = ((mouth - inset).max(0.0), (back - inset).max(0.0));
        PolygonShape::new(vec![
            dvec2(gx + inset, -m),
            dvec2(gx + depth - inset, -b),
            dvec2(gx + depth - inset, b),
            dvec2(gx + inset, m),
        ])
        .into()
    };

    Ok(layers(vec![
        frame(0.0).with_mirror(Flip::X),
        frame(post).with_mirror(Flip::X),
    ]))
}

fn referee_crease(d: &Dims) -> Result<Primitive> {
    let center = dvec2(0.0, -d.half("rink_width")?);
    Ok(ArcShape::new(center, d.get("referee_crease_radius")?, 0.0, PI).into())
}

// ============================================================================
// Faceoff markings
// ============================================================================

fn center_faceoff_circle(d: &Dims) -> Result<Primitive> {
    Ok(circle(DVec2::ZERO, d.get("faceoff_circle_radius")?))
}

fn center_faceoff_spot(d: &Dims) -> Result<Primitive> {
    Ok(circle(DVec2::ZERO, d.get("center_faceoff_spot_radius")?))
}

/// Faceoff spot in the upper right end zone
fn end_zone_spot(d: &Dims) -> Result<DVec2> {
    Ok(dvec2(
        d.half("rink_length")? - d.get("odzone_faceoff_spot_to_boards")?,
        d.get("noncenter_faceoff_spot_y")?,
    ))
}

fn odzone_faceoff_circle(d: &Dims) -> Result<Primitive> {
    let c = end_zone_spot(d)?;
    let r = d.get("faceoff_circle_radius")?;
    let spacing = d.half("hashmark_ext_spacing")?;
    let length = d.get("hashmark_width")?;
    let edge = (r * r - spacing * spacing).max(0.0).sqrt();

    let mut parts = vec![circle(c, r)];
    for sx in [-spacing, spacing] {
        for sy in [-1.0, 1.0] {
            parts.push(segment(
                c + dvec2(sx, sy * edge),
                c + dvec2(sx, sy * (edge + length)),
            ));
        }
    }
    Ok(Primitive::group(parts).with_quadrants())
}

fn faceoff_spot(d: &Dims) -> Result<Primitive> {
    let r = d.get("noncenter_faceoff_spot_radius")?;
    let neutral = dvec2(
        d.half("nzone_length")? - d.get("nzone_faceoff_spot_to_zone_line")?,
        d.get("noncenter_faceoff_spot_y")?,
    );
    Ok(Primitive::group(vec![
        circle(end_zone_spot(d)?, r).with_quadrants(),
        circle(neutral, r).with_quadrants(),
    ]))
}

fn faceoff_line(d: &Dims) -> Result<Primitive> {
    let corner = dvec2(d.get("faceoff_line_dist_x")?, d.get("faceoff_line_dist_y")?);
    let along = dvec2(d.get("faceoff_line_length")?, 0.0);
    let across = dvec2(0.0, d.get("faceoff_line_width")?);
    let ell = Primitive::group(vec![
        segment(corner, corner + along),
        segment(corner, corner + across),
    ]);
    let around_spot = ell
        .with_quadrants()
        .transformed(&Transform::translation(end_zone_spot(d)?));
    Ok(around_spot.with_quadrants())
}

// ============================================================================
// Off-ice areas
// ============================================================================

fn team_a_bench(d: &Dims) -> Result<Primitive> {
    let len = d.get("bench_length")?;
    let depth = d.get("bench_depth")?;
    let x = d.half("bench_separation")? + len / 2.0;
    let y = d.half("rink_width")? + d.get("board_thickness")? + depth / 2.0;
    Ok(rect(-x, y, len, depth))
}

fn team_b_bench(d: &Dims) -> Result<Primitive> {
    Ok(team_a_bench(d)?.mirrored(Flip::X))
}

fn penalty_box_y(d: &Dims) -> Result<f64> {
    let depth = d.get("penalty_box_depth")?;
    Ok(-(d.half("rink_width")? + d.get("board_thickness")? + depth / 2.0))
}

fn team_a_penalty_box(d: &Dims) -> Result<Primitive> {
    let len = d.get("penalty_box_length")?;
    let x = d.half("penalty_box_separation")? + len / 2.0;
    Ok(rect(-x, penalty_box_y(d)?, len, d.get("penalty_box_depth")?))
}

fn team_b_penalty_box(d: &Dims) -> Result<Primitive> {
    Ok(team_a_penalty_box(d)?.mirrored(Flip::X))
}

fn off_ice_officials_box(d: &Dims) -> Result<Primitive> {
    Ok(rect(
        0.0,
        penalty_box_y(d)?,
        d.get("penalty_box_separation")?,
        d.get("penalty_box_depth")?,
    ))
}

// ============================================================================
// Display ranges
// ============================================================================

fn full(d: &Dims) -> Result<BBox> {
    centered(d, EXTENT_X, EXTENT_Y)
}

fn x_span(d: &Dims, x: (f64, f64)) -> Result<BBox> {
    let half_w = d.half("rink_width")?;
    Ok(BBox::from_limits(x, (-half_w, half_w)))
}

fn offense(d: &Dims) -> Result<BBox> {
    x_span(d, (0.0, d.half("rink_length")?))
}

fn defense(d: &Dims) -> Result<BBox> {
    x_span(d, (-d.half("rink_length")?, 0.0))
}

fn ozone(d: &Dims) -> Result<BBox> {
    x_span(d, (d.half("nzone_length")?, d.half("rink_length")?))
}

fn nzone(d: &Dims) -> Result<BBox> {
    let half = d.half("nzone_length")?;
    x_span(d, (-half, half))
}

fn dzone(d: &Dims) -> Result<BBox> {
    x_span(d, (-d.half("rink_length")?, -d.half("nzone_length")?))
}
