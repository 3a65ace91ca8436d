//! American and Canadian football fields

use super::{FeatureDef, RangeDef, SportTable, centered, layers, rect, rect_between};
use crate::errors::Result;
use crate::geometry::{Flip, Geometry, Primitive};
use crate::registry::{Dims, Sport};
use crate::style::StyleDef;
use crate::types::{BBox, Color};

const GRASS: Color = Color::hex(0x196f0c);
const WHITE: Color = Color::hex(0xffffff);
const TEAM_AREA: Color = Color::hex(0x3c3c3c);

const BOUNDARY_LAYERS: &[Option<Color>] = &[Some(WHITE), Some(GRASS)];

const EXTENT_X: super::Extent = &[
    (1.0, "field_length"),
    (2.0, "endzone_length"),
    (2.0, "boundary_line_thickness"),
    (2.0, "field_border_thickness"),
];
const EXTENT_Y: super::Extent = &[
    (1.0, "field_width"),
    (2.0, "boundary_line_thickness"),
    (2.0, "restricted_area_width"),
    (2.0, "coaching_box_width"),
    (2.0, "team_bench_width"),
    (2.0, "field_border_thickness"),
];

pub static TABLE: SportTable = SportTable {
    sport: Sport::Football,
    features: &[
        FeatureDef { id: "field_apron", z_order: 1, style: StyleDef::fill(GRASS), build: field_apron },
        FeatureDef { id: "team_a_bench", z_order: 2, style: StyleDef::outlined(TEAM_AREA, WHITE), build: team_a_bench },
        FeatureDef { id: "team_b_bench", z_order: 2, style: StyleDef::outlined(TEAM_AREA, WHITE), build: team_b_bench },
        FeatureDef { id: "coaching_box", z_order: 2, style: StyleDef::stroke(WHITE), build: coaching_box },
        FeatureDef { id: "restricted_area", z_order: 2, style: StyleDef::stroke(WHITE), build: restricted_area },
        FeatureDef { id: "boundary_line", z_order: 3, style: StyleDef::layered(BOUNDARY_LAYERS), build: boundary_line },
        FeatureDef { id: "offensive_half", z_order: 4, style: StyleDef::fill(GRASS), build: offensive_half },
        FeatureDef { id: "defensive_half", z_order: 4, style: StyleDef::fill(GRASS), build: defensive_half },
        FeatureDef { id: "endzone", z_order: 4, style: StyleDef::fill(GRASS), build: endzone },
        FeatureDef { id: "goal_line", z_order: 16, style: StyleDef::fill(WHITE), build: goal_line },
        FeatureDef { id: "major_yard_line", z_order: 16, style: StyleDef::fill(WHITE), build: major_yard_line },
        FeatureDef { id: "minor_yard_line", z_order: 16, style: StyleDef::fill(WHITE), build: minor_yard_line },
        FeatureDef { id: "try_mark", z_order: 16, style: StyleDef::fill(WHITE), build: try_mark },
    ],
    ranges: &[
        RangeDef { name: "full", aliases: &["full field"], bounds: full },
        RangeDef { name: "in bounds only", aliases: &["in bounds", "field of play"], bounds: in_bounds },
        RangeDef { name: "offense", aliases: &["offence", "offensive half", "offensive half field"], bounds: offense },
        RangeDef { name: "defense", aliases: &["defence", "defensive half", "defensive half field"], bounds: defense },
        RangeDef { name: "red zone", aliases: &["offensive red zone", "oredzone"], bounds: red_zone },
        RangeDef { name: "defensive red zone", aliases: &["dredzone"], bounds: defensive_red_zone },
    ],
    extent_x: EXTENT_X,
    extent_y: EXTENT_Y,
    surface: field_apron,
    mirror_pairs: &[("offensive_half", "defensive_half")],
    mirrored_in_x: true,
};

fn field_apron(d: &Dims) -> Result<Primitive> {
    let bb = full(d)?;
    Ok(rect_between(bb.x_limits(), bb.y_limits()))
}

/// Half length to the back of the end zone
fn half_length(d: &Dims) -> Result<f64> {
    Ok(d.half("field_length")? + d.get("endzone_length")?)
}

fn boundary_line(d: &Dims) -> Result<Primitive> {
    let t = d.get("boundary_line_thickness")?;
    let (half_l, half_w) = (half_length(d)?, d.half("field_width")?);
    Ok(layers(vec![
        rect_between((-half_l - t, half_l + t), (-half_w - t, half_w + t)),
        rect_between((-half_l, half_l), (-half_w, half_w)),
    ]))
}

fn offensive_half(d: &Dims) -> Result<Primitive> {
    let half_w = d.half("field_width")?;
    Ok(rect_between((0.0, d.half("field_length")?), (-half_w, half_w)))
}

fn defensive_half(d: &Dims) -> Result<Primitive> {
    Ok(offensive_half(d)?.mirrored(Flip::X))
}

fn endzone(d: &Dims) -> Result<Primitive> {
    let half_w = d.half("field_width")?;
    let zone = rect_between((d.half("field_length")?, half_length(d)?), (-half_w, half_w));
    Ok(zone.with_mirror(Flip::X))
}

// ============================================================================
// Yard markings
// ============================================================================

/// The goal line is part of the end zone
fn goal_line(d: &Dims) -> Result<Primitive> {
    let t = d.get("goal_line_thickness")?;
    let x = d.half("field_length")? + t / 2.0;
    Ok(rect(x, 0.0, t, d.get("field_width")?).with_mirror(Flip::X))
}

/// Upper bound on yard marks per field; more than this is treated as degenerate
const MAX_YARD_LINES: f64 = 1_000.0;

/// x positions of every yard line strictly between the goal lines, with
/// `major` marking lines that fall on the major spacing.
///
/// Spacing no wider than a line leaves no grass between marks, so that
/// layout (and any absurdly dense one) yields no lines at all.
fn yard_lines(d: &Dims) -> Result<Vec<(f64, bool)>> {
    let length = d.get("field_length")?;
    let major = d.get("major_yard_line_distance")?;
    let thickness = d.get("minor_line_thickness")?;
    let step = major / 5.0;
    if step <= thickness || step <= 0.0 {
        return Ok(Vec::new());
    }
    let count = (length / step).round();
    if count > MAX_YARD_LINES {
        return Ok(Vec::new());
    }
    let count = count as usize;
    Ok((1..count)
        .map(|i| (-length / 2.0 + i as f64 * step, i % 5 == 0))
        .collect())
}

fn major_yard_line(d: &Dims) -> Result<Primitive> {
    let t = d.get("minor_line_thickness")?;
    let reach = d.half("field_width")? - d.get("sideline_to_major_yard_line")?;
    let lines = yard_lines(d)?
        .into_iter()
        .filter(|&(_, major)| major)
        .map(|(x, _)| rect(x, 0.0, t, 2.0 * reach))
        .collect();
    Ok(Primitive::group(lines))
}

fn minor_yard_line(d: &Dims) -> Result<Primitive> {
    let t = d.get("minor_line_thickness")?;
    let h = d.get("minor_yard_line_height")?;
    let half_w = d.half("field_width")?;
    let sideline = half_w - d.get("sideline_to_major_yard_line")? - h / 2.0;
    let outer = half_w - d.get("sideline_to_outer_yard_line")?;
    let hash = d.half("inbound_hashmark_separation")? + h / 2.0;

    let mut ticks = Vec::new();
    for (x, major) in yard_lines(d)? {
        if major {
            continue;
        }
        for y in [sideline, outer, hash] {
            ticks.push(rect(x, y, t, h).with_mirror(Flip::Y));
        }
    }
    Ok(Primitive::group(ticks))
}

fn try_mark(d: &Dims) -> Result<Primitive> {
    let x = d.half("field_length")? - d.get("try_mark_distance")?;
    let mark = rect(x, 0.0, d.get("minor_line_thickness")?, d.get("try_mark_width")?);
    Ok(mark.with_mirror(Flip::X))
}

// ============================================================================
// Team areas
// ============================================================================

/// Distance from the center of the field to the outside of the boundary line
fn sideline_edge(d: &Dims) -> Result<f64> {
    Ok(d.half("field_width")? + d.get("boundary_line_thickness")?)
}

fn restricted_area(d: &Dims) -> Result<Primitive> {
    let y = sideline_edge(d)?;
    let half_l = d.half("team_bench_length")?;
    let strip = rect_between((-half_l, half_l), (y, y + d.get("restricted_area_width")?));
    Ok(strip.with_mirror(Flip::Y))
}

fn coaching_box(d: &Dims) -> Result<Primitive> {
    let y = sideline_edge(d)? + d.get("restricted_area_width")?;
    let half_l = d.half("team_bench_length")?;
    let strip = rect_between((-half_l, half_l), (y, y + d.get("coaching_box_width")?));
    Ok(strip.with_mirror(Flip::Y))
}

fn team_a_bench(d: &Dims) -> Result<Primitive> {
    let y = sideline_edge(d)? + d.get("restricted_area_width")? + d.get("coaching_box_width")?;
    let half_l = d.half("team_bench_length")?;
    Ok(rect_between((-half_l, half_l), (y, y + d.get("team_bench_width")?)))
}

fn team_b_bench(d: &Dims) -> Result<Primitive> {
    Ok(team_a_bench(d)?.mirrored(Flip::Y))
}

// ============================================================================
// Display ranges
// ============================================================================

fn full(d: &Dims) -> Result<BBox> {
    centered(d, EXTENT_X, EXTENT_Y)
}

fn in_bounds(d: &Dims) -> Result<BBox> {
    let (half_l, half_w) = (half_length(d)?, d.half("field_width")?);
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

/// The last `red_zone_length` of the offensive half, goal line excluded
fn red_zone(d: &Dims) -> Result<BBox> {
    let goal = d.half("field_length")?;
    let half_w = d.half("field_width")?;
    Ok(BBox::from_limits((goal - d.get("red_zone_length")?, goal), (-half_w, half_w)))
}

fn defensive_red_zone(d: &Dims) -> Result<BBox> {
    let bb = red_zone(d)?;
    Ok(BBox::from_limits((-bb.max.x, -bb.min.x), bb.y_limits()))
}
