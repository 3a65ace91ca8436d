//! Baseball fields.
//!
//! Unlike the other surfaces, a baseball field has no center: the origin is
//! the back tip of home plate and +y points at center field. First base lies
//! on the +x side.

use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2, FRAC_PI_4, PI};

use glam::{DVec2, dvec2};

use super::{FeatureDef, RangeDef, SportTable, circle, layers, rect, rect_between, segment};
use crate::errors::Result;
use crate::geometry::{Flip, PolygonShape, Primitive, RectShape, arc_vertices};
use crate::registry::{Dims, Sport};
use crate::style::StyleDef;
use crate::types::{BBox, Color};

const GRASS: Color = Color::hex(0x395d33);
const DIRT: Color = Color::hex(0x9b7653);
const WHITE: Color = Color::hex(0xffffff);

const INFIELD_LAYERS: &[Option<Color>] = &[Some(DIRT), Some(GRASS)];

const EXTENT_X: super::Extent = &[
    (FRAC_1_SQRT_2, "left_field_distance"),
    (FRAC_1_SQRT_2, "right_field_distance"),
];
const EXTENT_Y: super::Extent = &[(1.0, "backstop_radius"), (1.0, "center_field_distance")];

pub static TABLE: SportTable = SportTable {
    sport: Sport::Baseball,
    features: &[
        FeatureDef { id: "outfield_grass", z_order: 1, style: StyleDef::fill(GRASS), build: outfield_grass },
        FeatureDef { id: "infield", z_order: 2, style: StyleDef::layered(INFIELD_LAYERS), build: infield },
        FeatureDef { id: "home_plate_circle", z_order: 3, style: StyleDef::fill(DIRT), build: home_plate_circle },
        FeatureDef { id: "pitchers_mound", z_order: 3, style: StyleDef::fill(DIRT), build: pitchers_mound },
        FeatureDef { id: "foul_line", z_order: 16, style: StyleDef::stroke(WHITE), build: foul_line },
        FeatureDef { id: "batters_box", z_order: 16, style: StyleDef::stroke(WHITE), build: batters_box },
        FeatureDef { id: "catchers_box", z_order: 16, style: StyleDef::stroke(WHITE), build: catchers_box },
        FeatureDef { id: "pitchers_plate", z_order: 17, style: StyleDef::fill(WHITE), build: pitchers_plate },
        FeatureDef { id: "base", z_order: 17, style: StyleDef::fill(WHITE), build: base },
        FeatureDef { id: "home_plate", z_order: 17, style: StyleDef::fill(WHITE), build: home_plate },
    ],
    ranges: &[
        RangeDef { name: "full", aliases: &["full field"], bounds: full },
        RangeDef { name: "infield", aliases: &["diamond"], bounds: infield_range },
        RangeDef { name: "outfield", aliases: &[], bounds: outfield_range },
    ],
    extent_x: EXTENT_X,
    extent_y: EXTENT_Y,
    surface: playing_surface,
    mirror_pairs: &[],
    mirrored_in_x: false,
};

/// Fair territory out to the fence, interpolating the fence distance
/// linearly in angle between the foul poles and center field
fn fair_territory(d: &Dims) -> Result<Primitive> {
    let (lf, cf, rf) = (
        d.get("left_field_distance")?,
        d.get("center_field_distance")?,
        d.get("right_field_distance")?,
    );
    const STEPS: usize = 32;
    let mut vertices = vec![DVec2::ZERO];
    for i in 0..=STEPS {
        let angle = FRAC_PI_4 + FRAC_PI_2 * i as f64 / STEPS as f64;
        let t = (angle - FRAC_PI_4) / FRAC_PI_4;
        let r = if t <= 1.0 {
            rf + (cf - rf) * t
        } else {
            cf + (lf - cf) * (t - 1.0)
        };
        vertices.push(DVec2::from_angle(angle) * r);
    }
    Ok(PolygonShape::new(vertices).into())
}

fn playing_surface(d: &Dims) -> Result<Primitive> {
    Ok(Primitive::group(vec![
        fair_territory(d)?,
        circle(DVec2::ZERO, d.get("backstop_radius")?),
    ]))
}

fn outfield_grass(d: &Dims) -> Result<Primitive> {
    fair_territory(d)
}

// ============================================================================
// Infield
// ============================================================================

/// Corners of the square formed by the base paths: home, first, second, third
fn diamond(baseline: f64) -> [DVec2; 4] {
    let h = baseline * FRAC_1_SQRT_2;
    [
        DVec2::ZERO,
        dvec2(h, h),
        dvec2(0.0, 2.0 * h),
        dvec2(-h, h),
    ]
}

/// Dirt fan bounded by the infield arc, which is centered on the front of
/// the pitcher's plate
fn infield_dirt(d: &Dims) -> Result<Primitive> {
    let c = d.get("pitchers_plate_front_to_home_plate")?;
    let r = d.get("infield_arc_radius")?;
    // Distance along the foul line to where the arc crosses it
    let u = FRAC_1_SQRT_2;
    let reach = u * c + (u * u * c * c - c * c + r * r).max(0.0).sqrt();
    let cross = dvec2(reach * u, reach * u);
    let start = (cross.y - c).atan2(cross.x);

    let mut vertices = vec![DVec2::ZERO];
    vertices.extend(arc_vertices(dvec2(0.0, c), r, start, PI - start, 32));
    Ok(PolygonShape::new(vertices).into())
}

fn infield_grass(d: &Dims) -> Result<Primitive> {
    let baseline = d.get("baseline_distance")?;
    let inset = d.get("foul_line_to_infield_grass")?;
    let center = dvec2(0.0, baseline * FRAC_1_SQRT_2);
    let half = ((baseline - 2.0 * inset) * FRAC_1_SQRT_2).max(0.0);
    Ok(PolygonShape::new(vec![
        center - dvec2(0.0, half),
        center + dvec2(half, 0.0),
        center + dvec2(0.0, half),
        center - dvec2(half, 0.0),
    ])
    .into())
}

fn infield(d: &Dims) -> Result<Primitive> {
    Ok(layers(vec![infield_dirt(d)?, infield_grass(d)?]))
}

fn home_plate_circle(d: &Dims) -> Result<Primitive> {
    Ok(circle(DVec2::ZERO, d.get("home_plate_circle_radius")?))
}

fn pitchers_mound(d: &Dims) -> Result<Primitive> {
    let center = dvec2(0.0, d.get("pitchers_mound_center_to_home_plate")?);
    Ok(circle(center, d.get("pitchers_mound_radius")?))
}

fn foul_line(d: &Dims) -> Result<Primitive> {
    let lf = d.get("left_field_distance")? * FRAC_1_SQRT_2;
    let rf = d.get("right_field_distance")? * FRAC_1_SQRT_2;
    Ok(Primitive::group(vec![
        segment(DVec2::ZERO, dvec2(rf, rf)),
        segment(DVec2::ZERO, dvec2(-lf, lf)),
    ]))
}

// ============================================================================
// Bases and plates
// ============================================================================

fn pitchers_plate(d: &Dims) -> Result<Primitive> {
    let depth = d.get("pitchers_plate_width")?;
    let y = d.get("pitchers_plate_front_to_home_plate")? + depth / 2.0;
    Ok(rect(0.0, y, d.get("pitchers_plate_length")?, depth))
}

/// First, second and third base. First and third sit inside the diamond
/// with an outer corner on the base path corner.
fn base(d: &Dims) -> Result<Primitive> {
    let side = d.get("base_side_length")?;
    let [_, first, second, third] = diamond(d.get("baseline_distance")?);
    let inset = dvec2(side * FRAC_1_SQRT_2, 0.0);
    let bag = |center: DVec2| -> Primitive {
        RectShape::new(center, side, side)
            .with_rotation(FRAC_PI_4)
            .into()
    };
    Ok(Primitive::group(vec![
        bag(first - inset),
        bag(second),
        bag(third + inset),
    ]))
}

/// Pentagon with its back tip on the origin
fn home_plate(d: &Dims) -> Result<Primitive> {
    let e = d.get("home_plate_edge_length")?;
    let h = e / 2.0;
    Ok(PolygonShape::new(vec![
        DVec2::ZERO,
        dvec2(h, h),
        dvec2(h, e),
        dvec2(-h, e),
        dvec2(-h, h),
    ])
    .into())
}

fn batters_box(d: &Dims) -> Result<Primitive> {
    let plate = d.get("home_plate_edge_length")?;
    let width = d.get("batters_box_width")?;
    let x = plate / 2.0 + d.get("home_plate_side_to_batters_box")? + width / 2.0;
    let b = rect(x, plate / 2.0, width, d.get("batters_box_length")?);
    Ok(b.with_mirror(Flip::X))
}

fn catchers_box(d: &Dims) -> Result<Primitive> {
    let half_w = d.half("catchers_box_width")?;
    Ok(rect_between((-half_w, half_w), (-d.get("catchers_box_depth")?, 0.0)))
}

// ============================================================================
// Display ranges
// ============================================================================

fn full(d: &Dims) -> Result<BBox> {
    Ok(BBox::from_limits(
        (
            -d.get("left_field_distance")? * FRAC_1_SQRT_2,
            d.get("right_field_distance")? * FRAC_1_SQRT_2,
        ),
        (-d.get("backstop_radius")?, d.get("center_field_distance")?),
    ))
}

fn infield_range(d: &Dims) -> Result<BBox> {
    let r = d.get("infield_arc_radius")?;
    let top = d.get("pitchers_plate_front_to_home_plate")? + r;
    Ok(BBox::from_limits((-r, r), (-d.get("home_plate_circle_radius")?, top)))
}

fn outfield_range(d: &Dims) -> Result<BBox> {
    let bb = full(d)?;
    let near = d.get("baseline_distance")? * FRAC_1_SQRT_2;
    Ok(BBox::from_limits(bb.x_limits(), (near, bb.max.y)))
}
