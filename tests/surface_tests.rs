use glam::{DVec2, dvec2};
use sportgeo::{
    Color, ColorUpdates, DimensionOverrides, DisplayRange, DrawRequest, Geometry, Sport, Surface,
    SurfaceError, SurfaceOptions, Transform, Unit, convert,
};

fn control_points(surface: &Surface) -> Vec<(&'static str, Vec<DVec2>)> {
    let transform = surface.transform();
    surface
        .scene()
        .features()
        .iter()
        .map(|f| (f.id, transform.apply_all(&f.primitive.control_points())))
        .collect()
}

fn assert_points_close(a: &[(&'static str, Vec<DVec2>)], b: &[(&'static str, Vec<DVec2>)]) {
    assert_eq!(a.len(), b.len());
    for ((id_a, pa), (id_b, pb)) in a.iter().zip(b) {
        assert_eq!(id_a, id_b);
        assert_eq!(pa.len(), pb.len(), "{id_a}");
        for (p, q) in pa.iter().zip(pb) {
            assert!(p.distance(*q) < 1e-9, "{id_a}: {p} vs {q}");
        }
    }
}

// ==== Unit tests ====

#[test]
fn unit_round_trips() {
    for a in Unit::ALL {
        for b in Unit::ALL {
            for v in [0.0, 1.0, 85.0, 1234.5678] {
                let back = convert(convert(v, a, b), b, a);
                assert!((back - v).abs() <= 1e-9 * v.max(1.0), "{a} -> {b} -> {a}: {v}");
            }
        }
    }
}

#[test]
fn unit_names_parse() {
    assert_eq!("metres".parse::<Unit>().unwrap(), Unit::Meters);
    let err = "furlongs".parse::<Unit>().unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"invalid unit: furlongs");
}

// ==== Transform tests ====

#[test]
fn full_turn_is_closure() {
    let mut surface = Surface::new(Sport::Hockey, "nhl").unwrap();
    surface.set_translation(12.0, -3.0);
    let before = control_points(&surface);
    surface.set_rotation(360.0);
    assert_points_close(&before, &control_points(&surface));
}

#[test]
fn translate_and_back_is_identity() {
    let mut surface = Surface::new(Sport::Basketball, "nba").unwrap();
    let home = control_points(&surface);
    surface.set_translation(25.0, 40.0);
    let undo = Transform::translation(dvec2(-25.0, -40.0));
    let back: Vec<_> = control_points(&surface)
        .into_iter()
        .map(|(id, pts)| (id, undo.apply_all(&pts)))
        .collect();
    assert_points_close(&home, &back);
}

// ==== Display range tests ====

#[test]
fn hockey_full_range_in_meters() {
    let options = SurfaceOptions::new()
        .units(Unit::Meters)
        .translate(100.0, 42.5);
    let surface = Surface::with_options(Sport::Hockey, "nhl", options).unwrap();
    let bb = surface
        .resolve_display_range(&DisplayRange::default(), None, None)
        .unwrap();
    assert!((bb.width() - 60.96).abs() < 1e-9);
    assert!((bb.min.x - (100.0 - 30.48)).abs() < 1e-9);
    assert!((bb.max.x - (100.0 + 30.48)).abs() < 1e-9);
    assert!((bb.center().y - 42.5).abs() < 1e-9);
}

#[test]
fn red_zone_spans_last_twenty_yards() {
    for (rotation, translate) in [(0.0, (0.0, 0.0)), (90.0, (5.0, -7.0)), (33.0, (60.0, 26.65))] {
        let options = SurfaceOptions::new()
            .rotation(rotation)
            .translate(translate.0, translate.1);
        let surface = Surface::with_options(Sport::Football, "nfl", options).unwrap();
        let bb = surface
            .resolve_display_range(&"red zone".into(), None, None)
            .unwrap();

        // The goal-line end of the zone, mapped through the same transform
        let goal = surface.apply(dvec2(50.0, 0.0));
        let start = surface.apply(dvec2(30.0, 0.0));
        assert!((goal.distance(start) - 20.0).abs() < 1e-9);
        assert!(bb.contains(goal) && bb.contains(start), "rotation {rotation}");

        if rotation == 0.0 {
            assert!((bb.min.x - 30.0).abs() < 1e-9);
            assert!((bb.max.x - 50.0).abs() < 1e-9);
        }
        if rotation == 90.0 {
            assert!((bb.height() - 20.0).abs() < 1e-9);
            assert!((bb.min.y - (30.0 - 7.0)).abs() < 1e-9);
        }
    }
}

#[test]
fn unknown_range_lists_catalog() {
    let surface = Surface::new(Sport::Hockey, "nhl").unwrap();
    let err = surface
        .draw(DrawRequest::new().display_range("nonexistent-range"))
        .unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"unknown display range `nonexistent-range` for hockey (valid: full, offense, defense, ozone, nzone, dzone)"
    );
}

#[test]
fn explicit_limits_win_per_axis() {
    let options = SurfaceOptions::new().rotation(90.0).xlims((10.0, -10.0));
    let surface = Surface::with_options(Sport::Hockey, "nhl", options).unwrap();
    let drawing = surface.draw(DrawRequest::new().display_range("offense")).unwrap();
    let limits = drawing.limits();
    assert_eq!(limits.x_limits(), (-10.0, 10.0));
    assert!((limits.min.y - 0.0).abs() < 1e-9);
    assert!((limits.max.y - 100.0).abs() < 1e-9);
}

#[test]
fn lone_lower_limit_runs_to_end_of_surface() {
    let surface = Surface::new(Sport::Curling, "wcf").unwrap();
    let full = surface
        .resolve_display_range(&DisplayRange::default(), None, None)
        .unwrap();
    let drawing = surface.draw(DrawRequest::new().ylims(0.0)).unwrap();
    let limits = drawing.limits();
    assert_eq!(limits.x_limits(), full.x_limits());
    assert_eq!(limits.y_limits(), (0.0, full.max.y));

    // Starting at or beyond the far end falls back to the whole sheet
    let drawing = surface
        .draw(DrawRequest::new().ylims(full.max.y).xlims(full.max.x + 1.0))
        .unwrap();
    assert_eq!(drawing.limits(), full);
}

#[test]
fn lone_lower_limit_follows_translation() {
    let options = SurfaceOptions::new().translate(20.0, 0.0).xlims(25.0);
    let surface = Surface::with_options(Sport::Hockey, "nhl", options).unwrap();
    let limits = surface.draw(DrawRequest::new().display_range("defense")).unwrap().limits();
    assert_eq!(limits.min.x, 25.0);
    assert!((limits.max.x - 120.0).abs() < 1e-9);
}

// ==== Composition tests ====

#[test]
fn typo_in_colors_is_rejected() {
    let mut colors = ColorUpdates::new();
    colors.insert_str("typo_feature", "#fff").unwrap();
    let err = Surface::with_options(Sport::Hockey, "nhl", SurfaceOptions::new().colors(colors))
        .unwrap_err();
    assert!(matches!(&err, SurfaceError::UnknownFeature { id, .. } if id == "typo_feature"));
}

#[test]
fn null_color_leaves_outline() {
    let options = SurfaceOptions::new().color("team_a_bench", None::<Color>);
    let surface = Surface::with_options(Sport::Hockey, "nhl", options).unwrap();
    let bench = surface.scene().feature("team_a_bench").unwrap();
    assert_eq!(bench.style.fill, sportgeo::Fill::None);
    assert!(bench.style.stroke.is_some());
}

#[test]
fn dimension_override_touches_only_its_features() {
    let mut surface = Surface::new(Sport::Hockey, "nhl").unwrap();
    let before = surface.scene().clone();

    let mut updates = DimensionOverrides::new();
    updates.insert("goal_crease_radius".to_string(), 8.0);
    surface.update_dimensions(&updates).unwrap();

    for feature in surface.scene().features() {
        let old = before.feature(feature.id).unwrap();
        let reads_radius = feature.dimensions.contains(&"goal_crease_radius");
        if reads_radius {
            assert_ne!(feature.primitive, old.primitive, "{}", feature.id);
        } else {
            assert_eq!(feature.primitive, old.primitive, "{}", feature.id);
        }
    }
}

#[test]
fn unknown_dimension_override_is_rejected() {
    let options = SurfaceOptions::new().dimension("moat_width", 3.0);
    let err = Surface::with_options(Sport::Hockey, "nhl", options).unwrap_err();
    assert!(matches!(err, SurfaceError::UnknownDimension { .. }));
}

#[test]
fn degenerate_features_still_build() {
    let surface = Surface::new(Sport::Hockey, "ncaa").unwrap();
    let trapezoid = surface.scene().feature("restricted_trapezoid").unwrap();
    assert!(trapezoid.primitive.is_degenerate());
}

#[test]
fn tiny_yard_spacing_builds_without_marks() {
    let options = SurfaceOptions::new().dimension("major_yard_line_distance", 1e-9);
    let surface = Surface::with_options(Sport::Football, "nfl", options).unwrap();
    let lines = surface.scene().feature("minor_yard_line").unwrap();
    assert!(lines.primitive.is_degenerate());
}

// ==== Overlay tests ====

#[test]
fn overlays_share_the_surface_transform() {
    let options = SurfaceOptions::new()
        .units(Unit::Meters)
        .rotation(90.0)
        .translate(100.0, 42.5);
    let surface = Surface::with_options(Sport::Hockey, "nhl", options).unwrap();
    let mut drawing = surface.draw(DrawRequest::new()).unwrap();
    drawing.scatter(&[dvec2(89.0, 0.0), dvec2(500.0, 0.0)], true);
    drawing.arrow(DVec2::ZERO, dvec2(89.0, 0.0));

    let recorder = drawing.into_backend();
    let sportgeo::Mark::Scatter(points) = &recorder.marks[0] else {
        panic!("expected scatter");
    };
    assert_eq!(points.len(), 1);
    let expected = surface.apply(dvec2(89.0, 0.0));
    assert!(points[0].distance(expected) < 1e-12);
    assert!((expected - dvec2(100.0, 42.5 + 89.0 * 0.3048)).length() < 1e-9);
}
