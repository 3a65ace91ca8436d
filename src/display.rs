//! Display range resolution.
//!
//! Every sport carries a catalog of named crops ("full", "offense", "red
//! zone", ...) in native, center-origin coordinates. Resolving a range maps
//! the crop through the surface's current transform, so the returned box
//! always frames the same physical region however the surface is rotated,
//! translated or scaled.

use crate::errors::{Result, SurfaceError};
use crate::geometry::Transform;
use crate::log::debug;
use crate::registry::{Sport, normalize_key};
use crate::types::BBox;

/// A requested display range
#[derive(Clone, Debug, PartialEq)]
pub enum DisplayRange {
    /// A catalog entry, looked up by name or alias
    Named(String),
    /// Explicit bounds in display coordinates
    Explicit(BBox),
}

impl Default for DisplayRange {
    fn default() -> Self {
        DisplayRange::Named("full".to_string())
    }
}

impl From<&str> for DisplayRange {
    fn from(name: &str) -> Self {
        DisplayRange::Named(name.to_string())
    }
}

impl From<String> for DisplayRange {
    fn from(name: String) -> Self {
        DisplayRange::Named(name)
    }
}

impl From<BBox> for DisplayRange {
    fn from(bbox: BBox) -> Self {
        DisplayRange::Explicit(bbox)
    }
}

/// An explicit limit on one display axis, in display coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Limit {
    /// Show everything from this value to the far edge of the surface
    From(f64),
    /// Show exactly this span; a reversed pair is swapped
    Between(f64, f64),
}

impl From<f64> for Limit {
    fn from(lower: f64) -> Self {
        Limit::From(lower)
    }
}

impl From<(f64, f64)> for Limit {
    fn from((a, b): (f64, f64)) -> Self {
        Limit::Between(a, b)
    }
}

impl Limit {
    /// Concrete span given the full surface's span on this axis.
    ///
    /// A lower bound at or past the far edge shows the whole surface.
    fn span(self, surface: (f64, f64)) -> (f64, f64) {
        match self {
            Limit::Between(a, b) => (a, b),
            Limit::From(lower) if lower >= surface.1 => surface,
            Limit::From(lower) => (lower, surface.1),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NamedRange {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    /// Native coordinates
    pub bounds: BBox,
}

impl NamedRange {
    fn matches(&self, key: &str) -> bool {
        normalize_key(self.name) == key || self.aliases.iter().any(|a| normalize_key(a) == key)
    }
}

/// The display ranges one sport understands, evaluated for one league
#[derive(Clone, Debug, PartialEq)]
pub struct RangeCatalog {
    sport: Sport,
    ranges: Vec<NamedRange>,
}

impl RangeCatalog {
    pub fn new(sport: Sport, ranges: Vec<NamedRange>) -> Self {
        Self { sport, ranges }
    }

    pub fn sport(&self) -> Sport {
        self.sport
    }

    /// Find a range by name or alias, ignoring case, spaces, `-` and `_`
    pub fn lookup(&self, name: &str) -> Option<&NamedRange> {
        let key = normalize_key(name);
        self.ranges.iter().find(|r| r.matches(&key))
    }

    /// The whole-surface entry
    pub fn full(&self) -> Option<&NamedRange> {
        self.lookup("full")
    }

    /// Canonical names, in catalog order
    pub fn names(&self) -> Vec<&'static str> {
        self.ranges.iter().map(|r| r.name).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NamedRange> {
        self.ranges.iter()
    }
}

/// Resolve `requested` to display-space bounds.
///
/// Named ranges go through `transform`; explicit bounds are taken as
/// already being in display space. `xlims` and `ylims`, when given, replace
/// the corresponding axis of the result. A lone lower bound runs to the far
/// edge of the transformed full surface.
pub fn resolve(
    requested: &DisplayRange,
    transform: &Transform,
    catalog: &RangeCatalog,
    xlims: Option<Limit>,
    ylims: Option<Limit>,
) -> Result<BBox> {
    let base = match requested {
        DisplayRange::Explicit(bbox) => *bbox,
        DisplayRange::Named(name) => {
            let range = catalog
                .lookup(name)
                .ok_or_else(|| SurfaceError::UnknownDisplayRange {
                    name: name.clone(),
                    sport: catalog.sport(),
                    valid: catalog.names().join(", "),
                })?;
            debug!(range = range.name, "resolved display range");
            transform.bbox(&range.bounds)
        }
    };

    let surface = catalog
        .full()
        .map_or(base, |full| transform.bbox(&full.bounds));
    let x = xlims.map_or_else(|| base.x_limits(), |l| l.span(surface.x_limits()));
    let y = ylims.map_or_else(|| base.y_limits(), |l| l.span(surface.y_limits()));
    Ok(BBox::from_limits(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::TransformState;
    use crate::units::Unit;

    fn catalog() -> RangeCatalog {
        RangeCatalog::new(
            Sport::Football,
            vec![
                NamedRange {
                    name: "full",
                    aliases: &["full field"],
                    bounds: BBox::centered(120.0, 53.3),
                },
                NamedRange {
                    name: "red zone",
                    aliases: &["offensive red zone"],
                    bounds: BBox::from_limits((30.0, 50.0), (-26.65, 26.65)),
                },
            ],
        )
    }

    // ==== Lookup tests ====

    #[test]
    fn lookup_normalizes_names() {
        let catalog = catalog();
        for name in ["red zone", "redzone", "Red_Zone", "RED-ZONE", "offensive red zone"] {
            assert_eq!(catalog.lookup(name).map(|r| r.name), Some("red zone"), "{name}");
        }
        assert!(catalog.lookup("green zone").is_none());
    }

    #[test]
    fn unknown_range_lists_catalog() {
        let err = resolve(
            &"green zone".into(),
            &Transform::identity(),
            &catalog(),
            None,
            None,
        )
        .unwrap_err();
        insta::assert_snapshot!(err.to_string(), @"unknown display range `green zone` for football (valid: full, red zone)");
    }

    // ==== Resolution tests ====

    #[test]
    fn named_range_follows_transform() {
        let state = TransformState::new(Unit::Yards)
            .with_rotation(90.0)
            .with_translation(10.0, 0.0);
        let t = Transform::new(Unit::Yards, &state);
        let bb = resolve(&"red zone".into(), &t, &catalog(), None, None).unwrap();
        assert!((bb.min.y - 30.0).abs() < 1e-9);
        assert!((bb.max.y - 50.0).abs() < 1e-9);
        assert!((bb.center().x - 10.0).abs() < 1e-9);
    }

    #[test]
    fn explicit_bounds_pass_through() {
        let t = Transform::new(
            Unit::Feet,
            &TransformState::new(Unit::Meters).with_rotation(45.0),
        );
        let wanted = BBox::from_limits((0.0, 10.0), (-5.0, 5.0));
        let bb = resolve(&wanted.into(), &t, &catalog(), None, None).unwrap();
        assert_eq!(bb, wanted);
    }

    #[test]
    fn limits_override_per_axis() {
        let bb = resolve(
            &DisplayRange::default(),
            &Transform::identity(),
            &catalog(),
            Some((25.0, -25.0).into()),
            None,
        )
        .unwrap();
        assert_eq!(bb.x_limits(), (-25.0, 25.0));
        assert!((bb.height() - 53.3).abs() < 1e-9);
    }

    #[test]
    fn lower_bound_runs_to_far_edge() {
        let t = Transform::new(
            Unit::Yards,
            &TransformState::new(Unit::Yards).with_translation(60.0, 0.0),
        );
        let bb = resolve(
            &"red zone".into(),
            &t,
            &catalog(),
            Some(Limit::From(80.0)),
            Some(0.0.into()),
        )
        .unwrap();
        assert_eq!(bb.x_limits(), (80.0, 120.0));
        assert!((bb.min.y - 0.0).abs() < 1e-12);
        assert!((bb.max.y - 26.65).abs() < 1e-12);
    }

    #[test]
    fn lower_bound_past_the_edge_shows_whole_surface() {
        let bb = resolve(
            &"red zone".into(),
            &Transform::identity(),
            &catalog(),
            Some(Limit::From(75.0)),
            None,
        )
        .unwrap();
        assert_eq!(bb.x_limits(), (-60.0, 60.0));
        assert_eq!(bb.y_limits(), (-26.65, 26.65));
    }
}
