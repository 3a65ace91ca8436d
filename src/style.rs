//! Feature styles and caller color overrides.

use std::collections::BTreeMap;

use crate::errors::{Result, SurfaceError};
use crate::types::Color;

/// How a feature's enclosed area is painted
#[derive(Clone, Debug, PartialEq)]
pub enum Fill {
    /// Outline only
    None,
    Solid(Color),
    /// One entry per layer, outermost first; `None` leaves that layer unpainted
    Layered(Vec<Option<Color>>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Style {
    pub fill: Fill,
    pub stroke: Option<Color>,
}

impl Style {
    /// Fill color of layer `index`, if painted
    pub fn layer_fill(&self, index: usize) -> Option<Color> {
        match &self.fill {
            Fill::None => None,
            Fill::Solid(c) => Some(*c),
            Fill::Layered(layers) => layers.get(index).copied().flatten(),
        }
    }

    /// Replace this style according to a caller override.
    ///
    /// `layers` is the number of layers the feature's geometry has.
    pub fn apply(&mut self, id: &str, layers: usize, update: &ColorUpdate) -> Result<()> {
        match update {
            ColorUpdate::Solid(color) => {
                if self.fill == Fill::None {
                    self.stroke = Some(*color);
                } else {
                    self.fill = Fill::Solid(*color);
                    if self.stroke.is_some() {
                        self.stroke = Some(*color);
                    }
                }
            }
            ColorUpdate::Layered(colors) => {
                if colors.len() != layers {
                    return Err(SurfaceError::LayerMismatch {
                        id: id.to_string(),
                        expected: layers,
                        found: colors.len(),
                    });
                }
                self.fill = Fill::Layered(colors.clone());
            }
            ColorUpdate::Clear => self.fill = Fill::None,
        }
        Ok(())
    }
}

/// Compile-time fill description for the default style tables
#[derive(Clone, Copy, Debug)]
pub enum FillDef {
    None,
    Solid(Color),
    Layered(&'static [Option<Color>]),
}

/// Compile-time style description for the default style tables
#[derive(Clone, Copy, Debug)]
pub struct StyleDef {
    pub fill: FillDef,
    pub stroke: Option<Color>,
}

impl StyleDef {
    /// Filled area without an outline
    pub const fn fill(color: Color) -> Self {
        Self {
            fill: FillDef::Solid(color),
            stroke: None,
        }
    }

    /// Outline only
    pub const fn stroke(color: Color) -> Self {
        Self {
            fill: FillDef::None,
            stroke: Some(color),
        }
    }

    /// Filled area with an outline
    pub const fn outlined(fill: Color, stroke: Color) -> Self {
        Self {
            fill: FillDef::Solid(fill),
            stroke: Some(stroke),
        }
    }

    /// One fill per layer, outermost first
    pub const fn layered(layers: &'static [Option<Color>]) -> Self {
        Self {
            fill: FillDef::Layered(layers),
            stroke: None,
        }
    }

    pub fn layer_count(&self) -> usize {
        match self.fill {
            FillDef::Layered(layers) => layers.len(),
            _ => 1,
        }
    }

    pub fn resolve(&self) -> Style {
        let fill = match self.fill {
            FillDef::None => Fill::None,
            FillDef::Solid(c) => Fill::Solid(c),
            FillDef::Layered(layers) => Fill::Layered(layers.to_vec()),
        };
        Style {
            fill,
            stroke: self.stroke,
        }
    }
}

/// A caller's replacement color for one feature
#[derive(Clone, Debug, PartialEq)]
pub enum ColorUpdate {
    Solid(Color),
    /// Outer-to-inner colors for a layered feature
    Layered(Vec<Option<Color>>),
    /// Remove the fill, leaving the outline (if any)
    Clear,
}

impl From<Color> for ColorUpdate {
    fn from(color: Color) -> Self {
        ColorUpdate::Solid(color)
    }
}

impl From<Option<Color>> for ColorUpdate {
    fn from(color: Option<Color>) -> Self {
        color.map_or(ColorUpdate::Clear, ColorUpdate::Solid)
    }
}

impl From<[Color; 2]> for ColorUpdate {
    fn from([outer, inner]: [Color; 2]) -> Self {
        ColorUpdate::Layered(vec![Some(outer), Some(inner)])
    }
}

impl From<Vec<Option<Color>>> for ColorUpdate {
    fn from(layers: Vec<Option<Color>>) -> Self {
        ColorUpdate::Layered(layers)
    }
}

/// Color overrides keyed by feature id
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColorUpdates(BTreeMap<String, ColorUpdate>);

impl ColorUpdates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, update: impl Into<ColorUpdate>) {
        self.0.insert(id.into(), update.into());
    }

    /// Parse `color` and set it as `id`'s override
    pub fn insert_str(&mut self, id: impl Into<String>, color: &str) -> Result<()> {
        let color: Color = color.parse()?;
        self.insert(id, color);
        Ok(())
    }

    pub fn with(mut self, id: impl Into<String>, update: impl Into<ColorUpdate>) -> Self {
        self.insert(id, update);
        self
    }

    /// Later entries win
    pub fn extend(&mut self, other: ColorUpdates) {
        self.0.extend(other.0);
    }

    pub fn get(&self, id: &str) -> Option<&ColorUpdate> {
        self.0.get(id)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::hex(0xc8102e);
    const BLUE: Color = Color::hex(0x41b6e6);
    const WHITE: Color = Color::hex(0xffffff);

    #[test]
    fn solid_on_outline_only_feature_sets_stroke() {
        let mut style = StyleDef::stroke(RED).resolve();
        style.apply("center_faceoff_circle", 1, &WHITE.into()).unwrap();
        assert_eq!(style.fill, Fill::None);
        assert_eq!(style.stroke, Some(WHITE));
    }

    #[test]
    fn solid_on_filled_feature_sets_fill() {
        let mut style = StyleDef::fill(RED).resolve();
        style.apply("center_line", 1, &BLUE.into()).unwrap();
        assert_eq!(style.fill, Fill::Solid(BLUE));
        assert_eq!(style.stroke, None);
    }

    #[test]
    fn layered_override_must_match_layer_count() {
        static LAYERS: [Option<Color>; 2] = [Some(RED), Some(BLUE)];
        let mut style = StyleDef::layered(&LAYERS).resolve();
        style
            .apply("goal_crease", 2, &ColorUpdate::Layered(vec![Some(WHITE), None]))
            .unwrap();
        assert_eq!(style.layer_fill(0), Some(WHITE));
        assert_eq!(style.layer_fill(1), None);

        let err = style
            .apply("goal_crease", 2, &ColorUpdate::Layered(vec![Some(WHITE)]))
            .unwrap_err();
        assert!(matches!(err, SurfaceError::LayerMismatch { expected: 2, found: 1, .. }));
    }

    #[test]
    fn clear_keeps_outline() {
        let mut style = StyleDef::outlined(WHITE, RED).resolve();
        style.apply("bench", 1, &ColorUpdate::Clear).unwrap();
        assert_eq!(style.fill, Fill::None);
        assert_eq!(style.stroke, Some(RED));
    }

    #[test]
    fn updates_parse_strings() {
        let mut updates = ColorUpdates::new();
        updates.insert_str("ice", "#fff").unwrap();
        assert_eq!(updates.get("ice"), Some(&ColorUpdate::Solid(WHITE)));
        assert!(updates.insert_str("ice", "not-a-color").is_err());
    }
}
