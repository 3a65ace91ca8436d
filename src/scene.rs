//! Surface composition: one league's features, styled and ordered.

use crate::display::{NamedRange, RangeCatalog};
use crate::errors::{Result, SurfaceError};
use crate::features::{self, SportTable};
use crate::geometry::Primitive;
use crate::log::debug;
use crate::registry::{Configuration, Dims, Sport};
use crate::style::{ColorUpdates, Style};
use crate::types::BBox;

/// One drawable feature in native, center-origin coordinates
#[derive(Clone, Debug, PartialEq)]
pub struct Feature {
    pub id: &'static str,
    pub primitive: Primitive,
    pub z_order: i32,
    pub style: Style,
    /// Dimensions the geometry was built from, sorted by name
    pub dimensions: Vec<&'static str>,
}

/// Every feature of a configured surface, in draw order
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    sport: Sport,
    features: Vec<Feature>,
    catalog: RangeCatalog,
    outline: Primitive,
    extent: BBox,
}

impl Scene {
    /// Build all features of `config`'s sport and apply `colors` on top of
    /// the default styles.
    ///
    /// Fails without partial results if any color key names a feature the
    /// sport does not have or any feature needs a dimension the league does
    /// not define.
    pub fn build(config: &Configuration, colors: &ColorUpdates) -> Result<Scene> {
        let table = features::table(config.sport);
        check_color_keys(table, colors)?;

        let mut built = Vec::with_capacity(table.features.len());
        for def in table.features {
            let dims = Dims::new(&config.dimensions, def.id);
            let primitive = (def.build)(&dims)?;
            let mut style = def.style.resolve();
            if let Some(update) = colors.get(def.id) {
                style.apply(def.id, primitive.layer_count(), update)?;
            }
            built.push(Feature {
                id: def.id,
                primitive,
                z_order: def.z_order,
                style,
                dimensions: dims.into_used(),
            });
        }
        // Stable, so features sharing a z-order keep table order
        built.sort_by_key(|f| f.z_order);

        let mut ranges = Vec::with_capacity(table.ranges.len());
        for def in table.ranges {
            let dims = Dims::new(&config.dimensions, def.name);
            ranges.push(NamedRange {
                name: def.name,
                aliases: def.aliases,
                bounds: (def.bounds)(&dims)?,
            });
        }

        let outline = (table.surface)(&Dims::new(&config.dimensions, "surface"))?;
        let extent = {
            let dims = Dims::new(&config.dimensions, "extent");
            BBox::centered(
                features::sum_extent(&dims, table.extent_x)?,
                features::sum_extent(&dims, table.extent_y)?,
            )
        };

        debug!(
            sport = config.sport.name(),
            league = %config.league,
            features = built.len(),
            "built scene"
        );

        Ok(Scene {
            sport: config.sport,
            features: built,
            catalog: RangeCatalog::new(config.sport, ranges),
            outline,
            extent,
        })
    }

    pub fn sport(&self) -> Sport {
        self.sport
    }

    /// Features in ascending z-order
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn feature(&self, id: &str) -> Option<&Feature> {
        self.features.iter().find(|f| f.id == id)
    }

    pub fn catalog(&self) -> &RangeCatalog {
        &self.catalog
    }

    /// Outline of the playing surface in native coordinates
    pub fn outline(&self) -> &Primitive {
        &self.outline
    }

    /// Declared overall width and height, centered on the origin, in
    /// native units
    pub fn extent(&self) -> BBox {
        self.extent
    }

    /// Feature ids in catalog order
    pub fn ids(&self) -> Vec<&'static str> {
        features::table(self.sport)
            .features
            .iter()
            .map(|f| f.id)
            .collect()
    }
}

fn check_color_keys(table: &SportTable, colors: &ColorUpdates) -> Result<()> {
    for key in colors.keys() {
        if table.feature(key).is_none() {
            let ids: Vec<&str> = table.features.iter().map(|f| f.id).collect();
            return Err(SurfaceError::UnknownFeature {
                id: key.to_string(),
                help: Some(format!("{} features: {}", table.sport, ids.join(", "))),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{DimensionOverrides, load};
    use crate::style::{ColorUpdate, Fill};
    use crate::types::Color;

    fn nhl() -> Configuration {
        load(Sport::Hockey, "nhl", &DimensionOverrides::new()).unwrap()
    }

    // ==== Build tests ====

    #[test]
    fn features_come_out_in_z_order() {
        let scene = Scene::build(&nhl(), &ColorUpdates::new()).unwrap();
        let z: Vec<i32> = scene.features().iter().map(|f| f.z_order).collect();
        assert!(z.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(scene.features()[0].id, "boards");
        assert_eq!(scene.features().len(), scene.ids().len());
    }

    #[test]
    fn features_record_their_dimensions() {
        let scene = Scene::build(&nhl(), &ColorUpdates::new()).unwrap();
        let crease = scene.feature("goal_crease").unwrap();
        assert!(crease.dimensions.contains(&"goal_crease_radius"));
        assert!(!crease.dimensions.contains(&"faceoff_circle_radius"));
    }

    #[test]
    fn extent_matches_rule_book() {
        let scene = Scene::build(&nhl(), &ColorUpdates::new()).unwrap();
        assert!((scene.extent().width() - 200.0).abs() < 1e-12);
        assert!((scene.extent().height() - 85.0).abs() < 1e-12);
    }

    // ==== Color tests ====

    #[test]
    fn color_override_applies_to_one_feature() {
        let blue = Color::hex(0x0000ff);
        let colors = ColorUpdates::new().with("center_line", blue);
        let scene = Scene::build(&nhl(), &colors).unwrap();
        assert_eq!(scene.feature("center_line").unwrap().style.fill, Fill::Solid(blue));
        assert_ne!(scene.feature("goal_line").unwrap().style.fill, Fill::Solid(blue));
    }

    #[test]
    fn unknown_color_key_fails_whole_build() {
        let colors = ColorUpdates::new()
            .with("center_line", Color::hex(0x0000ff))
            .with("typo_feature", Color::hex(0xff0000));
        let err = Scene::build(&nhl(), &colors).unwrap_err();
        insta::assert_snapshot!(err.to_string(), @"unknown feature: typo_feature");
    }

    #[test]
    fn layered_override_checks_layer_count() {
        let colors = ColorUpdates::new().with(
            "goal_crease",
            ColorUpdate::Layered(vec![Some(Color::hex(0xffffff))]),
        );
        let err = Scene::build(&nhl(), &colors).unwrap_err();
        assert!(matches!(err, SurfaceError::LayerMismatch { expected: 2, found: 1, .. }));
    }
}
