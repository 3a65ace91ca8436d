//! The user-facing surface: a configured league plus its display state.

use glam::DVec2;

use crate::backend::{Backend, Drawing, Recorder, StyledPrimitive};
use crate::display::{self, DisplayRange, Limit};
use crate::errors::Result;
use crate::geometry::{Geometry, Transform, TransformState};
use crate::log::debug;
use crate::registry::{self, Configuration, DimensionOverrides, Sport};
use crate::scene::Scene;
use crate::style::{ColorUpdate, ColorUpdates};
use crate::types::BBox;
use crate::units::Unit;

/// Construction options for a [`Surface`]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SurfaceOptions {
    pub display_range: DisplayRange,
    pub x_translate: f64,
    pub y_translate: f64,
    pub rotation_degrees: f64,
    pub dimension_overrides: DimensionOverrides,
    pub colors: ColorUpdates,
    /// Display unit; the league's native unit when unset
    pub units: Option<Unit>,
    pub xlims: Option<Limit>,
    pub ylims: Option<Limit>,
}

impl SurfaceOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display_range(mut self, range: impl Into<DisplayRange>) -> Self {
        self.display_range = range.into();
        self
    }

    pub fn translate(mut self, x: f64, y: f64) -> Self {
        self.x_translate = x;
        self.y_translate = y;
        self
    }

    pub fn rotation(mut self, degrees: f64) -> Self {
        self.rotation_degrees = degrees;
        self
    }

    pub fn dimension(mut self, name: impl Into<String>, value: f64) -> Self {
        self.dimension_overrides.insert(name.into(), value);
        self
    }

    pub fn color(mut self, id: impl Into<String>, update: impl Into<ColorUpdate>) -> Self {
        self.colors.insert(id, update);
        self
    }

    pub fn colors(mut self, colors: ColorUpdates) -> Self {
        self.colors.extend(colors);
        self
    }

    pub fn units(mut self, unit: Unit) -> Self {
        self.units = Some(unit);
        self
    }

    /// A `(min, max)` pair, or a lone lower bound that runs to the far edge
    pub fn xlims(mut self, limit: impl Into<Limit>) -> Self {
        self.xlims = Some(limit.into());
        self
    }

    /// A `(min, max)` pair, or a lone lower bound that runs to the far edge
    pub fn ylims(mut self, limit: impl Into<Limit>) -> Self {
        self.ylims = Some(limit.into());
        self
    }
}

/// Per-call overrides for [`Surface::draw`]; unset fields fall back to the
/// surface's own settings
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawRequest {
    pub display_range: Option<DisplayRange>,
    pub rotation_degrees: Option<f64>,
    pub xlims: Option<Limit>,
    pub ylims: Option<Limit>,
}

impl DrawRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display_range(mut self, range: impl Into<DisplayRange>) -> Self {
        self.display_range = Some(range.into());
        self
    }

    pub fn rotation(mut self, degrees: f64) -> Self {
        self.rotation_degrees = Some(degrees);
        self
    }

    pub fn xlims(mut self, limit: impl Into<Limit>) -> Self {
        self.xlims = Some(limit.into());
        self
    }

    pub fn ylims(mut self, limit: impl Into<Limit>) -> Self {
        self.ylims = Some(limit.into());
        self
    }
}

/// A sport surface for one league.
///
/// Geometry is built once in the league's native unit. Units, rotation and
/// translation only change the transform applied when drawing, so they are
/// cheap to change; dimension and color changes rebuild the whole scene.
#[derive(Clone, Debug)]
pub struct Surface {
    config: Configuration,
    scene: Scene,
    overrides: DimensionOverrides,
    colors: ColorUpdates,
    state: TransformState,
    display_range: DisplayRange,
    xlims: Option<Limit>,
    ylims: Option<Limit>,
}

impl Surface {
    /// The default surface for `league`, drawn in its native unit
    pub fn new(sport: Sport, league: &str) -> Result<Self> {
        Self::with_options(sport, league, SurfaceOptions::default())
    }

    pub fn with_options(sport: Sport, league: &str, options: SurfaceOptions) -> Result<Self> {
        let config = registry::load(sport, league, &options.dimension_overrides)?;
        let scene = Scene::build(&config, &options.colors)?;
        let state = TransformState::new(options.units.unwrap_or(config.native_unit))
            .with_translation(options.x_translate, options.y_translate)
            .with_rotation(options.rotation_degrees);

        Ok(Self {
            config,
            scene,
            overrides: options.dimension_overrides,
            colors: options.colors,
            state,
            display_range: options.display_range,
            xlims: options.xlims,
            ylims: options.ylims,
        })
    }

    pub fn sport(&self) -> Sport {
        self.config.sport
    }

    pub fn league(&self) -> &str {
        &self.config.league
    }

    pub fn native_unit(&self) -> Unit {
        self.config.native_unit
    }

    pub fn units(&self) -> Unit {
        self.state.target_unit
    }

    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn state(&self) -> &TransformState {
        &self.state
    }

    // ========================================================================
    // Rebuilding
    // ========================================================================

    /// Merge further dimension overrides and rebuild. On error the surface
    /// is left as it was.
    pub fn update_dimensions(&mut self, updates: &DimensionOverrides) -> Result<()> {
        let mut overrides = self.overrides.clone();
        overrides.extend(updates.iter().map(|(k, v)| (k.clone(), *v)));
        self.rebuild(overrides, self.colors.clone())
    }

    /// Merge further color overrides and rebuild. On error the surface is
    /// left as it was.
    pub fn update_colors(&mut self, updates: ColorUpdates) -> Result<()> {
        let mut colors = self.colors.clone();
        colors.extend(updates);
        self.rebuild(self.overrides.clone(), colors)
    }

    /// Back to the rule book's dimensions, keeping color overrides
    pub fn reset_dimensions(&mut self) -> Result<()> {
        self.rebuild(DimensionOverrides::new(), self.colors.clone())
    }

    /// Back to the default colors, keeping dimension overrides
    pub fn reset_colors(&mut self) -> Result<()> {
        self.rebuild(self.overrides.clone(), ColorUpdates::new())
    }

    fn rebuild(&mut self, overrides: DimensionOverrides, colors: ColorUpdates) -> Result<()> {
        let config = registry::load(self.config.sport, &self.config.league, &overrides)?;
        let scene = Scene::build(&config, &colors)?;
        debug!(
            league = %config.league,
            overrides = overrides.len(),
            colors = colors.len(),
            "rebuilt surface"
        );
        self.config = config;
        self.scene = scene;
        self.overrides = overrides;
        self.colors = colors;
        Ok(())
    }

    // ========================================================================
    // Transform state
    // ========================================================================

    pub fn set_units(&mut self, unit: Unit) {
        self.state.target_unit = unit;
    }

    pub fn set_translation(&mut self, x: f64, y: f64) {
        self.state.x_translate = x;
        self.state.y_translate = y;
    }

    pub fn set_rotation(&mut self, degrees: f64) {
        self.state.rotation_degrees = degrees;
    }

    pub fn transform(&self) -> Transform {
        Transform::new(self.config.native_unit, &self.state)
    }

    /// Map a native surface coordinate into display space
    pub fn apply(&self, p: DVec2) -> DVec2 {
        self.transform().apply(p)
    }

    // ========================================================================
    // Display ranges
    // ========================================================================

    /// Display-space bounds of `range` under the current transform
    pub fn resolve_display_range(
        &self,
        range: &DisplayRange,
        xlims: Option<Limit>,
        ylims: Option<Limit>,
    ) -> Result<BBox> {
        display::resolve(range, &self.transform(), self.scene.catalog(), xlims, ylims)
    }

    // ========================================================================
    // Drawing
    // ========================================================================

    /// Draw into a [`Recorder`]
    pub fn draw(&self, request: DrawRequest) -> Result<Drawing<Recorder>> {
        self.draw_on(Recorder::default(), request)
    }

    /// Send every feature, transformed and in z-order, to `backend`
    pub fn draw_on<B: Backend>(&self, mut backend: B, request: DrawRequest) -> Result<Drawing<B>> {
        let mut state = self.state;
        if let Some(degrees) = request.rotation_degrees {
            state.rotation_degrees = degrees;
        }
        let transform = Transform::new(self.config.native_unit, &state);

        let range = request.display_range.as_ref().unwrap_or(&self.display_range);
        let limits = display::resolve(
            range,
            &transform,
            self.scene.catalog(),
            request.xlims.or(self.xlims),
            request.ylims.or(self.ylims),
        )?;

        backend.set_limits(limits);
        for feature in self.scene.features() {
            backend.draw_primitive(StyledPrimitive {
                id: feature.id,
                z_order: feature.z_order,
                primitive: feature.primitive.transformed(&transform),
                style: feature.style.clone(),
            });
        }

        Ok(Drawing::new(
            backend,
            transform,
            self.scene.outline().clone(),
            limits,
        ))
    }

    /// Whether a native coordinate lies on the playing surface
    pub fn contains(&self, p: DVec2) -> bool {
        self.scene.outline().contains(p)
    }

    /// Declared overall width and height in the display unit
    pub fn declared_extent(&self) -> (f64, f64) {
        let extent = self.scene.extent();
        let scale = self.transform().scale();
        (extent.width() * scale, extent.height() * scale)
    }

    // ========================================================================
    // Listings
    // ========================================================================

    /// Ids accepted by color overrides
    pub fn feature_ids(&self) -> Vec<&'static str> {
        self.scene.ids()
    }

    /// Names accepted by dimension overrides
    pub fn dimension_names(&self) -> Vec<&str> {
        self.config.dimensions.names().collect()
    }

    pub fn display_range_names(&self) -> Vec<&'static str> {
        self.scene.catalog().names()
    }
}
