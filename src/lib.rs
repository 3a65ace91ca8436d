//! Rule-book accurate, to-scale geometry for sports playing surfaces.
//!
//! A [`Surface`] is one league's version of a sport: its dimensions come from
//! the bundled rule books, its features are built as plain geometric
//! primitives around the surface's center, and drawing hands them to a
//! [`Backend`] after scaling, rotating and translating them into display
//! space.
//!
//! ```
//! use sportgeo::{DrawRequest, Sport, Surface, SurfaceOptions, Unit};
//!
//! let options = SurfaceOptions::new().units(Unit::Meters).translate(100.0, 42.5);
//! let rink = Surface::with_options(Sport::Hockey, "nhl", options)?;
//! let drawing = rink.draw(DrawRequest::new().display_range("offensive zone"))?;
//! assert!(drawing.limits().min.x > 100.0);
//! # Ok::<(), sportgeo::SurfaceError>(())
//! ```

use pest_derive::Parser;

pub mod backend;
pub mod display;
pub mod errors;
pub mod features;
pub mod geometry;
mod log;
pub mod registry;
pub mod rulebook;
pub mod scene;
pub mod style;
pub mod surface;
pub mod types;
pub mod units;

#[derive(Parser)]
#[grammar = "rulebook.pest"]
pub struct RulebookParser;

pub use backend::{Backend, Drawing, Mark, Recorder, StyledPrimitive};
pub use display::{DisplayRange, Limit, RangeCatalog};
pub use errors::{Result, RulebookError, SurfaceError};
pub use geometry::{Geometry, Primitive, Transform, TransformState};
pub use registry::{Configuration, DimensionOverrides, Sport, leagues, load};
pub use scene::{Feature, Scene};
pub use style::{ColorUpdate, ColorUpdates, Fill, Style};
pub use surface::{DrawRequest, Surface, SurfaceOptions};
pub use types::{BBox, Color};
pub use units::{Unit, convert};

/// Build the default surface for a sport and league given by name.
///
/// Both names are matched loosely: `"Ice Hockey"` and `"NBA G League"` work.
pub fn surface(sport: &str, league: &str) -> Result<Surface> {
    Surface::new(sport.parse()?, league)
}
