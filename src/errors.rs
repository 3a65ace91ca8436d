//! Error types with rich diagnostics using miette
//!
//! Configuration and draw-time failures name the offending key and, where a
//! closed set of valid keys exists, list it in the help text.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::registry::Sport;
use crate::types::NumericError;

pub type Result<T, E = SurfaceError> = std::result::Result<T, E>;

// ============================================================================
// Rule-book Errors
// ============================================================================

/// Errors raised while reading a rule-book file
#[derive(Error, Diagnostic, Debug)]
pub enum RulebookError {
    #[error("rule book syntax error: {message}")]
    #[diagnostic(code(sportgeo::rulebook::syntax))]
    Syntax {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("dimension `{name}` is declared twice in league `{league}`")]
    #[diagnostic(code(sportgeo::rulebook::duplicate_dimension))]
    DuplicateDimension {
        name: String,
        league: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("second declaration")]
        span: SourceSpan,
    },

    #[error("league `{league}` is declared twice")]
    #[diagnostic(code(sportgeo::rulebook::duplicate_league))]
    DuplicateLeague {
        league: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("second declaration")]
        span: SourceSpan,
    },

    #[error("invalid number `{text}`")]
    #[diagnostic(code(sportgeo::rulebook::invalid_number))]
    InvalidNumber {
        text: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("not a finite number")]
        span: SourceSpan,
    },
}

// ============================================================================
// Surface Errors
// ============================================================================

/// Errors surfaced while configuring, composing or drawing a surface
#[derive(Error, Diagnostic, Debug)]
pub enum SurfaceError {
    #[error("unknown sport: {name}")]
    #[diagnostic(code(sportgeo::config::unknown_sport))]
    UnknownSport {
        name: String,
        #[help]
        help: Option<String>,
    },

    #[error("no {sport} rule book entry for league `{league}`")]
    #[diagnostic(code(sportgeo::config::unknown_league))]
    UnknownLeague {
        sport: Sport,
        league: String,
        #[help]
        help: Option<String>,
    },

    #[error("league `{league}` inherits from unknown league `{parent}`")]
    #[diagnostic(code(sportgeo::config::unknown_parent))]
    UnknownParent { league: String, parent: String },

    #[error("league inheritance cycle: {chain}")]
    #[diagnostic(code(sportgeo::config::inheritance_cycle))]
    InheritanceCycle { chain: String },

    #[error("league `{league}` does not declare a unit")]
    #[diagnostic(
        code(sportgeo::config::missing_unit),
        help("add `unit ft` (or yd, m, in, cm) to the league or one of its parents")
    )]
    MissingUnit { league: String },

    #[error("invalid value for dimension `{name}` in league `{league}`")]
    #[diagnostic(code(sportgeo::config::invalid_dimension))]
    InvalidDimension {
        league: String,
        name: String,
        #[source]
        reason: NumericError,
    },

    #[error("league `{league}` has no dimension named `{name}` to override")]
    #[diagnostic(code(sportgeo::config::unknown_dimension))]
    UnknownDimension {
        league: String,
        name: String,
        #[help]
        help: Option<String>,
    },

    #[error("feature `{feature}` needs dimension `{dimension}`, which league `{league}` does not define")]
    #[diagnostic(code(sportgeo::config::missing_dimension))]
    MissingDimension {
        league: String,
        feature: String,
        dimension: String,
    },

    #[error("unknown feature: {id}")]
    #[diagnostic(code(sportgeo::style::unknown_feature))]
    UnknownFeature {
        id: String,
        #[help]
        help: Option<String>,
    },

    #[error("feature `{id}` has {expected} color layers, got {found}")]
    #[diagnostic(code(sportgeo::style::layer_mismatch))]
    LayerMismatch {
        id: String,
        expected: usize,
        found: usize,
    },

    #[error("invalid color: {value}")]
    #[diagnostic(
        code(sportgeo::style::invalid_color),
        help("use #rgb, #rrggbb, #rrggbbaa or a basic color name")
    )]
    InvalidColor { value: String },

    #[error("unknown display range `{name}` for {sport} (valid: {valid})")]
    #[diagnostic(code(sportgeo::display::unknown_range))]
    UnknownDisplayRange {
        name: String,
        sport: Sport,
        valid: String,
    },

    #[error("invalid unit: {name}")]
    #[diagnostic(
        code(sportgeo::units::invalid_unit),
        help("supported units: ft, yd, m, in, cm")
    )]
    InvalidUnit { name: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Rulebook(#[from] RulebookError),
}
