//! Dimension registry: resolves a sport and league into a validated, flat
//! table of named dimensions in the league's native unit.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::errors::{Result, SurfaceError};
use crate::log::{debug, trace};
use crate::rulebook::{self, LeagueRecord, Rulebook};
use crate::types::Length;
use crate::units::{Unit, convert};

/// The sports with a rule book
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sport {
    Baseball,
    Basketball,
    Curling,
    Football,
    Hockey,
    Soccer,
    Tennis,
    Volleyball,
}

impl Sport {
    pub const ALL: [Sport; 8] = [
        Sport::Baseball,
        Sport::Basketball,
        Sport::Curling,
        Sport::Football,
        Sport::Hockey,
        Sport::Soccer,
        Sport::Tennis,
        Sport::Volleyball,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Sport::Baseball => "baseball",
            Sport::Basketball => "basketball",
            Sport::Curling => "curling",
            Sport::Football => "football",
            Sport::Hockey => "hockey",
            Sport::Soccer => "soccer",
            Sport::Tennis => "tennis",
            Sport::Volleyball => "volleyball",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }

    /// Name of the bundled rule-book file
    pub fn rulebook_file(self) -> String {
        format!("{}.rulebook", self.name())
    }

    fn rulebook_source(self) -> &'static str {
        match self {
            Sport::Baseball => include_str!("../rulebooks/baseball.rulebook"),
            Sport::Basketball => include_str!("../rulebooks/basketball.rulebook"),
            Sport::Curling => include_str!("../rulebooks/curling.rulebook"),
            Sport::Football => include_str!("../rulebooks/football.rulebook"),
            Sport::Hockey => include_str!("../rulebooks/hockey.rulebook"),
            Sport::Soccer => include_str!("../rulebooks/soccer.rulebook"),
            Sport::Tennis => include_str!("../rulebooks/tennis.rulebook"),
            Sport::Volleyball => include_str!("../rulebooks/volleyball.rulebook"),
        }
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Sport {
    type Err = SurfaceError;

    fn from_str(s: &str) -> Result<Self> {
        let key = normalize_key(s);
        let sport = match key.as_str() {
            "icehockey" => Some(Sport::Hockey),
            "americanfootball" | "gridiron" => Some(Sport::Football),
            "associationfootball" | "futbol" => Some(Sport::Soccer),
            _ => Sport::ALL.into_iter().find(|sport| sport.name() == key),
        };
        sport.ok_or_else(|| SurfaceError::UnknownSport {
            name: s.to_string(),
            help: Some(format!(
                "supported sports: {}",
                Sport::ALL.map(Sport::name).join(", ")
            )),
        })
    }
}

/// Lowercase a user-facing key and drop spaces, `-` and `_`.
pub fn normalize_key(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// One resolved dimension
#[derive(Clone, Debug, PartialEq)]
pub struct Dimension {
    pub name: String,
    pub value: Length,
    pub unit: Unit,
    /// Signed offsets may be negative; everything else is validated non-negative.
    pub signed: bool,
}

/// Caller-supplied dimension values, in the league's native unit
pub type DimensionOverrides = BTreeMap<String, f64>;

/// A league's flat, validated dimension table
#[derive(Clone, Debug, PartialEq)]
pub struct DimensionTable {
    league: String,
    unit: Unit,
    entries: BTreeMap<String, Dimension>,
}

impl DimensionTable {
    pub fn league(&self) -> &str {
        &self.league
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn get(&self, name: &str) -> Option<&Dimension> {
        self.entries.get(name)
    }

    pub fn value(&self, name: &str) -> Option<f64> {
        self.entries.get(name).map(|d| d.value.raw())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Dimension> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge `overrides` into the table; the override wins.
    fn merge(&mut self, overrides: &DimensionOverrides) -> Result<()> {
        for (name, &value) in overrides {
            if !self.entries.contains_key(name) {
                return Err(SurfaceError::UnknownDimension {
                    league: self.league.clone(),
                    name: name.clone(),
                    help: Some(format!(
                        "dimensions of `{}`: {}",
                        self.league,
                        self.names().collect::<Vec<_>>().join(", ")
                    )),
                });
            }
            let league = &self.league;
            if let Some(dim) = self.entries.get_mut(name) {
                dim.value = validate(league, name, value, dim.signed)?;
            }
        }
        Ok(())
    }
}

fn validate(league: &str, name: &str, value: f64, signed: bool) -> Result<Length> {
    let checked = if signed {
        Length::try_new(value)
    } else {
        Length::try_non_negative(value)
    };
    checked.map_err(|reason| SurfaceError::InvalidDimension {
        league: league.to_string(),
        name: name.to_string(),
        reason,
    })
}

/// Dimension lookups on behalf of one feature builder.
///
/// Records every name read so callers can tell which dimensions a feature
/// depends on.
pub struct Dims<'a> {
    table: &'a DimensionTable,
    feature: &'a str,
    used: RefCell<BTreeSet<&'static str>>,
}

impl<'a> Dims<'a> {
    pub fn new(table: &'a DimensionTable, feature: &'a str) -> Self {
        Dims {
            table,
            feature,
            used: RefCell::new(BTreeSet::new()),
        }
    }

    /// Value of a required dimension
    pub fn get(&self, name: &'static str) -> Result<f64> {
        self.used.borrow_mut().insert(name);
        self.table
            .value(name)
            .ok_or_else(|| SurfaceError::MissingDimension {
                league: self.table.league.clone(),
                feature: self.feature.to_string(),
                dimension: name.to_string(),
            })
    }

    /// Half of a required dimension
    pub fn half(&self, name: &'static str) -> Result<f64> {
        Ok(self.get(name)? / 2.0)
    }

    pub fn unit(&self) -> Unit {
        self.table.unit
    }

    /// Names read so far
    pub fn into_used(self) -> Vec<&'static str> {
        self.used.into_inner().into_iter().collect()
    }
}

/// A league's resolved configuration
#[derive(Clone, Debug, PartialEq)]
pub struct Configuration {
    pub sport: Sport,
    pub league: String,
    pub native_unit: Unit,
    pub dimensions: DimensionTable,
}

fn rulebook(sport: Sport) -> Result<&'static Rulebook> {
    static BOOKS: [OnceLock<Rulebook>; 8] = [const { OnceLock::new() }; 8];

    let cell = &BOOKS[sport.index()];
    if let Some(book) = cell.get() {
        return Ok(book);
    }
    let book = rulebook::parse(&sport.rulebook_file(), sport.rulebook_source())?;
    debug!(sport = sport.name(), leagues = book.leagues.len(), "parsed rule book");
    Ok(cell.get_or_init(|| book))
}

/// League names available for `sport`, in rule-book order
pub fn leagues(sport: Sport) -> Result<Vec<String>> {
    Ok(rulebook(sport)?
        .leagues
        .iter()
        .map(|l| l.name.clone())
        .collect())
}

fn find_league<'b>(book: &'b Rulebook, sport: Sport, league: &str) -> Result<&'b LeagueRecord> {
    let key = normalize_key(league);
    book.leagues
        .iter()
        .find(|l| normalize_key(&l.name) == key)
        .ok_or_else(|| SurfaceError::UnknownLeague {
            sport,
            league: league.to_string(),
            help: Some(format!(
                "{sport} leagues: {}",
                book.leagues
                    .iter()
                    .map(|l| l.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
        })
}

/// Inheritance chain of `record`, root first
fn lineage<'b>(book: &'b Rulebook, record: &'b LeagueRecord) -> Result<Vec<&'b LeagueRecord>> {
    let mut chain = vec![record];
    let mut current = record;
    while let Some(parent) = &current.parent {
        if chain.iter().any(|l| &l.name == parent) {
            let mut names: Vec<_> = chain.iter().map(|l| l.name.as_str()).collect();
            names.push(parent);
            return Err(SurfaceError::InheritanceCycle {
                chain: names.join(" -> "),
            });
        }
        current = book.league(parent).ok_or_else(|| SurfaceError::UnknownParent {
            league: current.name.clone(),
            parent: parent.clone(),
        })?;
        chain.push(current);
    }
    chain.reverse();
    Ok(chain)
}

fn flatten(book: &Rulebook, record: &LeagueRecord) -> Result<DimensionTable> {
    let chain = lineage(book, record)?;
    debug!(league = %record.name, depth = chain.len(), "flattening league");

    let unit = chain
        .iter()
        .rev()
        .find_map(|l| l.unit)
        .ok_or_else(|| SurfaceError::MissingUnit {
            league: record.name.clone(),
        })?;

    let mut entries = BTreeMap::new();
    // Unit in force where each record was written: its own, or its nearest ancestor's
    let mut written_in = None;
    for league in &chain {
        written_in = league.unit.or(written_in);
        let record_unit = written_in.unwrap_or(unit);
        trace!(league = %league.name, unit = %record_unit, dimensions = league.dimensions.len(), "merging league record");
        for raw in &league.dimensions {
            let value = convert(raw.value, raw.unit.unwrap_or(record_unit), unit);
            let signed = raw.signed
                || entries
                    .get(&raw.name)
                    .is_some_and(|d: &Dimension| d.signed);
            let dim = Dimension {
                name: raw.name.clone(),
                value: validate(&record.name, &raw.name, value, signed)?,
                unit,
                signed,
            };
            entries.insert(raw.name.clone(), dim);
        }
    }

    Ok(DimensionTable {
        league: record.name.clone(),
        unit,
        entries,
    })
}

/// Load the dimension table of `league`, merging `overrides` before anything
/// is built from it.
pub fn load(sport: Sport, league: &str, overrides: &DimensionOverrides) -> Result<Configuration> {
    let book = rulebook(sport)?;
    let record = find_league(book, sport, league)?;
    let mut dimensions = flatten(book, record)?;
    dimensions.merge(overrides)?;

    debug!(
        sport = sport.name(),
        league = %record.name,
        dimensions = dimensions.len(),
        overrides = overrides.len(),
        "loaded configuration"
    );

    Ok(Configuration {
        sport,
        league: record.name.clone(),
        native_unit: dimensions.unit,
        dimensions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(src: &str) -> Rulebook {
        rulebook::parse("<test>", src).unwrap()
    }

    #[test]
    fn sport_names_parse() {
        assert_eq!("Hockey".parse::<Sport>().unwrap(), Sport::Hockey);
        assert_eq!("ice hockey".parse::<Sport>().unwrap(), Sport::Hockey);
        assert_eq!("american_football".parse::<Sport>().unwrap(), Sport::Football);
        assert!(matches!(
            "quidditch".parse::<Sport>(),
            Err(SurfaceError::UnknownSport { .. })
        ));
    }

    #[test]
    fn normalize_key_ignores_case_and_separators() {
        assert_eq!(normalize_key("NBA G League"), "nbagleague");
        assert_eq!(normalize_key("nba_g_league"), "nbagleague");
        assert_eq!(normalize_key("Red-Zone"), "redzone");
    }

    #[test]
    fn every_sport_has_leagues() {
        let total: usize = Sport::ALL
            .into_iter()
            .map(|sport| leagues(sport).unwrap().len())
            .sum();
        assert_eq!(total, 43);
    }

    #[test]
    fn load_nhl() {
        let config = load(Sport::Hockey, "NHL", &DimensionOverrides::new()).unwrap();
        assert_eq!(config.league, "nhl");
        assert_eq!(config.native_unit, Unit::Feet);
        assert_eq!(config.dimensions.value("rink_length"), Some(200.0));
        assert_eq!(config.dimensions.value("rink_width"), Some(85.0));
    }

    #[test]
    fn child_league_overrides_parent() {
        let ncaa = load(Sport::Hockey, "ncaa", &DimensionOverrides::new()).unwrap();
        assert_eq!(ncaa.dimensions.value("nzone_length"), Some(54.0));
        assert_eq!(ncaa.dimensions.value("short_base_width"), Some(0.0));
        assert_eq!(ncaa.dimensions.value("rink_length"), Some(200.0));

        let phf = load(Sport::Hockey, "phf", &DimensionOverrides::new()).unwrap();
        assert_eq!(phf.dimensions.value("long_base_width"), Some(0.0));
    }

    #[test]
    fn unit_suffix_is_converted_to_native_unit() {
        let ncaa = load(Sport::Soccer, "ncaa", &DimensionOverrides::new()).unwrap();
        assert_eq!(ncaa.native_unit, Unit::Yards);
        let depth = ncaa.dimensions.value("goal_depth").unwrap();
        assert!((depth - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_league_lists_alternatives() {
        let err = load(Sport::Curling, "grand slam", &DimensionOverrides::new()).unwrap_err();
        match err {
            SurfaceError::UnknownLeague { sport, league, help } => {
                assert_eq!(sport, Sport::Curling);
                assert_eq!(league, "grand slam");
                assert_eq!(help.as_deref(), Some("curling leagues: wcf"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn overrides_win_and_are_validated() {
        let mut overrides = DimensionOverrides::new();
        overrides.insert("rink_length".into(), 190.0);
        let config = load(Sport::Hockey, "nhl", &overrides).unwrap();
        assert_eq!(config.dimensions.value("rink_length"), Some(190.0));

        overrides.insert("rink_width".into(), -1.0);
        let err = load(Sport::Hockey, "nhl", &overrides).unwrap_err();
        assert!(matches!(
            err,
            SurfaceError::InvalidDimension { ref name, reason: crate::types::NumericError::Negative, .. }
                if name == "rink_width"
        ));
    }

    #[test]
    fn override_of_unknown_dimension_fails() {
        let mut overrides = DimensionOverrides::new();
        overrides.insert("zamboni_length".into(), 12.0);
        let err = load(Sport::Hockey, "nhl", &overrides).unwrap_err();
        assert!(matches!(err, SurfaceError::UnknownDimension { ref name, .. } if name == "zamboni_length"));
    }

    #[test]
    fn signed_dimensions_accept_negative_values() {
        let b = book("sport x league a { unit ft signed shift = -2 width = 3 } league b : a { shift = -4 }");
        let table = flatten(&b, b.league("b").unwrap()).unwrap();
        assert_eq!(table.value("shift"), Some(-4.0));
        assert!(table.get("shift").unwrap().signed);

        let bad = book("sport x league a { unit ft width = -3 }");
        assert!(matches!(
            flatten(&bad, bad.league("a").unwrap()),
            Err(SurfaceError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn inherited_values_keep_the_unit_they_were_written_in() {
        let b = book(
            "sport x league a { unit m width = 10 } \
             league b : a { unit ft depth = 3 } \
             league c : b { length = 2 yd }",
        );
        let table = flatten(&b, b.league("c").unwrap()).unwrap();
        assert_eq!(table.unit(), Unit::Feet);
        let width = table.value("width").unwrap();
        assert!((width - 10.0 / 0.3048).abs() < 1e-9, "width = {width}");
        assert_eq!(table.value("depth"), Some(3.0));
        assert!((table.value("length").unwrap() - 6.0).abs() < 1e-9);

        let a = flatten(&b, b.league("a").unwrap()).unwrap();
        assert_eq!(a.value("width"), Some(10.0));
    }

    #[test]
    fn inheritance_errors() {
        let b = book("sport x league a : b { unit ft } league b : a { }");
        let err = flatten(&b, b.league("a").unwrap()).unwrap_err();
        assert!(matches!(err, SurfaceError::InheritanceCycle { ref chain } if chain == "a -> b -> a"));

        let b = book("sport x league a : ghost { unit ft }");
        let err = flatten(&b, b.league("a").unwrap()).unwrap_err();
        assert!(matches!(err, SurfaceError::UnknownParent { ref parent, .. } if parent == "ghost"));

        let b = book("sport x league a { w = 1 }");
        let err = flatten(&b, b.league("a").unwrap()).unwrap_err();
        assert!(matches!(err, SurfaceError::MissingUnit { .. }));
    }

    #[test]
    fn dims_tracks_reads_and_reports_missing() {
        let config = load(Sport::Tennis, "itf", &DimensionOverrides::new()).unwrap();
        let dims = Dims::new(&config.dimensions, "net");
        assert_eq!(dims.get("net_length").unwrap(), 42.0);
        assert_eq!(dims.half("court_length").unwrap(), 39.0);
        let err = dims.get("net_height").unwrap_err();
        assert!(matches!(
            err,
            SurfaceError::MissingDimension { ref feature, ref dimension, .. }
                if feature == "net" && dimension == "net_height"
        ));
        assert_eq!(dims.into_used(), vec!["court_length", "net_height", "net_length"]);
    }
}
