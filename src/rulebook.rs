//! Parse rule-book files into raw league records.
//!
//! A rule book holds one sport's leagues. Records are kept exactly as written;
//! inheritance and unit conversion happen in the registry.

use miette::{NamedSource, SourceSpan};
use pest::Parser;
use pest::iterators::Pair;

use crate::errors::RulebookError;
use crate::units::Unit;
use crate::{Rule, RulebookParser};

/// A dimension line as written in the rule book
#[derive(Clone, Debug, PartialEq)]
pub struct RawDimension {
    pub name: String,
    pub value: f64,
    /// Unit suffix, if the value was written in something other than the league's unit
    pub unit: Option<Unit>,
    pub signed: bool,
}

/// One `league` block
#[derive(Clone, Debug, PartialEq)]
pub struct LeagueRecord {
    pub name: String,
    pub parent: Option<String>,
    pub unit: Option<Unit>,
    pub dimensions: Vec<RawDimension>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Rulebook {
    pub sport: String,
    pub leagues: Vec<LeagueRecord>,
}

impl Rulebook {
    pub fn league(&self, name: &str) -> Option<&LeagueRecord> {
        self.leagues.iter().find(|l| l.name == name)
    }
}

/// Parse rule-book `source`; `name` labels diagnostics.
pub fn parse(name: &str, source: &str) -> Result<Rulebook, RulebookError> {
    let pairs = RulebookParser::parse(Rule::file, source).map_err(|e| {
        let span = match e.location {
            pest::error::InputLocation::Pos(pos) => (pos, 0),
            pest::error::InputLocation::Span((start, end)) => (start, end - start),
        };
        RulebookError::Syntax {
            message: e.variant.message().to_string(),
            src: NamedSource::new(name, source.to_string()),
            span: span.into(),
        }
    })?;

    let ctx = Ctx { name, source };
    let mut book = Rulebook {
        sport: String::new(),
        leagues: Vec::new(),
    };

    for pair in pairs {
        if pair.as_rule() != Rule::file {
            continue;
        }
        for inner in pair.into_inner() {
            match inner.as_rule() {
                Rule::sport_decl => {
                    if let Some(ident) = inner.into_inner().next() {
                        book.sport = ident.as_str().to_string();
                    }
                }
                Rule::league => {
                    let span = span_of(&inner);
                    let league = parse_league(inner, &ctx)?;
                    if book.league(&league.name).is_some() {
                        return Err(RulebookError::DuplicateLeague {
                            league: league.name,
                            src: ctx.named_source(),
                            span,
                        });
                    }
                    book.leagues.push(league);
                }
                _ => {}
            }
        }
    }

    Ok(book)
}

struct Ctx<'a> {
    name: &'a str,
    source: &'a str,
}

impl Ctx<'_> {
    fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(self.name, self.source.to_string())
    }
}

fn span_of(pair: &Pair<Rule>) -> SourceSpan {
    let span = pair.as_span();
    (span.start(), span.end() - span.start()).into()
}

fn parse_league(pair: Pair<Rule>, ctx: &Ctx) -> Result<LeagueRecord, RulebookError> {
    let mut league = LeagueRecord {
        name: String::new(),
        parent: None,
        unit: None,
        dimensions: Vec::new(),
    };

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::ident => league.name = inner.as_str().to_string(),
            Rule::parent => {
                league.parent = inner.into_inner().next().map(|p| p.as_str().to_string());
            }
            Rule::unit_decl => {
                league.unit = inner.into_inner().next().and_then(|u| unit_of(u.as_str()));
            }
            Rule::dimension => {
                let span = span_of(&inner);
                let dim = parse_dimension(inner, ctx)?;
                if league.dimensions.iter().any(|d| d.name == dim.name) {
                    return Err(RulebookError::DuplicateDimension {
                        name: dim.name,
                        league: league.name,
                        src: ctx.named_source(),
                        span,
                    });
                }
                league.dimensions.push(dim);
            }
            _ => {}
        }
    }

    Ok(league)
}

fn parse_dimension(pair: Pair<Rule>, ctx: &Ctx) -> Result<RawDimension, RulebookError> {
    let mut dim = RawDimension {
        name: String::new(),
        value: 0.0,
        unit: None,
        signed: false,
    };

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::signed => dim.signed = true,
            Rule::ident => dim.name = inner.as_str().to_string(),
            Rule::number => {
                let text = inner.as_str();
                dim.value = text
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| RulebookError::InvalidNumber {
                        text: text.to_string(),
                        src: ctx.named_source(),
                        span: span_of(&inner),
                    })?;
            }
            Rule::unit_name => dim.unit = unit_of(inner.as_str()),
            _ => {}
        }
    }

    Ok(dim)
}

fn unit_of(abbreviation: &str) -> Option<Unit> {
    Unit::ALL.into_iter().find(|u| u.abbreviation() == abbreviation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_book() {
        let book = parse(
            "<test>",
            r#"
            sport hockey
            league nhl {
                unit ft
                rink_length = 200
                rink_width = 85   # comment
            }
            "#,
        )
        .unwrap();

        assert_eq!(book.sport, "hockey");
        assert_eq!(book.leagues.len(), 1);
        let nhl = &book.leagues[0];
        assert_eq!(nhl.name, "nhl");
        assert_eq!(nhl.unit, Some(Unit::Feet));
        assert_eq!(nhl.parent, None);
        assert_eq!(nhl.dimensions[1].name, "rink_width");
        assert_eq!(nhl.dimensions[1].value, 85.0);
    }

    #[test]
    fn parse_inheritance_and_suffixes() {
        let book = parse(
            "<test>",
            r#"
            sport soccer
            league ncaa : epl {
                goal_depth = 2 ft
                minor_line = 5 in
                signed center_offset = -1.5
                signed_mark = 3
            }
            "#,
        )
        .unwrap();

        let ncaa = book.league("ncaa").unwrap();
        assert_eq!(ncaa.parent.as_deref(), Some("epl"));
        assert_eq!(ncaa.unit, None);
        assert_eq!(ncaa.dimensions[0].unit, Some(Unit::Feet));
        assert_eq!(ncaa.dimensions[1].unit, Some(Unit::Inches));
        assert!(ncaa.dimensions[2].signed);
        assert_eq!(ncaa.dimensions[2].value, -1.5);
        assert_eq!(ncaa.dimensions[3].name, "signed_mark");
        assert!(!ncaa.dimensions[3].signed);
    }

    #[test]
    fn unit_suffix_does_not_swallow_next_name() {
        let book = parse(
            "<test>",
            "sport x\nleague a {\n unit m\n a = 1\n minor = 2\n inbound = 3\n}\n",
        )
        .unwrap();
        let names: Vec<_> = book.leagues[0]
            .dimensions
            .iter()
            .map(|d| (d.name.as_str(), d.unit))
            .collect();
        assert_eq!(names, vec![("a", None), ("minor", None), ("inbound", None)]);
    }

    #[test]
    fn duplicate_dimension_is_rejected() {
        let err = parse("<test>", "sport x league a { unit ft w = 1 w = 2 }").unwrap_err();
        assert!(matches!(err, RulebookError::DuplicateDimension { ref name, .. } if name == "w"));
    }

    #[test]
    fn duplicate_league_is_rejected() {
        let err = parse("<test>", "sport x league a { } league a { }").unwrap_err();
        assert!(matches!(err, RulebookError::DuplicateLeague { ref league, .. } if league == "a"));
    }

    #[test]
    fn syntax_error_has_span() {
        let err = parse("<test>", "sport x\nleague a { w == 1 }").unwrap_err();
        match err {
            RulebookError::Syntax { span, .. } => assert!(span.offset() > 8),
            other => panic!("expected syntax error, got {other:?}"),
        }
    }
}
