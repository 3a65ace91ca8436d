//! Linear units and conversion between them.
//!
//! Every unit is defined by an exact length in meters (the international yard
//! and pound agreement fixes the inch at 0.0254 m), so conversion is a single
//! multiplicative factor.

use std::fmt;
use std::str::FromStr;

use crate::errors::SurfaceError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Unit {
    Feet,
    Yards,
    Meters,
    Inches,
    Centimeters,
}

impl Unit {
    pub const ALL: [Unit; 5] = [
        Unit::Feet,
        Unit::Yards,
        Unit::Meters,
        Unit::Inches,
        Unit::Centimeters,
    ];

    /// Length of one of this unit in meters
    pub const fn meters(self) -> f64 {
        match self {
            Unit::Feet => 0.3048,
            Unit::Yards => 0.9144,
            Unit::Meters => 1.0,
            Unit::Inches => 0.0254,
            Unit::Centimeters => 0.01,
        }
    }

    /// Short name used by rule books
    pub const fn abbreviation(self) -> &'static str {
        match self {
            Unit::Feet => "ft",
            Unit::Yards => "yd",
            Unit::Meters => "m",
            Unit::Inches => "in",
            Unit::Centimeters => "cm",
        }
    }
}

/// Convert `value` from one unit to another.
///
/// Converting to the same unit returns `value` untouched.
pub fn convert(value: f64, from: Unit, to: Unit) -> f64 {
    if from == to {
        return value;
    }
    value * from.meters() / to.meters()
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

impl FromStr for Unit {
    type Err = SurfaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ft" | "foot" | "feet" => Ok(Unit::Feet),
            "yd" | "yard" | "yards" => Ok(Unit::Yards),
            "m" | "meter" | "meters" | "metre" | "metres" => Ok(Unit::Meters),
            "in" | "inch" | "inches" => Ok(Unit::Inches),
            "cm" | "centimeter" | "centimeters" | "centimetre" | "centimetres" => {
                Ok(Unit::Centimeters)
            }
            _ => Err(SurfaceError::InvalidUnit { name: s.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        if b == 0.0 {
            a.abs() < 1e-12
        } else {
            ((a - b) / b).abs() < 1e-9
        }
    }

    #[test]
    fn same_unit_is_exact() {
        for unit in Unit::ALL {
            for v in [0.0, 0.1, 1.0 / 3.0, 53.3333, 1e9] {
                assert_eq!(convert(v, unit, unit), v);
            }
        }
    }

    #[test]
    fn round_trip_every_pair() {
        for a in Unit::ALL {
            for b in Unit::ALL {
                for v in [0.0, 0.1667, 1.0, 85.0, 120.0, 12345.678] {
                    let back = convert(convert(v, a, b), b, a);
                    assert!(close(back, v), "{v} {a}->{b}->{a} gave {back}");
                }
            }
        }
    }

    #[test]
    fn known_factors() {
        assert!(close(convert(3.0, Unit::Feet, Unit::Yards), 1.0));
        assert!(close(convert(1.0, Unit::Feet, Unit::Inches), 12.0));
        assert!(close(convert(200.0, Unit::Feet, Unit::Meters), 60.96));
        assert!(close(convert(1.0, Unit::Meters, Unit::Centimeters), 100.0));
        assert!(close(convert(100.0, Unit::Yards, Unit::Meters), 91.44));
    }

    #[test]
    fn conversion_is_linear() {
        let f = convert(1.0, Unit::Yards, Unit::Centimeters);
        assert!(close(convert(7.5, Unit::Yards, Unit::Centimeters), 7.5 * f));
    }

    #[test]
    fn parse_names() {
        assert_eq!("Feet".parse::<Unit>().unwrap(), Unit::Feet);
        assert_eq!(" metres ".parse::<Unit>().unwrap(), Unit::Meters);
        assert_eq!("cm".parse::<Unit>().unwrap(), Unit::Centimeters);
        let err = "furlongs".parse::<Unit>().unwrap_err();
        assert!(matches!(err, SurfaceError::InvalidUnit { ref name } if name == "furlongs"));
    }
}
