//! Strongly-typed values shared by every module: validated lengths, bounding
//! boxes and colors.

use std::fmt;
use std::str::FromStr;

use glam::{DVec2, dvec2};

use crate::errors::SurfaceError;

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is negative when non-negative required
    Negative,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Negative => write!(f, "value is negative"),
        }
    }
}

impl std::error::Error for NumericError {}

/// A rule-book length, in whatever unit its table declares.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Length(pub f64);

impl Length {
    pub const ZERO: Length = Length(0.0);

    /// Create a Length with validation (rejects NaN/infinite)
    #[inline]
    pub fn try_new(val: f64) -> Result<Length, NumericError> {
        if val.is_nan() {
            Err(NumericError::NaN)
        } else if val.is_infinite() {
            Err(NumericError::Infinite)
        } else {
            Ok(Length(val))
        }
    }

    /// Create a non-negative Length with validation
    #[inline]
    pub fn try_non_negative(val: f64) -> Result<Length, NumericError> {
        let len = Length::try_new(val)?;
        if len.0 < 0.0 {
            Err(NumericError::Negative)
        } else {
            Ok(len)
        }
    }

    /// Get the raw value
    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox {
    pub min: DVec2,
    pub max: DVec2,
}

impl Default for BBox {
    fn default() -> Self {
        BBox::new()
    }
}

impl BBox {
    /// Create an empty bounding box (will expand on first point)
    pub fn new() -> Self {
        BBox {
            min: DVec2::splat(f64::MAX),
            max: DVec2::splat(f64::MIN),
        }
    }

    /// Box spanning `(x_min, x_max)` by `(y_min, y_max)`; reversed pairs are swapped.
    pub fn from_limits(x: (f64, f64), y: (f64, f64)) -> Self {
        BBox {
            min: dvec2(x.0.min(x.1), y.0.min(y.1)),
            max: dvec2(x.0.max(x.1), y.0.max(y.1)),
        }
    }

    /// Box of the given size centered on the origin
    pub fn centered(width: f64, height: f64) -> Self {
        BBox::from_limits((-width / 2.0, width / 2.0), (-height / 2.0, height / 2.0))
    }

    /// Check if the bbox is empty (never expanded)
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Expand to include a point
    pub fn expand_point(&mut self, p: DVec2) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Expand to include another box
    pub fn union(&mut self, other: &BBox) {
        if !other.is_empty() {
            self.expand_point(other.min);
            self.expand_point(other.max);
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> DVec2 {
        (self.min + self.max) / 2.0
    }

    /// Corners in counter-clockwise order starting at `min`
    pub fn corners(&self) -> [DVec2; 4] {
        [
            self.min,
            dvec2(self.max.x, self.min.y),
            self.max,
            dvec2(self.min.x, self.max.y),
        ]
    }

    pub fn x_limits(&self) -> (f64, f64) {
        (self.min.x, self.max.x)
    }

    pub fn y_limits(&self) -> (f64, f64) {
        (self.min.y, self.max.y)
    }

    /// Whether `p` lies inside or on the edge of the box
    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// An sRGB color with optional alpha
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Rgb(u8, u8, u8),
    Rgba(u8, u8, u8, u8),
}

impl Color {
    /// Color from a `0xrrggbb` literal
    pub const fn hex(rgb: u32) -> Color {
        Color::Rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    /// Color from a `0xrrggbbaa` literal
    pub const fn hex_alpha(rgba: u32) -> Color {
        Color::Rgba((rgba >> 24) as u8, (rgba >> 16) as u8, (rgba >> 8) as u8, rgba as u8)
    }

    pub fn alpha(&self) -> u8 {
        match self {
            Color::Rgb(..) => 0xff,
            Color::Rgba(_, _, _, a) => *a,
        }
    }

    fn named(name: &str) -> Option<Color> {
        let rgb = match name {
            "black" => 0x000000,
            "white" => 0xffffff,
            "red" => 0xff0000,
            "green" => 0x008000,
            "blue" => 0x0000ff,
            "yellow" => 0xffff00,
            "orange" => 0xffa500,
            "gray" | "grey" => 0x808080,
            "transparent" => return Some(Color::Rgba(0, 0, 0, 0)),
            _ => return None,
        };
        Some(Color::hex(rgb))
    }
}

impl FromStr for Color {
    type Err = SurfaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SurfaceError::InvalidColor { value: s.to_string() };
        let trimmed = s.trim().to_ascii_lowercase();
        let Some(digits) = trimmed.strip_prefix('#') else {
            return Color::named(&trimmed).ok_or_else(invalid);
        };
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let value = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
        match digits.len() {
            3 => {
                // #rgb doubles every nibble
                let expand = |n: u32| ((n & 0xf) * 0x11) as u8;
                Ok(Color::Rgb(expand(value >> 8), expand(value >> 4), expand(value)))
            }
            6 => Ok(Color::hex(value)),
            8 => Ok(Color::hex_alpha(value)),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Rgb(r, g, b) => write!(f, "#{:02x}{:02x}{:02x}", r, g, b),
            Color::Rgba(r, g, b, a) => write!(f, "#{:02x}{:02x}{:02x}{:02x}", r, g, b, a),
        }
    }
}
