use crate::attribute;
use serde::Deserialize;

pub const DEFAULT_WIDTH: i32 = 1080;
pub const DEFAULT_HEIGHT: i32 = 720;

/// Outer size of a surface, borders included
///
/// Deserialized from the optional `{ w, h }` object handed to the js
/// constructor. Missing or unreadable fields fall back to 1080×720.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawSurfaceOptions")]
pub struct SurfaceOptions {
    pub w: i32,
    pub h: i32,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        SurfaceOptions {
            w: DEFAULT_WIDTH,
            h: DEFAULT_HEIGHT,
        }
    }
}

/// A length as page scripts pass it : `800`, `800.5` or `"800px"`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Length {
    Number(f64),
    Text(String),
}

impl Length {
    /// Whole pixels, truncated toward zero like an integer parse
    pub fn pixels(&self) -> Option<i32> {
        match self {
            // `as` saturates at the i32 bounds
            Length::Number(number) if number.is_finite() => Some(number.trunc() as i32),
            Length::Number(_) => None,
            Length::Text(text) => attribute::leading_int(text),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSurfaceOptions {
    w: Option<Length>,
    h: Option<Length>,
}

impl From<RawSurfaceOptions> for SurfaceOptions {
    fn from(raw: RawSurfaceOptions) -> Self {
        let pixels = |length: Option<Length>, fallback: i32| {
            length.and_then(|length| length.pixels()).unwrap_or(fallback)
        };
        SurfaceOptions {
            w: pixels(raw.w, DEFAULT_WIDTH),
            h: pixels(raw.h, DEFAULT_HEIGHT),
        }
    }
}

/// Border widths on one axis, as computed css values ("2px")
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Borders {
    pub start: i32,
    pub end: i32,
}

impl Borders {
    /// Unreadable values count as 0
    pub fn from_css(start: &str, end: &str) -> Self {
        Borders {
            start: attribute::leading_int(start).unwrap_or(0),
            end: attribute::leading_int(end).unwrap_or(0),
        }
    }

    /// Content length left for `outer` once both borders are taken
    pub fn content(&self, outer: i32) -> i32 {
        outer - self.start - self.end
    }
}

pub fn px(length: i32) -> String {
    format!("{}px", length)
}
