#![forbid(unsafe_code)]

//! Environment overrides for [`SelectorStyle`].
//!
//! | variable | accepted values |
//! |---|---|
//! | `TVG_STROKE_WIDTH` | non-negative float (pixels) |
//! | `TVG_STROKE_POSITION` | `inside`, `center`, `outside`, or code `0..=2` |
//! | `TVG_SELECTOR_POSITION` | `over`, `under`, or code `0..=1` |
//! | `TVG_SELECTOR_SHAPE` | `rectangle`, `circle`, or code `0..=1` |
//! | `TVG_ANIMATE` | bool (`1/0/true/false/yes/no/on/off`) |
//! | `TVG_FILLED` | bool |
//! | `TVG_CORNER_RADIUS` | `r` or `rx,ry` |
//!
//! Unset variables leave the base value alone. A set but malformed value is
//! an error, never silently ignored.

use crate::error::StyleError;
use crate::style::{SelectorPosition, SelectorShape, SelectorStyle, StrokePosition};

pub const ENV_STROKE_WIDTH: &str = "TVG_STROKE_WIDTH";
pub const ENV_STROKE_POSITION: &str = "TVG_STROKE_POSITION";
pub const ENV_SELECTOR_POSITION: &str = "TVG_SELECTOR_POSITION";
pub const ENV_SELECTOR_SHAPE: &str = "TVG_SELECTOR_SHAPE";
pub const ENV_ANIMATE: &str = "TVG_ANIMATE";
pub const ENV_FILLED: &str = "TVG_FILLED";
pub const ENV_CORNER_RADIUS: &str = "TVG_CORNER_RADIUS";

impl SelectorStyle {
    /// Defaults with overrides from the process environment.
    pub fn from_env() -> Result<Self, StyleError> {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Defaults with overrides from a custom lookup (for tests).
    pub fn from_env_with<F>(get_env: F) -> Result<Self, StyleError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::default().with_env_overrides(get_env)
    }

    /// Apply overrides from `get_env` on top of `self`.
    pub fn with_env_overrides<F>(mut self, get_env: F) -> Result<Self, StyleError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = get_env(ENV_STROKE_WIDTH) {
            let width: f32 = value
                .trim()
                .parse()
                .map_err(|_| invalid(ENV_STROKE_WIDTH, &value))?;
            if width.is_nan() || width < 0.0 {
                return Err(StyleError::NegativeStrokeWidth(width));
            }
            self.stroke_width = width;
        }

        if let Some(value) = get_env(ENV_STROKE_POSITION) {
            self.stroke_position = match parse_code(&value) {
                Some(code) => StrokePosition::from_code(code)?,
                None => StrokePosition::parse(&value)
                    .ok_or_else(|| invalid(ENV_STROKE_POSITION, &value))?,
            };
        }

        if let Some(value) = get_env(ENV_SELECTOR_POSITION) {
            self.selector_position = match parse_code(&value) {
                Some(code) => SelectorPosition::from_code(code)?,
                None => SelectorPosition::parse(&value)
                    .ok_or_else(|| invalid(ENV_SELECTOR_POSITION, &value))?,
            };
        }

        if let Some(value) = get_env(ENV_SELECTOR_SHAPE) {
            self.shape = match parse_code(&value) {
                Some(code) => SelectorShape::from_code(code)?,
                None => match value.trim().to_ascii_lowercase().as_str() {
                    "rectangle" | "rect" => SelectorShape::Rectangle,
                    "circle" => SelectorShape::Circle,
                    _ => return Err(invalid(ENV_SELECTOR_SHAPE, &value)),
                },
            };
        }

        if let Some(value) = get_env(ENV_ANIMATE) {
            self.animate_changes = parse_bool(&value).ok_or_else(|| invalid(ENV_ANIMATE, &value))?;
        }

        if let Some(value) = get_env(ENV_FILLED) {
            self.filled = parse_bool(&value).ok_or_else(|| invalid(ENV_FILLED, &value))?;
        }

        if let Some(value) = get_env(ENV_CORNER_RADIUS) {
            let (x, y) =
                parse_radius(&value).ok_or_else(|| invalid(ENV_CORNER_RADIUS, &value))?;
            self = self.with_corner_radius(x, y);
        }

        Ok(self)
    }
}

fn invalid(key: &'static str, value: &str) -> StyleError {
    StyleError::InvalidOverride {
        key,
        value: value.to_string(),
    }
}

fn parse_code(value: &str) -> Option<i32> {
    value.trim().parse().ok()
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_radius(value: &str) -> Option<(f32, f32)> {
    let parse = |s: &str| -> Option<f32> {
        let v: f32 = s.trim().parse().ok()?;
        (v.is_finite() && v >= 0.0).then_some(v)
    };
    match value.split_once(',') {
        Some((x, y)) => Some((parse(x)?, parse(y)?)),
        None => {
            let r = parse(value)?;
            Some((r, r))
        }
    }
}
