#![forbid(unsafe_code)]

//! The selector style record.
//!
//! [`SelectorStyle`] is a plain value. The selector keeps one and replaces it
//! wholesale on change; the rasterizer reads it by reference and never keeps
//! shared paint state of its own.

use tvg_core::geometry::Sides;
use tvg_render::Argb;

use crate::error::StyleError;

/// Where the ring sits relative to the cell edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StrokePosition {
    /// Drawn within the cell; bounds equal the cell.
    Inside,
    /// Straddles the cell edge.
    Center,
    /// Drawn around the cell.
    #[default]
    Outside,
}

impl StrokePosition {
    /// Map a host integer code (0 inside, 1 center, 2 outside).
    pub fn from_code(code: i32) -> Result<Self, StyleError> {
        match code {
            0 => Ok(Self::Inside),
            1 => Ok(Self::Center),
            2 => Ok(Self::Outside),
            other => Err(StyleError::UnsupportedStrokePosition(other)),
        }
    }

    /// Host integer code.
    pub const fn code(self) -> i32 {
        match self {
            Self::Inside => 0,
            Self::Center => 1,
            Self::Outside => 2,
        }
    }

    pub(crate) fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "inside" => Some(Self::Inside),
            "center" | "centre" => Some(Self::Center),
            "outside" => Some(Self::Outside),
            _ => None,
        }
    }
}

/// Whether the selector draws before or after the cell content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SelectorPosition {
    #[default]
    OverContent,
    UnderContent,
}

impl SelectorPosition {
    /// Map a host integer code (0 over, 1 under).
    pub fn from_code(code: i32) -> Result<Self, StyleError> {
        match code {
            0 => Ok(Self::OverContent),
            1 => Ok(Self::UnderContent),
            other => Err(StyleError::UnsupportedSelectorPosition(other)),
        }
    }

    pub(crate) fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "over" => Some(Self::OverContent),
            "under" => Some(Self::UnderContent),
            _ => None,
        }
    }
}

/// Outline of every painted layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SelectorShape {
    /// Rounded rectangle using the style's corner radii.
    #[default]
    Rectangle,
    /// Circle centered in the layer rect, radius half its width.
    Circle,
}

impl SelectorShape {
    /// Map a host integer code (0 rectangle, 1 circle).
    ///
    /// This is the only way an unknown shape can enter the system, so it is
    /// where [`StyleError::UnsupportedShape`] is raised.
    pub fn from_code(code: i32) -> Result<Self, StyleError> {
        match code {
            0 => Ok(Self::Rectangle),
            1 => Ok(Self::Circle),
            other => Err(StyleError::UnsupportedShape(other)),
        }
    }

    /// Host integer code.
    pub const fn code(self) -> i32 {
        match self {
            Self::Rectangle => 0,
            Self::Circle => 1,
        }
    }
}

/// Which member of each per-state triple applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VisualState {
    /// Cell shown without focus (after a deselect).
    #[default]
    Default,
    /// Cell holds focus.
    Focused,
    /// Brief flash after a click.
    Clicked,
}

impl VisualState {
    /// All states, in declaration order.
    pub const ALL: [VisualState; 3] = [Self::Default, Self::Focused, Self::Clicked];
}

/// One value per [`VisualState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PerState<T> {
    pub default: T,
    pub focused: T,
    pub clicked: T,
}

impl<T: Copy> PerState<T> {
    /// Explicit values.
    pub const fn new(default: T, focused: T, clicked: T) -> Self {
        Self {
            default,
            focused,
            clicked,
        }
    }

    /// Same value for every state.
    pub const fn splat(value: T) -> Self {
        Self::new(value, value, value)
    }

    /// Value for `state`.
    #[inline]
    pub fn get(&self, state: VisualState) -> T {
        match state {
            VisualState::Default => self.default,
            VisualState::Focused => self.focused,
            VisualState::Clicked => self.clicked,
        }
    }

    /// Mutable slot for `state`.
    #[inline]
    pub fn get_mut(&mut self, state: VisualState) -> &mut T {
        match state {
            VisualState::Default => &mut self.default,
            VisualState::Focused => &mut self.focused,
            VisualState::Clicked => &mut self.clicked,
        }
    }
}

/// Everything that shapes the selector's geometry and pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorStyle {
    pub stroke_position: StrokePosition,
    pub selector_position: SelectorPosition,
    pub shape: SelectorShape,
    pub corner_radius_x: f32,
    pub corner_radius_y: f32,
    pub filled: bool,
    pub fill_colors: PerState<Argb>,
    pub stroke_colors: PerState<Argb>,
    /// Unit alpha applied to the fill color, per state.
    pub fill_alpha: PerState<f32>,
    pub stroke_width: f32,
    /// Inset of the painted ring inside the overlay bitmap.
    pub margins: Sides,
    /// Extra room added around the computed bounds.
    pub spacing: Sides,
    /// Glide between cells instead of jumping.
    pub animate_changes: bool,
}

impl Default for SelectorStyle {
    fn default() -> Self {
        Self {
            stroke_position: StrokePosition::Outside,
            selector_position: SelectorPosition::OverContent,
            shape: SelectorShape::Rectangle,
            corner_radius_x: 0.0,
            corner_radius_y: 0.0,
            filled: false,
            fill_colors: PerState::new(Argb::BLUE, Argb::WHITE, Argb::GRAY),
            stroke_colors: PerState::new(Argb::BLUE, Argb::WHITE, Argb::GRAY),
            fill_alpha: PerState::new(0.2, 0.5, 0.7),
            stroke_width: 4.0,
            margins: Sides::ZERO,
            spacing: Sides::ZERO,
            animate_changes: true,
        }
    }
}

impl SelectorStyle {
    /// Set the stroke position (builder).
    #[must_use]
    pub fn with_stroke_position(mut self, position: StrokePosition) -> Self {
        self.stroke_position = position;
        self
    }

    /// Set the selector position (builder).
    #[must_use]
    pub fn with_selector_position(mut self, position: SelectorPosition) -> Self {
        self.selector_position = position;
        self
    }

    /// Set the shape (builder).
    #[must_use]
    pub fn with_shape(mut self, shape: SelectorShape) -> Self {
        self.shape = shape;
        self
    }

    /// Set both corner radii (builder). Negative radii clamp to 0.
    #[must_use]
    pub fn with_corner_radius(mut self, x: f32, y: f32) -> Self {
        self.corner_radius_x = non_negative(x);
        self.corner_radius_y = non_negative(y);
        self
    }

    /// Enable or disable the fill (builder).
    #[must_use]
    pub fn with_filled(mut self, filled: bool) -> Self {
        self.filled = filled;
        self
    }

    /// Set one state's fill color (builder).
    #[must_use]
    pub fn with_fill_color(mut self, state: VisualState, color: Argb) -> Self {
        *self.fill_colors.get_mut(state) = color;
        self
    }

    /// Set one state's fill alpha (builder), clamped to `[0, 1]`.
    #[must_use]
    pub fn with_fill_alpha(mut self, state: VisualState, alpha: f32) -> Self {
        *self.fill_alpha.get_mut(state) = if alpha.is_nan() {
            0.0
        } else {
            alpha.clamp(0.0, 1.0)
        };
        self
    }

    /// Set one state's stroke color (builder).
    #[must_use]
    pub fn with_stroke_color(mut self, state: VisualState, color: Argb) -> Self {
        *self.stroke_colors.get_mut(state) = color;
        self
    }

    /// Set the stroke width (builder). Negative widths clamp to 0.
    #[must_use]
    pub fn with_stroke_width(mut self, width: f32) -> Self {
        self.stroke_width = non_negative(width);
        self
    }

    /// Set the margins (builder).
    #[must_use]
    pub fn with_margins(mut self, margins: impl Into<Sides>) -> Self {
        self.margins = margins.into();
        self
    }

    /// Set the spacing (builder).
    #[must_use]
    pub fn with_spacing(mut self, spacing: impl Into<Sides>) -> Self {
        self.spacing = spacing.into();
        self
    }

    /// Enable or disable animated changes (builder).
    #[must_use]
    pub fn with_animate_changes(mut self, animate: bool) -> Self {
        self.animate_changes = animate;
        self
    }

    /// Stroke color for `state`.
    #[inline]
    pub fn stroke_color(&self, state: VisualState) -> Argb {
        self.stroke_colors.get(state)
    }

    /// Fill color for `state` with that state's fill alpha folded into the
    /// alpha channel as `ceil(alpha * 255)`.
    #[inline]
    pub fn fill_color(&self, state: VisualState) -> Argb {
        let alpha = Argb::alpha_from_unit(self.fill_alpha.get(state));
        self.fill_colors.get(state).with_alpha(alpha)
    }

    /// True when both styles rasterize identically for equal cache keys.
    ///
    /// Covers the parameters that change pixels but are not part of the
    /// per-cell key.
    pub fn same_raster_params(&self, other: &SelectorStyle) -> bool {
        self.shape == other.shape
            && self.corner_radius_x == other.corner_radius_x
            && self.corner_radius_y == other.corner_radius_y
            && self.margins == other.margins
    }

    /// Check every invariant, reporting the first violation.
    pub fn validate(&self) -> Result<(), StyleError> {
        if self.stroke_width.is_nan() || self.stroke_width < 0.0 {
            return Err(StyleError::NegativeStrokeWidth(self.stroke_width));
        }
        for state in VisualState::ALL {
            let value = self.fill_alpha.get(state);
            if !(0.0..=1.0).contains(&value) {
                return Err(StyleError::AlphaOutOfRange { state, value });
            }
        }
        Ok(())
    }
}

fn non_negative(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.max(0.0) }
}
