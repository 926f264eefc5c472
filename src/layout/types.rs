//! Geometry types exchanged with the layout engine

use std::fmt;

use serde::Deserialize;

/// A solved or suggested view frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a zero-sized rect at the origin
    pub fn zero() -> Self {
        Self::default()
    }

    /// Trailing edge x-coordinate
    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate
    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    pub fn mid_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn mid_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Shrink by `insets` on every side
    pub fn inset_by(&self, insets: &EdgeInsets) -> Rect {
        Rect {
            x: self.x + insets.left,
            y: self.y + insets.top,
            width: self.width - insets.left - insets.right,
            height: self.height - insets.top - insets.bottom,
        }
    }

    /// Compare with a tolerance suited to solver output
    pub fn approx_eq(&self, other: &Rect) -> bool {
        const EPSILON: f64 = 0.001;
        (self.x - other.x).abs() < EPSILON
            && (self.y - other.y).abs() < EPSILON
            && (self.width - other.width).abs() < EPSILON
            && (self.height - other.height).abs() < EPSILON
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "x={:.1} y={:.1} w={:.1} h={:.1}",
            self.x, self.y, self.width, self.height
        )
    }
}

/// Safe-area insets of a view
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct EdgeInsets {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl EdgeInsets {
    pub fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    pub fn zero() -> Self {
        Self::default()
    }
}

/// Frame components that can be suggested to the solver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameProperty {
    X,
    Y,
    Width,
    Height,
}

impl FrameProperty {
    pub fn all() -> &'static [FrameProperty] {
        &[Self::X, Self::Y, Self::Width, Self::Height]
    }

    /// The component of `rect` this property names
    pub fn of(self, rect: &Rect) -> f64 {
        match self {
            FrameProperty::X => rect.x,
            FrameProperty::Y => rect.y,
            FrameProperty::Width => rect.width,
            FrameProperty::Height => rect.height,
        }
    }
}
