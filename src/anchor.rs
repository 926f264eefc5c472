//! Anchor abstraction for the constraint DSL
//!
//! An anchor is anything that can sit on the right-hand side of a relation:
//! a raw view anchor, or a raw anchor decorated with a constant offset, a
//! multiplier or a priority. Decoration never mutates; every combinator
//! returns a fresh [`AnchorContainer`] that overrides exactly one field and
//! copies the other two from the anchor it wraps.
//!
//! ```rust
//! use snow_layout::prelude::*;
//!
//! let card = View::new("card");
//! let offset = card.leading_anchor() + 8.0;
//! assert_eq!(offset.constant(), 8.0);
//! assert_eq!(offset.multiplier(), 1.0);
//!
//! // Overrides, not composition: the constant survives the scale untouched.
//! let scaled = (card.width_anchor() + 5.0) * 2.0;
//! assert_eq!(scaled.constant(), 5.0);
//! assert_eq!(scaled.multiplier(), 2.0);
//! ```

use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

use thiserror::Error;

use crate::item::AnchorCategory;

// ============================================================================
// Priority
// ============================================================================

/// Solver ranking used to resolve over-constrained systems
///
/// Values live in `1..=1000`; `1000` means the constraint must hold.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Priority(f32);

impl Priority {
    pub const REQUIRED: Priority = Priority(1000.0);
    pub const HIGH: Priority = Priority(750.0);
    pub const LOW: Priority = Priority(250.0);
    pub const FITTING: Priority = Priority(50.0);
    pub const LOWEST: Priority = Priority(1.0);

    /// Create a priority from a raw value, clamped into `1..=1000`
    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Self::LOWEST;
        }
        Self(value.clamp(Self::LOWEST.0, Self::REQUIRED.0))
    }

    /// Look up a named level (`required`, `high`, `low`, `fitting`, `lowest`)
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "required" => Some(Self::REQUIRED),
            "high" => Some(Self::HIGH),
            "low" => Some(Self::LOW),
            "fitting" => Some(Self::FITTING),
            "lowest" => Some(Self::LOWEST),
            _ => None,
        }
    }

    pub fn value(self) -> f32 {
        self.0
    }

    pub fn is_required(self) -> bool {
        self.0 >= Self::REQUIRED.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::REQUIRED
    }
}

impl From<f32> for Priority {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

impl From<i32> for Priority {
    fn from(value: i32) -> Self {
        Self::new(value as f32)
    }
}

impl From<f64> for Priority {
    fn from(value: f64) -> Self {
        Self::new(value as f32)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_required() {
            write!(f, "required")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Errors raised while building anchors and constraints
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnchorError {
    /// Multiplier is zero, infinite or NaN (e.g. from dividing by zero)
    #[error("degenerate multiplier {0}: multipliers must be finite and non-zero")]
    DegenerateMultiplier(f64),

    /// The two sides of a relation belong to different anchor categories
    #[error("cannot relate a {first} anchor to a {second} anchor")]
    CategoryMismatch {
        first: AnchorCategory,
        second: AnchorCategory,
    },

    /// Constant-only relation on an anchor that needs a target
    #[error("{category} anchors need a target anchor; constant-only constraints apply to dimensions")]
    MissingTarget { category: AnchorCategory },
}

/// Reject multipliers the solver cannot use
pub(crate) fn validate_multiplier(multiplier: f64) -> Result<f64, AnchorError> {
    if multiplier == 0.0 || !multiplier.is_finite() {
        Err(AnchorError::DegenerateMultiplier(multiplier))
    } else {
        Ok(multiplier)
    }
}

// ============================================================================
// Anchor trait
// ============================================================================

/// Something that can participate in a constraint
///
/// `Raw` is the anchor category: two anchors can only be related when their
/// `Raw` types agree, which keeps horizontal, vertical and dimension anchors
/// apart at compile time.
pub trait Anchor {
    type Raw: Clone;

    /// The undecorated anchor this value refers to
    fn raw(&self) -> Self::Raw;

    fn constant(&self) -> f64 {
        0.0
    }

    fn multiplier(&self) -> f64 {
        1.0
    }

    fn priority(&self) -> Priority {
        Priority::REQUIRED
    }

    /// Override the constant (the `+` operator)
    fn offset(&self, constant: f64) -> AnchorContainer<Self::Raw> {
        AnchorContainer::with_constant(self, constant)
    }

    /// Override the constant with its negation (the `-` operator)
    fn inset(&self, constant: f64) -> AnchorContainer<Self::Raw> {
        AnchorContainer::with_constant(self, -constant)
    }

    /// Override the multiplier (the `*` operator)
    ///
    /// # Panics
    ///
    /// Panics when `multiplier` is zero or not finite. Use
    /// [`Anchor::try_scaled`] to handle that case.
    fn scaled(&self, multiplier: f64) -> AnchorContainer<Self::Raw> {
        match self.try_scaled(multiplier) {
            Ok(container) => container,
            Err(err) => panic!("{}", err),
        }
    }

    fn try_scaled(&self, multiplier: f64) -> Result<AnchorContainer<Self::Raw>, AnchorError> {
        AnchorContainer::with_multiplier(self, multiplier)
    }

    /// Override the multiplier with `1 / divisor` (the `/` operator)
    ///
    /// # Panics
    ///
    /// Panics when `divisor` is zero or the reciprocal is not finite.
    #[deprecated(note = "use `scaled` with the reciprocal instead")]
    fn divided(&self, divisor: f64) -> AnchorContainer<Self::Raw> {
        match self.try_divided(divisor) {
            Ok(container) => container,
            Err(err) => panic!("{}", err),
        }
    }

    fn try_divided(&self, divisor: f64) -> Result<AnchorContainer<Self::Raw>, AnchorError> {
        AnchorContainer::with_multiplier(self, 1.0 / divisor)
    }

    /// Override the priority given to constraints built from this operand
    fn prioritized(&self, priority: impl Into<Priority>) -> AnchorContainer<Self::Raw> {
        AnchorContainer::with_priority(self, priority.into())
    }
}

impl<T: Anchor + ?Sized> Anchor for &T {
    type Raw = T::Raw;

    fn raw(&self) -> Self::Raw {
        (**self).raw()
    }

    fn constant(&self) -> f64 {
        (**self).constant()
    }

    fn multiplier(&self) -> f64 {
        (**self).multiplier()
    }

    fn priority(&self) -> Priority {
        (**self).priority()
    }
}

// ============================================================================
// AnchorContainer
// ============================================================================

/// An anchor with one of its modifiers overridden
#[derive(Debug, Clone, PartialEq)]
pub struct AnchorContainer<R> {
    anchor: R,
    constant: f64,
    multiplier: f64,
    priority: Priority,
}

impl<R: Clone> AnchorContainer<R> {
    /// Copy every modifier of `anchor` unchanged
    pub fn wrap<A: Anchor<Raw = R> + ?Sized>(anchor: &A) -> Self {
        Self {
            anchor: anchor.raw(),
            constant: anchor.constant(),
            multiplier: anchor.multiplier(),
            priority: anchor.priority(),
        }
    }

    pub fn with_constant<A: Anchor<Raw = R> + ?Sized>(anchor: &A, constant: f64) -> Self {
        Self {
            constant,
            ..Self::wrap(anchor)
        }
    }

    pub fn with_multiplier<A: Anchor<Raw = R> + ?Sized>(
        anchor: &A,
        multiplier: f64,
    ) -> Result<Self, AnchorError> {
        Ok(Self {
            multiplier: validate_multiplier(multiplier)?,
            ..Self::wrap(anchor)
        })
    }

    pub fn with_priority<A: Anchor<Raw = R> + ?Sized>(anchor: &A, priority: Priority) -> Self {
        Self {
            priority,
            ..Self::wrap(anchor)
        }
    }
}

impl<R: Clone> Anchor for AnchorContainer<R> {
    type Raw = R;

    fn raw(&self) -> R {
        self.anchor.clone()
    }

    fn constant(&self) -> f64 {
        self.constant
    }

    fn multiplier(&self) -> f64 {
        self.multiplier
    }

    fn priority(&self) -> Priority {
        self.priority
    }
}

impl<R: Clone> Add<f64> for AnchorContainer<R> {
    type Output = AnchorContainer<R>;

    fn add(self, rhs: f64) -> Self::Output {
        self.offset(rhs)
    }
}

impl<R: Clone> Sub<f64> for AnchorContainer<R> {
    type Output = AnchorContainer<R>;

    fn sub(self, rhs: f64) -> Self::Output {
        self.inset(rhs)
    }
}

impl<R: Clone> Mul<f64> for AnchorContainer<R> {
    type Output = AnchorContainer<R>;

    fn mul(self, rhs: f64) -> Self::Output {
        self.scaled(rhs)
    }
}

impl<R: Clone> Div<f64> for AnchorContainer<R> {
    type Output = AnchorContainer<R>;

    fn div(self, rhs: f64) -> Self::Output {
        #[allow(deprecated)]
        self.divided(rhs)
    }
}

/// Arithmetic operators for concrete anchor types (owned and borrowed)
macro_rules! impl_anchor_ops {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ::std::ops::Add<f64> for $ty {
                type Output = $crate::anchor::AnchorContainer<<$ty as $crate::anchor::Anchor>::Raw>;

                fn add(self, rhs: f64) -> Self::Output {
                    $crate::anchor::Anchor::offset(&self, rhs)
                }
            }

            impl ::std::ops::Add<f64> for &$ty {
                type Output = $crate::anchor::AnchorContainer<<$ty as $crate::anchor::Anchor>::Raw>;

                fn add(self, rhs: f64) -> Self::Output {
                    $crate::anchor::Anchor::offset(self, rhs)
                }
            }

            impl ::std::ops::Sub<f64> for $ty {
                type Output = $crate::anchor::AnchorContainer<<$ty as $crate::anchor::Anchor>::Raw>;

                fn sub(self, rhs: f64) -> Self::Output {
                    $crate::anchor::Anchor::inset(&self, rhs)
                }
            }

            impl ::std::ops::Sub<f64> for &$ty {
                type Output = $crate::anchor::AnchorContainer<<$ty as $crate::anchor::Anchor>::Raw>;

                fn sub(self, rhs: f64) -> Self::Output {
                    $crate::anchor::Anchor::inset(self, rhs)
                }
            }

            impl ::std::ops::Mul<f64> for $ty {
                type Output = $crate::anchor::AnchorContainer<<$ty as $crate::anchor::Anchor>::Raw>;

                fn mul(self, rhs: f64) -> Self::Output {
                    $crate::anchor::Anchor::scaled(&self, rhs)
                }
            }

            impl ::std::ops::Mul<f64> for &$ty {
                type Output = $crate::anchor::AnchorContainer<<$ty as $crate::anchor::Anchor>::Raw>;

                fn mul(self, rhs: f64) -> Self::Output {
                    $crate::anchor::Anchor::scaled(self, rhs)
                }
            }

            impl ::std::ops::Div<f64> for $ty {
                type Output = $crate::anchor::AnchorContainer<<$ty as $crate::anchor::Anchor>::Raw>;

                fn div(self, rhs: f64) -> Self::Output {
                    #[allow(deprecated)]
                    $crate::anchor::Anchor::divided(&self, rhs)
                }
            }

            impl ::std::ops::Div<f64> for &$ty {
                type Output = $crate::anchor::AnchorContainer<<$ty as $crate::anchor::Anchor>::Raw>;

                fn div(self, rhs: f64) -> Self::Output {
                    #[allow(deprecated)]
                    $crate::anchor::Anchor::divided(self, rhs)
                }
            }
        )*
    };
}

pub(crate) use impl_anchor_ops;
