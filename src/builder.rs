//! Flattening builder for conditionally assembled constraint lists
//!
//! Relation expressions yield either one constraint or a list of them. The
//! builder concatenates those values in declaration order, picks one side of
//! each conditional, and treats absent optional groups as empty.
//!
//! ```rust
//! use snow_layout::prelude::*;
//!
//! let root = View::new("root");
//! let card = View::new("card");
//! let compact = false;
//!
//! let constraints = ConstraintListBuilder::new()
//!     .add(card.edge_anchor().equal_to(root.safe_area().edge_anchor() + 16.0))
//!     .add_if(
//!         compact,
//!         card.height_anchor().equal_to_constant(120.0),
//!         card.height_anchor().equal_to_constant(200.0),
//!     )
//!     .add_optional(None::<Constraint>)
//!     .build();
//! assert_eq!(constraints.len(), 5);
//! ```

use tracing::trace;

use crate::constraint::Constraint;

/// A value that yields zero or more constraints
pub trait ConstraintGroup {
    fn into_constraints(self) -> Vec<Constraint>;
}

impl ConstraintGroup for Constraint {
    fn into_constraints(self) -> Vec<Constraint> {
        vec![self]
    }
}

impl ConstraintGroup for Vec<Constraint> {
    fn into_constraints(self) -> Vec<Constraint> {
        self
    }
}

impl<const N: usize> ConstraintGroup for [Constraint; N] {
    fn into_constraints(self) -> Vec<Constraint> {
        self.into()
    }
}

impl ConstraintGroup for &[Constraint] {
    fn into_constraints(self) -> Vec<Constraint> {
        self.to_vec()
    }
}

impl<G: ConstraintGroup> ConstraintGroup for Option<G> {
    fn into_constraints(self) -> Vec<Constraint> {
        self.map(ConstraintGroup::into_constraints).unwrap_or_default()
    }
}

/// The empty group, for conditionals without an else side
impl ConstraintGroup for () {
    fn into_constraints(self) -> Vec<Constraint> {
        Vec::new()
    }
}

/// Ordered, flattening aggregator of constraint groups
#[derive(Debug, Default)]
pub struct ConstraintListBuilder {
    constraints: Vec<Constraint>,
}

impl ConstraintListBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append every constraint of `group`
    pub fn add(&mut self, group: impl ConstraintGroup) -> &mut Self {
        self.constraints.extend(group.into_constraints());
        self
    }

    /// Append `then` when `condition` holds, `otherwise` when it does not
    pub fn add_if(
        &mut self,
        condition: bool,
        then: impl ConstraintGroup,
        otherwise: impl ConstraintGroup,
    ) -> &mut Self {
        if condition {
            self.add(then)
        } else {
            self.add(otherwise)
        }
    }

    /// Append `group` if present; an absent group contributes nothing
    pub fn add_optional<G: ConstraintGroup>(&mut self, group: Option<G>) -> &mut Self {
        self.add(group)
    }

    /// Append several groups in iteration order
    pub fn extend<I>(&mut self, groups: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: ConstraintGroup,
    {
        for group in groups {
            self.add(group);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Take the flattened list, leaving the builder empty
    pub fn build(&mut self) -> Vec<Constraint> {
        trace!(count = self.constraints.len(), "built constraint list");
        std::mem::take(&mut self.constraints)
    }
}

/// Flatten constraint groups into one `Vec<Constraint>`
///
/// ```rust
/// use snow_layout::{constraints, prelude::*};
///
/// let a = View::new("a");
/// let b = View::new("b");
/// let list = constraints![
///     a.top_anchor().equal_to(b.bottom_anchor() + 8.0),
///     a.center_anchor().equal_to(b.center_anchor()),
///     if a == b { Some(a.width_anchor().equal_to_constant(10.0)) } else { None },
/// ];
/// assert_eq!(list.len(), 3);
/// ```
#[macro_export]
macro_rules! constraints {
    ($($group:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut builder = $crate::ConstraintListBuilder::new();
        $( builder.add($group); )*
        builder.build()
    }};
}
