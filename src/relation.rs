//! Relational capabilities: turning anchors into constraints
//!
//! Position anchors relate to another anchor of the same axis; dimension
//! anchors additionally carry a multiplier and can be pinned to a constant.
//! Cross-category relations (horizontal against vertical, position against
//! size) do not type-check.

use crate::anchor::{Anchor, Priority};
use crate::constraint::{Constraint, Relation};
use crate::item::{Dimension, RawAnchor, XAxisAnchor, YAxisAnchor};

/// Single-axis position anchors
pub trait AxisAnchor: RawAnchor {
    /// `self == other + constant`
    fn equal_to<A: Anchor<Raw = Self>>(&self, other: A) -> Constraint {
        axis_constraint(self, Relation::Equal, other)
    }

    /// `self >= other + constant`
    fn greater_than_or_equal_to<A: Anchor<Raw = Self>>(&self, other: A) -> Constraint {
        axis_constraint(self, Relation::GreaterThanOrEqual, other)
    }

    /// `self <= other + constant`
    fn less_than_or_equal_to<A: Anchor<Raw = Self>>(&self, other: A) -> Constraint {
        axis_constraint(self, Relation::LessThanOrEqual, other)
    }
}

impl AxisAnchor for XAxisAnchor {}
impl AxisAnchor for YAxisAnchor {}

fn axis_constraint<S, A>(anchor: &S, relation: Relation, other: A) -> Constraint
where
    S: RawAnchor,
    A: Anchor<Raw = S>,
{
    Constraint::new_unchecked(
        anchor.anchor_ref(),
        relation,
        Some(other.raw().anchor_ref()),
        1.0,
        other.constant(),
        other.priority(),
    )
}

/// Size anchors
pub trait DimensionAnchor: RawAnchor {
    /// `self == multiplier * other + constant`
    fn equal_to<A: Anchor<Raw = Self>>(&self, other: A) -> Constraint {
        dimension_constraint(self, Relation::Equal, other)
    }

    /// `self >= multiplier * other + constant`
    fn greater_than_or_equal_to<A: Anchor<Raw = Self>>(&self, other: A) -> Constraint {
        dimension_constraint(self, Relation::GreaterThanOrEqual, other)
    }

    /// `self <= multiplier * other + constant`
    fn less_than_or_equal_to<A: Anchor<Raw = Self>>(&self, other: A) -> Constraint {
        dimension_constraint(self, Relation::LessThanOrEqual, other)
    }

    /// `self == constant`
    fn equal_to_constant(&self, constant: f64) -> Constraint {
        constant_constraint(self, Relation::Equal, constant)
    }

    /// `self >= constant`
    fn greater_than_or_equal_to_constant(&self, constant: f64) -> Constraint {
        constant_constraint(self, Relation::GreaterThanOrEqual, constant)
    }

    /// `self <= constant`
    fn less_than_or_equal_to_constant(&self, constant: f64) -> Constraint {
        constant_constraint(self, Relation::LessThanOrEqual, constant)
    }
}

impl DimensionAnchor for Dimension {}

fn dimension_constraint<S, A>(anchor: &S, relation: Relation, other: A) -> Constraint
where
    S: RawAnchor,
    A: Anchor<Raw = S>,
{
    Constraint::new_unchecked(
        anchor.anchor_ref(),
        relation,
        Some(other.raw().anchor_ref()),
        other.multiplier(),
        other.constant(),
        other.priority(),
    )
}

fn constant_constraint<S: RawAnchor>(anchor: &S, relation: Relation, constant: f64) -> Constraint {
    Constraint::new_unchecked(
        anchor.anchor_ref(),
        relation,
        None,
        1.0,
        constant,
        Priority::REQUIRED,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{Attribute, LayoutAnchors, View};

    #[test]
    fn test_axis_equal_uses_operand_constant() {
        let a = View::new("a");
        let b = View::new("b");
        let constraint = a.leading_anchor().equal_to(b.leading_anchor() + 8.0);
        assert_eq!(constraint.relation(), Relation::Equal);
        assert_eq!(constraint.constant(), 8.0);
        assert_eq!(constraint.multiplier(), 1.0);
        assert_eq!(constraint.first_anchor().attribute, Attribute::Leading);
        assert_eq!(
            constraint.second_anchor().map(|r| r.item.view().clone()),
            Some(b)
        );
        assert!(!constraint.is_active());
    }

    #[test]
    fn test_axis_ignores_operand_multiplier() {
        let a = View::new("a");
        let b = View::new("b");
        let constraint = a.top_anchor().equal_to(b.bottom_anchor() * 3.0);
        assert_eq!(constraint.multiplier(), 1.0);
    }

    #[test]
    fn test_axis_inequalities() {
        let a = View::new("a");
        let b = View::new("b");
        let ge = a.center_y_anchor().greater_than_or_equal_to(b.top_anchor() - 2.0);
        let le = a.trailing_anchor().less_than_or_equal_to(&b.trailing_anchor());
        assert_eq!(ge.relation(), Relation::GreaterThanOrEqual);
        assert_eq!(ge.constant(), -2.0);
        assert_eq!(le.relation(), Relation::LessThanOrEqual);
        assert_eq!(le.constant(), 0.0);
    }

    #[test]
    fn test_dimension_carries_multiplier_and_constant() {
        let a = View::new("a");
        let b = View::new("b");
        let constraint = a.width_anchor().equal_to(b.width_anchor() * 0.5 + 10.0);
        assert_eq!(constraint.multiplier(), 0.5);
        assert_eq!(constraint.constant(), 10.0);
        assert_eq!(constraint.to_string(), "a.width == b.width * 0.5 + 10");
    }

    #[test]
    fn test_dimension_constant_forms_have_no_target() {
        let view = View::new("icon");
        for constraint in [
            view.width_anchor().equal_to_constant(44.0),
            view.width_anchor().greater_than_or_equal_to_constant(20.0),
            view.height_anchor().less_than_or_equal_to_constant(100.0),
        ] {
            assert!(constraint.second_anchor().is_none());
            assert!(constraint.validate().is_ok());
        }
    }

    #[test]
    fn test_operand_priority_is_applied() {
        let a = View::new("a");
        let b = View::new("b");
        let constraint = a
            .height_anchor()
            .less_than_or_equal_to(b.height_anchor().prioritized(Priority::LOW));
        assert_eq!(constraint.priority(), Priority::LOW);
    }

    #[test]
    fn test_guide_anchor_as_target() {
        let root = View::new("root");
        let child = View::new("child");
        let constraint = child
            .top_anchor()
            .equal_to(root.safe_area_layout_guide().top_anchor() + 12.0);
        assert_eq!(constraint.to_string(), "child.top == root.safe.top + 12");
    }
}
