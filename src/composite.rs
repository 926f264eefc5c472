//! Composite anchors (edges, center), size sequences and the safe-area adapter
//!
//! Relating two composite anchors pairs their members index by index. Pairing
//! stops at the shorter sequence on each axis, so surplus members are
//! silently ignored:
//!
//! ```rust
//! use snow_layout::prelude::*;
//!
//! let a = View::new("a");
//! let b = View::new("b");
//! let partial = CompositeAnchor::new(vec![b.leading_anchor()], vec![b.top_anchor()]);
//! let constraints = a.edge_anchor().equal_to(partial);
//! assert_eq!(constraints.len(), 2);
//! ```

use crate::anchor::{impl_anchor_ops, Anchor, Priority};
use crate::constraint::{Constraint, Relation};
use crate::item::{
    Dimension, LayoutAnchors, LayoutGuide, RawAnchor, View, XAxisAnchor, YAxisAnchor,
};

/// A bundle of horizontal and vertical anchors related in one expression
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeAnchor {
    horizontal: Vec<XAxisAnchor>,
    vertical: Vec<YAxisAnchor>,
}

impl CompositeAnchor {
    pub fn new(horizontal: Vec<XAxisAnchor>, vertical: Vec<YAxisAnchor>) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    pub fn horizontal(&self) -> &[XAxisAnchor] {
        &self.horizontal
    }

    pub fn vertical(&self) -> &[YAxisAnchor] {
        &self.vertical
    }

    /// One equality per same-index pair, horizontal pairs first
    ///
    /// Every constraint takes the operand's constant and priority.
    pub fn equal_to<A: Anchor<Raw = CompositeAnchor>>(&self, other: A) -> Vec<Constraint> {
        let target = other.raw();
        let constant = other.constant();
        let priority = other.priority();

        let horizontal = self
            .horizontal
            .iter()
            .zip(&target.horizontal)
            .map(|(lhs, rhs)| (lhs.anchor_ref(), rhs.anchor_ref()));
        let vertical = self
            .vertical
            .iter()
            .zip(&target.vertical)
            .map(|(lhs, rhs)| (lhs.anchor_ref(), rhs.anchor_ref()));

        horizontal
            .chain(vertical)
            .map(|(first, second)| {
                Constraint::new_unchecked(
                    first,
                    Relation::Equal,
                    Some(second),
                    1.0,
                    constant,
                    priority,
                )
            })
            .collect()
    }
}

impl Anchor for CompositeAnchor {
    type Raw = CompositeAnchor;

    fn raw(&self) -> CompositeAnchor {
        self.clone()
    }
}

impl_anchor_ops!(CompositeAnchor);

/// Pairwise relations over a sequence of dimensions (e.g. `size_anchor()`)
pub trait SizeAnchors {
    /// `self[i] == multiplier_i * others[i] + constant_i`, truncated to the
    /// shorter sequence
    fn equal_to<I>(&self, others: I) -> Vec<Constraint>
    where
        I: IntoIterator,
        I::Item: Anchor<Raw = Dimension>;

    /// `self[i] == sizes[i]`, truncated to the shorter sequence
    fn equal_to_constants(&self, sizes: &[f64]) -> Vec<Constraint>;
}

impl SizeAnchors for [Dimension] {
    fn equal_to<I>(&self, others: I) -> Vec<Constraint>
    where
        I: IntoIterator,
        I::Item: Anchor<Raw = Dimension>,
    {
        self.iter()
            .zip(others)
            .map(|(lhs, rhs)| {
                Constraint::new_unchecked(
                    lhs.anchor_ref(),
                    Relation::Equal,
                    Some(rhs.raw().anchor_ref()),
                    rhs.multiplier(),
                    rhs.constant(),
                    rhs.priority(),
                )
            })
            .collect()
    }

    fn equal_to_constants(&self, sizes: &[f64]) -> Vec<Constraint> {
        self.iter()
            .zip(sizes)
            .map(|(lhs, size)| {
                Constraint::new_unchecked(
                    lhs.anchor_ref(),
                    Relation::Equal,
                    None,
                    1.0,
                    *size,
                    Priority::REQUIRED,
                )
            })
            .collect()
    }
}

// ============================================================================
// Safe area
// ============================================================================

/// Composite anchors mixing a view's raw edges with its safe-area edges
///
/// Borrows the view, so it cannot outlive it.
#[derive(Debug, Clone, Copy)]
pub struct SafeArea<'a> {
    view: &'a View,
}

impl<'a> SafeArea<'a> {
    pub fn new(view: &'a View) -> Self {
        Self { view }
    }

    pub fn view(&self) -> &'a View {
        self.view
    }

    pub fn layout_guide(&self) -> LayoutGuide {
        self.view.safe_area_layout_guide()
    }

    /// All four edges inset by the safe area
    pub fn edge_anchor(&self) -> CompositeAnchor {
        self.layout_guide().edge_anchor()
    }

    /// Safe top edge; raw leading, trailing and bottom
    pub fn top_edge_anchor(&self) -> CompositeAnchor {
        let guide = self.layout_guide();
        CompositeAnchor::new(
            vec![self.view.leading_anchor(), self.view.trailing_anchor()],
            vec![guide.top_anchor(), self.view.bottom_anchor()],
        )
    }

    /// Safe top and bottom; raw leading and trailing
    pub fn vertical_edge_anchor(&self) -> CompositeAnchor {
        let guide = self.layout_guide();
        CompositeAnchor::new(
            vec![self.view.leading_anchor(), self.view.trailing_anchor()],
            vec![guide.top_anchor(), guide.bottom_anchor()],
        )
    }

    /// Safe leading and trailing; raw top and bottom
    pub fn horizontal_edge_anchor(&self) -> CompositeAnchor {
        let guide = self.layout_guide();
        CompositeAnchor::new(
            vec![guide.leading_anchor(), guide.trailing_anchor()],
            vec![self.view.top_anchor(), self.view.bottom_anchor()],
        )
    }
}

impl View {
    pub fn safe_area(&self) -> SafeArea<'_> {
        SafeArea::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{AnchorCategory, Attribute};

    fn attributes(constraints: &[Constraint]) -> Vec<(Attribute, Attribute)> {
        constraints
            .iter()
            .map(|c| {
                (
                    c.first_anchor().attribute,
                    c.second_anchor().map(|s| s.attribute).unwrap_or(c.first_anchor().attribute),
                )
            })
            .collect()
    }

    #[test]
    fn test_edges_produce_four_pairs() {
        let a = View::new("a");
        let b = View::new("b");
        let constraints = a.edge_anchor().equal_to(b.edge_anchor());
        assert_eq!(
            attributes(&constraints),
            vec![
                (Attribute::Leading, Attribute::Leading),
                (Attribute::Trailing, Attribute::Trailing),
                (Attribute::Top, Attribute::Top),
                (Attribute::Bottom, Attribute::Bottom),
            ]
        );
        for constraint in &constraints {
            assert_eq!(constraint.constant(), 0.0);
            assert_eq!(constraint.multiplier(), 1.0);
            assert_eq!(constraint.priority(), Priority::REQUIRED);
        }
    }

    #[test]
    fn test_composite_offset_applies_to_every_pair() {
        let a = View::new("a");
        let b = View::new("b");
        let constraints = a.edge_anchor().equal_to(b.edge_anchor() + 8.0);
        assert!(constraints.iter().all(|c| c.constant() == 8.0));
    }

    #[test]
    fn test_center_produces_two_pairs() {
        let a = View::new("a");
        let b = View::new("b");
        let constraints = a.center_anchor().equal_to(&b.center_anchor());
        assert_eq!(
            attributes(&constraints),
            vec![
                (Attribute::CenterX, Attribute::CenterX),
                (Attribute::CenterY, Attribute::CenterY),
            ]
        );
    }

    #[test]
    fn test_pairing_truncates_to_shorter_sequence() {
        let a = View::new("a");
        let b = View::new("b");
        let short = CompositeAnchor::new(
            vec![b.leading_anchor()],
            vec![b.top_anchor(), b.bottom_anchor()],
        );
        let constraints = a.edge_anchor().equal_to(short);
        let horizontal = constraints
            .iter()
            .filter(|c| c.first_anchor().category() == AnchorCategory::Horizontal)
            .count();
        assert_eq!(horizontal, 1);
        assert_eq!(constraints.len(), 3);
    }

    #[test]
    fn test_size_pairs_dimensions() {
        let a = View::new("a");
        let b = View::new("b");
        let constraints = a.size_anchor().equal_to(b.size_anchor().iter().map(|d| d * 0.5));
        assert_eq!(constraints.len(), 2);
        assert!(constraints.iter().all(|c| c.multiplier() == 0.5));
    }

    #[test]
    fn test_size_constants_have_no_target() {
        let view = View::new("icon");
        let constraints = view.size_anchor().equal_to_constants(&[44.0, 32.0]);
        assert_eq!(constraints.len(), 2);
        assert_eq!(constraints[0].to_string(), "icon.width == 44");
        assert_eq!(constraints[1].to_string(), "icon.height == 32");
    }

    #[test]
    fn test_safe_area_variants() {
        let view = View::new("root");
        let safe = view.safe_area();

        let guided = |anchor: &CompositeAnchor| -> (Vec<bool>, Vec<bool>) {
            (
                anchor.horizontal().iter().map(|a| a.item().is_guide()).collect(),
                anchor.vertical().iter().map(|a| a.item().is_guide()).collect(),
            )
        };

        assert_eq!(
            guided(&safe.edge_anchor()),
            (vec![true, true], vec![true, true])
        );
        assert_eq!(
            guided(&safe.top_edge_anchor()),
            (vec![false, false], vec![true, false])
        );
        assert_eq!(
            guided(&safe.vertical_edge_anchor()),
            (vec![false, false], vec![true, true])
        );
        assert_eq!(
            guided(&safe.horizontal_edge_anchor()),
            (vec![true, true], vec![false, false])
        );
        assert_eq!(safe.view(), &view);
    }
}
