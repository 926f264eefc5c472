//! Boundary to whatever engine owns activated constraints

use tracing::debug;

use crate::builder::ConstraintListBuilder;
use crate::constraint::Constraint;

use super::error::LayoutError;

/// A layout system that activates and deactivates constraints in batches
///
/// Batches are all-or-nothing: when activation fails, none of the batch's
/// constraints are left active.
pub trait LayoutEngine {
    /// Activate every constraint in `constraints` as one batch
    fn activate(&mut self, constraints: &[Constraint]) -> Result<(), LayoutError>;

    /// Deactivate every constraint in `constraints` as one batch
    fn deactivate(&mut self, constraints: &[Constraint]) -> Result<(), LayoutError>;

    /// Fill a builder with `build`, then activate the flattened list
    ///
    /// Returns the activated constraints so they can be deactivated later.
    fn activate_with<F>(&mut self, build: F) -> Result<Vec<Constraint>, LayoutError>
    where
        F: FnOnce(&mut ConstraintListBuilder),
        Self: Sized,
    {
        let mut builder = ConstraintListBuilder::new();
        build(&mut builder);
        let constraints = builder.build();
        debug!(count = constraints.len(), "activating built constraints");
        self.activate(&constraints)?;
        Ok(constraints)
    }

    /// Fill a builder with `build`, then deactivate the flattened list
    fn deactivate_with<F>(&mut self, build: F) -> Result<Vec<Constraint>, LayoutError>
    where
        F: FnOnce(&mut ConstraintListBuilder),
        Self: Sized,
    {
        let mut builder = ConstraintListBuilder::new();
        build(&mut builder);
        let constraints = builder.build();
        debug!(count = constraints.len(), "deactivating built constraints");
        self.deactivate(&constraints)?;
        Ok(constraints)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{LayoutAnchors, View};
    use crate::relation::{AxisAnchor, DimensionAnchor};

    /// Records batches instead of solving them
    #[derive(Default)]
    struct RecordingEngine {
        batches: Vec<(bool, usize)>,
    }

    impl LayoutEngine for RecordingEngine {
        fn activate(&mut self, constraints: &[Constraint]) -> Result<(), LayoutError> {
            self.batches.push((true, constraints.len()));
            Ok(())
        }

        fn deactivate(&mut self, constraints: &[Constraint]) -> Result<(), LayoutError> {
            self.batches.push((false, constraints.len()));
            Ok(())
        }
    }

    #[test]
    fn test_builder_closure_is_one_batch() {
        let a = View::new("a");
        let b = View::new("b");
        let mut engine = RecordingEngine::default();

        let activated = engine
            .activate_with(|list| {
                list.add(a.edge_anchor().equal_to(b.edge_anchor()))
                    .add_if(false, a.width_anchor().equal_to_constant(1.0), ())
                    .add(a.top_anchor().equal_to(b.top_anchor()));
            })
            .unwrap();
        assert_eq!(activated.len(), 5);

        engine
            .deactivate_with(|list| {
                list.add(activated.clone());
            })
            .unwrap();

        assert_eq!(engine.batches, vec![(true, 5), (false, 5)]);
    }
}
