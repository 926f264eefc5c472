//! Error types for the layout engine

use thiserror::Error;

use crate::anchor::AnchorError;
use crate::constraint::Constraint;

use super::solver::SolverError;

/// Errors that can occur while activating or deactivating constraints
#[derive(Debug, Error)]
pub enum LayoutError {
    /// A constraint failed its invariant checks on activation
    #[error("invalid constraint '{constraint}': {source}")]
    InvalidConstraint {
        constraint: String,
        source: AnchorError,
    },

    /// Constraint solver error
    #[error("constraint solver error: {0}")]
    SolverError(#[from] SolverError),
}

impl LayoutError {
    /// Create an invalid constraint error
    pub fn invalid(constraint: &Constraint, source: AnchorError) -> Self {
        Self::InvalidConstraint {
            constraint: describe(constraint),
            source,
        }
    }

    /// Get the rendered constraint the error concerns, if known
    pub fn constraint(&self) -> Option<&str> {
        match self {
            Self::InvalidConstraint { constraint, .. } => Some(constraint),
            Self::SolverError(SolverError::Unsatisfiable { constraint, .. })
            | Self::SolverError(SolverError::Duplicate { constraint }) => Some(constraint),
            Self::SolverError(SolverError::Internal(_)) => None,
        }
    }
}

/// Render a constraint for diagnostics, preferring its identifier
pub(crate) fn describe(constraint: &Constraint) -> String {
    match constraint.identifier() {
        Some(identifier) => format!("{} ({})", constraint, identifier),
        None => constraint.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::Relation;
    use crate::item::{LayoutAnchors, RawAnchor, View};

    #[test]
    fn test_invalid_constraint_message() {
        let a = View::new("a");
        let b = View::new("b");
        let constraint = Constraint::try_new(
            a.width_anchor().anchor_ref(),
            Relation::Equal,
            Some(b.width_anchor().anchor_ref()),
            2.0,
            0.0,
        )
        .unwrap();
        let err = LayoutError::invalid(&constraint, AnchorError::DegenerateMultiplier(0.0));
        assert_eq!(
            err.to_string(),
            "invalid constraint 'a.width == b.width * 2': degenerate multiplier 0: multipliers must be finite and non-zero"
        );
        assert_eq!(err.constraint(), Some("a.width == b.width * 2"));
    }

    #[test]
    fn test_describe_uses_identifier() {
        let view = View::new("box");
        let constraint = Constraint::try_new(
            view.height_anchor().anchor_ref(),
            Relation::Equal,
            None,
            1.0,
            10.0,
        )
        .unwrap();
        constraint.set_identifier("fixed-height");
        assert_eq!(describe(&constraint), "box.height == 10 (fixed-height)");
    }

    #[test]
    fn test_solver_error_conversion() {
        let err: LayoutError = SolverError::Internal("boom".to_string()).into();
        assert!(matches!(err, LayoutError::SolverError(_)));
        assert_eq!(err.constraint(), None);
    }
}
