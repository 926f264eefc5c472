//! Constraint objects handed to the layout engine

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::anchor::{validate_multiplier, AnchorError, Priority};
use crate::item::{AnchorCategory, AnchorRef};

static NEXT_CONSTRAINT_ID: AtomicU64 = AtomicU64::new(1);

/// Relation between the two sides of a constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    Equal,
    GreaterThanOrEqual,
    LessThanOrEqual,
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Relation::Equal => "==",
            Relation::GreaterThanOrEqual => ">=",
            Relation::LessThanOrEqual => "<=",
        };
        write!(f, "{}", symbol)
    }
}

/// Process-unique constraint identifier, increasing in creation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConstraintId(u64);

/// `first <relation> second * multiplier + constant`, or
/// `first <relation> constant` when there is no second anchor
///
/// `Constraint` is a shared handle: clones are the same constraint, so
/// priority changes and activation are visible through every clone.
#[derive(Clone)]
pub struct Constraint(Rc<ConstraintData>);

struct ConstraintData {
    id: ConstraintId,
    first: AnchorRef,
    relation: Relation,
    second: Option<AnchorRef>,
    multiplier: f64,
    constant: f64,
    priority: Cell<Priority>,
    active: Cell<bool>,
    identifier: RefCell<Option<String>>,
}

impl Constraint {
    /// Build a constraint whose categories are already guaranteed by types
    pub(crate) fn new_unchecked(
        first: AnchorRef,
        relation: Relation,
        second: Option<AnchorRef>,
        multiplier: f64,
        constant: f64,
        priority: Priority,
    ) -> Self {
        Self(Rc::new(ConstraintData {
            id: ConstraintId(NEXT_CONSTRAINT_ID.fetch_add(1, Ordering::Relaxed)),
            first,
            relation,
            second,
            multiplier,
            constant,
            priority: Cell::new(priority),
            active: Cell::new(false),
            identifier: RefCell::new(None),
        }))
    }

    /// Runtime-checked constructor for category-erased anchors
    ///
    /// Rejects mismatched categories, constant-only position constraints and
    /// degenerate multipliers. The constraint starts inactive with required
    /// priority.
    pub fn try_new(
        first: AnchorRef,
        relation: Relation,
        second: Option<AnchorRef>,
        multiplier: f64,
        constant: f64,
    ) -> Result<Self, AnchorError> {
        validate_parts(&first, second.as_ref(), multiplier)?;
        Ok(Self::new_unchecked(
            first,
            relation,
            second,
            multiplier,
            constant,
            Priority::REQUIRED,
        ))
    }

    pub fn id(&self) -> ConstraintId {
        self.0.id
    }

    pub fn first_anchor(&self) -> &AnchorRef {
        &self.0.first
    }

    pub fn relation(&self) -> Relation {
        self.0.relation
    }

    pub fn second_anchor(&self) -> Option<&AnchorRef> {
        self.0.second.as_ref()
    }

    pub fn multiplier(&self) -> f64 {
        self.0.multiplier
    }

    pub fn constant(&self) -> f64 {
        self.0.constant
    }

    pub fn priority(&self) -> Priority {
        self.0.priority.get()
    }

    /// Change the priority; an active constraint picks it up the next time
    /// it is activated
    pub fn set_priority(&self, priority: impl Into<Priority>) {
        self.0.priority.set(priority.into());
    }

    pub fn is_active(&self) -> bool {
        self.0.active.get()
    }

    pub(crate) fn set_active(&self, active: bool) {
        self.0.active.set(active);
    }

    /// Optional label used in diagnostics
    pub fn identifier(&self) -> Option<String> {
        self.0.identifier.borrow().clone()
    }

    pub fn set_identifier(&self, identifier: impl Into<String>) {
        *self.0.identifier.borrow_mut() = Some(identifier.into());
    }

    /// Whether both handles refer to the same constraint
    pub fn ptr_eq(&self, other: &Constraint) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Re-check the invariants `try_new` enforces
    pub fn validate(&self) -> Result<(), AnchorError> {
        validate_parts(&self.0.first, self.0.second.as_ref(), self.0.multiplier)
    }
}

fn validate_parts(
    first: &AnchorRef,
    second: Option<&AnchorRef>,
    multiplier: f64,
) -> Result<(), AnchorError> {
    match second {
        Some(second) if second.category() != first.category() => {
            return Err(AnchorError::CategoryMismatch {
                first: first.category(),
                second: second.category(),
            });
        }
        None if first.category() != AnchorCategory::Dimension => {
            return Err(AnchorError::MissingTarget {
                category: first.category(),
            });
        }
        _ => {}
    }
    validate_multiplier(multiplier)?;
    Ok(())
}

impl fmt::Debug for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constraint")
            .field("id", &self.0.id)
            .field("first", &self.0.first)
            .field("relation", &self.0.relation)
            .field("second", &self.0.second)
            .field("multiplier", &self.0.multiplier)
            .field("constant", &self.0.constant)
            .field("priority", &self.priority())
            .field("active", &self.is_active())
            .finish()
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ", self.0.first, self.0.relation)?;
        match &self.0.second {
            Some(second) => {
                write!(f, "{}", second)?;
                if self.0.multiplier != 1.0 {
                    write!(f, " * {}", self.0.multiplier)?;
                }
                if self.0.constant > 0.0 {
                    write!(f, " + {}", self.0.constant)?;
                } else if self.0.constant < 0.0 {
                    write!(f, " - {}", -self.0.constant)?;
                }
            }
            None => write!(f, "{}", self.0.constant)?,
        }
        let priority = self.priority();
        if !priority.is_required() {
            write!(f, " @{}", priority.value())?;
        }
        Ok(())
    }
}

// ============================================================================
// Priority operator
// ============================================================================

/// Set the priority of one or many constraints in place, returning the same
/// handles for further chaining
pub trait WithPriority {
    fn with_priority(self, priority: impl Into<Priority>) -> Self;
}

impl WithPriority for Constraint {
    fn with_priority(self, priority: impl Into<Priority>) -> Self {
        self.set_priority(priority);
        self
    }
}

impl WithPriority for Vec<Constraint> {
    fn with_priority(self, priority: impl Into<Priority>) -> Self {
        let priority = priority.into();
        for constraint in &self {
            constraint.set_priority(priority);
        }
        self
    }
}
