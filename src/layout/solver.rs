//! Constraint solver integration for layout computation
//!
//! This module provides a `LayoutEngine` on top of the kasuari Cassowary
//! constraint solver. Every view contributes four variables (x, y, width,
//! height); anchors on a view's safe-area guide also pull in four inset
//! variables, held at their configured values by edit suggestions.

use std::collections::{BTreeMap, HashMap};

use kasuari::{
    Expression, Solver as KasuariSolver, Strength, Variable as KasuariVariable,
    WeightedRelation::{self, *},
};
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::anchor::Priority;
use crate::constraint::{Constraint, ConstraintId, Relation};
use crate::item::{AnchorRef, Attribute, View, ViewId};

use super::config::LayoutConfig;
use super::engine::LayoutEngine;
use super::error::{describe, LayoutError};
use super::types::{EdgeInsets, FrameProperty, Rect};

/// Properties backed by a solver variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutProperty {
    X,
    Y,
    Width,
    Height,
    InsetTop,
    InsetLeft,
    InsetBottom,
    InsetRight,
}

impl From<FrameProperty> for LayoutProperty {
    fn from(property: FrameProperty) -> Self {
        match property {
            FrameProperty::X => LayoutProperty::X,
            FrameProperty::Y => LayoutProperty::Y,
            FrameProperty::Width => LayoutProperty::Width,
            FrameProperty::Height => LayoutProperty::Height,
        }
    }
}

/// A variable in the constraint system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayoutVariable {
    pub view: ViewId,
    pub property: LayoutProperty,
}

impl LayoutVariable {
    pub fn new(view: ViewId, property: LayoutProperty) -> Self {
        Self { view, property }
    }
}

/// Where along its axis an attribute sits
#[derive(Debug, Clone, Copy)]
enum AxisPosition {
    Start,
    End,
    Center,
    Length,
}

/// Errors from the constraint solver
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("cannot satisfy {constraint}: conflicts with existing constraints")]
    Unsatisfiable {
        constraint: String,
        /// Active constraints sharing a view with the rejected one
        conflicting: Vec<String>,
    },

    #[error("duplicate constraint: {constraint}")]
    Duplicate { constraint: String },

    #[error("internal solver error: {0}")]
    Internal(String),
}

/// A constraint as it was handed to kasuari
#[derive(Clone)]
struct ActiveConstraint {
    constraint: Constraint,
    translated: kasuari::Constraint,
    /// Priority at the time of translation
    priority: Priority,
}

/// Everything a failed activation may have touched
struct Snapshot {
    variables: HashMap<LayoutVariable, KasuariVariable>,
    edits: HashMap<LayoutVariable, f64>,
    views: BTreeMap<ViewId, View>,
    insets: HashMap<ViewId, EdgeInsets>,
    active: BTreeMap<ConstraintId, ActiveConstraint>,
}

/// Wrapper around kasuari solver
pub struct ConstraintSolver {
    solver: KasuariSolver,
    config: LayoutConfig,
    /// Maps our variables to kasuari variables
    variables: HashMap<LayoutVariable, KasuariVariable>,
    /// Latest solved value of every variable that has changed
    values: HashMap<LayoutVariable, f64>,
    /// Edit variables and their last suggested value
    edits: HashMap<LayoutVariable, f64>,
    views: BTreeMap<ViewId, View>,
    insets: HashMap<ViewId, EdgeInsets>,
    active: BTreeMap<ConstraintId, ActiveConstraint>,
}

impl ConstraintSolver {
    pub fn new() -> Self {
        Self::with_config(LayoutConfig::default())
    }

    pub fn with_config(config: LayoutConfig) -> Self {
        Self {
            solver: KasuariSolver::new(),
            config,
            variables: HashMap::new(),
            values: HashMap::new(),
            edits: HashMap::new(),
            views: BTreeMap::new(),
            insets: HashMap::new(),
            active: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Get or create a kasuari variable for one of `view`'s properties
    fn variable(&mut self, view: &View, property: LayoutProperty) -> KasuariVariable {
        self.views.entry(view.id()).or_insert_with(|| view.clone());
        *self
            .variables
            .entry(LayoutVariable::new(view.id(), property))
            .or_insert_with(KasuariVariable::new)
    }

    fn expr(&mut self, view: &View, property: LayoutProperty) -> Expression {
        self.variable(view, property).into()
    }

    /// Build the solver expression an anchor stands for
    ///
    /// Guide anchors are the view's edges moved in by its safe-area insets.
    fn anchor_expression(&mut self, anchor: &AnchorRef) -> Result<Expression, SolverError> {
        let view = anchor.item.view();
        let (horizontal, position) = match anchor.attribute {
            Attribute::Leading => (true, AxisPosition::Start),
            Attribute::Trailing => (true, AxisPosition::End),
            Attribute::CenterX => (true, AxisPosition::Center),
            Attribute::Width => (true, AxisPosition::Length),
            Attribute::Top => (false, AxisPosition::Start),
            Attribute::Bottom => (false, AxisPosition::End),
            Attribute::CenterY => (false, AxisPosition::Center),
            Attribute::Height => (false, AxisPosition::Length),
        };
        let (origin, length, start_inset, end_inset) = if horizontal {
            (
                LayoutProperty::X,
                LayoutProperty::Width,
                LayoutProperty::InsetLeft,
                LayoutProperty::InsetRight,
            )
        } else {
            (
                LayoutProperty::Y,
                LayoutProperty::Height,
                LayoutProperty::InsetTop,
                LayoutProperty::InsetBottom,
            )
        };

        let raw = match position {
            AxisPosition::Start => self.expr(view, origin),
            AxisPosition::End => self.expr(view, origin) + self.expr(view, length),
            AxisPosition::Center => self.expr(view, origin) + 0.5 * self.expr(view, length),
            AxisPosition::Length => self.expr(view, length),
        };
        if !anchor.item.is_guide() {
            return Ok(raw);
        }

        self.ensure_insets(view)?;
        let start = self.expr(view, start_inset);
        let end = self.expr(view, end_inset);
        Ok(match position {
            AxisPosition::Start => raw + start,
            AxisPosition::End => raw + -1.0 * end,
            AxisPosition::Center => raw + 0.5 * start + -0.5 * end,
            AxisPosition::Length => raw + -1.0 * start + -1.0 * end,
        })
    }

    fn strength(&self, priority: Priority) -> Strength {
        if priority.is_required() {
            Strength::REQUIRED
        } else {
            Strength::new(priority.value() as f64 * self.config.strength_per_priority)
        }
    }

    fn weighted(relation: Relation, strength: Strength) -> WeightedRelation {
        match relation {
            Relation::Equal => EQ(strength),
            Relation::GreaterThanOrEqual => GE(strength),
            Relation::LessThanOrEqual => LE(strength),
        }
    }

    /// Translate a constraint into the solver's form
    fn translate(&mut self, constraint: &Constraint) -> Result<kasuari::Constraint, LayoutError> {
        constraint
            .validate()
            .map_err(|e| LayoutError::invalid(constraint, e))?;

        let first = self.anchor_expression(constraint.first_anchor())?;
        let relation = Self::weighted(constraint.relation(), self.strength(constraint.priority()));
        Ok(match constraint.second_anchor() {
            Some(second) => {
                let second = self.anchor_expression(second)?;
                first | relation | constraint.multiplier() * second + constraint.constant()
            }
            None => first | relation | constraint.constant(),
        })
    }

    /// Convert a kasuari error to a SolverError with context
    fn convert_kasuari_error(
        &self,
        e: kasuari::AddConstraintError,
        constraint: &Constraint,
    ) -> SolverError {
        match e {
            kasuari::AddConstraintError::UnsatisfiableConstraint => SolverError::Unsatisfiable {
                constraint: describe(constraint),
                conflicting: self.related_constraints(constraint),
            },
            kasuari::AddConstraintError::DuplicateConstraint => SolverError::Duplicate {
                constraint: describe(constraint),
            },
            kasuari::AddConstraintError::InternalSolverError(msg) => SolverError::Internal(
                format!("Internal solver error for {}: {}", describe(constraint), msg),
            ),
        }
    }

    /// Constraints in the solver touching any view `constraint` touches
    fn related_constraints(&self, constraint: &Constraint) -> Vec<String> {
        let views = constraint_views(constraint);
        self.active
            .values()
            .map(|entry| &entry.constraint)
            .filter(|other| constraint_views(other).iter().any(|v| views.contains(v)))
            .map(describe)
            .collect()
    }

    /// Translate and add one constraint, recording it as active
    fn add(&mut self, constraint: &Constraint) -> Result<(), LayoutError> {
        let translated = self.translate(constraint)?;
        self.solver
            .add_constraint(translated.clone())
            .map_err(|e| self.convert_kasuari_error(e, constraint))?;
        trace!(constraint = %constraint, "added constraint");
        self.active.insert(
            constraint.id(),
            ActiveConstraint {
                constraint: constraint.clone(),
                translated,
                priority: constraint.priority(),
            },
        );
        Ok(())
    }

    fn activate_batch(
        &mut self,
        constraints: &[Constraint],
        added: &mut Vec<Constraint>,
    ) -> Result<(), LayoutError> {
        for constraint in constraints {
            if let Some(entry) = self.active.get(&constraint.id()) {
                if entry.priority == constraint.priority() {
                    trace!(constraint = %constraint, "already active, skipping");
                    continue;
                }
                // The priority changed since translation; swap in a fresh copy
                let stale = entry.translated.clone();
                self.solver.remove_constraint(&stale).map_err(|e| {
                    SolverError::Internal(format!(
                        "Failed to remove {}: {}",
                        describe(constraint),
                        e
                    ))
                })?;
                self.active.remove(&constraint.id());
                debug!(constraint = %constraint, "re-adding with new priority");
            } else {
                added.push(constraint.clone());
            }
            self.add(constraint)?;
        }
        Ok(())
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            variables: self.variables.clone(),
            edits: self.edits.clone(),
            views: self.views.clone(),
            insets: self.insets.clone(),
            active: self.active.clone(),
        }
    }

    /// Put back a snapshot and rebuild the solver around it
    ///
    /// kasuari keeps internal state from a rejected add, so the solver is
    /// replaced rather than unwound.
    fn restore(&mut self, snapshot: Snapshot) {
        self.variables = snapshot.variables;
        self.edits = snapshot.edits;
        self.views = snapshot.views;
        self.insets = snapshot.insets;
        self.active = snapshot.active;
        if let Err(e) = self.rebuild() {
            warn!(error = %e, "failed to rebuild solver");
        }
    }

    /// Replay edit variables and active constraints into a new solver
    fn rebuild(&mut self) -> Result<(), SolverError> {
        let mut solver = KasuariSolver::new();
        for entry in self.active.values() {
            solver.add_constraint(entry.translated.clone()).map_err(|e| {
                SolverError::Internal(format!(
                    "Failed to replay {}: {}",
                    describe(&entry.constraint),
                    e
                ))
            })?;
        }
        for (var, &value) in &self.edits {
            let Some(&kvar) = self.variables.get(var) else {
                continue;
            };
            solver
                .add_edit_variable(kvar, Strength::new(self.config.edit_strength))
                .map_err(|e| SolverError::Internal(format!("Failed to add edit variable: {}", e)))?;
            solver
                .suggest_value(kvar, value)
                .map_err(|e| SolverError::Internal(format!("Failed to suggest value: {}", e)))?;
        }
        self.solver = solver;
        self.values.clear();
        self.refresh();
        trace!(
            constraints = self.active.len(),
            edits = self.edits.len(),
            "rebuilt solver"
        );
        Ok(())
    }

    /// Pull changed values out of the solver into the cache
    fn refresh(&mut self) {
        for (kvar, value) in self.solver.fetch_changes() {
            if let Some(var) = self
                .variables
                .iter()
                .find(|(_, k)| **k == *kvar)
                .map(|(var, _)| *var)
            {
                self.values.insert(var, *value);
            }
        }
    }

    fn edit(&mut self, var: LayoutVariable, view: &View, value: f64) -> Result<(), SolverError> {
        let kvar = self.variable(view, var.property);
        if !self.edits.contains_key(&var) {
            self.solver
                .add_edit_variable(kvar, Strength::new(self.config.edit_strength))
                .map_err(|e| SolverError::Internal(format!("Failed to add edit variable: {}", e)))?;
        }
        self.solver
            .suggest_value(kvar, value)
            .map_err(|e| SolverError::Internal(format!("Failed to suggest value: {}", e)))?;
        self.edits.insert(var, value);
        trace!(view = view.name(), property = ?var.property, value, "suggested value");
        Ok(())
    }

    fn ensure_insets(&mut self, view: &View) -> Result<(), SolverError> {
        if self.insets.contains_key(&view.id()) {
            return Ok(());
        }
        let insets = self.config.safe_area_insets;
        self.apply_insets(view, insets)
    }

    fn apply_insets(&mut self, view: &View, insets: EdgeInsets) -> Result<(), SolverError> {
        for (property, value) in [
            (LayoutProperty::InsetTop, insets.top),
            (LayoutProperty::InsetLeft, insets.left),
            (LayoutProperty::InsetBottom, insets.bottom),
            (LayoutProperty::InsetRight, insets.right),
        ] {
            self.edit(LayoutVariable::new(view.id(), property), view, value)?;
        }
        self.insets.insert(view.id(), insets);
        Ok(())
    }
}

fn constraint_views(constraint: &Constraint) -> Vec<ViewId> {
    let mut views = vec![constraint.first_anchor().item.view().id()];
    if let Some(second) = constraint.second_anchor() {
        views.push(second.item.view().id());
    }
    views
}

impl Default for ConstraintSolver {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Host operations
// ============================================================================

impl ConstraintSolver {
    /// Suggest a value for one frame component of `view`
    ///
    /// Suggestions are edits at the configured edit strength: required
    /// constraints win over them.
    pub fn suggest_value(
        &mut self,
        view: &View,
        property: FrameProperty,
        value: f64,
    ) -> Result<(), SolverError> {
        self.edit(LayoutVariable::new(view.id(), property.into()), view, value)?;
        self.refresh();
        Ok(())
    }

    /// Suggest every component of `view`'s frame
    pub fn suggest_frame(&mut self, view: &View, frame: Rect) -> Result<(), SolverError> {
        for &property in FrameProperty::all() {
            self.edit(
                LayoutVariable::new(view.id(), property.into()),
                view,
                property.of(&frame),
            )?;
        }
        self.refresh();
        debug!(view = view.name(), frame = %frame, "suggested frame");
        Ok(())
    }

    /// Set the safe-area insets of `view`, replacing the configured default
    pub fn set_safe_area_insets(
        &mut self,
        view: &View,
        insets: EdgeInsets,
    ) -> Result<(), SolverError> {
        self.apply_insets(view, insets)?;
        self.refresh();
        Ok(())
    }

    pub fn safe_area_insets(&self, view: &View) -> EdgeInsets {
        self.insets
            .get(&view.id())
            .copied()
            .unwrap_or(self.config.safe_area_insets)
    }

    fn value(&self, view: &View, property: LayoutProperty) -> f64 {
        self.values
            .get(&LayoutVariable::new(view.id(), property))
            .copied()
            .unwrap_or(0.0)
    }

    /// The solved frame of `view`; unconstrained components read as zero
    pub fn frame(&self, view: &View) -> Rect {
        Rect::new(
            self.value(view, LayoutProperty::X),
            self.value(view, LayoutProperty::Y),
            self.value(view, LayoutProperty::Width),
            self.value(view, LayoutProperty::Height),
        )
    }

    /// The solved frame of `view`'s safe-area guide
    pub fn safe_area_frame(&self, view: &View) -> Rect {
        self.frame(view).inset_by(&self.safe_area_insets(view))
    }

    /// Every view the solver has seen, in creation order, with its frame
    pub fn frames(&self) -> Vec<(View, Rect)> {
        self.views
            .values()
            .map(|view| (view.clone(), self.frame(view)))
            .collect()
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Active constraints in creation order
    pub fn active_constraints(&self) -> impl Iterator<Item = &Constraint> {
        self.active.values().map(|entry| &entry.constraint)
    }

    pub fn is_active(&self, constraint: &Constraint) -> bool {
        self.active.contains_key(&constraint.id())
    }
}

impl LayoutEngine for ConstraintSolver {
    fn activate(&mut self, constraints: &[Constraint]) -> Result<(), LayoutError> {
        let snapshot = self.snapshot();
        let mut added = Vec::new();

        if let Err(e) = self.activate_batch(constraints, &mut added) {
            debug!(error = %e, rolled_back = added.len(), "activation failed");
            self.restore(snapshot);
            return Err(e);
        }

        debug!(requested = constraints.len(), added = added.len(), "activated constraints");
        for constraint in &added {
            constraint.set_active(true);
        }
        self.refresh();
        Ok(())
    }

    fn deactivate(&mut self, constraints: &[Constraint]) -> Result<(), LayoutError> {
        let mut removed = 0;
        for constraint in constraints {
            let Some(ActiveConstraint {
                constraint,
                translated,
                ..
            }) = self.active.remove(&constraint.id())
            else {
                continue;
            };
            self.solver.remove_constraint(&translated).map_err(|e| {
                SolverError::Internal(format!(
                    "Failed to remove {}: {}",
                    describe(&constraint),
                    e
                ))
            })?;
            constraint.set_active(false);
            removed += 1;
        }

        debug!(requested = constraints.len(), removed, "deactivated constraints");
        self.refresh();
        Ok(())
    }
}

impl Drop for ConstraintSolver {
    fn drop(&mut self) {
        for entry in self.active.values() {
            entry.constraint.set_active(false);
        }
    }
}
