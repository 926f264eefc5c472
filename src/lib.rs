//! Snow Layout - A typed auto-layout constraint DSL
//!
//! This library provides anchors, constraint builders and a constraint
//! solver for laying out rectangular views, plus a small script language
//! that drives the same machinery from text.
//!
//! # Example
//!
//! ```rust
//! use snow_layout::prelude::*;
//!
//! let root = View::new("root");
//! let card = View::new("card");
//!
//! let mut solver = ConstraintSolver::new();
//! solver.suggest_frame(&root, Rect::new(0.0, 0.0, 375.0, 812.0)).unwrap();
//! solver
//!     .activate_with(|list| {
//!         list.add(card.edge_anchor().equal_to(root.edge_anchor()));
//!     })
//!     .unwrap();
//!
//! assert!(solver.frame(&card).approx_eq(&Rect::new(0.0, 0.0, 375.0, 812.0)));
//! ```

pub mod anchor;
pub mod builder;
pub mod composite;
pub mod constraint;
pub mod error;
pub mod item;
pub mod layout;
pub mod parser;
pub mod relation;
pub mod script;

pub use anchor::{Anchor, AnchorContainer, AnchorError, Priority};
pub use builder::{ConstraintGroup, ConstraintListBuilder};
pub use composite::{CompositeAnchor, SafeArea, SizeAnchors};
pub use constraint::{Constraint, ConstraintId, Relation, WithPriority};
pub use error::ParseError;
pub use item::{Dimension, LayoutAnchors, LayoutGuide, View, XAxisAnchor, YAxisAnchor};
pub use layout::{ConstraintSolver, LayoutConfig, LayoutEngine, LayoutError, Rect};
pub use parser::{parse, Script};
pub use relation::{AxisAnchor, DimensionAnchor};
pub use script::{Scene, ScriptError, SolvedLayout};

use std::collections::HashSet;

/// Everything needed to write layout code
pub mod prelude {
    pub use crate::anchor::{Anchor, AnchorContainer, Priority};
    pub use crate::builder::{ConstraintGroup, ConstraintListBuilder};
    pub use crate::composite::{CompositeAnchor, SafeArea, SizeAnchors};
    pub use crate::constraint::{Constraint, Relation, WithPriority};
    pub use crate::item::{LayoutAnchors, LayoutGuide, View};
    pub use crate::layout::{ConstraintSolver, EdgeInsets, LayoutEngine, Rect};
    pub use crate::relation::{AxisAnchor, DimensionAnchor};
}

/// Configuration for evaluating and solving a script
#[derive(Debug, Clone, Default)]
pub struct ScriptConfig {
    /// Solver configuration
    pub layout: LayoutConfig,
    /// Flags that are set for `if` blocks
    pub flags: HashSet<String>,
}

impl ScriptConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the solver configuration
    pub fn with_layout(mut self, config: LayoutConfig) -> Self {
        self.layout = config;
        self
    }

    /// Set a flag
    pub fn with_flag(mut self, flag: impl Into<String>) -> Self {
        self.flags.insert(flag.into());
        self
    }

    /// Set several flags
    pub fn with_flags<I, S>(mut self, flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.flags.extend(flags.into_iter().map(Into::into));
        self
    }
}

/// Solve a script with default configuration
///
/// This is the main entry point for scripts. It parses the source,
/// evaluates it into constraints and solves them.
///
/// # Example
///
/// ```rust
/// use snow_layout::{solve, Rect};
///
/// let layout = solve(r#"
///     view root [x: 0, y: 0, width: 320, height: 480]
///     view badge
///     badge.size ≈ [44, 44]
///     badge.center ≈ root.center
/// "#).unwrap();
///
/// let badge = layout.frame("badge").unwrap();
/// assert!(badge.approx_eq(&Rect::new(138.0, 218.0, 44.0, 44.0)));
/// ```
pub fn solve(source: &str) -> Result<SolvedLayout, ScriptError> {
    solve_with_config(source, &ScriptConfig::default())
}

/// Solve a script with custom configuration
///
/// # Example
///
/// ```rust
/// use snow_layout::{solve_with_config, ScriptConfig};
///
/// let source = r#"
///     view root [x: 0, y: 0, width: 320, height: 480]
///     view panel
///     panel.edges ≈ root.edges
///     if compact { panel.width ≤ 200 • high }
/// "#;
///
/// let config = ScriptConfig::new().with_flag("compact");
/// let layout = solve_with_config(source, &config).unwrap();
/// assert!((layout.frame("panel").unwrap().width - 320.0).abs() < 0.001);
/// ```
pub fn solve_with_config(source: &str, config: &ScriptConfig) -> Result<SolvedLayout, ScriptError> {
    let script = parse(source)?;
    let scene = Scene::evaluate(&script, &config.flags)?;
    scene.solve(&config.layout)
}
