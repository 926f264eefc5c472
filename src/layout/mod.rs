//! Layout engine boundary and the bundled constraint solver
//!
//! Constraints built with the anchor DSL are inert until a [`LayoutEngine`]
//! activates them. [`ConstraintSolver`] is the engine shipped with this
//! crate: it feeds active constraints to a Cassowary solver and reports the
//! resulting view frames.

pub mod config;
pub mod engine;
pub mod error;
pub mod solver;
pub mod types;

pub use config::{ConfigError, LayoutConfig};
pub use engine::LayoutEngine;
pub use error::LayoutError;
pub use solver::{ConstraintSolver, SolverError};
pub use types::*;
