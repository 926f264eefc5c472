//! Abstract Syntax Tree types for layout scripts

use crate::anchor::Priority;
use crate::constraint::Relation;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// AST node with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// Valid identifier (alphanumeric + underscore, starts with letter/_)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(pub String);

impl Identifier {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Root AST node - a complete layout script
#[derive(Debug, Clone, PartialEq)]
pub struct Script {
    pub statements: Vec<Spanned<Statement>>,
}

/// Statement in a script or conditional block
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `view name [key: value, ...]`
    View(ViewDecl),
    /// `path ≈ operand • priority`
    Constraint(ConstraintDecl),
    /// `if flag { ... } else { ... }`
    Conditional(Conditional),
}

/// View declaration with optional frame and safe-area properties
#[derive(Debug, Clone, PartialEq)]
pub struct ViewDecl {
    pub name: Spanned<Identifier>,
    pub properties: Vec<Spanned<ViewProperty>>,
}

/// `key: value` inside a view declaration
#[derive(Debug, Clone, PartialEq)]
pub struct ViewProperty {
    pub key: Spanned<Identifier>,
    pub value: Spanned<f64>,
}

/// `view.attribute` or `view.safe.attribute`
#[derive(Debug, Clone, PartialEq)]
pub struct AnchorPath {
    pub view: Spanned<Identifier>,
    pub safe: bool,
    pub attribute: Spanned<Identifier>,
}

impl std::fmt::Display for AnchorPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.safe {
            write!(f, "{}.safe.{}", self.view.node, self.attribute.node)
        } else {
            write!(f, "{}.{}", self.view.node, self.attribute.node)
        }
    }
}

/// Arithmetic applied to an anchor operand, left to right
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Modifier {
    /// `+ k`
    Offset(f64),
    /// `- k`
    Inset(f64),
    /// `* k`
    Scale(f64),
    /// `/ k`
    Divide(f64),
}

/// Anchor operand with its modifiers
#[derive(Debug, Clone, PartialEq)]
pub struct AnchorExpr {
    pub path: Spanned<AnchorPath>,
    pub modifiers: Vec<Spanned<Modifier>>,
}

/// Right-hand side of a constraint
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Anchor(AnchorExpr),
    /// Absolute size
    Constant(f64),
    /// `[width, height]`
    Sizes(Vec<Spanned<f64>>),
}

/// A relation between an anchor path and an operand
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintDecl {
    pub subject: Spanned<AnchorPath>,
    pub relation: Spanned<Relation>,
    pub operand: Spanned<Operand>,
    pub priority: Option<Spanned<Priority>>,
}

/// Flag-driven choice between two statement blocks
#[derive(Debug, Clone, PartialEq)]
pub struct Conditional {
    pub flag: Spanned<Identifier>,
    pub negated: bool,
    pub then_branch: Vec<Spanned<Statement>>,
    pub else_branch: Vec<Spanned<Statement>>,
}
