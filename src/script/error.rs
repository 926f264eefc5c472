//! Errors raised while evaluating a layout script

use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::anchor::AnchorError;
use crate::constraint::Relation;
use crate::layout::{LayoutError, SolverError};
use crate::parser::Span;
use crate::ParseError;

#[derive(Debug, Error)]
pub enum ScriptError {
    /// Error during parsing
    #[error("parse errors: {}", format_parse_errors(.0))]
    Parse(Vec<ParseError>),

    #[error("undefined view '{name}'")]
    UndefinedView {
        name: String,
        span: Span,
        suggestions: Vec<String>,
    },

    #[error("view '{name}' is declared more than once")]
    DuplicateView {
        name: String,
        span: Span,
        first: Span,
    },

    #[error("view '{name}' must be declared at the top level, not inside a conditional")]
    NestedView { name: String, span: Span },

    #[error("unknown anchor '{name}' (valid anchors: {valid})")]
    UnknownAnchor {
        name: String,
        span: Span,
        valid: String,
        suggestions: Vec<String>,
    },

    #[error("unknown view property '{name}' (valid properties: {valid})")]
    UnknownProperty {
        name: String,
        span: Span,
        valid: String,
        suggestions: Vec<String>,
    },

    /// Runtime counterpart of the compile-time category check
    #[error("cannot relate a {subject} anchor to a {operand} operand")]
    CategoryMismatch {
        subject: &'static str,
        operand: &'static str,
        span: Span,
    },

    #[error("'{path}' needs a target anchor; constant operands apply to width and height")]
    MissingTarget { path: String, span: Span },

    #[error("{subject} anchors only support equality, not '{relation}'")]
    UnsupportedRelation {
        subject: &'static str,
        relation: Relation,
        span: Span,
    },

    #[error("'*' and '/' only apply to dimension anchors, not {subject} anchors")]
    UnsupportedModifier { subject: &'static str, span: Span },

    #[error("{source}")]
    Anchor { source: AnchorError, span: Span },

    /// Error during layout
    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),
}

impl From<Vec<ParseError>> for ScriptError {
    fn from(errors: Vec<ParseError>) -> Self {
        ScriptError::Parse(errors)
    }
}

impl From<SolverError> for ScriptError {
    fn from(error: SolverError) -> Self {
        ScriptError::Layout(error.into())
    }
}

fn format_parse_errors(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl ScriptError {
    /// Get the source span if available
    pub fn span(&self) -> Option<&Span> {
        match self {
            Self::UndefinedView { span, .. }
            | Self::DuplicateView { span, .. }
            | Self::NestedView { span, .. }
            | Self::UnknownAnchor { span, .. }
            | Self::UnknownProperty { span, .. }
            | Self::CategoryMismatch { span, .. }
            | Self::MissingTarget { span, .. }
            | Self::UnsupportedRelation { span, .. }
            | Self::UnsupportedModifier { span, .. }
            | Self::Anchor { span, .. } => Some(span),
            Self::Parse(_) | Self::Layout(_) => None,
        }
    }

    /// Get suggestions if available
    pub fn suggestions(&self) -> Option<&[String]> {
        match self {
            Self::UndefinedView { suggestions, .. }
            | Self::UnknownAnchor { suggestions, .. }
            | Self::UnknownProperty { suggestions, .. } => Some(suggestions),
            _ => None,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        if let Self::Parse(errors) = self {
            return errors
                .iter()
                .map(|e| e.format(source, filename))
                .collect::<Vec<_>>()
                .join("\n");
        }
        let Some(span) = self.span() else {
            return format!("error: {}", self);
        };

        let message = self.to_string();
        let mut report = Report::build(ReportKind::Error, filename, span.start)
            .with_config(Config::default().with_index_type(IndexType::Byte))
            .with_message(&message)
            .with_label(
                Label::new((filename, span.clone()))
                    .with_message(&message)
                    .with_color(Color::Red),
            );
        if let Self::DuplicateView { first, .. } = self {
            report = report.with_label(
                Label::new((filename, first.clone()))
                    .with_message("first declared here")
                    .with_color(Color::Blue),
            );
        }
        if let Some(suggestions) = self.suggestions().filter(|s| !s.is_empty()) {
            report = report.with_help(format!("did you mean {}?", suggestions.join(", ")));
        }

        let mut buf = Vec::new();
        if report
            .finish()
            .write((filename, Source::from(source)), &mut buf)
            .is_err()
        {
            return format!("error: {}", self);
        }
        String::from_utf8_lossy(&buf).into_owned()
    }
}
