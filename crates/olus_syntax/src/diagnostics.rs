//! Diagnostics and error reporting for Oluś
//!
//! Scanner and parser problems are collected as [`Diagnostic`]s and never abort a parse. The only hard failure is
//! [`ParseError`], raised when a configured resource bound is exceeded.

use std::fmt;

use miette::{LabeledSpan, NamedSource, SourceCode};
use thiserror::Error;

use crate::tree::Span;

/// How bad a diagnostic is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// What went wrong
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// Dedent to a column width that is not on the indentation stack.
    IndentationError,
    /// End of input inside a string.
    UnterminatedString,
    /// The parser cannot extend any rule at this token.
    UnexpectedToken,
    /// A character that starts no token.
    UnexpectedCharacter,
    /// Leading whitespace mixes tabs and spaces.
    MixedIndentation,
}

impl DiagnosticKind {
    pub fn severity(self) -> Severity {
        match self {
            DiagnosticKind::MixedIndentation => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Stable code shown next to rendered reports.
    pub fn code(self) -> &'static str {
        match self {
            DiagnosticKind::IndentationError => "olus::indentation",
            DiagnosticKind::UnterminatedString => "olus::unterminated_string",
            DiagnosticKind::UnexpectedToken => "olus::unexpected_token",
            DiagnosticKind::UnexpectedCharacter => "olus::unexpected_character",
            DiagnosticKind::MixedIndentation => "olus::mixed_indentation",
        }
    }
}

/// A located problem found while scanning or parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub span: Span,
    pub kind: DiagnosticKind,
    pub severity: Severity,
    pub notes: Vec<String>,
    pub hints: Vec<String>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            kind,
            severity: kind.severity(),
            notes: Vec::new(),
            hints: Vec::new(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(hint.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Attach source text so the diagnostic can be rendered with a labelled snippet.
    pub fn to_report(&self, name: &str, source: &str) -> miette::Report {
        miette::Report::new(SourceDiagnostic {
            diagnostic: self.clone(),
            source: NamedSource::new(name, source.to_string()),
        })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

/// A [`Diagnostic`] bundled with its source for miette rendering.
#[derive(Debug)]
struct SourceDiagnostic {
    diagnostic: Diagnostic,
    source: NamedSource<String>,
}

impl fmt::Display for SourceDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diagnostic.message)
    }
}

impl std::error::Error for SourceDiagnostic {}

impl miette::Diagnostic for SourceDiagnostic {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.diagnostic.kind.code()))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(match self.diagnostic.severity {
            Severity::Error => miette::Severity::Error,
            Severity::Warning => miette::Severity::Warning,
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let lines: Vec<&str> = self
            .diagnostic
            .hints
            .iter()
            .chain(self.diagnostic.notes.iter())
            .map(String::as_str)
            .collect();
        if lines.is_empty() {
            None
        } else {
            Some(Box::new(lines.join("\n")))
        }
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        Some(&self.source)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.diagnostic.span;
        Some(Box::new(std::iter::once(LabeledSpan::new_with_span(
            Some(self.diagnostic.kind.severity().to_string()),
            (span.start, span.len()),
        ))))
    }
}

/// Which configured bound a parse ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Nodes,
    Depth,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Nodes => write!(f, "node"),
            Resource::Depth => write!(f, "nesting depth"),
        }
    }
}

/// A parse that could not produce a tree at all
#[derive(Debug, Clone, PartialEq, Eq, Error, miette::Diagnostic)]
pub enum ParseError {
    #[error("parse exceeded the {resource} limit of {limit}")]
    #[diagnostic(
        code(olus::resource_exceeded),
        help("raise `max_nodes` / `max_depth` in the parse configuration")
    )]
    ResourceExceeded {
        resource: Resource,
        limit: usize,
        /// Byte offset at which the limit was hit
        offset: usize,
    },
}

// ============================================================================
// Diagnostic catalog
// ============================================================================

/// Constructors for the errors the scanner and parser report
pub mod errors {
    use super::*;

    pub fn inconsistent_indentation(expected: usize, found: usize, span: Span) -> Diagnostic {
        Diagnostic::new(
            DiagnosticKind::IndentationError,
            format!("Inconsistent indentation: expected {} columns, got {}", expected, found),
            span,
        )
        .with_hint("Dedent to the column of an enclosing block")
    }

    pub fn unterminated_string(span: Span) -> Diagnostic {
        Diagnostic::new(DiagnosticKind::UnterminatedString, "Unterminated string", span)
            .with_note("Strings open with “ and close with ”; every nested “ needs its own ”")
    }

    pub fn unexpected_character(text: &str, span: Span) -> Diagnostic {
        let message = if text.chars().count() == 1 {
            format!("Unexpected character {:?}", text)
        } else {
            format!("Unexpected characters {:?}", text)
        };
        Diagnostic::new(DiagnosticKind::UnexpectedCharacter, message, span)
    }

    pub fn unexpected_token(found: &str, expected: &str, span: Span) -> Diagnostic {
        Diagnostic::new(
            DiagnosticKind::UnexpectedToken,
            format!("Expected {}, found {}", expected, found),
            span,
        )
    }

    pub fn unclosed_group(found: &str, open: Span, span: Span) -> Diagnostic {
        unexpected_token(found, "`)`", span).with_note(format!("Group opened at byte {}", open.start))
    }

    pub fn unexpected_indentation(span: Span) -> Diagnostic {
        Diagnostic::new(DiagnosticKind::UnexpectedToken, "Unexpected indentation", span)
            .with_hint("Only a procedure head ending in `:` can open an indented block")
    }

    pub fn missing_procedure_name(span: Span) -> Diagnostic {
        Diagnostic::new(
            DiagnosticKind::UnexpectedToken,
            "Expected a procedure name before `:`",
            span,
        )
    }
}

/// Constructors for warnings
pub mod warnings {
    use super::*;

    pub fn mixed_indentation(span: Span) -> Diagnostic {
        Diagnostic::new(
            DiagnosticKind::MixedIndentation,
            "Indentation mixes tabs and spaces",
            span,
        )
    }
}
