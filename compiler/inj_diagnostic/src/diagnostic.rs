//! Core diagnostic types for structured error reporting.
//!
//! Defines [`Diagnostic`], [`Label`], [`Severity`] and [`SourceInfo`], the
//! building blocks every phase uses to report errors and warnings.

use std::fmt;
use std::sync::Arc;

use inj_ir::Span;

use crate::ErrorCode;

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
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

/// The file a label points into.
///
/// Labels of the validator routinely cross file boundaries (a registration in
/// one file, the unmet parameter in another), so each label may carry its own
/// file. The content is shared, not copied, between labels.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SourceInfo {
    /// The file path as given to the program.
    pub path: String,
    /// Full source text, used to compute line/column positions.
    pub content: Arc<str>,
}

impl SourceInfo {
    pub fn new(path: impl Into<String>, content: impl Into<Arc<str>>) -> Self {
        SourceInfo {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// A labeled span with a message.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Label {
    /// The source location to highlight.
    pub span: Span,
    /// The label text explaining this location.
    pub message: String,
    /// Whether this is the primary error location.
    pub is_primary: bool,
    /// The file of the span; `None` means the file being diagnosed.
    pub source_info: Option<SourceInfo>,
}

impl Label {
    /// Create a primary label (the main error location).
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Label {
            span,
            message: message.into(),
            is_primary: true,
            source_info: None,
        }
    }

    /// Create a secondary label (related context).
    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Label {
            span,
            message: message.into(),
            is_primary: false,
            source_info: None,
        }
    }

    /// Attach the file this label points into.
    #[must_use]
    pub fn in_file(mut self, source_info: SourceInfo) -> Self {
        self.source_info = Some(source_info);
        self
    }

    /// Path of the labelled file, if known.
    pub fn path(&self) -> Option<&str> {
        self.source_info.as_ref().map(|src| src.path.as_str())
    }
}

/// A rich diagnostic with all context needed for good error messages.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    /// Error code for searchability.
    pub code: ErrorCode,
    pub severity: Severity,
    /// Main error message.
    pub message: String,
    /// Labeled spans showing where the error occurred.
    pub labels: Vec<Label>,
    /// Additional notes providing context.
    pub notes: Vec<String>,
    /// Text suggestions for fixing the error.
    pub suggestions: Vec<String>,
}

impl Diagnostic {
    fn new_with_severity(code: ErrorCode, severity: Severity) -> Self {
        Diagnostic {
            code,
            severity,
            message: String::new(),
            labels: Vec::new(),
            notes: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Create a new error diagnostic.
    #[cold]
    pub fn error(code: ErrorCode) -> Self {
        Self::new_with_severity(code, Severity::Error)
    }

    /// Create a new warning diagnostic.
    #[cold]
    pub fn warning(code: ErrorCode) -> Self {
        Self::new_with_severity(code, Severity::Warning)
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add a primary label at the error location.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Add a primary label in an explicitly named file.
    pub fn with_file_label(
        mut self,
        span: Span,
        message: impl Into<String>,
        source_info: SourceInfo,
    ) -> Self {
        self.labels
            .push(Label::primary(span, message).in_file(source_info));
        self
    }

    /// Add a secondary label in an explicitly named file.
    ///
    /// Use this for related context elsewhere in the program, such as the
    /// constructor parameter a registration fails to satisfy.
    pub fn with_file_secondary_label(
        mut self,
        span: Span,
        message: impl Into<String>,
        source_info: SourceInfo,
    ) -> Self {
        self.labels
            .push(Label::secondary(span, message).in_file(source_info));
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.severity, self.code, self.message)?;

        for label in &self.labels {
            let marker = if label.is_primary { "-->" } else { ":::" };
            match label.path() {
                Some(path) => write!(
                    f,
                    "\n  {marker} {path} {:?}: {}",
                    label.span, label.message
                )?,
                None => write!(f, "\n  {marker} {:?}: {}", label.span, label.message)?,
            }
        }

        for note in &self.notes {
            write!(f, "\n  = note: {note}")?;
        }

        for suggestion in &self.suggestions {
            write!(f, "\n  = help: {suggestion}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
