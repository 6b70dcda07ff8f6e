//! Validation errors: problems found in a program, returned as data.

use std::fmt;

use inj_ir::{FileId, Span};

/// A source range in one program file.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Location {
    pub file: FileId,
    pub span: Span,
}

impl Location {
    pub fn new(file: FileId, span: Span) -> Self {
        Location { file, span }
    }
}

/// Extra location attached to an error, such as the parameter a
/// registration fails to satisfy.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RelatedLocation {
    pub location: Location,
    pub message: String,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    /// A required token has no reachable binding.
    MissingDependency,
    /// A provider class produces a type the consumer cannot accept.
    TypeMismatch,
    /// A token bound more than once in one configuration's ancestry.
    DuplicateToken,
    /// An `(event, listener)` pair bound more than once.
    DuplicateListener,
    /// A configuration extends itself.
    ExtendsCycle,
}

impl ValidationErrorKind {
    /// Short label for the primary location.
    pub fn label(self) -> &'static str {
        match self {
            ValidationErrorKind::MissingDependency => "registered here with an unsatisfied dependency",
            ValidationErrorKind::TypeMismatch => "provider registered here",
            ValidationErrorKind::DuplicateToken => "token registered again here",
            ValidationErrorKind::DuplicateListener => "listener registered again here",
            ValidationErrorKind::ExtendsCycle => "this reference closes the cycle",
        }
    }
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValidationErrorKind::MissingDependency => "missing dependency",
            ValidationErrorKind::TypeMismatch => "type mismatch",
            ValidationErrorKind::DuplicateToken => "duplicate token",
            ValidationErrorKind::DuplicateListener => "duplicate listener",
            ValidationErrorKind::ExtendsCycle => "extends cycle",
        })
    }
}

/// One problem found by the validator.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
    pub message: String,
    pub location: Location,
    pub related: Vec<RelatedLocation>,
    /// How to fix it.
    pub hint: Option<String>,
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>, location: Location) -> Self {
        ValidationError {
            kind,
            message: message.into(),
            location,
            related: Vec::new(),
            hint: None,
        }
    }

    #[must_use]
    pub fn with_related(mut self, location: Location, message: impl Into<String>) -> Self {
        self.related.push(RelatedLocation {
            location,
            message: message.into(),
        });
        self
    }

    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}
