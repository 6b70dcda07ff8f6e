//! Parse error types.

use inj_diagnostic::{Diagnostic, ErrorCode, SourceInfo};
use inj_ir::{Span, TokenKind};

/// A parse error located in one file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    /// Error code for searchability.
    pub code: ErrorCode,
    pub message: String,
    pub span: Span,
    /// Label text at the error location.
    pub context: Option<String>,
    /// Related location in the same file, e.g. an opening delimiter.
    pub related: Option<(Span, String)>,
    pub help: Vec<String>,
}

impl ParseError {
    #[cold]
    pub fn new(code: ErrorCode, message: impl Into<String>, span: Span) -> Self {
        ParseError {
            code,
            message: message.into(),
            span,
            context: None,
            related: None,
            help: Vec::new(),
        }
    }

    /// `expected X, found Y`.
    #[cold]
    pub fn unexpected(expected: &str, found: TokenKind, span: Span) -> Self {
        ParseError::new(
            ErrorCode::E1001,
            format!("expected {expected}, found {}", describe(found)),
            span,
        )
        .with_context(format!("expected {expected}"))
    }

    #[cold]
    pub fn expected_expression(found: TokenKind, span: Span) -> Self {
        ParseError::new(
            ErrorCode::E1002,
            format!("expected expression, found {}", describe(found)),
            span,
        )
        .with_context("expected expression")
    }

    #[cold]
    pub fn expected_identifier(found: TokenKind, span: Span) -> Self {
        ParseError::new(
            ErrorCode::E1004,
            format!("expected identifier, found {}", describe(found)),
            span,
        )
        .with_context("expected identifier")
    }

    #[cold]
    pub fn expected_type(found: TokenKind, span: Span) -> Self {
        ParseError::new(
            ErrorCode::E1005,
            format!("expected type, found {}", describe(found)),
            span,
        )
        .with_context("expected type")
    }

    /// A delimiter opened at `open_span` is never closed.
    #[cold]
    pub fn unclosed(open: TokenKind, open_span: Span, close: TokenKind, at: Span) -> Self {
        ParseError::new(
            ErrorCode::E1003,
            format!("unclosed delimiter `{open}`"),
            at,
        )
        .with_context(format!("expected `{close}`"))
        .with_related(open_span, format!("`{open}` opened here"))
        .with_help(format!("add a matching `{close}`"))
    }

    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    #[must_use]
    pub fn with_related(mut self, span: Span, message: impl Into<String>) -> Self {
        self.related = Some((span, message.into()));
        self
    }

    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help.push(help.into());
        self
    }

    /// Convert to a diagnostic located in `file`.
    pub fn to_diagnostic(&self, file: &SourceInfo) -> Diagnostic {
        let mut diag = Diagnostic::error(self.code)
            .with_message(&self.message)
            .with_file_label(
                self.span,
                self.context.as_deref().unwrap_or("here"),
                file.clone(),
            );
        if let Some((span, message)) = &self.related {
            diag = diag.with_file_secondary_label(*span, message, file.clone());
        }
        for help in &self.help {
            diag = diag.with_suggestion(help);
        }
        diag
    }
}

/// Token description for messages: `` `;` ``, `identifier`, `end of file`.
fn describe(kind: TokenKind) -> String {
    match kind {
        TokenKind::Ident(_)
        | TokenKind::String(_)
        | TokenKind::Template
        | TokenKind::Number
        | TokenKind::Error
        | TokenKind::Eof => kind.display_name().to_string(),
        _ => format!("`{}`", kind.display_name()),
    }
}
