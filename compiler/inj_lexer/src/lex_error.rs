//! Lexer error types.

use inj_diagnostic::{Diagnostic, ErrorCode, SourceInfo};
use inj_ir::Span;

/// A lexer error located in source.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LexError {
    pub span: Span,
    pub kind: LexErrorKind,
}

/// What kind of lexer error occurred.
///
/// Also the logos error type; the default is produced for input no token
/// pattern matches.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum LexErrorKind {
    /// A character that cannot start any token.
    #[default]
    InvalidCharacter,
    /// Missing closing quote for a string literal.
    UnterminatedString,
    /// Missing closing backtick for a template literal.
    UnterminatedTemplate,
    /// `/*` without a matching `*/`.
    UnterminatedBlockComment,
}

impl LexErrorKind {
    pub fn code(self) -> ErrorCode {
        match self {
            LexErrorKind::UnterminatedString => ErrorCode::E0001,
            LexErrorKind::InvalidCharacter => ErrorCode::E0002,
            LexErrorKind::UnterminatedTemplate => ErrorCode::E0003,
            LexErrorKind::UnterminatedBlockComment => ErrorCode::E0004,
        }
    }
}

impl LexError {
    pub fn new(span: Span, kind: LexErrorKind) -> Self {
        LexError { span, kind }
    }

    /// Convert to a diagnostic located in `file`.
    pub fn to_diagnostic(&self, file: &SourceInfo) -> Diagnostic {
        let (message, label, hint) = match self.kind {
            LexErrorKind::InvalidCharacter => {
                let text = file
                    .content
                    .get(self.span.to_range())
                    .unwrap_or_default()
                    .escape_debug()
                    .to_string();
                (
                    format!("invalid character `{text}`"),
                    "not valid here",
                    None,
                )
            }
            LexErrorKind::UnterminatedString => (
                "unterminated string literal".to_string(),
                "string starts here",
                Some("close the string with a matching quote before the end of the line"),
            ),
            LexErrorKind::UnterminatedTemplate => (
                "unterminated template literal".to_string(),
                "template starts here",
                Some("close the template literal with a backtick"),
            ),
            LexErrorKind::UnterminatedBlockComment => (
                "unterminated block comment".to_string(),
                "comment starts here",
                Some("close the comment with `*/`"),
            ),
        };

        let diag = Diagnostic::error(self.kind.code())
            .with_message(message)
            .with_file_label(self.span, label, file.clone());
        match hint {
            Some(hint) => diag.with_suggestion(hint),
            None => diag,
        }
    }
}
