//! Error codes for all validator diagnostics.
//!
//! Each error code is a unique identifier (e.g., `E3001`) with the first digit
//! indicating the phase that produced it. Used for `inj explain` lookups.

use std::fmt;

/// Error codes for all validator diagnostics.
///
/// Format: E#### where first digit indicates phase:
/// - E0xxx: Lexer errors
/// - E1xxx: Parser errors
/// - W2xxx: Program (module resolution) warnings
/// - E3xxx: Dependency-injection configuration errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexer Errors (E0xxx)
    /// Unterminated string literal
    E0001,
    /// Invalid character in source
    E0002,
    /// Unterminated template literal
    E0003,
    /// Unterminated block comment
    E0004,

    // Parser Errors (E1xxx)
    /// Unexpected token
    E1001,
    /// Expected expression
    E1002,
    /// Unclosed delimiter
    E1003,
    /// Expected identifier
    E1004,
    /// Expected type
    E1005,

    // Program Warnings (W2xxx)
    /// Relative import does not resolve to a file or export of the program
    W2001,

    // Configuration Errors (E3xxx)
    /// Invalid dependency-injection configuration
    E3001,
}

impl ErrorCode {
    /// Every code, in numeric order.
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::E0001,
        ErrorCode::E0002,
        ErrorCode::E0003,
        ErrorCode::E0004,
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E1004,
        ErrorCode::E1005,
        ErrorCode::W2001,
        ErrorCode::E3001,
    ];

    /// Get the string representation of this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::W2001 => "W2001",
            ErrorCode::E3001 => "E3001",
        }
    }

    /// Short title used in listings.
    pub fn title(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "unterminated string literal",
            ErrorCode::E0002 => "invalid character",
            ErrorCode::E0003 => "unterminated template literal",
            ErrorCode::E0004 => "unterminated block comment",
            ErrorCode::E1001 => "unexpected token",
            ErrorCode::E1002 => "expected expression",
            ErrorCode::E1003 => "unclosed delimiter",
            ErrorCode::E1004 => "expected identifier",
            ErrorCode::E1005 => "expected type",
            ErrorCode::W2001 => "unresolved import",
            ErrorCode::E3001 => "invalid dependency-injection configuration",
        }
    }

    pub fn is_lexer_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::E0001 | ErrorCode::E0002 | ErrorCode::E0003 | ErrorCode::E0004
        )
    }

    pub fn is_parser_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::E1001
                | ErrorCode::E1002
                | ErrorCode::E1003
                | ErrorCode::E1004
                | ErrorCode::E1005
        )
    }

    /// Errors reported by the configuration validator.
    pub fn is_validation_error(&self) -> bool {
        matches!(self, ErrorCode::E3001)
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, ErrorCode::W2001)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"E3001"` or `"w2001"`.
///
/// Case-insensitive. Derived from [`ErrorCode::ALL`] and [`ErrorCode::as_str()`].
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}
