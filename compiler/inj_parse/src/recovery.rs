//! Error recovery: skipping to the next declaration after a parse error.

use inj_ir::TokenKind;

use crate::Cursor;

/// Whether a token can begin a top-level declaration.
pub(crate) fn starts_item(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Import
            | TokenKind::Export
            | TokenKind::Const
            | TokenKind::Let
            | TokenKind::Var
            | TokenKind::Class
            | TokenKind::Interface
            | TokenKind::Function
            | TokenKind::Enum
            | TokenKind::At
    )
}

/// Skip tokens until the next likely declaration start.
///
/// Always makes progress from `start`. Stops before a declaration keyword or
/// after a `;`, skipping bracketed groups as units.
pub(crate) fn synchronize(cursor: &mut Cursor<'_>, start: usize) {
    if cursor.position() == start {
        cursor.advance();
    }
    loop {
        match cursor.current_kind() {
            TokenKind::Eof => return,
            kind if starts_item(kind) => return,
            TokenKind::Semicolon => {
                cursor.advance();
                return;
            }
            TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => {
                let before = cursor.position();
                if cursor.skip_balanced().is_err() && cursor.position() == before {
                    cursor.advance();
                }
            }
            _ => {
                cursor.advance();
            }
        }
    }
}
