//! Recursive descent parser for the analyzed TypeScript subset.
//!
//! Produces one [`Module`] per file. Only declaration structure and data
//! literals are parsed in detail; function, method and constructor bodies are
//! skipped by delimiter matching and top-level statements other than
//! declarations are skipped. Parse errors are collected, and the parser
//! synchronizes to the next declaration, so a file with errors still yields
//! every item that parsed.

mod cursor;
mod error;
mod grammar;
mod recovery;

pub use cursor::Cursor;
pub use error::ParseError;

use inj_ir::{Module, StringInterner, TokenList};

use grammar::KnownNames;

/// Parse result: the module and any errors.
#[derive(Clone, Debug, Default)]
pub struct ParseOutput {
    pub module: Module,
    pub errors: Vec<ParseError>,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    interner: &'a StringInterner,
    names: KnownNames,
    /// Errors recovered from below item level (e.g. inside a class body).
    errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a TokenList, interner: &'a StringInterner) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            interner,
            names: KnownNames::new(interner),
            errors: Vec::new(),
        }
    }

    /// Parse a whole module.
    pub fn parse_module(mut self) -> ParseOutput {
        let mut module = Module::default();

        while !self.cursor.is_at_end() {
            let start = self.cursor.position();
            if let Err(err) = self.parse_item(&mut module.items) {
                tracing::trace!(message = %err.message, "item parse error; synchronizing");
                self.errors.push(err);
                recovery::synchronize(&mut self.cursor, start);
            }
        }

        self.errors.sort_by_key(|e| e.span.start);
        ParseOutput {
            module,
            errors: self.errors,
        }
    }
}

/// Parse tokens into a module.
pub fn parse(tokens: &TokenList, interner: &StringInterner) -> ParseOutput {
    Parser::new(tokens, interner).parse_module()
}
