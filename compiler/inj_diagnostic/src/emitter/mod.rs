//! Diagnostic Emitters
//!
//! Provides different output formats for diagnostics:
//! - Terminal: Colored, human-readable output
//! - JSON: Machine-readable output for editors and CI
//!
//! Each emitter implements the `DiagnosticEmitter` trait.

mod json;
mod terminal;

pub use json::JsonEmitter;
pub use terminal::{ColorMode, TerminalEmitter};

use std::fmt::Write;

use crate::span_utils::LineOffsetTable;
use crate::{Diagnostic, Label};

/// Returns a trailing comma for JSON list serialization.
pub(crate) fn trailing_comma(index: usize, total: usize) -> &'static str {
    if index + 1 < total {
        ","
    } else {
        ""
    }
}

/// Trait for emitting diagnostics in various formats.
pub trait DiagnosticEmitter {
    /// Emit a single diagnostic.
    fn emit(&mut self, diagnostic: &Diagnostic);

    /// Emit multiple diagnostics.
    fn emit_all(&mut self, diagnostics: &[Diagnostic]) {
        for diag in diagnostics {
            self.emit(diag);
        }
    }

    /// Flush any buffered output.
    fn flush(&mut self);

    /// Emit a summary of errors/warnings.
    fn emit_summary(&mut self, error_count: usize, warning_count: usize);
}

/// Resolved position of a label, when its file is known.
pub(crate) struct LabelPosition<'a> {
    pub path: &'a str,
    pub line: u32,
    pub column: u32,
    /// Source line containing the span start.
    pub line_text: Option<&'a str>,
}

pub(crate) fn label_position(label: &Label) -> Option<LabelPosition<'_>> {
    let src = label.source_info.as_ref()?;
    let table = LineOffsetTable::build(&src.content);
    let (line, column) = table.offset_to_line_col(&src.content, label.span.start);
    Some(LabelPosition {
        path: &src.path,
        line,
        column,
        line_text: table.line_text(&src.content, line),
    })
}

/// Escape a string for JSON output.
pub(crate) fn escape_json(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(result, "\\u{:04x}", c as u32);
            }
            c => result.push(c),
        }
    }
    result
}
