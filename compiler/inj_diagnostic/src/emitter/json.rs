//! JSON Emitter
//!
//! Machine-readable diagnostic output in JSON format.

use std::io::Write;

use crate::Diagnostic;

use super::{escape_json, label_position, trailing_comma, DiagnosticEmitter};

/// JSON emitter for machine-readable output.
///
/// Emits one array; call [`JsonEmitter::begin`] before and
/// [`JsonEmitter::end`] after the diagnostics.
pub struct JsonEmitter<W: Write> {
    writer: W,
    first: bool,
}

impl<W: Write> JsonEmitter<W> {
    pub fn new(writer: W) -> Self {
        JsonEmitter {
            writer,
            first: true,
        }
    }

    /// Begin the JSON array output.
    pub fn begin(&mut self) {
        let _ = write!(self.writer, "[");
    }

    /// End the JSON array output.
    pub fn end(&mut self) {
        if self.first {
            let _ = writeln!(self.writer, "]");
        } else {
            let _ = writeln!(self.writer, "\n]");
        }
    }
}

impl<W: Write> DiagnosticEmitter for JsonEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        if !self.first {
            let _ = write!(self.writer, ",");
        }
        self.first = false;

        // Built by hand to keep serde out of the dependency graph.
        let _ = writeln!(self.writer);
        let _ = writeln!(self.writer, "  {{");
        let _ = writeln!(self.writer, "    \"code\": \"{}\",", diagnostic.code.as_str());
        let _ = writeln!(self.writer, "    \"severity\": \"{}\",", diagnostic.severity);
        let _ = writeln!(
            self.writer,
            "    \"message\": \"{}\",",
            escape_json(&diagnostic.message)
        );

        let _ = writeln!(self.writer, "    \"labels\": [");
        for (i, label) in diagnostic.labels.iter().enumerate() {
            let comma = trailing_comma(i, diagnostic.labels.len());
            let _ = writeln!(self.writer, "      {{");
            if let Some(pos) = label_position(label) {
                let _ = writeln!(self.writer, "        \"file\": \"{}\",", escape_json(pos.path));
                let _ = writeln!(self.writer, "        \"line\": {},", pos.line);
                let _ = writeln!(self.writer, "        \"column\": {},", pos.column);
            }
            let _ = writeln!(self.writer, "        \"start\": {},", label.span.start);
            let _ = writeln!(self.writer, "        \"length\": {},", label.span.len());
            let _ = writeln!(
                self.writer,
                "        \"message\": \"{}\",",
                escape_json(&label.message)
            );
            let _ = writeln!(self.writer, "        \"primary\": {}", label.is_primary);
            let _ = writeln!(self.writer, "      }}{comma}");
        }
        let _ = writeln!(self.writer, "    ],");

        let _ = writeln!(self.writer, "    \"notes\": [");
        for (i, note) in diagnostic.notes.iter().enumerate() {
            let comma = trailing_comma(i, diagnostic.notes.len());
            let _ = writeln!(self.writer, "      \"{}\"{comma}", escape_json(note));
        }
        let _ = writeln!(self.writer, "    ],");

        let _ = writeln!(self.writer, "    \"suggestions\": [");
        for (i, suggestion) in diagnostic.suggestions.iter().enumerate() {
            let comma = trailing_comma(i, diagnostic.suggestions.len());
            let _ = writeln!(self.writer, "      \"{}\"{comma}", escape_json(suggestion));
        }
        let _ = writeln!(self.writer, "    ]");

        let _ = write!(self.writer, "  }}");
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, _error_count: usize, _warning_count: usize) {
        // The array itself is the summary.
    }
}
