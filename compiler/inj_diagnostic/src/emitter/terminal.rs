//! Terminal Emitter
//!
//! Human-readable diagnostic output with optional ANSI color support.

use std::io::Write;

use crate::{Diagnostic, Label, Severity};

use super::{label_position, DiagnosticEmitter};

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const WARNING: &str = "\x1b[1;33m"; // Bold yellow
    pub const HELP: &str = "\x1b[1;32m"; // Bold green
    pub const BOLD: &str = "\x1b[1m";
    pub const SECONDARY: &str = "\x1b[1;34m"; // Bold blue
    pub const RESET: &str = "\x1b[0m";
}

#[inline]
fn plural_s(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Color output mode for terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Automatically detect based on terminal capabilities.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Resolve to a boolean; `is_tty` only matters for `Auto`.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Terminal emitter with optional color support.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
}

impl<W: Write> TerminalEmitter<W> {
    /// Create a new terminal emitter with explicit color mode.
    ///
    /// `is_tty` is whether the writer is a terminal, used for `ColorMode::Auto`.
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
        }
    }

    fn write_colored(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.writer, "{color}{text}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }

    fn write_severity(&mut self, severity: Severity) {
        let color = match severity {
            Severity::Error => colors::ERROR,
            Severity::Warning => colors::WARNING,
        };
        self.write_colored(&severity.to_string(), color);
    }

    fn write_code(&mut self, code: &str) {
        self.write_colored(&format!("[{code}]"), colors::BOLD);
    }

    fn write_label(&mut self, label: &Label) {
        let marker = if label.is_primary { "-->" } else { ":::" };
        let _ = write!(self.writer, "  {marker} ");

        let position = label_position(label);
        match &position {
            Some(pos) => {
                let location = format!("{}:{}:{}", pos.path, pos.line, pos.column);
                self.write_colored(&location, colors::BOLD);
            }
            None => {
                let _ = write!(self.writer, "{:?}", label.span);
            }
        }
        let _ = write!(self.writer, ": ");

        let color = if label.is_primary {
            colors::ERROR
        } else {
            colors::SECONDARY
        };
        self.write_colored(&label.message, color);
        let _ = writeln!(self.writer);

        // Source snippet with an underline for primary labels.
        if let Some(pos) = position {
            if let Some(text) = pos.line_text.filter(|_| label.is_primary) {
                let gutter = pos.line.to_string();
                let pad = " ".repeat(gutter.len());
                let indent = " ".repeat(pos.column as usize - 1);
                let remaining = text.chars().count().saturating_sub(pos.column as usize - 1);
                let width = (label.span.len() as usize).clamp(1, remaining.max(1));
                let _ = writeln!(self.writer, "   {pad} |");
                let _ = writeln!(self.writer, "   {gutter} | {text}");
                let _ = write!(self.writer, "   {pad} | {indent}");
                self.write_colored(&"^".repeat(width), color);
                let _ = writeln!(self.writer);
            }
        }
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        // Header: severity[CODE]: message
        self.write_severity(diagnostic.severity);
        self.write_code(diagnostic.code.as_str());
        let _ = writeln!(self.writer, ": {}", diagnostic.message);

        for label in &diagnostic.labels {
            self.write_label(label);
        }

        for note in &diagnostic.notes {
            let _ = write!(self.writer, "  = ");
            self.write_colored("note", colors::BOLD);
            let _ = writeln!(self.writer, ": {note}");
        }

        for suggestion in &diagnostic.suggestions {
            let _ = write!(self.writer, "  = ");
            self.write_colored("help", colors::HELP);
            let _ = writeln!(self.writer, ": {suggestion}");
        }

        let _ = writeln!(self.writer);
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, error_count: usize, warning_count: usize) {
        if error_count > 0 {
            self.write_colored("error", colors::ERROR);
            let error_part = if error_count == 1 {
                "1 configuration error".to_string()
            } else {
                format!("{error_count} configuration errors")
            };
            if warning_count > 0 {
                let _ = writeln!(
                    self.writer,
                    ": found {error_part}; {warning_count} warning{} emitted",
                    plural_s(warning_count)
                );
            } else {
                let _ = writeln!(self.writer, ": found {error_part}");
            }
        } else if warning_count > 0 {
            self.write_colored("warning", colors::WARNING);
            let _ = writeln!(
                self.writer,
                ": {warning_count} warning{} emitted",
                plural_s(warning_count)
            );
        }
    }
}
