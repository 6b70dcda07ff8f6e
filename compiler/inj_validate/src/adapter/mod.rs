//! Conversion of validation errors into host diagnostics.

use inj_diagnostic::{Diagnostic, ErrorCode};
use inj_types::Program;

use crate::ValidationError;

/// The rule every validator diagnostic is filed under.
pub const RULE: ErrorCode = ErrorCode::E3001;

/// One diagnostic per error, in order: the primary label at the error's
/// location, a secondary label per related location, the hint as a
/// suggestion.
pub fn convert_to_diagnostics(errors: &[ValidationError], program: &Program) -> Vec<Diagnostic> {
    errors
        .iter()
        .map(|error| to_diagnostic(error, program))
        .collect()
}

fn to_diagnostic(error: &ValidationError, program: &Program) -> Diagnostic {
    let primary = program.file(error.location.file);
    let mut diag = Diagnostic::error(RULE)
        .with_message(error.to_string())
        .with_file_label(error.location.span, error.kind.label(), primary.info.clone());
    for related in &error.related {
        let file = program.file(related.location.file);
        diag = diag.with_file_secondary_label(
            related.location.span,
            &related.message,
            file.info.clone(),
        );
    }
    if let Some(hint) = &error.hint {
        diag = diag.with_suggestion(hint);
    }
    diag
}

#[cfg(test)]
mod tests;
