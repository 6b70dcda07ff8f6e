use super::*;
use crate::error::{Location, ValidationErrorKind};
use inj_diagnostic::Severity;
use inj_ir::Span;
use pretty_assertions::assert_eq;

#[test]
fn labels_point_into_their_own_files() {
    let program = Program::from_sources([("a.ts", "class A {}"), ("b.ts", "class B {}")]);
    let a = program.file_by_path("a.ts").unwrap();
    let b = program.file_by_path("b.ts").unwrap();
    let error = ValidationError::new(
        ValidationErrorKind::MissingDependency,
        "'A' requires token 'B'",
        Location::new(a, Span::new(0, 5)),
    )
    .with_related(Location::new(b, Span::new(6, 7)), "required here")
    .with_hint("register 'B'");

    let diags = convert_to_diagnostics(&[error], &program);
    assert_eq!(diags.len(), 1);
    let diag = &diags[0];
    assert_eq!(diag.code, RULE);
    assert_eq!(diag.severity, Severity::Error);
    assert_eq!(diag.message, "missing dependency: 'A' requires token 'B'");
    let labels: Vec<(Option<&str>, bool, &str)> = diag
        .labels
        .iter()
        .map(|l| (l.path(), l.is_primary, l.message.as_str()))
        .collect();
    assert_eq!(
        labels,
        vec![
            (
                Some("a.ts"),
                true,
                "registered here with an unsatisfied dependency"
            ),
            (Some("b.ts"), false, "required here"),
        ]
    );
    assert_eq!(diag.suggestions, vec!["register 'B'".to_owned()]);
}

#[test]
fn every_kind_uses_the_same_rule() {
    let program = Program::from_sources([("a.ts", "")]);
    let file = program.file_by_path("a.ts").unwrap();
    let kinds = [
        ValidationErrorKind::MissingDependency,
        ValidationErrorKind::TypeMismatch,
        ValidationErrorKind::DuplicateToken,
        ValidationErrorKind::DuplicateListener,
        ValidationErrorKind::ExtendsCycle,
    ];
    let errors: Vec<ValidationError> = kinds
        .iter()
        .map(|&kind| ValidationError::new(kind, "x", Location::new(file, Span::DUMMY)))
        .collect();
    let diags = convert_to_diagnostics(&errors, &program);
    assert!(diags.iter().all(|d| d.code == ErrorCode::E3001 && d.is_error()));
    assert!(diags.iter().all(|d| d.suggestions.is_empty()));
}
