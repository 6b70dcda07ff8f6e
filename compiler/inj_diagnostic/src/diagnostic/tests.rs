use super::*;
use pretty_assertions::assert_eq;

#[test]
fn builder_collects_parts() {
    let diag = Diagnostic::error(ErrorCode::E1001)
        .with_message("unexpected token")
        .with_label(Span::new(0, 5), "here")
        .with_note("some context")
        .with_suggestion("try this");

    assert_eq!(diag.code, ErrorCode::E1001);
    assert_eq!(diag.message, "unexpected token");
    assert!(diag.is_error());
    assert_eq!(diag.labels.len(), 1);
    assert!(diag.labels[0].is_primary);
    assert_eq!(diag.notes.len(), 1);
    assert_eq!(diag.suggestions.len(), 1);
}

#[test]
fn file_labels_carry_their_path() {
    let diag = Diagnostic::error(ErrorCode::E3001)
        .with_file_label(
            Span::new(4, 9),
            "registered here",
            SourceInfo::new("src/app.ts", "const app = 1;"),
        )
        .with_file_secondary_label(
            Span::new(0, 3),
            "parameter declared here",
            SourceInfo::new("src/user.ts", "class UserService {}"),
        );

    assert_eq!(diag.labels[0].path(), Some("src/app.ts"));
    assert_eq!(diag.labels[1].path(), Some("src/user.ts"));
    assert!(!diag.labels[1].is_primary);
}

#[test]
fn warning_is_not_error() {
    let diag = Diagnostic::warning(ErrorCode::W2001).with_message("unresolved import");
    assert!(!diag.is_error());
    assert_eq!(diag.severity, Severity::Warning);
}

#[test]
fn display_format() {
    let diag = Diagnostic::error(ErrorCode::E3001)
        .with_message("missing dependency")
        .with_file_label(
            Span::new(0, 5),
            "primary",
            SourceInfo::new("app.ts", "hello"),
        )
        .with_file_secondary_label(
            Span::new(10, 15),
            "secondary",
            SourceInfo::new("user.ts", "class UserService {}"),
        )
        .with_note("a note")
        .with_suggestion("a suggestion");

    let output = diag.to_string();
    assert!(output.contains("error [E3001]: missing dependency"));
    assert!(output.contains("--> app.ts 0..5: primary"));
    assert!(output.contains("::: user.ts 10..15: secondary"));
    assert!(output.contains("= note: a note"));
    assert!(output.contains("= help: a suggestion"));
}
