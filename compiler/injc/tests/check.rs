//! End-to-end runs of `inj check` over the fixture trees.

use injc::commands::{
    check_paths, check_sources, emit_report, CheckOptions, CliError, OutputFormat,
};
use inj_diagnostic::emitter::ColorMode;
use pretty_assertions::assert_eq;

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"))
}

fn plain() -> CheckOptions {
    CheckOptions {
        color: ColorMode::Never,
        ..CheckOptions::default()
    }
}

fn render(options: &CheckOptions, paths: &[String]) -> (bool, String) {
    let report = check_paths(paths, options).unwrap();
    let mut out = Vec::new();
    emit_report(&report, options, &mut out, false);
    (report.has_errors(), String::from_utf8(out).unwrap())
}

#[test]
fn valid_tree_is_clean() {
    let report = check_paths(&[fixture("valid")], &plain()).unwrap();
    assert_eq!(report.files, 3);
    assert_eq!(report.diagnostics.len(), 0);
    assert!(!report.has_errors());
}

#[test]
fn missing_dependency_is_reported() {
    let (failed, out) = render(&plain(), &[fixture("missing")]);
    assert!(failed);
    assert!(out.contains("E3001"), "{out}");
    assert!(
        out.contains(
            "'UserService' requires token 'Logger' (parameter #0 'logger'), \
             but builder 'app' does not provide it"
        ),
        "{out}"
    );
    assert!(out.contains("app.ts"), "{out}");
    assert!(out.contains("found 1 configuration error"), "{out}");
}

#[test]
fn json_output_is_an_array() {
    let options = CheckOptions {
        format: OutputFormat::Json,
        ..plain()
    };
    let (_, out) = render(&options, &[fixture("missing")]);
    assert!(out.starts_with('['), "{out}");
    assert!(out.trim_end().ends_with(']'), "{out}");
    assert!(out.contains("\"code\": \"E3001\""), "{out}");
    assert!(out.contains("\"severity\": \"error\""), "{out}");

    let (_, out) = render(&options, &[fixture("valid")]);
    assert_eq!(out, "[]\n");
}

#[test]
fn single_files_can_be_checked() {
    let paths = [
        format!("{}/app.ts", fixture("missing")),
        format!("{}/services.ts", fixture("missing")),
    ];
    let report = check_paths(&paths, &plain()).unwrap();
    assert_eq!(report.files, 2);
    assert_eq!(report.error_count(), 1);
}

#[test]
fn files_named_more_than_once_are_checked_once() {
    let services = format!("{}/services.ts", fixture("missing"));
    let paths = [
        services.clone(),
        fixture("missing"),
        format!("{}/app.ts", fixture("missing")),
        services,
    ];
    let report = check_paths(&paths, &plain()).unwrap();
    assert_eq!(report.files, 2);
    assert_eq!(report.error_count(), 1);
}

#[test]
fn unresolved_import_is_a_warning() {
    let report = check_sources(
        vec![(
            "app.ts".to_owned(),
            "import { Missing } from './nowhere';\nexport const x = 1;".to_owned(),
        )],
        &plain(),
    );
    assert_eq!(report.error_count(), 0);
    assert_eq!(report.warning_count(), 1);
    assert_eq!(report.diagnostics[0].code.as_str(), "W2001");
}

#[test]
fn syntax_errors_and_config_errors_are_both_reported() {
    let report = check_sources(
        vec![
            (
                "services.ts".to_owned(),
                "export class Logger {}\nexport class UserService { constructor(private logger: Logger) {} }"
                    .to_owned(),
            ),
            (
                "app.ts".to_owned(),
                "import { UserService } from './services';\n\
                 export const app = defineBuilderConfig({ builderId: 'app', injections: [{ token: UserService }] });"
                    .to_owned(),
            ),
            ("broken.ts".to_owned(), "export const = ;".to_owned()),
        ],
        &plain(),
    );
    let codes: Vec<&str> = report.diagnostics.iter().map(|d| d.code.as_str()).collect();
    assert!(codes.contains(&"E3001"), "{codes:?}");
    assert!(codes.iter().any(|c| c.starts_with("E1")), "{codes:?}");
    assert_eq!(codes.last(), Some(&"E3001"));
}

#[test]
fn missing_path_is_a_cli_error() {
    let err = check_paths(&[fixture("nope")], &plain()).unwrap_err();
    assert!(matches!(err, CliError::NotFound { .. }));
}
