use super::*;
use pretty_assertions::assert_eq;

#[test]
fn typescript_sources_are_recognized() {
    assert!(is_source("app.ts"));
    assert!(is_source("APP.TS"));
    assert!(!is_source("types.d.ts"));
    assert!(!is_source("app.js"));
    assert!(!is_source("ts"));
}

#[test]
fn missing_path_is_not_found() {
    let err = collect_sources(&["definitely/not/here.ts".to_owned()]).unwrap_err();
    assert!(matches!(err, CliError::NotFound { .. }));
    assert_eq!(err.to_string(), "cannot find 'definitely/not/here.ts'");
}

#[test]
fn explain_known_code() {
    let doc = explain_error("E3001").unwrap();
    assert!(doc.contains("E3001"));
}

#[test]
fn explain_unknown_code() {
    let err = explain_error("X9").unwrap_err();
    assert_eq!(err.to_string(), "unknown error code 'X9'");
}

#[test]
fn check_args_split_options_from_paths() {
    let args: Vec<String> = ["src", "--format=json", "--color=never", "-v", "lib"]
        .iter()
        .map(|s| (*s).to_owned())
        .collect();
    let (options, paths) = parse_check_args(&args).unwrap();
    assert_eq!(options.format, OutputFormat::Json);
    assert_eq!(options.color, inj_diagnostic::emitter::ColorMode::Never);
    assert!(options.verbose);
    assert_eq!(paths, vec!["src".to_owned(), "lib".to_owned()]);
}

#[test]
fn check_args_default_to_current_directory() {
    let (options, paths) = parse_check_args(&[]).unwrap();
    assert_eq!(options, CheckOptions::default());
    assert_eq!(paths, vec![".".to_owned()]);
}

#[test]
fn check_args_reject_bad_values() {
    let err = parse_check_args(&["--format=xml".to_owned()]).unwrap_err();
    assert_eq!(err.to_string(), "invalid value 'xml' for --format");
    let err = parse_check_args(&["--colour".to_owned()]).unwrap_err();
    assert_eq!(err.to_string(), "unknown option '--colour'");
}
