use super::*;
use inj_diagnostic::ErrorCode;
use pretty_assertions::assert_eq;

fn program(files: &[(&str, &str)]) -> Program {
    Program::from_sources(files.iter().copied())
}

fn decl_named(program: &Program, file: &str, name: &str) -> DeclId {
    let file = program.file_by_path(file).unwrap();
    program
        .decls()
        .iter()
        .find(|d| d.file == file && program.text(d.name) == name)
        .map(|d| d.id)
        .unwrap()
}

#[test]
fn collects_declarations_in_file_order() {
    let p = program(&[
        (
            "a.ts",
            "export class A {}\ninterface I { x: number }\ntype T = string;\nconst c = 1, d = 2;",
        ),
        ("b.ts", "import { A } from './a';\nexport const B = Symbol('B');"),
    ]);
    let summary: Vec<(&str, DeclKind, bool)> = p
        .decls()
        .iter()
        .map(|d| (p.text(d.name), d.kind, d.exported))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("A", DeclKind::Class, true),
            ("I", DeclKind::Interface, false),
            ("T", DeclKind::TypeAlias, false),
            ("c", DeclKind::Binding, false),
            ("d", DeclKind::Binding, false),
            ("B", DeclKind::Binding, true),
        ]
    );
    assert!(p.diagnostics().is_empty());
}

#[test]
fn same_name_in_two_files_is_two_declarations() {
    let p = program(&[("a.ts", "export class Logger {}"), ("b.ts", "export class Logger {}")]);
    let a = decl_named(&p, "a.ts", "Logger");
    let b = decl_named(&p, "b.ts", "Logger");
    assert_ne!(a, b);
    assert_ne!(p.decl_type(a), p.decl_type(b));
}

#[test]
fn imports_resolve_to_the_exporting_declaration() {
    let p = program(&[
        ("src/services/logger.ts", "export class Logger {}"),
        ("src/services/index.ts", "export * from './logger';"),
        (
            "src/app.ts",
            "import { Logger } from './services';\nimport { Logger as L2 } from './services/logger.js';",
        ),
    ]);
    let logger = decl_named(&p, "src/services/logger.ts", "Logger");
    let app = p.file_by_path("src/app.ts").unwrap();
    assert_eq!(p.resolve_str(app, "Logger"), Some(logger));
    assert_eq!(p.resolve_str(app, "L2"), Some(logger));
    assert!(p.diagnostics().is_empty(), "{:?}", p.diagnostics());
}

#[test]
fn renamed_and_default_exports() {
    let p = program(&[
        ("tokens.ts", "const LOGGER = Symbol('logger');\nexport { LOGGER as LOGGER_TOKEN };"),
        ("config.ts", "export default class Config {}"),
        ("barrel.ts", "export { LOGGER_TOKEN as TOKEN } from './tokens';"),
        (
            "main.ts",
            "import Config from './config';\nimport { TOKEN } from './barrel';",
        ),
    ]);
    let main = p.file_by_path("main.ts").unwrap();
    assert_eq!(
        p.resolve_str(main, "TOKEN"),
        Some(decl_named(&p, "tokens.ts", "LOGGER"))
    );
    assert_eq!(
        p.resolve_str(main, "Config"),
        Some(decl_named(&p, "config.ts", "Config"))
    );
}

#[test]
fn local_declarations_shadow_imports() {
    let p = program(&[
        ("a.ts", "export class Service {}"),
        ("b.ts", "import { Service } from './a';\nclass Service {}"),
    ]);
    let b = p.file_by_path("b.ts").unwrap();
    assert_eq!(p.resolve_str(b, "Service"), Some(decl_named(&p, "b.ts", "Service")));
}

#[test]
fn unresolved_relative_imports_warn() {
    let p = program(&[(
        "main.ts",
        "import { Missing } from './nowhere';\nimport { Injectable } from '@nestjs/common';",
    )]);
    let codes: Vec<ErrorCode> = p.diagnostics().iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![ErrorCode::W2001]);
    assert!(p.diagnostics()[0].message.contains("./nowhere"));
    assert!(!p.diagnostics()[0].is_error());
    let main = p.file_by_path("main.ts").unwrap();
    assert_eq!(p.resolve_str(main, "Missing"), None);
    assert_eq!(p.resolve_str(main, "Injectable"), None);
}

#[test]
fn missing_export_warns_at_the_specifier() {
    let p = program(&[
        ("a.ts", "export class A {}"),
        ("b.ts", "import { A, B } from './a';\nimport D from './a';"),
    ]);
    let messages: Vec<&str> = p.diagnostics().iter().map(|d| d.message.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            "module `./a` has no exported member `B`",
            "module `./a` has no default export",
        ]
    );
}

#[test]
fn circular_star_exports_terminate() {
    let p = program(&[
        ("a.ts", "export * from './b';"),
        ("b.ts", "export * from './a';"),
        ("c.ts", "import { X } from './a';"),
    ]);
    assert_eq!(p.diagnostics().len(), 1);
}

#[test]
fn parse_errors_are_collected_per_file() {
    let p = program(&[("ok.ts", "class A {}"), ("bad.ts", "class B {")]);
    assert!(!p.diagnostics().is_empty());
    for diag in p.diagnostics() {
        assert_eq!(diag.labels[0].path(), Some("bad.ts"));
    }
    // The well-formed file is still modelled.
    assert!(p.resolve_str(p.file_by_path("ok.ts").unwrap(), "A").is_some());
}

#[test]
fn lowers_annotations_in_file_scope() {
    let p = program(&[
        ("logger.ts", "export interface Logger { log(msg: string): void }"),
        ("app.ts", "import { Logger } from './logger';\nlet l: Logger[];"),
    ]);
    let binding = decl_named(&p, "app.ts", "l");
    assert_eq!(p.format_type(p.decl_type(binding)), "Logger[]");
}

#[test]
fn deeply_nested_types_are_lowered_compared_and_formatted() {
    const DEPTH: usize = 50_000;
    let nest = |inner: &str| format!("{}{inner}{}", "[".repeat(DEPTH), "]".repeat(DEPTH));
    let source = format!("type S = {};\ntype N = {};", nest("string"), nest("number"));
    let p = program(&[("a.ts", source.as_str())]);
    assert!(p.diagnostics().is_empty());

    let s = p.decl_type(decl_named(&p, "a.ts", "S"));
    let n = p.decl_type(decl_named(&p, "a.ts", "N"));
    assert!(p.is_assignable(s, s));
    assert!(!p.is_assignable(s, n));

    let formatted = p.format_type(s);
    assert_eq!(formatted.len(), "string".len() + 2 * DEPTH);
    assert!(formatted.starts_with("[[[") && formatted.ends_with("]]]"));
}
