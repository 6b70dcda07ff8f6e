use super::*;
use crate::token::TokenKind;
use pretty_assertions::assert_eq;

fn classes(source: &str) -> (Program, Vec<AnalyzedClass>) {
    let program = Program::from_sources([
        (
            "deps.ts",
            "export class Logger {}\nexport interface Repo {}\nexport const REPO = Symbol('Repo');",
        ),
        ("main.ts", source),
    ]);
    let file = program.file_by_path("main.ts").unwrap();
    let classes = analyze_file(&program, file);
    (program, classes)
}

fn summary(program: &Program, class: &AnalyzedClass) -> Vec<(usize, String, String, String)> {
    class
        .dependencies
        .iter()
        .map(|d| {
            (
                d.index,
                program.text(d.param).to_owned(),
                d.token.display.clone(),
                program.format_type(d.expected),
            )
        })
        .collect()
}

#[test]
fn implicit_and_explicit_tokens() {
    let (program, classes) = classes(
        "import { Logger, Repo, REPO } from './deps';\n\
         export class UserService {\n\
           constructor(\n\
             private readonly logger: Logger,\n\
             @inject(REPO) private repo: Repo,\n\
             @Inject(Logger) other: Logger\n\
           ) {}\n\
         }",
    );
    assert_eq!(classes.len(), 1);
    assert_eq!(classes[0].name, "UserService");
    assert_eq!(
        summary(&program, &classes[0]),
        vec![
            (0, "logger".into(), "Logger".into(), "Logger".into()),
            (1, "repo".into(), "Repo".into(), "Repo".into()),
            (2, "other".into(), "Logger".into(), "Logger".into()),
        ]
    );
}

#[test]
fn parameters_without_a_token_are_dropped_but_keep_ordinals() {
    let (program, classes) = classes(
        "import { Logger } from './deps';\n\
         class A { constructor(name: string, when: Date, logger: Logger) {} }",
    );
    assert_eq!(
        summary(&program, &classes[0]),
        vec![(2, "logger".into(), "Logger".into(), "Logger".into())]
    );
}

#[test]
fn interface_and_alias_types_become_type_tokens() {
    let (program, classes) = classes(
        "import { Repo } from './deps';\n\
         type Clock = number;\n\
         class A { constructor(repo: Repo, clock: Clock) {} }",
    );
    assert_eq!(
        summary(&program, &classes[0]),
        vec![
            (0, "repo".into(), "Repo".into(), "Repo".into()),
            (1, "clock".into(), "Clock".into(), "number".into()),
        ]
    );
    let kinds: Vec<TokenKind> = classes[0].dependencies.iter().map(|d| d.token.kind).collect();
    assert_eq!(kinds, vec![TokenKind::Type, TokenKind::Type]);
}

#[test]
fn optional_parameters_are_not_required() {
    let (_, classes) = classes(
        "import { Logger } from './deps';\n\
         class A { constructor(logger?: Logger, other: Logger = new Logger()) {} }",
    );
    assert!(classes[0].dependencies.is_empty());
}

#[test]
fn classes_without_constructor_are_not_analyzed() {
    let (_, classes) = classes(
        "class NoCtor { x = 1; }\nclass EmptyCtor { constructor() {} }",
    );
    let names: Vec<&str> = classes.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["EmptyCtor"]);
    assert!(classes[0].dependencies.is_empty());
}

#[test]
fn unresolvable_inject_arguments_are_dropped() {
    let (_, classes) = classes(
        "import { Logger } from './deps';\n\
         class A { constructor(@inject('logger') a: Logger, @inject(MISSING) b: Logger) {} }",
    );
    assert!(classes[0].dependencies.is_empty());
}
