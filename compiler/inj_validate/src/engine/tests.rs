use super::*;
use crate::token::Token;
use crate::ValidationErrorKind as Kind;
use pretty_assertions::assert_eq;

fn check(sources: &[(&str, &str)]) -> (Program, Vec<ValidationError>) {
    let program = Program::from_sources(sources.iter().copied());
    let errors = crate::validate(&program, &ValidatorConfig::default());
    (program, errors)
}

fn kinds(errors: &[ValidationError]) -> Vec<Kind> {
    errors.iter().map(|e| e.kind).collect()
}

/// `(path, source text)` of a location.
fn at(program: &Program, location: Location) -> (String, String) {
    let file = program.file(location.file);
    let text = &file.info.content[location.span.to_range()];
    (file.path().to_owned(), text.to_owned())
}

const LOGGING: &str = "\
export class Logger { log(message: string): void {} }
export class ConsoleLogger { log(message: string): void {} }
export class UserService { constructor(private logger: Logger) {} }
";

#[test]
fn missing_dependency_is_reported_at_the_registration() {
    let (program, errors) = check(&[
        ("services.ts", LOGGING),
        (
            "app.ts",
            "import { UserService } from './services';\n\
             export const app = defineBuilderConfig({ builderId: 'app', injections: [{ token: UserService }] });",
        ),
    ]);
    assert_eq!(kinds(&errors), vec![Kind::MissingDependency]);
    let error = &errors[0];
    assert_eq!(
        error.message,
        "'UserService' requires token 'Logger' (parameter #0 'logger'), but builder 'app' does not provide it"
    );
    assert_eq!(
        at(&program, error.location),
        ("app.ts".to_owned(), "{ token: UserService }".to_owned())
    );
    assert_eq!(error.related.len(), 1);
    assert_eq!(
        at(&program, error.related[0].location),
        ("services.ts".to_owned(), "private logger: Logger".to_owned())
    );
}

#[test]
fn inherited_binding_satisfies_dependency() {
    let (_, errors) = check(&[
        ("services.ts", LOGGING),
        (
            "logging.ts",
            "import { Logger, ConsoleLogger } from './services';\n\
             export const logging = definePartialConfig({ injections: [{ token: Logger, provider: ConsoleLogger }] });",
        ),
        (
            "app.ts",
            "import { UserService } from './services';\n\
             import { logging } from './logging';\n\
             export const app = defineBuilderConfig({ builderId: 'app', extends: [logging], injections: [{ token: UserService }] });",
        ),
    ]);
    assert_eq!(errors, vec![]);
}

const REPOSITORY: &str = "\
export class ConsoleLogger { log(message: string): void {} }
export interface User { id: string }
export interface UserRepository { findById(id: string): User }
export class SqlUserRepository { findById(id: string): User { return { id }; } }
export const REPO = Symbol('UserRepository');
export class UserService { constructor(@inject(REPO) private repo: UserRepository) {} }
";

#[test]
fn type_mismatch_is_reported_at_the_provider_registration() {
    let (program, errors) = check(&[
        ("services.ts", REPOSITORY),
        (
            "data.ts",
            "import { ConsoleLogger, REPO } from './services';\n\
             export const data = definePartialConfig({ injections: [{ token: REPO, provider: ConsoleLogger }] });",
        ),
        (
            "app.ts",
            "import { UserService } from './services';\n\
             import { data } from './data';\n\
             export const app = defineBuilderConfig({ builderId: 'app', extends: [data], injections: [{ token: UserService }] });",
        ),
    ]);
    assert_eq!(kinds(&errors), vec![Kind::TypeMismatch]);
    let error = &errors[0];
    assert_eq!(
        error.message,
        "provider for token 'UserRepository' produces 'ConsoleLogger', which is not assignable to \
         'UserRepository' expected by 'UserService' (parameter #0 'repo')"
    );
    assert_eq!(
        at(&program, error.location),
        ("data.ts".to_owned(), "{ token: REPO, provider: ConsoleLogger }".to_owned())
    );
    assert_eq!(at(&program, error.related[0].location).0, "services.ts");
}

#[test]
fn compatible_provider_class_passes() {
    let (_, errors) = check(&[
        ("services.ts", REPOSITORY),
        (
            "app.ts",
            "import { SqlUserRepository, UserService, REPO } from './services';\n\
             export const app = defineBuilderConfig({ builderId: 'app', injections: [\n\
               { token: UserService },\n\
               { token: REPO, provider: SqlUserRepository },\n\
             ] });",
        ),
    ]);
    assert_eq!(errors, vec![]);
}

#[test]
fn factories_and_values_are_not_type_checked() {
    for binding in [
        "{ token: REPO, factory: () => new ConsoleLogger() }",
        "{ token: REPO, value: 42 }",
    ] {
        let app = format!(
            "import {{ ConsoleLogger, UserService, REPO }} from './services';\n\
             export const app = defineBuilderConfig({{ builderId: 'app', injections: [{{ token: UserService }}, {binding}] }});"
        );
        let (_, errors) = check(&[("services.ts", REPOSITORY), ("app.ts", app.as_str())]);
        assert_eq!(errors, vec![], "{binding}");
    }
}

#[test]
fn dependencies_satisfied_across_two_partials() {
    let (_, errors) = check(&[(
        "app.ts",
        "class Logger {}\nclass Clock {}\n\
         class Service { constructor(logger: Logger, clock: Clock) {} }\n\
         const logging = definePartialConfig({ injections: [{ token: Logger }] });\n\
         const time = definePartialConfig({ injections: [{ token: Clock }] });\n\
         export const app = defineBuilderConfig({ builderId: 'app', extends: [logging, time], injections: [{ token: Service }] });",
    )]);
    assert_eq!(errors, vec![]);
}

#[test]
fn duplicate_listener_points_back_to_the_first_entry() {
    let (program, errors) = check(&[(
        "app.ts",
        "class UserCreated {}\nclass Audit {}\n\
         export const app = defineBuilderConfig({ builderId: 'app', listeners: [\n\
           { event: UserCreated, listener: Audit },\n\
           { event: UserCreated, listener: Audit },\n\
         ] });",
    )]);
    assert_eq!(kinds(&errors), vec![Kind::DuplicateListener]);
    assert_eq!(
        errors[0].message,
        "listener 'Audit' is already registered for event 'UserCreated'"
    );
    let first = at(&program, errors[0].related[0].location);
    let second = at(&program, errors[0].location);
    assert_eq!(first.1, second.1);
    assert!(errors[0].related[0].location.span.start < errors[0].location.span.start);
}

#[test]
fn diamond_ancestry_is_resolved_once() {
    let source = "\
class Logger {}
class Service { constructor(logger: Logger) {} }
const base = definePartialConfig({ injections: [{ token: Logger }], listeners: [{ event: Logger, listener: Service }] });
const left = definePartialConfig({ extends: [base] });
const right = definePartialConfig({ extends: [base] });
export const app = defineBuilderConfig({ builderId: 'app', extends: [left, right], injections: [{ token: Service }] });
";
    let (program, errors) = check(&[("app.ts", source)]);
    assert_eq!(errors, vec![]);

    let validator = Validator::new(&program, ValidatorConfig::default());
    let app = validator.configs().last().unwrap();
    let mut visited = FxHashSet::default();
    let provided = validator.resolve_all_provided_tokens(app, &mut visited);
    assert_eq!(provided.len(), 2);
    assert_eq!(visited.len(), 4);

    let ancestry = validator.ancestry(app);
    let order: Vec<&str> = ancestry.ancestors_first.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(order, vec!["base", "left", "right", "app"]);
    assert!(!ancestry.incomplete);
}

#[test]
fn own_bindings_overlay_inherited_ones() {
    let source = "\
class Logger {}
class FileLogger {}
const base = definePartialConfig({ injections: [{ token: Logger }] });
export const app = defineBuilderConfig({ builderId: 'app', extends: [base], injections: [{ token: Logger, provider: FileLogger }] });
";
    let program = Program::from_sources([("app.ts", source)]);
    let validator = Validator::new(&program, ValidatorConfig::default());
    let app = &validator.configs()[1];
    let provided = validator.resolve_all_provided_tokens(app, &mut FxHashSet::default());
    let file = program.file_by_path("app.ts").unwrap();
    let logger = program.resolve_str(file, "Logger").unwrap();
    let winner = provided[&Token::class(&program, logger).key];
    assert_eq!(winner.provider_class, program.resolve_str(file, "FileLogger"));

    // Binding a token again below a partial is still reported.
    let errors = validator.run();
    assert_eq!(kinds(&errors), vec![Kind::DuplicateToken]);
    assert_eq!(
        at(&program, errors[0].location).1,
        "{ token: Logger, provider: FileLogger }"
    );
    assert_eq!(at(&program, errors[0].related[0].location).1, "{ token: Logger }");
}

#[test]
fn extends_cycle_is_reported_once_and_terminates() {
    let source = "\
class Logger {}
class Service { constructor(logger: Logger) {} }
const a = definePartialConfig({ extends: [b], injections: [{ token: Logger }] });
const b = definePartialConfig({ extends: [a] });
export const app = defineBuilderConfig({ builderId: 'app', extends: [a], injections: [{ token: Service }] });
";
    let (program, errors) = check(&[("app.ts", source)]);
    assert_eq!(kinds(&errors), vec![Kind::ExtendsCycle]);
    assert_eq!(errors[0].message, "partial config 'a' extends itself: a -> b -> a");
    assert_eq!(at(&program, errors[0].location).1, "a");
}

#[test]
fn same_description_different_symbols_do_not_match() {
    let (_, errors) = check(&[
        ("a.ts", "export const LOGGER = Symbol('Logger');"),
        ("b.ts", "export const LOGGER = Symbol('Logger');"),
        (
            "service.ts",
            "import { LOGGER } from './a';\n\
             export class Service { constructor(@inject(LOGGER) logger: unknown) {} }",
        ),
        (
            "app.ts",
            "import { LOGGER } from './b';\n\
             import { Service } from './service';\n\
             class Impl {}\n\
             export const app = defineBuilderConfig({ builderId: 'app', injections: [{ token: Service }, { token: LOGGER, provider: Impl }] });",
        ),
    ]);
    assert_eq!(kinds(&errors), vec![Kind::MissingDependency]);
}

#[test]
fn incomplete_ancestry_suppresses_missing_dependencies_only() {
    let source = "\
import { external } from '@company/di-presets';
class Logger {}
class Service { constructor(logger: Logger, other: Other) {} }
class Other { run(): string { return ''; } }
class Wrong {}
const dynamic = definePartialConfig({ injections: [...presets] });
export const a = defineBuilderConfig({ builderId: 'a', extends: [external], injections: [{ token: Service }] });
export const b = defineBuilderConfig({ builderId: 'b', extends: [dynamic], injections: [{ token: Service }, { token: Other, provider: Wrong }] });
";
    let program = Program::from_sources([("app.ts", source)]);
    let validator = Validator::new(&program, ValidatorConfig::verbose());
    assert_eq!(validator.skipped().len(), 1);
    let errors = validator.run();
    assert_eq!(kinds(&errors), vec![Kind::TypeMismatch]);
}

#[test]
fn shared_partial_errors_are_reported_once() {
    let source = "\
class Logger { log(m: string): void {} }
class Broken {}
class Service { constructor(logger: Logger) {} }
const shared = definePartialConfig({ injections: [{ token: Logger, provider: Broken }, { token: Service }] });
export const one = defineBuilderConfig({ builderId: 'one', extends: [shared] });
export const two = defineBuilderConfig({ builderId: 'two', extends: [shared] });
";
    let (_, errors) = check(&[("app.ts", source)]);
    assert_eq!(kinds(&errors), vec![Kind::TypeMismatch]);
}

#[test]
fn missing_dependency_reported_per_builder_at_the_shared_registration() {
    let source = "\
class Logger {}
class Service { constructor(logger: Logger) {} }
const shared = definePartialConfig({ injections: [{ token: Service }] });
export const one = defineBuilderConfig({ builderId: 'one', extends: [shared] });
export const two = defineBuilderConfig({ builderId: 'two', extends: [shared], injections: [{ token: Logger }] });
export const three = defineBuilderConfig({ builderId: 'three', extends: [shared] });
";
    let (program, errors) = check(&[("app.ts", source)]);
    assert_eq!(kinds(&errors), vec![Kind::MissingDependency, Kind::MissingDependency]);
    assert!(errors[0].message.contains("builder 'one'"));
    assert!(errors[1].message.contains("builder 'three'"));
    assert_eq!(errors[0].location, errors[1].location);
    assert_eq!(at(&program, errors[0].location).1, "{ token: Service }");
}

#[test]
fn duplicate_tokens_across_sibling_partials() {
    let source = "\
class Logger {}
const left = definePartialConfig({ injections: [{ token: Logger }] });
const right = definePartialConfig({ injections: [{ token: Logger }] });
export const app = defineBuilderConfig({ builderId: 'app', extends: [left, right] });
export const other = defineBuilderConfig({ builderId: 'other', extends: [left, right] });
";
    let (_, errors) = check(&[("app.ts", source)]);
    assert_eq!(kinds(&errors), vec![Kind::DuplicateToken]);
    assert_eq!(errors[0].message, "token 'Logger' is already registered");
}

#[test]
fn dependencies_are_checked_in_constructor_order() {
    let source = "\
class A {}
class B {}
class C {}
class Service { constructor(c: C, a: A, b: B) {} }
export const app = defineBuilderConfig({ builderId: 'app', injections: [{ token: Service }, { token: A }] });
";
    let (_, errors) = check(&[("app.ts", source)]);
    let tokens: Vec<bool> = errors
        .iter()
        .map(|e| e.message.contains("parameter #0"))
        .collect();
    assert_eq!(tokens, vec![true, false]);
    assert!(errors[1].message.contains("parameter #2 'b'"));
}

#[test]
fn partials_alone_are_not_dependency_checked() {
    let (_, errors) = check(&[("app.ts", "class Logger {}\nclass Service { constructor(l: Logger) {} }\nexport const p = definePartialConfig({ injections: [{ token: Service }] });")]);
    assert_eq!(errors, vec![]);
}

#[test]
fn deeply_nested_sources_still_validate() {
    const DEPTH: usize = 50_000;
    let (open, close) = ("[".repeat(DEPTH), "]".repeat(DEPTH));
    let services = format!(
        "{LOGGING}export const GRID = {open}1{close};\nexport type Grid = {open}string{close};\n"
    );
    let (_, errors) = check(&[
        ("services.ts", services.as_str()),
        (
            "app.ts",
            "import { UserService } from './services';\n\
             export const app = defineBuilderConfig({ builderId: 'app', injections: [{ token: UserService }] });",
        ),
    ]);
    assert_eq!(kinds(&errors), vec![Kind::MissingDependency]);
}

#[test]
fn interface_typed_parameter_without_inject_is_missing() {
    let (program, errors) = check(&[(
        "app.ts",
        "interface Logger { log(message: string): void; }\n\
         type Clock = { now(): number };\n\
         class Service { constructor(private logger: Logger, clock: Clock, date: Date) {} }\n\
         export const app = defineBuilderConfig({ builderId: 'app', injections: [{ token: Service }] });",
    )]);
    assert_eq!(
        kinds(&errors),
        vec![Kind::MissingDependency, Kind::MissingDependency]
    );
    assert_eq!(
        errors[0].message,
        "'Service' requires token 'Logger' (parameter #0 'logger'), but builder 'app' does not provide it"
    );
    assert_eq!(
        errors[1].message,
        "'Service' requires token 'Clock' (parameter #1 'clock'), but builder 'app' does not provide it"
    );
    let hint = errors[0].hint.as_deref().unwrap();
    assert!(hint.contains("add `@inject(TOKEN)` to 'logger'"), "{hint}");
    assert_eq!(
        at(&program, errors[0].related[0].location).1,
        "private logger: Logger"
    );
}
