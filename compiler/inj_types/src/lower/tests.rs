use crate::{Idx, Program, TypeData};
use inj_ir::Accessibility;
use pretty_assertions::assert_eq;

fn binding_type(source: &str, name: &str) -> (Program, Idx) {
    let program = Program::from_sources([("main.ts", source)]);
    let file = program.file_by_path("main.ts").unwrap();
    let decl = program.resolve_str(file, name).unwrap();
    let ty = program.decl_type(decl);
    (program, ty)
}

fn formatted(source: &str, name: &str) -> String {
    let (program, ty) = binding_type(source, name);
    program.format_type(ty)
}

#[test]
fn lowers_primitives_and_compounds() {
    assert_eq!(formatted("let a: string;", "a"), "string");
    assert_eq!(formatted("let a: string | undefined;", "a"), "string | undefined");
    assert_eq!(formatted("let a: Array<number>;", "a"), "number[]");
    assert_eq!(formatted("let a: [string, boolean];", "a"), "[string, boolean]");
    assert_eq!(formatted("let a: 'info' | 'warn';", "a"), "\"info\" | \"warn\"");
    assert_eq!(
        formatted("let a: (msg: string, level?: number) => void;", "a"),
        "(msg: string, level?: number) => void"
    );
    assert_eq!(
        formatted("let a: { url: string; retries?: number };", "a"),
        "{ url: string; retries?: number }"
    );
}

#[test]
fn aliases_expand_and_cycles_become_error() {
    assert_eq!(formatted("type Url = string;\nlet a: Url[];", "a"), "string[]");
    let (_, ty) = binding_type("type A = B;\ntype B = A;\nlet a: A;", "a");
    assert_eq!(ty, Idx::ERROR);
}

#[test]
fn library_names_stay_unresolved() {
    let (program, ty) = binding_type("let a: Promise<string>;", "a");
    program.with_pool(|pool| assert!(matches!(pool.data(ty), TypeData::Unresolved(_))));
    assert_eq!(program.format_type(ty), "Promise");
}

#[test]
fn unmodelled_forms_are_indeterminate() {
    let (_, ty) = binding_type("let a: keyof Foo;", "a");
    assert_eq!(ty, Idx::ERROR);
    let (_, ty) = binding_type("let a: 42;", "a");
    assert_eq!(ty, Idx::ERROR);
}

#[test]
fn infers_initializers() {
    let source = "class Db {}\nconst TOKEN = Symbol('db');\nconst db = new Db();\nconst n = 3;";
    let (program, ty) = binding_type(source, "TOKEN");
    assert_eq!(ty, Idx::SYMBOL);
    let file = program.file_by_path("main.ts").unwrap();
    let db = program.decl_type(program.resolve_str(file, "db").unwrap());
    let class = program.decl_type(program.resolve_str(file, "Db").unwrap());
    assert_eq!(db, class);
    assert_eq!(formatted(source, "n"), "number");
    assert_eq!(formatted("const t = Symbol('x');\nlet a: typeof t;", "a"), "symbol");
}

#[test]
fn class_shapes_include_parameter_properties_and_bases() {
    let program = Program::from_sources([(
        "main.ts",
        "class Base { id: string; protected secret: number; static count: number; }\n\
         class Repo extends Base {\n\
           constructor(private readonly db: Db, url: string) { super(); }\n\
           find(id: string): string { return id; }\n\
         }\n\
         class Db {}",
    )]);
    let file = program.file_by_path("main.ts").unwrap();
    let repo = program.resolve_str(file, "Repo").unwrap();
    let shape = program.shape(repo).unwrap();
    let names: Vec<(&str, Accessibility, bool)> = shape
        .members
        .iter()
        .map(|m| (program.text(m.name), m.visibility, m.is_method))
        .collect();
    assert_eq!(
        names,
        vec![
            ("db", Accessibility::Private, false),
            ("find", Accessibility::Public, true),
            ("id", Accessibility::Public, false),
            ("secret", Accessibility::Protected, false),
        ]
    );
    assert!(shape.nominal);
}

#[test]
fn interface_shapes_merge_extended_members() {
    let program = Program::from_sources([(
        "main.ts",
        "interface Named { name: string }\ninterface Service extends Named { start(): void; name: 'svc' }",
    )]);
    let file = program.file_by_path("main.ts").unwrap();
    let service = program.resolve_str(file, "Service").unwrap();
    let shape = program.shape(service).unwrap();
    assert_eq!(shape.members.len(), 2);
    let name = shape.member(program.interner().intern("name")).unwrap();
    assert_eq!(program.format_type(name.ty), "\"svc\"");
    assert!(!shape.nominal);
}

#[test]
fn circular_extends_terminates() {
    let program = Program::from_sources([("main.ts", "class A extends B { a = 1; }\nclass B extends A { b = 2; }")]);
    let file = program.file_by_path("main.ts").unwrap();
    let a = program.resolve_str(file, "A").unwrap();
    assert!(program.shape(a).is_some());
}
