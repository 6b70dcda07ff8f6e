use crate::{Idx, Program};

fn setup(source: &str) -> Program {
    Program::from_sources([("main.ts", source)])
}

fn ty(program: &Program, name: &str) -> Idx {
    let file = program.file_by_path("main.ts").unwrap();
    program.decl_type(program.resolve_str(file, name).unwrap())
}

fn assignable(program: &Program, source: &str, target: &str) -> bool {
    program.is_assignable(ty(program, source), ty(program, target))
}

#[test]
fn primitives() {
    let p = setup("let s: string; let n: number; let lit: 'a'; let v: void; let u: undefined; let a: any; let k: unknown; let o: object; let arr: string[];");
    assert!(assignable(&p, "s", "s"));
    assert!(!assignable(&p, "s", "n"));
    assert!(assignable(&p, "lit", "s"));
    assert!(!assignable(&p, "s", "lit"));
    assert!(assignable(&p, "u", "v"));
    assert!(assignable(&p, "a", "n"));
    assert!(assignable(&p, "n", "k"));
    assert!(!assignable(&p, "k", "n"));
    assert!(assignable(&p, "arr", "o"));
    assert!(!assignable(&p, "s", "o"));
}

#[test]
fn unions() {
    let p = setup("let s: string; let sn: string | number; let sb: string | boolean; let lits: 'a' | 'b';");
    assert!(assignable(&p, "s", "sn"));
    assert!(!assignable(&p, "sn", "s"));
    assert!(!assignable(&p, "sb", "sn"));
    assert!(assignable(&p, "lits", "sn"));
}

#[test]
fn structural_classes_and_interfaces() {
    let p = setup(
        "interface Logger { log(msg: string): void; level?: number }\n\
         class ConsoleLogger { log(msg: string) {} flush() {} }\n\
         class Broken { log(msg: number, extra: boolean) {} }\n\
         class Empty {}\n\
         let logger: Logger; let console: ConsoleLogger; let broken: Broken; let empty: Empty;",
    );
    assert!(assignable(&p, "console", "logger"));
    assert!(!assignable(&p, "broken", "logger"));
    assert!(!assignable(&p, "empty", "logger"));
    assert!(assignable(&p, "console", "empty"));
}

#[test]
fn private_members_make_classes_nominal() {
    let p = setup(
        "class Cache { private store: string; get(k: string): string { return k; } }\n\
         class Lookalike { private store: string; get(k: string): string { return k; } }\n\
         class LruCache extends Cache {}\n\
         let cache: Cache; let look: Lookalike; let lru: LruCache;",
    );
    assert!(!assignable(&p, "look", "cache"));
    assert!(assignable(&p, "lru", "cache"));
    assert!(!assignable(&p, "cache", "lru"));
}

#[test]
fn unresolved_types_are_compatible() {
    let p = setup("let http: HttpClient; let s: string;");
    assert!(assignable(&p, "http", "s"));
    assert!(assignable(&p, "s", "http"));
}

#[test]
fn recursive_structures_terminate() {
    let p = setup(
        "interface Node { next: Node; value: string }\n\
         class ListNode { next: ListNode; value: string }\n\
         let a: Node; let b: ListNode;",
    );
    assert!(assignable(&p, "b", "a"));
    assert!(assignable(&p, "a", "b"));
}

#[test]
fn functions_and_arrays() {
    let p = setup(
        "let f0: () => string; let f1: (a: string) => string; let f2: (a: string, b: number) => void;\n\
         let strs: string[]; let nums: number[]; let pair: [string, string];",
    );
    assert!(assignable(&p, "f0", "f1"));
    assert!(!assignable(&p, "f2", "f1"));
    assert!(assignable(&p, "f1", "f2"));
    assert!(!assignable(&p, "strs", "nums"));
    assert!(assignable(&p, "pair", "strs"));
    assert!(!assignable(&p, "strs", "pair"));
}
