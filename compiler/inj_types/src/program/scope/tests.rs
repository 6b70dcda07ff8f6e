use super::*;
use pretty_assertions::assert_eq;

fn paths(entries: &[&str]) -> FxHashMap<String, FileId> {
    entries
        .iter()
        .enumerate()
        .map(|(i, p)| ((*p).to_owned(), FileId::new(u32::try_from(i).unwrap())))
        .collect()
}

#[test]
fn normalizes_separators_and_dots() {
    assert_eq!(normalize_path("src\\app\\.\\main.ts"), "src/app/main.ts");
    assert_eq!(normalize_path("src/app/../lib/x.ts"), "src/lib/x.ts");
    assert_eq!(normalize_path("../shared/x.ts"), "../shared/x.ts");
    assert_eq!(normalize_path("/root/./a/../b.ts"), "/root/b.ts");
}

#[test]
fn tries_extension_and_index_candidates() {
    let files = paths(&["src/a.ts", "src/lib/index.ts", "src/b.ts"]);
    let resolve = |spec| resolve_module_path("src/main.ts", spec, &files);
    assert_eq!(resolve("./a"), ModuleTarget::File(FileId::new(0)));
    assert_eq!(resolve("./a.ts"), ModuleTarget::File(FileId::new(0)));
    assert_eq!(resolve("./b.js"), ModuleTarget::File(FileId::new(2)));
    assert_eq!(resolve("./lib"), ModuleTarget::File(FileId::new(1)));
    assert_eq!(resolve("./c"), ModuleTarget::Missing);
    assert_eq!(resolve("rxjs"), ModuleTarget::Package);
    assert_eq!(resolve("@scope/pkg"), ModuleTarget::Package);
}

#[test]
fn parent_directory_specifiers() {
    let files = paths(&["shared/tokens.ts"]);
    assert_eq!(
        resolve_module_path("app/main.ts", "../shared/tokens", &files),
        ModuleTarget::File(FileId::new(0))
    );
    assert_eq!(
        resolve_module_path("main.ts", "./shared/tokens", &files),
        ModuleTarget::File(FileId::new(0))
    );
}
