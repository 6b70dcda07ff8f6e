use super::*;
use inj_ir::StringInterner;
use pretty_assertions::assert_eq;

#[test]
fn interning_is_structural() {
    let mut pool = Pool::new();
    let a = pool.array(Idx::STRING);
    let b = pool.array(Idx::STRING);
    assert_eq!(a, b);
    assert_ne!(a, pool.array(Idx::NUMBER));
    assert!(!a.is_primitive());
}

#[test]
fn unions_flatten_and_dedupe() {
    let mut pool = Pool::new();
    let inner = pool.union([Idx::STRING, Idx::NUMBER]);
    let outer = pool.union([inner, Idx::STRING, Idx::NULL]);
    assert_eq!(
        pool.data(outer),
        &TypeData::Union(vec![Idx::STRING, Idx::NUMBER, Idx::NULL])
    );
    assert_eq!(pool.union([Idx::BOOLEAN]), Idx::BOOLEAN);
    assert_eq!(pool.union([]), Idx::NEVER);
    assert_eq!(pool.intersection([]), Idx::UNKNOWN);
}

#[test]
fn formats_in_source_syntax() {
    let interner = StringInterner::new();
    let mut pool = Pool::new();
    let logger = pool.named(inj_ir::DeclId::new(0), interner.intern("Logger"));
    let opt = pool.union([Idx::STRING, Idx::UNDEFINED]);
    let list = pool.array(opt);
    assert_eq!(pool.format_type(list, &interner), "(string | undefined)[]");

    let callback = pool.function(
        vec![FnParam {
            name: interner.intern("msg"),
            ty: Idx::STRING,
            optional: true,
        }],
        Idx::VOID,
    );
    assert_eq!(pool.format_type(callback, &interner), "(msg?: string) => void");

    let shape = pool.object(vec![
        Member {
            name: interner.intern("logger"),
            optional: false,
            visibility: inj_ir::Accessibility::Public,
            ty: logger,
            is_method: false,
        },
        Member {
            name: interner.intern("log"),
            optional: true,
            visibility: inj_ir::Accessibility::Public,
            ty: callback,
            is_method: true,
        },
    ]);
    assert_eq!(
        pool.format_type(shape, &interner),
        "{ logger: Logger; log?(msg?: string): void }"
    );
    let lit = pool.string_literal(interner.intern("info"));
    assert_eq!(pool.format_type(lit, &interner), "\"info\"");
}

#[test]
fn unresolved_types_are_indeterminate() {
    let interner = StringInterner::new();
    let mut pool = Pool::new();
    let promise = pool.unresolved(interner.intern("Promise"));
    assert!(pool.is_indeterminate(promise));
    assert!(pool.is_indeterminate(Idx::ERROR));
    assert!(!pool.is_indeterminate(Idx::STRING));
    assert_eq!(pool.format_type(promise, &interner), "Promise");
}
