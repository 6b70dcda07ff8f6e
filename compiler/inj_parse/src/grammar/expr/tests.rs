use inj_ir::{Expr, ExprKind, ItemKind, PropKey, StringInterner};
use pretty_assertions::assert_eq;

use crate::parse;

/// Parse `const x = <source>;` and return the initializer.
fn parse_expr_str(source: &str) -> (Expr, StringInterner) {
    let interner = StringInterner::new();
    let tokens = inj_lexer::lex(&format!("const x = {source};"), &interner);
    let output = parse(&tokens, &interner);
    assert!(!output.has_errors(), "{source}: {:?}", output.errors);
    let Some(ItemKind::Binding(binding)) = output.module.items.into_iter().next().map(|i| i.kind)
    else {
        panic!("{source}: expected a binding");
    };
    (binding.init.expect("initializer"), interner)
}

fn kind_of(source: &str) -> ExprKind {
    parse_expr_str(source).0.into_kind()
}

#[test]
fn builder_config_literal() {
    let (expr, interner) = parse_expr_str(
        "defineBuilderConfig({
            builderId: 'app.main',
            extends: [baseConfig],
            injections: [
                { token: LOGGER, provider: ConsoleLogger },
                { token: UserService },
                { token: CLOCK, factory: () => new SystemClock() },
                { token: PORT, value: 8080 },
            ],
            listeners: [{ event: UserCreated, listener: AuditListener }],
        })",
    );
    let ExprKind::Call { callee, args, .. } = expr.into_kind() else {
        panic!("expected call");
    };
    assert_eq!(
        callee.as_ident().map(|n| interner.resolve(n)),
        Some("defineBuilderConfig")
    );
    let ExprKind::Object(props) = &args[0].kind else {
        panic!("expected object argument");
    };
    let keys: Vec<_> = props
        .iter()
        .filter_map(|p| p.name().map(|n| interner.resolve(n)))
        .collect();
    assert_eq!(keys, vec!["builderId", "extends", "injections", "listeners"]);

    let ExprKind::Array(injections) = &props[2].value.kind else {
        panic!("expected injections array");
    };
    assert_eq!(injections.len(), 4);
    let ExprKind::Object(factory_entry) = &injections[2].kind else {
        panic!("expected object entry");
    };
    assert!(matches!(factory_entry[1].value.kind, ExprKind::Function));
}

#[test]
fn spread_and_computed_properties() {
    let ExprKind::Object(props) = kind_of("{ ...base, [KEY]: 1, short, method() { return 1; } }")
    else {
        panic!("expected object");
    };
    let keys: Vec<_> = props.iter().map(|p| p.key).collect();
    assert!(matches!(keys[0], PropKey::Spread));
    assert!(matches!(keys[1], PropKey::Computed));
    assert!(matches!(keys[2], PropKey::Named(_)));
    assert!(matches!(props[2].value.kind, ExprKind::Ident(_)));
    assert!(matches!(props[3].value.kind, ExprKind::Function));
}

#[test]
fn arrays_with_spread_and_holes() {
    let ExprKind::Array(items) = kind_of("[a, , ...rest, b,]") else {
        panic!("expected array");
    };
    assert_eq!(items.len(), 3);
    assert!(matches!(items[1].kind, ExprKind::Spread(_)));
}

#[test]
fn arrow_functions_are_opaque() {
    assert!(matches!(kind_of("() => 1"), ExprKind::Function));
    assert!(matches!(kind_of("x => x + 1"), ExprKind::Function));
    assert!(matches!(kind_of("async (a: number): Promise<void> => { await a; }"), ExprKind::Function));
    assert!(matches!(kind_of("<T>(value: T): T => value"), ExprKind::Function));
    assert!(matches!(kind_of("function named() { return 1; }"), ExprKind::Function));
    assert!(matches!(kind_of("class { run() {} }"), ExprKind::Function));
}

#[test]
fn parenthesized_ternary_branch_is_not_an_arrow() {
    assert!(matches!(
        kind_of("ready ? (a) : b"),
        ExprKind::Conditional { .. }
    ));
}

#[test]
fn symbol_for_member_call() {
    let (expr, interner) = parse_expr_str("Symbol.for('app.logger')");
    let ExprKind::Call { callee, args, .. } = expr.into_kind() else {
        panic!("expected call");
    };
    let ExprKind::Member { object, property } = callee.into_kind() else {
        panic!("expected member callee");
    };
    assert_eq!(object.as_ident().map(|n| interner.resolve(n)), Some("Symbol"));
    assert_eq!(interner.resolve(property), "for");
    assert!(matches!(args[0].kind, ExprKind::String(_)));
}

#[test]
fn generic_call_keeps_type_arguments() {
    let ExprKind::Call { type_args, .. } = kind_of("createToken<Logger>('logger')") else {
        panic!("expected call");
    };
    assert_eq!(type_args.len(), 1);
}

#[test]
fn comparison_is_not_a_generic_call() {
    assert!(matches!(kind_of("a < b"), ExprKind::Binary { .. }));
}

#[test]
fn assertions_are_transparent() {
    assert!(matches!(kind_of("{ a: 1 } as const"), ExprKind::Object(_)));
    assert!(matches!(
        kind_of("value satisfies Partial<Config>"),
        ExprKind::Ident(_)
    ));
    assert!(matches!(kind_of("maybe!"), ExprKind::Ident(_)));
}

#[test]
fn new_expression() {
    let ExprKind::New { callee, args } = kind_of("new ns.Service<string>(1, 2)") else {
        panic!("expected new");
    };
    assert!(matches!(callee.kind, ExprKind::Member { .. }));
    assert_eq!(args.len(), 2);
}

#[test]
fn operators() {
    assert!(matches!(kind_of("a + b * c"), ExprKind::Binary { .. }));
    assert!(matches!(kind_of("!flag"), ExprKind::Unary(_)));
    assert!(matches!(kind_of("typeof x === 'string'"), ExprKind::Binary { .. }));
    assert!(matches!(kind_of("a ?? b"), ExprKind::Binary { .. }));
    assert!(matches!(kind_of("x instanceof Y"), ExprKind::Binary { .. }));
    assert!(matches!(kind_of("obj?.a?.[0]?.(1)"), ExprKind::Call { .. }));
}
