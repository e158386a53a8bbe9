mod common;

use common::*;
use py2jl_core::ast::{
    BoolOperator, CompareOperator, Comprehension, Constant, Expr, ExprKind, Keyword,
    UnaryOperator,
};
use py2jl_core::ScopeNode;

/// Lowers `value` as the right-hand side of `r = value` at module level.
fn lower_value(value: Expr, scopes: &ScopeNode) -> String {
    let out = lower(vec![assign(store("r"), value)], scopes);
    out.strip_prefix("r = ")
        .and_then(|s| s.strip_suffix("\njpy_none;\n"))
        .expect("unexpected shape")
        .to_string()
}

fn value(value: Expr) -> String {
    lower_value(value, &ScopeNode::module("a"))
}

fn compare(left: Expr, ops: Vec<CompareOperator>, comparators: Vec<Expr>) -> Expr {
    Expr::new(ExprKind::Compare {
        left: Box::new(left),
        ops,
        comparators,
    })
}

#[test]
fn dict_display_pairs_entries_in_source_order() {
    // d = {1: 2, 3: 4}
    let dict = Expr::new(ExprKind::Dict {
        keys: vec![Some(int(1)), Some(int(3))],
        values: vec![int(2), int(4)],
    });
    assert_eq!(
        value(dict),
        "jpy_dict(jpy_literal(1) => jpy_literal(2), jpy_literal(3) => jpy_literal(4))"
    );
}

#[test]
fn dict_spread_entries_splat() {
    // {**m, "k": v}
    let dict = Expr::new(ExprKind::Dict {
        keys: vec![None, Some(constant(Constant::Str("k".into())))],
        values: vec![name("m"), name("v")],
    });
    assert_eq!(value(dict), "jpy_dict(m..., jpy_literal(\"k\") => v)");
}

#[test]
fn chained_comparison_shares_operands() {
    // a < b <= c
    let expr = compare(
        name("a"),
        vec![CompareOperator::Lt, CompareOperator::Le],
        vec![name("b"), name("c")],
    );
    assert_eq!(value(expr), "@jpy_all(jpy_lt(a, b), jpy_le(b, c))");
}

#[test]
fn chained_comparison_evaluates_calls_once() {
    // a < f(x) <= c
    let expr = compare(
        name("a"),
        vec![CompareOperator::Lt, CompareOperator::Le],
        vec![call(name("f"), vec![name("x")]), name("c")],
    );
    let out = value(expr);
    assert_eq!(
        out,
        "@jpy_all(jpy_lt(a, (var\".cmp_1\" = jpy_call(f, (x,), (;));)), jpy_le(var\".cmp_1\", c))"
    );
    assert_eq!(out.matches("jpy_call(f").count(), 1);
}

#[test]
fn membership_and_identity_comparisons() {
    let expr = compare(
        name("a"),
        vec![CompareOperator::NotIn, CompareOperator::IsNot],
        vec![name("xs"), constant(Constant::None)],
    );
    assert_eq!(value(expr), "@jpy_all(jpy_notin(a, xs), jpy_isnot(xs, jpy_none))");
}

#[test]
fn call_passes_positional_tuple_and_keyword_named_tuple() {
    // f(a, *b, k=1, **m)
    let starred = Expr::new(ExprKind::Starred {
        value: Box::new(name("b")),
        ctx: Default::default(),
    });
    let expr = Expr::new(ExprKind::Call {
        func: Box::new(name("f")),
        args: vec![name("a"), starred],
        keywords: vec![
            Keyword {
                arg: Some("k".into()),
                value: int(1),
            },
            Keyword {
                arg: None,
                value: name("m"),
            },
        ],
    });
    assert_eq!(value(expr), "jpy_call(f, (a, b...,), (; k = jpy_literal(1), m...))");
}

#[test]
fn constants_are_tagged_literals() {
    assert_eq!(value(constant(Constant::None)), "jpy_none");
    assert_eq!(value(constant(Constant::Bool(true))), "jpy_literal(true)");
    assert_eq!(value(constant(Constant::Float(2.5))), "jpy_literal(2.5)");
    assert_eq!(value(constant(Constant::Float(1.0))), "jpy_literal(1.0)");
    assert_eq!(value(constant(Constant::Float(f64::INFINITY))), "jpy_literal(Inf)");
    assert_eq!(
        value(constant(Constant::Str("a$b\"\n".into()))),
        "jpy_literal(\"a\\$b\\\"\\n\")"
    );
    assert_eq!(
        value(constant(Constant::Bytes { bytes: vec![104, 105] })),
        "jpy_literal(UInt8[104, 105])"
    );
    assert_eq!(
        value(constant(Constant::Tuple(vec![
            Constant::Int("1".into()),
            Constant::Str("x".into()),
        ]))),
        "jpy_literal((jpy_literal(1), jpy_literal(\"x\"),))"
    );
}

#[test]
fn integers_beyond_64_bits_become_big_literals() {
    let lowered = |digits: &str| value(constant(Constant::Int(digits.into())));
    assert_eq!(lowered("9223372036854775807"), "jpy_literal(9223372036854775807)");
    assert_eq!(lowered("9223372036854775808"), "jpy_literal(big\"9223372036854775808\")");
    assert_eq!(
        lowered("100000000000000000000000000000"),
        "jpy_literal(big\"100000000000000000000000000000\")"
    );
}

#[test]
fn operators_map_to_intrinsics() {
    let not = Expr::new(ExprKind::UnaryOp {
        op: UnaryOperator::Not,
        operand: Box::new(name("a")),
    });
    assert_eq!(value(not), "jpy_not(a)");

    let or = Expr::new(ExprKind::BoolOp {
        op: BoolOperator::Or,
        values: vec![name("a"), name("b"), name("c")],
    });
    assert_eq!(value(or), "@jpy_any(a, b, c)");

    let set = Expr::new(ExprKind::Set {
        elts: vec![int(1)],
    });
    assert_eq!(value(set), "jpy_set(jpy_literal(1))");
}

#[test]
fn access_and_slicing() {
    // xs[1:].attr
    let slice = Expr::new(ExprKind::Slice {
        lower: Some(Box::new(int(1))),
        upper: None,
        step: None,
    });
    let sub = Expr::new(ExprKind::Subscript {
        value: Box::new(name("xs")),
        slice: Box::new(slice),
        ctx: Default::default(),
    });
    let attr = Expr::new(ExprKind::Attribute {
        value: Box::new(sub),
        attr: "attr".into(),
        ctx: Default::default(),
    });
    assert_eq!(value(attr), "xs[jpy_slice(jpy_literal(1), jpy_none, jpy_none)].attr");
}

#[test]
fn named_expression_assigns_inline() {
    // (y := f())
    let named = Expr::new(ExprKind::NamedExpr {
        target: Box::new(store("y")),
        value: Box::new(call(name("f"), vec![])),
    });
    assert_eq!(value(named), "(y = jpy_call(f, (), (;));)");
}

#[test]
fn conditional_expression_is_a_block() {
    // r = a if t else b
    let ifexp = Expr::new(ExprKind::IfExp {
        test: Box::new(name("t")),
        body: Box::new(name("a")),
        orelse: Box::new(name("b")),
    });
    assert_eq!(value(ifexp), "if jpy_bool(t)\n    a\nelse\n    b\nend");
}

#[test]
fn list_comprehension_is_an_immediately_invoked_function() {
    // ys = [x * 2 for x in xs if x > 0]
    let cond = compare(name("x"), vec![CompareOperator::Gt], vec![int(0)]);
    let comp = Expr::new(ExprKind::ListComp {
        elt: Box::new(binop(name("x"), py2jl_core::ast::BinaryOperator::Mul, int(2))),
        generators: vec![Comprehension::new(store("x"), name("xs"), vec![cond])],
    });
    let scopes = ScopeNode::module("a").with_child(ScopeNode::comprehension().with_locals(&["x"]));

    assert_eq!(
        lower_value(comp, &scopes),
        "(function (var\".iterable_1\")\n\
         \x20   local x\n\
         \x20   var\".acc_2\" = jpy_list()\n\
         \x20   var\".iter_3\" = jpy_getiter(var\".iterable_1\")\n\
         \x20   @noscope while jpy_movenext(var\".iter_3\")\n\
         \x20       x = jpy_getcurrent(var\".iter_3\")\n\
         \x20       if jpy_bool(@jpy_all(@jpy_all(jpy_gt(x, jpy_literal(0)))))\n\
         \x20           jpy_addlist(var\".acc_2\", jpy_mul(x, jpy_literal(2)));\n\
         \x20       end\n\
         \x20   end\n\
         \x20   return var\".acc_2\"\n\
         end)(xs)"
    );
}

#[test]
fn nested_comprehension_clauses_nest_loops() {
    // [y for row in rows for y in row]
    let comp = Expr::new(ExprKind::ListComp {
        elt: Box::new(name("y")),
        generators: vec![
            Comprehension::new(store("row"), name("rows"), Vec::new()),
            Comprehension::new(store("y"), name("row"), Vec::new()),
        ],
    });
    let scopes = ScopeNode::module("a").with_child(ScopeNode::comprehension());
    let out = lower_value(comp, &scopes);
    assert!(out.contains(
        "        row = jpy_getcurrent(var\".iter_4\")\n\
         \x20       var\".iter_3\" = jpy_getiter(row)\n\
         \x20       @noscope while jpy_movenext(var\".iter_3\")\n\
         \x20           y = jpy_getcurrent(var\".iter_3\")\n\
         \x20           jpy_addlist(var\".acc_2\", y);\n"
    ));
    assert!(!out.contains("if "));
    assert!(out.ends_with("end)(rows)"));
}
