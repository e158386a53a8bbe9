//! file: core/src/ir/lower/lower_expr.rs
//! description: expression and assignment-target lowering.
//!
//! Sub-expressions are lowered in the same order the symbol-table pass
//! visits them, so nested lambdas and comprehensions bind to the right
//! child of the scope tree.

use crate::analyzers::ScopeKind;
use crate::ast::node::{STACK_RED_ZONE, STACK_SEGMENT};
use crate::ast::{Comprehension, Constant, Expr, ExprKind, Keyword};
use crate::ir::expr::JlExpr;
use crate::ir::ident::escape_string;
use crate::ir::intrinsic::Intrinsic;
use crate::ir::stmt::JlStmt;
use crate::ir::target::JlTarget;

use super::err::LoweringError;
use super::function_builder;
use super::lower_stmt::lower_for_loop;
use super::lowering_context::LoweringContext;

pub fn lower_expr(expr: &Expr, ctx: &mut LoweringContext) -> Result<JlExpr, LoweringError> {
    stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT, || lower_expr_kind(expr, ctx))
}

fn lower_expr_kind(expr: &Expr, ctx: &mut LoweringContext) -> Result<JlExpr, LoweringError> {
    const ISSUER: &str = "py2jl.lower.expr.lower_expr";

    match expr.get_kind() {
        ExprKind::BoolOp { op, values } => {
            let values = lower_exprs(values, ctx)?;
            Ok(Intrinsic::boolean(*op).call(values))
        }
        ExprKind::NamedExpr { target, value } => {
            let value = lower_expr(value, ctx)?;
            let target = lower_target(target, ctx)?;
            Ok(value.assign_to(vec![target]))
        }
        ExprKind::BinOp { left, op, right } => {
            let left = lower_expr(left, ctx)?;
            let right = lower_expr(right, ctx)?;
            Ok(Intrinsic::binary(*op).call(vec![left, right]))
        }
        ExprKind::UnaryOp { op, operand } => {
            let operand = lower_expr(operand, ctx)?;
            Ok(Intrinsic::unary(*op).call(vec![operand]))
        }
        ExprKind::Lambda { args, body } => function_builder::lower_lambda(expr, args, body, ctx),
        ExprKind::IfExp { test, body, orelse } => {
            let test = Intrinsic::Bool.call(vec![lower_expr(test, ctx)?]);
            let body = lower_expr(body, ctx)?;
            let orelse = lower_expr(orelse, ctx)?;
            Ok(JlExpr::if_else(test, body, orelse))
        }
        ExprKind::Dict { keys, values } => {
            // Keys are visited before values.
            let keys = keys
                .iter()
                .map(|k| k.as_ref().map(|k| lower_expr(k, ctx)).transpose())
                .collect::<Result<Vec<_>, _>>()?;
            let values = lower_exprs(values, ctx)?;
            let entries = keys
                .into_iter()
                .zip(values)
                .map(|(key, value)| match key {
                    Some(key) => value.paired_with(key),
                    None => value.splat(),
                })
                .collect();
            Ok(Intrinsic::Dict.call(entries))
        }
        ExprKind::Set { elts } => Ok(Intrinsic::Set.call(lower_exprs(elts, ctx)?)),
        ExprKind::ListComp { elt, generators } => lower_list_comp(expr, elt, generators, ctx),
        ExprKind::SetComp { .. } => unsupported(expr, "set comprehension", ctx),
        ExprKind::DictComp { .. } => unsupported(expr, "dict comprehension", ctx),
        ExprKind::GeneratorExp { .. } => unsupported(expr, "generator expression", ctx),
        ExprKind::Await { .. } => unsupported(expr, "await", ctx),
        ExprKind::Yield { value } => {
            ctx.scopes.mark_generator();
            let value = match value {
                Some(value) => lower_expr(value, ctx)?,
                None => Intrinsic::NoneValue.expr(),
            };
            Ok(Intrinsic::Yield.call(vec![value]))
        }
        ExprKind::YieldFrom { value } => {
            ctx.scopes.mark_generator();
            let value = lower_expr(value, ctx)?;
            Ok(Intrinsic::YieldFrom.call(vec![value]))
        }
        ExprKind::Compare {
            left,
            ops,
            comparators,
        } => {
            let mut last = lower_expr(left, ctx)?;
            let mut checks = Vec::with_capacity(ops.len());
            for (i, (op, comparator)) in ops.iter().zip(comparators).enumerate() {
                let current = lower_expr(comparator, ctx)?;
                let shared = i + 1 < ops.len();
                // An operand shared by two comparisons is evaluated once
                // into a temporary unless re-reading it is side-effect free.
                let (operand, next) = if shared && !is_pure_operand(comparator) {
                    let tmp = ctx.gensym("cmp");
                    (current.assign_to(vec![JlTarget::name(&tmp)]), JlExpr::name(&tmp))
                } else {
                    (current.clone(), current)
                };
                checks.push(Intrinsic::compare(*op).call(vec![last, operand]));
                last = next;
            }
            Ok(Intrinsic::All.call(checks))
        }
        ExprKind::Call {
            func,
            args,
            keywords,
        } => {
            let func = lower_expr(func, ctx)?;
            let args = lower_exprs(args, ctx)?;
            let keywords = keywords
                .iter()
                .map(|k| lower_keyword(k, ctx))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Intrinsic::Call.call(vec![
                func,
                JlExpr::tuple(args),
                JlExpr::named_tuple(keywords),
            ]))
        }
        ExprKind::FormattedValue { .. } | ExprKind::JoinedStr { .. } => {
            unsupported(expr, "f-string", ctx)
        }
        ExprKind::Constant { value } => lower_constant(expr, value, ctx),
        ExprKind::Attribute { value, attr, .. } => Ok(lower_expr(value, ctx)?.attr(attr)),
        ExprKind::Subscript { value, slice, .. } => {
            let value = lower_expr(value, ctx)?;
            let slice = lower_expr(slice, ctx)?;
            Ok(value.index(slice))
        }
        ExprKind::Starred { value, .. } => Ok(lower_expr(value, ctx)?.splat()),
        ExprKind::Name { id, .. } => Ok(JlExpr::name(id)),
        ExprKind::List { elts, .. } => Ok(Intrinsic::List.call(lower_exprs(elts, ctx)?)),
        ExprKind::Tuple { elts, .. } => Ok(JlExpr::tuple(lower_exprs(elts, ctx)?)),
        ExprKind::Slice { lower, upper, step } => {
            let lower = lower_optional(lower.as_deref(), ctx)?;
            let upper = lower_optional(upper.as_deref(), ctx)?;
            let step = lower_optional(step.as_deref(), ctx)?;
            Ok(Intrinsic::Slice.call(vec![lower, upper, step]))
        }
        ExprKind::Unrecognized => Err(LoweringError::unknown_node(
            "expression",
            ISSUER,
            ctx.location(expr),
        )),
    }
}

/// Lowers an expression standing in an assignment-target position.
pub fn lower_target(expr: &Expr, ctx: &mut LoweringContext) -> Result<JlTarget, LoweringError> {
    const ISSUER: &str = "py2jl.lower.expr.lower_target";

    match expr.get_kind() {
        ExprKind::Name { id, .. } => Ok(JlTarget::name(id)),
        ExprKind::Attribute { value, attr, .. } => {
            let value = lower_expr(value, ctx)?;
            Ok(JlTarget::attr(value, attr))
        }
        ExprKind::Subscript { value, slice, .. } => {
            let value = lower_expr(value, ctx)?;
            let slice = lower_expr(slice, ctx)?;
            Ok(JlTarget::index(value, slice))
        }
        ExprKind::Starred { value, .. } => Ok(lower_target(value, ctx)?.splat()),
        ExprKind::List { elts, .. } | ExprKind::Tuple { elts, .. } => {
            let items = elts
                .iter()
                .map(|e| lower_target(e, ctx))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(JlTarget::tuple(items))
        }
        ExprKind::Unrecognized => Err(LoweringError::unknown_node(
            "expression",
            ISSUER,
            ctx.location(expr),
        )),
        other => Err(LoweringError::unsupported(
            format!("assignment to {}", other.class_name()),
            ISSUER,
            ctx.location(expr),
        )),
    }
}

pub fn lower_exprs(
    exprs: &[Expr],
    ctx: &mut LoweringContext,
) -> Result<Vec<JlExpr>, LoweringError> {
    exprs.iter().map(|e| lower_expr(e, ctx)).collect()
}

/// Absent operands lower to the none-value.
pub fn lower_optional(
    expr: Option<&Expr>,
    ctx: &mut LoweringContext,
) -> Result<JlExpr, LoweringError> {
    match expr {
        Some(expr) => lower_expr(expr, ctx),
        None => Ok(Intrinsic::NoneValue.expr()),
    }
}

fn unsupported(
    expr: &Expr,
    feature: &str,
    ctx: &LoweringContext,
) -> Result<JlExpr, LoweringError> {
    Err(LoweringError::unsupported(
        feature,
        "py2jl.lower.expr.lower_expr",
        ctx.location(expr),
    ))
}

/// Operands that may be lowered twice without changing behavior.
fn is_pure_operand(expr: &Expr) -> bool {
    matches!(expr.get_kind(), ExprKind::Name { .. } | ExprKind::Constant { .. })
}

fn lower_keyword(keyword: &Keyword, ctx: &mut LoweringContext) -> Result<JlExpr, LoweringError> {
    let value = lower_expr(&keyword.value, ctx)?;
    Ok(match &keyword.arg {
        Some(name) => value.keyword(JlExpr::name(name)),
        None => value.splat(),
    })
}

fn lower_constant(
    expr: &Expr,
    value: &Constant,
    ctx: &LoweringContext,
) -> Result<JlExpr, LoweringError> {
    let literal = |e: JlExpr| Intrinsic::Literal.call(vec![e]);
    Ok(match value {
        Constant::None => Intrinsic::NoneValue.expr(),
        Constant::Bool(b) => literal(JlExpr::boolean(*b)),
        Constant::Int(digits) => literal(JlExpr::raw(&int_literal(digits))),
        Constant::Float(f) => literal(JlExpr::raw(&float_literal(*f))),
        Constant::Str(s) => literal(JlExpr::raw(&string_literal(s))),
        Constant::Bytes { bytes } => literal(JlExpr::typed_array(
            "UInt8",
            bytes.iter().map(|b| JlExpr::raw(&b.to_string())).collect(),
        )),
        Constant::Complex { .. } => {
            return Err(LoweringError::unsupported(
                "complex constant",
                "py2jl.lower.expr.lower_constant",
                ctx.location(expr),
            ));
        }
        Constant::Tuple(items) => {
            let items = items
                .iter()
                .map(|item| lower_constant(expr, item, ctx))
                .collect::<Result<Vec<_>, _>>()?;
            literal(JlExpr::tuple(items))
        }
    })
}

/// Integers outside the target's native 64-bit range become big-integer
/// literals so no digit is lost.
fn int_literal(digits: &str) -> String {
    if digits.parse::<i64>().is_ok() {
        digits.to_string()
    } else {
        format!("big\"{digits}\"")
    }
}

fn float_literal(f: f64) -> String {
    if f.is_nan() {
        "NaN".to_string()
    } else if f == f64::INFINITY {
        "Inf".to_string()
    } else if f == f64::NEG_INFINITY {
        "-Inf".to_string()
    } else {
        format!("{f:?}")
    }
}

/// JSON string encoding plus escaping of the target's interpolation marker.
fn string_literal(s: &str) -> String {
    escape_string(s).replace('$', "\\$")
}

/// `[elt for t1 in it1 if c1 for t2 in it2 ...]` becomes an immediately
/// invoked one-parameter function that receives the outermost iterable,
/// fills an accumulator through nested loops and returns it.
fn lower_list_comp(
    expr: &Expr,
    elt: &Expr,
    generators: &[Comprehension],
    ctx: &mut LoweringContext,
) -> Result<JlExpr, LoweringError> {
    const ISSUER: &str = "py2jl.lower.expr.lower_list_comp";

    let location = ctx.location(expr);
    let Some(first) = generators.first() else {
        return Err(LoweringError::unsupported(
            "comprehension without a for clause",
            ISSUER,
            location,
        ));
    };
    if generators.iter().any(|g| g.is_async != 0) {
        return Err(LoweringError::unsupported("async comprehension", ISSUER, location));
    }

    // The outermost iterable belongs to the enclosing scope.
    let first_iter = lower_expr(&first.iter, ctx)?;

    let mut scope = ctx.enter_scope(ScopeKind::Comprehension, location)?;
    let iterable = scope.gensym("iterable");
    let acc = scope.gensym("acc");
    let mut body = JlStmt::declare_locals(scope.scopes.locals());
    let loops = lower_comp_clause(generators, 0, &iterable, &acc, elt, &mut scope)?;
    body.push(JlTarget::name(&acc).assign(Intrinsic::List.call(Vec::new())));
    body.push(loops);
    body.push(JlStmt::ret(JlExpr::name(&acc)));
    drop(scope);

    let signature = JlExpr::name(&iterable).into_doc();
    Ok(JlExpr::function(signature, body).call(vec![first_iter]))
}

fn lower_comp_clause(
    generators: &[Comprehension],
    index: usize,
    iterable: &str,
    acc: &str,
    elt: &Expr,
    ctx: &mut LoweringContext,
) -> Result<JlStmt, LoweringError> {
    let clause = &generators[index];
    let target = lower_target(&clause.target, ctx)?;
    let iter = if index == 0 {
        JlExpr::name(iterable)
    } else {
        lower_expr(&clause.iter, ctx)?
    };
    let conditions = lower_exprs(&clause.ifs, ctx)?;

    let inner = if index + 1 == generators.len() {
        let elt = lower_expr(elt, ctx)?;
        Intrinsic::AddList
            .call(vec![JlExpr::name(acc), elt])
            .to_stmt()
    } else {
        lower_comp_clause(generators, index + 1, iterable, acc, elt, ctx)?
    };

    let inner = if conditions.is_empty() {
        inner
    } else {
        let guard = Intrinsic::Bool.call(vec![Intrinsic::All.call(conditions)]);
        JlStmt::if_else(vec![(guard, vec![inner])], Vec::new())
    };

    Ok(lower_for_loop(target, iter, vec![inner], ctx))
}
