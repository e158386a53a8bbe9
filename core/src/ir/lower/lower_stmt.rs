//! Lowering helpers for statement nodes.
//!
//! All control-flow desugaring lives here: `for` loops become explicit
//! iterator protocol calls, `if`/`elif` chains are flattened, and `try`
//! handlers turn into a type-dispatch chain inside a single `catch`.

use log::trace;

use crate::ast::{ExceptHandler, Expr, ExprKind, Stmt, StmtKind};
use crate::ir::expr::JlExpr;
use crate::ir::intrinsic::Intrinsic;
use crate::ir::stmt::JlStmt;
use crate::ir::target::JlTarget;

use super::err::LoweringError;
use super::function_builder;
use super::lower_expr::{lower_expr, lower_optional, lower_target};
use super::lowering_context::LoweringContext;

const ISSUER: &str = "py2jl.lower.stmt.lower_stmt";

/// Lowers a statement sequence. Each statement is preceded by a line marker
/// (unless disabled) and the sequence always ends in the none-value, so
/// every block produces a value.
pub fn lower_stmt_list(
    stmts: &[Stmt],
    ctx: &mut LoweringContext,
) -> Result<Vec<JlStmt>, LoweringError> {
    let mut out = Vec::with_capacity(stmts.len() * 2 + 1);
    for stmt in stmts {
        if ctx.options.emit_line_markers {
            out.push(JlStmt::line_marker(&ctx.options.unit_name, stmt.lineno));
        }
        trace!("lowering {} at line {}", stmt.kind, stmt.lineno);
        out.push(lower_stmt(stmt, ctx)?);
    }
    out.push(Intrinsic::NoneValue.expr().to_stmt());
    Ok(out)
}

pub fn lower_stmt(stmt: &Stmt, ctx: &mut LoweringContext) -> Result<JlStmt, LoweringError> {
    match stmt.get_kind() {
        StmtKind::FunctionDef {
            name,
            args,
            body,
            decorator_list,
            ..
        } => function_builder::lower_function_def(stmt, name, args, body, decorator_list, ctx),
        StmtKind::Return { value } => Ok(JlStmt::ret(lower_optional(value.as_ref(), ctx)?)),
        StmtKind::Assign { targets, value } => {
            let targets = targets
                .iter()
                .map(|t| lower_target(t, ctx))
                .collect::<Result<Vec<_>, _>>()?;
            let value = lower_expr(value, ctx)?;
            Ok(JlStmt::chained_assign(value, targets))
        }
        StmtKind::AugAssign { target, op, value } => {
            if !matches!(
                target.get_kind(),
                ExprKind::Name { .. } | ExprKind::Attribute { .. } | ExprKind::Subscript { .. }
            ) {
                return unsupported(stmt, "augmented assignment to this target", ctx);
            }
            // The target is lowered once; its read-back re-evaluates the
            // object and index sub-expressions at run time.
            let target = lower_target(target, ctx)?;
            let value = lower_expr(value, ctx)?;
            let current = target.read();
            Ok(target.assign(Intrinsic::augmented(*op).call(vec![current, value])))
        }
        StmtKind::AnnAssign { target, value } => match value {
            Some(value) => {
                let target = lower_target(target, ctx)?;
                let value = lower_expr(value, ctx)?;
                Ok(target.assign(value))
            }
            None => Ok(JlStmt::empty()),
        },
        StmtKind::For {
            target,
            iter,
            body,
            orelse,
        } => {
            if !orelse.is_empty() {
                return unsupported(stmt, "else clause on a for loop", ctx);
            }
            let target = lower_target(target, ctx)?;
            let iter = lower_expr(iter, ctx)?;
            let body = lower_stmt_list(body, ctx)?;
            Ok(lower_for_loop(target, iter, body, ctx))
        }
        StmtKind::While { test, body, orelse } => {
            if !orelse.is_empty() {
                return unsupported(stmt, "else clause on a while loop", ctx);
            }
            let test = Intrinsic::Bool.call(vec![lower_expr(test, ctx)?]);
            let body = lower_stmt_list(body, ctx)?;
            Ok(JlStmt::while_loop(test, body))
        }
        StmtKind::If { test, body, orelse } => lower_if(test, body, orelse, ctx),
        StmtKind::Raise { exc, cause } => {
            if cause.is_some() {
                return unsupported(stmt, "raise ... from ...", ctx);
            }
            match exc {
                None => Ok(JlStmt::rethrow()),
                Some(exc) => {
                    let exc = lower_expr(exc, ctx)?;
                    Ok(JlExpr::raw("throw").call(vec![exc]).to_stmt())
                }
            }
        }
        StmtKind::Try {
            body,
            handlers,
            orelse,
            finalbody,
        } => {
            if !orelse.is_empty() {
                return unsupported(stmt, "else clause on a try statement", ctx);
            }
            let body = lower_stmt_list(body, ctx)?;
            let catch = if handlers.is_empty() {
                None
            } else {
                let binding = ctx.gensym("exception");
                let mut branches = Vec::with_capacity(handlers.len());
                for handler in handlers {
                    branches.push(lower_handler(&binding, handler, ctx)?);
                }
                let dispatch = JlStmt::if_else(branches, vec![JlStmt::rethrow()]);
                Some((binding, dispatch))
            };
            let finally = if finalbody.is_empty() {
                None
            } else {
                Some(lower_stmt_list(finalbody, ctx)?)
            };
            Ok(JlStmt::try_catch(body, catch, finally))
        }
        StmtKind::Global { names } => Ok(JlStmt::seq(JlStmt::declare_globals(names))),
        // Parameters are rebound by name inside each body, so captured
        // variables already resolve to the enclosing binding.
        StmtKind::Nonlocal { .. } => Ok(JlStmt::empty()),
        StmtKind::ExprStmt { value } => Ok(lower_expr(value, ctx)?.to_stmt()),
        StmtKind::Pass => Ok(JlStmt::empty()),
        StmtKind::Break => Ok(JlStmt::break_loop()),
        StmtKind::Continue => Ok(JlStmt::continue_loop()),
        StmtKind::AsyncFunctionDef => unsupported(stmt, "async function definition", ctx),
        StmtKind::ClassDef => unsupported(stmt, "class definition", ctx),
        StmtKind::Delete => unsupported(stmt, "del statement", ctx),
        StmtKind::AsyncFor => unsupported(stmt, "async for loop", ctx),
        StmtKind::With => unsupported(stmt, "with statement", ctx),
        StmtKind::AsyncWith => unsupported(stmt, "async with statement", ctx),
        StmtKind::Match => unsupported(stmt, "match statement", ctx),
        StmtKind::TryStar => unsupported(stmt, "try/except* statement", ctx),
        StmtKind::Assert => unsupported(stmt, "assert statement", ctx),
        StmtKind::Import => unsupported(stmt, "import statement", ctx),
        StmtKind::ImportFrom => unsupported(stmt, "from-import statement", ctx),
        StmtKind::Unrecognized => Err(LoweringError::unknown_node(
            "statement",
            ISSUER,
            ctx.location(stmt),
        )),
    }
}

fn unsupported(
    stmt: &Stmt,
    feature: &str,
    ctx: &LoweringContext,
) -> Result<JlStmt, LoweringError> {
    Err(LoweringError::unsupported(feature, ISSUER, ctx.location(stmt)))
}

/// `it = getiter(iter); while movenext(it) target = getcurrent(it); body end`
pub(super) fn lower_for_loop(
    target: JlTarget,
    iter: JlExpr,
    body: Vec<JlStmt>,
    ctx: &mut LoweringContext,
) -> JlStmt {
    let iterator = ctx.gensym("iter");
    let mut loop_body = Vec::with_capacity(body.len() + 1);
    loop_body.push(target.assign(Intrinsic::GetCurrent.call(vec![JlExpr::name(&iterator)])));
    loop_body.extend(body);
    JlStmt::seq(vec![
        JlTarget::name(&iterator).assign(Intrinsic::GetIter.call(vec![iter])),
        JlStmt::while_loop(
            Intrinsic::MoveNext.call(vec![JlExpr::name(&iterator)]),
            loop_body,
        ),
    ])
}

/// Flattens `if a: .. elif b: .. else: ..`, which arrives as ifs nested in
/// single-statement else branches, into one conditional.
fn lower_if(
    test: &Expr,
    body: &[Stmt],
    orelse: &[Stmt],
    ctx: &mut LoweringContext,
) -> Result<JlStmt, LoweringError> {
    let mut arms = vec![(test, body)];
    let mut rest = orelse;
    while let [next] = rest {
        let StmtKind::If { test, body, orelse } = next.get_kind() else {
            break;
        };
        arms.push((test, body.as_slice()));
        rest = orelse.as_slice();
    }

    let mut branches = Vec::with_capacity(arms.len());
    for (test, body) in arms {
        let test = Intrinsic::Bool.call(vec![lower_expr(test, ctx)?]);
        branches.push((test, lower_stmt_list(body, ctx)?));
    }
    let orelse = lower_stmt_list(rest, ctx)?;
    Ok(JlStmt::if_else(branches, orelse))
}

fn lower_handler(
    binding: &str,
    handler: &ExceptHandler,
    ctx: &mut LoweringContext,
) -> Result<(JlExpr, Vec<JlStmt>), LoweringError> {
    let exception = JlExpr::name(binding);
    let test = match &handler.ty {
        Some(ty) => exception.clone().isa(lower_expr(ty, ctx)?),
        None => JlExpr::boolean(true),
    };
    let mut body = Vec::new();
    if let Some(name) = &handler.name {
        body.push(JlTarget::name(name).assign(exception));
    }
    body.extend(lower_stmt_list(&handler.body, ctx)?);
    Ok((test, body))
}
