use crate::analyzers::ScopeKind;
use crate::ast::{Arguments, Expr, Stmt};
use crate::ir::expr::JlExpr;
use crate::ir::ident::decorate_param;
use crate::ir::stmt::JlStmt;
use crate::ir::target::JlTarget;
use crate::layout::Doc;
use crate::location::Location;

use super::err::LoweringError;
use super::lower_expr::lower_expr;
use super::lower_stmt::lower_stmt_list;
use super::lowering_context::LoweringContext;

/// Signature and prologue of one `def` or `lambda`.
///
/// Every parameter is received under a decorated name and rebound to its
/// source name at the top of the body. Defaults are lowered in the
/// enclosing scope, before the function's own scope is entered.
pub struct FunctionBuilder {
    positional: Vec<String>,
    defaults: Vec<JlExpr>,
    vararg: Option<String>,
    kwonly: Vec<String>,
    kw_defaults: Vec<Option<JlExpr>>,
    kwarg: Option<String>,
}

impl FunctionBuilder {
    pub fn from_arguments(
        args: &Arguments,
        location: Location,
        ctx: &mut LoweringContext,
    ) -> Result<Self, LoweringError> {
        if !args.args.is_empty() {
            return Err(LoweringError::unsupported(
                "parameters that are neither positional-only nor keyword-only",
                "py2jl.lower.function.from_arguments",
                location,
            ));
        }
        let defaults = args
            .defaults
            .iter()
            .map(|d| lower_expr(d, ctx))
            .collect::<Result<Vec<_>, _>>()?;
        let kw_defaults = args
            .kw_defaults
            .iter()
            .map(|d| d.as_ref().map(|d| lower_expr(d, ctx)).transpose())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(FunctionBuilder {
            positional: args.posonlyargs.iter().map(|a| a.arg.clone()).collect(),
            defaults,
            vararg: args.vararg.as_ref().map(|a| a.arg.clone()),
            kwonly: args.kwonlyargs.iter().map(|a| a.arg.clone()).collect(),
            kw_defaults,
            kwarg: args.kwarg.as_ref().map(|a| a.arg.clone()),
        })
    }

    /// `p1, p2 = d, rest...; k = d, kw...`
    pub fn signature(&self) -> Doc {
        fn param(name: &str) -> JlExpr {
            JlExpr::name(&decorate_param(name))
        }

        // Defaults belong to the trailing positional parameters.
        let first_default = self.positional.len().saturating_sub(self.defaults.len());
        let mut positional: Vec<JlExpr> = self.positional[..first_default]
            .iter()
            .map(|p| param(p))
            .collect();
        positional.extend(
            self.positional[first_default..]
                .iter()
                .zip(&self.defaults)
                .map(|(p, d)| d.clone().keyword(param(p))),
        );
        if let Some(vararg) = &self.vararg {
            positional.push(param(vararg).splat());
        }

        let mut keyword: Vec<JlExpr> = self
            .kwonly
            .iter()
            .enumerate()
            .map(|(i, k)| match self.kw_defaults.get(i) {
                Some(Some(d)) => d.clone().keyword(param(k)),
                _ => param(k),
            })
            .collect();
        if let Some(kwarg) = &self.kwarg {
            keyword.push(param(kwarg).splat());
        }

        let comma = Doc::text(", ");
        let mut sig = Doc::join(&comma, positional.into_iter().map(JlExpr::into_doc));
        if !keyword.is_empty() {
            sig = sig
                .concat(Doc::text("; "))
                .concat(Doc::join(&comma, keyword.into_iter().map(JlExpr::into_doc)));
        }
        sig
    }

    /// `x = _x′` for every parameter.
    fn shadow_bindings(&self) -> Vec<JlStmt> {
        self.positional
            .iter()
            .chain(&self.kwonly)
            .chain(&self.vararg)
            .chain(&self.kwarg)
            .map(|p| JlTarget::name(p).assign(JlExpr::name(&decorate_param(p))))
            .collect()
    }

    /// Local declarations, parameter rebinding, then the body; all of it
    /// inside a channel producer when the body yields.
    fn body(&self, locals: Vec<JlStmt>, body: Vec<JlStmt>, is_generator: bool) -> Vec<JlStmt> {
        let mut out = locals;
        out.extend(self.shadow_bindings());
        out.extend(body);
        if is_generator {
            vec![JlStmt::channel(out)]
        } else {
            out
        }
    }

    /// Defines the function under `internal` and binds `name` to it.
    pub fn build_named(
        &self,
        name: &str,
        internal: &str,
        is_global: bool,
        is_generator: bool,
        locals: Vec<JlStmt>,
        body: Vec<JlStmt>,
    ) -> JlStmt {
        let definition = JlStmt::function(
            internal,
            self.signature(),
            self.body(locals, body, is_generator),
        );
        let target = JlTarget::name(name);
        let binding = if is_global {
            target.assign_const(JlExpr::name(internal))
        } else {
            target.assign(JlExpr::name(internal))
        };
        JlStmt::seq(vec![definition, binding])
    }

    pub fn build_anonymous(
        &self,
        is_generator: bool,
        locals: Vec<JlStmt>,
        body: Vec<JlStmt>,
    ) -> JlExpr {
        JlExpr::function(self.signature(), self.body(locals, body, is_generator))
    }
}

pub fn lower_function_def(
    stmt: &Stmt,
    name: &str,
    args: &Arguments,
    body: &[Stmt],
    decorators: &[Expr],
    ctx: &mut LoweringContext,
) -> Result<JlStmt, LoweringError> {
    let location = ctx.location(stmt);
    if !decorators.is_empty() {
        return Err(LoweringError::unsupported(
            "decorated function",
            "py2jl.lower.function.lower_function_def",
            location,
        ));
    }
    let builder = FunctionBuilder::from_arguments(args, location.clone(), ctx)?;
    let is_global = ctx.scopes.is_global(name);

    let (locals, body, is_generator) = {
        let mut scope = ctx.enter_scope(ScopeKind::Function, location)?;
        let locals = JlStmt::declare_locals(scope.scopes.locals());
        let body = lower_stmt_list(body, &mut scope)?;
        (locals, body, scope.scopes.is_generator())
    };

    let internal = ctx.gensym(name);
    Ok(builder.build_named(name, &internal, is_global, is_generator, locals, body))
}

pub fn lower_lambda(
    expr: &Expr,
    args: &Arguments,
    body: &Expr,
    ctx: &mut LoweringContext,
) -> Result<JlExpr, LoweringError> {
    let location = ctx.location(expr);
    let builder = FunctionBuilder::from_arguments(args, location.clone(), ctx)?;

    let (locals, body, is_generator) = {
        let mut scope = ctx.enter_scope(ScopeKind::Lambda, location)?;
        let locals = JlStmt::declare_locals(scope.scopes.locals());
        let value = lower_expr(body, &mut scope)?;
        (locals, vec![JlStmt::ret(value)], scope.scopes.is_generator())
    };

    Ok(builder.build_anonymous(is_generator, locals, body))
}
