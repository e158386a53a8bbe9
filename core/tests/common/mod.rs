#![allow(dead_code)]

use py2jl_core::ast::{
    Arg, Arguments, BinaryOperator, Constant, Expr, ExprKind, Module, Stmt, StmtKind,
};
use py2jl_core::{LowerOptions, LoweringError, ScopeNode, lower_module};

pub fn name(id: &str) -> Expr {
    Expr::new(ExprKind::name(id))
}

pub fn store(id: &str) -> Expr {
    Expr::new(ExprKind::store(id))
}

pub fn constant(value: Constant) -> Expr {
    Expr::new(ExprKind::Constant { value })
}

pub fn int(i: i64) -> Expr {
    constant(Constant::Int(i.to_string()))
}

pub fn binop(left: Expr, op: BinaryOperator, right: Expr) -> Expr {
    Expr::new(ExprKind::BinOp {
        left: Box::new(left),
        op,
        right: Box::new(right),
    })
}

pub fn call(func: Expr, args: Vec<Expr>) -> Expr {
    Expr::new(ExprKind::Call {
        func: Box::new(func),
        args,
        keywords: Vec::new(),
    })
}

pub fn yield_(value: Option<Expr>) -> Expr {
    Expr::new(ExprKind::Yield {
        value: value.map(Box::new),
    })
}

pub fn at(line: usize, kind: StmtKind) -> Stmt {
    Stmt::at(kind, line, 0)
}

pub fn stmt(kind: StmtKind) -> Stmt {
    at(1, kind)
}

pub fn expr_stmt(value: Expr) -> Stmt {
    stmt(StmtKind::ExprStmt { value })
}

pub fn assign(target: Expr, value: Expr) -> Stmt {
    stmt(StmtKind::Assign {
        targets: vec![target],
        value,
    })
}

pub fn ret(value: Expr) -> Stmt {
    stmt(StmtKind::Return { value: Some(value) })
}

pub fn posonly(names: &[&str]) -> Arguments {
    Arguments {
        posonlyargs: names.iter().map(|n| Arg::new(n)).collect(),
        ..Arguments::default()
    }
}

pub fn def(name: &str, args: Arguments, body: Vec<Stmt>) -> Stmt {
    stmt(StmtKind::FunctionDef {
        name: name.to_string(),
        args,
        body,
        decorator_list: Vec::new(),
        returns: None,
    })
}

pub fn module(body: Vec<Stmt>) -> Module {
    Module { body }
}

/// Lowers `body` without line markers and renders it.
pub fn lower(body: Vec<Stmt>, scopes: &ScopeNode) -> String {
    let options = LowerOptions::new("a.py").without_line_markers();
    lower_module(&module(body), scopes, &options)
        .expect("lowering failed")
        .pretty()
}

pub fn lower_err(body: Vec<Stmt>, scopes: &ScopeNode) -> LoweringError {
    let options = LowerOptions::new("a.py");
    match lower_module(&module(body), scopes, &options) {
        Ok(doc) => panic!("expected lowering to fail, got:\n{doc}"),
        Err(e) => e,
    }
}
