//! Source AST consumed by the lowering engine.
//!
//! The tree is produced outside this crate (by the front end's parser) and
//! arrives as JSON: every node is an object tagged by `"class"` with the
//! source syntax form's field names, plus optional `"lineno"`/`"colno"`.
//! The lowering engine only ever reads it.

pub mod constant;
pub mod expr;
pub mod kind;
pub mod node;
pub mod stmt;

pub use constant::Constant;
pub use expr::{Arg, Arguments, Comprehension, Expr, ExprKind, Keyword};
pub use kind::{BinaryOperator, BoolOperator, CompareOperator, ExprContext, UnaryOperator};
pub use node::AstNode;
pub use stmt::{ExceptHandler, Module, Stmt, StmtKind};
