//! Target IR: immutable expression, statement and assignment-target
//! builders over layout documents, the runtime intrinsic table, identifier
//! hygiene, and the lowering engine that produces them.

pub mod expr;
pub mod ident;
pub mod intrinsic;
pub mod lower;
pub mod stmt;
pub mod target;

pub use expr::JlExpr;
pub use ident::{NameGen, decorate_param, escape_string, sanitize};
pub use intrinsic::Intrinsic;
pub use lower::{LowerOptions, LoweringError, LoweringErrorKind, lower_module};
pub use stmt::JlStmt;
pub use target::JlTarget;
