use std::fmt;

use serde::{Deserialize, Serialize};

use super::expr::{Arguments, Expr};
use super::kind::BinaryOperator;
use super::node::AstNode;

pub type Stmt = AstNode<StmtKind>;

/// Source statement forms, tagged by their syntax class name.
///
/// Forms the lowering refuses outright carry no payload; their fields are
/// ignored on input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "class")]
pub enum StmtKind {
    FunctionDef {
        name: String,
        args: Arguments,
        body: Vec<Stmt>,
        #[serde(default)]
        decorator_list: Vec<Expr>,
        #[serde(default)]
        returns: Option<Box<Expr>>,
    },
    AsyncFunctionDef,
    ClassDef,
    Return {
        #[serde(default)]
        value: Option<Expr>,
    },
    Delete,
    Assign {
        targets: Vec<Expr>,
        value: Expr,
    },
    AugAssign {
        target: Expr,
        op: BinaryOperator,
        value: Expr,
    },
    AnnAssign {
        target: Expr,
        #[serde(default)]
        value: Option<Expr>,
    },
    For {
        target: Expr,
        iter: Expr,
        body: Vec<Stmt>,
        #[serde(default)]
        orelse: Vec<Stmt>,
    },
    AsyncFor,
    While {
        test: Expr,
        body: Vec<Stmt>,
        #[serde(default)]
        orelse: Vec<Stmt>,
    },
    If {
        test: Expr,
        body: Vec<Stmt>,
        #[serde(default)]
        orelse: Vec<Stmt>,
    },
    With,
    AsyncWith,
    Match,
    Raise {
        #[serde(default)]
        exc: Option<Expr>,
        #[serde(default)]
        cause: Option<Expr>,
    },
    Try {
        body: Vec<Stmt>,
        #[serde(default)]
        handlers: Vec<ExceptHandler>,
        #[serde(default)]
        orelse: Vec<Stmt>,
        #[serde(default)]
        finalbody: Vec<Stmt>,
    },
    TryStar,
    Assert,
    Import,
    ImportFrom,
    Global {
        names: Vec<String>,
    },
    Nonlocal {
        names: Vec<String>,
    },
    #[serde(rename = "Expr")]
    ExprStmt {
        value: Expr,
    },
    Pass,
    Break,
    Continue,
    #[serde(other)]
    Unrecognized,
}

impl StmtKind {
    pub fn class_name(&self) -> &'static str {
        match self {
            StmtKind::FunctionDef { .. } => "FunctionDef",
            StmtKind::AsyncFunctionDef => "AsyncFunctionDef",
            StmtKind::ClassDef => "ClassDef",
            StmtKind::Return { .. } => "Return",
            StmtKind::Delete => "Delete",
            StmtKind::Assign { .. } => "Assign",
            StmtKind::AugAssign { .. } => "AugAssign",
            StmtKind::AnnAssign { .. } => "AnnAssign",
            StmtKind::For { .. } => "For",
            StmtKind::AsyncFor => "AsyncFor",
            StmtKind::While { .. } => "While",
            StmtKind::If { .. } => "If",
            StmtKind::With => "With",
            StmtKind::AsyncWith => "AsyncWith",
            StmtKind::Match => "Match",
            StmtKind::Raise { .. } => "Raise",
            StmtKind::Try { .. } => "Try",
            StmtKind::TryStar => "TryStar",
            StmtKind::Assert => "Assert",
            StmtKind::Import => "Import",
            StmtKind::ImportFrom => "ImportFrom",
            StmtKind::Global { .. } => "Global",
            StmtKind::Nonlocal { .. } => "Nonlocal",
            StmtKind::ExprStmt { .. } => "Expr",
            StmtKind::Pass => "Pass",
            StmtKind::Break => "Break",
            StmtKind::Continue => "Continue",
            StmtKind::Unrecognized => "<unrecognized statement>",
        }
    }
}

impl fmt::Display for StmtKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

/// `except [type [as name]]: body`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExceptHandler {
    #[serde(rename = "type", default)]
    pub ty: Option<Expr>,
    #[serde(default)]
    pub name: Option<String>,
    pub body: Vec<Stmt>,
    #[serde(default)]
    pub lineno: usize,
}

/// Top-level statement sequence of one compilation unit.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Module {
    pub body: Vec<Stmt>,
}
