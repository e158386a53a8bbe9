use std::fmt;

use serde::{Deserialize, Serialize};

use super::constant::Constant;
use super::kind::{BinaryOperator, BoolOperator, CompareOperator, ExprContext, UnaryOperator};
use super::node::AstNode;

pub type Expr = AstNode<ExprKind>;

/// Source expression forms, tagged by their syntax class name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "class")]
pub enum ExprKind {
    BoolOp {
        op: BoolOperator,
        values: Vec<Expr>,
    },
    NamedExpr {
        target: Box<Expr>,
        value: Box<Expr>,
    },
    BinOp {
        left: Box<Expr>,
        op: BinaryOperator,
        right: Box<Expr>,
    },
    UnaryOp {
        op: UnaryOperator,
        operand: Box<Expr>,
    },
    Lambda {
        args: Arguments,
        body: Box<Expr>,
    },
    IfExp {
        test: Box<Expr>,
        body: Box<Expr>,
        orelse: Box<Expr>,
    },
    Dict {
        /// `None` keys mark `**mapping` entries.
        keys: Vec<Option<Expr>>,
        values: Vec<Expr>,
    },
    Set {
        elts: Vec<Expr>,
    },
    ListComp {
        elt: Box<Expr>,
        generators: Vec<Comprehension>,
    },
    SetComp {
        elt: Box<Expr>,
        generators: Vec<Comprehension>,
    },
    DictComp {
        key: Box<Expr>,
        value: Box<Expr>,
        generators: Vec<Comprehension>,
    },
    GeneratorExp {
        elt: Box<Expr>,
        generators: Vec<Comprehension>,
    },
    Await {
        value: Box<Expr>,
    },
    Yield {
        #[serde(default)]
        value: Option<Box<Expr>>,
    },
    YieldFrom {
        value: Box<Expr>,
    },
    Compare {
        left: Box<Expr>,
        ops: Vec<CompareOperator>,
        comparators: Vec<Expr>,
    },
    Call {
        func: Box<Expr>,
        #[serde(default)]
        args: Vec<Expr>,
        #[serde(default)]
        keywords: Vec<Keyword>,
    },
    FormattedValue {
        value: Box<Expr>,
    },
    JoinedStr {
        values: Vec<Expr>,
    },
    Constant {
        value: Constant,
    },
    Attribute {
        value: Box<Expr>,
        attr: String,
        #[serde(default)]
        ctx: ExprContext,
    },
    Subscript {
        value: Box<Expr>,
        slice: Box<Expr>,
        #[serde(default)]
        ctx: ExprContext,
    },
    Starred {
        value: Box<Expr>,
        #[serde(default)]
        ctx: ExprContext,
    },
    Name {
        id: String,
        #[serde(default)]
        ctx: ExprContext,
    },
    List {
        elts: Vec<Expr>,
        #[serde(default)]
        ctx: ExprContext,
    },
    Tuple {
        elts: Vec<Expr>,
        #[serde(default)]
        ctx: ExprContext,
    },
    Slice {
        #[serde(default)]
        lower: Option<Box<Expr>>,
        #[serde(default)]
        upper: Option<Box<Expr>>,
        #[serde(default)]
        step: Option<Box<Expr>>,
    },
    /// Any class tag this crate has no variant for.
    #[serde(other)]
    Unrecognized,
}

impl ExprKind {
    /// The source syntax class name of this form.
    pub fn class_name(&self) -> &'static str {
        match self {
            ExprKind::BoolOp { .. } => "BoolOp",
            ExprKind::NamedExpr { .. } => "NamedExpr",
            ExprKind::BinOp { .. } => "BinOp",
            ExprKind::UnaryOp { .. } => "UnaryOp",
            ExprKind::Lambda { .. } => "Lambda",
            ExprKind::IfExp { .. } => "IfExp",
            ExprKind::Dict { .. } => "Dict",
            ExprKind::Set { .. } => "Set",
            ExprKind::ListComp { .. } => "ListComp",
            ExprKind::SetComp { .. } => "SetComp",
            ExprKind::DictComp { .. } => "DictComp",
            ExprKind::GeneratorExp { .. } => "GeneratorExp",
            ExprKind::Await { .. } => "Await",
            ExprKind::Yield { .. } => "Yield",
            ExprKind::YieldFrom { .. } => "YieldFrom",
            ExprKind::Compare { .. } => "Compare",
            ExprKind::Call { .. } => "Call",
            ExprKind::FormattedValue { .. } => "FormattedValue",
            ExprKind::JoinedStr { .. } => "JoinedStr",
            ExprKind::Constant { .. } => "Constant",
            ExprKind::Attribute { .. } => "Attribute",
            ExprKind::Subscript { .. } => "Subscript",
            ExprKind::Starred { .. } => "Starred",
            ExprKind::Name { .. } => "Name",
            ExprKind::List { .. } => "List",
            ExprKind::Tuple { .. } => "Tuple",
            ExprKind::Slice { .. } => "Slice",
            ExprKind::Unrecognized => "<unrecognized expression>",
        }
    }

    pub fn name(id: &str) -> Self {
        ExprKind::Name { id: id.to_string(), ctx: ExprContext::Load }
    }

    pub fn store(id: &str) -> Self {
        ExprKind::Name { id: id.to_string(), ctx: ExprContext::Store }
    }
}

impl fmt::Display for ExprKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

/// `name=value` or `**value` (when `arg` is absent) at a call site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    #[serde(default)]
    pub arg: Option<String>,
    pub value: Expr,
}

/// One `for target in iter if ...` clause of a comprehension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comprehension {
    pub target: Expr,
    pub iter: Expr,
    #[serde(default)]
    pub ifs: Vec<Expr>,
    #[serde(default)]
    pub is_async: u8,
}

impl Comprehension {
    pub fn new(target: Expr, iter: Expr, ifs: Vec<Expr>) -> Self {
        Comprehension { target, iter, ifs, is_async: 0 }
    }
}

/// Parameter list of a `def` or `lambda`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Arguments {
    #[serde(default)]
    pub posonlyargs: Vec<Arg>,
    #[serde(default)]
    pub args: Vec<Arg>,
    #[serde(default)]
    pub vararg: Option<Arg>,
    #[serde(default)]
    pub kwonlyargs: Vec<Arg>,
    /// Aligned with `kwonlyargs`; `None` where a parameter has no default.
    #[serde(default)]
    pub kw_defaults: Vec<Option<Expr>>,
    #[serde(default)]
    pub kwarg: Option<Arg>,
    /// Defaults of the trailing positional parameters.
    #[serde(default)]
    pub defaults: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arg {
    pub arg: String,
    #[serde(default)]
    pub annotation: Option<Box<Expr>>,
}

impl Arg {
    pub fn new(arg: &str) -> Self {
        Arg { arg: arg.to_string(), annotation: None }
    }
}
