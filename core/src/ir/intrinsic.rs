//! Runtime-library naming contract.
//!
//! Every operator, builtin and protocol step the lowering cannot express
//! natively becomes a call to one of these names. Renaming an entry breaks
//! every runtime built against the old table.

use std::collections::HashMap;

use lazy_static::lazy_static;

use super::expr::JlExpr;
use crate::ast::{BinaryOperator, BoolOperator, CompareOperator, UnaryOperator};

/// Name of the channel parameter a generator body sends through.
pub const CHANNEL_PARAM: &str = "PyContinuation";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intrinsic {
    // call convention and coercions
    Call,
    Bool,
    All,
    Any,
    Literal,
    NoneValue,
    // containers
    List,
    Set,
    Dict,
    Slice,
    AddList,
    // iteration protocol
    GetIter,
    MoveNext,
    GetCurrent,
    // generators
    Yield,
    YieldFrom,
    NoScope,
    // binary operators
    Add,
    Sub,
    Mul,
    MatMul,
    Div,
    Mod,
    Pow,
    LShift,
    RShift,
    BitOr,
    BitXor,
    BitAnd,
    FloorDiv,
    // augmented assignment
    IAdd,
    ISub,
    IMul,
    IMatMul,
    IDiv,
    IMod,
    IPow,
    ILShift,
    IRShift,
    IBitOr,
    IBitXor,
    IBitAnd,
    IFloorDiv,
    // unary operators
    Pos,
    Neg,
    Invert,
    Not,
    // comparisons
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Is,
    IsNot,
    In,
    NotIn,
}

lazy_static! {
    static ref BY_NAME: HashMap<&'static str, Intrinsic> =
        Intrinsic::ALL.iter().map(|i| (i.name(), *i)).collect();
}

impl Intrinsic {
    pub const ALL: [Intrinsic; 57] = [
        Intrinsic::Call,
        Intrinsic::Bool,
        Intrinsic::All,
        Intrinsic::Any,
        Intrinsic::Literal,
        Intrinsic::NoneValue,
        Intrinsic::List,
        Intrinsic::Set,
        Intrinsic::Dict,
        Intrinsic::Slice,
        Intrinsic::AddList,
        Intrinsic::GetIter,
        Intrinsic::MoveNext,
        Intrinsic::GetCurrent,
        Intrinsic::Yield,
        Intrinsic::YieldFrom,
        Intrinsic::NoScope,
        Intrinsic::Add,
        Intrinsic::Sub,
        Intrinsic::Mul,
        Intrinsic::MatMul,
        Intrinsic::Div,
        Intrinsic::Mod,
        Intrinsic::Pow,
        Intrinsic::LShift,
        Intrinsic::RShift,
        Intrinsic::BitOr,
        Intrinsic::BitXor,
        Intrinsic::BitAnd,
        Intrinsic::FloorDiv,
        Intrinsic::IAdd,
        Intrinsic::ISub,
        Intrinsic::IMul,
        Intrinsic::IMatMul,
        Intrinsic::IDiv,
        Intrinsic::IMod,
        Intrinsic::IPow,
        Intrinsic::ILShift,
        Intrinsic::IRShift,
        Intrinsic::IBitOr,
        Intrinsic::IBitXor,
        Intrinsic::IBitAnd,
        Intrinsic::IFloorDiv,
        Intrinsic::Pos,
        Intrinsic::Neg,
        Intrinsic::Invert,
        Intrinsic::Not,
        Intrinsic::Eq,
        Intrinsic::Ne,
        Intrinsic::Lt,
        Intrinsic::Le,
        Intrinsic::Gt,
        Intrinsic::Ge,
        Intrinsic::Is,
        Intrinsic::IsNot,
        Intrinsic::In,
        Intrinsic::NotIn,
    ];

    /// The runtime call target.
    pub fn name(self) -> &'static str {
        match self {
            Intrinsic::Call => "jpy_call",
            Intrinsic::Bool => "jpy_bool",
            Intrinsic::All => "@jpy_all",
            Intrinsic::Any => "@jpy_any",
            Intrinsic::Literal => "jpy_literal",
            Intrinsic::NoneValue => "jpy_none",
            Intrinsic::List => "jpy_list",
            Intrinsic::Set => "jpy_set",
            Intrinsic::Dict => "jpy_dict",
            Intrinsic::Slice => "jpy_slice",
            Intrinsic::AddList => "jpy_addlist",
            Intrinsic::GetIter => "jpy_getiter",
            Intrinsic::MoveNext => "jpy_movenext",
            Intrinsic::GetCurrent => "jpy_getcurrent",
            Intrinsic::Yield => "@jpy_yield",
            Intrinsic::YieldFrom => "@jpy_yieldfrom",
            Intrinsic::NoScope => "@noscope",
            Intrinsic::Add => "jpy_add",
            Intrinsic::Sub => "jpy_sub",
            Intrinsic::Mul => "jpy_mul",
            Intrinsic::MatMul => "jpy_matmul",
            Intrinsic::Div => "jpy_div",
            Intrinsic::Mod => "jpy_mod",
            Intrinsic::Pow => "jpy_pow",
            Intrinsic::LShift => "jpy_lshift",
            Intrinsic::RShift => "jpy_rshift",
            Intrinsic::BitOr => "jpy_or",
            Intrinsic::BitXor => "jpy_xor",
            Intrinsic::BitAnd => "jpy_and",
            Intrinsic::FloorDiv => "jpy_floordiv",
            Intrinsic::IAdd => "jpy_iadd",
            Intrinsic::ISub => "jpy_isub",
            Intrinsic::IMul => "jpy_imul",
            Intrinsic::IMatMul => "jpy_imatmul",
            Intrinsic::IDiv => "jpy_idiv",
            Intrinsic::IMod => "jpy_imod",
            Intrinsic::IPow => "jpy_ipow",
            Intrinsic::ILShift => "jpy_ilshift",
            Intrinsic::IRShift => "jpy_irshift",
            Intrinsic::IBitOr => "jpy_ior",
            Intrinsic::IBitXor => "jpy_ixor",
            Intrinsic::IBitAnd => "jpy_iand",
            Intrinsic::IFloorDiv => "jpy_ifloordiv",
            Intrinsic::Pos => "jpy_pos",
            Intrinsic::Neg => "jpy_neg",
            Intrinsic::Invert => "jpy_invert",
            Intrinsic::Not => "jpy_not",
            Intrinsic::Eq => "jpy_eq",
            Intrinsic::Ne => "jpy_ne",
            Intrinsic::Lt => "jpy_lt",
            Intrinsic::Le => "jpy_le",
            Intrinsic::Gt => "jpy_gt",
            Intrinsic::Ge => "jpy_ge",
            Intrinsic::Is => "jpy_is",
            Intrinsic::IsNot => "jpy_isnot",
            Intrinsic::In => "jpy_in",
            Intrinsic::NotIn => "jpy_notin",
        }
    }

    /// The source construct the entry stands in for.
    pub fn source_form(self) -> &'static str {
        match self {
            Intrinsic::Call => "f(*args, **kwargs)",
            Intrinsic::Bool => "truth test",
            Intrinsic::All => "a and b",
            Intrinsic::Any => "a or b",
            Intrinsic::Literal => "constant",
            Intrinsic::NoneValue => "None",
            Intrinsic::List => "[a, b]",
            Intrinsic::Set => "{a, b}",
            Intrinsic::Dict => "{k: v}",
            Intrinsic::Slice => "a:b:c",
            Intrinsic::AddList => "list append",
            Intrinsic::GetIter => "iter(x)",
            Intrinsic::MoveNext => "advance iterator",
            Intrinsic::GetCurrent => "read iterator",
            Intrinsic::Yield => "yield x",
            Intrinsic::YieldFrom => "yield from x",
            Intrinsic::NoScope => "loop without new scope",
            Intrinsic::Add => "a + b",
            Intrinsic::Sub => "a - b",
            Intrinsic::Mul => "a * b",
            Intrinsic::MatMul => "a @ b",
            Intrinsic::Div => "a / b",
            Intrinsic::Mod => "a % b",
            Intrinsic::Pow => "a ** b",
            Intrinsic::LShift => "a << b",
            Intrinsic::RShift => "a >> b",
            Intrinsic::BitOr => "a | b",
            Intrinsic::BitXor => "a ^ b",
            Intrinsic::BitAnd => "a & b",
            Intrinsic::FloorDiv => "a // b",
            Intrinsic::IAdd => "a += b",
            Intrinsic::ISub => "a -= b",
            Intrinsic::IMul => "a *= b",
            Intrinsic::IMatMul => "a @= b",
            Intrinsic::IDiv => "a /= b",
            Intrinsic::IMod => "a %= b",
            Intrinsic::IPow => "a **= b",
            Intrinsic::ILShift => "a <<= b",
            Intrinsic::IRShift => "a >>= b",
            Intrinsic::IBitOr => "a |= b",
            Intrinsic::IBitXor => "a ^= b",
            Intrinsic::IBitAnd => "a &= b",
            Intrinsic::IFloorDiv => "a //= b",
            Intrinsic::Pos => "+a",
            Intrinsic::Neg => "-a",
            Intrinsic::Invert => "~a",
            Intrinsic::Not => "not a",
            Intrinsic::Eq => "a == b",
            Intrinsic::Ne => "a != b",
            Intrinsic::Lt => "a < b",
            Intrinsic::Le => "a <= b",
            Intrinsic::Gt => "a > b",
            Intrinsic::Ge => "a >= b",
            Intrinsic::Is => "a is b",
            Intrinsic::IsNot => "a is not b",
            Intrinsic::In => "a in b",
            Intrinsic::NotIn => "a not in b",
        }
    }

    pub fn category(self) -> &'static str {
        use Intrinsic::*;
        match self {
            Call | Bool | All | Any | Literal | NoneValue => "core",
            List | Set | Dict | Slice | AddList => "container",
            GetIter | MoveNext | GetCurrent => "iteration",
            Yield | YieldFrom | NoScope => "generator",
            Add | Sub | Mul | MatMul | Div | Mod | Pow | LShift | RShift | BitOr | BitXor
            | BitAnd | FloorDiv => "binary",
            IAdd | ISub | IMul | IMatMul | IDiv | IMod | IPow | ILShift | IRShift | IBitOr
            | IBitXor | IBitAnd | IFloorDiv => "augmented",
            Pos | Neg | Invert | Not => "unary",
            Eq | Ne | Lt | Le | Gt | Ge | Is | IsNot | In | NotIn => "compare",
        }
    }

    pub fn lookup(name: &str) -> Option<Intrinsic> {
        BY_NAME.get(name).copied()
    }

    pub fn expr(self) -> JlExpr {
        JlExpr::raw(self.name())
    }

    /// `self(args...)`
    pub fn call(self, args: Vec<JlExpr>) -> JlExpr {
        self.expr().call(args)
    }

    /// ------- Operator Tables -------

    pub fn binary(op: BinaryOperator) -> Intrinsic {
        match op {
            BinaryOperator::Add => Intrinsic::Add,
            BinaryOperator::Sub => Intrinsic::Sub,
            BinaryOperator::Mul => Intrinsic::Mul,
            BinaryOperator::MatMul => Intrinsic::MatMul,
            BinaryOperator::Div => Intrinsic::Div,
            BinaryOperator::Mod => Intrinsic::Mod,
            BinaryOperator::Pow => Intrinsic::Pow,
            BinaryOperator::LShift => Intrinsic::LShift,
            BinaryOperator::RShift => Intrinsic::RShift,
            BinaryOperator::BitOr => Intrinsic::BitOr,
            BinaryOperator::BitXor => Intrinsic::BitXor,
            BinaryOperator::BitAnd => Intrinsic::BitAnd,
            BinaryOperator::FloorDiv => Intrinsic::FloorDiv,
        }
    }

    pub fn augmented(op: BinaryOperator) -> Intrinsic {
        match op {
            BinaryOperator::Add => Intrinsic::IAdd,
            BinaryOperator::Sub => Intrinsic::ISub,
            BinaryOperator::Mul => Intrinsic::IMul,
            BinaryOperator::MatMul => Intrinsic::IMatMul,
            BinaryOperator::Div => Intrinsic::IDiv,
            BinaryOperator::Mod => Intrinsic::IMod,
            BinaryOperator::Pow => Intrinsic::IPow,
            BinaryOperator::LShift => Intrinsic::ILShift,
            BinaryOperator::RShift => Intrinsic::IRShift,
            BinaryOperator::BitOr => Intrinsic::IBitOr,
            BinaryOperator::BitXor => Intrinsic::IBitXor,
            BinaryOperator::BitAnd => Intrinsic::IBitAnd,
            BinaryOperator::FloorDiv => Intrinsic::IFloorDiv,
        }
    }

    pub fn unary(op: UnaryOperator) -> Intrinsic {
        match op {
            UnaryOperator::Plus => Intrinsic::Pos,
            UnaryOperator::Minus => Intrinsic::Neg,
            UnaryOperator::Invert => Intrinsic::Invert,
            UnaryOperator::Not => Intrinsic::Not,
        }
    }

    pub fn compare(op: CompareOperator) -> Intrinsic {
        match op {
            CompareOperator::Eq => Intrinsic::Eq,
            CompareOperator::Ne => Intrinsic::Ne,
            CompareOperator::Lt => Intrinsic::Lt,
            CompareOperator::Le => Intrinsic::Le,
            CompareOperator::Gt => Intrinsic::Gt,
            CompareOperator::Ge => Intrinsic::Ge,
            CompareOperator::Is => Intrinsic::Is,
            CompareOperator::IsNot => Intrinsic::IsNot,
            CompareOperator::In => Intrinsic::In,
            CompareOperator::NotIn => Intrinsic::NotIn,
        }
    }

    pub fn boolean(op: BoolOperator) -> Intrinsic {
        match op {
            BoolOperator::And => Intrinsic::All,
            BoolOperator::Or => Intrinsic::Any,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_are_unique_and_reversible() {
        let names: HashSet<&str> = Intrinsic::ALL.iter().map(|i| i.name()).collect();
        assert_eq!(names.len(), Intrinsic::ALL.len());
        for i in Intrinsic::ALL {
            assert_eq!(Intrinsic::lookup(i.name()), Some(i));
        }
        assert_eq!(Intrinsic::lookup("jpy_nothing"), None);
    }

    #[test]
    fn operator_tables_cover_every_operator() {
        let binary: HashSet<Intrinsic> =
            BinaryOperator::ALL.iter().map(|op| Intrinsic::binary(*op)).collect();
        let augmented: HashSet<Intrinsic> =
            BinaryOperator::ALL.iter().map(|op| Intrinsic::augmented(*op)).collect();
        assert_eq!(binary.len(), 13);
        assert_eq!(augmented.len(), 13);
        assert!(binary.is_disjoint(&augmented));
        assert!(augmented.iter().all(|i| i.category() == "augmented"));

        let compare: HashSet<Intrinsic> =
            CompareOperator::ALL.iter().map(|op| Intrinsic::compare(*op)).collect();
        assert_eq!(compare.len(), 10);
        let unary: HashSet<Intrinsic> =
            UnaryOperator::ALL.iter().map(|op| Intrinsic::unary(*op)).collect();
        assert_eq!(unary.len(), 4);
    }

    #[test]
    fn augmented_add_is_not_plain_add() {
        assert_eq!(Intrinsic::augmented(BinaryOperator::Add).name(), "jpy_iadd");
        assert_eq!(Intrinsic::binary(BinaryOperator::Add).name(), "jpy_add");
        assert_eq!(Intrinsic::binary(BinaryOperator::BitOr).name(), "jpy_or");
    }
}
