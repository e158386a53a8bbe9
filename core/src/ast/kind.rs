//! Operator and context tags shared by expression nodes.
//!
//! Each enum is internally tagged the same way nodes are, so the JSON form
//! of `a + b`'s operator is `{"class": "Add"}`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "class")]
pub enum BinaryOperator {
    Add,      // +
    Sub,      // -
    #[serde(rename = "Mult")]
    Mul,      // *
    #[serde(rename = "MatMult")]
    MatMul,   // @
    Div,      // /
    Mod,      // %
    Pow,      // **
    LShift,   // <<
    RShift,   // >>
    BitOr,    // |
    BitXor,   // ^
    BitAnd,   // &
    FloorDiv, // //
}

impl BinaryOperator {
    pub const ALL: [BinaryOperator; 13] = [
        BinaryOperator::Add,
        BinaryOperator::Sub,
        BinaryOperator::Mul,
        BinaryOperator::MatMul,
        BinaryOperator::Div,
        BinaryOperator::Mod,
        BinaryOperator::Pow,
        BinaryOperator::LShift,
        BinaryOperator::RShift,
        BinaryOperator::BitOr,
        BinaryOperator::BitXor,
        BinaryOperator::BitAnd,
        BinaryOperator::FloorDiv,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "class")]
pub enum UnaryOperator {
    #[serde(rename = "UAdd")]
    Plus,   // +
    #[serde(rename = "USub")]
    Minus,  // -
    Invert, // ~
    Not,    // not
}

impl UnaryOperator {
    pub const ALL: [UnaryOperator; 4] = [
        UnaryOperator::Plus,
        UnaryOperator::Minus,
        UnaryOperator::Invert,
        UnaryOperator::Not,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "class")]
pub enum BoolOperator {
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "class")]
pub enum CompareOperator {
    Eq, // ==
    #[serde(rename = "NotEq")]
    Ne, // !=
    Lt, // <
    #[serde(rename = "LtE")]
    Le, // <=
    Gt, // >
    #[serde(rename = "GtE")]
    Ge, // >=
    Is,
    IsNot,
    In,
    NotIn,
}

impl CompareOperator {
    pub const ALL: [CompareOperator; 10] = [
        CompareOperator::Eq,
        CompareOperator::Ne,
        CompareOperator::Lt,
        CompareOperator::Le,
        CompareOperator::Gt,
        CompareOperator::Ge,
        CompareOperator::Is,
        CompareOperator::IsNot,
        CompareOperator::In,
        CompareOperator::NotIn,
    ];
}

/// Role of a name-like node: read, bound, or deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "class")]
pub enum ExprContext {
    #[default]
    Load,
    Store,
    Del,
}
