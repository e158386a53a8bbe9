use crate::layout::Doc;

use super::expr::JlExpr;
use super::ident::sanitize;
use super::stmt::JlStmt;

/// Assignable position: a binding, attribute or index setter, a splat
/// pattern, or a tuple of those.
#[derive(Debug, Clone)]
pub struct JlTarget(Doc);

impl JlTarget {
    pub fn into_doc(self) -> Doc {
        self.0
    }

    pub fn name(name: &str) -> Self {
        JlTarget(Doc::text(sanitize(name)))
    }

    pub fn attr(value: JlExpr, attr: &str) -> Self {
        JlTarget(value.attr(attr).into_doc())
    }

    pub fn index(value: JlExpr, index: JlExpr) -> Self {
        JlTarget(value.index(index).into_doc())
    }

    pub fn splat(self) -> Self {
        JlTarget(self.0.concat(Doc::text("...")))
    }

    /// `(a, b,)`
    pub fn tuple(items: Vec<JlTarget>) -> Self {
        let items = Doc::join(&Doc::text(", "), items.into_iter().map(JlTarget::into_doc));
        JlTarget(items.concat(Doc::text(",")).parens())
    }

    /// The same place read as a value.
    pub fn read(&self) -> JlExpr {
        JlExpr::from_doc(self.0.clone())
    }

    /// `self = value`
    pub fn assign(self, value: JlExpr) -> JlStmt {
        JlStmt::from_doc(self.0.spaced(Doc::text("=")).spaced(value.into_doc()))
    }

    /// `const self = value`
    pub fn assign_const(self, value: JlExpr) -> JlStmt {
        JlStmt::from_doc(
            Doc::text("const")
                .spaced(self.0)
                .spaced(Doc::text("="))
                .spaced(value.into_doc()),
        )
    }
}
