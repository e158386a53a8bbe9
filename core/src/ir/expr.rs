use crate::layout::Doc;

use super::ident::sanitize;
use super::stmt::JlStmt;

fn comma() -> Doc {
    Doc::text(", ")
}

fn body_doc(stmts: Vec<JlStmt>) -> Doc {
    Doc::indent(4, Doc::lines(stmts.into_iter().map(JlStmt::into_doc)))
}

/// Target-language expression.
#[derive(Debug, Clone)]
pub struct JlExpr(Doc);

impl JlExpr {
    pub fn from_doc(doc: Doc) -> Self {
        JlExpr(doc)
    }

    pub fn doc(&self) -> &Doc {
        &self.0
    }

    pub fn into_doc(self) -> Doc {
        self.0
    }

    /// Verbatim target text.
    pub fn raw(text: &str) -> Self {
        JlExpr(Doc::text(text))
    }

    /// Reference to a source or synthetic name.
    pub fn name(name: &str) -> Self {
        JlExpr(Doc::text(sanitize(name)))
    }

    pub fn boolean(b: bool) -> Self {
        JlExpr::raw(if b { "true" } else { "false" })
    }

    /// `self(args...)`
    pub fn call(self, args: Vec<JlExpr>) -> JlExpr {
        let args = Doc::join(&comma(), args.into_iter().map(JlExpr::into_doc));
        JlExpr(self.0.concat(args.parens()))
    }

    /// `(a, b,)`, or `()` when empty.
    pub fn tuple(items: Vec<JlExpr>) -> JlExpr {
        if items.is_empty() {
            return JlExpr::raw("()");
        }
        let items = Doc::join(&comma(), items.into_iter().map(JlExpr::into_doc));
        JlExpr(items.concat(Doc::text(",")).parens())
    }

    /// `(; k = v, rest...)`, or `(;)` when empty.
    pub fn named_tuple(items: Vec<JlExpr>) -> JlExpr {
        if items.is_empty() {
            return JlExpr::raw("(;)");
        }
        let items = Doc::join(&comma(), items.into_iter().map(JlExpr::into_doc));
        JlExpr(Doc::text("; ").concat(items).parens())
    }

    /// `ty[a, b]`
    pub fn typed_array(ty: &str, items: Vec<JlExpr>) -> JlExpr {
        let items = Doc::join(&comma(), items.into_iter().map(JlExpr::into_doc));
        JlExpr(Doc::text(ty).concat(items.bracket()))
    }

    /// `name = self`, as used for keyword arguments and parameter defaults.
    pub fn keyword(self, name: JlExpr) -> JlExpr {
        JlExpr(name.0.spaced(Doc::text("=")).spaced(self.0))
    }

    /// `key => self`
    pub fn paired_with(self, key: JlExpr) -> JlExpr {
        JlExpr(key.0.spaced(Doc::text("=>")).spaced(self.0))
    }

    /// `self...`
    pub fn splat(self) -> JlExpr {
        JlExpr(self.0.concat(Doc::text("...")))
    }

    pub fn attr(self, attr: &str) -> JlExpr {
        JlExpr(self.0.concat(Doc::text(format!(".{}", sanitize(attr)))))
    }

    pub fn index(self, index: JlExpr) -> JlExpr {
        JlExpr(self.0.concat(index.0.bracket()))
    }

    /// `(self isa ty)`
    pub fn isa(self, ty: JlExpr) -> JlExpr {
        JlExpr(self.0.spaced(Doc::text("isa")).spaced(ty.0).parens())
    }

    /// Inline assignment expression `(t = self;)`.
    pub fn assign_to(self, targets: Vec<super::target::JlTarget>) -> JlExpr {
        let mut doc = self.0;
        for target in targets {
            doc = target.into_doc().spaced(Doc::text("=")).spaced(doc);
        }
        JlExpr(doc.concat(Doc::text(";")).parens())
    }

    /// Multi-line conditional expression.
    pub fn if_else(test: JlExpr, body: JlExpr, orelse: JlExpr) -> JlExpr {
        JlExpr(Doc::lines([
            Doc::text("if").spaced(test.0),
            Doc::indent(4, body.0),
            Doc::text("else"),
            Doc::indent(4, orelse.0),
            Doc::text("end"),
        ]))
    }

    /// Anonymous function value `(function (sig) body end)`.
    pub fn function(signature: Doc, body: Vec<JlStmt>) -> JlExpr {
        JlExpr(Doc::lines([
            Doc::text("(function ").concat(signature.parens()),
            body_doc(body),
            Doc::text("end)"),
        ]))
    }

    /// `self;`
    pub fn to_stmt(self) -> JlStmt {
        JlStmt::from_doc(self.0.concat(Doc::text(";")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn show(e: JlExpr) -> String {
        e.into_doc().pretty()
    }

    #[test]
    fn calls_and_tuples() {
        let f = JlExpr::name("f").call(vec![JlExpr::name("a"), JlExpr::name("b")]);
        assert_eq!(show(f), "f(a, b)\n");
        assert_eq!(show(JlExpr::tuple(vec![])), "()\n");
        assert_eq!(show(JlExpr::tuple(vec![JlExpr::name("a")])), "(a,)\n");
        assert_eq!(show(JlExpr::named_tuple(vec![])), "(;)\n");
        let kw = JlExpr::name("v").keyword(JlExpr::name("k"));
        assert_eq!(show(JlExpr::named_tuple(vec![kw])), "(; k = v)\n");
    }

    #[test]
    fn access_forms() {
        assert_eq!(show(JlExpr::name("x").attr("end")), "x.var\"end\"\n");
        assert_eq!(show(JlExpr::name("x").index(JlExpr::name("i"))), "x[i]\n");
        assert_eq!(show(JlExpr::name("e").isa(JlExpr::name("T"))), "(e isa T)\n");
        assert_eq!(show(JlExpr::name("xs").splat()), "xs...\n");
    }
}
