use crate::layout::Doc;

use super::expr::JlExpr;
use super::ident::sanitize;
use super::intrinsic::{CHANNEL_PARAM, Intrinsic};
use super::target::JlTarget;

fn body_doc(stmts: Vec<JlStmt>) -> Doc {
    Doc::indent(4, Doc::lines(stmts.into_iter().map(JlStmt::into_doc)))
}

/// Target-language statement (possibly several lines, possibly none).
#[derive(Debug, Clone)]
pub struct JlStmt(Doc);

impl JlStmt {
    pub fn from_doc(doc: Doc) -> Self {
        JlStmt(doc)
    }

    pub fn doc(&self) -> &Doc {
        &self.0
    }

    pub fn into_doc(self) -> Doc {
        self.0
    }

    /// Emits nothing.
    pub fn empty() -> Self {
        JlStmt(Doc::empty())
    }

    pub fn raw(text: &str) -> Self {
        JlStmt(Doc::text(text))
    }

    pub fn line_marker(unit: &str, line: usize) -> Self {
        JlStmt(Doc::text(format!("# {unit}, line {line}")))
    }

    /// Statements laid out one after another.
    pub fn seq(stmts: Vec<JlStmt>) -> Self {
        JlStmt(Doc::lines(stmts.into_iter().map(JlStmt::into_doc)))
    }

    /// `tn = ... = t1 = value`: `value` is evaluated once and stored into
    /// the targets in source order.
    pub fn chained_assign(value: JlExpr, targets: Vec<JlTarget>) -> Self {
        let mut doc = value.into_doc();
        for target in targets {
            doc = target.into_doc().spaced(Doc::text("=")).spaced(doc);
        }
        JlStmt(doc)
    }

    pub fn declare_locals<'a, I: IntoIterator<Item = &'a String>>(names: I) -> Vec<JlStmt> {
        names
            .into_iter()
            .map(|n| JlStmt(Doc::text(format!("local {}", sanitize(n)))))
            .collect()
    }

    pub fn declare_globals<'a, I: IntoIterator<Item = &'a String>>(names: I) -> Vec<JlStmt> {
        names
            .into_iter()
            .map(|n| JlStmt(Doc::text(format!("global {}", sanitize(n)))))
            .collect()
    }

    pub fn ret(value: JlExpr) -> Self {
        JlStmt(Doc::text("return").spaced(value.into_doc()))
    }

    pub fn break_loop() -> Self {
        JlStmt::raw("break")
    }

    pub fn continue_loop() -> Self {
        JlStmt::raw("continue")
    }

    pub fn rethrow() -> Self {
        JlStmt::raw("rethrow()")
    }

    /// `begin ... end`
    pub fn block(body: Vec<JlStmt>) -> Self {
        JlStmt(Doc::lines([Doc::text("begin"), body_doc(body), Doc::text("end")]))
    }

    /// A while loop that does not open a new binding scope, so assignments
    /// in the body stay visible to the enclosing function.
    pub fn while_loop(cond: JlExpr, body: Vec<JlStmt>) -> Self {
        let head = Intrinsic::NoScope
            .expr()
            .into_doc()
            .spaced(Doc::text("while"))
            .spaced(cond.into_doc());
        JlStmt(Doc::lines([head, body_doc(body), Doc::text("end")]))
    }

    /// `if c1 ... elseif c2 ... else ... end`. `branches` must not be empty.
    pub fn if_else(branches: Vec<(JlExpr, Vec<JlStmt>)>, orelse: Vec<JlStmt>) -> Self {
        let mut suite = Vec::with_capacity(branches.len() * 2 + 3);
        for (i, (cond, body)) in branches.into_iter().enumerate() {
            let head = if i == 0 { "if" } else { "elseif" };
            suite.push(Doc::text(head).spaced(cond.into_doc()));
            suite.push(body_doc(body));
        }
        if !orelse.is_empty() {
            suite.push(Doc::text("else"));
            suite.push(body_doc(orelse));
        }
        suite.push(Doc::text("end"));
        JlStmt(Doc::lines(suite))
    }

    /// `try ... catch e ... finally ... end`; collapses to a plain block when
    /// there is neither a handler nor a finally clause.
    pub fn try_catch(
        body: Vec<JlStmt>,
        catch: Option<(String, JlStmt)>,
        finally: Option<Vec<JlStmt>>,
    ) -> Self {
        if catch.is_none() && finally.is_none() {
            return JlStmt::block(body);
        }
        let mut suite = vec![Doc::text("try"), body_doc(body)];
        if let Some((binding, handler)) = catch {
            suite.push(Doc::text(format!("catch {}", sanitize(&binding))));
            suite.push(Doc::indent(4, handler.into_doc()));
        }
        if let Some(finally) = finally {
            suite.push(Doc::text("finally"));
            suite.push(body_doc(finally));
        }
        suite.push(Doc::text("end"));
        JlStmt(Doc::lines(suite))
    }

    /// Named function definition `function name(sig) ... end`.
    pub fn function(name: &str, signature: Doc, body: Vec<JlStmt>) -> Self {
        let head = Doc::text(format!("function {}", sanitize(name))).concat(signature.parens());
        JlStmt(Doc::lines([head, body_doc(body), Doc::text("end")]))
    }

    /// Runs `body` as the producer side of a channel; `yield`s inside it
    /// send through the channel parameter.
    pub fn channel(body: Vec<JlStmt>) -> Self {
        JlStmt(Doc::lines([
            Doc::text(format!("Channel() do {CHANNEL_PARAM}")),
            body_doc(body),
            Doc::text("end"),
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chained_assign_orders_targets() {
        let stmt = JlStmt::chained_assign(
            JlExpr::name("v"),
            vec![JlTarget::name("a"), JlTarget::name("b")],
        );
        assert_eq!(stmt.into_doc().pretty(), "b = a = v\n");
    }

    #[test]
    fn if_chain_is_flat() {
        let stmt = JlStmt::if_else(
            vec![
                (JlExpr::name("a"), vec![JlStmt::raw("x")]),
                (JlExpr::name("b"), vec![JlStmt::raw("y")]),
            ],
            vec![JlStmt::raw("z")],
        );
        assert_eq!(
            stmt.into_doc().pretty(),
            "if a\n    x\nelseif b\n    y\nelse\n    z\nend\n"
        );
    }

    #[test]
    fn try_without_clauses_is_a_block() {
        let stmt = JlStmt::try_catch(vec![JlStmt::raw("x")], None, None);
        assert_eq!(stmt.into_doc().pretty(), "begin\n    x\nend\n");
    }

    #[test]
    fn try_with_finally_only() {
        let stmt = JlStmt::try_catch(vec![JlStmt::raw("x")], None, Some(vec![JlStmt::raw("y")]));
        assert_eq!(stmt.into_doc().pretty(), "try\n    x\nfinally\n    y\nend\n");
    }

    #[test]
    fn empty_statement_renders_nothing() {
        let stmt = JlStmt::seq(vec![JlStmt::raw("a"), JlStmt::empty(), JlStmt::raw("b")]);
        assert_eq!(stmt.into_doc().pretty(), "a\nb\n");
    }
}
