use std::rc::Rc;

#[derive(Debug)]
pub(super) enum DocNode {
    Empty,
    Text(String),
    Concat(Doc, Doc),
    Lines(Vec<Doc>),
    Indent(usize, Doc),
}

/// Immutable, cheaply clonable layout document.
#[derive(Debug, Clone)]
pub struct Doc(pub(super) Rc<DocNode>);

impl Doc {
    fn from_node(node: DocNode) -> Self {
        Doc(Rc::new(node))
    }

    pub fn empty() -> Self {
        Self::from_node(DocNode::Empty)
    }

    pub fn text(s: impl Into<String>) -> Self {
        Self::from_node(DocNode::Text(s.into()))
    }

    pub fn is_empty(&self) -> bool {
        match self.0.as_ref() {
            DocNode::Empty => true,
            DocNode::Text(_) | DocNode::Indent(..) => false,
            DocNode::Concat(a, b) => a.is_empty() && b.is_empty(),
            DocNode::Lines(items) => items.iter().all(Doc::is_empty),
        }
    }

    /// Horizontal composition without a separator.
    pub fn concat(self, other: Doc) -> Doc {
        Self::from_node(DocNode::Concat(self, other))
    }

    /// Horizontal composition separated by one space. Empty operands
    /// collapse so no stray spaces are produced.
    pub fn spaced(self, other: Doc) -> Doc {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return self;
        }
        self.concat(Doc::text(" ")).concat(other)
    }

    /// Vertical composition; empty members contribute no lines.
    pub fn lines<I: IntoIterator<Item = Doc>>(items: I) -> Doc {
        Self::from_node(DocNode::Lines(items.into_iter().collect()))
    }

    pub fn indent(width: usize, doc: Doc) -> Doc {
        Self::from_node(DocNode::Indent(width, doc))
    }

    pub fn parens(self) -> Doc {
        Doc::text("(").concat(self).concat(Doc::text(")"))
    }

    pub fn bracket(self) -> Doc {
        Doc::text("[").concat(self).concat(Doc::text("]"))
    }

    pub fn brace(self) -> Doc {
        Doc::text("{").concat(self).concat(Doc::text("}"))
    }

    /// Joins `docs` horizontally with `sep` between consecutive members.
    pub fn join<I: IntoIterator<Item = Doc>>(sep: &Doc, docs: I) -> Doc {
        let mut out: Option<Doc> = None;
        for doc in docs {
            out = Some(match out {
                None => doc,
                Some(acc) => acc.concat(sep.clone()).concat(doc),
            });
        }
        out.unwrap_or_else(Doc::empty)
    }
}
