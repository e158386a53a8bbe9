use std::fmt;

use super::doc::{Doc, DocNode};

#[derive(Debug, Clone, PartialEq)]
struct Line {
    indent: usize,
    text: String,
}

impl Doc {
    /// Flattens the document into physical lines relative to column 0.
    ///
    /// A horizontal composition continues the last line of its left side;
    /// any further lines of the right side keep their own indentation on
    /// top of the indentation of that continued line.
    fn layout(&self) -> Vec<Line> {
        match self.0.as_ref() {
            DocNode::Empty => Vec::new(),
            DocNode::Text(s) => vec![Line { indent: 0, text: s.clone() }],
            DocNode::Lines(items) => items.iter().flat_map(Doc::layout).collect(),
            DocNode::Indent(width, doc) => doc
                .layout()
                .into_iter()
                .map(|l| Line { indent: l.indent + width, text: l.text })
                .collect(),
            DocNode::Concat(a, b) => {
                let mut left = a.layout();
                let right = b.layout();
                let Some(last) = left.pop() else {
                    return right;
                };
                let mut rest = right.into_iter();
                match rest.next() {
                    None => left.push(last),
                    Some(first) => {
                        let base = last.indent;
                        left.push(Line { indent: base, text: last.text + &first.text });
                        left.extend(rest.map(|l| Line { indent: l.indent + base, text: l.text }));
                    }
                }
                left
            }
        }
    }

    /// Writes the document, one newline-terminated line per physical line.
    pub fn render<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        for line in self.layout() {
            for _ in 0..line.indent {
                out.write_char(' ')?;
            }
            out.write_str(&line.text)?;
            out.write_char('\n')?;
        }
        Ok(())
    }

    pub fn pretty(&self) -> String {
        let mut s = String::new();
        // Writing into a String cannot fail.
        let _ = self.render(&mut s);
        s
    }
}

impl fmt::Display for Doc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f)
    }
}

#[cfg(test)]
mod tests {
    use super::Doc;

    #[test]
    fn nested_indentation() {
        let d = Doc::lines(vec![
            Doc::text("begin"),
            Doc::indent(4, Doc::lines(vec![Doc::text("a"), Doc::empty(), Doc::text("b")])),
            Doc::text("end"),
        ]);
        assert_eq!(d.pretty(), "begin\n    a\n    b\nend\n");
    }

    #[test]
    fn horizontal_concat_continues_multiline_block() {
        let block = Doc::lines(vec![
            Doc::text("(function ()"),
            Doc::indent(4, Doc::text("return 1")),
            Doc::text("end)"),
        ]);
        let d = Doc::indent(2, Doc::text("f = ").concat(block).concat(Doc::text("(x)")));
        assert_eq!(d.pretty(), "  f = (function ()\n      return 1\n  end)(x)\n");
    }
}
