// Copyright (c) The stepwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The node algebra that reports are assembled from.
//!
//! Renderers build a tree of [`Node`]s and render it once at the end. Optional parts of a report
//! are `None` entries in a [`Node::Sequence`], and indentation is a property of the tree
//! ([`Node::Indented`]), so nested blocks always come out indented once per enclosing level.

use crate::{
    icon::{IconStatus, status_icon},
    indenter::indented,
    style::{StyledText, Styles},
    write_str::WriteStr,
};
use std::io;

/// A renderable piece of a report.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Node {
    /// Text rendered as-is.
    Literal(String),

    /// Text rendered in the comment style.
    Comment(String),

    /// A status icon on its own.
    Icon(IconStatus),

    /// A status icon followed by statement source.
    ///
    /// The source is highlighted if the statement failed.
    StatusLine {
        /// The statement's source text.
        source: String,
        /// Whether the statement passed.
        passed: bool,
    },

    /// A node with every line indented `depth` levels.
    Indented {
        /// The indented node.
        node: Box<Node>,
        /// Number of indentation levels.
        depth: usize,
    },

    /// Present children joined by newlines.
    Sequence(Vec<Option<Node>>),

    /// Children rendered one after the other on the same line.
    Inline(Vec<Node>),
}

impl Node {
    /// Creates a [`Node::Literal`].
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    /// Creates a [`Node::Comment`].
    pub fn comment(text: impl Into<String>) -> Self {
        Self::Comment(text.into())
    }

    /// Creates an empty line, for use as a separator in a sequence.
    pub fn blank() -> Self {
        Self::Literal(String::new())
    }

    /// Creates a [`Node::StatusLine`].
    pub fn status_line(source: impl Into<String>, passed: bool) -> Self {
        Self::StatusLine {
            source: source.into(),
            passed,
        }
    }

    /// Creates a [`Node::Sequence`].
    pub fn sequence(children: impl IntoIterator<Item = Option<Node>>) -> Self {
        Self::Sequence(children.into_iter().collect())
    }

    /// Indents `self` by `depth` levels.
    pub fn indented(self, depth: usize) -> Self {
        Self::Indented {
            node: Box::new(self),
            depth,
        }
    }

    /// Renders this node to a string.
    pub fn render(&self, styles: &Styles) -> String {
        let mut out = String::new();
        self.write(styles, &mut out)
            .expect("writing to a String is infallible");
        out
    }

    /// Writes this node to `writer`.
    pub fn write(&self, styles: &Styles, writer: &mut dyn WriteStr) -> io::Result<()> {
        match self {
            Self::Literal(text) => writer.write_str(text),
            Self::Comment(text) => write!(writer, "{}", StyledText::new(text, styles.comment)),
            Self::Icon(status) => write!(writer, "{}", status_icon(*status, styles)),
            Self::StatusLine { source, passed } => {
                let source_style = if *passed {
                    Default::default()
                } else {
                    styles.failure_highlight
                };
                write!(
                    writer,
                    "{} {}",
                    status_icon(*passed, styles),
                    StyledText::new(source, source_style),
                )
            }
            Self::Indented { node, depth } => {
                let mut writer = indented(writer).with_depth(*depth);
                node.write(styles, &mut writer)?;
                writer.finish()
            }
            Self::Sequence(children) => {
                for (ind, child) in children.iter().flatten().enumerate() {
                    if ind > 0 {
                        writer.write_char('\n')?;
                    }
                    child.write(styles, writer)?;
                }
                Ok(())
            }
            Self::Inline(children) => children
                .iter()
                .try_for_each(|child| child.write(styles, writer)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::styled;
    use pretty_assertions::assert_eq;
    use test_strategy::proptest;

    #[test]
    fn literal_and_comment() {
        let styles = Styles::colorized();
        assert_eq!(Node::literal("x").render(&styles), "x");
        assert_eq!(
            Node::comment("note").render(&styles),
            styled("note", Styles::COMMENT)
        );
        assert_eq!(Node::comment("note").render(&Styles::default()), "note");
    }

    #[test]
    fn status_line_highlights_failures() {
        let styles = Styles::colorized();
        assert_eq!(
            Node::status_line("click $\".btn\"", true).render(&styles),
            format!("{} click $\".btn\"", styled("✔", Styles::PASS)),
        );
        assert_eq!(
            Node::status_line("click $\".btn\"", false).render(&styles),
            format!(
                "{} {}",
                styled("✖", Styles::FAIL),
                styled("click $\".btn\"", Styles::FAILURE_HIGHLIGHT)
            ),
        );
    }

    #[test]
    fn empty_indented_block_is_empty() {
        let node = Node::literal("").indented(3);
        assert_eq!(node.render(&Styles::default()), "");
        let node = Node::sequence([]).indented(1);
        assert_eq!(node.render(&Styles::default()), "");
    }

    #[test]
    fn indentation_composes_through_sequences() {
        let node = Node::sequence([
            Some(Node::literal("a")),
            Some(Node::sequence([Some(Node::literal("b")), Some(Node::literal("c").indented(1))])),
        ])
        .indented(1);
        assert_eq!(node.render(&Styles::default()), "  a\n  b\n    c");
    }

    #[test]
    fn sequence_blank_lines_are_indented() {
        let node = Node::sequence([
            Some(Node::literal("a")),
            Some(Node::blank()),
            Some(Node::literal("b")),
        ])
        .indented(2);
        assert_eq!(node.render(&Styles::default()), "    a\n    \n    b");
    }

    #[test]
    fn every_line_of_a_literal_is_indented() {
        let node = Node::literal("a\n\nb").indented(1);
        assert_eq!(node.render(&Styles::default()), "  a\n  \n  b");
        let node = Node::literal("a\n").indented(1);
        assert_eq!(node.render(&Styles::default()), "  a\n  ");
    }

    #[test]
    fn inline_concatenates() {
        let node = Node::Inline(vec![Node::Icon(IconStatus::Pass), Node::literal(" step")]);
        assert_eq!(node.render(&Styles::default()), "✔ step");
    }

    #[proptest]
    fn nested_indentation_matches_depth(
        #[strategy("[a-z \n]{0,24}")] text: String,
        #[strategy(0usize..4)] outer: usize,
        #[strategy(0usize..4)] inner: usize,
    ) {
        let styles = Styles::colorized();
        let nested = Node::literal(text.clone()).indented(inner).indented(outer);
        let flat = Node::literal(text).indented(outer + inner);
        assert_eq!(nested.render(&styles), flat.render(&styles));
    }

    #[proptest]
    fn sequence_skips_absent_children(
        #[strategy("[a-z]{0,8}")] a: String,
        #[strategy("[a-z]{0,8}")] b: String,
    ) {
        let styles = Styles::default();
        let with_gap = Node::sequence([Some(Node::literal(a.clone())), None, Some(Node::literal(b.clone()))]);
        let without = Node::sequence([Some(Node::literal(a)), Some(Node::literal(b))]);
        assert_eq!(with_gap.render(&styles), without.render(&styles));
    }
}
