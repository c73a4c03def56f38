// Copyright (c) The stepwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    node::Node,
    style::Styles,
    trace::{ProvenanceLink, StatementLine},
};

/// Returns a node for a statement line, followed by its provenance if it has any.
///
/// A passing statement shows only where it immediately came from. A failing statement shows the
/// whole chain down to the statement that was authored, one line per link, all at the same depth.
pub fn statement_line_node(line: &StatementLine) -> Node {
    let base = Node::status_line(line.statement.source(), line.passed);

    let links = line.statement.provenance();
    let provenance: Vec<_> = if line.passed {
        links.take(1).map(provenance_line).collect()
    } else {
        links.map(provenance_line).collect()
    };

    if provenance.is_empty() {
        base
    } else {
        Node::sequence([Some(base), Some(Node::sequence(provenance).indented(1))])
    }
}

/// Renders a statement line.
pub fn render_statement_line(line: &StatementLine, styles: &Styles) -> String {
    statement_line_node(line).render(styles)
}

// Provenance lines are annotations: they show the source text only, never an icon.
fn provenance_line(link: ProvenanceLink<'_>) -> Option<Node> {
    Some(Node::Inline(vec![
        Node::comment(format!("> {}:", link.relation.label())),
        Node::literal(format!(" {}", link.inner.source())),
    ]))
}
