// Copyright (c) The stepwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{data_set::data_set_node, exception::exception_node, statement::statement_line_node};
use crate::{
    node::Node,
    style::Styles,
    summary::FailureSummary,
    trace::{Statement, StatementLine, Step},
};

/// Depth at which a step's data set and statements are shown, relative to the step name.
const STATEMENT_DEPTH: usize = 2;

/// Returns a node for a finished step.
///
/// The step's name line comes first, followed by its data set (if any), the statements that
/// completed, the statement that failed along with a summary from `summary`, and finally the error
/// that terminated the step.
pub fn step_node(step: &Step, summary: &dyn FailureSummary) -> Node {
    tracing::trace!(step = %step.name, status = ?step.status, "building step node");

    let mut name = step.name.clone();
    if let Some(data_set) = &step.current_data_set {
        name.push_str(": ");
        name.push_str(&data_set.display_name());
    }
    let name_line = Node::Inline(vec![
        Node::Icon(step.status.into()),
        Node::literal(format!(" {name}")),
    ]);

    let mut children = vec![Some(name_line)];

    if let Some(data_set) = &step.current_data_set {
        children.push(Some(data_set_node(data_set).indented(STATEMENT_DEPTH)));
        children.push(Some(Node::blank()));
    }

    let listed = listed_completed_lines(step);
    children.extend(
        listed
            .iter()
            .map(|line| Some(statement_line_node(line).indented(STATEMENT_DEPTH))),
    );

    if let Some(failed) = &step.failed_statement_line {
        if !listed.is_empty() {
            children.push(Some(Node::blank()));
        }
        children.push(Some(statement_line_node(failed).indented(STATEMENT_DEPTH)));

        if failed.statement.is_assertion() {
            let text = summary.summarize(
                &failed.statement,
                step.expected.as_deref(),
                step.actual.as_deref(),
            );
            children.push(text.map(|text| Node::literal(text).indented(STATEMENT_DEPTH)));
        }
    }

    children.push(step.last_exception.as_ref().map(|exception| {
        Node::Inline(vec![Node::literal("• "), exception_node(exception)]).indented(1)
    }));

    Node::Sequence(children)
}

/// Renders a finished step.
pub fn render_step(step: &Step, styles: &Styles, summary: &dyn FailureSummary) -> String {
    step_node(step, summary).render(styles)
}

/// Returns the completed statement lines that are listed in a step's report.
///
/// A completed line is left out if its statement is exactly the statement that another completed
/// line was resolved or derived from: that line already shows it inline as provenance.
pub fn listed_completed_lines(step: &Step) -> Vec<&StatementLine> {
    let shown_inline: Vec<&Statement> = step
        .completed_statement_lines
        .iter()
        .filter_map(|line| line.statement.provenance().next())
        .map(|link| link.inner)
        .collect();

    step.completed_statement_lines
        .iter()
        .filter(|line| !shown_inline.contains(&&line.statement))
        .collect()
}
