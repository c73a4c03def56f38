// Copyright (c) The stepwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{node::Node, style::Styles, trace::DataSet};

/// Returns a node listing every bound value as `$key: value`.
pub fn data_set_node(data_set: &DataSet) -> Node {
    Node::sequence(data_set.values.iter().map(|(key, value)| {
        Some(Node::Inline(vec![
            Node::literal(format!("${key}: ")),
            Node::comment(value.as_str()),
        ]))
    }))
}

/// Renders a data set as a list of `$key: value` lines.
pub fn render_data_set(data_set: &DataSet, styles: &Styles) -> String {
    data_set_node(data_set).render(styles)
}
