// Copyright (c) The stepwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Renderers for each part of a report.
//!
//! Every renderer comes in two forms: a `*_node` function that returns a [`Node`](crate::node::Node)
//! for composition into larger reports, and a `render_*` function that renders it to a string.

mod data_set;
mod exception;
mod header;
mod statement;
mod step;

pub use data_set::{data_set_node, render_data_set};
pub use exception::{exception_node, render_exception};
pub use header::{HEADER_END, HEADER_START, render_test_header};
pub use statement::{render_statement_line, statement_line_node};
pub use step::{listed_completed_lines, render_step, step_node};
