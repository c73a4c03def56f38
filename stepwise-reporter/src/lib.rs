// Copyright (c) The stepwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rendering of executed test traces into human-readable step reports.
//!
//! A trace describes what happened when a test ran: for each step, the statements that completed,
//! the statement that failed (if any), the data set the step ran with, and the error that ended it.
//! This crate turns a trace into text with terminal styling. It never executes anything and never
//! decides whether a test passed; it only renders what it is given.
//!
//! The entry point for whole reports is [`reporter::Reporter`]. The individual renderers live in
//! [`render`], and are assembled out of the [`node::Node`] algebra.

pub mod errors;
pub mod icon;
pub mod indenter;
pub mod node;
pub mod post_process;
pub mod render;
pub mod reporter;
pub mod style;
pub mod summary;
pub mod trace;
pub mod write_str;
