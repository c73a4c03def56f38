// Copyright (c) The stepwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `stepwise` command-line tool.
//!
//! `stepwise render` turns one or more JSON trace files into step reports on stdout, and
//! `stepwise show-config` prints the configuration that `render` would use. The rendering itself
//! lives in [`stepwise_reporter`]; this crate adds argument parsing, configuration, colors and
//! exit codes.

mod config;
mod dispatch;
mod errors;
mod exit_codes;
mod output;

#[doc(hidden)]
pub use dispatch::*;
#[doc(hidden)]
pub use errors::*;
pub use exit_codes::StepwiseExitCode;
#[doc(hidden)]
pub use output::{OutputContext, OutputWriter};
