// Copyright (c) The stepwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Documented exit codes for `stepwise` failures.
///
/// `stepwise` runs may fail for a variety of reasons. This structure documents the exit codes that
/// may occur in case of expected failures.
///
/// Unknown/unexpected failures will always result in exit code 1.
pub enum StepwiseExitCode {}

impl StepwiseExitCode {
    /// Every trace was rendered, and no step failed.
    pub const OK: i32 = 0;

    /// Every trace was rendered, and at least one step failed.
    pub const STEPS_FAILED: i32 = 100;

    /// An error occurred while setting up, for example while reading configuration.
    pub const SETUP_ERROR: i32 = 96;

    /// A trace file could not be read.
    pub const TRACE_READ_FAILED: i32 = 104;

    /// A trace file was read, but isn't a valid trace.
    pub const INVALID_TRACE: i32 = 105;

    /// Writing the rendered report to the output failed.
    pub const WRITE_OUTPUT_ERROR: i32 = 110;
}
