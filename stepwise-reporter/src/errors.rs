// Copyright (c) The stepwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced by stepwise-reporter.
//!
//! Rendering itself never fails. The errors here come from loading trace files and checking that a
//! trace upholds the invariants the renderers assume.

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

/// A trace violated an invariant of the step model.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum TraceValidationError {
    /// The step failed, but no failed statement was recorded.
    #[error("step `{step}` failed, but has no failed statement")]
    MissingFailedStatement {
        /// The step's name.
        step: String,
    },

    /// The step passed, but a failed statement was recorded.
    #[error("step `{step}` passed, but has a failed statement")]
    UnexpectedFailedStatement {
        /// The step's name.
        step: String,
    },

    /// The recorded failed statement is marked as passed.
    #[error("step `{step}` has a failed statement that is marked as passed")]
    FailedStatementPassed {
        /// The step's name.
        step: String,
    },

    /// A completed statement is marked as failed.
    #[error("step `{step}` has a completed statement at index {index} that is marked as failed")]
    FailedCompletedStatement {
        /// The step's name.
        step: String,
        /// Index into the step's completed statements.
        index: usize,
    },
}

/// An error that occurred while reading a trace file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TraceReadError {
    /// The trace file could not be read.
    #[error("failed to read trace file `{path}`")]
    Read {
        /// The path to the trace file.
        path: Utf8PathBuf,
        /// The underlying error.
        #[source]
        error: std::io::Error,
    },

    /// The trace file is not valid trace JSON.
    #[error("failed to parse trace file `{path}`")]
    Parse {
        /// The path to the trace file.
        path: Utf8PathBuf,
        /// The underlying error.
        #[source]
        error: serde_json::Error,
    },

    /// The trace parsed, but violates an invariant of the step model.
    #[error("invalid trace in `{path}`")]
    Invalid {
        /// The path to the trace file.
        path: Utf8PathBuf,
        /// The violated invariant.
        #[source]
        error: TraceValidationError,
    },
}

impl TraceReadError {
    /// Returns the path of the trace file that failed to load.
    pub fn path(&self) -> &Utf8Path {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } | Self::Invalid { path, .. } => path,
        }
    }
}
