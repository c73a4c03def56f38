// Copyright (c) The stepwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    exit_codes::StepwiseExitCode,
    output::{NO_HEADING, StderrStyles},
};
use camino::{FromPathBufError, Utf8Path, Utf8PathBuf};
use owo_colors::OwoColorize;
use std::error::Error;
use stepwise_reporter::errors::TraceReadError;
use thiserror::Error;

pub(crate) type Result<T, E = ExpectedError> = std::result::Result<T, E>;

/// An error that occurred while parsing a config file.
#[derive(Debug, Error)]
#[error("failed to parse config file `{config_file}`")]
pub struct ConfigParseError {
    config_file: Utf8PathBuf,
    #[source]
    kind: ConfigParseErrorKind,
}

impl ConfigParseError {
    pub(crate) fn new(config_file: impl Into<Utf8PathBuf>, kind: ConfigParseErrorKind) -> Self {
        Self {
            config_file: config_file.into(),
            kind,
        }
    }

    /// Returns the config file that failed to parse.
    pub fn config_file(&self) -> &Utf8Path {
        &self.config_file
    }

    /// Returns the kind of error.
    pub fn kind(&self) -> &ConfigParseErrorKind {
        &self.kind
    }
}

/// The kind of [`ConfigParseError`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigParseErrorKind {
    /// The config sources could not be read or merged.
    #[error(transparent)]
    BuildError(Box<config::ConfigError>),

    /// The merged config doesn't match the expected schema.
    #[error(transparent)]
    DeserializeError(Box<config::ConfigError>),
}

// Note that the #[error()] strings are mostly placeholder messages -- the expected way to print out
// errors is with the display_to_stderr method, which colorizes errors.

/// An expected failure of a `stepwise` invocation.
#[derive(Debug, Error)]
#[doc(hidden)]
pub enum ExpectedError {
    #[error("could not determine current directory")]
    CurrentDirFailed {
        #[source]
        err: std::io::Error,
    },
    #[error("current directory is not valid UTF-8")]
    CurrentDirInvalidUtf8 {
        #[source]
        err: FromPathBufError,
    },
    #[error("config parse error")]
    ConfigParseError {
        #[from]
        err: ConfigParseError,
    },
    #[error("trace read error")]
    TraceReadError {
        #[from]
        err: TraceReadError,
    },
    #[error("writing output failed")]
    WriteOutputError {
        #[source]
        err: std::io::Error,
    },
    #[error("steps failed")]
    StepsFailed { failed_steps: usize },
}

impl ExpectedError {
    /// Returns the exit code for the process.
    pub fn process_exit_code(&self) -> i32 {
        match self {
            Self::CurrentDirFailed { .. }
            | Self::CurrentDirInvalidUtf8 { .. }
            | Self::ConfigParseError { .. } => StepwiseExitCode::SETUP_ERROR,
            Self::TraceReadError { err } => match err {
                TraceReadError::Read { .. } => StepwiseExitCode::TRACE_READ_FAILED,
                _ => StepwiseExitCode::INVALID_TRACE,
            },
            Self::WriteOutputError { .. } => StepwiseExitCode::WRITE_OUTPUT_ERROR,
            Self::StepsFailed { .. } => StepwiseExitCode::STEPS_FAILED,
        }
    }

    /// Displays this error to stderr.
    pub fn display_to_stderr(&self, styles: &StderrStyles) {
        let mut next_error = match self {
            Self::CurrentDirFailed { err } => {
                tracing::error!("could not determine current directory");
                Some(err as &dyn Error)
            }
            Self::CurrentDirInvalidUtf8 { err } => {
                tracing::error!(
                    "current directory `{}` is not valid UTF-8 (hint: pass in --project-root)",
                    err.as_path().display().style(styles.bold),
                );
                None
            }
            Self::ConfigParseError { err } => {
                tracing::error!(
                    "failed to parse config file `{}`",
                    err.config_file().style(styles.bold)
                );
                Some(err.kind() as &dyn Error)
            }
            Self::TraceReadError { err } => {
                let path = err.path();
                let path = path.style(styles.bold);
                match err {
                    TraceReadError::Read { .. } => {
                        tracing::error!("failed to read trace file `{path}`")
                    }
                    TraceReadError::Parse { .. } => {
                        tracing::error!("trace file `{path}` is not valid JSON trace data")
                    }
                    TraceReadError::Invalid { .. } => {
                        tracing::error!("trace file `{path}` is not a valid trace")
                    }
                    _ => tracing::error!("{err}"),
                }
                err.source()
            }
            Self::WriteOutputError { err } => {
                tracing::error!("failed to write report to output");
                Some(err as &dyn Error)
            }
            Self::StepsFailed { failed_steps } => {
                let steps = if *failed_steps == 1 { "step" } else { "steps" };
                tracing::error!(
                    "{} {steps} failed",
                    failed_steps.style(styles.bold),
                );
                None
            }
        };

        while let Some(err) = next_error {
            tracing::error!(target: NO_HEADING, "\nCaused by:\n  {}", err);
            next_error = err.source();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepwise_reporter::trace::TraceReport;

    #[test]
    fn trace_errors_map_to_exit_codes() {
        let err: ExpectedError = TraceReport::from_path("/nonexistent/stepwise/trace.json")
            .expect_err("file does not exist")
            .into();
        assert_eq!(err.process_exit_code(), StepwiseExitCode::TRACE_READ_FAILED);

        let err: ExpectedError = TraceReport::from_json_str("{}", "trace.json")
            .expect_err("not a trace")
            .into();
        assert_eq!(err.process_exit_code(), StepwiseExitCode::INVALID_TRACE);
    }

    #[test]
    fn trace_errors_display_to_stderr() {
        let errors = [
            TraceReport::from_path("/nonexistent/stepwise/trace.json")
                .expect_err("file does not exist"),
            TraceReport::from_json_str("not json", "trace.json").expect_err("not JSON"),
            TraceReport::from_json_str("{}", "trace.json").expect_err("not a trace"),
        ];
        for err in errors {
            let err = ExpectedError::from(err);
            // No logger is installed, so this only checks that every variant can be displayed.
            err.display_to_stderr(&StderrStyles::default());
        }
    }

    #[test]
    fn steps_failed_exit_code() {
        let err = ExpectedError::StepsFailed { failed_steps: 2 };
        assert_eq!(err.process_exit_code(), StepwiseExitCode::STEPS_FAILED);
    }
}
