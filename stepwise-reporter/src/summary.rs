// Copyright (c) The stepwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Failure summaries for assertions.
//!
//! When a step fails on an assertion, the report shows a short explanation of the mismatch below
//! the failed statement. Summaries are produced by a [`FailureSummary`] strategy, so callers can
//! replace the wording or turn summaries off entirely.

use crate::trace::{Comparison, Statement};

/// Produces a human-readable explanation of a failed assertion.
pub trait FailureSummary: Send + Sync {
    /// Returns a summary for `statement` failing with the given expected and actual values, or
    /// `None` if there is nothing useful to say.
    fn summarize(
        &self,
        statement: &Statement,
        expected: Option<&str>,
        actual: Option<&str>,
    ) -> Option<String>;
}

/// Never produces a summary.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoSummary;

impl FailureSummary for NoSummary {
    fn summarize(
        &self,
        _statement: &Statement,
        _expected: Option<&str>,
        _actual: Option<&str>,
    ) -> Option<String> {
        None
    }
}

/// Summarizes a failure based on the assertion's [`Comparison`].
///
/// Comparisons between two values need both of them; element checks need neither. Unknown
/// comparisons produce no summary.
#[derive(Clone, Copy, Debug, Default)]
pub struct ComparisonSummary;

impl FailureSummary for ComparisonSummary {
    fn summarize(
        &self,
        statement: &Statement,
        expected: Option<&str>,
        actual: Option<&str>,
    ) -> Option<String> {
        let comparison = statement.comparison()?;
        let summary = match comparison {
            Comparison::Is => {
                let (expected, actual) = (expected?, actual?);
                format!("expected: {expected}\n  actual: {actual}")
            }
            Comparison::IsNot => format!("expected anything but: {}", expected?),
            Comparison::Contains => {
                format!("expected {:?} to contain {:?}", actual?, expected?)
            }
            Comparison::DoesNotContain => {
                format!("expected {:?} not to contain {:?}", actual?, expected?)
            }
            Comparison::Matches => {
                format!("expected {:?} to match {}", actual?, expected?)
            }
            Comparison::DoesNotMatch => {
                format!("expected {:?} not to match {}", actual?, expected?)
            }
            Comparison::Exists => "no element matched the locator".to_owned(),
            Comparison::DoesNotExist => "an element matched the locator".to_owned(),
            Comparison::IsVisible => "the element is not visible".to_owned(),
            Comparison::IsNotVisible => "the element is visible".to_owned(),
            Comparison::Unknown => return None,
        };
        Some(summary)
    }
}
