// Copyright (c) The stepwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rendering of whole trace reports.

use crate::{
    node::Node,
    post_process::post_process,
    render::{render_test_header, step_node},
    style::Styles,
    summary::{ComparisonSummary, FailureSummary},
    trace::{Step, TestCase, TraceReport},
};
use camino::{Utf8Path, Utf8PathBuf};

/// Builder for a [`Reporter`].
#[derive(Debug)]
pub struct ReporterBuilder {
    project_root: Utf8PathBuf,
    styles: Styles,
    summaries: bool,
}

impl ReporterBuilder {
    /// Creates a builder for reports of tests under `project_root`.
    pub fn new(project_root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            styles: Styles::default(),
            summaries: true,
        }
    }

    /// Sets the styles to render with.
    pub fn set_styles(&mut self, styles: Styles) -> &mut Self {
        self.styles = styles;
        self
    }

    /// Sets whether failed assertions are followed by a failure summary.
    pub fn set_summaries(&mut self, summaries: bool) -> &mut Self {
        self.summaries = summaries;
        self
    }

    /// Builds a reporter that uses [`ComparisonSummary`] for failure summaries.
    pub fn build(&self) -> Reporter {
        self.build_with_summary(ComparisonSummary)
    }

    /// Builds a reporter with a custom failure summary strategy.
    pub fn build_with_summary(&self, summary: impl FailureSummary + 'static) -> Reporter {
        let summary: Option<Box<dyn FailureSummary>> = if self.summaries {
            Some(Box::new(summary))
        } else {
            None
        };
        Reporter {
            project_root: self.project_root.clone(),
            styles: self.styles.clone(),
            summary,
        }
    }
}

/// Renders trace reports.
pub struct Reporter {
    project_root: Utf8PathBuf,
    styles: Styles,
    summary: Option<Box<dyn FailureSummary>>,
}

impl std::fmt::Debug for Reporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reporter")
            .field("project_root", &self.project_root)
            .field("styles", &self.styles)
            .field("summaries", &self.summary.is_some())
            .finish()
    }
}

impl Reporter {
    /// The project root that test paths are shown relative to.
    pub fn project_root(&self) -> &Utf8Path {
        &self.project_root
    }

    /// The styles used by this reporter.
    pub fn styles(&self) -> &Styles {
        &self.styles
    }

    /// Renders the header line for a test, with sentinels left in place.
    pub fn render_header(&self, test: &TestCase) -> String {
        render_test_header(test, &self.project_root)
    }

    /// Renders a single step.
    pub fn render_step(&self, step: &Step) -> String {
        step_node(step, self.summary()).render(&self.styles)
    }

    /// Renders a whole report: the test header, then each step, separated by blank lines. The
    /// output ends with a newline.
    ///
    /// Header sentinels are left in place; see [`Reporter::finish`].
    pub fn render_report(&self, report: &TraceReport) -> String {
        tracing::debug!(
            test = %report.test.name,
            steps = report.steps.len(),
            "rendering trace report",
        );

        let mut children = vec![Some(Node::literal(self.render_header(&report.test)))];
        for step in &report.steps {
            children.push(Some(Node::blank()));
            children.push(Some(step_node(step, self.summary())));
        }
        children.push(Some(Node::blank()));
        Node::Sequence(children).render(&self.styles)
    }

    /// Applies terminal post-processing to rendered text.
    pub fn finish(&self, text: &str) -> String {
        post_process(text, &self.styles)
    }

    fn summary(&self) -> &dyn FailureSummary {
        match &self.summary {
            Some(summary) => summary.as_ref(),
            None => &crate::summary::NoSummary,
        }
    }
}
