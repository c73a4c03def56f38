// Copyright (c) The stepwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The executed-test trace consumed by the renderers.
//!
//! Everything in this module is produced upstream, by whatever executed the test, and is
//! read-only here. All types deserialize from the JSON trace format read by the `stepwise` CLI.

use crate::errors::{TraceReadError, TraceValidationError};
use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One executed instruction.
///
/// A statement is either authored directly ([`Statement::Plain`]) or wraps the statement it came
/// from ([`Statement::Encapsulating`]). Wrappers own their inner statement, so a provenance chain
/// is a finite singly linked list that always ends at a plain statement.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Statement {
    /// A statement as written in the test source.
    Plain(PlainStatement),
    /// A statement produced from another one.
    Encapsulating(EncapsulatingStatement),
}

/// A statement as written in the test source.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlainStatement {
    /// The literal source text, e.g. `click $".button"`.
    pub source: String,
    /// What the statement does.
    #[serde(default)]
    pub kind: StatementKind,
}

/// A statement produced from another one.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct EncapsulatingStatement {
    /// The literal source text of this statement.
    pub source: String,
    /// What this statement does.
    #[serde(default)]
    pub kind: StatementKind,
    /// How this statement relates to `inner`.
    pub relation: Relation,
    /// The statement this one was produced from.
    pub inner: Box<Statement>,
}

/// Whether a statement performs an action or checks something.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatementKind {
    /// Interacts with the subject under test.
    #[default]
    Action,
    /// Checks the subject under test.
    Assertion(Comparison),
}

/// The comparison an assertion performs.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Comparison {
    /// `a is b`
    Is,
    /// `a is not b`
    IsNot,
    /// `a contains b`
    Contains,
    /// `a does not contain b`
    DoesNotContain,
    /// `a matches /b/`
    Matches,
    /// `a does not match /b/`
    DoesNotMatch,
    /// `$"locator" exists`
    Exists,
    /// `$"locator" does not exist`
    DoesNotExist,
    /// `$"locator" is visible`
    IsVisible,
    /// `$"locator" is not visible`
    IsNotVisible,
    /// A comparison this version doesn't know about.
    #[serde(other)]
    Unknown,
}

/// How an encapsulating statement relates to the statement it wraps.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Relation {
    /// A placeholder in the inner statement was substituted with a concrete value.
    Resolved,
    /// The statement was synthesized from the inner statement, e.g. an implicit existence check
    /// before an interaction.
    Derived,
}

impl Relation {
    /// The label shown in front of the inner statement.
    pub fn label(self) -> &'static str {
        match self {
            Self::Resolved => "resolved from",
            Self::Derived => "derived from",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Statement {
    /// Creates a plain action statement.
    pub fn action(source: impl Into<String>) -> Self {
        Self::Plain(PlainStatement {
            source: source.into(),
            kind: StatementKind::Action,
        })
    }

    /// Creates a plain assertion statement.
    pub fn assertion(source: impl Into<String>, comparison: Comparison) -> Self {
        Self::Plain(PlainStatement {
            source: source.into(),
            kind: StatementKind::Assertion(comparison),
        })
    }

    /// Wraps `self` in a statement that was resolved from it.
    pub fn resolve(self, source: impl Into<String>) -> Self {
        let kind = self.kind();
        self.encapsulate(source, kind, Relation::Resolved)
    }

    /// Wraps `self` in a statement that was derived from it.
    pub fn derive(self, source: impl Into<String>, kind: StatementKind) -> Self {
        self.encapsulate(source, kind, Relation::Derived)
    }

    fn encapsulate(self, source: impl Into<String>, kind: StatementKind, relation: Relation) -> Self {
        Self::Encapsulating(EncapsulatingStatement {
            source: source.into(),
            kind,
            relation,
            inner: Box::new(self),
        })
    }

    /// The literal source text of this statement.
    pub fn source(&self) -> &str {
        match self {
            Self::Plain(plain) => &plain.source,
            Self::Encapsulating(wrapper) => &wrapper.source,
        }
    }

    /// What this statement does.
    pub fn kind(&self) -> StatementKind {
        match self {
            Self::Plain(plain) => plain.kind,
            Self::Encapsulating(wrapper) => wrapper.kind,
        }
    }

    /// Returns the comparison if this statement is an assertion.
    pub fn comparison(&self) -> Option<Comparison> {
        match self.kind() {
            StatementKind::Action => None,
            StatementKind::Assertion(comparison) => Some(comparison),
        }
    }

    /// Returns true if this statement is an assertion.
    pub fn is_assertion(&self) -> bool {
        self.comparison().is_some()
    }

    /// Iterates over the provenance chain, starting with the immediately wrapped statement.
    pub fn provenance(&self) -> Provenance<'_> {
        Provenance { current: self }
    }

    /// The plain statement at the end of the provenance chain.
    pub fn origin(&self) -> &Statement {
        self.provenance().last().map_or(self, |link| link.inner)
    }
}

/// One link in a provenance chain.
#[derive(Clone, Copy, Debug)]
pub struct ProvenanceLink<'a> {
    /// How the outer statement relates to `inner`.
    pub relation: Relation,
    /// The wrapped statement.
    pub inner: &'a Statement,
}

/// Iterator over a statement's provenance chain, returned by [`Statement::provenance`].
#[derive(Clone, Debug)]
pub struct Provenance<'a> {
    current: &'a Statement,
}

impl<'a> Iterator for Provenance<'a> {
    type Item = ProvenanceLink<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.current {
            Statement::Plain(_) => None,
            Statement::Encapsulating(wrapper) => {
                self.current = &wrapper.inner;
                Some(ProvenanceLink {
                    relation: wrapper.relation,
                    inner: &wrapper.inner,
                })
            }
        }
    }
}

/// A statement together with whether it passed.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct StatementLine {
    /// The executed statement.
    pub statement: Statement,
    /// True if the statement passed.
    pub passed: bool,
}

impl StatementLine {
    /// A statement that passed.
    pub fn passed(statement: Statement) -> Self {
        Self {
            statement,
            passed: true,
        }
    }

    /// A statement that failed.
    pub fn failed(statement: Statement) -> Self {
        Self {
            statement,
            passed: false,
        }
    }
}

/// The values bound for one iteration of a data-driven step.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct DataSet {
    /// Position of this data set among the step's iterations.
    #[serde(default)]
    pub index: usize,
    /// Display name, if the data set was named.
    #[serde(default)]
    pub name: Option<String>,
    /// Bound values, in declaration order.
    #[serde(default)]
    pub values: IndexMap<String, String>,
}

impl DataSet {
    /// Returns the name, or the index if the data set is unnamed.
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self.index.to_string(),
        }
    }
}

/// The overall outcome of a step.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepStatus {
    /// Every statement passed.
    Passed,
    /// A statement failed.
    Failed,
    /// A status this version doesn't know about.
    #[serde(other)]
    Unknown,
}

/// One named phase of a test, as it finished executing.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// The step's name.
    pub name: String,
    /// The step's outcome.
    pub status: StepStatus,
    /// The data set this iteration ran with, for data-driven steps.
    #[serde(default)]
    pub current_data_set: Option<DataSet>,
    /// Statements that completed, in execution order. All of them passed.
    #[serde(default)]
    pub completed_statement_lines: Vec<StatementLine>,
    /// The statement that halted the step.
    #[serde(default)]
    pub failed_statement_line: Option<StatementLine>,
    /// The expected value of the failed assertion, if any.
    #[serde(default)]
    pub expected: Option<String>,
    /// The value actually examined by the failed assertion, if any.
    #[serde(default)]
    pub actual: Option<String>,
    /// The error that terminated the step, if any.
    #[serde(default)]
    pub last_exception: Option<TerminalException>,
}

impl Step {
    /// Checks the invariants that renderers rely on.
    ///
    /// A failed step has exactly one failed statement line, a passed step has none, and completed
    /// lines never failed. Steps with an unknown status only have their completed lines checked.
    pub fn validate(&self) -> Result<(), TraceValidationError> {
        if let Some(index) = self.completed_statement_lines.iter().position(|l| !l.passed) {
            return Err(TraceValidationError::FailedCompletedStatement {
                step: self.name.clone(),
                index,
            });
        }

        match (self.status, &self.failed_statement_line) {
            (StepStatus::Failed, None) => Err(TraceValidationError::MissingFailedStatement {
                step: self.name.clone(),
            }),
            (StepStatus::Passed, Some(_)) => {
                Err(TraceValidationError::UnexpectedFailedStatement {
                    step: self.name.clone(),
                })
            }
            (_, Some(line)) if line.passed => {
                Err(TraceValidationError::FailedStatementPassed {
                    step: self.name.clone(),
                })
            }
            _ => Ok(()),
        }
    }
}

/// The kind of an element locator.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LocatorKind {
    /// A CSS selector.
    Css,
    /// An XPath expression.
    #[serde(rename = "xpath")]
    XPath,
}

impl LocatorKind {
    /// Human-readable name of this kind of locator.
    pub fn description(self) -> &'static str {
        match self {
            Self::Css => "CSS selector",
            Self::XPath => "XPath expression",
        }
    }
}

/// The error that terminated a step.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum TerminalException {
    /// An element locator couldn't be parsed.
    InvalidLocator {
        /// The locator as written.
        locator: String,
        /// Whether the locator is a CSS selector or an XPath expression.
        locator_kind: LocatorKind,
    },
    /// Any other error.
    Unknown {
        /// The error's category, e.g. `TimeoutError`.
        category: String,
        /// The error message.
        message: String,
    },
}

/// A test, identified by its source path.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    /// The test's name.
    pub name: String,
    /// Absolute path to the test's source file.
    pub path: Utf8PathBuf,
}

impl TestCase {
    /// Returns the test's path relative to `project_root`.
    ///
    /// Falls back to the path as given if no relative path can be computed.
    pub fn relative_path(&self, project_root: &Utf8Path) -> Utf8PathBuf {
        pathdiff::diff_utf8_paths(&self.path, project_root).unwrap_or_else(|| self.path.clone())
    }
}

/// A test together with the steps it executed.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TraceReport {
    /// The executed test.
    pub test: TestCase,
    /// Steps in execution order.
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl TraceReport {
    /// Reads and validates a JSON trace file.
    pub fn from_path(path: impl Into<Utf8PathBuf>) -> Result<Self, TraceReadError> {
        let path = path.into();
        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(error) => return Err(TraceReadError::Read { path, error }),
        };
        Self::from_json_str(&contents, path)
    }

    /// Parses and validates a JSON trace. `path` is only used for error reporting.
    pub fn from_json_str(json: &str, path: impl Into<Utf8PathBuf>) -> Result<Self, TraceReadError> {
        let path = path.into();
        let report: Self = match serde_json::from_str(json) {
            Ok(report) => report,
            Err(error) => return Err(TraceReadError::Parse { path, error }),
        };
        if let Err(error) = report.validate() {
            return Err(TraceReadError::Invalid { path, error });
        }
        tracing::debug!(%path, steps = report.steps.len(), "loaded trace");
        Ok(report)
    }

    /// Validates every step in the report.
    pub fn validate(&self) -> Result<(), TraceValidationError> {
        self.steps.iter().try_for_each(Step::validate)
    }

    /// Returns true if any step failed.
    pub fn has_failures(&self) -> bool {
        self.steps.iter().any(|step| step.status == StepStatus::Failed)
    }
}
