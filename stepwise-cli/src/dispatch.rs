// Copyright (c) The stepwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    config::{DefaultConfigWarnings, StepwiseConfig},
    errors::{ExpectedError, Result},
    exit_codes::StepwiseExitCode,
    output::{OutputContext, OutputOpts, OutputWriter},
};
use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use clap::{Args, Parser, Subcommand};
use std::io::Write;
use stepwise_reporter::{
    reporter::ReporterBuilder,
    trace::{StepStatus, TraceReport},
    write_str::WriteStr,
};

/// Renders executed test traces into step reports.
#[derive(Debug, Parser)]
#[command(
    version,
    name = "stepwise",
    styles = crate::output::clap_styles::style(),
    max_term_width = 100
)]
pub struct StepwiseApp {
    #[clap(flatten)]
    output: OutputOpts,

    #[clap(subcommand)]
    command: Command,
}

impl StepwiseApp {
    /// Initializes the output context.
    pub fn init_output(&self) -> OutputContext {
        self.output.init()
    }

    /// Executes the app.
    pub fn exec(self, output: OutputContext, output_writer: &mut OutputWriter) -> Result<i32> {
        match self.command {
            Command::Render(opts) => opts.exec(output, output_writer),
            Command::ShowConfig { config_opts } => {
                let project_root = config_opts.project_root()?;
                let config = config_opts.make_config(&project_root)?;

                let mut writer = output_writer.stdout_writer();
                config
                    .write_resolved(&mut writer)
                    .and_then(|()| writer.flush())
                    .map_err(|err| ExpectedError::WriteOutputError { err })?;
                Ok(StepwiseExitCode::OK)
            }
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render trace files as step reports
    ///
    /// Each trace is a JSON file describing one executed test. Reports are written to stdout, one
    /// after the other. The exit code is 100 if any step failed.
    Render(RenderOpts),

    /// Show the configuration that `render` would use
    ShowConfig {
        #[clap(flatten)]
        config_opts: ConfigOpts,
    },
}

#[derive(Debug, Args)]
struct ConfigOpts {
    /// Directory that test paths are shown relative to [default: current directory]
    #[arg(long, value_name = "DIR")]
    project_root: Option<Utf8PathBuf>,

    /// Config file [default: project-root/.config/stepwise.toml]
    #[arg(long = "config", value_name = "PATH")]
    config_file: Option<Utf8PathBuf>,
}

impl ConfigOpts {
    /// Returns the project root as an absolute path.
    ///
    /// A relative `--project-root` is resolved against the current directory.
    fn project_root(&self) -> Result<Utf8PathBuf> {
        match &self.project_root {
            Some(project_root) if project_root.is_absolute() => Ok(project_root.clone()),
            Some(project_root) => Ok(resolve_relative(current_dir()?, project_root)),
            None => current_dir(),
        }
    }

    fn make_config(&self, project_root: &Utf8Path) -> Result<StepwiseConfig> {
        let config = StepwiseConfig::from_sources(
            project_root,
            self.config_file.as_deref(),
            &mut DefaultConfigWarnings,
        )?;
        Ok(config)
    }
}

fn current_dir() -> Result<Utf8PathBuf> {
    let current_dir =
        std::env::current_dir().map_err(|err| ExpectedError::CurrentDirFailed { err })?;
    Utf8PathBuf::try_from(current_dir).map_err(|err| ExpectedError::CurrentDirInvalidUtf8 { err })
}

/// Joins `path` onto `base`, dropping `.` components and applying `..` lexically.
fn resolve_relative(mut base: Utf8PathBuf, path: &Utf8Path) -> Utf8PathBuf {
    for component in path.components() {
        match component {
            Utf8Component::CurDir => {}
            Utf8Component::ParentDir => {
                base.pop();
            }
            other => base.push(other),
        }
    }
    base
}

#[derive(Debug, Args)]
struct RenderOpts {
    /// Trace files to render
    #[arg(value_name = "TRACE_FILE", required = true)]
    trace_files: Vec<Utf8PathBuf>,

    #[clap(flatten)]
    config_opts: ConfigOpts,

    /// Don't explain failed assertions below the failed statement
    #[arg(long)]
    no_summary: bool,
}

impl RenderOpts {
    fn exec(self, output: OutputContext, output_writer: &mut OutputWriter) -> Result<i32> {
        let project_root = self.config_opts.project_root()?;
        let config = self.config_opts.make_config(&project_root)?;

        let mut styles = output.report_styles();
        config.apply_styles(&mut styles);

        // Load everything up front so that a bad trace doesn't leave a partial report behind.
        let reports = self
            .trace_files
            .into_iter()
            .map(TraceReport::from_path)
            .collect::<Result<Vec<_>, _>>()?;

        let reporter = ReporterBuilder::new(project_root)
            .set_styles(styles)
            .set_summaries(config.summaries() && !self.no_summary)
            .build();
        tracing::debug!(?reporter, "rendering {} traces", reports.len());

        let mut writer = output_writer.stdout_writer();
        let mut write_reports = || -> std::io::Result<()> {
            for (ind, report) in reports.iter().enumerate() {
                if ind > 0 {
                    writer.write_str("\n")?;
                }
                let text = reporter.finish(&reporter.render_report(report));
                writer.write_str(&text)?;
            }
            writer.flush()
        };
        write_reports().map_err(|err| ExpectedError::WriteOutputError { err })?;

        let failed_steps = reports
            .iter()
            .flat_map(|report| &report.steps)
            .filter(|step| step.status == StepStatus::Failed)
            .count();
        if failed_steps > 0 {
            Err(ExpectedError::StepsFailed { failed_steps })
        } else {
            Ok(StepwiseExitCode::OK)
        }
    }
}
