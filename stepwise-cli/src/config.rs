// Copyright (c) The stepwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for `stepwise`, read from `.config/stepwise.toml` and layered over the embedded
//! defaults.

use crate::errors::{ConfigParseError, ConfigParseErrorKind};
use camino::{Utf8Path, Utf8PathBuf};
use config::{Config, ConfigBuilder, File, FileFormat, builder::DefaultState};
use serde::Deserialize;
use std::{collections::BTreeSet, io};
use stepwise_reporter::{
    style::{RenderStyle, Styles},
    write_str::WriteStr,
};

/// Receives warnings produced while reading configuration.
pub(crate) trait ConfigWarnings {
    /// Called with the keys in `config_file` that aren't part of the schema.
    fn unknown_config_keys(&mut self, config_file: &Utf8Path, unknown: &BTreeSet<String>);
}

/// Logs configuration warnings through `tracing`.
#[derive(Debug, Default)]
pub(crate) struct DefaultConfigWarnings;

impl ConfigWarnings for DefaultConfigWarnings {
    fn unknown_config_keys(&mut self, config_file: &Utf8Path, unknown: &BTreeSet<String>) {
        let mut unknown_str = String::new();
        if unknown.len() == 1 {
            // Print this on the same line.
            unknown_str.push_str("key: ");
            unknown_str.extend(unknown.iter().map(String::as_str));
        } else {
            unknown_str.push_str("keys:\n");
            for ignored_key in unknown {
                unknown_str.push_str("\n  - ");
                unknown_str.push_str(ignored_key);
            }
        }

        tracing::warn!("in config file {config_file}, ignoring unknown configuration {unknown_str}");
    }
}

/// A style slot that can be overridden in configuration.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum StyleSlot {
    Pass,
    Fail,
    Comment,
    FailureHighlight,
    Header,
}

impl StyleSlot {
    pub(crate) const ALL: [Self; 5] = [
        Self::Pass,
        Self::Fail,
        Self::Comment,
        Self::FailureHighlight,
        Self::Header,
    ];

    /// The name of the slot's `[styles.<name>]` table.
    pub(crate) fn name(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
            Self::Comment => "comment",
            Self::FailureHighlight => "failure-highlight",
            Self::Header => "header",
        }
    }

    fn get(self, styles: &Styles) -> RenderStyle {
        match self {
            Self::Pass => styles.pass,
            Self::Fail => styles.fail,
            Self::Comment => styles.comment,
            Self::FailureHighlight => styles.failure_highlight,
            Self::Header => styles.header,
        }
    }

    fn get_mut(self, styles: &mut Styles) -> &mut RenderStyle {
        match self {
            Self::Pass => &mut styles.pass,
            Self::Fail => &mut styles.fail,
            Self::Comment => &mut styles.comment,
            Self::FailureHighlight => &mut styles.failure_highlight,
            Self::Header => &mut styles.header,
        }
    }
}

/// Resolved `stepwise` configuration.
#[derive(Clone, Debug)]
pub(crate) struct StepwiseConfig {
    config_file: Utf8PathBuf,
    inner: StepwiseConfigDeserialize,
}

impl StepwiseConfig {
    /// The default location of the config file, relative to the project root.
    pub(crate) const CONFIG_PATH: &'static str = ".config/stepwise.toml";

    /// Contents of the default config, embedded in the binary.
    pub(crate) const DEFAULT_CONFIG: &'static str = include_str!("../default-config.toml");

    /// Reads configuration for `project_root`.
    ///
    /// If `file` is given it must exist. Otherwise `.config/stepwise.toml` under the project root
    /// is read if present.
    pub(crate) fn from_sources(
        project_root: &Utf8Path,
        file: Option<&Utf8Path>,
        warnings: &mut impl ConfigWarnings,
    ) -> Result<Self, ConfigParseError> {
        let (config_file, source) = match file {
            Some(file) => (file.to_owned(), File::new(file.as_str(), FileFormat::Toml)),
            None => {
                let config_file = project_root.join(Self::CONFIG_PATH);
                let source = File::new(config_file.as_str(), FileFormat::Toml).required(false);
                (config_file, source)
            }
        };

        let builder = Self::make_default_config().add_source(source);
        let (inner, unknown) = Self::build_and_deserialize_config(&builder)
            .map_err(|kind| ConfigParseError::new(&config_file, kind))?;

        if !unknown.is_empty() {
            warnings.unknown_config_keys(&config_file, &unknown);
        }

        tracing::debug!(%config_file, summaries = inner.report.summaries, "loaded config");
        Ok(Self { config_file, inner })
    }

    /// Returns the default config.
    #[cfg(test)]
    pub(crate) fn default_config() -> Self {
        let (inner, unknown) = Self::build_and_deserialize_config(&Self::make_default_config())
            .expect("default config is always valid");
        assert!(
            unknown.is_empty(),
            "found unknown keys in default config: {unknown:?}"
        );
        Self {
            config_file: Utf8PathBuf::from(Self::CONFIG_PATH),
            inner,
        }
    }

    /// The config file that was read, or would have been read if it existed.
    pub(crate) fn config_file(&self) -> &Utf8Path {
        &self.config_file
    }

    /// Whether failed assertions are followed by a failure summary.
    pub(crate) fn summaries(&self) -> bool {
        self.inner.report.summaries
    }

    /// Applies configured style overrides to `styles`.
    ///
    /// Overrides only apply to colorized styles: plain output stays plain.
    pub(crate) fn apply_styles(&self, styles: &mut Styles) {
        if !styles.is_colorized {
            return;
        }
        for slot in StyleSlot::ALL {
            if let Some(style) = self.inner.styles.get(slot) {
                *slot.get_mut(styles) = style.to_render_style();
            }
        }
    }

    /// Returns the colorized styles with overrides applied.
    pub(crate) fn resolved_styles(&self) -> Styles {
        let mut styles = Styles::colorized();
        self.apply_styles(&mut styles);
        styles
    }

    /// Writes the resolved configuration as TOML.
    pub(crate) fn write_resolved(&self, writer: &mut dyn WriteStr) -> io::Result<()> {
        writeln!(writer, "# config file: {}", self.config_file())?;
        writeln!(writer, "[report]")?;
        writeln!(writer, "summaries = {}", self.summaries())?;

        let styles = self.resolved_styles();
        for slot in StyleSlot::ALL {
            let style = slot.get(&styles);
            writeln!(writer)?;
            writeln!(writer, "[styles.{}]", slot.name())?;
            if let Some(fg) = style.fg {
                writeln!(writer, "fg = \"{}\"", fg.name())?;
            }
            if let Some(bg) = style.bg {
                writeln!(writer, "bg = \"{}\"", bg.name())?;
            }
            if style.bold {
                writeln!(writer, "decorations = [\"bold\"]")?;
            }
        }
        Ok(())
    }

    fn make_default_config() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(Self::DEFAULT_CONFIG, FileFormat::Toml))
    }

    /// This returns a tuple of (config, ignored paths).
    fn build_and_deserialize_config(
        builder: &ConfigBuilder<DefaultState>,
    ) -> Result<(StepwiseConfigDeserialize, BTreeSet<String>), ConfigParseErrorKind> {
        let config = builder
            .build_cloned()
            .map_err(|error| ConfigParseErrorKind::BuildError(Box::new(error)))?;

        let mut ignored = BTreeSet::new();
        let config: StepwiseConfigDeserialize =
            serde_ignored::deserialize(config, |path: serde_ignored::Path| {
                ignored.insert(path.to_string());
            })
            .map_err(|error| ConfigParseErrorKind::DeserializeError(Box::new(error)))?;

        Ok((config, ignored))
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct StepwiseConfigDeserialize {
    report: ReportConfig,
    #[serde(default)]
    styles: StylesConfig,
}

#[derive(Copy, Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct ReportConfig {
    summaries: bool,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct StylesConfig {
    pass: Option<StyleConfig>,
    fail: Option<StyleConfig>,
    comment: Option<StyleConfig>,
    failure_highlight: Option<StyleConfig>,
    header: Option<StyleConfig>,
}

impl StylesConfig {
    fn get(&self, slot: StyleSlot) -> Option<&StyleConfig> {
        match slot {
            StyleSlot::Pass => self.pass.as_ref(),
            StyleSlot::Fail => self.fail.as_ref(),
            StyleSlot::Comment => self.comment.as_ref(),
            StyleSlot::FailureHighlight => self.failure_highlight.as_ref(),
            StyleSlot::Header => self.header.as_ref(),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct StyleConfig {
    fg: Option<String>,
    bg: Option<String>,
    #[serde(default)]
    decorations: Vec<String>,
}

impl StyleConfig {
    fn to_render_style(&self) -> RenderStyle {
        RenderStyle::from_names(
            self.fg.as_deref(),
            self.bg.as_deref(),
            self.decorations.iter().map(String::as_str),
        )
    }
}
