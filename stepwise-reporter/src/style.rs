// Copyright (c) The stepwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terminal styles for report text.
//!
//! A [`RenderStyle`] is a small value object (foreground, background, bold) that is converted to an
//! [`owo_colors::Style`] only at the point of rendering. An empty style is special: text rendered
//! with it carries no escape codes at all, not even a reset.

use owo_colors::{OwoColorize, Style};
use serde::Deserialize;
use std::fmt;

/// Foreground colors in the report palette.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, Deserialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[serde(rename_all = "kebab-case")]
pub enum Color {
    Red,
    Green,
    White,
    Yellow,
    Black,
}

impl Color {
    /// Looks up a foreground color by name. Unknown names return `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "red" => Some(Self::Red),
            "green" => Some(Self::Green),
            "white" => Some(Self::White),
            "yellow" => Some(Self::Yellow),
            "black" => Some(Self::Black),
            _ => None,
        }
    }

    /// Returns the name this color is configured by.
    pub fn name(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::White => "white",
            Self::Yellow => "yellow",
            Self::Black => "black",
        }
    }
}

/// Background colors in the report palette.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, Deserialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[serde(rename_all = "kebab-case")]
pub enum BgColor {
    Red,
    Black,
}

impl BgColor {
    /// Looks up a background color by name. Unknown names return `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "red" => Some(Self::Red),
            "black" => Some(Self::Black),
            _ => None,
        }
    }

    /// Returns the name this color is configured by.
    pub fn name(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Black => "black",
        }
    }
}

/// A terminal style: optional colors plus decorations.
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct RenderStyle {
    /// The foreground color.
    pub fg: Option<Color>,
    /// The background color.
    pub bg: Option<BgColor>,
    /// Whether the text is bold.
    pub bold: bool,
}

impl RenderStyle {
    /// Returns the empty style.
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            bold: false,
        }
    }

    /// Sets the foreground color.
    pub const fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    /// Sets the background color.
    pub const fn bg(mut self, color: BgColor) -> Self {
        self.bg = Some(color);
        self
    }

    /// Makes the text bold.
    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Builds a style out of color and decoration names.
    ///
    /// Names that aren't part of the palette are ignored, leaving that attribute unstyled.
    pub fn from_names<'a>(
        fg: Option<&str>,
        bg: Option<&str>,
        decorations: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let mut style = Self::new();
        if let Some(name) = fg {
            match Color::from_name(name) {
                Some(color) => style.fg = Some(color),
                None => tracing::debug!("ignoring unknown foreground color `{name}`"),
            }
        }
        if let Some(name) = bg {
            match BgColor::from_name(name) {
                Some(color) => style.bg = Some(color),
                None => tracing::debug!("ignoring unknown background color `{name}`"),
            }
        }
        for name in decorations {
            match name {
                "bold" => style.bold = true,
                other => tracing::debug!("ignoring unknown decoration `{other}`"),
            }
        }
        style
    }

    /// Returns true if this style doesn't change how text looks.
    pub const fn is_plain(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && !self.bold
    }

    /// Converts this style to the equivalent `owo-colors` style.
    pub fn to_owo(self) -> Style {
        let mut style = Style::new();
        style = match self.fg {
            Some(Color::Red) => style.red(),
            Some(Color::Green) => style.green(),
            Some(Color::White) => style.white(),
            Some(Color::Yellow) => style.yellow(),
            Some(Color::Black) => style.black(),
            None => style,
        };
        style = match self.bg {
            Some(BgColor::Red) => style.on_red(),
            Some(BgColor::Black) => style.on_black(),
            None => style,
        };
        if self.bold {
            style = style.bold();
        }
        style
    }
}

/// Text paired with the style it is displayed in.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct StyledText<'a> {
    content: &'a str,
    style: RenderStyle,
}

impl<'a> StyledText<'a> {
    /// Creates a new `StyledText`.
    pub const fn new(content: &'a str, style: RenderStyle) -> Self {
        Self { content, style }
    }

    /// Returns the unstyled content.
    pub const fn content(&self) -> &'a str {
        self.content
    }

    /// Returns the style.
    pub const fn style(&self) -> RenderStyle {
        self.style
    }
}

impl fmt::Display for StyledText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never wrap empty text in escape codes, and never emit a reset for a plain style.
        if self.content.is_empty() || self.style.is_plain() {
            f.write_str(self.content)
        } else {
            write!(f, "{}", self.content.style(self.style.to_owo()))
        }
    }
}

/// Renders `content` in `style`.
pub fn styled(content: &str, style: RenderStyle) -> String {
    StyledText::new(content, style).to_string()
}

/// The styles used for each part of a report.
///
/// The default value is entirely unstyled; call [`Styles::colorize`] to switch to the terminal
/// palette.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Styles {
    /// True if [`Styles::colorize`] has been called.
    pub is_colorized: bool,
    /// Passing status icons.
    pub pass: RenderStyle,
    /// Failing status icons.
    pub fail: RenderStyle,
    /// Values, annotations and provenance labels.
    pub comment: RenderStyle,
    /// The source text of a failed statement.
    pub failure_highlight: RenderStyle,
    /// Test headers, applied during post-processing.
    pub header: RenderStyle,
}

impl Styles {
    /// Style of passing status icons.
    pub const PASS: RenderStyle = RenderStyle::new().fg(Color::Green);
    /// Style of failing status icons.
    pub const FAIL: RenderStyle = RenderStyle::new().fg(Color::Red);
    /// Style of comments.
    pub const COMMENT: RenderStyle = RenderStyle::new().fg(Color::Yellow);
    /// Style of failed statement sources.
    pub const FAILURE_HIGHLIGHT: RenderStyle =
        RenderStyle::new().fg(Color::White).bg(BgColor::Red);
    /// Style of test headers.
    pub const HEADER: RenderStyle = RenderStyle::new().bold();

    /// Returns colorized styles.
    pub fn colorized() -> Self {
        let mut styles = Self::default();
        styles.colorize();
        styles
    }

    /// Switches every slot to the terminal palette.
    pub fn colorize(&mut self) {
        self.is_colorized = true;
        self.pass = Self::PASS;
        self.fail = Self::FAIL;
        self.comment = Self::COMMENT;
        self.failure_highlight = Self::FAILURE_HIGHLIGHT;
        self.header = Self::HEADER;
    }
}
