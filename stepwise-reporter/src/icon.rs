// Copyright (c) The stepwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Status icons.

use crate::{
    style::{RenderStyle, StyledText, Styles},
    trace::StepStatus,
};

/// The status an icon stands for.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum IconStatus {
    /// Passed.
    Pass,
    /// Failed.
    Fail,
    /// Anything else. Rendered with a neutral glyph and no style.
    Unknown,
}

impl IconStatus {
    /// The glyph for this status.
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Pass => "✔",
            Self::Fail => "✖",
            Self::Unknown => "?",
        }
    }

    fn style(self, styles: &Styles) -> RenderStyle {
        match self {
            Self::Pass => styles.pass,
            Self::Fail => styles.fail,
            Self::Unknown => RenderStyle::new(),
        }
    }
}

impl From<bool> for IconStatus {
    fn from(passed: bool) -> Self {
        if passed { Self::Pass } else { Self::Fail }
    }
}

impl From<StepStatus> for IconStatus {
    fn from(status: StepStatus) -> Self {
        match status {
            StepStatus::Passed => Self::Pass,
            StepStatus::Failed => Self::Fail,
            StepStatus::Unknown => Self::Unknown,
        }
    }
}

/// Returns the styled icon for `status`.
pub fn status_icon(status: impl Into<IconStatus>, styles: &Styles) -> StyledText<'static> {
    let status = status.into();
    StyledText::new(status.glyph(), status.style(styles))
}
