// Copyright (c) The stepwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-processing of rendered reports for the terminal.
//!
//! Renderers mark test headers with sentinels rather than styling them directly. This pass turns
//! every line that is fully bracketed by the sentinels into the header style, and leaves all other
//! lines alone.

use crate::{
    render::{HEADER_END, HEADER_START},
    style::{StyledText, Styles},
};
use swrite::{SWrite, swrite};

/// Rewrites header sentinel lines in `text` into `styles.header`.
///
/// Line breaks, including a trailing one, are preserved.
pub fn post_process(text: &str, styles: &Styles) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        let (body, line_break) = match line.strip_suffix('\n') {
            Some(body) => (body, "\n"),
            None => (line, ""),
        };

        match header_text(body) {
            Some(header) => swrite!(out, "{}", StyledText::new(header, styles.header)),
            None => out.push_str(body),
        }
        out.push_str(line_break);
    }
    out
}

fn header_text(line: &str) -> Option<&str> {
    line.strip_prefix(HEADER_START)?.strip_suffix(HEADER_END)
}
