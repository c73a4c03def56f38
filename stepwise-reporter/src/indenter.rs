// Copyright (c) The stepwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Indentation of multi-line report output.
//!
//! [`Indented`] wraps a [`WriteStr`] and inserts the indentation at the start of every line as the
//! text passes through, without buffering. Blank lines are indented too. The indentation for a
//! line is only written once something follows it, so text that ends in a newline leaves a pending
//! indent that [`Indented::finish`] writes out. A writer that never sees any text writes nothing.
//!
//! Because the indentation itself is written through the wrapped writer, stacking two indenters
//! indents every line once per layer.

use crate::write_str::WriteStr;
use std::io;

/// The unit of indentation used throughout reports.
pub const INDENT_UNIT: &str = "  ";

/// A writer adapter that indents every line.
pub struct Indented<'a, D: ?Sized> {
    inner: &'a mut D,
    needs_indent: bool,
    started: bool,
    indentation: String,
}

impl<D: ?Sized> std::fmt::Debug for Indented<'_, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Indented")
            .field("needs_indent", &self.needs_indent)
            .field("started", &self.started)
            .field("indentation", &self.indentation)
            .finish_non_exhaustive()
    }
}

impl<'a, D: ?Sized> Indented<'a, D> {
    /// Indents by [`INDENT_UNIT`] repeated `depth` times.
    pub fn with_depth(self, depth: usize) -> Self {
        self.with_str(INDENT_UNIT.repeat(depth))
    }

    /// Indents by an arbitrary string.
    pub fn with_str(mut self, indentation: impl Into<String>) -> Self {
        self.indentation = indentation.into();
        self
    }

    /// Returns the inner writer.
    pub fn into_inner(self) -> &'a mut D {
        self.inner
    }
}

impl<T> Indented<'_, T>
where
    T: WriteStr + ?Sized,
{
    /// Writes the indentation for a trailing empty line, if any text was written.
    pub fn finish(&mut self) -> io::Result<()> {
        if self.started && self.needs_indent {
            self.write_indent()?;
        }
        Ok(())
    }

    fn write_indent(&mut self) -> io::Result<()> {
        if self.needs_indent {
            self.inner.write_str(&self.indentation)?;
            self.needs_indent = false;
        }
        Ok(())
    }
}

impl<T> WriteStr for Indented<'_, T>
where
    T: WriteStr + ?Sized,
{
    fn write_str(&mut self, s: &str) -> io::Result<()> {
        for (ind, line) in s.split('\n').enumerate() {
            if ind > 0 {
                self.write_indent()?;
                self.inner.write_char('\n')?;
                self.needs_indent = true;
                self.started = true;
            }

            if !line.is_empty() {
                self.write_indent()?;
                self.inner.write_str(line)?;
                self.started = true;
            }
        }

        Ok(())
    }
}

/// Creates an indenter that indents by one [`INDENT_UNIT`].
pub fn indented<D: ?Sized>(f: &mut D) -> Indented<'_, D> {
    Indented {
        inner: f,
        needs_indent: true,
        started: false,
        indentation: INDENT_UNIT.to_owned(),
    }
}
