// Copyright (c) The stepwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! String-only sinks for rendered report text.
//!
//! Report nodes are always written as UTF-8 text, and some of the writers stacked on top of each
//! other (for example the [indenter](crate::indenter)) need to see whole string slices to decide
//! where lines begin. [`std::fmt::Write`] would work for that, but it throws away the underlying
//! error, so this trait reports [`std::io::Error`] instead.

use std::{fmt, io};

/// A sink that accepts UTF-8 text.
pub trait WriteStr {
    /// Writes a string slice.
    fn write_str(&mut self, s: &str) -> io::Result<()>;

    /// Writes a single character.
    fn write_char(&mut self, c: char) -> io::Result<()> {
        self.write_str(c.encode_utf8(&mut [0; 4]))
    }

    /// Writes formatted text, so that `write!` works against any `WriteStr`.
    fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> io::Result<()> {
        // Bridges fmt::Write to WriteStr, stashing the first io::Error so it isn't lost behind
        // fmt::Error.
        struct Bridge<'a, T: ?Sized> {
            sink: &'a mut T,
            error: Option<io::Error>,
        }

        impl<T: ?Sized + WriteStr> fmt::Write for Bridge<'_, T> {
            fn write_str(&mut self, s: &str) -> fmt::Result {
                self.sink.write_str(s).map_err(|error| {
                    self.error = Some(error);
                    fmt::Error
                })
            }
        }

        let mut bridge = Bridge {
            sink: self,
            error: None,
        };
        match fmt::write(&mut bridge, args) {
            Ok(()) => Ok(()),
            Err(_) => Err(bridge
                .error
                .unwrap_or_else(|| io::Error::other("formatter error"))),
        }
    }
}

impl WriteStr for String {
    fn write_str(&mut self, s: &str) -> io::Result<()> {
        self.push_str(s);
        Ok(())
    }

    fn write_char(&mut self, c: char) -> io::Result<()> {
        self.push(c);
        Ok(())
    }
}

impl<T: WriteStr + ?Sized> WriteStr for &mut T {
    fn write_str(&mut self, s: &str) -> io::Result<()> {
        (**self).write_str(s)
    }

    fn write_char(&mut self, c: char) -> io::Result<()> {
        (**self).write_char(c)
    }

    fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> io::Result<()> {
        (**self).write_fmt(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_fmt_into_string() {
        let mut out = String::new();
        write!(out, "{} {}", "$a:", 1).unwrap();
        out.write_char('!').unwrap();
        assert_eq!(out, "$a: 1!");
    }

    #[test]
    fn write_fmt_surfaces_sink_error() {
        struct Broken;

        impl WriteStr for Broken {
            fn write_str(&mut self, _s: &str) -> io::Result<()> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }
        }

        let err = write!(Broken, "{}", "x").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
