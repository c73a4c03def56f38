// Copyright (c) The stepwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::trace::TestCase;
use camino::Utf8Path;

/// Marks the start of a test header line. Rewritten by [`post_process`](crate::post_process).
pub const HEADER_START: &str = "[[stepwise:header]]";

/// Marks the end of a test header line.
pub const HEADER_END: &str = "[[/stepwise:header]]";

/// Renders the header line for a test: its path relative to `project_root`, between the header
/// sentinels.
///
/// The sentinels are turned into terminal emphasis later, by
/// [`post_process`](crate::post_process::post_process).
pub fn render_test_header(test: &TestCase, project_root: &Utf8Path) -> String {
    format!(
        "{HEADER_START}{}{HEADER_END}",
        test.relative_path(project_root)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_uses_relative_path() {
        let test = TestCase {
            name: "login".to_owned(),
            path: "/repo/tests/auth/login.test".into(),
        };
        assert_eq!(
            render_test_header(&test, Utf8Path::new("/repo")),
            format!("{HEADER_START}tests/auth/login.test{HEADER_END}")
        );
    }
}
