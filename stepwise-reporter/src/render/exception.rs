// Copyright (c) The stepwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{node::Node, style::Styles, trace::TerminalException};

/// Returns a node describing the error that terminated a step.
pub fn exception_node(exception: &TerminalException) -> Node {
    match exception {
        TerminalException::InvalidLocator {
            locator,
            locator_kind,
        } => Node::Inline(vec![
            Node::literal(format!("{} ", locator_kind.description())),
            Node::comment(locator.as_str()),
            Node::literal(" is not valid"),
        ]),
        TerminalException::Unknown { category, message } => Node::sequence([
            Some(Node::literal("An unknown exception has occurred:")),
            Some(
                Node::sequence([
                    Some(Node::literal(format!("• {category}"))),
                    Some(Node::literal(format!("• {message}"))),
                ])
                .indented(1),
            ),
        ]),
    }
}

/// Renders the error that terminated a step.
pub fn render_exception(exception: &TerminalException, styles: &Styles) -> String {
    exception_node(exception).render(styles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{style::styled, trace::LocatorKind};
    use indoc::indoc;
    use test_case::test_case;

    #[test_case(LocatorKind::Css, "CSS selector"; "css")]
    #[test_case(LocatorKind::XPath, "XPath expression"; "xpath")]
    fn invalid_locator(locator_kind: LocatorKind, description: &str) {
        let exception = TerminalException::InvalidLocator {
            locator: "div[".to_owned(),
            locator_kind,
        };
        assert_eq!(
            render_exception(&exception, &Styles::default()),
            format!("{description} div[ is not valid")
        );
        assert_eq!(
            render_exception(&exception, &Styles::colorized()),
            format!("{description} {} is not valid", styled("div[", Styles::COMMENT))
        );
    }

    #[test]
    fn unknown_exception() {
        let exception = TerminalException::Unknown {
            category: "TimeoutError".to_owned(),
            message: "waited 30s for navigation".to_owned(),
        };
        assert_eq!(
            render_exception(&exception, &Styles::colorized()),
            indoc! {"
                An unknown exception has occurred:
                  • TimeoutError
                  • waited 30s for navigation"},
        );
    }

    #[test]
    fn multi_line_message_stays_indented() {
        let exception = TerminalException::Unknown {
            category: "Error".to_owned(),
            message: "first\nsecond".to_owned(),
        };
        assert_eq!(
            render_exception(&exception, &Styles::default()),
            "An unknown exception has occurred:\n  • Error\n  • first\n  second"
        );
    }
}
