use terminal_size::{terminal_size, Width};

use crate::matcher::{Expected, Grammar};
use crate::parser::columns::ColumnRenderer;
use crate::parser::UserInterface;
use crate::prelude::Descriptor;

// Used when no terminal is attached.
const DEFAULT_TOTAL_WIDTH: usize = 80;
const MAIN_INDENT: usize = 1;

pub(crate) struct Printer<'g> {
    grammar: &'g Grammar,
    terminal_width: Option<usize>,
}

impl<'g> Printer<'g> {
    pub(crate) fn terminal(grammar: &'g Grammar) -> Self {
        let terminal_width = if let Some((Width(terminal_width), _)) = terminal_size() {
            Some(terminal_width as usize)
        } else {
            None
        };

        Self::new(grammar, terminal_width)
    }

    pub(crate) fn new(grammar: &'g Grammar, terminal_width: Option<usize>) -> Self {
        Self {
            grammar,
            terminal_width,
        }
    }

    pub(crate) fn usage(&self, program: &str) -> String {
        let syntax = self.grammar.syntax();

        if syntax.is_empty() {
            format!("usage: {program}")
        } else {
            format!("usage: {program} {syntax}")
        }
    }

    pub(crate) fn help(&self, program: &str) -> Vec<String> {
        let mut arguments = Vec::default();
        let mut options = Vec::default();
        let mut commands = Vec::default();

        for expected in self.grammar.entities() {
            let description = expected.description().unwrap_or_default();

            match expected {
                Expected::Argument(argument) => {
                    arguments.push((format!("<{}>", argument.name()), description))
                }
                Expected::Option(option) => options.push((option.full_name(), description)),
                // The nested syntax is already part of the usage line.
                Expected::Command(command) => {
                    commands.push((command.name().to_string(), description))
                }
            };
        }

        let rows = || arguments.iter().chain(options.iter()).chain(commands.iter());
        let left_column_width = rows()
            .map(|(left, _)| left.chars().count())
            .max()
            .unwrap_or_default();
        let middle_column_width = rows()
            .map(|(_, middle)| middle.chars().count())
            .max()
            .unwrap_or_default();
        let column_renderer = ColumnRenderer::guided(
            MAIN_INDENT,
            left_column_width,
            middle_column_width,
            self.terminal_width.unwrap_or(DEFAULT_TOTAL_WIDTH),
        );
        let mut lines = vec![self.usage(program)];

        for (heading, section) in [
            ("arguments:", &arguments),
            ("options:", &options),
            ("commands:", &commands),
        ] {
            if !section.is_empty() {
                lines.push(String::default());
                lines.push(heading.to_string());

                for (left, description) in section {
                    lines.extend(column_renderer.render(MAIN_INDENT, left, description));
                }
            }
        }

        lines
    }

    pub(crate) fn print_help(&self, program: &str, user_interface: &(impl UserInterface + ?Sized)) {
        for line in self.help(program) {
            user_interface.print(line);
        }
    }
}

/// Points at the token where a parse error was detected.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct ErrorContext {
    offset: usize,
    tokens: Vec<String>,
}

impl ErrorContext {
    pub(crate) fn new(offset: usize, tokens: &[&str]) -> Self {
        Self {
            offset,
            tokens: tokens.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // An offset past the last token points just after it.
        let column: usize = self
            .tokens
            .iter()
            .take(self.offset)
            .map(|token| token.chars().count() + 1)
            .sum();

        write!(f, "{}\n{:column$}^", self.tokens.join(" "), "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::{Command, KeyedOption, PlainArgument};
    use crate::parser::util::InMemoryInterface;
    use crate::parser::Parser;
    use rstest::rstest;

    fn grammar() -> Grammar {
        let mut nested = Grammar::default();
        nested
            .insert(PlainArgument::new(0, "target".to_string(), true, None).unwrap().into())
            .unwrap();
        let mut grammar = Grammar::default();
        grammar
            .insert(
                PlainArgument::new(0, "foo".to_string(), true, Some("The foo.".to_string()))
                    .unwrap()
                    .into(),
            )
            .unwrap();
        grammar
            .insert(
                KeyedOption::new(
                    1,
                    "bar".to_string(),
                    Some('b'),
                    Some("bar".to_string()),
                    false,
                    false,
                    Some("Set the bar.".to_string()),
                )
                .unwrap()
                .into(),
            )
            .unwrap();
        grammar
            .insert(
                KeyedOption::new(
                    2,
                    "extra".to_string(),
                    Some('x'),
                    Some("extra".to_string()),
                    true,
                    false,
                    Some("An extra value.".to_string()),
                )
                .unwrap()
                .into(),
            )
            .unwrap();
        grammar
            .insert(
                Command::new(
                    3,
                    "run".to_string(),
                    false,
                    Some("Run a target.".to_string()),
                    Parser::new(nested),
                )
                .unwrap()
                .into(),
            )
            .unwrap();
        grammar
    }

    #[test]
    fn print_help() {
        // Setup
        let grammar = grammar();
        let printer = Printer::new(&grammar, Some(80));
        let interface = InMemoryInterface::default();

        // Execute
        printer.print_help("program", &interface);

        // Verify
        let message = interface.consume_message();
        assert_eq!(
            message,
            r#"usage: program <foo> [-b] [-x <extra>] [run <target>]

arguments:
 <foo>                 The foo.

options:
 -b, --bar             Set the bar.
 -x, --extra <extra>   An extra value.

commands:
 run                   Run a target."#
        );
    }

    #[test]
    fn print_help_empty() {
        // Setup
        let grammar = Grammar::default();
        let printer = Printer::new(&grammar, None);
        let interface = InMemoryInterface::default();

        // Execute
        printer.print_help("program", &interface);

        // Verify
        assert_eq!(interface.consume_message(), "usage: program");
    }

    #[test]
    fn print_help_no_descriptions() {
        let mut grammar = Grammar::default();
        grammar
            .insert(PlainArgument::new(0, "foo".to_string(), false, None).unwrap().into())
            .unwrap();
        let printer = Printer::new(&grammar, Some(80));
        assert_eq!(
            printer.help("program"),
            vec!["usage: program [<foo>]", "", "arguments:", " <foo>"]
        );
    }

    #[rstest]
    #[case(0, vec![], "\n^")]
    #[case(3, vec![], "\n^")]
    #[case(0, vec!["abc"], "abc\n^")]
    #[case(1, vec!["abc"], "abc\n    ^")]
    #[case(0, vec!["abc", "123"], "abc 123\n^")]
    #[case(1, vec!["abc", "123"], "abc 123\n    ^")]
    #[case(2, vec!["abc", "123"], "abc 123\n        ^")]
    #[case(1, vec!["äö", "-x"], "äö -x\n   ^")]
    fn error_context(#[case] offset: usize, #[case] tokens: Vec<&str>, #[case] expected: &str) {
        assert_eq!(ErrorContext::new(offset, tokens.as_slice()).to_string(), expected);
    }
}
