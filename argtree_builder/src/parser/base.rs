use std::env;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use crate::matcher::*;
use crate::model::OptionKey;
use crate::parser::{ConsoleInterface, ErrorContext, Printer, UserInterface};

/// Error for an invalid grammar.
///
/// These are programmer errors: they abort program setup rather than being recovered.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A name or key which cannot be used, or one already taken within the grammar level.
    #[error("Config error: {0}")]
    InvalidArgument(String),
    /// A builder finalized before it was completely configured.
    #[error("Config error: {0}")]
    IllegalState(String),
    /// A builder operation which has no meaning for this builder.
    #[error("Config error: {0}")]
    UnsupportedOperation(String),
}

/// Error for tokens which do not satisfy the grammar.
///
/// Every variant carries the offset (the index into the tokens handed to the outermost parser) at which it was detected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// A token matches no command, no option key, and no remaining argument.
    #[error("Parse error: Unknown argument '{token}'.")]
    UnknownArgument {
        /// The offending token.
        token: String,
        /// The index of the offending token.
        offset: usize,
    },
    /// An option which expects a value is not followed by one.
    #[error("Parse error: Option '{option}' requires a value.")]
    MissingValue {
        /// The name of the option.
        option: String,
        /// The index of the option's token.
        offset: usize,
    },
    /// Mandatory entities remain unbound after the scan.
    #[error("Parse error: Missing mandatory {}.", quote_all(.names))]
    MissingArgument {
        /// The name of every unbound mandatory entity, in declaration order.
        names: Vec<String>,
        /// The end of the tokens.
        offset: usize,
    },
}

fn quote_all(names: &[String]) -> String {
    names
        .iter()
        .map(|name| format!("'{name}'"))
        .collect::<Vec<String>>()
        .join(", ")
}

impl ParseError {
    /// The token index at which the error was detected.
    pub fn offset(&self) -> usize {
        match self {
            ParseError::UnknownArgument { offset, .. }
            | ParseError::MissingValue { offset, .. }
            | ParseError::MissingArgument { offset, .. } => *offset,
        }
    }
}

/// A finalized, immutable grammar.
///
/// Cloning is cheap (the grammar is shared), and a `Parser` may be used from many threads at once.
/// Parsing has no side effects: the same tokens always produce equal [`ArgumentModel`]s.
#[derive(Clone)]
pub struct Parser {
    grammar: Arc<Grammar>,
}

impl std::fmt::Debug for Parser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field("syntax", &self.grammar.syntax())
            .finish()
    }
}

impl Parser {
    pub(crate) fn new(grammar: Grammar) -> Self {
        Self {
            grammar: Arc::new(grammar),
        }
    }

    /// Parse `tokens` (the program name excluded) against this grammar.
    pub fn parse_tokens(&self, tokens: &[&str]) -> Result<ArgumentModel, ParseError> {
        self.consume(tokens, 0)
    }

    /// Parse owned or borrowed strings, such as those collected from [`std::env::args`].
    pub fn parse_args<I, S>(&self, args: I) -> Result<ArgumentModel, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let owned: Vec<S> = args.into_iter().collect();
        let tokens: Vec<&str> = owned.iter().map(AsRef::as_ref).collect();
        self.parse_tokens(tokens.as_slice())
    }

    pub(crate) fn consume(&self, tokens: &[&str], base: usize) -> Result<ArgumentModel, ParseError> {
        TokenMatcher::new(&self.grammar).consume(tokens, base)
    }

    /// Parse the process arguments.
    ///
    /// On failure, the error is reported on stderr along with its context and the usage line, and the process exits with code 1.
    pub fn parse(&self) -> ArgumentModel {
        let mut args = env::args();
        let program = args
            .next()
            .as_deref()
            .and_then(|path| Path::new(path).file_name())
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .unwrap_or_default();
        let command_input: Vec<String> = args.collect();
        let tokens: Vec<&str> = command_input.iter().map(AsRef::as_ref).collect();

        match self.parse_with_interface(&program, tokens.as_slice(), &ConsoleInterface::default()) {
            Ok(model) => model,
            Err(exit_code) => std::process::exit(exit_code),
        }
    }

    pub(crate) fn parse_with_interface(
        &self,
        program: &str,
        tokens: &[&str],
        user_interface: &(impl UserInterface + ?Sized),
    ) -> Result<ArgumentModel, i32> {
        self.parse_tokens(tokens).map_err(|error| {
            let error_context = ErrorContext::new(error.offset(), tokens);
            user_interface.print_error(error);
            user_interface.print_error_context(error_context);
            user_interface.print(Printer::terminal(&self.grammar).usage(program));
            1
        })
    }

    /// The usage syntax of this grammar, in declaration order.
    ///
    /// Mandatory entities are bare, optional ones are bracketed, and commands include their nested syntax.
    pub fn syntax(&self) -> String {
        self.grammar.syntax()
    }

    /// The help message for this grammar, laid out for the attached terminal.
    pub fn help(&self, program: &str) -> String {
        Printer::terminal(&self.grammar).help(program).join("\n")
    }

    /// Print the help message to stdout.
    pub fn print_help(&self, program: &str) {
        Printer::terminal(&self.grammar).print_help(program, &ConsoleInterface::default());
    }

    /// The entities of this grammar, in declaration order.
    pub fn entities(&self) -> &[Expected] {
        self.grammar.entities()
    }

    /// The plain argument called `name`.
    pub fn argument(&self, name: &str) -> Option<&PlainArgument> {
        match self.grammar.name_slot(name).map(|slot| self.grammar.entity(slot)) {
            Some(Expected::Argument(argument)) => Some(argument),
            _ => None,
        }
    }

    /// The option with the key `key`, by either key form.
    pub fn option(&self, key: impl Into<OptionKey>) -> Option<&KeyedOption> {
        self.grammar
            .option_slot(&key.into())
            .map(|slot| self.grammar.keyed_option(slot))
    }

    /// The command called `name`.
    pub fn command(&self, name: &str) -> Option<&Command> {
        self.grammar
            .command_slot(name)
            .map(|slot| self.grammar.command(slot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::util::InMemoryInterface;
    use crate::prelude::Descriptor;
    use crate::test::assert_contains;
    use rand::{thread_rng, Rng};
    use rstest::rstest;

    fn foo_bar_extra() -> Parser {
        let mut grammar = Grammar::default();
        grammar
            .insert(PlainArgument::new(0, "foo".to_string(), true, None).unwrap().into())
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
                    None,
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
                    None,
                )
                .unwrap()
                .into(),
            )
            .unwrap();
        Parser::new(grammar)
    }

    #[test]
    fn parser_empty() {
        // Setup
        let parser = Parser::new(Grammar::default());

        // Execute
        let model = parser.parse_tokens(&[]).unwrap();

        // Verify
        assert!(model.is_empty());
        assert_eq!(parser.syntax(), "");
    }

    #[rstest]
    #[case(vec!["hello"])]
    #[case(vec!["hello", "-b"])]
    #[case(vec!["-x", "5", "hello", "--bar"])]
    fn parse_args_matches_tokens(#[case] tokens: Vec<&str>) {
        let parser = foo_bar_extra();
        let owned: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
        assert_eq!(
            parser.parse_args(owned).unwrap(),
            parser.parse_tokens(tokens.as_slice()).unwrap()
        );
    }

    #[test]
    fn parse_idempotent() {
        // Setup
        let parser = foo_bar_extra();

        for _ in 0..25 {
            let value: u32 = thread_rng().gen();
            let value = value.to_string();
            let tokens = ["-x", value.as_str(), "hello"];

            // Execute
            let first = parser.parse_tokens(&tokens).unwrap();
            let second = parser.parse_tokens(&tokens).unwrap();

            // Verify
            assert_eq!(first, second);
            assert_eq!(first.option_value("extra"), Some(value.as_str()));
        }
    }

    #[test]
    fn parse_with_interface_error() {
        // Setup
        let parser = foo_bar_extra();
        let interface = InMemoryInterface::default();

        // Execute
        let result = parser.parse_with_interface("program", &["hello", "--nope"], &interface);

        // Verify
        assert_eq!(result.unwrap_err(), 1);
        let (message, error, error_context) = interface.consume();
        assert_eq!(message.unwrap(), "usage: program <foo> [-b] [-x <extra>]");
        assert_eq!(error.unwrap(), "Parse error: Unknown argument '--nope'.");
        assert_eq!(error_context.unwrap(), ErrorContext::new(1, &["hello", "--nope"]));
    }

    #[test]
    fn parse_with_interface_ok() {
        let parser = foo_bar_extra();
        let interface = InMemoryInterface::default();
        let model = parser
            .parse_with_interface("program", &["hello"], &interface)
            .unwrap();
        assert_eq!(model.argument("foo"), Some("hello"));
        assert_eq!(interface.consume(), (None, None, None));
    }

    #[rstest]
    #[case(ParseError::UnknownArgument { token: "abc".to_string(), offset: 3 }, "Parse error: Unknown argument 'abc'.", 3)]
    #[case(ParseError::MissingValue { option: "extra".to_string(), offset: 1 }, "Parse error: Option 'extra' requires a value.", 1)]
    #[case(ParseError::MissingArgument { names: vec!["foo".to_string()], offset: 0 }, "Parse error: Missing mandatory 'foo'.", 0)]
    #[case(ParseError::MissingArgument { names: vec!["a".to_string(), "b".to_string()], offset: 2 }, "Parse error: Missing mandatory 'a', 'b'.", 2)]
    fn parse_error_display(#[case] error: ParseError, #[case] expected: &str, #[case] offset: usize) {
        assert_eq!(error.to_string(), expected);
        assert_eq!(error.offset(), offset);
    }

    #[test]
    fn config_error_display() {
        let error = ConfigError::IllegalState("abc".to_string());
        assert_eq!(error.to_string(), "Config error: abc");
    }

    #[test]
    fn introspection() {
        // Setup
        let parser = foo_bar_extra();

        // Execute & Verify
        assert_eq!(parser.argument("foo").unwrap().name(), "foo");
        assert_eq!(parser.argument("bar"), None);
        assert_eq!(parser.option('b').unwrap().name(), "bar");
        assert_eq!(parser.option("extra").unwrap().name(), "extra");
        assert_eq!(parser.option("foo"), None);
        assert_eq!(parser.command("foo"), None);
        let names: Vec<&str> = parser.entities().iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["foo", "bar", "extra"]);
        assert_contains!(format!("{parser:?}"), "<foo> [-b] [-x <extra>]");
    }

    #[test]
    fn parser_shareable() {
        fn is_shareable<T: Clone + Send + Sync>(_: &T) {}
        let parser = foo_bar_extra();
        is_shareable(&parser);

        let handle = {
            let parser = parser.clone();
            std::thread::spawn(move || parser.parse_tokens(&["a", "-b"]).is_ok())
        };

        assert!(handle.join().unwrap());
        assert!(parser.parse_tokens(&["a"]).is_ok());
    }
}
