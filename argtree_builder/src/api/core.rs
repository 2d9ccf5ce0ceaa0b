use crate::api::{ArgumentBuilder, CommandBuilder, OptionBuilder};
use crate::matcher::{Expected, Grammar, KeyedOption, PlainArgument};
use crate::model::OptionKey;
use crate::parser::{ConfigError, Parser};

/// The builder for one grammar level.
///
/// Entities are declared in order, and each is stamped with the next ordinal of this level.
/// A `ParserBuilder` created through [`CommandBuilder::build_parser`] is nested: it has a parent to [`ParserBuilder::build`] back into.
///
/// ### Example
/// ```
/// # use argtree_builder as argtree;
/// use argtree::ParserBuilder;
///
/// let parser = ParserBuilder::new()
///     .add_argument("foo")
///     .add_option('b', "bar")
///     .build_option('x', "extra")
///         .long_key("extra")
///         .expects_value(true)
///         .build()?
///     .build_and_get()?;
///
/// assert_eq!(parser.syntax(), "<foo> [-b] [-x <extra>]");
///
/// let model = parser.parse_tokens(&["hello", "-b"]).unwrap();
/// assert_eq!(model.argument("foo"), Some("hello"));
/// assert!(model.is_option_present("bar"));
/// assert!(model.is_option_present('b'));
/// assert_eq!(model.option_value("extra"), None);
/// # Ok::<(), argtree::ConfigError>(())
/// ```
#[derive(Debug)]
pub struct ParserBuilder {
    grammar: Grammar,
    next_ordinal: usize,
    parent: Option<Box<CommandBuilder>>,
    deferred_error: Option<ConfigError>,
}

impl Default for ParserBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserBuilder {
    /// Create a root builder.
    pub fn new() -> Self {
        Self {
            grammar: Grammar::default(),
            next_ordinal: 0,
            parent: None,
            deferred_error: None,
        }
    }

    pub(crate) fn nested(parent: CommandBuilder) -> Self {
        Self {
            parent: Some(Box::new(parent)),
            ..Self::new()
        }
    }

    fn take_ordinal(&mut self) -> usize {
        let ordinal = self.next_ordinal;
        self.next_ordinal += 1;
        ordinal
    }

    // The first error wins; it is reported when the grammar is finalized.
    fn defer(mut self, result: Result<(), ConfigError>) -> Self {
        if let Err(error) = result {
            if self.deferred_error.is_none() {
                self.deferred_error.replace(error);
            }
        }

        self
    }

    pub(crate) fn insert(mut self, expected: Expected) -> Result<Self, ConfigError> {
        self.grammar.insert(expected)?;
        Ok(self)
    }

    /// Whether this builder is nested within a [`CommandBuilder`].
    pub fn is_child(&self) -> bool {
        self.parent.is_some()
    }

    /// Declare a plain argument, configured through the returned [`ArgumentBuilder`].
    ///
    /// Plain arguments are bound by position, in their order of declaration.
    pub fn build_argument(mut self, name: impl Into<String>) -> ArgumentBuilder {
        let ordinal = self.take_ordinal();
        ArgumentBuilder::child(self, ordinal, name.into())
    }

    /// Declare a mandatory plain argument with no description.
    pub fn add_argument(mut self, name: impl Into<String>) -> Self {
        let ordinal = self.take_ordinal();
        let result = PlainArgument::new(ordinal, name.into(), true, None)
            .and_then(|argument| self.grammar.insert(argument.into()));
        self.defer(result)
    }

    /// Declare an option, configured through the returned [`OptionBuilder`].
    ///
    /// A `char` key declares the short key (`-k`), a string key declares the long key (`--key`).
    pub fn build_option(mut self, key: impl Into<OptionKey>, name: impl Into<String>) -> OptionBuilder {
        let ordinal = self.take_ordinal();
        OptionBuilder::child(self, ordinal, key.into(), name.into())
    }

    /// Declare an optional flag with no description.
    ///
    /// A `char` key declares the short key (`-k`), a string key declares the long key (`--key`).
    pub fn add_option(mut self, key: impl Into<OptionKey>, name: impl Into<String>) -> Self {
        let ordinal = self.take_ordinal();
        let (short, long) = match key.into() {
            OptionKey::Short(short) => (Some(short), None),
            OptionKey::Long(long) => (None, Some(long)),
        };
        let result = KeyedOption::new(ordinal, name.into(), short, long, false, false, None)
            .and_then(|option| self.grammar.insert(option.into()));
        self.defer(result)
    }

    /// Declare a command, configured through the returned [`CommandBuilder`].
    pub fn build_command(mut self, name: impl Into<String>) -> CommandBuilder {
        let ordinal = self.take_ordinal();
        CommandBuilder::child(self, ordinal, name.into())
    }

    /// Declare an entity finished elsewhere, such as by a detached builder's `build_and_get`.
    ///
    /// The entity takes the next ordinal of this grammar level.
    ///
    /// ### Example
    /// ```
    /// # use argtree_builder as argtree;
    /// use argtree::{ArgumentBuilder, ParserBuilder};
    ///
    /// let foo = ArgumentBuilder::new("foo")
    ///     .description("The foo.")
    ///     .build_and_get()?;
    /// let parser = ParserBuilder::new()
    ///     .add_option('b', "bar")
    ///     .add(foo)
    ///     .build_and_get()?;
    ///
    /// assert_eq!(parser.syntax(), "[-b] <foo>");
    /// # Ok::<(), argtree::ConfigError>(())
    /// ```
    pub fn add(mut self, expected: impl Into<Expected>) -> Self {
        let mut expected = expected.into();
        expected.restamp(self.take_ordinal());
        let result = self.grammar.insert(expected);
        self.defer(result)
    }

    /// Finalize this grammar level, and return to the parent command.
    ///
    /// The parser is set on the parent [`CommandBuilder`].
    /// Fails with [`ConfigError::UnsupportedOperation`] when there is no parent; use [`ParserBuilder::build_and_get`] instead.
    pub fn build(self) -> Result<CommandBuilder, ConfigError> {
        let ParserBuilder {
            grammar,
            parent,
            deferred_error,
            ..
        } = self;

        if let Some(error) = deferred_error {
            return Err(error);
        }

        match parent {
            Some(parent) => Ok(parent.parser(Parser::new(grammar))),
            None => Err(ConfigError::UnsupportedOperation(
                "Cannot build a parser without a parent command; use build_and_get.".to_string(),
            )),
        }
    }

    /// Finalize this grammar level into a [`Parser`].
    ///
    /// This reports the first error deferred by the `add*` declarations (ex: a repeated name).
    /// Fails with [`ConfigError::UnsupportedOperation`] on a nested builder; use [`ParserBuilder::build`] to return to the parent command.
    pub fn build_and_get(self) -> Result<Parser, ConfigError> {
        if let Some(error) = self.deferred_error {
            return Err(error);
        }

        match self.parent {
            Some(_) => Err(ConfigError::UnsupportedOperation(
                "Cannot get a nested parser apart from its command; use build.".to_string(),
            )),
            None => Ok(Parser::new(self.grammar)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::Descriptor;
    use rstest::rstest;

    #[test]
    fn build_and_get_empty() {
        // Setup
        let builder = ParserBuilder::new();
        assert!(!builder.is_child());

        // Execute
        let parser = builder.build_and_get().unwrap();

        // Verify
        assert_eq!(parser.syntax(), "");
        assert!(parser.entities().is_empty());
    }

    #[test]
    fn build_root_unsupported() {
        let result = ParserBuilder::new().add_argument("foo").build();
        assert_matches!(result, Err(ConfigError::UnsupportedOperation(_)));
    }

    #[test]
    fn ordinals_shared_across_kinds() {
        // Setup
        let nested = ParserBuilder::new().add_argument("target").build_and_get().unwrap();

        // Execute
        let parser = ParserBuilder::new()
            .add_option('v', "verbose")
            .add_argument("foo")
            .build_command("run")
            .parser(nested)
            .build()
            .unwrap()
            .build_argument("bar")
            .mandatory(false)
            .build()
            .unwrap()
            .build_and_get()
            .unwrap();

        // Verify
        let ordinals: Vec<(&str, usize)> = parser
            .entities()
            .iter()
            .map(|e| (e.name(), e.ordinal()))
            .collect();
        assert_eq!(
            ordinals,
            vec![("verbose", 0), ("foo", 1), ("run", 2), ("bar", 3)]
        );
        assert_eq!(parser.syntax(), "[-v] <foo> [run <target>] [<bar>]");
    }

    #[test]
    fn add_defaults() {
        let parser = ParserBuilder::new()
            .add_argument("foo")
            .add_option("bar", "bar")
            .build_and_get()
            .unwrap();

        let foo = parser.argument("foo").unwrap();
        assert!(foo.is_mandatory());
        assert_eq!(foo.description(), None);
        let bar = parser.option("bar").unwrap();
        assert!(!bar.is_mandatory());
        assert!(!bar.expects_value());
        assert_eq!(bar.short_key(), None);
        assert_eq!(bar.long_key(), Some("bar"));
    }

    #[test]
    fn add_restamps() {
        // Setup
        let bar = OptionBuilder::new('b', "bar").build_and_get().unwrap();
        assert_eq!(bar.ordinal(), 0);

        // Execute
        let parser = ParserBuilder::new()
            .add_argument("foo")
            .add(bar)
            .build_and_get()
            .unwrap();

        // Verify
        assert_eq!(parser.option('b').unwrap().ordinal(), 1);
    }

    #[rstest]
    #[case(ParserBuilder::new().add_argument(""), "The name of an argument must not be empty.")]
    #[case(ParserBuilder::new().add_option("", "bar"), "Option 'bar' cannot use an empty long key.")]
    #[case(ParserBuilder::new().add_argument("foo").add_option('f', "foo"), "Cannot duplicate the name 'foo'.")]
    #[case(ParserBuilder::new().add_option('b', "bar").add_option('b', "baz"), "Cannot duplicate the key 'b'.")]
    #[case(ParserBuilder::new().add_argument("").add_argument("foo").add_argument("foo"), "The name of an argument must not be empty.")]
    fn deferred_invalid(#[case] builder: ParserBuilder, #[case] expected: &str) {
        // Execute
        let result = builder.build_and_get();

        // Verify
        assert_matches!(result, Err(ConfigError::InvalidArgument(message)) => {
            assert_eq!(message, expected);
        });
    }

    #[test]
    fn deferred_error_survives_child() {
        let result = ParserBuilder::new()
            .add_argument("")
            .build_argument("foo")
            .build()
            .unwrap()
            .build_and_get();
        assert_matches!(result, Err(ConfigError::InvalidArgument(_)));
    }

    #[test]
    fn nested_build_returns_to_command() {
        // Setup
        let builder = ParserBuilder::new().build_command("run").build_parser();
        assert!(builder.is_child());

        // Execute
        let command_builder = builder.add_argument("target").build().unwrap();

        // Verify
        assert!(command_builder.is_child());
        let parser = command_builder.build().unwrap().build_and_get().unwrap();
        assert_eq!(parser.command("run").unwrap().full_name(), "run <target>");
    }

    #[test]
    fn nested_build_and_get_unsupported() {
        // Setup
        let builder = ParserBuilder::new()
            .add_argument("foo")
            .build_command("run")
            .build_parser()
            .add_argument("target");
        assert!(builder.is_child());

        // Execute
        let result = builder.build_and_get();

        // Verify
        assert_matches!(result, Err(ConfigError::UnsupportedOperation(message)) => {
            assert_eq!(message, "Cannot get a nested parser apart from its command; use build.");
        });
    }

    #[test]
    fn nested_build_and_get_deferred_first() {
        let result = ParserBuilder::new()
            .build_command("run")
            .build_parser()
            .add_argument("")
            .build_and_get();
        assert_matches!(result, Err(ConfigError::InvalidArgument(_)));
    }

    #[test]
    fn nested_deferred_error() {
        let result = ParserBuilder::new()
            .build_command("run")
            .build_parser()
            .add_argument("")
            .build();
        assert_matches!(result, Err(ConfigError::InvalidArgument(_)));
    }
}
