use crate::api::ParserBuilder;
use crate::matcher::Command;
use crate::parser::{ConfigError, Parser};
use crate::prelude::Descriptor;

/// The builder for a [`Command`].
///
/// Commands are optional unless configured otherwise, and always require a nested parser.
/// The nested parser is either set directly ([`CommandBuilder::parser`]), or declared in-line ([`CommandBuilder::build_parser`]).
///
/// ### Example
/// ```
/// # use argtree_builder as argtree;
/// use argtree::ParserBuilder;
///
/// let parser = ParserBuilder::new()
///     .add_option('v', "verbose")
///     .build_command("run")
///         .description("Run a target.")
///         .build_parser()
///             .add_argument("target")
///             .build()?
///         .build()?
///     .build_and_get()?;
///
/// assert_eq!(parser.syntax(), "[-v] [run <target>]");
///
/// let model = parser.parse_tokens(&["-v", "run", "server"]).unwrap();
/// let (name, nested) = model.invoked_command().unwrap();
/// assert_eq!(name, "run");
/// assert_eq!(nested.argument("target"), Some("server"));
/// # Ok::<(), argtree::ConfigError>(())
/// ```
#[derive(Debug)]
pub struct CommandBuilder {
    parent: Option<ParserBuilder>,
    ordinal: usize,
    name: String,
    mandatory: bool,
    description: Option<String>,
    parser: Option<Parser>,
}

impl CommandBuilder {
    /// Create a detached builder; finish it with [`CommandBuilder::build_and_get`].
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            parent: None,
            ordinal: 0,
            name: name.into(),
            mandatory: false,
            description: None,
            parser: None,
        }
    }

    pub(crate) fn child(parent: ParserBuilder, ordinal: usize, name: String) -> Self {
        Self {
            parent: Some(parent),
            ordinal,
            ..Self::new(name)
        }
    }

    /// Whether a successful parse must invoke this command.
    pub fn mandatory(mut self, mandatory: bool) -> Self {
        self.mandatory = mandatory;
        self
    }

    /// Document the command.
    /// If repeated, only the final description will apply.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description.replace(description.into());
        self
    }

    /// Set the parser for the tokens following this command.
    pub fn parser(mut self, parser: Parser) -> Self {
        self.parser.replace(parser);
        self
    }

    /// Declare the nested grammar of this command.
    ///
    /// [`ParserBuilder::build`] sets the nested parser, and returns to this builder.
    pub fn build_parser(self) -> ParserBuilder {
        ParserBuilder::nested(self)
    }

    /// Whether this builder was created by a [`ParserBuilder`].
    pub fn is_child(&self) -> bool {
        self.parent.is_some()
    }

    /// Declare the command on the parent, and return to it.
    ///
    /// Fails with [`ConfigError::IllegalState`] when no nested parser was set, and with [`ConfigError::UnsupportedOperation`] on a detached builder.
    pub fn build(self) -> Result<ParserBuilder, ConfigError> {
        let CommandBuilder {
            parent,
            ordinal,
            name,
            mandatory,
            description,
            parser,
        } = self;
        let command = finish(ordinal, name, mandatory, description, parser)?;

        match parent {
            Some(parent) => parent.insert(command.into()),
            None => Err(ConfigError::UnsupportedOperation(format!(
                "Cannot build command '{}' without a parent; use build_and_get.",
                command.name()
            ))),
        }
    }

    /// Finish the command without declaring it.
    ///
    /// Fails with [`ConfigError::UnsupportedOperation`] on a builder created by a [`ParserBuilder`]; use [`CommandBuilder::build`] instead.
    pub fn build_and_get(self) -> Result<Command, ConfigError> {
        let command = finish(
            self.ordinal,
            self.name,
            self.mandatory,
            self.description,
            self.parser,
        )?;

        match self.parent {
            Some(_) => Err(ConfigError::UnsupportedOperation(format!(
                "Cannot get command '{}' apart from its parent; use build.",
                command.name()
            ))),
            None => Ok(command),
        }
    }
}

fn finish(
    ordinal: usize,
    name: String,
    mandatory: bool,
    description: Option<String>,
    parser: Option<Parser>,
) -> Result<Command, ConfigError> {
    match parser {
        Some(parser) => Command::new(ordinal, name, mandatory, description, parser),
        None => Err(ConfigError::IllegalState(format!(
            "Command '{name}' requires a parser."
        ))),
    }
}
