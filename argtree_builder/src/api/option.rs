use crate::api::ParserBuilder;
use crate::matcher::KeyedOption;
use crate::model::OptionKey;
use crate::parser::ConfigError;
use crate::prelude::Descriptor;

/// The builder for a [`KeyedOption`].
///
/// Options are optional flags unless configured otherwise.
///
/// ### Example
/// ```
/// # use argtree_builder as argtree;
/// use argtree::ParserBuilder;
///
/// let parser = ParserBuilder::new()
///     .build_option('x', "extra")
///         .long_key("extra")
///         .expects_value(true)
///         .description("An extra value.")
///         .build()?
///     .build_and_get()?;
///
/// let short = parser.parse_tokens(&["-x", "5"]).unwrap();
/// let long = parser.parse_tokens(&["--extra", "5"]).unwrap();
/// assert_eq!(short.option_value('x'), Some("5"));
/// assert_eq!(long.option_value('x'), Some("5"));
/// assert_eq!(short, long);
/// # Ok::<(), argtree::ConfigError>(())
/// ```
#[derive(Debug)]
pub struct OptionBuilder {
    parent: Option<ParserBuilder>,
    ordinal: usize,
    name: String,
    short: Option<char>,
    long: Option<String>,
    expects_value: bool,
    mandatory: bool,
    description: Option<String>,
}

impl OptionBuilder {
    /// Create a detached builder; finish it with [`OptionBuilder::build_and_get`].
    ///
    /// A `char` key sets the short key (`-k`), a string key sets the long key (`--key`).
    pub fn new(key: impl Into<OptionKey>, name: impl Into<String>) -> Self {
        let (short, long) = match key.into() {
            OptionKey::Short(short) => (Some(short), None),
            OptionKey::Long(long) => (None, Some(long)),
        };

        Self {
            parent: None,
            ordinal: 0,
            name: name.into(),
            short,
            long,
            expects_value: false,
            mandatory: false,
            description: None,
        }
    }

    pub(crate) fn child(parent: ParserBuilder, ordinal: usize, key: OptionKey, name: String) -> Self {
        Self {
            parent: Some(parent),
            ordinal,
            ..Self::new(key, name)
        }
    }

    /// Set the short key (`-k`).
    pub fn short_key(mut self, key: char) -> Self {
        self.short.replace(key);
        self
    }

    /// Set the long key (`--key`), given without its `--` marker.
    pub fn long_key(mut self, key: impl Into<String>) -> Self {
        self.long.replace(key.into());
        self
    }

    /// Whether the option consumes the following token as its value.
    /// Otherwise, the option is a flag.
    pub fn expects_value(mut self, expects_value: bool) -> Self {
        self.expects_value = expects_value;
        self
    }

    /// Whether a successful parse must bind this option.
    pub fn mandatory(mut self, mandatory: bool) -> Self {
        self.mandatory = mandatory;
        self
    }

    /// Document the option.
    /// If repeated, only the final description will apply.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description.replace(description.into());
        self
    }

    /// Whether this builder was created by a [`ParserBuilder`].
    pub fn is_child(&self) -> bool {
        self.parent.is_some()
    }

    /// Declare the option on the parent, and return to it.
    ///
    /// Fails with [`ConfigError::UnsupportedOperation`] on a detached builder.
    pub fn build(self) -> Result<ParserBuilder, ConfigError> {
        let OptionBuilder {
            parent,
            ordinal,
            name,
            short,
            long,
            expects_value,
            mandatory,
            description,
        } = self;
        let option = KeyedOption::new(
            ordinal,
            name,
            short,
            long,
            expects_value,
            mandatory,
            description,
        )?;

        match parent {
            Some(parent) => parent.insert(option.into()),
            None => Err(ConfigError::UnsupportedOperation(format!(
                "Cannot build option '{}' without a parent; use build_and_get.",
                option.name()
            ))),
        }
    }

    /// Finish the option without declaring it.
    ///
    /// Fails with [`ConfigError::UnsupportedOperation`] on a builder created by a [`ParserBuilder`]; use [`OptionBuilder::build`] instead.
    pub fn build_and_get(self) -> Result<KeyedOption, ConfigError> {
        let option = KeyedOption::new(
            self.ordinal,
            self.name,
            self.short,
            self.long,
            self.expects_value,
            self.mandatory,
            self.description,
        )?;

        match self.parent {
            Some(_) => Err(ConfigError::UnsupportedOperation(format!(
                "Cannot get option '{}' apart from its parent; use build.",
                option.name()
            ))),
            None => Ok(option),
        }
    }
}
