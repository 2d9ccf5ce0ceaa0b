use crate::api::ParserBuilder;
use crate::matcher::PlainArgument;
use crate::parser::ConfigError;
use crate::prelude::Descriptor;

/// The builder for a [`PlainArgument`].
///
/// Plain arguments are mandatory unless configured otherwise.
#[derive(Debug)]
pub struct ArgumentBuilder {
    parent: Option<ParserBuilder>,
    ordinal: usize,
    name: String,
    mandatory: bool,
    description: Option<String>,
}

impl ArgumentBuilder {
    /// Create a detached builder; finish it with [`ArgumentBuilder::build_and_get`].
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            parent: None,
            ordinal: 0,
            name: name.into(),
            mandatory: true,
            description: None,
        }
    }

    pub(crate) fn child(parent: ParserBuilder, ordinal: usize, name: String) -> Self {
        Self {
            parent: Some(parent),
            ordinal,
            ..Self::new(name)
        }
    }

    /// Whether a successful parse must bind this argument.
    pub fn mandatory(mut self, mandatory: bool) -> Self {
        self.mandatory = mandatory;
        self
    }

    /// Document the argument.
    /// If repeated, only the final description will apply.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description.replace(description.into());
        self
    }

    /// Whether this builder was created by a [`ParserBuilder`].
    pub fn is_child(&self) -> bool {
        self.parent.is_some()
    }

    /// Declare the argument on the parent, and return to it.
    ///
    /// Fails with [`ConfigError::UnsupportedOperation`] on a detached builder.
    pub fn build(self) -> Result<ParserBuilder, ConfigError> {
        let ArgumentBuilder {
            parent,
            ordinal,
            name,
            mandatory,
            description,
        } = self;
        let argument = PlainArgument::new(ordinal, name, mandatory, description)?;

        match parent {
            Some(parent) => parent.insert(argument.into()),
            None => Err(ConfigError::UnsupportedOperation(format!(
                "Cannot build argument '{}' without a parent; use build_and_get.",
                argument.name()
            ))),
        }
    }

    /// Finish the argument without declaring it.
    ///
    /// Fails with [`ConfigError::UnsupportedOperation`] on a builder created by a [`ParserBuilder`]; use [`ArgumentBuilder::build`] instead.
    pub fn build_and_get(self) -> Result<PlainArgument, ConfigError> {
        let argument =
            PlainArgument::new(self.ordinal, self.name, self.mandatory, self.description)?;

        match self.parent {
            Some(_) => Err(ConfigError::UnsupportedOperation(format!(
                "Cannot get argument '{}' apart from its parent; use build.",
                argument.name()
            ))),
            None => Ok(argument),
        }
    }
}
