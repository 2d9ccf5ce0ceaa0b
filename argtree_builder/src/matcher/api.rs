use std::collections::HashMap;

use crate::constant::*;
use crate::model::OptionKey;
use crate::parser::{ConfigError, Parser};
use crate::prelude::Descriptor;

fn validate_name(kind: &str, name: &str) -> Result<(), ConfigError> {
    if name.is_empty() {
        Err(ConfigError::InvalidArgument(format!(
            "The name of {kind} must not be empty."
        )))
    } else {
        Ok(())
    }
}

/// A value bound by position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainArgument {
    ordinal: usize,
    name: String,
    mandatory: bool,
    description: Option<String>,
}

impl PlainArgument {
    pub(crate) fn new(
        ordinal: usize,
        name: String,
        mandatory: bool,
        description: Option<String>,
    ) -> Result<Self, ConfigError> {
        validate_name("an argument", &name)?;
        Ok(Self {
            ordinal,
            name,
            mandatory,
            description,
        })
    }
}

impl Descriptor for PlainArgument {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn is_mandatory(&self) -> bool {
        self.mandatory
    }

    fn ordinal(&self) -> usize {
        self.ordinal
    }
}

/// A value or flag bound by key: `-k`, `--key`, or both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyedOption {
    ordinal: usize,
    name: String,
    short: Option<char>,
    long: Option<String>,
    expects_value: bool,
    mandatory: bool,
    description: Option<String>,
}

impl KeyedOption {
    pub(crate) fn new(
        ordinal: usize,
        name: String,
        short: Option<char>,
        long: Option<String>,
        expects_value: bool,
        mandatory: bool,
        description: Option<String>,
    ) -> Result<Self, ConfigError> {
        validate_name("an option", &name)?;

        if let Some(key) = short {
            if SHORT_PREFIX.starts_with(key) || key.is_whitespace() {
                return Err(ConfigError::InvalidArgument(format!(
                    "Option '{name}' cannot use '{key}' as its key."
                )));
            }
        }

        match &long {
            Some(key) if key.is_empty() => {
                return Err(ConfigError::InvalidArgument(format!(
                    "Option '{name}' cannot use an empty long key."
                )));
            }
            Some(key) if key.starts_with(SHORT_PREFIX) => {
                return Err(ConfigError::InvalidArgument(format!(
                    "Option '{name}' must declare its long key '{key}' without the '{LONG_PREFIX}' marker."
                )));
            }
            Some(_) => {}
            None if short.is_none() => {
                return Err(ConfigError::InvalidArgument(format!(
                    "Option '{name}' must have a key or a long key."
                )));
            }
            None => {}
        };

        Ok(Self {
            ordinal,
            name,
            short,
            long,
            expects_value,
            mandatory,
            description,
        })
    }

    /// The single character key (`-k`), if declared.
    pub fn short_key(&self) -> Option<char> {
        self.short
    }

    /// The long key (`--key`), if declared.
    pub fn long_key(&self) -> Option<&str> {
        self.long.as_deref()
    }

    /// Whether the option consumes the following token as its value.
    /// Otherwise it is a flag.
    pub fn expects_value(&self) -> bool {
        self.expects_value
    }

    /// Whether either key form of this option is `key`.
    pub fn matches(&self, key: &OptionKey) -> bool {
        match key {
            OptionKey::Short(short) => self.short == Some(*short),
            OptionKey::Long(long) => self.long.as_deref() == Some(long.as_str()),
        }
    }

    fn keys(&self) -> Vec<OptionKey> {
        let mut keys = Vec::default();

        if let Some(short) = self.short {
            keys.push(OptionKey::Short(short));
        }

        if let Some(long) = &self.long {
            keys.push(OptionKey::Long(long.clone()));
        }

        keys
    }

    // The short form is preferred in the usage syntax.
    fn syntax_key(&self) -> OptionKey {
        match (self.short, &self.long) {
            (Some(short), _) => OptionKey::Short(short),
            (None, Some(long)) => OptionKey::Long(long.clone()),
            (None, None) => unreachable!("internal error - an option must have a key"),
        }
    }
}

impl Descriptor for KeyedOption {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn is_mandatory(&self) -> bool {
        self.mandatory
    }

    fn ordinal(&self) -> usize {
        self.ordinal
    }

    fn is_option(&self) -> bool {
        true
    }

    fn full_name(&self) -> String {
        let keys = self
            .keys()
            .iter()
            .map(|k| k.to_string())
            .collect::<Vec<String>>()
            .join(", ");

        if self.expects_value {
            format!("{keys} <{}>", self.name)
        } else {
            keys
        }
    }
}

/// A named branch which owns a nested grammar.
///
/// When matched, the command consumes every following token with its own [`Parser`].
/// Commands compare equal by name.
#[derive(Debug, Clone)]
pub struct Command {
    ordinal: usize,
    name: String,
    mandatory: bool,
    description: Option<String>,
    parser: Parser,
}

impl Command {
    pub(crate) fn new(
        ordinal: usize,
        name: String,
        mandatory: bool,
        description: Option<String>,
        parser: Parser,
    ) -> Result<Self, ConfigError> {
        validate_name("a command", &name)?;
        Ok(Self {
            ordinal,
            name,
            mandatory,
            description,
            parser,
        })
    }

    /// The parser for the tokens following this command.
    pub fn parser(&self) -> &Parser {
        &self.parser
    }
}

impl PartialEq for Command {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Command {}

impl Descriptor for Command {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn is_mandatory(&self) -> bool {
        self.mandatory
    }

    fn ordinal(&self) -> usize {
        self.ordinal
    }

    fn is_command(&self) -> bool {
        true
    }

    fn full_name(&self) -> String {
        let syntax = self.parser.syntax();

        if syntax.is_empty() {
            self.name.clone()
        } else {
            format!("{} {syntax}", self.name)
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.full_name())
    }
}

/// One entity of a grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expected {
    /// A positional argument.
    Argument(PlainArgument),
    /// A keyed option.
    Option(KeyedOption),
    /// A sub-command.
    Command(Command),
}

impl Expected {
    fn descriptor(&self) -> &dyn Descriptor {
        match self {
            Expected::Argument(argument) => argument,
            Expected::Option(option) => option,
            Expected::Command(command) => command,
        }
    }

    pub(crate) fn restamp(&mut self, ordinal: usize) {
        match self {
            Expected::Argument(argument) => argument.ordinal = ordinal,
            Expected::Option(option) => option.ordinal = ordinal,
            Expected::Command(command) => command.ordinal = ordinal,
        }
    }

    /// How this entity reads in a usage line.
    /// Optional entities are bracketed.
    pub fn syntax(&self) -> String {
        let fragment = match self {
            Expected::Argument(argument) => format!("<{}>", argument.name),
            Expected::Option(option) if option.expects_value => {
                format!("{} <{}>", option.syntax_key(), option.name)
            }
            Expected::Option(option) => option.syntax_key().to_string(),
            Expected::Command(command) => command.full_name(),
        };

        if self.is_mandatory() {
            fragment
        } else {
            format!("[{fragment}]")
        }
    }
}

impl Descriptor for Expected {
    fn name(&self) -> &str {
        self.descriptor().name()
    }

    fn description(&self) -> Option<&str> {
        self.descriptor().description()
    }

    fn is_mandatory(&self) -> bool {
        self.descriptor().is_mandatory()
    }

    fn ordinal(&self) -> usize {
        self.descriptor().ordinal()
    }

    fn is_option(&self) -> bool {
        self.descriptor().is_option()
    }

    fn is_command(&self) -> bool {
        self.descriptor().is_command()
    }

    fn full_name(&self) -> String {
        self.descriptor().full_name()
    }
}

impl From<PlainArgument> for Expected {
    fn from(value: PlainArgument) -> Self {
        Expected::Argument(value)
    }
}

impl From<KeyedOption> for Expected {
    fn from(value: KeyedOption) -> Self {
        Expected::Option(value)
    }
}

impl From<Command> for Expected {
    fn from(value: Command) -> Self {
        Expected::Command(value)
    }
}

/// The entities of one grammar level.
///
/// Every lookup table points into `entities`, so both key forms of an option resolve to the same slot.
#[derive(Debug, Default)]
pub(crate) struct Grammar {
    entities: Vec<Expected>,
    arguments: Vec<usize>,
    short_options: HashMap<char, usize>,
    long_options: HashMap<String, usize>,
    commands: HashMap<String, usize>,
    names: HashMap<String, usize>,
}

impl Grammar {
    pub(crate) fn insert(&mut self, expected: Expected) -> Result<(), ConfigError> {
        let slot = self.entities.len();

        if self.names.contains_key(expected.name()) {
            return Err(ConfigError::InvalidArgument(format!(
                "Cannot duplicate the name '{}'.",
                expected.name()
            )));
        }

        match &expected {
            Expected::Argument(_) => {
                self.arguments.push(slot);
            }
            Expected::Option(option) => {
                if let Some(short) = option.short {
                    if self.short_options.contains_key(&short) {
                        return Err(ConfigError::InvalidArgument(format!(
                            "Cannot duplicate the key '{short}'."
                        )));
                    }
                }

                if let Some(long) = &option.long {
                    if self.long_options.contains_key(long) {
                        return Err(ConfigError::InvalidArgument(format!(
                            "Cannot duplicate the long key '{long}'."
                        )));
                    }
                }

                if let Some(short) = option.short {
                    self.short_options.insert(short, slot);
                }

                if let Some(long) = &option.long {
                    self.long_options.insert(long.clone(), slot);
                }
            }
            Expected::Command(command) => {
                self.commands.insert(command.name.clone(), slot);
            }
        };

        self.names.insert(expected.name().to_string(), slot);
        self.entities.push(expected);
        Ok(())
    }

    pub(crate) fn entities(&self) -> &[Expected] {
        &self.entities
    }

    pub(crate) fn entity(&self, slot: usize) -> &Expected {
        &self.entities[slot]
    }

    pub(crate) fn keyed_option(&self, slot: usize) -> &KeyedOption {
        match &self.entities[slot] {
            Expected::Option(option) => option,
            _ => unreachable!("internal error - slot {slot} must hold an option"),
        }
    }

    pub(crate) fn command(&self, slot: usize) -> &Command {
        match &self.entities[slot] {
            Expected::Command(command) => command,
            _ => unreachable!("internal error - slot {slot} must hold a command"),
        }
    }

    /// The slot of the `position`-th positional argument.
    pub(crate) fn argument_slot(&self, position: usize) -> Option<usize> {
        self.arguments.get(position).copied()
    }

    pub(crate) fn option_slot(&self, key: &OptionKey) -> Option<usize> {
        match key {
            OptionKey::Short(short) => self.short_options.get(short).copied(),
            OptionKey::Long(long) => self.long_options.get(long).copied(),
        }
    }

    pub(crate) fn command_slot(&self, name: &str) -> Option<usize> {
        self.commands.get(name).copied()
    }

    pub(crate) fn name_slot(&self, name: &str) -> Option<usize> {
        self.names.get(name).copied()
    }

    pub(crate) fn syntax(&self) -> String {
        self.entities
            .iter()
            .map(Expected::syntax)
            .collect::<Vec<String>>()
            .join(" ")
    }
}
