use std::collections::BTreeMap;
use std::sync::Arc;

use crate::constant::*;
use crate::matcher::api::Grammar;
use crate::matcher::model::{ArgumentModel, Binding};
use crate::model::OptionKey;
use crate::parser::ParseError;
use crate::prelude::Descriptor;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Matches the tokens of one grammar level.
///
/// Offsets are token indices into the sequence handed to the outermost parser.
#[derive(Debug)]
pub(crate) struct TokenMatcher<'g> {
    grammar: &'g Arc<Grammar>,
    next_argument: usize,
    bindings: BTreeMap<usize, Binding>,
}

impl<'g> TokenMatcher<'g> {
    pub(crate) fn new(grammar: &'g Arc<Grammar>) -> Self {
        Self {
            grammar,
            next_argument: 0,
            bindings: BTreeMap::default(),
        }
    }

    /// Run the scan over `tokens`, which start at `base` in the outermost sequence.
    pub(crate) fn consume(mut self, tokens: &[&str], base: usize) -> Result<ArgumentModel, ParseError> {
        let mut index = 0;

        while index < tokens.len() {
            let token = tokens[index];
            let offset = base + index;

            if let Some(slot) = self.grammar.command_slot(token) {
                // The command owns every remaining token.
                let command = self.grammar.command(slot);
                let remaining = &tokens[index + 1..];
                #[cfg(feature = "tracing_debug")]
                {
                    debug!(
                        "Delegating {} remaining token(s) to command '{}'.",
                        remaining.len(),
                        command.name()
                    );
                }

                let model = command.parser().consume(remaining, offset + 1)?;
                self.bind(slot, Binding::Command(model));
                break;
            }

            index += self.feed(token, tokens.get(index + 1).copied(), offset)?;
        }

        self.close(base + tokens.len())
    }

    // Returns the number of tokens consumed: the token itself, plus the value of a value-expecting option.
    fn feed(&mut self, token: &str, lookahead: Option<&str>, offset: usize) -> Result<usize, ParseError> {
        // 1. Find a 'long' option, such as:
        //  --extra
        //  --extra ..
        // 2. Find 'short' option(s), such as (both -b and -x are example short options):
        //  -x
        //  -x ..
        //  -bx ..
        // 3. Match against the next positional argument.
        if token == STANDALONE_DASH {
            self.match_argument(token, offset)
        } else if let Some(key) = token.strip_prefix(LONG_PREFIX) {
            self.match_option(token, key, lookahead, offset)
        } else if let Some(keys) = token.strip_prefix(SHORT_PREFIX) {
            self.match_option_short(token, keys, lookahead, offset)
        } else {
            self.match_argument(token, offset)
        }
    }

    fn match_argument(&mut self, token: &str, offset: usize) -> Result<usize, ParseError> {
        match self.grammar.argument_slot(self.next_argument) {
            Some(slot) => {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!(
                        "Binding '{token}' to argument '{}'.",
                        self.grammar.entity(slot).name()
                    );
                }

                self.next_argument += 1;
                self.bind(slot, Binding::Value(token.to_string()));
                Ok(1)
            }
            None => Err(ParseError::UnknownArgument {
                token: token.to_string(),
                offset,
            }),
        }
    }

    fn match_option(
        &mut self,
        token: &str,
        key: &str,
        lookahead: Option<&str>,
        offset: usize,
    ) -> Result<usize, ParseError> {
        match self.grammar.option_slot(&OptionKey::Long(key.to_string())) {
            Some(slot) => self.match_value(slot, lookahead, offset),
            None => Err(ParseError::UnknownArgument {
                token: token.to_string(),
                offset,
            }),
        }
    }

    fn match_option_short(
        &mut self,
        token: &str,
        keys: &str,
        lookahead: Option<&str>,
        offset: usize,
    ) -> Result<usize, ParseError> {
        let count = keys.chars().count();
        let mut consumed = 1;

        for (index, key) in keys.chars().enumerate() {
            let slot = self
                .grammar
                .option_slot(&OptionKey::Short(key))
                .ok_or_else(|| ParseError::UnknownArgument {
                    token: token.to_string(),
                    offset,
                })?;

            if index + 1 == count {
                // Only the final key of a cluster may take the following token.
                consumed = self.match_value(slot, lookahead, offset)?;
            } else {
                let option = self.grammar.keyed_option(slot);

                if option.expects_value() {
                    return Err(ParseError::MissingValue {
                        option: option.name().to_string(),
                        offset,
                    });
                }

                self.bind(slot, Binding::Flag);
            }
        }

        Ok(consumed)
    }

    fn match_value(
        &mut self,
        slot: usize,
        lookahead: Option<&str>,
        offset: usize,
    ) -> Result<usize, ParseError> {
        let option = self.grammar.keyed_option(slot);

        if option.expects_value() {
            match lookahead {
                Some(value) => {
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Binding '{value}' to option '{}'.", option.name());
                    }

                    self.bind(slot, Binding::Value(value.to_string()));
                    Ok(2)
                }
                None => Err(ParseError::MissingValue {
                    option: option.name().to_string(),
                    offset,
                }),
            }
        } else {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Setting flag '{}'.", option.name());
            }

            self.bind(slot, Binding::Flag);
            Ok(1)
        }
    }

    // Repeated options overwrite their previous binding.
    fn bind(&mut self, slot: usize, binding: Binding) {
        self.bindings.insert(slot, binding);
    }

    fn close(self, end: usize) -> Result<ArgumentModel, ParseError> {
        let names: Vec<String> = self
            .grammar
            .entities()
            .iter()
            .enumerate()
            .filter(|(slot, expected)| expected.is_mandatory() && !self.bindings.contains_key(slot))
            .map(|(_, expected)| expected.name().to_string())
            .collect();

        if names.is_empty() {
            Ok(ArgumentModel::new(self.grammar.clone(), self.bindings))
        } else {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Unbound mandatory entities: {names:?}.");
            }

            Err(ParseError::MissingArgument { names, offset: end })
        }
    }
}
