use std::collections::BTreeMap;
use std::sync::Arc;

use crate::matcher::api::{Expected, Grammar};
use crate::model::OptionKey;
use crate::prelude::Descriptor;

/// What a successful parse bound to one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// The literal token bound to a plain argument or a value-expecting option.
    Value(String),
    /// A flag option was present.
    Flag,
    /// A command was invoked; holds the result of its nested parse.
    Command(ArgumentModel),
}

impl Binding {
    /// The bound token, if this is a [`Binding::Value`].
    pub fn value(&self) -> Option<&str> {
        match self {
            Binding::Value(value) => Some(value),
            _ => None,
        }
    }

    /// The nested result, if this is a [`Binding::Command`].
    pub fn model(&self) -> Option<&ArgumentModel> {
        match self {
            Binding::Command(model) => Some(model),
            _ => None,
        }
    }
}

/// The result of a successful parse.
///
/// Every mandatory entity of the grammar is bound; entities that were not matched are absent.
/// Lookups are by entity name, or by either key form for options.
#[derive(Debug, Clone)]
pub struct ArgumentModel {
    grammar: Arc<Grammar>,
    bindings: BTreeMap<usize, Binding>,
}

impl ArgumentModel {
    pub(crate) fn new(grammar: Arc<Grammar>, bindings: BTreeMap<usize, Binding>) -> Self {
        Self { grammar, bindings }
    }

    /// The binding of the entity called `name`, if it was matched.
    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.grammar
            .name_slot(name)
            .and_then(|slot| self.bindings.get(&slot))
    }

    /// Whether the entity called `name` was matched.
    pub fn is_present(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// The token bound to the plain argument called `name`.
    pub fn argument(&self, name: &str) -> Option<&str> {
        match self.grammar.name_slot(name) {
            Some(slot) => match self.grammar.entity(slot) {
                Expected::Argument(_) => self.bindings.get(&slot).and_then(Binding::value),
                _ => None,
            },
            None => None,
        }
    }

    /// The value of the option with the key `key`.
    ///
    /// Either key form of the option finds the same value.
    /// Flags have no value; see [`ArgumentModel::is_option_present`].
    pub fn option_value(&self, key: impl Into<OptionKey>) -> Option<&str> {
        self.option_binding(&key.into()).and_then(Binding::value)
    }

    /// Whether the option with the key `key` was matched, as a flag or with a value.
    pub fn is_option_present(&self, key: impl Into<OptionKey>) -> bool {
        self.option_binding(&key.into()).is_some()
    }

    fn option_binding(&self, key: &OptionKey) -> Option<&Binding> {
        self.grammar
            .option_slot(key)
            .and_then(|slot| self.bindings.get(&slot))
    }

    /// The nested result of the command called `name`, if it was invoked.
    pub fn command(&self, name: &str) -> Option<&ArgumentModel> {
        self.grammar
            .command_slot(name)
            .and_then(|slot| self.bindings.get(&slot))
            .and_then(Binding::model)
    }

    /// The command which consumed the tail of the tokens, with its nested result.
    pub fn invoked_command(&self) -> Option<(&str, &ArgumentModel)> {
        self.bindings.iter().find_map(|(slot, binding)| {
            binding
                .model()
                .map(|model| (self.grammar.command(*slot).name(), model))
        })
    }

    /// The matched entities with their bindings, in declaration order.
    pub fn bindings(&self) -> impl Iterator<Item = (&Expected, &Binding)> + '_ {
        self.bindings
            .iter()
            .map(|(slot, binding)| (self.grammar.entity(*slot), binding))
    }

    /// The number of matched entities.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether nothing was matched.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// The usage syntax of the grammar this model was parsed against.
    pub fn syntax(&self) -> String {
        self.grammar.syntax()
    }
}

// Models are equal when parsed against the same grammar with the same bindings.
impl PartialEq for ArgumentModel {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.grammar, &other.grammar) && self.bindings == other.bindings
    }
}

impl Eq for ArgumentModel {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::api::{KeyedOption, PlainArgument};

    fn grammar() -> Arc<Grammar> {
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
        Arc::new(grammar)
    }

    #[test]
    fn lookups() {
        // Setup
        let model = ArgumentModel::new(
            grammar(),
            BTreeMap::from([
                (0, Binding::Value("hello".to_string())),
                (2, Binding::Value("5".to_string())),
            ]),
        );

        // Execute & Verify
        assert_eq!(model.argument("foo"), Some("hello"));
        assert_eq!(model.argument("extra"), None);
        assert_eq!(model.option_value('x'), Some("5"));
        assert_eq!(model.option_value("extra"), Some("5"));
        assert!(model.is_option_present('x'));
        assert!(!model.is_option_present('b'));
        assert!(!model.is_option_present("bar"));
        assert!(model.is_present("foo"));
        assert!(!model.is_present("bar"));
        assert!(!model.is_present("missing"));
        assert_eq!(model.command("foo"), None);
        assert_eq!(model.invoked_command(), None);
        assert_eq!(model.len(), 2);
        assert_eq!(model.syntax(), "<foo> [-b] [-x <extra>]");
    }

    #[test]
    fn flag_has_no_value() {
        let model = ArgumentModel::new(grammar(), BTreeMap::from([(1, Binding::Flag)]));
        assert!(model.is_option_present('b'));
        assert!(model.is_option_present("bar"));
        assert_eq!(model.option_value('b'), None);
        assert_eq!(model.get("bar"), Some(&Binding::Flag));
    }

    #[test]
    fn bindings_in_declaration_order() {
        let model = ArgumentModel::new(
            grammar(),
            BTreeMap::from([
                (2, Binding::Value("5".to_string())),
                (0, Binding::Value("hello".to_string())),
                (1, Binding::Flag),
            ]),
        );
        let names: Vec<&str> = model.bindings().map(|(e, _)| e.name()).collect();
        assert_eq!(names, vec!["foo", "bar", "extra"]);
    }

    #[test]
    fn equality_requires_same_grammar() {
        let shared = grammar();
        let a = ArgumentModel::new(shared.clone(), BTreeMap::from([(1, Binding::Flag)]));
        let b = ArgumentModel::new(shared, BTreeMap::from([(1, Binding::Flag)]));
        let c = ArgumentModel::new(grammar(), BTreeMap::from([(1, Binding::Flag)]));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
