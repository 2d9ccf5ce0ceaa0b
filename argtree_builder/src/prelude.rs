//! Traits which, typically, may be imported without concern: `use argtree::prelude::*`.

/// The capabilities shared by every grammar entity: plain arguments, options and commands.
// Needs to be imported in order to inspect the entities of a `Parser`.
pub trait Descriptor {
    /// The name of the entity, unique within its grammar level.
    fn name(&self) -> &str;

    /// The description documented on the entity, if any.
    fn description(&self) -> Option<&str>;

    /// Whether a successful parse must bind this entity.
    fn is_mandatory(&self) -> bool;

    /// The declaration order of the entity, shared across arguments, options and commands.
    fn ordinal(&self) -> usize;

    /// Whether the entity is matched by its key (`-k`, `--key`).
    fn is_option(&self) -> bool {
        false
    }

    /// Whether the entity owns a nested grammar.
    fn is_command(&self) -> bool {
        false
    }

    /// The name as it is presented to a user.
    fn full_name(&self) -> String {
        self.name().to_string()
    }
}
