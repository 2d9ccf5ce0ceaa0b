//! `argtree` is a command line grammar engine for Rust.
//!
//! A program declares the grammar it expects through a fluent builder chain, and parses its invocation tokens against that grammar.
//! The grammar is made of three kinds of entities:
//! * *Plain arguments*: values bound by position, in their order of declaration.
//! * *Options*: flags or values bound by key, either a short key `-k` or a long key `--key` (or both).
//! * *Commands*: named branches, each of which owns an independent nested grammar.
//!
//! A successful parse produces an [`ArgumentModel`], which is queried by entity name or option key.
//! `argtree` never converts values: every bound value is the literal token from the command line.
//!
//! # Usage
//! ```no_run
#![doc = include_str!("../demos/foo_bar.rs")]
//! ```
//!
//! ```console
//! $ foo_bar world -x again
//! Hello world again
//!
//! $ foo_bar --bar world
//! HELLO WORLD
//!
//! $ foo_bar world -x
//! Parse error: Option 'extra' requires a value.
//! world -x
//!       ^
//! usage: foo_bar <foo> [-b] [-x <extra>]
//!
//! $ foo_bar
//! Parse error: Missing mandatory 'foo'.
//!
//! ^
//! usage: foo_bar <foo> [-b] [-x <extra>]
//! ```
//!
//! # Builder Api
//! Start with a [`ParserBuilder`], and declare entities in order.
//! Each `build_*` method returns a child builder for one entity; the child's `build` declares the entity and returns to the [`ParserBuilder`].
//! The `add_*` methods are shortcuts for the common cases: a mandatory argument, or an optional flag.
//! Finally, [`ParserBuilder::build_and_get`] finalizes the grammar into an immutable [`Parser`].
//!
//! Every entity is stamped with an *ordinal*, its position amongst all the entities of its grammar level.
//! Ordinals drive the usage syntax and the help message, but not the matching: only plain arguments are matched by position.
//!
//! ### Sub-commands
//! A command is declared with [`ParserBuilder::build_command`].
//! Its nested grammar is either declared in-line via [`CommandBuilder::build_parser`] (whose `build` returns to the command builder), or set from a separately built [`Parser`] via [`CommandBuilder::parser`].
//! Nested grammars may themselves contain commands, to any depth.
//!
//! ```no_run
#![doc = include_str!("../demos/nested_commands.rs")]
//! ```
//!
//! ```console
//! $ nested_commands remote add origin https://example.org --fetch
//! Adding 'origin' at https://example.org (fetch: true).
//!
//! $ nested_commands remote remove
//! Parse error: Missing mandatory 'name'.
//! remote remove
//!               ^
//! usage: nested_commands [-v] remote [add <name> <url> [-f]] [remove <name>]
//! ```
//!
//! ### Detached builders
//! Every child builder may also be created on its own, and finished with `build_and_get`.
//! The finished entity is declared later with [`ParserBuilder::add`], taking the next ordinal of that grammar level.
//!
//! ```no_run
#![doc = include_str!("../demos/detached.rs")]
//! ```
//!
//! ### Errors
//! Grammar errors are [`ConfigError`]s: an empty name, an option without keys, a repeated name or key, a command without a parser, a parent-returning `build` on a detached builder, or a `build_and_get` on a builder which still has a parent.
//! Errors raised by the `add*` shortcuts are deferred, and reported by the next `build`/`build_and_get` of the grammar level.
//!
//! Input errors are [`ParseError`]s, each of which carries the offset of the token at which it was detected.
//! [`Parser::parse`] reports the error and exits; [`Parser::parse_tokens`] returns it.
//!
//! # Cli Semantics
//! `argtree` parses the tokens in a single left to right scan, according to the following rules.
//!
//! * A token which names a command delegates *every* remaining token to that command's grammar.
//! The scan of the current grammar then ends; later tokens are never interpreted by it.
//! * A token starting with `--` is a long key, and one starting with `-` is a short key.
//! An unknown key fails with [`ParseError::UnknownArgument`]; it is never taken as a plain argument.
//! * Short keys may be combined: `-ab` is equivalent to `-a -b`.
//! Only the final key in the combination may expect a value.
//! * An option which expects a value consumes the following token verbatim, even when it looks like a key.
//! A missing value fails with [`ParseError::MissingValue`].
//! * Any other token (including a lone `-`) binds to the next plain argument, or fails with [`ParseError::UnknownArgument`] when none remain.
//! * Repeating an option overwrites its previous binding.
//! * Once the scan ends, every unbound mandatory entity is reported at once by a single [`ParseError::MissingArgument`].
//!
//! # Features
//! * `tracing_debug`: Emit `tracing` debug events for every decision of the scan.
pub use argtree_builder::*;
