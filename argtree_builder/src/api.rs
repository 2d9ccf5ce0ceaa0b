mod argument;
mod command;
mod core;
mod option;

pub use self::core::*;
pub use argument::*;
pub use command::*;
pub use option::*;
