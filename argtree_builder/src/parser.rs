mod base;
mod columns;
mod interface;
mod printer;

pub use base::*;
pub(crate) use interface::*;
pub(crate) use printer::*;
