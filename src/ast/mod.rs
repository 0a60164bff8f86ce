//! Structured query representation handed over by a query builder.

pub mod expr;
pub mod stmt;
pub mod values;

pub use expr::*;
pub use stmt::*;
pub use values::*;
