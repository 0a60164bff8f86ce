//! # faircom: FairCom SQL dialect
//!
//! Translates portable SQL into FairCom SQL: `LIMIT`/`OFFSET` become
//! `TOP n SKIP m` ahead of the column list, pagination values are always
//! inlined as literals, reserved words used as aliases get quoted, and
//! booleans, concatenation and identity columns use the T-SQL spelling.
//!
//! ## Quick Example
//!
//! ```rust
//! use faircom::prelude::*;
//!
//! // SQL text from an ORM or BI tool
//! let sql = faircom::rewrite("SELECT id, name FROM t ORDER BY id LIMIT 5 OFFSET 10").unwrap();
//! assert_eq!(sql, "SELECT TOP 5 SKIP 10 id, name FROM t ORDER BY id");
//!
//! // A structured query
//! let stmt = SelectStmt::table("t").columns(["id", "name"]).limit(5).offset(0);
//! assert_eq!(stmt.to_sql().unwrap(), "SELECT TOP 5 SKIP 0 id, name FROM t");
//! ```
//!
//! ## Layers
//!
//! | Module          | Job                                              |
//! |-----------------|--------------------------------------------------|
//! | [`extract`]     | LIMIT/OFFSET node to a literal integer           |
//! | [`transpiler`]  | Structured statement to SQL, per dialect profile |
//! | [`rewriter`]    | LIMIT/OFFSET in SQL text to TOP/SKIP             |
//! | [`quoter`]      | Reserved-word quoting                            |
//! | [`engine`]      | Connection and cursor over the JSON DB API       |

pub mod ast;
pub mod config;
pub mod engine;
pub mod error;
pub mod extract;
pub mod lexer;
pub mod quoter;
pub mod rewriter;
pub mod transpiler;

pub mod prelude {
    pub use crate::ast::*;
    pub use crate::config::ConnectOptions;
    pub use crate::engine::{Connection, Cursor, HttpTransport, Row, Transport};
    pub use crate::error::*;
    pub use crate::rewriter::StatementRewriter;
    pub use crate::transpiler::{CompileOptions, Dialect, ToSql};
}

use ast::Params;
use error::FaircomResult;

/// Rewrite `LIMIT`/`OFFSET` in SQL text for the default dialect.
///
/// # Example
///
/// ```
/// let sql = faircom::rewrite("SELECT * FROM (SELECT id FROM t LIMIT 2) s LIMIT 3").unwrap();
/// assert_eq!(sql, "SELECT TOP 3 * FROM (SELECT id FROM t LIMIT 2) s");
/// ```
pub fn rewrite(sql: &str) -> FaircomResult<String> {
    rewriter::StatementRewriter::default().rewrite(sql)
}

/// Quote reserved words in alias, ORDER BY and GROUP BY positions.
pub fn quote_reserved(sql: &str) -> String {
    quoter::quote_reserved(sql)
}

/// Everything the cursor does to a statement before sending it.
pub fn prepare(sql: &str, params: Params) -> FaircomResult<(String, Params)> {
    rewriter::StatementRewriter::default().prepare(sql, params)
}
