//! Structured statement to FairCom SQL.

pub mod ddl;
pub mod dialect;
pub mod dml;
pub mod expr;
pub mod pagination;
pub mod sql;
pub mod traits;


pub use dialect::Dialect;
pub use pagination::{Placement, RewrittenClause, render_clause};
pub use traits::SqlGenerator;

use crate::ast::{CreateTable, SelectStmt, Statement, Value};
use crate::error::FaircomResult;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompileOptions {
    /// Inline bound values instead of emitting `?` placeholders.
    pub literal_binds: bool,
}

impl CompileOptions {
    pub fn literal() -> Self {
        Self {
            literal_binds: true,
        }
    }
}

/// Compiled SQL plus the values for its placeholders, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Compiled {
    pub sql: String,
    pub params: Vec<Value>,
}

/// Trait for converting statements to SQL.
pub trait ToSql {
    fn compile(&self, dialect: Dialect, options: CompileOptions) -> FaircomResult<Compiled>;

    /// Convert to SQL using the default (TOP/SKIP) dialect.
    fn to_sql(&self) -> FaircomResult<String> {
        self.to_sql_with_dialect(Dialect::default())
    }

    fn to_sql_with_dialect(&self, dialect: Dialect) -> FaircomResult<String> {
        Ok(self.compile(dialect, CompileOptions::default())?.sql)
    }
}

impl ToSql for SelectStmt {
    fn compile(&self, dialect: Dialect, options: CompileOptions) -> FaircomResult<Compiled> {
        dml::select::build_select(self, dialect, options)
    }
}

impl ToSql for CreateTable {
    fn compile(&self, dialect: Dialect, _options: CompileOptions) -> FaircomResult<Compiled> {
        Ok(Compiled {
            sql: ddl::build_create_table(self, dialect),
            params: Vec::new(),
        })
    }
}

impl ToSql for Statement {
    fn compile(&self, dialect: Dialect, options: CompileOptions) -> FaircomResult<Compiled> {
        match self {
            Statement::Select(s) => s.compile(dialect, options),
            Statement::CreateTable(t) => t.compile(dialect, options),
            Statement::DropTable(name) => Ok(Compiled {
                sql: ddl::build_drop_table(name, dialect),
                params: Vec::new(),
            }),
        }
    }
}
