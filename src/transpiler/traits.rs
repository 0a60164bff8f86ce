use crate::ast::SqlType;
use crate::quoter::is_reserved;

use super::pagination::RewrittenClause;

/// Per-profile SQL spelling.
///
/// Both FairCom profiles share T-SQL spelling for identifiers, booleans,
/// concatenation and identity columns; they differ only in where pagination
/// goes.
pub trait SqlGenerator {
    /// Short profile name, as accepted by `Dialect::from_str`.
    fn name(&self) -> &'static str;

    /// Pagination clause for resolved limit/offset values.
    ///
    /// Returns at most one clause so that two placement strategies can never
    /// both fire for the same statement.
    fn pagination(&self, limit: Option<u64>, offset: Option<u64>) -> Option<RewrittenClause>;

    fn quote_identifier(&self, id: &str) -> String {
        format!("\"{}\"", id.replace('"', "\"\""))
    }

    /// Quote only identifiers that collide with reserved words or are not simple.
    fn format_identifier(&self, id: &str) -> String {
        if id == "*" || !needs_quoting(id) {
            id.to_string()
        } else {
            self.quote_identifier(id)
        }
    }

    /// `schema.table` / `t.col`, each part formatted on its own.
    fn format_path(&self, path: &str) -> String {
        path.split('.')
            .map(|part| self.format_identifier(part))
            .collect::<Vec<_>>()
            .join(".")
    }

    fn placeholder(&self) -> &'static str {
        "?"
    }

    fn concat_operator(&self) -> &'static str {
        " + "
    }

    fn identity_clause(&self) -> &'static str {
        "IDENTITY(1,1)"
    }

    fn type_name(&self, ty: &SqlType) -> String {
        match ty {
            SqlType::SmallInt => "SMALLINT".to_string(),
            SqlType::Integer => "INTEGER".to_string(),
            SqlType::BigInt => "BIGINT".to_string(),
            SqlType::Boolean => "BIT".to_string(),
            SqlType::Float => "FLOAT".to_string(),
            SqlType::Double => "DOUBLE PRECISION".to_string(),
            SqlType::Numeric(p, s) => format!("NUMERIC({}, {})", p, s),
            SqlType::Varchar(Some(n)) => format!("VARCHAR({})", n),
            SqlType::Varchar(None) => "VARCHAR".to_string(),
            SqlType::Text => "LVARCHAR".to_string(),
            SqlType::Date => "DATE".to_string(),
            SqlType::Time => "TIME".to_string(),
            SqlType::Timestamp => "TIMESTAMP".to_string(),
        }
    }
}

/// Whether an identifier must be quoted to survive the FairCom parser.
pub fn needs_quoting(id: &str) -> bool {
    let mut chars = id.chars();
    let simple = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };
    !simple || is_reserved(id)
}
