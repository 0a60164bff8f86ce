//! Pagination clause policy.

/// Where a pagination clause goes relative to the rest of the SELECT.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Between `SELECT` and the column list (before `DISTINCT`).
    PreColumns,
    /// After `ORDER BY`, at the end of the statement.
    AfterOrderBy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewrittenClause {
    pub placement: Placement,
    pub text: String,
}

impl RewrittenClause {
    pub fn pre_columns(text: String) -> Self {
        Self {
            placement: Placement::PreColumns,
            text,
        }
    }

    pub fn after_order_by(text: String) -> Self {
        Self {
            placement: Placement::AfterOrderBy,
            text,
        }
    }
}

/// Render the pre-column fragment.
///
/// | limit | offset | fragment          |
/// |-------|--------|-------------------|
/// | set   | set    | `TOP l SKIP o`    |
/// | set   | unset  | `TOP l`           |
/// | unset | set    | `SKIP o`          |
/// | unset | unset  | empty             |
///
/// An offset of zero is still emitted.
pub fn render_clause(limit: Option<u64>, offset: Option<u64>) -> String {
    match (limit, offset) {
        (Some(l), Some(o)) => format!("TOP {} SKIP {}", l, o),
        (Some(l), None) => format!("TOP {}", l),
        (None, Some(o)) => format!("SKIP {}", o),
        (None, None) => String::new(),
    }
}

/// Render standard trailing pagination: `OFFSET o ROWS [FETCH NEXT l ROWS ONLY]`.
pub fn render_offset_fetch(offset: u64, limit: Option<u64>) -> String {
    match limit {
        Some(l) => format!("OFFSET {} ROWS FETCH NEXT {} ROWS ONLY", offset, l),
        None => format!("OFFSET {} ROWS", offset),
    }
}
