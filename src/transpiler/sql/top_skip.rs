use super::super::pagination::{render_clause, RewrittenClause};
use super::super::traits::SqlGenerator;

/// FairCom native pagination: `SELECT TOP n SKIP m cols ...`.
pub struct TopSkipGenerator;

impl SqlGenerator for TopSkipGenerator {
    fn name(&self) -> &'static str {
        "top-skip"
    }

    fn pagination(&self, limit: Option<u64>, offset: Option<u64>) -> Option<RewrittenClause> {
        if limit.is_none() && offset.is_none() {
            return None;
        }
        Some(RewrittenClause::pre_columns(render_clause(limit, offset)))
    }
}
