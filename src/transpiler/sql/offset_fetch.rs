use super::super::pagination::{render_clause, render_offset_fetch, RewrittenClause};
use super::super::traits::SqlGenerator;

/// T-SQL style pagination.
///
/// A bare limit still uses `TOP n`; as soon as an offset is present the whole
/// clause moves behind ORDER BY as `OFFSET m ROWS [FETCH NEXT n ROWS ONLY]`.
pub struct OffsetFetchGenerator;

impl SqlGenerator for OffsetFetchGenerator {
    fn name(&self) -> &'static str {
        "offset-fetch"
    }

    fn pagination(&self, limit: Option<u64>, offset: Option<u64>) -> Option<RewrittenClause> {
        match (limit, offset) {
            (_, Some(o)) => Some(RewrittenClause::after_order_by(render_offset_fetch(o, limit))),
            (Some(_), None) => Some(RewrittenClause::pre_columns(render_clause(limit, None))),
            (None, None) => None,
        }
    }
}
