//! Statement-level rewriting of already-serialized SQL.
//!
//! Only the outermost `LIMIT`/`OFFSET` of each `;`-separated statement is
//! touched; subqueries keep their own clauses. Statements without a depth-0
//! `LIMIT` come back unchanged, which makes the rewrite idempotent.

use std::ops::Range;

use crate::ast::{BindParam, ClauseValue, Params, Value};
use crate::error::FaircomResult;
use crate::extract::extract;
use crate::lexer::{next_significant, tokenize, Token, TokenKind};
use crate::quoter::quote_reserved;
use crate::transpiler::{Dialect, Placement, RewrittenClause};

/// A pagination operand as written in the statement.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Operand<'a> {
    Number(u64),
    /// `?`, by its position among all `?` placeholders.
    Positional(usize),
    /// `:name`, without the colon.
    Named(&'a str),
}

/// The outermost LIMIT/OFFSET found in a statement.
#[derive(Debug)]
struct Site<'a> {
    /// Token ranges to drop, each including its leading whitespace.
    spans: Vec<Range<usize>>,
    limit: Operand<'a>,
    offset: Option<Operand<'a>>,
}

/// One statement's resolved rewrite.
#[derive(Debug)]
struct Edit<'a> {
    site: Site<'a>,
    select_idx: usize,
    plan: RewritePlan,
    /// An existing `TOP n` folded into `FETCH NEXT n`.
    top_span: Option<Range<usize>>,
}

impl Edit<'_> {
    fn drops(&self, idx: usize) -> bool {
        self.site.spans.iter().chain(&self.top_span).any(|s| s.contains(&idx))
    }
}

/// What the rewriter found and would emit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewritePlan {
    pub limit: u64,
    pub offset: Option<u64>,
    /// A `TOP` was already present after the outermost SELECT.
    pub existing_top: bool,
    pub clause: Option<RewrittenClause>,
}

/// Rewrites `LIMIT`/`OFFSET` in SQL text into a FairCom pagination clause.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatementRewriter {
    dialect: Dialect,
}

impl StatementRewriter {
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Rewrite a statement that carries no parameters.
    pub fn rewrite(&self, sql: &str) -> FaircomResult<String> {
        Ok(self.rewrite_with_params(sql, Params::default())?.0)
    }

    /// Rewrite a statement, resolving placeholder pagination values from
    /// `params`. Parameters consumed by the pagination clause are removed
    /// from the returned list.
    pub fn rewrite_with_params(&self, sql: &str, params: Params) -> FaircomResult<(String, Params)> {
        let span = tracing::debug_span!("rewrite", dialect = %self.dialect);
        let _enter = span.enter();

        let tokens = tokenize(sql)?;
        let mut edits = Vec::new();
        for statement in statements(&tokens) {
            if let Some(edit) = self.edit(&tokens, statement, &params)? {
                edits.push(edit);
            }
        }
        if edits.is_empty() {
            return Ok((sql.to_string(), params));
        }

        let mut insert_after: Vec<(usize, &str)> = Vec::new();
        let mut insert_before: Vec<(usize, &str)> = Vec::new();
        for edit in &edits {
            let Some(clause) = &edit.plan.clause else { continue };
            match clause.placement {
                Placement::PreColumns => {
                    let anchor = if edit.plan.existing_top {
                        top_value_end(&tokens, edit.select_idx)
                    } else {
                        Some(edit.select_idx)
                    };
                    insert_after.extend(anchor.map(|i| (i, clause.text.as_str())));
                }
                Placement::AfterOrderBy => {
                    let first_dropped = edit.site.spans.iter().map(|s| s.start).min();
                    insert_before.extend(first_dropped.map(|i| (i, clause.text.as_str())));
                }
            }
        }

        let mut out = String::with_capacity(sql.len() + 16);
        for (i, token) in tokens.iter().enumerate() {
            for (_, text) in insert_before.iter().filter(|(at, _)| *at == i) {
                out.push(' ');
                out.push_str(text);
            }
            if !edits.iter().any(|e| e.drops(i)) {
                out.push_str(token.text);
            }
            for (_, text) in insert_after.iter().filter(|(at, _)| *at == i) {
                out.push(' ');
                out.push_str(text);
            }
        }

        let params = remove_consumed(&tokens, &edits, params);
        tracing::debug!(sql = %out, statements = edits.len(), "rewrote pagination");
        Ok((out, params))
    }

    /// Pagination rewrite followed by reserved-word quoting; what the cursor
    /// sends to the server.
    pub fn prepare(&self, sql: &str, params: Params) -> FaircomResult<(String, Params)> {
        let (sql, params) = self.rewrite_with_params(sql, params)?;
        Ok((quote_reserved(&sql), params))
    }

    /// Describe the rewrite of the first statement that has one, without
    /// performing it.
    pub fn explain(&self, sql: &str, params: &Params) -> FaircomResult<Option<RewritePlan>> {
        let tokens = tokenize(sql)?;
        for statement in statements(&tokens) {
            if let Some(edit) = self.edit(&tokens, statement, params)? {
                return Ok(Some(edit.plan));
            }
        }
        Ok(None)
    }

    fn edit<'a>(
        &self,
        tokens: &[Token<'a>],
        statement: Range<usize>,
        params: &Params,
    ) -> FaircomResult<Option<Edit<'a>>> {
        let Some(site) = find_site(tokens, statement.clone()) else {
            return Ok(None);
        };
        let Some(select_idx) = outer_select(tokens, statement) else {
            tracing::debug!("LIMIT without an outermost SELECT, leaving statement as is");
            return Ok(None);
        };
        let Some((plan, top_span)) = self.plan(tokens, &site, select_idx, params)? else {
            return Ok(None);
        };
        Ok(Some(Edit {
            site,
            select_idx,
            plan,
            top_span,
        }))
    }

    fn plan(
        &self,
        tokens: &[Token<'_>],
        site: &Site<'_>,
        select_idx: usize,
        params: &Params,
    ) -> FaircomResult<Option<(RewritePlan, Option<Range<usize>>)>> {
        let Some(limit) = resolve(&site.limit, params)? else {
            tracing::debug!(limit = ?site.limit, "unresolvable LIMIT, leaving statement as is");
            return Ok(None);
        };
        let offset = match &site.offset {
            Some(op) => match resolve(op, params)? {
                Some(o) => Some(o),
                None => {
                    tracing::debug!(offset = ?op, "unresolvable OFFSET, leaving statement as is");
                    return Ok(None);
                }
            },
            None => None,
        };

        let existing_top = next_significant(tokens, select_idx)
            .is_some_and(|i| tokens[i].is_keyword("TOP"));
        let generator = self.dialect.generator();
        // an explicit TOP wins over LIMIT
        let mut clause = generator.pagination((!existing_top).then_some(limit), offset);
        let mut top_span = None;

        // OFFSET ... FETCH cannot follow a TOP; its count moves into FETCH NEXT
        if existing_top
            && clause
                .as_ref()
                .is_some_and(|c| c.placement == Placement::AfterOrderBy)
        {
            let Some((count, span)) = top_count(tokens, select_idx) else {
                tracing::debug!("TOP is not a plain count, leaving statement as is");
                return Ok(None);
            };
            clause = generator.pagination(Some(count), offset);
            top_span = Some(span);
        }

        Ok(Some((
            RewritePlan {
                limit,
                offset,
                existing_top,
                clause,
            },
            top_span,
        )))
    }
}

/// Token ranges of the statements separated by depth-0 `;`.
fn statements(tokens: &[Token<'_>]) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut start = 0;
    for (i, token) in tokens.iter().enumerate() {
        if token.kind == TokenKind::Semicolon && token.depth == 0 {
            ranges.push(start..i);
            start = i + 1;
        }
    }
    ranges.push(start..tokens.len());
    ranges
}

fn outer_select(tokens: &[Token<'_>], statement: Range<usize>) -> Option<usize> {
    statement
        .into_iter()
        .find(|&i| tokens[i].depth == 0 && tokens[i].is_keyword("SELECT"))
}

fn find_site<'a>(tokens: &[Token<'a>], statement: Range<usize>) -> Option<Site<'a>> {
    let at_top = |i: &usize, keyword: &str| tokens[*i].depth == 0 && tokens[*i].is_keyword(keyword);
    let limit_idx = statement.clone().find(|i| at_top(i, "LIMIT"))?;
    let first = next_significant(tokens, limit_idx)?;

    let (limit, mut offset, limit_end) = match next_significant(tokens, first)
        .filter(|&i| tokens[i].kind == TokenKind::Comma)
    {
        // MySQL: LIMIT offset, count
        Some(comma) => {
            let second = next_significant(tokens, comma)?;
            (
                operand(tokens, second)?,
                Some(operand(tokens, first)?),
                second,
            )
        }
        None => (operand(tokens, first)?, None, first),
    };

    let mut spans = vec![with_leading_whitespace(tokens, limit_idx)..limit_end + 1];

    if offset.is_none() {
        // OFFSET belongs to the tail clause: after ORDER BY, or right before LIMIT
        let tail_start = statement
            .clone()
            .find(|i| at_top(i, "ORDER"))
            .unwrap_or(limit_idx);
        let found = statement
            .filter(|i| at_top(i, "OFFSET"))
            .filter_map(|i| offset_clause(tokens, i).map(|(op, end)| (i, op, end)))
            .find(|&(i, _, end)| i > tail_start || next_significant(tokens, end) == Some(limit_idx));
        if let Some((offset_idx, op, end)) = found {
            offset = Some(op);
            spans.push(with_leading_whitespace(tokens, offset_idx)..end + 1);
        }
    }

    Some(Site {
        spans,
        limit,
        offset,
    })
}

/// Operand and last token of `OFFSET m [ROWS]`.
fn offset_clause<'a>(tokens: &[Token<'a>], offset_idx: usize) -> Option<(Operand<'a>, usize)> {
    let value_idx = next_significant(tokens, offset_idx)?;
    let op = operand(tokens, value_idx)?;
    let end = next_significant(tokens, value_idx)
        .filter(|&i| tokens[i].is_keyword("ROWS") || tokens[i].is_keyword("ROW"))
        .unwrap_or(value_idx);
    Some((op, end))
}

fn operand<'a>(tokens: &[Token<'a>], idx: usize) -> Option<Operand<'a>> {
    let token = &tokens[idx];
    match token.kind {
        TokenKind::Number => token.text.parse().ok().map(Operand::Number),
        TokenKind::Param if token.text == "?" => {
            let position = tokens[..idx]
                .iter()
                .filter(|t| t.kind == TokenKind::Param && t.text == "?")
                .count();
            Some(Operand::Positional(position))
        }
        TokenKind::Param => token.text.strip_prefix(':').map(Operand::Named),
        _ => None,
    }
}

fn resolve(operand: &Operand<'_>, params: &Params) -> FaircomResult<Option<u64>> {
    let bound = match (operand, params) {
        (Operand::Number(n), _) => return Ok(Some(*n)),
        (Operand::Positional(i), Params::Positional(values)) => values
            .get(*i)
            .map(|v| BindParam::new(format!("?{}", i + 1), v.clone())),
        (Operand::Named(name), Params::Named(values)) => values
            .get(*name)
            .map(|v| BindParam::new(*name, v.clone())),
        _ => None,
    };
    bound
        .map(|param| extract(&ClauseValue::Bound(param)))
        .transpose()
}

/// Start of the whitespace run directly before `idx`.
fn with_leading_whitespace(tokens: &[Token<'_>], idx: usize) -> usize {
    let mut start = idx;
    while start > 0 && tokens[start - 1].kind == TokenKind::Whitespace {
        start -= 1;
    }
    start
}

/// Last token of the value in `SELECT TOP n` / `SELECT TOP (n)`.
fn top_value_end(tokens: &[Token<'_>], select_idx: usize) -> Option<usize> {
    let top = next_significant(tokens, select_idx)?;
    let value = next_significant(tokens, top)?;
    if tokens[value].kind != TokenKind::LParen {
        return Some(value);
    }
    let depth = tokens[value].depth;
    (value + 1..tokens.len())
        .find(|&i| tokens[i].kind == TokenKind::RParen && tokens[i].depth == depth)
}

/// The literal count of `SELECT TOP n` and the token range to drop for it.
/// `TOP (?)`, `TOP n PERCENT` and `TOP n WITH TIES` have no plain count.
fn top_count(tokens: &[Token<'_>], select_idx: usize) -> Option<(u64, Range<usize>)> {
    let top = next_significant(tokens, select_idx)?;
    let end = top_value_end(tokens, select_idx)?;
    let mut values = tokens[top + 1..=end]
        .iter()
        .filter(|t| !t.is_trivia() && !matches!(t.kind, TokenKind::LParen | TokenKind::RParen));
    let count = match (values.next(), values.next()) {
        (Some(t), None) if t.kind == TokenKind::Number => t.text.parse().ok()?,
        _ => return None,
    };
    let qualified = next_significant(tokens, end)
        .is_some_and(|i| tokens[i].is_keyword("PERCENT") || tokens[i].is_keyword("WITH"));
    if qualified {
        return None;
    }
    Some((count, with_leading_whitespace(tokens, top)..end + 1))
}

fn remove_consumed(tokens: &[Token<'_>], edits: &[Edit<'_>], params: Params) -> Params {
    let in_spans = |i: usize| edits.iter().any(|e| e.site.spans.iter().any(|s| s.contains(&i)));
    let operands = edits
        .iter()
        .flat_map(|e| std::iter::once(&e.site.limit).chain(e.site.offset.as_ref()));

    match params {
        Params::Positional(values) => {
            let consumed: Vec<usize> = operands
                .filter_map(|op| match op {
                    Operand::Positional(i) => Some(*i),
                    _ => None,
                })
                .collect();
            let values: Vec<Value> = values
                .into_iter()
                .enumerate()
                .filter(|(i, _)| !consumed.contains(i))
                .map(|(_, v)| v)
                .collect();
            Params::Positional(values)
        }
        Params::Named(mut values) => {
            for op in operands {
                let Operand::Named(name) = op else { continue };
                // keep a name that is still referenced outside the pagination clause
                let used_elsewhere = tokens.iter().enumerate().any(|(i, t)| {
                    t.kind == TokenKind::Param
                        && t.text.strip_prefix(':') == Some(*name)
                        && !in_spans(i)
                });
                if !used_elsewhere {
                    values.remove(*name);
                }
            }
            Params::Named(values)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FaircomError;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    fn rewrite(sql: &str) -> String {
        StatementRewriter::default().rewrite(sql).unwrap()
    }

    #[test]
    fn test_limit_only() {
        assert_eq!(rewrite("SELECT id, name FROM t LIMIT 5"), "SELECT TOP 5 id, name FROM t");
    }

    #[test]
    fn test_limit_offset() {
        assert_eq!(
            rewrite("SELECT id FROM t ORDER BY id LIMIT 5 OFFSET 10"),
            "SELECT TOP 5 SKIP 10 id FROM t ORDER BY id"
        );
        assert_eq!(
            rewrite("SELECT id FROM t ORDER BY id OFFSET 10 LIMIT 5"),
            "SELECT TOP 5 SKIP 10 id FROM t ORDER BY id"
        );
    }

    #[test]
    fn test_zero_offset_kept() {
        assert_eq!(
            rewrite("SELECT id FROM t LIMIT 5 OFFSET 0"),
            "SELECT TOP 5 SKIP 0 id FROM t"
        );
    }

    #[test]
    fn test_mysql_form() {
        assert_eq!(
            rewrite("SELECT id FROM t LIMIT 20, 10"),
            "SELECT TOP 10 SKIP 20 id FROM t"
        );
    }

    #[test]
    fn test_no_limit_unchanged() {
        for sql in [
            "SELECT id FROM t",
            "SELECT id FROM t OFFSET 5",
            "INSERT INTO t (a) VALUES ('LIMIT 5')",
            "SELECT TOP 5 id FROM t",
        ] {
            assert_eq!(rewrite(sql), sql);
        }
    }

    #[test]
    fn test_idempotent() {
        let once = rewrite("SELECT DISTINCT a FROM t ORDER BY a LIMIT 3 OFFSET 9");
        assert_eq!(once, "SELECT TOP 3 SKIP 9 DISTINCT a FROM t ORDER BY a");
        assert_eq!(rewrite(&once), once);
    }

    #[test]
    fn test_nested_limit_untouched() {
        assert_eq!(
            rewrite("SELECT * FROM (SELECT id FROM t LIMIT 2) s LIMIT 3"),
            "SELECT TOP 3 * FROM (SELECT id FROM t LIMIT 2) s"
        );
        let inner_only = "SELECT * FROM (SELECT id FROM t LIMIT 2) s";
        assert_eq!(rewrite(inner_only), inner_only);
    }

    #[test]
    fn test_keywords_in_literals_and_comments() {
        assert_eq!(
            rewrite("SELECT 'LIMIT 1' AS s /* LIMIT 2 */ FROM t LIMIT 4"),
            "SELECT TOP 4 'LIMIT 1' AS s /* LIMIT 2 */ FROM t"
        );
    }

    #[test]
    fn test_trailing_semicolon_and_whitespace() {
        assert_eq!(rewrite("select id from t limit 5;"), "select TOP 5 id from t;");
        assert_eq!(rewrite("SELECT id FROM t\nLIMIT 5\n"), "SELECT TOP 5 id FROM t\n");
    }

    #[test]
    fn test_existing_top_kept() {
        assert_eq!(rewrite("SELECT TOP 7 id FROM t LIMIT 5"), "SELECT TOP 7 id FROM t");
        assert_eq!(
            rewrite("SELECT TOP 7 id FROM t LIMIT 5 OFFSET 2"),
            "SELECT TOP 7 SKIP 2 id FROM t"
        );
    }

    #[test]
    fn test_non_numeric_limit_unchanged() {
        let sql = "SELECT id FROM t LIMIT ALL";
        assert_eq!(rewrite(sql), sql);
        let sql = "SELECT id FROM t LIMIT ?";
        assert_eq!(rewrite(sql), sql);
    }

    #[test]
    fn test_positional_params_resolved_and_consumed() {
        let params = Params::from(vec![Value::from("open"), Value::Int(5), Value::Int(10)]);
        let (sql, rest) = StatementRewriter::default()
            .rewrite_with_params("SELECT id FROM t WHERE s = ? LIMIT ? OFFSET ?", params)
            .unwrap();
        assert_eq!(sql, "SELECT TOP 5 SKIP 10 id FROM t WHERE s = ?");
        assert_eq!(rest, Params::from(vec![Value::from("open")]));
    }

    #[test]
    fn test_named_params_resolved_and_consumed() {
        let mut values = BTreeMap::new();
        values.insert("lim".to_string(), Value::Int(25));
        values.insert("kind".to_string(), Value::from("a"));
        let (sql, rest) = StatementRewriter::default()
            .rewrite_with_params("SELECT id FROM t WHERE k = :kind LIMIT :lim", Params::Named(values))
            .unwrap();
        assert_eq!(sql, "SELECT TOP 25 id FROM t WHERE k = :kind");
        assert_eq!(rest.len(), 1);
    }

    #[test]
    fn test_bad_param_value_is_extraction_error() {
        let params = Params::from(vec![Value::from("ten")]);
        let err = StatementRewriter::default()
            .rewrite_with_params("SELECT id FROM t LIMIT ?", params)
            .unwrap_err();
        assert!(matches!(err, FaircomError::Extraction(_)));
    }

    #[test]
    fn test_malformed_statement_is_syntax_error() {
        let err = StatementRewriter::default()
            .rewrite("SELECT 'oops FROM t LIMIT 5")
            .unwrap_err();
        assert!(matches!(err, FaircomError::Syntax { .. }));
    }

    #[test]
    fn test_offset_fetch_profile() {
        let rewriter = StatementRewriter::new(Dialect::OffsetFetch);
        assert_eq!(
            rewriter.rewrite("SELECT id FROM t ORDER BY id LIMIT 5").unwrap(),
            "SELECT TOP 5 id FROM t ORDER BY id"
        );
        assert_eq!(
            rewriter.rewrite("SELECT id FROM t ORDER BY id LIMIT 5 OFFSET 10").unwrap(),
            "SELECT id FROM t ORDER BY id OFFSET 10 ROWS FETCH NEXT 5 ROWS ONLY"
        );
    }

    #[test]
    fn test_offset_fetch_folds_existing_top() {
        let rewriter = StatementRewriter::new(Dialect::OffsetFetch);
        assert_eq!(
            rewriter
                .rewrite("SELECT TOP 7 id FROM t ORDER BY id LIMIT 5 OFFSET 2")
                .unwrap(),
            "SELECT id FROM t ORDER BY id OFFSET 2 ROWS FETCH NEXT 7 ROWS ONLY"
        );
        assert_eq!(
            rewriter
                .rewrite("SELECT TOP (7) id FROM t ORDER BY id LIMIT 5 OFFSET 2")
                .unwrap(),
            "SELECT id FROM t ORDER BY id OFFSET 2 ROWS FETCH NEXT 7 ROWS ONLY"
        );
        let percent = "SELECT TOP 7 PERCENT id FROM t ORDER BY id LIMIT 5 OFFSET 2";
        assert_eq!(rewriter.rewrite(percent).unwrap(), percent);
    }

    #[test]
    fn test_offset_column_does_not_block_limit() {
        assert_eq!(
            rewrite("SELECT offset, id FROM t LIMIT 5"),
            "SELECT TOP 5 offset, id FROM t"
        );
        assert_eq!(
            rewrite("SELECT id FROM t ORDER BY offset LIMIT 5"),
            "SELECT TOP 5 id FROM t ORDER BY offset"
        );
        assert_eq!(
            rewrite("SELECT offset FROM t ORDER BY offset LIMIT 5 OFFSET 10"),
            "SELECT TOP 5 SKIP 10 offset FROM t ORDER BY offset"
        );
        assert_eq!(
            rewrite("SELECT id FROM t OFFSET 10 ROWS LIMIT 5"),
            "SELECT TOP 5 SKIP 10 id FROM t"
        );
    }

    #[test]
    fn test_each_statement_rewritten() {
        let once = rewrite("SELECT a FROM t LIMIT 1; SELECT b FROM u LIMIT 2 OFFSET 4");
        assert_eq!(once, "SELECT TOP 1 a FROM t; SELECT TOP 2 SKIP 4 b FROM u");
        assert_eq!(rewrite(&once), once);

        let second_only = rewrite("SELECT TOP 1 a FROM t; SELECT b FROM u LIMIT 2");
        assert_eq!(second_only, "SELECT TOP 1 a FROM t; SELECT TOP 2 b FROM u");
        assert_eq!(rewrite(&second_only), second_only);
    }

    #[test]
    fn test_positional_params_across_statements() {
        let params = Params::from(vec![Value::Int(3), Value::from("x"), Value::Int(4)]);
        let (sql, rest) = StatementRewriter::default()
            .rewrite_with_params("SELECT a FROM t LIMIT ?; SELECT b FROM u WHERE c = ? LIMIT ?", params)
            .unwrap();
        assert_eq!(sql, "SELECT TOP 3 a FROM t; SELECT TOP 4 b FROM u WHERE c = ?");
        assert_eq!(rest, Params::from(vec![Value::from("x")]));
    }

    #[test]
    fn test_prepare_rewrites_then_quotes() {
        let (sql, _) = StatementRewriter::default()
            .prepare("SELECT COUNT(*) AS count FROM t GROUP BY date LIMIT 10", Params::default())
            .unwrap();
        assert_eq!(sql, "SELECT TOP 10 COUNT(*) AS \"count\" FROM t GROUP BY \"date\"");
    }

    #[test]
    fn test_explain() {
        let plan = StatementRewriter::default()
            .explain("SELECT a FROM t LIMIT 2 OFFSET 4", &Params::default())
            .unwrap()
            .unwrap();
        assert_eq!(plan.limit, 2);
        assert_eq!(plan.offset, Some(4));
        assert!(!plan.existing_top);
        assert_eq!(plan.clause.unwrap().text, "TOP 2 SKIP 4");
    }

    #[test]
    fn test_property_sweep() {
        for l in [0u64, 1, 7, 100] {
            for o in [None, Some(0u64), Some(3), Some(1000)] {
                let input = match o {
                    Some(o) => format!("SELECT a, b FROM t ORDER BY a LIMIT {l} OFFSET {o}"),
                    None => format!("SELECT a, b FROM t ORDER BY a LIMIT {l}"),
                };
                let out = rewrite(&input);
                let expected = match o {
                    Some(o) => format!("SELECT TOP {l} SKIP {o} a, b FROM t ORDER BY a"),
                    None => format!("SELECT TOP {l} a, b FROM t ORDER BY a"),
                };
                assert_eq!(out, expected);
            }
        }
    }
}
