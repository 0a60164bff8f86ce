//! Reserved-word quoting for alias, ORDER BY and GROUP BY positions.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::lexer::{tokenize, Token, TokenKind};

/// Words that are fine as column names in portable SQL but reserved in FairCom SQL.
pub const RESERVED_WORDS: &[&str] = &[
    "avg", "count", "date", "desc", "group", "index", "key", "level", "max", "min", "month",
    "order", "percent", "position", "rank", "size", "skip", "sum", "table", "time",
    "timestamp", "top", "type", "user", "value", "year",
];

static RESERVED: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| RESERVED_WORDS.iter().copied().collect());

static POSITION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let words = RESERVED_WORDS.join("|");
    // no lookaround in `regex`; the character after the word is checked by hand
    let pattern = format!(r"(?i)\b(AS|ORDER\s+BY|GROUP\s+BY)(\s+)({})\b", words);
    Regex::new(&pattern).expect("valid reserved-word regex")
});

pub fn is_reserved(word: &str) -> bool {
    RESERVED.contains(word.to_ascii_lowercase().as_str())
}

/// Quote reserved words appearing as `AS w`, `ORDER BY w` or `GROUP BY w`.
///
/// Already-quoted identifiers never match. Words inside string literals,
/// comments and quoted identifiers, the target type of `CAST(x AS date)`, and
/// words directly followed by `(` or `.` are left alone. Input that does not
/// tokenize is returned unchanged.
pub fn quote_reserved(sql: &str) -> String {
    let tokens = match tokenize(sql) {
        Ok(tokens) => tokens,
        Err(e) => {
            tracing::debug!(error = %e, "skipping reserved-word quoting");
            return sql.to_string();
        }
    };
    let opaque: Vec<(usize, usize)> = tokens
        .iter()
        .filter(|t| t.is_opaque())
        .map(|t| (t.offset, t.offset + t.text.len()))
        .collect();
    let cast_targets = cast_as_offsets(&tokens);

    POSITION_PATTERN
        .replace_all(sql, |caps: &Captures<'_>| {
            let (Some(whole), Some(word)) = (caps.get(0), caps.get(3)) else {
                return caps[0].to_string();
            };
            let inside_opaque = opaque
                .iter()
                .any(|&(start, end)| whole.start() < end && whole.end() > start);
            let next = sql[word.end()..].chars().next();
            if inside_opaque
                || cast_targets.contains(&whole.start())
                || matches!(next, Some('(') | Some('.'))
            {
                return whole.as_str().to_string();
            }
            format!("{}{}\"{}\"", &caps[1], &caps[2], word.as_str())
        })
        .into_owned()
}

/// Offsets of `AS` keywords that name a target type inside CAST/CONVERT.
fn cast_as_offsets(tokens: &[Token<'_>]) -> Vec<usize> {
    let mut offsets = Vec::new();
    // One entry per open paren: whether it belongs to a cast-like call.
    let mut stack: Vec<bool> = Vec::new();
    let mut prev_word: Option<&str> = None;

    for token in tokens {
        match token.kind {
            TokenKind::LParen => {
                let is_cast = prev_word.is_some_and(|w| {
                    ["cast", "try_cast", "convert"]
                        .iter()
                        .any(|c| w.eq_ignore_ascii_case(c))
                });
                stack.push(is_cast);
            }
            TokenKind::RParen => {
                stack.pop();
            }
            TokenKind::Word if token.is_keyword("AS") && stack.last() == Some(&true) => {
                offsets.push(token.offset);
            }
            _ => {}
        }
        if !token.is_trivia() {
            prev_word = (token.kind == TokenKind::Word).then_some(token.text);
        }
    }
    offsets
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_alias_quoted() {
        assert_eq!(
            quote_reserved("SELECT COUNT(*) AS count FROM t"),
            "SELECT COUNT(*) AS \"count\" FROM t"
        );
    }

    #[test]
    fn test_already_quoted_unchanged() {
        let sql = "SELECT COUNT(*) AS \"count\" FROM t";
        assert_eq!(quote_reserved(sql), sql);
        let sql = "SELECT COUNT(*) AS [count] FROM t";
        assert_eq!(quote_reserved(sql), sql);
    }

    #[test]
    fn test_order_and_group_by() {
        assert_eq!(
            quote_reserved("SELECT date, SUM(x) AS total FROM t GROUP BY date ORDER BY date DESC"),
            "SELECT date, SUM(x) AS total FROM t GROUP BY \"date\" ORDER BY \"date\" DESC"
        );
        assert_eq!(
            quote_reserved("select * from t order   by user"),
            "select * from t order   by \"user\""
        );
    }

    #[test]
    fn test_case_preserved() {
        assert_eq!(quote_reserved("SELECT x AS Sum FROM t"), "SELECT x AS \"Sum\" FROM t");
    }

    #[test]
    fn test_non_reserved_untouched() {
        let sql = "SELECT id AS ident FROM t ORDER BY name";
        assert_eq!(quote_reserved(sql), sql);
    }

    #[test]
    fn test_cast_target_untouched() {
        let sql = "SELECT CAST(created AS date) AS day FROM t";
        assert_eq!(quote_reserved(sql), sql);
        assert_eq!(
            quote_reserved("SELECT CAST(created AS date) AS date FROM t"),
            "SELECT CAST(created AS date) AS \"date\" FROM t"
        );
    }

    #[test]
    fn test_function_and_qualified_untouched() {
        let sql = "SELECT a FROM t ORDER BY count(*), sum";
        assert_eq!(quote_reserved(sql), sql);
        let sql = "SELECT a FROM t ORDER BY user.id";
        assert_eq!(quote_reserved(sql), sql);
    }

    #[test]
    fn test_literals_and_comments_untouched() {
        let sql = "SELECT 'x AS count' AS label FROM t -- ORDER BY date";
        assert_eq!(quote_reserved(sql), sql);
    }

    #[test]
    fn test_idempotent() {
        let once = quote_reserved("SELECT a AS count FROM t ORDER BY date");
        assert_eq!(quote_reserved(&once), once);
    }

    #[test]
    fn test_is_reserved() {
        assert!(is_reserved("COUNT"));
        assert!(is_reserved("user"));
        assert!(!is_reserved("name"));
    }
}
