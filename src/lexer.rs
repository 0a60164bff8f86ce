//! Lossless SQL tokenizer using nom.
//!
//! Every byte of the input ends up in exactly one token, so concatenating the
//! token texts reproduces the statement. Each token records the parenthesis
//! depth it sits at; parentheses themselves belong to the enclosing level.

use nom::{
    branch::alt,
    bytes::complete::{is_not, tag, take_until, take_while, take_while1},
    character::complete::{char, digit0, digit1, not_line_ending, satisfy},
    combinator::{opt, recognize},
    multi::many0,
    sequence::{pair, preceded, tuple},
    IResult,
};

use crate::error::{FaircomError, FaircomResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Whitespace,
    LineComment,
    BlockComment,
    /// `'...'` with `''` escapes.
    StringLit,
    /// `"..."`, `[...]` or `` `...` ``.
    QuotedIdent,
    Number,
    /// Keyword or bare identifier.
    Word,
    /// `?`, `:name`, `$1` or `@name`.
    Param,
    LParen,
    RParen,
    Comma,
    Semicolon,
    Symbol,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    /// Byte offset into the original statement.
    pub offset: usize,
    /// Parenthesis nesting level; 0 is the outermost statement.
    pub depth: usize,
}

impl Token<'_> {
    /// Whitespace and comments.
    pub fn is_trivia(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Whitespace | TokenKind::LineComment | TokenKind::BlockComment
        )
    }

    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.kind == TokenKind::Word && self.text.eq_ignore_ascii_case(keyword)
    }

    /// Tokens whose content must never be rewritten.
    pub fn is_opaque(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::LineComment
                | TokenKind::BlockComment
                | TokenKind::StringLit
                | TokenKind::QuotedIdent
        )
    }
}

/// Split a statement into tokens.
///
/// Fails on unterminated strings, comments, quoted identifiers and on
/// unbalanced parentheses rather than guessing.
pub fn tokenize(sql: &str) -> FaircomResult<Vec<Token<'_>>> {
    let mut tokens = Vec::new();
    let mut rest = sql;
    let mut depth = 0usize;

    while !rest.is_empty() {
        let offset = sql.len() - rest.len();
        let (remaining, (kind, text)) = next_token(rest).map_err(|_| unterminated(rest, offset))?;

        let token_depth = match kind {
            TokenKind::LParen => {
                depth += 1;
                depth - 1
            }
            TokenKind::RParen => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| FaircomError::syntax(offset, "unbalanced ')'"))?;
                depth
            }
            _ => depth,
        };

        tokens.push(Token {
            kind,
            text,
            offset,
            depth: token_depth,
        });
        rest = remaining;
    }

    if depth > 0 {
        return Err(FaircomError::syntax(sql.len(), "unclosed '('"));
    }
    Ok(tokens)
}

fn unterminated(rest: &str, offset: usize) -> FaircomError {
    let what = if rest.starts_with("/*") {
        "unterminated block comment"
    } else if rest.starts_with('\'') {
        "unterminated string literal"
    } else if rest.starts_with('"') || rest.starts_with('[') || rest.starts_with('`') {
        "unterminated quoted identifier"
    } else {
        "unrecognized input"
    };
    FaircomError::syntax(offset, what)
}

fn next_token(input: &str) -> IResult<&str, (TokenKind, &str)> {
    let first = input.chars().next().unwrap_or_default();

    let (rest, kind, text) = match first {
        c if c.is_whitespace() => {
            let (r, t) = whitespace(input)?;
            (r, TokenKind::Whitespace, t)
        }
        '\'' => {
            let (r, t) = string_literal(input)?;
            (r, TokenKind::StringLit, t)
        }
        '"' | '[' | '`' => {
            let (r, t) = quoted_ident(input)?;
            (r, TokenKind::QuotedIdent, t)
        }
        '-' if input.starts_with("--") => {
            let (r, t) = line_comment(input)?;
            (r, TokenKind::LineComment, t)
        }
        '/' if input.starts_with("/*") => {
            let (r, t) = block_comment(input)?;
            (r, TokenKind::BlockComment, t)
        }
        '(' => (&input[1..], TokenKind::LParen, &input[..1]),
        ')' => (&input[1..], TokenKind::RParen, &input[..1]),
        ',' => (&input[1..], TokenKind::Comma, &input[..1]),
        ';' => (&input[1..], TokenKind::Semicolon, &input[..1]),
        c if c.is_ascii_digit() => {
            let (r, t) = number(input)?;
            (r, TokenKind::Number, t)
        }
        c if c.is_alphabetic() || c == '_' => {
            let (r, t) = word(input)?;
            (r, TokenKind::Word, t)
        }
        _ => match param(input) {
            Ok((r, t)) => (r, TokenKind::Param, t),
            Err(_) => {
                let (r, t) = symbol(input)?;
                (r, TokenKind::Symbol, t)
            }
        },
    };

    Ok((rest, (kind, text)))
}

fn whitespace(input: &str) -> IResult<&str, &str> {
    take_while1(char::is_whitespace)(input)
}

/// `'it''s'`
fn string_literal(input: &str) -> IResult<&str, &str> {
    recognize(tuple((
        char('\''),
        many0(alt((tag("''"), is_not("'")))),
        char('\''),
    )))(input)
}

/// `"col"`, `[col]`, `` `col` ``
fn quoted_ident(input: &str) -> IResult<&str, &str> {
    alt((
        recognize(tuple((char('"'), many0(alt((tag("\"\""), is_not("\"")))), char('"')))),
        recognize(tuple((char('['), take_while(|c| c != ']'), char(']')))),
        recognize(tuple((char('`'), take_while(|c| c != '`'), char('`')))),
    ))(input)
}

fn line_comment(input: &str) -> IResult<&str, &str> {
    recognize(pair(tag("--"), not_line_ending))(input)
}

fn block_comment(input: &str) -> IResult<&str, &str> {
    recognize(tuple((tag("/*"), take_until("*/"), tag("*/"))))(input)
}

/// `10`, `1.5`, `1e3`
fn number(input: &str) -> IResult<&str, &str> {
    recognize(tuple((
        digit1,
        opt(pair(char('.'), digit0)),
        opt(tuple((
            alt((char('e'), char('E'))),
            opt(alt((char('+'), char('-')))),
            digit1,
        ))),
    )))(input)
}

fn word(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(|c| c.is_alphabetic() || c == '_'),
        take_while(|c: char| c.is_alphanumeric() || c == '_' || c == '$'),
    ))(input)
}

fn param_name(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_')(input)
}

fn param(input: &str) -> IResult<&str, &str> {
    alt((
        tag("?"),
        recognize(preceded(char('$'), digit1)),
        recognize(preceded(char('@'), param_name)),
        // `::` is a cast, not a named parameter
        recognize(preceded(pair(char(':'), satisfy(|c| c.is_alphabetic() || c == '_')), opt(param_name))),
    ))(input)
}

fn symbol(input: &str) -> IResult<&str, &str> {
    alt((
        tag("::"),
        tag("<="),
        tag(">="),
        tag("<>"),
        tag("!="),
        tag("||"),
        recognize(satisfy(|c| !matches!(c, '\'' | '"' | '[' | '`'))),
    ))(input)
}

/// Index of the next non-trivia token after `idx`.
pub fn next_significant(tokens: &[Token<'_>], idx: usize) -> Option<usize> {
    (idx + 1..tokens.len()).find(|&i| !tokens[i].is_trivia())
}

/// Concatenate token texts back into SQL.
pub fn join(tokens: &[Token<'_>]) -> String {
    tokens.iter().map(|t| t.text).collect()
}
