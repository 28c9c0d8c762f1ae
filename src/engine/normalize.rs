//! Lexical cleanup of SQL text before it is executed and compared

use sqlparser::dialect::{Dialect, GenericDialect};
use sqlparser::tokenizer::{Location, Token, Tokenizer};

use crate::error::{Error, Result};

/// Tokenizer artifacts and the operators they stand for
const SPLIT_OPERATORS: [(&str, &str); 3] = [("> =", ">="), ("< =", "<="), ("! =", "!=")];

/// Normalize SQL text using the generic dialect.
///
/// Collapses split comparison operators and, unless `keep_distinct` is set, drops every
/// `DISTINCT` keyword token. Literals and quoted identifiers spelling `distinct` are left alone.
pub fn normalize(sql: &str, keep_distinct: bool) -> Result<String> {
    normalize_with_dialect(sql, keep_distinct, &GenericDialect {})
}

pub fn normalize_with_dialect(
    sql: &str,
    keep_distinct: bool,
    dialect: &dyn Dialect,
) -> Result<String> {
    let collapsed = collapse_operators(sql);
    if keep_distinct {
        return Ok(collapsed);
    }

    // Removing a token can bring a split operator back together
    let stripped = strip_distinct(&collapsed, dialect)?;
    Ok(collapse_operators(&stripped))
}

/// Replace `> =`, `< =` and `! =` with the operator they were split from
pub fn collapse_operators(sql: &str) -> String {
    SPLIT_OPERATORS
        .iter()
        .fold(sql.to_string(), |acc, (split, joined)| acc.replace(split, joined))
}

/// Tokenize `sql` and re-assemble it without any `DISTINCT` keyword token.
///
/// Kept tokens are copied from the source text, so literals come out exactly as written.
pub fn strip_distinct(sql: &str, dialect: &dyn Dialect) -> Result<String> {
    let tokens = Tokenizer::new(dialect, sql)
        .with_unescape(false)
        .tokenize_with_location()
        .map_err(|e| Error::MalformedQuery(e.to_string()))?;

    let offsets = LineOffsets::new(sql);
    let starts = tokens
        .iter()
        .map(|token| offsets.byte_offset(token.span.start))
        .collect::<Option<Vec<usize>>>()
        .ok_or_else(|| Error::MalformedQuery("token location outside query text".to_string()))?;

    // Tokens are contiguous: each one ends where the next one starts
    let mut out = String::with_capacity(sql.len());
    for (i, token) in tokens.iter().enumerate() {
        let start = starts[i];
        let end = starts.get(i + 1).copied().unwrap_or(sql.len());
        if !is_distinct(&token.token) {
            out.push_str(&sql[start..end]);
        }
    }
    Ok(out)
}

/// Byte offsets of line starts, for turning tokenizer locations into string indices
struct LineOffsets<'a> {
    sql: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineOffsets<'a> {
    fn new(sql: &'a str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(sql.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { sql, line_starts }
    }

    /// Byte offset of a 1-based line and character column
    fn byte_offset(&self, location: Location) -> Option<usize> {
        let line = usize::try_from(location.line).ok()?.checked_sub(1)?;
        let column = usize::try_from(location.column).ok()?.checked_sub(1)?;
        let line_start = *self.line_starts.get(line)?;
        let rest = &self.sql[line_start..];
        match rest.char_indices().nth(column) {
            Some((i, _)) => Some(line_start + i),
            None if rest.chars().count() == column => Some(self.sql.len()),
            None => None,
        }
    }
}

fn is_distinct(token: &Token) -> bool {
    match token {
        Token::Word(word) => {
            word.quote_style.is_none() && word.value.eq_ignore_ascii_case("distinct")
        }
        _ => false,
    }
}

/// Whether results of this query are ordered, judged from its normalized text
pub fn order_matters(normalized_sql: &str) -> bool {
    normalized_sql.to_lowercase().contains("order by")
}
