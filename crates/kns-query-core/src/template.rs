//! Template normalization: trailing-limit stripping and alias removal.

use crate::scan::ClauseScanner;

/// Removes a trailing top-level `LIMIT n` clause from template SQL.
///
/// Returns the remaining SQL and the parsed limit, which becomes the
/// template's own default page size. The input is trimmed of surrounding
/// whitespace and trailing semicolons before scanning. Templates carry at
/// most one trailing top-level `LIMIT`; the scan still takes the *last*
/// occurrence so a leading `UNION` arm can never shadow the trailing
/// clause. When no top-level `LIMIT` exists, or the token after it is not
/// a non-negative integer, the trimmed text is returned unchanged with no
/// limit.
#[must_use]
pub fn strip_trailing_limit(sql: &str) -> (String, Option<i64>) {
    let trimmed = sql.trim().trim_end_matches(';').trim_end();

    let Some(offset) = ClauseScanner::new(trimmed, "LIMIT").find_last() else {
        return (trimmed.to_string(), None);
    };

    let tail = &trimmed[offset + "LIMIT".len()..];
    let limit = tail
        .split_whitespace()
        .next()
        .and_then(|token| token.parse::<i64>().ok())
        .filter(|limit| *limit >= 0);

    match limit {
        Some(limit) => (trimmed[..offset].trim_end().to_string(), Some(limit)),
        None => (trimmed.to_string(), None),
    }
}

/// Strips a leading `alias.` qualifier from a column reference.
///
/// The assembler wraps the whole template as a subquery, so aliases
/// defined inside it are out of scope for outer predicates; qualified
/// filter columns from the catalog must be reduced to bare names first.
/// Idempotent: a bare name is returned as-is.
#[must_use]
pub fn strip_column_alias(column: &str) -> &str {
    match column.rsplit_once('.') {
        Some((_, name)) => name,
        None => column,
    }
}
