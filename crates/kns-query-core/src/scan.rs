//! Top-level keyword scanning over raw SQL text.
//!
//! Locating a clause boundary in templated SQL cannot use plain substring
//! search: the keyword may occur inside a string literal, inside a nested
//! subquery, or as a fragment of a longer identifier. The scanner tracks
//! quoting and parenthesis nesting so that only genuine top-level clause
//! keywords are reported.

/// Scans SQL text for top-level occurrences of a clause keyword.
///
/// An occurrence counts when it is outside single- and double-quoted
/// literals, at parenthesis depth zero relative to the scan start, and
/// delimited by non-word characters on both sides. Matching is ASCII
/// case-insensitive, so `limit`, `Limit` and `LIMIT` are equivalent.
#[derive(Debug, Clone, Copy)]
pub struct ClauseScanner<'a> {
    input: &'a str,
    keyword: &'a str,
}

impl<'a> ClauseScanner<'a> {
    /// Creates a scanner for `keyword` over `input`.
    #[must_use]
    pub const fn new(input: &'a str, keyword: &'a str) -> Self {
        Self { input, keyword }
    }

    /// Returns the byte offset of the first top-level occurrence, or
    /// `None` when the keyword never appears at the top level.
    #[must_use]
    pub fn find_first(&self) -> Option<usize> {
        self.top_level_matches().first().copied()
    }

    /// Returns the byte offset of the last top-level occurrence, or
    /// `None` when the keyword never appears at the top level.
    #[must_use]
    pub fn find_last(&self) -> Option<usize> {
        self.top_level_matches().last().copied()
    }

    /// Collects the offsets of every top-level occurrence in one pass.
    fn top_level_matches(&self) -> Vec<usize> {
        let bytes = self.input.as_bytes();
        let keyword = self.keyword.as_bytes();
        let mut matches = Vec::new();

        if keyword.is_empty() {
            return matches;
        }

        let mut in_single_quote = false;
        let mut in_double_quote = false;
        let mut paren_depth = 0_usize;
        let mut pos = 0;

        while pos < bytes.len() {
            let byte = bytes[pos];

            // A quote character of the other kind is inert inside a literal.
            if in_single_quote {
                if byte == b'\'' {
                    in_single_quote = false;
                }
                pos += 1;
                continue;
            }
            if in_double_quote {
                if byte == b'"' {
                    in_double_quote = false;
                }
                pos += 1;
                continue;
            }

            match byte {
                b'\'' => in_single_quote = true,
                b'"' => in_double_quote = true,
                b'(' => paren_depth += 1,
                // Floored at zero: an unbalanced closer must not let a
                // later nested keyword masquerade as top-level.
                b')' => paren_depth = paren_depth.saturating_sub(1),
                _ => {
                    if paren_depth == 0 && Self::is_match_at(bytes, keyword, pos) {
                        matches.push(pos);
                        pos += keyword.len();
                        continue;
                    }
                }
            }
            pos += 1;
        }

        matches
    }

    /// Whole-word, case-insensitive comparison at `pos`.
    fn is_match_at(bytes: &[u8], keyword: &[u8], pos: usize) -> bool {
        let end = pos + keyword.len();
        if end > bytes.len() {
            return false;
        }
        if !bytes[pos..end].eq_ignore_ascii_case(keyword) {
            return false;
        }
        if pos > 0 && is_word_byte(bytes[pos - 1]) {
            return false;
        }
        match bytes.get(end) {
            Some(&next) => !is_word_byte(next),
            None => true,
        }
    }
}

/// Identifier characters. Bytes outside ASCII count as word characters so
/// a keyword glued to a multi-byte identifier is not a word boundary.
const fn is_word_byte(byte: u8) -> bool {
    byte == b'_' || byte.is_ascii_alphanumeric() || !byte.is_ascii()
}
