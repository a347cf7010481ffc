//! Whitespace predicates and tokenization for configuration lines.
//!
//! Two predicates govern the line grammar: *blank* (space or tab) separates
//! tokens within a line, and *separator* additionally covers CR, LF, and NUL
//! so that line endings read from files never leak into tokens.

/// Space or tab.
pub(crate) fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Blank, CR, LF, or NUL.
pub(crate) fn is_separator(c: char) -> bool {
    is_blank(c) || matches!(c, '\r' | '\n' | '\0')
}

/// Trim separators from both ends of a line.
pub(crate) fn trim(line: &str) -> &str {
    line.trim_matches(is_separator)
}

/// Iterate the non-separator tokens of a line.
pub(crate) fn tokens(line: &str) -> impl Iterator<Item = &str> {
    line.split(is_separator).filter(|t| !t.is_empty())
}

/// The argument region after the first `skip` tokens.
///
/// Parsers that hand a token run to a list parser re-read from this
/// position rather than from individually collected tokens, preserving the
/// pre-scan pointer semantics of the line grammar.
pub(crate) fn rest_after(line: &str, skip: usize) -> &str {
    let mut remaining = line;
    for _ in 0..skip {
        remaining = remaining.trim_start_matches(is_separator);
        remaining = remaining.trim_start_matches(|c: char| !is_separator(c));
    }
    remaining.trim_start_matches(is_separator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicates() {
        assert!(is_blank(' '));
        assert!(is_blank('\t'));
        assert!(!is_blank('\r'));
        assert!(!is_blank('\n'));
        assert!(is_separator('\r'));
        assert!(is_separator('\n'));
        assert!(is_separator('\0'));
    }

    #[test]
    fn tokenization() {
        let toks: Vec<_> = tokens(" a\t bb  c\r\n").collect();
        assert_eq!(toks, vec!["a", "bb", "c"]);
        assert_eq!(tokens("").count(), 0);
    }

    #[test]
    fn rest_preserves_argument_region() {
        assert_eq!(rest_after("4060 0   35 204 33", 2), "35 204 33");
        assert_eq!(rest_after("  one two", 1), "two");
        assert_eq!(rest_after("one", 1), "");
        assert_eq!(rest_after("", 3), "");
    }
}
