//! Regex match highlighting for a single cell.
//!
//! A [`Highlighter`] wraps an immutable compiled pattern. Each call to
//! [`Highlighter::highlight`] searches its text from position 0 and returns
//! a lazy [`Segments`] iterator, so one highlighter can be shared by every
//! cell of a table.
//!
//! A pattern that fails to compile is not an error: the highlighter keeps
//! no regex and every value comes back as a single literal segment.
//!
//! # Example
//! ```
//! use regex_preview::highlight::{highlight, Segment};
//!
//! let segments: Vec<_> = highlight("order 42", r"\d+").collect();
//! assert_eq!(segments, vec![Segment::Literal("order "), Segment::Match("42")]);
//! ```

use regex::{Regex, RegexBuilder};

/// Upper bound on the compiled program size of a highlight pattern.
pub const PATTERN_SIZE_LIMIT: usize = 1 << 20;

/// Upper bound on the lazy DFA cache used while matching.
pub const PATTERN_DFA_SIZE_LIMIT: usize = 2 << 20;

/// A contiguous span of a cell's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'t> {
    Literal(&'t str),
    /// May be empty for zero-width matches.
    Match(&'t str),
}

impl<'t> Segment<'t> {
    pub fn text(&self) -> &'t str {
        match self {
            Segment::Literal(s) | Segment::Match(s) => s,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, Segment::Match(_))
    }

    pub fn is_empty(&self) -> bool {
        self.text().is_empty()
    }
}

/// Compiled highlight pattern.
#[derive(Debug, Clone)]
pub struct Highlighter {
    regex: Option<Regex>,
}

impl Highlighter {
    pub fn new(pattern: &str) -> Self {
        let regex = RegexBuilder::new(pattern)
            .size_limit(PATTERN_SIZE_LIMIT)
            .dfa_size_limit(PATTERN_DFA_SIZE_LIMIT)
            .build();

        match regex {
            Ok(regex) => Self { regex: Some(regex) },
            Err(e) => {
                log::debug!("Highlight disabled, pattern {:?} did not compile: {}", pattern, e);
                Self { regex: None }
            }
        }
    }

    /// Whether the pattern compiled.
    pub fn is_active(&self) -> bool {
        self.regex.is_some()
    }

    pub fn highlight<'r, 't>(&'r self, text: &'t str) -> Segments<'r, 't> {
        Segments {
            regex: self.regex.as_ref(),
            text,
            last_end: 0,
            search_from: 0,
            pending: None,
            done: false,
        }
    }
}

/// Highlight `text` with a freshly compiled `pattern`.
///
/// Returns owned segments since the compiled pattern does not outlive the call.
pub fn highlight<'t>(text: &'t str, pattern: &str) -> std::vec::IntoIter<Segment<'t>> {
    Highlighter::new(pattern)
        .highlight(text)
        .collect::<Vec<_>>()
        .into_iter()
}

/// Lazy literal/match segments of one text.
///
/// Concatenating every segment's text reproduces the input exactly.
#[derive(Debug, Clone)]
pub struct Segments<'r, 't> {
    regex: Option<&'r Regex>,
    text: &'t str,
    /// End of the text already emitted.
    last_end: usize,
    /// Byte offset of the next search; past `text.len()` once exhausted.
    search_from: usize,
    /// Match found together with the literal preceding it.
    pending: Option<Segment<'t>>,
    done: bool,
}

impl<'r, 't> Iterator for Segments<'r, 't> {
    type Item = Segment<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(segment) = self.pending.take() {
            return Some(segment);
        }
        if self.done {
            return None;
        }

        let Some(regex) = self.regex else {
            self.done = true;
            return Some(Segment::Literal(self.text));
        };

        if self.search_from <= self.text.len() {
            if let Some(m) = regex.find_at(self.text, self.search_from) {
                let (start, end) = (m.start(), m.end());

                // A zero-width match must still move the search forward.
                self.search_from = if start == end {
                    end + next_char_len(self.text, end)
                } else {
                    end
                };

                let matched = Segment::Match(&self.text[start..end]);
                let literal = (start > self.last_end)
                    .then(|| Segment::Literal(&self.text[self.last_end..start]));
                self.last_end = end;

                return match literal {
                    Some(literal) => {
                        self.pending = Some(matched);
                        Some(literal)
                    }
                    None => Some(matched),
                };
            }
        }

        self.done = true;
        (self.last_end < self.text.len()).then(|| Segment::Literal(&self.text[self.last_end..]))
    }
}

/// Byte width of the character at `pos`, or 1 at the end of the text.
fn next_char_len(text: &str, pos: usize) -> usize {
    text[pos..].chars().next().map_or(1, char::len_utf8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect<'t>(text: &'t str, pattern: &str) -> Vec<Segment<'t>> {
        highlight(text, pattern).collect()
    }

    fn rebuild(segments: &[Segment<'_>]) -> String {
        segments.iter().map(Segment::text).collect()
    }

    #[test]
    fn test_literal_and_match_segments() {
        let segments = collect("call 555-1234 or 555-9876", r"\d{3}-\d{4}");

        assert_eq!(
            segments,
            vec![
                Segment::Literal("call "),
                Segment::Match("555-1234"),
                Segment::Literal(" or "),
                Segment::Match("555-9876"),
            ]
        );
    }

    #[test]
    fn test_star_on_baaab_terminates() {
        let segments = collect("baaab", "a*");

        assert_eq!(rebuild(&segments), "baaab");
        let non_empty: Vec<_> = segments.iter().filter(|s| !s.is_empty()).copied().collect();
        assert_eq!(
            non_empty,
            vec![
                Segment::Literal("b"),
                Segment::Match("aaa"),
                Segment::Literal("b"),
            ]
        );
        assert!(segments.iter().any(|s| s.is_match() && s.is_empty()));
    }

    #[test]
    fn test_zero_width_patterns_terminate() {
        for pattern in ["", "|", "(?:)", r"\b", "^", "$", "x*", "(?m)^"] {
            for text in ["", "abc", "a b\nc", "ééé", "日本語 text"] {
                let segments = collect(text, pattern);
                assert_eq!(rebuild(&segments), text, "pattern {:?} on {:?}", pattern, text);
            }
        }
    }

    #[test]
    fn test_zero_width_advance_respects_char_boundaries() {
        let segments = collect("é日", "");
        assert_eq!(rebuild(&segments), "é日");
        assert_eq!(
            segments.iter().filter(|s| !s.is_match()).count(),
            2,
            "each character is its own literal between empty matches"
        );
    }

    #[test]
    fn test_invalid_pattern_is_single_literal() {
        for pattern in ["(unclosed", "[a-", "*", r"(?<=a)b"] {
            let segments = collect("some (text) here", pattern);
            assert_eq!(segments, vec![Segment::Literal("some (text) here")], "{}", pattern);
        }
        assert_eq!(collect("", "(("), vec![Segment::Literal("")]);
    }

    #[test]
    fn test_oversized_pattern_degrades() {
        let highlighter = Highlighter::new(r"\w{1000}{1000}");
        assert!(!highlighter.is_active());
        let segments: Vec<_> = highlighter.highlight("abc").collect();
        assert_eq!(segments, vec![Segment::Literal("abc")]);
    }

    #[test]
    fn test_no_match_yields_whole_text() {
        assert_eq!(collect("hello", "xyz"), vec![Segment::Literal("hello")]);
        assert!(collect("", "xyz").is_empty());
    }

    #[test]
    fn test_shared_highlighter_is_stateless_across_cells() {
        let highlighter = Highlighter::new("o");

        let first: Vec<_> = highlighter.highlight("foo boo").collect();
        let second: Vec<_> = highlighter.highlight("oz").collect();
        let again: Vec<_> = highlighter.highlight("foo boo").collect();

        assert_eq!(second, vec![Segment::Match("o"), Segment::Literal("z")]);
        assert_eq!(first, again);
    }

    #[test]
    fn test_segments_are_restartable() {
        let highlighter = Highlighter::new("a");
        let segments = highlighter.highlight("banana");

        let first: Vec<_> = segments.clone().collect();
        let second: Vec<_> = segments.collect();
        assert_eq!(first, second);
        assert_eq!(rebuild(&first), "banana");
    }

    #[test]
    fn test_word_boundary_uses_surrounding_context() {
        let segments = collect("cat concat cat", r"\bcat\b");
        let matches: Vec<_> = segments.iter().filter(|s| s.is_match()).collect();
        assert_eq!(matches.len(), 2);
    }
}
