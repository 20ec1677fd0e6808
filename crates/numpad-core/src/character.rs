// Word character classification and word bounds around a cursor

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Check whether a character counts as part of a word.
///
/// ASCII letters and digits are word characters. Every code point above
/// U+00FF is also accepted, so words in non-Latin scripts are not split.
/// Latin-1 letters (U+00C0..U+00FF) are deliberately not word characters.
pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || (c as u32) > 0xFF
}

// ---------------------------------------------------------------------------
// Word bounds
// ---------------------------------------------------------------------------

/// Half-open character range `[start, end)` of the word before a cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WordBounds {
    pub start: usize,
    pub end: usize,
}

impl WordBounds {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Collect the bounded characters of `text` into a string.
    pub fn extract(&self, text: &[char]) -> String {
        text[self.start..self.end].iter().collect()
    }
}

/// Scan backwards from `cursor` over word characters.
///
/// Returns the span `[start, cursor)`. Offsets are in characters, and a
/// cursor past the end of `text` is clamped to its length.
pub fn word_bounds(text: &[char], cursor: usize) -> WordBounds {
    let end = cursor.min(text.len());
    let mut start = end;
    while start > 0 && is_word_char(text[start - 1]) {
        start -= 1;
    }
    WordBounds { start, end }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn ascii_word_chars() {
        assert!(is_word_char('a'));
        assert!(is_word_char('Z'));
        assert!(is_word_char('7'));
        assert!(!is_word_char(' '));
        assert!(!is_word_char('.'));
        assert!(!is_word_char('-'));
        assert!(!is_word_char('\''));
    }

    #[test]
    fn latin1_is_not_word_char() {
        assert!(!is_word_char('\u{00E4}')); // ä
        assert!(!is_word_char('\u{00FF}')); // ÿ
    }

    #[test]
    fn wide_code_points_are_word_chars() {
        assert!(is_word_char('\u{0101}')); // ā
        assert!(is_word_char('\u{0416}')); // Ж
        assert!(is_word_char('\u{4E2D}')); // 中
    }

    #[test]
    fn bounds_of_last_word() {
        let text = chars("hello wor");
        let b = word_bounds(&text, text.len());
        assert_eq!(b, WordBounds { start: 6, end: 9 });
        assert_eq!(b.extract(&text), "wor");
    }

    #[test]
    fn bounds_in_middle_of_text() {
        let text = chars("one two three");
        let b = word_bounds(&text, 7);
        assert_eq!(b, WordBounds { start: 4, end: 7 });
        assert_eq!(b.extract(&text), "two");
    }

    #[test]
    fn bounds_after_separator_are_empty() {
        let text = chars("end. ");
        let b = word_bounds(&text, text.len());
        assert!(b.is_empty());
        assert_eq!(b.start, 5);
    }

    #[test]
    fn bounds_at_start_of_text() {
        let b = word_bounds(&[], 0);
        assert_eq!(b, WordBounds { start: 0, end: 0 });
    }

    #[test]
    fn cursor_is_clamped() {
        let text = chars("ab");
        let b = word_bounds(&text, 10);
        assert_eq!(b, WordBounds { start: 0, end: 2 });
        assert_eq!(b.len(), 2);
    }

    #[test]
    fn bounds_include_digits() {
        let text = chars("route66");
        assert_eq!(word_bounds(&text, text.len()).start, 0);
    }
}
