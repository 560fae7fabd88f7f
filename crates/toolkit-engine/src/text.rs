//! Word and character statistics for free-form text.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Average silent reading speed used for the reading-time estimate.
pub const WORDS_PER_MINUTE: usize = 200;

static SENTENCE_END_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+").expect("valid sentence terminator regex"));

static PARAGRAPH_BREAK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n+").expect("valid paragraph break regex"));

/// Counts shown by the word counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TextStats {
    /// Characters including whitespace.
    pub characters: usize,
    /// Whitespace-separated tokens.
    pub words: usize,
    /// Runs of `.`, `!` or `?`.
    pub sentences: usize,
    /// Segments between runs of `\n` that contain visible content.
    pub paragraphs: usize,
    /// Whole minutes at [`WORDS_PER_MINUTE`], rounded up.
    pub reading_minutes: usize,
}

impl TextStats {
    /// Count `text`.
    ///
    /// Blank text has zero words, sentences, paragraphs and reading time;
    /// its characters (the whitespace) are still counted.
    ///
    /// # Examples
    ///
    /// ```
    /// use toolkit_engine::text::TextStats;
    ///
    /// let stats = TextStats::count("Hello world. How are you?\n\nFine!");
    /// assert_eq!(stats.words, 6);
    /// assert_eq!(stats.sentences, 3);
    /// assert_eq!(stats.paragraphs, 2);
    /// ```
    pub fn count(text: &str) -> Self {
        let characters = text.chars().count();
        if text.trim().is_empty() {
            return Self {
                characters,
                ..Self::default()
            };
        }

        let words = text.split_whitespace().count();
        let sentences = SENTENCE_END_RE.find_iter(text).count();
        let paragraphs = PARAGRAPH_BREAK_RE
            .split(text)
            .filter(|segment| !segment.trim().is_empty())
            .count();

        Self {
            characters,
            words,
            sentences,
            paragraphs,
            reading_minutes: words.div_ceil(WORDS_PER_MINUTE),
        }
    }
}

/// Group digits in threes with commas (`1234567` → `"1,234,567"`).
pub fn format_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text() {
        assert_eq!(TextStats::count(""), TextStats::default());
    }

    #[test]
    fn test_blank_text_counts_only_characters() {
        let stats = TextStats::count("  \n\t ");
        assert_eq!(stats.characters, 5);
        assert_eq!(stats.words, 0);
        assert_eq!(stats.paragraphs, 0);
        assert_eq!(stats.reading_minutes, 0);
    }

    #[test]
    fn test_words_ignore_repeated_whitespace() {
        let stats = TextStats::count("  one   two\tthree\nfour ");
        assert_eq!(stats.words, 4);
    }

    #[test]
    fn test_sentence_runs_count_once() {
        let stats = TextStats::count("Wait... what?! Really.");
        assert_eq!(stats.sentences, 3);
    }

    #[test]
    fn test_text_without_terminator_has_no_sentence() {
        assert_eq!(TextStats::count("no ending here").sentences, 0);
    }

    #[test]
    fn test_paragraphs_skip_blank_lines() {
        let stats = TextStats::count("first\n\n\nsecond\n   \nthird\r\n");
        assert_eq!(stats.paragraphs, 3);
    }

    #[test]
    fn test_paragraphs_split_on_newline_runs_only() {
        // A lone carriage return is not a break; CRLF breaks on its \n.
        assert_eq!(TextStats::count("one\rtwo").paragraphs, 1);
        assert_eq!(TextStats::count("one\r\ntwo\r\n\r\nthree").paragraphs, 3);
        assert_eq!(TextStats::count("\n\nonly\n\n").paragraphs, 1);
    }

    #[test]
    fn test_characters_count_scalars() {
        assert_eq!(TextStats::count("héllo wörld").characters, 11);
    }

    #[test]
    fn test_reading_time_rounds_up() {
        assert_eq!(TextStats::count("word").reading_minutes, 1);
        let two_hundred = vec!["w"; 200].join(" ");
        assert_eq!(TextStats::count(&two_hundred).reading_minutes, 1);
        let two_hundred_one = vec!["w"; 201].join(" ");
        assert_eq!(TextStats::count(&two_hundred_one).reading_minutes, 2);
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(1234567), "1,234,567");
        assert_eq!(format_thousands(100000), "100,000");
    }
}
