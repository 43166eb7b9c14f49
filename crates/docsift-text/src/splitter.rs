//! Rule-based sentence boundary detection.
//!
//! A sentence ends at a run of `.`, `!` or `?` (optionally followed by
//! closing quotes or brackets) that is followed by whitespace or the end of
//! the text, or at a blank line. A single period does not end a sentence
//! after a known abbreviation or a one-letter initial, and no terminator
//! ends a sentence when the next word starts in lowercase.

use std::collections::HashSet;

use docsift_core::config::SegmenterConfig;
use docsift_core::traits::SentenceSplitter;

#[derive(Debug, Clone)]
pub struct RuleSplitter {
    abbreviations: HashSet<String>,
}

impl RuleSplitter {
    pub fn new<I, S>(abbreviations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let abbreviations = abbreviations
            .into_iter()
            .map(|a| a.as_ref().trim_end_matches('.').to_lowercase())
            .filter(|a| !a.is_empty())
            .collect();
        Self { abbreviations }
    }

    pub fn from_config(config: &SegmenterConfig) -> Self { Self::new(&config.abbreviations) }

    /// Byte ranges of the raw (untrimmed) sentences in `text`.
    fn raw_ranges(&self, text: &str) -> Vec<(usize, usize)> {
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let n = chars.len();
        let mut ranges = Vec::new();
        let mut start = 0usize;
        let mut i = 0usize;
        while i < n {
            let (pos, c) = chars[i];
            if is_terminator(c) {
                let mut j = i + 1;
                while j < n && is_terminator(chars[j].1) { j += 1; }
                let single_period = c == '.' && j == i + 1;
                while j < n && is_closer(chars[j].1) { j += 1; }
                let at_end = j == n;
                if at_end || chars[j].1.is_whitespace() {
                    let end = if at_end { text.len() } else { chars[j].0 };
                    let abbreviated = single_period && self.ends_with_abbreviation(&text[start..pos]);
                    if !abbreviated && !next_word_is_lowercase(&chars[j..]) {
                        ranges.push((start, end));
                        start = end;
                    }
                }
                i = j;
                continue;
            }
            if c == '\n' && starts_blank_line(&chars[i + 1..]) {
                ranges.push((start, pos));
                start = pos;
            }
            i += 1;
        }
        ranges.push((start, text.len()));
        ranges
    }

    fn ends_with_abbreviation(&self, before_period: &str) -> bool {
        let word = before_period
            .rsplit(char::is_whitespace)
            .next()
            .unwrap_or("")
            .trim_start_matches(|c: char| !c.is_alphanumeric());
        let mut letters = word.chars();
        if let (Some(first), None) = (letters.next(), letters.next()) {
            if first.is_alphabetic() { return true; }
        }
        !word.is_empty() && self.abbreviations.contains(&word.to_lowercase())
    }
}

impl Default for RuleSplitter {
    fn default() -> Self { Self::from_config(&SegmenterConfig::default()) }
}

impl SentenceSplitter for RuleSplitter {
    fn split(&self, text: &str) -> Vec<String> {
        self.raw_ranges(text)
            .into_iter()
            .map(|(s, e)| text[s..e].trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

fn is_terminator(c: char) -> bool { matches!(c, '.' | '!' | '?') }

fn is_closer(c: char) -> bool { matches!(c, '"' | '\'' | ')' | ']' | '\u{201d}' | '\u{2019}') }

fn next_word_is_lowercase(rest: &[(usize, char)]) -> bool {
    rest.iter().map(|&(_, c)| c).find(|c| !c.is_whitespace()).is_some_and(char::is_lowercase)
}

fn starts_blank_line(rest: &[(usize, char)]) -> bool {
    rest.iter()
        .map(|&(_, c)| c)
        .find(|&c| !matches!(c, ' ' | '\t' | '\r'))
        .is_some_and(|c| c == '\n')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(text: &str) -> Vec<String> { RuleSplitter::default().split(text) }

    #[test]
    fn splits_on_terminators() {
        assert_eq!(split("The cat sat. The dog ran! Did birds fly?"), vec!["The cat sat.", "The dog ran!", "Did birds fly?"]);
    }

    #[test]
    fn keeps_abbreviations_and_initials() {
        assert_eq!(
            split("Dr. Smith met J. Doe at noon. They talked."),
            vec!["Dr. Smith met J. Doe at noon.", "They talked."]
        );
        assert_eq!(split("Use tools, e.g. Hammers. Done."), vec!["Use tools, e.g. Hammers.", "Done."]);
    }

    #[test]
    fn decimals_and_lowercase_continuations_do_not_split() {
        assert_eq!(split("Pi is 3.14 roughly. ok then. Next one."), vec!["Pi is 3.14 roughly. ok then.", "Next one."]);
    }

    #[test]
    fn closing_quotes_stay_with_sentence() {
        assert_eq!(split("He said \"Stop.\" Then he left."), vec!["He said \"Stop.\"", "Then he left."]);
    }

    #[test]
    fn blank_lines_end_sentences() {
        assert_eq!(split("Heading without period\n\nBody text here.\n"), vec!["Heading without period", "Body text here."]);
    }

    #[test]
    fn empty_and_whitespace_text_yield_nothing() {
        assert!(split("").is_empty());
        assert!(split("  \n\t ").is_empty());
    }

    #[test]
    fn custom_abbreviations() {
        let splitter = RuleSplitter::new(["approx."]);
        assert_eq!(splitter.split("It weighs approx. Ten kilos. Heavy."), vec!["It weighs approx. Ten kilos.", "Heavy."]);
    }
}
