//! Splitting raw search input into quoted and unquoted parts.
//!
//! Input is read with shell-style word splitting where `"` is the only quote
//! character and whitespace separates words. There are no escapes and no
//! comments. A word that opens with a quote runs to the matching close quote
//! and ends there; a quote in the middle of a word is an ordinary character.
//!
//! Words wrapped in quotes become exact phrases, everything else is rejoined
//! into a single unquoted string.

use std::{iter::Peekable, str::Chars};

use crate::error::LexError;

/// The only quote character recognized in search input.
const QUOTE: char = '"';

/// A search term split into free text and exact phrases.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitQuery {
    /// Unquoted words joined with single spaces. Empty if there are none.
    pub unquoted: String,
    /// Quoted phrases with the enclosing quotes removed.
    pub quoted: Vec<String>,
}

impl SplitQuery {
    /// Returns true if neither part carries any text.
    pub fn is_empty(&self) -> bool {
        self.unquoted.is_empty() && self.quoted.is_empty()
    }
}

/// Splits a string into words.
struct Lexer<'a> {
    /// The original input string.
    input: &'a str,
    /// Character iterator with one-character lookahead.
    chars: Peekable<Chars<'a>>,
    /// Current byte position in input.
    position: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.chars().peekable(),
            position: 0,
        }
    }

    /// Creates an error at a specific position.
    fn error_at(&self, message: impl Into<String>, position: usize) -> LexError {
        LexError::new(message, position, self.input)
    }

    /// Splits the entire input, returning all words or an error.
    fn words(mut self) -> Result<Vec<String>, LexError> {
        let mut words = Vec::new();

        while let Some(word) = self.next_word()? {
            words.push(word);
        }

        Ok(words)
    }

    /// Returns the next word, or None if at end of input.
    fn next_word(&mut self) -> Result<Option<String>, LexError> {
        self.skip_whitespace();

        match self.chars.peek() {
            None => Ok(None),
            Some(&QUOTE) => self.read_quoted().map(Some),
            Some(_) => Ok(Some(self.read_bare())),
        }
    }

    /// Reads a quoted word, keeping both quotes.
    fn read_quoted(&mut self) -> Result<String, LexError> {
        let start_pos = self.position;
        let mut word = String::from(QUOTE);
        self.advance();

        loop {
            match self.chars.peek() {
                Some(&QUOTE) => {
                    word.push(QUOTE);
                    self.advance();
                    return Ok(word);
                }
                Some(&ch) => {
                    word.push(ch);
                    self.advance();
                }
                None => return Err(self.error_at("unclosed quote", start_pos)),
            }
        }
    }

    /// Reads an unquoted word up to the next whitespace.
    fn read_bare(&mut self) -> String {
        let mut word = String::new();
        while let Some(&ch) = self.chars.peek() {
            if ch.is_whitespace() {
                break;
            }
            word.push(ch);
            self.advance();
        }
        word
    }

    /// Skips whitespace characters.
    fn skip_whitespace(&mut self) {
        while let Some(&ch) = self.chars.peek() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Advances to the next character.
    fn advance(&mut self) {
        if let Some(ch) = self.chars.next() {
            self.position += ch.len_utf8();
        }
    }
}

/// Splits `input` into words, keeping the quotes on quoted words.
pub fn split_words(input: &str) -> Result<Vec<String>, LexError> {
    Lexer::new(input).words()
}

/// Splits a raw search term into its unquoted text and quoted phrases.
///
/// An unbalanced quote is closed at the end of the input. Should that still
/// fail to split, the whole input is treated as unquoted text. This function
/// never fails.
pub fn split_quoted(raw: &str) -> SplitQuery {
    let words = match split_words(raw) {
        Ok(words) => words,
        Err(_) => match split_words(&format!("{raw}{QUOTE}")) {
            Ok(words) => words,
            Err(_) => {
                return SplitQuery {
                    unquoted: raw.to_string(),
                    quoted: Vec::new(),
                };
            }
        },
    };

    let mut unquoted = Vec::new();
    let mut quoted = Vec::new();
    for word in words {
        if word.is_empty() {
            continue;
        }
        if is_quoted(&word) {
            // `""` carries nothing and is dropped.
            if word.len() > 2 {
                quoted.push(word[1..word.len() - 1].to_string());
            }
        } else {
            unquoted.push(word);
        }
    }

    SplitQuery {
        unquoted: unquoted.join(" "),
        quoted,
    }
}

/// Returns true if the word both starts and ends with a quote.
fn is_quoted(word: &str) -> bool {
    word.len() >= 2 && word.starts_with(QUOTE) && word.ends_with(QUOTE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(input: &str) -> (String, Vec<String>) {
        let q = split_quoted(input);
        (q.unquoted, q.quoted)
    }

    #[test]
    fn empty_input() {
        assert_eq!(split(""), (String::new(), vec![]));
        assert!(split_quoted("   ").is_empty());
    }

    #[test]
    fn unquoted_only() {
        assert_eq!(split("go cold turkey"), ("go cold turkey".into(), vec![]));
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(split("  go \t cold\n turkey "), ("go cold turkey".into(), vec![]));
    }

    #[test]
    fn phrase_between_words() {
        assert_eq!(
            split("dog \"exact phrase\" cat"),
            ("dog cat".into(), vec!["exact phrase".into()])
        );
    }

    #[test]
    fn multiple_phrases() {
        assert_eq!(
            split("\"soy bean\" curd \"pressed\""),
            ("curd".into(), vec!["soy bean".into(), "pressed".into()])
        );
    }

    #[test]
    fn empty_quotes_are_dropped() {
        assert_eq!(split("\"\" tofu"), ("tofu".into(), vec![]));
    }

    #[test]
    fn unclosed_quote_is_closed_at_end() {
        assert_eq!(
            split("dog \"exact phr"),
            ("dog".into(), vec!["exact phr".into()])
        );
    }

    #[test]
    fn lone_trailing_quote_yields_nothing_quoted() {
        assert_eq!(split("tofu \""), ("tofu".into(), vec![]));
    }

    #[test]
    fn quote_inside_word_is_literal() {
        assert_eq!(split("a\"b c"), ("a\"b c".into(), vec![]));
    }

    #[test]
    fn word_after_closing_quote_is_separate() {
        assert_eq!(
            split("\"soy bean\"curd"),
            ("curd".into(), vec!["soy bean".into()])
        );
    }

    #[test]
    fn split_words_reports_unclosed_quote() {
        let err = split_words("dog \"cat").unwrap_err();
        assert_eq!(err.position, 4);
        assert_eq!(err.message, "unclosed quote");
    }

    #[test]
    fn split_words_keeps_quotes() {
        assert_eq!(
            split_words("a \"b c\"").unwrap(),
            vec!["a".to_string(), "\"b c\"".to_string()]
        );
    }

    #[test]
    fn multibyte_positions() {
        let err = split_words("café \"x").unwrap_err();
        assert_eq!(err.position, 6);
    }
}
