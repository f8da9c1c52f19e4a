//! Text analysis for search input.
//!
//! Clue matching needs search words split exactly the way the index split
//! clue text. [`IndexClient`](crate::IndexClient) does that by asking the
//! service; [`SimpleAnalyzer`] approximates it locally for offline use.

use crate::IndexError;

/// Splits text into index tokens.
pub trait Analyzer {
    /// Returns the tokens of `text` in position order. Empty text yields no tokens.
    fn tokenize(&self, text: &str) -> Result<Vec<String>, IndexError>;
}

/// Lower-cases and splits on anything that is not alphanumeric.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleAnalyzer;

impl Analyzer for SimpleAnalyzer {
    fn tokenize(&self, text: &str) -> Result<Vec<String>, IndexError> {
        Ok(text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .map(str::to_lowercase)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_and_lowercases() {
        let tokens = SimpleAnalyzer.tokenize("Go cold-turkey, NOW!").unwrap();
        assert_eq!(tokens, vec!["go", "cold", "turkey", "now"]);
    }

    #[test]
    fn empty_input() {
        assert!(SimpleAnalyzer.tokenize("").unwrap().is_empty());
        assert!(SimpleAnalyzer.tokenize(" ... ").unwrap().is_empty());
    }
}
