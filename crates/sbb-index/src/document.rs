//! Indexed document model.
//!
//! Puzzles and clues share one index and are told apart by their `type`
//! field. Document ids are pure functions of content, which is what makes
//! repeated upserts idempotent.

use chrono::NaiveDate;
use md5::{Digest, Md5};
use sbb_query::{letters_key, schema::kind};
use serde::{Deserialize, Serialize};

use crate::IndexError;

/// Longest clue slug, in bytes.
const MAX_SLUG_LEN: usize = 100;

/// Number of outer letters in a puzzle.
const OUTER_LETTER_COUNT: usize = 6;

/// Wire format of document dates.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// A puzzle, found by its date or its letters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleDocument {
    /// Canonical page path, also the document id.
    pub url: String,
    /// Print date.
    pub date: NaiveDate,
    /// Center and outer letters, upper-cased and sorted.
    pub letters: String,
    /// Required letter.
    pub center_letter: String,
    /// The six other letters, upper-cased, in puzzle order.
    pub outer_letters: String,
    /// e.g. `december 31`.
    pub month_day: String,
    /// e.g. `31 december`.
    pub day_month: String,
    /// e.g. `december 31 2024`.
    pub month_day_year: String,
    /// e.g. `31 december 2024`.
    pub day_month_year: String,
}

impl PuzzleDocument {
    /// Builds a puzzle document.
    ///
    /// `date` is `YYYY-MM-DD`. The center letter and the six outer letters
    /// must be seven distinct ASCII letters in any case.
    pub fn new(date: &str, center_letter: &str, outer_letters: &str) -> Result<Self, IndexError> {
        let date = parse_date(date)?;
        let center = center_letter.trim().to_ascii_uppercase();
        let outer = outer_letters.trim().to_ascii_uppercase();

        if center.len() != 1 || !center.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(IndexError::InvalidDocument(format!(
                "center letter must be one letter, got '{center_letter}'"
            )));
        }
        if outer.len() != OUTER_LETTER_COUNT || !outer.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(IndexError::InvalidDocument(format!(
                "outer letters must be {OUTER_LETTER_COUNT} letters, got '{outer_letters}'"
            )));
        }

        let letters = letters_key(&center, &outer);
        let mut distinct: Vec<char> = letters.chars().collect();
        distinct.dedup();
        if distinct.len() != letters.len() {
            return Err(IndexError::InvalidDocument(format!(
                "puzzle letters repeat: '{letters}'"
            )));
        }

        let month = date.format("%B").to_string().to_lowercase();
        let day = date.format("%-d").to_string();
        let year = date.format("%Y").to_string();

        Ok(Self {
            url: puzzle_url(date),
            date,
            letters,
            center_letter: center,
            outer_letters: outer,
            month_day: format!("{month} {day}"),
            day_month: format!("{day} {month}"),
            month_day_year: format!("{month} {day} {year}"),
            day_month_year: format!("{day} {month} {year}"),
        })
    }
}

/// A clue and the answer it was given for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClueDocument {
    /// Canonical clue page path.
    pub url: String,
    /// Most recent puzzle date using this clue for this word.
    pub date: NaiveDate,
    /// The answer.
    pub word: String,
    /// The clue text.
    pub text: String,
}

impl ClueDocument {
    /// Builds a clue document. `date` is `YYYY-MM-DD`.
    pub fn new(url: &str, word: &str, text: &str, date: &str) -> Result<Self, IndexError> {
        if word.is_empty() || text.is_empty() {
            return Err(IndexError::InvalidDocument(
                "clue word and text must not be empty".into(),
            ));
        }
        Ok(Self {
            url: url.to_string(),
            date: parse_date(date)?,
            word: word.to_string(),
            text: text.to_string(),
        })
    }
}

/// Any document stored in the index, tagged by its `type` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Document {
    /// `type = "puzzle"`.
    Puzzle(PuzzleDocument),
    /// `type = "clue"`.
    Clue(ClueDocument),
}

impl Document {
    /// Deterministic document id.
    pub fn id(&self) -> String {
        match self {
            Self::Puzzle(p) => p.url.clone(),
            Self::Clue(c) => clue_id(&c.word, &c.text),
        }
    }

    /// Value of the `type` field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Puzzle(_) => kind::PUZZLE,
            Self::Clue(_) => kind::CLUE,
        }
    }
}

/// Id of the clue document for a word/text pair: hex MD5 of `word_text`.
pub fn clue_id(word: &str, text: &str) -> String {
    let digest = Md5::digest(format!("{word}_{text}").as_bytes());
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

/// Canonical page path of the puzzle printed on `date`.
pub fn puzzle_url(date: NaiveDate) -> String {
    format!("/puzzle/{}", date.format(DATE_FORMAT))
}

/// Canonical page path of a clue, derived from its text.
pub fn clue_url(text: &str) -> String {
    format!("/clue/{}", slugify(text))
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(date: &str) -> Result<NaiveDate, IndexError> {
    NaiveDate::parse_from_str(date.trim(), DATE_FORMAT)
        .map_err(|e| IndexError::InvalidDocument(format!("invalid date '{date}': {e}")))
}

/// Turns clue text into a path-safe slug.
///
/// ASCII letters and digits are kept and lower-cased, other ASCII characters
/// become hyphens, and runs of hyphens collapse to one. Non-ASCII characters
/// are dropped. Slugs longer than `MAX_SLUG_LEN` are cut back to the last
/// hyphen inside the limit.
fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut prev_hyphen = false;
    for c in text.chars().filter(char::is_ascii) {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            prev_hyphen = false;
        } else if !prev_hyphen {
            slug.push('-');
            prev_hyphen = true;
        }
    }
    let slug = slug.trim_matches('-');

    if slug.len() <= MAX_SLUG_LEN {
        return slug.to_string();
    }
    let cut = &slug[..MAX_SLUG_LEN];
    match cut.rfind('-') {
        Some(i) => cut[..i].to_string(),
        None => cut.to_string(),
    }
}
