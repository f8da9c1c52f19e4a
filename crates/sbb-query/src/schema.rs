//! Field names and ranking weights of the shared puzzle/clue index.
//!
//! Puzzle and clue documents live in one index and are told apart by the
//! `type` keyword field. Field names are a wire contract with the index
//! mapping:
//! - `type`: `"puzzle"` or `"clue"` (keyword)
//! - `url`: canonical page path (keyword)
//! - `date`: ISO `YYYY-MM-DD` puzzle date (keyword)
//! - `letters`: the seven puzzle letters, upper-cased and sorted (keyword)
//! - `center_letter`, `outer_letters`: the letters as published (keyword)
//! - `month_day`, `day_month`, `month_day_year`, `day_month_year`:
//!   normalized date renderings such as `"december 31 2024"` (keyword)
//! - `word`: the answer a clue describes (keyword)
//! - `text`: clue text (analyzed with positions)

/// Field names used in indexed documents and queries.
pub mod field {
    /// Document kind discriminator.
    pub const TYPE: &str = "type";
    /// Canonical page path.
    pub const URL: &str = "url";
    /// ISO puzzle date.
    pub const DATE: &str = "date";
    /// Sorted puzzle letters.
    pub const LETTERS: &str = "letters";
    /// Center letter.
    pub const CENTER_LETTER: &str = "center_letter";
    /// Outer letters as published.
    pub const OUTER_LETTERS: &str = "outer_letters";
    /// `"december 31"`.
    pub const MONTH_DAY: &str = "month_day";
    /// `"31 december"`.
    pub const DAY_MONTH: &str = "day_month";
    /// `"december 31 2024"`.
    pub const MONTH_DAY_YEAR: &str = "month_day_year";
    /// `"31 december 2024"`.
    pub const DAY_MONTH_YEAR: &str = "day_month_year";
    /// Clue answer.
    pub const WORD: &str = "word";
    /// Clue text.
    pub const TEXT: &str = "text";

    /// The normalized date fields matched against date-like queries.
    pub const DATE_FORMS: [&str; 4] = [MONTH_DAY, DAY_MONTH, MONTH_DAY_YEAR, DAY_MONTH_YEAR];
}

/// Values of the `type` field.
pub mod kind {
    /// Puzzle documents.
    pub const PUZZLE: &str = "puzzle";
    /// Clue documents.
    pub const CLUE: &str = "clue";
}

/// Boost tiers for clue text matching.
///
/// Tiers are spaced so that any exact match outranks any fuzzy one and an
/// in-order match outranks the same terms reordered.
pub mod boost {
    /// Quoted phrase, matched exactly and contiguously.
    pub const QUOTED_PHRASE: f32 = 500.0;
    /// All terms exact, in query order.
    pub const IN_ORDER_EXACT: f32 = 400.0;
    /// All terms exact, any order.
    pub const ANY_ORDER_EXACT: f32 = 300.0;
    /// Terms fuzzy, in query order.
    pub const IN_ORDER_FUZZY: f32 = 50.0;
    /// Terms fuzzy, any order. Present for recall only.
    pub const ANY_ORDER_FUZZY: f32 = 0.0;
}

/// Default positional window for span matches.
pub const DEFAULT_SLOP: u32 = 5;

/// Number of distinct letters in a puzzle.
pub const PUZZLE_LETTER_COUNT: usize = 7;
