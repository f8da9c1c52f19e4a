//! Query splitting and construction for sbb search.
//!
//! This crate turns free-text search input into a structured query against
//! the shared puzzle/clue index without talking to the index itself:
//!
//! - **Splitting**: `dog "exact phrase" cat` becomes unquoted `dog cat` plus
//!   the phrase `exact phrase`
//! - **Clue matching**: unquoted words match clue text in four boost tiers,
//!   quoted phrases must match exactly
//! - **Puzzle matching**: dates like `December 31, 2024` and puzzle letters
//!   typed in any order match puzzles exactly
//!
//! # Example
//!
//! ```
//! use std::convert::Infallible;
//!
//! use sbb_query::{QueryBuilder, split_quoted};
//!
//! let split = split_quoted("dog \"exact phrase\" cat");
//! assert_eq!(split.unquoted, "dog cat");
//! assert_eq!(split.quoted, vec!["exact phrase".to_string()]);
//!
//! let tokenize = |s: &str| -> Result<Vec<String>, Infallible> {
//!     Ok(s.split_whitespace().map(str::to_lowercase).collect())
//! };
//! let query = QueryBuilder::default().build("go cold turkey", tokenize).unwrap();
//! assert!(query.is_some());
//! ```

#![warn(missing_docs)]

mod ast;
mod builder;
mod error;
mod normalize;
pub mod schema;
mod split;

pub use ast::{BoolQuery, Fuzziness, Query, SpanNear, SpanTerm};
pub use builder::{Boosts, QueryBuilder, QueryParams};
pub use error::LexError;
pub use normalize::{
    letters_key, normalize_date_query, normalize_letters_query, sanitize_term,
};
pub use split::{SplitQuery, split_quoted, split_words};
