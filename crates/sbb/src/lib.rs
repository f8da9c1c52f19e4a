//! sbb: Spelling Bee Buddy
//!
//! Search and indexing for Spelling Bee puzzles and their clues.
//!
//! Puzzles and clues live as documents in an external search service. sbb writes them
//! there idempotently, one upsert per document, and answers free-text searches that mix
//! clue text, quoted phrases, puzzle dates, and puzzle letters typed in any order.

#![warn(missing_docs)]

pub mod cli;
