//! Puzzle and clue indexing and search for sbb.
//!
//! This crate is everything that talks to the external search service:
//! - Document model with content-derived ids, so upserts are idempotent
//! - [`Indexer`]: partial-update-with-upsert writes with bounded retry
//! - [`Searcher`]: query execution, result decoding, lookahead pagination
//! - [`Importer`]: bulk import of scraped puzzle files
//!
//! Requests go through the [`Transport`] trait; [`HttpTransport`] is the
//! production implementation.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use sbb_index::{
//!     HttpTransport, IndexClient, Indexer, RetryPolicy, SearchOptions, Searcher,
//! };
//!
//! let transport = HttpTransport::new("http://127.0.0.1:9200", None, Duration::from_secs(10))?;
//! let client = IndexClient::new(transport, "sbb", "search_analyser");
//!
//! let indexer = Indexer::new(&client, RetryPolicy::default());
//! indexer.upsert_clue("/clue/beep", "toot", "Beep", "2024-12-18")?;
//!
//! let searcher = Searcher::new(&client, Default::default(), SearchOptions::default());
//! let page = searcher.search("beep", 1)?;
//! for item in &page.items {
//!     println!("{} {}", item.score(), item.url());
//! }
//! # Ok::<(), sbb_index::IndexError>(())
//! ```

#![warn(missing_docs)]

mod analyzer;
mod client;
mod document;
mod error;
mod import;
mod indexer;
mod result;
mod retry;
mod search;
#[cfg(test)]
mod test_support;
mod transport;

pub use analyzer::{Analyzer, SimpleAnalyzer};
pub use client::IndexClient;
pub use document::{
    ClueDocument, Document, PuzzleDocument, clue_id, clue_url, parse_date, puzzle_url,
};
pub use error::IndexError;
pub use import::{ImportStats, Importer, ScrapedClue, ScrapedPuzzle};
pub use indexer::Indexer;
pub use result::{ClueHit, Pagination, PuzzleHit, SearchItem, SearchPage};
pub use retry::RetryPolicy;
pub use search::{SearchOptions, Searcher, search_body};
pub use transport::{HttpTransport, Transport};
