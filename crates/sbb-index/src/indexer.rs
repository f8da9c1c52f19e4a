//! Write path: idempotent document upserts.

use serde_json::{Value, json};
use tracing::debug;

use crate::{
    ClueDocument, Document, IndexClient, IndexError, PuzzleDocument, RetryPolicy, Transport,
};

/// Upserts puzzle and clue documents.
///
/// Every write is a single partial-update-with-upsert call keyed by the
/// document's deterministic id, so repeating a write is harmless.
#[derive(Debug)]
pub struct Indexer<'a, T> {
    /// Index handle.
    client: &'a IndexClient<T>,
    /// Retry applied to each write.
    retry: RetryPolicy,
}

impl<'a, T: Transport> Indexer<'a, T> {
    /// Creates an indexer writing through `client`.
    pub fn new(client: &'a IndexClient<T>, retry: RetryPolicy) -> Self {
        Self { client, retry }
    }

    /// Upserts the puzzle printed on `date` and returns its id.
    pub fn upsert_puzzle(
        &self,
        date: &str,
        center_letter: &str,
        outer_letters: &str,
    ) -> Result<String, IndexError> {
        let doc = PuzzleDocument::new(date, center_letter, outer_letters)?;
        self.upsert(&Document::Puzzle(doc))
    }

    /// Upserts a clue and returns its id.
    ///
    /// `date` should be the latest puzzle using this clue for `word`; the
    /// last write for a word/text pair wins.
    pub fn upsert_clue(
        &self,
        url: &str,
        word: &str,
        text: &str,
        date: &str,
    ) -> Result<String, IndexError> {
        let doc = ClueDocument::new(url, word, text, date)?;
        self.upsert(&Document::Clue(doc))
    }

    /// Upserts any document and returns its id.
    pub fn upsert(&self, doc: &Document) -> Result<String, IndexError> {
        let id = doc.id();
        let body = update_body(doc)?;
        self.retry.run(&id, || self.client.update(&id, &body))?;
        debug!(id = %id, kind = doc.kind(), "upserted document");
        Ok(id)
    }
}

/// Builds the `_update` request body for `doc`.
fn update_body(doc: &Document) -> Result<Value, IndexError> {
    let doc = serde_json::to_value(doc).map_err(|e| IndexError::decode(&e))?;
    Ok(json!({ "doc": doc, "doc_as_upsert": true }))
}
