//! Index client: the three service calls the rest of the crate needs.

use serde::Deserialize;
use serde_json::{Value, json};

use crate::{IndexError, Transport, analyzer::Analyzer};

/// Handle to one index on the service.
///
/// Holds no mutable state, so a single client can serve concurrent searches
/// when the transport allows it.
#[derive(Debug)]
pub struct IndexClient<T> {
    /// Request transport.
    transport: T,
    /// Index name.
    index: String,
    /// Analyzer used by [`Analyzer::tokenize`].
    analyzer: String,
}

/// Response body of `_analyze`.
#[derive(Deserialize)]
struct AnalyzeResponse {
    /// Produced tokens in position order.
    tokens: Vec<AnalyzedToken>,
}

/// One token from `_analyze`.
#[derive(Deserialize)]
struct AnalyzedToken {
    /// Token text.
    token: String,
}

impl<T: Transport> IndexClient<T> {
    /// Creates a client for `index`, tokenizing search input with `analyzer`.
    pub fn new(transport: T, index: impl Into<String>, analyzer: impl Into<String>) -> Self {
        Self {
            transport,
            index: index.into(),
            analyzer: analyzer.into(),
        }
    }

    /// Index name.
    pub fn index(&self) -> &str {
        &self.index
    }

    /// Underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Sends a partial update to document `id`, inserting it if missing.
    ///
    /// `body` is the full update request, e.g. `{"doc": ..., "doc_as_upsert": true}`.
    pub fn update(&self, id: &str, body: &Value) -> Result<Value, IndexError> {
        self.transport.post(&[self.index.as_str(), "_update", id], body)
    }

    /// Runs a search request.
    pub fn search(&self, body: &Value) -> Result<Value, IndexError> {
        self.transport.post(&[self.index.as_str(), "_search"], body)
    }

    /// Splits `text` with the named analyzer of this index.
    pub fn analyze(&self, analyzer: &str, text: &str) -> Result<Vec<String>, IndexError> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        let body = json!({ "analyzer": analyzer, "text": text });
        let response = self.transport.post(&[self.index.as_str(), "_analyze"], &body)?;
        let parsed: AnalyzeResponse =
            serde_json::from_value(response).map_err(|e| IndexError::decode(&e))?;
        Ok(parsed.tokens.into_iter().map(|t| t.token).collect())
    }
}

impl<T: Transport> Analyzer for IndexClient<T> {
    fn tokenize(&self, text: &str) -> Result<Vec<String>, IndexError> {
        self.analyze(&self.analyzer, text)
    }
}
