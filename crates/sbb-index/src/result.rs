//! Search result and pagination types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::form_urlencoded;

use crate::{Document, IndexError};

/// A clue matched by a search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClueHit {
    /// Document id.
    pub id: String,
    /// Relevance score.
    pub score: f32,
    /// Clue page path.
    pub url: String,
    /// The answer.
    pub word: String,
    /// The clue text.
    pub text: String,
    /// Latest puzzle date using this clue.
    pub date: NaiveDate,
}

/// A puzzle matched by date or letters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PuzzleHit {
    /// Document id.
    pub id: String,
    /// Relevance score.
    pub score: f32,
    /// Puzzle page path.
    pub url: String,
    /// Print date.
    pub date: NaiveDate,
    /// Sorted puzzle letters.
    pub letters: String,
    /// Required letter.
    pub center_letter: String,
    /// The other six letters.
    pub outer_letters: String,
}

/// One search result, by document kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SearchItem {
    /// A clue document.
    Clue(ClueHit),
    /// A puzzle document.
    Puzzle(PuzzleHit),
}

impl SearchItem {
    /// Relevance score.
    pub fn score(&self) -> f32 {
        match self {
            Self::Clue(c) => c.score,
            Self::Puzzle(p) => p.score,
        }
    }

    /// Page path of the matched document.
    pub fn url(&self) -> &str {
        match self {
            Self::Clue(c) => &c.url,
            Self::Puzzle(p) => &p.url,
        }
    }

    /// Date of the matched document.
    pub fn date(&self) -> NaiveDate {
        match self {
            Self::Clue(c) => c.date,
            Self::Puzzle(p) => p.date,
        }
    }

    /// Decodes a raw `hits.hits[]` entry by its `_source.type`.
    pub(crate) fn from_hit(hit: RawHit) -> Result<Self, IndexError> {
        let score = hit.score.unwrap_or(0.0);
        let doc: Document = serde_json::from_value(hit.source).map_err(|e| {
            IndexError::Decode(format!("document {}: {e}", hit.id))
        })?;
        Ok(match doc {
            Document::Clue(c) => Self::Clue(ClueHit {
                id: hit.id,
                score,
                url: c.url,
                word: c.word,
                text: c.text,
                date: c.date,
            }),
            Document::Puzzle(p) => Self::Puzzle(PuzzleHit {
                id: hit.id,
                score,
                url: p.url,
                date: p.date,
                letters: p.letters,
                center_letter: p.center_letter,
                outer_letters: p.outer_letters,
            }),
        })
    }
}

/// Body of a `_search` response, reduced to what we read.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    /// Hit container.
    pub hits: HitList,
}

/// `hits` object of a search response.
#[derive(Debug, Deserialize)]
pub(crate) struct HitList {
    /// Returned documents in score order.
    pub hits: Vec<RawHit>,
}

/// One returned document.
#[derive(Debug, Deserialize)]
pub(crate) struct RawHit {
    /// Document id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Relevance score; absent when sorting by something else.
    #[serde(rename = "_score")]
    pub score: Option<f32>,
    /// Stored document.
    #[serde(rename = "_source")]
    pub source: Value,
}

/// Previous/next facts for one page of results.
///
/// Total hit counts are never computed; `has_next` comes from fetching one
/// result past the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    /// Current page, starting at 1.
    pub page: u32,
    /// Whether a next page exists and is within the page ceiling.
    pub has_next: bool,
    /// Whether a previous page should be offered.
    pub has_previous: bool,
    /// Path the page links are built on, e.g. `/search`.
    pub base_url: String,
}

impl Pagination {
    /// Number of the next page, if any.
    pub fn next_page(&self) -> Option<u32> {
        self.has_next.then(|| self.page + 1)
    }

    /// Number of the previous page, if any.
    pub fn previous_page(&self) -> Option<u32> {
        self.has_previous.then(|| self.page - 1)
    }

    /// Link to `page` of the results for `term`. Page 1 carries no `page` parameter.
    pub fn page_link(&self, term: &str, page: u32) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        query.append_pair("q", term);
        if page > 1 {
            query.append_pair("page", &page.to_string());
        }
        format!("{}?{}", self.base_url, query.finish())
    }
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchPage {
    /// The search term as used.
    pub term: String,
    /// Results, best first.
    pub items: Vec<SearchItem>,
    /// Previous/next facts.
    pub pagination: Pagination,
}

impl SearchPage {
    /// Whether the page has no results.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
