//! Read path: query execution, result assembly, and lookahead pagination.

use sbb_query::{QueryBuilder, QueryParams, sanitize_term};
use serde_json::{Value, json};
use tracing::debug;

use crate::{
    Analyzer, IndexClient, IndexError, Transport,
    result::{Pagination, SearchItem, SearchPage, SearchResponse},
};

/// Paging limits and link base for a [`Searcher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Results per page.
    pub page_size: usize,
    /// Highest page that offers a next page.
    pub max_page_num: u32,
    /// Path page links are built on.
    pub base_url: String,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            page_size: 20,
            max_page_num: 50,
            base_url: String::from("/search"),
        }
    }
}

/// Runs searches against the index.
///
/// Each call is one analyzer round trip plus one search round trip. Nothing
/// is cached and nothing is retried.
#[derive(Debug)]
pub struct Searcher<'a, T> {
    /// Index handle, also the analyzer.
    client: &'a IndexClient<T>,
    /// Query construction.
    builder: QueryBuilder,
    /// Paging limits.
    options: SearchOptions,
}

impl<'a, T: Transport> Searcher<'a, T> {
    /// Creates a searcher.
    pub fn new(client: &'a IndexClient<T>, params: QueryParams, options: SearchOptions) -> Self {
        Self {
            client,
            builder: QueryBuilder::new(params),
            options,
        }
    }

    /// Returns page `page` (1-based) of results for `term`.
    ///
    /// Pages below 1 are treated as page 1. A term with nothing searchable
    /// returns an empty page without contacting the service.
    pub fn search(&self, term: &str, page: u32) -> Result<SearchPage, IndexError> {
        let term = sanitize_term(term);
        let page = page.max(1);
        let page_size = self.options.page_size;

        let Some(body) = search_body(&self.builder, self.client, &term, page, page_size)? else {
            return Ok(self.empty_page(term, page));
        };

        let response = self.client.search(&body)?;
        let parsed: SearchResponse =
            serde_json::from_value(response).map_err(|e| IndexError::decode(&e))?;
        let hits = parsed.hits.hits;
        let fetched = hits.len();
        debug!(term = %term, page, hits = fetched, "search");

        let mut items = hits
            .into_iter()
            .take(page_size)
            .map(SearchItem::from_hit)
            .collect::<Result<Vec<_>, _>>()?;
        // Stable, so equal scores keep the service's order.
        items.sort_by(|a, b| b.score().total_cmp(&a.score()));

        let pagination = Pagination {
            page,
            has_next: fetched > page_size && page < self.options.max_page_num,
            has_previous: page > 1 && !items.is_empty(),
            base_url: self.options.base_url.clone(),
        };

        Ok(SearchPage {
            term,
            items,
            pagination,
        })
    }

    /// A page with no results and no links.
    fn empty_page(&self, term: String, page: u32) -> SearchPage {
        SearchPage {
            term,
            items: Vec::new(),
            pagination: Pagination {
                page,
                has_next: false,
                has_previous: false,
                base_url: self.options.base_url.clone(),
            },
        }
    }
}

/// Builds the `_search` request body for one page, or `None` if `term` has
/// nothing to search for.
///
/// One result past the page is requested so the caller can tell whether a
/// next page exists.
pub fn search_body(
    builder: &QueryBuilder,
    analyzer: &impl Analyzer,
    term: &str,
    page: u32,
    page_size: usize,
) -> Result<Option<Value>, IndexError> {
    let Some(query) = builder.build(term, |text| analyzer.tokenize(text))? else {
        return Ok(None);
    };
    let from = (page.max(1) as usize - 1) * page_size;
    Ok(Some(json!({
        "query": query,
        "from": from,
        "size": page_size + 1,
    })))
}
