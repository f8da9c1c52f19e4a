//! Query builder.
//!
//! Turns a raw search term into one [`Query`] with two branches:
//!
//! - **Clue branch**: clue documents whose text matches. Unquoted words are
//!   matched as spans in four boost tiers (exact in order, exact any order,
//!   fuzzy in order, fuzzy any order). Quoted phrases are exact filters that
//!   outrank every span tier.
//! - **Puzzle branch**: puzzle documents whose normalized date renderings or
//!   sorted letters equal the normalized term.
//!
//! The `type` field makes the branches mutually exclusive per document.

use crate::{
    ast::{BoolQuery, Fuzziness, Query, SpanNear, SpanTerm},
    normalize::{normalize_date_query, normalize_letters_query},
    schema::{DEFAULT_SLOP, boost, field, kind},
    split::{SplitQuery, split_quoted},
};

/// Boost weights for each clue matching tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boosts {
    /// Quoted phrase.
    pub quoted_phrase: f32,
    /// Exact terms in order.
    pub in_order_exact: f32,
    /// Exact terms in any order.
    pub any_order_exact: f32,
    /// Fuzzy terms in order.
    pub in_order_fuzzy: f32,
    /// Fuzzy terms in any order.
    pub any_order_fuzzy: f32,
}

impl Default for Boosts {
    fn default() -> Self {
        Self {
            quoted_phrase: boost::QUOTED_PHRASE,
            in_order_exact: boost::IN_ORDER_EXACT,
            any_order_exact: boost::ANY_ORDER_EXACT,
            in_order_fuzzy: boost::IN_ORDER_FUZZY,
            any_order_fuzzy: boost::ANY_ORDER_FUZZY,
        }
    }
}

/// Parameters controlling query construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryParams {
    /// Positional window for span matches.
    pub slop: u32,
    /// Boost tiers.
    pub boosts: Boosts,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            slop: DEFAULT_SLOP,
            boosts: Boosts::default(),
        }
    }
}

/// Builds structured queries from raw search terms.
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    /// Slop and boosts.
    params: QueryParams,
}

impl QueryBuilder {
    /// Creates a builder with the given parameters.
    pub fn new(params: QueryParams) -> Self {
        Self { params }
    }

    /// Returns the parameters this builder uses.
    pub fn params(&self) -> &QueryParams {
        &self.params
    }

    /// Builds the query for `term`.
    ///
    /// `tokenize` splits unquoted text into the same tokens the index
    /// produced for clue text; it is usually a call to the service's
    /// analyzer, so it may fail, and its error is passed through unchanged.
    ///
    /// Returns `Ok(None)` when nothing in `term` can match any document.
    pub fn build<E>(
        &self,
        term: &str,
        tokenize: impl FnMut(&str) -> Result<Vec<String>, E>,
    ) -> Result<Option<Query>, E> {
        let split = split_quoted(term);
        let clue = self.clue_branch(&split, tokenize)?;
        let puzzle = self.puzzle_branch(term);

        let branches: Vec<Query> = clue.into_iter().chain(puzzle).collect();
        if branches.is_empty() {
            return Ok(None);
        }
        Ok(Some(Query::or(branches)))
    }

    /// Builds the clue branch, or `None` if the term has no clue text.
    fn clue_branch<E>(
        &self,
        split: &SplitQuery,
        mut tokenize: impl FnMut(&str) -> Result<Vec<String>, E>,
    ) -> Result<Option<Query>, E> {
        let unquoted = if split.unquoted.is_empty() {
            None
        } else {
            self.tiered_spans(&tokenize(&split.unquoted)?)
        };

        let matched = match (unquoted, split.quoted.is_empty()) {
            (None, true) => return Ok(None),
            (Some(spans), true) => spans,
            (unquoted, false) => {
                // Every quoted phrase is required; unquoted words must also
                // occur but only add ranking.
                let mut required: Vec<Query> = split
                    .quoted
                    .iter()
                    .map(|phrase| Query::MatchPhrase {
                        field: field::TEXT,
                        phrase: phrase.clone(),
                        boost: self.params.boosts.quoted_phrase,
                    })
                    .collect();
                required.extend(unquoted);
                Query::and(required)
            }
        };

        Ok(Some(Query::filtered(matched, field::TYPE, kind::CLUE)))
    }

    /// Builds the four span tiers for analyzed unquoted tokens.
    fn tiered_spans(&self, tokens: &[String]) -> Option<Query> {
        if tokens.is_empty() {
            return None;
        }

        let b = &self.params.boosts;
        let tiers = [
            (Fuzziness::Exact, true, b.in_order_exact),
            (Fuzziness::Exact, false, b.any_order_exact),
            (Fuzziness::Auto, true, b.in_order_fuzzy),
            (Fuzziness::Auto, false, b.any_order_fuzzy),
        ];

        let spans = tiers
            .into_iter()
            .map(|(fuzziness, in_order, boost)| {
                Query::SpanNear(SpanNear {
                    clauses: span_terms(tokens, fuzziness),
                    slop: self.params.slop,
                    in_order,
                    boost,
                })
            })
            .collect();

        Some(Query::Bool(BoolQuery {
            should: spans,
            ..BoolQuery::default()
        }))
    }

    /// Builds the puzzle branch, or `None` if the term is blank.
    fn puzzle_branch(&self, term: &str) -> Option<Query> {
        let date = normalize_date_query(term);
        let mut clauses: Vec<Query> = if date.is_empty() {
            Vec::new()
        } else {
            field::DATE_FORMS
                .into_iter()
                .map(|f| Query::term(f, date.clone()))
                .collect()
        };

        if let Some(letters) = normalize_letters_query(term) {
            clauses.push(Query::term(field::LETTERS, letters));
        }

        if clauses.is_empty() {
            return None;
        }

        Some(Query::filtered(
            Query::or(clauses),
            field::TYPE,
            kind::PUZZLE,
        ))
    }
}

/// Creates one span clause per token over the clue text field.
fn span_terms(tokens: &[String], fuzziness: Fuzziness) -> Vec<SpanTerm> {
    tokens
        .iter()
        .map(|t| SpanTerm {
            field: field::TEXT,
            value: t.clone(),
            fuzziness,
        })
        .collect()
}
