//! Typed query tree.
//!
//! Queries are assembled as a tree of [`Query`] nodes and only turned into
//! the index service's JSON query DSL when serialized at the request
//! boundary.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value, json};

/// How far a span term may drift from the query term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fuzziness {
    /// Exact term match only.
    Exact,
    /// Edit distance chosen by the service from the term length.
    Auto,
}

impl Fuzziness {
    /// Returns the wire value for this fuzziness.
    fn to_json(self) -> Value {
        match self {
            Self::Exact => json!(0),
            Self::Auto => json!("AUTO"),
        }
    }
}

/// A single term inside a span query.
#[derive(Debug, Clone, PartialEq)]
pub struct SpanTerm {
    /// Field the term is matched in.
    pub field: &'static str,
    /// Analyzed term text.
    pub value: String,
    /// Allowed misspelling.
    pub fuzziness: Fuzziness,
}

/// Terms that must all occur within `slop` positions of each other.
#[derive(Debug, Clone, PartialEq)]
pub struct SpanNear {
    /// One clause per query term.
    pub clauses: Vec<SpanTerm>,
    /// Maximum number of intervening positions.
    pub slop: u32,
    /// Whether the terms must appear in clause order.
    pub in_order: bool,
    /// Score weight.
    pub boost: f32,
}

/// Boolean combination of sub-queries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoolQuery {
    /// All must match; contributes to the score.
    pub must: Vec<Query>,
    /// At least one must match when `must` and `filter` are empty.
    pub should: Vec<Query>,
    /// All must match; does not contribute to the score.
    pub filter: Vec<Query>,
}

/// A structured query against the index.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// Boolean combination.
    Bool(BoolQuery),
    /// Positional proximity match.
    SpanNear(SpanNear),
    /// Exact contiguous phrase in an analyzed field.
    MatchPhrase {
        /// Analyzed field.
        field: &'static str,
        /// Phrase text, analyzed by the service.
        phrase: String,
        /// Score weight.
        boost: f32,
    },
    /// Exact value of a keyword field.
    Term {
        /// Keyword field.
        field: &'static str,
        /// Value to compare.
        value: String,
    },
}

impl Query {
    /// Creates a conjunction, unwrapping a single clause.
    pub fn and(mut clauses: Vec<Self>) -> Self {
        if clauses.len() == 1 {
            return clauses.remove(0);
        }
        Self::Bool(BoolQuery {
            must: clauses,
            ..BoolQuery::default()
        })
    }

    /// Creates a disjunction, unwrapping a single clause.
    pub fn or(mut clauses: Vec<Self>) -> Self {
        if clauses.len() == 1 {
            return clauses.remove(0);
        }
        Self::Bool(BoolQuery {
            should: clauses,
            ..BoolQuery::default()
        })
    }

    /// Restricts `query` to documents whose `field` equals `value`.
    ///
    /// The restriction is a filter and leaves the score of `query` unchanged.
    pub fn filtered(query: Self, field: &'static str, value: &str) -> Self {
        Self::Bool(BoolQuery {
            must: vec![query],
            filter: vec![Self::term(field, value)],
            ..BoolQuery::default()
        })
    }

    /// Creates an exact keyword match.
    pub fn term(field: &'static str, value: impl Into<String>) -> Self {
        Self::Term {
            field,
            value: value.into(),
        }
    }

    /// Renders this query in the service's JSON query DSL.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Bool(b) => {
                let mut body = Map::new();
                for (key, clauses) in [("must", &b.must), ("should", &b.should), ("filter", &b.filter)]
                {
                    if !clauses.is_empty() {
                        body.insert(key.into(), clauses.iter().map(Self::to_json).collect());
                    }
                }
                json!({ "bool": body })
            }
            Self::SpanNear(span) => json!({
                "span_near": {
                    "clauses": span.clauses.iter().map(span_term_json).collect::<Vec<_>>(),
                    "slop": span.slop,
                    "in_order": span.in_order,
                    "boost": span.boost,
                }
            }),
            Self::MatchPhrase {
                field,
                phrase,
                boost,
            } => json!({
                "match_phrase": {
                    *field: { "query": phrase, "slop": 0, "boost": boost }
                }
            }),
            Self::Term { field, value } => json!({ "term": { *field: value } }),
        }
    }
}

/// Renders a span term as a `span_multi` wrapped fuzzy query.
fn span_term_json(term: &SpanTerm) -> Value {
    json!({
        "span_multi": {
            "match": {
                "fuzzy": {
                    term.field: {
                        "value": term.value,
                        "fuzziness": term.fuzziness.to_json(),
                    }
                }
            }
        }
    })
}

impl Serialize for Query {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}
