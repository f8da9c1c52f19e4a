//! In-memory stand-in for the index service, shared by unit tests.
//!
//! [`FakeTransport`] records every request, stores documents the way
//! `doc_as_upsert` updates do, and answers `_search` by evaluating the
//! query JSON against stored documents. Scores are the sum of the boosts of
//! the matching clauses, which is enough to check tier ordering.

use std::{
    cell::RefCell,
    collections::{BTreeMap, VecDeque},
};

use serde_json::{Map, Value, json};

use crate::{Analyzer, IndexError, SimpleAnalyzer, Transport};

/// One request seen by the fake.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Path segments.
    pub path: Vec<String>,
    /// JSON body.
    pub body: Value,
}

/// Queued outcome overriding normal handling.
enum Scripted {
    /// Fail the request.
    Fail(IndexError),
    /// Answer with this body.
    Respond(Value),
}

/// In-memory index service.
#[derive(Default)]
pub struct FakeTransport {
    /// Every request, in order.
    requests: RefCell<Vec<RecordedRequest>>,
    /// Stored documents in first-insert order.
    docs: RefCell<Vec<(String, Value)>>,
    /// Outcomes consumed before normal handling.
    script: RefCell<VecDeque<Scripted>>,
}

impl FakeTransport {
    /// Creates an empty fake.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next unscripted request fail with `err`.
    pub fn fail_next(&self, err: IndexError) {
        self.script.borrow_mut().push_back(Scripted::Fail(err));
    }

    /// Makes the next unscripted request return `body`.
    pub fn respond_with(&self, body: Value) {
        self.script.borrow_mut().push_back(Scripted::Respond(body));
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.borrow().clone()
    }

    /// Stored documents by id.
    pub fn documents(&self) -> BTreeMap<String, Value> {
        self.docs.borrow().iter().cloned().collect()
    }

    /// Applies a `doc_as_upsert` update.
    fn update(&self, id: &str, body: &Value) -> Result<Value, IndexError> {
        let Some(Value::Object(patch)) = body.get("doc") else {
            return Err(IndexError::Status {
                status: 400,
                body: "missing doc".into(),
            });
        };
        let mut docs = self.docs.borrow_mut();
        if let Some((_, Value::Object(existing))) = docs.iter_mut().find(|(k, _)| k == id) {
            for (k, v) in patch {
                existing.insert(k.clone(), v.clone());
            }
            return Ok(json!({ "_id": id, "result": "updated" }));
        }
        if body.get("doc_as_upsert") != Some(&Value::Bool(true)) {
            return Err(IndexError::Status {
                status: 404,
                body: "document_missing_exception".into(),
            });
        }
        docs.push((id.to_string(), Value::Object(patch.clone())));
        Ok(json!({ "_id": id, "result": "created" }))
    }

    /// Evaluates a search body.
    fn search(&self, body: &Value) -> Value {
        let query = body.get("query").cloned().unwrap_or_else(|| json!({}));
        let from = body.get("from").and_then(Value::as_u64).unwrap_or(0) as usize;
        let size = body.get("size").and_then(Value::as_u64).unwrap_or(10) as usize;

        let mut scored: Vec<(f32, &String, &Value)> = Vec::new();
        let docs = self.docs.borrow();
        for (id, doc) in docs.iter() {
            if let Some(score) = evaluate(&query, doc) {
                scored.push((score, id, doc));
            }
        }
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));

        let hits: Vec<Value> = scored
            .into_iter()
            .skip(from)
            .take(size)
            .map(|(score, id, doc)| json!({ "_id": id, "_score": score, "_source": doc }))
            .collect();
        json!({ "hits": { "hits": hits } })
    }
}

impl Transport for FakeTransport {
    fn post(&self, segments: &[&str], body: &Value) -> Result<Value, IndexError> {
        self.requests.borrow_mut().push(RecordedRequest {
            path: segments.iter().map(ToString::to_string).collect(),
            body: body.clone(),
        });

        let scripted = self.script.borrow_mut().pop_front();
        match scripted {
            Some(Scripted::Fail(err)) => return Err(err),
            Some(Scripted::Respond(value)) => return Ok(value),
            None => {}
        }

        match segments {
            [_, "_update", id] => self.update(id, body),
            [_, "_search"] => Ok(self.search(body)),
            [_, "_analyze"] => {
                let text = body.get("text").and_then(Value::as_str).unwrap_or_default();
                let tokens: Vec<Value> = SimpleAnalyzer
                    .tokenize(text)?
                    .into_iter()
                    .map(|t| json!({ "token": t }))
                    .collect();
                Ok(json!({ "tokens": tokens }))
            }
            _ => Err(IndexError::Status {
                status: 404,
                body: format!("no handler for {segments:?}"),
            }),
        }
    }
}

/// Returns the score of `doc` under `query`, or `None` if it does not match.
fn evaluate(query: &Value, doc: &Value) -> Option<f32> {
    let (kind, body) = single_entry(query)?;
    match kind.as_str() {
        "bool" => evaluate_bool(body, doc),
        "term" => {
            let (field, value) = single_entry(body)?;
            (doc.get(field) == Some(value)).then_some(1.0)
        }
        "match_phrase" => {
            let (field, params) = single_entry(body)?;
            let phrase = tokens(params.get("query")?.as_str()?);
            let text = tokens(doc.get(field)?.as_str()?);
            let boost = boost_of(params);
            let found = !phrase.is_empty() && text.windows(phrase.len()).any(|w| w == phrase);
            found.then_some(boost)
        }
        "span_near" => evaluate_span_near(body, doc),
        _ => None,
    }
}

/// Evaluates a `bool` node.
fn evaluate_bool(body: &Value, doc: &Value) -> Option<f32> {
    let clauses = |key: &str| -> Vec<Value> {
        body.get(key)
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default()
    };
    let must = clauses("must");
    let should = clauses("should");
    let filter = clauses("filter");

    let mut score = 0.0;
    for q in &must {
        score += evaluate(q, doc)?;
    }
    for q in &filter {
        evaluate(q, doc)?;
    }

    let should_scores: Vec<f32> = should.iter().filter_map(|q| evaluate(q, doc)).collect();
    if must.is_empty() && filter.is_empty() && !should.is_empty() && should_scores.is_empty() {
        return None;
    }
    Some(score + should_scores.iter().sum::<f32>())
}

/// Evaluates a `span_near` node of fuzzy `span_multi` terms.
fn evaluate_span_near(body: &Value, doc: &Value) -> Option<f32> {
    let slop = body.get("slop")?.as_u64()? as usize;
    let in_order = body.get("in_order")?.as_bool()?;
    let mut candidates = Vec::new();

    for clause in body.get("clauses")?.as_array()? {
        let fuzzy = clause.get("span_multi")?.get("match")?.get("fuzzy")?;
        let (field, params) = single_entry(fuzzy)?;
        let text = tokens(doc.get(field.as_str())?.as_str()?);

        let value = params.get("value")?.as_str()?;
        let max_edits = match params.get("fuzziness")? {
            Value::String(s) if s == "AUTO" => auto_edits(value),
            other => other.as_u64()? as usize,
        };
        let positions: Vec<usize> = text
            .iter()
            .enumerate()
            .filter(|(_, t)| levenshtein(t, value) <= max_edits)
            .map(|(i, _)| i)
            .collect();
        candidates.push(positions);
    }
    if candidates.is_empty() {
        return None;
    }

    let mut chosen = Vec::new();
    assign(&candidates, &mut chosen, in_order, slop).then(|| boost_of(body))
}

/// Tries every choice of one position per clause.
fn assign(candidates: &[Vec<usize>], chosen: &mut Vec<usize>, in_order: bool, slop: usize) -> bool {
    if chosen.len() == candidates.len() {
        let (Some(min), Some(max)) = (chosen.iter().min(), chosen.iter().max()) else {
            return false;
        };
        return max - min + 1 - chosen.len() <= slop;
    }
    for &pos in &candidates[chosen.len()] {
        if chosen.contains(&pos) || (in_order && chosen.last().is_some_and(|&p| pos <= p)) {
            continue;
        }
        chosen.push(pos);
        if assign(candidates, chosen, in_order, slop) {
            return true;
        }
        chosen.pop();
    }
    false
}

/// Edit distance the service allows for `AUTO` fuzziness.
fn auto_edits(term: &str) -> usize {
    match term.chars().count() {
        0..=2 => 0,
        3..=5 => 1,
        _ => 2,
    }
}

/// Plain Levenshtein distance.
fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.chars().enumerate() {
        let mut row = vec![i + 1; b.len() + 1];
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != *cb);
            row[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(row[j] + 1);
        }
        prev = row;
    }
    prev[b.len()]
}

/// Analyzes text the same way the fake's `_analyze` does.
fn tokens(text: &str) -> Vec<String> {
    SimpleAnalyzer.tokenize(text).unwrap_or_default()
}

/// Reads a `boost` parameter, defaulting to 1.
fn boost_of(params: &Value) -> f32 {
    params.get("boost").and_then(Value::as_f64).unwrap_or(1.0) as f32
}

/// Returns the only key/value pair of a JSON object.
fn single_entry(value: &Value) -> Option<(&String, &Value)> {
    let map: &Map<String, Value> = value.as_object()?;
    if map.len() != 1 {
        return None;
    }
    map.iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levenshtein_distances() {
        assert_eq!(levenshtein("cold", "kold"), 1);
        assert_eq!(levenshtein("go", "go"), 0);
        assert_eq!(levenshtein("turkey", "turkye"), 2);
    }

    #[test]
    fn span_near_respects_order_and_slop() {
        let doc = json!({ "text": "go cold turkey" });
        let span = |values: &[&str], in_order: bool, slop: u64| {
            let clauses: Vec<Value> = values
                .iter()
                .map(|v| {
                    json!({ "span_multi": { "match": { "fuzzy": {
                        "text": { "value": v, "fuzziness": 0 }
                    } } } })
                })
                .collect();
            json!({ "span_near": {
                "clauses": clauses, "slop": slop, "in_order": in_order, "boost": 2.0
            } })
        };
        assert_eq!(evaluate(&span(&["go", "turkey"], true, 1), &doc), Some(2.0));
        assert_eq!(evaluate(&span(&["go", "turkey"], true, 0), &doc), None);
        assert_eq!(evaluate(&span(&["turkey", "go"], true, 5), &doc), None);
        assert_eq!(evaluate(&span(&["turkey", "go"], false, 5), &doc), Some(2.0));
    }
}
