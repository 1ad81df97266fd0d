//! Request bodies for the full-text index.

use serde_json::{Value, json};

use ssd_domain::SearchQuery;

/// Bool query whose `must` list always carries the free-text clause, followed by equality
/// filters for each structured hint that was found.
pub fn search_body(query: &SearchQuery) -> Value {
	let mut must = vec![json!({ "multi_match": { "query": query.text } })];

	if let Some(capacity) = query.capacity {
		must.push(json!({ "term": { "capacity": capacity } }));
	}
	if let Some(length) = query.length {
		must.push(json!({ "term": { "formFactor": length } }));
	}

	json!({ "query": { "bool": { "must": must } } })
}

pub fn summary_body(text: &str) -> Value {
	json!({ "query": { "multi_match": { "query": text } } })
}

pub fn find_by_id_body(id: &str) -> Value {
	json!({ "query": { "term": { "driveId": id } } })
}
