//! Post-retrieval sanity check and tie-break.
//!
//! A positive match ends in a public comment, so a candidate survives only when both its
//! manufacturer and its complete display name appear in the query. Comparison ignores case and
//! spaces.

use crate::Product;

/// Display-name annotations that never appear in listing titles, in squashed form.
pub const DECORATIVE_SUFFIXES: [&str; 1] = ["(w/heatsink)"];

pub fn squash(text: &str) -> String {
	text.to_ascii_lowercase().replace(' ', "")
}

/// Squashed display name with decorative annotations removed.
pub fn matching_name(product: &Product) -> String {
	let mut name = squash(&product.name);

	for suffix in DECORATIVE_SUFFIXES {
		name = name.replace(suffix, "");
	}

	name
}

pub fn passes(query: &str, product: &Product) -> bool {
	let query = squash(query);

	passes_squashed(&query, product)
}

/// Keeps candidates that pass the sanity check, preserving their order.
pub fn filter(query: &str, candidates: Vec<Product>) -> Vec<Product> {
	let query = squash(query);

	candidates.into_iter().filter(|product| passes_squashed(&query, product)).collect()
}

/// Longest matching name wins; equal lengths fall back to the larger numeric catalog id. Ids that
/// are not numeric rank below every numeric id. A full tie keeps the earlier candidate.
pub fn select_best(candidates: &[Product]) -> Option<&Product> {
	let mut best: Option<(&Product, usize, Option<u64>)> = None;

	for product in candidates {
		let key = (matching_name(product).chars().count(), product.numeric_id());
		let better = match best {
			None => true,
			Some((_, len, id)) => key > (len, id),
		};

		if better {
			best = Some((product, key.0, key.1));
		}
	}

	best.map(|(product, _, _)| product)
}

fn passes_squashed(query: &str, product: &Product) -> bool {
	if !query.contains(&squash(&product.manufacturer)) {
		return false;
	}

	let name = matching_name(product);

	if name.is_empty() {
		return false;
	}

	query.contains(&name)
}
