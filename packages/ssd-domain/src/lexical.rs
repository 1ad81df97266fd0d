//! TF-IDF ranking over a closed, in-memory catalog.
//!
//! Used when candidates are ranked locally instead of by the external index. Scores are
//! recomputed on every query; the corpus is small and rebuilt once per scan cycle.

use std::collections::HashMap;

use crate::Product;

pub struct LexicalScorer {
	documents: Vec<String>,
	term_frequencies: Vec<HashMap<String, usize>>,
}
impl LexicalScorer {
	pub fn new(documents: Vec<String>) -> Self {
		let term_frequencies = documents
			.iter()
			.map(|doc| {
				let mut counts = HashMap::new();

				for term in doc.split_whitespace() {
					*counts.entry(term.to_string()).or_insert(0) += 1;
				}

				counts
			})
			.collect();

		Self { documents, term_frequencies }
	}

	pub fn documents(&self) -> &[String] {
		&self.documents
	}

	/// Log-normalized term frequency: `1 + ln(count)`, or zero when the term is absent.
	pub fn tf(&self, term: &str, doc_index: usize) -> f64 {
		let count = self
			.term_frequencies
			.get(doc_index)
			.and_then(|counts| counts.get(term))
			.copied()
			.unwrap_or(0);

		if count == 0 {
			return 0.0;
		}

		1.0 + (count as f64).ln()
	}

	/// `ln(N / df)`, where df counts documents containing the term as a substring rather than as
	/// a whole token. A term no document contains scores zero.
	pub fn idf(&self, term: &str) -> f64 {
		let df = self.documents.iter().filter(|doc| doc.contains(term)).count();

		if df == 0 {
			return 0.0;
		}

		(self.documents.len() as f64 / df as f64).ln()
	}

	pub fn tf_idf(&self, term: &str, doc_index: usize) -> f64 {
		self.tf(term, doc_index) * self.idf(term)
	}

	pub fn scores(&self, terms: &[String]) -> Vec<f64> {
		(0..self.documents.len())
			.map(|doc_index| terms.iter().map(|term| self.tf_idf(term, doc_index)).sum())
			.collect()
	}

	/// Index and score of the highest-scoring document. Earlier documents win ties; a best score
	/// of zero is no match.
	pub fn best(&self, terms: &[String]) -> Option<(usize, f64)> {
		let mut best: Option<(usize, f64)> = None;

		for (doc_index, score) in self.scores(terms).into_iter().enumerate() {
			if score > best.map(|(_, top)| top).unwrap_or(0.0) {
				best = Some((doc_index, score));
			}
		}

		best
	}
}

/// Catalog entries paired with their TF-IDF documents.
pub struct LexicalCatalog {
	products: Vec<Product>,
	scorer: LexicalScorer,
}
impl LexicalCatalog {
	pub fn new(products: Vec<Product>) -> Self {
		let documents = products.iter().map(document_for).collect();

		Self { products, scorer: LexicalScorer::new(documents) }
	}

	pub fn products(&self) -> &[Product] {
		&self.products
	}

	pub fn scorer(&self) -> &LexicalScorer {
		&self.scorer
	}

	/// Positive-score products ordered by descending score, then catalog order.
	pub fn ranked(&self, query: &str) -> Vec<(&Product, f64)> {
		let terms = tokenize(query);
		let mut ranked: Vec<(&Product, f64)> = self
			.scorer
			.scores(&terms)
			.into_iter()
			.enumerate()
			.filter(|(_, score)| *score > 0.0)
			.map(|(doc_index, score)| (&self.products[doc_index], score))
			.collect();

		ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

		ranked
	}

	/// Top-scoring product, rejected unless the query names both its manufacturer and model.
	pub fn best_match(&self, query: &str) -> Option<&Product> {
		let terms = tokenize(query);
		let (doc_index, _) = self.scorer.best(&terms)?;
		let product = self.products.get(doc_index)?;
		let query = query.to_ascii_lowercase();

		if !query.contains(&product.manufacturer.to_ascii_lowercase())
			|| !query.contains(&product.name.to_ascii_lowercase())
		{
			return None;
		}

		Some(product)
	}
}

/// Manufacturer and model, lowercased, with every non-alphanumeric character turned into a space.
pub fn document_for(product: &Product) -> String {
	alphanumeric_lower(&format!("{} {}", product.manufacturer, product.name))
}

pub fn tokenize(text: &str) -> Vec<String> {
	alphanumeric_lower(text).split_whitespace().map(str::to_string).collect()
}

fn alphanumeric_lower(text: &str) -> String {
	let mut normalized = String::with_capacity(text.len());

	for ch in text.chars() {
		if ch.is_ascii_alphanumeric() {
			normalized.push(ch.to_ascii_lowercase());
		} else {
			normalized.push(' ');
		}
	}

	normalized
}
