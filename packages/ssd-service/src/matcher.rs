use std::sync::Arc;

use ssd_domain::{Product, SearchQuery, lexical::LexicalCatalog, normalize, relevance};
use ssd_storage::CatalogStore;

use crate::Result;

/// Resolves listing titles to catalog products through a searchable store.
#[derive(Clone)]
pub struct Matcher {
	store: Arc<dyn CatalogStore>,
}
impl Matcher {
	pub fn new(store: Arc<dyn CatalogStore>) -> Self {
		Self { store }
	}

	pub fn store(&self) -> &dyn CatalogStore {
		self.store.as_ref()
	}

	/// Normalizes the title, retrieves hits and keeps those that pass the sanity check, in
	/// retrieval order.
	pub async fn candidates(&self, title: &str) -> Result<Vec<Product>> {
		let query = SearchQuery::parse(&normalize::normalize_title(title));
		let hits = self.store.search(&query).await?;
		let retrieved = hits.len();
		let kept = relevance::filter(&query.text, hits);

		tracing::debug!(
			title,
			query = %query.text,
			capacity = ?query.capacity,
			length = ?query.length,
			retrieved,
			kept = kept.len(),
			backend = self.store.backend(),
			"Filtered catalog candidates."
		);

		Ok(kept)
	}

	pub async fn best_match(&self, title: &str) -> Result<Option<Product>> {
		let candidates = self.candidates(title).await?;

		Ok(relevance::select_best(&candidates).cloned())
	}
}

/// TF-IDF matching over a catalog loaded wholesale, for runs without a full-text index.
pub struct LexicalMatcher {
	catalog: LexicalCatalog,
}
impl LexicalMatcher {
	pub fn new(products: Vec<Product>) -> Self {
		Self { catalog: LexicalCatalog::new(products) }
	}

	pub fn len(&self) -> usize {
		self.catalog.products().len()
	}

	pub fn is_empty(&self) -> bool {
		self.catalog.products().is_empty()
	}

	pub fn best_match(&self, title: &str) -> Option<&Product> {
		self.catalog.best_match(&normalize::normalize_title(title))
	}
}
