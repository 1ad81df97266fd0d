//! In-process catalog for tests and index-less runs.

use std::{
	collections::BTreeMap,
	future,
	sync::{Mutex, MutexGuard},
};

use crate::{BoxFuture, CatalogStore, Result};
use ssd_domain::{Product, ProductSummary, SearchQuery, lexical::{self, LexicalCatalog}};

/// Products keyed by id, iterated in id order. Search mirrors the index: capacity and length
/// hints must equal a token of the matching field and hits are ranked by TF-IDF score.
#[derive(Default)]
pub struct MemoryStore {
	products: Mutex<BTreeMap<String, Product>>,
}
impl MemoryStore {
	pub fn new(products: impl IntoIterator<Item = Product>) -> Self {
		let products = products
			.into_iter()
			.map(|product| (product.id.trim().to_string(), product))
			.collect();

		Self { products: Mutex::new(products) }
	}

	pub fn len(&self) -> usize {
		self.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.lock().is_empty()
	}

	pub fn get(&self, id: &str) -> Option<Product> {
		self.lock().get(id).cloned()
	}

	pub fn products(&self) -> Vec<Product> {
		self.lock().values().cloned().collect()
	}

	pub fn upsert(&self, product: Product) -> Result<()> {
		let id = crate::require_id(&product)?.to_string();

		self.lock().insert(id, product);

		Ok(())
	}

	pub fn replace(&self, product: Product) -> Result<bool> {
		let id = crate::require_id(&product)?;
		let mut products = self.lock();
		let Some(existing) = products.get_mut(id) else {
			return Ok(false);
		};

		*existing = product;

		Ok(true)
	}

	/// Scores against the whole catalog, then drops hits that fail a structured hint. A catalog
	/// holding a single product never scores above zero.
	pub fn search_products(&self, query: &SearchQuery) -> Vec<Product> {
		let catalog = LexicalCatalog::new(self.products());

		catalog
			.ranked(&query.text)
			.into_iter()
			.filter(|(product, _)| matches_hints(query, product))
			.map(|(product, _)| product.clone())
			.collect()
	}

	pub fn search_summaries(&self, text: &str) -> Vec<ProductSummary> {
		let catalog = LexicalCatalog::new(self.products());

		catalog.ranked(text).into_iter().map(|(product, _)| product.summary()).collect()
	}

	fn lock(&self) -> MutexGuard<'_, BTreeMap<String, Product>> {
		self.products.lock().unwrap_or_else(|err| err.into_inner())
	}
}

impl CatalogStore for MemoryStore {
	fn backend(&self) -> &'static str {
		"memory"
	}

	fn find_by_id<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<Option<Product>>> {
		Box::pin(future::ready(Ok(self.get(id))))
	}

	fn insert<'a>(&'a self, product: &'a Product) -> BoxFuture<'a, Result<()>> {
		Box::pin(future::ready(self.upsert(product.clone())))
	}

	fn update<'a>(&'a self, product: &'a Product) -> BoxFuture<'a, Result<bool>> {
		Box::pin(future::ready(self.replace(product.clone())))
	}

	fn search<'a>(&'a self, query: &'a SearchQuery) -> BoxFuture<'a, Result<Vec<Product>>> {
		Box::pin(future::ready(Ok(self.search_products(query))))
	}

	fn search_summary<'a>(
		&'a self,
		text: &'a str,
	) -> BoxFuture<'a, Result<Vec<ProductSummary>>> {
		Box::pin(future::ready(Ok(self.search_summaries(text))))
	}
}

fn matches_hints(query: &SearchQuery, product: &Product) -> bool {
	if let Some(capacity) = query.capacity
		&& !has_token(&product.capacity, &capacity.to_string())
	{
		return false;
	}
	if let Some(length) = query.length
		&& !has_token(&product.form_factor, &length.to_string())
	{
		return false;
	}

	true
}

fn has_token(field: &str, expected: &str) -> bool {
	lexical::tokenize(field).iter().any(|token| token == expected)
}
