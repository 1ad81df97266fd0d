pub mod index;
pub mod memory;
pub mod source;

mod error;

pub use error::{Error, Result};
pub use index::EsIndex;
pub use memory::MemoryStore;
pub use source::TpuCatalog;

use std::{future::Future, pin::Pin};

use ssd_domain::{Product, ProductSummary, SearchQuery};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Capabilities shared by every catalog backend. Not-found is `Ok(None)` for lookups and
/// `Ok(false)` for updates; errors are reserved for transport and decoding failures.
pub trait CatalogStore
where
	Self: Send + Sync,
{
	/// Short backend label used in logs and `Unsupported` errors.
	fn backend(&self) -> &'static str;

	fn find_by_id<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<Option<Product>>>;

	/// Upsert keyed by id. Writing the same record twice leaves one document.
	fn insert<'a>(&'a self, product: &'a Product) -> BoxFuture<'a, Result<()>>;

	/// Replaces an existing record wholesale. Returns `false` when the id is absent.
	fn update<'a>(&'a self, product: &'a Product) -> BoxFuture<'a, Result<bool>>;

	fn search<'a>(&'a self, query: &'a SearchQuery) -> BoxFuture<'a, Result<Vec<Product>>>;

	fn search_summary<'a>(
		&'a self,
		text: &'a str,
	) -> BoxFuture<'a, Result<Vec<ProductSummary>>>;
}

pub(crate) async fn ensure_success(res: reqwest::Response) -> Result<reqwest::Response> {
	let status = res.status();

	if status.is_success() {
		return Ok(res);
	}

	let body = res.text().await.unwrap_or_default();

	Err(Error::Status { status: status.as_u16(), body })
}

pub(crate) fn require_id(product: &Product) -> Result<&str> {
	let id = product.id.trim();

	if id.is_empty() {
		return Err(Error::InvalidArgument("Product id must be non-empty.".to_string()));
	}

	Ok(id)
}
