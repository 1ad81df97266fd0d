pub mod query;

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{BoxFuture, CatalogStore, Error, Result};
use ssd_domain::{Product, ProductSummary, SearchQuery};

/// Search envelope returned by the index; only hit sources are decoded.
#[derive(Debug, Deserialize)]
pub struct SearchResponse<T> {
	pub hits: Hits<T>,
}
impl<T> SearchResponse<T> {
	pub fn into_sources(self) -> Vec<T> {
		self.hits.hits.into_iter().map(|hit| hit.source).collect()
	}
}

#[derive(Debug, Deserialize)]
pub struct Hits<T> {
	#[serde(default = "Vec::new")]
	pub hits: Vec<Hit<T>>,
}

#[derive(Debug, Deserialize)]
pub struct Hit<T> {
	#[serde(rename = "_id", default)]
	pub id: Option<String>,
	#[serde(rename = "_score", default)]
	pub score: Option<f64>,
	#[serde(rename = "_source")]
	pub source: T,
}

/// Elasticsearch-compatible document index.
pub struct EsIndex {
	client: Client,
	base_url: Url,
	index: String,
}
impl EsIndex {
	pub fn new(cfg: &ssd_config::Index) -> Result<Self> {
		let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
		let base_url = Url::parse(&cfg.url)
			.map_err(|err| Error::InvalidArgument(format!("Invalid index url: {err}.")))?;

		Ok(Self { client, base_url, index: cfg.index.clone() })
	}

	pub fn index(&self) -> &str {
		&self.index
	}

	/// Fails unless the cluster root answers with a success status.
	pub async fn ping(&self) -> Result<()> {
		let res = self.client.get(self.base_url.clone()).send().await?;

		crate::ensure_success(res).await?;

		Ok(())
	}

	pub async fn search_hits<T>(&self, body: &Value) -> Result<Vec<T>>
	where
		T: DeserializeOwned,
	{
		let url = self.url(&[self.index.as_str(), "_search"])?;
		let res = self.client.post(url).json(body).send().await?;
		let res = crate::ensure_success(res).await?;
		let bytes = res.bytes().await?;
		let decoded: SearchResponse<T> = serde_json::from_slice(&bytes)?;

		Ok(decoded.into_sources())
	}

	pub async fn find_by_id(&self, id: &str) -> Result<Option<Product>> {
		let hits = self.search_hits::<Product>(&query::find_by_id_body(id)).await?;

		Ok(hits.into_iter().next())
	}

	pub async fn insert(&self, product: &Product) -> Result<()> {
		let id = crate::require_id(product)?;
		let mut url = self.url(&[self.index.as_str(), "_doc", id])?;

		url.query_pairs_mut().append_pair("refresh", "true");

		let res = self.client.put(url).json(product).send().await?;

		if let Err(err) = crate::ensure_success(res).await {
			tracing::error!(error = %err, id, index = %self.index, "Failed to index document.");

			return Err(err);
		}

		Ok(())
	}

	pub async fn update(&self, product: &Product) -> Result<bool> {
		let id = crate::require_id(product)?;
		let url = self.url(&[self.index.as_str(), "_doc", id])?;
		let res = self.client.head(url).send().await?;

		if res.status() == StatusCode::NOT_FOUND {
			return Ok(false);
		}

		crate::ensure_success(res).await?;
		self.insert(product).await?;

		Ok(true)
	}

	pub async fn search(&self, query: &SearchQuery) -> Result<Vec<Product>> {
		self.search_hits(&query::search_body(query)).await
	}

	pub async fn search_summary(&self, text: &str) -> Result<Vec<ProductSummary>> {
		self.search_hits(&query::summary_body(text)).await
	}

	fn url(&self, segments: &[&str]) -> Result<Url> {
		let mut url = self.base_url.clone();

		url.path_segments_mut()
			.map_err(|_| Error::InvalidArgument("Index url cannot be a base.".to_string()))?
			.pop_if_empty()
			.extend(segments);

		Ok(url)
	}
}

impl CatalogStore for EsIndex {
	fn backend(&self) -> &'static str {
		"elasticsearch"
	}

	fn find_by_id<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<Option<Product>>> {
		Box::pin(EsIndex::find_by_id(self, id))
	}

	fn insert<'a>(&'a self, product: &'a Product) -> BoxFuture<'a, Result<()>> {
		Box::pin(EsIndex::insert(self, product))
	}

	fn update<'a>(&'a self, product: &'a Product) -> BoxFuture<'a, Result<bool>> {
		Box::pin(EsIndex::update(self, product))
	}

	fn search<'a>(&'a self, query: &'a SearchQuery) -> BoxFuture<'a, Result<Vec<Product>>> {
		Box::pin(EsIndex::search(self, query))
	}

	fn search_summary<'a>(
		&'a self,
		text: &'a str,
	) -> BoxFuture<'a, Result<Vec<ProductSummary>>> {
		Box::pin(EsIndex::search_summary(self, text))
	}
}
