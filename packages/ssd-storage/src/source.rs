//! Read-only client for the TechPowerUp SSD database API.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};

use crate::{BoxFuture, CatalogStore, Error, Result};
use ssd_domain::{Product, ProductSummary, SearchQuery};

const BACKEND: &str = "techpowerup";
const STATUS_SUCCESS: &str = "success";
const STATUS_FAILED: &str = "failed";
const MESSAGE_NOT_FOUND: &str = "Drive not found";

#[derive(Debug, Deserialize)]
struct Envelope<T> {
	#[serde(default)]
	status: String,
	#[serde(default)]
	message: String,
	result: Option<T>,
}
impl<T> Envelope<T> {
	fn is_not_found(&self) -> bool {
		self.status == STATUS_FAILED && self.message == MESSAGE_NOT_FOUND
	}
}

pub struct TpuCatalog {
	client: Client,
	host: String,
	username: String,
	api_key: String,
}
impl TpuCatalog {
	pub fn new(cfg: &ssd_config::Source) -> Result<Self> {
		let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;

		Ok(Self {
			client,
			host: cfg.host.clone(),
			username: cfg.username.clone(),
			api_key: cfg.api_key.clone(),
		})
	}

	pub async fn find_by_id(&self, id: &str) -> Result<Option<Product>> {
		let envelope = self.call::<Product>("query", id).await?;

		if envelope.is_not_found() {
			return Ok(None);
		}
		if envelope.status != STATUS_SUCCESS {
			return Err(Error::InvalidResponse {
				message: format!("Catalog query for id {id} returned status {:?}.", envelope.status),
			});
		}

		let Some(product) = envelope.result else {
			return Err(Error::InvalidResponse {
				message: format!("Catalog query for id {id} returned no result."),
			});
		};

		Ok(Some(product))
	}

	/// Free-text lookup. A not-found answer is an empty list.
	pub async fn search_summary(&self, text: &str) -> Result<Vec<ProductSummary>> {
		let envelope = self.call::<Vec<ProductSummary>>("lookup", text).await?;

		if envelope.is_not_found() {
			return Ok(Vec::new());
		}
		if envelope.status != STATUS_SUCCESS {
			return Err(Error::InvalidResponse {
				message: format!("Catalog lookup returned status {:?}.", envelope.status),
			});
		}

		Ok(envelope.result.unwrap_or_default())
	}

	fn endpoint(&self, operation: &str) -> String {
		format!("{}/ssd-specs/api/{}/v1/{operation}", self.host, self.username)
	}

	async fn call<T>(&self, operation: &str, id: &str) -> Result<Envelope<T>>
	where
		T: DeserializeOwned,
	{
		let res = self
			.client
			.get(self.endpoint(operation))
			.query(&[("key", self.api_key.as_str()), ("id", id)])
			.send()
			.await?;
		let status = res.status();
		let body = res.text().await?;

		// Failures arrive inside the envelope; the HTTP status only matters for other bodies.
		match serde_json::from_str::<Envelope<T>>(&body) {
			Ok(envelope) => Ok(envelope),
			Err(_) if !status.is_success() => Err(Error::Status { status: status.as_u16(), body }),
			Err(err) => Err(err.into()),
		}
	}
}

impl CatalogStore for TpuCatalog {
	fn backend(&self) -> &'static str {
		BACKEND
	}

	fn find_by_id<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<Option<Product>>> {
		Box::pin(TpuCatalog::find_by_id(self, id))
	}

	fn insert<'a>(&'a self, _product: &'a Product) -> BoxFuture<'a, Result<()>> {
		Box::pin(async { Err(Error::Unsupported { backend: BACKEND, operation: "insert" }) })
	}

	fn update<'a>(&'a self, _product: &'a Product) -> BoxFuture<'a, Result<bool>> {
		Box::pin(async { Err(Error::Unsupported { backend: BACKEND, operation: "update" }) })
	}

	fn search<'a>(&'a self, _query: &'a SearchQuery) -> BoxFuture<'a, Result<Vec<Product>>> {
		Box::pin(async { Err(Error::Unsupported { backend: BACKEND, operation: "search" }) })
	}

	fn search_summary<'a>(
		&'a self,
		text: &'a str,
	) -> BoxFuture<'a, Result<Vec<ProductSummary>>> {
		Box::pin(TpuCatalog::search_summary(self, text))
	}
}
