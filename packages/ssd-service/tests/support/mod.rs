#![allow(dead_code)]

use std::{
	collections::{HashMap, HashSet},
	sync::Mutex,
};

use ssd_domain::{Product, ProductSummary, SearchQuery};
use ssd_providers::{BoxFuture, PostingClient, Submission, ThreadComment, UserComment};
use ssd_storage::CatalogStore;

/// Source catalog that answers from a fixed map, records every lookup, and fails on chosen ids.
#[derive(Default)]
pub struct ScriptedSource {
	pub products: HashMap<String, Product>,
	pub failing: HashSet<String>,
	pub lookups: Mutex<Vec<String>>,
}
impl ScriptedSource {
	pub fn with_ids(ids: impl IntoIterator<Item = u64>) -> Self {
		let products = ids
			.into_iter()
			.map(|id| {
				let product = Product {
					id: id.to_string(),
					manufacturer: "Crucial".to_string(),
					name: format!("P{id}"),
					..Product::default()
				};

				(id.to_string(), product)
			})
			.collect();

		Self { products, ..Self::default() }
	}

	pub fn failing_on(mut self, id: u64) -> Self {
		self.failing.insert(id.to_string());

		self
	}

	pub fn lookups(&self) -> Vec<String> {
		self.lookups.lock().expect("lock poisoned").clone()
	}
}
impl CatalogStore for ScriptedSource {
	fn backend(&self) -> &'static str {
		"scripted"
	}

	fn find_by_id<'a>(
		&'a self,
		id: &'a str,
	) -> BoxFuture<'a, ssd_storage::Result<Option<Product>>> {
		self.lookups.lock().expect("lock poisoned").push(id.to_string());

		let result = if self.failing.contains(id) {
			Err(ssd_storage::Error::Status { status: 503, body: "unavailable".to_string() })
		} else {
			Ok(self.products.get(id).cloned())
		};

		Box::pin(async move { result })
	}

	fn insert<'a>(&'a self, _product: &'a Product) -> BoxFuture<'a, ssd_storage::Result<()>> {
		Box::pin(async {
			Err(ssd_storage::Error::Unsupported { backend: "scripted", operation: "insert" })
		})
	}

	fn update<'a>(&'a self, _product: &'a Product) -> BoxFuture<'a, ssd_storage::Result<bool>> {
		Box::pin(async { Ok(false) })
	}

	fn search<'a>(
		&'a self,
		_query: &'a SearchQuery,
	) -> BoxFuture<'a, ssd_storage::Result<Vec<Product>>> {
		Box::pin(async {
			Err(ssd_storage::Error::Status { status: 500, body: "search down".to_string() })
		})
	}

	fn search_summary<'a>(
		&'a self,
		_text: &'a str,
	) -> BoxFuture<'a, ssd_storage::Result<Vec<ProductSummary>>> {
		Box::pin(async { Ok(Vec::new()) })
	}
}

/// Destination wrapper that rejects writes for chosen ids and forwards the rest.
pub struct FlakyDestination {
	pub inner: ssd_storage::MemoryStore,
	pub rejected: HashSet<String>,
}
impl CatalogStore for FlakyDestination {
	fn backend(&self) -> &'static str {
		"flaky"
	}

	fn find_by_id<'a>(
		&'a self,
		id: &'a str,
	) -> BoxFuture<'a, ssd_storage::Result<Option<Product>>> {
		self.inner.find_by_id(id)
	}

	fn insert<'a>(&'a self, product: &'a Product) -> BoxFuture<'a, ssd_storage::Result<()>> {
		if self.rejected.contains(&product.id) {
			return Box::pin(async {
				Err(ssd_storage::Error::Status { status: 429, body: "slow down".to_string() })
			});
		}

		self.inner.insert(product)
	}

	fn update<'a>(&'a self, product: &'a Product) -> BoxFuture<'a, ssd_storage::Result<bool>> {
		self.inner.update(product)
	}

	fn search<'a>(
		&'a self,
		query: &'a SearchQuery,
	) -> BoxFuture<'a, ssd_storage::Result<Vec<Product>>> {
		self.inner.search(query)
	}

	fn search_summary<'a>(
		&'a self,
		text: &'a str,
	) -> BoxFuture<'a, ssd_storage::Result<Vec<ProductSummary>>> {
		self.inner.search_summary(text)
	}
}

#[derive(Default)]
pub struct FakePosting {
	pub submissions: Vec<Submission>,
	pub own_comments: Vec<UserComment>,
	pub threads: HashMap<String, Vec<ThreadComment>>,
	pub broken_threads: HashSet<String>,
	pub rejected_posts: HashSet<String>,
	pub posted: Mutex<Vec<(String, String)>>,
}
impl FakePosting {
	pub fn posted_ids(&self) -> Vec<String> {
		self.posted.lock().expect("lock poisoned").iter().map(|(id, _)| id.clone()).collect()
	}
}
impl PostingClient for FakePosting {
	fn new_submissions<'a>(
		&'a self,
		_subreddit: &'a str,
		limit: u32,
	) -> BoxFuture<'a, ssd_providers::Result<Vec<Submission>>> {
		let submissions = self.submissions.iter().take(limit as usize).cloned().collect();

		Box::pin(async move { Ok(submissions) })
	}

	fn user_newest_comments<'a>(
		&'a self,
		limit: u32,
	) -> BoxFuture<'a, ssd_providers::Result<Vec<UserComment>>> {
		let comments = self.own_comments.iter().take(limit as usize).cloned().collect();

		Box::pin(async move { Ok(comments) })
	}

	fn submission_comments<'a>(
		&'a self,
		submission_id: &'a str,
		_limit: u32,
	) -> BoxFuture<'a, ssd_providers::Result<Vec<ThreadComment>>> {
		let result = if self.broken_threads.contains(submission_id) {
			Err(ssd_providers::Error::Status {
				endpoint: format!("/comments/{submission_id}"),
				status: 500,
				body: String::new(),
			})
		} else {
			Ok(self.threads.get(submission_id).cloned().unwrap_or_default())
		};

		Box::pin(async move { result })
	}

	fn submit_comment<'a>(
		&'a self,
		submission_id: &'a str,
		text: &'a str,
	) -> BoxFuture<'a, ssd_providers::Result<()>> {
		if self.rejected_posts.contains(submission_id) {
			return Box::pin(async {
				Err(ssd_providers::Error::InvalidResponse { message: "THREAD_LOCKED".to_string() })
			});
		}

		self.posted
			.lock()
			.expect("lock poisoned")
			.push((submission_id.to_string(), text.to_string()));

		Box::pin(async { Ok(()) })
	}
}

pub fn submission(id: &str, title: &str, flair: &str) -> Submission {
	Submission {
		id: id.to_string(),
		name: format!("t3_{id}"),
		subreddit: "buildapcsales".to_string(),
		title: title.to_string(),
		link_flair_text: Some(flair.to_string()),
	}
}

pub fn thread_comment(author: &str) -> ThreadComment {
	ThreadComment { author: author.to_string(), ..ThreadComment::default() }
}

pub fn own_comment(submission_id: &str) -> UserComment {
	UserComment { link_id: format!("t3_{submission_id}"), ..UserComment::default() }
}
