//! OAuth client for the Reddit API.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, header::HeaderValue};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;
use time::OffsetDateTime;
use tokio::sync::Mutex;

use crate::{BoxFuture, Error, PostingClient, Result, RetryPolicy};

const SUBMISSION_PREFIX: &str = "t3_";

/// Bearer token and its absolute expiry in unix milliseconds. An empty token is always stale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Token {
	pub access_token: String,
	pub expires_at_ms: i64,
}
impl Token {
	pub fn remaining_minutes(&self, now_ms: i64) -> i64 {
		(self.expires_at_ms - now_ms) / 60_000
	}

	pub fn needs_refresh(&self, now_ms: i64, threshold_minutes: i64) -> bool {
		self.access_token.is_empty()
			|| self.expires_at_ms - now_ms <= threshold_minutes.saturating_mul(60_000)
	}
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
	access_token: String,
	#[serde(default)]
	expires_in: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Listing<T> {
	pub data: ListingData<T>,
}
impl<T> Listing<T> {
	pub fn into_items(self) -> Vec<T> {
		self.data.children.into_iter().map(|child| child.data).collect()
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListingData<T> {
	#[serde(default = "Vec::new")]
	pub children: Vec<Thing<T>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Thing<T> {
	pub data: T,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Submission {
	pub id: String,
	pub name: String,
	pub subreddit: String,
	pub title: String,
	pub link_flair_text: Option<String>,
}
impl Submission {
	pub fn flair(&self) -> &str {
		self.link_flair_text.as_deref().unwrap_or_default()
	}
}

/// A comment from the account's own history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UserComment {
	pub id: String,
	pub link_id: String,
	pub subreddit: String,
	pub body: String,
}
impl UserComment {
	/// Id of the submission the comment was left on.
	pub fn submission_id(&self) -> &str {
		self.link_id.strip_prefix(SUBMISSION_PREFIX).unwrap_or(self.link_id.as_str())
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ThreadComment {
	pub id: String,
	pub author: String,
	pub parent_id: String,
	pub body: String,
}

pub struct RedditClient {
	client: Client,
	cfg: ssd_config::Reddit,
	retry: RetryPolicy,
	token: Mutex<Token>,
}
impl RedditClient {
	pub fn new(cfg: &ssd_config::Reddit) -> Result<Self> {
		let user_agent = HeaderValue::from_str(&cfg.user_agent)?;
		let client = Client::builder()
			.timeout(Duration::from_millis(cfg.timeout_ms))
			.user_agent(user_agent)
			.build()?;
		let retry = RetryPolicy::from_config(cfg)?;
		let token = Token {
			access_token: cfg.access_token.clone().unwrap_or_default(),
			expires_at_ms: cfg.token_expires_at_ms.unwrap_or_default(),
		};

		Ok(Self { client, cfg: cfg.clone(), retry, token: Mutex::new(token) })
	}

	pub fn username(&self) -> &str {
		&self.cfg.username
	}

	pub async fn token(&self) -> Token {
		self.token.lock().await.clone()
	}

	/// Returns a bearer token, refreshing it first when its validity has dropped to the
	/// configured threshold. Concurrent callers wait on the same refresh.
	pub async fn access_token(&self) -> Result<String> {
		let mut token = self.token.lock().await;
		let now_ms = now_ms();

		if !token.needs_refresh(now_ms, self.cfg.refresh_threshold_minutes) {
			tracing::debug!(
				remaining_minutes = token.remaining_minutes(now_ms),
				"Access token is still valid."
			);

			return Ok(token.access_token.clone());
		}

		let fresh = self.retry.run("token refresh", || self.request_token()).await?;

		*token = Token {
			access_token: fresh.access_token,
			expires_at_ms: now_ms.saturating_add(fresh.expires_in.saturating_mul(1_000)),
		};

		tracing::info!(expires_at_ms = token.expires_at_ms, "Refreshed access token.");

		Ok(token.access_token.clone())
	}

	pub async fn new_submissions(&self, subreddit: &str, limit: u32) -> Result<Vec<Submission>> {
		let path = format!("/r/{subreddit}/new");
		let listing: Listing<Submission> =
			self.get_json(&path, &[("limit", limit.to_string())]).await?;

		Ok(listing.into_items())
	}

	pub async fn user_newest_comments(&self, limit: u32) -> Result<Vec<UserComment>> {
		let path = format!("/user/{}/comments", self.cfg.username);
		let listing: Listing<UserComment> =
			self.get_json(&path, &[("limit", limit.to_string())]).await?;

		Ok(listing.into_items())
	}

	pub async fn submission_comments(
		&self,
		submission_id: &str,
		limit: u32,
	) -> Result<Vec<ThreadComment>> {
		let path = format!("/comments/{submission_id}");
		let query = [("limit", limit.to_string()), ("depth", "1".to_string())];
		// The first listing is the submission itself.
		let listings: Vec<Listing<ThreadComment>> = self.get_json(&path, &query).await?;
		let Some(comments) = listings.into_iter().nth(1) else {
			return Err(Error::InvalidResponse {
				message: format!("Thread {submission_id} response has no comment listing."),
			});
		};

		Ok(comments.into_items())
	}

	pub async fn submit_comment(&self, submission_id: &str, text: &str) -> Result<()> {
		let thing_id = format!("{SUBMISSION_PREFIX}{submission_id}");
		let form = [("api_type", "json"), ("text", text), ("thing_id", thing_id.as_str())];
		let req = self.authorized(self.client.post(self.api_url("/api/comment"))).await?;
		let body: Value = send_json(req.form(&form), "/api/comment").await?;

		if let Some(errors) = body.pointer("/json/errors").and_then(Value::as_array)
			&& !errors.is_empty()
		{
			return Err(Error::InvalidResponse {
				message: format!("Comment on {submission_id} was rejected: {errors:?}."),
			});
		}

		Ok(())
	}

	async fn request_token(&self) -> Result<TokenResponse> {
		let endpoint = format!("{}/api/v1/access_token", self.cfg.auth_base);
		let form = [
			("grant_type", "password"),
			("username", self.cfg.username.as_str()),
			("password", self.cfg.password.as_str()),
		];
		let req = self
			.client
			.post(&endpoint)
			.basic_auth(&self.cfg.client_id, Some(&self.cfg.client_secret))
			.form(&form);

		send_json(req, &endpoint).await
	}

	async fn get_json<T>(&self, path: &str, query: &[(&str, String)]) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let req = self.authorized(self.client.get(self.api_url(path)).query(query)).await?;

		send_json(req, path).await
	}

	async fn authorized(&self, req: RequestBuilder) -> Result<RequestBuilder> {
		let token = self.access_token().await?;

		Ok(req.bearer_auth(token))
	}

	fn api_url(&self, path: &str) -> String {
		format!("{}{path}", self.cfg.api_base)
	}
}

impl PostingClient for RedditClient {
	fn new_submissions<'a>(
		&'a self,
		subreddit: &'a str,
		limit: u32,
	) -> BoxFuture<'a, Result<Vec<Submission>>> {
		Box::pin(RedditClient::new_submissions(self, subreddit, limit))
	}

	fn user_newest_comments<'a>(&'a self, limit: u32) -> BoxFuture<'a, Result<Vec<UserComment>>> {
		Box::pin(RedditClient::user_newest_comments(self, limit))
	}

	fn submission_comments<'a>(
		&'a self,
		submission_id: &'a str,
		limit: u32,
	) -> BoxFuture<'a, Result<Vec<ThreadComment>>> {
		Box::pin(RedditClient::submission_comments(self, submission_id, limit))
	}

	fn submit_comment<'a>(
		&'a self,
		submission_id: &'a str,
		text: &'a str,
	) -> BoxFuture<'a, Result<()>> {
		Box::pin(RedditClient::submit_comment(self, submission_id, text))
	}
}

async fn send_json<T>(req: RequestBuilder, endpoint: &str) -> Result<T>
where
	T: DeserializeOwned,
{
	let res = req.send().await?;
	let status = res.status();

	if !status.is_success() {
		let body = res.text().await.unwrap_or_default();

		return Err(Error::Status { endpoint: endpoint.to_string(), status: status.as_u16(), body });
	}

	let bytes = res.bytes().await?;

	Ok(serde_json::from_slice(&bytes)?)
}

fn now_ms() -> i64 {
	(OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}
