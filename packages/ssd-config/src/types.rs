use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub index: Index,
	pub source: Option<Source>,
	pub reddit: Option<Reddit>,
	#[serde(default)]
	pub scan: Scan,
	#[serde(default)]
	pub sync: Sync,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub log_level: String,
}

/// Full-text index that serves candidate retrieval.
#[derive(Debug, Clone, Deserialize)]
pub struct Index {
	pub url: String,
	#[serde(default = "default_index_name")]
	pub index: String,
	#[serde(default = "default_timeout_ms")]
	pub timeout_ms: u64,
}

/// Authoritative catalog that sync runs pull from.
#[derive(Debug, Clone, Deserialize)]
pub struct Source {
	pub host: String,
	pub username: String,
	pub api_key: String,
	#[serde(default = "default_timeout_ms")]
	pub timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Reddit {
	pub client_id: String,
	pub client_secret: String,
	pub username: String,
	pub password: String,
	#[serde(default = "default_user_agent")]
	pub user_agent: String,
	#[serde(default = "default_auth_base")]
	pub auth_base: String,
	#[serde(default = "default_api_base")]
	pub api_base: String,
	#[serde(default = "default_timeout_ms")]
	pub timeout_ms: u64,
	/// Refresh the access token once its remaining validity drops to this many minutes.
	#[serde(default = "default_refresh_threshold_minutes")]
	pub refresh_threshold_minutes: i64,
	#[serde(default = "default_retry_attempts")]
	pub retry_attempts: u32,
	/// First retry delay; doubled after every failed attempt.
	#[serde(default = "default_retry_base_delay_ms")]
	pub retry_base_delay_ms: u64,
	/// Optional. Seeds the token cache so a restart does not force a refresh.
	pub access_token: Option<String>,
	pub token_expires_at_ms: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Scan {
	pub subreddit: String,
	pub flair: String,
	pub submission_limit: u32,
	pub comment_limit: u32,
	pub thread_comment_limit: u32,
	pub interval_secs: u64,
	pub comment_delay_ms: u64,
	/// Annotate submissions even when `other_bot` has already commented on them.
	pub override_existing: bool,
	pub other_bot: String,
}
impl Default for Scan {
	fn default() -> Self {
		Self {
			subreddit: "buildapcsales".to_string(),
			flair: "SSD".to_string(),
			submission_limit: 25,
			comment_limit: 25,
			thread_comment_limit: 100,
			interval_secs: 900,
			comment_delay_ms: 1_000,
			override_existing: false,
			other_bot: "SSDBot".to_string(),
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Sync {
	pub start_id: u64,
	pub end_id: u64,
	pub skip_ids: Vec<u64>,
	pub delay_ms: u64,
}
impl Default for Sync {
	fn default() -> Self {
		Self { start_id: 1, end_id: 1_550, skip_ids: Vec::new(), delay_ms: 10 }
	}
}

fn default_index_name() -> String {
	"ssd-index".to_string()
}

fn default_timeout_ms() -> u64 {
	10_000
}

fn default_user_agent() -> String {
	"ssd-bot/0.1 (catalog annotations)".to_string()
}

fn default_auth_base() -> String {
	"https://www.reddit.com".to_string()
}

fn default_api_base() -> String {
	"https://oauth.reddit.com".to_string()
}

fn default_refresh_threshold_minutes() -> i64 {
	30
}

fn default_retry_attempts() -> u32 {
	5
}

fn default_retry_base_delay_ms() -> u64 {
	60_000
}
