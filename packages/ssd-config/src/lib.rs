mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Index, Reddit, Scan, Service, Source, Sync};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.index.url.trim().is_empty() {
		return Err(Error::Validation { message: "index.url must be non-empty.".to_string() });
	}
	if cfg.index.index.trim().is_empty() {
		return Err(Error::Validation { message: "index.index must be non-empty.".to_string() });
	}
	if cfg.index.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "index.timeout_ms must be greater than zero.".to_string(),
		});
	}

	if let Some(source) = cfg.source.as_ref() {
		for (label, value) in [
			("source.host", &source.host),
			("source.username", &source.username),
			("source.api_key", &source.api_key),
		] {
			if value.trim().is_empty() {
				return Err(Error::Validation { message: format!("{label} must be non-empty.") });
			}
		}

		if source.timeout_ms == 0 {
			return Err(Error::Validation {
				message: "source.timeout_ms must be greater than zero.".to_string(),
			});
		}
	}
	if let Some(reddit) = cfg.reddit.as_ref() {
		for (label, value) in [
			("reddit.client_id", &reddit.client_id),
			("reddit.client_secret", &reddit.client_secret),
			("reddit.username", &reddit.username),
			("reddit.password", &reddit.password),
			("reddit.user_agent", &reddit.user_agent),
		] {
			if value.trim().is_empty() {
				return Err(Error::Validation { message: format!("{label} must be non-empty.") });
			}
		}

		if reddit.timeout_ms == 0 {
			return Err(Error::Validation {
				message: "reddit.timeout_ms must be greater than zero.".to_string(),
			});
		}
		if reddit.retry_attempts == 0 {
			return Err(Error::Validation {
				message: "reddit.retry_attempts must be greater than zero.".to_string(),
			});
		}
		if reddit.refresh_threshold_minutes < 0 {
			return Err(Error::Validation {
				message: "reddit.refresh_threshold_minutes must be zero or greater.".to_string(),
			});
		}
	}

	if cfg.scan.subreddit.trim().is_empty() {
		return Err(Error::Validation { message: "scan.subreddit must be non-empty.".to_string() });
	}
	if cfg.scan.submission_limit == 0 {
		return Err(Error::Validation {
			message: "scan.submission_limit must be greater than zero.".to_string(),
		});
	}
	if cfg.scan.comment_limit == 0 {
		return Err(Error::Validation {
			message: "scan.comment_limit must be greater than zero.".to_string(),
		});
	}
	if cfg.sync.start_id > cfg.sync.end_id {
		return Err(Error::Validation {
			message: "sync.start_id must be less than or equal to sync.end_id.".to_string(),
		});
	}

	Ok(())
}

pub fn require_source(cfg: &Config) -> Result<&Source> {
	cfg.source.as_ref().ok_or(Error::MissingSection { section: "source" })
}

pub fn require_reddit(cfg: &Config) -> Result<&Reddit> {
	cfg.reddit.as_ref().ok_or(Error::MissingSection { section: "reddit" })
}

fn normalize(cfg: &mut Config) {
	cfg.index.url = cfg.index.url.trim_end_matches('/').to_string();

	if let Some(source) = cfg.source.as_mut() {
		source.host = source.host.trim_end_matches('/').to_string();
	}
	if let Some(reddit) = cfg.reddit.as_mut() {
		if reddit.access_token.as_deref().map(|token| token.trim().is_empty()).unwrap_or(false) {
			reddit.access_token = None;
			reddit.token_expires_at_ms = None;
		}

		reddit.auth_base = reddit.auth_base.trim_end_matches('/').to_string();
		reddit.api_base = reddit.api_base.trim_end_matches('/').to_string();
	}

	cfg.sync.skip_ids.sort_unstable();
	cfg.sync.skip_ids.dedup();
}
