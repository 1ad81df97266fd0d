use std::{path::PathBuf, sync::Arc};

use clap::Parser;

use ssd_providers::RedditClient;
use ssd_service::{Matcher, Scanner};
use ssd_storage::EsIndex;

#[derive(Debug, Parser)]
#[command(
	version = ssd_cli::VERSION,
	rename_all = "kebab",
	styles = ssd_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = ssd_config::load(&args.config)?;

	ssd_cli::init_tracing(&config.service.log_level);

	let reddit = ssd_config::require_reddit(&config)?;
	let index = Arc::new(EsIndex::new(&config.index)?);

	index.ping().await?;

	tracing::info!(url = %config.index.url, index = index.index(), "Catalog index reachable.");

	let posting = Arc::new(RedditClient::new(reddit)?);

	// Bad credentials should stop startup rather than the first cycle.
	posting.access_token().await?;

	tracing::info!(
		username = posting.username(),
		subreddit = %config.scan.subreddit,
		interval_secs = config.scan.interval_secs,
		"Scanner starting."
	);

	let scanner = Scanner::new(posting, Matcher::new(index), config.scan.clone());

	scanner.run(ssd_cli::shutdown_signal()).await;

	Ok(())
}
