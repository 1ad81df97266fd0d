use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre;

use ssd_config::Config;
use ssd_service::{CatalogSyncer, SyncTask};
use ssd_storage::{EsIndex, TpuCatalog};

#[derive(Debug, Parser)]
#[command(
	version = ssd_cli::VERSION,
	rename_all = "kebab",
	styles = ssd_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	/// Overrides `sync.start_id`.
	#[arg(long, value_name = "ID")]
	pub start_id: Option<u64>,
	/// Overrides `sync.end_id`.
	#[arg(long, value_name = "ID")]
	pub end_id: Option<u64>,
	/// Extra id to skip; repeatable, merged with `sync.skip_ids`.
	#[arg(long = "skip", value_name = "ID")]
	pub skip: Vec<u64>,
}

pub fn sync_task(config: &Config, args: &Args) -> color_eyre::Result<SyncTask> {
	let task = SyncTask::from_config(&config.sync)?.with_overrides(
		args.start_id,
		args.end_id,
		args.skip.iter().copied(),
	)?;

	Ok(task)
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = ssd_config::load(&args.config)?;

	ssd_cli::init_tracing(&config.service.log_level);

	let source = TpuCatalog::new(ssd_config::require_source(&config)?)?;
	let destination = EsIndex::new(&config.index)?;
	let task = sync_task(&config, &args)?;

	destination.ping().await?;

	let report = tokio::select! {
		report = CatalogSyncer::run(&task, &source, &destination) => report?,
		_ = ssd_cli::shutdown_signal() => return Err(eyre::eyre!("Sync interrupted before completion.")),
	};

	tracing::info!(
		synced = report.synced,
		skipped = report.skipped,
		not_found = report.not_found,
		write_failures = report.write_failures,
		"Sync complete."
	);

	Ok(())
}
