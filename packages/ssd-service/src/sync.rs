//! One-directional catalog reconciliation over a numeric id range.

use std::{collections::BTreeSet, ops::RangeInclusive, time::Duration};

use tokio::time;

use ssd_storage::CatalogStore;

use crate::{Error, Result};

/// Everything one run needs. Runs keep no cursor; destination writes are upserts, so a range can
/// be replayed from the start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncTask {
	pub start_id: u64,
	pub end_id: u64,
	pub skip: BTreeSet<u64>,
	/// Pause after every destination write.
	pub delay: Duration,
}
impl SyncTask {
	pub fn new(
		start_id: u64,
		end_id: u64,
		skip: impl IntoIterator<Item = u64>,
		delay: Duration,
	) -> Result<Self> {
		if start_id > end_id {
			return Err(Error::InvalidRequest {
				message: format!("Sync range start {start_id} is after end {end_id}."),
			});
		}

		Ok(Self { start_id, end_id, skip: skip.into_iter().collect(), delay })
	}

	pub fn from_config(cfg: &ssd_config::Sync) -> Result<Self> {
		Self::new(
			cfg.start_id,
			cfg.end_id,
			cfg.skip_ids.iter().copied(),
			Duration::from_millis(cfg.delay_ms),
		)
	}

	/// Replaces the range bounds and extends the skip-set.
	pub fn with_overrides(
		self,
		start_id: Option<u64>,
		end_id: Option<u64>,
		skip: impl IntoIterator<Item = u64>,
	) -> Result<Self> {
		let mut merged = self.skip;

		merged.extend(skip);

		Self::new(
			start_id.unwrap_or(self.start_id),
			end_id.unwrap_or(self.end_id),
			merged,
			self.delay,
		)
	}

	pub fn ids(&self) -> RangeInclusive<u64> {
		self.start_id..=self.end_id
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
	pub synced: usize,
	pub skipped: usize,
	pub not_found: usize,
	pub write_failures: usize,
}

pub struct CatalogSyncer;
impl CatalogSyncer {
	/// Copies every id in the task range from `source` to `destination`, in ascending order.
	///
	/// Skipped ids are never fetched. A missing source record moves on to the next id. A failed
	/// destination write is logged and counted. A failed source lookup aborts the run.
	pub async fn run(
		task: &SyncTask,
		source: &dyn CatalogStore,
		destination: &dyn CatalogStore,
	) -> Result<SyncReport> {
		let mut report = SyncReport::default();

		tracing::info!(
			start_id = task.start_id,
			end_id = task.end_id,
			skip = task.skip.len(),
			source = source.backend(),
			destination = destination.backend(),
			"Starting catalog sync."
		);

		for id in task.ids() {
			if task.skip.contains(&id) {
				tracing::info!(id, "Skipping catalog id.");

				report.skipped += 1;

				continue;
			}

			tracing::info!(id, "Syncing catalog id.");

			let found = match source.find_by_id(&id.to_string()).await {
				Ok(found) => found,
				Err(err) => {
					tracing::error!(error = %err, id, "Source lookup failed. Aborting sync.");

					return Err(Error::Source { id, message: err.to_string() });
				},
			};
			let Some(product) = found else {
				tracing::info!(id, "Catalog id not found in source.");

				report.not_found += 1;

				continue;
			};

			match destination.insert(&product).await {
				Ok(()) => report.synced += 1,
				Err(err) => {
					tracing::error!(error = %err, id, "Destination write failed.");

					report.write_failures += 1;
				},
			}

			if id < task.end_id && !task.delay.is_zero() {
				time::sleep(task.delay).await;
			}
		}

		tracing::info!(
			synced = report.synced,
			skipped = report.skipped,
			not_found = report.not_found,
			write_failures = report.write_failures,
			"Catalog sync finished."
		);

		Ok(report)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn overrides_replace_bounds_and_extend_skips() {
		let task = SyncTask::new(1, 1_550, [7], Duration::from_millis(10)).expect("task");
		let task = task.with_overrides(Some(5), None, [9, 7]).expect("task");

		assert_eq!(task.ids(), 5..=1_550);
		assert_eq!(task.skip, BTreeSet::from([7, 9]));
		assert_eq!(task.delay, Duration::from_millis(10));
	}

	#[test]
	fn inverted_range_is_rejected() {
		assert!(matches!(
			SyncTask::new(10, 9, [], Duration::ZERO),
			Err(Error::InvalidRequest { .. })
		));

		let task = SyncTask::new(1, 5, [], Duration::ZERO).expect("task");

		assert!(task.with_overrides(None, Some(0), []).is_err());
	}

	#[test]
	fn single_id_range_is_allowed() {
		let task = SyncTask::new(4, 4, [], Duration::ZERO).expect("task");

		assert_eq!(task.ids().count(), 1);
	}
}
