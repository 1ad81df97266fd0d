//! Polls a subreddit and annotates listings that resolve to a catalog product.

use std::{collections::HashSet, future::Future, sync::Arc, time::Duration};

use tokio::time;

use ssd_domain::annotation;
use ssd_providers::{PostingClient, Submission};

use crate::{Matcher, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanReport {
	pub seen: usize,
	pub off_topic: usize,
	/// Already answered by the other bot.
	pub answered_elsewhere: usize,
	/// Already answered by this account.
	pub already_annotated: usize,
	pub unmatched: usize,
	pub search_failures: usize,
	pub posted: usize,
}

pub struct Scanner {
	posting: Arc<dyn PostingClient>,
	matcher: Matcher,
	cfg: ssd_config::Scan,
}
impl Scanner {
	pub fn new(posting: Arc<dyn PostingClient>, matcher: Matcher, cfg: ssd_config::Scan) -> Self {
		Self { posting, matcher, cfg }
	}

	/// Runs cycles every `interval_secs` until `shutdown` resolves. Cycle errors are logged and
	/// the next cycle still runs.
	pub async fn run<F>(&self, shutdown: F)
	where
		F: Future<Output = ()>,
	{
		let interval = Duration::from_secs(self.cfg.interval_secs);

		tokio::pin!(shutdown);

		loop {
			tokio::select! {
				result = self.run_cycle() => match result {
					Ok(report) => tracing::info!(
						seen = report.seen,
						posted = report.posted,
						unmatched = report.unmatched,
						search_failures = report.search_failures,
						"Scan cycle finished."
					),
					Err(err) => tracing::error!(error = %err, "Scan cycle failed."),
				},
				_ = &mut shutdown => break,
			}

			tokio::select! {
				_ = time::sleep(interval) => {},
				_ = &mut shutdown => break,
			}
		}

		tracing::info!("Scanner stopped.");
	}

	/// One pass over the newest submissions. Search failures skip the submission; a failed post
	/// ends the cycle with an error.
	pub async fn run_cycle(&self) -> Result<ScanReport> {
		let mut report = ScanReport::default();
		let submissions =
			self.posting.new_submissions(&self.cfg.subreddit, self.cfg.submission_limit).await?;
		let annotated = self
			.posting
			.user_newest_comments(self.cfg.comment_limit)
			.await?
			.iter()
			.map(|comment| comment.submission_id().to_string())
			.collect::<HashSet<_>>();
		let flair = self.cfg.flair.to_uppercase();

		for submission in submissions {
			report.seen += 1;

			if !submission.flair().to_uppercase().contains(&flair) {
				tracing::debug!(
					id = %submission.id,
					flair = submission.flair(),
					"Skipping off-topic submission."
				);

				report.off_topic += 1;

				continue;
			}
			if !self.cfg.override_existing && self.answered_by_other_bot(&submission).await {
				tracing::info!(
					id = %submission.id,
					other_bot = %self.cfg.other_bot,
					"Submission already answered by another bot."
				);

				report.answered_elsewhere += 1;

				continue;
			}
			if annotated.contains(&submission.id) {
				tracing::info!(id = %submission.id, "Submission already annotated.");

				report.already_annotated += 1;

				continue;
			}

			let product = match self.matcher.best_match(&submission.title).await {
				Ok(product) => product,
				Err(err) => {
					tracing::error!(
						error = %err,
						id = %submission.id,
						title = %submission.title,
						"Catalog search failed."
					);

					report.search_failures += 1;

					continue;
				},
			};
			let Some(product) = product else {
				tracing::info!(id = %submission.id, title = %submission.title, "No catalog match.");

				report.unmatched += 1;

				continue;
			};
			let body = annotation::render(&product);

			self.posting.submit_comment(&submission.id, &body).await?;

			tracing::info!(
				id = %submission.id,
				title = %submission.title,
				product_id = %product.id,
				"Posted annotation."
			);

			report.posted += 1;

			time::sleep(Duration::from_millis(self.cfg.comment_delay_ms)).await;
		}

		Ok(report)
	}

	/// A thread that cannot be fetched counts as not answered.
	async fn answered_by_other_bot(&self, submission: &Submission) -> bool {
		match self
			.posting
			.submission_comments(&submission.id, self.cfg.thread_comment_limit)
			.await
		{
			Ok(comments) => comments.iter().any(|comment| comment.author == self.cfg.other_bot),
			Err(err) => {
				tracing::warn!(
					error = %err,
					id = %submission.id,
					"Failed to fetch thread comments."
				);

				false
			},
		}
	}
}
