use std::{future::Future, time::Duration};

use tokio::time;

use crate::{Error, Result};

const MAX_DELAY: Duration = Duration::from_secs(30 * 60);

/// Fixed attempt budget with a delay that doubles after every failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
	pub attempts: u32,
	pub base_delay: Duration,
}
impl RetryPolicy {
	pub fn new(attempts: u32, base_delay: Duration) -> Result<Self> {
		if attempts == 0 {
			return Err(Error::InvalidConfig {
				message: "Retry attempts must be greater than zero.".to_string(),
			});
		}

		Ok(Self { attempts, base_delay })
	}

	pub fn from_config(cfg: &ssd_config::Reddit) -> Result<Self> {
		Self::new(cfg.retry_attempts, Duration::from_millis(cfg.retry_base_delay_ms))
	}

	/// Delay slept after the given failed attempt, counted from one.
	pub fn delay_after(&self, attempt: u32) -> Duration {
		let factor = 2_u32.saturating_pow(attempt.saturating_sub(1));

		self.base_delay.saturating_mul(factor).min(MAX_DELAY.max(self.base_delay))
	}

	/// Runs `op` until it succeeds or the budget is spent. No delay follows the final attempt.
	pub async fn run<T, F, Fut>(&self, label: &str, mut op: F) -> Result<T>
	where
		F: FnMut() -> Fut,
		Fut: Future<Output = Result<T>>,
	{
		let mut last_error = None;

		for attempt in 1..=self.attempts {
			match op().await {
				Ok(value) => return Ok(value),
				Err(err) => {
					tracing::warn!(
						error = %err,
						attempt,
						attempts = self.attempts,
						label,
						"Attempt failed."
					);

					last_error = Some(err.to_string());
				},
			}

			if attempt < self.attempts {
				time::sleep(self.delay_after(attempt)).await;
			}
		}

		Err(Error::RetriesExhausted {
			attempts: self.attempts,
			last_error: last_error.unwrap_or_default(),
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn delay_doubles_from_base() {
		let policy = RetryPolicy::new(5, Duration::from_secs(60)).expect("policy");

		assert_eq!(policy.delay_after(1), Duration::from_secs(60));
		assert_eq!(policy.delay_after(2), Duration::from_secs(120));
		assert_eq!(policy.delay_after(4), Duration::from_secs(480));
	}

	#[test]
	fn delay_is_capped() {
		let policy = RetryPolicy::new(40, Duration::from_secs(60)).expect("policy");

		assert_eq!(policy.delay_after(32), MAX_DELAY);
	}

	#[test]
	fn zero_attempts_is_rejected() {
		assert!(matches!(RetryPolicy::new(0, Duration::ZERO), Err(Error::InvalidConfig { .. })));
	}

	#[tokio::test]
	async fn stops_on_first_success() {
		let policy = RetryPolicy::new(4, Duration::from_millis(1)).expect("policy");
		let mut calls = 0;
		let result = policy
			.run("test", || {
				calls += 1;

				let current = calls;

				async move {
					if current < 3 {
						Err(Error::InvalidResponse { message: format!("fail {current}") })
					} else {
						Ok(current)
					}
				}
			})
			.await;

		assert_eq!(result.expect("should succeed"), 3);
		assert_eq!(calls, 3);
	}

	#[tokio::test]
	async fn exhaustion_keeps_last_error() {
		let policy = RetryPolicy::new(2, Duration::from_millis(1)).expect("policy");
		let mut calls = 0;
		let result: Result<()> = policy
			.run("test", || {
				calls += 1;

				let current = calls;

				async move { Err(Error::InvalidResponse { message: format!("fail {current}") }) }
			})
			.await;

		match result {
			Err(Error::RetriesExhausted { attempts, last_error }) => {
				assert_eq!(attempts, 2);
				assert_eq!(last_error, "fail 2");
			},
			other => panic!("unexpected result: {other:?}"),
		}
		assert_eq!(calls, 2);
	}
}
