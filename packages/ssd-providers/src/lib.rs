pub mod reddit;
pub mod retry;

mod error;

pub use error::{Error, Result};
pub use reddit::{Listing, RedditClient, Submission, ThreadComment, Token, UserComment};
pub use retry::RetryPolicy;

use std::{future::Future, pin::Pin};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Social platform surface used by the scanner. Every call is one request and any non-success
/// status is an error.
pub trait PostingClient
where
	Self: Send + Sync,
{
	fn new_submissions<'a>(
		&'a self,
		subreddit: &'a str,
		limit: u32,
	) -> BoxFuture<'a, Result<Vec<Submission>>>;

	/// Newest comments authored by the signed-in account.
	fn user_newest_comments<'a>(&'a self, limit: u32) -> BoxFuture<'a, Result<Vec<UserComment>>>;

	/// Top-level comments on a submission.
	fn submission_comments<'a>(
		&'a self,
		submission_id: &'a str,
		limit: u32,
	) -> BoxFuture<'a, Result<Vec<ThreadComment>>>;

	fn submit_comment<'a>(
		&'a self,
		submission_id: &'a str,
		text: &'a str,
	) -> BoxFuture<'a, Result<()>>;
}
