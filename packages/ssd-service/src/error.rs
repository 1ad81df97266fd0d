pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Storage(#[from] ssd_storage::Error),
	#[error(transparent)]
	Provider(#[from] ssd_providers::Error),
	#[error("Source lookup for catalog id {id} failed: {message}")]
	Source { id: u64, message: String },
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
}
