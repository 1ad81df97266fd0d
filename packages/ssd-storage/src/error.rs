pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Reqwest(#[from] reqwest::Error),
	#[error(transparent)]
	SerdeJson(#[from] serde_json::Error),
	#[error("Backend responded with status {status}: {body}")]
	Status { status: u16, body: String },
	#[error("{message}")]
	InvalidResponse { message: String },
	#[error("Invalid argument: {0}")]
	InvalidArgument(String),
	#[error("The {backend} backend does not support {operation}.")]
	Unsupported { backend: &'static str, operation: &'static str },
}
