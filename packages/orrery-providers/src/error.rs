pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// The call was superseded or torn down. Never shown to anyone; callers
	/// drop it silently.
	#[error("Request cancelled.")]
	Cancelled,
	#[error("Request deadline exceeded.")]
	Timeout,
	#[error("Request failed with status {status}.")]
	RequestFailed { status: u16 },
	#[error(transparent)]
	Transport(#[from] reqwest::Error),
}

impl Error {
	pub fn is_cancelled(&self) -> bool {
		matches!(self, Self::Cancelled)
	}
}
