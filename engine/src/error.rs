//! Error taxonomy.

pub mod amount;
pub use amount::*;

pub mod chain;
pub use chain::*;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	AppDirs2(#[from] app_dirs2::AppDirsError),
	#[error("{0:?}")]
	ArrayBytes(array_bytes::Error),
	#[error(transparent)]
	SerdeJson(#[from] serde_json::Error),
	#[error(transparent)]
	Toml(#[from] toml::de::Error),

	#[error(transparent)]
	Amount(#[from] AmountError),
	#[error(transparent)]
	Chain(#[from] ChainError),

	/// Failure reported by the chain client or signer, forwarded untouched.
	#[error("{0}")]
	Client(Box<dyn 'static + std::error::Error + Send + Sync>),
	#[error("[engine] no recipients")]
	NoRecipients,
}
impl Error {
	/// Wrap a collaborator failure.
	pub fn client<E>(e: E) -> Self
	where
		E: 'static + std::error::Error + Send + Sync,
	{
		Self::Client(Box::new(e))
	}
}
