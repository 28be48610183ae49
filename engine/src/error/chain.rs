/// Failures reported against chain state.
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
	/// The client could not resolve the address into a lock script.
	#[error("[chain] invalid address {address:?}")]
	InvalidAddress { address: String },
	/// The sender's cells ran out before the target was met.
	#[error("[chain] insufficient balance: required {required}, available {available}")]
	InsufficientBalance { required: u128, available: u128 },
}
