/// Amount parsing and capacity floor failures.
#[derive(Debug, thiserror::Error)]
pub enum AmountError {
	/// Not a plain non-negative decimal, or too large for its integer type.
	#[error("[amount] {amount:?} is out of range: {reason}")]
	OutOfRange { amount: String, reason: &'static str },
	/// A value transfer below the plain output floor.
	#[error("[amount] {amount} shannons is below the minimum output capacity {minimum}")]
	BelowMinimumCapacity { amount: u64, minimum: u64 },
	/// A configured floor below what the chain accepts.
	#[error("[amount] capacity floor {floor} is below the protocol minimum {minimum}")]
	FloorBelowMinimum { floor: u64, minimum: u64 },
	/// A token scale beyond what the amount type can hold.
	#[error("[amount] decimals {0} is out of range 0..=18")]
	DecimalsOutOfRange(u8),
}
