//! xUDT amount codec.
//!
//! An xUDT cell stores its balance in the first 16 bytes of the cell data as a little-endian
//! `u128`. Anything after those bytes belongs to extensions and is ignored here.

// self
use crate::types::TokenAmount;

/// Width of the amount field.
pub const AMOUNT_SIZE: usize = 16;

/// Encode an amount as 16 little-endian bytes.
///
/// Range checking happens when the amount is parsed; every `u128` fits.
pub fn encode_amount(value: TokenAmount) -> [u8; AMOUNT_SIZE] {
	value.to_le_bytes()
}

/// Decode the amount field from the start of `data`.
///
/// Shorter buffers are read as if the missing high bytes were zero. Bytes past the first 16 are
/// ignored.
pub fn decode_amount(data: &[u8]) -> TokenAmount {
	let mut buf = [0; AMOUNT_SIZE];
	let n = data.len().min(AMOUNT_SIZE);

	buf[..n].copy_from_slice(&data[..n]);

	TokenAmount::from_le_bytes(buf)
}
