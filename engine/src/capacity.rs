//! Minimum output capacity.

// crates.io
use serde::{de::Error as DeError, Deserialize, Deserializer, Serialize};
// self
use crate::{prelude::*, types::*};

/// Floor for a plain output locked by a standard secp256k1 single-sig lock.
///
/// `8` capacity bytes + `32 + 1 + 20` lock bytes.
pub const MIN_VALUE_CAPACITY: Shannon = 61 * ONE_CKB;
/// Floor for an xUDT output.
///
/// `8` capacity bytes + `53` lock bytes + `32 + 1 + 32` type bytes + `16` data bytes = `142`, plus
/// headroom for lock args longer than the standard 20 bytes.
pub const MIN_TOKEN_CAPACITY: Shannon = 162 * ONE_CKB;

/// Fixed capacity floors, in shannons.
///
/// These are conservative constants, not a byte-exact measurement of the output. Senders or
/// recipients with longer locks must configure larger values; smaller ones are refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct CapacityPolicy {
	value_only: Shannon,
	typed: Shannon,
}
impl CapacityPolicy {
	/// Floors of at least [`MIN_VALUE_CAPACITY`] and [`MIN_TOKEN_CAPACITY`].
	pub fn new(value_only: Shannon, typed: Shannon) -> Result<Self> {
		Ok(Self::checked(value_only, typed)?)
	}

	/// Floor of an output with or without a type script.
	pub fn minimum_capacity(&self, has_type: bool) -> Shannon {
		if has_type {
			self.typed
		} else {
			self.value_only
		}
	}

	/// Whether the floor for this output's shape covers what it really occupies.
	pub fn covers(&self, output: &CellOutput, data_len: usize) -> bool {
		self.minimum_capacity(output.type_script().is_some()) >= occupied_capacity(output, data_len)
	}

	fn checked(value_only: Shannon, typed: Shannon) -> std::result::Result<Self, AmountError> {
		if value_only < MIN_VALUE_CAPACITY {
			return Err(AmountError::FloorBelowMinimum {
				floor: value_only,
				minimum: MIN_VALUE_CAPACITY,
			});
		}
		if typed < MIN_TOKEN_CAPACITY {
			return Err(AmountError::FloorBelowMinimum {
				floor: typed,
				minimum: MIN_TOKEN_CAPACITY,
			});
		}

		Ok(Self { value_only, typed })
	}
}
impl Default for CapacityPolicy {
	fn default() -> Self {
		Self { value_only: MIN_VALUE_CAPACITY, typed: MIN_TOKEN_CAPACITY }
	}
}
impl<'de> Deserialize<'de> for CapacityPolicy {
	fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		#[derive(Deserialize)]
		#[serde(rename_all = "kebab-case")]
		struct Floors {
			value_only: Shannon,
			typed: Shannon,
		}

		let Floors { value_only, typed } = Floors::deserialize(deserializer)?;

		Self::checked(value_only, typed).map_err(D::Error::custom)
	}
}

/// Byte-exact capacity an output with `data_len` bytes of data occupies on chain.
///
/// Saturates at [`Shannon::MAX`] when the size does not fit.
pub fn occupied_capacity(output: &CellOutput, data_len: usize) -> Shannon {
	Capacity::bytes(data_len)
		.and_then(|data| output.occupied_capacity(data))
		.map_or(Shannon::MAX, |c| c.as_u64())
}
