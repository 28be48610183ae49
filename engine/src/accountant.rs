//! Token balance accounting for airdrops.

// self
use crate::{fixed_point, prelude::*, types::*};

/// Largest supported token scale.
pub const MAX_DECIMALS: u8 = 18;

/// Per recipient token amounts and their sum.
#[derive(Debug, PartialEq, Eq)]
pub struct TokenPlan {
	pub amounts: Vec<TokenAmount>,
	pub required: TokenAmount,
}
impl TokenPlan {
	pub fn new(recipients: &[Recipient], decimals: u8) -> Result<Self> {
		if decimals > MAX_DECIMALS {
			return Err(AmountError::DecimalsOutOfRange(decimals).into());
		}

		let amounts = recipients
			.iter()
			.map(|r| fixed_point::parse(&r.amount, decimals))
			.collect::<Result<Vec<_>>>()?;
		let required = amounts.iter().try_fold(0_u128, |acc, &a| acc.checked_add(a)).ok_or(
			AmountError::OutOfRange {
				amount: "sum of recipient amounts".into(),
				reason: "exceeds 128 bits",
			},
		)?;

		tracing::info!(
			"airdrop of {} to {} recipients",
			fixed_point::format(required, decimals),
			amounts.len()
		);

		Ok(Self { amounts, required })
	}

	/// Amount owed back to the sender after selecting `available`, `None` if nothing is left.
	///
	/// # Panics
	///
	/// If `available` is below the requirement; the selector fails before that can happen.
	pub fn change(&self, available: TokenAmount) -> Option<TokenAmount> {
		assert!(
			available >= self.required,
			"selected {available} is below the required {}",
			self.required
		);

		Some(available - self.required).filter(|&c| c != 0)
	}
}
