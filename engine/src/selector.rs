//! First-in-first-out cell selection.
//!
//! Cells are taken strictly in delivery order until the running total reaches the target. There
//! is no search for a smaller input set or for an exact match; the stream is an indexer cursor
//! and looking ahead would mean fetching pages that are never spent.

// self
use crate::{client::CellStream, codec, prelude::*, types::*};

/// What a cell contributes to the running total.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Measure {
	/// The cell capacity in shannons.
	Capacity,
	/// The xUDT amount in the cell data.
	Token,
}
impl Measure {
	/// Contribution of `cell`.
	pub fn of(self, cell: &Cell) -> u128 {
		match self {
			Measure::Capacity => cell.capacity() as _,
			Measure::Token => {
				if cell.data.len() < codec::AMOUNT_SIZE {
					tracing::warn!(
						"token cell {} carries {} data bytes, counted as zero",
						cell.out_point,
						cell.data.len()
					);

					return 0;
				}

				codec::decode_amount(&cell.data)
			},
		}
	}
}

/// Inputs taken from the stream and what they add up to.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Selection {
	/// Selected cells, in delivery order.
	pub inputs: Vec<CellInput>,
	/// Sum of their measure.
	pub total: u128,
}

/// Pull cells until their total reaches `target`.
///
/// Fails with [`ChainError::InsufficientBalance`] once the stream runs dry; nothing selected so
/// far is returned in that case. A zero target selects nothing.
pub async fn select_cells<S>(mut cells: S, target: u128, measure: Measure) -> Result<Selection>
where
	S: CellStream,
{
	let mut selection = Selection::default();

	while selection.total < target {
		let Some(cell) = cells.next().await? else {
			return Err(ChainError::InsufficientBalance {
				required: target,
				available: selection.total,
			}
			.into());
		};
		let amount = measure.of(&cell);

		tracing::debug!("selected cell {} with {measure:?} {amount}", cell.out_point);

		selection.total = selection.total.checked_add(amount).ok_or_else(|| {
			AmountError::OutOfRange {
				amount: format!("{} + {amount}", selection.total),
				reason: "input total exceeds 128 bits",
			}
		})?;
		selection.inputs.push(CellInput::new(cell.out_point, 0));
	}

	tracing::info!(
		"selected {} cells with {measure:?} {} for target {target}",
		selection.inputs.len(),
		selection.total
	);

	Ok(selection)
}
