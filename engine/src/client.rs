//! Chain client and signer seams.
//!
//! The engine never talks to a node itself. Everything it needs from the outside world goes
//! through these traits, which keeps one call free of hidden global state and lets tests drive
//! it with in-memory fakes.

// self
use crate::{assembler::TransactionSkeleton, prelude::*, types::*};

/// Lazy, finite, non-restartable sequence of live cells.
///
/// The consumer may stop pulling at any time without draining it. Implementations release any
/// underlying cursor on drop.
// No `Send` bound on the futures, implementations may hold `!Send` cursors.
#[allow(async_fn_in_trait)]
pub trait CellStream {
	/// The next cell, or `None` once the sequence is exhausted.
	async fn next(&mut self) -> Result<Option<Cell>>;
}

/// Adapts an in-memory iterator, e.g. one already fetched indexer page.
#[derive(Debug)]
pub struct IterStream<I>(pub I);
impl<I> CellStream for IterStream<I>
where
	I: Iterator<Item = Cell>,
{
	async fn next(&mut self) -> Result<Option<Cell>> {
		Ok(self.0.next())
	}
}

/// Read access to the chain: address resolution and live cell lookup.
#[allow(async_fn_in_trait)]
pub trait Client {
	/// Cursor returned by [`Client::find_cells`].
	type Cells<'a>: CellStream
	where
		Self: 'a;

	/// Resolve an address into its lock script.
	///
	/// Must fail with [`ChainError::InvalidAddress`] on malformed input.
	async fn resolve(&self, address: &str) -> Result<Script>;

	/// Stream live cells locked by `lock`.
	///
	/// With `type_script` set, only cells carrying exactly that type script are yielded; with
	/// `None` the type is not filtered.
	fn find_cells(&self, lock: &Script, type_script: Option<&Script>) -> Self::Cells<'_>;
}

/// The sending account: fee completion, signing and submission.
#[allow(async_fn_in_trait)]
pub trait Signer {
	/// A completed, signed transaction ready for submission.
	type Signed;

	/// Lock script of the signing account.
	async fn lock(&self) -> Result<Script>;

	/// Add plain inputs until the outputs and a fee at `fee_rate` shannons per 1000 bytes are
	/// covered, add the capacity change, then sign.
	async fn complete(&self, skeleton: TransactionSkeleton, fee_rate: u64)
		-> Result<Self::Signed>;

	/// Submit a signed transaction and return its hash.
	async fn broadcast(&self, tx: Self::Signed) -> Result<String>;
}
