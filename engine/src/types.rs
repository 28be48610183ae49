//! Cell model.
//!
//! Scripts, out points, cell deps, inputs and outputs are the node's own packed types from
//! `ckb-types`. This module adds the few plain-value views the engine needs on top of them.

// crates.io
pub use ckb_types::{
	bytes::Bytes,
	core::{Capacity, DepType, ScriptHashType},
	packed::{CellDep, CellInput, CellOutput, OutPoint, Script},
	H256,
};
use ckb_types::{packed, prelude::*};
use serde::{Deserialize, Serialize};

/// Smallest native unit, `10^-8` CKB.
pub type Shannon = u64;
/// xUDT amount in the token's smallest unit.
pub type TokenAmount = u128;

/// Shannons in one CKB.
pub const ONE_CKB: Shannon = 100_000_000;
#[test]
fn max_ckb_in_u64_should_work() {
	let max_u64 = Shannon::MAX;
	// Hard cap of the primary issuance plus generous secondary issuance headroom.
	let max_ckb = 100_000_000_000_u64 * ONE_CKB;

	assert!(max_u64 > max_ckb);
}

/// Build a script from its parts.
pub fn script(code_hash: &H256, hash_type: ScriptHashType, args: &[u8]) -> Script {
	Script::new_builder()
		.code_hash(code_hash.pack())
		.hash_type(Into::<packed::Byte>::into(hash_type))
		.args(args.pack())
		.build()
}

/// Build a cell dep pointing at `out_point`.
pub fn cell_dep(out_point: OutPoint, dep_type: DepType) -> CellDep {
	let dep_type: packed::Byte = dep_type.into();

	CellDep::new_builder().out_point(out_point).dep_type(dep_type).build()
}

/// Build an output holding `capacity` shannons.
pub fn cell_output(capacity: Shannon, lock: Script, type_: Option<Script>) -> CellOutput {
	CellOutput::new_builder()
		.capacity(Capacity::shannons(capacity).pack())
		.lock(lock)
		.type_(type_.pack())
		.build()
}

/// Plain-value reads of a packed output.
pub trait CellOutputExt {
	/// Capacity in shannons.
	fn shannons(&self) -> Shannon;

	/// The type script, if any.
	fn type_script(&self) -> Option<Script>;
}
impl CellOutputExt for CellOutput {
	fn shannons(&self) -> Shannon {
		Unpack::<u64>::unpack(&self.capacity())
	}

	fn type_script(&self) -> Option<Script> {
		self.type_().to_opt()
	}
}
#[test]
fn cell_output_should_work() {
	let code_hash = H256([0x9b; 32]);
	let lock = script(&code_hash, ScriptHashType::Type, &[1; 20]);
	let type_ = script(&code_hash, ScriptHashType::Data1, &[2; 32]);
	let output = cell_output(61 * ONE_CKB, lock.clone(), Some(type_.clone()));

	assert_eq!(output.shannons(), 6_100_000_000);
	assert_eq!(output.lock(), lock);
	assert_eq!(output.type_script(), Some(type_));
	assert_eq!(Unpack::<H256>::unpack(&lock.code_hash()), code_hash);
	assert_eq!(Into::<u8>::into(lock.hash_type()), ScriptHashType::Type as u8);
	assert_eq!(lock.args().raw_data(), Bytes::from(vec![1; 20]));
	assert_eq!(cell_output(0, lock, None).type_script(), None);
}

/// A live cell observed from the chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
	/// Where the cell was created.
	pub out_point: OutPoint,
	/// Capacity, lock and type.
	pub output: CellOutput,
	/// Cell data.
	pub data: Bytes,
}
impl Cell {
	/// The cell's lock script.
	pub fn lock(&self) -> Script {
		self.output.lock()
	}

	/// The cell's type script, if any.
	pub fn type_script(&self) -> Option<Script> {
		self.output.type_script()
	}

	/// The cell's capacity in shannons.
	pub fn capacity(&self) -> Shannon {
		self.output.shannons()
	}
}

/// One `(address, amount)` pair supplied by the caller.
///
/// `amount` is a decimal string, in whole CKB for transfers or in token units for airdrops.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
	/// Address as the chain client understands it.
	pub address: String,
	/// Decimal amount.
	pub amount: String,
}
impl Recipient {
	/// Pair an address with an amount.
	pub fn new<A, M>(address: A, amount: M) -> Self
	where
		A: Into<String>,
		M: Into<String>,
	{
		Self { address: address.into(), amount: amount.into() }
	}
}

/// What a batch sends.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
	/// Plain capacity transfer.
	Value,
	/// xUDT airdrop.
	Token {
		/// Hex encoded type script args of the token.
		args: String,
		/// Token scale.
		decimals: u8,
	},
}
