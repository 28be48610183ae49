// std
use std::{
	cell::{Cell as StdCell, RefCell},
	collections::HashMap,
	io::{Error as IoError, ErrorKind},
	slice::Iter,
};
// crates.io
use ckb_types::prelude::*;
// self
use crate::{
	assembler::TransactionSkeleton,
	client::{CellStream, Client, Signer},
	codec,
	prelude::*,
	types::*,
};

pub fn init_tracing() {
	let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

pub const XUDT_CODE_HASH: H256 = H256([0x25; 32]);

pub fn lock(id: u8) -> Script {
	script(&H256([0x9b; 32]), ScriptHashType::Type, &[id; 20])
}

pub fn xudt(id: u8) -> Script {
	script(&XUDT_CODE_HASH, ScriptHashType::Type, &[id; 32])
}

pub fn out_point(index: u32) -> OutPoint {
	OutPoint::new(H256([0xee; 32]).pack(), index)
}

pub fn plain_cell(index: u32, lock: &Script, capacity: Shannon) -> Cell {
	Cell {
		out_point: out_point(index),
		output: cell_output(capacity, lock.clone(), None),
		data: Bytes::new(),
	}
}

pub fn token_cell(index: u32, lock: &Script, type_: &Script, amount: TokenAmount) -> Cell {
	Cell {
		out_point: out_point(index),
		output: cell_output(142 * ONE_CKB, lock.clone(), Some(type_.clone())),
		data: Bytes::copy_from_slice(&codec::encode_amount(amount)),
	}
}

/// Address book plus live cells, streamed in insertion order.
#[derive(Debug, Default)]
pub struct MemoryChain {
	addresses: HashMap<String, Script>,
	cells: Vec<Cell>,
	pulled: StdCell<usize>,
	broken_after: Option<usize>,
}
impl MemoryChain {
	pub fn with_address(mut self, address: &str, lock: Script) -> Self {
		self.addresses.insert(address.into(), lock);

		self
	}

	pub fn with_cell(mut self, cell: Cell) -> Self {
		self.cells.push(cell);

		self
	}

	/// Fail every pull after the first `n` cells.
	pub fn broken_after(mut self, n: usize) -> Self {
		self.broken_after = Some(n);

		self
	}

	/// Cells handed out so far.
	pub fn pulled(&self) -> usize {
		self.pulled.get()
	}
}
impl Client for MemoryChain {
	type Cells<'a> = MemoryCells<'a>;

	async fn resolve(&self, address: &str) -> Result<Script> {
		self.addresses
			.get(address)
			.cloned()
			.ok_or_else(|| ChainError::InvalidAddress { address: address.into() }.into())
	}

	fn find_cells(&self, lock: &Script, type_script: Option<&Script>) -> MemoryCells<'_> {
		MemoryCells {
			cells: self.cells.iter(),
			lock: lock.clone(),
			type_script: type_script.cloned(),
			pulled: &self.pulled,
			broken_after: self.broken_after,
		}
	}
}

pub struct MemoryCells<'a> {
	cells: Iter<'a, Cell>,
	lock: Script,
	type_script: Option<Script>,
	pulled: &'a StdCell<usize>,
	broken_after: Option<usize>,
}
impl CellStream for MemoryCells<'_> {
	async fn next(&mut self) -> Result<Option<Cell>> {
		if self.broken_after.is_some_and(|n| self.pulled.get() >= n) {
			let e = IoError::new(ErrorKind::ConnectionReset, "indexer went away");

			return Err(Error::client(e));
		}

		let (lock, type_script) = (&self.lock, &self.type_script);
		let cell = self.cells.find(|c| {
			c.lock() == *lock && (type_script.is_none() || c.type_script() == *type_script)
		});

		if cell.is_some() {
			self.pulled.set(self.pulled.get() + 1);
		}

		Ok(cell.cloned())
	}
}

/// Records what it completes and hands out a fake hash.
#[derive(Debug)]
pub struct MemorySigner {
	pub lock: Script,
	pub completed: RefCell<Option<(TransactionSkeleton, u64)>>,
	pub reject: bool,
}
impl MemorySigner {
	pub const TX_HASH: &'static str =
		"0x3b2ad5a6e5a3c29f0d8fb7b20cc7a1bdc4d7b59d6c8e9ab0e0a4d1f6e7c8a9b0";

	pub fn new(lock: Script) -> Self {
		Self { lock, completed: RefCell::new(None), reject: false }
	}

	pub fn skeleton(&self) -> TransactionSkeleton {
		self.completed.borrow().as_ref().map(|(s, _)| s.clone()).expect("nothing completed")
	}
}
impl Signer for MemorySigner {
	type Signed = TransactionSkeleton;

	async fn lock(&self) -> Result<Script> {
		Ok(self.lock.clone())
	}

	async fn complete(&self, skeleton: TransactionSkeleton, fee_rate: u64) -> Result<Self::Signed> {
		*self.completed.borrow_mut() = Some((skeleton.clone(), fee_rate));

		Ok(skeleton)
	}

	async fn broadcast(&self, _: Self::Signed) -> Result<String> {
		if self.reject {
			return Err(Error::client(IoError::new(
				ErrorKind::Other,
				"PoolRejectedTransactionByMinFeeRate",
			)));
		}

		Ok(Self::TX_HASH.into())
	}
}
