//! CKB batch transfer and xUDT airdrop engine.
//!
//! Builds balanced transaction skeletons for native capacity transfers and fungible token
//! airdrops to many recipients in one transaction. Address resolution, cell indexing, fee
//! completion, signing and broadcasting are provided by the caller through the traits in
//! [`client`].

#![deny(
	// missing_docs,
	unused_crate_dependencies,
)]

pub mod accountant;
pub mod assembler;
pub mod capacity;
pub mod client;
pub mod codec;
pub mod conf;
pub mod engine;
pub mod error;
pub mod fixed_point;
pub mod selector;
pub mod types;

#[cfg(test)] mod mock;

pub mod prelude {
	//! Common imports.

	pub use crate::error::*;

	/// Engine result.
	pub type Result<T> = std::result::Result<T, Error>;
}
