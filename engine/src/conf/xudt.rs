// crates.io
use ckb_jsonrpc_types as json;
use ckb_types::prelude::*;
use serde::{Deserialize, Serialize};
// self
use crate::{assembler::Token, prelude::*, types::*};

/// Where the xUDT script lives on chain.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Conf {
	/// Code hash of the xUDT type script.
	pub code_hash: H256,
	/// How `code_hash` is matched.
	pub hash_type: json::ScriptHashType,
	/// Deps every xUDT transaction carries.
	pub cell_deps: Vec<CellDepConf>,
}
impl Conf {
	/// The token identified by the hex encoded type script `args`.
	pub fn token(&self, args: &str, decimals: u8) -> Result<Token> {
		let args = array_bytes::hex2bytes(args).map_err(Error::ArrayBytes)?;

		Ok(Token {
			script: script(&self.code_hash, self.hash_type.clone().into(), &args),
			decimals,
			cell_deps: self.cell_deps.iter().map(CellDep::from).collect(),
		})
	}
}

/// A cell dep in config form.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CellDepConf {
	/// Transaction holding the dep cell.
	pub tx_hash: H256,
	/// Output index within that transaction.
	pub index: u32,
	/// `code` or `dep_group`.
	pub dep_type: json::DepType,
}
impl From<&CellDepConf> for CellDep {
	fn from(value: &CellDepConf) -> Self {
		let out_point = OutPoint::new(value.tx_hash.pack(), value.index);

		cell_dep(out_point, value.dep_type.clone().into())
	}
}

#[test]
fn token_should_work() {
	let c = crate::conf::Conf::default().xudt;
	let args = format!("0x{}", "ab".repeat(32));
	let t = c.token(&args, 6).unwrap();

	assert_eq!(Unpack::<H256>::unpack(&t.script.code_hash()), c.code_hash);
	assert_eq!(Into::<u8>::into(t.script.hash_type()), ScriptHashType::Type as u8);
	assert_eq!(t.script.args().raw_data(), Bytes::from(vec![0xab; 32]));
	assert_eq!(t.decimals, 6);
	assert_eq!(t.cell_deps[0].out_point().tx_hash(), c.cell_deps[0].tx_hash.pack());
	assert_eq!(Into::<u8>::into(t.cell_deps[0].dep_type()), DepType::Code as u8);
	assert!(c.token("0xzz", 6).is_err());
}
