pub mod xudt;

// std
use std::{
	fs,
	path::{Path, PathBuf},
};
// crates.io
use app_dirs2::{AppDataType, AppInfo};
use serde::{Deserialize, Serialize};
// self
use crate::{capacity::CapacityPolicy, prelude::*};

const APP_INFO: AppInfo = AppInfo { name: "ckb-airdrop", author: "ckb-airdrop" };
const DEFAULT_CONF: &str = r#"# Fee rate in shannons per 1000 bytes.
fee-rate = 1000

[capacity]
# Minimum capacity of a plain output, in shannons (61 CKB).
value-only = 6100000000
# Minimum capacity of an xUDT output, in shannons (162 CKB).
# Raise both when locks carry args longer than the standard 20 bytes.
typed = 16200000000

# xUDT deployment, defaults to the public testnet.
[xudt]
code-hash = "0x25c29dc317811a6f6f3985a7a9ebc4838bd388d19d0feeecf0bcd60f6c0975bb"
hash-type = "type"

[[xudt.cell-deps]]
tx-hash = "0xbf6fb538763efec2a70a6a3dcb7242787087e1030c4e7d86585bc63a9d337f5f"
index = 0
dep-type = "code"
"#;

/// Engine configuration.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Conf {
	/// Shannons per 1000 bytes, handed to the signer.
	pub fee_rate: u64,
	/// Output capacity floors, never below the protocol minimums.
	pub capacity: CapacityPolicy,
	/// The xUDT deployment.
	pub xudt: xudt::Conf,
}
impl Conf {
	/// `conf.toml` under the user config directory.
	pub fn default_path() -> Result<PathBuf> {
		Ok(app_dirs2::app_root(AppDataType::UserConfig, &APP_INFO)?.join("conf.toml"))
	}

	/// Load the configuration, writing the template to `path` first if nothing is there.
	///
	/// Floors below 61 or 162 CKB fail here, as a [`Error::Toml`].
	pub fn load_from(path: &Path) -> Result<Self> {
		if path.is_file() {
			Ok(toml::from_str(&fs::read_to_string(path)?)?)
		} else {
			tracing::info!(
				"no configuration file found, \
				write the template to {path:?} and use the defaults"
			);
			fs::write(path, DEFAULT_CONF)?;

			Ok(Self::default())
		}
	}
}
impl Default for Conf {
	fn default() -> Self {
		toml::from_str(DEFAULT_CONF).unwrap()
	}
}
