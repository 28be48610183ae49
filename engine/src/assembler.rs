//! Transaction skeleton assembly.

// crates.io
use ckb_jsonrpc_types as json;
use ckb_types::{
	core::{TransactionBuilder, TransactionView},
	prelude::*,
};
use serde::{Serialize, Serializer};
// self
use crate::{
	accountant::TokenPlan,
	capacity::{self, CapacityPolicy},
	client::Client,
	codec, fixed_point,
	prelude::*,
	selector::{self, Measure},
	types::*,
};

/// An unsigned transaction that still lacks its capacity inputs, fee and witnesses.
///
/// Outputs and their data are kept in lockstep. The first `recipient_count()` outputs belong to
/// the recipients, in order; a change output, if any, comes after them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransactionSkeleton {
	cell_deps: Vec<CellDep>,
	inputs: Vec<CellInput>,
	outputs: Vec<CellOutput>,
	outputs_data: Vec<Bytes>,
	change_index: Option<usize>,
}
impl TransactionSkeleton {
	/// Deps of the scripts the outputs carry, without duplicates.
	pub fn cell_deps(&self) -> &[CellDep] {
		&self.cell_deps
	}

	/// Inputs selected so far. Plain capacity inputs are left to the signer.
	pub fn inputs(&self) -> &[CellInput] {
		&self.inputs
	}

	/// Recipient outputs followed by the change output, if any.
	pub fn outputs(&self) -> &[CellOutput] {
		&self.outputs
	}

	/// Data of each output, index for index.
	pub fn outputs_data(&self) -> &[Bytes] {
		&self.outputs_data
	}

	/// Position of the change output.
	pub fn change_index(&self) -> Option<usize> {
		self.change_index
	}

	/// Number of leading outputs that belong to recipients.
	pub fn recipient_count(&self) -> usize {
		self.change_index.unwrap_or(self.outputs.len())
	}

	/// Add a dep unless it is already present.
	pub fn push_cell_dep(&mut self, cell_dep: CellDep) {
		if !self.cell_deps.contains(&cell_dep) {
			self.cell_deps.push(cell_dep);
		}
	}

	/// Spend `input`.
	pub fn push_input(&mut self, input: CellInput) {
		self.inputs.push(input);
	}

	/// Append a recipient output.
	///
	/// # Panics
	///
	/// After a change output was pushed.
	pub fn push_output(&mut self, output: CellOutput, data: Bytes) {
		assert!(self.change_index.is_none(), "recipient output after the change output");

		self.outputs.push(output);
		self.outputs_data.push(data);
	}

	/// Append the change output.
	///
	/// # Panics
	///
	/// If a change output already exists.
	pub fn push_change(&mut self, output: CellOutput, data: Bytes) {
		assert!(self.change_index.is_none(), "duplicate change output");

		self.change_index = Some(self.outputs.len());
		self.outputs.push(output);
		self.outputs_data.push(data);
	}

	/// Sum of all output capacities.
	pub fn outputs_capacity(&self) -> u128 {
		self.outputs.iter().map(|o| o.shannons() as u128).sum()
	}

	/// The unsigned transaction, without header deps or witnesses.
	pub fn to_transaction(&self) -> TransactionView {
		TransactionBuilder::default()
			.cell_deps(self.cell_deps.clone())
			.inputs(self.inputs.clone())
			.outputs(self.outputs.clone())
			.outputs_data(self.outputs_data.iter().map(|d| d.pack()))
			.build()
	}
}
/// Serializes as the node's JSON-RPC `Transaction`.
impl Serialize for TransactionSkeleton {
	fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		json::Transaction::from(self.to_transaction().data()).serialize(serializer)
	}
}

/// An xUDT token: its type script, scale and the cell deps its script needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
	/// The xUDT type script, args included.
	pub script: Script,
	/// Token scale.
	pub decimals: u8,
	/// Deps the type script needs.
	pub cell_deps: Vec<CellDep>,
}

/// Convert a whole CKB amount into an output capacity.
///
/// Amounts below the plain output floor are rejected, the chain would refuse the output anyway.
pub fn value_capacity(amount: &str, policy: &CapacityPolicy) -> Result<Shannon> {
	let capacity = Shannon::try_from(fixed_point::parse(amount, fixed_point::CKB_DECIMALS)?)
		.map_err(|_| AmountError::OutOfRange {
			amount: amount.into(),
			reason: "exceeds 64 bits of shannons",
		})?;
	let minimum = policy.minimum_capacity(false);

	if capacity < minimum {
		return Err(AmountError::BelowMinimumCapacity { amount: capacity, minimum }.into());
	}

	Ok(capacity)
}
#[test]
fn value_capacity_should_work() {
	let p = CapacityPolicy::default();

	assert_eq!(value_capacity("100", &p).unwrap(), 10_000_000_000);
	assert_eq!(value_capacity("61", &p).unwrap(), 6_100_000_000);
	assert_eq!(value_capacity("61.00000001", &p).unwrap(), 6_100_000_001);
	assert!(matches!(
		value_capacity("60.99999999", &p),
		Err(Error::Amount(AmountError::BelowMinimumCapacity {
			amount: 6_099_999_999,
			minimum: 6_100_000_000
		}))
	));
	assert!(matches!(
		value_capacity("184467440738", &p),
		Err(Error::Amount(AmountError::OutOfRange { .. }))
	));
	assert!(value_capacity("ten", &p).is_err());
}

fn warn_if_undersized(policy: &CapacityPolicy, output: &CellOutput, data_len: usize) {
	if !policy.covers(output, data_len) {
		tracing::warn!(
			"capacity floor {} is below the {} shannons occupied by {output}",
			policy.minimum_capacity(output.type_script().is_some()),
			capacity::occupied_capacity(output, data_len)
		);
	}
}

/// Plain capacity transfer to many recipients.
#[derive(Debug)]
pub struct TransferBuilder<'a, C> {
	/// Resolves recipient addresses.
	pub client: &'a C,
	/// Output floors.
	pub policy: &'a CapacityPolicy,
	/// Recipients with whole CKB amounts.
	pub recipients: &'a [Recipient],
}
impl<C> TransferBuilder<'_, C>
where
	C: Client,
{
	/// One plain output per recipient, nothing else.
	pub async fn build(self) -> Result<TransactionSkeleton> {
		let Self { client, policy, recipients } = self;

		if recipients.is_empty() {
			return Err(Error::NoRecipients);
		}

		let capacities = recipients
			.iter()
			.map(|r| value_capacity(&r.amount, policy))
			.collect::<Result<Vec<_>>>()?;
		let mut skeleton = TransactionSkeleton::default();

		for (r, capacity) in recipients.iter().zip(capacities) {
			let lock = client.resolve(&r.address).await?;
			let output = cell_output(capacity, lock, None);

			warn_if_undersized(policy, &output, 0);
			tracing::debug!("output to {}: {capacity} shannons", r.address);

			skeleton.push_output(output, Bytes::new());
		}

		tracing::info!(
			"transfer of {} CKB to {} recipients",
			fixed_point::format(skeleton.outputs_capacity(), fixed_point::CKB_DECIMALS),
			skeleton.recipient_count()
		);

		Ok(skeleton)
	}
}

/// xUDT airdrop to many recipients, with token change back to the sender.
#[derive(Debug)]
pub struct AirdropBuilder<'a, C> {
	/// Resolves addresses and streams the sender's token cells.
	pub client: &'a C,
	/// Output floors.
	pub policy: &'a CapacityPolicy,
	/// Lock of the sending account, also used for the change.
	pub sender: &'a Script,
	/// The token being sent.
	pub token: &'a Token,
	/// Recipients with decimal token amounts.
	pub recipients: &'a [Recipient],
}
impl<C> AirdropBuilder<'_, C>
where
	C: Client,
{
	/// Recipient outputs, token inputs in delivery order, and the token change.
	pub async fn build(self) -> Result<TransactionSkeleton> {
		let Self { client, policy, sender, token, recipients } = self;

		if recipients.is_empty() {
			return Err(Error::NoRecipients);
		}

		let plan = TokenPlan::new(recipients, token.decimals)?;
		let capacity = policy.minimum_capacity(true);
		let mut skeleton = TransactionSkeleton::default();

		for (r, &amount) in recipients.iter().zip(&plan.amounts) {
			let lock = client.resolve(&r.address).await?;
			let output = cell_output(capacity, lock, Some(token.script.clone()));

			warn_if_undersized(policy, &output, codec::AMOUNT_SIZE);
			tracing::debug!("output to {}: {amount} tokens", r.address);

			skeleton.push_output(output, Bytes::copy_from_slice(&codec::encode_amount(amount)));
		}

		token.cell_deps.iter().cloned().for_each(|d| skeleton.push_cell_dep(d));

		let selection = selector::select_cells(
			client.find_cells(sender, Some(&token.script)),
			plan.required,
			Measure::Token,
		)
		.await?;

		selection.inputs.into_iter().for_each(|i| skeleton.push_input(i));

		if let Some(change) = plan.change(selection.total) {
			let output = cell_output(capacity, sender.clone(), Some(token.script.clone()));

			warn_if_undersized(policy, &output, codec::AMOUNT_SIZE);
			tracing::info!("token change: {change}");

			skeleton.push_change(output, Bytes::copy_from_slice(&codec::encode_amount(change)));
		}

		Ok(skeleton)
	}
}
