//! End-to-end batch operations.

// self
use crate::{
	assembler::{AirdropBuilder, TransactionSkeleton, TransferBuilder},
	client::{Client, Signer},
	conf::Conf,
	prelude::*,
	types::*,
};

/// One engine call builds, completes, signs and broadcasts a single transaction.
///
/// Every failure aborts the whole call. Nothing is retried here; callers that want a retry issue a
/// fresh call.
#[derive(Debug)]
pub struct Engine<'a, C, S> {
	pub client: &'a C,
	pub signer: &'a S,
	pub conf: &'a Conf,
}
impl<C, S> Engine<'_, C, S>
where
	C: Client,
	S: Signer,
{
	pub async fn send(&self, recipients: &[Recipient], mode: &Mode) -> Result<String> {
		match mode {
			Mode::Value => self.transfer(recipients).await,
			Mode::Token { args, decimals } => self.airdrop(recipients, args, *decimals).await,
		}
	}

	/// Send whole CKB amounts to every recipient.
	pub async fn transfer(&self, recipients: &[Recipient]) -> Result<String> {
		let skeleton =
			TransferBuilder { client: self.client, policy: &self.conf.capacity, recipients }
				.build()
				.await?;

		self.submit(skeleton).await
	}

	/// Send xUDT amounts, scaled by `decimals`, to every recipient.
	pub async fn airdrop(
		&self,
		recipients: &[Recipient],
		token_args: &str,
		decimals: u8,
	) -> Result<String> {
		let token = self.conf.xudt.token(token_args, decimals)?;
		let sender = self.signer.lock().await?;
		let skeleton = AirdropBuilder {
			client: self.client,
			policy: &self.conf.capacity,
			sender: &sender,
			token: &token,
			recipients,
		}
		.build()
		.await?;

		self.submit(skeleton).await
	}

	async fn submit(&self, skeleton: TransactionSkeleton) -> Result<String> {
		if tracing::enabled!(tracing::Level::DEBUG) {
			let json = serde_json::to_string(&skeleton)?;

			tracing::debug!("skeleton: {json}");
		}

		let signed = self.signer.complete(skeleton, self.conf.fee_rate).await?;
		let tx_hash = self.signer.broadcast(signed).await?;

		tracing::info!("sent transaction {tx_hash}");

		Ok(tx_hash)
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::{codec, mock::*};

	const TOKEN_ARGS: &str = "0x0909090909090909090909090909090909090909090909090909090909090909";

	fn conf() -> Conf {
		let mut conf = Conf::default();

		conf.xudt.code_hash = XUDT_CODE_HASH;

		conf
	}

	fn chain() -> MemoryChain {
		MemoryChain::default().with_address("alice", lock(2)).with_address("bob", lock(3))
	}

	fn token_mode() -> Mode {
		Mode::Token { args: TOKEN_ARGS.into(), decimals: 8 }
	}

	#[tokio::test]
	async fn value_transfer_should_work() {
		init_tracing();

		let (chain, signer, conf) = (chain(), MemorySigner::new(lock(1)), conf());
		let engine = Engine { client: &chain, signer: &signer, conf: &conf };
		let tx_hash = engine
			.send(&[Recipient::new("alice", "100"), Recipient::new("bob", "200")], &Mode::Value)
			.await
			.unwrap();
		let skeleton = signer.skeleton();

		assert_eq!(tx_hash, MemorySigner::TX_HASH);
		assert_eq!(signer.completed.borrow().as_ref().unwrap().1, 1000);
		assert_eq!(
			skeleton.outputs().iter().map(CellOutputExt::shannons).collect::<Vec<_>>(),
			[100 * ONE_CKB, 200 * ONE_CKB]
		);
		assert!(skeleton.outputs().iter().all(|o| o.type_script().is_none()));
		assert!(skeleton.outputs_data().iter().all(|d| d.is_empty()));
	}

	#[tokio::test]
	async fn value_amount_below_floor_should_be_rejected() {
		let (chain, signer, conf) = (chain(), MemorySigner::new(lock(1)), conf());
		let engine = Engine { client: &chain, signer: &signer, conf: &conf };
		let e = engine
			.send(&[Recipient::new("alice", "100"), Recipient::new("bob", "60")], &Mode::Value)
			.await
			.unwrap_err();

		assert!(matches!(e, Error::Amount(AmountError::BelowMinimumCapacity { .. })));
		assert!(signer.completed.borrow().is_none());
	}

	#[tokio::test]
	async fn exact_token_balance_should_not_create_change() {
		init_tracing();

		let chain = chain()
			.with_cell(token_cell(0, &lock(1), &xudt(9), 100_000_000))
			.with_cell(token_cell(1, &lock(1), &xudt(9), 50_000_000));
		let (signer, conf) = (MemorySigner::new(lock(1)), conf());
		let engine = Engine { client: &chain, signer: &signer, conf: &conf };

		engine.send(&[Recipient::new("alice", "1.5")], &token_mode()).await.unwrap();

		let skeleton = signer.skeleton();

		assert_eq!(chain.pulled(), 2);
		assert_eq!(skeleton.inputs().len(), 2);
		assert_eq!(skeleton.outputs().len(), 1);
		assert_eq!(skeleton.change_index(), None);
		assert_eq!(codec::decode_amount(&skeleton.outputs_data()[0]), 150_000_000);
		assert_eq!(skeleton.outputs()[0].lock(), lock(2));
		assert_eq!(skeleton.outputs()[0].type_script(), Some(xudt(9)));
		assert_eq!(skeleton.cell_deps().len(), 1);
	}

	#[tokio::test]
	async fn surplus_token_balance_should_create_change() {
		let chain = chain()
			.with_cell(token_cell(0, &lock(1), &xudt(9), 200_000_000))
			.with_cell(token_cell(1, &lock(1), &xudt(9), 50_000_000));
		let (signer, conf) = (MemorySigner::new(lock(1)), conf());
		let engine = Engine { client: &chain, signer: &signer, conf: &conf };

		engine.send(&[Recipient::new("alice", "1.5")], &token_mode()).await.unwrap();

		let skeleton = signer.skeleton();
		let change = &skeleton.outputs()[1];

		assert_eq!(chain.pulled(), 1);
		assert_eq!(skeleton.inputs(), [CellInput::new(out_point(0), 0)]);
		assert_eq!(skeleton.change_index(), Some(1));
		assert_eq!(skeleton.recipient_count(), 1);
		assert_eq!(change.lock(), lock(1));
		assert_eq!(change.type_script(), Some(xudt(9)));
		assert_eq!(change.shannons(), 162 * ONE_CKB);
		assert_eq!(codec::decode_amount(&skeleton.outputs_data()[1]), 50_000_000);
	}

	#[tokio::test]
	async fn insufficient_token_balance_should_abort() {
		let chain = chain().with_cell(token_cell(0, &lock(1), &xudt(9), 100_000_000));
		let (signer, conf) = (MemorySigner::new(lock(1)), conf());
		let engine = Engine { client: &chain, signer: &signer, conf: &conf };
		let e = engine
			.airdrop(&[Recipient::new("alice", "1"), Recipient::new("bob", "0.5")], TOKEN_ARGS, 8)
			.await
			.unwrap_err();

		assert!(matches!(
			e,
			Error::Chain(ChainError::InsufficientBalance {
				required: 150_000_000,
				available: 100_000_000
			})
		));
		assert!(signer.completed.borrow().is_none());
	}

	#[tokio::test]
	async fn broadcast_failure_should_pass_through() {
		let (chain, conf) = (chain(), conf());
		let signer = MemorySigner { reject: true, ..MemorySigner::new(lock(1)) };
		let engine = Engine { client: &chain, signer: &signer, conf: &conf };
		let e = engine.transfer(&[Recipient::new("alice", "100")]).await.unwrap_err();

		assert!(matches!(e, Error::Client(_)));
		assert!(e.to_string().contains("PoolRejectedTransactionByMinFeeRate"));
	}

	#[tokio::test]
	async fn bad_token_args_should_be_rejected() {
		let (chain, signer, conf) = (chain(), MemorySigner::new(lock(1)), conf());
		let engine = Engine { client: &chain, signer: &signer, conf: &conf };
		let e = engine.airdrop(&[Recipient::new("alice", "1")], "0xnothex", 8).await.unwrap_err();

		assert!(matches!(e, Error::ArrayBytes(_)));
	}
}
