// Copyright (c) ledgerd.dev 2026
// This file is licensed under the Apache-2.0 license, see license.md file

use std::sync::Arc;

use ledgerd_core::SnapshotRow;
use ledgerd_diagnostic::{Error, Kind};
use ledgerd_store::LedgerStore;
use ledgerd_type::{AccountPath, AccountVersion, SYNTHETIC_VERSION};

/// The balance a reader sees: the net signed total plus the version it was
/// computed against.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountBalance {
	pub balance: i64,
	pub version: AccountVersion,
}

/// Computes analytical and synthetic balances from the snapshot cache plus
/// whatever entries were committed after the cached watermark, amortizing
/// the cost of a balance read to the entries written since the last one.
pub struct BalanceEngine<S: LedgerStore> {
	store: Arc<S>,
}

impl<S: LedgerStore> BalanceEngine<S> {
	pub fn new(store: Arc<S>) -> Self {
		Self { store }
	}

	#[tracing::instrument(skip(self), fields(account = %account))]
	pub async fn analytical_balance(&self, account: &AccountPath) -> Result<AccountBalance, Error> {
		let key = account.as_str();
		let snapshot = self.store.snapshot(key).await?;
		let watermark = snapshot.as_ref().and_then(|row| row.tx_date);
		let new_entries = self.store.entries_for_account_since(account, watermark).await?;

		if snapshot.is_none() && !self.store.has_any_entry_for_account(account).await? {
			return Err(Error::from(Kind::AccountNotFound).context(format!("account {key}")));
		}

		let delta: i64 = new_entries.iter().map(|entry| entry.signed_delta()).sum();
		let balance = snapshot.as_ref().map(|row| row.balance).unwrap_or(0) + delta;
		let watermark = new_entries.last().map(|entry| entry.created_at).or(watermark);

		self.store.put_snapshot(SnapshotRow { key: key.to_string(), balance, tx_date: watermark }).await?;

		let version_row = self.store.account_version(account).await?;
		let version = version_row
			.map(|row| AccountVersion(row.current))
			.ok_or_else(|| Error::internal("balance computed but version row is absent"))?;

		Ok(AccountBalance { balance, version })
	}

	#[tracing::instrument(skip(self), fields(query = %query))]
	pub async fn synthetic_balance(&self, query: &AccountPath) -> Result<AccountBalance, Error> {
		let key = query.as_str();
		let snapshot = self.store.snapshot(key).await?;
		let watermark = snapshot.as_ref().and_then(|row| row.tx_date);
		let new_entries = self.store.entries_for_subtree_since(query, watermark).await?;

		if snapshot.is_none() && !self.store.has_any_entry_for_subtree(query).await? {
			return Err(Error::from(Kind::AccountNotFound).context(format!("synthetic query {key}")));
		}

		let delta: i64 = new_entries.iter().map(|entry| entry.signed_delta()).sum();
		let balance = snapshot.as_ref().map(|row| row.balance).unwrap_or(0) + delta;
		let watermark = new_entries.last().map(|entry| entry.created_at).or(watermark);

		self.store.put_snapshot(SnapshotRow { key: key.to_string(), balance, tx_date: watermark }).await?;

		Ok(AccountBalance { balance, version: SYNTHETIC_VERSION })
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::{DateTime, Utc};
	use ledgerd_core::{Entry, Transaction};
	use ledgerd_store::MemoryStore;
	use ledgerd_type::{Amount, ExpectedVersion, Operation, Uuid};

	fn now() -> DateTime<Utc> {
		DateTime::parse_from_rfc3339("2026-01-01T00:00:00Z").unwrap().with_timezone(&Utc)
	}

	async fn seeded_store() -> Arc<MemoryStore> {
		let store = Arc::new(MemoryStore::new());
		let entries = vec![
			Entry::new(
				Uuid::parse_str("11111111-1111-1111-1111-111111111111").unwrap(),
				"liability.clients.u1",
				Operation::Debit,
				Amount::new(100).unwrap(),
				ExpectedVersion::Next,
				Default::default(),
			)
			.unwrap(),
			Entry::new(
				Uuid::parse_str("22222222-2222-2222-2222-222222222222").unwrap(),
				"asset.company.main",
				Operation::Credit,
				Amount::new(100).unwrap(),
				ExpectedVersion::Next,
				Default::default(),
			)
			.unwrap(),
		];
		let tx = Transaction::new(
			Uuid::parse_str("33333333-3333-3333-3333-333333333333").unwrap(),
			1,
			"acme",
			now(),
			entries,
			now(),
		)
		.unwrap();
		store.commit(tx).await.unwrap();
		store
	}

	#[tokio::test]
	async fn analytical_balance_sums_signed_deltas() {
		let store = seeded_store().await;
		let engine = BalanceEngine::new(store);
		let account = AccountPath::parse("liability.clients.u1").unwrap();
		let balance = engine.analytical_balance(&account).await.unwrap();
		assert_eq!(balance.balance, -100);
		assert_eq!(balance.version, AccountVersion(1));
	}

	#[tokio::test]
	async fn unknown_account_not_found() {
		let store = Arc::new(MemoryStore::new());
		let engine = BalanceEngine::new(store);
		let account = AccountPath::parse("liability.clients.ghost").unwrap();
		let err = engine.analytical_balance(&account).await.unwrap_err();
		assert!(err.is(&Kind::AccountNotFound));
	}

	#[tokio::test]
	async fn synthetic_balance_aggregates_subtree() {
		let store = seeded_store().await;
		let engine = BalanceEngine::new(store);
		let query = AccountPath::parse("liability.clients.*").unwrap();
		let balance = engine.synthetic_balance(&query).await.unwrap();
		assert_eq!(balance.balance, -100);
		assert!(balance.version.is_synthetic_sentinel());
	}
}
