// Copyright (c) ledgerd.dev 2026
// This file is licensed under the Apache-2.0 license, see license.md file

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::{DashMap, DashSet};
use ledgerd_core::{SnapshotRow, StoredEntry, Transaction, VersionRow};
use ledgerd_diagnostic::{Error, Kind};
use ledgerd_type::{AccountPath, EntryId, ExpectedVersion};
use parking_lot::Mutex;

use crate::{LedgerStore, ListEntriesQuery, ReportGroup};

/// In-process, append-only [`LedgerStore`]. Stands in for a relational
/// backend: entries are never mutated or deleted once committed, and every
/// read derives its answer from that log plus the incremental snapshot
/// cache.
///
/// Concurrency: touched accounts are locked in the caller-supplied sorted
/// order for the duration of a commit, so two transactions over disjoint
/// accounts make independent progress; two transactions that share an
/// account serialize on that account's lock. Idempotency-key registration
/// uses `DashSet::insert`'s own per-key atomicity and needs no extra lock.
pub struct MemoryStore {
	versions: DashMap<String, VersionRow>,
	entries_by_account: DashMap<String, Vec<StoredEntry>>,
	entry_ids: DashSet<EntryId>,
	snapshots: DashMap<String, SnapshotRow>,
	account_locks: DashMap<String, Arc<Mutex<()>>>,
	last_created_at_nanos: AtomicI64,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self {
			versions: DashMap::new(),
			entries_by_account: DashMap::new(),
			entry_ids: DashSet::new(),
			snapshots: DashMap::new(),
			account_locks: DashMap::new(),
			last_created_at_nanos: AtomicI64::new(0),
		}
	}

	fn account_lock(&self, account: &str) -> Arc<Mutex<()>> {
		self.account_locks.entry(account.to_string()).or_insert_with(|| Arc::new(Mutex::new(()))).clone()
	}

	/// A commit timestamp strictly greater than every timestamp handed out
	/// before it, even under concurrent commits racing the wall clock.
	fn next_created_at(&self) -> DateTime<Utc> {
		let wall_clock = Utc::now().timestamp_nanos_opt().unwrap_or(0);
		let assigned = self
			.last_created_at_nanos
			.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |prev| Some(wall_clock.max(prev + 1)))
			.unwrap();
		DateTime::from_timestamp_nanos(wall_clock.max(assigned))
	}

	fn entries_matching<'a>(
		&self,
		accounts: impl Iterator<Item = String> + 'a,
	) -> Vec<StoredEntry> {
		let mut out = Vec::new();
		for account in accounts {
			if let Some(rows) = self.entries_by_account.get(&account) {
				out.extend(rows.iter().cloned());
			}
		}
		out
	}

	fn matching_accounts(&self, query: &AccountPath) -> Vec<String> {
		self.entries_by_account
			.iter()
			.map(|entry| entry.key().clone())
			.filter(|key| {
				AccountPath::parse(key.as_str())
					.ok()
					.is_some_and(|candidate| query.matches_subtree(&candidate))
			})
			.collect()
	}
}

impl Default for MemoryStore {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl LedgerStore for MemoryStore {
	async fn account_version(&self, account: &AccountPath) -> Result<Option<VersionRow>, Error> {
		Ok(self.versions.get(account.as_str()).map(|row| row.clone()))
	}

	#[tracing::instrument(skip(self, tx), fields(transaction_id = %tx.id))]
	async fn commit(&self, tx: Transaction) -> Result<Vec<StoredEntry>, Error> {
		let accounts = tx.accounts_sorted();
		let locks: Vec<Arc<Mutex<()>>> =
			accounts.iter().map(|account| self.account_lock(account.as_str())).collect();
		let _guards: Vec<_> = locks.iter().map(|lock| lock.lock()).collect();

		let mut inserted_ids = Vec::with_capacity(tx.entries.len());
		for entry in &tx.entries {
			if self.entry_ids.insert(entry.id) {
				inserted_ids.push(entry.id);
			} else {
				for id in &inserted_ids {
					self.entry_ids.remove(id);
				}
				return Err(Error::from(Kind::IdempotencyKeyViolation)
					.context(format!("entry {}", entry.id)));
			}
		}

		let mut running: HashMap<String, u64> = HashMap::new();
		for account in &accounts {
			let current = self.versions.get(account.as_str()).map(|row| row.current).unwrap_or(0);
			running.insert(account.as_str().to_string(), current);
		}

		let mut assigned = Vec::with_capacity(tx.entries.len());
		for entry in &tx.entries {
			let key = entry.account.as_str().to_string();
			let current = *running.get(&key).expect("account seeded above");
			let satisfied = match entry.expected_version {
				ExpectedVersion::Ignore => true,
				ExpectedVersion::Next => current == 0,
				ExpectedVersion::Exact(expected) => expected == current,
			};
			if !satisfied {
				for id in &inserted_ids {
					self.entry_ids.remove(id);
				}
				return Err(Error::from(Kind::InvalidVersion)
					.context(format!("account {} is at version {}", key, current)));
			}
			let next = current + 1;
			running.insert(key, next);
			assigned.push(next);
		}

		let created_at = self.next_created_at();
		let mut stored = Vec::with_capacity(tx.entries.len());
		for (entry, version) in tx.entries.iter().zip(assigned.iter()) {
			stored.push(StoredEntry {
				id: entry.id,
				transaction_id: tx.id,
				account: entry.account.clone(),
				operation: entry.operation,
				amount: entry.amount,
				version: *version,
				event: tx.event,
				company: tx.company.clone(),
				competence_date: tx.competence_date,
				metadata: entry.metadata.clone(),
				created_at,
			});
		}

		for account in &accounts {
			let key = account.as_str().to_string();
			let current = *running.get(&key).expect("account seeded above");
			self.versions.insert(
				key,
				VersionRow {
					account: (*account).clone(),
					current,
					last_competence_date: tx.competence_date,
				},
			);
		}

		for row in &stored {
			self.entries_by_account.entry(row.account.as_str().to_string()).or_default().push(row.clone());
		}

		Ok(stored)
	}

	async fn snapshot(&self, key: &str) -> Result<Option<SnapshotRow>, Error> {
		Ok(self.snapshots.get(key).map(|row| row.clone()))
	}

	async fn put_snapshot(&self, row: SnapshotRow) -> Result<(), Error> {
		self.snapshots.insert(row.key.clone(), row);
		Ok(())
	}

	async fn entries_for_account_since(
		&self,
		account: &AccountPath,
		since: Option<DateTime<Utc>>,
	) -> Result<Vec<StoredEntry>, Error> {
		let mut rows = self.entries_by_account.get(account.as_str()).map(|r| r.clone()).unwrap_or_default();
		if let Some(since) = since {
			rows.retain(|row| row.created_at > since);
		}
		Ok(rows)
	}

	async fn entries_for_subtree_since(
		&self,
		query: &AccountPath,
		since: Option<DateTime<Utc>>,
	) -> Result<Vec<StoredEntry>, Error> {
		let mut rows = self.entries_matching(self.matching_accounts(query).into_iter());
		if let Some(since) = since {
			rows.retain(|row| row.created_at > since);
		}
		rows.sort_by_key(|row| row.created_at);
		Ok(rows)
	}

	async fn has_any_entry_for_account(&self, account: &AccountPath) -> Result<bool, Error> {
		Ok(self.entries_by_account.get(account.as_str()).is_some_and(|rows| !rows.is_empty()))
	}

	async fn has_any_entry_for_subtree(&self, query: &AccountPath) -> Result<bool, Error> {
		Ok(self.matching_accounts(query).iter().any(|account| {
			self.entries_by_account.get(account).is_some_and(|rows| !rows.is_empty())
		}))
	}

	async fn list_entries(
		&self,
		req: ListEntriesQuery,
	) -> Result<(Vec<StoredEntry>, Option<(DateTime<Utc>, u64)>), Error> {
		let mut rows =
			self.entries_by_account.get(req.account.as_str()).map(|r| r.clone()).unwrap_or_default();

		rows.retain(|row| row.competence_date >= req.start && row.competence_date < req.end);
		if !req.companies.is_empty() {
			rows.retain(|row| req.companies.contains(&row.company));
		}
		if !req.events.is_empty() {
			rows.retain(|row| req.events.contains(&row.event));
		}
		if let Some(operation) = req.operation {
			rows.retain(|row| row.operation == operation);
		}

		rows.sort_by(|a, b| b.competence_date.cmp(&a.competence_date).then(b.version.cmp(&a.version)));

		if let Some((cursor_date, cursor_version)) = req.cursor {
			rows.retain(|row| (row.competence_date, row.version) <= (cursor_date, cursor_version));
		}

		let take = req.size.saturating_add(1);
		if rows.len() > take {
			rows.truncate(take);
		}

		if rows.len() <= req.size {
			Ok((rows, None))
		} else {
			let boundary = rows[req.size].clone();
			rows.truncate(req.size);
			Ok((rows, Some((boundary.competence_date, boundary.version))))
		}
	}

	async fn report(
		&self,
		query: &AccountPath,
		level: usize,
		start: DateTime<Utc>,
		end: DateTime<Utc>,
	) -> Result<Vec<ReportGroup>, Error> {
		let mut groups: HashMap<String, (i64, i64)> = HashMap::new();
		for account in self.matching_accounts(query) {
			let parsed = AccountPath::parse(account.as_str())
				.map_err(|_| Error::internal("corrupt account key in store"))?;
			let Some(group_key) = parsed.subpath(level) else {
				continue;
			};
			let Some(rows) = self.entries_by_account.get(&account) else {
				continue;
			};
			let entry = groups.entry(group_key).or_insert((0, 0));
			for row in rows.iter() {
				if row.competence_date < start || row.competence_date >= end {
					continue;
				}
				match row.operation {
					ledgerd_type::Operation::Credit => entry.0 += row.amount.get() as i64,
					ledgerd_type::Operation::Debit => entry.1 += row.amount.get() as i64,
				}
			}
		}

		let mut out: Vec<ReportGroup> =
			groups.into_iter().map(|(key, (credit, debit))| ReportGroup { key, credit, debit }).collect();
		out.sort_by(|a, b| a.key.cmp(&b.key));
		Ok(out)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use ledgerd_core::Entry;
	use ledgerd_type::{Amount, Operation, Uuid};

	fn entry(id: &str, account: &str, op: Operation, amount: u64, expected: ExpectedVersion) -> Entry {
		Entry::new(Uuid::parse_str(id).unwrap(), account, op, Amount::new(amount).unwrap(), expected, Default::default())
			.unwrap()
	}

	fn now() -> DateTime<Utc> {
		DateTime::parse_from_rfc3339("2026-01-01T00:00:00Z").unwrap().with_timezone(&Utc)
	}

	fn balanced_tx(id: &str, entries: Vec<Entry>) -> Transaction {
		Transaction::new(Uuid::parse_str(id).unwrap(), 1, "acme", now(), entries, now()).unwrap()
	}

	#[tokio::test]
	async fn commit_assigns_sequential_versions() {
		let store = MemoryStore::new();
		let tx = balanced_tx(
			"33333333-3333-3333-3333-333333333333",
			vec![
				entry(
					"11111111-1111-1111-1111-111111111111",
					"liability.clients.u1",
					Operation::Debit,
					100,
					ExpectedVersion::Next,
				),
				entry(
					"22222222-2222-2222-2222-222222222222",
					"asset.company.main",
					Operation::Credit,
					100,
					ExpectedVersion::Next,
				),
			],
		);
		let stored = store.commit(tx).await.unwrap();
		assert_eq!(stored.len(), 2);
		let account = AccountPath::parse("liability.clients.u1").unwrap();
		let version = store.account_version(&account).await.unwrap().unwrap();
		assert_eq!(version.current, 1);
	}

	#[tokio::test]
	async fn duplicate_entry_id_across_transactions_is_rejected() {
		let store = MemoryStore::new();
		let first = balanced_tx(
			"33333333-3333-3333-3333-333333333333",
			vec![
				entry(
					"11111111-1111-1111-1111-111111111111",
					"liability.clients.u1",
					Operation::Debit,
					100,
					ExpectedVersion::Next,
				),
				entry(
					"22222222-2222-2222-2222-222222222222",
					"asset.company.main",
					Operation::Credit,
					100,
					ExpectedVersion::Next,
				),
			],
		);
		store.commit(first).await.unwrap();

		let second = balanced_tx(
			"44444444-4444-4444-4444-444444444444",
			vec![
				entry(
					"11111111-1111-1111-1111-111111111111",
					"liability.clients.u2",
					Operation::Debit,
					50,
					ExpectedVersion::Next,
				),
				entry(
					"55555555-5555-5555-5555-555555555555",
					"asset.company.main",
					Operation::Credit,
					50,
					ExpectedVersion::Exact(1),
				),
			],
		);
		let err = store.commit(second).await.unwrap_err();
		assert!(err.is(&Kind::IdempotencyKeyViolation));
	}

	#[tokio::test]
	async fn exact_version_mismatch_is_rejected() {
		let store = MemoryStore::new();
		let tx = balanced_tx(
			"33333333-3333-3333-3333-333333333333",
			vec![
				entry(
					"11111111-1111-1111-1111-111111111111",
					"liability.clients.u1",
					Operation::Debit,
					100,
					ExpectedVersion::Exact(5),
				),
				entry(
					"22222222-2222-2222-2222-222222222222",
					"asset.company.main",
					Operation::Credit,
					100,
					ExpectedVersion::Next,
				),
			],
		);
		let err = store.commit(tx).await.unwrap_err();
		assert!(err.is(&Kind::InvalidVersion));
	}

	#[tokio::test]
	async fn subtree_report_groups_by_level() {
		let store = MemoryStore::new();
		let tx = balanced_tx(
			"33333333-3333-3333-3333-333333333333",
			vec![
				entry(
					"11111111-1111-1111-1111-111111111111",
					"liability.clients.u1",
					Operation::Debit,
					100,
					ExpectedVersion::Next,
				),
				entry(
					"22222222-2222-2222-2222-222222222222",
					"asset.company.main",
					Operation::Credit,
					100,
					ExpectedVersion::Next,
				),
			],
		);
		store.commit(tx).await.unwrap();

		let query = AccountPath::parse("liability.clients.*").unwrap();
		let groups = store
			.report(&query, 2, now() - chrono::Duration::days(1), now() + chrono::Duration::days(1))
			.await
			.unwrap();
		assert_eq!(groups.len(), 1);
		assert_eq!(groups[0].key, "liability.clients");
		assert_eq!(groups[0].debit, 100);
	}
}
