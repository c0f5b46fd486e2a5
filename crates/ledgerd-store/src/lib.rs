// Copyright (c) ledgerd.dev 2026
// This file is licensed under the Apache-2.0 license, see license.md file

//! Storage capability abstraction for the ledger engine.
//!
//! [`LedgerStore`] is the seam between the engine (version registry,
//! committer, balance engine, pager, reporter) and whatever durably holds
//! entries. [`MemoryStore`] is the only implementation shipped here: an
//! in-process, append-only stand-in for a relational backend. A SQL-backed
//! implementation is a drop-in replacement behind the same trait.

mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ledgerd_core::{StoredEntry, Transaction, VersionRow};
use ledgerd_diagnostic::Error;
use ledgerd_type::{AccountPath, Operation};

pub use memory::MemoryStore;

/// Filters and pagination state for [`LedgerStore::list_entries`].
#[derive(Debug, Clone)]
pub struct ListEntriesQuery {
	pub account: AccountPath,
	pub start: DateTime<Utc>,
	pub end: DateTime<Utc>,
	pub companies: Vec<String>,
	pub events: Vec<u32>,
	pub operation: Option<Operation>,
	pub cursor: Option<(DateTime<Utc>, u64)>,
	pub size: usize,
}

/// One group of a synthetic report: the subpath key plus its summed credit
/// and debit movements for the requested window.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportGroup {
	pub key: String,
	pub credit: i64,
	pub debit: i64,
}

/// The storage capability set the engine depends on. Every method is a pure
/// read or a single atomic write; none of them encode business rules beyond
/// "is this write internally consistent" (balance, idempotency, version
/// ordering are validated by the caller or, for commit, enforced here as
/// the atomicity boundary).
#[async_trait]
pub trait LedgerStore: Send + Sync {
	/// The current version-registry row for an analytical account, or
	/// `None` if the account has never been written to.
	async fn account_version(&self, account: &AccountPath) -> Result<Option<VersionRow>, Error>;

	/// Commits a balanced, validated transaction. Either every entry is
	/// durably written with a freshly assigned version, or nothing is:
	/// idempotency-key collisions and optimistic-version mismatches abort
	/// the whole write with no partial state observable by later reads.
	async fn commit(&self, tx: Transaction) -> Result<Vec<StoredEntry>, Error>;

	/// The cached balance snapshot for `key` (an analytical account path or
	/// a literal synthetic query expression), if one has been written yet.
	async fn snapshot(&self, key: &str) -> Result<Option<ledgerd_core::SnapshotRow>, Error>;

	/// Overwrites the cached balance snapshot for `row.key`.
	async fn put_snapshot(&self, row: ledgerd_core::SnapshotRow) -> Result<(), Error>;

	/// Entries committed against exactly `account`, strictly newer than
	/// `since` (or all of them, if `since` is `None`), oldest first.
	async fn entries_for_account_since(
		&self,
		account: &AccountPath,
		since: Option<DateTime<Utc>>,
	) -> Result<Vec<StoredEntry>, Error>;

	/// Entries committed against any analytical account matched by the
	/// synthetic `query` path, strictly newer than `since`, oldest first.
	async fn entries_for_subtree_since(
		&self,
		query: &AccountPath,
		since: Option<DateTime<Utc>>,
	) -> Result<Vec<StoredEntry>, Error>;

	/// Whether any entry has ever been committed against `account`.
	async fn has_any_entry_for_account(&self, account: &AccountPath) -> Result<bool, Error>;

	/// Whether any entry has ever been committed against the subtree
	/// matched by `query`.
	async fn has_any_entry_for_subtree(&self, query: &AccountPath) -> Result<bool, Error>;

	/// A page of entries for `req.account`, ordered by
	/// `(competence_date DESC, version DESC)`. Returns the page plus the
	/// `(competence_date, version)` boundary to carry into the next
	/// query's cursor, or `None` once exhausted.
	async fn list_entries(
		&self,
		req: ListEntriesQuery,
	) -> Result<(Vec<StoredEntry>, Option<(DateTime<Utc>, u64)>), Error>;

	/// Credit/debit sums for every analytical account matched by `query`,
	/// grouped by the `level`-th path component, restricted to entries
	/// with `start <= competence_date < end`.
	async fn report(
		&self,
		query: &AccountPath,
		level: usize,
		start: DateTime<Utc>,
		end: DateTime<Utc>,
	) -> Result<Vec<ReportGroup>, Error>;
}
