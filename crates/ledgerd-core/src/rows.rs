// Copyright (c) ledgerd.dev 2026
// This file is licensed under the Apache-2.0 license, see license.md file

use chrono::{DateTime, Utc};
use ledgerd_type::{AccountPath, Amount, EntryId, Operation, TransactionId};

use crate::metadata::Metadata;

/// An immutable, committed entry as persisted by the store. Carries every
/// attribute of the in-memory [`crate::Entry`] plus the fields assigned at
/// commit time.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredEntry {
	pub id: EntryId,
	pub transaction_id: TransactionId,
	pub account: AccountPath,
	pub operation: Operation,
	pub amount: Amount,
	pub version: u64,
	pub event: u32,
	pub company: String,
	pub competence_date: DateTime<Utc>,
	pub metadata: Metadata,
	pub created_at: DateTime<Utc>,
}

impl StoredEntry {
	pub fn signed_delta(&self) -> i64 {
		self.operation.sign() * self.amount.get() as i64
	}
}

/// The version-registry row for a single analytical account. Mutated only
/// by the committer, inside the commit critical section; never deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct VersionRow {
	pub account: AccountPath,
	pub current: u64,
	pub last_competence_date: DateTime<Utc>,
}

/// A cached balance for a path (analytical or a literal synthetic query
/// expression), valid up to `tx_date`. Absent until the first read after a
/// commit touches the path; updated by the balance engine on read.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotRow {
	pub key: String,
	pub balance: i64,
	pub tx_date: Option<DateTime<Utc>>,
}

impl SnapshotRow {
	pub fn empty(key: impl Into<String>) -> Self {
		Self { key: key.into(), balance: 0, tx_date: None }
	}
}
