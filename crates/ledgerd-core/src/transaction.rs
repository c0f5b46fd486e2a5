// Copyright (c) ledgerd.dev 2026
// This file is licensed under the Apache-2.0 license, see license.md file

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use ledgerd_diagnostic::{Error, Kind};
use ledgerd_type::{Operation, TransactionId, Uuid};

use crate::entry::Entry;

/// An atomic, balanced group of entries, as submitted by a client before
/// commit.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
	pub id: TransactionId,
	pub event: u32,
	pub company: String,
	pub competence_date: DateTime<Utc>,
	pub entries: Vec<Entry>,
}

impl Transaction {
	/// Validates and constructs a transaction against `now`, the commit
	/// wall-clock used to reject future-dated competence dates.
	pub fn new(
		id: TransactionId,
		event: u32,
		company: impl Into<String>,
		competence_date: DateTime<Utc>,
		entries: Vec<Entry>,
		now: DateTime<Utc>,
	) -> Result<Self, Error> {
		if id.is_nil() {
			return Err(Kind::InvalidTransactionId.into());
		}

		if entries.len() < 2 {
			return Err(Kind::InvalidEntriesNumber.into());
		}

		if competence_date > now {
			return Err(Kind::FutureCompetenceDate.into());
		}

		let mut seen = HashSet::with_capacity(entries.len());
		for entry in &entries {
			if !seen.insert(entry.id) {
				return Err(Kind::DuplicateEntryId.into());
			}
		}

		let mut total_credit: i128 = 0;
		let mut total_debit: i128 = 0;
		for entry in &entries {
			let amount = entry.amount.get() as i128;
			match entry.operation {
				Operation::Credit => total_credit += amount,
				Operation::Debit => total_debit += amount,
			}
		}

		if total_credit == 0 || total_debit == 0 || total_credit != total_debit {
			return Err(Kind::InvalidBalance.into());
		}

		Ok(Self { id, event, company: company.into(), competence_date, entries })
	}

	/// Distinct analytical accounts touched by this transaction, sorted
	/// ascending by path so the committer can lock them in a deadlock-free
	/// order.
	pub fn accounts_sorted(&self) -> Vec<&ledgerd_type::AccountPath> {
		let mut accounts: Vec<&ledgerd_type::AccountPath> =
			self.entries.iter().map(|e| &e.account).collect();
		accounts.sort_by(|a, b| a.as_str().cmp(b.as_str()));
		accounts.dedup_by(|a, b| a.as_str() == b.as_str());
		accounts
	}
}

/// Parses a raw transaction id string, rejecting unparseable or nil UUIDs.
pub fn parse_transaction_id(raw: &str) -> Result<Uuid, Error> {
	crate::entry::parse_id(raw, Kind::InvalidTransactionId)
}

#[cfg(test)]
mod tests {
	use super::*;
	use ledgerd_type::{Amount, ExpectedVersion};

	fn entry(id: &str, account: &str, op: Operation, amount: u64) -> Entry {
		Entry::new(
			Uuid::parse_str(id).unwrap(),
			account,
			op,
			Amount::new(amount).unwrap(),
			ExpectedVersion::Next,
			crate::metadata::Metadata::empty(),
		)
		.unwrap()
	}

	fn now() -> DateTime<Utc> {
		DateTime::parse_from_rfc3339("2026-01-01T00:00:00Z").unwrap().with_timezone(&Utc)
	}

	#[test]
	fn balanced_transaction_commits() {
		let entries = vec![
			entry(
				"11111111-1111-1111-1111-111111111111",
				"liability.clients.u1",
				Operation::Debit,
				100,
			),
			entry(
				"22222222-2222-2222-2222-222222222222",
				"asset.company.main",
				Operation::Credit,
				100,
			),
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
		assert_eq!(tx.accounts_sorted().len(), 2);
	}

	#[test]
	fn unbalanced_transaction_rejected() {
		let entries = vec![
			entry(
				"11111111-1111-1111-1111-111111111111",
				"liability.clients.u1",
				Operation::Debit,
				100,
			),
			entry(
				"22222222-2222-2222-2222-222222222222",
				"asset.company.main",
				Operation::Credit,
				50,
			),
		];
		let err = Transaction::new(
			Uuid::parse_str("33333333-3333-3333-3333-333333333333").unwrap(),
			1,
			"acme",
			now(),
			entries,
			now(),
		)
		.unwrap_err();
		assert!(err.is(&Kind::InvalidBalance));
	}

	#[test]
	fn duplicate_entry_ids_rejected() {
		let entries = vec![
			entry(
				"11111111-1111-1111-1111-111111111111",
				"liability.clients.u1",
				Operation::Debit,
				100,
			),
			entry(
				"11111111-1111-1111-1111-111111111111",
				"asset.company.main",
				Operation::Credit,
				100,
			),
		];
		let err = Transaction::new(
			Uuid::parse_str("33333333-3333-3333-3333-333333333333").unwrap(),
			1,
			"acme",
			now(),
			entries,
			now(),
		)
		.unwrap_err();
		assert!(err.is(&Kind::DuplicateEntryId));
	}

	#[test]
	fn future_competence_date_rejected() {
		let entries = vec![
			entry(
				"11111111-1111-1111-1111-111111111111",
				"liability.clients.u1",
				Operation::Debit,
				100,
			),
			entry(
				"22222222-2222-2222-2222-222222222222",
				"asset.company.main",
				Operation::Credit,
				100,
			),
		];
		let future = now() + chrono::Duration::days(1);
		let err = Transaction::new(
			Uuid::parse_str("33333333-3333-3333-3333-333333333333").unwrap(),
			1,
			"acme",
			future,
			entries,
			now(),
		)
		.unwrap_err();
		assert!(err.is(&Kind::FutureCompetenceDate));
	}

	#[test]
	fn too_few_entries_rejected() {
		let entries = vec![entry(
			"11111111-1111-1111-1111-111111111111",
			"liability.clients.u1",
			Operation::Debit,
			100,
		)];
		let err = Transaction::new(
			Uuid::parse_str("33333333-3333-3333-3333-333333333333").unwrap(),
			1,
			"acme",
			now(),
			entries,
			now(),
		)
		.unwrap_err();
		assert!(err.is(&Kind::InvalidEntriesNumber));
	}
}
