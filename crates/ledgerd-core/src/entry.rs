// Copyright (c) ledgerd.dev 2026
// This file is licensed under the Apache-2.0 license, see license.md file

use ledgerd_diagnostic::{Error, Kind};
use ledgerd_type::{AccountPath, Amount, EntryId, ExpectedVersion, Operation, Uuid};

use crate::metadata::Metadata;

/// A single bookkeeping movement, as submitted by a client before commit.
/// Immutable after construction and, once committed, immutable forever.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
	pub id: EntryId,
	pub account: AccountPath,
	pub operation: Operation,
	pub amount: Amount,
	pub expected_version: ExpectedVersion,
	pub metadata: Metadata,
}

impl Entry {
	/// Validates and constructs an entry. `account` must parse as an
	/// analytical (non-wildcard) path.
	pub fn new(
		id: EntryId,
		account: impl Into<String>,
		operation: Operation,
		amount: Amount,
		expected_version: ExpectedVersion,
		metadata: Metadata,
	) -> Result<Self, Error> {
		if id.is_nil() {
			return Err(Kind::InvalidEntryId.into());
		}

		let account = AccountPath::parse_analytical(account.into())?;

		Ok(Self { id, account, operation, amount, expected_version, metadata })
	}

	/// `+amount` for a credit, `-amount` for a debit.
	pub fn signed_delta(&self) -> i64 {
		self.operation.sign() * self.amount.get() as i64
	}
}

/// Parses a wire-format UUID string into an [`EntryId`]/[`TransactionId`],
/// rejecting the nil UUID the same way an unparseable string is rejected.
pub fn parse_id(raw: &str, on_invalid: Kind) -> Result<Uuid, Error> {
	let id = Uuid::parse_str(raw).map_err(|_| Error::from(on_invalid.clone()))?;
	if id.is_nil() {
		return Err(on_invalid.into());
	}
	Ok(id)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn entry_id() -> EntryId {
		Uuid::parse_str("11111111-1111-1111-1111-111111111111").unwrap()
	}

	#[test]
	fn rejects_nil_id() {
		let err = Entry::new(
			Uuid::nil(),
			"liability.clients.u1",
			Operation::Debit,
			Amount::new(100).unwrap(),
			ExpectedVersion::Next,
			Metadata::empty(),
		)
		.unwrap_err();
		assert!(err.is(&Kind::InvalidEntryId));
	}

	#[test]
	fn rejects_synthetic_account() {
		let err = Entry::new(
			entry_id(),
			"liability.clients.*",
			Operation::Debit,
			Amount::new(100).unwrap(),
			ExpectedVersion::Next,
			Metadata::empty(),
		)
		.unwrap_err();
		assert!(err.is(&Kind::InvalidAccountType));
	}

	#[test]
	fn signed_delta_follows_operation() {
		let credit = Entry::new(
			entry_id(),
			"asset.company.main",
			Operation::Credit,
			Amount::new(100).unwrap(),
			ExpectedVersion::Next,
			Metadata::empty(),
		)
		.unwrap();
		assert_eq!(credit.signed_delta(), 100);
	}
}
