// Copyright (c) ledgerd.dev 2026
// This file is licensed under the Apache-2.0 license, see license.md file

use std::sync::Arc;

use ledgerd_diagnostic::{Error, Kind};
use ledgerd_store::LedgerStore;
use ledgerd_type::{AccountPath, AccountVersion};

/// Read-only view over an account's version-registry row. The write side of
/// the registry lives inside [`ledgerd_store::LedgerStore::commit`], which
/// owns the row lock for the duration of a commit; this type only ever
/// observes the result of that write.
pub struct VersionRegistry<S: LedgerStore> {
	store: Arc<S>,
}

impl<S: LedgerStore> VersionRegistry<S> {
	pub fn new(store: Arc<S>) -> Self {
		Self { store }
	}

	/// The current version of an analytical account, or `AccountNotFound` if
	/// it has never been written to.
	pub async fn current(&self, account: &AccountPath) -> Result<AccountVersion, Error> {
		let row = self.store.account_version(account).await?;
		row.map(|row| AccountVersion(row.current)).ok_or_else(|| Error::from(Kind::AccountNotFound))
	}
}
