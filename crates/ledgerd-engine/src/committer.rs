// Copyright (c) ledgerd.dev 2026
// This file is licensed under the Apache-2.0 license, see license.md file

use std::sync::Arc;

use ledgerd_core::{StoredEntry, Transaction};
use ledgerd_diagnostic::Error;
use ledgerd_store::LedgerStore;

/// Commits already-validated transactions. [`Transaction::new`] has already
/// enforced balance, entry-count, and duplicate-id invariants by the time a
/// transaction reaches here; this type's only remaining job is handing the
/// atomic write to the store and surfacing whatever it reports.
pub struct Committer<S: LedgerStore> {
	store: Arc<S>,
}

impl<S: LedgerStore> Committer<S> {
	pub fn new(store: Arc<S>) -> Self {
		Self { store }
	}

	#[tracing::instrument(skip(self, tx), fields(transaction_id = %tx.id, entries = tx.entries.len()))]
	pub async fn commit(&self, tx: Transaction) -> Result<Vec<StoredEntry>, Error> {
		self.store.commit(tx).await
	}
}
