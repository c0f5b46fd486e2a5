// Copyright (c) ledgerd.dev 2026
// This file is licensed under the Apache-2.0 license, see license.md file

use std::sync::Arc;

use chrono::{DateTime, Utc};
use ledgerd_core::{StoredEntry, Transaction};
use ledgerd_diagnostic::{Error, Kind};
use ledgerd_store::LedgerStore;
use ledgerd_type::AccountPath;

use crate::balance::{AccountBalance, BalanceEngine};
use crate::committer::Committer;
use crate::pager::{EntryPager, PageRequest};
use crate::report::{Report, SyntheticReporter};
use crate::version::VersionRegistry;

/// The single entry point the transport layers (gRPC, HTTP) call into.
/// Wires the committer, balance engine, pager, and reporter to one shared
/// store handle and resolves the analytical-vs-synthetic ambiguity for
/// balance reads so callers never branch on account shape themselves.
pub struct LedgerFacade<S: LedgerStore> {
	committer: Committer<S>,
	balance: BalanceEngine<S>,
	pager: EntryPager<S>,
	reporter: SyntheticReporter<S>,
	versions: VersionRegistry<S>,
}

impl<S: LedgerStore> LedgerFacade<S> {
	pub fn new(store: Arc<S>) -> Self {
		Self {
			committer: Committer::new(store.clone()),
			balance: BalanceEngine::new(store.clone()),
			pager: EntryPager::new(store.clone()),
			reporter: SyntheticReporter::new(store.clone()),
			versions: VersionRegistry::new(store),
		}
	}

	pub async fn commit(&self, tx: Transaction) -> Result<Vec<StoredEntry>, Error> {
		self.committer.commit(tx).await
	}

	/// Routes to the analytical or synthetic balance engine based on the
	/// path's own shape; a path that somehow parsed as neither is rejected.
	pub async fn balance(&self, path: &AccountPath) -> Result<AccountBalance, Error> {
		if path.is_analytical() {
			self.balance.analytical_balance(path).await
		} else if path.is_synthetic() {
			self.balance.synthetic_balance(path).await
		} else {
			Err(Error::from(Kind::InvalidAccountType))
		}
	}

	pub async fn list_entries(
		&self,
		req: PageRequest,
	) -> Result<(Vec<StoredEntry>, Option<String>), Error> {
		self.pager.list(req).await
	}

	pub async fn synthetic_report(
		&self,
		query: &AccountPath,
		level: usize,
		start: DateTime<Utc>,
		end: DateTime<Utc>,
	) -> Result<Report, Error> {
		self.reporter.report(query, level, start, end).await
	}

	pub async fn account_version(
		&self,
		account: &AccountPath,
	) -> Result<ledgerd_type::AccountVersion, Error> {
		self.versions.current(account).await
	}
}
