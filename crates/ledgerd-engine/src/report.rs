// Copyright (c) ledgerd.dev 2026
// This file is licensed under the Apache-2.0 license, see license.md file

use std::sync::Arc;

use chrono::{DateTime, Utc};
use ledgerd_diagnostic::{Error, Kind};
use ledgerd_store::{LedgerStore, ReportGroup};
use ledgerd_type::AccountPath;

/// A synthetic report: per-group credit/debit sums plus their totals across
/// the whole subtree.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
	pub total_credit: i64,
	pub total_debit: i64,
	pub groups: Vec<ReportGroup>,
}

/// Aggregates credit/debit movements across a synthetic subtree, grouped by
/// a caller-chosen path depth.
pub struct SyntheticReporter<S: LedgerStore> {
	store: Arc<S>,
}

impl<S: LedgerStore> SyntheticReporter<S> {
	pub fn new(store: Arc<S>) -> Self {
		Self { store }
	}

	#[tracing::instrument(skip(self), fields(query = %query, level))]
	pub async fn report(
		&self,
		query: &AccountPath,
		level: usize,
		start: DateTime<Utc>,
		end: DateTime<Utc>,
	) -> Result<Report, Error> {
		if !query.is_synthetic() {
			return Err(Error::from(Kind::InvalidSyntheticReportStructure)
				.context("report query must be a synthetic path"));
		}
		let prefix_len = query.prefix_labels().len();
		if level == 0 || level > prefix_len {
			return Err(Error::from(Kind::InvalidSyntheticReportStructure)
				.context(format!("level {level} is out of range [1, {prefix_len}]")));
		}

		let groups = self.store.report(query, level, start, end).await?;
		let total_credit = groups.iter().map(|group| group.credit).sum();
		let total_debit = groups.iter().map(|group| group.debit).sum();

		Ok(Report { total_credit, total_debit, groups })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn rejects_analytical_query() {
		let store = Arc::new(ledgerd_store::MemoryStore::new());
		let reporter = SyntheticReporter::new(store);
		let query = AccountPath::parse("liability.clients.u1").unwrap();
		let err = reporter
			.report(&query, 1, Utc::now() - chrono::Duration::days(1), Utc::now())
			.await
			.unwrap_err();
		assert!(err.is(&Kind::InvalidSyntheticReportStructure));
	}

	#[tokio::test]
	async fn rejects_out_of_range_level() {
		let store = Arc::new(ledgerd_store::MemoryStore::new());
		let reporter = SyntheticReporter::new(store);
		let query = AccountPath::parse("liability.clients.*").unwrap();
		let err = reporter
			.report(&query, 5, Utc::now() - chrono::Duration::days(1), Utc::now())
			.await
			.unwrap_err();
		assert!(err.is(&Kind::InvalidSyntheticReportStructure));
	}

	#[tokio::test]
	async fn empty_subtree_is_not_an_error() {
		let store = Arc::new(ledgerd_store::MemoryStore::new());
		let reporter = SyntheticReporter::new(store);
		let query = AccountPath::parse("liability.clients.*").unwrap();
		let report = reporter
			.report(&query, 2, Utc::now() - chrono::Duration::days(1), Utc::now())
			.await
			.unwrap();
		assert!(report.groups.is_empty());
		assert_eq!(report.total_credit, 0);
	}
}
