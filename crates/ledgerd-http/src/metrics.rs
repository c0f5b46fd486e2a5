// Copyright (c) ledgerd.dev 2026
// This file is licensed under the Apache-2.0 license, see license.md file

use std::sync::atomic::{AtomicU64, Ordering};

/// A minimal, hand-rolled counter set exposed in Prometheus text exposition
/// format. Not a `prometheus`-crate integration: the original system ships
/// a full registry behind `promhttp`, but the ambient surface here only
/// needs to prove the shape of the endpoint, so four counters are enough.
#[derive(Default)]
pub struct Metrics {
	transactions_committed: AtomicU64,
	transactions_rejected: AtomicU64,
	balance_reads: AtomicU64,
	entry_pages_served: AtomicU64,
}

impl Metrics {
	pub fn record_commit(&self, ok: bool) {
		if ok {
			self.transactions_committed.fetch_add(1, Ordering::Relaxed);
		} else {
			self.transactions_rejected.fetch_add(1, Ordering::Relaxed);
		}
	}

	pub fn record_balance_read(&self) {
		self.balance_reads.fetch_add(1, Ordering::Relaxed);
	}

	pub fn record_entry_page(&self) {
		self.entry_pages_served.fetch_add(1, Ordering::Relaxed);
	}

	pub fn render(&self) -> String {
		format!(
			"# TYPE ledgerd_transactions_committed_total counter\n\
			 ledgerd_transactions_committed_total {}\n\
			 # TYPE ledgerd_transactions_rejected_total counter\n\
			 ledgerd_transactions_rejected_total {}\n\
			 # TYPE ledgerd_balance_reads_total counter\n\
			 ledgerd_balance_reads_total {}\n\
			 # TYPE ledgerd_entry_pages_served_total counter\n\
			 ledgerd_entry_pages_served_total {}\n",
			self.transactions_committed.load(Ordering::Relaxed),
			self.transactions_rejected.load(Ordering::Relaxed),
			self.balance_reads.load(Ordering::Relaxed),
			self.entry_pages_served.load(Ordering::Relaxed),
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn renders_zeroed_counters() {
		let metrics = Metrics::default();
		assert!(metrics.render().contains("ledgerd_transactions_committed_total 0"));
	}

	#[test]
	fn records_increment_independently() {
		let metrics = Metrics::default();
		metrics.record_commit(true);
		metrics.record_commit(false);
		let rendered = metrics.render();
		assert!(rendered.contains("ledgerd_transactions_committed_total 1"));
		assert!(rendered.contains("ledgerd_transactions_rejected_total 1"));
	}
}
