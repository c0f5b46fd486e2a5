// Copyright (c) ledgerd.dev 2026
// This file is licensed under the Apache-2.0 license, see license.md file

use std::sync::Arc;

use ledgerd_engine::LedgerFacade;
use ledgerd_store::LedgerStore;

use crate::metrics::Metrics;

pub struct AppState<S: LedgerStore> {
	pub facade: Arc<LedgerFacade<S>>,
	pub metrics: Metrics,
}

impl<S: LedgerStore> AppState<S> {
	pub fn new(facade: Arc<LedgerFacade<S>>) -> Self {
		Self { facade, metrics: Metrics::default() }
	}
}
