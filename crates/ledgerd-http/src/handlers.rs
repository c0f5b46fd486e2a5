// Copyright (c) ledgerd.dev 2026
// This file is licensed under the Apache-2.0 license, see license.md file

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use ledgerd_core::{Entry, Transaction};
use ledgerd_diagnostic::{Error, Kind};
use ledgerd_engine::PageRequest;
use ledgerd_store::LedgerStore;
use ledgerd_type::{AccountPath, Amount, ExpectedVersion, Operation};

use crate::dto::{
	BalanceResponse, CreateTransactionRequest, ListEntriesQuery, ListEntriesResponse,
	StoredEntryResponse, SyntheticReportGroupResponse, SyntheticReportQuery, SyntheticReportResponse,
	VersionResponse,
};
use crate::error::ApiError;
use crate::state::AppState;

fn parse_operation_filter(raw: Option<&str>) -> Result<Option<Operation>, Error> {
	match raw {
		None => Ok(None),
		Some(raw) => match raw.to_ascii_uppercase().as_str() {
			"DEBIT" => Ok(Some(Operation::Debit)),
			"CREDIT" => Ok(Some(Operation::Credit)),
			_ => Err(Kind::InvalidOperation.into()),
		},
	}
}

fn parse_comma_list(raw: Option<&str>) -> Vec<String> {
	raw.map(|raw| raw.split(',').map(str::trim).filter(|s| !s.is_empty()).map(String::from).collect())
		.unwrap_or_default()
}

fn parse_event_list(raw: Option<&str>) -> Vec<u32> {
	raw.map(|raw| raw.split(',').map(str::trim).filter_map(|s| s.parse::<u32>().ok()).collect())
		.unwrap_or_default()
}

pub async fn healthz() -> &'static str {
	"ok"
}

pub async fn version() -> Json<VersionResponse> {
	Json(VersionResponse {
		version: env!("CARGO_PKG_VERSION"),
		git_hash: option_env!("LEDGERD_GIT_HASH").unwrap_or("unknown"),
	})
}

pub async fn metrics<S: LedgerStore>(State(state): State<Arc<AppState<S>>>) -> String {
	state.metrics.render()
}

pub async fn create_transaction<S: LedgerStore>(
	State(state): State<Arc<AppState<S>>>,
	Json(req): Json<CreateTransactionRequest>,
) -> Result<(), ApiError> {
	let result = (|| async {
		let id = ledgerd_core::parse_transaction_id(&req.id)?;

		let mut entries = Vec::with_capacity(req.entries.len());
		for raw in req.entries {
			let entry_id = ledgerd_core::parse_id(&raw.id, Kind::InvalidEntryId)?;
			let operation = parse_operation_filter(Some(&raw.operation))?
				.ok_or_else(|| Error::from(Kind::InvalidOperation))?;
			let amount = Amount::new(raw.amount)?;
			let expected = ExpectedVersion::from_wire(raw.expected_version);
			let entry = Entry::new(entry_id, raw.account, operation, amount, expected, raw.metadata.into())?;
			entries.push(entry);
		}

		let tx =
			Transaction::new(id, req.event, req.company, req.competence_date, entries, chrono::Utc::now())?;

		state.facade.commit(tx).await
	})()
	.await;

	state.metrics.record_commit(result.is_ok());
	result.map(|_| ()).map_err(ApiError::from)
}

pub async fn get_account_balance<S: LedgerStore>(
	State(state): State<Arc<AppState<S>>>,
	Path(account): Path<String>,
) -> Result<Json<BalanceResponse>, ApiError> {
	state.metrics.record_balance_read();
	let account = AccountPath::parse(account).map_err(ApiError::from)?;
	let balance = state.facade.balance(&account).await.map_err(ApiError::from)?;
	Ok(Json(BalanceResponse { balance: balance.balance, current_version: balance.version.as_wire() }))
}

pub async fn list_account_entries<S: LedgerStore>(
	State(state): State<Arc<AppState<S>>>,
	Path(account): Path<String>,
	Query(query): Query<ListEntriesQuery>,
) -> Result<Json<ListEntriesResponse>, ApiError> {
	state.metrics.record_entry_page();
	let account = AccountPath::parse(account).map_err(ApiError::from)?;
	let operation = parse_operation_filter(query.operation.as_deref()).map_err(ApiError::from)?;

	let page = PageRequest {
		account,
		start: query.start,
		end: query.end,
		companies: parse_comma_list(query.companies.as_deref()),
		events: parse_event_list(query.events.as_deref()),
		operation,
		size: query.page_size,
		cursor: query.page_cursor,
	};

	let (entries, next_page_cursor) = state.facade.list_entries(page).await.map_err(ApiError::from)?;

	Ok(Json(ListEntriesResponse {
		entries: entries.into_iter().map(StoredEntryResponse::from).collect(),
		next_page_cursor,
	}))
}

pub async fn get_synthetic_report<S: LedgerStore>(
	State(state): State<Arc<AppState<S>>>,
	Query(query): Query<SyntheticReportQuery>,
) -> Result<Json<SyntheticReportResponse>, ApiError> {
	let account = AccountPath::parse(query.query).map_err(ApiError::from)?;
	let report = state
		.facade
		.synthetic_report(&account, query.level, query.start, query.end)
		.await
		.map_err(ApiError::from)?;

	Ok(Json(SyntheticReportResponse {
		total_credit: report.total_credit,
		total_debit: report.total_debit,
		groups: report
			.groups
			.into_iter()
			.map(|group| SyntheticReportGroupResponse { key: group.key, credit: group.credit, debit: group.debit })
			.collect(),
	}))
}
