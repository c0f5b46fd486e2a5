// Copyright (c) ledgerd.dev 2026
// This file is licensed under the Apache-2.0 license, see license.md file

use chrono::{DateTime, Utc};
use ledgerd_core::{Metadata, StoredEntry};
use serde::{Deserialize, Serialize};
use serde_json::Map;

#[derive(Debug, Deserialize)]
pub struct EntryInput {
	pub id: String,
	pub account: String,
	pub operation: String,
	pub amount: u64,
	#[serde(default)]
	pub expected_version: i64,
	#[serde(default)]
	pub metadata: Map<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
	pub id: String,
	pub event: u32,
	pub company: String,
	pub competence_date: DateTime<Utc>,
	pub entries: Vec<EntryInput>,
}

#[derive(Debug, Serialize)]
pub struct BalanceResponse {
	pub balance: i64,
	pub current_version: i64,
}

/// `companies`/`events` arrive as a single comma-delimited value
/// (`?companies=acme,wonka`) rather than repeated keys: `axum::extract::Query`
/// deserializes via `serde_urlencoded`, which does not collect repeated query
/// keys into a sequence.
#[derive(Debug, Deserialize)]
pub struct ListEntriesQuery {
	pub start: DateTime<Utc>,
	pub end: DateTime<Utc>,
	pub companies: Option<String>,
	pub events: Option<String>,
	pub operation: Option<String>,
	#[serde(default = "default_page_size")]
	pub page_size: usize,
	pub page_cursor: Option<String>,
}

fn default_page_size() -> usize {
	50
}

#[derive(Debug, Serialize)]
pub struct StoredEntryResponse {
	pub id: String,
	pub transaction_id: String,
	pub account: String,
	pub operation: String,
	pub amount: u64,
	pub version: u64,
	pub event: u32,
	pub company: String,
	pub competence_date: DateTime<Utc>,
	pub metadata: Metadata,
	pub created_at: DateTime<Utc>,
}

impl From<StoredEntry> for StoredEntryResponse {
	fn from(row: StoredEntry) -> Self {
		Self {
			id: row.id.to_string(),
			transaction_id: row.transaction_id.to_string(),
			account: row.account.as_str().to_string(),
			operation: row.operation.to_string(),
			amount: row.amount.get(),
			version: row.version,
			event: row.event,
			company: row.company,
			competence_date: row.competence_date,
			metadata: row.metadata,
			created_at: row.created_at,
		}
	}
}

#[derive(Debug, Serialize)]
pub struct ListEntriesResponse {
	pub entries: Vec<StoredEntryResponse>,
	pub next_page_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SyntheticReportQuery {
	pub query: String,
	pub level: usize,
	pub start: DateTime<Utc>,
	pub end: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct SyntheticReportGroupResponse {
	pub key: String,
	pub credit: i64,
	pub debit: i64,
}

#[derive(Debug, Serialize)]
pub struct SyntheticReportResponse {
	pub total_credit: i64,
	pub total_debit: i64,
	pub groups: Vec<SyntheticReportGroupResponse>,
}

#[derive(Debug, Serialize)]
pub struct VersionResponse {
	pub version: &'static str,
	pub git_hash: &'static str,
}
