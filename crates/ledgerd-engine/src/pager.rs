// Copyright (c) ledgerd.dev 2026
// This file is licensed under the Apache-2.0 license, see license.md file

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, Utc};
use ledgerd_core::StoredEntry;
use ledgerd_diagnostic::{Error, Kind};
use ledgerd_store::{LedgerStore, ListEntriesQuery as StoreQuery};
use ledgerd_type::{AccountPath, Operation};
use serde::{Deserialize, Serialize};

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: usize = 1000;

#[derive(Debug, Serialize, Deserialize)]
struct CursorToken {
	competence_date: DateTime<Utc>,
	version: u64,
}

/// Decodes an opaque pagination token, or `None` for an absent token.
/// Malformed tokens surface `InvalidPageCursor` rather than being silently
/// dropped, since a client that thinks it is resuming a scan must not
/// silently start over.
fn decode_cursor(token: Option<&str>) -> Result<Option<(DateTime<Utc>, u64)>, Error> {
	let Some(token) = token else {
		return Ok(None);
	};
	let bytes = BASE64.decode(token).map_err(|_| Error::from(Kind::InvalidPageCursor))?;
	let decoded: CursorToken =
		serde_json::from_slice(&bytes).map_err(|_| Error::from(Kind::InvalidPageCursor))?;
	Ok(Some((decoded.competence_date, decoded.version)))
}

fn encode_cursor(boundary: (DateTime<Utc>, u64)) -> String {
	let token = CursorToken { competence_date: boundary.0, version: boundary.1 };
	let bytes = serde_json::to_vec(&token).expect("cursor token is always serializable");
	BASE64.encode(bytes)
}

/// A page request against a single analytical account's entry history.
pub struct PageRequest {
	pub account: AccountPath,
	pub start: DateTime<Utc>,
	pub end: DateTime<Utc>,
	pub companies: Vec<String>,
	pub events: Vec<u32>,
	pub operation: Option<Operation>,
	pub size: usize,
	pub cursor: Option<String>,
}

/// Paginates an account's committed entries in reverse chronological order
/// using an opaque keyset cursor, so a client never needs to know about
/// offsets or row counts.
pub struct EntryPager<S: LedgerStore> {
	store: Arc<S>,
}

impl<S: LedgerStore> EntryPager<S> {
	pub fn new(store: Arc<S>) -> Self {
		Self { store }
	}

	#[tracing::instrument(skip(self, req), fields(account = %req.account, size = req.size))]
	pub async fn list(&self, req: PageRequest) -> Result<(Vec<StoredEntry>, Option<String>), Error> {
		if req.size == 0 || req.size > MAX_PAGE_SIZE {
			return Err(Error::from(Kind::InvalidPageSize));
		}

		let cursor = decode_cursor(req.cursor.as_deref())?;

		let (entries, next) = self
			.store
			.list_entries(StoreQuery {
				account: req.account,
				start: req.start,
				end: req.end,
				companies: req.companies,
				events: req.events,
				operation: req.operation,
				cursor,
				size: req.size,
			})
			.await?;

		Ok((entries, next.map(encode_cursor)))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn malformed_cursor_is_rejected() {
		let err = decode_cursor(Some("not-base64!!")).unwrap_err();
		assert!(err.is(&Kind::InvalidPageCursor));
	}

	#[test]
	fn cursor_round_trips() {
		let boundary = (DateTime::parse_from_rfc3339("2026-01-01T00:00:00Z").unwrap().with_timezone(&Utc), 7);
		let token = encode_cursor(boundary);
		let decoded = decode_cursor(Some(&token)).unwrap().unwrap();
		assert_eq!(decoded, boundary);
	}
}
