// Copyright (c) ledgerd.dev 2026
// This file is licensed under the Apache-2.0 license, see license.md file

use std::sync::Arc;

use ledgerd_core::{Entry, Metadata, Transaction};
use ledgerd_engine::{LedgerFacade, PageRequest};
use ledgerd_store::LedgerStore;
use ledgerd_type::{AccountPath, Amount, ExpectedVersion, Operation, Uuid};
use tonic::{Request, Response, Status};

use crate::convert::{datetime_to_timestamp, metadata_to_struct, struct_to_metadata, timestamp_to_datetime};
use crate::proto;
use crate::proto::ledger_service_server::LedgerService;
use crate::status::to_status;

/// Binds the generated `LedgerService` trait to [`LedgerFacade`]. Every
/// method follows the same shape: decode the wire request into domain
/// types, call the facade, encode the domain result back to wire types —
/// no business logic lives here.
pub struct LedgerGrpcService<S: LedgerStore> {
	facade: Arc<LedgerFacade<S>>,
}

impl<S: LedgerStore> LedgerGrpcService<S> {
	pub fn new(facade: Arc<LedgerFacade<S>>) -> Self {
		Self { facade }
	}
}

fn parse_uuid(raw: &str, on_invalid: ledgerd_diagnostic::Kind) -> Result<Uuid, Status> {
	ledgerd_core::parse_id(raw, on_invalid).map_err(|err| to_status(&err))
}

#[tonic::async_trait]
impl<S: LedgerStore + 'static> LedgerService for LedgerGrpcService<S> {
	#[tracing::instrument(skip(self, request))]
	async fn create_transaction(
		&self,
		request: Request<proto::CreateTransactionRequest>,
	) -> Result<Response<()>, Status> {
		let req = request.into_inner();

		let id = parse_uuid(&req.id, ledgerd_diagnostic::Kind::InvalidTransactionId)?;

		let competence_date = req
			.competence_date
			.as_ref()
			.ok_or_else(|| Status::invalid_argument("competence_date is required"))
			.and_then(|ts| timestamp_to_datetime(ts))?;

		let mut entries = Vec::with_capacity(req.entries.len());
		for raw in req.entries {
			let entry_id = parse_uuid(&raw.id, ledgerd_diagnostic::Kind::InvalidEntryId)?;
			let operation = Operation::from_wire(raw.operation).map_err(|err| to_status(&err))?;
			let amount = Amount::new(raw.amount).map_err(|err| to_status(&err))?;
			let expected = ExpectedVersion::from_wire(raw.expected_version);
			let metadata: Metadata = struct_to_metadata(raw.metadata);

			let entry = Entry::new(entry_id, raw.account, operation, amount, expected, metadata)
				.map_err(|err| to_status(&err))?;
			entries.push(entry);
		}

		let tx = Transaction::new(id, req.event, req.company, competence_date, entries, chrono::Utc::now())
			.map_err(|err| to_status(&err))?;

		self.facade.commit(tx).await.map_err(|err| to_status(&err))?;

		Ok(Response::new(()))
	}

	#[tracing::instrument(skip(self, request))]
	async fn get_account_balance(
		&self,
		request: Request<proto::GetAccountBalanceRequest>,
	) -> Result<Response<proto::GetAccountBalanceResponse>, Status> {
		let req = request.into_inner();
		let account = AccountPath::parse(req.account).map_err(|err| to_status(&err))?;
		let balance = self.facade.balance(&account).await.map_err(|err| to_status(&err))?;

		Ok(Response::new(proto::GetAccountBalanceResponse {
			balance: balance.balance,
			current_version: balance.version.as_wire(),
		}))
	}

	#[tracing::instrument(skip(self, request))]
	async fn list_account_entries(
		&self,
		request: Request<proto::ListAccountEntriesRequest>,
	) -> Result<Response<proto::ListAccountEntriesResponse>, Status> {
		let req = request.into_inner();
		let account = AccountPath::parse(req.account).map_err(|err| to_status(&err))?;

		let start = req
			.start
			.as_ref()
			.ok_or_else(|| Status::invalid_argument("start is required"))
			.and_then(|ts| timestamp_to_datetime(ts))?;
		let end = req
			.end
			.as_ref()
			.ok_or_else(|| Status::invalid_argument("end is required"))
			.and_then(|ts| timestamp_to_datetime(ts))?;

		let operation = if req.operation == 0 { None } else { Some(Operation::from_wire(req.operation).map_err(|err| to_status(&err))?) };

		let cursor = if req.page_cursor.is_empty() { None } else { Some(req.page_cursor) };

		let page = PageRequest {
			account,
			start,
			end,
			companies: req.companies,
			events: req.events,
			operation,
			size: req.page_size as usize,
			cursor,
		};

		let (entries, next_cursor) = self.facade.list_entries(page).await.map_err(|err| to_status(&err))?;

		let entries = entries
			.into_iter()
			.map(|row| proto::StoredEntryMessage {
				id: row.id.to_string(),
				transaction_id: row.transaction_id.to_string(),
				account: row.account.as_str().to_string(),
				operation: row.operation.to_wire(),
				amount: row.amount.get(),
				version: row.version,
				event: row.event,
				company: row.company,
				competence_date: Some(datetime_to_timestamp(row.competence_date)),
				metadata: Some(metadata_to_struct(&row.metadata)),
				created_at: Some(datetime_to_timestamp(row.created_at)),
			})
			.collect();

		Ok(Response::new(proto::ListAccountEntriesResponse {
			entries,
			next_page_cursor: next_cursor.unwrap_or_default(),
		}))
	}

	#[tracing::instrument(skip(self, request))]
	async fn get_synthetic_report(
		&self,
		request: Request<proto::GetSyntheticReportRequest>,
	) -> Result<Response<proto::GetSyntheticReportResponse>, Status> {
		let req = request.into_inner();
		let query = AccountPath::parse(req.query).map_err(|err| to_status(&err))?;

		let start = req
			.start
			.as_ref()
			.ok_or_else(|| Status::invalid_argument("start is required"))
			.and_then(|ts| timestamp_to_datetime(ts))?;
		let end = req
			.end
			.as_ref()
			.ok_or_else(|| Status::invalid_argument("end is required"))
			.and_then(|ts| timestamp_to_datetime(ts))?;

		let report = self
			.facade
			.synthetic_report(&query, req.level as usize, start, end)
			.await
			.map_err(|err| to_status(&err))?;

		Ok(Response::new(proto::GetSyntheticReportResponse {
			total_credit: report.total_credit,
			total_debit: report.total_debit,
			groups: report
				.groups
				.into_iter()
				.map(|group| proto::SyntheticReportGroup { key: group.key, credit: group.credit, debit: group.debit })
				.collect(),
		}))
	}
}
