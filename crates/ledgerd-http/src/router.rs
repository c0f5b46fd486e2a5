// Copyright (c) ledgerd.dev 2026
// This file is licensed under the Apache-2.0 license, see license.md file

use std::sync::Arc;
use std::time::Duration;

use axum::error_handling::HandleErrorLayer;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{BoxError, Router};
use ledgerd_engine::LedgerFacade;
use ledgerd_store::LedgerStore;
use tower::timeout::TimeoutLayer;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Builds the HTTP/JSON gateway router. Every route transcodes onto the
/// same [`LedgerFacade`] the gRPC service calls; this is a second protocol
/// surface, not a second implementation.
pub fn router<S: LedgerStore + 'static>(facade: Arc<LedgerFacade<S>>, request_timeout: Duration) -> Router {
	let state = Arc::new(AppState::new(facade));

	Router::new()
		.route("/healthz", get(handlers::healthz))
		.route("/version", get(handlers::version))
		.route("/metrics", get(handlers::metrics::<S>))
		.route("/v1/transactions", post(handlers::create_transaction::<S>))
		.route("/v1/accounts/{account}/balance", get(handlers::get_account_balance::<S>))
		.route("/v1/accounts/{account}/entries", get(handlers::list_account_entries::<S>))
		.route("/v1/reports/synthetic", get(handlers::get_synthetic_report::<S>))
		.layer(TraceLayer::new_for_http())
		.layer(
			ServiceBuilder::new()
				.layer(HandleErrorLayer::new(handle_timeout_error))
				.layer(TimeoutLayer::new(request_timeout)),
		)
		.with_state(state)
}

async fn handle_timeout_error(err: BoxError) -> StatusCode {
	if err.is::<tower::timeout::error::Elapsed>() {
		StatusCode::REQUEST_TIMEOUT
	} else {
		StatusCode::INTERNAL_SERVER_ERROR
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use axum::body::Body;
	use axum::http::{Request, StatusCode};
	use ledgerd_store::MemoryStore;
	use tower::ServiceExt;

	#[tokio::test]
	async fn healthz_reports_ok() {
		let facade = Arc::new(LedgerFacade::new(Arc::new(MemoryStore::new())));
		let app = router(facade, Duration::from_secs(5));

		let response = app
			.oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
			.await
			.unwrap();

		assert_eq!(response.status(), StatusCode::OK);
	}

	#[tokio::test]
	async fn balance_for_unknown_account_is_not_found() {
		let facade = Arc::new(LedgerFacade::new(Arc::new(MemoryStore::new())));
		let app = router(facade, Duration::from_secs(5));

		let response = app
			.oneshot(
				Request::builder()
					.uri("/v1/accounts/liability.clients.ghost/balance")
					.body(Body::empty())
					.unwrap(),
			)
			.await
			.unwrap();

		assert_eq!(response.status(), StatusCode::NOT_FOUND);
	}
}
