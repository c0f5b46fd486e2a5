// Copyright (c) ledgerd.dev 2026
// This file is licensed under the Apache-2.0 license, see license.md file

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use ledgerd_diagnostic::{Error, Kind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
struct ErrorBody {
	error: String,
}

/// Wraps a domain [`Error`] so axum handlers can return it directly; the
/// status mapping mirrors the gRPC boundary's `Kind` → code table so the
/// two protocols never disagree about what a given failure means.
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
	fn from(err: Error) -> Self {
		Self(err)
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let status = match self.0.kind() {
			Kind::InvalidTransactionId
			| Kind::InvalidEntryId
			| Kind::InvalidOperation
			| Kind::InvalidAmount
			| Kind::InvalidAccountStructure
			| Kind::InvalidAccountComponentSize
			| Kind::InvalidAccountComponentCharacters
			| Kind::InvalidSyntheticAccountComponentCharacters
			| Kind::InvalidAccountDepth
			| Kind::InvalidPageSize
			| Kind::InvalidPageCursor
			| Kind::InvalidAccountType
			| Kind::InvalidSyntheticReportStructure
			| Kind::FutureCompetenceDate
			| Kind::InvalidVersion
			| Kind::IdempotencyKeyViolation => StatusCode::BAD_REQUEST,

			Kind::InvalidEntriesNumber | Kind::InvalidBalance | Kind::DuplicateEntryId => {
				StatusCode::CONFLICT
			}

			Kind::AccountNotFound => StatusCode::NOT_FOUND,

			Kind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
		};

		let message = if self.0.is(&Kind::Internal) {
			tracing::error!(error = %self.0, "internal error");
			"internal server error".to_string()
		} else {
			self.0.to_string()
		};

		(status, Json(ErrorBody { error: message })).into_response()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use axum::body::to_bytes;

	#[tokio::test]
	async fn internal_error_message_never_leaks_context() {
		let err = Error::internal("corrupt account key in store");
		let response = ApiError::from(err).into_response();
		assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
		let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
		let body: ErrorBody = serde_json::from_slice(&body).unwrap();
		assert_eq!(body.error, "internal server error");
	}

	#[test]
	fn duplicate_entry_id_maps_to_conflict() {
		let response = ApiError::from(Error::from(Kind::DuplicateEntryId)).into_response();
		assert_eq!(response.status(), StatusCode::CONFLICT);
	}
}
