// Copyright (c) ledgerd.dev 2026
// This file is licensed under the Apache-2.0 license, see license.md file

use ledgerd_diagnostic::{Error, Kind};
use tonic::{Code, Status};

/// Translates a domain [`Error`] into the transport status it should surface
/// as. Mapping is by `Kind`, not `Category`: two `Kind`s in the same
/// category can still warrant different codes depending on whether the
/// violation is about malformed input or a transaction-level invariant.
pub fn to_status(err: &Error) -> Status {
	let code = match err.kind() {
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
		| Kind::IdempotencyKeyViolation => Code::InvalidArgument,

		// Transaction-level invariant violations: the request parsed fine
		// field-by-field but the group of entries it describes isn't a
		// valid transaction.
		Kind::InvalidEntriesNumber | Kind::InvalidBalance | Kind::DuplicateEntryId => Code::Aborted,

		Kind::AccountNotFound => Code::NotFound,

		Kind::Internal => Code::Internal,
	};

	let message = if err.is(&Kind::Internal) {
		tracing::error!(error = %err, "internal error");
		"internal server error".to_string()
	} else {
		err.to_string()
	};

	Status::new(code, message)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn idempotency_violation_maps_to_invalid_argument() {
		let status = to_status(&Error::from(Kind::IdempotencyKeyViolation));
		assert_eq!(status.code(), Code::InvalidArgument);
	}

	#[test]
	fn account_not_found_maps_to_not_found() {
		let status = to_status(&Error::from(Kind::AccountNotFound));
		assert_eq!(status.code(), Code::NotFound);
	}

	#[test]
	fn unbalanced_transaction_maps_to_aborted() {
		let status = to_status(&Error::from(Kind::InvalidBalance));
		assert_eq!(status.code(), Code::Aborted);
	}

	#[test]
	fn duplicate_entry_id_maps_to_aborted() {
		let status = to_status(&Error::from(Kind::DuplicateEntryId));
		assert_eq!(status.code(), Code::Aborted);
	}

	#[test]
	fn internal_error_message_never_leaks_context() {
		let err = Error::internal("balance computed but version row is absent");
		let status = to_status(&err);
		assert_eq!(status.code(), Code::Internal);
		assert_eq!(status.message(), "internal server error");
	}
}
