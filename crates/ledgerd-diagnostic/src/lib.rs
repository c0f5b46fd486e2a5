// Copyright (c) ledgerd.dev 2026
// This file is licensed under the Apache-2.0 license, see license.md file

//! Shared error taxonomy for the ledger.
//!
//! Every fallible operation in the ledger core returns [`Error`], a thin
//! wrapper around a [`Kind`]. Upper layers (use-case facade, gRPC, HTTP) may
//! add context as the error propagates, but they never change its `Kind` —
//! the RPC boundary is the only place that translates a `Kind` into a
//! transport status code.

use std::fmt::{self, Display, Formatter};

pub type Result<T> = std::result::Result<T, Error>;

/// The category a [`Kind`] belongs to, used by transport boundaries to pick
/// a status code without string-matching error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
	Validation,
	Business,
	Concurrency,
	Availability,
	Fault,
}

/// A single, stable reason a ledger operation failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Kind {
	#[error("invalid transaction id")]
	InvalidTransactionId,
	#[error("invalid entry id")]
	InvalidEntryId,
	#[error("invalid operation")]
	InvalidOperation,
	#[error("invalid amount")]
	InvalidAmount,
	#[error("invalid entries number")]
	InvalidEntriesNumber,
	#[error("account does not meet minimum or maximum supported sizes")]
	InvalidAccountStructure,
	#[error("account component cannot be empty and must be less than 256 characters")]
	InvalidAccountComponentSize,
	#[error("only alphanumeric and underscore characters are supported")]
	InvalidAccountComponentCharacters,
	#[error("only alphanumeric, underscore and star (*) characters are supported")]
	InvalidSyntheticAccountComponentCharacters,
	#[error("invalid depth value")]
	InvalidAccountDepth,
	#[error("invalid page size")]
	InvalidPageSize,
	#[error("invalid page cursor")]
	InvalidPageCursor,

	#[error("invalid balance")]
	InvalidBalance,
	#[error("duplicate entry id within transaction")]
	DuplicateEntryId,
	#[error("invalid account type")]
	InvalidAccountType,
	#[error("invalid synthetic report structure")]
	InvalidSyntheticReportStructure,
	#[error("competence date set to the future")]
	FutureCompetenceDate,

	#[error("invalid version")]
	InvalidVersion,
	#[error("idempotency key violation")]
	IdempotencyKeyViolation,

	#[error("account not found")]
	AccountNotFound,

	#[error("internal server error")]
	Internal,
}

impl Kind {
	pub fn category(&self) -> Category {
		use Kind::*;
		match self {
			InvalidTransactionId
			| InvalidEntryId
			| InvalidOperation
			| InvalidAmount
			| InvalidEntriesNumber
			| InvalidAccountStructure
			| InvalidAccountComponentSize
			| InvalidAccountComponentCharacters
			| InvalidSyntheticAccountComponentCharacters
			| InvalidAccountDepth
			| InvalidPageSize
			| InvalidPageCursor => Category::Validation,

			InvalidBalance | InvalidAccountType | InvalidSyntheticReportStructure
			| FutureCompetenceDate | DuplicateEntryId => Category::Business,

			InvalidVersion | IdempotencyKeyViolation => Category::Concurrency,

			AccountNotFound => Category::Availability,

			Internal => Category::Fault,
		}
	}
}

/// An error carrying a [`Kind`] plus optional context accumulated while it
/// propagated up through the call stack.
#[derive(Debug)]
pub struct Error {
	kind: Kind,
	context: Vec<String>,
	source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl Error {
	pub fn new(kind: Kind) -> Self {
		Self { kind, context: Vec::new(), source: None }
	}

	pub fn kind(&self) -> &Kind {
		&self.kind
	}

	pub fn category(&self) -> Category {
		self.kind.category()
	}

	/// Wraps the error with additional context without changing its `Kind`.
	pub fn context(mut self, msg: impl Into<String>) -> Self {
		self.context.push(msg.into());
		self
	}

	pub fn with_source(
		mut self,
		source: impl std::error::Error + Send + Sync + 'static,
	) -> Self {
		self.source = Some(Box::new(source));
		self
	}

	pub fn internal(msg: impl Into<String>) -> Self {
		Self::new(Kind::Internal).context(msg)
	}

	pub fn is(&self, kind: &Kind) -> bool {
		&self.kind == kind
	}
}

impl Display for Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.kind)?;
		for ctx in self.context.iter().rev() {
			write!(f, ": {}", ctx)?;
		}
		Ok(())
	}
}

impl std::error::Error for Error {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		self.source.as_deref().map(|e| e as &(dyn std::error::Error + 'static))
	}
}

impl From<Kind> for Error {
	fn from(kind: Kind) -> Self {
		Self::new(kind)
	}
}

impl Clone for Error {
	fn clone(&self) -> Self {
		// `source` is not `Clone`-able through the trait object; errors are
		// cloned for fan-out into concurrent readers, where the context
		// chain matters far more than the underlying `source`.
		Self { kind: self.kind.clone(), context: self.context.clone(), source: None }
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn category_groups_match_taxonomy() {
		assert_eq!(Kind::InvalidAmount.category(), Category::Validation);
		assert_eq!(Kind::InvalidBalance.category(), Category::Business);
		assert_eq!(Kind::InvalidVersion.category(), Category::Concurrency);
		assert_eq!(Kind::AccountNotFound.category(), Category::Availability);
		assert_eq!(Kind::Internal.category(), Category::Fault);
		assert_eq!(Kind::DuplicateEntryId.category(), Category::Business);
	}

	#[test]
	fn context_is_preserved_without_changing_kind() {
		let err = Error::from(Kind::InvalidVersion).context("commit: account asset.company.main");
		assert!(err.is(&Kind::InvalidVersion));
		assert_eq!(err.to_string(), "invalid version: commit: account asset.company.main");
	}
}
