// Copyright (c) ledgerd.dev 2026
// This file is licensed under the Apache-2.0 license, see license.md file

use std::fmt::{self, Display, Formatter};

use ledgerd_diagnostic::{Error, Kind};
use serde::{Deserialize, Serialize};

/// A signed ledger movement. Mirrors the wire `Operation` enum, minus the
/// `UNSPECIFIED` value, which is rejected at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
	Debit,
	Credit,
}

impl Operation {
	/// `UNSPECIFIED = 0`, `DEBIT = 1`, `CREDIT = 2` on the wire.
	pub fn from_wire(value: i32) -> Result<Self, Error> {
		match value {
			1 => Ok(Operation::Debit),
			2 => Ok(Operation::Credit),
			_ => Err(Kind::InvalidOperation.into()),
		}
	}

	pub fn to_wire(self) -> i32 {
		match self {
			Operation::Debit => 1,
			Operation::Credit => 2,
		}
	}

	/// `+1` for `Credit`, `-1` for `Debit` — multiply by the amount to get
	/// the signed delta a movement contributes to a balance.
	pub fn sign(self) -> i64 {
		match self {
			Operation::Credit => 1,
			Operation::Debit => -1,
		}
	}
}

impl Display for Operation {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Operation::Debit => f.write_str("DEBIT"),
			Operation::Credit => f.write_str("CREDIT"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn unspecified_is_rejected() {
		assert!(Operation::from_wire(0).is_err());
	}

	#[test]
	fn sign_matches_accounting_convention() {
		assert_eq!(Operation::Credit.sign(), 1);
		assert_eq!(Operation::Debit.sign(), -1);
	}
}
