// Copyright (c) ledgerd.dev 2026
// This file is licensed under the Apache-2.0 license, see license.md file

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// `IGNORE` sentinel: the writer declines to assert an expected version.
pub const IGNORE: i64 = -1;
/// `NEXT` sentinel: the writer asserts this is the first write to the account.
pub const NEXT: i64 = 0;

/// The version an entry's writer expects the account to currently hold,
/// as carried on the wire. See `IGNORE` and `NEXT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedVersion {
	/// Don't check; always succeed and take the next version.
	Ignore,
	/// Assert this is the account's first write (current version is absent).
	Next,
	/// Assert the account's current version is exactly this value.
	Exact(u64),
}

impl ExpectedVersion {
	/// Decodes the wire representation: `-1` is `Ignore`, `0` is `Next`,
	/// any other non-negative value is `Exact`. Negative values other than
	/// `-1` are folded into `Ignore` to match the upstream sentinel scheme,
	/// where only `-1` carries meaning and any other negative input is
	/// otherwise unreachable from a validated client.
	pub fn from_wire(value: i64) -> Self {
		match value {
			IGNORE => ExpectedVersion::Ignore,
			NEXT => ExpectedVersion::Next,
			v if v > 0 => ExpectedVersion::Exact(v as u64),
			_ => ExpectedVersion::Ignore,
		}
	}

	pub fn to_wire(self) -> i64 {
		match self {
			ExpectedVersion::Ignore => IGNORE,
			ExpectedVersion::Next => NEXT,
			ExpectedVersion::Exact(v) => v as i64,
		}
	}
}

/// The `IGNORE` sentinel as returned for a synthetic account's current
/// version, since synthetic paths have no version registry row of their own.
pub const SYNTHETIC_VERSION: AccountVersion = AccountVersion(u64::MAX);

/// An account's current version-registry value. `u64::MAX` is reserved to
/// represent the `IGNORE` sentinel on reads of synthetic accounts; it is
/// never a version a real analytical account can reach (commits would have
/// to run for longer than the age of the universe).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccountVersion(pub u64);

impl AccountVersion {
	pub fn is_synthetic_sentinel(self) -> bool {
		self == SYNTHETIC_VERSION
	}

	pub fn as_wire(self) -> i64 {
		if self.is_synthetic_sentinel() {
			IGNORE
		} else {
			self.0 as i64
		}
	}
}

impl Display for AccountVersion {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn decodes_sentinels() {
		assert_eq!(ExpectedVersion::from_wire(-1), ExpectedVersion::Ignore);
		assert_eq!(ExpectedVersion::from_wire(0), ExpectedVersion::Next);
		assert_eq!(ExpectedVersion::from_wire(7), ExpectedVersion::Exact(7));
	}

	#[test]
	fn synthetic_sentinel_round_trips_to_ignore() {
		assert_eq!(SYNTHETIC_VERSION.as_wire(), IGNORE);
	}
}
