// Copyright (c) ledgerd.dev 2026
// This file is licensed under the Apache-2.0 license, see license.md file

use std::fmt::{self, Display, Formatter};

use ledgerd_diagnostic::{Error, Kind};
use serde::{Deserialize, Serialize};

/// A strictly positive amount, in minor units (e.g. cents). Zero and
/// negative amounts are rejected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Amount(u64);

impl Amount {
	pub fn new(value: u64) -> Result<Self, Error> {
		if value == 0 {
			return Err(Kind::InvalidAmount.into());
		}
		Ok(Self(value))
	}

	pub fn get(self) -> u64 {
		self.0
	}
}

impl Display for Amount {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}
