// Copyright (c) ledgerd.dev 2026
// This file is licensed under the Apache-2.0 license, see license.md file

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An opaque structured payload attached to an entry, stored verbatim and
/// never interpreted by the ledger.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(Map<String, Value>);

impl Metadata {
	pub fn new(fields: Map<String, Value>) -> Self {
		Self(fields)
	}

	pub fn empty() -> Self {
		Self(Map::new())
	}

	pub fn as_map(&self) -> &Map<String, Value> {
		&self.0
	}

	pub fn into_map(self) -> Map<String, Value> {
		self.0
	}
}

impl From<Map<String, Value>> for Metadata {
	fn from(value: Map<String, Value>) -> Self {
		Self(value)
	}
}
