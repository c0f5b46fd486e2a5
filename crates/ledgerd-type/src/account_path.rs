// Copyright (c) ledgerd.dev 2026
// This file is licensed under the Apache-2.0 license, see license.md file

use std::fmt::{self, Display, Formatter};

use ledgerd_diagnostic::{Error, Kind};
use serde::{Deserialize, Serialize};

/// Minimum number of dot-separated labels an account path may have.
pub const MIN_DEPTH: usize = 3;
/// Maximum number of dot-separated labels an account path may have.
pub const MAX_DEPTH: usize = 7;
/// Maximum length, in bytes, of a single label.
pub const MAX_COMPONENT_LEN: usize = 255;

/// Whether a path addresses a single account (`Analytical`) or a subtree of
/// accounts (`Synthetic`, ending in a `*` wildcard label).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountKind {
	Analytical,
	Synthetic,
}

/// A validated, dot-separated account path such as `liability.clients.u1`
/// or, for a synthetic query, `liability.clients.*`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountPath {
	raw: String,
}

impl AccountPath {
	/// Parses and validates a raw account path.
	///
	/// Analytical labels must match `[A-Za-z0-9_]+`; a synthetic path may
	/// additionally end in a single `*` label. Depth must be within
	/// `[MIN_DEPTH, MAX_DEPTH]`.
	pub fn parse(raw: impl Into<String>) -> Result<Self, Error> {
		let raw = raw.into();
		let labels: Vec<&str> = raw.split('.').collect();

		if labels.len() < MIN_DEPTH || labels.len() > MAX_DEPTH {
			return Err(Kind::InvalidAccountDepth.into());
		}

		for (idx, label) in labels.iter().enumerate() {
			let is_last = idx == labels.len() - 1;
			if *label == "*" {
				if !is_last {
					return Err(Kind::InvalidSyntheticAccountComponentCharacters.into());
				}
				continue;
			}

			if label.is_empty() || label.len() > MAX_COMPONENT_LEN {
				return Err(Kind::InvalidAccountComponentSize.into());
			}

			if !label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_') {
				return Err(Kind::InvalidAccountComponentCharacters.into());
			}
		}

		Ok(Self { raw })
	}

	/// Parses a path that must be analytical (no wildcard).
	pub fn parse_analytical(raw: impl Into<String>) -> Result<Self, Error> {
		let path = Self::parse(raw)?;
		if path.is_synthetic() {
			return Err(Kind::InvalidAccountType.into());
		}
		Ok(path)
	}

	pub fn as_str(&self) -> &str {
		&self.raw
	}

	pub fn labels(&self) -> Vec<&str> {
		self.raw.split('.').collect()
	}

	pub fn depth(&self) -> usize {
		self.raw.split('.').count()
	}

	pub fn kind(&self) -> AccountKind {
		if self.is_synthetic() {
			AccountKind::Synthetic
		} else {
			AccountKind::Analytical
		}
	}

	pub fn is_analytical(&self) -> bool {
		self.kind() == AccountKind::Analytical
	}

	pub fn is_synthetic(&self) -> bool {
		self.raw.ends_with(".*") || self.raw == "*"
	}

	/// Labels making up the fixed prefix of a synthetic path (excludes the
	/// trailing `*`). For an analytical path this is all of its labels.
	pub fn prefix_labels(&self) -> Vec<&str> {
		let labels = self.labels();
		if self.is_synthetic() {
			labels[..labels.len() - 1].to_vec()
		} else {
			labels
		}
	}

	/// True if `self` is a synthetic path and `candidate` is an analytical
	/// path whose leading labels match `self`'s fixed prefix.
	pub fn matches_subtree(&self, candidate: &AccountPath) -> bool {
		if !self.is_synthetic() || !candidate.is_analytical() {
			return false;
		}
		let prefix = self.prefix_labels();
		let candidate_labels = candidate.labels();
		candidate_labels.len() >= prefix.len()
			&& candidate_labels[..prefix.len()] == prefix[..]
	}

	/// The dot-joined prefix of `self`'s labels of length `level`, used by
	/// the synthetic reporter to group analytical accounts. `level` must be
	/// within `[1, self.depth()]`.
	pub fn subpath(&self, level: usize) -> Option<String> {
		let labels = self.labels();
		if level == 0 || level > labels.len() {
			return None;
		}
		Some(labels[..level].join("."))
	}
}

impl Display for AccountPath {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str(&self.raw)
	}
}

impl TryFrom<String> for AccountPath {
	type Error = Error;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::parse(value)
	}
}

impl From<AccountPath> for String {
	fn from(value: AccountPath) -> Self {
		value.raw
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn accepts_minimum_depth() {
		assert!(AccountPath::parse("a.b.c").is_ok());
	}

	#[test]
	fn accepts_maximum_depth() {
		assert!(AccountPath::parse("a.b.c.d.e.f.g").is_ok());
	}

	#[test]
	fn rejects_too_shallow() {
		let err = AccountPath::parse("a.b").unwrap_err();
		assert!(err.is(&Kind::InvalidAccountDepth));
	}

	#[test]
	fn rejects_too_deep() {
		let err = AccountPath::parse("a.b.c.d.e.f.g.h").unwrap_err();
		assert!(err.is(&Kind::InvalidAccountDepth));
	}

	#[test]
	fn rejects_empty_component() {
		let err = AccountPath::parse("a..c").unwrap_err();
		assert!(err.is(&Kind::InvalidAccountComponentSize));
	}

	#[test]
	fn rejects_forbidden_characters() {
		let err = AccountPath::parse("a.b-c.d").unwrap_err();
		assert!(err.is(&Kind::InvalidAccountComponentCharacters));
	}

	#[test]
	fn rejects_wildcard_in_non_trailing_position() {
		let err = AccountPath::parse("a.*.c").unwrap_err();
		assert!(err.is(&Kind::InvalidSyntheticAccountComponentCharacters));
	}

	#[test]
	fn classifies_synthetic_and_analytical() {
		assert_eq!(AccountPath::parse("liability.clients.u1").unwrap().kind(), AccountKind::Analytical);
		assert_eq!(AccountPath::parse("liability.clients.*").unwrap().kind(), AccountKind::Synthetic);
	}

	#[test]
	fn matches_subtree_on_prefix() {
		let synthetic = AccountPath::parse("liability.clients.*").unwrap();
		let leaf = AccountPath::parse("liability.clients.u1").unwrap();
		let other = AccountPath::parse("asset.company.main").unwrap();
		assert!(synthetic.matches_subtree(&leaf));
		assert!(!synthetic.matches_subtree(&other));
	}

	#[test]
	fn subpath_groups_by_level() {
		let account = AccountPath::parse("liability.clients.u1").unwrap();
		assert_eq!(account.subpath(2).as_deref(), Some("liability.clients"));
		assert_eq!(account.subpath(1).as_deref(), Some("liability"));
		assert_eq!(account.subpath(0), None);
		assert_eq!(account.subpath(4), None);
	}
}
