// Copyright (c) ledgerd.dev 2026
// This file is licensed under the Apache-2.0 license, see license.md file

//! Core value types shared across the ledger: account paths, operations,
//! version sentinels, and money.

mod account_path;
mod money;
mod operation;
mod version;

pub use account_path::{AccountKind, AccountPath, MAX_COMPONENT_LEN, MAX_DEPTH, MIN_DEPTH};
pub use money::Amount;
pub use operation::Operation;
pub use version::{AccountVersion, ExpectedVersion, IGNORE, NEXT, SYNTHETIC_VERSION};

pub use uuid::Uuid;

/// Globally unique, client-supplied entry identifier. Doubles as the
/// idempotency key.
pub type EntryId = Uuid;
/// Client-supplied transaction identifier. Not unique-keyed by itself;
/// idempotency is enforced per entry id.
pub type TransactionId = Uuid;
