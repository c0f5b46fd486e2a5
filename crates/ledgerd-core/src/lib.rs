// Copyright (c) ledgerd.dev 2026
// This file is licensed under the Apache-2.0 license, see license.md file

//! Entry/transaction domain model and stored-row shapes for the ledger.

mod entry;
mod metadata;
mod rows;
mod transaction;

pub use entry::{parse_id, Entry};
pub use metadata::Metadata;
pub use rows::{SnapshotRow, StoredEntry, VersionRow};
pub use transaction::{parse_transaction_id, Transaction};
