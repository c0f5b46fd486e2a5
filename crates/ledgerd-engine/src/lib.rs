// Copyright (c) ledgerd.dev 2026
// This file is licensed under the Apache-2.0 license, see license.md file

//! The ledger's core use cases, built on top of the [`ledgerd_store::LedgerStore`]
//! capability trait: the transaction committer, the balance engine, the
//! entry pager, the synthetic reporter, and the version registry, wired
//! together behind [`LedgerFacade`].

mod balance;
mod committer;
mod facade;
mod pager;
mod report;
mod version;

pub use balance::{AccountBalance, BalanceEngine};
pub use committer::Committer;
pub use facade::LedgerFacade;
pub use pager::{EntryPager, PageRequest, MAX_PAGE_SIZE};
pub use report::{Report, SyntheticReporter};
pub use version::VersionRegistry;
