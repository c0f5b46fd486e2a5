// Copyright (c) ledgerd.dev 2026
// This file is licensed under the Apache-2.0 license, see license.md file

//! `axum` JSON gateway for the ledger: transcodes the same four operations
//! the gRPC service exposes onto HTTP routes, plus `/healthz`, `/version`,
//! and a minimal `/metrics` text endpoint.

mod dto;
mod error;
mod handlers;
mod metrics;
mod router;
mod state;

pub use router::router;
