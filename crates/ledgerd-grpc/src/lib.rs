// Copyright (c) ledgerd.dev 2026
// This file is licensed under the Apache-2.0 license, see license.md file

//! `tonic`/`prost` surface for the ledger: the `LedgerService` defined in
//! `proto/ledger.proto`, plus a minimal `grpc.health.v1.Health` responder.
//! Handlers translate wire types to domain types, call the use-case facade,
//! and translate `Kind` to a `tonic::Status`; they never encode business
//! rules of their own.

mod convert;
mod health;
mod service;
mod status;

pub mod proto {
	tonic::include_proto!("ledger");
}

pub mod health_proto {
	tonic::include_proto!("grpc.health.v1");
}

pub use health::HealthService;
pub use service::LedgerGrpcService;
