// Copyright (c) ledgerd.dev 2026
// This file is licensed under the Apache-2.0 license, see license.md file

use tonic::{Request, Response, Status};

use crate::health_proto::health_server::Health;
use crate::health_proto::health_check_response::ServingStatus;
use crate::health_proto::{HealthCheckRequest, HealthCheckResponse};

/// Minimal `grpc.health.v1.Health` responder. The in-process store has no
/// failure modes of its own to probe, so every check reports `SERVING`;
/// a SQL-backed store would wire a real connectivity probe in here.
#[derive(Debug, Default, Clone, Copy)]
pub struct HealthService;

#[tonic::async_trait]
impl Health for HealthService {
	async fn check(
		&self,
		_request: Request<HealthCheckRequest>,
	) -> Result<Response<HealthCheckResponse>, Status> {
		Ok(Response::new(HealthCheckResponse { status: ServingStatus::Serving as i32 }))
	}
}
