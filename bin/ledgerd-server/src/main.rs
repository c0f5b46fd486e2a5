// Copyright (c) ledgerd.dev 2026
// This file is licensed under the Apache-2.0 license, see license.md file

use std::sync::Arc;

use ledgerd_config::{Config, LogFormat};
use ledgerd_engine::LedgerFacade;
use ledgerd_grpc::{health_proto, proto, HealthService, LedgerGrpcService};
use ledgerd_store::MemoryStore;
use tokio_util::sync::CancellationToken;
use tonic::transport::Server;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
	let config = match Config::load() {
		Ok(config) => config,
		Err(err) => {
			eprintln!("failed to load configuration: {err}");
			std::process::exit(1);
		}
	};

	init_tracing(&config);
	tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting ledgerd");

	if let Err(err) = run(config).await {
		tracing::error!(error = %err, "ledgerd exited with an error");
		std::process::exit(1);
	}
}

fn init_tracing(config: &Config) {
	let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
	let subscriber = tracing_subscriber::fmt().with_env_filter(filter);
	match config.log_format {
		LogFormat::Json => subscriber.json().init(),
		LogFormat::Pretty => subscriber.pretty().init(),
	}
}

async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
	let store = Arc::new(MemoryStore::new());
	let facade = Arc::new(LedgerFacade::new(store));

	let shutdown = CancellationToken::new();

	let grpc_addr = format!("{}:{}", config.grpc_host, config.grpc_port).parse()?;
	let ledger_service = LedgerGrpcService::new(facade.clone());
	let grpc_shutdown = shutdown.clone();
	let grpc_task = tokio::spawn(async move {
		tracing::info!(addr = %grpc_addr, "grpc server listening");
		Server::builder()
			.add_service(proto::ledger_service_server::LedgerServiceServer::new(ledger_service))
			.add_service(health_proto::health_server::HealthServer::new(HealthService))
			.serve_with_shutdown(grpc_addr, grpc_shutdown.cancelled_owned())
			.await
	});

	let http_addr = format!("{}:{}", config.http_host, config.http_port);
	let http_router = ledgerd_http::router(facade, config.read_timeout);
	let http_shutdown = shutdown.clone();
	let http_task = tokio::spawn(async move {
		tracing::info!(addr = %http_addr, "http gateway listening");
		let listener = tokio::net::TcpListener::bind(&http_addr).await?;
		axum::serve(listener, http_router)
			.with_graceful_shutdown(http_shutdown.cancelled_owned())
			.await
	});

	wait_for_shutdown_signal().await;
	tracing::info!("shutdown signal received, stopping servers");
	shutdown.cancel();

	let (grpc_result, http_result) = tokio::join!(grpc_task, http_task);
	grpc_result??;
	http_result??;

	tracing::info!("ledgerd stopped");
	Ok(())
}

async fn wait_for_shutdown_signal() {
	let ctrl_c = async {
		tokio::signal::ctrl_c().await.expect("failed to install ctrl-c handler");
	};

	#[cfg(unix)]
	let terminate = async {
		tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
			.expect("failed to install SIGTERM handler")
			.recv()
			.await;
	};

	#[cfg(not(unix))]
	let terminate = std::future::pending::<()>();

	tokio::select! {
		_ = ctrl_c => {}
		_ = terminate => {}
	}
}
