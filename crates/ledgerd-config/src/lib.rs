// Copyright (c) ledgerd.dev 2026
// This file is licensed under the Apache-2.0 license, see license.md file

//! Process configuration: one `Config` loaded once at startup from
//! environment variables (with CLI overrides for local runs), validated
//! eagerly so a malformed deployment fails before a socket is opened.

use std::time::Duration;

use clap::Parser;
use ledgerd_diagnostic::Error;

#[derive(Parser, Debug, Clone)]
#[command(name = "ledgerd")]
#[command(about = "Double-entry ledger server", long_about = None)]
#[command(version)]
pub struct Config {
	/// Connection string for the relational backend. The in-process store
	/// shipped today ignores it; it is read and validated so a future
	/// SQL-backed `LedgerStore` can be dropped in without a config change.
	#[arg(long, env = "LEDGERD_DATABASE_URL", default_value = "postgres://localhost/ledgerd")]
	pub database_url: String,

	/// Host the gRPC server binds to.
	#[arg(long, env = "LEDGERD_GRPC_HOST", default_value = "0.0.0.0")]
	pub grpc_host: String,

	/// Port the gRPC server binds to.
	#[arg(long, env = "LEDGERD_GRPC_PORT", default_value = "50051")]
	pub grpc_port: u16,

	/// Host the HTTP/JSON gateway binds to.
	#[arg(long, env = "LEDGERD_HTTP_HOST", default_value = "0.0.0.0")]
	pub http_host: String,

	/// Port the HTTP/JSON gateway binds to.
	#[arg(long, env = "LEDGERD_HTTP_PORT", default_value = "8080")]
	pub http_port: u16,

	/// Grace period for in-flight requests after a shutdown signal.
	#[arg(long, env = "LEDGERD_SHUTDOWN_TIMEOUT", value_parser = parse_duration, default_value = "10s")]
	pub shutdown_timeout: Duration,

	/// Per-request read timeout.
	#[arg(long, env = "LEDGERD_READ_TIMEOUT", value_parser = parse_duration, default_value = "5s")]
	pub read_timeout: Duration,

	/// Per-request write timeout.
	#[arg(long, env = "LEDGERD_WRITE_TIMEOUT", value_parser = parse_duration, default_value = "5s")]
	pub write_timeout: Duration,

	/// `tracing-subscriber` `EnvFilter` directive, e.g. `info` or `ledgerd=debug`.
	#[arg(long, env = "LEDGERD_LOG_LEVEL", default_value = "info")]
	pub log_level: String,

	/// Log encoding: `json` for production, `pretty` for local development.
	#[arg(long, env = "LEDGERD_LOG_FORMAT", default_value = "json")]
	pub log_format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
	Json,
	Pretty,
}

impl Config {
	/// Parses CLI arguments (env-overridable) and validates the result. The
	/// only entry point production code should use; tests construct
	/// `Config` values by hand.
	pub fn load() -> Result<Self, Error> {
		let config = Self::parse();
		config.validate()?;
		Ok(config)
	}

	fn validate(&self) -> Result<(), Error> {
		if self.grpc_host == self.http_host && self.grpc_port == self.http_port {
			return Err(Error::internal("grpc and http listeners cannot share host and port"));
		}
		if self.shutdown_timeout.is_zero() {
			return Err(Error::internal("shutdown timeout must be positive"));
		}
		if self.database_url.is_empty() {
			return Err(Error::internal("database url must not be empty"));
		}
		Ok(())
	}
}

fn parse_duration(raw: &str) -> Result<Duration, String> {
	let raw = raw.trim();
	let (number, unit) = if let Some(stripped) = raw.strip_suffix("ms") {
		(stripped, "ms")
	} else if let Some(stripped) = raw.strip_suffix('s') {
		(stripped, "s")
	} else if let Some(stripped) = raw.strip_suffix('m') {
		(stripped, "m")
	} else if let Some(stripped) = raw.strip_suffix('h') {
		(stripped, "h")
	} else {
		(raw, "s")
	};

	let value: u64 = number.parse().map_err(|_| format!("invalid duration number: {number}"))?;
	Ok(match unit {
		"ms" => Duration::from_millis(value),
		"s" => Duration::from_secs(value),
		"m" => Duration::from_secs(value * 60),
		"h" => Duration::from_secs(value * 3600),
		_ => unreachable!("unit is one of the four matched above"),
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_plain_seconds() {
		assert_eq!(parse_duration("30s").unwrap(), Duration::from_secs(30));
		assert_eq!(parse_duration("60").unwrap(), Duration::from_secs(60));
	}

	#[test]
	fn parses_other_units() {
		assert_eq!(parse_duration("500ms").unwrap(), Duration::from_millis(500));
		assert_eq!(parse_duration("5m").unwrap(), Duration::from_secs(300));
		assert_eq!(parse_duration("1h").unwrap(), Duration::from_secs(3600));
	}

	#[test]
	fn rejects_colliding_listeners() {
		let mut config = sample_config();
		config.http_host = config.grpc_host.clone();
		config.http_port = config.grpc_port;
		assert!(config.validate().is_err());
	}

	fn sample_config() -> Config {
		Config {
			database_url: "postgres://localhost/ledgerd".into(),
			grpc_host: "0.0.0.0".into(),
			grpc_port: 50051,
			http_host: "0.0.0.0".into(),
			http_port: 8080,
			shutdown_timeout: Duration::from_secs(10),
			read_timeout: Duration::from_secs(5),
			write_timeout: Duration::from_secs(5),
			log_level: "info".into(),
			log_format: LogFormat::Json,
		}
	}
}
