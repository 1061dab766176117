// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Roster account provisioning server binary.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use roster_provisioning::ProvisioningService;
use roster_server::{create_router, AppState, ServerConfig, StoreBackend};
use roster_store::{
	MemoryDocumentStore, MemoryIdentityStore, RestDocumentStore, RestIdentityStore,
	RestStoreConfig,
};
use tower_http::{
	cors::{Any, CorsLayer},
	trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod version;

/// Roster server - HTTP server for account provisioning.
#[derive(Parser, Debug)]
#[command(name = "roster-server", about = "Roster account provisioning server", version)]
struct Args {
	/// Path to the config file (defaults to /etc/roster/server.toml)
	#[arg(long)]
	config: Option<PathBuf>,

	/// Subcommands for roster-server (e.g., `version`)
	#[command(subcommand)]
	command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Show version and build information
	Version,
}

fn build_service(config: &ServerConfig) -> Result<Arc<ProvisioningService>, Box<dyn std::error::Error>> {
	let service = match config.store.backend {
		StoreBackend::Memory => {
			tracing::warn!("using in-memory stores; state will not survive a restart");
			ProvisioningService::new(
				Arc::new(MemoryIdentityStore::new()),
				Arc::new(MemoryDocumentStore::new()),
			)
		}
		StoreBackend::Rest => {
			// load_config validated both fields for this backend.
			let admin_url = config
				.store
				.admin_url
				.clone()
				.ok_or("store.admin_url missing")?;
			let token = config
				.store
				.service_token
				.clone()
				.ok_or("store service token missing")?;
			let rest_config = RestStoreConfig::new(admin_url, token);
			ProvisioningService::new(
				Arc::new(RestIdentityStore::new(rest_config.clone())?),
				Arc::new(RestDocumentStore::new(rest_config)?),
			)
		}
	};
	Ok(Arc::new(service))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	// Handle subcommands that should not start the server
	if let Some(Command::Version) = args.command {
		println!("{}", version::format_version_info());
		return Ok(());
	}

	// Load .env file if present
	dotenvy::dotenv().ok();

	let config = roster_server::load_config(args.config.as_deref())?;

	tracing_subscriber::registry()
		.with(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| config.logging.level.clone().into()),
		)
		.with(tracing_subscriber::fmt::layer())
		.init();

	tracing::info!(
		host = %config.http.host,
		port = config.http.port,
		backend = ?config.store.backend,
		"starting roster-server"
	);

	if config.auth.token.is_none() {
		tracing::warn!("no caller token configured; all lifecycle calls will be rejected");
	}

	let provisioning = build_service(&config)?;
	let state = AppState { provisioning };

	let app = create_router(state, config.auth.token.clone())
		.layer(TraceLayer::new_for_http())
		.layer(
			CorsLayer::new()
				.allow_origin(Any)
				.allow_methods(Any)
				.allow_headers(Any),
		);

	let addr = config.socket_addr();
	tracing::info!("listening on {}", addr);

	let listener = tokio::net::TcpListener::bind(&addr).await?;

	tokio::select! {
		result = axum::serve(listener, app) => {
			if let Err(e) = result {
				tracing::error!(error = %e, "Server error");
			}
		}
		_ = tokio::signal::ctrl_c() => {
			tracing::info!("Received shutdown signal");
		}
	}

	tracing::info!("Server shutdown complete");
	Ok(())
}
