// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! PEERS server binary.

use std::path::PathBuf;

use clap::Parser;
use peers_server::{create_app_state, create_router};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// PEERS server - administrator operations over HTTP.
#[derive(Parser, Debug)]
#[command(name = "peers-server", about = "PEERS administrator server", version)]
struct Args {
	/// Config file to read instead of /etc/peers/server.toml
	#[arg(long, env = "PEERS_SERVER_CONFIG")]
	config: Option<PathBuf>,

	/// Emit logs as JSON lines
	#[arg(long)]
	log_json: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	// Load .env file if present
	dotenvy::dotenv().ok();

	let args = Args::parse();

	let config = match &args.config {
		Some(path) => peers_server_config::load_config_with_file(path)?,
		None => peers_server_config::load_config()?,
	};

	let filter = tracing_subscriber::EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| config.logging.level.clone().into());
	let registry = tracing_subscriber::registry().with(filter);
	if args.log_json {
		registry
			.with(tracing_subscriber::fmt::layer().json())
			.init();
	} else {
		registry.with(tracing_subscriber::fmt::layer()).init();
	}

	tracing::info!(
		host = %config.http.host,
		port = config.http.port,
		database = %config.database.url,
		"starting peers-server"
	);

	let pool = peers_server_db::create_pool(&config.database.url).await?;
	peers_server_db::run_migrations(&pool).await?;

	let state = create_app_state(pool, &config);
	let app = create_router(state).layer(TraceLayer::new_for_http());

	let listener = tokio::net::TcpListener::bind(config.socket_addr()).await?;
	tracing::info!(addr = %listener.local_addr()?, "listening");

	axum::serve(listener, app)
		.with_graceful_shutdown(shutdown_signal())
		.await?;

	tracing::info!("server stopped");
	Ok(())
}

async fn shutdown_signal() {
	if let Err(e) = tokio::signal::ctrl_c().await {
		tracing::error!(error = %e, "failed to listen for shutdown signal");
		std::future::pending::<()>().await;
	}
	tracing::info!("shutdown signal received");
}
