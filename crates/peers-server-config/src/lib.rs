// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Centralized configuration management for the PEERS server.
//!
//! This crate provides:
//! - Layered configuration from multiple sources (defaults, TOML file, environment)
//! - Consistent environment variable naming (`PEERS_SERVER_*`)
//! - The administrator allowlist consulted by user provisioning
//!
//! # Usage
//!
//! ```ignore
//! use peers_server_config::load_config;
//!
//! let config = load_config()?;
//! println!("Server listening on {}", config.socket_addr());
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::ServerConfigLayer;
pub use sections::*;
pub use sources::{
	ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource, SYSTEM_CONFIG_PATH,
};

use tracing::{debug, info, warn};

/// Fully resolved server configuration.
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
	pub http: HttpConfig,
	pub database: DatabaseConfig,
	pub admin: AdminConfig,
	pub identity: IdentityConfig,
	pub logging: LoggingConfig,
	pub mail: MailConfig,
}

impl ServerConfig {
	/// Get the socket address string for binding.
	pub fn socket_addr(&self) -> String {
		format!("{}:{}", self.http.host, self.http.port)
	}
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`PEERS_SERVER_*`)
/// 2. Config file (`/etc/peers/server.toml`)
/// 3. Built-in defaults
pub fn load_config() -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::system()),
		Box::new(EnvSource::new()),
	])
}

/// Load configuration from environment only (for testing or simple deployments).
pub fn load_config_from_env() -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![Box::new(EnvSource::new())])
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(
	config_path: impl Into<std::path::PathBuf>,
) -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource::new()),
	])
}

/// Merge the given sources in precedence order and finalize the result.
pub fn load_from_sources(
	mut sources: Vec<Box<dyn ConfigSource>>,
) -> Result<ServerConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = ServerConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	finalize(merged)
}

/// Finalize configuration layer into resolved config.
fn finalize(layer: ServerConfigLayer) -> Result<ServerConfig, ConfigError> {
	let http = layer.http.unwrap_or_default().finalize();
	let database = layer.database.unwrap_or_default().finalize();
	let admin = layer.admin.unwrap_or_default().finalize();
	let identity = layer.identity.unwrap_or_default().finalize();
	let logging = layer.logging.unwrap_or_default().finalize();
	let mail = layer.mail.unwrap_or_default().finalize();

	validate_config(&identity)?;

	if admin.emails.is_empty() {
		warn!("No administrator emails configured; every provisioning call will be denied");
	}

	info!(
		host = %http.host,
		port = http.port,
		database = %database.url,
		admins = admin.emails.len(),
		email_header = %identity.email_header,
		product = %mail.product_name,
		"Server configuration loaded"
	);

	Ok(ServerConfig {
		http,
		database,
		admin,
		identity,
		logging,
		mail,
	})
}

/// Validate cross-field configuration rules.
fn validate_config(identity: &IdentityConfig) -> Result<(), ConfigError> {
	for header in [&identity.email_header, &identity.verified_header] {
		if header.is_empty() || !header.bytes().all(is_header_name_byte) {
			return Err(ConfigError::Validation(format!(
				"'{header}' is not a valid HTTP header name"
			)));
		}
	}

	if identity.email_header == identity.verified_header {
		return Err(ConfigError::Validation(
			"PEERS_SERVER_IDENTITY_EMAIL_HEADER and PEERS_SERVER_IDENTITY_VERIFIED_HEADER \
			 must name different headers"
				.to_string(),
		));
	}

	Ok(())
}

fn is_header_name_byte(b: u8) -> bool {
	b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
}
