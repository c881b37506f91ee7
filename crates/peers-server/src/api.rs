// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Application state and router construction.

use std::sync::Arc;

use axum::{
	routing::{get, post},
	Router,
};
use peers_server_auth::StaticAllowlist;
use peers_server_config::{IdentityConfig, ServerConfig};
use peers_server_db::{AccountRepository, DocumentRepository, MailOutboxRepository};
use peers_server_provisioning::{AdminProvisionUser, InvitationTemplate};
use sqlx::sqlite::SqlitePool;

use crate::routes;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
	pub pool: SqlitePool,
	pub provisioning: Arc<AdminProvisionUser>,
	/// Names of the proxy headers carrying the caller identity.
	pub identity: Arc<IdentityConfig>,
}

/// Wire the SQLite stores and the configured allowlist into the state.
pub fn create_app_state(pool: SqlitePool, config: &ServerConfig) -> AppState {
	let policy = Arc::new(StaticAllowlist::new(&config.admin.emails));
	let provisioning = AdminProvisionUser::new(
		policy,
		Arc::new(AccountRepository::new(pool.clone())),
		Arc::new(DocumentRepository::new(pool.clone())),
		Arc::new(MailOutboxRepository::new(pool.clone())),
		InvitationTemplate::new(config.mail.product_name.clone()),
	);

	AppState {
		pool,
		provisioning: Arc::new(provisioning),
		identity: Arc::new(config.identity.clone()),
	}
}

pub fn create_router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(routes::health::health_check))
		.route("/api/admin/users", post(routes::provision::provision_user))
		.with_state(state)
}
