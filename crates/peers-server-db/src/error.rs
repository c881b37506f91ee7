// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use peers_server_provisioning::{IdentityError, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum DbError {
	#[error("Database error: {0}")]
	Sqlx(#[from] sqlx::Error),

	#[error("Not found: {0}")]
	NotFound(String),

	#[error("Conflict: {0}")]
	Conflict(String),

	#[error("Internal: {0}")]
	Internal(String),

	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DbError>;

impl DbError {
	/// Map a unique-constraint violation to `Conflict`, keeping other errors.
	pub(crate) fn conflict_on_unique(err: sqlx::Error, message: impl Into<String>) -> Self {
		match err.as_database_error() {
			Some(db) if db.is_unique_violation() => DbError::Conflict(message.into()),
			_ => DbError::Sqlx(err),
		}
	}
}

impl From<DbError> for IdentityError {
	fn from(err: DbError) -> Self {
		match err {
			DbError::NotFound(email) => IdentityError::NotFound { email },
			other => IdentityError::Backend(other.to_string()),
		}
	}
}

impl From<DbError> for StoreError {
	fn from(err: DbError) -> Self {
		match err {
			DbError::Serialization(e) => StoreError::Serialization(e),
			other => StoreError::Backend(other.to_string()),
		}
	}
}
