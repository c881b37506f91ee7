// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use sqlx::sqlite::SqlitePool;

use crate::error::DbError;

const MIGRATIONS: &[(&str, &str)] = &[
	(
		"001_create_accounts",
		include_str!("../migrations/001_create_accounts.sql"),
	),
	(
		"002_create_documents",
		include_str!("../migrations/002_create_documents.sql"),
	),
	(
		"003_create_mail_outbox",
		include_str!("../migrations/003_create_mail_outbox.sql"),
	),
];

/// Create the `accounts`, `documents` and `mail_outbox` tables.
///
/// Every statement is idempotent, so this runs on each startup.
#[tracing::instrument(skip(pool))]
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), DbError> {
	for (name, sql) in MIGRATIONS {
		for stmt in sql.split(';').filter(|s| !s.trim().is_empty()) {
			sqlx::query(stmt).execute(pool).await?;
		}
		tracing::debug!(migration = name, "migration applied");
	}
	Ok(())
}
