// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Pools for tests.

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

/// An empty in-memory database.
///
/// Limited to one connection: each SQLite `:memory:` connection is its own
/// database.
pub async fn create_test_pool() -> SqlitePool {
	SqlitePoolOptions::new()
		.max_connections(1)
		.connect(":memory:")
		.await
		.unwrap()
}

/// An in-memory database with all tables created.
pub async fn create_migrated_test_pool() -> SqlitePool {
	let pool = create_test_pool().await;
	crate::run_migrations(&pool).await.unwrap();
	pool
}
