// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! JSON documents grouped in collections, keyed by string.

use async_trait::async_trait;
use chrono::Utc;
use peers_server_provisioning::{DocumentWrite, ProfileStore, StoreError};
use serde_json::{Map, Value};
use sqlx::{sqlite::SqlitePool, Row};

use crate::error::DbError;

#[derive(Clone)]
pub struct DocumentRepository {
	pool: SqlitePool,
}

impl DocumentRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// Create the document or merge `write` into it in one statement.
	///
	/// Top-level keys in the write replace the stored ones; all other stored
	/// keys are kept.
	#[tracing::instrument(skip(self, write), fields(fields = write.fields.len()))]
	pub async fn merge_document(
		&self,
		collection: &str,
		key: &str,
		write: DocumentWrite,
	) -> Result<(), DbError> {
		let now = Utc::now();
		let body = serde_json::to_string(&Value::Object(write.resolve(now)))?;

		sqlx::query(
			r#"
			INSERT INTO documents (collection, key, body, updated_at)
			VALUES (?, ?, json(?), ?)
			ON CONFLICT(collection, key) DO UPDATE SET
				body = json_patch(documents.body, excluded.body),
				updated_at = excluded.updated_at
			"#,
		)
		.bind(collection)
		.bind(key)
		.bind(&body)
		.bind(now)
		.execute(&self.pool)
		.await?;

		tracing::debug!("document merged");
		Ok(())
	}

	pub async fn get_document(
		&self,
		collection: &str,
		key: &str,
	) -> Result<Option<Map<String, Value>>, DbError> {
		let row = sqlx::query("SELECT body FROM documents WHERE collection = ? AND key = ?")
			.bind(collection)
			.bind(key)
			.fetch_optional(&self.pool)
			.await?;

		match row {
			Some(row) => {
				let body: String = row.get("body");
				match serde_json::from_str(&body)? {
					Value::Object(map) => Ok(Some(map)),
					_ => Err(DbError::Internal(format!(
						"document {collection}/{key} is not a JSON object"
					))),
				}
			}
			None => Ok(None),
		}
	}

	/// Inspection helper for tests and operators.
	pub async fn count_documents(&self, collection: &str) -> Result<i64, DbError> {
		let row = sqlx::query("SELECT COUNT(*) AS n FROM documents WHERE collection = ?")
			.bind(collection)
			.fetch_one(&self.pool)
			.await?;
		Ok(row.get("n"))
	}
}

#[async_trait]
impl ProfileStore for DocumentRepository {
	async fn upsert_merge(
		&self,
		collection: &str,
		key: &str,
		write: DocumentWrite,
	) -> Result<(), StoreError> {
		Ok(self.merge_document(collection, key, write).await?)
	}
}
