// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Outbound mail records awaiting the external delivery worker.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use peers_server_provisioning::{MailMessage, MailQueue, MailRecord, StoreError};
use serde::Serialize;
use sqlx::{sqlite::SqlitePool, Row};
use uuid::Uuid;

use crate::error::DbError;

/// State of a freshly appended record. Later states belong to the worker.
pub const PENDING_STATE: &str = "pending";

/// A stored outbox row.
#[derive(Debug, Clone, Serialize)]
pub struct OutboxEntry {
	pub id: String,
	pub collection: String,
	pub record: MailRecord,
	pub state: String,
	pub created_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct MailOutboxRepository {
	pool: SqlitePool,
}

impl MailOutboxRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// Append a record in the `pending` state and return its id.
	#[tracing::instrument(skip(self, record), fields(recipients = record.to.len()))]
	pub async fn enqueue(&self, collection: &str, record: &MailRecord) -> Result<String, DbError> {
		let id = Uuid::new_v4().to_string();
		let recipients = serde_json::to_string(&record.to)?;

		sqlx::query(
			r#"
			INSERT INTO mail_outbox (id, collection, recipients, subject, body, state, created_at)
			VALUES (?, ?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(&id)
		.bind(collection)
		.bind(&recipients)
		.bind(&record.message.subject)
		.bind(&record.message.text)
		.bind(PENDING_STATE)
		.bind(Utc::now())
		.execute(&self.pool)
		.await?;

		tracing::debug!(id = %id, "mail record enqueued");
		Ok(id)
	}

	/// Pending records in `collection`, oldest first.
	///
	/// Inspection helper for the external delivery worker and tests; the
	/// server only enqueues.
	pub async fn list_pending(&self, collection: &str) -> Result<Vec<OutboxEntry>, DbError> {
		let rows = sqlx::query(
			r#"
			SELECT id, collection, recipients, subject, body, state, created_at
			FROM mail_outbox
			WHERE collection = ? AND state = ?
			ORDER BY created_at ASC, rowid ASC
			"#,
		)
		.bind(collection)
		.bind(PENDING_STATE)
		.fetch_all(&self.pool)
		.await?;

		rows
			.iter()
			.map(|row| -> Result<OutboxEntry, DbError> {
				let recipients: String = row.get("recipients");
				Ok(OutboxEntry {
					id: row.get("id"),
					collection: row.get("collection"),
					record: MailRecord {
						to: serde_json::from_str(&recipients)?,
						message: MailMessage {
							subject: row.get("subject"),
							text: row.get("body"),
						},
					},
					state: row.get("state"),
					created_at: row.get("created_at"),
				})
			})
			.collect()
	}
}

#[async_trait]
impl MailQueue for MailOutboxRepository {
	async fn append(&self, collection: &str, record: MailRecord) -> Result<(), StoreError> {
		self.enqueue(collection, &record).await?;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::create_migrated_test_pool;

	fn record(to: &str, text: &str) -> MailRecord {
		MailRecord {
			to: vec![to.to_string()],
			message: MailMessage {
				subject: "Your PEERS temporary password".to_string(),
				text: text.to_string(),
			},
		}
	}

	#[tokio::test]
	async fn appended_records_are_pending_in_order() {
		let repo = MailOutboxRepository::new(create_migrated_test_pool().await);
		repo.append("mail", record("a@uni.edu", "first")).await.unwrap();
		repo.append("mail", record("b@uni.edu", "second")).await.unwrap();

		let pending = repo.list_pending("mail").await.unwrap();
		assert_eq!(pending.len(), 2);
		assert_eq!(pending[0].record.to, vec!["a@uni.edu".to_string()]);
		assert_eq!(pending[0].record.message.text, "first");
		assert_eq!(pending[1].record.message.text, "second");
		assert!(pending.iter().all(|e| e.state == PENDING_STATE));
		assert_ne!(pending[0].id, pending[1].id);
	}

	#[tokio::test]
	async fn identical_records_are_not_deduplicated() {
		let repo = MailOutboxRepository::new(create_migrated_test_pool().await);
		repo.append("mail", record("a@uni.edu", "same")).await.unwrap();
		repo.append("mail", record("a@uni.edu", "same")).await.unwrap();
		assert_eq!(repo.list_pending("mail").await.unwrap().len(), 2);
	}

	#[tokio::test]
	async fn other_collections_are_filtered() {
		let repo = MailOutboxRepository::new(create_migrated_test_pool().await);
		repo.append("digest", record("a@uni.edu", "x")).await.unwrap();
		assert!(repo.list_pending("mail").await.unwrap().is_empty());
	}
}
