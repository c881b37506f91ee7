// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Login accounts.
//!
//! One row per email. Emails compare case-insensitively (`COLLATE NOCASE`).
//! Only the Argon2id hash of the password is stored.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use peers_server_provisioning::{IdentityError, IdentityStore, NewAccount, Uid, UserAccount};
use sqlx::{sqlite::SqlitePool, Row};

use crate::error::DbError;
use crate::password::{hash_password, verify_password};

/// Repository for account database operations.
#[derive(Clone)]
pub struct AccountRepository {
	pool: SqlitePool,
}

impl AccountRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// Look up an account by email.
	#[tracing::instrument(skip(self))]
	pub async fn get_account_by_email(&self, email: &str) -> Result<Option<UserAccount>, DbError> {
		let row = sqlx::query(
			r#"
			SELECT uid, email, display_name, email_verified, disabled, created_at
			FROM accounts
			WHERE email = ?
			"#,
		)
		.bind(email)
		.fetch_optional(&self.pool)
		.await?;

		Ok(row.map(|r| account_from_row(&r)))
	}

	/// Insert a new account.
	///
	/// # Database Constraints
	/// - `email` must be unique (case-insensitive); a duplicate is `DbError::Conflict`
	#[tracing::instrument(skip(self, account), fields(email = %account.email))]
	pub async fn create_account(&self, account: &NewAccount) -> Result<UserAccount, DbError> {
		let password_hash = hash_password(&account.password)?;
		let uid = Uid::generate();
		let created_at = Utc::now();

		sqlx::query(
			r#"
			INSERT INTO accounts (uid, email, display_name, password_hash, email_verified, disabled, created_at)
			VALUES (?, ?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(uid.as_str())
		.bind(&account.email)
		.bind(&account.display_name)
		.bind(&password_hash)
		.bind(account.email_verified)
		.bind(account.disabled)
		.bind(created_at)
		.execute(&self.pool)
		.await
		.map_err(|e| {
			DbError::conflict_on_unique(e, format!("an account already exists for {}", account.email))
		})?;

		tracing::debug!(uid = %uid, "account created");
		Ok(UserAccount {
			uid,
			email: account.email.clone(),
			display_name: account.display_name.clone(),
			email_verified: account.email_verified,
			disabled: account.disabled,
			created_at,
		})
	}

	/// Check a password against the stored hash.
	///
	/// Returns `false` for unknown emails and disabled accounts. The server
	/// never signs users in itself; this is the read side for the sign-in
	/// front end and for tests.
	#[tracing::instrument(skip(self, password))]
	pub async fn verify_credentials(&self, email: &str, password: &str) -> Result<bool, DbError> {
		let row = sqlx::query("SELECT password_hash, disabled FROM accounts WHERE email = ?")
			.bind(email)
			.fetch_optional(&self.pool)
			.await?;

		let Some(row) = row else {
			return Ok(false);
		};
		if row.get::<bool, _>("disabled") {
			return Ok(false);
		}
		verify_password(password, &row.get::<String, _>("password_hash"))
	}

	/// Inspection helper for tests and operators.
	pub async fn count_accounts(&self) -> Result<i64, DbError> {
		let row = sqlx::query("SELECT COUNT(*) AS n FROM accounts")
			.fetch_one(&self.pool)
			.await?;
		Ok(row.get("n"))
	}
}

fn account_from_row(row: &sqlx::sqlite::SqliteRow) -> UserAccount {
	UserAccount {
		uid: Uid::new(row.get::<String, _>("uid")),
		email: row.get("email"),
		display_name: row.get("display_name"),
		email_verified: row.get("email_verified"),
		disabled: row.get("disabled"),
		created_at: row.get::<DateTime<Utc>, _>("created_at"),
	}
}

#[async_trait]
impl IdentityStore for AccountRepository {
	async fn get_by_email(&self, email: &str) -> Result<UserAccount, IdentityError> {
		self
			.get_account_by_email(email)
			.await?
			.ok_or_else(|| IdentityError::NotFound {
				email: email.to_string(),
			})
	}

	async fn create(&self, account: NewAccount) -> Result<UserAccount, IdentityError> {
		Ok(self.create_account(&account).await?)
	}
}
