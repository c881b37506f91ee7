// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Collaborators reached by the provisioning operation.
//!
//! - [`IdentityStore`] - login accounts, one per email
//! - [`ProfileStore`] - document collections with upsert-merge writes
//! - [`MailQueue`] - append-only outbound mail collection drained by an
//!   external delivery worker

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use peers_common_secret::SecretString;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Collection holding user profiles, keyed by email.
pub const USERS_COLLECTION: &str = "users";

/// Collection consumed by the mail delivery worker.
pub const MAIL_COLLECTION: &str = "mail";

/// Status written on every provisioned profile.
pub const INVITED_STATUS: &str = "invited";

/// Opaque account identifier assigned by the identity store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Uid(String);

impl Uid {
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// A fresh random identifier (UUID v4, simple form).
	pub fn generate() -> Self {
		Self(uuid::Uuid::new_v4().simple().to_string())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn into_inner(self) -> String {
		self.0
	}
}

impl fmt::Display for Uid {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// A login account held by the identity store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserAccount {
	pub uid: Uid,
	pub email: String,
	pub display_name: String,
	pub email_verified: bool,
	pub disabled: bool,
	pub created_at: DateTime<Utc>,
}

/// Everything needed to create a login account.
#[derive(Debug, Clone)]
pub struct NewAccount {
	pub email: String,
	pub password: SecretString,
	pub display_name: String,
	pub email_verified: bool,
	pub disabled: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
	/// No account exists for the email. Callers may create one.
	#[error("no account exists for {email}")]
	NotFound { email: String },

	#[error("{0}")]
	Backend(String),
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
	#[error("{0}")]
	Backend(String),

	#[error("serialization error: {0}")]
	Serialization(#[from] serde_json::Error),
}

/// Identity-provider account storage.
#[async_trait]
pub trait IdentityStore: Send + Sync {
	/// Look up the account for `email`, or [`IdentityError::NotFound`].
	async fn get_by_email(&self, email: &str) -> Result<UserAccount, IdentityError>;

	/// Create an account. The store must only keep a hash of the password.
	async fn create(&self, account: NewAccount) -> Result<UserAccount, IdentityError>;
}

/// One write to a document.
///
/// `fields` replace the same keys of an existing document; keys named in
/// `server_timestamps` are filled with the commit time by the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentWrite {
	pub fields: Map<String, Value>,
	pub server_timestamps: Vec<String>,
}

impl DocumentWrite {
	/// Build a write from any value serializing to a JSON object.
	pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self, StoreError> {
		match serde_json::to_value(value)? {
			Value::Object(fields) => Ok(Self {
				fields,
				server_timestamps: Vec::new(),
			}),
			other => Err(StoreError::Backend(format!(
				"document must be a JSON object, got {other}"
			))),
		}
	}

	pub fn with_server_timestamp(mut self, field: impl Into<String>) -> Self {
		self.server_timestamps.push(field.into());
		self
	}

	/// Resolve server timestamps against `now`, yielding the fields to store.
	pub fn resolve(self, now: DateTime<Utc>) -> Map<String, Value> {
		let mut fields = self.fields;
		let stamp = now.to_rfc3339();
		for key in self.server_timestamps {
			fields.insert(key, Value::String(stamp.clone()));
		}
		fields
	}
}

/// Document database with create-or-merge writes.
#[async_trait]
pub trait ProfileStore: Send + Sync {
	async fn upsert_merge(
		&self,
		collection: &str,
		key: &str,
		write: DocumentWrite,
	) -> Result<(), StoreError>;
}

/// Profile written to `users/<email>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDocument {
	pub id: String,
	pub name: String,
	pub email: String,
	pub faculty: String,
	pub role: String,
	pub status: String,
}

impl ProfileDocument {
	/// The merge write for this profile, with `createdAt` set by the store.
	pub fn to_write(&self) -> Result<DocumentWrite, StoreError> {
		Ok(DocumentWrite::from_serialize(self)?.with_server_timestamp("createdAt"))
	}
}

/// Outbound message record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MailRecord {
	pub to: Vec<String>,
	pub message: MailMessage,
}

#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct MailMessage {
	pub subject: String,
	pub text: String,
}

// The text carries a credential; keep it out of logs.
impl fmt::Debug for MailMessage {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MailMessage")
			.field("subject", &self.subject)
			.field("text", &format_args!("<{} bytes>", self.text.len()))
			.finish()
	}
}

/// Append-only outbound mail collection.
#[async_trait]
pub trait MailQueue: Send + Sync {
	async fn append(&self, collection: &str, record: MailRecord) -> Result<(), StoreError>;
}
