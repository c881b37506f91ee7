// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! In-process collaborators.
//!
//! Used by tests and by local runs without a database. Each store can be told
//! to fail its next calls so failure paths can be exercised.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use peers_common_secret::SecretString;
use serde_json::{Map, Value};

use crate::store::{
	DocumentWrite, IdentityError, IdentityStore, MailQueue, MailRecord, NewAccount, ProfileStore,
	StoreError, Uid, UserAccount,
};

/// Account plus the password it was created with.
#[derive(Debug, Clone)]
struct StoredAccount {
	account: UserAccount,
	password: SecretString,
}

#[derive(Debug, Default)]
pub struct InMemoryIdentityStore {
	accounts: Mutex<HashMap<String, StoredAccount>>,
	fail_lookups: AtomicBool,
	fail_creates: AtomicBool,
}

impl InMemoryIdentityStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Make every lookup fail with a backend error.
	pub fn fail_lookups(&self, fail: bool) {
		self.fail_lookups.store(fail, Ordering::SeqCst);
	}

	pub fn fail_creates(&self, fail: bool) {
		self.fail_creates.store(fail, Ordering::SeqCst);
	}

	pub fn len(&self) -> usize {
		self.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn get(&self, email: &str) -> Option<UserAccount> {
		self.lock().get(&email_key(email)).map(|s| s.account.clone())
	}

	/// The password an account was created with. Test inspection only.
	pub fn password_for(&self, email: &str) -> Option<String> {
		self
			.lock()
			.get(&email_key(email))
			.map(|s| s.password.expose().clone())
	}

	fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, StoredAccount>> {
		self.accounts.lock().unwrap_or_else(|e| e.into_inner())
	}
}

// Identity providers treat emails case-insensitively.
fn email_key(email: &str) -> String {
	email.to_lowercase()
}

#[async_trait]
impl IdentityStore for InMemoryIdentityStore {
	async fn get_by_email(&self, email: &str) -> Result<UserAccount, IdentityError> {
		if self.fail_lookups.load(Ordering::SeqCst) {
			return Err(IdentityError::Backend("identity store unavailable".to_string()));
		}
		self
			.get(email)
			.ok_or_else(|| IdentityError::NotFound {
				email: email.to_string(),
			})
	}

	async fn create(&self, new: NewAccount) -> Result<UserAccount, IdentityError> {
		if self.fail_creates.load(Ordering::SeqCst) {
			return Err(IdentityError::Backend("identity store unavailable".to_string()));
		}
		let key = email_key(&new.email);
		let mut accounts = self.lock();
		if accounts.contains_key(&key) {
			return Err(IdentityError::Backend(format!(
				"an account already exists for {}",
				new.email
			)));
		}
		let account = UserAccount {
			uid: Uid::generate(),
			email: new.email.clone(),
			display_name: new.display_name,
			email_verified: new.email_verified,
			disabled: new.disabled,
			created_at: Utc::now(),
		};
		accounts.insert(
			key,
			StoredAccount {
				account: account.clone(),
				password: new.password,
			},
		);
		Ok(account)
	}
}

#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
	documents: Mutex<HashMap<(String, String), Map<String, Value>>>,
	fail_writes: AtomicBool,
}

impl InMemoryProfileStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn fail_writes(&self, fail: bool) {
		self.fail_writes.store(fail, Ordering::SeqCst);
	}

	/// Seed or replace a document outright.
	pub fn put(&self, collection: &str, key: &str, body: Map<String, Value>) {
		self
			.lock()
			.insert((collection.to_string(), key.to_string()), body);
	}

	pub fn get(&self, collection: &str, key: &str) -> Option<Map<String, Value>> {
		self
			.lock()
			.get(&(collection.to_string(), key.to_string()))
			.cloned()
	}

	pub fn count(&self, collection: &str) -> usize {
		self.lock().keys().filter(|(c, _)| c == collection).count()
	}

	fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<(String, String), Map<String, Value>>> {
		self.documents.lock().unwrap_or_else(|e| e.into_inner())
	}
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
	async fn upsert_merge(
		&self,
		collection: &str,
		key: &str,
		write: DocumentWrite,
	) -> Result<(), StoreError> {
		if self.fail_writes.load(Ordering::SeqCst) {
			return Err(StoreError::Backend("document store unavailable".to_string()));
		}
		let fields = write.resolve(Utc::now());
		let mut documents = self.lock();
		let doc = documents
			.entry((collection.to_string(), key.to_string()))
			.or_default();
		doc.extend(fields);
		Ok(())
	}
}

#[derive(Debug, Default)]
pub struct InMemoryMailQueue {
	records: Mutex<Vec<(String, MailRecord)>>,
	fail_appends: AtomicBool,
}

impl InMemoryMailQueue {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn fail_appends(&self, fail: bool) {
		self.fail_appends.store(fail, Ordering::SeqCst);
	}

	/// Records appended to `collection`, oldest first.
	pub fn records(&self, collection: &str) -> Vec<MailRecord> {
		self
			.lock()
			.iter()
			.filter(|(c, _)| c == collection)
			.map(|(_, r)| r.clone())
			.collect()
	}

	fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(String, MailRecord)>> {
		self.records.lock().unwrap_or_else(|e| e.into_inner())
	}
}

#[async_trait]
impl MailQueue for InMemoryMailQueue {
	async fn append(&self, collection: &str, record: MailRecord) -> Result<(), StoreError> {
		if self.fail_appends.load(Ordering::SeqCst) {
			return Err(StoreError::Backend("mail queue unavailable".to_string()));
		}
		self.lock().push((collection.to_string(), record));
		Ok(())
	}
}
