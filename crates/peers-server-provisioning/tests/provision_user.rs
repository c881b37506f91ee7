// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! End-to-end behaviour of `AdminProvisionUser` against in-memory stores.

use std::sync::Arc;

use peers_server_auth::{CallerIdentity, StaticAllowlist};
use peers_server_provisioning::memory::{
	InMemoryIdentityStore, InMemoryMailQueue, InMemoryProfileStore,
};
use peers_server_provisioning::{
	AdminProvisionUser, ErrorCode, InvitationTemplate, ProvisionPayload, ProvisioningError,
	ADMIN_ONLY_MESSAGE, MAIL_COLLECTION, MISSING_FIELDS_MESSAGE, SIGN_IN_REQUIRED_MESSAGE,
	TEMP_PASSWORD_LEN, USERS_COLLECTION,
};
use serde_json::{json, Map};

const ADMIN: &str = "admin@uni.edu";
const NEW_USER: &str = "ada@uni.edu";

struct Harness {
	identity: Arc<InMemoryIdentityStore>,
	profiles: Arc<InMemoryProfileStore>,
	mail: Arc<InMemoryMailQueue>,
	op: AdminProvisionUser,
}

impl Harness {
	fn new() -> Self {
		let identity = Arc::new(InMemoryIdentityStore::new());
		let profiles = Arc::new(InMemoryProfileStore::new());
		let mail = Arc::new(InMemoryMailQueue::new());
		let op = AdminProvisionUser::new(
			Arc::new(StaticAllowlist::new([ADMIN])),
			identity.clone(),
			profiles.clone(),
			mail.clone(),
			InvitationTemplate::default(),
		);
		Self {
			identity,
			profiles,
			mail,
			op,
		}
	}

	fn assert_untouched(&self) {
		assert!(self.identity.is_empty());
		assert_eq!(self.profiles.count(USERS_COLLECTION), 0);
		assert!(self.mail.records(MAIL_COLLECTION).is_empty());
	}
}

fn payload() -> ProvisionPayload {
	ProvisionPayload {
		name: Some("Ada Lovelace".into()),
		email: Some(NEW_USER.into()),
		faculty: Some("Engineering".into()),
		role: Some("student".into()),
		id: Some("S-1815".into()),
	}
}

fn admin() -> CallerIdentity {
	CallerIdentity::verified(ADMIN)
}

#[tokio::test]
async fn missing_field_is_invalid_argument_without_side_effects() {
	let h = Harness::new();
	for strip in 0..5 {
		let mut p = payload();
		match strip {
			0 => p.name = None,
			1 => p.email = Some(String::new()),
			2 => p.faculty = None,
			3 => p.role = Some(String::new()),
			_ => p.id = None,
		}
		let err = h.op.execute(&admin(), p).await.unwrap_err();
		assert_eq!(
			err,
			ProvisioningError::InvalidArgument(MISSING_FIELDS_MESSAGE.to_string())
		);
	}
	h.assert_untouched();
}

#[tokio::test]
async fn unauthenticated_caller_is_rejected_before_validation() {
	let h = Harness::new();
	let err = h
		.op
		.execute(&CallerIdentity::anonymous(), ProvisionPayload::default())
		.await
		.unwrap_err();
	assert_eq!(
		err,
		ProvisioningError::Unauthenticated(SIGN_IN_REQUIRED_MESSAGE.to_string())
	);

	let err = h
		.op
		.execute(&CallerIdentity::without_verified_email(), payload())
		.await
		.unwrap_err();
	assert_eq!(err.code(), ErrorCode::Unauthenticated);

	let blank = CallerIdentity {
		verified_email: Some(String::new()),
		is_authenticated: true,
	};
	let err = h.op.execute(&blank, payload()).await.unwrap_err();
	assert_eq!(err.code(), ErrorCode::Unauthenticated);
	h.assert_untouched();
}

#[tokio::test]
async fn non_admin_is_denied_regardless_of_input() {
	let h = Harness::new();
	let student = CallerIdentity::verified("student@uni.edu");

	for p in [payload(), ProvisionPayload::default()] {
		let err = h.op.execute(&student, p).await.unwrap_err();
		assert_eq!(
			err,
			ProvisioningError::PermissionDenied(ADMIN_ONLY_MESSAGE.to_string())
		);
	}
	h.assert_untouched();
}

#[tokio::test]
async fn fresh_email_creates_account_profile_and_mail() {
	let h = Harness::new();
	let result = h.op.execute(&admin(), payload()).await.unwrap();

	assert!(result.ok);
	assert!(result.email_sent);

	let account = h.identity.get(NEW_USER).unwrap();
	assert_eq!(account.uid, result.uid);
	assert_eq!(account.display_name, "Ada Lovelace");
	assert!(!account.email_verified);
	assert!(!account.disabled);
	assert_eq!(h.identity.len(), 1);

	let profile = h.profiles.get(USERS_COLLECTION, NEW_USER).unwrap();
	assert_eq!(profile["status"], "invited");
	assert_eq!(profile["id"], "S-1815");
	assert_eq!(profile["name"], "Ada Lovelace");
	assert_eq!(profile["email"], NEW_USER);
	assert_eq!(profile["faculty"], "Engineering");
	assert_eq!(profile["role"], "student");
	assert!(profile["createdAt"].is_string());

	let records = h.mail.records(MAIL_COLLECTION);
	assert_eq!(records.len(), 1);
	assert_eq!(records[0].to, vec![NEW_USER.to_string()]);
	assert_eq!(records[0].message.subject, "Your PEERS temporary password");

	let password = h.identity.password_for(NEW_USER).unwrap();
	assert_eq!(password.len(), TEMP_PASSWORD_LEN);
	assert!(records[0]
		.message
		.text
		.contains(&format!("Temporary password: {password}\n")));
	assert!(records[0].message.text.starts_with("Hello Ada Lovelace,"));
}

#[tokio::test]
async fn reinvocation_reuses_account_and_merges_profile() {
	let h = Harness::new();
	let first = h.op.execute(&admin(), payload()).await.unwrap();

	let mut extra = Map::new();
	extra.insert("phone".into(), json!("+1 555 0100"));
	let mut existing = h.profiles.get(USERS_COLLECTION, NEW_USER).unwrap();
	existing.extend(extra);
	h.profiles.put(USERS_COLLECTION, NEW_USER, existing);

	let second_payload = ProvisionPayload {
		role: Some("tutor".into()),
		..payload()
	};
	let second = h.op.execute(&admin(), second_payload).await.unwrap();

	assert_eq!(first.uid, second.uid);
	assert_eq!(h.identity.len(), 1);

	let profile = h.profiles.get(USERS_COLLECTION, NEW_USER).unwrap();
	assert_eq!(profile["phone"], "+1 555 0100");
	assert_eq!(profile["role"], "tutor");

	let records = h.mail.records(MAIL_COLLECTION);
	assert_eq!(records.len(), 2);
	let password_line = |text: &str| {
		text.lines()
			.find(|l| l.starts_with("Temporary password: "))
			.map(str::to_string)
	};
	assert_ne!(
		password_line(&records[0].message.text),
		password_line(&records[1].message.text)
	);
}

#[tokio::test]
async fn admin_match_ignores_case() {
	let h = Harness::new();
	let caller = CallerIdentity::verified("Admin@UNI.edu");
	assert!(h.op.execute(&caller, payload()).await.is_ok());
}

#[tokio::test]
async fn mail_failure_is_internal_and_keeps_account_and_profile() {
	let h = Harness::new();
	h.mail.fail_appends(true);

	let err = h.op.execute(&admin(), payload()).await.unwrap_err();
	assert_eq!(
		err,
		ProvisioningError::Internal("mail queue unavailable".to_string())
	);
	assert!(h.identity.get(NEW_USER).is_some());
	assert!(h.profiles.get(USERS_COLLECTION, NEW_USER).is_some());
	assert!(h.mail.records(MAIL_COLLECTION).is_empty());
}

#[tokio::test]
async fn lookup_failure_other_than_not_found_propagates() {
	let h = Harness::new();
	h.identity.fail_lookups(true);

	let err = h.op.execute(&admin(), payload()).await.unwrap_err();
	assert_eq!(err.code(), ErrorCode::Internal);
	assert_eq!(err.message(), "identity store unavailable");
	h.assert_untouched();
}

#[tokio::test]
async fn create_failure_stops_before_profile() {
	let h = Harness::new();
	h.identity.fail_creates(true);

	let err = h.op.execute(&admin(), payload()).await.unwrap_err();
	assert_eq!(err.code(), ErrorCode::Internal);
	h.assert_untouched();
}

#[tokio::test]
async fn profile_failure_keeps_account_and_sends_nothing() {
	let h = Harness::new();
	h.profiles.fail_writes(true);

	let err = h.op.execute(&admin(), payload()).await.unwrap_err();
	assert_eq!(
		err,
		ProvisioningError::Internal("document store unavailable".to_string())
	);
	assert_eq!(h.identity.len(), 1);
	assert!(h.mail.records(MAIL_COLLECTION).is_empty());
}

#[tokio::test]
async fn result_serializes_for_callers() {
	let h = Harness::new();
	let result = h.op.execute(&admin(), payload()).await.unwrap();
	let value = serde_json::to_value(&result).unwrap();
	assert_eq!(value["ok"], true);
	assert_eq!(value["emailSent"], true);
	assert_eq!(value["uid"], result.uid.as_str());
}
