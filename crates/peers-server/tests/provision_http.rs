// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HTTP behaviour of the provisioning route.

use std::sync::Arc;

use axum::{
	body::Body,
	http::{Request, StatusCode},
	Router,
};
use peers_server::{create_app_state, create_router, AppState, ServerConfig};
use peers_server_auth::StaticAllowlist;
use peers_server_config::{AdminConfig, IdentityConfig};
use peers_server_db::testing::create_migrated_test_pool;
use peers_server_provisioning::memory::{
	InMemoryIdentityStore, InMemoryMailQueue, InMemoryProfileStore,
};
use peers_server_provisioning::{AdminProvisionUser, InvitationTemplate};
use serde_json::{json, Value};
use tower::ServiceExt;

const ADMIN: &str = "registrar@uni.edu";

fn valid_body() -> Value {
	json!({
		"data": {
			"name": "Katherine Johnson",
			"email": "katherine@uni.edu",
			"faculty": "Mathematics",
			"role": "staff",
			"id": "E-1918"
		}
	})
}

async fn sqlite_app() -> Router {
	let config = ServerConfig {
		admin: AdminConfig {
			emails: vec![ADMIN.to_string()],
		},
		..Default::default()
	};
	create_router(create_app_state(create_migrated_test_pool().await, &config))
}

struct MemoryApp {
	router: Router,
	mail: Arc<InMemoryMailQueue>,
	profiles: Arc<InMemoryProfileStore>,
}

async fn memory_app() -> MemoryApp {
	let mail = Arc::new(InMemoryMailQueue::new());
	let profiles = Arc::new(InMemoryProfileStore::new());
	let provisioning = AdminProvisionUser::new(
		Arc::new(StaticAllowlist::new([ADMIN])),
		Arc::new(InMemoryIdentityStore::new()),
		profiles.clone(),
		mail.clone(),
		InvitationTemplate::default(),
	);
	let state = AppState {
		pool: create_migrated_test_pool().await,
		provisioning: Arc::new(provisioning),
		identity: Arc::new(IdentityConfig::default()),
	};
	MemoryApp {
		router: create_router(state),
		mail,
		profiles,
	}
}

fn request(caller: Option<(&str, &str)>, body: impl Into<Body>) -> Request<Body> {
	let mut builder = Request::builder()
		.method("POST")
		.uri("/api/admin/users")
		.header("content-type", "application/json");
	if let Some((email, verified)) = caller {
		builder = builder
			.header("x-peers-caller-email", email)
			.header("x-peers-caller-email-verified", verified);
	}
	builder.body(body.into()).unwrap()
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
	let response = app.oneshot(req).await.unwrap();
	let status = response.status();
	let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	let body = if bytes.is_empty() {
		Value::Null
	} else {
		serde_json::from_slice(&bytes).unwrap()
	};
	(status, body)
}

#[tokio::test]
async fn admin_call_succeeds() {
	let (status, body) = send(
		sqlite_app().await,
		request(Some((ADMIN, "true")), valid_body().to_string()),
	)
	.await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["result"]["ok"], true);
	assert_eq!(body["result"]["emailSent"], true);
	assert!(body["result"]["uid"].as_str().is_some_and(|uid| !uid.is_empty()));
}

#[tokio::test]
async fn missing_identity_is_unauthenticated() {
	let (status, body) = send(sqlite_app().await, request(None, valid_body().to_string())).await;

	assert_eq!(status, StatusCode::UNAUTHORIZED);
	assert_eq!(
		body,
		json!({"error": {"code": "unauthenticated", "message": "Sign in required."}})
	);
}

#[tokio::test]
async fn unverified_email_is_unauthenticated() {
	let (status, _) = send(
		sqlite_app().await,
		request(Some((ADMIN, "false")), valid_body().to_string()),
	)
	.await;
	assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn non_admin_is_forbidden_even_with_garbage_body() {
	let (status, body) = send(
		sqlite_app().await,
		request(Some(("student@uni.edu", "true")), "{{{"),
	)
	.await;

	assert_eq!(status, StatusCode::FORBIDDEN);
	assert_eq!(body["error"]["code"], "permission-denied");
	assert_eq!(body["error"]["message"], "Only admins can call this.");
}

#[tokio::test]
async fn admin_with_incomplete_body_is_bad_request() {
	let (status, body) = send(
		sqlite_app().await,
		request(Some(("REGISTRAR@uni.edu", "true")), r#"{"data": {"name": "K"}}"#),
	)
	.await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body["error"]["code"], "invalid-argument");
	assert_eq!(
		body["error"]["message"],
		"Missing required fields: name, email, faculty, role, id"
	);
}

#[tokio::test]
async fn mail_failure_is_internal_but_profile_is_kept() {
	let app = memory_app().await;
	app.mail.fail_appends(true);

	let (status, body) = send(
		app.router,
		request(Some((ADMIN, "true")), valid_body().to_string()),
	)
	.await;

	assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
	assert_eq!(body["error"]["code"], "internal");
	assert_eq!(body["error"]["message"], "mail queue unavailable");
	assert!(app.profiles.get("users", "katherine@uni.edu").is_some());
}

#[tokio::test]
async fn bare_payload_is_accepted() {
	let app = memory_app().await;
	let bare = valid_body()["data"].clone();

	let (status, _) = send(app.router, request(Some((ADMIN, "1")), bare.to_string())).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(app.mail.records("mail").len(), 1);
}

#[tokio::test]
async fn health_reports_database() {
	let req = Request::builder()
		.uri("/health")
		.body(Body::empty())
		.unwrap();
	let (status, body) = send(sqlite_app().await, req).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["status"], "healthy");
	assert_eq!(body["database"], "ok");
}

#[tokio::test]
async fn health_is_unavailable_when_database_is_closed() {
	let pool = create_migrated_test_pool().await;
	let state = create_app_state(pool.clone(), &ServerConfig::default());
	pool.close().await;

	let req = Request::builder()
		.uri("/health")
		.body(Body::empty())
		.unwrap();
	let (status, body) = send(create_router(state), req).await;

	assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
	assert_eq!(body["status"], "unhealthy");
	assert_eq!(body["database"], "unavailable");
}
