// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! `POST /api/admin/users`: provision a user on behalf of an administrator.

use axum::{body::Bytes, extract::State, http::HeaderMap, Json};
use peers_server_auth::CallerIdentity;
use peers_server_provisioning::{ProvisionPayload, ProvisionResult};
use serde::Serialize;
use serde_json::Value;

use crate::api::AppState;
use crate::error::ApiError;

/// Success envelope: `{"result": {...}}`.
#[derive(Debug, Serialize)]
pub struct CallableResponse<T> {
	pub result: T,
}

/// Body is `{"data": {...}}` or the bare payload object.
///
/// The body is parsed leniently: malformed JSON becomes an empty payload so
/// the authentication and authorization gates still answer first.
#[tracing::instrument(skip_all)]
pub async fn provision_user(
	State(state): State<AppState>,
	headers: HeaderMap,
	body: Bytes,
) -> Result<Json<CallableResponse<ProvisionResult>>, ApiError> {
	let caller = CallerIdentity::from_headers(
		&headers,
		&state.identity.email_header,
		&state.identity.verified_header,
	);
	let payload = parse_payload(&body);

	let result = state.provisioning.execute(&caller, payload).await?;
	Ok(Json(CallableResponse { result }))
}

pub fn parse_payload(body: &[u8]) -> ProvisionPayload {
	let value = match serde_json::from_slice::<Value>(body) {
		Ok(Value::Object(mut map)) => match map.remove("data") {
			Some(data) => data,
			None => Value::Object(map),
		},
		Ok(_) => Value::Null,
		Err(e) => {
			tracing::debug!(error = %e, "request body is not JSON");
			Value::Null
		}
	};
	serde_json::from_value(value).unwrap_or_default()
}
