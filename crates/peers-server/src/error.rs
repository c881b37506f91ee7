// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error responses for callable operations.

use axum::{
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};
use peers_server_provisioning::{ErrorCode, ProvisioningError};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
	#[error(transparent)]
	Provisioning(#[from] ProvisioningError),
}

/// Error response body: `{"error": {"code": ..., "message": ...}}`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
	pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
	pub code: ErrorCode,
	pub message: String,
}

pub fn status_for(code: ErrorCode) -> StatusCode {
	match code {
		ErrorCode::Unauthenticated => StatusCode::UNAUTHORIZED,
		ErrorCode::PermissionDenied => StatusCode::FORBIDDEN,
		ErrorCode::InvalidArgument => StatusCode::BAD_REQUEST,
		ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let ApiError::Provisioning(err) = self;
		let code = err.code();

		if code == ErrorCode::Internal {
			tracing::error!(error = %err, "internal error");
		}

		let body = ErrorResponse {
			error: ErrorBody {
				code,
				message: err.message().to_string(),
			},
		};
		(status_for(code), Json(body)).into_response()
	}
}
