// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::fmt;

use serde::Serialize;

use crate::store::{IdentityError, StoreError};

/// Message used when an internal failure carries no text of its own.
pub const INTERNAL_FALLBACK_MESSAGE: &str = "Failed to create user";

/// Errors that can occur during user provisioning.
///
/// Every variant carries the caller-facing message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProvisioningError {
	#[error("{0}")]
	Unauthenticated(String),

	#[error("{0}")]
	PermissionDenied(String),

	#[error("{0}")]
	InvalidArgument(String),

	#[error("{0}")]
	Internal(String),
}

impl ProvisioningError {
	/// Wrap any downstream failure as `Internal`, keeping its message.
	pub fn internal(err: impl fmt::Display) -> Self {
		let message = err.to_string();
		if message.trim().is_empty() {
			Self::Internal(INTERNAL_FALLBACK_MESSAGE.to_string())
		} else {
			Self::Internal(message)
		}
	}

	pub fn code(&self) -> ErrorCode {
		match self {
			Self::Unauthenticated(_) => ErrorCode::Unauthenticated,
			Self::PermissionDenied(_) => ErrorCode::PermissionDenied,
			Self::InvalidArgument(_) => ErrorCode::InvalidArgument,
			Self::Internal(_) => ErrorCode::Internal,
		}
	}

	pub fn message(&self) -> &str {
		match self {
			Self::Unauthenticated(m)
			| Self::PermissionDenied(m)
			| Self::InvalidArgument(m)
			| Self::Internal(m) => m,
		}
	}
}

impl From<IdentityError> for ProvisioningError {
	fn from(err: IdentityError) -> Self {
		Self::internal(err)
	}
}

impl From<StoreError> for ProvisioningError {
	fn from(err: StoreError) -> Self {
		Self::internal(err)
	}
}

/// Stable error classification exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorCode {
	Unauthenticated,
	PermissionDenied,
	InvalidArgument,
	Internal,
}

impl ErrorCode {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Unauthenticated => "unauthenticated",
			Self::PermissionDenied => "permission-denied",
			Self::InvalidArgument => "invalid-argument",
			Self::Internal => "internal",
		}
	}
}

impl fmt::Display for ErrorCode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
