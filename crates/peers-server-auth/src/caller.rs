// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Caller identity supplied by the invoking platform.
//!
//! PEERS does not verify credentials itself. An identity-aware proxy in front
//! of the server authenticates the user and forwards the result in trusted
//! request headers:
//!
//! ```text
//! x-peers-caller-email:           admin@example.com
//! x-peers-caller-email-verified:  true
//! ```
//!
//! The proxy must strip these headers from inbound client traffic.

use http::HeaderMap;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Default header carrying the authenticated caller's email.
pub const DEFAULT_EMAIL_HEADER: &str = "x-peers-caller-email";

/// Default header carrying whether the caller's email is verified.
pub const DEFAULT_VERIFIED_HEADER: &str = "x-peers-caller-email-verified";

/// The identity of whoever invoked an operation.
///
/// Trusted as already verified by the platform and immutable for the
/// duration of a call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerIdentity {
	/// Email the platform vouches for, if any.
	pub verified_email: Option<String>,
	/// Whether the platform authenticated the caller at all.
	pub is_authenticated: bool,
}

impl CallerIdentity {
	/// A caller the platform did not authenticate.
	pub fn anonymous() -> Self {
		Self::default()
	}

	/// An authenticated caller with a verified email.
	pub fn verified(email: impl Into<String>) -> Self {
		Self {
			verified_email: Some(email.into()),
			is_authenticated: true,
		}
	}

	/// An authenticated caller whose email is not verified.
	pub fn without_verified_email() -> Self {
		Self {
			verified_email: None,
			is_authenticated: true,
		}
	}

	/// The caller's email, only when it can be used for authorization.
	///
	/// Returns `None` for unauthenticated callers and for empty emails.
	pub fn authenticated_email(&self) -> Option<&str> {
		if !self.is_authenticated {
			return None;
		}
		self
			.verified_email
			.as_deref()
			.filter(|email| !email.trim().is_empty())
	}

	/// Build the caller identity from proxy-supplied headers.
	///
	/// A missing or non-UTF-8 email header yields an anonymous caller. An
	/// email whose verified header is anything but `true`/`1` yields an
	/// authenticated caller without a verified email.
	#[instrument(level = "trace", skip(headers), fields(has_email_header))]
	pub fn from_headers(headers: &HeaderMap, email_header: &str, verified_header: &str) -> Self {
		let email = headers
			.get(email_header)
			.and_then(|v| v.to_str().ok())
			.map(str::trim)
			.filter(|v| !v.is_empty());

		tracing::Span::current().record("has_email_header", email.is_some());

		let Some(email) = email else {
			return Self::anonymous();
		};

		let verified = headers
			.get(verified_header)
			.and_then(|v| v.to_str().ok())
			.map(|v| v.trim().eq_ignore_ascii_case("true") || v.trim() == "1")
			.unwrap_or(false);

		if verified {
			Self::verified(email)
		} else {
			Self::without_verified_email()
		}
	}
}
