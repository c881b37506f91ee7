// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Caller identity headers set by the identity-aware proxy.

use serde::Deserialize;

const DEFAULT_EMAIL_HEADER: &str = "x-peers-caller-email";
const DEFAULT_VERIFIED_HEADER: &str = "x-peers-caller-email-verified";

#[derive(Debug, Clone)]
pub struct IdentityConfig {
	/// Header carrying the caller's authenticated email.
	pub email_header: String,
	/// Header carrying `true` when that email is verified.
	pub verified_header: String,
}

impl Default for IdentityConfig {
	fn default() -> Self {
		Self {
			email_header: DEFAULT_EMAIL_HEADER.to_string(),
			verified_header: DEFAULT_VERIFIED_HEADER.to_string(),
		}
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdentityConfigLayer {
	#[serde(default)]
	pub email_header: Option<String>,
	#[serde(default)]
	pub verified_header: Option<String>,
}

impl IdentityConfigLayer {
	pub fn merge(&mut self, other: IdentityConfigLayer) {
		if other.email_header.is_some() {
			self.email_header = other.email_header;
		}
		if other.verified_header.is_some() {
			self.verified_header = other.verified_header;
		}
	}

	/// Header names are matched case-insensitively by HTTP, so they are
	/// stored lowercased.
	pub fn finalize(self) -> IdentityConfig {
		IdentityConfig {
			email_header: self
				.email_header
				.map(|h| h.trim().to_ascii_lowercase())
				.unwrap_or_else(|| DEFAULT_EMAIL_HEADER.to_string()),
			verified_header: self
				.verified_header
				.map(|h| h.trim().to_ascii_lowercase())
				.unwrap_or_else(|| DEFAULT_VERIFIED_HEADER.to_string()),
		}
	}
}
