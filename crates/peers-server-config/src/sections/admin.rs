// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Administrator allowlist.
//!
//! The allowlist is read once at startup. There is no runtime interface for
//! changing it; redeploy with a new config file or `PEERS_SERVER_ADMIN_EMAILS`.

use serde::Deserialize;

/// Administrator configuration (runtime, fully resolved).
#[derive(Debug, Clone, Default)]
pub struct AdminConfig {
	/// Lowercased, trimmed, de-duplicated administrator emails in config order.
	pub emails: Vec<String>,
}

/// Administrator configuration layer (partial, for merging).
///
/// A later layer's list replaces an earlier one wholesale; lists are not
/// concatenated across sources.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminConfigLayer {
	#[serde(default)]
	pub emails: Option<Vec<String>>,
}

impl AdminConfigLayer {
	pub fn merge(&mut self, other: AdminConfigLayer) {
		if other.emails.is_some() {
			self.emails = other.emails;
		}
	}

	pub fn finalize(self) -> AdminConfig {
		let mut emails: Vec<String> = Vec::new();
		for email in self.emails.unwrap_or_default() {
			let email = email.trim().to_lowercase();
			if !email.is_empty() && !emails.contains(&email) {
				emails.push(email);
			}
		}
		AdminConfig { emails }
	}
}

/// Split a comma separated list of emails, as used by `PEERS_SERVER_ADMIN_EMAILS`.
pub fn parse_email_list(value: &str) -> Vec<String> {
	value
		.split(',')
		.map(|s| s.trim().to_string())
		.filter(|s| !s.is_empty())
		.collect()
}
