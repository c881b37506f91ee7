// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization policies.
//!
//! Privileged operations ask an [`AuthorizationPolicy`] whether the caller
//! holds a [`Capability`]. Decisions are pure functions of the caller's email
//! and the capability, so policies are cheap to share behind an `Arc` and
//! trivial to fake in tests.

use std::collections::HashSet;
use std::fmt;

use tracing::instrument;

/// Capabilities guarded by a policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
	/// Create or re-invite user accounts.
	ProvisionUsers,
}

impl fmt::Display for Capability {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Capability::ProvisionUsers => write!(f, "provision_users"),
		}
	}
}

/// Capability check consulted before a privileged operation runs.
pub trait AuthorizationPolicy: Send + Sync {
	/// Returns `true` if the caller identified by `email` holds `capability`.
	///
	/// `email` is the caller's verified email exactly as the platform supplied
	/// it; normalisation is up to the policy.
	fn is_allowed(&self, email: &str, capability: Capability) -> bool;
}

/// Fixed set of administrator emails.
///
/// Every administrator holds every capability. Emails are compared
/// case-insensitively after trimming. The set is built once and never
/// mutated.
#[derive(Debug, Clone, Default)]
pub struct StaticAllowlist {
	admins: HashSet<String>,
}

impl StaticAllowlist {
	/// Build an allowlist, dropping blank entries.
	pub fn new<I, S>(emails: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let admins = emails
			.into_iter()
			.filter_map(|e| normalize(e.as_ref()))
			.collect();
		Self { admins }
	}

	/// Returns `true` if `email` is an administrator.
	pub fn contains(&self, email: &str) -> bool {
		normalize(email)
			.map(|e| self.admins.contains(&e))
			.unwrap_or(false)
	}

	pub fn len(&self) -> usize {
		self.admins.len()
	}

	pub fn is_empty(&self) -> bool {
		self.admins.is_empty()
	}
}

impl AuthorizationPolicy for StaticAllowlist {
	#[instrument(level = "debug", skip(self), fields(admins = self.admins.len()))]
	fn is_allowed(&self, email: &str, capability: Capability) -> bool {
		let allowed = self.contains(email);
		tracing::debug!(allowed, "allowlist decision");
		allowed
	}
}

fn normalize(email: &str) -> Option<String> {
	let trimmed = email.trim();
	if trimmed.is_empty() {
		None
	} else {
		Some(trimmed.to_lowercase())
	}
}
