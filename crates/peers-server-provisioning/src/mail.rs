// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Invitation email carrying the temporary credentials.

use peers_common_secret::SecretString;

use crate::store::{MailMessage, MailRecord};

/// Product name used when none is configured.
pub const DEFAULT_PRODUCT_NAME: &str = "PEERS";

/// Renders the invitation sent to a newly provisioned user.
#[derive(Debug, Clone)]
pub struct InvitationTemplate {
	product_name: String,
}

impl Default for InvitationTemplate {
	fn default() -> Self {
		Self::new(DEFAULT_PRODUCT_NAME)
	}
}

impl InvitationTemplate {
	pub fn new(product_name: impl Into<String>) -> Self {
		Self {
			product_name: product_name.into(),
		}
	}

	pub fn product_name(&self) -> &str {
		&self.product_name
	}

	pub fn subject(&self) -> String {
		format!("Your {} temporary password", self.product_name)
	}

	pub fn text(&self, name: &str, email: &str, password: &SecretString) -> String {
		format!(
			"Hello {name},\n\n\
			 An admin created your {product} account.\n\n\
			 Email: {email}\n\
			 Temporary password: {password}\n\n\
			 Please sign in using the above credentials and change your password from the Profile/Settings page.\n\n\
			 If you didn\u{2019}t expect this, ignore this email.\n\n\
			 Thanks!",
			product = self.product_name,
			password = password.expose(),
		)
	}

	/// Build the mail record addressed to `email` only.
	pub fn render(&self, name: &str, email: &str, password: &SecretString) -> MailRecord {
		MailRecord {
			to: vec![email.to_string()],
			message: MailMessage {
				subject: self.subject(),
				text: self.text(name, email, password),
			},
		}
	}
}
