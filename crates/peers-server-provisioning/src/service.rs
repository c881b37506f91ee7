// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use peers_common_secret::SecretString;
use peers_server_auth::{AuthorizationPolicy, CallerIdentity, Capability};
use serde::Serialize;

use crate::error::ProvisioningError;
use crate::mail::InvitationTemplate;
use crate::password::generate_temp_password;
use crate::request::{ProvisionPayload, ProvisionRequest};
use crate::store::{
	IdentityError, IdentityStore, MailQueue, NewAccount, ProfileDocument, ProfileStore, Uid,
	UserAccount, INVITED_STATUS, MAIL_COLLECTION, USERS_COLLECTION,
};

/// Result type for provisioning operations.
pub type Result<T> = std::result::Result<T, ProvisioningError>;

pub const SIGN_IN_REQUIRED_MESSAGE: &str = "Sign in required.";
pub const ADMIN_ONLY_MESSAGE: &str = "Only admins can call this.";

/// Successful outcome returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionResult {
	pub ok: bool,
	pub email_sent: bool,
	pub uid: Uid,
}

/// Administrator operation that creates (or re-invites) a user.
///
/// Gates run in order: authentication, authorization, input validation.
/// Nothing touches a collaborator until all three pass. After that the
/// account is resolved, the profile merged and the invitation queued,
/// strictly in sequence and without rollback.
#[derive(Clone)]
pub struct AdminProvisionUser {
	policy: Arc<dyn AuthorizationPolicy>,
	identity: Arc<dyn IdentityStore>,
	profiles: Arc<dyn ProfileStore>,
	mail: Arc<dyn MailQueue>,
	template: InvitationTemplate,
}

impl AdminProvisionUser {
	pub fn new(
		policy: Arc<dyn AuthorizationPolicy>,
		identity: Arc<dyn IdentityStore>,
		profiles: Arc<dyn ProfileStore>,
		mail: Arc<dyn MailQueue>,
		template: InvitationTemplate,
	) -> Self {
		Self {
			policy,
			identity,
			profiles,
			mail,
			template,
		}
	}

	/// Run the operation on behalf of `caller`.
	#[tracing::instrument(
		skip(self, caller, payload),
		fields(caller = tracing::field::Empty, uid = tracing::field::Empty)
	)]
	pub async fn execute(
		&self,
		caller: &CallerIdentity,
		payload: ProvisionPayload,
	) -> Result<ProvisionResult> {
		let Some(caller_email) = caller.authenticated_email() else {
			tracing::debug!("rejecting unauthenticated caller");
			return Err(ProvisioningError::Unauthenticated(
				SIGN_IN_REQUIRED_MESSAGE.to_string(),
			));
		};
		tracing::Span::current().record("caller", caller_email);

		if !self
			.policy
			.is_allowed(caller_email, Capability::ProvisionUsers)
		{
			tracing::warn!(caller = %caller_email, "provisioning denied: caller is not an admin");
			return Err(ProvisioningError::PermissionDenied(
				ADMIN_ONLY_MESSAGE.to_string(),
			));
		}

		let request = payload.validate()?;

		match self.provision(&request).await {
			Ok(uid) => {
				tracing::Span::current().record("uid", uid.as_str());
				tracing::info!(email = %request.email, uid = %uid, "user provisioned and invitation queued");
				Ok(ProvisionResult {
					ok: true,
					email_sent: true,
					uid,
				})
			}
			Err(e) => {
				tracing::error!(error = %e, email = %request.email, "provisioning failed");
				Err(e)
			}
		}
	}

	async fn provision(&self, request: &ProvisionRequest) -> Result<Uid> {
		let password = generate_temp_password().map_err(ProvisioningError::internal)?;

		let account = self.resolve_account(request, &password).await?;

		let profile = ProfileDocument {
			id: request.id.clone(),
			name: request.name.clone(),
			email: request.email.clone(),
			faculty: request.faculty.clone(),
			role: request.role.clone(),
			status: INVITED_STATUS.to_string(),
		};
		self
			.profiles
			.upsert_merge(USERS_COLLECTION, &request.email, profile.to_write()?)
			.await?;
		tracing::debug!(email = %request.email, "profile merged");

		let record = self
			.template
			.render(&request.name, &request.email, &password);
		self.mail.append(MAIL_COLLECTION, record).await?;
		tracing::debug!(email = %request.email, "invitation queued");

		Ok(account.uid)
	}

	/// Reuse the account for this email, creating it only when none exists.
	async fn resolve_account(
		&self,
		request: &ProvisionRequest,
		password: &SecretString,
	) -> Result<UserAccount> {
		match self.identity.get_by_email(&request.email).await {
			Ok(account) => {
				tracing::info!(uid = %account.uid, "reusing existing account");
				Ok(account)
			}
			Err(IdentityError::NotFound { .. }) => {
				let account = self
					.identity
					.create(NewAccount {
						email: request.email.clone(),
						password: password.clone(),
						display_name: request.name.clone(),
						email_verified: false,
						disabled: false,
					})
					.await?;
				tracing::info!(uid = %account.uid, "created new account");
				Ok(account)
			}
			Err(e) => Err(e.into()),
		}
	}
}
