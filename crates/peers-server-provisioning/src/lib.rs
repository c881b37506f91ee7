// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Administrator-driven user provisioning for PEERS.
//!
//! An authorized administrator supplies a user's name, email, faculty, role
//! and institutional id. The operation then:
//! 1. Reuses the login account for that email, or creates one with a fresh
//!    temporary password
//! 2. Merges the profile into `users/<email>` with status `invited`
//! 3. Queues an invitation carrying the credentials in the `mail` collection
//!
//! Storage is reached through the [`IdentityStore`], [`ProfileStore`] and
//! [`MailQueue`] traits; [`memory`] has in-process implementations.

mod error;
mod mail;
pub mod memory;
mod password;
mod request;
mod service;
mod store;

pub use error::{ErrorCode, ProvisioningError, INTERNAL_FALLBACK_MESSAGE};
pub use mail::{InvitationTemplate, DEFAULT_PRODUCT_NAME};
pub use password::{generate_temp_password, TEMP_PASSWORD_BYTES, TEMP_PASSWORD_LEN};
pub use request::{ProvisionPayload, ProvisionRequest, MISSING_FIELDS_MESSAGE};
pub use service::{
	AdminProvisionUser, ProvisionResult, ADMIN_ONLY_MESSAGE, SIGN_IN_REQUIRED_MESSAGE,
};
pub use store::{
	DocumentWrite, IdentityError, IdentityStore, MailMessage, MailQueue, MailRecord, NewAccount,
	ProfileDocument, ProfileStore, StoreError, Uid, UserAccount, INVITED_STATUS, MAIL_COLLECTION,
	USERS_COLLECTION,
};
