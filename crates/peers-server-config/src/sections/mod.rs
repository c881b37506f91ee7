// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sections for peers-server.

pub mod admin;
pub mod database;
pub mod http;
pub mod identity;
pub mod logging;
pub mod mail;

pub use admin::{parse_email_list, AdminConfig, AdminConfigLayer};
pub use database::{DatabaseConfig, DatabaseConfigLayer};
pub use http::{HttpConfig, HttpConfigLayer};
pub use identity::{IdentityConfig, IdentityConfigLayer};
pub use logging::{LoggingConfig, LoggingConfigLayer};
pub use mail::{MailConfig, MailConfigLayer};
