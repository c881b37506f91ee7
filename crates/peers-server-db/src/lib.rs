// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! SQLite storage for PEERS.
//!
//! Implements the provisioning collaborators on one database:
//! - [`AccountRepository`] - login accounts (`accounts`)
//! - [`DocumentRepository`] - JSON documents with merge writes (`documents`)
//! - [`MailOutboxRepository`] - queued mail (`mail_outbox`)

pub mod error;
pub mod identity;
pub mod mail;
pub mod migrations;
pub mod password;
pub mod pool;
pub mod profile;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::{DbError, Result};
pub use identity::AccountRepository;
pub use mail::{MailOutboxRepository, OutboxEntry, PENDING_STATE};
pub use migrations::run_migrations;
pub use pool::{create_pool, ping};
pub use profile::DocumentRepository;
