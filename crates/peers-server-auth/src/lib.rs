// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Caller identity and administrator authorization for PEERS.
//!
//! - [`CallerIdentity`] - who invoked an operation, as asserted by the
//!   identity-aware proxy in front of the server
//! - [`AuthorizationPolicy`] - capability check consulted before any
//!   privileged operation runs
//! - [`StaticAllowlist`] - the default policy: a fixed, case-insensitive set of
//!   administrator emails loaded at startup

pub mod caller;
pub mod policy;

pub use caller::{CallerIdentity, DEFAULT_EMAIL_HEADER, DEFAULT_VERIFIED_HEADER};
pub use policy::{AuthorizationPolicy, Capability, StaticAllowlist};
