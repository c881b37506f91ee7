// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Temporary password generation.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use peers_common_secret::SecretString;
use rand::{rngs::OsRng, RngCore};

/// Random bytes per temporary password (96 bits).
pub const TEMP_PASSWORD_BYTES: usize = 12;

/// Encoded length of a temporary password.
pub const TEMP_PASSWORD_LEN: usize = 16;

/// Generate a single-use temporary password from the OS CSPRNG.
///
/// Encoded as URL-safe base64 without padding.
pub fn generate_temp_password() -> Result<SecretString, rand::Error> {
	let mut bytes = [0u8; TEMP_PASSWORD_BYTES];
	OsRng.try_fill_bytes(&mut bytes)?;
	Ok(SecretString::new(URL_SAFE_NO_PAD.encode(bytes)))
}
