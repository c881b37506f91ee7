// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Argon2id password hashing for stored accounts.
//!
//! Unit tests in this crate use minimal Argon2 parameters; every other build
//! uses the library defaults (19 MiB, 2 iterations, 1 lane).

use argon2::{
	password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
	Argon2,
};
#[cfg(test)]
use argon2::{Algorithm, Params, Version};
use peers_common_secret::SecretString;

use crate::error::DbError;

fn argon2_instance() -> Argon2<'static> {
	#[cfg(test)]
	{
		let params = Params::new(1024, 1, 1, None).expect("valid Argon2 params for tests");
		Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
	}

	#[cfg(not(test))]
	{
		Argon2::default()
	}
}

/// Hash a password with a fresh random salt, returning the PHC string.
pub fn hash_password(password: &SecretString) -> Result<String, DbError> {
	let salt = SaltString::generate(&mut OsRng);
	argon2_instance()
		.hash_password(password.expose().as_bytes(), &salt)
		.map(|hash| hash.to_string())
		.map_err(|e| DbError::Internal(format!("Failed to hash password: {e}")))
}

/// Check a plaintext password against a stored PHC string.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, DbError> {
	let parsed = PasswordHash::new(hash)
		.map_err(|_| DbError::Internal("Invalid password hash format".to_string()))?;
	Ok(argon2_instance()
		.verify_password(password.as_bytes(), &parsed)
		.is_ok())
}
