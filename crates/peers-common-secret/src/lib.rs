// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Redacting wrapper for credentials.
//!
//! PEERS handles exactly one kind of plaintext credential: the temporary
//! password generated for a newly provisioned account. It travels from the
//! generator to the identity store (which hashes it) and into the invitation
//! mail, and must never show up in logs, spans or serialized responses along
//! the way. [`Secret<T>`] enforces that:
//!
//! - `Debug`, `Display` and `Serialize` print [`REDACTED`]
//! - the inner value is zeroized on drop
//! - reading the value requires an explicit [`Secret::expose`] call
//!
//! ```
//! use peers_common_secret::SecretString;
//!
//! let password = SecretString::new("Zk3v-9qLw_Ty2bXa".to_string());
//!
//! assert_eq!(format!("{password}"), "[REDACTED]");
//! assert_eq!(format!("{password:?}"), "Secret(\"[REDACTED]\")");
//! assert_eq!(password.expose(), "Zk3v-9qLw_Ty2bXa");
//! ```

use std::fmt;
use zeroize::Zeroize;

/// Placeholder printed instead of a secret value.
pub const REDACTED: &str = "[REDACTED]";

/// A value that must not leak through formatting or serialization.
///
/// No `Deref` impl: every read goes through [`Secret::expose`].
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct Secret<T>
where
	T: Zeroize,
{
	inner: T,
}

/// The common case: a secret string such as a temporary password.
pub type SecretString = Secret<String>;

impl<T> Secret<T>
where
	T: Zeroize,
{
	pub fn new(inner: T) -> Self {
		Self { inner }
	}

	/// Borrow the secret value.
	pub fn expose(&self) -> &T {
		&self.inner
	}

	/// Return an owned copy of the secret value. The wrapper is still zeroized
	/// when it drops.
	pub fn into_inner(self) -> T
	where
		T: Clone,
	{
		self.inner.clone()
	}
}

impl<T> Clone for Secret<T>
where
	T: Zeroize + Clone,
{
	fn clone(&self) -> Self {
		Self {
			inner: self.inner.clone(),
		}
	}
}

impl<T> fmt::Debug for Secret<T>
where
	T: Zeroize,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Secret").field(&REDACTED).finish()
	}
}

impl<T> fmt::Display for Secret<T>
where
	T: Zeroize,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}

impl<T> PartialEq for Secret<T>
where
	T: Zeroize + PartialEq,
{
	fn eq(&self, other: &Self) -> bool {
		self.inner == other.inner
	}
}

impl<T> Eq for Secret<T> where T: Zeroize + Eq {}

impl From<&str> for SecretString {
	fn from(value: &str) -> Self {
		Secret::new(value.to_string())
	}
}

#[cfg(feature = "serde")]
mod serde_impl {
	use super::{Secret, REDACTED};
	use serde::{Serialize, Serializer};
	use zeroize::Zeroize;

	impl<T> Serialize for Secret<T>
	where
		T: Serialize + Zeroize,
	{
		fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
		where
			S: Serializer,
		{
			serializer.serialize_str(REDACTED)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn debug_is_redacted() {
		let password = SecretString::from("temp-pass-1234");
		let debug = format!("{password:?}");
		assert!(!debug.contains("temp-pass-1234"));
		assert!(debug.contains(REDACTED));
	}

	#[test]
	fn display_is_redacted() {
		let password = SecretString::from("temp-pass-1234");
		assert_eq!(format!("{password}"), REDACTED);
	}

	#[test]
	fn expose_and_into_inner_return_value() {
		let password = SecretString::from("temp-pass-1234");
		assert_eq!(password.expose(), "temp-pass-1234");
		assert_eq!(password.into_inner(), "temp-pass-1234");
	}

	#[test]
	fn equality_compares_inner_values() {
		assert_eq!(SecretString::from("a"), SecretString::from("a"));
		assert_ne!(SecretString::from("a"), SecretString::from("b"));
	}

	#[test]
	fn option_secret_debug_is_redacted() {
		let password: Option<SecretString> = Some(SecretString::from("temp-pass-1234"));
		let debug = format!("{password:?}");
		assert!(!debug.contains("temp-pass-1234"));
	}

	#[cfg(feature = "serde")]
	#[test]
	fn serialize_is_redacted() {
		let password = SecretString::from("temp-pass-1234");
		let json = serde_json::to_string(&password).unwrap();
		assert_eq!(json, format!("\"{REDACTED}\""));
	}

	proptest! {
		#[test]
		fn formatting_never_contains_secret(inner in "[a-zA-Z0-9_-]{8,40}") {
			prop_assume!(!inner.contains("REDACTED"));
			prop_assume!(!inner.contains("Secret"));

			let secret = SecretString::new(inner.clone());
			let shown = format!("{secret}");
			let debugged = format!("{secret:?}");
			prop_assert!(!shown.contains(&inner));
			prop_assert!(!debugged.contains(&inner));
		}
	}
}
