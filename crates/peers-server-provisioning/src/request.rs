// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ProvisioningError;

/// Message returned when any required field is absent or empty.
pub const MISSING_FIELDS_MESSAGE: &str = "Missing required fields: name, email, faculty, role, id";

/// Raw provisioning payload as received from the caller.
///
/// Unknown fields are ignored. A field holding anything other than a JSON
/// string is treated as missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProvisionPayload {
	#[serde(default, deserialize_with = "string_or_none")]
	pub name: Option<String>,
	#[serde(default, deserialize_with = "string_or_none")]
	pub email: Option<String>,
	#[serde(default, deserialize_with = "string_or_none")]
	pub faculty: Option<String>,
	#[serde(default, deserialize_with = "string_or_none")]
	pub role: Option<String>,
	#[serde(default, deserialize_with = "string_or_none")]
	pub id: Option<String>,
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
	D: Deserializer<'de>,
{
	match serde_json::Value::deserialize(deserializer)? {
		serde_json::Value::String(s) => Ok(Some(s)),
		_ => Ok(None),
	}
}

impl ProvisionPayload {
	/// Check that all five fields are present and non-empty.
	///
	/// Values are passed through untouched: no trimming, no format checks.
	pub fn validate(self) -> Result<ProvisionRequest, ProvisioningError> {
		fn required(value: Option<String>) -> Option<String> {
			value.filter(|v| !v.is_empty())
		}

		match (
			required(self.name),
			required(self.email),
			required(self.faculty),
			required(self.role),
			required(self.id),
		) {
			(Some(name), Some(email), Some(faculty), Some(role), Some(id)) => Ok(ProvisionRequest {
				name,
				email,
				faculty,
				role,
				id,
			}),
			_ => Err(ProvisioningError::InvalidArgument(
				MISSING_FIELDS_MESSAGE.to_string(),
			)),
		}
	}
}

/// A validated request to provision one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProvisionRequest {
	/// Display name.
	pub name: String,
	/// Account email; also the profile key.
	pub email: String,
	pub faculty: String,
	pub role: String,
	/// Institution-assigned identifier (student or staff number).
	pub id: String,
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	fn full() -> ProvisionPayload {
		ProvisionPayload {
			name: Some("Ada Lovelace".into()),
			email: Some("ada@uni.edu".into()),
			faculty: Some("Engineering".into()),
			role: Some("student".into()),
			id: Some("S123".into()),
		}
	}

	#[test]
	fn complete_payload_validates() {
		let request = full().validate().unwrap();
		assert_eq!(request.email, "ada@uni.edu");
		assert_eq!(request.id, "S123");
	}

	#[test]
	fn empty_string_counts_as_missing() {
		let payload = ProvisionPayload {
			faculty: Some(String::new()),
			..full()
		};
		assert_eq!(
			payload.validate().unwrap_err(),
			ProvisioningError::InvalidArgument(MISSING_FIELDS_MESSAGE.to_string())
		);
	}

	#[test]
	fn whitespace_is_not_trimmed() {
		let payload = ProvisionPayload {
			role: Some(" ".into()),
			..full()
		};
		assert_eq!(payload.validate().unwrap().role, " ");
	}

	#[test]
	fn non_string_values_are_missing() {
		let payload: ProvisionPayload = serde_json::from_value(serde_json::json!({
			"name": "Ada",
			"email": "ada@uni.edu",
			"faculty": 42,
			"role": null,
			"id": ["S123"],
			"extra": true
		}))
		.unwrap();
		assert_eq!(payload.name.as_deref(), Some("Ada"));
		assert!(payload.faculty.is_none());
		assert!(payload.role.is_none());
		assert!(payload.id.is_none());
	}

	#[test]
	fn empty_object_deserializes() {
		let payload: ProvisionPayload = serde_json::from_str("{}").unwrap();
		assert_eq!(payload, ProvisionPayload::default());
	}

	proptest! {
		#[test]
		fn dropping_any_field_is_rejected(index in 0usize..5) {
			let mut payload = full();
			match index {
				0 => payload.name = None,
				1 => payload.email = None,
				2 => payload.faculty = None,
				3 => payload.role = None,
				_ => payload.id = None,
			}
			let err = payload.validate().unwrap_err();
			prop_assert_eq!(err.code(), crate::ErrorCode::InvalidArgument);
		}

		#[test]
		fn any_non_empty_values_pass(
			name in ".{1,20}",
			email in ".{1,20}",
			faculty in ".{1,20}",
			role in ".{1,20}",
			id in ".{1,20}",
		) {
			let payload = ProvisionPayload {
				name: Some(name.clone()),
				email: Some(email.clone()),
				faculty: Some(faculty),
				role: Some(role),
				id: Some(id),
			};
			let request = payload.validate().unwrap();
			prop_assert_eq!(request.name, name);
			prop_assert_eq!(request.email, email);
		}
	}
}
