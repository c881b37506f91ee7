// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Invitation mail settings.

use serde::Deserialize;

const DEFAULT_PRODUCT_NAME: &str = "PEERS";

#[derive(Debug, Clone)]
pub struct MailConfig {
	/// Product name used in the invitation subject and body.
	pub product_name: String,
}

impl Default for MailConfig {
	fn default() -> Self {
		Self {
			product_name: DEFAULT_PRODUCT_NAME.to_string(),
		}
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MailConfigLayer {
	#[serde(default)]
	pub product_name: Option<String>,
}

impl MailConfigLayer {
	pub fn merge(&mut self, other: MailConfigLayer) {
		if other.product_name.is_some() {
			self.product_name = other.product_name;
		}
	}

	pub fn finalize(self) -> MailConfig {
		MailConfig {
			product_name: self
				.product_name
				.map(|n| n.trim().to_string())
				.filter(|n| !n.is_empty())
				.unwrap_or_else(|| DEFAULT_PRODUCT_NAME.to_string()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_product_name() {
		assert_eq!(MailConfigLayer::default().finalize().product_name, "PEERS");
	}

	#[test]
	fn test_blank_product_name_falls_back() {
		let layer = MailConfigLayer {
			product_name: Some("  ".to_string()),
		};
		assert_eq!(layer.finalize().product_name, "PEERS");
	}
}
