// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration error types.

use std::path::PathBuf;

/// Failures while loading or resolving [`crate::ServerConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	/// An environment variable or TOML key held an unusable value.
	#[error("Invalid value for {key}: {message}")]
	InvalidValue { key: String, message: String },

	/// The config file exists but is not valid TOML for [`crate::ServerConfigLayer`].
	#[error("Failed to parse TOML config at {path}: {source}")]
	TomlParse {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	/// The config file exists but could not be read.
	#[error("Failed to read config file {path}: {source}")]
	FileRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// The merged configuration breaks a cross-field rule.
	#[error("Validation error: {0}")]
	Validation(String),
}
