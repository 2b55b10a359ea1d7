// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::io;

/// Errors surfaced synchronously by configuration and registration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("unable to parse severity from: {value}")]
	InvalidSeverity {
		value: String,
	},

	#[error("failed to parse boolean for {key}: {value}")]
	InvalidBool {
		key: String,
		value: String,
	},

	#[error("unable to parse console output from: {value}")]
	InvalidOutput {
		value: String,
	},

	#[error("failed to setup handler {handler}: {source}")]
	Setup {
		handler: String,
		#[source]
		source: HandlerError,
	},
}

/// Failure reported by a handler from `setup` or `handle`.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
	#[error("io error: {0}")]
	Io(#[from] io::Error),

	#[error("{0}")]
	Message(String),
}

impl HandlerError {
	pub fn message(msg: impl Into<String>) -> Self {
		HandlerError::Message(msg.into())
	}
}

pub type Result<T> = std::result::Result<T, Error>;
