// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Log record type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::severity::Severity;

/// Messages longer than this many bytes are split into several records.
pub const MESSAGE_CHUNK_SIZE: usize = 2048;

/// One log event as handed to every admitting handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
	/// Log severity level
	pub severity: Severity,
	/// Name of the logger that produced the record
	pub name: String,
	/// Wall clock time in nanoseconds since the Unix epoch
	pub time: u64,
	/// Log message
	pub message: String,
	/// Message length in bytes
	pub length: usize,
}

impl LogRecord {
	pub fn new(severity: Severity, name: impl Into<String>, message: impl Into<String>) -> Self {
		Self::with_time(severity, name, now(), message)
	}

	pub fn with_time(severity: Severity, name: impl Into<String>, time: u64, message: impl Into<String>) -> Self {
		let message = message.into();
		Self {
			severity,
			name: name.into(),
			time,
			length: message.len(),
			message,
		}
	}

	/// Timestamp as a UTC date time.
	pub fn date_time(&self) -> DateTime<Utc> {
		DateTime::<Utc>::from_timestamp_nanos(self.time as i64)
	}
}

/// Current wall clock time in nanoseconds since the Unix epoch.
pub fn now() -> u64 {
	Utc::now().timestamp_nanos_opt().map(|n| n.max(0) as u64).unwrap_or_default()
}

/// Splits `message` into pieces of at most `limit` bytes on char boundaries.
pub(crate) fn chunks(message: &str, limit: usize) -> Vec<&str> {
	if message.len() <= limit {
		return vec![message];
	}

	let mut result = Vec::with_capacity(message.len() / limit + 1);
	let mut rest = message;
	while !rest.is_empty() {
		let mut end = limit.min(rest.len());
		while !rest.is_char_boundary(end) {
			end -= 1;
		}
		// a single char wider than the limit still has to go somewhere
		if end == 0 {
			end = rest.chars().next().map(char::len_utf8).unwrap_or(rest.len());
		}
		let (head, tail) = rest.split_at(end);
		result.push(head);
		rest = tail;
	}
	result
}
