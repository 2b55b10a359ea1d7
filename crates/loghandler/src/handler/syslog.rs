// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Built-in handler writing to the local syslog facility

use std::ffi::CString;

use libc::c_int;

use crate::{
	config::SyslogSettings, error::HandlerError, format::DEFAULT_FORMAT, handler::Handler, record::LogRecord,
	severity::Severity,
};

#[derive(Debug, Clone)]
pub struct SyslogHandler {
	level: Severity,
	format: String,
}

impl SyslogHandler {
	pub fn new() -> Self {
		Self {
			level: Severity::Info,
			format: DEFAULT_FORMAT.to_string(),
		}
	}

	pub fn from_settings(settings: &SyslogSettings) -> Self {
		Self::new().with_level(settings.level).with_format(settings.format.clone())
	}

	pub fn with_level(mut self, level: Severity) -> Self {
		self.level = level;
		self
	}

	pub fn with_format(mut self, format: impl Into<String>) -> Self {
		self.format = format.into();
		self
	}
}

impl Default for SyslogHandler {
	fn default() -> Self {
		Self::new()
	}
}

/// Maps a severity onto a syslog priority.
pub fn priority(severity: Severity) -> c_int {
	match severity {
		Severity::Debug => libc::LOG_DEBUG,
		Severity::Info => libc::LOG_INFO,
		Severity::Warn => libc::LOG_WARNING,
		Severity::Error => libc::LOG_ERR,
	}
}

/// Interior NUL bytes cannot cross into C, they are replaced.
fn to_c_string(line: String) -> CString {
	match CString::new(line) {
		Ok(line) => line,
		Err(err) => {
			let bytes: Vec<u8> = err.into_vec().into_iter().map(|b| if b == 0 { b'?' } else { b }).collect();
			CString::new(bytes).unwrap_or_default()
		}
	}
}

impl Handler for SyslogHandler {
	fn name(&self) -> &str {
		"syslog"
	}

	fn level(&self) -> Severity {
		self.level
	}

	fn format(&self) -> &str {
		&self.format
	}

	fn handle(&self, record: &LogRecord) -> Result<(), HandlerError> {
		let line = to_c_string(self.render(record));
		// SAFETY: both pointers are valid NUL terminated strings for the
		// duration of the call, and "%s" consumes exactly one argument.
		unsafe {
			libc::syslog(priority(record.severity), c"%s".as_ptr(), line.as_ptr());
		}
		Ok(())
	}
}
