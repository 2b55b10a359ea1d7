// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! The handler capability and the built-in handlers.

pub mod console;
#[cfg(unix)]
pub mod syslog;

use std::fmt;

use crate::{error::HandlerError, format, format::DEFAULT_FORMAT, record::LogRecord, severity::Severity};

/// A sink that formats and emits accepted log records.
///
/// The service calls [`Handler::setup`] exactly once, before registration,
/// and never calls [`Handler::handle`] on a handler whose setup failed.
/// Several threads may call `handle` on the same handler at the same time;
/// implementations guard their own state.
///
/// `handle` runs on the logging thread. A handler that blocks stalls the
/// caller's log call, there is no timeout.
///
/// A panic in `handle` is caught and reported as a dispatch failure, but the
/// process panic hook still runs first, so with the default hook every
/// panicking call prints a panic message to stderr.
///
/// `teardown` runs once the handler has left the service and no dispatch
/// that picked it up earlier is still running, so it is the last call a
/// handler receives.
pub trait Handler: Send + Sync {
	/// Label used in errors and diagnostics.
	fn name(&self) -> &str {
		"custom"
	}

	/// Minimum severity this handler accepts.
	fn level(&self) -> Severity;

	/// Output pattern, see [`crate::format`].
	fn format(&self) -> &str {
		DEFAULT_FORMAT
	}

	fn setup(&mut self) -> Result<(), HandlerError> {
		Ok(())
	}

	/// Called once when the handler leaves the service.
	fn teardown(&self) {}

	fn handle(&self, record: &LogRecord) -> Result<(), HandlerError>;

	fn admits(&self, severity: Severity) -> bool {
		severity.meets_threshold(self.level())
	}

	/// Renders `record` with this handler's pattern.
	fn render(&self, record: &LogRecord) -> String {
		format::render(self.format(), record)
	}
}

/// Identifies a registered handler for later removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandlerId(pub(crate) u64);

impl fmt::Display for HandlerId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "handler#{}", self.0)
	}
}
