// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Named, leveled front end bound to one service.

use std::{
	fmt,
	sync::{
		Arc,
		atomic::{AtomicU8, Ordering},
	},
};

use crate::{
	record::{self, LogRecord, MESSAGE_CHUNK_SIZE},
	registry::Registry,
	severity::Severity,
};

/// Cheap to clone. Clones share the level, so `set_level` through any of
/// them is seen by all.
#[derive(Clone)]
pub struct Logger {
	inner: Arc<Inner>,
}

struct Inner {
	name: String,
	level: AtomicU8,
	registry: Arc<Registry>,
}

impl Logger {
	pub(crate) fn new(name: impl Into<String>, level: Severity, registry: Arc<Registry>) -> Self {
		Self {
			inner: Arc::new(Inner {
				name: name.into(),
				level: AtomicU8::new(level as u8),
				registry,
			}),
		}
	}

	pub fn name(&self) -> &str {
		&self.inner.name
	}

	pub fn level(&self) -> Severity {
		Severity::from_u8(self.inner.level.load(Ordering::Relaxed))
	}

	pub fn set_level(&self, level: Severity) {
		self.inner.level.store(level as u8, Ordering::Relaxed);
	}

	#[inline]
	pub fn is_enabled(&self, severity: Severity) -> bool {
		severity.meets_threshold(self.level())
	}

	/// True when both values are the same logger.
	pub fn ptr_eq(&self, other: &Logger) -> bool {
		Arc::ptr_eq(&self.inner, &other.inner)
	}

	pub fn debug(&self, message: &str) {
		self.log(Severity::Debug, message);
	}

	pub fn info(&self, message: &str) {
		self.log(Severity::Info, message);
	}

	pub fn warn(&self, message: &str) {
		self.log(Severity::Warn, message);
	}

	pub fn err(&self, message: &str) {
		self.log(Severity::Error, message);
	}

	pub fn log(&self, severity: Severity, message: &str) {
		if !self.is_enabled(severity) {
			return;
		}
		self.emit(severity, message);
	}

	/// Formats `args` only when `severity` passes the logger's level.
	pub fn log_fmt(&self, severity: Severity, args: fmt::Arguments<'_>) {
		if !self.is_enabled(severity) {
			return;
		}
		match args.as_str() {
			Some(message) => self.emit(severity, message),
			None => self.emit(severity, &args.to_string()),
		}
	}

	fn emit(&self, severity: Severity, message: &str) {
		let time = record::now();
		for chunk in record::chunks(message, MESSAGE_CHUNK_SIZE) {
			let record = LogRecord::with_time(severity, self.inner.name.as_str(), time, chunk);
			self.inner.registry.dispatch(&record);
		}
	}
}

impl fmt::Debug for Logger {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Logger").field("name", &self.name()).field("level", &self.level()).finish()
	}
}
