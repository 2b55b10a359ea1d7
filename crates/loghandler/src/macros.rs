// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Logging macros for convenient usage
//!
//! The message is only formatted when the logger's level admits it.

/// Log at an explicit severity
#[macro_export]
macro_rules! log {
	($logger:expr, $severity:expr, $($arg:tt)+) => {
		$logger.log_fmt($severity, format_args!($($arg)+))
	};
}

/// Debug level logging
#[macro_export]
macro_rules! log_debug {
	($logger:expr, $($arg:tt)+) => {
		$crate::log!($logger, $crate::Severity::Debug, $($arg)+)
	};
}

/// Info level logging
#[macro_export]
macro_rules! log_info {
	($logger:expr, $($arg:tt)+) => {
		$crate::log!($logger, $crate::Severity::Info, $($arg)+)
	};
}

/// Warning level logging
#[macro_export]
macro_rules! log_warn {
	($logger:expr, $($arg:tt)+) => {
		$crate::log!($logger, $crate::Severity::Warn, $($arg)+)
	};
}

/// Error level logging
#[macro_export]
macro_rules! log_err {
	($logger:expr, $($arg:tt)+) => {
		$crate::log!($logger, $crate::Severity::Error, $($arg)+)
	};
}
