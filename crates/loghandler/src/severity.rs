// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Log severity levels, ordered from least to most important.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Severity {
	Debug = 0,
	Info = 1,
	Warn = 2,
	Error = 3,
}

impl Severity {
	pub const ALL: [Severity; 4] = [Severity::Debug, Severity::Info, Severity::Warn, Severity::Error];

	/// True when `self` is at least as severe as `min`.
	#[inline]
	pub fn meets_threshold(self, min: Severity) -> bool {
		self >= min
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			Severity::Debug => "DEBUG",
			Severity::Info => "INFO",
			Severity::Warn => "WARN",
			Severity::Error => "ERROR",
		}
	}

	pub(crate) fn from_u8(value: u8) -> Severity {
		match value {
			0 => Severity::Debug,
			1 => Severity::Info,
			2 => Severity::Warn,
			_ => Severity::Error,
		}
	}
}

impl fmt::Display for Severity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Severity {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"debug" => Ok(Severity::Debug),
			"info" => Ok(Severity::Info),
			"warn" | "warning" => Ok(Severity::Warn),
			"error" | "err" => Ok(Severity::Error),
			_ => Err(Error::InvalidSeverity {
				value: s.to_string(),
			}),
		}
	}
}
