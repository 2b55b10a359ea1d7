// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Built-in console handler

use std::{
	fmt,
	io::{self, Write},
	sync::Arc,
};

use colored::Color;
use parking_lot::Mutex;
use tracing::warn;

use crate::{
	config::{ConsoleSettings, ConsoleTarget},
	error::HandlerError,
	format::DEFAULT_FORMAT,
	handler::Handler,
	record::LogRecord,
	severity::Severity,
};

/// Writer shared between the console handler and whoever reads it back.
pub type SharedWriter = Arc<Mutex<dyn Write + Send>>;

/// Where console lines go.
#[derive(Clone)]
pub enum ConsoleOutput {
	Stdout,
	Stderr,
	Writer(SharedWriter),
}

impl fmt::Debug for ConsoleOutput {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ConsoleOutput::Stdout => f.write_str("Stdout"),
			ConsoleOutput::Stderr => f.write_str("Stderr"),
			ConsoleOutput::Writer(_) => f.write_str("Writer"),
		}
	}
}

impl From<ConsoleTarget> for ConsoleOutput {
	fn from(target: ConsoleTarget) -> Self {
		match target {
			ConsoleTarget::Stdout => ConsoleOutput::Stdout,
			ConsoleTarget::Stderr => ConsoleOutput::Stderr,
		}
	}
}

/// Writes one formatted line per record to the console
#[derive(Debug, Clone)]
pub struct ConsoleHandler {
	level: Severity,
	format: String,
	color: bool,
	output: ConsoleOutput,
}

impl ConsoleHandler {
	pub fn new() -> Self {
		Self {
			level: Severity::Info,
			format: DEFAULT_FORMAT.to_string(),
			color: false,
			output: ConsoleOutput::Stdout,
		}
	}

	pub fn from_settings(settings: &ConsoleSettings) -> Self {
		Self::new()
			.with_level(settings.level)
			.with_format(settings.format.clone())
			.with_color(settings.color)
			.with_output(settings.output.into())
	}

	pub fn with_level(mut self, level: Severity) -> Self {
		self.level = level;
		self
	}

	pub fn with_format(mut self, format: impl Into<String>) -> Self {
		self.format = format.into();
		self
	}

	pub fn with_color(mut self, color: bool) -> Self {
		self.color = color;
		self
	}

	pub fn with_output(mut self, output: ConsoleOutput) -> Self {
		self.output = output;
		self
	}

	pub fn color(&self) -> bool {
		self.color
	}

	pub fn output(&self) -> &ConsoleOutput {
		&self.output
	}

	fn colorize(&self, severity: Severity, line: String) -> String {
		if !self.color {
			return line;
		}
		// ignores terminal detection
		let color = match severity {
			Severity::Debug | Severity::Info => return line,
			Severity::Warn => Color::Yellow,
			Severity::Error => Color::Red,
		};
		format!("\x1b[1;{}m{line}\x1b[0m", color.to_fg_str())
	}

	fn write_line(&self, line: &str) -> io::Result<()> {
		match &self.output {
			ConsoleOutput::Stdout => {
				let mut out = io::stdout().lock();
				writeln!(out, "{line}")
			}
			ConsoleOutput::Stderr => {
				let mut out = io::stderr().lock();
				writeln!(out, "{line}")
			}
			ConsoleOutput::Writer(writer) => {
				let mut out = writer.lock();
				writeln!(out, "{line}")
			}
		}
	}
}

impl Default for ConsoleHandler {
	fn default() -> Self {
		Self::new()
	}
}

impl Handler for ConsoleHandler {
	fn name(&self) -> &str {
		"console"
	}

	fn level(&self) -> Severity {
		self.level
	}

	fn format(&self) -> &str {
		&self.format
	}

	fn teardown(&self) {
		let flushed = match &self.output {
			ConsoleOutput::Stdout => io::stdout().flush(),
			ConsoleOutput::Stderr => io::stderr().flush(),
			ConsoleOutput::Writer(writer) => writer.lock().flush(),
		};
		if let Err(err) = flushed {
			warn!(output = ?self.output, %err, "console handler flush failed");
		}
	}

	fn handle(&self, record: &LogRecord) -> Result<(), HandlerError> {
		let line = self.colorize(record.severity, self.render(record));
		self.write_line(&line)?;
		Ok(())
	}
}
