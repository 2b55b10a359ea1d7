// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Pattern rendering for handler output.
//!
//! A pattern is literal text with these tokens:
//!
//! - `{severity}`: `DEBUG`, `INFO`, `WARN` or `ERROR`
//! - `{name}`: the logger name
//! - `{time}`: nanoseconds since the Unix epoch as a decimal integer
//! - `{date}`: the same instant as `YYYY-MM-DD HH:MM:SS.ffffff` in UTC
//! - `{message}`: the message text
//!
//! Anything else, including unknown `{...}` sequences, is copied through
//! verbatim. Substituted values are never rescanned, so a message containing
//! `{name}` is printed as is.

use std::fmt::Write;

use crate::record::LogRecord;

pub const DEFAULT_FORMAT: &str = "{severity} {name} {time} {message}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
	Severity,
	Name,
	Time,
	Date,
	Message,
}

const TOKENS: [(&str, Token); 5] = [
	("{severity}", Token::Severity),
	("{name}", Token::Name),
	("{time}", Token::Time),
	("{date}", Token::Date),
	("{message}", Token::Message),
];

/// Renders `format` against `record`.
pub fn render(format: &str, record: &LogRecord) -> String {
	let mut out = String::with_capacity(format.len() + record.message.len() + record.name.len() + 32);
	let mut rest = format;

	while let Some(start) = rest.find('{') {
		out.push_str(&rest[..start]);
		rest = &rest[start..];

		match TOKENS.iter().find(|(text, _)| rest.starts_with(text)) {
			Some((text, token)) => {
				write_token(&mut out, *token, record);
				rest = &rest[text.len()..];
			}
			None => {
				out.push('{');
				rest = &rest[1..];
			}
		}
	}
	out.push_str(rest);
	out
}

fn write_token(out: &mut String, token: Token, record: &LogRecord) {
	match token {
		Token::Severity => out.push_str(record.severity.as_str()),
		Token::Name => out.push_str(&record.name),
		Token::Time => {
			let _ = write!(out, "{}", record.time);
		}
		Token::Date => {
			let _ = write!(out, "{}", record.date_time().format("%Y-%m-%d %H:%M:%S%.6f"));
		}
		Token::Message => out.push_str(&record.message),
	}
}
