// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Property bag and the typed handler settings derived from it.
//!
//! Keys are namespaced `lh.<handler>.<option>`. Keys nobody recognizes are
//! ignored so that newer configurations keep working against older handlers.
//!
//! | key                 | default                              |
//! |---------------------|--------------------------------------|
//! | `lh.console.enabled`| `true`                               |
//! | `lh.console.level`  | `info`                               |
//! | `lh.console.color`  | `false`                              |
//! | `lh.console.format` | `{severity} {name} {time} {message}` |
//! | `lh.console.output` | `stdout`                             |
//! | `lh.syslog.enabled` | `false`                              |
//! | `lh.syslog.level`   | `info`                               |
//! | `lh.syslog.format`  | `{severity} {name} {time} {message}` |

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::{
	error::{Error, Result},
	format::DEFAULT_FORMAT,
	severity::Severity,
};

const DEFAULT_LEVEL: Severity = Severity::Info;

/// Flat string to string configuration input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Properties {
	values: BTreeMap<String, String>,
}

impl Properties {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
		self.values.insert(key.into(), value.into());
		self
	}

	pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.set_property(key, value);
		self
	}

	pub fn get(&self, key: &str) -> Option<&str> {
		self.values.get(key).map(String::as_str)
	}

	pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
		self.get(key).unwrap_or(default)
	}

	pub fn get_bool(&self, key: &str, default: bool) -> Result<bool> {
		match self.get(key) {
			None => Ok(default),
			Some(value) => parse_bool(value).ok_or_else(|| Error::InvalidBool {
				key: key.to_string(),
				value: value.to_string(),
			}),
		}
	}

	pub fn get_severity(&self, key: &str, default: Severity) -> Result<Severity> {
		match self.get(key) {
			None => Ok(default),
			Some(value) => value.parse(),
		}
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}
}

fn parse_bool(value: &str) -> Option<bool> {
	match value.trim().to_ascii_lowercase().as_str() {
		"true" => Some(true),
		"false" => Some(false),
		_ => None,
	}
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Properties {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self {
			values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
		}
	}
}

impl From<HashMap<String, String>> for Properties {
	fn from(values: HashMap<String, String>) -> Self {
		values.into_iter().collect()
	}
}

impl From<BTreeMap<String, String>> for Properties {
	fn from(values: BTreeMap<String, String>) -> Self {
		Self {
			values,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleTarget {
	Stdout,
	Stderr,
}

impl ConsoleTarget {
	fn parse(value: &str) -> Result<Self> {
		match value.trim().to_ascii_lowercase().as_str() {
			"stdout" => Ok(ConsoleTarget::Stdout),
			"stderr" => Ok(ConsoleTarget::Stderr),
			_ => Err(Error::InvalidOutput {
				value: value.to_string(),
			}),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleSettings {
	pub level: Severity,
	pub format: String,
	pub color: bool,
	pub output: ConsoleTarget,
}

impl Default for ConsoleSettings {
	fn default() -> Self {
		Self {
			level: DEFAULT_LEVEL,
			format: DEFAULT_FORMAT.to_string(),
			color: false,
			output: ConsoleTarget::Stdout,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyslogSettings {
	pub level: Severity,
	pub format: String,
}

impl Default for SyslogSettings {
	fn default() -> Self {
		Self {
			level: DEFAULT_LEVEL,
			format: DEFAULT_FORMAT.to_string(),
		}
	}
}

/// Typed settings for the built-in handlers. `None` means disabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
	pub console: Option<ConsoleSettings>,
	pub syslog: Option<SyslogSettings>,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			console: Some(ConsoleSettings::default()),
			syslog: None,
		}
	}
}

impl Settings {
	/// Parses every recognized key. Nothing is applied anywhere, so a
	/// failure here leaves callers free to keep their previous settings.
	pub fn from_properties(props: &Properties) -> Result<Self> {
		Ok(Self {
			console: console_settings(props)?,
			syslog: syslog_settings(props)?,
		})
	}
}

fn console_settings(props: &Properties) -> Result<Option<ConsoleSettings>> {
	if !props.get_bool("lh.console.enabled", true)? {
		return Ok(None);
	}

	Ok(Some(ConsoleSettings {
		level: props.get_severity("lh.console.level", DEFAULT_LEVEL)?,
		format: props.get_or("lh.console.format", DEFAULT_FORMAT).to_string(),
		color: props.get_bool("lh.console.color", false)?,
		output: ConsoleTarget::parse(props.get_or("lh.console.output", "stdout"))?,
	}))
}

fn syslog_settings(props: &Properties) -> Result<Option<SyslogSettings>> {
	if !props.get_bool("lh.syslog.enabled", false)? {
		return Ok(None);
	}

	Ok(Some(SyslogSettings {
		level: props.get_severity("lh.syslog.level", DEFAULT_LEVEL)?,
		format: props.get_or("lh.syslog.format", DEFAULT_FORMAT).to_string(),
	}))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_empty_properties_give_defaults() {
		let settings = Settings::from_properties(&Properties::new()).unwrap();
		assert_eq!(settings, Settings::default());
		assert_eq!(settings.console.unwrap().level, Severity::Info);
	}

	#[test]
	fn test_console_level_and_color() {
		let props = Properties::new().with("lh.console.level", "warn").with("lh.console.color", "true");
		let console = Settings::from_properties(&props).unwrap().console.unwrap();
		assert_eq!(console.level, Severity::Warn);
		assert!(console.color);
	}

	#[test]
	fn test_level_is_case_insensitive() {
		let props = Properties::new().with("lh.console.level", "DeBuG");
		let console = Settings::from_properties(&props).unwrap().console.unwrap();
		assert_eq!(console.level, Severity::Debug);
	}

	#[test]
	fn test_invalid_level() {
		let props = Properties::new().with("lh.console.level", "verbose");
		let err = Settings::from_properties(&props).unwrap_err();
		assert!(matches!(err, Error::InvalidSeverity { ref value } if value == "verbose"));
	}

	#[test]
	fn test_invalid_color() {
		let props = Properties::new().with("lh.console.color", "maybe");
		let err = Settings::from_properties(&props).unwrap_err();
		assert!(matches!(err, Error::InvalidBool { ref key, .. } if key == "lh.console.color"));
	}

	#[test]
	fn test_invalid_output() {
		let props = Properties::new().with("lh.console.output", "printer");
		let err = Settings::from_properties(&props).unwrap_err();
		assert!(matches!(err, Error::InvalidOutput { .. }));
	}

	#[test]
	fn test_console_disabled() {
		let props = Properties::new().with("lh.console.enabled", "false").with("lh.console.level", "verbose");
		let settings = Settings::from_properties(&props).unwrap();
		assert!(settings.console.is_none());
	}

	#[test]
	fn test_console_output_and_format() {
		let props =
			Properties::new().with("lh.console.output", "stderr").with("lh.console.format", "{name}: {message}");
		let console = Settings::from_properties(&props).unwrap().console.unwrap();
		assert_eq!(console.output, ConsoleTarget::Stderr);
		assert_eq!(console.format, "{name}: {message}");
	}

	#[test]
	fn test_syslog_enabled() {
		let props = Properties::new().with("lh.syslog.enabled", "true").with("lh.syslog.level", "err");
		let syslog = Settings::from_properties(&props).unwrap().syslog.unwrap();
		assert_eq!(syslog.level, Severity::Error);
		assert_eq!(syslog.format, DEFAULT_FORMAT);
	}

	#[test]
	fn test_unknown_keys_are_ignored() {
		let props = Properties::new().with("lh.file.path", "/tmp/x.log").with("something.else", "1");
		assert_eq!(Settings::from_properties(&props).unwrap(), Settings::default());
	}

	#[test]
	fn test_get_helpers() {
		let mut props = Properties::new();
		props.set_property("a", "1").set_property("b", "TRUE");
		assert_eq!(props.get("a"), Some("1"));
		assert_eq!(props.get("missing"), None);
		assert_eq!(props.get_or("missing", "x"), "x");
		assert!(props.get_bool("b", false).unwrap());
		assert!(!props.get_bool("missing", false).unwrap());
		assert_eq!(props.len(), 2);
	}

	#[test]
	fn test_from_hash_map() {
		let mut map = HashMap::new();
		map.insert("lh.console.level".to_string(), "error".to_string());
		let props = Properties::from(map);
		assert_eq!(props.get("lh.console.level"), Some("error"));
	}

	#[test]
	fn test_deserialize_from_json() {
		let props: Properties =
			serde_json::from_str(r#"{"lh.console.level":"warn","lh.console.color":"false"}"#).unwrap();
		assert_eq!(props.get("lh.console.level"), Some("warn"));
		assert_eq!(props.get("lh.console.color"), Some("false"));
	}
}
