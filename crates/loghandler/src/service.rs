// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Process-wide log service

use std::{
	collections::HashMap,
	sync::{
		Arc,
		atomic::{AtomicBool, AtomicU8, Ordering},
	},
};

use crossbeam_channel::Receiver;
use once_cell::sync::Lazy;
use parking_lot::{Mutex, RwLock};
use tracing::{debug, warn};

use crate::{
	config::{Properties, Settings},
	diagnostic::DispatchFailure,
	error::Result,
	handler::{
		Handler, HandlerId,
		console::{ConsoleHandler, ConsoleOutput, SharedWriter},
	},
	logger::Logger,
	registry::Registry,
	severity::Severity,
};

static SERVICE: Lazy<LogService> = Lazy::new(LogService::new);

/// Owns the handlers and the named loggers.
///
/// Until [`LogService::configure`] succeeds the service runs on default
/// settings: a console handler at INFO without color.
pub struct LogService {
	registry: Arc<Registry>,
	loggers: RwLock<HashMap<String, Logger>>,
	level: AtomicU8,
	configured: AtomicBool,
	settings: RwLock<Settings>,
	configure_lock: Mutex<()>,
	console_writer: Option<SharedWriter>,
}

impl LogService {
	/// The process-wide instance, created on first use.
	pub fn get() -> &'static LogService {
		&SERVICE
	}

	/// A standalone service with default settings.
	pub fn new() -> Self {
		LogServiceBuilder::new().build()
	}

	pub fn builder() -> LogServiceBuilder {
		LogServiceBuilder::new()
	}

	/// Applies `props` to the built-in handlers.
	///
	/// On error nothing changes: parsing happens before any handler is
	/// touched, and every new built-in is set up before the old ones are
	/// swapped out. Handlers added through [`LogService::add_handler`] are
	/// kept across calls.
	pub fn configure(&self, props: &Properties) -> Result<()> {
		let _guard = self.configure_lock.lock();

		let settings = Settings::from_properties(props)?;
		self.registry.replace_builtins(self.builtins(&settings))?;

		debug!(?settings, "log service configured");
		*self.settings.write() = settings;
		self.configured.store(true, Ordering::Release);
		Ok(())
	}

	pub fn is_configured(&self) -> bool {
		self.configured.load(Ordering::Acquire)
	}

	/// Settings of the last successful configuration, or the defaults.
	pub fn settings(&self) -> Settings {
		self.settings.read().clone()
	}

	/// Sets `handler` up and appends it to the dispatch order.
	pub fn add_handler<H: Handler + 'static>(&self, handler: H) -> Result<HandlerId> {
		self.add_boxed_handler(Box::new(handler))
	}

	pub fn add_boxed_handler(&self, handler: Box<dyn Handler>) -> Result<HandlerId> {
		self.registry.register(handler)
	}

	/// Removes and tears down the handler. Returns false for unknown ids.
	pub fn remove_handler(&self, id: HandlerId) -> bool {
		self.registry.remove(id)
	}

	/// Removes and tears down every handler, built-in ones included.
	pub fn clear_handlers(&self) {
		self.registry.clear();
	}

	pub fn handler_count(&self) -> usize {
		self.registry.len()
	}

	/// Level given to loggers created after this call.
	pub fn set_level(&self, level: Severity) {
		self.level.store(level as u8, Ordering::Relaxed);
	}

	pub fn level(&self) -> Severity {
		Severity::from_u8(self.level.load(Ordering::Relaxed))
	}

	/// Returns the logger called `name`, creating it on first use.
	pub fn get_logger(&self, name: &str) -> Logger {
		if let Some(logger) = self.loggers.read().get(name) {
			return logger.clone();
		}

		let mut loggers = self.loggers.write();
		loggers.entry(name.to_string())
			.or_insert_with(|| Logger::new(name, self.level(), Arc::clone(&self.registry)))
			.clone()
	}

	/// Failures raised by handlers while dispatching.
	///
	/// At most [`crate::diagnostic::DIAGNOSTIC_CAPACITY`] failures wait in the
	/// receiver; newer ones are dropped until it is drained.
	pub fn subscribe_diagnostics(&self) -> Receiver<DispatchFailure> {
		self.registry.subscribe()
	}

	fn builtins(&self, settings: &Settings) -> Vec<Box<dyn Handler>> {
		let mut handlers: Vec<Box<dyn Handler>> = Vec::new();

		if let Some(console) = &settings.console {
			let mut handler = ConsoleHandler::from_settings(console);
			if let Some(writer) = &self.console_writer {
				handler = handler.with_output(ConsoleOutput::Writer(Arc::clone(writer)));
			}
			handlers.push(Box::new(handler));
		}

		if let Some(syslog) = &settings.syslog {
			#[cfg(unix)]
			handlers.push(Box::new(crate::handler::syslog::SyslogHandler::from_settings(syslog)));
			#[cfg(not(unix))]
			warn!(?syslog, "syslog handler is not available on this platform");
		}

		handlers
	}
}

impl Default for LogService {
	fn default() -> Self {
		Self::new()
	}
}

/// Builder for standalone services
pub struct LogServiceBuilder {
	level: Severity,
	console_writer: Option<SharedWriter>,
}

impl LogServiceBuilder {
	pub fn new() -> Self {
		Self {
			level: Severity::Info,
			console_writer: None,
		}
	}

	/// Initial level for new loggers
	pub fn level(mut self, level: Severity) -> Self {
		self.level = level;
		self
	}

	/// Sends built-in console output to `writer` instead of stdout/stderr.
	pub fn console_writer(mut self, writer: SharedWriter) -> Self {
		self.console_writer = Some(writer);
		self
	}

	pub fn build(self) -> LogService {
		let service = LogService {
			registry: Arc::new(Registry::new()),
			loggers: RwLock::new(HashMap::new()),
			level: AtomicU8::new(self.level as u8),
			configured: AtomicBool::new(false),
			settings: RwLock::new(Settings::default()),
			configure_lock: Mutex::new(()),
			console_writer: self.console_writer,
		};

		if let Err(err) = service.registry.replace_builtins(service.builtins(&Settings::default())) {
			warn!(%err, "default log handlers unavailable");
		}
		service
	}
}

impl Default for LogServiceBuilder {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use crossbeam_channel::{Sender, unbounded};

	use super::*;
	use crate::{
		error::{Error, HandlerError},
		record::LogRecord,
	};

	fn buffered() -> (LogService, Arc<Mutex<Vec<u8>>>) {
		let buffer = Arc::new(Mutex::new(Vec::new()));
		let service = LogService::builder().console_writer(buffer.clone()).build();
		(service, buffer)
	}

	fn lines(buffer: &Arc<Mutex<Vec<u8>>>) -> Vec<String> {
		String::from_utf8(buffer.lock().clone()).unwrap().lines().map(str::to_string).collect()
	}

	struct Capture {
		level: Severity,
		sender: Sender<String>,
	}

	impl Handler for Capture {
		fn level(&self) -> Severity {
			self.level
		}

		fn handle(&self, record: &LogRecord) -> std::result::Result<(), HandlerError> {
			let _ = self.sender.send(record.message.clone());
			Ok(())
		}
	}

	#[test]
	fn test_unconfigured_defaults() {
		let (service, buffer) = buffered();
		assert!(!service.is_configured());
		assert_eq!(service.handler_count(), 1);
		assert_eq!(service.settings(), Settings::default());

		let logger = service.get_logger("main");
		assert_eq!(logger.level(), Severity::Info);
		logger.debug("hidden");
		logger.info("shown");

		let out = lines(&buffer);
		assert_eq!(out.len(), 1);
		assert!(out[0].starts_with("INFO main "));
		assert!(out[0].ends_with(" shown"));
	}

	#[test]
	fn test_get_logger_returns_same_identity() {
		let service = LogService::new();
		let a = service.get_logger("x");
		let b = service.get_logger("x");
		assert!(a.ptr_eq(&b));

		a.set_level(Severity::Error);
		assert_eq!(b.level(), Severity::Error);

		assert!(!a.ptr_eq(&service.get_logger("y")));
	}

	#[test]
	fn test_service_level_applies_to_new_loggers() {
		let service = LogService::builder().level(Severity::Warn).build();
		assert_eq!(service.get_logger("a").level(), Severity::Warn);

		service.set_level(Severity::Debug);
		assert_eq!(service.get_logger("b").level(), Severity::Debug);
		assert_eq!(service.get_logger("a").level(), Severity::Warn);
	}

	#[test]
	fn test_configure_marks_configured() {
		let service = LogService::new();
		service.configure(&Properties::new().with("lh.console.level", "debug")).unwrap();
		assert!(service.is_configured());
		assert_eq!(service.settings().console.unwrap().level, Severity::Debug);
	}

	#[test]
	fn test_configure_failure_keeps_previous_state() {
		let (service, buffer) = buffered();
		service.configure(&Properties::new().with("lh.console.level", "error")).unwrap();

		let err = service.configure(&Properties::new().with("lh.console.level", "verbose")).unwrap_err();
		assert!(matches!(err, Error::InvalidSeverity { .. }));
		assert_eq!(service.settings().console.unwrap().level, Severity::Error);
		assert_eq!(service.handler_count(), 1);

		let logger = service.get_logger("main");
		logger.warn("dropped");
		logger.err("kept");
		let out = lines(&buffer);
		assert_eq!(out.len(), 1);
		assert!(out[0].ends_with(" kept"));
	}

	#[test]
	fn test_configure_disables_console() {
		let service = LogService::new();
		service.configure(&Properties::new().with("lh.console.enabled", "false")).unwrap();
		assert_eq!(service.handler_count(), 0);
	}

	#[test]
	fn test_reconfigure_preserves_custom_handlers() {
		let (service, _buffer) = buffered();
		let (sender, receiver) = unbounded();
		service.add_handler(Capture {
			level: Severity::Debug,
			sender,
		})
		.unwrap();

		service.configure(&Properties::new().with("lh.console.level", "warn")).unwrap();
		service.configure(&Properties::new().with("lh.console.enabled", "false")).unwrap();
		service.configure(&Properties::new()).unwrap();
		assert_eq!(service.handler_count(), 2);

		let logger = service.get_logger("main");
		logger.info("still here");
		assert_eq!(receiver.try_recv().unwrap(), "still here");
	}

	#[test]
	fn test_remove_and_clear_handlers() {
		let service = LogService::new();
		let (sender, _receiver) = unbounded();
		let id = service
			.add_handler(Capture {
				level: Severity::Debug,
				sender,
			})
			.unwrap();
		assert_eq!(service.handler_count(), 2);

		assert!(service.remove_handler(id));
		assert!(!service.remove_handler(id));
		assert_eq!(service.handler_count(), 1);

		service.clear_handlers();
		assert_eq!(service.handler_count(), 0);
	}

	#[test]
	fn test_console_format_from_configuration() {
		let (service, buffer) = buffered();
		service.configure(&Properties::new().with("lh.console.format", "{name}|{message}")).unwrap();

		service.get_logger("svc").info("up");
		assert_eq!(lines(&buffer), vec!["svc|up".to_string()]);
	}

	#[test]
	fn test_global_instance_is_memoized() {
		assert!(std::ptr::eq(LogService::get(), LogService::get()));
	}
}
