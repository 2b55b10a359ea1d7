// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Process-wide log service routing severity-tagged messages to pluggable
//! handlers.
//!
//! - [`LogService`] owns the handlers and the named loggers; one instance per
//!   process is reachable through [`LogService::get`]
//! - [`Logger`] is the per call site front end with its own level
//! - [`Handler`] is the extension point; [`ConsoleHandler`] and, on unix,
//!   [`SyslogHandler`] are built in and driven by [`Properties`]
//!
//! A record reaches a handler only if it passes the logger's level and then
//! the handler's level. Handlers run one after another on the logging
//! thread, in registration order. A handler that fails or panics is skipped
//! and reported through [`LogService::subscribe_diagnostics`]; the code that
//! logged never sees it. There is no timeout, so a slow handler makes every
//! log call that reaches it slow.
//!
//! # Usage
//!
//! ```no_run
//! use loghandler::{LogService, Properties, Severity, log_info};
//!
//! let props = Properties::new().with("lh.console.level", "debug").with("lh.console.color", "true");
//!
//! let service = LogService::get();
//! service.configure(&props).expect("valid logging properties");
//!
//! let logger = service.get_logger("example");
//! logger.set_level(Severity::Debug);
//! logger.debug("Hello World!");
//! logger.err("Hello World!");
//! log_info!(logger, "{} handlers registered", service.handler_count());
//! ```

pub mod config;
pub mod diagnostic;
pub mod error;
pub mod format;
pub mod handler;
mod logger;
mod macros;
pub mod record;
mod registry;
mod service;
mod severity;

pub use config::{ConsoleSettings, ConsoleTarget, Properties, Settings, SyslogSettings};
pub use diagnostic::{DIAGNOSTIC_CAPACITY, DispatchFailure};
pub use error::{Error, HandlerError, Result};
pub use format::DEFAULT_FORMAT;
#[cfg(unix)]
pub use handler::syslog::SyslogHandler;
pub use handler::{
	Handler, HandlerId,
	console::{ConsoleHandler, ConsoleOutput, SharedWriter},
};
pub use logger::Logger;
pub use record::LogRecord;
pub use service::{LogService, LogServiceBuilder};
pub use severity::Severity;

/// Shorthand for `LogService::get().get_logger(name)`.
pub fn get_logger(name: &str) -> Logger {
	LogService::get().get_logger(name)
}
