// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Ordered handler set and record dispatch.
//!
//! Writers serialize on `write` and publish a fresh `Arc<Vec<Entry>>`.
//! Dispatch clones the current `Arc` under a short read lock and walks it
//! without holding any lock, so concurrent log calls never wait on each
//! other and a handler may log from inside `handle` without deadlocking.
//!
//! A removed handler may still be in use by a dispatch that took its
//! snapshot earlier. Teardown therefore runs when the last snapshot holding
//! the handler is dropped, never while a `handle` call can still follow.

use std::{
	ops::Deref,
	panic::{AssertUnwindSafe, catch_unwind},
	sync::{
		Arc,
		atomic::{AtomicU64, Ordering},
	},
};

use crossbeam_channel::Receiver;
use parking_lot::{Mutex, RwLock};
use tracing::{debug, info};

use crate::{
	diagnostic::{DispatchFailure, Diagnostics, panic_message},
	error::{Error, Result},
	handler::{Handler, HandlerId},
	record::LogRecord,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Origin {
	/// Derived from configuration, replaced on every `configure`.
	Builtin,
	/// Registered through `add_handler`, survives reconfiguration.
	Custom,
}

/// A handler whose setup succeeded. Dropping it tears the handler down.
pub(crate) struct Installed(Box<dyn Handler>);

impl Deref for Installed {
	type Target = dyn Handler;

	fn deref(&self) -> &Self::Target {
		self.0.as_ref()
	}
}

impl Drop for Installed {
	fn drop(&mut self) {
		debug!(handler = self.0.name(), "log handler torn down");
		self.0.teardown();
	}
}

#[derive(Clone)]
pub(crate) struct Entry {
	pub(crate) id: HandlerId,
	pub(crate) origin: Origin,
	pub(crate) handler: Arc<Installed>,
}

pub(crate) struct Registry {
	handlers: RwLock<Arc<Vec<Entry>>>,
	write: Mutex<()>,
	next_id: AtomicU64,
	diagnostics: Diagnostics,
}

impl Registry {
	pub(crate) fn new() -> Self {
		Self {
			handlers: RwLock::new(Arc::new(Vec::new())),
			write: Mutex::new(()),
			next_id: AtomicU64::new(1),
			diagnostics: Diagnostics::default(),
		}
	}

	pub(crate) fn snapshot(&self) -> Arc<Vec<Entry>> {
		Arc::clone(&self.handlers.read())
	}

	pub(crate) fn len(&self) -> usize {
		self.handlers.read().len()
	}

	fn next_id(&self) -> HandlerId {
		HandlerId(self.next_id.fetch_add(1, Ordering::Relaxed))
	}

	fn setup(mut handler: Box<dyn Handler>) -> Result<Arc<Installed>> {
		match handler.setup() {
			Ok(()) => Ok(Arc::new(Installed(handler))),
			Err(source) => Err(Error::Setup {
				handler: handler.name().to_string(),
				source,
			}),
		}
	}

	/// Publishes `next` and hands back the previous snapshot, so the caller
	/// drops it, and runs any teardown, outside the lock.
	fn publish(&self, next: Vec<Entry>) -> Arc<Vec<Entry>> {
		std::mem::replace(&mut *self.handlers.write(), Arc::new(next))
	}

	/// Sets up `handler` and appends it to the dispatch order.
	pub(crate) fn register(&self, handler: Box<dyn Handler>) -> Result<HandlerId> {
		let _guard = self.write.lock();

		let handler = Self::setup(handler)?;
		let entry = Entry {
			id: self.next_id(),
			origin: Origin::Custom,
			handler,
		};
		let id = entry.id;
		info!(handler = entry.handler.name(), %id, "log handler registered");

		let current = self.snapshot();
		let mut next = Vec::with_capacity(current.len() + 1);
		next.extend(current.iter().cloned());
		next.push(entry);
		self.publish(next);

		Ok(id)
	}

	/// Replaces every built-in handler with `builtins`, keeping custom
	/// handlers after them in their registration order.
	///
	/// All new handlers are set up before anything is swapped. If one fails,
	/// the ones already set up are torn down and the registry is unchanged.
	pub(crate) fn replace_builtins(&self, builtins: Vec<Box<dyn Handler>>) -> Result<()> {
		let _guard = self.write.lock();

		// dropping `ready` on error tears down what was set up so far
		let ready = builtins.into_iter().map(Self::setup).collect::<Result<Vec<_>>>()?;

		let current = self.snapshot();
		let installed = ready.len();
		let mut next: Vec<Entry> = ready
			.into_iter()
			.map(|handler| Entry {
				id: self.next_id(),
				origin: Origin::Builtin,
				handler,
			})
			.collect();
		next.extend(current.iter().filter(|e| e.origin == Origin::Custom).cloned());

		debug!(
			installed,
			retired = current.iter().filter(|e| e.origin == Origin::Builtin).count(),
			"built-in log handlers replaced"
		);
		self.publish(next);
		Ok(())
	}

	pub(crate) fn remove(&self, id: HandlerId) -> bool {
		let _guard = self.write.lock();

		let current = self.snapshot();
		let Some(position) = current.iter().position(|e| e.id == id) else {
			return false;
		};

		let mut next = Vec::clone(&current);
		let removed = next.remove(position);
		self.publish(next);

		info!(handler = removed.handler.name(), %id, "log handler removed");
		true
	}

	pub(crate) fn clear(&self) {
		let _guard = self.write.lock();

		self.publish(Vec::new());
	}

	pub(crate) fn subscribe(&self) -> Receiver<DispatchFailure> {
		self.diagnostics.subscribe()
	}

	/// Hands `record` to every admitting handler in registration order.
	/// Errors and panics are contained per handler.
	pub(crate) fn dispatch(&self, record: &LogRecord) {
		let handlers = self.snapshot();

		for entry in handlers.iter() {
			let handler: &dyn Handler = &**entry.handler;
			if !handler.admits(record.severity) {
				continue;
			}

			let reason = match catch_unwind(AssertUnwindSafe(|| handler.handle(record))) {
				Ok(Ok(())) => continue,
				Ok(Err(err)) => err.to_string(),
				Err(payload) => panic_message(payload.as_ref()),
			};

			self.diagnostics.publish(DispatchFailure {
				handler: handler.name().to_string(),
				logger: record.name.clone(),
				severity: record.severity,
				reason,
			});
		}
	}
}
