// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Channel for failures that happen while dispatching records.
//!
//! A failing handler never surfaces to the code that logged. Instead the
//! failure is traced and published to every subscriber.

use std::{any::Any, fmt};

use crossbeam_channel::{Receiver, Sender, TrySendError, bounded};
use parking_lot::RwLock;
use tracing::warn;

use crate::severity::Severity;

/// Failures a subscriber may have queued. Further ones are dropped for that
/// subscriber until it drains.
pub const DIAGNOSTIC_CAPACITY: usize = 1024;

/// A handler failed while handling one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchFailure {
	pub handler: String,
	pub logger: String,
	pub severity: Severity,
	pub reason: String,
}

impl fmt::Display for DispatchFailure {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"handler {} failed on {} record from {}: {}",
			self.handler, self.severity, self.logger, self.reason
		)
	}
}

#[derive(Default)]
pub(crate) struct Diagnostics {
	subscribers: RwLock<Vec<Sender<DispatchFailure>>>,
}

impl Diagnostics {
	pub(crate) fn subscribe(&self) -> Receiver<DispatchFailure> {
		let (sender, receiver) = bounded(DIAGNOSTIC_CAPACITY);
		self.subscribers.write().push(sender);
		receiver
	}

	pub(crate) fn publish(&self, failure: DispatchFailure) {
		warn!(
			handler = %failure.handler,
			logger = %failure.logger,
			severity = %failure.severity,
			reason = %failure.reason,
			"log handler failed"
		);

		let mut gone = Vec::new();
		for subscriber in self.subscribers.read().iter() {
			match subscriber.try_send(failure.clone()) {
				Ok(()) | Err(TrySendError::Full(_)) => {}
				Err(TrySendError::Disconnected(_)) => gone.push(subscriber.clone()),
			}
		}

		if !gone.is_empty() {
			self.subscribers.write().retain(|subscriber| !gone.iter().any(|g| g.same_channel(subscriber)));
		}
	}

	#[cfg(test)]
	pub(crate) fn subscriber_count(&self) -> usize {
		self.subscribers.read().len()
	}
}

/// Best effort text for a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
	if let Some(s) = payload.downcast_ref::<&str>() {
		format!("panicked: {s}")
	} else if let Some(s) = payload.downcast_ref::<String>() {
		format!("panicked: {s}")
	} else {
		"panicked".to_string()
	}
}
