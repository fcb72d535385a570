//! The external location source the router listens to.
//!
//! In the browser this is the URL fragment and its change event; the
//! trait keeps the router core testable without a host environment.

use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::trace;

/// Callback invoked with the new raw location value after a change.
pub type LocationListener = Arc<dyn Fn(&str) + Send + Sync>;

/// Identifier for a registered location listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// A mutable location token with change notification.
///
/// This models the browser primitive the original front end runs on:
/// a single current value, a fire-and-forget setter, and a subscribable
/// change signal. There is no back/forward stack.
pub trait LocationSource: Send + Sync {
	/// The current raw location value.
	fn current(&self) -> String;

	/// Sets the location. Side-effecting and fire-and-forget: listeners
	/// are told about the change, the caller gets nothing back.
	fn set(&self, value: &str);

	/// Registers a change listener.
	fn subscribe(&self, listener: LocationListener) -> ListenerId;

	/// Removes a listener. Returns `false` if the id was already gone,
	/// so repeated teardown is harmless.
	fn unsubscribe(&self, id: ListenerId) -> bool;
}

/// In-process [`LocationSource`] backed by a `RwLock`.
///
/// `set` with a value equal to the current one does not notify —
/// the same way assigning an identical fragment to `location.hash`
/// fires no `hashchange` event. Redirect guards rely on this.
#[derive(Clone)]
pub struct MemoryLocationSource {
	inner: Arc<SourceInner>,
}

struct SourceInner {
	value: RwLock<String>,
	listeners: RwLock<Vec<(ListenerId, LocationListener)>>,
	next_id: AtomicU64,
}

impl MemoryLocationSource {
	/// Creates a source positioned at `/`.
	pub fn new() -> Self {
		Self::with_initial("/")
	}

	/// Creates a source positioned at the given raw value.
	pub fn with_initial(value: impl Into<String>) -> Self {
		Self {
			inner: Arc::new(SourceInner {
				value: RwLock::new(value.into()),
				listeners: RwLock::new(Vec::new()),
				next_id: AtomicU64::new(0),
			}),
		}
	}

	/// Number of live listeners. Mostly useful in tests asserting that
	/// mount/unmount cycles do not leak registrations.
	pub fn listener_count(&self) -> usize {
		self.inner.listeners.read().len()
	}
}

impl Default for MemoryLocationSource {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for MemoryLocationSource {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("MemoryLocationSource")
			.field("value", &*self.inner.value.read())
			.field("listeners", &self.listener_count())
			.finish()
	}
}

impl LocationSource for MemoryLocationSource {
	fn current(&self) -> String {
		self.inner.value.read().clone()
	}

	fn set(&self, value: &str) {
		{
			let mut current = self.inner.value.write();
			if *current == value {
				// Same-value write: no change event, matching hashchange.
				return;
			}
			*current = value.to_string();
		}

		// Notify on a snapshot so listeners may unsubscribe re-entrantly.
		let snapshot: Vec<LocationListener> = self
			.inner
			.listeners
			.read()
			.iter()
			.map(|(_, listener)| Arc::clone(listener))
			.collect();

		for listener in snapshot {
			listener(value);
		}
	}

	fn subscribe(&self, listener: LocationListener) -> ListenerId {
		let id = ListenerId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
		self.inner.listeners.write().push((id, listener));
		trace!(id = id.0, "location listener registered");
		id
	}

	fn unsubscribe(&self, id: ListenerId) -> bool {
		let mut listeners = self.inner.listeners.write();
		let before = listeners.len();
		listeners.retain(|(listener_id, _)| *listener_id != id);
		let removed = listeners.len() < before;
		if removed {
			trace!(id = id.0, "location listener removed");
		}
		removed
	}
}
