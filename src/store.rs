//! Location store: single source of truth for the current [`Location`].

use crate::location::Location;
use crate::source::{ListenerId, LocationSource};
use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::trace;

/// Callback invoked with the new [`Location`] after each change.
pub type LocationSubscriber = Arc<dyn Fn(&Location) + Send + Sync>;

/// Identifier for a consumer subscription on the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

/// Holds the current [`Location`] and notifies consumers on change.
///
/// The store owns exactly one listener on the external source while
/// bound. Each source signal re-parses the raw value and replaces the
/// stored location atomically, then fans out to consumer subscribers.
///
/// Teardown releases the source listener and is safe to repeat; `Drop`
/// calls it too, so repeated mount/unmount cycles leave no listener
/// behind.
pub struct LocationStore {
	source: Arc<dyn LocationSource>,
	current: Arc<RwLock<Location>>,
	subscribers: Arc<SubscriberTable>,
	binding: RwLock<Option<ListenerId>>,
}

struct SubscriberTable {
	entries: RwLock<Vec<(SubscriberId, LocationSubscriber)>>,
	next_id: AtomicU64,
}

impl SubscriberTable {
	fn notify(&self, location: &Location) {
		// Snapshot first so subscribers may unsubscribe re-entrantly.
		let snapshot: Vec<LocationSubscriber> = self
			.entries
			.read()
			.iter()
			.map(|(_, subscriber)| Arc::clone(subscriber))
			.collect();

		for subscriber in snapshot {
			subscriber(location);
		}
	}
}

impl LocationStore {
	/// Creates a store over the given source, initialized by parsing the
	/// source's current value. Call [`bind`](Self::bind) to start
	/// receiving change notifications.
	pub fn new(source: Arc<dyn LocationSource>) -> Self {
		let initial = Location::parse(&source.current());

		Self {
			source,
			current: Arc::new(RwLock::new(initial)),
			subscribers: Arc::new(SubscriberTable {
				entries: RwLock::new(Vec::new()),
				next_id: AtomicU64::new(0),
			}),
			binding: RwLock::new(None),
		}
	}

	/// Registers the store's listener on the source. Binding twice is a
	/// no-op; exactly one listener exists per bound store.
	pub fn bind(&self) {
		let mut binding = self.binding.write();
		if binding.is_some() {
			return;
		}

		let current = Arc::clone(&self.current);
		let subscribers = Arc::clone(&self.subscribers);
		let id = self.source.subscribe(Arc::new(move |raw| {
			let location = Location::parse(raw);
			*current.write() = location.clone();
			subscribers.notify(&location);
		}));

		trace!("location store bound to source");
		*binding = Some(id);
	}

	/// Whether the store currently holds a source listener.
	pub fn is_bound(&self) -> bool {
		self.binding.read().is_some()
	}

	/// The current location (both fields from the same parse).
	pub fn current(&self) -> Location {
		self.current.read().clone()
	}

	/// Registers a consumer callback, fired after every location change.
	pub fn subscribe(&self, subscriber: LocationSubscriber) -> SubscriberId {
		let id = SubscriberId(self.subscribers.next_id.fetch_add(1, Ordering::Relaxed));
		self.subscribers.entries.write().push((id, subscriber));
		id
	}

	/// Removes a consumer callback. Returns `false` if already removed.
	pub fn unsubscribe(&self, id: SubscriberId) -> bool {
		let mut entries = self.subscribers.entries.write();
		let before = entries.len();
		entries.retain(|(subscriber_id, _)| *subscriber_id != id);
		entries.len() < before
	}

	/// Releases the source listener. Idempotent; also runs on `Drop`.
	pub fn teardown(&self) {
		if let Some(id) = self.binding.write().take() {
			self.source.unsubscribe(id);
			trace!("location store unbound from source");
		}
	}
}

impl Drop for LocationStore {
	fn drop(&mut self) {
		self.teardown();
	}
}

impl std::fmt::Debug for LocationStore {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("LocationStore")
			.field("current", &*self.current.read())
			.field("bound", &self.is_bound())
			.finish()
	}
}
