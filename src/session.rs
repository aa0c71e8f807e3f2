//! Per-session shared state.
//!
//! A [`Session`] is created once by whoever bootstraps the client and handed
//! to the sync layer and to any number of readers. It outlives individual
//! transports: the lobby connection and the play connection publish into the
//! same session.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::watch;

use crate::game::GameState;
use crate::net::protocol::MessageKind;

/// One decoded server push as readers see it.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
	pub kind: MessageKind,
	pub state: GameState,
}

type Slot = Option<Arc<Snapshot>>;

pub struct Session {
	name: String,
	snapshot: watch::Sender<Slot>,
	started: AtomicBool,
}

impl Session {
	pub fn new(name: impl Into<String>) -> Self {
		let (snapshot, _) = watch::channel(None);
		Self {
			name: name.into(),
			snapshot,
			started: AtomicBool::new(false),
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn reader(&self) -> SnapshotReader {
		SnapshotReader {
			rx: self.snapshot.subscribe(),
		}
	}

	pub fn latest(&self) -> Option<Arc<Snapshot>> {
		self.snapshot.borrow().clone()
	}

	pub fn is_started(&self) -> bool {
		self.started.load(Ordering::SeqCst)
	}

	/// Whole-object replace; the last published snapshot wins.
	pub(crate) fn publish(&self, snapshot: Snapshot) {
		self.snapshot.send_replace(Some(Arc::new(snapshot)));
	}

	/// Flips the started flag. True only for the call that flipped it.
	pub(crate) fn mark_started(&self) -> bool {
		!self.started.swap(true, Ordering::SeqCst)
	}
}

/// Read handle on a session's latest snapshot. Cheap to clone; readers poll
/// it rather than being pushed to.
#[derive(Clone)]
pub struct SnapshotReader {
	rx: watch::Receiver<Slot>,
}

impl SnapshotReader {
	pub fn latest(&self) -> Option<Arc<Snapshot>> {
		self.rx.borrow().clone()
	}

	/// Whether a snapshot was published since this reader last took one.
	pub fn has_changed(&self) -> bool {
		self.rx.has_changed().unwrap_or(false)
	}

	/// The latest snapshot if it is newer than the last one taken.
	pub fn take_changed(&mut self) -> Option<Arc<Snapshot>> {
		if !self.has_changed() {
			return None;
		}
		self.rx.borrow_and_update().clone()
	}
}
