use std::sync::{Mutex, PoisonError};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::ClientError;
use crate::net::transport::Transport;

/// In-memory transport that keeps every frame it was asked to send.
#[derive(Default)]
pub struct RecordingTransport {
	sent: Mutex<Vec<String>>,
	closed: AtomicBool,
	close_calls: Mutex<usize>,
}

impl RecordingTransport {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn sent(&self) -> Vec<String> {
		self.sent.lock().unwrap_or_else(PoisonError::into_inner).clone()
	}

	pub fn close_calls(&self) -> usize {
		*self.close_calls.lock().unwrap_or_else(PoisonError::into_inner)
	}
}

impl Transport for RecordingTransport {
	fn send_text(&self, text: &str) -> Result<(), ClientError> {
		if self.is_closed() {
			return Err(ClientError::ClosedTransport);
		}
		self.sent.lock().unwrap_or_else(PoisonError::into_inner).push(text.to_string());
		Ok(())
	}

	fn close(&self) {
		*self.close_calls.lock().unwrap_or_else(PoisonError::into_inner) += 1;
		self.closed.store(true, Ordering::SeqCst);
	}

	fn is_closed(&self) -> bool {
		self.closed.load(Ordering::SeqCst)
	}
}
