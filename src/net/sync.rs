use std::sync::Arc;
use std::sync::mpsc::Receiver;

use crate::error::ClientError;
use crate::game::GameState;
use crate::logging;
use crate::net::protocol::{MessageKind, Move, decode_server_message, encode_move};
use crate::net::transport::Transport;
use crate::session::{Session, Snapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOutcome {
	pub kind: MessageKind,
	/// True for the first `game_start` of the session only.
	pub started_now: bool,
}

/// Bridges one transport to a session: inbound frames become snapshots,
/// moves become outbound frames. Moves are forwarded as-is; legality is the
/// caller's job.
pub struct GameSync {
	session: Arc<Session>,
	transport: Arc<dyn Transport>,
}

impl GameSync {
	pub fn new(session: Arc<Session>, transport: Arc<dyn Transport>) -> Self {
		Self { session, transport }
	}

	pub fn session(&self) -> &Arc<Session> {
		&self.session
	}

	/// Decodes and publishes one server message. A message that fails to
	/// decode leaves the previous snapshot in place.
	pub fn on_message(&self, raw: &str) -> Result<SyncOutcome, ClientError> {
		logging::sync::received(raw);

		let msg = decode_server_message(raw).inspect_err(|e| {
			logging::sync::decode_failed(&e.to_string());
		})?;

		let kind = msg.kind;
		let state = GameState::from_message(msg);
		logging::sync::applied(
			&format!("{:?}", kind),
			state.current_player_index(),
			state.phase().label(),
		);
		self.session.publish(Snapshot { kind, state });

		let started_now = kind == MessageKind::GameStart && self.session.mark_started();
		if started_now {
			logging::sync::started();
			self.transport.close();
		}

		Ok(SyncOutcome { kind, started_now })
	}

	pub fn submit_move(&self, mv: Move) -> Result<(), ClientError> {
		let token = mv.token();
		let text = encode_move(&mv)?;
		match self.transport.send_text(&text) {
			Ok(()) => {
				logging::sync::move_sent(&token);
				Ok(())
			}
			Err(e) => {
				logging::sync::move_failed(&token, &e.to_string());
				Err(e)
			}
		}
	}

	/// Feeds every inbound frame to [`GameSync::on_message`] until the
	/// transport's receiver disconnects. Returns how many were applied.
	pub fn pump(&self, inbound: &Receiver<String>) -> usize {
		let mut applied = 0;
		while let Ok(raw) = inbound.recv() {
			if self.on_message(&raw).is_ok() {
				applied += 1;
			}
		}
		applied
	}

	/// Like [`GameSync::pump`] but returns as soon as the session has
	/// started. False if the receiver disconnected first.
	pub fn pump_until_started(&self, inbound: &Receiver<String>) -> bool {
		if self.session.is_started() {
			return true;
		}
		while let Ok(raw) = inbound.recv() {
			if let Ok(outcome) = self.on_message(&raw) {
				if outcome.started_now {
					return true;
				}
			}
		}
		self.session.is_started()
	}

	pub fn close(&self) {
		self.transport.close();
	}

	pub fn is_closed(&self) -> bool {
		self.transport.is_closed()
	}
}
