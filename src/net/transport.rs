use std::net::TcpStream;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

use tungstenite::stream::MaybeTlsStream;
use tungstenite::{Message, WebSocket};

use crate::error::ClientError;
use crate::logging;

/// Outbound half of a session connection. Inbound frames are delivered
/// separately so that readers never hold the transport.
pub trait Transport: Send + Sync {
	fn send_text(&self, text: &str) -> Result<(), ClientError>;

	/// Idempotent. Every later `send_text` fails with `ClosedTransport`.
	fn close(&self);

	fn is_closed(&self) -> bool;
}

type Socket = WebSocket<MaybeTlsStream<TcpStream>>;

/// Upper bound on how long a queued frame waits for the socket thread.
const READ_TIMEOUT: Duration = Duration::from_millis(20);
const CLOSE_GRACE: Duration = Duration::from_secs(1);

enum Outbound {
	Text(String),
	Close,
}

/// WebSocket connection driven by one background thread that owns the
/// socket. Sends only enqueue, so they never wait on a read in progress.
pub struct WsTransport {
	outbound: Mutex<Sender<Outbound>>,
	closed: Arc<AtomicBool>,
	endpoint: String,
}

impl WsTransport {
	/// Opens the socket and starts its thread. Text frames arrive on the
	/// returned receiver, which disconnects once the socket is gone.
	pub fn connect(endpoint: &str) -> Result<(Self, Receiver<String>), ClientError> {
		let (socket, _response) =
			tungstenite::connect(endpoint).map_err(|e| ClientError::Transport(e.to_string()))?;

		match socket.get_ref() {
			MaybeTlsStream::Plain(stream) => stream.set_read_timeout(Some(READ_TIMEOUT))?,
			_ => {
				return Err(ClientError::Transport(format!(
					"{}: only plain ws:// endpoints are supported",
					endpoint
				)));
			}
		}

		let closed = Arc::new(AtomicBool::new(false));
		let (out_tx, out_rx) = mpsc::channel();
		let (in_tx, in_rx) = mpsc::channel();

		{
			let closed = Arc::clone(&closed);
			thread::spawn(move || {
				socket_loop(socket, out_rx, in_tx, closed);
			});
		}

		logging::transport::opened(endpoint);

		Ok((
			Self {
				outbound: Mutex::new(out_tx),
				closed,
				endpoint: endpoint.to_string(),
			},
			in_rx,
		))
	}

	pub fn endpoint(&self) -> &str {
		&self.endpoint
	}

	fn enqueue(&self, frame: Outbound) -> Result<(), ClientError> {
		let outbound = self.outbound.lock().unwrap_or_else(PoisonError::into_inner);
		outbound.send(frame).map_err(|_| {
			self.closed.store(true, Ordering::SeqCst);
			ClientError::ClosedTransport
		})
	}
}

impl Transport for WsTransport {
	fn send_text(&self, text: &str) -> Result<(), ClientError> {
		if self.is_closed() {
			return Err(ClientError::ClosedTransport);
		}
		self.enqueue(Outbound::Text(text.to_string()))
	}

	fn close(&self) {
		if self.closed.swap(true, Ordering::SeqCst) {
			return;
		}
		let _ = self.enqueue(Outbound::Close);
		logging::transport::closed(&self.endpoint);
	}

	fn is_closed(&self) -> bool {
		self.closed.load(Ordering::SeqCst)
	}
}

impl Drop for WsTransport {
	fn drop(&mut self) {
		self.close();
	}
}

fn is_timeout(e: &std::io::Error) -> bool {
	matches!(
		e.kind(),
		std::io::ErrorKind::WouldBlock | std::io::ErrorKind::TimedOut
	)
}

/// Writes queued frames, then reads for at most `READ_TIMEOUT`, until either
/// side closes.
fn socket_loop(
	mut socket: Socket,
	outbound: Receiver<Outbound>,
	inbound: Sender<String>,
	closed: Arc<AtomicBool>,
) {
	let mut closing_since: Option<Instant> = None;

	'outer: loop {
		loop {
			match outbound.try_recv() {
				Ok(Outbound::Text(text)) => {
					if let Err(e) = socket.send(Message::text(text)) {
						logging::transport::error(&e.to_string());
						break 'outer;
					}
				}
				Ok(Outbound::Close) | Err(TryRecvError::Disconnected) => {
					if closing_since.is_none() {
						let _ = socket.close(None);
						let _ = socket.flush();
						closing_since = Some(Instant::now());
					}
					break;
				}
				Err(TryRecvError::Empty) => break,
			}
		}

		if closing_since.is_some_and(|since| since.elapsed() > CLOSE_GRACE) {
			break;
		}

		match socket.read() {
			Ok(Message::Text(text)) => {
				if closing_since.is_none() && inbound.send(text.as_str().to_string()).is_err() {
					break;
				}
			}
			Ok(Message::Close(_)) => {
				// sends the queued close reply
				let _ = socket.flush();
				if closing_since.is_none() {
					logging::transport::closed("server closed the connection");
				}
				break;
			}
			Ok(_) => {}
			Err(tungstenite::Error::Io(ref e)) if is_timeout(e) => {}
			Err(tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed) => break,
			Err(e) => {
				logging::transport::error(&e.to_string());
				break;
			}
		}
	}
	closed.store(true, Ordering::SeqCst);
}
