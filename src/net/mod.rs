pub mod protocol;
pub mod sync;
pub mod test_transport;
pub mod transport;

pub use protocol::{ClientMessage, GameRecord, MessageKind, Move, ServerMessage, PASS_TOKEN};
pub use sync::{GameSync, SyncOutcome};
pub use test_transport::RecordingTransport;
pub use transport::{Transport, WsTransport};
