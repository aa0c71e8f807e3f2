//! Client-side card model and game-state mirror for Patta.
//!
//! The server is authoritative: this crate decodes its snapshots, keeps the
//! latest one available to readers, and forwards moves back. It never
//! evaluates trick rules or scoring.

pub mod cards;
pub mod config;
pub mod error;
pub mod game;
pub mod logging;
pub mod net;
pub mod session;

pub use cards::{Card, CardRange, Deck, Rank, Suit};
pub use error::{CardParseError, ClientError};
pub use game::{CardMap, GamePhase, GameState, Hand, PlayerInfo};
pub use net::{GameSync, Move, Transport};
pub use session::{Session, Snapshot, SnapshotReader};
