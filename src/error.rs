use thiserror::Error;

use crate::cards::Card;

/// A wire card token that cannot be split into rank and suit codes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardParseError {
	#[error("card token {0:?} has no ':' separator")]
	MissingSeparator(String),
}

#[derive(Debug, Error)]
pub enum ClientError {
	/// Malformed or incomplete snapshot payload.
	#[error("decode error: {0}")]
	Decode(String),

	/// A hand lookup for a card that is not held.
	#[error("card {0} is not in hand")]
	NotFound(Card),

	#[error("transport is closed")]
	ClosedTransport,

	#[error("transport error: {0}")]
	Transport(String),

	#[error("config error: {0}")]
	Config(String),

	#[error(transparent)]
	Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for ClientError {
	fn from(e: serde_json::Error) -> Self {
		ClientError::Decode(e.to_string())
	}
}

impl From<CardParseError> for ClientError {
	fn from(e: CardParseError) -> Self {
		ClientError::Decode(e.to_string())
	}
}
