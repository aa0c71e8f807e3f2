use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::error::ClientError;

/// Seat identity as the server reports it. Only used as a label and as the
/// sort key for the player list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInfo {
	pub index: usize,
	pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
struct HandRecord {
	index: usize,
	name: String,
	#[serde(default)]
	cards: Vec<Card>,
}

/// The local player's identity plus the cards they currently hold.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "HandRecord")]
pub struct Hand {
	pub player: PlayerInfo,
	cards: Vec<Card>,
}

impl From<HandRecord> for Hand {
	fn from(record: HandRecord) -> Self {
		Self {
			player: PlayerInfo {
				index: record.index,
				name: record.name,
			},
			cards: record.cards,
		}
	}
}

impl Hand {
	pub fn new(player: PlayerInfo, cards: Vec<Card>) -> Self {
		Self { player, cards }
	}

	/// Builds a hand from a `{ "index", "name", "cards": [token, ..] }`
	/// record. A missing `cards` list means an empty hand.
	pub fn from_value(value: serde_json::Value) -> Result<Self, ClientError> {
		Ok(serde_json::from_value(value)?)
	}

	pub fn replace_cards(&mut self, cards: Vec<Card>) {
		self.cards = cards;
	}

	/// Position of `card` among the held cards. Callers check membership
	/// first, so a missing card is a caller bug: it panics in debug builds
	/// and returns `NotFound` in release builds.
	pub fn index_of(&self, card: &Card) -> Result<usize, ClientError> {
		let position = self.cards.iter().position(|c| c == card);
		debug_assert!(position.is_some(), "index_of called for {} which is not in hand", card);
		position.ok_or(ClientError::NotFound(*card))
	}

	pub fn contains(&self, card: &Card) -> bool {
		self.cards.contains(card)
	}

	pub fn cards(&self) -> &[Card] {
		&self.cards
	}

	pub fn len(&self) -> usize {
		self.cards.len()
	}

	pub fn is_empty(&self) -> bool {
		self.cards.is_empty()
	}
}
