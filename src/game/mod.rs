//! Local mirror of the server's game state.
//!
//! Every snapshot from the server replaces the whole [`GameState`]; nothing is
//! patched in place and no game rules are evaluated here.

pub mod hand;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::cards::{Card, CardRange, Suit};
use crate::error::ClientError;
use crate::net::protocol::{ServerMessage, decode_server_message};

pub use hand::{Hand, PlayerInfo};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
	#[serde(rename = "NOT STARTED")]
	NotStarted,
	#[serde(rename = "STARTED")]
	Started,
	#[serde(rename = "ENDED")]
	Ended,
}

impl GamePhase {
	pub fn label(&self) -> &'static str {
		match self {
			GamePhase::NotStarted => "NOT STARTED",
			GamePhase::Started => "STARTED",
			GamePhase::Ended => "ENDED",
		}
	}
}

/// Per-suit `(min, max)` bounds of the run already laid on the table,
/// indexed by [`Suit::ordinal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CardMap([Option<(Card, Card)>; 4]);

impl CardMap {
	pub fn new(slots: [Option<(Card, Card)>; 4]) -> Self {
		Self(slots)
	}

	pub fn slot(&self, suit: Suit) -> Option<(Card, Card)> {
		self.0[suit.ordinal()]
	}

	pub fn set_slot(&mut self, suit: Suit, bounds: Option<(Card, Card)>) {
		self.0[suit.ordinal()] = bounds;
	}

	/// Cards laid in `suit`. Empty when nothing is laid or the bounds are
	/// not a same-suit ascending pair.
	pub fn laid(&self, suit: Suit) -> impl Iterator<Item = Card> + use<> {
		self.slot(suit)
			.into_iter()
			.flat_map(|(min, max)| CardRange::new(min, max))
	}

	pub fn is_laid(&self, card: &Card) -> bool {
		self.slot(card.suit)
			.is_some_and(|(min, max)| min <= *card && *card <= max)
	}
}

impl<'de> Deserialize<'de> for CardMap {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		use serde::de::Error;

		let entries = Vec::<Vec<Card>>::deserialize(deserializer)?;
		if entries.len() > 4 {
			return Err(D::Error::custom(format!(
				"card_map has {} entries, expected at most 4",
				entries.len()
			)));
		}

		let mut map = CardMap::default();
		for (ordinal, entry) in entries.into_iter().enumerate() {
			map.0[ordinal] = match entry.as_slice() {
				[] => None,
				[min, max] => Some((*min, *max)),
				other => {
					return Err(D::Error::custom(format!(
						"card_map slot {} has {} cards, expected 0 or 2",
						ordinal,
						other.len()
					)));
				}
			};
		}
		Ok(map)
	}
}

impl Serialize for CardMap {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let entries: Vec<Vec<Card>> = self
			.0
			.iter()
			.map(|slot| match slot {
				Some((min, max)) => vec![*min, *max],
				None => Vec::new(),
			})
			.collect();
		entries.serialize(serializer)
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
	players: Vec<PlayerInfo>,
	me: Hand,
	current_player_index: usize,
	phase: GamePhase,
	card_map: CardMap,
	card_count: u32,
	possible_moves: Vec<Card>,
}

impl GameState {
	pub fn from_message(msg: ServerMessage) -> Self {
		let mut players = msg.game.players;
		players.sort_by_key(|p| p.index);

		Self {
			players,
			me: msg.me,
			current_player_index: msg.game.current_player_id,
			phase: msg.game.state,
			card_map: msg.game.card_map,
			card_count: msg.game.card_count,
			possible_moves: msg.possible_moves.unwrap_or_default(),
		}
	}

	pub fn from_json(raw: &str) -> Result<Self, ClientError> {
		decode_server_message(raw).map(Self::from_message)
	}

	/// Replaces every field from `raw`. On a decode error nothing changes.
	pub fn apply_snapshot(&mut self, raw: &str) -> Result<(), ClientError> {
		*self = Self::from_json(raw)?;
		Ok(())
	}

	pub fn is_my_turn(&self) -> bool {
		self.me.player.index == self.current_player_index
	}

	/// Optimistic pre-check: only asks whether it is our turn. Whether this
	/// particular card is legal is [`GameState::is_playable`].
	pub fn can_attempt_move(&self, _card: &Card) -> bool {
		self.is_my_turn()
	}

	pub fn is_playable(&self, card: &Card) -> bool {
		self.possible_moves.contains(card)
	}

	pub fn is_ended(&self) -> bool {
		self.phase == GamePhase::Ended
	}

	/// The seated player whose turn it is, if the server's index is valid.
	pub fn current_player(&self) -> Option<&PlayerInfo> {
		self.players.get(self.current_player_index)
	}

	pub fn set_current_player(&mut self, index: usize) {
		self.current_player_index = index;
	}

	pub fn set_possible_moves(&mut self, moves: Vec<Card>) {
		self.possible_moves = moves;
	}

	pub fn laid_cards(&self, suit: Suit) -> Vec<Card> {
		self.card_map.laid(suit).collect()
	}

	pub fn players(&self) -> &[PlayerInfo] {
		&self.players
	}

	pub fn me(&self) -> &Hand {
		&self.me
	}

	pub fn current_player_index(&self) -> usize {
		self.current_player_index
	}

	pub fn phase(&self) -> GamePhase {
		self.phase
	}

	pub fn card_map(&self) -> &CardMap {
		&self.card_map
	}

	pub fn card_count(&self) -> u32 {
		self.card_count
	}

	pub fn possible_moves(&self) -> &[Card] {
		&self.possible_moves
	}
}
