use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::error::{CardParseError, ClientError};
use crate::game::{CardMap, GamePhase, Hand, PlayerInfo};

pub const PASS_TOKEN: &str = "pass";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
	GameStart,
	GameUpdate,
	#[serde(other)]
	Other,
}

/// One full state push from the server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerMessage {
	#[serde(rename = "type")]
	pub kind: MessageKind,
	pub me: Hand,
	pub game: GameRecord,
	#[serde(default)]
	pub possible_moves: Option<Vec<Card>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GameRecord {
	pub players: Vec<PlayerInfo>,
	pub current_player_id: usize,
	pub state: GamePhase,
	pub card_map: CardMap,
	pub card_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientMessage {
	pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
	Play(Card),
	Pass,
}

impl Move {
	pub fn token(&self) -> String {
		match self {
			Move::Play(card) => card.to_string(),
			Move::Pass => PASS_TOKEN.to_string(),
		}
	}

	pub fn to_message(&self) -> ClientMessage {
		ClientMessage { message: self.token() }
	}
}

impl From<Card> for Move {
	fn from(card: Card) -> Self {
		Move::Play(card)
	}
}

impl FromStr for Move {
	type Err = CardParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let s = s.trim();
		if s.eq_ignore_ascii_case(PASS_TOKEN) {
			return Ok(Move::Pass);
		}
		Card::parse(s).map(Move::Play)
	}
}

impl fmt::Display for Move {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.token())
	}
}

pub fn decode_server_message(raw: &str) -> Result<ServerMessage, ClientError> {
	Ok(serde_json::from_str(raw)?)
}

/// Serializes `{"message": <token>}`. The message is a single string field,
/// so this does not fail in practice.
pub fn encode_move(mv: &Move) -> Result<String, ClientError> {
	Ok(serde_json::to_string(&mv.to_message())?)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::cards::{Rank, Suit};
	use serde_json::json;

	fn sample() -> serde_json::Value {
		json!({
			"type": "game_update",
			"me": {"index": 1, "name": "Bob", "cards": ["3:D", "J:S"]},
			"game": {
				"players": [{"index": 1, "name": "Bob"}, {"index": 0, "name": "Alice"}],
				"current_player_id": 0,
				"state": "STARTED",
				"card_map": [["6:H", "8:H"], [], [], []],
				"card_count": 40
			},
			"possible_moves": ["5:H"]
		})
	}

	#[test]
	fn test_decode_server_message() {
		let msg = decode_server_message(&sample().to_string()).unwrap();

		assert_eq!(msg.kind, MessageKind::GameUpdate);
		assert_eq!(msg.me.player.name, "Bob");
		assert_eq!(msg.game.current_player_id, 0);
		assert_eq!(msg.game.state, GamePhase::Started);
		assert_eq!(msg.game.card_count, 40);
		assert_eq!(msg.possible_moves, Some(vec![Card::new(Suit::Heart, Rank::Five)]));
	}

	#[test]
	fn test_unknown_message_kind() {
		let mut raw = sample();
		raw["type"] = json!("chat");
		let msg = decode_server_message(&raw.to_string()).unwrap();
		assert_eq!(msg.kind, MessageKind::Other);
	}

	#[test]
	fn test_null_possible_moves() {
		let mut raw = sample();
		raw["possible_moves"] = json!(null);
		let msg = decode_server_message(&raw.to_string()).unwrap();
		assert_eq!(msg.possible_moves, None);
	}

	#[test]
	fn test_missing_game_fails() {
		let mut raw = sample();
		raw.as_object_mut().unwrap().remove("game");
		assert!(matches!(
			decode_server_message(&raw.to_string()),
			Err(ClientError::Decode(_))
		));
	}

	#[test]
	fn test_not_json_fails() {
		assert!(matches!(decode_server_message("hello"), Err(ClientError::Decode(_))));
	}

	#[test]
	fn test_encode_pass() {
		assert_eq!(encode_move(&Move::Pass).unwrap(), r#"{"message":"pass"}"#);
	}

	#[test]
	fn test_encode_card() {
		let mv = Move::from(Card::new(Suit::Heart, Rank::Ace));
		assert_eq!(encode_move(&mv).unwrap(), r#"{"message":"A:H"}"#);
	}

	#[test]
	fn test_parse_move() {
		assert_eq!("pass".parse::<Move>().unwrap(), Move::Pass);
		assert_eq!(" PASS ".parse::<Move>().unwrap(), Move::Pass);
		assert_eq!(
			"10:C".parse::<Move>().unwrap(),
			Move::Play(Card::new(Suit::Club, Rank::Ten))
		);
		assert!("10C".parse::<Move>().is_err());
	}
}
