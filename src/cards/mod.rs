//! Card value types: suits, ranks, cards and same-suit card ranges.

pub mod deck;

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CardParseError;

pub use deck::Deck;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suit {
	Heart,
	Diamond,
	Spade,
	Club,
}

impl Suit {
	pub const ALL: [Suit; 4] = [Suit::Heart, Suit::Diamond, Suit::Spade, Suit::Club];

	/// What unknown ordinals and codes decode to. Unknown codes are not an
	/// error, which means a corrupted token silently becomes a heart.
	pub const FALLBACK: Suit = Suit::Heart;

	pub fn ordinal(&self) -> usize {
		match self {
			Suit::Heart => 0,
			Suit::Diamond => 1,
			Suit::Spade => 2,
			Suit::Club => 3,
		}
	}

	pub fn from_ordinal(ordinal: usize) -> Suit {
		match ordinal {
			0 => Suit::Heart,
			1 => Suit::Diamond,
			2 => Suit::Spade,
			3 => Suit::Club,
			_ => Suit::FALLBACK,
		}
	}

	pub fn code(&self) -> char {
		match self {
			Suit::Heart => 'H',
			Suit::Diamond => 'D',
			Suit::Spade => 'S',
			Suit::Club => 'C',
		}
	}

	pub fn from_code(code: &str) -> Suit {
		match code {
			"H" => Suit::Heart,
			"D" => Suit::Diamond,
			"S" => Suit::Spade,
			"C" => Suit::Club,
			_ => Suit::FALLBACK,
		}
	}

	/// RGBA display color, only meaningful to a renderer.
	pub fn color(&self) -> [f32; 4] {
		match self {
			Suit::Heart => [1.0, 0.0, 0.0, 1.0],
			Suit::Diamond => [0.0, 1.0, 0.0, 1.0],
			Suit::Spade => [0.0, 0.0, 1.0, 1.0],
			Suit::Club => [1.0, 0.0, 1.0, 1.0],
		}
	}

	pub fn name(&self) -> &'static str {
		match self {
			Suit::Heart => "Hearts",
			Suit::Diamond => "Diamonds",
			Suit::Spade => "Spades",
			Suit::Club => "Clubs",
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
	Ace = 1,
	Two,
	Three,
	Four,
	Five,
	Six,
	Seven,
	Eight,
	Nine,
	Ten,
	Jack,
	Queen,
	King,
}

impl Rank {
	pub const ALL: [Rank; 13] = [
		Rank::Ace,
		Rank::Two,
		Rank::Three,
		Rank::Four,
		Rank::Five,
		Rank::Six,
		Rank::Seven,
		Rank::Eight,
		Rank::Nine,
		Rank::Ten,
		Rank::Jack,
		Rank::Queen,
		Rank::King,
	];

	/// What unknown or out-of-range codes decode to.
	pub const FALLBACK: Rank = Rank::Ace;

	pub fn value(&self) -> u8 {
		*self as u8
	}

	pub fn from_value(value: u8) -> Option<Rank> {
		match value {
			1..=13 => Some(Rank::ALL[value as usize - 1]),
			_ => None,
		}
	}

	pub fn code(&self) -> String {
		match self {
			Rank::Ace => "A".to_string(),
			Rank::Jack => "J".to_string(),
			Rank::Queen => "Q".to_string(),
			Rank::King => "K".to_string(),
			other => other.value().to_string(),
		}
	}

	/// Accepts both letter codes and decimal values ("A" and "1" are both
	/// the ace). Anything else decodes to [`Rank::FALLBACK`].
	pub fn from_code(code: &str) -> Rank {
		match code {
			"A" => Rank::Ace,
			"J" => Rank::Jack,
			"Q" => Rank::Queen,
			"K" => Rank::King,
			digits => digits
				.parse::<u8>()
				.ok()
				.and_then(Rank::from_value)
				.unwrap_or(Rank::FALLBACK),
		}
	}
}

/// A playing card. Equality and hashing are structural; ordering only
/// exists between cards of the same suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Card {
	pub suit: Suit,
	pub rank: Rank,
}

impl Card {
	pub const fn new(suit: Suit, rank: Rank) -> Self {
		Self { suit, rank }
	}

	/// Position in the canonical 52-card order, `suit * 13 + rank - 1`.
	pub fn index(&self) -> usize {
		self.suit.ordinal() * 13 + self.rank.value() as usize - 1
	}

	pub fn from_index(index: usize) -> Option<Card> {
		if index >= 52 {
			return None;
		}
		let rank = Rank::from_value((index % 13) as u8 + 1)?;
		Some(Card::new(Suit::from_ordinal(index / 13), rank))
	}

	/// Same suit, one rank higher. `None` for a king.
	pub fn next(&self) -> Option<Card> {
		Rank::from_value(self.rank.value() + 1).map(|rank| Card::new(self.suit, rank))
	}

	/// Same suit, one rank lower. `None` for an ace.
	pub fn prev(&self) -> Option<Card> {
		Rank::from_value(self.rank.value() - 1).map(|rank| Card::new(self.suit, rank))
	}

	/// Parses a `"<rank>:<suit>"` wire token. Unknown codes fall back to
	/// [`Rank::FALLBACK`] / [`Suit::FALLBACK`]; only a missing separator fails.
	pub fn parse(token: &str) -> Result<Card, CardParseError> {
		let (rank, suit) = token
			.split_once(':')
			.ok_or_else(|| CardParseError::MissingSeparator(token.to_string()))?;
		Ok(Card::new(Suit::from_code(suit), Rank::from_code(rank)))
	}

	pub fn image_name(&self) -> String {
		format!("{}{}", self.rank.code(), self.suit.code())
	}

	/// Inclusive walk from `self` up to `end` within one suit.
	pub fn range_to(self, end: Card) -> CardRange {
		CardRange::new(self, end)
	}
}

impl Hash for Card {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.index().hash(state);
	}
}

impl PartialOrd for Card {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		if self.suit != other.suit {
			return None;
		}
		Some(self.rank.cmp(&other.rank))
	}
}

impl fmt::Display for Card {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.rank.code(), self.suit.code())
	}
}

impl FromStr for Card {
	type Err = CardParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Card::parse(s)
	}
}

impl Serialize for Card {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}

impl<'de> Deserialize<'de> for Card {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let token = String::deserialize(deserializer)?;
		Card::parse(&token).map_err(serde::de::Error::custom)
	}
}

/// Lazy forward walk over `start..=end` by repeated [`Card::next`].
///
/// Yields nothing when the endpoints are in different suits or out of
/// order, and stops at the king even if `end` was never reached.
#[derive(Debug, Clone)]
pub struct CardRange {
	cur: Option<Card>,
	end: Card,
}

impl CardRange {
	pub fn new(start: Card, end: Card) -> Self {
		Self { cur: Some(start), end }
	}
}

impl Iterator for CardRange {
	type Item = Card;

	fn next(&mut self) -> Option<Card> {
		let cur = self.cur.filter(|c| *c <= self.end)?;
		self.cur = cur.next();
		Some(cur)
	}
}

impl FusedIterator for CardRange {}
