use rand::Rng;
use rand::seq::SliceRandom;

use super::{Card, Rank, Suit};

/// All 52 cards, initially in suit-major, rank-minor order.
#[derive(Debug, Clone)]
pub struct Deck {
	cards: Vec<Card>,
}

impl Deck {
	pub const NUM_SUITS: usize = 4;
	pub const CARDS_PER_SUIT: usize = 13;

	pub fn new() -> Self {
		let mut cards = Vec::with_capacity(Self::NUM_SUITS * Self::CARDS_PER_SUIT);
		for suit in Suit::ALL {
			for rank in Rank::ALL {
				cards.push(Card::new(suit, rank));
			}
		}
		Self { cards }
	}

	pub fn shuffle(&mut self) {
		self.shuffle_with(&mut rand::rng());
	}

	pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
		self.cards.shuffle(rng);
	}

	/// Copy of up to `length` cards starting at `start`. Runs short near the
	/// end of the deck and is empty past it.
	pub fn slice(&self, start: usize, length: usize) -> Vec<Card> {
		let start = start.min(self.cards.len());
		let end = start.saturating_add(length).min(self.cards.len());
		self.cards[start..end].to_vec()
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

impl Default for Deck {
	fn default() -> Self {
		Self::new()
	}
}
