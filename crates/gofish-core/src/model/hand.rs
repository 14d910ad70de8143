use crate::model::card::Card;
use crate::model::rank::Rank;

pub const BOOK_SIZE: usize = 4;

/// Cards held by one player, kept in the order they were received.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn with_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn has_rank(&self, rank: Rank) -> bool {
        self.cards.iter().any(|c| c.is_rank(rank))
    }

    pub fn count_of(&self, rank: Rank) -> usize {
        self.cards.iter().filter(|c| c.is_rank(rank)).count()
    }

    /// Removes every card of `rank`, preserving the order of the rest.
    pub fn take_rank(&mut self, rank: Rank) -> Vec<Card> {
        let (taken, kept): (Vec<Card>, Vec<Card>) =
            self.cards.iter().copied().partition(|c| c.is_rank(rank));
        self.cards = kept;
        taken
    }

    /// Distinct ranks in first-seen order.
    pub fn ranks(&self) -> Vec<Rank> {
        let mut ranks = Vec::new();
        for card in &self.cards {
            if !ranks.contains(&card.rank) {
                ranks.push(card.rank);
            }
        }
        ranks
    }

    /// Ranks that currently form a full book, in first-seen order.
    pub fn complete_ranks(&self) -> Vec<Rank> {
        self.ranks()
            .into_iter()
            .filter(|&rank| self.count_of(rank) == BOOK_SIZE)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}
