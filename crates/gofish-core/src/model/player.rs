use crate::belief::OpponentMemory;
use crate::error::GameError;
use crate::model::card::Card;
use crate::model::hand::{BOOK_SIZE, Hand};
use crate::model::rank::Rank;
use crate::policy::RequestPolicy;
use core::fmt;
use serde::{Deserialize, Serialize};
use tracing::{Level, event};

/// Seat index in round-robin order. The human always sits at seat 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    pub const HUMAN: PlayerId = PlayerId(0);

    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Next seat clockwise, wrapping after `player_count` seats.
    pub const fn next(self, player_count: usize) -> PlayerId {
        PlayerId(((self.0 as usize + 1) % player_count) as u8)
    }

    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seat {}", self.0)
    }
}

#[derive(Debug)]
pub enum PlayerKind {
    Human,
    Opponent {
        memory: OpponentMemory,
        policy: Box<dyn RequestPolicy>,
    },
}

#[derive(Debug)]
pub struct Player {
    id: PlayerId,
    name: String,
    hand: Hand,
    books: Vec<Rank>,
    kind: PlayerKind,
}

impl Player {
    pub fn human(id: PlayerId, name: impl Into<String>) -> Self {
        Self::with_kind(id, name, PlayerKind::Human)
    }

    pub fn opponent(id: PlayerId, name: impl Into<String>, policy: Box<dyn RequestPolicy>) -> Self {
        Self::with_kind(
            id,
            name,
            PlayerKind::Opponent {
                memory: OpponentMemory::new(),
                policy,
            },
        )
    }

    fn with_kind(id: PlayerId, name: impl Into<String>, kind: PlayerKind) -> Self {
        Self {
            id,
            name: name.into(),
            hand: Hand::new(),
            books: Vec::new(),
            kind,
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn books(&self) -> &[Rank] {
        &self.books
    }

    pub fn kind(&self) -> &PlayerKind {
        &self.kind
    }

    pub fn is_human(&self) -> bool {
        matches!(self.kind, PlayerKind::Human)
    }

    pub fn memory(&self) -> Option<&OpponentMemory> {
        match &self.kind {
            PlayerKind::Opponent { memory, .. } => Some(memory),
            PlayerKind::Human => None,
        }
    }

    pub fn memory_mut(&mut self) -> Option<&mut OpponentMemory> {
        match &mut self.kind {
            PlayerKind::Opponent { memory, .. } => Some(memory),
            PlayerKind::Human => None,
        }
    }

    pub fn policy(&self) -> Option<&dyn RequestPolicy> {
        match &self.kind {
            PlayerKind::Opponent { policy, .. } => Some(policy.as_ref()),
            PlayerKind::Human => None,
        }
    }

    /// Adds a card and immediately extracts any completed books, so the hand
    /// is never observable holding four of a rank. Returns the new books.
    pub fn receive(&mut self, card: Card) -> Vec<Rank> {
        self.hand.add(card);
        if let Some(memory) = self.memory_mut() {
            memory.note_received(card.rank);
        }
        self.check_for_books()
    }

    pub fn check_for_books(&mut self) -> Vec<Rank> {
        let completed = self.hand.complete_ranks();
        for &rank in &completed {
            let removed = self.hand.take_rank(rank);
            debug_assert_eq!(removed.len(), BOOK_SIZE);
            self.books.push(rank);
            event!(
                target: "gofish_core::books",
                Level::INFO,
                player = %self.name,
                rank = %rank,
                books = self.books.len(),
                "completed a book"
            );
        }
        completed
    }

    pub fn has_rank(&self, rank: Rank) -> bool {
        self.hand.has_rank(rank)
    }

    /// Hands over every card of `rank` (zero to three of them).
    pub fn give_cards(&mut self, rank: Rank) -> Vec<Card> {
        self.hand.take_rank(rank)
    }

    pub fn verify(&self) -> Result<(), GameError> {
        for rank in self.hand.ranks() {
            let held = self.hand.count_of(rank);
            if held >= BOOK_SIZE {
                return Err(GameError::Invariant(format!(
                    "{} holds {held} cards of rank {rank}",
                    self.name
                )));
            }
            if self.books.contains(&rank) {
                return Err(GameError::Invariant(format!(
                    "{} holds rank {rank} that is already a book",
                    self.name
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::suit::Suit;
    use crate::policy::{Request, RequestContext};
    use rand::RngCore;

    #[derive(Debug)]
    struct Idle;

    impl RequestPolicy for Idle {
        fn choose_request(&self, _: &RequestContext<'_>, _: &mut dyn RngCore) -> Option<Request> {
            None
        }
    }

    fn card(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    #[test]
    fn next_wraps_around() {
        assert_eq!(PlayerId::new(0).next(3), PlayerId::new(1));
        assert_eq!(PlayerId::new(2).next(3), PlayerId::new(0));
    }

    #[test]
    fn fourth_card_completes_book_immediately() {
        let mut player = Player::human(PlayerId::HUMAN, "You");
        for suit in [Suit::Clubs, Suit::Diamonds, Suit::Hearts] {
            assert!(player.receive(card(Rank::Five, suit)).is_empty());
        }
        player.receive(card(Rank::Nine, Suit::Clubs));
        let books = player.receive(card(Rank::Five, Suit::Spades));
        assert_eq!(books, vec![Rank::Five]);
        assert_eq!(player.books(), &[Rank::Five]);
        assert!(!player.has_rank(Rank::Five));
        assert_eq!(player.hand().len(), 1);
        player.verify().unwrap();
    }

    #[test]
    fn check_for_books_extracts_every_complete_rank() {
        let mut player = Player::human(PlayerId::HUMAN, "You");
        let cards: Vec<Card> = Suit::ALL
            .iter()
            .flat_map(|&suit| [card(Rank::Two, suit), card(Rank::King, suit)])
            .collect();
        player.hand = Hand::with_cards(cards);
        player.hand.add(card(Rank::Ace, Suit::Clubs));

        let books = player.check_for_books();
        assert_eq!(books.len(), 2);
        assert!(books.contains(&Rank::Two) && books.contains(&Rank::King));
        assert_eq!(player.hand().cards(), &[card(Rank::Ace, Suit::Clubs)]);
    }

    #[test]
    fn give_cards_then_has_rank_is_false() {
        let mut player = Player::human(PlayerId::HUMAN, "You");
        player.receive(card(Rank::Seven, Suit::Clubs));
        player.receive(card(Rank::Seven, Suit::Hearts));
        player.receive(card(Rank::Eight, Suit::Hearts));
        let given = player.give_cards(Rank::Seven);
        assert_eq!(given.len(), 2);
        assert!(!player.has_rank(Rank::Seven));
        assert!(player.give_cards(Rank::Seven).is_empty());
    }

    #[test]
    fn opponent_remembers_last_received_rank() {
        let mut ai = Player::opponent(PlayerId::new(1), "AI 1", Box::new(Idle));
        ai.receive(card(Rank::Three, Suit::Clubs));
        ai.receive(card(Rank::Queen, Suit::Clubs));
        assert_eq!(ai.memory().unwrap().last_received(), Some(Rank::Queen));
        assert!(ai.policy().is_some());

        let human = Player::human(PlayerId::HUMAN, "You");
        assert!(human.memory().is_none());
        assert!(human.policy().is_none());
    }

    #[test]
    fn verify_flags_rank_split_between_hand_and_books() {
        let mut player = Player::human(PlayerId::HUMAN, "You");
        player.books.push(Rank::Ten);
        player.hand.add(card(Rank::Ten, Suit::Clubs));
        assert!(matches!(player.verify(), Err(GameError::Invariant(_))));
    }

    #[test]
    fn verify_flags_unextracted_book() {
        let mut player = Player::human(PlayerId::HUMAN, "You");
        for suit in Suit::ALL {
            player.hand.add(card(Rank::Four, suit));
        }
        assert!(matches!(player.verify(), Err(GameError::Invariant(_))));
    }
}
