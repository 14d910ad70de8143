use super::serialization::GameSnapshot;
use crate::belief::OpponentMemory;
use crate::error::GameError;
use crate::model::card::Card;
use crate::model::deck::{DECK_SIZE, Deck};
use crate::model::hand::BOOK_SIZE;
use crate::model::player::{Player, PlayerId};
use crate::model::rank::Rank;
use crate::policy::{PolicyFactory, Request, RequestContext, RequestPolicy};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{Level, event};

pub const TOTAL_BOOKS: usize = Rank::ORDERED.len();
pub const MIN_OPPONENTS: usize = 1;
pub const MAX_OPPONENTS: usize = 9;

static EMPTY_MEMORY: OpponentMemory = OpponentMemory::new();

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub opponent_count: usize,
    pub seed: Option<u64>,
    pub human_name: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            opponent_count: 1,
            seed: None,
            human_name: "You".to_string(),
        }
    }
}

impl GameConfig {
    pub fn with_opponents(opponent_count: usize) -> Self {
        Self {
            opponent_count,
            ..Self::default()
        }
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn human_name(mut self, name: impl Into<String>) -> Self {
        self.human_name = name.into();
        self
    }

    pub fn player_count(&self) -> usize {
        self.opponent_count + 1
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if !(MIN_OPPONENTS..=MAX_OPPONENTS).contains(&self.opponent_count) {
            return Err(GameError::InvalidOpponentCount(self.opponent_count));
        }
        Ok(())
    }
}

/// Cards dealt to each player: 7 for up to three players, 5 for up to six,
/// 4 beyond that.
pub const fn starting_hand_size(player_count: usize) -> usize {
    if player_count <= 3 {
        7
    } else if player_count <= 6 {
        5
    } else {
        4
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnState {
    AwaitingTurn(PlayerId),
    TurnInProgress(PlayerId),
    TurnResolved(PlayerId),
    GameOver,
}

/// What happened during one request/response exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeReport {
    pub requester: PlayerId,
    pub requester_name: String,
    pub target: PlayerId,
    pub target_name: String,
    pub rank: Rank,
    pub success: bool,
    pub transferred: Vec<Card>,
    pub drawn: Option<Card>,
    pub new_books: Vec<Rank>,
    pub next_player: Option<PlayerId>,
    pub game_over: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnAdvance {
    Played(OutcomeReport),
    /// The opponent had no legal request; its turn passed.
    NoMove { player: PlayerId },
    /// The active player had an empty hand; its turn passed.
    Skipped { player: PlayerId },
    GameOver,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub hand: Vec<Card>,
    pub books: Vec<Rank>,
    pub is_human: bool,
}

impl PlayerView {
    fn of(player: &Player) -> Self {
        Self {
            id: player.id(),
            name: player.name().to_string(),
            hand: player.hand().cards().to_vec(),
            books: player.books().to_vec(),
            is_human: player.is_human(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub id: PlayerId,
    pub name: String,
    pub books: usize,
}

#[derive(Debug)]
pub struct GameEngine {
    deck: Deck,
    players: Vec<Player>,
    roster: Vec<PlayerId>,
    current: PlayerId,
    state: TurnState,
    rng: StdRng,
    seed: Option<u64>,
    turns_played: u32,
}

impl GameEngine {
    /// Builds the deck, shuffles it, seats the human followed by the
    /// opponents and deals starting hands.
    pub fn new(config: GameConfig, policies: &PolicyFactory<'_>) -> Result<Self, GameError> {
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);
        let deck = Deck::shuffled(&mut rng);
        Self::setup(config, policies, deck, rng, Some(seed))
    }

    /// Deals from `deck` exactly as given (no shuffle). The last card of the
    /// deck is dealt first.
    pub fn with_deck(
        config: GameConfig,
        policies: &PolicyFactory<'_>,
        deck: Deck,
    ) -> Result<Self, GameError> {
        let seed = config.seed;
        let rng = StdRng::seed_from_u64(seed.unwrap_or(0));
        Self::setup(config, policies, deck, rng, seed)
    }

    fn setup(
        config: GameConfig,
        policies: &PolicyFactory<'_>,
        mut deck: Deck,
        rng: StdRng,
        seed: Option<u64>,
    ) -> Result<Self, GameError> {
        config.validate()?;

        let mut players = Vec::with_capacity(config.player_count());
        players.push(Player::human(PlayerId::HUMAN, config.human_name.clone()));
        for index in 1..=config.opponent_count {
            let id = PlayerId::new(index as u8);
            players.push(Player::opponent(id, format!("AI {index}"), policies(id)));
        }

        let hand_size = starting_hand_size(players.len());
        for _ in 0..hand_size {
            for player in players.iter_mut() {
                if let Some(card) = deck.draw() {
                    player.receive(card);
                }
            }
        }

        let roster = players.iter().map(Player::id).collect();
        let mut engine = Self {
            deck,
            players,
            roster,
            current: PlayerId::HUMAN,
            state: TurnState::AwaitingTurn(PlayerId::HUMAN),
            rng,
            seed,
            turns_played: 0,
        };
        engine.verify_invariants()?;
        engine.refresh_terminal();

        event!(
            target: "gofish_core::engine",
            Level::INFO,
            players = engine.players.len(),
            hand_size,
            deck_remaining = engine.deck.len(),
            seed = ?engine.seed,
            "game initialized"
        );
        Ok(engine)
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn turns_played(&self) -> u32 {
        self.turns_played
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Result<&Player, GameError> {
        self.players
            .get(id.index())
            .ok_or(GameError::UnknownSeat(id))
    }

    pub fn opponents(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| !p.is_human())
    }

    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    pub fn current_id(&self) -> PlayerId {
        self.current
    }

    pub fn current_player(&self) -> PlayerView {
        PlayerView::of(&self.players[self.current.index()])
    }

    pub fn view(&self, id: PlayerId) -> Result<PlayerView, GameError> {
        self.player(id).map(PlayerView::of)
    }

    pub fn is_human_turn(&self) -> bool {
        !self.is_game_over() && self.players[self.current.index()].is_human()
    }

    pub fn total_books(&self) -> usize {
        self.players.iter().map(|p| p.books().len()).sum()
    }

    /// Every rank claimed, or any player out of cards.
    pub fn is_game_over(&self) -> bool {
        self.total_books() == TOTAL_BOOKS || self.players.iter().any(|p| p.hand().is_empty())
    }

    pub fn standings(&self) -> Vec<Standing> {
        self.players
            .iter()
            .map(|p| Standing {
                id: p.id(),
                name: p.name().to_string(),
                books: p.books().len(),
            })
            .collect()
    }

    /// Every player tied on the highest book count, in seating order.
    pub fn winners(&self) -> Vec<String> {
        let best = self
            .players
            .iter()
            .map(|p| p.books().len())
            .max()
            .unwrap_or(0);
        self.players
            .iter()
            .filter(|p| p.books().len() == best)
            .map(|p| p.name().to_string())
            .collect()
    }

    /// Resolves shell input naming an opponent, either by name
    /// (case-insensitive, e.g. `ai 3`) or by its 1-based number (`3`).
    pub fn resolve_target(&self, input: &str) -> Result<PlayerId, GameError> {
        let trimmed = input.trim();
        let numeric = !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit());
        let found = if numeric {
            trimmed
                .parse::<usize>()
                .ok()
                .and_then(|number| self.opponents().nth(number.wrapping_sub(1)))
                .map(Player::id)
        } else {
            self.opponents()
                .find(|p| p.name().eq_ignore_ascii_case(trimmed))
                .map(Player::id)
        };
        found.ok_or_else(|| GameError::InvalidTarget(trimmed.to_string()))
    }

    /// Table-visible state, safe to log or write to bench output.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(self)
    }

    pub fn request_context(&self, seat: PlayerId) -> Result<RequestContext<'_>, GameError> {
        let player = self.player(seat)?;
        Ok(context_for(player, &self.roster))
    }

    /// Asks `policy` what the active player would request, drawing from the
    /// engine's RNG. Shells use this to autoplay the human seat.
    pub fn suggest_request(&mut self, policy: &dyn RequestPolicy) -> Option<Request> {
        let player = &self.players[self.current.index()];
        let ctx = context_for(player, &self.roster);
        policy.choose_request(&ctx, &mut self.rng)
    }

    pub fn submit_human_request(
        &mut self,
        rank: Rank,
        target: PlayerId,
    ) -> Result<OutcomeReport, GameError> {
        if self.refresh_terminal() {
            return Err(GameError::GameOver);
        }
        let human = &self.players[self.current.index()];
        if !human.is_human() {
            return Err(GameError::NotHumanTurn {
                current: human.name().to_string(),
            });
        }
        if !human.has_rank(rank) {
            return Err(GameError::InvalidRank(rank));
        }
        if !self.is_live_opponent(target) {
            return Err(GameError::InvalidTarget(target.to_string()));
        }
        self.execute(self.current, Request::new(rank, target))
    }

    /// Runs one full opponent turn: consult its policy, execute the request,
    /// broadcast feedback and pass the turn on.
    pub fn advance_opponent_turn(&mut self) -> Result<TurnAdvance, GameError> {
        if self.refresh_terminal() {
            return Ok(TurnAdvance::GameOver);
        }
        let seat = self.current;
        let player = &self.players[seat.index()];
        let Some(policy) = player.policy() else {
            return Err(GameError::NotOpponentTurn);
        };

        if player.hand().is_empty() {
            event!(
                target: "gofish_core::engine",
                Level::DEBUG,
                player = %player.name(),
                "empty hand, turn skipped"
            );
            self.pass_turn();
            return Ok(TurnAdvance::Skipped { player: seat });
        }

        self.state = TurnState::TurnInProgress(seat);
        let ctx = context_for(player, &self.roster);
        let choice = policy.choose_request(&ctx, &mut self.rng);

        let Some(request) = choice else {
            event!(
                target: "gofish_core::engine",
                Level::DEBUG,
                player = %player.name(),
                "no legal request, turn skipped"
            );
            self.state = TurnState::TurnResolved(seat);
            self.pass_turn();
            return Ok(TurnAdvance::NoMove { player: seat });
        };

        if !player.has_rank(request.rank) || !self.is_valid_target(seat, request.target) {
            return Err(GameError::Invariant(format!(
                "{} chose an illegal request for {}s from {}",
                player.name(),
                request.rank,
                request.target
            )));
        }

        self.execute(seat, request).map(TurnAdvance::Played)
    }

    fn execute(&mut self, requester: PlayerId, request: Request) -> Result<OutcomeReport, GameError> {
        self.state = TurnState::TurnInProgress(requester);
        let Request { rank, target } = request;

        let success = self.players[target.index()].has_rank(rank);
        let mut new_books = Vec::new();
        let mut drawn = None;
        let transferred = if success {
            self.players[target.index()].give_cards(rank)
        } else {
            Vec::new()
        };

        let taker = &mut self.players[requester.index()];
        for &card in &transferred {
            new_books.extend(taker.receive(card));
        }
        if !success {
            if let Some(card) = self.deck.draw() {
                new_books.extend(taker.receive(card));
                drawn = Some(card);
            }
        }

        for observer in self.players.iter_mut().filter(|p| p.id() != requester) {
            if let Some(memory) = observer.memory_mut() {
                memory.record_outcome(rank, target, success);
            }
        }

        self.state = TurnState::TurnResolved(requester);
        self.turns_played += 1;
        self.verify_invariants()?;

        event!(
            target: "gofish_core::engine",
            Level::DEBUG,
            turn = self.turns_played,
            requester = %self.players[requester.index()].name(),
            target = %self.players[target.index()].name(),
            rank = %rank,
            success,
            transferred = transferred.len(),
            drew = drawn.is_some(),
            new_books = new_books.len(),
            deck_remaining = self.deck.len(),
            "request resolved"
        );

        self.pass_turn();
        let game_over = self.state == TurnState::GameOver;

        Ok(OutcomeReport {
            requester,
            requester_name: self.players[requester.index()].name().to_string(),
            target,
            target_name: self.players[target.index()].name().to_string(),
            rank,
            success,
            transferred,
            drawn,
            new_books,
            next_player: (!game_over).then_some(self.current),
            game_over,
        })
    }

    fn pass_turn(&mut self) {
        if self.refresh_terminal() {
            return;
        }
        self.current = self.current.next(self.players.len());
        self.state = TurnState::AwaitingTurn(self.current);
    }

    /// Moves to `GameOver` when a terminal condition holds; returns whether
    /// the game is over.
    fn refresh_terminal(&mut self) -> bool {
        if self.state == TurnState::GameOver {
            return true;
        }
        if !self.is_game_over() {
            return false;
        }
        self.state = TurnState::GameOver;
        event!(
            target: "gofish_core::engine",
            Level::INFO,
            turns = self.turns_played,
            total_books = self.total_books(),
            deck_remaining = self.deck.len(),
            winners = ?self.winners(),
            "game over"
        );
        true
    }

    fn is_live_opponent(&self, target: PlayerId) -> bool {
        self.is_valid_target(PlayerId::HUMAN, target)
    }

    fn is_valid_target(&self, requester: PlayerId, target: PlayerId) -> bool {
        target != requester && target.index() < self.players.len()
    }

    /// Card conservation and per-hand book invariants.
    pub fn verify_invariants(&self) -> Result<(), GameError> {
        for player in &self.players {
            player.verify()?;
        }
        let in_hands: usize = self.players.iter().map(|p| p.hand().len()).sum();
        let total = self.deck.len() + in_hands + self.total_books() * BOOK_SIZE;
        if total != DECK_SIZE {
            return Err(GameError::Invariant(format!(
                "card count drifted to {total} (expected {DECK_SIZE})"
            )));
        }
        Ok(())
    }
}

fn context_for<'a>(player: &'a Player, roster: &'a [PlayerId]) -> RequestContext<'a> {
    RequestContext {
        seat: player.id(),
        hand: player.hand(),
        books: player.books(),
        memory: player.memory().unwrap_or(&EMPTY_MEMORY),
        roster,
    }
}
