use crate::error::ShellError;
use crate::pacing::{Beat, Pacing};
use crate::prompt::read_line;
use gofish_bot::HeuristicPolicy;
use gofish_core::AppInfo;
use gofish_core::game::engine::{GameEngine, OutcomeReport, TurnAdvance};
use gofish_core::model::card::Card;
use gofish_core::model::player::PlayerId;
use gofish_core::model::rank::Rank;
use std::io::{BufRead, Write};
use tracing::{Level, event};

/// Text front end: renders engine state and collects the human's requests.
pub struct ConsoleShell<R, W, P> {
    input: R,
    output: W,
    pacing: P,
    autopilot: Option<HeuristicPolicy>,
}

impl<R: BufRead, W: Write, P: Pacing> ConsoleShell<R, W, P> {
    pub fn new(input: R, output: W, pacing: P) -> Self {
        Self {
            input,
            output,
            pacing,
            autopilot: None,
        }
    }

    /// Lets the heuristic play the human seat as well.
    pub fn with_autopilot(mut self) -> Self {
        self.autopilot = Some(HeuristicPolicy::new());
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Drives the game until it is over, then prints the final results.
    pub fn run(&mut self, game: &mut GameEngine) -> Result<(), ShellError> {
        writeln!(self.output, "{}", AppInfo::tagline())?;
        writeln!(
            self.output,
            "Starting Go Fish ({} vs {} AI players)!",
            game.players()[0].name(),
            game.players().len() - 1
        )?;

        while !game.is_game_over() {
            writeln!(self.output, "\n{}'s turn...", game.current_player().name)?;

            if game.is_human_turn() {
                self.human_turn(game)?;
            } else {
                self.opponent_turn(game)?;
            }
            self.print_scores(game)?;
        }

        self.print_final(game)
    }

    fn human_turn(&mut self, game: &mut GameEngine) -> Result<(), ShellError> {
        let view = game.current_player();
        writeln!(self.output, "Your hand: {}", format_cards(&view.hand))?;
        if !view.books.is_empty() {
            writeln!(self.output, "Your books: {}", format_ranks(&view.books))?;
        }

        if let Some(policy) = self.autopilot {
            let Some(request) = game.suggest_request(&policy) else {
                return Ok(());
            };
            let target = game.player(request.target)?.name().to_string();
            writeln!(
                self.output,
                "You (autopilot) ask {target} for {}s.",
                request.rank
            )?;
            let report = game.submit_human_request(request.rank, request.target)?;
            return self.render_outcome(&report);
        }

        loop {
            let rank = self.prompt_rank(game)?;
            let target = self.prompt_target(game)?;
            match game.submit_human_request(rank, target) {
                Ok(report) => return self.render_outcome(&report),
                Err(err) if err.is_input_error() => {
                    event!(target: "gofish_app::console", Level::DEBUG, error = %err, "request rejected");
                    writeln!(self.output, "{err}")?;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    fn prompt_rank(&mut self, game: &GameEngine) -> Result<Rank, ShellError> {
        loop {
            let line = read_line(&mut self.input, &mut self.output, "Choose a rank to ask for: ")?;
            match line.parse::<Rank>() {
                Ok(rank) if game.current_player().hand.iter().any(|c| c.rank == rank) => {
                    return Ok(rank);
                }
                Ok(_) => writeln!(self.output, "You can only ask for a rank that you have!")?,
                Err(err) => writeln!(self.output, "{err}")?,
            }
        }
    }

    fn prompt_target(&mut self, game: &GameEngine) -> Result<PlayerId, ShellError> {
        let names: Vec<&str> = game.opponents().map(|p| p.name()).collect();
        let prompt = format!(
            "Which AI player do you want to ask? ({}): ",
            names.join(", ")
        );
        loop {
            let line = read_line(&mut self.input, &mut self.output, &prompt)?;
            match game.resolve_target(&line) {
                Ok(target) => return Ok(target),
                Err(err) => writeln!(self.output, "{err}. Try again.")?,
            }
        }
    }

    fn opponent_turn(&mut self, game: &mut GameEngine) -> Result<(), ShellError> {
        self.pacing.pause(Beat::Thinking);
        match game.advance_opponent_turn()? {
            TurnAdvance::Played(report) => {
                writeln!(self.output, "{} thinks...", report.requester_name)?;
                writeln!(
                    self.output,
                    "{} asks {} for {}s.",
                    report.requester_name, report.target_name, report.rank
                )?;
                self.pacing.pause(Beat::Reveal);
                self.render_outcome(&report)
            }
            TurnAdvance::NoMove { player } => {
                let name = game.player(player)?.name().to_string();
                writeln!(self.output, "{name} has no valid move. Turn skipped.")?;
                Ok(())
            }
            TurnAdvance::Skipped { .. } | TurnAdvance::GameOver => Ok(()),
        }
    }

    fn render_outcome(&mut self, report: &OutcomeReport) -> Result<(), ShellError> {
        let human_asked = report.requester == PlayerId::HUMAN;
        if report.success {
            let receiver = if human_asked {
                "you".to_string()
            } else {
                report.requester_name.clone()
            };
            writeln!(
                self.output,
                "{} gives {receiver} all {}s! ({} card{})",
                report.target_name,
                report.rank,
                report.transferred.len(),
                if report.transferred.len() == 1 { "" } else { "s" }
            )?;
        } else {
            writeln!(self.output, "{} says 'Go Fish!'", report.target_name)?;
            match (report.drawn, human_asked) {
                (Some(card), true) => writeln!(self.output, "You draw a {card}.")?,
                (Some(_), false) => {
                    writeln!(self.output, "{} draws a card.", report.requester_name)?
                }
                (None, _) => writeln!(self.output, "The deck is empty; nothing to draw.")?,
            }
        }

        for rank in &report.new_books {
            writeln!(
                self.output,
                "{} completed a book of {rank}s!",
                report.requester_name
            )?;
        }
        Ok(())
    }

    fn print_scores(&mut self, game: &GameEngine) -> Result<(), ShellError> {
        writeln!(self.output, "\nScore Update:")?;
        for standing in game.standings() {
            writeln!(self.output, "{}: {} books", standing.name, standing.books)?;
        }
        Ok(())
    }

    fn print_final(&mut self, game: &GameEngine) -> Result<(), ShellError> {
        writeln!(self.output, "\nGame Over!")?;
        for player in game.players() {
            writeln!(
                self.output,
                "{} completed books: [{}]",
                player.name(),
                format_ranks(player.books())
            )?;
        }

        let winners = game.winners();
        match winners.as_slice() {
            [winner] => writeln!(self.output, "{winner} wins!")?,
            _ => writeln!(self.output, "It's a tie between: {}", winners.join(", "))?,
        }
        self.output.flush()?;
        Ok(())
    }
}

fn format_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(Card::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_ranks(ranks: &[Rank]) -> String {
    ranks
        .iter()
        .map(Rank::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
