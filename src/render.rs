use konane_core::arena::{EndReason, GameObserver, GameOutcome};
use konane_core::engine::{Move, SearchStats};
use konane_core::logic::board::{Board, Side};
use std::fmt::Arguments;
use std::io::Write;

/// Prints the course of each game. With `show` set, every position and move is printed too.
pub struct ConsoleObserver<W> {
    out: W,
    show: bool,
    games: u32,
    first_name: String,
    second_name: String,
}

impl<W: Write> ConsoleObserver<W> {
    pub const fn new(out: W, show: bool) -> Self {
        Self {
            out,
            show,
            games: 0,
            first_name: String::new(),
            second_name: String::new(),
        }
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, args: Arguments<'_>) {
        if let Err(err) = self.out.write_fmt(args) {
            tracing::warn!("failed to write game output: {err}");
        }
    }

    fn name(&self, side: Side) -> &str {
        match side {
            Side::First => &self.first_name,
            Side::Second => &self.second_name,
        }
    }
}

impl<W: Write> GameObserver for ConsoleObserver<W> {
    fn game_started(&mut self, _board: &Board, first: &str, second: &str) {
        self.games += 1;
        self.first_name = first.to_string();
        self.second_name = second.to_string();
        let game = self.games;
        self.emit(format_args!("Game {game}\n{first} vs {second}\n"));
    }

    fn turn_started(&mut self, board: &Board, side: Side) {
        if self.show {
            self.emit(format_args!("{board}player {side}'s turn\n"));
        }
    }

    fn move_played(&mut self, side: Side, mv: &Move, _board: &Board) {
        if self.show {
            let name = self.name(side).to_string();
            self.emit(format_args!("{name} ({side}) plays {mv}\n\n"));
        }
    }

    fn search_reported(&mut self, _side: Side, stats: &SearchStats) {
        if self.show {
            self.emit(format_args!(
                "searched {} plies: {} nodes in {} ms, score {}\n\n",
                stats.depth, stats.nodes, stats.time_ms, stats.score
            ));
        }
    }

    fn game_finished(&mut self, outcome: &GameOutcome) {
        let winner = self.name(outcome.winner).to_string();
        let loser = self.name(outcome.loser()).to_string();
        if self.show {
            let board = &outcome.final_board;
            self.emit(format_args!("{board}"));
        }
        self.emit(format_args!(
            "Game over: {loser} {}, {winner} ({}) wins\n",
            describe(outcome),
            outcome.winner
        ));
    }
}

fn describe(outcome: &GameOutcome) -> String {
    match outcome.reason {
        EndReason::NoLegalMoves => "has no legal moves".to_string(),
        EndReason::Conceded => "concedes".to_string(),
        EndReason::InvalidMove(err) => format!("made an {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use konane_core::arena::play_one_game;
    use konane_core::engine::config::{EngineConfig, SearchAlgorithm};
    use konane_core::player::{FixedFirstPlayer, SearchPlayer};

    #[test]
    fn test_quiet_output_reports_winner_only() {
        let mut observer = ConsoleObserver::new(Vec::new(), false);
        let mut first = FixedFirstPlayer::new();
        let mut second = FixedFirstPlayer::new();
        let outcome = play_one_game(4, &mut first, &mut second, &mut observer);

        let output = String::from_utf8(observer.into_inner()).unwrap();
        assert!(output.starts_with("Game 1\nSimple vs Simple\n"));
        assert!(output.contains("has no legal moves"));
        assert!(output.contains(&format!("({}) wins", outcome.winner)));
        assert!(!output.contains("plays"));
    }

    #[test]
    fn test_show_prints_boards_and_moves() {
        let mut observer = ConsoleObserver::new(Vec::new(), true);
        let mut first = FixedFirstPlayer::new();
        let mut second = FixedFirstPlayer::new();
        play_one_game(4, &mut first, &mut second, &mut observer);
        play_one_game(4, &mut first, &mut second, &mut observer);

        let output = String::from_utf8(observer.into_inner()).unwrap();
        assert!(output.contains("  1 2 3 4 \n1 X O X O \n"));
        assert!(output.contains("player X's turn"));
        assert!(output.contains("Simple (X) plays [2,2,2,2]"));
        assert!(output.contains("Game 2\n"));
        assert!(!output.contains("searched"));
    }

    #[test]
    fn test_show_prints_search_stats() {
        let mut observer = ConsoleObserver::new(Vec::new(), true);
        let mut first = FixedFirstPlayer::new();
        let mut second =
            SearchPlayer::from_config(&EngineConfig::new(2, SearchAlgorithm::Minimax));
        play_one_game(6, &mut first, &mut second, &mut observer);

        let output = String::from_utf8(observer.into_inner()).unwrap();
        assert!(output.contains("Simple vs Minimax 2\n"));
        assert!(output.contains("searched 2 plies: "));
        assert!(output.contains(" nodes in "));

        let mut quiet = ConsoleObserver::new(Vec::new(), false);
        play_one_game(6, &mut first, &mut second, &mut quiet);
        let output = String::from_utf8(quiet.into_inner()).unwrap();
        assert!(!output.contains("searched"));
    }
}
