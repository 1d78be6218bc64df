use konane_core::engine::Move;
use konane_core::logic::board::{Board, Side};
use konane_core::logic::generator::MoveGenerator;
use konane_core::player::Player;
use std::io::{self, BufRead, Write};

/// Where a human player's answers come from.
pub trait LineInput {
    /// Appends one line to `buf`. Returns 0 at end of input.
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize>;
}

// Locks per call, so two human players can share the terminal.
impl LineInput for io::Stdin {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        io::Stdin::read_line(self, buf)
    }
}

impl LineInput for &[u8] {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        BufRead::read_line(self, buf)
    }
}

/// Prompts for a move from the numbered list of legal moves.
pub struct HumanPlayer<R, W> {
    side: Side,
    generator: MoveGenerator,
    input: R,
    output: W,
}

impl HumanPlayer<io::Stdin, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin(), io::stdout())
    }
}

impl<R: LineInput, W: Write> HumanPlayer<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self {
            side: Side::First,
            generator: MoveGenerator::new(),
            input,
            output,
        }
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn into_output(self) -> W {
        self.output
    }

    fn prompt(&mut self, board: &Board) -> io::Result<Option<Move>> {
        let moves = self.generator.generate_moves(board, self.side);
        write!(self.output, "{board}")?;
        if moves.is_empty() {
            writeln!(self.output, "No legal moves for {}", self.side)?;
            return Ok(None);
        }
        writeln!(self.output, "Possible moves for {}:", self.side)?;
        for (i, mv) in moves.iter().enumerate() {
            writeln!(self.output, "{}: {mv}", i + 1)?;
        }

        loop {
            write!(self.output, "Enter move index (-1 to concede): ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                return Ok(None);
            }
            match line.trim().parse::<i64>() {
                Ok(-1) => return Ok(None),
                Ok(choice) => {
                    let picked = usize::try_from(choice)
                        .ok()
                        .and_then(|n| n.checked_sub(1))
                        .and_then(|i| moves.get(i));
                    if let Some(mv) = picked {
                        return Ok(Some(*mv));
                    }
                    writeln!(self.output, "Choose a number from 1 to {}", moves.len())?;
                }
                Err(_) => writeln!(self.output, "Not a number: {}", line.trim())?,
            }
        }
    }
}

impl<R: LineInput, W: Write> Player for HumanPlayer<R, W> {
    fn name(&self) -> &str {
        "Human"
    }

    fn initialize(&mut self, side: Side) {
        self.side = side;
    }

    fn get_move(&mut self, board: &Board) -> Option<Move> {
        self.prompt(board).unwrap_or_else(|err| {
            tracing::warn!("console unavailable, {} concedes: {err}", self.side);
            None
        })
    }
}
