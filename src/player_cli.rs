#![cfg(feature = "std")]

use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};
use std::string::String;

use log::warn;
use rand::rngs::SmallRng;

use crate::{
    board::Board,
    common::{BoardError, Point},
    config::GameConfig,
    ship::Orientation,
};

use crate::player::Player;

/// Player driven by a person typing at a terminal.
pub struct HumanPlayer<R, W> {
    name: String,
    config: GameConfig,
    input: R,
    output: W,
}

/// Line reader over stdin that only locks it for the duration of each read.
///
/// The one-byte buffer leaves everything past the current line in the
/// process-wide stdin buffer, where other readers such as the console pause
/// prompt still see it.
pub fn stdin_reader() -> BufReader<Stdin> {
    BufReader::with_capacity(1, io::stdin())
}

impl HumanPlayer<BufReader<Stdin>, Stdout> {
    /// Human reading stdin and prompting on stdout.
    pub fn stdio(name: impl Into<String>, config: &GameConfig) -> Self {
        Self::new(name, config, stdin_reader(), io::stdout())
    }
}

impl<R: BufRead, W: Write> HumanPlayer<R, W> {
    pub fn new(name: impl Into<String>, config: &GameConfig, input: R, output: W) -> Self {
        Self {
            name: name.into(),
            config: config.clone(),
            input,
            output,
        }
    }

    fn prompt(&mut self, text: &str) {
        let _ = write!(self.output, "{}", text);
        let _ = self.output.flush();
    }

    /// Next input line, or `None` at end of input.
    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line),
            Err(e) => {
                warn!("failed to read input: {}", e);
                None
            }
        }
    }

    fn read_direction(&mut self, ship: usize) -> Option<Orientation> {
        let name = self.config.ship_name(ship).unwrap_or("ship").to_string();
        let len = self.config.ship_length(ship).unwrap_or(0);
        self.prompt(&format!(
            "Enter h or v for direction of {} (length {}): ",
            name, len
        ));
        loop {
            let line = self.read_line()?;
            match line.trim() {
                "h" => return Some(Orientation::Horizontal),
                "v" => return Some(Orientation::Vertical),
                _ => self.prompt("Direction must be h or v.\n"),
            }
        }
    }

    fn read_point(&mut self, text: &str) -> Option<Point> {
        loop {
            self.prompt(text);
            let line = self.read_line()?;
            match parse_point(&line) {
                Some(p) => return Some(p),
                None => self.prompt("You must enter two integers.\n"),
            }
        }
    }
}

/// Parse two whitespace-separated integers as `row col`.
pub fn parse_point(line: &str) -> Option<Point> {
    let mut parts = line.split_whitespace();
    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;
    Some(Point::new(row, col))
}

impl<R: BufRead, W: Write> Player for HumanPlayer<R, W> {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_human(&self) -> bool {
        true
    }

    fn place_ships(&mut self, _rng: &mut SmallRng, board: &mut Board) -> Result<(), BoardError> {
        let count = self.config.ship_count();
        self.prompt(&format!("{} must place {} ships.\n", self.name, count));
        for ship in 0..count {
            let view = board.render(false).to_string();
            self.prompt(&view);
            let dir = self.read_direction(ship).ok_or(BoardError::PlacementInfeasible)?;
            loop {
                let p = self
                    .read_point("Enter row and column of leftmost cell (e.g., 3 5): ")
                    .ok_or(BoardError::PlacementInfeasible)?;
                match board.place_ship(p, ship, dir) {
                    Ok(()) => break,
                    Err(_) => self.prompt("The ship can not be placed there.\n"),
                }
            }
        }
        Ok(())
    }

    fn recommend_attack(&mut self, _rng: &mut SmallRng) -> Option<Point> {
        self.read_point("Enter the row and column to attack (e.g., 3 5): ")
    }
}
