#![cfg(feature = "std")]

use std::io::{self, BufRead, BufReader, Stdin, Write};
use std::string::String;

use crate::{
    board::Board,
    common::{AttackOutcome, Point},
    game::GameObserver,
    player::Player,
    player_cli::stdin_reader,
};

/// Prints each turn to a writer, optionally waiting for enter after every shot.
///
/// When pausing, the enter key is read from `R`; without a pause `R` is never touched.
pub struct ConsoleObserver<W: Write, R: BufRead> {
    out: W,
    pause: Option<R>,
}

impl ConsoleObserver<io::Stdout, BufReader<Stdin>> {
    pub fn stdout(pause: bool) -> Self {
        Self {
            out: io::stdout(),
            pause: pause.then(stdin_reader),
        }
    }
}

impl<W: Write> ConsoleObserver<W, io::Empty> {
    /// Observer that never pauses.
    pub fn new(out: W) -> Self {
        Self { out, pause: None }
    }
}

impl<W: Write, R: BufRead> ConsoleObserver<W, R> {
    /// Observer that waits for a line from `input` after every shot.
    pub fn with_pause(out: W, input: R) -> Self {
        Self {
            out,
            pause: Some(input),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn wait_for_enter(&mut self) {
        let Some(input) = self.pause.as_mut() else { return };
        let _ = write!(self.out, "Press enter to continue: ");
        let _ = self.out.flush();
        let mut line = String::new();
        if let Ok(0) = input.read_line(&mut line) {
            // Nobody is left to press enter; stop asking.
            self.pause = None;
        }
    }
}

impl<W: Write, R: BufRead> GameObserver for ConsoleObserver<W, R> {
    fn turn_started(&mut self, attacker: &dyn Player, target: &Board) {
        let _ = writeln!(self.out, "{}'s turn.", attacker.name());
        let _ = write!(self.out, "{}", target.render(attacker.is_human()));
    }

    fn attack_resolved(
        &mut self,
        attacker: &dyn Player,
        p: Option<Point>,
        outcome: AttackOutcome,
        target: &Board,
    ) {
        let Some(p) = p else {
            let _ = writeln!(self.out, "{} has no move left.", attacker.name());
            return;
        };
        if !outcome.accepted {
            let _ = writeln!(self.out, "{} wasted a shot at {}.", attacker.name(), p);
        } else if outcome.hit {
            let _ = writeln!(
                self.out,
                "{} attacked {} and hit something, resulting in:",
                attacker.name(),
                p
            );
        } else {
            let _ = writeln!(
                self.out,
                "{} attacked {} and missed, resulting in:",
                attacker.name(),
                p
            );
        }
        let _ = write!(self.out, "{}", target.render(attacker.is_human()));
        self.wait_for_enter();
    }

    fn match_won(&mut self, winner: &dyn Player, loser: &dyn Player, winner_board: &Board) {
        let _ = writeln!(self.out, "{} wins!", winner.name());
        if loser.is_human() {
            let _ = writeln!(self.out, "Here is {}'s board:", winner.name());
            let _ = write!(self.out, "{}", winner_board.render(false));
        }
    }
}
