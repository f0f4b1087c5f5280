use std::fmt;

use crate::{board::Board, color::Color};

/// The state of the game from the point of view of the player to move.
///
/// Derived by [`outcome`], never stored: the evaluation is a pure
/// function of the board and the player to move, recomputed each turn.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// The player to move has legal moves and is not in check.
    Ongoing,
    /// The player to move is in check but still has a legal move. A
    /// displayable sub-state of an ongoing game, not an ending.
    Check,
    /// The player to move has no legal move and is in check.
    Checkmate { winner: Color },
    /// The player to move has no legal move and is not in check. The
    /// game ends with no winner.
    Stalemate,
}

impl Outcome {
    /// The winning player, if the game has a decisive result.
    pub const fn winner(self) -> Option<Color> {
        match self {
            Outcome::Checkmate { winner } => Some(winner),
            _ => None,
        }
    }

    /// Whether the game is over.
    pub const fn is_game_over(self) -> bool {
        matches!(self, Outcome::Checkmate { .. } | Outcome::Stalemate)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Outcome::Checkmate {
                winner: Color::White,
            } => "1-0",
            Outcome::Checkmate {
                winner: Color::Black,
            } => "0-1",
            Outcome::Stalemate => "1/2-1/2",
            Outcome::Ongoing | Outcome::Check => "*",
        })
    }
}

/// Evaluates the game state for the player to move.
///
/// # Examples
///
/// ```
/// use shatranj::{outcome, Board, Color, Outcome};
///
/// let board = Board::new();
/// assert_eq!(outcome(&board, Color::White), Outcome::Ongoing);
/// ```
pub fn outcome(board: &Board, turn: Color) -> Outcome {
    match (board.can_move(turn), board.king_in_check(turn)) {
        (false, true) => Outcome::Checkmate { winner: !turn },
        (false, false) => Outcome::Stalemate,
        (true, true) => Outcome::Check,
        (true, false) => Outcome::Ongoing,
    }
}
