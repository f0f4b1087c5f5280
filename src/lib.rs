//! A library for chess rules and board state, built to sit behind a
//! two-player user interface.
//!
//! The engine tracks an immutable 64-square [`Board`], enumerates legal
//! moves per piece and per player, detects check, checkmate and
//! stalemate, and applies moves (including pawn promotion and castling)
//! by returning new board values. The consumer owns turn alternation,
//! the select-then-move interaction and the history of snapshots; the
//! engine owns the rules.
//!
//! # Examples
//!
//! Generate the legal moves of a piece in the starting position:
//!
//! ```
//! use shatranj::{Board, Square};
//!
//! let board = Board::new();
//! let knight = board.piece_at(Square::B1);
//! assert_eq!(knight.all_legal_moves(&board).len(), 2);
//! ```
//!
//! Play moves and watch for the game ending:
//!
//! ```
//! use shatranj::{outcome, Board, Color, Outcome, Square};
//!
//! let board = Board::new();
//! let board = board.play(Square::E2, Square::E4, Color::White)?;
//! let board = board.play(Square::E7, Square::E5, Color::Black)?;
//! assert_eq!(outcome(&board, Color::White), Outcome::Ongoing);
//! # Ok::<_, shatranj::PlayError>(())
//! ```
//!
//! Every mutating operation returns a new [`Board`]; old snapshots stay
//! valid, so undo and "jump to move n" are just indexing into a list of
//! boards kept by the caller.
//!
//! # Feature flags
//!
//! * `serde`: Implements [`serde`](https://docs.rs/serde/1)
//!   serialization/deserialization for vocabulary types with unique
//!   natural representations.

#![warn(missing_debug_implementations)]

mod board;
mod castling;
mod color;
mod outcome;
mod piece;
mod square;
mod util;

pub use board::{Board, PlayError, SetupError, SetupErrorKinds};
pub use castling::CastlingSide;
pub use color::{ByColor, Color};
pub use outcome::{outcome, Outcome};
pub use piece::{Line, Piece, Reach, Role, SquareList};
pub use square::Square;
