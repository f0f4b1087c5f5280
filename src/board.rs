use std::{array, error::Error, fmt, fmt::Write as _};

use bitflags::bitflags;

use crate::{
    castling::CastlingSide,
    color::{ByColor, Color},
    piece::{Piece, Role},
    square::Square,
};

/// Back-rank layout shared by both players, from the a-file to the
/// h-file.
const BACKRANK: [Role; 8] = [
    Role::Rook,
    Role::Knight,
    Role::Bishop,
    Role::Queen,
    Role::King,
    Role::Bishop,
    Role::Knight,
    Role::Rook,
];

/// An immutable 64-square snapshot of a game.
///
/// A board owns its piece set, the selection highlight and the
/// per-player castling flags. Every operation returns a new `Board`
/// value and never mutates the receiver, so a consumer can keep old
/// snapshots around (for history or undo) and read them freely.
///
/// Legality checking and move application are deliberately separate:
/// [`Board::apply_move`] performs no validation, mirroring the split
/// between generating moves and executing them. Callers either check
/// [`Piece::all_legal_moves`] themselves or go through the validating
/// [`Board::play`].
///
/// # Examples
///
/// ```
/// use shatranj::{Board, Color, Square};
///
/// let board = Board::new();
/// let after = board.apply_move(Square::E2, Square::E4);
/// assert!(after.piece_at(Square::E2).is_empty());
/// assert!(board.piece_at(Square::E2).is(Color::White, shatranj::Role::Pawn));
/// ```
#[derive(Clone, Eq, PartialEq)]
pub struct Board {
    squares: [Piece; 64],
    selected: Option<Square>,
    castled: ByColor<bool>,
}

bitflags! {
    /// Reasons a piece layout is rejected by [`Board::from_pieces`].
    #[derive(Copy, Clone, Eq, PartialEq, Debug)]
    pub struct SetupErrorKinds: u32 {
        /// A player has no king.
        const MISSING_KING = 1 << 0;
        /// A player has more than one king.
        const TOO_MANY_KINGS = 1 << 1;
        /// A placement names the `Empty` role, which cannot be owned.
        const OWNED_EMPTY_SQUARE = 1 << 2;
    }
}

/// Error when an externally supplied piece layout violates the board
/// invariants.
///
/// No sequence of engine operations can produce such a board; this is a
/// construction-time fault of the caller, not a recoverable game state.
#[derive(Clone, Debug)]
pub struct SetupError {
    kinds: SetupErrorKinds,
}

impl SetupError {
    pub fn kinds(&self) -> SetupErrorKinds {
        self.kinds
    }
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.kinds.contains(SetupErrorKinds::MISSING_KING) {
            "invalid board setup: missing king"
        } else if self.kinds.contains(SetupErrorKinds::TOO_MANY_KINGS) {
            "invalid board setup: too many kings"
        } else if self.kinds.contains(SetupErrorKinds::OWNED_EMPTY_SQUARE) {
            "invalid board setup: empty role cannot be owned"
        } else {
            "invalid board setup"
        })
    }
}

impl Error for SetupError {}

/// Error when attempting to play an invalid move via [`Board::play`].
///
/// Both variants are recoverable: the board is left untouched and the
/// caller simply rejects the input.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum PlayError {
    /// The destination is not among the piece's fully legal moves.
    IllegalMove { from: Square, to: Square },
    /// The origin square does not hold a piece of the player to move.
    WrongTurn { square: Square, turn: Color },
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            PlayError::IllegalMove { from, to } => {
                write!(f, "illegal move from {from} to {to}")
            }
            PlayError::WrongTurn { square, turn } => {
                write!(f, "square {square} holds no piece of {turn}")
            }
        }
    }
}

impl Error for PlayError {}

impl Board {
    /// The standard starting position.
    pub fn new() -> Board {
        let mut board = Board::empty();
        for color in Color::ALL {
            for (file, &role) in BACKRANK.iter().enumerate() {
                let square = Square::new(file as i8, color.backrank());
                board.squares[square.index()] = Piece::new(role, color, square);
            }
            for file in 0..8 {
                let square = Square::new(file, color.pawn_rank());
                board.squares[square.index()] = Piece::new(Role::Pawn, color, square);
            }
        }
        board
    }

    /// A board of 64 empty squares, the canvas for custom setups via
    /// [`Board::set_piece_at`] or [`Board::from_pieces`].
    pub fn empty() -> Board {
        Board {
            squares: array::from_fn(|i| Piece::empty(Square::ALL[i])),
            selected: None,
            castled: ByColor::default(),
        }
    }

    /// Builds a board from explicit placements, everything else empty.
    ///
    /// This is the validating entry point for externally constructed
    /// positions: each side must field exactly one king, otherwise the
    /// check and mobility queries would not be well-defined.
    ///
    /// # Examples
    ///
    /// ```
    /// use shatranj::{Board, Color, Role, SetupErrorKinds, Square};
    ///
    /// let board = Board::from_pieces([
    ///     (Square::E1, Color::White, Role::King),
    ///     (Square::E8, Color::Black, Role::King),
    ///     (Square::D1, Color::White, Role::Queen),
    /// ])?;
    /// assert!(board.piece_at(Square::D1).is(Color::White, Role::Queen));
    ///
    /// let err = Board::from_pieces([(Square::E1, Color::White, Role::King)]).unwrap_err();
    /// assert!(err.kinds().contains(SetupErrorKinds::MISSING_KING));
    /// # Ok::<_, shatranj::SetupError>(())
    /// ```
    pub fn from_pieces<I>(placements: I) -> Result<Board, SetupError>
    where
        I: IntoIterator<Item = (Square, Color, Role)>,
    {
        let mut board = Board::empty();
        let mut kinds = SetupErrorKinds::empty();

        for (square, owner, role) in placements {
            if role.is_empty() {
                kinds |= SetupErrorKinds::OWNED_EMPTY_SQUARE;
                continue;
            }
            board.squares[square.index()] = Piece::new(role, owner, square);
        }

        for color in Color::ALL {
            let kings = board
                .pieces_of(color)
                .filter(|piece| piece.role == Role::King)
                .count();
            kinds |= match kings {
                0 => SetupErrorKinds::MISSING_KING,
                1 => SetupErrorKinds::empty(),
                _ => SetupErrorKinds::TOO_MANY_KINGS,
            };
        }

        if kinds.is_empty() {
            Ok(board)
        } else {
            Err(SetupError { kinds })
        }
    }

    /// The piece occupying `square`. Unoccupied squares hold the `Empty`
    /// piece, so this is total.
    #[inline]
    pub fn piece_at(&self, square: Square) -> Piece {
        self.squares[square.index()]
    }

    /// All pieces owned by `player`.
    pub fn pieces_of(&self, player: Color) -> impl Iterator<Item = Piece> + '_ {
        self.squares
            .iter()
            .copied()
            .filter(move |piece| piece.owner == Some(player))
    }

    /// The square of `player`'s king, or `None` on a board malformed by
    /// raw edits. Boards built by [`Board::new`] or
    /// [`Board::from_pieces`] always have one.
    pub fn king_of(&self, player: Color) -> Option<Square> {
        self.pieces_of(player)
            .find(|piece| piece.role == Role::King)
            .map(|piece| piece.square)
    }

    /// The currently selected square, if any.
    #[inline]
    pub fn selected_square(&self) -> Option<Square> {
        self.selected
    }

    /// Whether `player` has castled or otherwise consumed the right by
    /// moving the king.
    #[inline]
    pub fn has_castled(&self, player: Color) -> bool {
        self.castled[player]
    }

    /// Whether any piece of `by` threatens `square`.
    ///
    /// Threat is judged by the unfiltered movement rules
    /// ([`Piece::legal_destinations`]): an attacker pins count even when
    /// its move would expose its own king.
    pub fn is_attacked(&self, square: Square, by: Color) -> bool {
        self.pieces_of(by)
            .any(|piece| piece.legal_destinations(self).contains(&square))
    }

    /// Whether `player`'s king is currently under attack.
    pub fn king_in_check(&self, player: Color) -> bool {
        self.king_of(player)
            .map_or(false, |square| self.is_attacked(square, !player))
    }

    /// Whether `player` has at least one fully legal move anywhere.
    pub fn can_move(&self, player: Color) -> bool {
        self.pieces_of(player)
            .any(|piece| piece.has_any_legal_move(self))
    }

    /// Applies a move without validating it, returning the resulting
    /// board: the piece at `from` is relocated to `to`, `from` becomes
    /// empty, and a pawn reaching its far rank is replaced by a new
    /// queen of the same owner.
    ///
    /// Legality is the caller's responsibility; check membership in
    /// [`Piece::all_legal_moves`] first or use [`Board::play`].
    #[must_use]
    pub fn apply_move(&self, from: Square, to: Square) -> Board {
        let mut next = self.clone();
        let moved = next.squares[from.index()];
        next.squares[to.index()] = moved.at(to);
        next.squares[from.index()] = Piece::empty(from);
        next.promote_at(to);
        next
    }

    fn promote_at(&mut self, square: Square) {
        let piece = self.squares[square.index()];
        if piece.role != Role::Pawn {
            return;
        }
        if let Some(owner) = piece.owner {
            if square.rank() == owner.promotion_rank() {
                // replacement, not mutation: a fresh queen takes the square
                self.squares[square.index()] = Piece::new(Role::Queen, owner, square);
            }
        }
    }

    /// Performs the rook half of castling and consumes the mover's
    /// castling right.
    ///
    /// When the king's file displacement is exactly two, the matching
    /// rook is relocated (kingside file 7 to 5, queenside file 0 to 3,
    /// on the king's home rank) and the flag is consumed. For any other
    /// king move only the flag is consumed. Call this *before*
    /// [`Board::apply_move`] for king moves, so the rook relocation and
    /// the flag update are captured; [`Board::play`] sequences the two
    /// calls correctly. Squares that do not hold a king are left
    /// untouched.
    #[must_use]
    pub fn apply_castling(&self, king_from: Square, king_to: Square) -> Board {
        let piece = self.piece_at(king_from);
        let Some(owner) = piece.owner else {
            return self.clone();
        };
        if piece.role != Role::King {
            return self.clone();
        }

        let mut next = if (king_to.file() - king_from.file()).abs() == 2 {
            let side = CastlingSide::from_king_side(king_to.file() > king_from.file());
            self.apply_move(side.rook_from(owner), side.rook_to(owner))
        } else {
            self.clone()
        };
        next.castled[owner] = true;
        next
    }

    /// Marks `square` as selected, replacing any previous selection.
    #[must_use]
    pub fn select(&self, square: Square) -> Board {
        let mut next = self.unselect();
        next.squares[square.index()].selected = true;
        next.selected = Some(square);
        next
    }

    /// Clears the selection highlight.
    #[must_use]
    pub fn unselect(&self) -> Board {
        let mut next = self.clone();
        if let Some(square) = next.selected.take() {
            next.squares[square.index()].selected = false;
        }
        next
    }

    /// Places a piece on `square`, replacing whatever was there.
    ///
    /// A raw edit for setting up positions: no validation happens and no
    /// castling flag is touched.
    #[must_use]
    pub fn set_piece_at(&self, square: Square, owner: Color, role: Role) -> Board {
        let mut next = self.clone();
        next.squares[square.index()] = Piece::new(role, owner, square);
        next
    }

    /// Empties `square`. A raw edit like [`Board::set_piece_at`].
    #[must_use]
    pub fn discard_piece_at(&self, square: Square) -> Board {
        let mut next = self.clone();
        next.squares[square.index()] = Piece::empty(square);
        next
    }

    /// Validates and plays a move for `turn`, sequencing the castling
    /// bookkeeping and the move application.
    ///
    /// # Errors
    ///
    /// [`PlayError::WrongTurn`] if `from` does not hold a piece of
    /// `turn`, [`PlayError::IllegalMove`] if `to` is not a fully legal
    /// destination. The board is unchanged in both cases.
    ///
    /// # Examples
    ///
    /// ```
    /// use shatranj::{Board, Color, PlayError, Square};
    ///
    /// let board = Board::new();
    /// let after = board.play(Square::E2, Square::E4, Color::White)?;
    /// assert!(after.piece_at(Square::E4).is(Color::White, shatranj::Role::Pawn));
    ///
    /// assert_eq!(
    ///     board.play(Square::E2, Square::E4, Color::Black),
    ///     Err(PlayError::WrongTurn { square: Square::E2, turn: Color::Black }),
    /// );
    /// # Ok::<_, PlayError>(())
    /// ```
    pub fn play(&self, from: Square, to: Square, turn: Color) -> Result<Board, PlayError> {
        let piece = self.piece_at(from);
        if piece.owner != Some(turn) {
            return Err(PlayError::WrongTurn { square: from, turn });
        }
        if !piece.is_legal_move(self, to) {
            return Err(PlayError::IllegalMove { from, to });
        }

        let next = if piece.role == Role::King {
            self.apply_castling(from, to)
        } else {
            self.clone()
        };
        Ok(next.apply_move(from, to))
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::new()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in 0..8 {
            for file in 0..8 {
                let piece = self.piece_at(Square::new(file, rank));
                f.write_char(match piece.owner {
                    Some(Color::White) => piece.role.upper_char(),
                    Some(Color::Black) => piece.role.char(),
                    None => '.',
                })?;
                f.write_char(if file < 7 { ' ' } else { '\n' })?;
            }
        }
        Ok(())
    }
}
