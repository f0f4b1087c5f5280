use arrayvec::ArrayVec;

use crate::{board::Board, castling::CastlingSide, color::Color, square::Square};

/// Piece types: `Pawn`, `Knight`, `Bishop`, `Rook`, `Queen`, `King`,
/// plus the `Empty` marker occupying unowned squares.
///
/// `Empty` is a real variant rather than an absent value, so every
/// square of a [`Board`] always holds exactly one [`Piece`]. Real piece
/// types are indexed from 1 to 6.
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    Empty = 0,
    Pawn = 1,
    Knight = 2,
    Bishop = 3,
    Rook = 4,
    Queen = 5,
    King = 6,
}

impl Role {
    #[inline]
    pub const fn is_empty(self) -> bool {
        matches!(self, Role::Empty)
    }

    /// Gets the lowercase English letter for the piece type, or `'.'`
    /// for `Empty`.
    pub const fn char(self) -> char {
        match self {
            Role::Empty => '.',
            Role::Pawn => 'p',
            Role::Knight => 'n',
            Role::Bishop => 'b',
            Role::Rook => 'r',
            Role::Queen => 'q',
            Role::King => 'k',
        }
    }

    /// Gets the uppercase English letter for the piece type, or `'.'`
    /// for `Empty`.
    pub const fn upper_char(self) -> char {
        match self {
            Role::Empty => '.',
            Role::Pawn => 'P',
            Role::Knight => 'N',
            Role::Bishop => 'B',
            Role::Rook => 'R',
            Role::Queen => 'Q',
            Role::King => 'K',
        }
    }

    /// The six real piece types, `Empty` excluded.
    pub const ALL: [Role; 6] = [
        Role::Pawn,
        Role::Knight,
        Role::Bishop,
        Role::Rook,
        Role::Queen,
        Role::King,
    ];
}

/// One ordered group of raw movement geometry: coordinates walked
/// nearest to farthest, possibly off the board.
pub type Line = ArrayVec<(i8, i8), 7>;

/// Unfiltered movement geometry of a piece, one [`Line`] per direction.
pub type Reach = ArrayVec<Line, 8>;

/// Destination squares of a single piece. A queen in the open reaches at
/// most 27 squares, so the list always fits inline on the stack.
pub type SquareList = ArrayVec<Square, 27>;

const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, -1), (-1, -1), (1, 1), (-1, 1)];

const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// A piece occupying one square of the board.
///
/// Pieces are plain values: once constructed, `role` and `owner` never
/// change. Moving a piece produces a relocated copy, and promotion
/// replaces a pawn with a freshly constructed queen. The `Empty` piece
/// (`owner == None`) has no movement geometry, so a query against an
/// unoccupied square naturally yields no moves.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Piece {
    pub role: Role,
    pub owner: Option<Color>,
    pub square: Square,
    pub selected: bool,
}

impl Piece {
    /// Constructs an owned piece. For unoccupied squares use
    /// [`Piece::empty`].
    #[inline]
    pub const fn new(role: Role, owner: Color, square: Square) -> Piece {
        debug_assert!(!role.is_empty());
        Piece {
            role,
            owner: Some(owner),
            square,
            selected: false,
        }
    }

    /// Constructs the marker piece for an unoccupied square.
    #[inline]
    pub const fn empty(square: Square) -> Piece {
        Piece {
            role: Role::Empty,
            owner: None,
            square,
            selected: false,
        }
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.role.is_empty()
    }

    /// Checks owner and role at once.
    #[inline]
    pub fn is(&self, owner: Color, role: Role) -> bool {
        self.owner == Some(owner) && self.role == role
    }

    /// A copy of this piece relocated to `square`, with any selection
    /// highlight dropped.
    #[inline]
    #[must_use]
    pub(crate) const fn at(self, square: Square) -> Piece {
        Piece {
            role: self.role,
            owner: self.owner,
            square,
            selected: false,
        }
    }

    /// Raw movement geometry: where this piece could go on an empty,
    /// boundless board.
    ///
    /// Sliding pieces contribute one [`Line`] per ray, walked nearest to
    /// farthest; leaping pieces contribute single-step lines. Coordinates
    /// are not clamped to the board and contents are ignored, both of
    /// which are the concern of [`Piece::legal_destinations`]. The
    /// `Empty` piece has no geometry at all.
    pub fn raw_reach(&self) -> Reach {
        let mut reach = Reach::new();
        match self.role {
            Role::Empty => {}
            Role::King => self.leaps(&KING_OFFSETS, &mut reach),
            Role::Knight => self.leaps(&KNIGHT_OFFSETS, &mut reach),
            Role::Pawn => {
                if let Some(owner) = self.owner {
                    let dir = owner.forward();
                    self.leaps(&[(0, dir), (0, 2 * dir), (-1, dir), (1, dir)], &mut reach);
                }
            }
            Role::Bishop => self.rays(&BISHOP_DIRECTIONS, &mut reach),
            Role::Rook => self.rays(&ROOK_DIRECTIONS, &mut reach),
            Role::Queen => {
                self.rays(&BISHOP_DIRECTIONS, &mut reach);
                self.rays(&ROOK_DIRECTIONS, &mut reach);
            }
        }
        reach
    }

    fn leaps(&self, offsets: &[(i8, i8)], reach: &mut Reach) {
        let (file, rank) = (self.square.file(), self.square.rank());
        for &(df, dr) in offsets {
            let mut line = Line::new();
            line.push((file + df, rank + dr));
            reach.push(line);
        }
    }

    fn rays(&self, directions: &[(i8, i8)], reach: &mut Reach) {
        let (file, rank) = (self.square.file(), self.square.rank());
        for &(df, dr) in directions {
            let mut line = Line::new();
            for step in 1..8 {
                line.push((file + step * df, rank + step * dr));
            }
            reach.push(line);
        }
    }

    /// Destination squares reachable under movement rules, ignoring
    /// whether the move would leave the mover's own king in check.
    ///
    /// Each raw line is clamped to the board and walked in order: empty
    /// squares are collected, the first occupied square ends the line and
    /// is collected only when it holds an opposing piece. Pawns instead
    /// follow their capture and advance rules: straight pushes need empty
    /// targets, diagonal steps need an enemy to capture, and the double
    /// advance is only available from the home rank with both squares
    /// clear.
    ///
    /// This is also the attack relation used by
    /// [`Board::is_attacked`](crate::Board::is_attacked): threatening a
    /// square does not require a check-safe move.
    pub fn legal_destinations(&self, board: &Board) -> SquareList {
        let mut dests = SquareList::new();
        let Some(owner) = self.owner else {
            return dests;
        };

        if self.role == Role::Pawn {
            self.pawn_destinations(owner, board, &mut dests);
            return dests;
        }

        for line in self.raw_reach() {
            for (file, rank) in line {
                let Some(to) = Square::from_coords(file, rank) else {
                    break;
                };
                match board.piece_at(to).owner {
                    None => dests.push(to),
                    Some(other) if other != owner => {
                        dests.push(to);
                        break;
                    }
                    Some(_) => break,
                }
            }
        }
        dests
    }

    fn pawn_destinations(&self, owner: Color, board: &Board, dests: &mut SquareList) {
        let dir = owner.forward();

        if let Some(to) = self.square.translate(0, dir) {
            if board.piece_at(to).is_empty() {
                dests.push(to);
                // the double advance may not jump over anything
                if self.square.rank() == owner.pawn_rank() {
                    if let Some(two) = self.square.translate(0, 2 * dir) {
                        if board.piece_at(two).is_empty() {
                            dests.push(two);
                        }
                    }
                }
            }
        }

        for df in [-1, 1] {
            if let Some(to) = self.square.translate(df, dir) {
                if board.piece_at(to).owner == Some(!owner) {
                    dests.push(to);
                }
            }
        }
    }

    /// Destination squares that are fully legal: a subset of
    /// [`Piece::legal_destinations`] with every move removed whose
    /// speculative application would leave the mover's own king under
    /// attack. For kings, eligible castling destinations are added.
    ///
    /// # Examples
    ///
    /// ```
    /// use shatranj::{Board, Square};
    ///
    /// let board = Board::new();
    /// let knight = board.piece_at(Square::B1);
    /// let moves = knight.all_legal_moves(&board);
    /// assert!(moves.contains(&Square::A3));
    /// assert!(moves.contains(&Square::C3));
    /// assert_eq!(moves.len(), 2);
    /// ```
    pub fn all_legal_moves(&self, board: &Board) -> SquareList {
        let mut moves = SquareList::new();
        let Some(owner) = self.owner else {
            return moves;
        };

        for to in self.legal_destinations(board) {
            if !board.apply_move(self.square, to).king_in_check(owner) {
                moves.push(to);
            }
        }

        if self.role == Role::King {
            for side in CastlingSide::ALL {
                if let Some(to) = self.castling_destination(board, side) {
                    moves.push(to);
                }
            }
        }
        moves
    }

    /// Whether any fully legal move exists for this piece.
    pub fn has_any_legal_move(&self, board: &Board) -> bool {
        !self.all_legal_moves(board).is_empty()
    }

    /// Whether `to` is a fully legal destination for this piece.
    pub fn is_legal_move(&self, board: &Board, to: Square) -> bool {
        self.all_legal_moves(board).contains(&to)
    }

    /// The square this king would land on by castling to `side`, if all
    /// eligibility conditions hold: the owner's castling flag is not yet
    /// consumed, king and rook stand on their home squares, the squares
    /// between them are empty, the king is not currently attacked, and
    /// neither square on its two-square path is attacked.
    fn castling_destination(&self, board: &Board, side: CastlingSide) -> Option<Square> {
        let owner = self.owner?;
        if board.has_castled(owner) {
            return None;
        }

        let king_from = side.king_from(owner);
        if !board.piece_at(king_from).is(owner, Role::King)
            || !board.piece_at(side.rook_from(owner)).is(owner, Role::Rook)
        {
            return None;
        }

        if side
            .between(owner)
            .iter()
            .any(|&sq| !board.piece_at(sq).is_empty())
        {
            return None;
        }

        if board.is_attacked(king_from, !owner) {
            return None;
        }

        // The path is probed by actually moving the king: a pawn attack
        // only materializes against an occupied square.
        if side
            .king_path(owner)
            .iter()
            .any(|&sq| board.apply_move(king_from, sq).king_in_check(owner))
        {
            return None;
        }

        Some(side.king_to(owner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    #[test]
    fn test_raw_reach_shapes() {
        let king = Piece::new(Role::King, Color::White, Square::E4);
        assert_eq!(king.raw_reach().len(), 8);
        assert!(king.raw_reach().iter().all(|line| line.len() == 1));

        let queen = Piece::new(Role::Queen, Color::White, Square::E4);
        assert_eq!(queen.raw_reach().len(), 8);
        assert!(queen.raw_reach().iter().all(|line| line.len() == 7));

        let pawn = Piece::new(Role::Pawn, Color::Black, Square::E7);
        assert_eq!(pawn.raw_reach().len(), 4);

        assert!(Piece::empty(Square::E4).raw_reach().is_empty());
    }

    #[test]
    fn test_raw_reach_ignores_the_board_edge() {
        let rook = Piece::new(Role::Rook, Color::White, Square::A1);
        let reach = rook.raw_reach();
        assert!(reach
            .iter()
            .flatten()
            .any(|&(file, _)| !(0..8).contains(&file)));
    }

    #[test]
    fn test_knight_in_the_corner() {
        let board = Board::empty()
            .set_piece_at(Square::A8, Color::Black, Role::Knight)
            .set_piece_at(Square::E8, Color::Black, Role::King)
            .set_piece_at(Square::E1, Color::White, Role::King);
        let knight = board.piece_at(Square::A8);
        let dests = knight.legal_destinations(&board);
        assert_eq!(dests.len(), 2);
        assert!(dests.contains(&Square::B6));
        assert!(dests.contains(&Square::C7));
    }

    #[test]
    fn test_ray_stops_at_first_obstruction() {
        let board = Board::empty()
            .set_piece_at(Square::A1, Color::White, Role::Rook)
            .set_piece_at(Square::A5, Color::Black, Role::Pawn)
            .set_piece_at(Square::E1, Color::White, Role::King)
            .set_piece_at(Square::E8, Color::Black, Role::King);
        let rook = board.piece_at(Square::A1);
        let dests = rook.legal_destinations(&board);

        // up the a-file: a2, a3, a4, then capture on a5 and stop
        assert!(dests.contains(&Square::A4));
        assert!(dests.contains(&Square::A5));
        assert!(!dests.contains(&Square::A6));

        // along the first rank: blocked by the friendly king on e1
        assert!(dests.contains(&Square::D1));
        assert!(!dests.contains(&Square::E1));
        assert!(!dests.contains(&Square::F1));
    }

    #[test]
    fn test_pawn_rules() {
        let board = Board::new();
        let pawn = board.piece_at(Square::E2);
        let dests = pawn.legal_destinations(&board);
        assert_eq!(dests.len(), 2);
        assert!(dests.contains(&Square::E3));
        assert!(dests.contains(&Square::E4));

        // a blocker directly ahead also forbids the double advance
        let blocked = board.set_piece_at(Square::E3, Color::Black, Role::Knight);
        assert!(blocked
            .piece_at(Square::E2)
            .legal_destinations(&blocked)
            .is_empty());

        // a blocker on the fourth rank only forbids the double advance
        let half_blocked = board.set_piece_at(Square::E4, Color::Black, Role::Knight);
        let dests = half_blocked
            .piece_at(Square::E2)
            .legal_destinations(&half_blocked);
        assert_eq!(dests.len(), 1);
        assert!(dests.contains(&Square::E3));
    }

    #[test]
    fn test_pawn_captures_diagonally_only() {
        let board = Board::new()
            .set_piece_at(Square::D3, Color::Black, Role::Pawn)
            .set_piece_at(Square::E3, Color::Black, Role::Pawn);
        let pawn = board.piece_at(Square::E2);
        let dests = pawn.legal_destinations(&board);
        assert!(dests.contains(&Square::D3));
        assert!(!dests.contains(&Square::E3));
        assert!(!dests.contains(&Square::F3));
    }

    #[test]
    fn test_pawn_does_not_capture_friends() {
        let board = Board::new().set_piece_at(Square::D3, Color::White, Role::Knight);
        let pawn = board.piece_at(Square::E2);
        assert!(!pawn.legal_destinations(&board).contains(&Square::D3));
    }

    #[test]
    fn test_double_advance_needs_home_rank() {
        let board = Board::empty()
            .set_piece_at(Square::E3, Color::White, Role::Pawn)
            .set_piece_at(Square::E1, Color::White, Role::King)
            .set_piece_at(Square::E8, Color::Black, Role::King);
        let pawn = board.piece_at(Square::E3);
        let dests = pawn.legal_destinations(&board);
        assert_eq!(dests.len(), 1);
        assert!(dests.contains(&Square::E4));
    }

    #[test]
    fn test_all_legal_moves_is_a_subset() {
        let positions = [
            Board::new(),
            Board::new().apply_move(Square::E2, Square::E4),
            Board::empty()
                .set_piece_at(Square::E1, Color::White, Role::King)
                .set_piece_at(Square::E2, Color::White, Role::Knight)
                .set_piece_at(Square::E8, Color::Black, Role::Rook)
                .set_piece_at(Square::A8, Color::Black, Role::King),
        ];
        for board in &positions {
            for color in Color::ALL {
                for piece in board.pieces_of(color) {
                    let unfiltered = piece.legal_destinations(board);
                    for to in piece.all_legal_moves(board) {
                        assert!(unfiltered.contains(&to), "{to} not in {unfiltered:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_pinned_knight_cannot_move() {
        let board = Board::empty()
            .set_piece_at(Square::E1, Color::White, Role::King)
            .set_piece_at(Square::E2, Color::White, Role::Knight)
            .set_piece_at(Square::E8, Color::Black, Role::Rook)
            .set_piece_at(Square::A8, Color::Black, Role::King);
        let knight = board.piece_at(Square::E2);
        assert!(!knight.legal_destinations(&board).is_empty());
        assert!(knight.all_legal_moves(&board).is_empty());
        assert!(!knight.has_any_legal_move(&board));
    }

    #[test]
    fn test_no_move_leaves_own_king_in_check() {
        let board = Board::empty()
            .set_piece_at(Square::E1, Color::White, Role::King)
            .set_piece_at(Square::D2, Color::White, Role::Queen)
            .set_piece_at(Square::E8, Color::Black, Role::Rook)
            .set_piece_at(Square::A8, Color::Black, Role::King);
        for piece in board.pieces_of(Color::White) {
            for to in piece.all_legal_moves(&board) {
                assert!(!board
                    .apply_move(piece.square, to)
                    .king_in_check(Color::White));
            }
        }
    }

    #[test]
    fn test_empty_piece_never_moves() {
        let board = Board::new();
        let empty = board.piece_at(Square::E4);
        assert!(empty.is_empty());
        assert!(empty.legal_destinations(&board).is_empty());
        assert!(!empty.has_any_legal_move(&board));
    }
}
