use cozy_chess::Board;

use crate::{
    movegen::{from_raw, has_legal_moves, legal_pairs},
    probe::PassedTurn,
    types::*,
    uci::Move,
};

/// Snapshot of the board and side to move.
///
/// Positions have value semantics: applying a move yields a new position and
/// leaves the original untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub(crate) board: Board,
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Position {
    pub fn startpos() -> Self {
        Position {
            board: Board::default(),
        }
    }

    pub fn from_fen(fen: &str) -> Result<Self, RulesError> {
        let board = fen.trim().parse::<Board>().map_err(|e| RulesError::BadFen {
            fen: fen.to_string(),
            reason: format!("{e:?}"),
        })?;
        Ok(Position { board })
    }

    pub fn fen(&self) -> String {
        self.board.to_string()
    }

    /// Placement, side to move, castling and en passant: the FEN without
    /// its move counters.
    pub fn book_key(&self) -> String {
        book_key_of(&self.fen())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    pub fn in_check(&self) -> bool {
        !self.board.checkers().is_empty()
    }

    pub fn halfmove_clock(&self) -> u8 {
        self.board.halfmove_clock()
    }

    pub fn hash(&self) -> u64 {
        self.board.hash()
    }

    pub fn piece_at(&self, sq: Square) -> Option<(Piece, Color)> {
        let piece = self.board.piece_on(sq)?;
        let color = self.board.color_on(sq)?;
        Some((piece, color))
    }

    pub fn pieces(&self, color: Color, piece: Piece) -> BitBoard {
        self.board.colored_pieces(color, piece)
    }

    pub fn is_legal(&self, mv: Move) -> bool {
        legal_pairs(&self.board).iter().any(|(m, _)| *m == mv)
    }

    /// Returns the position after `mv`. Fails with `InvalidMove` if `mv` is
    /// not among the legal moves; `self` is never modified.
    pub fn apply_move(&self, mv: Move) -> Result<Position, RulesError> {
        let raw = legal_pairs(&self.board)
            .into_iter()
            .find(|(m, _)| *m == mv)
            .map(|(_, raw)| raw)
            .ok_or_else(|| RulesError::InvalidMove {
                mv: mv.to_string(),
                fen: self.fen(),
            })?;
        let mut next = self.clone();
        next.board.play_unchecked(raw);
        Ok(next)
    }

    /// In-place form of [`Position::apply_move`]. On error the position is
    /// left as it was.
    pub fn play(&mut self, mv: Move) -> Result<(), RulesError> {
        *self = self.apply_move(mv)?;
        Ok(())
    }

    /// Every legal move with the position it leads to.
    pub fn successors(&self) -> Vec<(Move, Position)> {
        let mut out = Vec::with_capacity(64);
        self.board.generate_moves(|moves| {
            for raw in moves {
                let mut next = self.clone();
                next.board.play_unchecked(raw);
                out.push((from_raw(&self.board, raw), next));
            }
            false
        });
        out
    }

    /// `None` while the game is still going.
    pub fn outcome(&self) -> Option<Outcome> {
        let stm = self.side_to_move();
        if !has_legal_moves(&self.board) {
            return Some(if self.in_check() {
                Outcome::Winner(!stm)
            } else {
                Outcome::Draw(DrawReason::Stalemate)
            });
        }
        if self.is_insufficient_material() {
            return Some(Outcome::Draw(DrawReason::InsufficientMaterial));
        }
        if self.board.halfmove_clock() >= 100 {
            return Some(Outcome::Draw(DrawReason::FiftyMoveRule));
        }
        None
    }

    /// Neither side can ever mate: bare kings, a single minor piece, or
    /// bishops that all stand on one square color.
    pub fn is_insufficient_material(&self) -> bool {
        let b = &self.board;
        let heavy = b.pieces(Piece::Pawn) | b.pieces(Piece::Rook) | b.pieces(Piece::Queen);
        if !heavy.is_empty() {
            return false;
        }
        let knights = b.pieces(Piece::Knight);
        let bishops = b.pieces(Piece::Bishop);
        if knights.len() + bishops.len() <= 1 {
            return true;
        }
        if !knights.is_empty() {
            return false;
        }
        let dark = bishops.into_iter().filter(|&sq| is_dark(sq)).count();
        dark == 0 || dark == bishops.len() as usize
    }

    /// Hands the move to the other side without touching the board.
    ///
    /// The returned guard derefs to the passed position and restores the
    /// original when dropped. `None` if the side to move is in check, where
    /// the rules engine refuses a null move.
    pub fn pass_turn(&mut self) -> Option<PassedTurn<'_>> {
        let passed = self.board.null_move()?;
        Some(PassedTurn::new(self, passed))
    }
}

pub fn book_key_of(fen: &str) -> String {
    fen.split_whitespace().take(4).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
