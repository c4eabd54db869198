pub use cozy_chess::{BitBoard, Color, File, Piece, Rank, Square};

/// Why a game ended without a winner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawReason {
    Stalemate,
    InsufficientMaterial,
    FiftyMoveRule,
}

/// A decided game result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Draw(DrawReason),
    Winner(Color),
}

impl Outcome {
    pub fn winner(self) -> Option<Color> {
        match self {
            Outcome::Winner(color) => Some(color),
            Outcome::Draw(_) => None,
        }
    }
}

/// Errors raised by the rules adapter.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    #[error("illegal move {mv} in position {fen}")]
    InvalidMove { mv: String, fen: String },
    #[error("malformed move notation: {0:?}")]
    BadNotation(String),
    #[error("invalid FEN {fen:?}: {reason}")]
    BadFen { fen: String, reason: String },
}

// Helpers
pub fn file_char(file: File) -> char {
    (b'a' + file as u8) as char
}

pub fn rank_char(rank: Rank) -> char {
    (b'1' + rank as u8) as char
}

pub fn sq_to_coord(sq: Square) -> String {
    format!("{}{}", file_char(sq.file()), rank_char(sq.rank()))
}

pub fn coord_to_sq(c: &str) -> Option<Square> {
    let b = c.as_bytes();
    if b.len() != 2 {
        return None;
    }
    let f = b[0];
    let r = b[1];
    if !(b'a'..=b'h').contains(&f) || !(b'1'..=b'8').contains(&r) {
        return None;
    }
    Some(Square::new(
        File::index((f - b'a') as usize),
        Rank::index((r - b'1') as usize),
    ))
}

/// True for squares of the same shade as a1.
pub fn is_dark(sq: Square) -> bool {
    (sq.file() as usize + sq.rank() as usize) % 2 == 0
}
