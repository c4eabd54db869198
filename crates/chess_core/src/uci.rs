//! Coordinate move notation ("e2e4", "e7e8q").

use std::fmt;
use std::str::FromStr;

use crate::types::*;

/// A move in coordinate form. Castling is the king's two-square step
/// ("e1g1"), independent of how the rules engine encodes it internally.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promo: Option<Piece>,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promo: None,
        }
    }

    pub fn with_promo(from: Square, to: Square, promo: Piece) -> Self {
        Self {
            from,
            to,
            promo: Some(promo),
        }
    }
}

fn promo_char(p: Piece) -> char {
    match p {
        Piece::Queen => 'q',
        Piece::Rook => 'r',
        Piece::Bishop => 'b',
        Piece::Knight => 'n',
        Piece::Pawn => 'p',
        Piece::King => 'k',
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", sq_to_coord(self.from), sq_to_coord(self.to))?;
        if let Some(p) = self.promo {
            write!(f, "{}", promo_char(p))?;
        }
        Ok(())
    }
}

impl FromStr for Move {
    type Err = RulesError;

    fn from_str(txt: &str) -> Result<Self, Self::Err> {
        let bad = || RulesError::BadNotation(txt.to_string());
        if !txt.is_ascii() || !(4..=5).contains(&txt.len()) {
            return Err(bad());
        }
        let from = coord_to_sq(&txt[0..2]).ok_or_else(bad)?;
        let to = coord_to_sq(&txt[2..4]).ok_or_else(bad)?;
        let promo = match txt.as_bytes().get(4) {
            None => None,
            Some(c) => Some(match c.to_ascii_lowercase() {
                b'q' => Piece::Queen,
                b'r' => Piece::Rook,
                b'b' => Piece::Bishop,
                b'n' => Piece::Knight,
                _ => return Err(bad()),
            }),
        };
        Ok(Move { from, to, promo })
    }
}

pub fn move_to_uci(mv: Move) -> String {
    mv.to_string()
}

pub fn parse_uci_move(txt: &str) -> Result<Move, RulesError> {
    txt.trim().parse()
}
