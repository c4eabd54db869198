//! Hand-weighted linear evaluation from a fixed color's point of view.

use chess_core::{
    legal_move_count, legal_moves, pseudo_moves, Color, Move, Piece, Position, Score, Square,
};
use serde::{Deserialize, Serialize};

/// Material values indexed by `Piece as usize`.
/// Order: Pawn, Knight, Bishop, Rook, Queen, King
const PIECE_VALUES: [i32; 6] = [1, 3, 3, 5, 9, 0];

/// What an attacked king is worth to the threat term.
const KING_THREAT_VALUE: i32 = 20;

/// Extra credit for an own pawn standing in the center.
const CENTER_PAWN_BONUS: i32 = 5;

const CENTER: [Square; 4] = [Square::D4, Square::D5, Square::E4, Square::E5];

const OUTER_CENTER: [Square; 12] = [
    Square::C3,
    Square::D3,
    Square::E3,
    Square::F3,
    Square::C4,
    Square::F4,
    Square::C5,
    Square::F5,
    Square::C6,
    Square::D6,
    Square::E6,
    Square::F6,
];

/// King corner squares and the pawn squares that shelter them.
const PAWN_SHIELDS: [(Square, [Square; 3]); 8] = [
    (Square::G1, [Square::F2, Square::G2, Square::H2]),
    (Square::H1, [Square::F2, Square::G2, Square::H2]),
    (Square::B1, [Square::C2, Square::B2, Square::A2]),
    (Square::A1, [Square::C2, Square::B2, Square::A2]),
    (Square::A8, [Square::C7, Square::B7, Square::A7]),
    (Square::B8, [Square::C7, Square::B7, Square::A7]),
    (Square::G8, [Square::F7, Square::G7, Square::H7]),
    (Square::H8, [Square::F7, Square::G7, Square::H7]),
];

const WHITE_HOME: [(Piece, Square); 7] = [
    (Piece::Rook, Square::A1),
    (Piece::Rook, Square::H1),
    (Piece::Knight, Square::B1),
    (Piece::Knight, Square::G1),
    (Piece::Bishop, Square::C1),
    (Piece::Bishop, Square::F1),
    (Piece::Queen, Square::D1),
];

const BLACK_HOME: [(Piece, Square); 7] = [
    (Piece::Rook, Square::A8),
    (Piece::Rook, Square::H8),
    (Piece::Knight, Square::B8),
    (Piece::Knight, Square::G8),
    (Piece::Bishop, Square::C8),
    (Piece::Bishop, Square::F8),
    (Piece::Queen, Square::D8),
];

pub fn piece_value(piece: Piece) -> i32 {
    PIECE_VALUES[piece as usize]
}

/// Per-term multipliers. Negative weights turn a term into a penalty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
    pub material: i32,
    pub mobility: i32,
    pub center_control: i32,
    pub pawn_shield: i32,
    pub threats_against_self: i32,
    pub threats_against_opponent: i32,
    pub piece_activation: i32,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            material: 5,
            mobility: 2,
            center_control: 2,
            pawn_shield: 1,
            threats_against_self: -4,
            threats_against_opponent: 4,
            piece_activation: -3,
        }
    }
}

impl Weights {
    pub fn combine(&self, terms: &Terms) -> i32 {
        self.material * terms.material
            + self.mobility * terms.mobility
            + self.center_control * terms.center_control
            + self.pawn_shield * terms.pawn_shield
            + self.threats_against_self * terms.threats_against_self
            + self.threats_against_opponent * terms.threats_against_opponent
            + self.piece_activation * terms.piece_activation
    }
}

/// Switches between the classic heuristics and their corrected forms.
/// Both default to the classic behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicOptions {
    /// Count only own pawns on king-shield squares instead of any pawn.
    pub shield_own_pawns_only: bool,
    /// Measure threats against the opponent as attacks on the opponent's
    /// pieces. By default the agent's own pieces are looked for.
    pub symmetric_threats: bool,
}

/// Unweighted sub-heuristic values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Terms {
    /// Own material minus opponent material.
    pub material: i32,
    pub mobility: i32,
    pub center_control: i32,
    pub pawn_shield: i32,
    pub threats_against_self: i32,
    pub threats_against_opponent: i32,
    pub piece_activation: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Evaluator {
    pub weights: Weights,
    pub options: HeuristicOptions,
}

impl Evaluator {
    pub fn new(weights: Weights, options: HeuristicOptions) -> Self {
        Self { weights, options }
    }

    /// Weighted score of `pos` for `own`.
    ///
    /// Mobility and threats hand the turn over temporarily; `pos` is the same
    /// on return.
    pub fn evaluate(&self, pos: &mut Position, own: Color) -> Score {
        let terms = self.terms(pos, own);
        Score::Eval(self.weights.combine(&terms))
    }

    pub fn terms(&self, pos: &mut Position, own: Color) -> Terms {
        let opponent = !own;
        let (self_target, opponent_target) = if self.options.symmetric_threats {
            (own, opponent)
        } else {
            (own, own)
        };
        Terms {
            material: material(pos, own) - material(pos, opponent),
            mobility: mobility(pos, own),
            center_control: center_control(pos, own),
            pawn_shield: pawn_shield(pos, own, self.options.shield_own_pawns_only),
            threats_against_self: threats(pos, own, self_target),
            threats_against_opponent: threats(pos, opponent, opponent_target),
            piece_activation: piece_activation(pos, own),
        }
    }
}

/// Evaluates with the default weights and options.
pub fn evaluate(pos: &mut Position, own: Color) -> Score {
    Evaluator::default().evaluate(pos, own)
}

/// Total material of `color`, king excluded.
pub fn material(pos: &Position, color: Color) -> i32 {
    Piece::ALL
        .iter()
        .map(|&piece| pos.pieces(color, piece).len() as i32 * piece_value(piece))
        .sum()
}

/// Legal moves `own` would have if it were its turn.
pub fn mobility(pos: &mut Position, own: Color) -> i32 {
    if pos.side_to_move() == own {
        return legal_move_count(pos) as i32;
    }
    if let Some(passed) = pos.pass_turn() {
        return legal_move_count(&passed) as i32;
    }
    // Opponent is in check, so the turn can't be handed over.
    pseudo_moves(pos, own).len() as i32
}

/// Central reach of the side to move plus central occupancy by `own`.
pub fn center_control(pos: &Position, own: Color) -> i32 {
    let moves = legal_moves(pos);
    ring_control(pos, own, &moves, &CENTER, 2) + ring_control(pos, own, &moves, &OUTER_CENTER, 1)
}

/// `move_weight` per move landing in `ring`, plus material value (and the
/// pawn bonus) of every own piece standing in it.
fn ring_control(pos: &Position, own: Color, moves: &[Move], ring: &[Square], move_weight: i32) -> i32 {
    let reach = moves.iter().filter(|mv| ring.contains(&mv.to)).count() as i32 * move_weight;
    let occupancy: i32 = ring
        .iter()
        .filter_map(|&sq| pos.piece_at(sq))
        .filter(|&(_, color)| color == own)
        .map(|(piece, _)| {
            let bonus = if piece == Piece::Pawn {
                CENTER_PAWN_BONUS
            } else {
                0
            };
            piece_value(piece) + bonus
        })
        .sum();
    reach + occupancy
}

/// Pawns on the shield squares of an own king sitting in a corner.
pub fn pawn_shield(pos: &Position, own: Color, own_pawns_only: bool) -> i32 {
    let mut res = 0;
    for king_sq in pos.pieces(own, Piece::King) {
        let Some((_, shield)) = PAWN_SHIELDS.iter().find(|(corner, _)| *corner == king_sq) else {
            continue;
        };
        for &sq in shield {
            if let Some((Piece::Pawn, color)) = pos.piece_at(sq) {
                if !own_pawns_only || color == own {
                    res += 1;
                }
            }
        }
    }
    res
}

/// Value of `target`'s pieces that `player`'s opponent could capture next.
///
/// If `player` is to move the turn is passed first so the scanned moves
/// belong to the opponent.
pub fn threats(pos: &mut Position, player: Color, target: Color) -> i32 {
    let moves = opponent_moves(pos, player);
    moves
        .iter()
        .map(|mv| match pos.piece_at(mv.to) {
            Some((Piece::King, color)) if color == target => KING_THREAT_VALUE,
            Some((piece, color)) if color == target => piece_value(piece),
            _ => 0,
        })
        .sum()
}

fn opponent_moves(pos: &mut Position, player: Color) -> Vec<Move> {
    if pos.side_to_move() != player {
        return legal_moves(pos);
    }
    if let Some(passed) = pos.pass_turn() {
        return legal_moves(&passed);
    }
    pseudo_moves(pos, !player)
}

/// Material still sitting on its home square (rooks, knights, bishops,
/// queen).
pub fn piece_activation(pos: &Position, own: Color) -> i32 {
    let home = match own {
        Color::White => &WHITE_HOME,
        Color::Black => &BLACK_HOME,
    };
    home.iter()
        .filter(|&&(piece, sq)| pos.piece_at(sq) == Some((piece, own)))
        .map(|&(piece, _)| piece_value(piece))
        .sum()
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
