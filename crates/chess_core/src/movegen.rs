use cozy_chess::{
    get_bishop_moves, get_king_moves, get_knight_moves, get_pawn_attacks, get_pawn_quiets,
    get_rook_moves, Board,
};

use crate::{board::Position, types::*, uci::Move};

/// Translate the rules engine's move into coordinate form.
/// cozy-chess encodes castling as "king takes own rook"; we report the
/// king's two-square step instead.
pub(crate) fn from_raw(board: &Board, raw: cozy_chess::Move) -> Move {
    let castles = board.piece_on(raw.from) == Some(Piece::King)
        && board.colors(board.side_to_move()).has(raw.to);
    if castles {
        let file = if (raw.to.file() as usize) > (raw.from.file() as usize) {
            File::G
        } else {
            File::C
        };
        return Move::new(raw.from, Square::new(file, raw.from.rank()));
    }
    Move {
        from: raw.from,
        to: raw.to,
        promo: raw.promotion,
    }
}

/// Legal moves paired with the engine's own encoding, in generation order.
pub(crate) fn legal_pairs(board: &Board) -> Vec<(Move, cozy_chess::Move)> {
    let mut out = Vec::with_capacity(64);
    board.generate_moves(|moves| {
        for raw in moves {
            out.push((from_raw(board, raw), raw));
        }
        false
    });
    out
}

pub(crate) fn has_legal_moves(board: &Board) -> bool {
    let mut any = false;
    board.generate_moves(|_| {
        any = true;
        true
    });
    any
}

/// Generate all legal moves for the side to move.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    legal_pairs(pos.board()).into_iter().map(|(mv, _)| mv).collect()
}

/// Number of legal moves for the side to move.
pub fn legal_move_count(pos: &Position) -> usize {
    let mut count = 0;
    pos.board().generate_moves(|moves| {
        count += moves.len();
        false
    });
    count
}

/// Attack-table moves for `color`, whether or not it is that side's turn.
///
/// Pins, checks, castling and en passant are ignored and a promotion counts
/// once. Used in place of a passed turn when the rules engine refuses one.
pub fn pseudo_moves(pos: &Position, color: Color) -> Vec<Move> {
    let board = pos.board();
    let occupied = board.occupied();
    let own = board.colors(color);
    let enemy = board.colors(!color);

    let mut out = Vec::with_capacity(64);
    for from in own {
        let piece = match board.piece_on(from) {
            Some(p) => p,
            None => continue,
        };
        let targets = match piece {
            Piece::Pawn => {
                (get_pawn_attacks(from, color) & enemy) | get_pawn_quiets(from, color, occupied)
            }
            Piece::Knight => get_knight_moves(from) & !own,
            Piece::Bishop => get_bishop_moves(from, occupied) & !own,
            Piece::Rook => get_rook_moves(from, occupied) & !own,
            Piece::Queen => {
                (get_bishop_moves(from, occupied) | get_rook_moves(from, occupied)) & !own
            }
            Piece::King => get_king_moves(from) & !own,
        };
        for to in targets {
            out.push(Move::new(from, to));
        }
    }
    out
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
