//! Fixed-depth minimax with alpha-beta pruning

use chess_core::{Color, Move, Outcome, Position, Score};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::eval::Evaluator;

/// Depth limit used when nothing else is configured.
pub const DEFAULT_DEPTH: u8 = 2;

/// Which side a search node is choosing for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// The engine's own turn: take the highest child value.
    Maximizer,
    /// The opponent's turn: take the lowest child value.
    Minimizer,
}

impl Role {
    pub fn next(self) -> Role {
        match self {
            Role::Maximizer => Role::Minimizer,
            Role::Minimizer => Role::Maximizer,
        }
    }
}

/// How decided draws inside the tree are scored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawScoring {
    /// A drawn position is worth exactly zero.
    #[default]
    Neutral,
    /// Draws are not terminal: the node is expanded like any other, so a
    /// stalemate hands back the untouched accumulator (`Win` for a
    /// minimizer, `Loss` for a maximizer).
    Legacy,
}

/// Recursive alpha-beta state for one root decision.
pub struct Searcher<'a> {
    evaluator: &'a Evaluator,
    own: Color,
    max_depth: u8,
    draw_scoring: DrawScoring,
    /// Nodes visited so far
    pub nodes: u64,
}

impl<'a> Searcher<'a> {
    pub fn new(evaluator: &'a Evaluator, own: Color, max_depth: u8, draw_scoring: DrawScoring) -> Self {
        Self {
            evaluator,
            own,
            max_depth,
            draw_scoring,
            nodes: 0,
        }
    }

    /// Value of `pos` for the engine's color, searched from `depth` down to
    /// the depth limit inside the `(alpha, beta)` window.
    pub fn value(
        &mut self,
        pos: &mut Position,
        mut alpha: Score,
        mut beta: Score,
        depth: u8,
        role: Role,
    ) -> Score {
        self.nodes += 1;

        if depth >= self.max_depth {
            return self.evaluator.evaluate(pos, self.own);
        }

        match pos.outcome() {
            Some(Outcome::Winner(color)) if color == self.own => return Score::Win,
            Some(Outcome::Winner(_)) => return Score::Loss,
            Some(Outcome::Draw(_)) if self.draw_scoring == DrawScoring::Neutral => {
                return Score::DRAW;
            }
            _ => {}
        }

        let mut value = match role {
            Role::Maximizer => Score::Loss,
            Role::Minimizer => Score::Win,
        };

        for (_, mut child) in pos.successors() {
            let score = self.value(&mut child, alpha, beta, depth + 1, role.next());
            match role {
                Role::Minimizer => {
                    value = value.min(score);
                    if value <= alpha {
                        return value; // Alpha cutoff
                    }
                    beta = beta.min(value);
                }
                Role::Maximizer => {
                    value = value.max(score);
                    if value >= beta {
                        return value; // Beta cutoff
                    }
                    alpha = alpha.max(value);
                }
            }
        }

        value
    }
}

/// Searches every root move and returns the best with its value.
///
/// Each move hands the turn to the opponent, so its subtree starts with a
/// minimizing node at depth 0. Ties go to the move generated first.
///
/// # Arguments
/// * `pos` - The position to search
/// * `own` - Color whose evaluation is maximized
/// * `evaluator` - Evaluation weights and options
/// * `depth` - Depth limit in plies below the root moves
/// * `draw_scoring` - How drawn outcomes inside the tree are valued
/// * `nodes` - Counter for nodes searched (for statistics)
///
/// # Returns
/// `None` if the position has no legal moves
pub fn pick_best_move(
    pos: &Position,
    own: Color,
    evaluator: &Evaluator,
    depth: u8,
    draw_scoring: DrawScoring,
    nodes: &mut u64,
) -> Option<(Move, Score)> {
    let mut searcher = Searcher::new(evaluator, own, depth, draw_scoring);
    let mut best: Option<(Move, Score)> = None;

    for (mv, mut child) in pos.successors() {
        let score = searcher.value(&mut child, Score::Loss, Score::Win, 0, Role::Minimizer);
        trace!(%mv, %score, "root move");

        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((mv, score));
        }
    }

    *nodes += searcher.nodes;
    best
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
