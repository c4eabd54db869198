//! Minimax Chess Engine
//!
//! Fixed-depth alpha-beta search over a hand-weighted linear evaluation.
//! No iterative deepening, transposition table or quiescence: every decision
//! is a plain depth-bounded tree walk.

pub mod eval;
pub mod search;

use chess_core::{Engine, Position, Score, SearchResult};
use tracing::debug;

pub use eval::{evaluate, Evaluator, HeuristicOptions, Terms, Weights};
pub use search::{pick_best_move, DrawScoring, Role, Searcher, DEFAULT_DEPTH};

/// Chess engine using minimax with alpha-beta pruning.
///
/// This engine uses:
/// - Minimax search with alpha-beta pruning, maximizing for the side to move
/// - Seven weighted heuristic terms (material, mobility, center control,
///   pawn shield, threats both ways, piece activation)
/// - Tagged win/loss scores for decided games
#[derive(Debug, Clone, Default)]
pub struct MinimaxEngine {
    evaluator: Evaluator,
    draw_scoring: DrawScoring,
    /// Node counter for statistics
    nodes: u64,
}

impl MinimaxEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_evaluator(evaluator: Evaluator, draw_scoring: DrawScoring) -> Self {
        Self {
            evaluator,
            draw_scoring,
            nodes: 0,
        }
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }
}

impl Engine for MinimaxEngine {
    fn search(&mut self, pos: &Position, depth: u8) -> SearchResult {
        self.nodes = 0;
        let own = pos.side_to_move();

        let best = pick_best_move(
            pos,
            own,
            &self.evaluator,
            depth,
            self.draw_scoring,
            &mut self.nodes,
        );
        debug!(nodes = self.nodes, depth, "search finished");

        SearchResult {
            best_move: best.map(|(mv, _)| mv),
            score: best.map(|(_, s)| s).unwrap_or(Score::DRAW),
            depth,
            nodes: self.nodes,
        }
    }

    fn name(&self) -> &str {
        "Minimax v1.0"
    }

    fn new_game(&mut self) {
        self.nodes = 0;
    }
}
