pub mod board;
pub mod movegen;
pub mod probe;
pub mod score;
pub mod types;
pub mod uci;

// Re-export core game logic (not engine-specific)
pub use board::*;
pub use movegen::{legal_move_count, legal_moves, pseudo_moves};
pub use probe::PassedTurn;
pub use score::*;
pub use types::*;
pub use uci::*;

// =============================================================================
// Engine trait: implemented by move-choosing search engines
// =============================================================================

/// Result of a search operation
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The best move found (None if no legal moves)
    pub best_move: Option<Move>,
    /// Value of the best move from the side-to-move's perspective
    pub score: Score,
    /// Search depth in plies
    pub depth: u8,
    /// Number of nodes searched (for stats)
    pub nodes: u64,
}

/// Trait that move-choosing engines implement.
///
/// The agent only talks to its search through this trait, so tests and
/// alternative searches can be dropped in.
pub trait Engine: Send {
    /// Search the position to a fixed depth, choosing a move for the side to
    /// move.
    ///
    /// # Arguments
    /// * `pos` - The current position to analyze
    /// * `depth` - Depth limit in plies
    ///
    /// # Returns
    /// SearchResult containing best move, score, and statistics
    fn search(&mut self, pos: &Position, depth: u8) -> SearchResult;

    /// Returns the engine's name for logging
    fn name(&self) -> &str;

    /// Reset internal state for a new game
    fn new_game(&mut self) {}
}
