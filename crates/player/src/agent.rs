//! The playing agent: one game's position plus the book and search it
//! consults for its own moves.

use chess_core::{
    legal_move_count, parse_uci_move, Color, Engine, Move, Outcome, Position, RulesError, Score,
};
use minimax_engine::MinimaxEngine;
use opening_book::{NoBook, OpeningBook};
use tracing::{debug, info, warn};

use crate::config::PlayerConfig;

#[derive(thiserror::Error, Debug)]
pub enum AgentError {
    #[error(transparent)]
    Rules(#[from] RulesError),
    #[error("game is over: {0:?}")]
    GameOver(Outcome),
    #[error("not our turn: {to_move:?} to move, we play {own:?}")]
    NotOurTurn { own: Color, to_move: Color },
    #[error("search returned no move")]
    NoMove,
}

/// Where a chosen move came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveSource {
    Book,
    Search,
}

/// A move the agent has played, with how it was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub mv: Move,
    pub source: MoveSource,
    /// Search value, `None` for book moves
    pub score: Option<Score>,
    pub nodes: u64,
}

pub struct Agent {
    own: Color,
    depth: u8,
    position: Position,
    book: Box<dyn OpeningBook>,
    engine: Box<dyn Engine>,
}

impl Agent {
    /// A fresh game with the agent playing `own`.
    pub fn new(own: Color, depth: u8, book: Box<dyn OpeningBook>, engine: Box<dyn Engine>) -> Self {
        Self {
            own,
            depth,
            position: Position::startpos(),
            book,
            engine,
        }
    }

    /// Build the agent described by `config`. The book is loaded once here;
    /// a missing or broken book file leaves the agent searching every move.
    pub fn from_config(config: &PlayerConfig) -> Self {
        let book: Box<dyn OpeningBook> = match &config.book {
            Some(path) => match opening_book::open(path, config.book_seed) {
                Ok(book) => {
                    info!(path = %path.display(), positions = book.len(), "opening book ready");
                    Box::new(book)
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "opening book unavailable, searching only");
                    Box::new(NoBook)
                }
            },
            None => Box::new(NoBook),
        };
        let engine = MinimaxEngine::with_evaluator(config.evaluator(), config.draw_scoring);

        Self::new(Color::Black, config.depth, book, Box::new(engine))
    }

    pub fn own_color(&self) -> Color {
        self.own
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Start a new game from the initial position.
    pub fn reset(&mut self, own: Color) {
        self.own = own;
        self.position = Position::startpos();
        self.engine.new_game();
        debug!(?own, engine = self.engine.name(), "new game");
    }

    /// Switch sides without touching the position.
    pub fn set_color(&mut self, own: Color) {
        self.own = own;
    }

    /// Continue from an arbitrary position.
    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// Apply the opponent's move. A move that does not parse or is not legal
    /// leaves the position untouched and is returned as an error.
    pub fn observe(&mut self, mv: &str) -> Result<(), AgentError> {
        let mv = parse_uci_move(mv)?;
        self.position.play(mv)?;
        debug!(%mv, fen = %self.position.fen(), "opponent moved");
        Ok(())
    }

    /// Pick our move, play it on the retained position and return it.
    ///
    /// The book is asked first; any book failure is logged and treated as a
    /// miss. Otherwise the engine searches to the configured depth.
    pub fn choose_move(&mut self) -> Result<Decision, AgentError> {
        if let Some(outcome) = self.position.outcome() {
            if legal_move_count(&self.position) == 0 {
                return Err(AgentError::GameOver(outcome));
            }
            debug!(?outcome, "position is decided, moving anyway");
        }

        let to_move = self.position.side_to_move();
        if to_move != self.own {
            return Err(AgentError::NotOurTurn {
                own: self.own,
                to_move,
            });
        }

        let decision = match self.book_move() {
            Some(mv) => Decision {
                mv,
                source: MoveSource::Book,
                score: None,
                nodes: 0,
            },
            None => {
                let result = self.engine.search(&self.position, self.depth);
                let mv = result.best_move.ok_or(AgentError::NoMove)?;
                Decision {
                    mv,
                    source: MoveSource::Search,
                    score: Some(result.score),
                    nodes: result.nodes,
                }
            }
        };

        self.position.play(decision.mv)?;
        info!(
            mv = %decision.mv,
            source = ?decision.source,
            score = ?decision.score,
            nodes = decision.nodes,
            "our move"
        );

        Ok(decision)
    }

    fn book_move(&mut self) -> Option<Move> {
        match self.book.query(&self.position) {
            Ok(Some(mv)) => {
                debug!(%mv, "book hit");
                Some(mv)
            }
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "book lookup failed, searching instead");
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "agent_tests.rs"]
mod agent_tests;
