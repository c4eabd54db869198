//! Opening book
//!
//! Looks up precomputed moves for known positions before the engine has to
//! search. Two on-disk formats are understood:
//!
//! - JSON (`*.json`): explicit entries keyed by FEN with weighted moves
//! - move lines (any other extension): one game prefix per line, e.g.
//!   `e2e4 e7e5 g1f3`; every position along the line gets its next move
//!
//! Callers treat every error as "no book move" and fall back to search.

mod weighted;

use std::path::Path;

use chess_core::{Move, Position};

pub use weighted::{BookEntry, BookFile, BookMove, WeightedBook};

#[cfg(test)]
mod lib_tests;

#[derive(thiserror::Error, Debug)]
pub enum BookError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed book: {0}")]
    Json(#[from] serde_json::Error),
    #[error("line {line}: {reason}")]
    Line { line: usize, reason: String },
    #[error("entry {key}: {reason}")]
    Entry { key: String, reason: String },
    #[error("book move {mv} is not legal in {key}")]
    IllegalMove { mv: String, key: String },
}

/// A source of opening moves.
pub trait OpeningBook {
    /// At most one move for `pos`. `Ok(None)` when the position is unknown.
    fn query(&mut self, pos: &Position) -> Result<Option<Move>, BookError>;

    /// Number of positions the book knows.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A book that knows nothing; every query misses.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBook;

impl OpeningBook for NoBook {
    fn query(&mut self, _pos: &Position) -> Result<Option<Move>, BookError> {
        Ok(None)
    }

    fn len(&self) -> usize {
        0
    }
}

/// Load a book file, picking the format from the extension.
pub fn open(path: &Path, seed: Option<u64>) -> Result<WeightedBook, BookError> {
    let contents = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let book = if is_json {
        WeightedBook::from_json(&contents)?
    } else {
        WeightedBook::from_lines(&contents)?
    };
    tracing::debug!(path = %path.display(), positions = book.len(), "opening book loaded");

    Ok(match seed {
        Some(seed) => book.with_seed(seed),
        None => book,
    })
}
