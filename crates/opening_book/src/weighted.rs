//! In-memory book with weighted random choice among candidate moves.

use std::collections::HashMap;

use chess_core::{Move, Position};
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::{BookError, OpeningBook};

/// JSON layout of a book file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookFile {
    pub entries: Vec<BookEntry>,
}

/// Candidate moves for one position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookEntry {
    /// Full FEN; the move counters are ignored when matching.
    pub fen: String,
    pub moves: Vec<BookMove>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookMove {
    #[serde(rename = "move")]
    pub mv: String,
    #[serde(default = "default_weight")]
    pub weight: u32,
}

fn default_weight() -> u32 {
    1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Candidate {
    mv: Move,
    weight: u32,
}

/// Book keyed by [`Position::book_key`].
#[derive(Debug, Clone)]
pub struct WeightedBook {
    entries: HashMap<String, Vec<Candidate>>,
    rng: StdRng,
}

impl Default for WeightedBook {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            rng: StdRng::from_entropy(),
        }
    }
}

impl WeightedBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reseed the choice among weighted candidates, making queries
    /// reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Add `weight` to `mv` in `pos`, creating the entry if needed.
    pub fn insert(&mut self, pos: &Position, mv: Move, weight: u32) {
        let candidates = self.entries.entry(pos.book_key()).or_default();
        match candidates.iter_mut().find(|c| c.mv == mv) {
            Some(c) => c.weight = c.weight.saturating_add(weight),
            None => candidates.push(Candidate { mv, weight }),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, BookError> {
        let file: BookFile = serde_json::from_str(json)?;
        let mut book = Self::new();
        for entry in file.entries {
            let pos = Position::from_fen(&entry.fen).map_err(|e| BookError::Entry {
                key: entry.fen.clone(),
                reason: e.to_string(),
            })?;
            for m in entry.moves {
                let mv: Move = m.mv.parse().map_err(|e: chess_core::RulesError| BookError::Entry {
                    key: entry.fen.clone(),
                    reason: e.to_string(),
                })?;
                book.insert(&pos, mv, m.weight);
            }
        }
        Ok(book)
    }

    /// Parse move lines: one line of coordinate moves from the start
    /// position per row, `#` starts a comment.
    pub fn from_lines(text: &str) -> Result<Self, BookError> {
        let mut book = Self::new();
        for (idx, raw_line) in text.lines().enumerate() {
            let line = raw_line.split('#').next().unwrap_or("");
            let mut pos = Position::startpos();
            for token in line.split_whitespace() {
                let err = |reason: String| BookError::Line {
                    line: idx + 1,
                    reason,
                };
                let mv: Move = token.parse().map_err(|e: chess_core::RulesError| err(e.to_string()))?;
                let next = pos.apply_move(mv).map_err(|e| err(e.to_string()))?;
                book.insert(&pos, mv, 1);
                pos = next;
            }
        }
        Ok(book)
    }

    /// Back to the JSON layout, entries sorted by key.
    pub fn to_file(&self) -> BookFile {
        let mut keys: Vec<&String> = self.entries.keys().collect();
        keys.sort();
        BookFile {
            entries: keys
                .into_iter()
                .map(|key| BookEntry {
                    fen: format!("{key} 0 1"),
                    moves: self.entries[key]
                        .iter()
                        .map(|c| BookMove {
                            mv: c.mv.to_string(),
                            weight: c.weight,
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    /// Candidate moves and weights stored for `pos`.
    pub fn candidates(&self, pos: &Position) -> Vec<(Move, u32)> {
        self.entries
            .get(&pos.book_key())
            .map(|cs| cs.iter().map(|c| (c.mv, c.weight)).collect())
            .unwrap_or_default()
    }
}

impl OpeningBook for WeightedBook {
    fn query(&mut self, pos: &Position) -> Result<Option<Move>, BookError> {
        let key = pos.book_key();
        let Some(candidates) = self.entries.get(&key) else {
            return Ok(None);
        };

        let dist = WeightedIndex::new(candidates.iter().map(|c| c.weight)).map_err(|e| {
            BookError::Entry {
                key: key.clone(),
                reason: e.to_string(),
            }
        })?;
        let mv = candidates[dist.sample(&mut self.rng)].mv;

        if !pos.is_legal(mv) {
            return Err(BookError::IllegalMove {
                mv: mv.to_string(),
                key,
            });
        }
        Ok(Some(mv))
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
