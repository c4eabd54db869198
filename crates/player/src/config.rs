//! Player configuration, read from TOML.

use std::path::{Path, PathBuf};

use minimax_engine::{DrawScoring, Evaluator, HeuristicOptions, Weights, DEFAULT_DEPTH};
use serde::{Deserialize, Serialize};

/// Deepest search the player accepts.
pub const MAX_DEPTH: u8 = 6;

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "player.toml";

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("depth {0} is out of range (0..={MAX_DEPTH})")]
    Depth(u8),
}

/// Everything the player binary can be told from its config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayerConfig {
    /// Search depth in plies below each root move
    pub depth: u8,
    /// Opening book file (`.json` or move lines); none means search only
    pub book: Option<PathBuf>,
    /// Seed for the book's weighted choice
    pub book_seed: Option<u64>,
    /// Log filter used when `RUST_LOG` is not set
    pub log_filter: String,
    pub draw_scoring: DrawScoring,
    pub weights: Weights,
    pub heuristics: HeuristicOptions,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            book: None,
            book_seed: None,
            log_filter: "info".to_string(),
            draw_scoring: DrawScoring::default(),
            weights: Weights::default(),
            heuristics: HeuristicOptions::default(),
        }
    }
}

impl PlayerConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: PlayerConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.depth > MAX_DEPTH {
            return Err(ConfigError::Depth(self.depth));
        }
        Ok(())
    }

    pub fn evaluator(&self) -> Evaluator {
        Evaluator::new(self.weights, self.heuristics)
    }
}
