//! Turn-protocol chess player
//!
//! Plays games against a referee over a line protocol on stdin/stdout,
//! taking moves from an opening book while it has them and from a
//! fixed-depth alpha-beta search otherwise.

pub mod agent;
pub mod config;
pub mod protocol;

pub use agent::{Agent, AgentError, Decision, MoveSource};
pub use config::{ConfigError, PlayerConfig, DEFAULT_CONFIG_FILE, MAX_DEPTH};
pub use protocol::{run, Command, ProtocolError, Reply};
