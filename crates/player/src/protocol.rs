//! Line-based referee protocol.
//!
//! Commands arrive on one line each:
//!
//! - `HEDID <t1> <t2> <move>`: the opponent played `<move>`; reply with ours
//! - `UGO`: we play white and move first
//! - `ONEMORE`: start a new game, we play black until told otherwise
//! - `BYE`: stop
//!
//! We answer `RDY` once ready for a game and `IDO <move>` for each move.
//! Logs go to stderr; stdout carries nothing but replies.

use std::fmt;
use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::Context;
use chess_core::{Color, Move};
use tracing::{debug, info, warn};

use crate::agent::{Agent, AgentError};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("unknown command {0:?}")]
    Unknown(String),
    #[error("{command} is missing its {what}")]
    Missing {
        command: &'static str,
        what: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// The opponent's move. The time fields are read but not used.
    HeDid {
        move_time: Option<f64>,
        game_time: Option<f64>,
        mv: String,
    },
    UGo,
    OneMore,
    Bye,
}

impl FromStr for Command {
    type Err = ProtocolError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts.as_slice() {
            ["HEDID", t1, t2, mv, ..] => Ok(Command::HeDid {
                move_time: t1.parse().ok(),
                game_time: t2.parse().ok(),
                mv: mv.to_string(),
            }),
            ["HEDID", ..] => Err(ProtocolError::Missing {
                command: "HEDID",
                what: "move",
            }),
            ["UGO", ..] => Ok(Command::UGo),
            ["ONEMORE", ..] => Ok(Command::OneMore),
            ["BYE", ..] => Ok(Command::Bye),
            _ => Err(ProtocolError::Unknown(line.trim().to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    Ready,
    IDo(Move),
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Reply::Ready => write!(f, "RDY"),
            Reply::IDo(mv) => write!(f, "IDO {mv}"),
        }
    }
}

fn send<W: Write>(output: &mut W, reply: Reply) -> anyhow::Result<()> {
    writeln!(output, "{reply}").context("writing reply")?;
    output.flush().context("flushing reply")?;
    Ok(())
}

/// Reply with our move, unless the game is already over.
fn respond<W: Write>(agent: &mut Agent, output: &mut W) -> anyhow::Result<()> {
    match agent.choose_move() {
        Ok(decision) => send(output, Reply::IDo(decision.mv)),
        Err(AgentError::GameOver(outcome)) => {
            info!(?outcome, "game over, waiting for the referee");
            Ok(())
        }
        Err(e) => Err(e).context("choosing a move"),
    }
}

/// Play games over `input`/`output` until `BYE` or end of input.
///
/// Unknown or malformed lines are logged and skipped. An opponent move that
/// is not legal ends the session with an error, as does a failure to write.
pub fn run<R: BufRead, W: Write>(agent: &mut Agent, input: R, output: &mut W) -> anyhow::Result<()> {
    agent.reset(Color::Black);
    send(output, Reply::Ready)?;

    for line in input.lines() {
        let line = line.context("reading command")?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                warn!(error = %e, "skipping line");
                continue;
            }
        };
        debug!(?command, "received");

        match command {
            Command::HeDid {
                move_time,
                game_time,
                mv,
            } => {
                debug!(?move_time, ?game_time, "time budget ignored");
                agent
                    .observe(&mv)
                    .with_context(|| format!("opponent move {mv}"))?;
                respond(agent, output)?;
            }
            Command::UGo => {
                agent.set_color(Color::White);
                respond(agent, output)?;
            }
            Command::OneMore => {
                agent.reset(Color::Black);
                send(output, Reply::Ready)?;
            }
            Command::Bye => {
                info!("referee said goodbye");
                break;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod protocol_tests;
