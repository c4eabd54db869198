//! Player binary
//!
//! Speaks the referee protocol on stdin/stdout. Logs go to stderr.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use player::{run, Agent, PlayerConfig, DEFAULT_CONFIG_FILE};
use tracing_subscriber::EnvFilter;

fn print_usage() {
    eprintln!("Turn-protocol chess player");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  player [--config FILE] [--book FILE] [--depth D]");
    eprintln!();
    eprintln!("Without --config, {DEFAULT_CONFIG_FILE} is read when present.");
    eprintln!("RUST_LOG overrides the configured log filter.");
}

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    book: Option<PathBuf>,
    depth: Option<u8>,
}

fn parse_args(args: &[String]) -> anyhow::Result<Option<Args>> {
    let mut parsed = Args::default();

    let mut i = 0;
    while i < args.len() {
        let value = |i: usize| {
            args.get(i + 1)
                .with_context(|| format!("{} needs a value", args[i]))
        };
        match args[i].as_str() {
            "--config" | "-c" => {
                parsed.config = Some(PathBuf::from(value(i)?));
                i += 1;
            }
            "--book" | "-b" => {
                parsed.book = Some(PathBuf::from(value(i)?));
                i += 1;
            }
            "--depth" | "-d" => {
                let depth = value(i)?;
                parsed.depth = Some(depth.parse().with_context(|| format!("bad depth {depth}"))?);
                i += 1;
            }
            "--help" | "-h" => return Ok(None),
            other => bail!("unknown argument {other}"),
        }
        i += 1;
    }

    Ok(Some(parsed))
}

fn load_config(args: &Args) -> anyhow::Result<PlayerConfig> {
    let mut config = match &args.config {
        Some(path) => PlayerConfig::load(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            PlayerConfig::load(Path::new(DEFAULT_CONFIG_FILE))?
        }
        None => PlayerConfig::default(),
    };

    if let Some(book) = &args.book {
        config.book = Some(book.clone());
    }
    if let Some(depth) = args.depth {
        config.depth = depth;
    }
    config.validate()?;

    Ok(config)
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let Some(args) = parse_args(&args)? else {
        print_usage();
        return Ok(());
    };

    let config = load_config(&args)?;
    init_tracing(&config.log_filter);
    tracing::info!(depth = config.depth, book = ?config.book, "player starting");

    let mut agent = Agent::from_config(&config);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    run(&mut agent, stdin.lock(), &mut stdout)
}
