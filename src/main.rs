use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use powertree::{BalanceMode, EngineConfig, Session, DEFAULT_CONTAINERS};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "powertree",
    about = "Run insert/extract commands against a registry of AVL priority containers"
)]
struct Cli {
    /// Command file (whitespace-separated tokens); reads stdin when omitted.
    #[arg(long, short)]
    input: Option<PathBuf>,

    /// Number of containers, addressed 1..=N.
    #[arg(long, default_value_t = DEFAULT_CONTAINERS)]
    containers: usize,

    /// Rebalancing strategy applied after each mutation.
    #[arg(long, value_enum, default_value_t = BalanceMode::Subtree)]
    balance: BalanceMode,

    /// Abort on an out-of-range container index instead of skipping it.
    #[arg(long)]
    strict: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = EngineConfig {
        containers: cli.containers,
        balance: cli.balance,
    };
    let mut session = Session::new(&config)
        .context("invalid engine configuration")?
        .strict(cli.strict);

    let input: Box<dyn BufRead> = match &cli.input {
        Some(path) => Box::new(BufReader::new(File::open(path).with_context(|| {
            format!("failed to open command file {}", path.display())
        })?)),
        None => Box::new(io::stdin().lock()),
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    session
        .run(input, &mut out)
        .context("command processing failed")?;

    Ok(())
}
