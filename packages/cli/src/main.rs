mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    check, extract, init, migrate, new_block, CheckArgs, Context, ExtractArgs, InitArgs,
    MigrateArgs, NewBlockArgs,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Folio CLI - maintain the block-based post store
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Store file (overrides config)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Log migration decisions
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a default config and an empty store
    Init(InitArgs),

    /// Rewrite legacy posts into canonical block form
    Migrate(MigrateArgs),

    /// Print the plain text of a post
    Extract(ExtractArgs),

    /// Report block tree invariant violations
    Check(CheckArgs),

    /// Print a new default block as JSON
    NewBlock(NewBlockArgs),
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let context = Context::new(cwd, cli.store)?;

    match cli.command {
        Command::Init(args) => init(args, &context),
        Command::Migrate(args) => migrate(args, &context),
        Command::Extract(args) => extract(args, &context),
        Command::Check(args) => check(args, &context),
        Command::NewBlock(args) => new_block(args, &context),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
