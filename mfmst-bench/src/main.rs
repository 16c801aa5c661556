//! Command-line driver and benchmarks for the min-max spanning tree solver.

use clap::{Parser, Subcommand};

mod compare;
mod generate;
mod report;
mod solve;
mod strategy;

#[derive(Parser)]
#[command(name = "mfmst-bench")]
#[command(version)]
#[command(about = "Min-max two-weight spanning tree solver", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    solve: solve::SolveArgs,

    /// Print solver progress (equivalent to RUST_LOG=info)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a random connected instance in .uwg form
    Generate(generate::GenerateArgs),

    /// Run every strategy on random instances and compare
    Compare(compare::CompareArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();

    match cli.command {
        Some(Commands::Generate(args)) => generate::run(&args),
        Some(Commands::Compare(args)) => compare::run(&args, cli.verbose),
        None => solve::run(&cli.solve, cli.verbose),
    }
}
