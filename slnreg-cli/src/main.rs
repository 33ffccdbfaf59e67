//! slnreg — add projects to a solution registry.
//!
//! # Usage
//!
//! ```text
//! slnreg new [<dir>] [--name <name>]
//! slnreg add <solution> <project-or-dir>... [--in-root | --solution-folder <path>]
//! slnreg list <solution> [--json]
//! ```
//!
//! `<solution>` is a `*.sln.yaml` file or a directory holding exactly one.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{add::AddArgs, list::ListArgs, new::NewArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "slnreg",
    version,
    about = "Register projects in a solution, grouped into solution folders",
    long_about = None,
)]
struct Cli {
    /// Log decisions (folder inference, skipped projects) to stderr.
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create an empty solution registry.
    New(NewArgs),

    /// Add one or more projects to a solution.
    Add(AddArgs),

    /// List the projects in a solution.
    List(ListArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Commands::New(args) => args.run(),
        Commands::Add(args) => args.run(),
        Commands::List(args) => args.run(),
    }
}

/// `RUST_LOG` wins; otherwise `warn`, or `debug` with `--verbose`.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
