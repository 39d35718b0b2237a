//! The `addrspace` binary: assembles an address space from program images and inspects it.

use anyhow::Result;
use clap::{ArgAction, Parser};
use subcommands::{AddrspaceSubcommand, AddrspaceSubcommandDispatcher};
use tracing::Level;

mod subcommands;

/// Command line arguments for `addrspace`
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Verbosity level (0-2)
    #[arg(long, short, action = ArgAction::Count)]
    v: u8,

    /// The subcommand to run
    #[command(subcommand)]
    subcommand: AddrspaceSubcommand,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing_subscriber(args.v)?;
    args.subcommand.dispatch()
}

/// Initializes the tracing subscriber
///
/// ### Takes
/// - `verbosity_level`: The verbosity level (0-2)
///
/// ### Returns
/// - `Ok(())` if the subscriber was successfully initialized.
/// - `Err(_)` if a global subscriber was already installed.
fn init_tracing_subscriber(verbosity_level: u8) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(match verbosity_level {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        })
        .finish();
    tracing::subscriber::set_global_default(subscriber).map_err(|e| anyhow::anyhow!(e))
}
