//! Althea CLI
//!
//! - `althea` / `althea shell`: interactive shell
//! - `althea profiles | analyze | define | chat`: one-shot modes
//! - `althea search-url <TERM>`: offline
//!
//! Runs on a single-threaded runtime; every request suspends only at its
//! await points.

use anyhow::Context;
use clap::Parser;

use althea::cli::{init_logging, run_cli_mode, Args};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let guard = init_logging(args.log_dir.as_deref(), args.json_logs)
        .context("failed to set up logging")?;

    let exit_code = run_cli_mode(args).await;

    // Flush file logs before exiting
    drop(guard);
    std::process::exit(exit_code);
}
