//! Toolshelf command-line front end.
//!
//! Drives the tool directory against a SQLite-backed durable store, the
//! same state a browser context would keep in local storage.
//!
//! Usage:
//!   toolshelf --catalog tools.json search json
//!   toolshelf --catalog tools.json favorite json-formatter
//!   toolshelf --catalog tools.json list --favorites

use anyhow::Result;
use clap::Parser;
use toolshelf_cli::{open_directory, run, Args};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose { Level::DEBUG } else { Level::WARN };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .compact()
        .init();

    let mut directory = open_directory(&args)?;
    let mut stdout = std::io::stdout().lock();
    run(&mut directory, args.command, &mut stdout).await
}
