//! CLI entry point for dirlist

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use dirlist::{WalkerConfig, list_directory, write_listing_file};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "dirlist")]
#[command(about = "List every entry under a directory, grouped by depth")]
#[command(version)]
struct Args {
    /// Directory to list
    directory_path: PathBuf,

    /// File to write the listing to (truncated if it exists)
    output_file: PathBuf,
}

/// Log to stderr, filtered by RUST_LOG and defaulting to warnings.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .compact()
        .init();
}

fn main() {
    init_logging();

    let args = Args::try_parse().unwrap_or_else(|e| match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
        _ => {
            println!("{}", Args::command().render_usage());
            process::exit(1);
        }
    });

    let root = std::path::absolute(&args.directory_path).unwrap_or_else(|e| {
        eprintln!(
            "dirlist: cannot resolve '{}': {}",
            args.directory_path.display(),
            e
        );
        process::exit(1);
    });

    let outcome = list_directory(&root, &WalkerConfig::default()).unwrap_or_else(|e| {
        eprintln!("dirlist: {}", e);
        process::exit(1);
    });

    if let Err(e) = write_listing_file(&outcome.entries, &args.output_file) {
        eprintln!("dirlist: {}", e);
        process::exit(1);
    }
}
