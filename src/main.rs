//! Removes comments from source files, in place.
//!
//! Every file under the given directory is classified by extension and run
//! through a handful of regular expressions. This is lexical only: a `//`
//! inside a string literal is treated as a comment like any other. Keep your
//! work committed before running it.
use anyhow::Result;
use clap::Parser;
use comment_stripper::utils::{self, RunOptions};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "comment-stripper")]
#[command(about = "Strip comments from JS/TS/JSON, Python, HTML/XML and CSS files in place")]
#[command(version)]
struct Cli {
    /// Directory to process
    #[arg(default_value = ".")]
    root: PathBuf,

    /// TOML file with `excluded_dirs` / `excluded_files` [default: built-in exclusions]
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Additional directory name to skip (repeatable)
    #[arg(long = "exclude-dir", value_name = "NAME")]
    exclude_dirs: Vec<String>,

    /// Additional file name to skip (repeatable)
    #[arg(long = "exclude-file", value_name = "NAME")]
    exclude_files: Vec<String>,

    /// Report what would be removed without writing any file
    #[arg(long)]
    dry_run: bool,

    /// Print the run summary as JSON at the end
    #[arg(long)]
    json: bool,

    /// Increase diagnostic output on stderr (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info,walkdir=warn"),
            2 => tracing_subscriber::EnvFilter::new("debug,walkdir=warn"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = RunOptions {
        root: cli.root,
        config: cli.config,
        exclude_dirs: cli.exclude_dirs,
        exclude_files: cli.exclude_files,
        dry_run: cli.dry_run,
        json: cli.json,
    };

    // Per-file failures are reported and counted but never change the exit
    // status; only a missing root or a broken config does.
    utils::strip_directory(&options)?;
    Ok(())
}
