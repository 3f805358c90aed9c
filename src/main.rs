//! # qqtable CLI
//!
//! Command-line interface for the qqtable library.

use std::error::Error;
use std::io::{self, BufRead, IsTerminal};
use std::path::Path;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use qqtable::QqTableError;
use qqtable::cli::Args;
use qqtable::config::Config;
use qqtable::core::TableEmitter;
use qqtable::parser::RecordParser;

fn main() {
    let args = <Args as ClapParser>::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {}", e);
        let mut source = e.source();
        while let Some(cause) = source {
            eprintln!("   caused by: {}", cause);
            source = cause.source();
        }
        if !args.no_pause {
            pause();
        }
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), QqTableError> {
    let total_start = Instant::now();
    let config = args.apply(Config::load(&args.config)?);

    println!("📦 qqtable v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", config.input.display());
    println!("💾 Output:  {}", config.output_dir.display());
    println!("📄 Names:   {}", config.output_file_name);
    println!();

    println!("⏳ Parsing...");
    let parse_start = Instant::now();
    let conversations = RecordParser::with_config(&config).parse(&config.input)?;
    let message_count: usize = conversations.iter().map(|c| c.len()).sum();
    println!(
        "   Found {} conversations, {} messages ({:.2}s)",
        conversations.len(),
        message_count,
        parse_start.elapsed().as_secs_f64()
    );

    println!("💾 Writing tables...");
    let write_start = Instant::now();
    let summary = TableEmitter::new(&config).emit(&conversations)?;
    println!("   Written in {:.2}s", write_start.elapsed().as_secs_f64());

    println!();
    println!("✅ Done! Tables saved to {}", config.output_dir.display());

    println!();
    println!("📊 Summary:");
    println!("   Tables:    {}", summary.files_written);
    println!("   Messages:  {}", summary.messages_written);
    if config.ignore_recent {
        println!("   Skipped recent contacts: {}", summary.skipped_recent);
    }
    if config.ignore_empty {
        println!("   Skipped empty messages:  {}", summary.skipped_empty);
    }
    println!("   Total time: {:.2}s", total_start.elapsed().as_secs_f64());

    if !args.no_open {
        open_output_dir(&config.output_dir);
    }

    Ok(())
}

/// Opens the output directory in the platform file browser.
fn open_output_dir(dir: &Path) {
    let dir = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
    if let Err(e) = open::that(&dir) {
        tracing::warn!(dir = %dir.display(), error = %e, "could not open file browser");
    }
}

/// Waits for Enter so the error stays readable in a console window.
fn pause() {
    let stdin = io::stdin();
    if !stdin.is_terminal() {
        return;
    }
    eprintln!("Press Enter to exit...");
    let _ = stdin.lock().lines().next();
}
