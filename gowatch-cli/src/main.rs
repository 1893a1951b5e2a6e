//! gowatch CLI - prints the files a Go build must watch for one entry file.
//!
//! Output is a single compact JSON object on stdout:
//! `{"packageName":"app","functionName":"Handler","watch":["main.go","math.go"]}`.
//! Nothing is printed when the entry exports no function. Diagnostics and
//! logs go to stderr.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;

use gowatch_core::{init_structured_logging, Analyzer};

#[derive(Parser, Debug)]
#[command(author, version, about = "Find the Go files an entry file depends on")]
pub struct Cli {
    /// Entry Go source file
    #[arg(allow_hyphen_values = true)]
    entry: PathBuf,
}

fn main() -> Result<()> {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("[PANIC] gowatch internal error: {}", info);
    }));

    // JSON logs on stderr, filtered by RUST_LOG
    init_structured_logging();

    let cli = Cli::parse();

    let Some(result) = Analyzer::new(&cli.entry)
        .analyze()
        .with_context(|| format!("Failed to analyze {}", cli.entry.display()))?
    else {
        return Ok(());
    };

    let mut stdout = std::io::stdout().lock();
    result
        .write_json(&mut stdout)
        .context("Failed to write result")?;
    stdout.flush().context("Failed to flush stdout")?;

    Ok(())
}
