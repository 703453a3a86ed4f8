// Declare modules
pub mod cli;
pub mod config;
pub mod filters;
pub mod formatter;
pub mod models;
pub mod scanner;

use anyhow::{Context, Result};
use clap::Parser;
use std::env;
use std::fs::{self, File};
use std::io::{BufWriter, Write};

use self::cli::Cli;
use self::config::resolve_config;
use self::formatter::RecordWriter;
use self::models::CollectSummary;
use self::scanner::Scanner;

/// Initializes components and orchestrates data flow.
pub fn run() -> Result<()> {
    // 1. Parse Args
    let args = Cli::parse();

    // 2. Identify Root & Project Name
    let current_dir = env::current_dir().context("Failed to get current directory")?;
    let root = match &args.root {
        Some(path) => current_dir.join(path),
        None => current_dir.clone(),
    };
    let metadata = fs::metadata(&root)
        .with_context(|| format!("Cannot read root directory {}", root.display()))?;
    if !metadata.is_dir() {
        anyhow::bail!("Root {} is not a directory", root.display());
    }
    let project_name = root
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_owned);

    // 3. Resolve Configuration
    let config = resolve_config(args, project_name.as_deref())?;
    let scanner = Scanner::new(root, &config)?;

    if !scanner.has_includes() {
        log::warn!("💡 Tip: No include patterns configured, nothing will be collected.");
    }

    // 4. Open the output once for the whole run
    let output_path = current_dir.join(&config.output);
    let file = File::create(&output_path)
        .with_context(|| format!("Failed to create output file {}", output_path.display()))?;
    let scanner = scanner.skip_path(&output_path);

    log::info!(
        "Starting process, output will be saved as: {}",
        config.output.display()
    );

    // 5. Scan and write
    let mut writer = RecordWriter::new(BufWriter::new(file));
    let summary = collect(&scanner, &mut writer)?;
    writer
        .finish()
        .with_context(|| format!("Failed to flush {}", output_path.display()))?;

    if summary.skipped > 0 {
        log::warn!("⚠️ {} files could not be read and were skipped.", summary.skipped);
    }
    log::info!(
        "Process completed! {} files were combined into {}",
        summary.written,
        config.output.display()
    );

    Ok(())
}

/// Reads every accepted file and appends it to `writer`.
///
/// A file that cannot be read is logged and skipped without using up a
/// sequence number. Write errors on the output abort the run.
pub fn collect<W: Write>(
    scanner: &Scanner,
    writer: &mut RecordWriter<W>,
) -> Result<CollectSummary> {
    let mut summary = CollectSummary::default();

    for entry in scanner.scan() {
        let content = match entry.read_content() {
            Ok(content) => content,
            Err(e) => {
                log::warn!("Failed to read file {}: {:#}", entry.relative_path, e);
                summary.skipped += 1;
                continue;
            }
        };

        let number = writer
            .write_record(&entry.relative_path, &content)
            .context("Failed to write to output file")?;
        log::info!("[{}] Added: {}", number, entry.relative_path);
    }

    summary.written = writer.count();
    Ok(summary)
}
