//! Batch processing command for every statement under the input directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, info, warn};

use resumen_core::models::statement::Verdict;
use resumen_core::statement::{BankConfig, DebugSink};

use super::process::{extract_file, statement_name};
use super::{load_config, load_registry};
use crate::debug::FileDebugSink;
use crate::output::{MovementWriter, StatementOutcome, write_summary};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input directory with one subdirectory per bank (default: from config)
    #[arg(short, long)]
    input_dir: Option<PathBuf>,

    /// Output directory (default: from config)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Only process these banks
    #[arg(short, long)]
    bank: Vec<String>,

    /// Write extracted text and per-month movements to this directory
    #[arg(long)]
    debug_dir: Option<PathBuf>,

    /// Stop at the first statement that fails
    #[arg(long)]
    fail_fast: bool,
}

/// Statements of a bank: files in its folder accepted by its file pattern.
fn statement_files(input_dir: &Path, bank: &BankConfig) -> anyhow::Result<Vec<PathBuf>> {
    let dir = input_dir.join(bank.folder());
    let pattern = format!(
        "{}/{}",
        glob::Pattern::escape(&dir.to_string_lossy()),
        bank.file_pattern()
    );

    let mut files: Vec<PathBuf> = glob(&pattern)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();
    files.sort();

    debug!("{}: {} statements in {}", bank.name(), files.len(), dir.display());
    Ok(files)
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let registry = load_registry(&config)?;

    let input_dir = args.input_dir.clone().unwrap_or_else(|| config.input_dir.clone());
    let output_dir = args.output_dir.clone().unwrap_or_else(|| config.output_dir.clone());

    let banks: Vec<&BankConfig> = if args.bank.is_empty() {
        registry.iter().collect()
    } else {
        args.bank
            .iter()
            .map(|name| registry.get(name))
            .collect::<Result<_, _>>()?
    };

    let mut work: Vec<(&BankConfig, PathBuf)> = Vec::new();
    for bank in banks {
        for path in statement_files(&input_dir, bank)? {
            work.push((bank, path));
        }
    }

    if work.is_empty() {
        anyhow::bail!("No statements found under {}", input_dir.display());
    }

    println!(
        "{} Found {} statements to process",
        style("ℹ").blue(),
        work.len()
    );

    fs::create_dir_all(&output_dir)?;

    let debug_dir = args
        .debug_dir
        .clone()
        .or_else(|| config.debug.enabled.then(|| config.debug.dir.clone()));
    let mut sink = debug_dir.as_deref().map(FileDebugSink::new).transpose()?;

    let progress = ProgressBar::new(work.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("=>-"),
    );

    let mut results: Vec<StatementOutcome> = Vec::with_capacity(work.len());
    for (bank, path) in work {
        let file_start = Instant::now();
        let statement = statement_name(&path);
        progress.set_message(statement.clone());

        let outcome = extract_file(
            bank,
            &path,
            &statement,
            sink.as_mut().map(|s| s as &mut dyn DebugSink),
        );
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        let outcome = match outcome {
            Ok(result) => Ok(result),
            Err(e) => {
                let error_msg = e.to_string();
                if args.fail_fast {
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed: {}", error_msg);
                }
                warn!("Failed to process {}: {}", path.display(), error_msg);
                Err(error_msg)
            }
        };

        results.push(StatementOutcome {
            bank: bank.name().to_string(),
            filename: statement,
            outcome,
            processing_time_ms,
        });
        progress.inc(1);
    }

    progress.finish_with_message("Complete");

    let movements_path = output_dir.join("movements.csv");
    let mut movements = MovementWriter::new(fs::File::create(&movements_path)?)?;
    for result in results.iter().filter_map(|r| r.outcome.as_ref().ok()) {
        movements.write_result(result)?;
    }
    movements.into_inner()?;
    info!("Wrote movements to {}", movements_path.display());

    let summary_path = output_dir.join("summary.csv");
    write_summary(fs::File::create(&summary_path)?, &results)?;

    println!(
        "{} Movements written to {}",
        style("✓").green(),
        movements_path.display()
    );
    println!(
        "{} Summary written to {}",
        style("✓").green(),
        summary_path.display()
    );

    let succeeded: Vec<_> = results.iter().filter_map(|r| r.outcome.as_ref().ok()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.outcome.is_err()).collect();
    let count = |verdict: Verdict| succeeded.iter().filter(|r| r.reconciliation.verdict == verdict).count();

    println!();
    println!(
        "{} Processed {} statements in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(succeeded.len()).green(),
        style(failed.len()).red()
    );
    println!(
        "   {} matched, {} mismatched, {} indeterminate",
        style(count(Verdict::Matched)).green(),
        style(count(Verdict::Mismatch)).red(),
        style(count(Verdict::Indeterminate)).yellow()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed statements:").red());
        for record in &failed {
            if let Err(error) = &record.outcome {
                println!("  - {} ({}): {}", record.filename, record.bank, error);
            }
        }
    }

    Ok(())
}
