//! Process command - extract movements from a single statement.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use resumen_core::models::statement::{ExtractionResult, Verdict};
use resumen_core::statement::{BankConfig, BankRegistry, DebugSink, StatementExtractor};

use super::{load_config, load_registry};
use crate::debug::FileDebugSink;
use crate::output::{OutputFormat, format_result};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Statement PDF, or a `.txt` dump of its extracted text
    #[arg(required = true)]
    input: PathBuf,

    /// Bank name (default: detected from the file name)
    #[arg(short, long)]
    bank: Option<String>,

    /// Output file or directory (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Write extracted text and per-month movements to this directory
    #[arg(long)]
    debug_dir: Option<PathBuf>,
}

fn is_text_dump(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("txt"))
}

/// Name the statement is known by. A text dump `X.pdf.txt` stands for `X.pdf`.
pub fn statement_name(path: &Path) -> String {
    let name = if is_text_dump(path) { path.file_stem() } else { path.file_name() };
    name.and_then(|n| n.to_str()).unwrap_or_default().to_string()
}

/// Resolve the bank for a statement: by name when given, else by file pattern.
pub fn select_bank<'r>(
    registry: &'r BankRegistry,
    name: Option<&str>,
    statement: &str,
) -> anyhow::Result<&'r BankConfig> {
    match name {
        Some(name) => Ok(registry.get(name)?),
        None => registry.for_file(Path::new(statement)).ok_or_else(|| {
            anyhow::anyhow!(
                "No bank recognizes {}. Use --bank to choose one (see 'resumen banks').",
                statement
            )
        }),
    }
}

/// Extract one statement from a PDF or a text dump.
pub fn extract_file(
    bank: &BankConfig,
    path: &Path,
    statement: &str,
    sink: Option<&mut dyn DebugSink>,
) -> anyhow::Result<ExtractionResult> {
    let mut extractor = StatementExtractor::new(bank);
    if let Some(sink) = sink {
        extractor = extractor.with_sink(sink);
    }

    let result = if is_text_dump(path) {
        let text = fs::read_to_string(path)?;
        extractor.extract_text(&text, statement)?
    } else {
        let data = fs::read(path)?;
        extractor.extract(&data, statement)?
    };
    Ok(result)
}

pub fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let registry = load_registry(&config)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let statement = statement_name(&args.input);
    let bank = select_bank(&registry, args.bank.as_deref(), &statement)?;
    info!("Processing {} as {}", args.input.display(), bank.name());

    let debug_dir = args
        .debug_dir
        .clone()
        .or_else(|| config.debug.enabled.then(|| config.debug.dir.clone()));
    let mut sink = debug_dir.as_deref().map(FileDebugSink::new).transpose()?;

    let result = extract_file(
        bank,
        &args.input,
        &statement,
        sink.as_mut().map(|s| s as &mut dyn DebugSink),
    )?;

    let output = format_result(&result, args.format)?;

    if let Some(output_path) = &args.output {
        let output_path = if output_path.is_dir() {
            output_path.join(format!("{}.{}", statement, args.format.extension()))
        } else {
            output_path.clone()
        };
        fs::write(&output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    let r = &result.reconciliation;
    let verdict = match r.verdict {
        Verdict::Matched => style(r.verdict.to_string()).green(),
        Verdict::Mismatch => style(r.verdict.to_string()).red(),
        Verdict::Indeterminate => style(r.verdict.to_string()).yellow(),
    };
    eprintln!(
        "{} {} movements, {} skipped lines, reconciliation {}",
        style("ℹ").blue(),
        result.movements.len(),
        result.skipped_count(),
        verdict
    );

    debug!("Total processing time: {:?}", start.elapsed());
    Ok(())
}
