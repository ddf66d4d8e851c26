//! Banks command - list the configured banks.

use clap::Args;
use console::style;

use resumen_core::models::config::ReconciliationFormula;
use resumen_core::statement::Layout;

use super::{load_config, load_registry};

/// Arguments for the banks command.
#[derive(Args)]
pub struct BanksArgs {
    /// Print the full bank definitions as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: BanksArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let registry = load_registry(&config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&config.banks)?);
        return Ok(());
    }

    println!("{} {} banks configured", style("ℹ").blue(), registry.len());
    for bank in registry.iter() {
        let layout = match bank.layout() {
            Layout::FixedColumns(_) => "fixed columns",
            Layout::Delimited { .. } => "delimited",
        };
        let formula = match bank.formula() {
            ReconciliationFormula::ClosingBalance => "closing balance",
            ReconciliationFormula::BalanceDelta => "balance delta",
        };

        println!();
        println!("{}", style(bank.name()).bold());
        println!("  Folder:         {}", config.input_dir.join(bank.folder()).display());
        println!("  Files:          {}", bank.file_pattern());
        println!("  Currency:       {}", bank.currency());
        println!("  Layout:         {}", layout);
        println!("  Reconciliation: {} (tolerance {})", formula, bank.tolerance());
    }

    Ok(())
}
