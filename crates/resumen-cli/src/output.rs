//! Output writers: per-statement formats, the unified movements CSV and the
//! reconciliation summary CSV.

use std::io::Write;

use rust_decimal::Decimal;

use resumen_core::models::statement::{ExtractionResult, Movement};
use resumen_core::statement::rules::format_amount;

/// Per-statement output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub fn format_result(result: &ExtractionResult, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Csv => {
            let mut wtr = MovementWriter::new(vec![])?;
            wtr.write_result(result)?;
            Ok(String::from_utf8(wtr.into_inner()?)?)
        }
        OutputFormat::Text => Ok(format_text(result)),
    }
}

fn optional_amount(amount: Option<Decimal>) -> String {
    amount.map(format_amount).unwrap_or_else(|| "-".to_string())
}

fn format_text(result: &ExtractionResult) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Statement: {} ({}, {})\n\n",
        result.filename, result.bank, result.period
    ));

    output.push_str(&format!("Movements ({}):\n", result.movements.len()));
    for m in &result.movements {
        output.push_str(&format!(
            "  {}  {:<40} {:>14} {}",
            m.date,
            m.description,
            format_amount(m.amount),
            m.currency
        ));
        if let Some(installment) = &m.installment_info {
            output.push_str(&format!("  cuota {}", installment));
        }
        if let Some(holder) = &m.holder {
            output.push_str(&format!("  [{}]", holder));
        }
        output.push('\n');
    }
    output.push('\n');

    let r = &result.reconciliation;
    let b = &r.balances;
    output.push_str("Balances:\n");
    output.push_str(&format!("  Previous:        {}\n", format_amount(b.previous_balance)));
    output.push_str(&format!("  Charges:         {}\n", format_amount(b.charges_total)));
    output.push_str(&format!("  Closing:         {}\n", optional_amount(b.closing_balance)));
    output.push_str(&format!("  Minimum payment: {}\n", optional_amount(b.minimum_payment)));
    output.push('\n');

    output.push_str("Totals:\n");
    output.push_str(&format!("  Purchases: {}\n", format_amount(r.total_purchases)));
    output.push_str(&format!("  Credits:   {}\n", format_amount(r.total_credits)));
    output.push('\n');

    output.push_str(&format!(
        "Reconciliation: {} (computed {}, expected {}, tolerance {})\n",
        r.verdict,
        format_amount(r.computed),
        optional_amount(r.expected),
        format_amount(r.tolerance)
    ));

    if !result.skipped.is_empty() {
        output.push_str(&format!("\nSkipped lines ({}):\n", result.skipped.len()));
        for line in &result.skipped {
            output.push_str(&format!(
                "  {}: {} ({})\n",
                line.line_number,
                line.text.trim(),
                line.reason
            ));
        }
    }

    output
}

/// CSV writer for movements of one or more statements.
pub struct MovementWriter<W: Write> {
    wtr: csv::Writer<W>,
}

impl<W: Write> MovementWriter<W> {
    pub fn new(writer: W) -> anyhow::Result<Self> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record([
            "bank",
            "filename",
            "date",
            "voucher_number",
            "description",
            "amount",
            "currency",
            "holder",
            "installment_info",
        ])?;
        Ok(Self { wtr })
    }

    pub fn write_result(&mut self, result: &ExtractionResult) -> anyhow::Result<()> {
        for movement in &result.movements {
            self.write_movement(&result.bank, &result.filename, movement)?;
        }
        Ok(())
    }

    pub fn write_movement(&mut self, bank: &str, filename: &str, m: &Movement) -> anyhow::Result<()> {
        self.wtr.write_record([
            bank,
            filename,
            &m.date.to_string(),
            m.voucher_number.as_deref().unwrap_or(""),
            &m.description,
            &m.amount.to_string(),
            &m.currency,
            m.holder.as_deref().unwrap_or(""),
            m.installment_info.as_deref().unwrap_or(""),
        ])?;
        Ok(())
    }

    pub fn into_inner(self) -> anyhow::Result<W> {
        self.wtr
            .into_inner()
            .map_err(|e| anyhow::anyhow!("Failed to flush CSV: {}", e))
    }
}

/// Outcome of processing one statement in a batch.
pub struct StatementOutcome {
    pub bank: String,
    pub filename: String,
    pub outcome: Result<ExtractionResult, String>,
    pub processing_time_ms: u64,
}

/// Write the reconciliation summary, one row per statement.
pub fn write_summary<W: Write>(writer: W, records: &[StatementOutcome]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record([
        "bank",
        "filename",
        "status",
        "period",
        "movements",
        "skipped",
        "previous_balance",
        "charges_total",
        "closing_balance",
        "computed",
        "expected",
        "difference",
        "verdict",
        "processing_time_ms",
        "error",
    ])?;

    let text = |value: Option<Decimal>| value.map(|v| v.to_string()).unwrap_or_default();

    for record in records {
        let time = record.processing_time_ms.to_string();
        match &record.outcome {
            Ok(result) => {
                let r = &result.reconciliation;
                wtr.write_record([
                    record.bank.as_str(),
                    &record.filename,
                    "success",
                    &result.period.to_string(),
                    &result.movements.len().to_string(),
                    &result.skipped_count().to_string(),
                    &r.balances.previous_balance.to_string(),
                    &r.balances.charges_total.to_string(),
                    &text(r.balances.closing_balance),
                    &r.computed.to_string(),
                    &text(r.expected),
                    &text(r.difference),
                    &r.verdict.to_string(),
                    &time,
                    "",
                ])?;
            }
            Err(error) => {
                wtr.write_record([
                    record.bank.as_str(),
                    &record.filename,
                    "error",
                    "",
                    "",
                    "",
                    "",
                    "",
                    "",
                    "",
                    "",
                    "",
                    "",
                    &time,
                    error,
                ])?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}
