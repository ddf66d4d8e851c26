//! Generic extraction pipeline: PDF text to movements and a reconciliation.

use regex::Regex;
use rust_decimal::Decimal;
use tracing::{debug, info, trace, warn};

use super::parser::parser_for;
use super::period::extract_period;
use super::reconcile::reconcile;
use super::registry::BankConfig;
use super::rules::{first_amount, resolve_printed_date};
use super::{DebugSink, StatementParser};
use crate::error::{ExtractionError, PdfError, Result};
use crate::models::statement::{
    ExtractionResult, Movement, MovementFields, SkippedLine, StatementBalances, StatementPeriod,
    group_by_month,
};
use crate::pdf::{PdfExtractor, PdfProcessor};

const NO_AMOUNT: &str = "movement-shaped line without a parseable amount";

#[derive(Debug, Clone, Copy)]
enum SummaryKind {
    Previous,
    Charges,
    Closing,
    MinimumPayment,
}

/// Summary amounts seen in one region of the document.
#[derive(Debug, Default)]
struct SummaryTotals {
    previous: Option<Decimal>,
    charges: Option<Decimal>,
    closing: Option<Decimal>,
    minimum: Option<Decimal>,
}

impl SummaryTotals {
    /// Previous balance and charges add up across their lines; closing
    /// balance and minimum payment take the last value printed.
    fn add(&mut self, kind: SummaryKind, amount: Decimal) {
        match kind {
            SummaryKind::Previous => self.previous = Some(self.previous.unwrap_or_default() + amount),
            SummaryKind::Charges => self.charges = Some(self.charges.unwrap_or_default() + amount),
            SummaryKind::Closing => self.closing = Some(amount),
            SummaryKind::MinimumPayment => self.minimum = Some(amount),
        }
    }
}

/// Balances printed inside the movement section win over the same category
/// printed elsewhere (page headers repeat the closing balance).
fn merge_balances(inside: SummaryTotals, outside: SummaryTotals) -> StatementBalances {
    let previous = inside.previous.or(outside.previous);
    StatementBalances {
        previous_balance: previous.unwrap_or_default(),
        charges_total: inside.charges.or(outside.charges).unwrap_or_default(),
        closing_balance: inside.closing.or(outside.closing),
        minimum_payment: inside.minimum.or(outside.minimum),
        previous_balance_found: previous.is_some(),
    }
}

fn first_match(patterns: &[Regex], line: &str) -> Option<usize> {
    patterns.iter().find_map(|p| p.find(line)).map(|m| m.end())
}

fn build_movement(
    fields: MovementFields,
    period: StatementPeriod,
    currency: &str,
) -> std::result::Result<Movement, ExtractionError> {
    let printed = fields.date;
    let date = resolve_printed_date(printed, period).ok_or_else(|| {
        ExtractionError::Parse(format!("invalid date {:02}/{:02}", printed.day, printed.month))
    })?;

    Ok(Movement {
        date,
        voucher_number: fields.voucher_number,
        description: fields.description,
        amount: fields.amount,
        currency: currency.to_string(),
        holder: None,
        installment_info: fields.installment_info,
    })
}

/// Extracts movements from statements of one bank.
pub struct StatementExtractor<'a> {
    config: &'a BankConfig,
    parser: Box<dyn StatementParser + 'a>,
    sink: Option<&'a mut dyn DebugSink>,
}

impl<'a> StatementExtractor<'a> {
    pub fn new(config: &'a BankConfig) -> Self {
        Self {
            config,
            parser: parser_for(config),
            sink: None,
        }
    }

    /// Report intermediate output to a debug sink.
    pub fn with_sink(mut self, sink: &'a mut dyn DebugSink) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Extract a statement from PDF bytes.
    pub fn extract(&mut self, data: &[u8], filename: &str) -> Result<ExtractionResult> {
        let mut pdf = PdfExtractor::new();
        pdf.load(data)?;

        let lines = pdf.extract_lines()?;
        let pdf_type = pdf.analyze(&lines);
        debug!("{}: {} pages, {:?}", filename, pdf.page_count(), pdf_type);
        if !pdf_type.has_text() {
            return Err(PdfError::NoTextLayer.into());
        }

        self.extract_lines(&lines, filename)
    }

    /// Extract a statement from already extracted text.
    pub fn extract_text(&mut self, text: &str, filename: &str) -> Result<ExtractionResult> {
        let lines: Vec<String> = text.lines().map(str::to_string).collect();
        self.extract_lines(&lines, filename)
    }

    /// Extract a statement from text lines in page order.
    pub fn extract_lines(&mut self, lines: &[String], filename: &str) -> Result<ExtractionResult> {
        let config = self.config;
        let period = extract_period(filename, config)?;
        info!("Extracting {} statement {} ({})", config.name(), filename, period);

        if let Some(sink) = self.sink.as_deref_mut() {
            sink.on_text(filename, lines);
        }

        let mut section_found = false;
        let mut in_section = false;
        let mut section_lines = 0;
        let mut default_holder: Option<String> = None;
        let mut pending: Vec<Movement> = Vec::new();
        let mut movements: Vec<Movement> = Vec::new();
        let mut skipped: Vec<SkippedLine> = Vec::new();
        let mut inside = SummaryTotals::default();
        let mut outside = SummaryTotals::default();

        for (index, line) in lines.iter().enumerate() {
            let line_number = index + 1;
            if line.trim().is_empty() {
                continue;
            }

            if !in_section {
                if first_match(&config.section_start, line).is_some() {
                    debug!("Movement section opens at line {}", line_number);
                    section_found = true;
                    in_section = true;
                    continue;
                }
                if let Some((kind, amount)) = self.summary(line) {
                    trace!("Summary {:?} outside section: {}", kind, amount);
                    outside.add(kind, amount);
                }
                if !section_found && default_holder.is_none() {
                    default_holder = self.parser.detect_holder(line);
                }
                continue;
            }

            if first_match(&config.section_end, line).is_some() {
                debug!("Movement section closes at line {}", line_number);
                in_section = false;
                continue;
            }
            section_lines += 1;

            if let Some(holder) = self.parser.detect_holder(line) {
                debug!("Holder {} closes a block of {} movements", holder, pending.len());
                movements.extend(pending.drain(..).map(|mut m| {
                    m.holder = Some(holder.clone());
                    m
                }));
                continue;
            }

            if let Some((kind, amount)) = self.summary(line) {
                trace!("Summary {:?}: {}", kind, amount);
                inside.add(kind, amount);
                continue;
            }

            if self.parser.looks_like_movement(line) {
                let parsed = self
                    .parser
                    .parse_line(line)
                    .and_then(|fields| build_movement(fields, period, config.currency()));
                match parsed {
                    Ok(movement) => {
                        trace!("Movement at line {}: {:?}", line_number, movement);
                        pending.push(movement);
                    }
                    Err(e) => {
                        warn!("{}:{}: skipped: {}", filename, line_number, e);
                        skipped.push(SkippedLine {
                            line_number,
                            text: line.clone(),
                            reason: e.to_string(),
                        });
                    }
                }
            } else if self.parser.has_date_prefix(line) {
                let reason = self.parser.rejection(line).unwrap_or(NO_AMOUNT);
                warn!("{}:{}: skipped: {}", filename, line_number, reason);
                skipped.push(SkippedLine {
                    line_number,
                    text: line.clone(),
                    reason: reason.to_string(),
                });
            }
        }

        if !section_found {
            return Err(ExtractionError::SectionNotFound(filename.to_string()).into());
        }

        movements.extend(pending.into_iter().map(|mut m| {
            m.holder = default_holder.clone();
            m
        }));

        let balances = merge_balances(inside, outside);
        let reconciliation = reconcile(&movements, balances, config);

        if let Some(sink) = self.sink.as_deref_mut() {
            sink.on_months(filename, &group_by_month(&movements));
        }

        info!(
            "{}: {} movements, {} skipped, reconciliation {}",
            filename,
            movements.len(),
            skipped.len(),
            reconciliation.verdict
        );

        Ok(ExtractionResult {
            bank: config.name().to_string(),
            filename: filename.to_string(),
            period,
            movements,
            reconciliation,
            skipped,
            section_lines,
        })
    }

    /// Category and amount of a balance summary line.
    fn summary(&self, line: &str) -> Option<(SummaryKind, Decimal)> {
        let config = self.config;
        let (kind, end) = [
            (SummaryKind::Previous, &config.saldo_patterns),
            (SummaryKind::Charges, &config.cargos_patterns),
            (SummaryKind::Closing, &config.closing_balance_patterns),
            (SummaryKind::MinimumPayment, &config.minimum_payment_patterns),
        ]
        .into_iter()
        .find_map(|(kind, patterns)| first_match(patterns, line).map(|end| (kind, end)))?;

        let amount = if self.parser.looks_like_movement(line) {
            self.parser.parse_line(line).ok().map(|fields| fields.amount)
        } else {
            first_amount(&line[end..])
        };
        amount.map(|a| (kind, a))
    }
}

/// Extract one statement with the given bank configuration.
pub fn extract(data: &[u8], filename: &str, config: &BankConfig) -> Result<ExtractionResult> {
    StatementExtractor::new(config).extract(data, filename)
}
