//! Built-in bank definitions.

use rust_decimal::Decimal;
use std::path::PathBuf;

use super::rules::spanish_months;
use crate::models::config::{
    BankDefinition, FilenameDateGroups, FixedPositions, LayoutDefinition, ReconciliationDefinition,
    ReconciliationFormula,
};

fn strings(patterns: &[&str]) -> Vec<String> {
    patterns.iter().map(|p| p.to_string()).collect()
}

/// Banco Patagonia VISA: fixed columns, two amount columns (pesos, dollars).
///
/// File names look like `resumenTarjetaCredito.19 dic. 2024.pdf`.
pub fn patagonia() -> BankDefinition {
    BankDefinition {
        name: "Patagonia".to_string(),
        folder: PathBuf::from("VISA_Patagonia"),
        file_pattern: "resumenTarjetaCredito.*.pdf".to_string(),
        currency: "ARS".to_string(),
        filename_date_pattern: r"resumenTarjetaCredito\.(\d+)\s+(\w+)\.\s+(\d+)\.pdf".to_string(),
        filename_date_groups: FilenameDateGroups {
            day: Some(1),
            month: 2,
            year: 3,
        },
        month_mapping: spanish_months(),
        layout: LayoutDefinition::FixedColumns(FixedPositions {
            date_start: 7,
            date_end: 15,
            voucher_start: 20,
            description_start: 31,
            min_amount_pos: 80,
            min_line_length: Some(103),
            max_line_length: Some(124),
        }),
        movement_section_start: strings(&[
            r"DETALLES? DE MOVIMIENTOS",
            r"(?i)FECHA\s+COMPROBANTE\s+DETALLE",
        ]),
        movement_section_end: strings(&[
            r"DEBITAREMOS DE SU",
            r"Plan V:",
            r"CFTEA",
            r"Condiciones vigentes",
            r"Estimado Cliente",
        ]),
        saldo_patterns: strings(&[r"SALDO\s+ANTERIOR", r"SU\s+PAGO\s+EN\s+PESOS"]),
        cargos_patterns: strings(&[
            r"COMIS\.\s+PROD\.\s+PAT",
            r"IVA\s+\$\s+21",
            r"INTERESES\s+FINANCIACION",
            r"IMP\s+DE\s+SELLOS",
        ]),
        closing_balance_patterns: strings(&[r"SALDO\s+ACTUAL"]),
        minimum_payment_patterns: strings(&[r"PAGO\s+MINIMO"]),
        holder_patterns: strings(&[r"Tarjeta\s+\d+\s+Total\s+Consumos\s+de\s+(.+?)\s+[\d.,]+"]),
        reconciliation: ReconciliationDefinition {
            formula: ReconciliationFormula::ClosingBalance,
            tolerance: Decimal::ZERO,
        },
    }
}

/// Banco Galicia VISA: one movement per line, `DD-MM-YY` dates.
///
/// File names look like `RESUMEN_VISA29_5_2025pdf.pdf` (day, month, year).
pub fn galicia() -> BankDefinition {
    BankDefinition {
        name: "Galicia".to_string(),
        folder: PathBuf::from("VISA_Galicia"),
        file_pattern: "RESUMEN_VISA*.pdf".to_string(),
        currency: "ARS".to_string(),
        filename_date_pattern: r"(?i)RESUMEN_VISA(\d{1,2})_(\d{1,2})_(\d{4})pdf\.pdf".to_string(),
        filename_date_groups: FilenameDateGroups {
            day: Some(1),
            month: 2,
            year: 3,
        },
        month_mapping: spanish_months(),
        layout: LayoutDefinition::Delimited {
            movement_pattern: concat!(
                r"^\s*(?P<date>\d{2}-\d{2}-\d{2})\s+(?:\*\s+)?(?P<description>.+?)",
                r"(?:\s+C\.(?P<installment>\d{2}/\d{2}))?",
                r"(?:\s+(?P<voucher>\d{6}))?",
                r"\s+(?P<amount>-?\d{1,3}(?:\.\d{3})*,\d{2}-?)\s*$",
            )
            .to_string(),
        },
        movement_section_start: strings(&[r"(?i)DETALLE\s+DEL\s+CONSUMO"]),
        movement_section_end: strings(&[
            r"(?i)^\s*TOTAL\s+CONSUMOS\s+DEL\s+PERIODO",
            r"(?i)CUOTAS\s+A\s+VENCER",
        ]),
        saldo_patterns: strings(&[r"(?i)SALDO\s+ANTERIOR", r"(?i)SU\s+PAGO\s+EN\s+PESOS"]),
        cargos_patterns: strings(&[
            r"(?i)IMPUESTO\s+DE\s+SELLOS",
            r"(?i)IVA\s+RG",
            r"(?i)INTERESES\s+(?:DE\s+)?FINANCIACION",
            r"(?i)COMISION\s+MANT",
        ]),
        closing_balance_patterns: strings(&[r"(?i)SALDO\s+ACTUAL"]),
        minimum_payment_patterns: strings(&[r"(?i)PAGO\s+MINIMO"]),
        holder_patterns: strings(&[r"(?i)^\s*TITULAR:?\s+(.+?)\s*$"]),
        reconciliation: ReconciliationDefinition {
            formula: ReconciliationFormula::BalanceDelta,
            tolerance: Decimal::ZERO,
        },
    }
}

/// Definitions of every built-in bank.
pub fn builtin_definitions() -> Vec<BankDefinition> {
    vec![patagonia(), galicia()]
}
