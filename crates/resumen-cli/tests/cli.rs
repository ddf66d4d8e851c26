use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const GALICIA_TEXT: &str = "\
BANCO GALICIA - RESUMEN DE CUENTA VISA
TITULAR: MARIA GOMEZ

DETALLE DEL CONSUMO
FECHA    REFERENCIA                   CUOTA  COMPROBANTE        PESOS
SALDO ANTERIOR                                               80.000,00
22-04-25 SU PAGO EN PESOS                                   80.000,00-
28-04-25 * MERPAGO*MERCADOLIBRE C.02/06 004512              15.000,00
02-05-25 CAFE MARTINEZ 000311                                3.250,75
10-05-25 DEVOLUCION COMPRA 000312                            1.000,00-
15-05-25 SIN IMPORTE PENDIENTE
20-05-25 IMPUESTO DE SELLOS                                    150,00
TOTAL CONSUMOS DEL PERIODO                                  17.250,75
SALDO ACTUAL                                                17.400,75
PAGO MINIMO                                                  2.000,00
";

const GALICIA_DUMP: &str = "RESUMEN_VISA29_5_2025pdf.pdf.txt";

/// Command with the user configuration directory pointed into `home`.
fn resumen(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("resumen").unwrap();
    cmd.env("XDG_CONFIG_HOME", home.path().join("config"))
        .env("HOME", home.path());
    cmd
}

fn write_galicia_dump(dir: &Path) -> std::path::PathBuf {
    let path = dir.join(GALICIA_DUMP);
    fs::write(&path, GALICIA_TEXT).unwrap();
    path
}

fn patagonia_line(date: &str, description: &str, amount: &str) -> String {
    format!(
        "{:7}{:<13}{:<11}{:<40}{:>9}{:>16}{:>14}",
        "", date, "", description, "", amount, "_"
    )
}

#[test]
fn test_banks_lists_builtin_banks() {
    let home = TempDir::new().unwrap();
    resumen(&home)
        .arg("banks")
        .assert()
        .success()
        .stdout(predicate::str::contains("Patagonia"))
        .stdout(predicate::str::contains("Galicia"))
        .stdout(predicate::str::contains("balance delta"));
}

#[test]
fn test_config_init_and_get() {
    let home = TempDir::new().unwrap();
    let config_path = home.path().join("resumen.json");

    resumen(&home)
        .args(["config", "init", "--output"])
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Created configuration file"));
    assert!(config_path.exists());

    resumen(&home)
        .arg("--config")
        .arg(&config_path)
        .args(["config", "get", "banks.0.name"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Patagonia\""));

    resumen(&home)
        .args(["config", "init", "--output"])
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_config_set_validates_banks() {
    let home = TempDir::new().unwrap();
    let config_path = home.path().join("resumen.json");

    resumen(&home)
        .args(["config", "init", "--output"])
        .arg(&config_path)
        .assert()
        .success();

    resumen(&home)
        .arg("--config")
        .arg(&config_path)
        .args(["config", "set", "debug.enabled", "true"])
        .assert()
        .success();
    assert!(fs::read_to_string(&config_path).unwrap().contains("\"enabled\": true"));

    resumen(&home)
        .arg("--config")
        .arg(&config_path)
        .args(["config", "set", "banks.1.cargos_patterns", "[\"IVA (\"]"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid pattern"));
}

#[test]
fn test_process_text_dump_as_json() {
    let home = TempDir::new().unwrap();
    let input = write_galicia_dump(home.path());

    resumen(&home)
        .arg("process")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"bank\": \"Galicia\""))
        .stdout(predicate::str::contains("MARIA GOMEZ"))
        .stdout(predicate::str::contains("\"verdict\": \"matched\""));
}

#[test]
fn test_process_text_and_csv_formats() {
    let home = TempDir::new().unwrap();
    let input = write_galicia_dump(home.path());

    resumen(&home)
        .arg("process")
        .arg(&input)
        .args(["--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Reconciliation: matched"))
        .stdout(predicate::str::contains("Skipped lines (1)"))
        .stdout(predicate::str::contains("15.000,00"));

    let output = home.path().join("movements.csv");
    resumen(&home)
        .arg("process")
        .arg(&input)
        .args(["--format", "csv", "--output"])
        .arg(&output)
        .assert()
        .success();

    let csv = fs::read_to_string(&output).unwrap();
    assert!(csv.starts_with("bank,filename,date,voucher_number,description"));
    assert!(csv.contains("CAFE MARTINEZ"));
    assert_eq!(csv.lines().count(), 4);
}

#[test]
fn test_process_output_directory() {
    let home = TempDir::new().unwrap();
    let input = write_galicia_dump(home.path());
    let out_dir = home.path().join("out");
    fs::create_dir_all(&out_dir).unwrap();

    resumen(&home)
        .arg("process")
        .arg(&input)
        .args(["--format", "json", "--output"])
        .arg(&out_dir)
        .assert()
        .success();

    let json = fs::read_to_string(out_dir.join("RESUMEN_VISA29_5_2025pdf.pdf.json")).unwrap();
    assert!(json.contains("\"section_lines\": 8"));
}

#[test]
fn test_process_patagonia_fixed_columns() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("resumenTarjetaCredito.19 dic. 2024.pdf.txt");
    let text = [
        "DETALLE DE MOVIMIENTOS".to_string(),
        patagonia_line("", "SALDO ANTERIOR", "1.000,00"),
        patagonia_line("02.12.24", "SUPERMERCADO DIA", "500,00"),
        patagonia_line("", "SALDO ACTUAL", "1.500,00"),
        "DEBITAREMOS DE SU CUENTA".to_string(),
    ]
    .join("\n");
    fs::write(&input, text).unwrap();

    resumen(&home)
        .arg("process")
        .arg(&input)
        .args(["--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Patagonia, 2024-12"))
        .stdout(predicate::str::contains("SUPERMERCADO DIA"))
        .stdout(predicate::str::contains("Reconciliation: matched"));
}

#[test]
fn test_process_writes_debug_files() {
    let home = TempDir::new().unwrap();
    let input = write_galicia_dump(home.path());
    let debug_dir = home.path().join("debug");

    resumen(&home)
        .arg("process")
        .arg(&input)
        .arg("--debug-dir")
        .arg(&debug_dir)
        .assert()
        .success();

    assert!(debug_dir.join("RESUMEN_VISA29_5_2025pdf.pdf.txt").exists());
    assert!(debug_dir.join("RESUMEN_VISA29_5_2025pdf.pdf.2025-04.csv").exists());
    assert!(debug_dir.join("RESUMEN_VISA29_5_2025pdf.pdf.2025-05.csv").exists());
}

#[test]
fn test_process_unknown_bank() {
    let home = TempDir::new().unwrap();
    let input = write_galicia_dump(home.path());

    resumen(&home)
        .arg("process")
        .arg(&input)
        .args(["--bank", "Santander"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown bank: Santander"));
}

#[test]
fn test_process_unrecognized_file_name() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("statement.txt");
    fs::write(&input, GALICIA_TEXT).unwrap();

    resumen(&home)
        .arg("process")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No bank recognizes"));
}

#[test]
fn test_process_missing_section() {
    let home = TempDir::new().unwrap();
    let input = home.path().join(GALICIA_DUMP);
    fs::write(&input, "TITULAR: MARIA GOMEZ\nSALDO ACTUAL 10,00\n").unwrap();

    resumen(&home)
        .arg("process")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("movement section not found"));
}

#[test]
fn test_batch_without_statements() {
    let home = TempDir::new().unwrap();
    let input_dir = home.path().join("input");
    fs::create_dir_all(&input_dir).unwrap();

    resumen(&home)
        .arg("batch")
        .arg("--input-dir")
        .arg(&input_dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No statements found"));
}

#[test]
fn test_batch_continues_past_broken_statements() {
    let home = TempDir::new().unwrap();
    let input_dir = home.path().join("input");
    let output_dir = home.path().join("output");
    let bank_dir = input_dir.join("VISA_Galicia");
    fs::create_dir_all(&bank_dir).unwrap();
    fs::write(bank_dir.join("RESUMEN_VISA29_5_2025pdf.pdf"), b"not a pdf").unwrap();

    resumen(&home)
        .arg("batch")
        .arg("--input-dir")
        .arg(&input_dir)
        .arg("--output-dir")
        .arg(&output_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("0 successful, 1 failed"));

    let summary = fs::read_to_string(output_dir.join("summary.csv")).unwrap();
    assert!(summary.contains("Galicia,RESUMEN_VISA29_5_2025pdf.pdf,error"));
    let movements = fs::read_to_string(output_dir.join("movements.csv")).unwrap();
    assert_eq!(movements.lines().count(), 1);

    resumen(&home)
        .arg("batch")
        .arg("--input-dir")
        .arg(&input_dir)
        .arg("--output-dir")
        .arg(&output_dir)
        .arg("--fail-fast")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Processing failed"));
}
