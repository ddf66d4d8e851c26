//! Sample statement texts for tests.

pub(crate) const PATAGONIA_FILENAME: &str = "resumenTarjetaCredito.19 dic. 2024.pdf";
pub(crate) const GALICIA_FILENAME: &str = "RESUMEN_VISA29_5_2025pdf.pdf";

/// A Patagonia movement line: date, voucher, description, installment,
/// pesos amount and an empty dollars column.
pub(crate) fn patagonia_line(
    date: &str,
    voucher: &str,
    description: &str,
    installment: &str,
    amount: &str,
) -> String {
    format!(
        "{:7}{:<13}{:<11}{:<40}{:>9}{:>16}{:>14}",
        "", date, voucher, description, installment, amount, "_"
    )
}

/// Two cardholder blocks, payments and charges folded into the summary.
///
/// previous 150.000,00 - 100.000,00 = 50.000,00; movements 42.345,17;
/// charges 1.500,00; closing 93.845,17.
pub(crate) fn patagonia_text() -> Vec<String> {
    vec![
        "BANCO PATAGONIA S.A.".to_string(),
        "VISA    Cierre actual 19 Dic 24    SALDO ACTUAL $ 93.845,17".to_string(),
        String::new(),
        "DETALLE DE MOVIMIENTOS".to_string(),
        "       FECHA        COMPROBANTE DETALLE DE TRANSACCION                                 PESOS       DOLARES".to_string(),
        patagonia_line("", "", "SALDO ANTERIOR", "", "150.000,00"),
        patagonia_line("28.11.24", "", "SU PAGO EN PESOS", "", "100.000,00-"),
        patagonia_line("02.12.24", "003456*", "SUPERMERCADO DIA", "", "12.345,67"),
        patagonia_line("05.12.24", "123456K", "NETFLIX.COM", "", "5.999,00"),
        patagonia_line("15.11.24", "000789*", "FRAVEGA", "03/12", "20.000,00"),
        "       Tarjeta 4567 Total Consumos de JUAN PEREZ                           38.344,67".to_string(),
        patagonia_line("10.12.24", "004411*", "FARMACITY", "", "4.500,50"),
        patagonia_line("11.12.24", "", "BONIF. CONSUMO", "", "500,00-"),
        patagonia_line("12.12.24", "", "PENDIENTE DE PROCESO", "", ""),
        "       Tarjeta 8910 Total Consumos de ANA PEREZ                             4.000,50".to_string(),
        patagonia_line("", "", "COMIS. PROD. PAT", "", "1.200,00"),
        patagonia_line("", "", "IVA $ 21,00%", "", "252,00"),
        patagonia_line("19.12.24", "", "IMP DE SELLOS", "", "48,00"),
        patagonia_line("", "", "SALDO ACTUAL", "", "93.845,17"),
        patagonia_line("", "", "PAGO MINIMO", "", "9.400,00"),
        "DEBITAREMOS DE SU CUENTA EL PAGO MINIMO".to_string(),
        "Plan V: consulte condiciones".to_string(),
    ]
}

/// One cardholder named in the header; closing balance printed after the
/// movement section.
///
/// previous 80.000,00 - 80.000,00 = 0; movements 17.250,75; charges 150,00;
/// closing 17.400,75.
pub(crate) fn galicia_text() -> Vec<String> {
    [
        "BANCO GALICIA - RESUMEN DE CUENTA VISA",
        "TITULAR: MARIA GOMEZ",
        "",
        "DETALLE DEL CONSUMO",
        "FECHA    REFERENCIA                   CUOTA  COMPROBANTE        PESOS",
        "SALDO ANTERIOR                                               80.000,00",
        "22-04-25 SU PAGO EN PESOS                                   80.000,00-",
        "28-04-25 * MERPAGO*MERCADOLIBRE C.02/06 004512              15.000,00",
        "02-05-25 CAFE MARTINEZ 000311                                3.250,75",
        "10-05-25 DEVOLUCION COMPRA 000312                            1.000,00-",
        "15-05-25 SIN IMPORTE PENDIENTE",
        "20-05-25 IMPUESTO DE SELLOS                                    150,00",
        "TOTAL CONSUMOS DEL PERIODO                                  17.250,75",
        "SALDO ACTUAL                                                17.400,75",
        "PAGO MINIMO                                                  2.000,00",
    ]
    .iter()
    .map(|line| line.to_string())
    .collect()
}
