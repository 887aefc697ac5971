//! Human-readable report

use std::fmt::Write as _;

use http_bench_core::Report;

/// Render the report as the fixed text layout
///
/// Non-2xx status lines are listed in ascending code order. The transport
/// error line is only printed when at least one request failed that way.
pub fn render_text(report: &Report) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(out, "Relatório:");
    let _ = writeln!(out, "Tempo total gasto: {:?}", report.total_time);
    let _ = writeln!(out, "Quantidade total de requests: {}", report.total_requests);
    let _ = writeln!(
        out,
        "Quantidade de requests com status HTTP 200 (ou 2xx): {}",
        report.successful_requests
    );
    let _ = writeln!(out, "Distribuição de outros códigos de status HTTP:");
    for (code, count) in report.other_statuses() {
        let _ = writeln!(out, "Status {}: {}", code, count);
    }
    if report.transport_errors > 0 {
        let _ = writeln!(out, "Erros de transporte: {}", report.transport_errors);
    }

    out
}
