use serde::Serialize;

use crate::error::CalcError;
use crate::format::format_metric;
use crate::report::Report;

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "Metric")]
    metric: &'a str,
    #[serde(rename = "Value")]
    value: String,
}

/// Two-column `Metric,Value` export of a report's headline figures.
pub fn write_csv<W: std::io::Write>(report: &Report, writer: W) -> Result<(), CalcError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for metric in &report.metrics {
        wtr.serialize(CsvRow {
            metric: metric.label,
            value: format_metric(metric),
        })?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn to_csv_string(report: &Report) -> Result<String, CalcError> {
    let mut buf = Vec::new();
    write_csv(report, &mut buf)?;
    String::from_utf8(buf).map_err(|e| CalcError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_has_header_and_one_row_per_metric() {
        let report = Report::new()
            .currency("payment", "Monthly payment", 659.955)
            .currency("total", "Total paid", 158_389.38);
        let csv = to_csv_string(&report).expect("csv");
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Metric,Value",
                "Monthly payment,£659.96",
                "Total paid,\"£158,389.38\""
            ]
        );
    }

    #[test]
    fn empty_report_exports_nothing() {
        let csv = to_csv_string(&Report::new()).expect("csv");
        assert!(csv.is_empty());
    }
}
