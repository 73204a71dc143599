//! en-GB presentation of report values.

use crate::report::{Metric, Report, Unit};

pub fn format_number(value: f64, min_fraction: usize, max_fraction: usize) -> String {
    if !value.is_finite() {
        return "n/a".to_string();
    }

    let fixed = format!("{:.*}", max_fraction, value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let mut frac = frac_part.trim_end_matches('0').to_string();
    while frac.len() < min_fraction {
        frac.push('0');
    }

    let is_zero = fixed.bytes().all(|b| b == b'0' || b == b'.');
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };
    if frac.is_empty() {
        format!("{sign}{}", group_thousands(int_part))
    } else {
        format!("{sign}{}.{frac}", group_thousands(int_part))
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn format_currency(value: f64, min_fraction: usize, max_fraction: usize) -> String {
    let number = format_number(value, min_fraction, max_fraction);
    match number.strip_prefix('-') {
        Some(rest) => format!("-£{rest}"),
        None if value.is_finite() => format!("£{number}"),
        None => number,
    }
}

pub fn format_metric(metric: &Metric) -> String {
    match metric.unit {
        Unit::Currency => format_currency(metric.value, 0, 2),
        Unit::Percent => format!("{}%", format_number(metric.value * 100.0, 0, 2)),
        Unit::Years => format!("{} years", format_number(metric.value, 0, 1)),
        Unit::Months => format!("{} months", format_number(metric.value, 0, 0)),
        Unit::Ratio => format!("{}x", format_number(metric.value, 0, 2)),
        Unit::Count => format_number(metric.value, 0, 0),
        Unit::Text => metric.text.clone().unwrap_or_default(),
    }
}

/// Plain-text rendering used by the CLI.
pub fn render_text(title: &str, report: &Report) -> String {
    let width = report
        .metrics
        .iter()
        .map(|m| m.label.len())
        .max()
        .unwrap_or(0);

    let mut out = format!("{title}\n");
    for metric in &report.metrics {
        out.push_str(&format!(
            "  {:<width$}  {}\n",
            metric.label,
            format_metric(metric)
        ));
    }

    if !report.breakdown.is_empty() {
        out.push_str("\n  Band breakdown\n");
        for band in &report.breakdown {
            out.push_str(&format!(
                "    {} @ {}%: {} on {}\n",
                band.band_name,
                format_number(band.rate * 100.0, 0, 2),
                format_currency(band.tax_in_band, 2, 2),
                format_currency(band.taxable_in_band, 0, 2),
            ));
        }
    }

    if !report.series.is_empty() {
        out.push_str("\n  Year  Value\n");
        for point in &report.series {
            out.push_str(&format!(
                "  {:>4}  {}\n",
                point.year,
                format_currency(point.value, 0, 0)
            ));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_uses_grouping_and_trims_fraction() {
        assert_eq!(format_currency(157_429.4, 0, 2), "£157,429.4");
        assert_eq!(format_currency(655.956, 0, 2), "£655.96");
        assert_eq!(format_currency(1_000_000.0, 0, 2), "£1,000,000");
        assert_eq!(format_currency(12.5, 2, 2), "£12.50");
        assert_eq!(format_currency(-1_234.0, 0, 2), "-£1,234");
        assert_eq!(format_currency(0.0, 0, 2), "£0");
    }

    #[test]
    fn rounding_to_zero_drops_the_sign() {
        assert_eq!(format_number(-0.001, 0, 2), "0");
    }

    #[test]
    fn non_finite_values_render_as_not_available() {
        assert_eq!(format_currency(f64::INFINITY, 0, 2), "n/a");
        assert_eq!(format_number(f64::NAN, 0, 2), "n/a");
    }

    #[test]
    fn metrics_format_by_unit() {
        let report = Report::new()
            .percent("rate", "Rate", 0.3375)
            .metric("years", "Years", 9.0065, Unit::Years)
            .metric("ratio", "LTI", 4.5, Unit::Ratio)
            .label("band", "Band", "D");
        let rendered: Vec<String> = report.metrics.iter().map(format_metric).collect();
        assert_eq!(rendered, vec!["33.75%", "9 years", "4.5x", "D"]);
    }

    #[test]
    fn text_rendering_lists_every_metric() {
        let report = Report::new()
            .currency("payment", "Monthly payment", 659.955)
            .currency("total", "Total paid", 158_389.38);
        let text = render_text("Annuity", &report);
        assert!(text.starts_with("Annuity\n"));
        assert!(text.contains("Monthly payment  £659.96"));
        assert!(text.contains("Total paid       £158,389.38"));
    }
}
