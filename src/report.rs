use serde::Serialize;

use crate::core::{BandBreakdown, SeriesPoint};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Currency,
    Percent,
    Years,
    Months,
    Ratio,
    Count,
    Text,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    pub key: &'static str,
    pub label: &'static str,
    pub value: f64,
    pub unit: Unit,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Everything a front end needs to render one calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub metrics: Vec<Metric>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub breakdown: Vec<BandBreakdown>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub series: Vec<SeriesPoint>,
}

impl Report {
    pub fn new() -> Self {
        Self {
            metrics: Vec::new(),
            breakdown: Vec::new(),
            series: Vec::new(),
        }
    }

    pub fn metric(mut self, key: &'static str, label: &'static str, value: f64, unit: Unit) -> Self {
        self.metrics.push(Metric {
            key,
            label,
            value,
            unit,
            text: None,
        });
        self
    }

    pub fn currency(self, key: &'static str, label: &'static str, value: f64) -> Self {
        self.metric(key, label, value, Unit::Currency)
    }

    /// `value` is a fraction; it is rendered as a percentage.
    pub fn percent(self, key: &'static str, label: &'static str, value: f64) -> Self {
        self.metric(key, label, value, Unit::Percent)
    }

    pub fn label(mut self, key: &'static str, label: &'static str, text: impl Into<String>) -> Self {
        self.metrics.push(Metric {
            key,
            label,
            value: 0.0,
            unit: Unit::Text,
            text: Some(text.into()),
        });
        self
    }

    pub fn with_breakdown(mut self, breakdown: Vec<BandBreakdown>) -> Self {
        self.breakdown.extend(breakdown);
        self
    }

    pub fn with_series(mut self, series: Vec<SeriesPoint>) -> Self {
        self.series = series;
        self
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.metrics.iter().find(|m| m.key == key).map(|m| m.value)
    }
}

impl Default for Report {
    fn default() -> Self {
        Self::new()
    }
}

/// A report tagged with the calculator that produced it. `computable` is
/// false, and the report fields absent, when the inputs gave no result.
#[derive(Debug, Clone, Serialize)]
pub struct Calculation<'a> {
    pub calculator: &'static str,
    pub title: &'static str,
    pub computable: bool,
    #[serde(flatten)]
    pub report: Option<&'a Report>,
}

impl<'a> Calculation<'a> {
    pub fn new(calculator: &'static str, title: &'static str, report: Option<&'a Report>) -> Self {
        Self {
            calculator,
            title,
            computable: report.is_some(),
            report,
        }
    }
}
