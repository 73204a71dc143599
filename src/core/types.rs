use serde::Serialize;

/// Level repayment schedule for a fixed-rate loan (or the income a pot funds).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Amortization {
    pub payment: f64,
    pub total_paid: f64,
    pub total_interest: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Growth {
    pub future_value: f64,
    pub principal_contributed: f64,
    pub interest_earned: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    pub year: u32,
    pub value: f64,
    pub contributed: f64,
    pub interest: f64,
}

/// One slice of a progressive schedule. `limit` is the cumulative upper
/// bound measured from the end of the allowance; `None` marks the top band.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Band {
    pub name: String,
    pub limit: Option<f64>,
    pub rate: f64,
}

impl Band {
    pub fn capped(name: &str, limit: f64, rate: f64) -> Self {
        Self {
            name: name.to_string(),
            limit: Some(limit),
            rate,
        }
    }

    pub fn unbounded(name: &str, rate: f64) -> Self {
        Self {
            name: name.to_string(),
            limit: None,
            rate,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandTable {
    bands: Vec<Band>,
}

impl BandTable {
    /// Bands are ordered by ascending limit with the unbounded band last.
    pub fn new(mut bands: Vec<Band>) -> Self {
        bands.sort_by(|a, b| match (a.limit, b.limit) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        Self { bands }
    }

    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    /// Re-expresses the table for an amount that starts `offset` into it,
    /// e.g. dividends stacked on top of salary. Bands already filled by the
    /// offset collapse to zero width.
    pub fn shifted(&self, offset: f64) -> Self {
        let offset = offset.max(0.0);
        let bands = self
            .bands
            .iter()
            .map(|band| Band {
                name: band.name.clone(),
                limit: band.limit.map(|limit| (limit - offset).max(0.0)),
                rate: band.rate,
            })
            .collect();
        Self { bands }
    }

    /// Rate applied to the next pound above `taxable`.
    pub fn marginal_rate(&self, taxable: f64) -> f64 {
        self.bands
            .iter()
            .find(|band| band.limit.is_none_or(|limit| taxable < limit))
            .map(|band| band.rate)
            .unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BandBreakdown {
    pub band_name: String,
    pub rate: f64,
    pub taxable_in_band: f64,
    pub tax_in_band: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BandResult {
    pub taxable: f64,
    pub tax_owed: f64,
    pub breakdown: Vec<BandBreakdown>,
}
