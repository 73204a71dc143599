use super::types::{BandBreakdown, BandResult, BandTable};

/// £1 of allowance lost for every £2 of income over the taper threshold.
pub const DEFAULT_TAPER_RATE: f64 = 0.5;

/// Walks `bands` in ascending order after taking `allowance` off the top of
/// `amount`. Bands that raise no tax are left out of the breakdown but still
/// consume their share of the amount.
pub fn apply_bands(amount: f64, allowance: f64, bands: &BandTable) -> BandResult {
    let taxable = (amount - allowance.max(0.0)).max(0.0);
    let mut remaining = taxable;
    let mut lower = 0.0_f64;
    let mut tax_owed = 0.0;
    let mut breakdown = Vec::new();

    for band in bands.bands() {
        if remaining <= 0.0 {
            break;
        }

        let capacity = match band.limit {
            Some(limit) => (limit - lower).max(0.0),
            None => remaining,
        };
        if let Some(limit) = band.limit {
            lower = lower.max(limit);
        }

        let in_band = remaining.min(capacity);
        let tax_in_band = in_band * band.rate;
        tax_owed += tax_in_band;
        remaining -= in_band;

        if tax_in_band > 0.0 {
            breakdown.push(BandBreakdown {
                band_name: band.name.clone(),
                rate: band.rate,
                taxable_in_band: in_band,
                tax_in_band,
            });
        }
    }

    BandResult {
        taxable,
        tax_owed,
        breakdown,
    }
}

/// Allowance after tapering for high incomes.
pub fn tapered_allowance(
    base_allowance: f64,
    income: f64,
    taper_threshold: f64,
    taper_rate: f64,
) -> f64 {
    if income <= taper_threshold {
        return base_allowance;
    }
    (base_allowance - (income - taper_threshold) * taper_rate).max(0.0)
}
