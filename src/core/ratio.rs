//! Single-step percentage arithmetic. Rates are fractions (0.2 for 20%)
//! unless the name says `percent`.

pub fn percentage_of(amount: f64, rate: f64) -> f64 {
    amount * rate
}

pub fn add_percentage(amount: f64, rate: f64) -> f64 {
    amount * (1.0 + rate)
}

/// Inverse of [`add_percentage`]. `None` when `rate` is -100%.
pub fn remove_percentage(amount: f64, rate: f64) -> Option<f64> {
    let divisor = 1.0 + rate;
    if divisor == 0.0 {
        return None;
    }
    Some(amount / divisor)
}

pub fn add_vat(net: f64, rate: f64) -> f64 {
    add_percentage(net, rate)
}

pub fn remove_vat(gross: f64, rate: f64) -> Option<f64> {
    remove_percentage(gross, rate)
}

/// Years for money to double at `rate_percent` a year, by the rule of 72.
pub fn rule_of_72(rate_percent: f64) -> Option<f64> {
    if rate_percent == 0.0 || !rate_percent.is_finite() {
        return None;
    }
    Some(72.0 / rate_percent)
}

/// Exact doubling time under annual compounding.
pub fn exact_doubling_years(rate_percent: f64) -> Option<f64> {
    if rate_percent <= 0.0 || !rate_percent.is_finite() {
        return None;
    }
    Some(std::f64::consts::LN_2 / (rate_percent / 100.0).ln_1p())
}
