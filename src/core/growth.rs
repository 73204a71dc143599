use super::amortization::{PERIODS_PER_YEAR, monthly_rate};
use super::types::{Growth, SeriesPoint};

/// Future value of a starting balance plus level monthly contributions.
///
/// Zero or negative rates are not computable: the annuity term divides by
/// the monthly rate. Neither is a term that is not positive.
pub fn grow_future(
    present_value: f64,
    periodic_contribution: f64,
    annual_rate_percent: f64,
    years: f64,
) -> Option<Growth> {
    if !years.is_finite() || years <= 0.0 {
        return None;
    }
    project(present_value, periodic_contribution, annual_rate_percent, years)
}

/// Closed form at `years` elapsed, including the opening balance at zero.
fn project(
    present_value: f64,
    periodic_contribution: f64,
    annual_rate_percent: f64,
    years: f64,
) -> Option<Growth> {
    if !annual_rate_percent.is_finite() || annual_rate_percent <= 0.0 || years < 0.0 {
        return None;
    }

    let m = monthly_rate(annual_rate_percent);
    let months = years * PERIODS_PER_YEAR;
    let compounded = (1.0 + m).powf(months);
    let future_value =
        present_value * compounded + periodic_contribution * ((compounded - 1.0) / m);
    let principal_contributed = present_value + periodic_contribution * months;

    let growth = Growth {
        future_value,
        principal_contributed,
        interest_earned: future_value - principal_contributed,
    };
    [
        growth.future_value,
        growth.principal_contributed,
        growth.interest_earned,
    ]
    .iter()
    .all(|v| v.is_finite())
    .then_some(growth)
}

/// Year-by-year projection. Every point is derived from elapsed time with
/// the closed form rather than carried forward from the previous point, so
/// rounding error does not accumulate along the series.
///
/// Points are emitted every `step` years starting at year 0; the final year
/// is always included.
pub fn growth_series(
    present_value: f64,
    periodic_contribution: f64,
    annual_rate_percent: f64,
    years: u32,
    step: u32,
) -> Option<Vec<SeriesPoint>> {
    let step = step.max(1);
    let mut points = Vec::with_capacity((years / step) as usize + 2);

    let mut year = 0;
    loop {
        let growth = project(
            present_value,
            periodic_contribution,
            annual_rate_percent,
            year as f64,
        )?;
        points.push(SeriesPoint {
            year,
            value: growth.future_value,
            contributed: growth.principal_contributed,
            interest: growth.interest_earned,
        });

        if year == years {
            break;
        }
        year = year.saturating_add(step).min(years);
    }

    Some(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn lump_sum_compounds_monthly() {
        let growth = grow_future(10_000.0, 0.0, 6.0, 10.0).expect("computable");
        assert_approx(growth.future_value, 10_000.0 * 1.005f64.powi(120));
        assert_approx(growth.principal_contributed, 10_000.0);
        assert_approx(
            growth.interest_earned,
            growth.future_value - growth.principal_contributed,
        );
    }

    #[test]
    fn contributions_follow_annuity_formula() {
        let growth = grow_future(0.0, 100.0, 12.0, 1.0).expect("computable");
        let expected = 100.0 * ((1.01f64.powi(12) - 1.0) / 0.01);
        assert_approx(growth.future_value, expected);
        assert_approx(growth.principal_contributed, 1_200.0);
    }

    #[test]
    fn zero_rate_is_not_computable() {
        assert!(grow_future(1_000.0, 100.0, 0.0, 10.0).is_none());
        assert!(grow_future(1_000.0, 100.0, -2.0, 10.0).is_none());
        assert!(growth_series(1_000.0, 100.0, 0.0, 10, 1).is_none());
    }

    #[test]
    fn zero_or_negative_term_is_not_computable() {
        assert!(grow_future(1_000.0, 100.0, 5.0, 0.0).is_none());
        assert!(grow_future(1_000.0, 100.0, 5.0, -1.0).is_none());
        assert!(grow_future(1_000.0, 100.0, 5.0, f64::NAN).is_none());
        assert!(grow_future(1_000.0, 100.0, 5.0, f64::INFINITY).is_none());
    }

    #[test]
    fn series_includes_final_year_when_step_does_not_divide() {
        let series = growth_series(1_000.0, 50.0, 5.0, 10, 3).expect("computable");
        let years: Vec<u32> = series.iter().map(|p| p.year).collect();
        assert_eq!(years, vec![0, 3, 6, 9, 10]);
        assert_approx(series[0].value, 1_000.0);
    }

    #[test]
    fn zero_year_series_has_single_point() {
        let series = growth_series(500.0, 10.0, 5.0, 0, 1).expect("computable");
        assert_eq!(series.len(), 1);
        assert_approx(series[0].value, 500.0);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(48))]

        #[test]
        fn prop_series_points_match_direct_evaluation(
            pv in 0u32..500_000,
            contribution in 0u32..5_000,
            rate_bp in 1u32..1_500,
            years in 0u32..60,
            step in 1u32..6
        ) {
            let rate = rate_bp as f64 / 100.0;
            let series = growth_series(pv as f64, contribution as f64, rate, years, step)
                .expect("computable");
            prop_assert_eq!(series.last().map(|p| p.year), Some(years));
            prop_assert_eq!(series[0].value, pv as f64);
            for point in series.iter().filter(|p| p.year > 0) {
                let direct = grow_future(pv as f64, contribution as f64, rate, point.year as f64)
                    .expect("computable");
                prop_assert_eq!(point.value, direct.future_value);
            }
        }

        #[test]
        fn prop_positive_rate_never_loses_money(
            pv in 0u32..500_000,
            contribution in 0u32..5_000,
            rate_bp in 1u32..1_500,
            years in 1u32..60
        ) {
            let growth = grow_future(pv as f64, contribution as f64, rate_bp as f64 / 100.0, years as f64)
                .expect("computable");
            prop_assert!(growth.future_value.is_finite());
            prop_assert!(growth.interest_earned >= -1e-6);
        }
    }
}
