use super::types::Amortization;

pub const PERIODS_PER_YEAR: f64 = 12.0;

pub fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 100.0 / PERIODS_PER_YEAR
}

/// Level monthly payment that clears `principal` over `term_years`.
///
/// Returns `None` when the rate, term or principal is not positive, or when
/// the inputs are so large that the result would not be finite.
pub fn amortize(principal: f64, annual_rate_percent: f64, term_years: f64) -> Option<Amortization> {
    if [principal, annual_rate_percent, term_years]
        .iter()
        .any(|v| !v.is_finite() || *v <= 0.0)
    {
        return None;
    }

    let r = monthly_rate(annual_rate_percent);
    let n = term_years * PERIODS_PER_YEAR;
    let denom = 1.0 - (1.0 + r).powf(-n);
    if denom <= 0.0 {
        return None;
    }

    let payment = principal * r / denom;
    let total_paid = payment * n;
    let result = Amortization {
        payment,
        total_paid,
        total_interest: total_paid - principal,
    };

    [result.payment, result.total_paid, result.total_interest]
        .iter()
        .all(|v| v.is_finite())
        .then_some(result)
}

/// Balance left after `payments_made` level payments.
pub fn outstanding_balance(
    principal: f64,
    annual_rate_percent: f64,
    term_years: f64,
    payments_made: u32,
) -> Option<f64> {
    let schedule = amortize(principal, annual_rate_percent, term_years)?;
    let r = monthly_rate(annual_rate_percent);
    let growth = (1.0 + r).powf(payments_made as f64);
    let balance = principal * growth - schedule.payment * (growth - 1.0) / r;
    balance.is_finite().then_some(balance.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, proptest};

    const EPS: f64 = 1e-6;

    fn assert_approx_tol(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected}, got {actual}, tolerance {tol}"
        );
    }

    #[test]
    fn annuity_example_matches_hand_calculation() {
        let schedule = amortize(100_000.0, 5.0, 20.0).expect("computable");
        assert_approx_tol(schedule.payment, 659.955_739, 1e-5);
        assert_approx_tol(schedule.total_paid, 158_389.377_412, 1e-3);
        assert_approx_tol(schedule.total_interest, 58_389.377_412, 1e-3);
    }

    #[test]
    fn non_positive_inputs_are_not_computable() {
        assert!(amortize(100_000.0, 0.0, 20.0).is_none());
        assert!(amortize(100_000.0, -1.0, 20.0).is_none());
        assert!(amortize(100_000.0, 5.0, 0.0).is_none());
        assert!(amortize(0.0, 5.0, 20.0).is_none());
        assert!(amortize(-5.0, 5.0, 20.0).is_none());
    }

    #[test]
    fn nan_and_infinite_inputs_are_not_computable() {
        assert!(amortize(f64::NAN, 5.0, 20.0).is_none());
        assert!(amortize(f64::INFINITY, 5.0, 20.0).is_none());
        assert!(amortize(100_000.0, f64::INFINITY, 20.0).is_none());
    }

    #[test]
    fn outstanding_balance_runs_down_to_zero() {
        assert_approx_tol(
            outstanding_balance(100_000.0, 5.0, 20.0, 0).unwrap(),
            100_000.0,
            EPS,
        );
        assert_approx_tol(outstanding_balance(100_000.0, 5.0, 20.0, 240).unwrap(), 0.0, 1e-4);
        let halfway = outstanding_balance(100_000.0, 5.0, 20.0, 120).unwrap();
        assert!(halfway > 50_000.0 && halfway < 100_000.0);
    }

    #[test]
    fn payment_counts_beyond_i32_do_not_wrap() {
        assert!(outstanding_balance(100_000.0, 5.0, 20.0, u32::MAX).is_none());
        let past_term = outstanding_balance(100_000.0, 5.0, 20.0, 300).unwrap();
        assert_approx_tol(past_term, 0.0, EPS);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_payment_positive_and_total_consistent(
            principal in 1u32..2_000_000,
            rate_bp in 1u32..2_000,
            term in 1u32..41
        ) {
            let rate = rate_bp as f64 / 100.0;
            let schedule = amortize(principal as f64, rate, term as f64).expect("computable");
            prop_assert!(schedule.payment > 0.0);
            let expected_total = schedule.payment * term as f64 * 12.0;
            prop_assert!((schedule.total_paid - expected_total).abs() <= 1e-6 * expected_total.max(1.0));
            prop_assert!(schedule.total_interest >= -1e-6);
        }

        #[test]
        fn prop_zero_rate_or_term_never_yields_a_number(
            principal in 0u32..2_000_000,
            term in -5i32..1
        ) {
            prop_assert!(amortize(principal as f64, 0.0, 20.0).is_none());
            prop_assert!(amortize(principal as f64, 5.0, term as f64).is_none());
        }
    }
}
