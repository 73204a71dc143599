use crate::core::{Growth, SeriesPoint, grow_future, growth_series, ratio};
use crate::form::Form;
use crate::report::{Report, Unit};

/// Longest projection a chart is built for.
pub const MAX_PROJECTION_YEARS: u32 = 100;
pub const DEFAULT_WITHDRAWAL_RATE: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompoundGrowthInput {
    pub initial_deposit: f64,
    pub monthly_contribution: f64,
    pub annual_rate: f64,
    pub years: u32,
    /// Years between chart points; zero is treated as one.
    pub series_step: u32,
}

impl CompoundGrowthInput {
    pub fn from_form(form: &Form) -> Self {
        Self {
            initial_deposit: form.number("initialDeposit"),
            monthly_contribution: form.number("monthlyContribution"),
            annual_rate: form.number("annualRate"),
            years: form.whole("years"),
            series_step: form.whole("seriesStep"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompoundGrowthOutput {
    pub growth: Growth,
    pub series: Vec<SeriesPoint>,
}

pub fn compound_growth(input: &CompoundGrowthInput) -> Option<CompoundGrowthOutput> {
    if input.years == 0 || input.years > MAX_PROJECTION_YEARS {
        return None;
    }
    let growth = grow_future(
        input.initial_deposit,
        input.monthly_contribution,
        input.annual_rate,
        input.years as f64,
    )?;
    let series = growth_series(
        input.initial_deposit,
        input.monthly_contribution,
        input.annual_rate,
        input.years,
        input.series_step,
    )?;
    Some(CompoundGrowthOutput { growth, series })
}

impl CompoundGrowthOutput {
    pub fn report(&self) -> Report {
        Report::new()
            .currency("futureValue", "Future value", self.growth.future_value)
            .currency(
                "totalContributed",
                "Total contributed",
                self.growth.principal_contributed,
            )
            .currency("interestEarned", "Interest earned", self.growth.interest_earned)
            .with_series(self.series.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetirementInput {
    pub current_age: u32,
    pub retirement_age: u32,
    pub current_pot: f64,
    pub monthly_contribution: f64,
    pub annual_rate: f64,
    /// Sustainable withdrawal rate in percent; zero means 4%.
    pub withdrawal_rate: f64,
}

impl RetirementInput {
    pub fn from_form(form: &Form) -> Self {
        Self {
            current_age: form.whole("currentAge"),
            retirement_age: form.whole("retirementAge"),
            current_pot: form.number("currentPot"),
            monthly_contribution: form.number("monthlyContribution"),
            annual_rate: form.number("annualRate"),
            withdrawal_rate: form.number("withdrawalRate"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RetirementOutput {
    pub years_to_retirement: u32,
    pub projected_pot: Growth,
    pub withdrawal_rate: f64,
    pub annual_income: f64,
    pub monthly_income: f64,
    /// One point per year of age, `year` being the age.
    pub series: Vec<SeriesPoint>,
}

/// Projects the pot to retirement. The chart uses the same closed form as
/// the headline figure for every year, so the last point equals it exactly.
pub fn retirement_savings(input: &RetirementInput) -> Option<RetirementOutput> {
    let years = input.retirement_age.checked_sub(input.current_age)?;
    if years == 0 || years > MAX_PROJECTION_YEARS {
        return None;
    }

    let projected_pot = grow_future(
        input.current_pot,
        input.monthly_contribution,
        input.annual_rate,
        years as f64,
    )?;
    let series = growth_series(
        input.current_pot,
        input.monthly_contribution,
        input.annual_rate,
        years,
        1,
    )?
    .into_iter()
    .map(|point| SeriesPoint {
        year: input.current_age + point.year,
        ..point
    })
    .collect();

    if !input.withdrawal_rate.is_finite() {
        return None;
    }
    let withdrawal_rate = if input.withdrawal_rate > 0.0 {
        input.withdrawal_rate
    } else {
        DEFAULT_WITHDRAWAL_RATE
    };
    let annual_income = ratio::percentage_of(projected_pot.future_value, withdrawal_rate / 100.0);

    Some(RetirementOutput {
        years_to_retirement: years,
        projected_pot,
        withdrawal_rate,
        annual_income,
        monthly_income: annual_income / 12.0,
        series,
    })
}

impl RetirementOutput {
    pub fn report(&self) -> Report {
        Report::new()
            .metric(
                "yearsToRetirement",
                "Years to retirement",
                self.years_to_retirement as f64,
                Unit::Years,
            )
            .currency("projectedPot", "Projected pot", self.projected_pot.future_value)
            .currency(
                "totalContributed",
                "Total contributed",
                self.projected_pot.principal_contributed,
            )
            .currency("investmentGrowth", "Investment growth", self.projected_pot.interest_earned)
            .percent("withdrawalRate", "Withdrawal rate", self.withdrawal_rate / 100.0)
            .currency("annualIncome", "Estimated annual income", self.annual_income)
            .currency("monthlyIncome", "Estimated monthly income", self.monthly_income)
            .with_series(self.series.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleOf72Input {
    pub annual_rate: f64,
}

impl RuleOf72Input {
    pub fn from_form(form: &Form) -> Self {
        Self {
            annual_rate: form.number("annualRate"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleOf72Output {
    pub estimated_years: f64,
    pub exact_years: Option<f64>,
}

pub fn rule_of_72(input: &RuleOf72Input) -> Option<RuleOf72Output> {
    if input.annual_rate <= 0.0 {
        return None;
    }
    Some(RuleOf72Output {
        estimated_years: ratio::rule_of_72(input.annual_rate)?,
        exact_years: ratio::exact_doubling_years(input.annual_rate),
    })
}

impl RuleOf72Output {
    pub fn report(&self) -> Report {
        let report = Report::new().metric(
            "estimatedYears",
            "Years to double (rule of 72)",
            self.estimated_years,
            Unit::Years,
        );
        match self.exact_years {
            Some(exact) => report.metric("exactYears", "Years to double (exact)", exact, Unit::Years),
            None => report,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert_eq, proptest};

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn retirement_input() -> RetirementInput {
        RetirementInput {
            current_age: 35,
            retirement_age: 67,
            current_pot: 40_000.0,
            monthly_contribution: 400.0,
            annual_rate: 5.0,
            withdrawal_rate: 0.0,
        }
    }

    #[test]
    fn compound_growth_reports_series_every_step() {
        let form = Form::default()
            .with("initialDeposit", "5000")
            .with("monthlyContribution", "200")
            .with("annualRate", "7")
            .with("years", "10")
            .with("seriesStep", "5");
        let out = compound_growth(&CompoundGrowthInput::from_form(&form)).expect("computable");
        let years: Vec<u32> = out.series.iter().map(|p| p.year).collect();
        assert_eq!(years, vec![0, 5, 10]);
        assert_approx(out.series[2].value, out.growth.future_value);
        assert_approx(out.growth.principal_contributed, 5_000.0 + 200.0 * 120.0);
    }

    #[test]
    fn compound_growth_rejects_zero_years_and_zero_rate() {
        let mut input = CompoundGrowthInput {
            initial_deposit: 1_000.0,
            monthly_contribution: 0.0,
            annual_rate: 5.0,
            years: 0,
            series_step: 1,
        };
        assert!(compound_growth(&input).is_none());
        input.years = 10;
        input.annual_rate = 0.0;
        assert!(compound_growth(&input).is_none());
        input.annual_rate = 5.0;
        input.years = MAX_PROJECTION_YEARS + 1;
        assert!(compound_growth(&input).is_none());
    }

    #[test]
    fn retirement_series_is_indexed_by_age_and_ends_at_projection() {
        let out = retirement_savings(&retirement_input()).expect("computable");
        assert_eq!(out.years_to_retirement, 32);
        assert_eq!(out.series.first().map(|p| p.year), Some(35));
        assert_eq!(out.series.last().map(|p| p.year), Some(67));
        assert_eq!(out.series.len(), 33);
        assert_eq!(
            out.series.last().map(|p| p.value),
            Some(out.projected_pot.future_value)
        );
        assert_approx(out.withdrawal_rate, DEFAULT_WITHDRAWAL_RATE);
        assert_approx(out.annual_income, out.projected_pot.future_value * 0.04);
    }

    #[test]
    fn retirement_age_must_be_after_current_age() {
        let mut input = retirement_input();
        input.retirement_age = 30;
        assert!(retirement_savings(&input).is_none());
        input.retirement_age = 35;
        assert!(retirement_savings(&input).is_none());
    }

    #[test]
    fn infinite_withdrawal_rate_has_no_result() {
        let mut input = retirement_input();
        input.withdrawal_rate = f64::INFINITY;
        assert!(retirement_savings(&input).is_none());
    }

    #[test]
    fn rule_of_72_reports_both_estimates() {
        let out = rule_of_72(&RuleOf72Input { annual_rate: 6.0 }).expect("computable");
        assert_approx(out.estimated_years, 12.0);
        assert!((out.exact_years.unwrap() - 11.895_661).abs() < 1e-5);
        assert!(rule_of_72(&RuleOf72Input { annual_rate: 0.0 }).is_none());
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(32))]

        #[test]
        fn prop_retirement_projection_is_referentially_transparent(
            current_age in 18u32..60,
            span in 1u32..40,
            pot in 0u32..500_000,
            contribution in 0u32..3_000,
            rate_bp in 1u32..1_200
        ) {
            let input = RetirementInput {
                current_age,
                retirement_age: current_age + span,
                current_pot: pot as f64,
                monthly_contribution: contribution as f64,
                annual_rate: rate_bp as f64 / 100.0,
                withdrawal_rate: 4.0,
            };
            let first = retirement_savings(&input);
            let second = retirement_savings(&input);
            prop_assert_eq!(first, second);
        }
    }
}
