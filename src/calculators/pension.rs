use crate::core::ratio::percentage_of;
use crate::form::Form;
use crate::report::Report;

use super::uk;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PensionContributionInput {
    pub salary: f64,
    pub employee_percent: f64,
    pub employer_percent: f64,
    /// Auto-enrolment basis: only earnings between the lower and upper
    /// qualifying limits are pensionable.
    pub qualifying_earnings: bool,
}

impl PensionContributionInput {
    pub fn from_form(form: &Form) -> Self {
        Self {
            salary: form.number("salary"),
            employee_percent: form.number("employeePercent"),
            employer_percent: form.number("employerPercent"),
            qualifying_earnings: form.flag("qualifyingEarnings"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PensionContributionOutput {
    pub pensionable_pay: f64,
    pub employee_gross: f64,
    pub tax_relief: f64,
    pub employee_net_cost: f64,
    pub employer_contribution: f64,
    pub total_annual: f64,
    pub total_monthly: f64,
}

pub fn qualifying_earnings(salary: f64) -> f64 {
    salary.clamp(uk::QUALIFYING_EARNINGS_LOWER, uk::QUALIFYING_EARNINGS_UPPER)
        - uk::QUALIFYING_EARNINGS_LOWER
}

/// Relief at source: the employee pays 80% of their gross contribution and
/// the provider reclaims basic-rate relief on the rest.
pub fn pension_contributions(input: &PensionContributionInput) -> Option<PensionContributionOutput> {
    if input.salary <= 0.0
        || !input.salary.is_finite()
        || !input.employee_percent.is_finite()
        || !input.employer_percent.is_finite()
    {
        return None;
    }

    let pensionable_pay = if input.qualifying_earnings {
        qualifying_earnings(input.salary)
    } else {
        input.salary
    };
    let employee_gross = percentage_of(pensionable_pay, input.employee_percent.max(0.0) / 100.0);
    let employer_contribution =
        percentage_of(pensionable_pay, input.employer_percent.max(0.0) / 100.0);
    let tax_relief = percentage_of(employee_gross, uk::PENSION_BASIC_RELIEF);
    let total_annual = employee_gross + employer_contribution;

    Some(PensionContributionOutput {
        pensionable_pay,
        employee_gross,
        tax_relief,
        employee_net_cost: employee_gross - tax_relief,
        employer_contribution,
        total_annual,
        total_monthly: total_annual / 12.0,
    })
}

impl PensionContributionOutput {
    pub fn report(&self) -> Report {
        Report::new()
            .currency("pensionablePay", "Pensionable pay", self.pensionable_pay)
            .currency("employeeGross", "Your contribution (gross)", self.employee_gross)
            .currency("taxRelief", "Basic-rate tax relief", self.tax_relief)
            .currency("employeeNetCost", "Your cost after relief", self.employee_net_cost)
            .currency("employerContribution", "Employer contribution", self.employer_contribution)
            .currency("totalAnnual", "Total annual contribution", self.total_annual)
            .currency("totalMonthly", "Total monthly contribution", self.total_monthly)
    }
}
