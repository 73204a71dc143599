use crate::core::{BandBreakdown, DEFAULT_TAPER_RATE, apply_bands, tapered_allowance};
use crate::form::Form;
use crate::report::Report;

use super::uk::{self, StudentLoanPlan};

fn personal_allowance(total_income: f64) -> f64 {
    tapered_allowance(
        uk::PERSONAL_ALLOWANCE,
        total_income,
        uk::ALLOWANCE_TAPER_THRESHOLD,
        DEFAULT_TAPER_RATE,
    )
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectiveTaxInput {
    pub gross_income: f64,
}

impl EffectiveTaxInput {
    pub fn from_form(form: &Form) -> Self {
        Self {
            gross_income: form.number("grossIncome"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveTaxOutput {
    pub personal_allowance: f64,
    pub taxable_income: f64,
    pub income_tax: f64,
    pub national_insurance: f64,
    pub total_deductions: f64,
    pub take_home: f64,
    pub monthly_take_home: f64,
    pub effective_rate: f64,
    pub marginal_rate: f64,
    pub breakdown: Vec<BandBreakdown>,
}

/// Income tax and employee National Insurance on a salary.
pub fn effective_tax_rate(input: &EffectiveTaxInput) -> Option<EffectiveTaxOutput> {
    let gross = input.gross_income;
    if gross <= 0.0 || !gross.is_finite() {
        return None;
    }

    let allowance = personal_allowance(gross);
    let tax_bands = uk::income_tax_bands();
    let ni_bands = uk::national_insurance_bands();
    let income_tax = apply_bands(gross, allowance, &tax_bands);
    let national_insurance = apply_bands(gross, uk::NI_PRIMARY_THRESHOLD, &ni_bands);

    // Inside the taper every extra pound also removes 50p of allowance.
    let tax_marginal = if gross < allowance {
        0.0
    } else if allowance > 0.0 && gross > uk::ALLOWANCE_TAPER_THRESHOLD {
        tax_bands.marginal_rate(income_tax.taxable) * (1.0 + DEFAULT_TAPER_RATE)
    } else {
        tax_bands.marginal_rate(income_tax.taxable)
    };
    let ni_marginal = if gross < uk::NI_PRIMARY_THRESHOLD {
        0.0
    } else {
        ni_bands.marginal_rate(national_insurance.taxable)
    };

    let total_deductions = income_tax.tax_owed + national_insurance.tax_owed;
    let take_home = gross - total_deductions;
    let mut breakdown = income_tax.breakdown;
    breakdown.extend(national_insurance.breakdown);

    Some(EffectiveTaxOutput {
        personal_allowance: allowance,
        taxable_income: income_tax.taxable,
        income_tax: income_tax.tax_owed,
        national_insurance: national_insurance.tax_owed,
        total_deductions,
        take_home,
        monthly_take_home: take_home / 12.0,
        effective_rate: total_deductions / gross,
        marginal_rate: tax_marginal + ni_marginal,
        breakdown,
    })
}

impl EffectiveTaxOutput {
    pub fn report(&self) -> Report {
        Report::new()
            .currency("personalAllowance", "Personal allowance", self.personal_allowance)
            .currency("taxableIncome", "Taxable income", self.taxable_income)
            .currency("incomeTax", "Income tax", self.income_tax)
            .currency("nationalInsurance", "National Insurance", self.national_insurance)
            .currency("totalDeductions", "Total deductions", self.total_deductions)
            .currency("takeHome", "Annual take-home pay", self.take_home)
            .currency("monthlyTakeHome", "Monthly take-home pay", self.monthly_take_home)
            .percent("effectiveRate", "Effective tax rate", self.effective_rate)
            .percent("marginalRate", "Marginal rate", self.marginal_rate)
            .with_breakdown(self.breakdown.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DividendTaxInput {
    pub other_income: f64,
    pub dividend_income: f64,
}

impl DividendTaxInput {
    pub fn from_form(form: &Form) -> Self {
        Self {
            other_income: form.number("otherIncome").max(0.0),
            dividend_income: form.number("dividendIncome"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DividendTaxOutput {
    pub personal_allowance: f64,
    pub allowance_against_dividends: f64,
    pub dividend_allowance_used: f64,
    pub taxable_dividends: f64,
    pub dividend_tax: f64,
    pub effective_rate: f64,
    pub breakdown: Vec<BandBreakdown>,
}

/// Dividends are taxed as the top slice of income. Unused personal
/// allowance covers them first; the dividend allowance is taxed at 0% but
/// still fills band space.
pub fn dividend_tax(input: &DividendTaxInput) -> Option<DividendTaxOutput> {
    let dividends = input.dividend_income;
    if dividends <= 0.0 || !dividends.is_finite() || !input.other_income.is_finite() {
        return None;
    }

    let other = input.other_income.max(0.0);
    let allowance = personal_allowance(other + dividends);
    let other_taxable = (other - allowance).max(0.0);
    let unused_allowance = (allowance - other).max(0.0);

    let allowance_against_dividends = unused_allowance.min(dividends);
    let after_allowance = dividends - allowance_against_dividends;
    let dividend_allowance_used = after_allowance.min(uk::DIVIDEND_ALLOWANCE);
    let taxable_dividends = after_allowance - dividend_allowance_used;

    let bands = uk::dividend_bands().shifted(other_taxable + dividend_allowance_used);
    let result = apply_bands(taxable_dividends, 0.0, &bands);

    Some(DividendTaxOutput {
        personal_allowance: allowance,
        allowance_against_dividends,
        dividend_allowance_used,
        taxable_dividends,
        dividend_tax: result.tax_owed,
        effective_rate: result.tax_owed / dividends,
        breakdown: result.breakdown,
    })
}

impl DividendTaxOutput {
    pub fn report(&self) -> Report {
        Report::new()
            .currency("personalAllowance", "Personal allowance", self.personal_allowance)
            .currency(
                "allowanceAgainstDividends",
                "Personal allowance used by dividends",
                self.allowance_against_dividends,
            )
            .currency(
                "dividendAllowanceUsed",
                "Dividend allowance used",
                self.dividend_allowance_used,
            )
            .currency("taxableDividends", "Taxable dividends", self.taxable_dividends)
            .currency("dividendTax", "Dividend tax", self.dividend_tax)
            .percent("effectiveRate", "Effective rate on dividends", self.effective_rate)
            .with_breakdown(self.breakdown.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StudentLoanInput {
    pub income: f64,
    pub plan: Option<StudentLoanPlan>,
}

impl StudentLoanInput {
    pub fn from_form(form: &Form) -> Self {
        Self {
            income: form.number("income"),
            plan: StudentLoanPlan::parse(form.text("plan")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StudentLoanOutput {
    pub plan: StudentLoanPlan,
    pub threshold: f64,
    pub income_above_threshold: f64,
    pub annual_repayment: f64,
    pub monthly_repayment: f64,
}

pub fn student_loan(input: &StudentLoanInput) -> Option<StudentLoanOutput> {
    let plan = input.plan?;
    if input.income <= 0.0 || !input.income.is_finite() {
        return None;
    }

    let result = apply_bands(input.income, plan.threshold(), &plan.bands());
    Some(StudentLoanOutput {
        plan,
        threshold: plan.threshold(),
        income_above_threshold: result.taxable,
        annual_repayment: result.tax_owed,
        monthly_repayment: result.tax_owed / 12.0,
    })
}

impl StudentLoanOutput {
    pub fn report(&self) -> Report {
        Report::new()
            .label("plan", "Repayment plan", self.plan.label())
            .currency("threshold", "Repayment threshold", self.threshold)
            .currency(
                "incomeAboveThreshold",
                "Income above threshold",
                self.income_above_threshold,
            )
            .currency("annualRepayment", "Annual repayment", self.annual_repayment)
            .currency("monthlyRepayment", "Monthly repayment", self.monthly_repayment)
    }
}
