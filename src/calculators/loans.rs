use crate::core::{Amortization, amortize, outstanding_balance};
use crate::form::Form;
use crate::report::{Report, Unit};

/// Fixed-term annuity: the pot is paid out as a level monthly income.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnuityInput {
    pub pension_pot: f64,
    pub annual_rate: f64,
    pub term_years: f64,
}

impl AnnuityInput {
    pub fn from_form(form: &Form) -> Self {
        Self {
            pension_pot: form.number("pensionPot"),
            annual_rate: form.number("annualRate"),
            term_years: form.number("termYears"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnuityOutput {
    pub monthly_income: f64,
    pub annual_income: f64,
    pub total_payout: f64,
    pub total_interest: f64,
}

pub fn annuity(input: &AnnuityInput) -> Option<AnnuityOutput> {
    let schedule = amortize(input.pension_pot, input.annual_rate, input.term_years)?;
    Some(AnnuityOutput {
        monthly_income: schedule.payment,
        annual_income: schedule.payment * 12.0,
        total_payout: schedule.total_paid,
        total_interest: schedule.total_interest,
    })
}

impl AnnuityOutput {
    pub fn report(&self) -> Report {
        Report::new()
            .currency("monthlyIncome", "Monthly income", self.monthly_income)
            .currency("annualIncome", "Annual income", self.annual_income)
            .currency("totalPayout", "Total payout", self.total_payout)
            .currency("totalInterest", "Growth paid out", self.total_interest)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanTerms {
    pub amount: f64,
    pub annual_rate: f64,
    pub term_years: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanComparisonInput {
    pub loan_a: LoanTerms,
    pub loan_b: LoanTerms,
}

impl LoanComparisonInput {
    pub fn from_form(form: &Form) -> Self {
        let terms = |prefix: &str| LoanTerms {
            amount: form.number(&format!("{prefix}Amount")),
            annual_rate: form.number(&format!("{prefix}Rate")),
            term_years: form.number(&format!("{prefix}Term")),
        };
        Self {
            loan_a: terms("loanA"),
            loan_b: terms("loanB"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanComparisonOutput {
    pub loan_a: Amortization,
    pub loan_b: Amortization,
    /// Positive when loan B costs more per month.
    pub monthly_difference: f64,
    /// Positive when loan B costs more overall.
    pub total_difference: f64,
}

pub fn compare_loans(input: &LoanComparisonInput) -> Option<LoanComparisonOutput> {
    let a = &input.loan_a;
    let b = &input.loan_b;
    let loan_a = amortize(a.amount, a.annual_rate, a.term_years)?;
    let loan_b = amortize(b.amount, b.annual_rate, b.term_years)?;
    Some(LoanComparisonOutput {
        loan_a,
        loan_b,
        monthly_difference: loan_b.payment - loan_a.payment,
        total_difference: loan_b.total_paid - loan_a.total_paid,
    })
}

impl LoanComparisonOutput {
    pub fn cheaper_overall(&self) -> &'static str {
        if self.total_difference > 0.0 {
            "Loan A"
        } else if self.total_difference < 0.0 {
            "Loan B"
        } else {
            "Neither"
        }
    }

    pub fn report(&self) -> Report {
        Report::new()
            .currency("loanAPayment", "Loan A monthly payment", self.loan_a.payment)
            .currency("loanATotal", "Loan A total repaid", self.loan_a.total_paid)
            .currency("loanAInterest", "Loan A total interest", self.loan_a.total_interest)
            .currency("loanBPayment", "Loan B monthly payment", self.loan_b.payment)
            .currency("loanBTotal", "Loan B total repaid", self.loan_b.total_paid)
            .currency("loanBInterest", "Loan B total interest", self.loan_b.total_interest)
            .currency("monthlyDifference", "Monthly difference (B - A)", self.monthly_difference)
            .currency("totalDifference", "Total difference (B - A)", self.total_difference)
            .label("cheaper", "Cheaper overall", self.cheaper_overall())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RemortgageInput {
    pub outstanding_balance: f64,
    pub current_rate: f64,
    pub remaining_term_years: f64,
    pub new_rate: f64,
    pub new_term_years: f64,
    pub fees: f64,
    /// Length of the new deal's fixed period; zero skips the end-of-deal balance.
    pub fixed_period_years: u32,
}

impl RemortgageInput {
    pub fn from_form(form: &Form) -> Self {
        Self {
            outstanding_balance: form.number("outstandingBalance"),
            current_rate: form.number("currentRate"),
            remaining_term_years: form.number("remainingTerm"),
            new_rate: form.number("newRate"),
            new_term_years: form.number("newTerm"),
            fees: form.number("fees").max(0.0),
            fixed_period_years: form.whole("fixedPeriodYears"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RemortgageOutput {
    pub current_payment: f64,
    pub new_payment: f64,
    pub monthly_saving: f64,
    pub current_total: f64,
    pub new_total: f64,
    pub total_saving_after_fees: f64,
    /// Months of savings needed to cover the fees; `None` if the new deal
    /// never pays for itself.
    pub break_even_months: Option<f64>,
    pub balance_after_fixed_period: Option<f64>,
}

pub fn remortgage(input: &RemortgageInput) -> Option<RemortgageOutput> {
    if !input.fees.is_finite() {
        return None;
    }
    let current = amortize(
        input.outstanding_balance,
        input.current_rate,
        input.remaining_term_years,
    )?;
    let proposed = amortize(input.outstanding_balance, input.new_rate, input.new_term_years)?;

    let monthly_saving = current.payment - proposed.payment;
    let break_even_months = if input.fees <= 0.0 {
        Some(0.0)
    } else if monthly_saving > 0.0 {
        Some((input.fees / monthly_saving).ceil())
    } else {
        None
    };

    let balance_after_fixed_period = if input.fixed_period_years == 0 {
        None
    } else {
        let payments = input
            .fixed_period_years
            .saturating_mul(12)
            .min((input.new_term_years * 12.0).ceil() as u32);
        outstanding_balance(
            input.outstanding_balance,
            input.new_rate,
            input.new_term_years,
            payments,
        )
    };

    Some(RemortgageOutput {
        current_payment: current.payment,
        new_payment: proposed.payment,
        monthly_saving,
        current_total: current.total_paid,
        new_total: proposed.total_paid,
        total_saving_after_fees: current.total_paid - proposed.total_paid - input.fees,
        break_even_months,
        balance_after_fixed_period,
    })
}

impl RemortgageOutput {
    pub fn report(&self) -> Report {
        let mut report = Report::new()
            .currency("currentPayment", "Current monthly payment", self.current_payment)
            .currency("newPayment", "New monthly payment", self.new_payment)
            .currency("monthlySaving", "Monthly saving", self.monthly_saving)
            .currency("currentTotal", "Total cost, current deal", self.current_total)
            .currency("newTotal", "Total cost, new deal", self.new_total)
            .currency(
                "totalSavingAfterFees",
                "Total saving after fees",
                self.total_saving_after_fees,
            );
        report = match self.break_even_months {
            Some(months) => report.metric("breakEvenMonths", "Break-even", months, Unit::Months),
            None => report.label("breakEvenMonths", "Break-even", "Never"),
        };
        if let Some(balance) = self.balance_after_fixed_period {
            report = report.currency(
                "balanceAfterFixedPeriod",
                "Balance at end of fixed period",
                balance,
            );
        }
        report
    }
}
