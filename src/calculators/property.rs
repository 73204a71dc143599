use crate::core::{BandBreakdown, amortize, apply_bands};
use crate::form::Form;
use crate::report::{Report, Unit};

use super::uk::{self, CouncilTaxBand};

pub const DEFAULT_INCOME_MULTIPLE: f64 = 4.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffordabilityInput {
    pub annual_income: f64,
    pub partner_income: f64,
    pub deposit: f64,
    /// Lender's loan-to-income multiple; zero means the usual 4.5x.
    pub income_multiple: f64,
    pub annual_rate: f64,
    pub term_years: f64,
}

impl AffordabilityInput {
    pub fn from_form(form: &Form) -> Self {
        Self {
            annual_income: form.number("annualIncome"),
            partner_income: form.number("partnerIncome"),
            deposit: form.number("deposit").max(0.0),
            income_multiple: form.number("incomeMultiple"),
            annual_rate: form.number("annualRate"),
            term_years: form.number("termYears"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffordabilityOutput {
    pub combined_income: f64,
    pub income_multiple: f64,
    pub max_loan: f64,
    pub max_property_price: f64,
    pub loan_to_value: f64,
    pub monthly_payment: f64,
    pub total_repaid: f64,
}

pub fn mortgage_affordability(input: &AffordabilityInput) -> Option<AffordabilityOutput> {
    let combined_income = input.annual_income.max(0.0) + input.partner_income.max(0.0);
    let income_multiple = if input.income_multiple > 0.0 {
        input.income_multiple
    } else {
        DEFAULT_INCOME_MULTIPLE
    };
    let max_loan = combined_income * income_multiple;
    let schedule = amortize(max_loan, input.annual_rate, input.term_years)?;
    let max_property_price = max_loan + input.deposit;
    if !max_property_price.is_finite() {
        return None;
    }

    Some(AffordabilityOutput {
        combined_income,
        income_multiple,
        max_loan,
        max_property_price,
        loan_to_value: max_loan / max_property_price,
        monthly_payment: schedule.payment,
        total_repaid: schedule.total_paid,
    })
}

impl AffordabilityOutput {
    pub fn report(&self) -> Report {
        Report::new()
            .currency("combinedIncome", "Combined income", self.combined_income)
            .metric("incomeMultiple", "Loan-to-income multiple", self.income_multiple, Unit::Ratio)
            .currency("maxLoan", "Maximum borrowing", self.max_loan)
            .currency("maxPropertyPrice", "Maximum property price", self.max_property_price)
            .percent("loanToValue", "Loan-to-value", self.loan_to_value)
            .currency("monthlyPayment", "Monthly payment", self.monthly_payment)
            .currency("totalRepaid", "Total repaid", self.total_repaid)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanToValueInput {
    pub property_value: f64,
    pub loan_amount: f64,
}

impl LoanToValueInput {
    pub fn from_form(form: &Form) -> Self {
        Self {
            property_value: form.number("propertyValue"),
            loan_amount: form.number("loanAmount"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanToValueOutput {
    pub loan_to_value: f64,
    pub equity: f64,
    pub deposit_percent: f64,
}

pub fn loan_to_value(input: &LoanToValueInput) -> Option<LoanToValueOutput> {
    if input.property_value <= 0.0
        || !input.property_value.is_finite()
        || input.loan_amount < 0.0
        || !input.loan_amount.is_finite()
    {
        return None;
    }
    let ltv = input.loan_amount / input.property_value;
    Some(LoanToValueOutput {
        loan_to_value: ltv,
        equity: input.property_value - input.loan_amount,
        deposit_percent: 1.0 - ltv,
    })
}

impl LoanToValueOutput {
    pub fn report(&self) -> Report {
        Report::new()
            .percent("loanToValue", "Loan-to-value", self.loan_to_value)
            .currency("equity", "Equity", self.equity)
            .percent("depositPercent", "Deposit / equity share", self.deposit_percent)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StampDutyInput {
    pub price: f64,
    pub first_time_buyer: bool,
    pub additional_property: bool,
}

impl StampDutyInput {
    pub fn from_form(form: &Form) -> Self {
        Self {
            price: form.number("price"),
            first_time_buyer: form.flag("firstTimeBuyer"),
            additional_property: form.flag("additionalProperty"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StampDutyOutput {
    pub tax: f64,
    pub effective_rate: f64,
    pub relief_applied: bool,
    pub breakdown: Vec<BandBreakdown>,
}

/// Residential SDLT. First-time buyer relief only applies up to £625,000
/// and never alongside the additional-property surcharge; above the cap the
/// buyer pays standard rates on the whole price.
pub fn stamp_duty(input: &StampDutyInput) -> Option<StampDutyOutput> {
    if input.price <= 0.0 || !input.price.is_finite() {
        return None;
    }

    let relief_applied = input.first_time_buyer
        && !input.additional_property
        && input.price <= uk::FIRST_TIME_BUYER_PRICE_CAP;
    let bands = uk::stamp_duty_bands(relief_applied, input.additional_property);
    let result = apply_bands(input.price, 0.0, &bands);

    Some(StampDutyOutput {
        tax: result.tax_owed,
        effective_rate: result.tax_owed / input.price,
        relief_applied,
        breakdown: result.breakdown,
    })
}

impl StampDutyOutput {
    pub fn report(&self) -> Report {
        Report::new()
            .currency("stampDuty", "Stamp duty due", self.tax)
            .percent("effectiveRate", "Effective rate", self.effective_rate)
            .label(
                "firstTimeBuyerRelief",
                "First-time buyer relief",
                if self.relief_applied { "Applied" } else { "Not applied" },
            )
            .with_breakdown(self.breakdown.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CouncilTaxInput {
    pub band_d_charge: f64,
    pub band: Option<CouncilTaxBand>,
    pub property_value_1991: f64,
    pub discount_percent: f64,
}

impl CouncilTaxInput {
    pub fn from_form(form: &Form) -> Self {
        Self {
            band_d_charge: form.number("bandDCharge"),
            band: CouncilTaxBand::parse(form.text("band")),
            property_value_1991: form.number("propertyValue"),
            discount_percent: form.number("discountPercent"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CouncilTaxOutput {
    pub band: CouncilTaxBand,
    pub annual_charge: f64,
    pub discount: f64,
    pub monthly_over_12: f64,
    pub monthly_over_10: f64,
}

/// An explicit band letter wins; otherwise the band comes from the 1991
/// valuation.
pub fn council_tax(input: &CouncilTaxInput) -> Option<CouncilTaxOutput> {
    if input.band_d_charge <= 0.0 || !input.band_d_charge.is_finite() {
        return None;
    }
    let band = match input.band {
        Some(band) => band,
        None if input.property_value_1991 > 0.0 => {
            CouncilTaxBand::from_valuation(input.property_value_1991)
        }
        None => return None,
    };

    let full_charge = input.band_d_charge * band.ratio();
    let discount = full_charge * (input.discount_percent.clamp(0.0, 100.0) / 100.0);
    let annual_charge = full_charge - discount;

    Some(CouncilTaxOutput {
        band,
        annual_charge,
        discount,
        monthly_over_12: annual_charge / 12.0,
        monthly_over_10: annual_charge / 10.0,
    })
}

impl CouncilTaxOutput {
    pub fn report(&self) -> Report {
        Report::new()
            .label("band", "Council tax band", self.band.letter())
            .currency("annualCharge", "Annual charge", self.annual_charge)
            .currency("discount", "Discount", self.discount)
            .currency("monthlyOver12", "Monthly (12 instalments)", self.monthly_over_12)
            .currency("monthlyOver10", "Monthly (10 instalments)", self.monthly_over_10)
    }
}
