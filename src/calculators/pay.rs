use crate::core::ratio::{add_percentage, add_vat, percentage_of, remove_vat};
use crate::form::Form;
use crate::report::Report;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommissionInput {
    pub sales_amount: f64,
    pub commission_rate: f64,
    pub base_salary: f64,
}

impl CommissionInput {
    pub fn from_form(form: &Form) -> Self {
        Self {
            sales_amount: form.number("salesAmount"),
            commission_rate: form.number("commissionRate"),
            base_salary: form.number("baseSalary"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommissionOutput {
    pub commission: f64,
    pub base_salary: f64,
    pub total_earnings: f64,
}

pub fn commission(input: &CommissionInput) -> Option<CommissionOutput> {
    if input.sales_amount <= 0.0 || input.commission_rate < 0.0 {
        return None;
    }
    let commission = percentage_of(input.sales_amount, input.commission_rate / 100.0);
    let base_salary = input.base_salary.max(0.0);
    let total_earnings = commission + base_salary;
    if !total_earnings.is_finite() {
        return None;
    }
    Some(CommissionOutput {
        commission,
        base_salary,
        total_earnings,
    })
}

impl CommissionOutput {
    pub fn report(&self) -> Report {
        Report::new()
            .currency("commission", "Commission earned", self.commission)
            .currency("baseSalary", "Base salary", self.base_salary)
            .currency("totalEarnings", "Total earnings", self.total_earnings)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VatInput {
    pub amount: f64,
    /// Percent, e.g. 20 for the standard rate.
    pub vat_rate: f64,
}

impl VatInput {
    pub fn from_form(form: &Form) -> Self {
        Self {
            amount: form.number("amount"),
            vat_rate: form.number("vatRate"),
        }
    }
}

/// `amount` read both ways: as a net price with VAT to add, and as a gross
/// price with VAT included.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VatOutput {
    pub gross_from_net: f64,
    pub vat_added: f64,
    pub net_from_gross: f64,
    pub vat_included: f64,
}

pub fn vat(input: &VatInput) -> Option<VatOutput> {
    if input.amount <= 0.0 || input.vat_rate < 0.0 {
        return None;
    }
    let rate = input.vat_rate / 100.0;
    let gross_from_net = add_vat(input.amount, rate);
    let net_from_gross = remove_vat(input.amount, rate)?;
    if !gross_from_net.is_finite() {
        return None;
    }
    Some(VatOutput {
        gross_from_net,
        vat_added: gross_from_net - input.amount,
        net_from_gross,
        vat_included: input.amount - net_from_gross,
    })
}

impl VatOutput {
    pub fn report(&self) -> Report {
        Report::new()
            .currency("grossFromNet", "Price including VAT", self.gross_from_net)
            .currency("vatAdded", "VAT added", self.vat_added)
            .currency("netFromGross", "Price excluding VAT", self.net_from_gross)
            .currency("vatIncluded", "VAT included", self.vat_included)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SalaryIncreaseInput {
    pub current_salary: f64,
    pub increase_percent: f64,
}

impl SalaryIncreaseInput {
    pub fn from_form(form: &Form) -> Self {
        Self {
            current_salary: form.number("currentSalary"),
            increase_percent: form.number("increasePercent"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SalaryIncreaseOutput {
    pub new_salary: f64,
    pub annual_increase: f64,
    pub monthly_salary: f64,
    pub monthly_increase: f64,
}

/// Negative percentages model a pay cut.
pub fn salary_increase(input: &SalaryIncreaseInput) -> Option<SalaryIncreaseOutput> {
    if input.current_salary <= 0.0 || !input.increase_percent.is_finite() {
        return None;
    }
    let new_salary = add_percentage(input.current_salary, input.increase_percent / 100.0);
    if !new_salary.is_finite() {
        return None;
    }
    let annual_increase = new_salary - input.current_salary;
    Some(SalaryIncreaseOutput {
        new_salary,
        annual_increase,
        monthly_salary: new_salary / 12.0,
        monthly_increase: annual_increase / 12.0,
    })
}

impl SalaryIncreaseOutput {
    pub fn report(&self) -> Report {
        Report::new()
            .currency("newSalary", "New salary", self.new_salary)
            .currency("annualIncrease", "Annual increase", self.annual_increase)
            .currency("monthlySalary", "New monthly salary", self.monthly_salary)
            .currency("monthlyIncrease", "Monthly increase", self.monthly_increase)
    }
}
