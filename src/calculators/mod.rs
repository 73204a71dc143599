//! The registry of calculators behind the CLI and the HTTP API. Each
//! calculator reads its inputs from a [`Form`] and yields a [`Report`], or
//! nothing when the inputs make the figures meaningless.

mod budget;
mod loans;
mod pay;
mod pension;
mod property;
mod savings;
mod tax;
pub mod uk;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::form::Form;
use crate::report::Report;

pub use budget::{
    TravelBudgetInput, TravelBudgetOutput, WEDDING_CATEGORIES, WeddingBudgetInput,
    WeddingBudgetOutput, travel_budget, wedding_budget,
};
pub use loans::{
    AnnuityInput, AnnuityOutput, LoanComparisonInput, LoanComparisonOutput, LoanTerms,
    RemortgageInput, RemortgageOutput, annuity, compare_loans, remortgage,
};
pub use pay::{
    CommissionInput, CommissionOutput, SalaryIncreaseInput, SalaryIncreaseOutput, VatInput,
    VatOutput, commission, salary_increase, vat,
};
pub use pension::{
    PensionContributionInput, PensionContributionOutput, pension_contributions,
    qualifying_earnings,
};
pub use property::{
    AffordabilityInput, AffordabilityOutput, CouncilTaxInput, CouncilTaxOutput, LoanToValueInput,
    LoanToValueOutput, StampDutyInput, StampDutyOutput, council_tax, loan_to_value,
    mortgage_affordability, stamp_duty,
};
pub use savings::{
    CompoundGrowthInput, CompoundGrowthOutput, DEFAULT_WITHDRAWAL_RATE, MAX_PROJECTION_YEARS,
    RetirementInput, RetirementOutput, RuleOf72Input, RuleOf72Output, compound_growth,
    retirement_savings, rule_of_72,
};
pub use tax::{
    DividendTaxInput, DividendTaxOutput, EffectiveTaxInput, EffectiveTaxOutput,
    StudentLoanInput, StudentLoanOutput, dividend_tax, effective_tax_rate, student_loan,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Number,
    Flag,
    Text,
}

/// One input a calculator reads, by its form name.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Field {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

const fn number(name: &'static str, label: &'static str) -> Field {
    Field {
        name,
        label,
        kind: FieldKind::Number,
    }
}

const fn flag(name: &'static str, label: &'static str) -> Field {
    Field {
        name,
        label,
        kind: FieldKind::Flag,
    }
}

const fn text(name: &'static str, label: &'static str) -> Field {
    Field {
        name,
        label,
        kind: FieldKind::Text,
    }
}

const ANNUITY_FIELDS: &[Field] = &[
    number("pensionPot", "Pension pot"),
    number("annualRate", "Annuity rate (%)"),
    number("termYears", "Term (years)"),
];

const LOAN_COMPARISON_FIELDS: &[Field] = &[
    number("loanAAmount", "Loan A amount"),
    number("loanARate", "Loan A rate (%)"),
    number("loanATerm", "Loan A term (years)"),
    number("loanBAmount", "Loan B amount"),
    number("loanBRate", "Loan B rate (%)"),
    number("loanBTerm", "Loan B term (years)"),
];

const REMORTGAGE_FIELDS: &[Field] = &[
    number("outstandingBalance", "Outstanding balance"),
    number("currentRate", "Current rate (%)"),
    number("remainingTerm", "Remaining term (years)"),
    number("newRate", "New rate (%)"),
    number("newTerm", "New term (years)"),
    number("fees", "Arrangement fees"),
    number("fixedPeriodYears", "Fixed period (years)"),
];

const MORTGAGE_AFFORDABILITY_FIELDS: &[Field] = &[
    number("annualIncome", "Annual income"),
    number("partnerIncome", "Partner income"),
    number("deposit", "Deposit"),
    number("incomeMultiple", "Income multiple"),
    number("annualRate", "Interest rate (%)"),
    number("termYears", "Term (years)"),
];

const LOAN_TO_VALUE_FIELDS: &[Field] = &[
    number("propertyValue", "Property value"),
    number("loanAmount", "Loan amount"),
];

const STAMP_DUTY_FIELDS: &[Field] = &[
    number("price", "Purchase price"),
    flag("firstTimeBuyer", "First-time buyer"),
    flag("additionalProperty", "Additional property"),
];

const COUNCIL_TAX_FIELDS: &[Field] = &[
    number("bandDCharge", "Band D charge"),
    text("band", "Band (A-H)"),
    number("propertyValue", "1991 property value"),
    number("discountPercent", "Discount (%)"),
];

const COMPOUND_GROWTH_FIELDS: &[Field] = &[
    number("initialDeposit", "Initial deposit"),
    number("monthlyContribution", "Monthly contribution"),
    number("annualRate", "Annual rate (%)"),
    number("years", "Years"),
    number("seriesStep", "Chart step (years)"),
];

const RETIREMENT_SAVINGS_FIELDS: &[Field] = &[
    number("currentAge", "Current age"),
    number("retirementAge", "Retirement age"),
    number("currentPot", "Current pot"),
    number("monthlyContribution", "Monthly contribution"),
    number("annualRate", "Annual growth (%)"),
    number("withdrawalRate", "Withdrawal rate (%)"),
];

const PENSION_CONTRIBUTIONS_FIELDS: &[Field] = &[
    number("salary", "Salary"),
    number("employeePercent", "Employee contribution (%)"),
    number("employerPercent", "Employer contribution (%)"),
    flag("qualifyingEarnings", "Qualifying earnings only"),
];

const EFFECTIVE_TAX_RATE_FIELDS: &[Field] = &[number("grossIncome", "Gross income")];

const DIVIDEND_TAX_FIELDS: &[Field] = &[
    number("otherIncome", "Other taxable income"),
    number("dividendIncome", "Dividend income"),
];

const STUDENT_LOAN_FIELDS: &[Field] = &[
    number("income", "Annual income"),
    text("plan", "Plan (1, 2, 4, 5 or postgraduate)"),
];

const COMMISSION_FIELDS: &[Field] = &[
    number("salesAmount", "Sales amount"),
    number("commissionRate", "Commission rate (%)"),
    number("baseSalary", "Base salary"),
];

const VAT_FIELDS: &[Field] = &[number("amount", "Amount"), number("vatRate", "VAT rate (%)")];

const SALARY_INCREASE_FIELDS: &[Field] = &[
    number("currentSalary", "Current salary"),
    number("increasePercent", "Increase (%)"),
];

const RULE_OF_72_FIELDS: &[Field] = &[number("annualRate", "Annual rate (%)")];

const WEDDING_BUDGET_FIELDS: &[Field] = &[
    number("totalBudget", "Total budget"),
    number("guests", "Guests"),
];

const TRAVEL_BUDGET_FIELDS: &[Field] = &[
    number("flightsPerPerson", "Flights per person"),
    number("accommodationPerNight", "Accommodation per night"),
    number("nights", "Nights"),
    number("dailySpendPerPerson", "Daily spend per person"),
    number("travellers", "Travellers"),
    number("contingencyPercent", "Contingency (%)"),
];

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum CalculatorKind {
    Annuity,
    LoanComparison,
    Remortgage,
    MortgageAffordability,
    LoanToValue,
    StampDuty,
    CouncilTax,
    CompoundGrowth,
    RetirementSavings,
    PensionContributions,
    EffectiveTaxRate,
    DividendTax,
    StudentLoan,
    Commission,
    Vat,
    SalaryIncrease,
    #[serde(rename = "rule-of-72")]
    #[value(name = "rule-of-72")]
    RuleOf72,
    WeddingBudget,
    TravelBudget,
}

impl CalculatorKind {
    pub const ALL: [Self; 19] = [
        Self::Annuity,
        Self::LoanComparison,
        Self::Remortgage,
        Self::MortgageAffordability,
        Self::LoanToValue,
        Self::StampDuty,
        Self::CouncilTax,
        Self::CompoundGrowth,
        Self::RetirementSavings,
        Self::PensionContributions,
        Self::EffectiveTaxRate,
        Self::DividendTax,
        Self::StudentLoan,
        Self::Commission,
        Self::Vat,
        Self::SalaryIncrease,
        Self::RuleOf72,
        Self::WeddingBudget,
        Self::TravelBudget,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Self::Annuity => "annuity",
            Self::LoanComparison => "loan-comparison",
            Self::Remortgage => "remortgage",
            Self::MortgageAffordability => "mortgage-affordability",
            Self::LoanToValue => "loan-to-value",
            Self::StampDuty => "stamp-duty",
            Self::CouncilTax => "council-tax",
            Self::CompoundGrowth => "compound-growth",
            Self::RetirementSavings => "retirement-savings",
            Self::PensionContributions => "pension-contributions",
            Self::EffectiveTaxRate => "effective-tax-rate",
            Self::DividendTax => "dividend-tax",
            Self::StudentLoan => "student-loan",
            Self::Commission => "commission",
            Self::Vat => "vat",
            Self::SalaryIncrease => "salary-increase",
            Self::RuleOf72 => "rule-of-72",
            Self::WeddingBudget => "wedding-budget",
            Self::TravelBudget => "travel-budget",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.id().eq_ignore_ascii_case(id))
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Annuity => "Annuity income",
            Self::LoanComparison => "Loan comparison",
            Self::Remortgage => "Remortgage savings",
            Self::MortgageAffordability => "Mortgage affordability",
            Self::LoanToValue => "Loan to value",
            Self::StampDuty => "Stamp Duty Land Tax",
            Self::CouncilTax => "Council tax",
            Self::CompoundGrowth => "Compound growth",
            Self::RetirementSavings => "Retirement savings",
            Self::PensionContributions => "Pension contributions",
            Self::EffectiveTaxRate => "Effective tax rate",
            Self::DividendTax => "Dividend tax",
            Self::StudentLoan => "Student loan repayments",
            Self::Commission => "Commission",
            Self::Vat => "VAT",
            Self::SalaryIncrease => "Salary increase",
            Self::RuleOf72 => "Rule of 72",
            Self::WeddingBudget => "Wedding budget",
            Self::TravelBudget => "Travel budget",
        }
    }

    pub fn fields(self) -> &'static [Field] {
        match self {
            Self::Annuity => ANNUITY_FIELDS,
            Self::LoanComparison => LOAN_COMPARISON_FIELDS,
            Self::Remortgage => REMORTGAGE_FIELDS,
            Self::MortgageAffordability => MORTGAGE_AFFORDABILITY_FIELDS,
            Self::LoanToValue => LOAN_TO_VALUE_FIELDS,
            Self::StampDuty => STAMP_DUTY_FIELDS,
            Self::CouncilTax => COUNCIL_TAX_FIELDS,
            Self::CompoundGrowth => COMPOUND_GROWTH_FIELDS,
            Self::RetirementSavings => RETIREMENT_SAVINGS_FIELDS,
            Self::PensionContributions => PENSION_CONTRIBUTIONS_FIELDS,
            Self::EffectiveTaxRate => EFFECTIVE_TAX_RATE_FIELDS,
            Self::DividendTax => DIVIDEND_TAX_FIELDS,
            Self::StudentLoan => STUDENT_LOAN_FIELDS,
            Self::Commission => COMMISSION_FIELDS,
            Self::Vat => VAT_FIELDS,
            Self::SalaryIncrease => SALARY_INCREASE_FIELDS,
            Self::RuleOf72 => RULE_OF_72_FIELDS,
            Self::WeddingBudget => WEDDING_BUDGET_FIELDS,
            Self::TravelBudget => TRAVEL_BUDGET_FIELDS,
        }
    }

    pub fn evaluate(self, form: &Form) -> Option<Report> {
        let report = match self {
            Self::Annuity => annuity(&AnnuityInput::from_form(form)).map(|out| out.report()),
            Self::LoanComparison => {
                compare_loans(&LoanComparisonInput::from_form(form)).map(|out| out.report())
            }
            Self::Remortgage => remortgage(&RemortgageInput::from_form(form)).map(|out| out.report()),
            Self::MortgageAffordability => {
                mortgage_affordability(&AffordabilityInput::from_form(form)).map(|out| out.report())
            }
            Self::LoanToValue => {
                loan_to_value(&LoanToValueInput::from_form(form)).map(|out| out.report())
            }
            Self::StampDuty => stamp_duty(&StampDutyInput::from_form(form)).map(|out| out.report()),
            Self::CouncilTax => {
                council_tax(&CouncilTaxInput::from_form(form)).map(|out| out.report())
            }
            Self::CompoundGrowth => {
                compound_growth(&CompoundGrowthInput::from_form(form)).map(|out| out.report())
            }
            Self::RetirementSavings => {
                retirement_savings(&RetirementInput::from_form(form)).map(|out| out.report())
            }
            Self::PensionContributions => {
                pension_contributions(&PensionContributionInput::from_form(form))
                    .map(|out| out.report())
            }
            Self::EffectiveTaxRate => {
                effective_tax_rate(&EffectiveTaxInput::from_form(form)).map(|out| out.report())
            }
            Self::DividendTax => {
                dividend_tax(&DividendTaxInput::from_form(form)).map(|out| out.report())
            }
            Self::StudentLoan => {
                student_loan(&StudentLoanInput::from_form(form)).map(|out| out.report())
            }
            Self::Commission => commission(&CommissionInput::from_form(form)).map(|out| out.report()),
            Self::Vat => vat(&VatInput::from_form(form)).map(|out| out.report()),
            Self::SalaryIncrease => {
                salary_increase(&SalaryIncreaseInput::from_form(form)).map(|out| out.report())
            }
            Self::RuleOf72 => rule_of_72(&RuleOf72Input::from_form(form)).map(|out| out.report()),
            Self::WeddingBudget => {
                wedding_budget(&WeddingBudgetInput::from_form(form)).map(|out| out.report())
            }
            Self::TravelBudget => {
                travel_budget(&TravelBudgetInput::from_form(form)).map(|out| out.report())
            }
        };
        debug!(
            calculator = self.id(),
            computable = report.is_some(),
            "evaluated calculator"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_form(kind: CalculatorKind) -> Form {
        let pairs: &[(&str, &str)] = match kind {
            CalculatorKind::Annuity => &[
                ("pensionPot", "200000"),
                ("annualRate", "5"),
                ("termYears", "25"),
            ],
            CalculatorKind::LoanComparison => &[
                ("loanAAmount", "10000"),
                ("loanARate", "6"),
                ("loanATerm", "5"),
                ("loanBAmount", "10000"),
                ("loanBRate", "5"),
                ("loanBTerm", "7"),
            ],
            CalculatorKind::Remortgage => &[
                ("outstandingBalance", "180000"),
                ("currentRate", "6"),
                ("remainingTerm", "20"),
                ("newRate", "4.5"),
                ("newTerm", "20"),
                ("fees", "999"),
                ("fixedPeriodYears", "2"),
            ],
            CalculatorKind::MortgageAffordability => &[
                ("annualIncome", "45000"),
                ("deposit", "30000"),
                ("annualRate", "4.5"),
                ("termYears", "25"),
            ],
            CalculatorKind::LoanToValue => &[("propertyValue", "300000"), ("loanAmount", "240000")],
            CalculatorKind::StampDuty => &[("price", "400000")],
            CalculatorKind::CouncilTax => &[("bandDCharge", "2171"), ("band", "C")],
            CalculatorKind::CompoundGrowth => &[
                ("initialDeposit", "5000"),
                ("monthlyContribution", "100"),
                ("annualRate", "5"),
                ("years", "10"),
            ],
            CalculatorKind::RetirementSavings => &[
                ("currentAge", "30"),
                ("retirementAge", "67"),
                ("currentPot", "20000"),
                ("monthlyContribution", "300"),
                ("annualRate", "5"),
            ],
            CalculatorKind::PensionContributions => &[
                ("salary", "40000"),
                ("employeePercent", "5"),
                ("employerPercent", "3"),
            ],
            CalculatorKind::EffectiveTaxRate => &[("grossIncome", "45000")],
            CalculatorKind::DividendTax => &[("otherIncome", "30000"), ("dividendIncome", "4000")],
            CalculatorKind::StudentLoan => &[("income", "40000"), ("plan", "plan 2")],
            CalculatorKind::Commission => &[("salesAmount", "50000"), ("commissionRate", "5")],
            CalculatorKind::Vat => &[("amount", "100"), ("vatRate", "20")],
            CalculatorKind::SalaryIncrease => &[("currentSalary", "35000"), ("increasePercent", "3")],
            CalculatorKind::RuleOf72 => &[("annualRate", "8")],
            CalculatorKind::WeddingBudget => &[("totalBudget", "18000"), ("guests", "90")],
            CalculatorKind::TravelBudget => &[
                ("flightsPerPerson", "250"),
                ("accommodationPerNight", "90"),
                ("nights", "5"),
                ("travellers", "2"),
            ],
        };
        Form::from_pairs(pairs.iter().copied())
    }

    #[test]
    fn ids_round_trip_and_are_unique() {
        for kind in CalculatorKind::ALL {
            assert_eq!(CalculatorKind::from_id(kind.id()), Some(kind));
            assert_eq!(
                serde_json::to_value(kind).expect("serializable"),
                serde_json::Value::String(kind.id().to_string())
            );
            let value = kind.to_possible_value().expect("not skipped");
            assert_eq!(value.get_name(), kind.id());
        }
        assert_eq!(CalculatorKind::from_id("pension-drawdown"), None);
    }

    #[test]
    fn every_calculator_evaluates_its_sample_deterministically() {
        for kind in CalculatorKind::ALL {
            let form = sample_form(kind);
            let first = kind.evaluate(&form);
            assert!(first.is_some(), "{} should be computable", kind.id());
            assert_eq!(first, kind.evaluate(&form), "{} not deterministic", kind.id());
        }
    }

    #[test]
    fn every_calculator_rejects_an_empty_form() {
        for kind in CalculatorKind::ALL {
            assert!(
                kind.evaluate(&Form::default()).is_none(),
                "{} computed from nothing",
                kind.id()
            );
        }
    }

    fn all_figures_finite(report: &Report) -> bool {
        report.metrics.iter().all(|m| m.value.is_finite())
            && report
                .breakdown
                .iter()
                .all(|b| b.taxable_in_band.is_finite() && b.tax_in_band.is_finite())
            && report
                .series
                .iter()
                .all(|p| p.value.is_finite() && p.contributed.is_finite() && p.interest.is_finite())
    }

    fn numeric_fields(kind: CalculatorKind) -> impl Iterator<Item = &'static str> {
        kind.fields()
            .iter()
            .filter(|field| field.kind == FieldKind::Number)
            .map(|field| field.name)
    }

    #[test]
    fn infinite_inputs_never_produce_infinite_figures() {
        for kind in CalculatorKind::ALL {
            for raw in ["Infinity", "-Infinity"] {
                for name in numeric_fields(kind) {
                    let form = sample_form(kind).with(name, raw);
                    if let Some(report) = kind.evaluate(&form) {
                        assert!(
                            all_figures_finite(&report),
                            "{} with {name}={raw} produced {:?}",
                            kind.id(),
                            report.metrics
                        );
                    }
                }

                let everything = numeric_fields(kind)
                    .fold(Form::default(), |form, name| form.with(name, raw));
                if let Some(report) = kind.evaluate(&everything) {
                    assert!(
                        all_figures_finite(&report),
                        "{} with every field {raw} produced {:?}",
                        kind.id(),
                        report.metrics
                    );
                }
            }
        }
    }

    #[test]
    fn sample_fields_are_declared() {
        for kind in CalculatorKind::ALL {
            let declared: Vec<&str> = kind.fields().iter().map(|field| field.name).collect();
            for name in sample_form(kind).field_names() {
                assert!(
                    declared.contains(&name),
                    "{} does not declare {name}",
                    kind.id()
                );
            }
        }
    }
}
