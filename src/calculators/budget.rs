use crate::core::ratio::percentage_of;
use crate::form::Form;
use crate::report::{Report, Unit};

/// Typical UK split of a wedding budget. Shares sum to one.
pub const WEDDING_CATEGORIES: [(&str, &str, f64); 9] = [
    ("venueCatering", "Venue and catering", 0.45),
    ("photography", "Photography and video", 0.12),
    ("attire", "Attire and beauty", 0.10),
    ("flowersDecor", "Flowers and decor", 0.08),
    ("entertainment", "Entertainment", 0.07),
    ("rings", "Rings", 0.03),
    ("transport", "Transport", 0.03),
    ("stationery", "Stationery", 0.02),
    ("contingency", "Contingency", 0.10),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeddingBudgetInput {
    pub total_budget: f64,
    pub guests: u32,
}

impl WeddingBudgetInput {
    pub fn from_form(form: &Form) -> Self {
        Self {
            total_budget: form.number("totalBudget"),
            guests: form.whole("guests"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeddingBudgetOutput {
    pub total_budget: f64,
    /// One amount per entry of [`WEDDING_CATEGORIES`], in order.
    pub allocations: Vec<f64>,
    pub guests: u32,
    pub cost_per_guest: Option<f64>,
}

pub fn wedding_budget(input: &WeddingBudgetInput) -> Option<WeddingBudgetOutput> {
    if input.total_budget <= 0.0 || !input.total_budget.is_finite() {
        return None;
    }
    let allocations = WEDDING_CATEGORIES
        .iter()
        .map(|(_, _, share)| percentage_of(input.total_budget, *share))
        .collect();
    let cost_per_guest = (input.guests > 0).then(|| input.total_budget / input.guests as f64);
    Some(WeddingBudgetOutput {
        total_budget: input.total_budget,
        allocations,
        guests: input.guests,
        cost_per_guest,
    })
}

impl WeddingBudgetOutput {
    pub fn report(&self) -> Report {
        let mut report = Report::new().currency("totalBudget", "Total budget", self.total_budget);
        for (&(key, label, _), &amount) in WEDDING_CATEGORIES.iter().zip(&self.allocations) {
            report = report.currency(key, label, amount);
        }
        match self.cost_per_guest {
            Some(per_guest) => report
                .metric("guests", "Guests", self.guests as f64, Unit::Count)
                .currency("costPerGuest", "Cost per guest", per_guest),
            None => report,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TravelBudgetInput {
    pub flights_per_person: f64,
    pub accommodation_per_night: f64,
    pub nights: u32,
    pub daily_spend_per_person: f64,
    /// Zero is treated as one traveller.
    pub travellers: u32,
    pub contingency_percent: f64,
}

impl TravelBudgetInput {
    pub fn from_form(form: &Form) -> Self {
        Self {
            flights_per_person: form.number("flightsPerPerson"),
            accommodation_per_night: form.number("accommodationPerNight"),
            nights: form.whole("nights"),
            daily_spend_per_person: form.number("dailySpendPerPerson"),
            travellers: form.whole("travellers"),
            contingency_percent: form.number("contingencyPercent"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TravelBudgetOutput {
    pub flights: f64,
    pub accommodation: f64,
    pub spending: f64,
    pub contingency: f64,
    pub total: f64,
    pub per_person: f64,
    pub per_day: f64,
}

/// Daily spending is counted for each night away.
pub fn travel_budget(input: &TravelBudgetInput) -> Option<TravelBudgetOutput> {
    if input.nights == 0 {
        return None;
    }
    let travellers = input.travellers.max(1) as f64;
    let nights = input.nights as f64;

    let flights = input.flights_per_person.max(0.0) * travellers;
    let accommodation = input.accommodation_per_night.max(0.0) * nights;
    let spending = input.daily_spend_per_person.max(0.0) * travellers * nights;
    let subtotal = flights + accommodation + spending;
    let contingency = percentage_of(subtotal, input.contingency_percent.max(0.0) / 100.0);
    let total = subtotal + contingency;
    if total <= 0.0 || !total.is_finite() {
        return None;
    }

    Some(TravelBudgetOutput {
        flights,
        accommodation,
        spending,
        contingency,
        total,
        per_person: total / travellers,
        per_day: total / nights,
    })
}

impl TravelBudgetOutput {
    pub fn report(&self) -> Report {
        Report::new()
            .currency("flights", "Flights", self.flights)
            .currency("accommodation", "Accommodation", self.accommodation)
            .currency("spending", "Daily spending", self.spending)
            .currency("contingency", "Contingency", self.contingency)
            .currency("total", "Total trip cost", self.total)
            .currency("perPerson", "Cost per person", self.per_person)
            .currency("perDay", "Cost per day", self.per_day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::format_metric;

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn wedding_category_shares_sum_to_one() {
        let total: f64 = WEDDING_CATEGORIES.iter().map(|(_, _, share)| share).sum();
        assert_approx(total, 1.0);
    }

    #[test]
    fn wedding_budget_splits_and_divides_by_guests() {
        let form = Form::default().with("totalBudget", "20000").with("guests", "80");
        let out = wedding_budget(&WeddingBudgetInput::from_form(&form)).expect("computable");
        assert_approx(out.allocations[0], 9_000.0);
        assert_approx(out.allocations.iter().sum::<f64>(), 20_000.0);
        assert_eq!(out.cost_per_guest, Some(250.0));
        let report = out.report();
        assert_approx(report.get("venueCatering").unwrap_or_default(), 9_000.0);
        assert_eq!(report.get("costPerGuest"), Some(250.0));
        let guests = report
            .metrics
            .iter()
            .find(|m| m.key == "guests")
            .expect("guest count");
        assert_eq!(guests.unit, Unit::Count);
        assert_eq!(format_metric(guests), "80");
    }

    #[test]
    fn wedding_without_guests_has_no_per_guest_cost() {
        let out = wedding_budget(&WeddingBudgetInput {
            total_budget: 15_000.0,
            guests: 0,
        })
        .expect("computable");
        assert_eq!(out.cost_per_guest, None);
        assert_eq!(out.report().get("costPerGuest"), None);
    }

    #[test]
    fn travel_budget_totals() {
        let form = Form::default()
            .with("flightsPerPerson", "300")
            .with("accommodationPerNight", "120")
            .with("nights", "7")
            .with("dailySpendPerPerson", "50")
            .with("travellers", "2")
            .with("contingencyPercent", "10");
        let out = travel_budget(&TravelBudgetInput::from_form(&form)).expect("computable");
        assert_approx(out.flights, 600.0);
        assert_approx(out.accommodation, 840.0);
        assert_approx(out.spending, 700.0);
        assert_approx(out.contingency, 214.0);
        assert_approx(out.total, 2_354.0);
        assert_approx(out.per_person, 1_177.0);
        assert_approx(out.per_day, 2_354.0 / 7.0);
    }

    #[test]
    fn travel_budget_needs_nights_and_costs() {
        let mut input = TravelBudgetInput {
            flights_per_person: 0.0,
            accommodation_per_night: 0.0,
            nights: 5,
            daily_spend_per_person: 0.0,
            travellers: 0,
            contingency_percent: 0.0,
        };
        assert!(travel_budget(&input).is_none());
        input.accommodation_per_night = 100.0;
        input.nights = 0;
        assert!(travel_budget(&input).is_none());
    }
}
