//! UK 2024/25 rates and thresholds (England and Northern Ireland).

use crate::core::{Band, BandTable};

pub const PERSONAL_ALLOWANCE: f64 = 12_570.0;
pub const ALLOWANCE_TAPER_THRESHOLD: f64 = 100_000.0;

/// Band limits are measured above the personal allowance. The additional
/// rate limit can stay fixed because the allowance is fully tapered away
/// before income reaches it.
pub const BASIC_RATE_BAND: f64 = 37_700.0;
pub const ADDITIONAL_RATE_THRESHOLD: f64 = 125_140.0;

pub const BASIC_RATE: f64 = 0.20;
pub const HIGHER_RATE: f64 = 0.40;
pub const ADDITIONAL_RATE: f64 = 0.45;

pub const DIVIDEND_ALLOWANCE: f64 = 500.0;
pub const DIVIDEND_BASIC_RATE: f64 = 0.0875;
pub const DIVIDEND_HIGHER_RATE: f64 = 0.3375;
pub const DIVIDEND_ADDITIONAL_RATE: f64 = 0.3935;

pub const NI_PRIMARY_THRESHOLD: f64 = 12_570.0;
pub const NI_UPPER_EARNINGS_LIMIT: f64 = 50_270.0;
pub const NI_MAIN_RATE: f64 = 0.08;
pub const NI_UPPER_RATE: f64 = 0.02;

pub const QUALIFYING_EARNINGS_LOWER: f64 = 6_240.0;
pub const QUALIFYING_EARNINGS_UPPER: f64 = 50_270.0;
pub const PENSION_BASIC_RELIEF: f64 = 0.20;

pub const FIRST_TIME_BUYER_PRICE_CAP: f64 = 625_000.0;
pub const ADDITIONAL_PROPERTY_SURCHARGE: f64 = 0.03;

pub fn income_tax_bands() -> BandTable {
    BandTable::new(vec![
        Band::capped("Basic rate", BASIC_RATE_BAND, BASIC_RATE),
        Band::capped("Higher rate", ADDITIONAL_RATE_THRESHOLD, HIGHER_RATE),
        Band::unbounded("Additional rate", ADDITIONAL_RATE),
    ])
}

pub fn dividend_bands() -> BandTable {
    BandTable::new(vec![
        Band::capped("Dividend basic rate", BASIC_RATE_BAND, DIVIDEND_BASIC_RATE),
        Band::capped(
            "Dividend higher rate",
            ADDITIONAL_RATE_THRESHOLD,
            DIVIDEND_HIGHER_RATE,
        ),
        Band::unbounded("Dividend additional rate", DIVIDEND_ADDITIONAL_RATE),
    ])
}

/// Employee Class 1 contributions, measured above the primary threshold.
pub fn national_insurance_bands() -> BandTable {
    BandTable::new(vec![
        Band::capped(
            "National Insurance main rate",
            NI_UPPER_EARNINGS_LIMIT - NI_PRIMARY_THRESHOLD,
            NI_MAIN_RATE,
        ),
        Band::unbounded("National Insurance upper rate", NI_UPPER_RATE),
    ])
}

pub fn stamp_duty_bands(first_time_buyer: bool, additional_property: bool) -> BandTable {
    let surcharge = if additional_property {
        ADDITIONAL_PROPERTY_SURCHARGE
    } else {
        0.0
    };
    let bands = if first_time_buyer {
        vec![
            Band::capped("Up to £425,000", 425_000.0, surcharge),
            Band::unbounded("£425,001 to £625,000", 0.05 + surcharge),
        ]
    } else {
        vec![
            Band::capped("Up to £250,000", 250_000.0, surcharge),
            Band::capped("£250,001 to £925,000", 925_000.0, 0.05 + surcharge),
            Band::capped("£925,001 to £1.5m", 1_500_000.0, 0.10 + surcharge),
            Band::unbounded("Above £1.5m", 0.12 + surcharge),
        ]
    };
    BandTable::new(bands)
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum StudentLoanPlan {
    Plan1,
    Plan2,
    Plan4,
    Plan5,
    Postgraduate,
}

impl StudentLoanPlan {
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase().replace(['-', '_', ' '], "");
        match normalized.trim_start_matches("plan") {
            "1" => Some(Self::Plan1),
            "2" => Some(Self::Plan2),
            "4" => Some(Self::Plan4),
            "5" => Some(Self::Plan5),
            "pg" | "pgl" | "postgraduate" | "postgrad" => Some(Self::Postgraduate),
            _ => None,
        }
    }

    pub fn threshold(self) -> f64 {
        match self {
            Self::Plan1 => 24_990.0,
            Self::Plan2 => 27_295.0,
            Self::Plan4 => 31_395.0,
            Self::Plan5 => 25_000.0,
            Self::Postgraduate => 21_000.0,
        }
    }

    pub fn rate(self) -> f64 {
        match self {
            Self::Postgraduate => 0.06,
            _ => 0.09,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Plan1 => "Plan 1",
            Self::Plan2 => "Plan 2",
            Self::Plan4 => "Plan 4",
            Self::Plan5 => "Plan 5",
            Self::Postgraduate => "Postgraduate",
        }
    }

    /// Single repayment band above the plan threshold.
    pub fn bands(self) -> BandTable {
        BandTable::new(vec![Band::unbounded(self.label(), self.rate())])
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub enum CouncilTaxBand {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

impl CouncilTaxBand {
    pub const ALL: [Self; 8] = [
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::E,
        Self::F,
        Self::G,
        Self::H,
    ];

    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let letter = raw
            .strip_prefix("Band ")
            .or_else(|| raw.strip_prefix("band "))
            .unwrap_or(raw);
        Self::ALL
            .into_iter()
            .find(|band| band.letter().eq_ignore_ascii_case(letter))
    }

    pub fn letter(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
            Self::F => "F",
            Self::G => "G",
            Self::H => "H",
        }
    }

    /// Charge as a multiple of Band D, in ninths.
    pub fn ratio(self) -> f64 {
        let ninths = match self {
            Self::A => 6.0,
            Self::B => 7.0,
            Self::C => 8.0,
            Self::D => 9.0,
            Self::E => 11.0,
            Self::F => 13.0,
            Self::G => 15.0,
            Self::H => 18.0,
        };
        ninths / 9.0
    }

    /// Upper bound of the 1 April 1991 valuation for the band.
    pub fn valuation_limit(self) -> Option<f64> {
        match self {
            Self::A => Some(40_000.0),
            Self::B => Some(52_000.0),
            Self::C => Some(68_000.0),
            Self::D => Some(88_000.0),
            Self::E => Some(120_000.0),
            Self::F => Some(160_000.0),
            Self::G => Some(320_000.0),
            Self::H => None,
        }
    }

    pub fn from_valuation(value: f64) -> Self {
        Self::ALL
            .into_iter()
            .find(|band| band.valuation_limit().is_none_or(|limit| value <= limit))
            .unwrap_or(Self::H)
    }
}
